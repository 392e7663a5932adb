//! Validate the environment before deploying.
//!
//! Checks the server's required backend credentials, then the public
//! client-context pair. Exits non-zero naming the first missing key.

use anyhow::Context;

use innkeep_infra::config::{require_env, PUBLIC_REQUIRED_ENV, SERVER_REQUIRED_ENV};

fn main() -> anyhow::Result<()> {
    innkeep_observability::init();

    let groups: [(&str, &[&str]); 2] = [
        ("server", &SERVER_REQUIRED_ENV),
        ("public client", &PUBLIC_REQUIRED_ENV),
    ];

    for (group, keys) in groups {
        require_env(keys).with_context(|| format!("{group} environment is incomplete"))?;
        tracing::info!(group, keys = keys.len(), "environment ok");
    }

    Ok(())
}
