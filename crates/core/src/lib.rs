//! `innkeep-core`: data model shared by every Innkeep crate.
//!
//! Everything here is owned by the external backend; this crate only
//! describes the shapes this layer reads. No IO.

pub mod error;
pub mod id;
pub mod room;

pub use error::{DomainError, DomainResult};
pub use id::{RoomId, UserId};
pub use room::{Room, RoomSummary};
