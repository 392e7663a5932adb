//! The handful of reads this service performs, typed on top of [`Backend`].

use serde_json::Value;

use innkeep_auth::{Profile, Role};
use innkeep_core::{Room, RoomSummary, UserId};

use crate::backend::{Backend, BackendError, Direction, Query};

/// Cheapest possible "is the rooms table queryable" probe.
pub fn rooms_probe() -> Query {
    Query::table(Room::TABLE).columns(["id"]).limit(1)
}

pub fn active_rooms() -> Query {
    Query::table(Room::TABLE)
        .columns(RoomSummary::COLUMNS)
        .eq("is_active", true)
        .order_by("room_number", Direction::Asc)
}

pub fn profile_role(user_id: UserId) -> Query {
    Query::table(Profile::TABLE)
        .columns(["role"])
        .eq("id", user_id.to_string())
}

pub async fn probe_rooms(backend: &dyn Backend) -> Result<(), BackendError> {
    backend.select(&rooms_probe()).await.map(|_| ())
}

/// Active rooms ordered by room number.
pub async fn list_active_rooms(backend: &dyn Backend) -> Result<Vec<RoomSummary>, BackendError> {
    let rows = backend.select(&active_rooms()).await?;
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| BackendError::Decode(format!("room row: {e}"))))
        .collect()
}

/// Profile of `user_id`, if one exists.
///
/// A role outside the known set is a decode error, not a profile.
pub async fn find_profile(backend: &dyn Backend, user_id: UserId) -> Result<Option<Profile>, BackendError> {
    let Some(row) = backend.select_maybe_one(&profile_role(user_id)).await? else {
        return Ok(None);
    };

    let role = row
        .get("role")
        .and_then(Value::as_str)
        .ok_or_else(|| BackendError::Decode("profile row has no role".to_string()))?;
    let role: Role = role
        .parse()
        .map_err(|e| BackendError::Decode(format!("profile role: {e}")))?;

    Ok(Some(Profile { id: user_id, role }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryBackend;
    use innkeep_core::RoomId;
    use serde_json::json;

    fn room(number: &str, active: bool) -> Room {
        Room {
            id: RoomId::new(),
            room_number: number.to_string(),
            room_type: "twin".to_string(),
            base_price: 90.0,
            breakfast_price: 12.0,
            is_active: active,
        }
    }

    #[tokio::test]
    async fn lists_only_active_rooms_in_room_number_order() {
        let backend = InMemoryBackend::new();
        backend.insert_room(&room("204", true));
        backend.insert_room(&room("101", true));
        backend.insert_room(&room("150", false));

        let rooms = list_active_rooms(&backend).await.unwrap();
        let numbers: Vec<&str> = rooms.iter().map(|r| r.room_number.as_str()).collect();
        assert_eq!(numbers, vec!["101", "204"]);
    }

    #[tokio::test]
    async fn malformed_room_row_is_a_decode_error() {
        let backend = InMemoryBackend::new();
        backend.insert_row(Room::TABLE, json!({"id": "nope", "room_number": "1", "is_active": true}));

        let err = list_active_rooms(&backend).await.unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[tokio::test]
    async fn finds_profile_role() {
        let backend = InMemoryBackend::new();
        let id = UserId::new();
        backend.insert_profile(Profile { id, role: Role::Manager });
        backend.insert_profile(Profile { id: UserId::new(), role: Role::Admin });

        let profile = find_profile(&backend, id).await.unwrap();
        assert_eq!(profile, Some(Profile { id, role: Role::Manager }));
        assert_eq!(find_profile(&backend, UserId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unknown_role_is_not_a_profile() {
        let backend = InMemoryBackend::new();
        let id = UserId::new();
        backend.insert_row(Profile::TABLE, json!({"id": id.to_string(), "role": "GUEST"}));

        assert!(matches!(find_profile(&backend, id).await, Err(BackendError::Decode(_))));
    }
}
