//! Room rows as stored by the backend.

use serde::{Deserialize, Serialize};

use crate::RoomId;

/// A bookable room.
///
/// Created, priced and retired entirely inside the backend; this layer only
/// reads rows where `is_active` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_number: String,
    pub room_type: String,
    pub base_price: f64,
    pub breakfast_price: f64,
    pub is_active: bool,
}

impl Room {
    /// Backend table holding room rows.
    pub const TABLE: &'static str = "rooms";

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id,
            room_number: self.room_number.clone(),
            room_type: self.room_type.clone(),
            base_price: self.base_price,
            breakfast_price: self.breakfast_price,
        }
    }
}

/// Public listing shape of a room (what `GET /api/rooms` returns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: RoomId,
    pub room_number: String,
    pub room_type: String,
    pub base_price: f64,
    pub breakfast_price: f64,
}

impl RoomSummary {
    /// Columns selected for a listing, in wire order.
    pub const COLUMNS: [&'static str; 5] =
        ["id", "room_number", "room_type", "base_price", "breakfast_price"];
}

impl From<Room> for RoomSummary {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            room_number: room.room_number,
            room_type: room.room_type,
            base_price: room.base_price,
            breakfast_price: room.breakfast_price,
        }
    }
}
