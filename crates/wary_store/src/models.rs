//! Database models.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::schema;

/// A recorded losing position.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::losing_positions)]
pub struct LosingPosition {
    /// Board serialization, as produced by the game engine.
    board_key: String,
    /// Serialization scheme the key was written with.
    key_format: i32,
    /// When the position was first recorded.
    recorded_at: NaiveDateTime,
}

/// Insertable losing position.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::losing_positions)]
pub struct NewLosingPosition {
    board_key: String,
    key_format: i32,
}
