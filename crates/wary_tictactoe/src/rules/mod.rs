//! Game rules for N×N tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the session and selector layers can reuse them.

mod draw;
mod win;

pub use draw::is_drawn;
pub use win::winner;
