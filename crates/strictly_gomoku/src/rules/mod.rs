//! Game rules for five-in-a-row.
//!
//! Pure functions over a [`Board`](super::Board). Rules are kept apart from
//! board storage so the orchestrator and the invariants can share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WIN_LENGTH, check_win, run_length};
