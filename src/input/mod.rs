pub mod handler;
pub mod pointer;

pub use handler::{InputHandler, KeyAction};
pub use pointer::rank_directions;
