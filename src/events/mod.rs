mod pointer;
mod window;

pub use pointer::wire_pointer_move;
pub use window::{wire_fullscreen_toggle, wire_resize, ResizeWiring};
