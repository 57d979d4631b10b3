pub mod camera;
pub mod config;
pub mod constants;
pub mod field;
pub mod frame;
pub mod geometry;
pub mod item;
pub mod layout;
pub mod pointer;
pub mod render;
pub mod scroll;
pub mod sink;
pub mod viewport;

pub static PLANE_WGSL: &str = include_str!("../shaders/plane.wgsl");

pub use camera::*;
pub use config::*;
pub use field::DisplacementField;
pub use frame::*;
pub use geometry::*;
pub use item::*;
pub use layout::*;
pub use pointer::*;
pub use render::{PlaneRenderer, RenderError};
pub use scroll::*;
pub use sink::*;
pub use viewport::*;
