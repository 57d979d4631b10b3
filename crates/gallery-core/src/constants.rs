// Shared tuning constants used by both web and native frontends.

// Displacement field
pub const FIELD_SIZE: usize = 32; // cells per side of each per-image grid
pub const FIELD_DECAY: f32 = 0.9; // per-frame damping for field cells and pointer velocity
pub const FIELD_INJECT_GAIN: f32 = 100.0; // velocity -> cell energy multiplier
pub const FIELD_MIN_DISTANCE: f32 = 0.5; // grid cells; power saturates inside this radius
pub const FIELD_NOISE_MAX: f32 = 255.0; // upper bound of the startup noise
pub const FIELD_ALPHA: f32 = 255.0; // constant alpha channel
pub const FIELD_CHANNELS: usize = 4;

// Camera calibration: one world unit == one CSS pixel at PERSPECTIVE
pub const PERSPECTIVE: f32 = 1000.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 2000.0;
pub const MAX_PIXEL_RATIO: f32 = 2.0; // drawing buffer density cap on high-DPI displays

// Smooth scroll
pub const SCROLL_EASE: f32 = 0.1; // fraction of the remaining distance covered per frame
pub const SCROLL_SETTLE_EPSILON: f32 = 0.01; // px

// Plane mesh and shading
pub const PLANE_SEGMENTS: u32 = 100; // subdivisions per side of the unit plane
pub const DISPLACEMENT_STRENGTH: f32 = 0.02; // uv offset per unit of field energy

// Uniform fallback when a frame delta is not available
pub const NOMINAL_FRAME_SEC: f32 = 1.0 / 60.0;
