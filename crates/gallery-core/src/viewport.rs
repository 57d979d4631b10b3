use crate::constants::MAX_PIXEL_RATIO;
use glam::Vec2;

/// Window size in CSS pixels plus the derived aspect ratio.
///
/// Width, height and aspect are only ever written together through
/// [`ViewportState::new`] and [`ViewportState::resize`], so the aspect ratio
/// can never lag behind a resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    width: f32,
    height: f32,
    aspect_ratio: f32,
    device_pixel_ratio: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl ViewportState {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        let mut v = Self {
            width: 1.0,
            height: 1.0,
            aspect_ratio: 1.0,
            device_pixel_ratio: 1.0,
        };
        v.resize(width, height, device_pixel_ratio);
        v
    }

    /// Record a new window size. Non-positive extents are clamped to one pixel.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);
        self.aspect_ratio = self.width / self.height;
        self.device_pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    /// Device pixel ratio capped to `max` (2x by default) to avoid oversampling.
    #[inline]
    pub fn pixel_ratio(&self, max: f32) -> f32 {
        self.device_pixel_ratio.min(max)
    }

    /// Drawing-buffer size in physical pixels using the default density cap.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        self.drawing_buffer_size_capped(MAX_PIXEL_RATIO)
    }

    pub fn drawing_buffer_size_capped(&self, max_ratio: f32) -> (u32, u32) {
        let pr = self.pixel_ratio(max_ratio);
        let w = (self.width * pr) as u32;
        let h = (self.height * pr) as u32;
        (w.max(1), h.max(1))
    }
}

#[inline]
fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() {
        v.max(1.0)
    } else {
        1.0
    }
}
