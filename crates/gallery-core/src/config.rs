use crate::constants::*;

/// Parameters of the per-frame field update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldTuning {
    /// Multiplier applied to every `r`/`g` cell and to the pointer velocity each frame.
    pub decay: f32,
    /// Scales pointer velocity into injected cell energy.
    pub inject_gain: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            decay: FIELD_DECAY,
            inject_gain: FIELD_INJECT_GAIN,
        }
    }
}

/// Runtime configuration shared by the web and native frontends.
///
/// Every field defaults to the matching constant in [`crate::constants`];
/// frontends may override individual values before building a [`crate::Gallery`].
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    pub field_size: usize,
    pub field: FieldTuning,
    pub perspective: f32,
    pub max_pixel_ratio: f32,
    pub scroll_ease: f32,
    pub plane_segments: u32,
    pub displacement_strength: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            field_size: FIELD_SIZE,
            field: FieldTuning::default(),
            perspective: PERSPECTIVE,
            max_pixel_ratio: MAX_PIXEL_RATIO,
            scroll_ease: SCROLL_EASE,
            plane_segments: PLANE_SEGMENTS,
            displacement_strength: DISPLACEMENT_STRENGTH,
        }
    }
}

impl GalleryConfig {
    /// Clamp values that would otherwise produce a frozen or exploding field.
    pub fn sanitized(mut self) -> Self {
        self.field_size = self.field_size.clamp(4, 256);
        if !(self.field.decay.is_finite() && (0.0..1.0).contains(&self.field.decay)) {
            self.field.decay = FIELD_DECAY;
        }
        if !self.field.inject_gain.is_finite() {
            self.field.inject_gain = FIELD_INJECT_GAIN;
        }
        if !(self.perspective.is_finite() && self.perspective > 0.0) {
            self.perspective = PERSPECTIVE;
        }
        if !(self.max_pixel_ratio.is_finite() && self.max_pixel_ratio >= 1.0) {
            self.max_pixel_ratio = MAX_PIXEL_RATIO;
        }
        if !(self.scroll_ease.is_finite() && self.scroll_ease > 0.0 && self.scroll_ease <= 1.0) {
            self.scroll_ease = SCROLL_EASE;
        }
        self.plane_segments = self.plane_segments.max(1);
        if !self.displacement_strength.is_finite() {
            self.displacement_strength = DISPLACEMENT_STRENGTH;
        }
        self
    }
}
