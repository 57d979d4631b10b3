use crate::viewport::ViewportState;
use glam::{Mat4, Vec2, Vec3};

/// Element bounding box in viewport CSS pixels (as returned by
/// `getBoundingClientRect`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let all_finite = self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        if !all_finite {
            return Err(LayoutError::NonFinite);
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(LayoutError::Degenerate {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("element rect has no area ({width}x{height})")]
    Degenerate { width: f32, height: f32 },
    #[error("element rect contains non-finite values")]
    NonFinite,
}

/// World-space placement of a unit plane covering one element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaneLayout {
    /// Plane centre; DOM Y grows downward, world Y grows upward.
    pub offset: Vec2,
    pub sizes: Vec2,
}

impl PlaneLayout {
    pub fn from_rect(rect: &ElementRect, viewport: &ViewportState) -> Result<Self, LayoutError> {
        rect.validate()?;
        let offset = Vec2::new(
            rect.left - viewport.width() / 2.0 + rect.width / 2.0,
            -rect.top + viewport.height() / 2.0 - rect.height / 2.0,
        );
        Ok(Self {
            offset,
            sizes: Vec2::new(rect.width, rect.height),
        })
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.offset.extend(0.0)
    }

    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.sizes.extend(1.0)
    }

    /// Model matrix: scale the unit plane to the element, then move it into place.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale(), glam::Quat::IDENTITY, self.position())
    }
}

/// Pointer position relative to `rect`, normalized and clamped to `[0, 1]`.
pub fn element_relative_pointer(rect: &ElementRect, window_pos: Vec2) -> Result<Vec2, LayoutError> {
    rect.validate()?;
    let x = (window_pos.x - rect.left) / rect.width;
    let y = (window_pos.y - rect.top) / rect.height;
    Ok(Vec2::new(clamp01(x), clamp01(y)))
}

#[inline]
fn clamp01(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
