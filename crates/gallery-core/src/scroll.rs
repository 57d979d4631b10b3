use crate::constants::SCROLL_SETTLE_EPSILON;

/// Per-frame smooth-scroll collaborator.
///
/// The frame step calls [`SmoothScroll::animate`] before any element layout is
/// read, so element rects always reflect the current frame's scroll offset.
pub trait SmoothScroll {
    fn animate(&mut self);
}

impl<T: SmoothScroll + ?Sized> SmoothScroll for Box<T> {
    fn animate(&mut self) {
        (**self).animate()
    }
}

/// Move `current` a fraction `ease` of the way toward `target`.
#[inline]
pub fn ease_toward(current: f32, target: f32, ease: f32) -> f32 {
    current + (target - current) * ease
}

/// Exponential scroll follower shared by the DOM and wheel scrollers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEase {
    current: f32,
    target: f32,
    ease: f32,
}

impl ScrollEase {
    pub fn new(ease: f32) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            ease: ease.clamp(f32::EPSILON, 1.0),
        }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Place both offsets at `offset` without easing.
    pub fn jump_to(&mut self, offset: f32) {
        if offset.is_finite() {
            self.current = offset;
            self.target = offset;
        }
    }

    /// Clamp the target into `[0, max]`, e.g. after content or viewport changes.
    pub fn clamp_target(&mut self, max: f32) {
        self.target = self.target.clamp(0.0, max.max(0.0));
    }

    /// Advance one frame and return the new offset. Snaps once within
    /// [`SCROLL_SETTLE_EPSILON`] so the follower settles in finite time.
    pub fn step(&mut self) -> f32 {
        let next = ease_toward(self.current, self.target, self.ease);
        self.current = if (self.target - next).abs() < SCROLL_SETTLE_EPSILON {
            self.target
        } else {
            next
        };
        self.current
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}
