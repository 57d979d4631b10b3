use crate::viewport::ViewportState;
use glam::Vec2;

/// Process-wide pointer state.
///
/// Written by the pointer-move handler ([`PointerState::on_move`]) and by the
/// once-per-frame velocity decay; read by every mesh item.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Viewport-normalized position (not clamped).
    pub x: f32,
    pub y: f32,
    pub prev_x: f32,
    pub prev_y: f32,
    /// Frame-to-frame velocity in normalized units; decayed, never reset.
    pub vx: f32,
    pub vy: f32,
    /// Raw client coordinates in CSS pixels.
    pub window_x: f32,
    pub window_y: f32,
}

impl PointerState {
    /// Apply one pointer-move event. Last write wins between frames.
    pub fn on_move(&mut self, client_x: f32, client_y: f32, viewport: &ViewportState) {
        self.window_x = client_x;
        self.window_y = client_y;

        self.x = client_x / viewport.width();
        self.y = client_y / viewport.height();

        self.vx = self.x - self.prev_x;
        self.vy = self.y - self.prev_y;

        self.prev_x = self.x;
        self.prev_y = self.y;
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vx, self.vy)
    }

    #[inline]
    pub fn window_pos(&self) -> Vec2 {
        Vec2::new(self.window_x, self.window_y)
    }

    #[inline]
    pub fn normalized(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn decay_velocity(&mut self, factor: f32) {
        self.vx *= factor;
        self.vy *= factor;
    }
}
