// Host-side tests for eased scrolling and pointer bookkeeping.

use gallery_core::{ease_toward, PointerState, ScrollEase, SmoothScroll, ViewportState};
use glam::Vec2;

#[test]
fn ease_covers_a_fixed_fraction_each_frame() {
    assert_eq!(ease_toward(0.0, 100.0, 0.1), 10.0);
    assert_eq!(ease_toward(90.0, 100.0, 0.5), 95.0);
}

#[test]
fn scroll_settles_on_target_in_finite_frames() {
    let mut s = ScrollEase::new(0.1);
    s.set_target(500.0);
    let mut frames = 0;
    let mut last = s.current();
    while !s.is_settled() {
        let y = s.step();
        assert!(y >= last);
        assert!(y <= 500.0);
        last = y;
        frames += 1;
        assert!(frames < 1000, "did not settle");
    }
    assert_eq!(s.current(), 500.0);
}

#[test]
fn scroll_target_is_clamped_and_ignores_nan() {
    let mut s = ScrollEase::new(0.2);
    s.set_target(f32::NAN);
    assert_eq!(s.target(), 0.0);
    s.set_target(2000.0);
    s.clamp_target(1200.0);
    assert_eq!(s.target(), 1200.0);
    s.set_target(-30.0);
    s.clamp_target(1200.0);
    assert_eq!(s.target(), 0.0);
    s.jump_to(300.0);
    assert_eq!((s.current(), s.target()), (300.0, 300.0));
}

#[test]
fn boxed_scrollers_animate_through_the_trait() {
    struct Counter(u32);
    impl SmoothScroll for Counter {
        fn animate(&mut self) {
            self.0 += 1;
        }
    }
    let mut boxed: Box<Counter> = Box::new(Counter(0));
    boxed.animate();
    SmoothScroll::animate(&mut boxed);
    assert_eq!(boxed.0, 2);
}

#[test]
fn pointer_velocity_is_last_move_delta_in_viewport_units() {
    let viewport = ViewportState::new(1000.0, 500.0, 1.0);
    let mut p = PointerState::default();
    p.on_move(100.0, 100.0, &viewport);
    p.on_move(200.0, 150.0, &viewport);
    assert_eq!(p.normalized(), Vec2::new(0.2, 0.3));
    assert!((p.vx - 0.1).abs() < 1e-6);
    assert!((p.vy - 0.1).abs() < 1e-6);
    assert_eq!(p.window_pos(), Vec2::new(200.0, 150.0));
    assert_eq!((p.prev_x, p.prev_y), (p.x, p.y));
}

#[test]
fn pointer_velocity_decays_but_position_stays() {
    let viewport = ViewportState::new(100.0, 100.0, 1.0);
    let mut p = PointerState::default();
    p.on_move(50.0, 50.0, &viewport);
    p.decay_velocity(0.9);
    p.decay_velocity(0.9);
    assert!((p.vx - 0.5 * 0.81).abs() < 1e-6);
    assert_eq!(p.normalized(), Vec2::new(0.5, 0.5));
}
