// Host-side tests for DOM-to-world layout reconciliation and camera calibration.

use gallery_core::{
    element_relative_pointer, Camera, ElementRect, LayoutError, PlaneLayout, ViewportState,
};
use glam::{Vec2, Vec3, Vec4};

fn full_hd() -> ViewportState {
    ViewportState::new(1920.0, 1080.0, 1.0)
}

#[test]
fn element_maps_to_centered_world_offset() {
    let rect = ElementRect::new(300.0, 50.0, 200.0, 100.0);
    let layout = PlaneLayout::from_rect(&rect, &full_hd()).unwrap();
    assert_eq!(layout.offset, Vec2::new(-560.0, 440.0));
    assert_eq!(layout.scale(), Vec3::new(200.0, 100.0, 1.0));
    assert_eq!(layout.position(), Vec3::new(-560.0, 440.0, 0.0));
}

#[test]
fn element_covering_viewport_sits_at_origin() {
    let rect = ElementRect::new(0.0, 0.0, 1920.0, 1080.0);
    let layout = PlaneLayout::from_rect(&rect, &full_hd()).unwrap();
    assert_eq!(layout.offset, Vec2::ZERO);
}

#[test]
fn transform_scales_unit_plane_onto_element() {
    let rect = ElementRect::new(300.0, 50.0, 200.0, 100.0);
    let layout = PlaneLayout::from_rect(&rect, &full_hd()).unwrap();
    let m = layout.transform();
    let top_right = m * Vec4::new(0.5, 0.5, 0.0, 1.0);
    assert_eq!(top_right, Vec4::new(-460.0, 490.0, 0.0, 1.0));
}

#[test]
fn degenerate_rect_is_rejected() {
    let rect = ElementRect::new(10.0, 10.0, 0.0, 100.0);
    assert!(matches!(
        PlaneLayout::from_rect(&rect, &full_hd()),
        Err(LayoutError::Degenerate { .. })
    ));
    let nan = ElementRect::new(f32::NAN, 0.0, 10.0, 10.0);
    assert_eq!(
        element_relative_pointer(&nan, Vec2::ZERO),
        Err(LayoutError::NonFinite)
    );
}

#[test]
fn pointer_is_clamped_to_element() {
    let rect = ElementRect::new(100.0, 100.0, 200.0, 100.0);
    let left_above = element_relative_pointer(&rect, Vec2::new(40.0, 50.0)).unwrap();
    assert_eq!(left_above, Vec2::new(0.0, 0.0));
    let right_below = element_relative_pointer(&rect, Vec2::new(380.0, 240.0)).unwrap();
    assert_eq!(right_below, Vec2::new(1.0, 1.0));
    let inside = element_relative_pointer(&rect, Vec2::new(150.0, 175.0)).unwrap();
    assert_eq!(inside, Vec2::new(0.25, 0.75));
}

#[test]
fn camera_fov_matches_pixel_mapping() {
    let cam = Camera::calibrated(&full_hd(), 1000.0);
    assert!((cam.fov_degrees() - 56.738).abs() < 0.01, "{}", cam.fov_degrees());
    assert!((cam.visible_height_at_focal_plane() - 1080.0).abs() < 0.05);
    assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
}

#[test]
fn camera_follows_viewport_resize() {
    let mut viewport = full_hd();
    let mut cam = Camera::calibrated(&viewport, 1000.0);
    viewport.resize(1280.0, 720.0, 2.0);
    cam.calibrate(&viewport);
    assert!((cam.fov_degrees() - 39.598).abs() < 0.01, "{}", cam.fov_degrees());
    assert!((cam.visible_height_at_focal_plane() - 720.0).abs() < 0.05);
    assert!((cam.aspect - 1280.0 / 720.0).abs() < 1e-6);
}

#[test]
fn focal_plane_pixels_project_to_screen_pixels() {
    let viewport = full_hd();
    let cam = Camera::calibrated(&viewport, 1000.0);
    // World point at the top edge of the viewport lands on NDC y = 1.
    let clip = cam.view_projection() * Vec4::new(960.0, 540.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!((ndc.x - 1.0).abs() < 1e-3, "{:?}", ndc);
    assert!((ndc.y - 1.0).abs() < 1e-3, "{:?}", ndc);
}

#[test]
fn viewport_clamps_degenerate_sizes() {
    let v = ViewportState::new(0.0, -5.0, f32::NAN);
    assert_eq!(v.width(), 1.0);
    assert_eq!(v.height(), 1.0);
    assert_eq!(v.aspect_ratio(), 1.0);
    assert_eq!(v.device_pixel_ratio(), 1.0);

    let hi_dpi = ViewportState::new(1000.0, 500.0, 3.0);
    assert_eq!(hi_dpi.drawing_buffer_size(), (2000, 1000));
}
