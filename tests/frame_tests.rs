// Host-side tests for the per-frame orchestration: scroll ordering, pointer
// velocity decay, layout sync and per-item failure isolation.

use gallery_core::{
    Camera, ElementRect, ElementSource, FixedTicks, FrameScheduler, FrameUniforms, Gallery,
    GalleryConfig, PlaneId, PlaneSink, PointerState, SceneRenderer, SmoothScroll, ViewportState,
};
use glam::{Mat4, Vec2, Vec3};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, thiserror::Error)]
#[error("mock render failure")]
struct MockError;

#[derive(Default)]
struct RecordingRenderer {
    log: Rc<RefCell<Vec<String>>>,
    transforms: Vec<(PlaneId, Mat4)>,
    uploads: Vec<(PlaneId, Vec<f32>)>,
    renders: usize,
    last_uniforms: Option<FrameUniforms>,
}

impl PlaneSink for RecordingRenderer {
    fn set_transform(&mut self, plane: PlaneId, transform: Mat4) {
        self.transforms.push((plane, transform));
    }

    fn upload_field(&mut self, plane: PlaneId, _size: usize, texels: &[f32]) {
        self.uploads.push((plane, texels.to_vec()));
    }
}

impl SceneRenderer for RecordingRenderer {
    type Error = MockError;

    fn render(&mut self, _camera: &Camera, frame: &FrameUniforms) -> Result<(), MockError> {
        self.log.borrow_mut().push("render".into());
        self.renders += 1;
        self.last_uniforms = Some(*frame);
        Ok(())
    }
}

/// Element whose rect moves with a shared scroll offset.
struct ScrolledElement {
    rect: ElementRect,
    scroll: Rc<Cell<f32>>,
    reads: Rc<RefCell<Vec<String>>>,
}

impl ElementSource for ScrolledElement {
    fn bounding_rect(&self) -> ElementRect {
        self.reads.borrow_mut().push("rect".into());
        let mut r = self.rect;
        r.top -= self.scroll.get();
        r
    }
}

struct StepScroll {
    scroll: Rc<Cell<f32>>,
    step: f32,
    log: Rc<RefCell<Vec<String>>>,
}

impl SmoothScroll for StepScroll {
    fn animate(&mut self) {
        self.log.borrow_mut().push("scroll".into());
        self.scroll.set(self.scroll.get() + self.step);
    }
}

struct Fixture {
    gallery: Gallery<ScrolledElement>,
    scroll: StepScroll,
    renderer: RecordingRenderer,
    pointer: PointerState,
    viewport: ViewportState,
    log: Rc<RefCell<Vec<String>>>,
}

fn fixture(rects: &[ElementRect], scroll_step: f32) -> Fixture {
    let viewport = ViewportState::new(1920.0, 1080.0, 1.0);
    let log = Rc::new(RefCell::new(Vec::new()));
    let offset = Rc::new(Cell::new(0.0));
    let mut gallery = Gallery::new(GalleryConfig::default(), &viewport);
    for (i, rect) in rects.iter().enumerate() {
        gallery.add_item(
            ScrolledElement {
                rect: *rect,
                scroll: offset.clone(),
                reads: log.clone(),
            },
            PlaneId(i),
        );
    }
    Fixture {
        gallery,
        scroll: StepScroll {
            scroll: offset,
            step: scroll_step,
            log: log.clone(),
        },
        renderer: RecordingRenderer {
            log: log.clone(),
            ..Default::default()
        },
        pointer: PointerState::default(),
        viewport,
        log,
    }
}

impl Fixture {
    fn step(&mut self) -> gallery_core::FrameReport {
        self.gallery
            .step(
                &mut self.scroll,
                &mut self.pointer,
                &self.viewport,
                &mut self.renderer,
            )
            .unwrap()
    }
}

#[test]
fn scroll_runs_before_layout_reads_and_render_runs_last() {
    let mut fx = fixture(
        &[
            ElementRect::new(0.0, 0.0, 100.0, 100.0),
            ElementRect::new(0.0, 200.0, 100.0, 100.0),
        ],
        10.0,
    );
    fx.step();
    let log = fx.log.borrow();
    assert_eq!(log.as_slice(), ["scroll", "rect", "rect", "render"]);
}

#[test]
fn layout_reflects_this_frames_scroll_offset() {
    let mut fx = fixture(&[ElementRect::new(860.0, 490.0, 200.0, 100.0)], 40.0);
    fx.step();
    let layout = fx.gallery.items()[0].layout();
    // top = 490 - 40 = 450 -> world y = -450 + 540 - 50 = 40
    assert_eq!(layout.offset, Vec2::new(0.0, 40.0));
    let (plane, m) = fx.renderer.transforms[0];
    assert_eq!(plane, PlaneId(0));
    assert_eq!(m.w_axis.truncate(), Vec3::new(0.0, 40.0, 0.0));
}

#[test]
fn velocity_decays_once_per_frame_regardless_of_item_count() {
    let rects: Vec<_> = (0..5)
        .map(|i| ElementRect::new(0.0, i as f32 * 150.0, 100.0, 100.0))
        .collect();
    let mut fx = fixture(&rects, 0.0);
    fx.pointer.on_move(192.0, 108.0, &fx.viewport); // v = (0.1, 0.1)
    for k in 1..=4 {
        fx.step();
        let expected = 0.1 * 0.9_f32.powi(k);
        assert!((fx.pointer.vx - expected).abs() < 1e-6, "frame {}", k);
        assert!((fx.pointer.vy - expected).abs() < 1e-6, "frame {}", k);
    }
}

#[test]
fn injected_energy_follows_the_decaying_velocity() {
    let mut fx = fixture(&[ElementRect::new(100.0, 100.0, 400.0, 300.0)], 0.0);
    fx.pointer.on_move(250.0, 200.0, &fx.viewport);
    fx.pointer.on_move(300.0, 250.0, &fx.viewport);
    let (v0x, v0y) = (fx.pointer.vx, fx.pointer.vy);
    let gain = fx.gallery.config().field.inject_gain;
    let decay = fx.gallery.config().field.decay;
    // Pointer sits on cell (16, 16) of the 32x32 field: power = (32 / 4) / 0.5.
    let power = 16.0;
    for k in 0..5 {
        let [r0, g0, _, _] = fx.gallery.items()[0].field().cell(16, 16);
        fx.step();
        let [r1, g1, _, _] = fx.gallery.items()[0].field().cell(16, 16);
        let dr = r1 - decay * r0;
        let dg = g1 - decay * g0;
        let expected_r = gain * v0x * 0.9_f32.powi(k) * power;
        let expected_g = -gain * v0y * 0.9_f32.powi(k) * power;
        assert!((dr - expected_r).abs() < 1e-3, "frame {}: {} vs {}", k, dr, expected_r);
        assert!((dg - expected_g).abs() < 1e-3, "frame {}: {} vs {}", k, dg, expected_g);
    }
}

#[test]
fn pointer_over_one_image_leaves_the_other_quiet() {
    let mut fx = fixture(
        &[
            ElementRect::new(100.0, 100.0, 400.0, 300.0),
            ElementRect::new(1000.0, 100.0, 400.0, 300.0),
        ],
        0.0,
    );
    // Start from quiet fields so only injected energy shows up.
    fx.pointer.on_move(250.0, 200.0, &fx.viewport);
    fx.pointer.on_move(300.0, 250.0, &fx.viewport);
    let before: Vec<f32> = fx
        .gallery
        .items()
        .iter()
        .map(|it| it.field().max_magnitude())
        .collect();
    fx.step();

    let first = fx.gallery.items()[0].field();
    let second = fx.gallery.items()[1].field();
    assert_eq!(fx.gallery.items()[0].mouse_pos(), Vec2::new(0.5, 0.5));
    assert_eq!(fx.gallery.items()[1].mouse_pos(), Vec2::new(0.0, 0.5));
    // Second image only decays.
    assert!(second.max_magnitude() <= before[1] * 0.9 + 1e-3);
    // First image got energy at the pointer cell on top of the decayed noise.
    let [r, _, b, _] = first.cell(16, 16);
    assert!(r > b * 0.9 + 1e-3, "r {} b {}", r, b);
}

#[test]
fn degenerate_element_is_skipped_without_affecting_others() {
    let mut fx = fixture(
        &[
            ElementRect::new(0.0, 0.0, 0.0, 0.0),
            ElementRect::new(300.0, 50.0, 200.0, 100.0),
        ],
        0.0,
    );
    let report = fx.step();
    assert_eq!(report.items, 2);
    assert_eq!(report.layout_failures, 1);
    assert_eq!(fx.renderer.renders, 1);
    assert_eq!(fx.gallery.items()[1].layout().offset, Vec2::new(-560.0, 440.0));
    // The skipped item keeps a zero-area plane and still uploads its decaying field.
    assert_eq!(fx.gallery.items()[0].layout().sizes, Vec2::ZERO);
    assert_eq!(fx.renderer.uploads.len(), 2);
}

#[test]
fn frame_uniforms_carry_resolution_and_monotonic_time() {
    let mut fx = fixture(&[ElementRect::new(0.0, 0.0, 10.0, 10.0)], 0.0);
    fx.viewport.resize(1000.0, 500.0, 3.0);
    fx.step();
    let first = fx.renderer.last_uniforms.unwrap();
    assert_eq!(first.resolution.x, 2000.0);
    assert_eq!(first.resolution.y, 1000.0);
    assert_eq!(first.resolution.z, 2.0);
    assert_eq!(first.resolution.w, 2.0);
    fx.step();
    let second = fx.renderer.last_uniforms.unwrap();
    assert!(second.time >= first.time);
    assert!((fx.gallery.camera().aspect - 2.0).abs() < 1e-6);
}

#[test]
fn fixed_ticks_runs_exact_frame_count() {
    let fx = Rc::new(RefCell::new(fixture(
        &[ElementRect::new(0.0, 0.0, 10.0, 10.0)],
        1.0,
    )));
    let inner = fx.clone();
    FixedTicks(7).run(Box::new(move || {
        inner.borrow_mut().step();
    }));
    assert_eq!(fx.borrow().renderer.renders, 7);
    assert_eq!(fx.borrow().scroll.scroll.get(), 7.0);
}
