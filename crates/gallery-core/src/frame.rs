use crate::camera::Camera;
use crate::config::GalleryConfig;
use crate::constants::NOMINAL_FRAME_SEC;
use crate::field::DisplacementField;
use crate::item::{ElementSource, MeshItem};
use crate::pointer::PointerState;
use crate::scroll::SmoothScroll;
use crate::sink::{FrameUniforms, PlaneId, SceneRenderer};
use crate::viewport::ViewportState;
use glam::Vec4;
use instant::Instant;

/// Something that runs a frame step repeatedly.
///
/// The web frontend drives it from `requestAnimationFrame`; [`FixedTicks`]
/// runs a bounded number of steps back to back.
pub trait FrameScheduler {
    fn run(self, step: Box<dyn FnMut()>);
}

/// Runs the step exactly `n` times on the calling thread.
#[derive(Clone, Copy, Debug)]
pub struct FixedTicks(pub usize);

impl FrameScheduler for FixedTicks {
    fn run(self, mut step: Box<dyn FnMut()>) {
        for _ in 0..self.0 {
            step();
        }
    }
}

/// Accumulates wall time for the `time` uniform.
#[derive(Debug)]
pub struct FrameClock {
    last: Option<Instant>,
    elapsed: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            last: None,
            elapsed: 0.0,
        }
    }
}

impl FrameClock {
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = match self.last {
            Some(prev) => (now - prev).as_secs_f32(),
            None => NOMINAL_FRAME_SEC,
        };
        self.last = Some(now);
        self.elapsed += dt;
        self.elapsed
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Outcome of one frame step, mostly useful for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub items: usize,
    pub layout_failures: usize,
}

/// The flat scene: every mesh item plus the calibrated camera.
pub struct Gallery<E> {
    items: Vec<MeshItem<E>>,
    config: GalleryConfig,
    camera: Camera,
    clock: FrameClock,
}

impl<E: ElementSource> Gallery<E> {
    pub fn new(config: GalleryConfig, viewport: &ViewportState) -> Self {
        let config = config.sanitized();
        let camera = Camera::calibrated(viewport, config.perspective);
        Self {
            items: Vec::new(),
            config,
            camera,
            clock: FrameClock::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn items(&self) -> &[MeshItem<E>] {
        &self.items
    }

    /// Bind `element` to `plane`. The field is seeded from the item index.
    pub fn add_item(&mut self, element: E, plane: PlaneId) -> &MeshItem<E> {
        let seed = self.items.len() as u64;
        let field = DisplacementField::seeded(self.config.field_size, seed);
        self.items.push(MeshItem::new(element, plane, field));
        let idx = self.items.len() - 1;
        &self.items[idx]
    }

    /// Recalibrate the camera after a viewport change.
    pub fn resize(&mut self, viewport: &ViewportState) {
        self.camera.calibrate(viewport);
    }

    /// One frame: scroll, then every item (layout, field, publish), then a
    /// single render. Pointer velocity decays once after all items ran.
    ///
    /// A layout failure on one item is logged and does not affect the others.
    pub fn step<S, R>(
        &mut self,
        scroll: &mut S,
        pointer: &mut PointerState,
        viewport: &ViewportState,
        renderer: &mut R,
    ) -> Result<FrameReport, R::Error>
    where
        S: SmoothScroll + ?Sized,
        R: SceneRenderer + ?Sized,
    {
        scroll.animate();

        self.camera.calibrate(viewport);
        let mut report = FrameReport {
            items: self.items.len(),
            layout_failures: 0,
        };
        for (i, item) in self.items.iter_mut().enumerate() {
            if let Err(e) = item.update(pointer, viewport, &self.config.field, renderer) {
                report.layout_failures += 1;
                log::debug!("[gallery] item {} layout skipped: {}", i, e);
            }
        }
        pointer.decay_velocity(self.config.field.decay);

        let (w, h) = viewport.drawing_buffer_size_capped(self.config.max_pixel_ratio);
        let uniforms = FrameUniforms {
            time: self.clock.tick(),
            resolution: Vec4::new(
                w as f32,
                h as f32,
                viewport.pixel_ratio(self.config.max_pixel_ratio),
                viewport.aspect_ratio(),
            ),
        };
        renderer.render(&self.camera, &uniforms)?;
        Ok(report)
    }
}
