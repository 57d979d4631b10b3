use crate::dom::DomElement;
use crate::scroll::DomSmoothScroll;
use gallery_core::{FrameScheduler, Gallery, PlaneRenderer, PointerState, RenderError, ViewportState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub gallery: Gallery<DomElement>,
    pub scroll: DomSmoothScroll,
    pub pointer: Rc<RefCell<PointerState>>,
    pub viewport: Rc<RefCell<ViewportState>>,
    pub renderer: Rc<RefCell<PlaneRenderer<'static>>>,
    pub canvas: web::HtmlCanvasElement,
    pub frames: u64,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let viewport = *self.viewport.borrow();
        let mut renderer = self.renderer.borrow_mut();
        renderer.resize_if_needed(self.canvas.width(), self.canvas.height());

        let result = {
            let mut pointer = self.pointer.borrow_mut();
            self.gallery
                .step(&mut self.scroll, &mut *pointer, &viewport, &mut *renderer)
        };
        match result {
            Ok(report) => {
                if self.frames == 0 {
                    log::info!(
                        "[frame] first frame: {} planes, fov {:.3} deg, scroll {:.1}px",
                        report.items,
                        self.gallery.camera().fov_degrees(),
                        self.scroll.offset()
                    );
                }
            }
            Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                renderer.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
        self.frames += 1;
    }
}

/// Drives a step from `requestAnimationFrame` until the page goes away.
pub struct RafScheduler;

impl FrameScheduler for RafScheduler {
    fn run(self, mut step: Box<dyn FnMut()>) {
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let tick_clone = tick.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            step();
            request_frame(&tick_clone);
        }) as Box<dyn FnMut()>));
        request_frame(&tick);
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    RafScheduler.run(Box::new(move || frame_ctx.borrow_mut().frame()));
}
