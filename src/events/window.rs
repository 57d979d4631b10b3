use crate::constants::{EVENT_DBLCLICK, EVENT_RESIZE};
use crate::dom;
use gallery_core::ViewportState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

pub struct ResizeWiring {
    pub canvas: web::HtmlCanvasElement,
    pub viewport: Rc<RefCell<ViewportState>>,
    pub needs_measure: Rc<Cell<bool>>,
    pub max_pixel_ratio: f32,
}

/// Keep the viewport, canvas backing store and scroll height in step with the window.
pub fn wire_resize(window: &web::Window, w: ResizeWiring) {
    let win = window.clone();
    dom::add_listener(window, EVENT_RESIZE, move |_: web::Event| {
        let vp = {
            let mut vp = w.viewport.borrow_mut();
            dom::refresh_viewport(&win, &mut vp);
            *vp
        };
        let (bw, bh) = dom::sync_canvas_backing_size(&w.canvas, w.max_pixel_ratio);
        w.needs_measure.set(true);
        log::debug!(
            "[resize] viewport {:.0}x{:.0} backing {}x{}",
            vp.width(),
            vp.height(),
            bw,
            bh
        );
    });
}

pub fn wire_fullscreen_toggle(window: &web::Window, document: web::Document) {
    dom::add_listener(window, EVENT_DBLCLICK, move |_: web::MouseEvent| {
        dom::toggle_fullscreen(&document);
    });
}
