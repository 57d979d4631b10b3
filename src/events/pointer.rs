use crate::constants::EVENT_MOUSEMOVE;
use crate::dom;
use gallery_core::{PointerState, ViewportState};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Feed window-level mouse moves into the shared pointer state.
///
/// Moves only record position and velocity; all field work happens in the
/// frame loop, so several moves between frames collapse to the last one.
pub fn wire_pointer_move(
    window: &web::Window,
    pointer: Rc<RefCell<PointerState>>,
    viewport: Rc<RefCell<ViewportState>>,
) {
    dom::add_listener(window, EVENT_MOUSEMOVE, move |ev: web::MouseEvent| {
        let vp = *viewport.borrow();
        pointer
            .borrow_mut()
            .on_move(ev.client_x() as f32, ev.client_y() as f32, &vp);
    });
}
