use gallery_core::{ScrollEase, SmoothScroll};
use std::cell::Cell;
use std::rc::Rc;
use web_sys as web;

/// Smooth scroll over native document scrolling.
///
/// The scrollable container is pinned to the viewport and translated by an
/// eased copy of `window.scrollY`; the body is sized to the content so the
/// native scrollbar keeps working.
pub struct DomSmoothScroll {
    window: web::Window,
    body: web::HtmlElement,
    container: web::HtmlElement,
    ease: ScrollEase,
    content_height: f64,
    needs_measure: Rc<Cell<bool>>,
}

impl DomSmoothScroll {
    pub fn new(
        window: web::Window,
        body: web::HtmlElement,
        container: web::HtmlElement,
        ease: f32,
    ) -> Self {
        let style = container.style();
        _ = style.set_property("position", "fixed");
        _ = style.set_property("top", "0");
        _ = style.set_property("left", "0");
        _ = style.set_property("width", "100%");
        _ = style.set_property("will-change", "transform");
        let mut scroll = Self {
            window,
            body,
            container,
            ease: ScrollEase::new(ease),
            content_height: 0.0,
            needs_measure: Rc::new(Cell::new(true)),
        };
        // Start where the browser restored the scroll position
        let y = scroll.scroll_y();
        scroll.ease.jump_to(y);
        scroll.apply(y);
        scroll
    }

    /// Flag shared with resize and image-load handlers; set it to re-measure
    /// the content height on the next frame.
    pub fn measure_flag(&self) -> Rc<Cell<bool>> {
        self.needs_measure.clone()
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.ease.current()
    }

    fn scroll_y(&self) -> f32 {
        self.window.scroll_y().unwrap_or(0.0) as f32
    }

    fn apply(&self, y: f32) {
        _ = self
            .container
            .style()
            .set_property("transform", &format!("translate3d(0, {:.2}px, 0)", -y));
    }

    fn measure(&mut self) {
        let height = self.container.get_bounding_client_rect().height();
        if (height - self.content_height).abs() >= 0.5 {
            self.content_height = height;
            _ = self
                .body
                .style()
                .set_property("height", &format!("{}px", height.round()));
            log::debug!("[scroll] content height {:.0}px", height);
        }
    }
}

impl SmoothScroll for DomSmoothScroll {
    fn animate(&mut self) {
        if self.needs_measure.replace(false) {
            self.measure();
        }
        let view_h = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        self.ease.set_target(self.scroll_y());
        self.ease.clamp_target((self.content_height - view_h) as f32);
        if self.ease.is_settled() {
            return;
        }
        let y = self.ease.step();
        self.apply(y);
    }
}
