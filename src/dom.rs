use gallery_core::{ElementRect, ElementSource, ViewportState};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Query a single element and cast it, with a readable error when missing.
pub fn query_as<T: JsCast>(document: &web::Document, selector: &str) -> anyhow::Result<T> {
    let el = document
        .query_selector(selector)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", selector))?;
    el.dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!(format!("{} has the wrong type: {:?}", selector, e)))
}

/// All elements matching `selector` that cast to `T`, in document order.
pub fn query_all_as<T: JsCast>(document: &web::Document, selector: &str) -> Vec<T> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// A live page element; its rect is re-read every time it is asked for.
#[derive(Clone)]
pub struct DomElement {
    element: web::Element,
}

impl DomElement {
    pub fn new(element: web::Element) -> Self {
        Self { element }
    }
}

impl ElementSource for DomElement {
    fn bounding_rect(&self) -> ElementRect {
        let r = self.element.get_bounding_client_rect();
        ElementRect::new(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        )
    }
}

pub fn viewport_from_window(window: &web::Window) -> ViewportState {
    let mut viewport = ViewportState::default();
    refresh_viewport(window, &mut viewport);
    viewport
}

pub fn refresh_viewport(window: &web::Window, viewport: &mut ViewportState) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    viewport.resize(
        width as f32,
        height as f32,
        window.device_pixel_ratio() as f32,
    );
}

/// Match the canvas backing store to its CSS size times the capped pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, max_ratio: f32) -> (u32, u32) {
    let dpr = web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .min(max_ratio as f64);
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}

/// Enter fullscreen on the document root, or leave it if already there.
pub fn toggle_fullscreen(document: &web::Document) {
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
        log::info!("[dom] exit fullscreen");
    } else if let Some(root) = document.document_element() {
        if let Err(e) = root.request_fullscreen() {
            log::warn!("[dom] fullscreen refused: {:?}", e);
        } else {
            log::info!("[dom] enter fullscreen");
        }
    }
}

/// Read a numeric-or-text attribute from `element`.
#[inline]
pub fn attribute(element: &web::Element, name: &str) -> Option<String> {
    element.get_attribute(name)
}

/// Attach `handler` to `target` for `event` for the lifetime of the page.
pub fn add_listener<E>(target: &web::EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("[dom] {} listener not attached: {:?}", event, e);
    }
    closure.forget();
}
