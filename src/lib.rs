#![cfg(target_arch = "wasm32")]
use gallery_core::{Gallery, PlaneId, PlaneRenderer, PointerState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod scroll;
mod texture;

use constants::{CANVAS_SELECTOR, IMAGE_SELECTOR, SCROLLABLE_SELECTOR};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gallery-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body"))?;

    let canvas: web::HtmlCanvasElement = dom::query_as(&document, CANVAS_SELECTOR)?;
    let container: web::HtmlElement = dom::query_as(&document, SCROLLABLE_SELECTOR)?;
    let images: Vec<web::HtmlImageElement> = dom::query_all_as(&document, IMAGE_SELECTOR);

    let config = config::config_from_attributes(|name| dom::attribute(&canvas, name));
    let viewport = Rc::new(RefCell::new(dom::viewport_from_window(&window)));
    let pointer = Rc::new(RefCell::new(PointerState::default()));
    let (bw, bh) = dom::sync_canvas_backing_size(&canvas, config.max_pixel_ratio);

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let renderer = PlaneRenderer::new(&instance, surface, bw, bh, &config).await?;
    let renderer = Rc::new(RefCell::new(renderer));

    let scroll = scroll::DomSmoothScroll::new(window.clone(), body, container, config.scroll_ease);
    let needs_measure = scroll.measure_flag();

    let mut gallery = Gallery::new(config.clone(), &viewport.borrow());
    for img in &images {
        let plane = {
            let mut r = renderer.borrow_mut();
            let placeholder = r.placeholder_texture();
            r.add_plane(placeholder, gallery.config().field_size)
        };
        gallery.add_item(dom::DomElement::new(img.clone().into()), plane);
        spawn_image_upload(img.clone(), plane, renderer.clone(), needs_measure.clone());
    }
    log::info!(
        "[init] {} images, viewport {:.0}x{:.0}, field {}x{}",
        images.len(),
        viewport.borrow().width(),
        viewport.borrow().height(),
        gallery.config().field_size,
        gallery.config().field_size
    );

    events::wire_pointer_move(&window, pointer.clone(), viewport.clone());
    events::wire_resize(
        &window,
        events::ResizeWiring {
            canvas: canvas.clone(),
            viewport: viewport.clone(),
            needs_measure: needs_measure.clone(),
            max_pixel_ratio: gallery.config().max_pixel_ratio,
        },
    );
    events::wire_fullscreen_toggle(&window, document.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        gallery,
        scroll,
        pointer,
        viewport,
        renderer,
        canvas,
        frames: 0,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

/// Swap the plane's placeholder for the real image once it decodes.
///
/// A failed load leaves the placeholder bound; the plane still tracks its
/// element and keeps its field.
fn spawn_image_upload(
    img: web::HtmlImageElement,
    plane: PlaneId,
    renderer: Rc<RefCell<PlaneRenderer<'static>>>,
    needs_measure: Rc<Cell<bool>>,
) {
    spawn_local(async move {
        match texture::decode_image(&img).await {
            Ok(size) => {
                let mut r = renderer.borrow_mut();
                let tex = texture::upload_image(r.device(), r.queue(), &img, size);
                r.set_color_texture(plane, tex);
            }
            Err(e) => log::warn!("[texture] plane {} keeps placeholder: {:?}", plane.0, e),
        }
        // Layout may shift once the image settles, whether or not decode succeeded
        needs_measure.set(true);
    });
}
