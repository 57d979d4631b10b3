use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::dpi::LogicalPosition;
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::{Fullscreen, Window, WindowBuilder};

use gallery_core::render::helpers;
use gallery_core::{
    Gallery, GalleryConfig, PlaneRenderer, PointerState, RenderError, ViewportState,
};

mod page;

use page::{CardElement, Page, WheelScroll, CARD_TEXTURE_HEIGHT, CARD_TEXTURE_WIDTH};

const DOUBLE_CLICK: Duration = Duration::from_millis(400);
const DEFAULT_CARDS: usize = 6;

#[derive(Debug, Default)]
struct Args {
    cards: Option<usize>,
    /// Exit after this many frames (handy for smoke runs).
    frames: Option<u64>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = |name: &str| {
            it.next()
                .ok_or_else(|| anyhow::anyhow!("{} needs a value", name))
        };
        match flag.as_str() {
            "--cards" => args.cards = Some(value("--cards")?.parse()?),
            "--frames" => args.frames = Some(value("--frames")?.parse()?),
            other => anyhow::bail!("unknown argument {}", other),
        }
    }
    Ok(args)
}

fn viewport_of(window: &Window) -> ViewportState {
    let scale = window.scale_factor();
    let logical = window.inner_size().to_logical::<f32>(scale);
    ViewportState::new(logical.width, logical.height, scale as f32)
}

fn toggle_fullscreen(window: &Window) {
    if window.fullscreen().is_some() {
        window.set_fullscreen(None);
    } else {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();
    let args = parse_args()?;
    let cards = args.cards.unwrap_or(DEFAULT_CARDS);

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Ripple gallery (native)")
            .with_transparent(true)
            .build(&event_loop)?,
    );

    let config = GalleryConfig::default().sanitized();
    let mut viewport = viewport_of(&window);
    let size = window.inner_size();
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window.clone())?;
    let mut renderer = pollster::block_on(PlaneRenderer::new(
        &instance,
        surface,
        size.width,
        size.height,
        &config,
    ))?;

    let page = Rc::new(RefCell::new(Page::new(
        cards,
        viewport.width(),
        viewport.height(),
    )));
    let mut scroll = WheelScroll::new(page.clone(), config.scroll_ease);
    let mut pointer = PointerState::default();
    let mut gallery = Gallery::new(config, &viewport);
    for i in 0..cards {
        let pixels = page::card_pixels(i, CARD_TEXTURE_WIDTH, CARD_TEXTURE_HEIGHT);
        let (tex, _view) = helpers::create_rgba8_texture(
            renderer.device(),
            renderer.queue(),
            "card_tex",
            CARD_TEXTURE_WIDTH,
            CARD_TEXTURE_HEIGHT,
            &pixels,
        );
        let plane = renderer.add_plane(tex, gallery.config().field_size);
        gallery.add_item(CardElement::new(page.clone(), i), plane);
    }
    log::info!(
        "[native] {} cards, viewport {:.0}x{:.0} @{:.2}x, fov {:.3} deg",
        cards,
        viewport.width(),
        viewport.height(),
        viewport.device_pixel_ratio(),
        gallery.camera().fov_degrees()
    );

    let mut last_click: Option<Instant> = None;
    let mut frames: u64 = 0;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                viewport = viewport_of(&window);
                page.borrow_mut().resize(viewport.width(), viewport.height());
                renderer.resize_if_needed(size.width, size.height);
                gallery.resize(&viewport);
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                viewport = viewport_of(&window);
                page.borrow_mut().resize(viewport.width(), viewport.height());
            }
            WindowEvent::CursorMoved { position, .. } => {
                let p: LogicalPosition<f32> = position.to_logical(window.scale_factor());
                pointer.on_move(p.x, p.y, &viewport);
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => scroll.wheel_lines(-y),
                MouseScrollDelta::PixelDelta(p) => {
                    let p: LogicalPosition<f32> = p.to_logical(window.scale_factor());
                    scroll.wheel_pixels(-p.y);
                }
            },
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let now = Instant::now();
                match last_click {
                    Some(prev) if now - prev < DOUBLE_CLICK => {
                        toggle_fullscreen(&window);
                        last_click = None;
                    }
                    _ => last_click = Some(now),
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            match gallery.step(&mut scroll, &mut pointer, &viewport, &mut renderer) {
                Ok(_) => window.request_redraw(),
                Err(RenderError::Surface(
                    wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
                )) => renderer.reconfigure(),
                Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => elwt.exit(),
                Err(e) => log::error!("render error: {:?}", e),
            }
            frames += 1;
            if args.frames.is_some_and(|limit| frames >= limit) {
                log::info!("[native] {} frames rendered, exiting", frames);
                elwt.exit();
            }
        }
        _ => {}
    })?;
    Ok(())
}
