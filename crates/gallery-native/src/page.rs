use gallery_core::{ElementRect, ElementSource, ScrollEase, SmoothScroll};
use std::cell::RefCell;
use std::rc::Rc;

// Synthetic page: a centered column of cards, in logical pixels.
const CARD_MAX_WIDTH: f32 = 640.0;
const CARD_WIDTH_FRACTION: f32 = 0.6;
const CARD_ASPECT: f32 = 0.66; // height / width
const CARD_GAP: f32 = 80.0;
const PAGE_MARGIN: f32 = 120.0;
const WHEEL_LINE_PX: f32 = 40.0;

pub const CARD_TEXTURE_WIDTH: u32 = 256;
pub const CARD_TEXTURE_HEIGHT: u32 = 168;

/// Column layout shared by the cards and the wheel scroller.
#[derive(Clone, Debug)]
pub struct Page {
    cards: usize,
    viewport_width: f32,
    viewport_height: f32,
    scroll: f32,
}

impl Page {
    pub fn new(cards: usize, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            cards,
            viewport_width,
            viewport_height,
            scroll: 0.0,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    fn card_size(&self) -> (f32, f32) {
        let w = (self.viewport_width * CARD_WIDTH_FRACTION).min(CARD_MAX_WIDTH);
        (w, w * CARD_ASPECT)
    }

    pub fn content_height(&self) -> f32 {
        let (_, h) = self.card_size();
        let n = self.cards as f32;
        2.0 * PAGE_MARGIN + n * h + (n - 1.0).max(0.0) * CARD_GAP
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height() - self.viewport_height).max(0.0)
    }

    /// Card rect in viewport coordinates at the current scroll offset.
    pub fn card_rect(&self, index: usize) -> ElementRect {
        let (w, h) = self.card_size();
        let left = (self.viewport_width - w) * 0.5;
        let top = PAGE_MARGIN + index as f32 * (h + CARD_GAP) - self.scroll;
        ElementRect::new(left, top, w, h)
    }
}

pub struct CardElement {
    page: Rc<RefCell<Page>>,
    index: usize,
}

impl CardElement {
    pub fn new(page: Rc<RefCell<Page>>, index: usize) -> Self {
        Self { page, index }
    }
}

impl ElementSource for CardElement {
    fn bounding_rect(&self) -> ElementRect {
        self.page.borrow().card_rect(self.index)
    }
}

/// Eased scrolling driven by mouse-wheel deltas.
pub struct WheelScroll {
    page: Rc<RefCell<Page>>,
    ease: ScrollEase,
}

impl WheelScroll {
    pub fn new(page: Rc<RefCell<Page>>, ease: f32) -> Self {
        Self {
            page,
            ease: ScrollEase::new(ease),
        }
    }

    /// Positive `lines` scroll the content up (towards the page end).
    pub fn wheel_lines(&mut self, lines: f32) {
        self.wheel_pixels(lines * WHEEL_LINE_PX);
    }

    pub fn wheel_pixels(&mut self, px: f32) {
        self.ease.set_target(self.ease.target() + px);
        self.ease.clamp_target(self.page.borrow().max_scroll());
    }
}

impl SmoothScroll for WheelScroll {
    fn animate(&mut self) {
        self.ease.clamp_target(self.page.borrow().max_scroll());
        let y = self.ease.step();
        self.page.borrow_mut().scroll = y;
    }
}

/// Procedural card artwork: a diagonal gradient with stripes so the
/// displacement is easy to see.
pub fn card_pixels(index: usize, width: u32, height: u32) -> Vec<u8> {
    let hue = (index as f32 * 0.173).fract();
    let (br, bg, bb) = hue_to_rgb(hue);
    let mut out = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let u = x as f32 / width as f32;
            let v = y as f32 / height as f32;
            let shade = 0.55 + 0.45 * (1.0 - (u + v) * 0.5);
            let stripe = if ((x / 16) + (y / 16)) % 2 == 0 { 1.0 } else { 0.82 };
            let k = shade * stripe;
            out.push((br * k * 255.0) as u8);
            out.push((bg * k * 255.0) as u8);
            out.push((bb * k * 255.0) as u8);
            out.push(255);
        }
    }
    out
}

fn hue_to_rgb(h: f32) -> (f32, f32, f32) {
    let f = |n: f32| {
        let k = (n + h * 6.0) % 6.0;
        1.0 - (k.min(4.0 - k).clamp(0.0, 1.0)) * 0.7
    };
    (f(5.0), f(3.0), f(1.0))
}
