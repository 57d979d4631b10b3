// Page hooks and attribute names the web frontend reads from the document.
// Selectors
pub const CANVAS_SELECTOR: &str = ".webgl";
pub const SCROLLABLE_SELECTOR: &str = ".scrollable";
pub const IMAGE_SELECTOR: &str = "img";

// Optional overrides on the canvas element, e.g. <canvas class="webgl" data-decay="0.85">
pub const ATTR_FIELD_SIZE: &str = "data-field-size";
pub const ATTR_DECAY: &str = "data-decay";
pub const ATTR_INJECT_GAIN: &str = "data-inject-gain";
pub const ATTR_SCROLL_EASE: &str = "data-scroll-ease";
pub const ATTR_DISPLACEMENT: &str = "data-displacement";

// Events
pub const EVENT_MOUSEMOVE: &str = "mousemove";
pub const EVENT_RESIZE: &str = "resize";
pub const EVENT_DBLCLICK: &str = "dblclick";
