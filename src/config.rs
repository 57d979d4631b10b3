use crate::constants::{
    ATTR_DECAY, ATTR_DISPLACEMENT, ATTR_FIELD_SIZE, ATTR_INJECT_GAIN, ATTR_SCROLL_EASE,
};
use gallery_core::GalleryConfig;
use std::str::FromStr;

/// Parse an attribute value, ignoring blanks and malformed numbers.
fn parse_attr<T: FromStr>(raw: Option<String>) -> Option<T> {
    raw.and_then(|s| s.trim().parse::<T>().ok())
}

/// Build the runtime config from attribute lookups (`name -> value`).
///
/// Unknown or malformed values keep the default; the result is sanitized so
/// a bad attribute can never freeze or blow up the field.
pub fn config_from_attributes<F>(lookup: F) -> GalleryConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = GalleryConfig::default();
    if let Some(v) = parse_attr::<usize>(lookup(ATTR_FIELD_SIZE)) {
        config.field_size = v;
    }
    if let Some(v) = parse_attr::<f32>(lookup(ATTR_DECAY)) {
        config.field.decay = v;
    }
    if let Some(v) = parse_attr::<f32>(lookup(ATTR_INJECT_GAIN)) {
        config.field.inject_gain = v;
    }
    if let Some(v) = parse_attr::<f32>(lookup(ATTR_SCROLL_EASE)) {
        config.scroll_ease = v;
    }
    if let Some(v) = parse_attr::<f32>(lookup(ATTR_DISPLACEMENT)) {
        config.displacement_strength = v;
    }
    config.sanitized()
}
