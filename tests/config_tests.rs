// Host-side tests for page attribute overrides.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod config {
    include!("../src/config.rs");
}

use config::config_from_attributes;
use constants::*;
use gallery_core::constants::{DISPLACEMENT_STRENGTH, FIELD_DECAY, FIELD_SIZE, SCROLL_EASE};
use gallery_core::GalleryConfig;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn no_attributes_gives_defaults() {
    let cfg = config_from_attributes(|_| None);
    assert_eq!(cfg, GalleryConfig::default());
    assert_eq!(cfg.field_size, FIELD_SIZE);
}

#[test]
fn attributes_override_tuning() {
    let cfg = config_from_attributes(lookup(&[
        (ATTR_FIELD_SIZE, "64"),
        (ATTR_DECAY, " 0.85 "),
        (ATTR_INJECT_GAIN, "50"),
        (ATTR_SCROLL_EASE, "0.2"),
        (ATTR_DISPLACEMENT, "0.05"),
    ]));
    assert_eq!(cfg.field_size, 64);
    assert_eq!(cfg.field.decay, 0.85);
    assert_eq!(cfg.field.inject_gain, 50.0);
    assert_eq!(cfg.scroll_ease, 0.2);
    assert_eq!(cfg.displacement_strength, 0.05);
}

#[test]
fn malformed_or_unstable_values_fall_back() {
    let cfg = config_from_attributes(lookup(&[
        (ATTR_FIELD_SIZE, "lots"),
        (ATTR_DECAY, "1.5"),
        (ATTR_SCROLL_EASE, "0"),
    ]));
    assert_eq!(cfg.field_size, FIELD_SIZE);
    assert_eq!(cfg.field.decay, FIELD_DECAY);
    assert_eq!(cfg.scroll_ease, SCROLL_EASE);
}

#[test]
fn non_finite_displacement_keeps_default() {
    for raw in ["NaN", "inf", "-inf"] {
        let cfg = config_from_attributes(lookup(&[(ATTR_DISPLACEMENT, raw)]));
        assert!(cfg.displacement_strength.is_finite(), "{}", raw);
        assert_eq!(cfg.displacement_strength, DISPLACEMENT_STRENGTH, "{}", raw);
    }
}

#[test]
fn field_size_is_clamped() {
    let cfg = config_from_attributes(lookup(&[(ATTR_FIELD_SIZE, "100000")]));
    assert_eq!(cfg.field_size, 256);
    let cfg = config_from_attributes(lookup(&[(ATTR_FIELD_SIZE, "1")]));
    assert_eq!(cfg.field_size, 4);
}

#[test]
fn selectors_and_attributes_are_well_formed() {
    assert!(CANVAS_SELECTOR.starts_with('.'));
    assert!(SCROLLABLE_SELECTOR.starts_with('.'));
    for attr in [
        ATTR_FIELD_SIZE,
        ATTR_DECAY,
        ATTR_INJECT_GAIN,
        ATTR_SCROLL_EASE,
        ATTR_DISPLACEMENT,
    ] {
        assert!(attr.starts_with("data-"), "{}", attr);
    }
}
