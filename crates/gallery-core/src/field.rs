//! Per-image displacement field.
//!
//! A `size × size` grid of RGBA f32 cells stored row-major with row 0 at the
//! bottom of the image. `r` carries horizontal and `g` vertical displacement;
//! `b` only mirrors `r` at creation and `a` stays constant. The update math is
//! exposed as free functions over the raw cell buffer so it can be exercised
//! without any GPU context.

use crate::config::FieldTuning;
use crate::constants::{FIELD_ALPHA, FIELD_CHANNELS, FIELD_MIN_DISTANCE, FIELD_NOISE_MAX};
use glam::Vec2;
use rand::prelude::*;

/// Multiply the `r` and `g` channel of every cell by `factor`.
pub fn decay_cells(data: &mut [f32], factor: f32) {
    for cell in data.chunks_exact_mut(FIELD_CHANNELS) {
        cell[0] *= factor;
        cell[1] *= factor;
    }
}

/// Injection radius in grid cells.
#[inline]
pub fn max_distance(size: usize) -> f32 {
    size as f32 / 4.0
}

/// Inverse-distance falloff for a cell at `distance_sq` from the pointer.
///
/// Returns `None` at or beyond `max_dist`. Distances below
/// [`FIELD_MIN_DISTANCE`] saturate instead of diverging.
#[inline]
pub fn injection_power(distance_sq: f32, max_dist: f32) -> Option<f32> {
    if !(distance_sq < max_dist * max_dist) {
        return None;
    }
    let dist = distance_sq.sqrt().max(FIELD_MIN_DISTANCE);
    Some(max_dist / dist)
}

/// True when `pos` lies strictly inside the unit square.
#[inline]
pub fn is_strictly_inside(pos: Vec2) -> bool {
    pos.x > 0.0 && pos.x < 1.0 && pos.y > 0.0 && pos.y < 1.0
}

/// Grid coordinate of an element-relative pointer position.
///
/// Normalized Y grows downward while grid rows grow upward, hence the flip.
#[inline]
pub fn grid_position(size: usize, mouse_pos: Vec2) -> Vec2 {
    let s = size as f32;
    Vec2::new(s * mouse_pos.x, s * (1.0 - mouse_pos.y))
}

/// Add velocity-weighted energy around the pointer.
///
/// Returns the number of cells touched; zero when the pointer is not strictly
/// inside the element.
pub fn inject_cells(
    data: &mut [f32],
    size: usize,
    mouse_pos: Vec2,
    velocity: Vec2,
    gain: f32,
) -> usize {
    debug_assert_eq!(data.len(), size * size * FIELD_CHANNELS);
    if !is_strictly_inside(mouse_pos) {
        return 0;
    }
    let grid = grid_position(size, mouse_pos);
    let max_dist = max_distance(size);
    let mut touched = 0usize;

    // Only cells inside the bounding square of the radius can qualify.
    let lo_i = (grid.x - max_dist).floor().max(0.0) as usize;
    let hi_i = ((grid.x + max_dist).ceil() as usize).min(size.saturating_sub(1));
    let lo_j = (grid.y - max_dist).floor().max(0.0) as usize;
    let hi_j = ((grid.y + max_dist).ceil() as usize).min(size.saturating_sub(1));

    for j in lo_j..=hi_j {
        for i in lo_i..=hi_i {
            let dx = grid.x - i as f32;
            let dy = grid.y - j as f32;
            let Some(power) = injection_power(dx * dx + dy * dy, max_dist) else {
                continue;
            };
            let index = FIELD_CHANNELS * (i + size * j);
            data[index] += gain * velocity.x * power;
            data[index + 1] -= gain * velocity.y * power;
            touched += 1;
        }
    }
    touched
}

#[derive(Clone, Debug)]
pub struct DisplacementField {
    size: usize,
    data: Vec<f32>,
    dirty: bool,
}

impl DisplacementField {
    /// A quiet field: all displacement zero, alpha constant.
    pub fn new(size: usize) -> Self {
        let mut data = vec![0.0_f32; size * size * FIELD_CHANNELS];
        for cell in data.chunks_exact_mut(FIELD_CHANNELS) {
            cell[3] = FIELD_ALPHA;
        }
        Self {
            size,
            data,
            dirty: true,
        }
    }

    /// A field filled with startup noise: `r = g = b = random·255`, `a = 255`.
    ///
    /// Seeded so each image gets its own, reproducible pattern.
    pub fn seeded(size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut field = Self::new(size);
        for cell in field.data.chunks_exact_mut(FIELD_CHANNELS) {
            let v = rng.gen::<f32>() * FIELD_NOISE_MAX;
            cell[0] = v;
            cell[1] = v;
            cell[2] = v;
        }
        field
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Cell at column `i`, row `j` (row 0 at the bottom).
    pub fn cell(&self, i: usize, j: usize) -> [f32; 4] {
        let idx = FIELD_CHANNELS * (i + self.size * j);
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    pub fn decay(&mut self, factor: f32) {
        decay_cells(&mut self.data, factor);
        self.dirty = true;
    }

    pub fn inject(&mut self, mouse_pos: Vec2, velocity: Vec2, gain: f32) -> usize {
        let touched = inject_cells(&mut self.data, self.size, mouse_pos, velocity, gain);
        if touched > 0 {
            self.dirty = true;
        }
        touched
    }

    /// One frame: decay everything, then inject around the pointer if it is inside.
    pub fn step(&mut self, mouse_pos: Vec2, velocity: Vec2, tuning: &FieldTuning) -> usize {
        self.decay(tuning.decay);
        self.inject(mouse_pos, velocity, tuning.inject_gain)
    }

    /// Largest `|r|` or `|g|` over the grid.
    pub fn max_magnitude(&self) -> f32 {
        self.data
            .chunks_exact(FIELD_CHANNELS)
            .fold(0.0_f32, |m, c| m.max(c[0].abs()).max(c[1].abs()))
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear and return the dirty flag; callers upload when it was set.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}
