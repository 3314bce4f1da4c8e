use crate::bank::TextureBank;
use crate::geom::NO_TEXTURE;
use crate::name::LumpName;
use log::debug;
use std::str::FromStr;

/// The classic animated flat ranges, first and last frame by name.
const FLAT_ANIMATIONS: &[(&str, &str)] = &[
    ("NUKAGE1", "NUKAGE3"),
    ("FWATER1", "FWATER4"),
    ("SWATER1", "SWATER4"),
    ("LAVA1", "LAVA4"),
    ("BLOOD1", "BLOOD3"),
];

/// Animated flats advance every eight game tics, at 35 tics per second.
const FRAME_SECONDS: f32 = 8.0 / 35.0;

#[derive(Copy, Clone, Debug)]
struct AnimRange {
    first: i32,
    last: i32,
}

/// Remaps flat texture slots through their animation cycles.
///
/// Ranges are resolved against the bank once, up front; a range is only
/// active when both of its endpoint flats were loaded.
#[derive(Debug)]
pub struct FlatAnimations {
    ranges: Vec<AnimRange>,
    time: f32,
}

impl FlatAnimations {
    pub fn from_bank(bank: &TextureBank) -> FlatAnimations {
        let mut ranges = Vec::new();
        for &(first_name, last_name) in FLAT_ANIMATIONS {
            let first = lookup(bank, first_name);
            let last = lookup(bank, last_name);
            match (first, last) {
                (Some(first), Some(last)) if first <= last => {
                    ranges.push(AnimRange { first, last });
                }
                _ => debug!(
                    "Animated flat range {}..{} not fully loaded, skipping it.",
                    first_name, last_name
                ),
            }
        }
        FlatAnimations { ranges, time: 0.0 }
    }

    pub fn update(&mut self, delta_seconds: f32) {
        self.time += delta_seconds;
    }

    pub fn is_animated(&self, texture: i32) -> bool {
        self.ranges
            .iter()
            .any(|range| texture >= range.first && texture <= range.last)
    }

    /// The slot to sample instead of `texture` at the current time.
    /// Slots outside every animated range pass through unchanged.
    pub fn remap(&self, texture: i32) -> i32 {
        if texture == NO_TEXTURE {
            return texture;
        }
        let frame = (self.time / FRAME_SECONDS) as i32;
        for range in &self.ranges {
            if texture >= range.first && texture <= range.last {
                let length = range.last - range.first + 1;
                return range.first + (texture - range.first + frame) % length;
            }
        }
        texture
    }
}

fn lookup(bank: &TextureBank, name: &str) -> Option<i32> {
    let name = LumpName::from_str(name).ok()?;
    bank.flat_index(name).map(|index| index as i32)
}
