//! Colour parsing and per-element palette generation.

use crate::error::TerraspielError;

/// An `(r, g, b)` colour in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse a `#RRGGBB` hex string.
    pub fn from_hex(s: &str) -> Result<Self, TerraspielError> {
        let s = s.trim_start_matches('#');
        if s.len() != 6 {
            return Err(TerraspielError::InvalidAsset(format!(
                "color must be #RRGGBB, got {s:?}"
            )));
        }
        let byte = |range: std::ops::Range<usize>| -> Result<u8, TerraspielError> {
            u8::from_str_radix(&s[range], 16)
                .map_err(|e| TerraspielError::InvalidAsset(format!("bad hex color: {e}")))
        };
        Ok(Rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?))
    }

    fn jitter(self, rng: &mut fastrand::Rng, amount: i16) -> Rgb {
        let shift = |c: u8| -> u8 {
            let delta = rng.i16(-amount..=amount);
            (c as i16 + delta).clamp(0, 255) as u8
        };
        Rgb(shift(self.0), shift(self.1), shift(self.2))
    }
}

/// A small palette of colour variations for an element that declares
/// `has_color_variation`, precomputed once so per-placement colour draws are
/// a cheap index instead of a fresh RNG jitter.
#[derive(Debug, Clone)]
pub struct Palette {
    variations: Vec<Rgb>,
}

const VARIATIONS_PER_ELEMENT: usize = 10;

impl Palette {
    pub fn uniform(base: Rgb) -> Self {
        Palette {
            variations: vec![base],
        }
    }

    pub fn varied(base: Rgb, rng: &mut fastrand::Rng) -> Self {
        let variations = (0..VARIATIONS_PER_ELEMENT)
            .map(|_| base.jitter(rng, 12))
            .collect();
        Palette { variations }
    }

    /// Pick a colour from the palette.
    pub fn pick(&self, rng: &mut fastrand::Rng) -> Rgb {
        self.variations[rng.usize(0..self.variations.len())]
    }
}
