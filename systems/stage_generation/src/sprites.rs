//! Weighted sprite-variant selection.
//!
//! Brick and summit segments map to a single fixed variant. Flat and sloped
//! segments pick from small palettes using cumulative thresholds over one
//! uniform draw in `[0, 100)`, giving long runs their dominant texture with
//! occasional variety.

use cavern_run_core::{SegmentBehavior, SpriteKey};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

const FLAT_PALETTE: [SpriteKey; 2] = [SpriteKey::FlatTop, SpriteKey::Gorge];
const RISE_PALETTE: [SpriteKey; 4] = [
    SpriteKey::CrownRise,
    SpriteKey::StandardRise,
    SpriteKey::BootRise,
    SpriteKey::RoundRise,
];
const FALL_PALETTE: [SpriteKey; 4] = [
    SpriteKey::CrownFall,
    SpriteKey::StandardFall,
    SpriteKey::BootFall,
    SpriteKey::RoundFall,
];

// Cumulative thresholds out of 100 draws: 95/5 for flats, 50/10/30/10 for
// both slope directions.
const FLAT_THRESHOLDS: [u32; 2] = [95, 100];
const SLOPE_THRESHOLDS: [u32; 4] = [50, 60, 90, 100];

/// Selects the visual variant for one column of the given behavior.
///
/// Returns `None` for [`SegmentBehavior::Empty`], which emits no cell and
/// consumes no draw. Every other behavior consumes at most one draw.
pub(crate) fn select(behavior: SegmentBehavior, rng: &mut ChaCha8Rng) -> Option<SpriteKey> {
    match behavior {
        SegmentBehavior::Brick => Some(SpriteKey::BrickWall),
        SegmentBehavior::Summit => Some(SpriteKey::TriangleCliff),
        SegmentBehavior::Flat => Some(weighted_pick(&FLAT_PALETTE, &FLAT_THRESHOLDS, rng)),
        SegmentBehavior::Rising => Some(weighted_pick(&RISE_PALETTE, &SLOPE_THRESHOLDS, rng)),
        SegmentBehavior::Falling => Some(weighted_pick(&FALL_PALETTE, &SLOPE_THRESHOLDS, rng)),
        SegmentBehavior::Empty => None,
    }
}

/// Returns the first palette entry whose cumulative threshold exceeds a
/// uniform draw, falling back to the last entry.
fn weighted_pick(palette: &[SpriteKey], thresholds: &[u32], rng: &mut ChaCha8Rng) -> SpriteKey {
    debug_assert!(
        palette.len() == thresholds.len(),
        "palette and threshold tables must align"
    );

    let draw = rng.gen_range(0..thresholds[thresholds.len() - 1]);
    for (key, threshold) in palette.iter().zip(thresholds) {
        if draw < *threshold {
            return *key;
        }
    }
    palette[palette.len() - 1]
}
