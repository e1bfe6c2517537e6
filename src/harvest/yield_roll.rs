//! Yield roll - decides whether a harvest yields nothing, the base amount,
//! or a bonus-scaled amount.

use rand::Rng;

use crate::config::{ResourceConfig, YieldTable};

/// Draws are uniform in `[0, YIELD_DRAW_RANGE)`
pub const YIELD_DRAW_RANGE: u32 = 100;

/// Which band a yield draw fell into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YieldBand {
    None,
    Normal,
    High,
}

impl YieldTable {
    /// Band for a draw in `[0, 100)`
    pub fn band_for_draw(&self, draw: u32) -> YieldBand {
        if draw < self.no_yield_chance {
            YieldBand::None
        } else if draw < self.high_threshold() {
            YieldBand::Normal
        } else {
            YieldBand::High
        }
    }

    /// Base amount scaled by the high-yield multiplier, rounded up
    pub fn high_amount(&self, base: u32) -> u32 {
        let scaled = (base as f64 * self.high_yield_multiplier).ceil();
        if scaled <= 0.0 {
            0
        } else if scaled >= u32::MAX as f64 {
            u32::MAX
        } else {
            scaled as u32
        }
    }
}

/// Amount produced by `base` for a given draw
pub fn yield_for_draw(base: u32, draw: u32, table: &YieldTable) -> u32 {
    match table.band_for_draw(draw) {
        YieldBand::None => 0,
        YieldBand::Normal => base,
        YieldBand::High => table.high_amount(base),
    }
}

/// Roll the yield for `base`
pub fn roll_yield<R: Rng + ?Sized>(base: u32, table: &YieldTable, rng: &mut R) -> u32 {
    let draw = rng.gen_range(0..YIELD_DRAW_RANGE);
    yield_for_draw(base, draw, table)
}

/// Uniform base amount in the resource's inclusive `[minimum, maximum]` range
///
/// A maximum below the minimum collapses the range to the minimum.
pub fn roll_base_amount<R: Rng + ?Sized>(resource: &ResourceConfig, rng: &mut R) -> u32 {
    if resource.maximum_amount <= resource.minimum_amount {
        return resource.minimum_amount;
    }
    rng.gen_range(resource.minimum_amount..=resource.maximum_amount)
}
