//! Harvest rolls - what a single qualifying hit produces
//!
//! A roll is three draws from the handler's RNG, always in this order:
//! 1. rarity-weighted resource pick
//! 2. base amount in the resource's range
//! 3. yield band (only when a yield table applies)

pub mod rarity;
pub mod yield_roll;

pub use rarity::{pick_for_draw, pick_weighted, select_by_rarity, total_weight};
pub use yield_roll::{roll_base_amount, roll_yield, yield_for_draw, YieldBand, YIELD_DRAW_RANGE};

use rand::Rng;

use crate::config::{HarvestConfig, HarvestableVehicle, ResourceConfig};

/// Outcome of a successful roll
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestRoll<'a> {
    pub resource: &'a ResourceConfig,
    /// Amount drawn from the resource's range, before the yield roll
    pub base_amount: u32,
    /// Amount to grant; always positive
    pub amount: u32,
}

/// Why a roll produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollMiss {
    /// The vehicle group has an empty resource table
    NoResources,
    /// No resource in the table has a weighted rarity
    ZeroTotalWeight,
    /// The drawn amount, after the yield roll, was zero
    NothingYielded,
}

impl RollMiss {
    pub fn describe(&self) -> &'static str {
        match self {
            RollMiss::NoResources => "vehicle group has no resources",
            RollMiss::ZeroTotalWeight => "no resource has a weighted rarity",
            RollMiss::NothingYielded => "roll yielded nothing",
        }
    }
}

/// Roll what one hit against `vehicle` yields
pub fn roll_harvest<'a, R: Rng + ?Sized>(
    config: &'a HarvestConfig,
    vehicle: &'a HarvestableVehicle,
    rng: &mut R,
) -> Result<HarvestRoll<'a>, RollMiss> {
    if vehicle.resources.is_empty() {
        return Err(RollMiss::NoResources);
    }

    let resource = select_by_rarity(&vehicle.resources, &config.rarity_weights, rng)
        .ok_or(RollMiss::ZeroTotalWeight)?;

    let base_amount = roll_base_amount(resource, rng);
    let amount = match config.yield_table_for(vehicle) {
        Some(table) => roll_yield(base_amount, table, rng),
        None => base_amount,
    };

    if amount == 0 {
        return Err(RollMiss::NothingYielded);
    }

    Ok(HarvestRoll { resource, base_amount, amount })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RarityWeights, YieldTable};
    use crate::core::types::Rarity;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn kayak(resources: Vec<ResourceConfig>) -> HarvestableVehicle {
        HarvestableVehicle {
            vehicle_short_prefab_names: vec!["kayak".into()],
            damage_increase_factor: 5.0,
            yield_probabilities: None,
            resources,
        }
    }

    #[test]
    fn test_roll_without_yield_table() {
        let config = HarvestConfig::empty();
        let vehicle = kayak(vec![ResourceConfig::new("wood", 10, 20)]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..100 {
            let roll = roll_harvest(&config, &vehicle, &mut rng).unwrap();
            assert_eq!(roll.resource.item_short_name, "wood");
            assert_eq!(roll.amount, roll.base_amount);
            assert!((10..=20).contains(&roll.amount));
        }
    }

    #[test]
    fn test_roll_misses() {
        let mut config = HarvestConfig::empty();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        assert_eq!(roll_harvest(&config, &kayak(vec![]), &mut rng), Err(RollMiss::NoResources));

        let zero_range = kayak(vec![ResourceConfig::new("wood", 0, 0)]);
        assert_eq!(roll_harvest(&config, &zero_range, &mut rng), Err(RollMiss::NothingYielded));

        config.rarity_weights = RarityWeights::empty();
        let wood = kayak(vec![ResourceConfig::new("wood", 1, 2)]);
        assert_eq!(roll_harvest(&config, &wood, &mut rng), Err(RollMiss::ZeroTotalWeight));
    }

    #[test]
    fn test_certain_no_yield() {
        let mut config = HarvestConfig::empty();
        config.yield_probabilities = Some(YieldTable::new(100, 0, 0, 1.0));
        let vehicle = kayak(vec![ResourceConfig::new("wood", 10, 20)]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..50 {
            assert_eq!(roll_harvest(&config, &vehicle, &mut rng), Err(RollMiss::NothingYielded));
        }
    }

    #[test]
    fn test_certain_high_yield() {
        let mut config = HarvestConfig::empty();
        config.yield_probabilities = Some(YieldTable::new(0, 0, 100, 2.0));
        let vehicle = kayak(vec![
            ResourceConfig::new("metal.refined", 1, 5).with_rarity(Rarity::Rare),
        ]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..50 {
            let roll = roll_harvest(&config, &vehicle, &mut rng).unwrap();
            assert_eq!(roll.amount, roll.base_amount * 2);
        }
    }
}
