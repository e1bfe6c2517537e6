//! Seeded-regression tests for harvest rolls
//!
//! Rolls go through `ChaCha8Rng`, whose output is stable across platforms and
//! releases, so a fixed seed pins the whole sequence of drawn amounts. The pinned
//! values below change only if the draw order or draw types in `roll_harvest` change.

use harvestable_vehicles::config::{
    HarvestConfig, HarvestableVehicle, ResourceConfig, YieldTable,
};
use std::collections::BTreeMap;

use harvestable_vehicles::harvest::{roll_harvest, RollMiss};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const ROLLS: usize = 10_000;
const PINNED_SEED: u64 = 20240613;

fn wood_and_metal() -> (HarvestConfig, HarvestableVehicle) {
    let mut config = HarvestConfig::empty();
    config.yield_probabilities = Some(YieldTable::new(70, 25, 5, 1.5));
    let vehicle = HarvestableVehicle {
        vehicle_short_prefab_names: vec!["kayak".into()],
        damage_increase_factor: 1.0,
        yield_probabilities: None,
        resources: vec![
            ResourceConfig::new("wood", 10, 20),
            ResourceConfig::new("metal.fragments", 5, 15),
        ],
    };
    (config, vehicle)
}

/// Sequence of (item, amount) for `ROLLS` rolls; misses record amount 0
fn roll_sequence(seed: u64) -> Vec<(String, u32)> {
    let (config, vehicle) = wood_and_metal();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..ROLLS)
        .map(|_| match roll_harvest(&config, &vehicle, &mut rng) {
            Ok(roll) => (roll.resource.item_short_name.clone(), roll.amount),
            Err(RollMiss::NothingYielded) => (String::new(), 0),
            Err(other) => panic!("unexpected miss: {:?}", other),
        })
        .collect()
}

#[test]
fn test_pinned_seed_first_rolls() {
    let sequence = roll_sequence(PINNED_SEED);
    let first: Vec<(&str, u32)> = sequence[..10].iter().map(|(item, amount)| (item.as_str(), *amount)).collect();

    assert_eq!(
        first,
        vec![
            ("", 0),
            ("", 0),
            ("metal.fragments", 9),
            ("metal.fragments", 7),
            ("", 0),
            ("metal.fragments", 11),
            ("", 0),
            ("", 0),
            ("", 0),
            ("", 0),
        ]
    );
}

#[test]
fn test_pinned_seed_totals() {
    let mut granted: BTreeMap<String, u64> = BTreeMap::new();
    let mut misses = 0usize;
    for (item, amount) in roll_sequence(PINNED_SEED) {
        if amount == 0 {
            misses += 1;
        } else {
            *granted.entry(item).or_default() += u64::from(amount);
        }
    }

    assert_eq!(misses, 7030);
    assert_eq!(granted.get("wood"), Some(&25014));
    assert_eq!(granted.get("metal.fragments"), Some(&15734));
    assert_eq!(granted.len(), 2);
}

#[test]
fn test_same_seed_same_sequence() {
    assert_eq!(roll_sequence(PINNED_SEED), roll_sequence(PINNED_SEED));
}

#[test]
fn test_different_seed_different_sequence() {
    assert_ne!(roll_sequence(1), roll_sequence(2));
}

#[test]
fn test_amounts_stay_in_bands() {
    let (config, vehicle) = wood_and_metal();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..ROLLS {
        match roll_harvest(&config, &vehicle, &mut rng) {
            Ok(roll) => {
                let resource = roll.resource;
                assert!(roll.base_amount >= resource.minimum_amount);
                assert!(roll.base_amount <= resource.maximum_amount);
                let high = (roll.base_amount as f64 * 1.5).ceil() as u32;
                assert!(
                    roll.amount == roll.base_amount || roll.amount == high,
                    "{} is neither base {} nor high {}",
                    roll.amount,
                    roll.base_amount,
                    high
                );
            }
            Err(miss) => assert_eq!(miss, RollMiss::NothingYielded),
        }
    }
}

#[test]
fn test_band_frequencies() {
    let (config, vehicle) = wood_and_metal();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let mut none = 0usize;
    let mut normal = 0usize;
    let mut high = 0usize;
    for _ in 0..ROLLS {
        match roll_harvest(&config, &vehicle, &mut rng) {
            Ok(roll) if roll.amount == roll.base_amount => normal += 1,
            Ok(_) => high += 1,
            Err(_) => none += 1,
        }
    }

    // 70 / 25 / 5 with generous tolerance for 10k draws
    let pct = |n: usize| n as f64 * 100.0 / ROLLS as f64;
    assert!((pct(none) - 70.0).abs() < 3.0, "no-yield {}%", pct(none));
    assert!((pct(normal) - 25.0).abs() < 3.0, "normal {}%", pct(normal));
    assert!((pct(high) - 5.0).abs() < 1.5, "high {}%", pct(high));
}
