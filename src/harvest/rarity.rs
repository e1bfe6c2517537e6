//! Weighted rarity pick
//!
//! Each candidate contributes the weight of its rarity tier. A uniform draw in
//! `[0, total)` selects the first candidate whose cumulative weight exceeds it,
//! so a candidate with weight zero can never be selected. Totals are summed in
//! `u64`, which cannot overflow for any list of `u32` weights that fits in memory.

use rand::Rng;

use crate::config::{RarityWeights, ResourceConfig};

/// Sum of candidate weights
pub fn total_weight<T>(items: &[T], weight_of: impl Fn(&T) -> u32) -> u64 {
    items.iter().map(|item| u64::from(weight_of(item))).sum()
}

/// Candidate selected by a given draw, or `None` when `draw` is past the total
pub fn pick_for_draw<T>(items: &[T], weight_of: impl Fn(&T) -> u32, draw: u64) -> Option<&T> {
    let mut cumulative = 0u64;
    for item in items {
        let weight = weight_of(item);
        if weight == 0 {
            continue;
        }
        cumulative += u64::from(weight);
        if draw < cumulative {
            return Some(item);
        }
    }
    None
}

/// Pick one candidate with probability proportional to its weight
///
/// Returns `None` for an empty list or when every weight is zero.
pub fn pick_weighted<'a, T, R: Rng + ?Sized>(
    items: &'a [T],
    weight_of: impl Fn(&T) -> u32,
    rng: &mut R,
) -> Option<&'a T> {
    let total = total_weight(items, &weight_of);
    if total == 0 {
        return None;
    }
    let draw = rng.gen_range(0..total);
    pick_for_draw(items, weight_of, draw)
}

/// Pick a resource from a vehicle group's table by rarity weight
pub fn select_by_rarity<'a, R: Rng + ?Sized>(
    resources: &'a [ResourceConfig],
    weights: &RarityWeights,
    rng: &mut R,
) -> Option<&'a ResourceConfig> {
    pick_weighted(resources, |r| weights.weight_of(r.rarity), rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Rarity;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn table() -> Vec<ResourceConfig> {
        vec![
            ResourceConfig::new("metal.fragments", 5, 10),
            ResourceConfig::new("metal.refined", 1, 5).with_rarity(Rarity::Rare),
        ]
    }

    #[test]
    fn test_pick_for_draw_boundaries() {
        let resources = table();
        let weights = RarityWeights::default();
        let weight_of = |r: &ResourceConfig| weights.weight_of(r.rarity);

        // Common = 60, Rare = 10 -> total 70
        assert_eq!(total_weight(&resources, weight_of), 70);
        assert_eq!(pick_for_draw(&resources, weight_of, 0).unwrap().item_short_name, "metal.fragments");
        assert_eq!(pick_for_draw(&resources, weight_of, 59).unwrap().item_short_name, "metal.fragments");
        assert_eq!(pick_for_draw(&resources, weight_of, 60).unwrap().item_short_name, "metal.refined");
        assert_eq!(pick_for_draw(&resources, weight_of, 69).unwrap().item_short_name, "metal.refined");
        assert!(pick_for_draw(&resources, weight_of, 70).is_none());
    }

    #[test]
    fn test_huge_weights_keep_every_candidate_reachable() {
        let weights = [4_000_000_000u32, 4_000_000_000, 4_000_000_000];

        assert_eq!(total_weight(&weights, |w| *w), 12_000_000_000);
        assert!(std::ptr::eq(pick_for_draw(&weights, |w| *w, 3_999_999_999).unwrap(), &weights[0]));
        assert!(std::ptr::eq(pick_for_draw(&weights, |w| *w, 4_000_000_000).unwrap(), &weights[1]));
        assert!(std::ptr::eq(pick_for_draw(&weights, |w| *w, 11_999_999_999).unwrap(), &weights[2]));
        assert!(pick_for_draw(&weights, |w| *w, 12_000_000_000).is_none());
    }

    #[test]
    fn test_huge_weights_roll_both_resources() {
        let resources = table();
        let weights = RarityWeights::empty()
            .with(Rarity::Common, 4_000_000_000)
            .with(Rarity::Rare, 4_000_000_000);
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        let mut refined = 0;
        for _ in 0..1_000 {
            if select_by_rarity(&resources, &weights, &mut rng).unwrap().rarity == Rarity::Rare {
                refined += 1;
            }
        }
        assert!((400..=600).contains(&refined), "refined picked {} times", refined);
    }

    #[test]
    fn test_zero_total_picks_nothing() {
        let resources = table();
        let weights = RarityWeights::empty().with(Rarity::VeryRare, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(select_by_rarity(&resources, &weights, &mut rng).is_none());
        assert!(select_by_rarity(&[], &RarityWeights::default(), &mut rng).is_none());
    }

    #[test]
    fn test_unmapped_rarity_skipped() {
        let resources = table();
        let weights = RarityWeights::empty().with(Rarity::Rare, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let picked = select_by_rarity(&resources, &weights, &mut rng).unwrap();
            assert_eq!(picked.item_short_name, "metal.refined");
        }
    }

    #[test]
    fn test_frequencies_follow_weights() {
        let resources = table();
        let weights = RarityWeights::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1234);

        let rolls = 70_000;
        let mut refined = 0;
        for _ in 0..rolls {
            if select_by_rarity(&resources, &weights, &mut rng).unwrap().rarity == Rarity::Rare {
                refined += 1;
            }
        }

        // Expected 10/70 of rolls
        let ratio = refined as f64 / rolls as f64;
        assert!((ratio - 1.0 / 7.0).abs() < 0.01, "refined ratio was {}", ratio);
    }

    proptest! {
        #[test]
        fn prop_never_picks_zero_weight(
            weights in proptest::collection::vec(0u32..50, 1..8),
            draw_seed in any::<u64>(),
        ) {
            let indexed: Vec<(usize, u32)> = weights.iter().copied().enumerate().collect();
            let mut rng = ChaCha8Rng::seed_from_u64(draw_seed);
            let picked = pick_weighted(&indexed, |(_, w)| *w, &mut rng);

            if weights.iter().all(|w| *w == 0) {
                prop_assert!(picked.is_none());
            } else {
                let (_, w) = picked.unwrap();
                prop_assert!(*w > 0);
            }
        }

        #[test]
        fn prop_every_draw_below_total_hits(
            weights in proptest::collection::vec(0u32..50, 1..8),
        ) {
            let total = total_weight(&weights, |w| *w);
            for draw in 0..total {
                let picked = pick_for_draw(&weights, |w| *w, draw);
                prop_assert!(picked.is_some());
                prop_assert!(*picked.unwrap() > 0);
            }
        }
    }
}
