//! Weighted reward selection
//!
//! Two draw modes:
//! - explicit weights: per-slot `drop_chance` values, normalized to 100
//! - rarity buckets: the global `RARITY_TABLE`, then a uniform pick in the tier
//!
//! Randomness is consumed in a fixed order (declaration order of the case),
//! so a seeded RNG reproduces the same draws.

use crate::catalog::Item;
use crate::error::{CoreError, Result};
use crate::rarity::{Rarity, RARITY_TABLE};
use rand::Rng;

/// Decimal places kept for floats that land in an inventory
pub const INVENTORY_FLOAT_PRECISION: u32 = 6;

/// Explicit weights are rescaled to this total
pub const WEIGHT_TOTAL: f64 = 100.0;

/// Tolerance before weights are rescaled
pub const WEIGHT_EPSILON: f64 = 0.01;

/// A case slot resolved against the catalog
#[derive(Debug, Clone, Copy)]
pub struct CaseEntry<'a> {
    pub item: &'a Item,
    pub drop_chance: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Explicit weights when the case declares any, rarity buckets otherwise
    Auto,
    /// Always use rarity buckets
    Rarity,
}

/// A drawn item together with its realized wear value
#[derive(Debug, Clone, PartialEq)]
pub struct Drop {
    pub item: Item,
    pub float: f64,
}

/// Draw one item from a case, or `None` when the case has no items
pub fn draw<'a, R: Rng + ?Sized>(
    entries: &[CaseEntry<'a>],
    mode: DrawMode,
    rng: &mut R,
) -> Option<&'a Item> {
    if entries.is_empty() {
        return None;
    }

    let weighted = entries.iter().any(|entry| entry.drop_chance.is_some());
    if mode == DrawMode::Auto && weighted {
        draw_weighted(entries, rng)
    } else {
        draw_by_rarity(entries, rng)
    }
}

/// Cumulative walk over the declared weights.
///
/// Slots without a weight never win the walk; they are only reachable through
/// the uniform fallback.
pub fn draw_weighted<'a, R: Rng + ?Sized>(
    entries: &[CaseEntry<'a>],
    rng: &mut R,
) -> Option<&'a Item> {
    let weights: Vec<(&'a Item, f64)> = entries
        .iter()
        .filter_map(|entry| entry.drop_chance.map(|w| (entry.item, w)))
        .collect();

    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    if total > 0.0 && total.is_finite() {
        let scale = if (total - WEIGHT_TOTAL).abs() > WEIGHT_EPSILON {
            WEIGHT_TOTAL / total
        } else {
            1.0
        };

        let roll = rng.random_range(0.0..=WEIGHT_TOTAL);
        let mut cumulative = 0.0;
        for &(item, weight) in &weights {
            cumulative += weight * scale;
            if roll <= cumulative {
                return Some(item);
            }
        }
    }

    let all: Vec<&'a Item> = entries.iter().map(|entry| entry.item).collect();
    pick_uniform(&all, rng)
}

/// Pick a tier from `RARITY_TABLE`, then an item within it
pub fn draw_by_rarity<'a, R: Rng + ?Sized>(
    entries: &[CaseEntry<'a>],
    rng: &mut R,
) -> Option<&'a Item> {
    let mut tiers: [Vec<&'a Item>; 7] = Default::default();
    for entry in entries {
        tiers[entry.item.rarity.index()].push(entry.item);
    }

    let roll: f64 = rng.random();
    let mut cumulative = 0.0;
    let mut chosen = None;
    for (rarity, probability) in RARITY_TABLE {
        cumulative += probability;
        if roll <= cumulative && !tiers[rarity.index()].is_empty() {
            chosen = Some(rarity);
            break;
        }
    }

    let rarity = chosen.unwrap_or(Rarity::ExceedinglyRare);
    let bucket = &tiers[rarity.index()];
    if !bucket.is_empty() {
        return pick_uniform(bucket, rng);
    }

    let all: Vec<&'a Item> = entries.iter().map(|entry| entry.item).collect();
    pick_uniform(&all, rng)
}

pub fn pick_uniform<'a, R: Rng + ?Sized>(items: &[&'a Item], rng: &mut R) -> Option<&'a Item> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.random_range(0..items.len())])
}

/// Uniform wear value within the item's range, rounded to `precision` places
pub fn roll_float<R: Rng + ?Sized>(item: &Item, precision: u32, rng: &mut R) -> f64 {
    let low = item.min_float.min(item.max_float);
    let high = item.min_float.max(item.max_float);

    let raw = if low < high {
        rng.random_range(low..=high)
    } else {
        low
    };

    let factor = 10f64.powi(precision as i32);
    ((raw * factor).round() / factor).clamp(low, high)
}

/// Full resolution: draw from the case, falling back to the whole catalog
/// when the case has no items, then roll the wear value.
pub fn resolve<R: Rng + ?Sized>(
    entries: &[CaseEntry<'_>],
    catalog: &[Item],
    mode: DrawMode,
    precision: u32,
    rng: &mut R,
) -> Result<Drop> {
    let item = match draw(entries, mode, rng) {
        Some(item) => item,
        None => {
            let all: Vec<&Item> = catalog.iter().collect();
            pick_uniform(&all, rng).ok_or(CoreError::EmptyCatalog)?
        }
    };

    let float = roll_float(item, precision, rng);
    Ok(Drop {
        item: item.clone(),
        float,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::HashMap;

    fn item(id: &str, rarity: Rarity, min_float: f64, max_float: f64) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_string(),
            weapon: "AK-47".to_string(),
            rarity,
            price: Amount::from_units(10),
            min_float,
            max_float,
            image_url: String::new(),
        }
    }

    fn count_draws(
        entries: &[CaseEntry<'_>],
        mode: DrawMode,
        draws: usize,
        seed: u64,
    ) -> HashMap<String, usize> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut counts = HashMap::new();
        for _ in 0..draws {
            let item = draw(entries, mode, &mut rng).unwrap();
            *counts.entry(item.id.clone()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_weighted_converges_to_weights() {
        let a = item("a", Rarity::Covert, 0.0, 1.0);
        let b = item("b", Rarity::Consumer, 0.0, 1.0);
        let entries = [
            CaseEntry { item: &a, drop_chance: Some(10.0) },
            CaseEntry { item: &b, drop_chance: Some(90.0) },
        ];

        let counts = count_draws(&entries, DrawMode::Auto, 20_000, 7);
        let share_a = counts["a"] as f64 / 20_000.0;
        assert!((share_a - 0.10).abs() < 0.015, "share of a was {}", share_a);
    }

    #[test]
    fn test_weights_are_normalized() {
        // 1:3 expressed in arbitrary units
        let a = item("a", Rarity::Consumer, 0.0, 1.0);
        let b = item("b", Rarity::Consumer, 0.0, 1.0);
        let entries = [
            CaseEntry { item: &a, drop_chance: Some(2.0) },
            CaseEntry { item: &b, drop_chance: Some(6.0) },
        ];

        let counts = count_draws(&entries, DrawMode::Auto, 20_000, 11);
        let share_a = counts["a"] as f64 / 20_000.0;
        assert!((share_a - 0.25).abs() < 0.02, "share of a was {}", share_a);
    }

    #[test]
    fn test_zero_weights_fall_back_to_uniform() {
        let a = item("a", Rarity::Consumer, 0.0, 1.0);
        let b = item("b", Rarity::Consumer, 0.0, 1.0);
        let entries = [
            CaseEntry { item: &a, drop_chance: Some(0.0) },
            CaseEntry { item: &b, drop_chance: Some(0.0) },
        ];

        let counts = count_draws(&entries, DrawMode::Auto, 2_000, 3);
        assert!(counts.contains_key("a"));
        assert!(counts.contains_key("b"));
    }

    #[test]
    fn test_rarity_mode_ignores_weights() {
        let common = item("common", Rarity::Consumer, 0.0, 1.0);
        let covert = item("covert", Rarity::Covert, 0.0, 1.0);
        // weights say covert almost always, rarity table says consumer
        let entries = [
            CaseEntry { item: &common, drop_chance: Some(1.0) },
            CaseEntry { item: &covert, drop_chance: Some(99.0) },
        ];

        let counts = count_draws(&entries, DrawMode::Rarity, 5_000, 5);
        assert!(counts["common"] > counts.get("covert").copied().unwrap_or(0));
    }

    #[test]
    fn test_rarity_skips_absent_tiers() {
        // Only restricted and covert present: consumer/industrial/mil-spec
        // rolls accumulate past them and land on restricted.
        let restricted = item("restricted", Rarity::Restricted, 0.0, 1.0);
        let covert = item("covert", Rarity::Covert, 0.0, 1.0);
        let entries = [
            CaseEntry { item: &restricted, drop_chance: None },
            CaseEntry { item: &covert, drop_chance: None },
        ];

        let counts = count_draws(&entries, DrawMode::Auto, 2_000, 9);
        let covert_share = counts.get("covert").copied().unwrap_or(0) as f64 / 2_000.0;
        assert!(counts["restricted"] > 1_900);
        assert!(covert_share < 0.05);
    }

    #[test]
    fn test_rarest_tier_reached_by_fallback() {
        let knife = item("knife", Rarity::ExceedinglyRare, 0.0, 1.0);
        let entries = [CaseEntry { item: &knife, drop_chance: None }];

        let counts = count_draws(&entries, DrawMode::Auto, 100, 1);
        assert_eq!(counts["knife"], 100);
    }

    #[test]
    fn test_float_stays_in_range() {
        let narrow = item("narrow", Rarity::Covert, 0.06, 0.08);
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        for _ in 0..1_000 {
            let f = roll_float(&narrow, INVENTORY_FLOAT_PRECISION, &mut rng);
            assert!(narrow.contains_float(f), "{} outside range", f);
        }

        let fixed = item("fixed", Rarity::Covert, 0.3, 0.3);
        assert_eq!(roll_float(&fixed, INVENTORY_FLOAT_PRECISION, &mut rng), 0.3);
    }

    #[test]
    fn test_float_precision() {
        let wide = item("wide", Rarity::Consumer, 0.0, 1.0);
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let f = roll_float(&wide, 2, &mut rng);
        assert_eq!((f * 100.0).round() / 100.0, f);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let a = item("a", Rarity::Consumer, 0.0, 1.0);
        let b = item("b", Rarity::Industrial, 0.0, 1.0);
        let entries = [
            CaseEntry { item: &a, drop_chance: Some(50.0) },
            CaseEntry { item: &b, drop_chance: Some(50.0) },
        ];

        let run = |seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            (0..50)
                .map(|_| resolve(&entries, &[], DrawMode::Auto, 6, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_empty_case_uses_catalog() {
        let catalog = vec![item("only", Rarity::Consumer, 0.0, 1.0)];
        let mut rng = ChaCha20Rng::seed_from_u64(0);

        let drop = resolve(&[], &catalog, DrawMode::Auto, 6, &mut rng).unwrap();
        assert_eq!(drop.item.id, "only");

        let err = resolve(&[], &[], DrawMode::Auto, 6, &mut rng).unwrap_err();
        assert_eq!(err, CoreError::EmptyCatalog);
    }
}
