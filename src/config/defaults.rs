//! Stock configuration shipped with the module

use super::{GatheringTool, HarvestConfig, HarvestableVehicle, RarityWeights, ResourceConfig};
use crate::core::types::Rarity;

const STOCK_DAMAGE_FACTOR: f32 = 5.0;

fn group(prefabs: &[&str], resources: Vec<ResourceConfig>) -> HarvestableVehicle {
    HarvestableVehicle {
        vehicle_short_prefab_names: prefabs.iter().map(|p| p.to_string()).collect(),
        damage_increase_factor: STOCK_DAMAGE_FACTOR,
        yield_probabilities: None,
        resources,
    }
}

/// Fragments plus a rare chance of refined metal; shared by most motorised groups
fn metal_table(max_fragments: u32) -> Vec<ResourceConfig> {
    vec![
        ResourceConfig::new("metal.fragments", 5, max_fragments),
        ResourceConfig::new("metal.refined", 1, 5).with_rarity(Rarity::Rare),
    ]
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            gathering_tools: vec![
                GatheringTool::new("hammer.salvaged"),
                GatheringTool::new("jackhammer"),
            ],
            yield_probabilities: None,
            rarity_weights: RarityWeights::default(),
            harvestable_vehicles: vec![
                group(&["minicopter.entity", "scraptransporthelicopter"], metal_table(10)),
                group(
                    &["hotairballoon"],
                    vec![
                        ResourceConfig::new("cloth", 10, 15),
                        ResourceConfig::new("metal.fragments", 5, 10),
                        ResourceConfig::new("rope", 1, 3),
                    ],
                ),
                group(&["rhib", "rowboat"], metal_table(15)),
                group(
                    &["kayak"],
                    vec![
                        ResourceConfig::new("wood", 10, 20),
                        ResourceConfig::new("metal.fragments", 5, 15),
                        ResourceConfig::new("cloth", 5, 10),
                        ResourceConfig::new("rope", 1, 3),
                    ],
                ),
                group(
                    &["motorbike", "motorbike_sidecar", "pedalbike", "pedaltrike"],
                    metal_table(15),
                ),
                group(
                    &[
                        "1module_cockpit",
                        "1module_cockpit_armored",
                        "1module_cockpit_with_engine",
                        "1module_engine",
                        "1module_flatbed",
                        "1module_passengers_armored",
                        "1module_rear_seats",
                        "1module_storage",
                        "1module_taxi",
                        "2module_camper",
                        "2module_flatbed",
                        "2module_fuel_tank",
                        "2module_passengers",
                    ],
                    metal_table(10),
                ),
            ],
        }
    }
}
