//! Harvest configuration - tools, vehicle groups, resource tables and weights
//!
//! The configuration is a plain value loaded once and handed to the
//! [`HarvestHandler`](crate::handler::HarvestHandler) at construction. It never
//! changes while events are being processed.

mod defaults;
mod validate;

pub use validate::{ConfigIssue, IssueSeverity};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{HarvestError, Result};
use crate::core::types::{Rarity, SkinId};

/// Permission the attacking player must hold for a hit to harvest anything
pub const USE_PERMISSION: &str = "harvestablevehicles.use";

/// Complete harvest configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Tools that may be used to harvest
    #[serde(default)]
    pub gathering_tools: Vec<GatheringTool>,
    /// Default yield table, used by groups that don't carry their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_probabilities: Option<YieldTable>,
    /// Relative weights for each rarity tier
    #[serde(default)]
    pub rarity_weights: RarityWeights,
    /// Vehicle groups; the first group listing a prefab wins
    #[serde(default)]
    pub harvestable_vehicles: Vec<HarvestableVehicle>,
}

/// A tool allowed for harvesting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatheringTool {
    pub item_short_name: String,
    /// Required skin; zero accepts any skin
    #[serde(default)]
    pub skin_id: SkinId,
}

impl GatheringTool {
    pub fn new(item_short_name: impl Into<String>) -> Self {
        Self {
            item_short_name: item_short_name.into(),
            skin_id: SkinId::NONE,
        }
    }

    pub fn with_skin(mut self, skin_id: SkinId) -> Self {
        self.skin_id = skin_id;
        self
    }

    /// Whether an item wearing `skin` satisfies this tool's skin restriction
    pub fn accepts_skin(&self, skin: SkinId) -> bool {
        self.skin_id.is_none() || self.skin_id == skin
    }
}

/// A group of vehicle prefabs sharing one resource table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestableVehicle {
    pub vehicle_short_prefab_names: Vec<String>,
    /// Multiplier applied to the hit's damage after a harvest attempt
    #[serde(default = "default_damage_factor")]
    pub damage_increase_factor: f32,
    /// Overrides the global yield table for this group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_probabilities: Option<YieldTable>,
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

fn default_damage_factor() -> f32 {
    1.0
}

impl HarvestableVehicle {
    pub fn matches_prefab(&self, short_prefab_name: &str) -> bool {
        self.vehicle_short_prefab_names
            .iter()
            .any(|name| name == short_prefab_name)
    }
}

/// One harvestable resource in a vehicle group's table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub item_short_name: String,
    /// Custom name given to the created item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub skin_id: SkinId,
    pub minimum_amount: u32,
    pub maximum_amount: u32,
    #[serde(default)]
    pub rarity: Rarity,
}

impl ResourceConfig {
    pub fn new(item_short_name: impl Into<String>, minimum_amount: u32, maximum_amount: u32) -> Self {
        Self {
            item_short_name: item_short_name.into(),
            display_name: None,
            skin_id: SkinId::NONE,
            minimum_amount,
            maximum_amount,
            rarity: Rarity::Common,
        }
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_skin(mut self, skin_id: SkinId) -> Self {
        self.skin_id = skin_id;
        self
    }
}

/// Weight per rarity tier. A missing tier has no weight and is never picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityWeights {
    #[serde(rename = "Common", default, skip_serializing_if = "Option::is_none")]
    pub common: Option<u32>,
    #[serde(rename = "Uncommon", default, skip_serializing_if = "Option::is_none")]
    pub uncommon: Option<u32>,
    #[serde(rename = "Rare", default, skip_serializing_if = "Option::is_none")]
    pub rare: Option<u32>,
    #[serde(rename = "VeryRare", default, skip_serializing_if = "Option::is_none")]
    pub very_rare: Option<u32>,
}

impl RarityWeights {
    /// Weights with no tier mapped
    pub fn empty() -> Self {
        Self {
            common: None,
            uncommon: None,
            rare: None,
            very_rare: None,
        }
    }

    pub fn get(&self, rarity: Rarity) -> Option<u32> {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::VeryRare => self.very_rare,
        }
    }

    pub fn set(&mut self, rarity: Rarity, weight: Option<u32>) {
        let slot = match rarity {
            Rarity::Common => &mut self.common,
            Rarity::Uncommon => &mut self.uncommon,
            Rarity::Rare => &mut self.rare,
            Rarity::VeryRare => &mut self.very_rare,
        };
        *slot = weight;
    }

    pub fn with(mut self, rarity: Rarity, weight: u32) -> Self {
        self.set(rarity, Some(weight));
        self
    }

    /// Effective weight: unmapped tiers count as zero
    pub fn weight_of(&self, rarity: Rarity) -> u32 {
        self.get(rarity).unwrap_or(0)
    }
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self {
            common: Some(60),
            uncommon: Some(25),
            rare: Some(10),
            very_rare: Some(5),
        }
    }
}

/// Chances (out of 100) for the three yield outcomes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldTable {
    pub no_yield_chance: u32,
    pub normal_yield_chance: u32,
    pub high_yield_chance: u32,
    pub high_yield_multiplier: f64,
}

impl YieldTable {
    pub fn new(no_yield: u32, normal: u32, high: u32, high_yield_multiplier: f64) -> Self {
        Self {
            no_yield_chance: no_yield,
            normal_yield_chance: normal,
            high_yield_chance: high,
            high_yield_multiplier,
        }
    }

    /// First draw value that lands in the high-yield band
    pub fn high_threshold(&self) -> u32 {
        self.no_yield_chance.saturating_add(self.normal_yield_chance)
    }

    pub fn total_chance(&self) -> u32 {
        self.high_threshold().saturating_add(self.high_yield_chance)
    }
}

impl HarvestConfig {
    /// Configuration with no tools and no vehicle groups
    pub fn empty() -> Self {
        Self {
            gathering_tools: Vec::new(),
            yield_probabilities: None,
            rarity_weights: RarityWeights::default(),
            harvestable_vehicles: Vec::new(),
        }
    }

    /// Find the configured tool with this short name
    pub fn tool(&self, item_short_name: &str) -> Option<&GatheringTool> {
        self.gathering_tools
            .iter()
            .find(|t| t.item_short_name == item_short_name)
    }

    /// Find the first vehicle group listing this prefab
    pub fn vehicle_for_prefab(&self, short_prefab_name: &str) -> Option<&HarvestableVehicle> {
        self.harvestable_vehicles
            .iter()
            .find(|v| v.matches_prefab(short_prefab_name))
    }

    /// Yield table in effect for a group: its own, else the global one
    pub fn yield_table_for<'a>(&'a self, vehicle: &'a HarvestableVehicle) -> Option<&'a YieldTable> {
        vehicle
            .yield_probabilities
            .as_ref()
            .or(self.yield_probabilities.as_ref())
    }

    /// Load a config file, picking the format by extension (`.toml` or `.json`)
    ///
    /// Validation issues are logged, not returned; a config with issues still loads.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::parse_toml(&content)?,
            Some("json") => Self::parse_json(&content)?,
            other => {
                return Err(HarvestError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        for issue in config.validate() {
            tracing::warn!(path = %path.display(), "{}", issue);
        }
        tracing::info!(
            path = %path.display(),
            tools = config.gathering_tools.len(),
            vehicle_groups = config.harvestable_vehicles.len(),
            "Loaded harvest config"
        );

        Ok(config)
    }

    /// Parse config from TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse config from JSON string
    pub fn parse_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| HarvestError::InvalidConfig(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Like [`validate`](Self::validate), but fails on the first error-level issue
    pub fn validated(self) -> Result<Self> {
        if let Some(issue) = self
            .validate()
            .into_iter()
            .find(|i| i.severity == IssueSeverity::Error)
        {
            return Err(HarvestError::InvalidConfig(issue.message));
        }
        Ok(self)
    }
}
