//! Consistency checks for a loaded configuration
//!
//! Nothing here is enforced while handling events: a bad table just harvests
//! less (or nothing). The checks exist so operators see the problem at load time.

use std::collections::HashSet;
use std::fmt;

use super::{HarvestConfig, YieldTable};
use crate::harvest::total_weight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Works, but probably not what was meant
    Warning,
    /// Some part of the config can never produce anything
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: IssueSeverity,
    pub message: String,
}

impl ConfigIssue {
    fn warning(message: String) -> Self {
        Self { severity: IssueSeverity::Warning, message }
    }

    fn error(message: String) -> Self {
        Self { severity: IssueSeverity::Error, message }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            IssueSeverity::Warning => write!(f, "warning: {}", self.message),
            IssueSeverity::Error => write!(f, "error: {}", self.message),
        }
    }
}

fn check_yield_table(scope: &str, table: &YieldTable, issues: &mut Vec<ConfigIssue>) {
    if table.total_chance() != 100 {
        issues.push(ConfigIssue::warning(format!(
            "{} yield chances sum to {} instead of 100",
            scope,
            table.total_chance()
        )));
    }
    if table.high_yield_multiplier < 1.0 {
        issues.push(ConfigIssue::warning(format!(
            "{} high yield multiplier {} is below 1.0",
            scope, table.high_yield_multiplier
        )));
    }
}

impl HarvestConfig {
    /// Report inconsistencies in this configuration
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.gathering_tools.is_empty() {
            issues.push(ConfigIssue::warning(
                "no gathering tools configured; nothing can be harvested".into(),
            ));
        }

        if let Some(table) = &self.yield_probabilities {
            check_yield_table("global", table, &mut issues);
        }

        let mut seen_prefabs = HashSet::new();
        for (i, vehicle) in self.harvestable_vehicles.iter().enumerate() {
            let scope = format!("vehicle group #{}", i);

            for prefab in &vehicle.vehicle_short_prefab_names {
                if !seen_prefabs.insert(prefab.as_str()) {
                    issues.push(ConfigIssue::warning(format!(
                        "{}: prefab '{}' already listed by an earlier group and will be ignored here",
                        scope, prefab
                    )));
                }
            }

            if vehicle.damage_increase_factor <= 0.0 {
                issues.push(ConfigIssue::warning(format!(
                    "{}: damage increase factor {} cancels or inverts damage",
                    scope, vehicle.damage_increase_factor
                )));
            }

            if let Some(table) = &vehicle.yield_probabilities {
                check_yield_table(&scope, table, &mut issues);
            }

            if vehicle.resources.is_empty() {
                issues.push(ConfigIssue::warning(format!("{}: no resources", scope)));
                continue;
            }

            if total_weight(&vehicle.resources, |r| self.rarity_weights.weight_of(r.rarity)) == 0 {
                issues.push(ConfigIssue::error(format!(
                    "{}: every resource has a rarity with no weight",
                    scope
                )));
            }

            for resource in &vehicle.resources {
                if resource.minimum_amount > resource.maximum_amount {
                    issues.push(ConfigIssue::error(format!(
                        "{}: '{}' minimum amount {} exceeds maximum {}",
                        scope,
                        resource.item_short_name,
                        resource.minimum_amount,
                        resource.maximum_amount
                    )));
                }
                if self.rarity_weights.weight_of(resource.rarity) == 0 {
                    issues.push(ConfigIssue::warning(format!(
                        "{}: '{}' has rarity {} with no weight and can never be picked",
                        scope,
                        resource.item_short_name,
                        resource.rarity.name()
                    )));
                }
            }
        }

        issues
    }
}
