//! Damage event handler
//!
//! Receives the host's damage callback for every entity, filters down to
//! vehicles hit by a permitted player with a configured tool, grants the rolled
//! resource and rescales the hit's damage.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{HarvestConfig, HarvestableVehicle, USE_PERMISSION};
use crate::core::types::{ItemCategory, PlayerId};
use crate::harvest::{roll_harvest, RollMiss};
use crate::host::{
    DamageEvent, DamageScaling, EntitySnapshot, GiveReason, Host, Item, PlayerSnapshot,
};

/// Why an event was ignored before any roll happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotAVehicle,
    Destroyed,
    NoInitiator,
    NpcInitiator,
    NoToolEquipped,
    ToolNotConfigured,
    ToolSkinMismatch,
    LockDenied,
    PermissionDenied,
    VehicleNotConfigured,
}

/// Why a matched vehicle hit granted nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatherMiss {
    Roll(RollMiss),
    /// The host couldn't create the rolled item
    ItemNotCreated,
}

/// What handling one damage event did
#[derive(Debug, Clone, PartialEq)]
pub enum HarvestOutcome {
    /// An item was granted. `damage_scale` is the factor applied, if any.
    Harvested {
        item: Item,
        damage_scale: Option<f32>,
    },
    /// The vehicle matched but nothing was granted; damage was still rescaled
    ScaledOnly {
        miss: GatherMiss,
        damage_scale: Option<f32>,
    },
    Skipped(SkipReason),
}

impl HarvestOutcome {
    pub fn granted(&self) -> Option<&Item> {
        match self {
            HarvestOutcome::Harvested { item, .. } => Some(item),
            _ => None,
        }
    }

    pub fn damage_scale(&self) -> Option<f32> {
        match self {
            HarvestOutcome::Harvested { damage_scale, .. }
            | HarvestOutcome::ScaledOnly { damage_scale, .. } => *damage_scale,
            HarvestOutcome::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            HarvestOutcome::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Scale a hit's damage unless the factor is exactly 1.0
///
/// Returns the factor that was applied.
pub fn scale_damage(damage: &mut dyn DamageScaling, factor: f32) -> Option<f32> {
    if factor == 1.0 {
        return None;
    }
    damage.scale_all(factor);
    Some(factor)
}

/// Harvest rule-module bound to one configuration and one RNG
pub struct HarvestHandler<R: Rng = ChaCha8Rng> {
    config: HarvestConfig,
    rng: R,
}

impl HarvestHandler<ChaCha8Rng> {
    /// Handler with an entropy-seeded RNG
    pub fn new(config: HarvestConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Handler whose rolls are reproducible for a given seed
    pub fn with_seed(config: HarvestConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> HarvestHandler<R> {
    pub fn with_rng(config: HarvestConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Host callback for every entity damage event
    pub fn on_entity_take_damage<H: Host + ?Sized>(
        &mut self,
        event: DamageEvent<'_>,
        host: &mut H,
    ) -> HarvestOutcome {
        let DamageEvent { entity, initiator, damage } = event;

        let player = match self.check_eligibility(entity, initiator, host) {
            Ok(player) => player,
            Err(reason) => {
                tracing::trace!(prefab = %entity.short_prefab_name, ?reason, "Hit skipped");
                return HarvestOutcome::Skipped(reason);
            }
        };

        let Some(vehicle) = self.config.vehicle_for_prefab(&entity.short_prefab_name) else {
            tracing::trace!(prefab = %entity.short_prefab_name, "No vehicle group for prefab");
            return HarvestOutcome::Skipped(SkipReason::VehicleNotConfigured);
        };
        let factor = vehicle.damage_increase_factor;

        let gathered = gather(&self.config, vehicle, player, host, &mut self.rng);
        let damage_scale = scale_damage(damage, factor);
        if let Some(factor) = damage_scale {
            tracing::debug!(prefab = %entity.short_prefab_name, factor, "Scaled hit damage");
        }

        match gathered {
            Ok(item) => HarvestOutcome::Harvested { item, damage_scale },
            Err(miss) => HarvestOutcome::ScaledOnly { miss, damage_scale },
        }
    }

    /// Every check that doesn't need the vehicle group, in host-hook order
    fn check_eligibility<H: Host + ?Sized>(
        &self,
        entity: &EntitySnapshot,
        initiator: Option<&PlayerSnapshot>,
        host: &H,
    ) -> Result<PlayerId, SkipReason> {
        check_entity(entity)?;

        let player = initiator.ok_or(SkipReason::NoInitiator)?;
        if player.is_npc {
            return Err(SkipReason::NpcInitiator);
        }

        let item = player
            .active_item
            .as_ref()
            .filter(|item| item.category == ItemCategory::Tool)
            .ok_or(SkipReason::NoToolEquipped)?;

        let tool = self
            .config
            .tool(&item.short_name)
            .ok_or(SkipReason::ToolNotConfigured)?;
        if !tool.accepts_skin(item.skin) {
            return Err(SkipReason::ToolSkinMismatch);
        }

        if let Some(lock) = &entity.lock {
            if !lock.permits(player.id) {
                return Err(SkipReason::LockDenied);
            }
        }

        if !host.has_permission(player.id, USE_PERMISSION) {
            return Err(SkipReason::PermissionDenied);
        }

        Ok(player.id)
    }
}

/// Kind and health checks on the hit entity
fn check_entity(entity: &EntitySnapshot) -> Result<(), SkipReason> {
    if !entity.kind.is_harvestable_kind() {
        return Err(SkipReason::NotAVehicle);
    }
    if !entity.is_alive() {
        return Err(SkipReason::Destroyed);
    }
    Ok(())
}

/// Roll a resource for `vehicle` and hand it to `player`
fn gather<H: Host + ?Sized, R: Rng + ?Sized>(
    config: &HarvestConfig,
    vehicle: &HarvestableVehicle,
    player: PlayerId,
    host: &mut H,
    rng: &mut R,
) -> Result<Item, GatherMiss> {
    let roll = roll_harvest(config, vehicle, rng).map_err(|miss| {
        tracing::trace!(player = %player, reason = miss.describe(), "Nothing gathered");
        GatherMiss::Roll(miss)
    })?;

    let resource = roll.resource;
    let mut item = host
        .create_item(&resource.item_short_name, roll.amount, resource.skin_id)
        .ok_or_else(|| {
            tracing::warn!(item = %resource.item_short_name, "Host could not create item");
            GatherMiss::ItemNotCreated
        })?;
    if let Some(name) = &resource.display_name {
        item.name = Some(name.clone());
    }

    tracing::debug!(
        player = %player,
        item = %item.short_name,
        amount = item.amount,
        rarity = resource.rarity.name(),
        "Granting harvested resource"
    );
    host.give_item(player, item.clone(), GiveReason::ResourceHarvested);

    Ok(item)
}
