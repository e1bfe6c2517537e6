//! Host capability interfaces
//!
//! The game server owns entities, players, items and permissions. The handler
//! only sees read-only snapshots of the hit entity and its attacker, and calls
//! back into the host through the traits below.

pub mod memory;

pub use memory::{GrantRecord, InMemoryHost};

use serde::{Deserialize, Serialize};

use crate::core::types::{ItemCategory, PlayerId, SkinId};

/// Broad entity classes the host distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Vehicle,
    HotAirBalloon,
    /// Anything else: buildings, animals, players...
    Other,
}

impl EntityKind {
    pub fn is_harvestable_kind(&self) -> bool {
        matches!(self, EntityKind::Vehicle | EntityKind::HotAirBalloon)
    }
}

/// Lock mounted in an entity's lock slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockKind {
    Key,
    Code { whitelist: Vec<PlayerId> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityLock {
    pub owner: PlayerId,
    pub kind: LockKind,
}

impl EntityLock {
    pub fn key(owner: PlayerId) -> Self {
        Self { owner, kind: LockKind::Key }
    }

    pub fn code(owner: PlayerId, whitelist: Vec<PlayerId>) -> Self {
        Self { owner, kind: LockKind::Code { whitelist } }
    }

    /// Code locks require whitelisting; every lock requires ownership
    pub fn permits(&self, player: PlayerId) -> bool {
        if let LockKind::Code { whitelist } = &self.kind {
            if !whitelist.contains(&player) {
                return false;
            }
        }
        self.owner == player
    }
}

/// The entity being damaged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub kind: EntityKind,
    pub short_prefab_name: String,
    pub health: f32,
    pub lock: Option<EntityLock>,
}

impl EntitySnapshot {
    pub fn vehicle(short_prefab_name: impl Into<String>, health: f32) -> Self {
        Self {
            kind: EntityKind::Vehicle,
            short_prefab_name: short_prefab_name.into(),
            health,
            lock: None,
        }
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_lock(mut self, lock: EntityLock) -> Self {
        self.lock = Some(lock);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Item the attacker is holding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveItem {
    pub short_name: String,
    pub category: ItemCategory,
    pub skin: SkinId,
}

impl ActiveItem {
    pub fn tool(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            category: ItemCategory::Tool,
            skin: SkinId::NONE,
        }
    }

    pub fn with_skin(mut self, skin: SkinId) -> Self {
        self.skin = skin;
        self
    }
}

/// The actor that initiated the hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub is_npc: bool,
    pub active_item: Option<ActiveItem>,
}

impl PlayerSnapshot {
    pub fn new(id: PlayerId) -> Self {
        Self { id, is_npc: false, active_item: None }
    }

    pub fn holding(mut self, item: ActiveItem) -> Self {
        self.active_item = Some(item);
        self
    }

    pub fn npc(mut self) -> Self {
        self.is_npc = true;
        self
    }
}

/// An item created by the host, not yet in anyone's inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub short_name: String,
    pub amount: u32,
    pub skin: SkinId,
    /// Custom name shown instead of the definition's name
    pub name: Option<String>,
}

/// Why an item is being handed to a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GiveReason {
    ResourceHarvested,
}

/// Host's damage container for a hit
pub trait DamageScaling {
    /// Multiply every damage type by `factor`
    fn scale_all(&mut self, factor: f32);
}

/// Item creation and inventory grant primitives
pub trait ItemService {
    /// Create an item by short name. `None` when the host doesn't know the item.
    fn create_item(&mut self, short_name: &str, amount: u32, skin: SkinId) -> Option<Item>;

    fn give_item(&mut self, player: PlayerId, item: Item, reason: GiveReason);
}

/// Permission lookup. Registration happens on the host side.
pub trait PermissionService {
    fn has_permission(&self, player: PlayerId, permission: &str) -> bool;
}

/// Everything the handler needs from the host
pub trait Host: ItemService + PermissionService {}

impl<T: ItemService + PermissionService + ?Sized> Host for T {}

/// Per-type damage amounts carried by a hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageTypes {
    amounts: Vec<(String, f32)>,
}

impl DamageTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, damage_type: impl Into<String>, amount: f32) -> Self {
        self.add(damage_type, amount);
        self
    }

    pub fn add(&mut self, damage_type: impl Into<String>, amount: f32) {
        let damage_type = damage_type.into();
        match self.amounts.iter_mut().find(|(t, _)| *t == damage_type) {
            Some((_, existing)) => *existing += amount,
            None => self.amounts.push((damage_type, amount)),
        }
    }

    pub fn get(&self, damage_type: &str) -> f32 {
        self.amounts
            .iter()
            .find(|(t, _)| t == damage_type)
            .map(|(_, a)| *a)
            .unwrap_or(0.0)
    }

    pub fn total(&self) -> f32 {
        self.amounts.iter().map(|(_, a)| a).sum()
    }
}

impl DamageScaling for DamageTypes {
    fn scale_all(&mut self, factor: f32) {
        for (_, amount) in &mut self.amounts {
            *amount *= factor;
        }
    }
}

/// A damage event as delivered by the host
pub struct DamageEvent<'a> {
    pub entity: &'a EntitySnapshot,
    pub initiator: Option<&'a PlayerSnapshot>,
    pub damage: &'a mut dyn DamageScaling,
}

impl<'a> DamageEvent<'a> {
    pub fn new(
        entity: &'a EntitySnapshot,
        initiator: Option<&'a PlayerSnapshot>,
        damage: &'a mut dyn DamageScaling,
    ) -> Self {
        Self { entity, initiator, damage }
    }
}
