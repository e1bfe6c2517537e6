//! In-memory host used by the simulator binary and by tests

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::{GiveReason, Item, ItemService, PermissionService};
use crate::core::types::{PlayerId, SkinId};

/// One call to [`ItemService::give_item`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantRecord {
    pub player: PlayerId,
    pub item: Item,
    pub reason: GiveReason,
}

/// Host stand-in that records every grant
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    /// Item short names the host can create; empty accepts any name
    known_items: HashSet<String>,
    permissions: HashSet<(PlayerId, String)>,
    grants: Vec<GrantRecord>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_known_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_items.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn grant_permission(&mut self, player: PlayerId, permission: &str) {
        self.permissions.insert((player, permission.to_string()));
    }

    pub fn grants(&self) -> &[GrantRecord] {
        &self.grants
    }

    /// Total granted per item short name for one player
    pub fn totals_for(&self, player: PlayerId) -> BTreeMap<String, u64> {
        let mut totals = BTreeMap::new();
        for grant in self.grants.iter().filter(|g| g.player == player) {
            *totals.entry(grant.item.short_name.clone()).or_insert(0) += grant.item.amount as u64;
        }
        totals
    }
}

impl ItemService for InMemoryHost {
    fn create_item(&mut self, short_name: &str, amount: u32, skin: SkinId) -> Option<Item> {
        if !self.known_items.is_empty() && !self.known_items.contains(short_name) {
            return None;
        }
        Some(Item {
            short_name: short_name.to_string(),
            amount,
            skin,
            name: None,
        })
    }

    fn give_item(&mut self, player: PlayerId, item: Item, reason: GiveReason) {
        self.grants.push(GrantRecord { player, item, reason });
    }
}

impl PermissionService for InMemoryHost {
    fn has_permission(&self, player: PlayerId, permission: &str) -> bool {
        self.permissions.contains(&(player, permission.to_string()))
    }
}
