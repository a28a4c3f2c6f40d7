//! Playback instances keyed by handle.

use std::sync::Arc;

use hashbrown::HashMap;
use log::info;

use crate::config::Config;
use crate::error::PackError;
use crate::ids::{HandleAllocator, PlayerHandle};
use crate::pack::PackPlayer;

/// Exclusive owner of every live player. The handle generator lives here so
/// independent registries never share a counter.
#[derive(Debug)]
pub struct InstanceRegistry<P> {
    ids: HandleAllocator,
    players: HashMap<PlayerHandle, P>,
}

impl<P: PackPlayer> Default for InstanceRegistry<P> {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl<P: PackPlayer> InstanceRegistry<P> {
    pub fn new(cfg: &Config) -> Self {
        Self {
            ids: HandleAllocator::with_limit(cfg.max_handle.min(i32::MAX as u32)),
            players: HashMap::with_capacity(cfg.player_capacity),
        }
    }

    /// Construct a player bound to `asset` under a fresh handle.
    /// The player's render buffers are synced before the handle is returned.
    pub fn create(&mut self, asset: Arc<P::Asset>) -> Result<PlayerHandle, PackError> {
        let handle = self.ids.alloc().ok_or(PackError::HandlesExhausted)?;
        let mut player = P::new(asset);
        player.sync_render_data();
        self.players.insert(handle, player);
        info!("added pack player with handle {handle}");
        Ok(handle)
    }

    /// Destroy the player; its handle is never issued again.
    pub fn remove(&mut self, handle: PlayerHandle) -> Result<(), PackError> {
        self.players
            .remove(&handle)
            .map(|_| info!("removed pack player with handle {handle}"))
            .ok_or(PackError::PlayerNotFound { handle })
    }

    pub fn get(&self, handle: PlayerHandle) -> Result<&P, PackError> {
        self.players
            .get(&handle)
            .ok_or(PackError::PlayerNotFound { handle })
    }

    pub fn get_mut(&mut self, handle: PlayerHandle) -> Result<&mut P, PackError> {
        self.players
            .get_mut(&handle)
            .ok_or(PackError::PlayerNotFound { handle })
    }

    pub fn contains(&self, handle: PlayerHandle) -> bool {
        self.players.contains_key(&handle)
    }

    /// Live handles in ascending order.
    pub fn handles(&self) -> Vec<PlayerHandle> {
        let mut handles: Vec<PlayerHandle> = self.players.keys().copied().collect();
        handles.sort();
        handles
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
