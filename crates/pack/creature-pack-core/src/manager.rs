//! PackManager: asset/player ownership and the handle-keyed public API.
//!
//! Methods:
//! - register_asset / unregister_asset (by name)
//! - create_player / remove_player (by handle)
//! - playback: set_active_animation, blend_to_animation, step, run_time, set_loop
//! - export: points, colors, uvs, indices, render_frame, bounds
//!
//! Every handle-taking method checks liveness and returns
//! [`PackError::PlayerNotFound`] instead of touching state.

use std::fmt;

use log::{debug, warn};

use crate::assets::AssetRegistry;
use crate::config::Config;
use crate::error::PackError;
use crate::ids::PlayerHandle;
use crate::instances::InstanceRegistry;
use crate::pack::{PackAsset, PackPlayer};
use crate::render::{compute_bounds, PlayerBounds, RenderFrame};

/// Registry facade generic over the player collaborator; the asset type
/// follows from [`PackPlayer::Asset`].
pub struct PackManager<P: PackPlayer> {
    cfg: Config,
    assets: AssetRegistry<P::Asset>,
    players: InstanceRegistry<P>,
}

impl<P: PackPlayer> fmt::Debug for PackManager<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackManager")
            .field("cfg", &self.cfg)
            .field("assets", &self.assets.names())
            .field("players", &self.players.handles())
            .finish()
    }
}

impl<P: PackPlayer> Default for PackManager<P> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<P: PackPlayer> PackManager<P> {
    /// Create an empty manager with the given config.
    pub fn new(cfg: Config) -> Self {
        Self {
            assets: AssetRegistry::with_capacity(cfg.asset_capacity),
            players: InstanceRegistry::new(&cfg),
            cfg,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    // ----- assets -----

    /// Decode `bytes` into a shared asset stored under `name`.
    pub fn register_asset(&mut self, name: &str, bytes: &[u8]) -> Result<(), PackError> {
        self.assets.register(name, bytes)
    }

    /// Forget `name`. Existing players bound to it keep working; new players
    /// can no longer be created from it.
    pub fn unregister_asset(&mut self, name: &str) -> Result<(), PackError> {
        self.assets.unregister(name)
    }

    pub fn has_asset(&self, name: &str) -> bool {
        self.assets.contains(name)
    }

    pub fn asset_names(&self) -> Vec<String> {
        self.assets.names()
    }

    // ----- players -----

    /// Create a player bound to the asset registered as `asset_name`.
    pub fn create_player(&mut self, asset_name: &str) -> Result<PlayerHandle, PackError> {
        let asset = self
            .assets
            .get(asset_name)
            .inspect_err(|e| warn!("create_player: {e}"))?;
        self.players
            .create(asset)
            .inspect_err(|e| warn!("create_player '{asset_name}': {e}"))
    }

    pub fn remove_player(&mut self, handle: PlayerHandle) -> Result<(), PackError> {
        self.players
            .remove(handle)
            .inspect_err(|e| warn!("remove_player: {e}"))
    }

    pub fn has_player(&self, handle: PlayerHandle) -> bool {
        self.players.contains(handle)
    }

    pub fn player_handles(&self) -> Vec<PlayerHandle> {
        self.players.handles()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Read-only access to a player. Mutation goes through the playback
    /// methods so render buffers stay in step with run time.
    pub fn player(&self, handle: PlayerHandle) -> Result<&P, PackError> {
        self.lookup("player", handle)
    }

    fn lookup(&self, op: &str, handle: PlayerHandle) -> Result<&P, PackError> {
        self.players.get(handle).inspect_err(|e| warn!("{op}: {e}"))
    }

    fn lookup_mut(&mut self, op: &str, handle: PlayerHandle) -> Result<&mut P, PackError> {
        self.players
            .get_mut(handle)
            .inspect_err(|e| warn!("{op}: {e}"))
    }

    // ----- playback -----

    /// Cut to `name` without blending.
    pub fn set_active_animation(
        &mut self,
        handle: PlayerHandle,
        name: &str,
    ) -> Result<(), PackError> {
        let player = self.lookup_mut("set_active_animation", handle)?;
        player.set_active_animation(name);
        debug!("player {handle}: cut to '{name}'");
        Ok(())
    }

    /// Blend into `name`. `blend_delta` should lie in `(0, 1]`; it is passed
    /// to the player unchanged.
    pub fn blend_to_animation(
        &mut self,
        handle: PlayerHandle,
        name: &str,
        blend_delta: f32,
    ) -> Result<(), PackError> {
        let player = self.lookup_mut("blend_to_animation", handle)?;
        player.blend_to_animation(name, blend_delta);
        debug!("player {handle}: blend to '{name}' by {blend_delta}");
        Ok(())
    }

    /// Advance the player by `delta` seconds and refresh its render buffers.
    pub fn step(&mut self, handle: PlayerHandle, delta: f32) -> Result<(), PackError> {
        let player = self.lookup_mut("step", handle)?;
        player.step_time(delta);
        player.sync_render_data();
        Ok(())
    }

    pub fn run_time(&self, handle: PlayerHandle) -> Result<f32, PackError> {
        self.lookup("run_time", handle).map(|p| p.run_time())
    }

    pub fn set_loop(&mut self, handle: PlayerHandle, should_loop: bool) -> Result<(), PackError> {
        let player = self.lookup_mut("set_loop", handle)?;
        player.set_looping(should_loop);
        Ok(())
    }

    pub fn is_looping(&self, handle: PlayerHandle) -> Result<bool, PackError> {
        self.lookup("is_looping", handle).map(|p| p.is_looping())
    }

    // ----- render export -----
    // Views borrow `self`; they end before the next `&mut self` call.

    pub fn points(&self, handle: PlayerHandle) -> Result<&[f32], PackError> {
        self.lookup("points", handle).map(|p| p.render_points())
    }

    pub fn colors(&self, handle: PlayerHandle) -> Result<&[u8], PackError> {
        self.lookup("colors", handle).map(|p| p.render_colors())
    }

    pub fn uvs(&self, handle: PlayerHandle) -> Result<&[f32], PackError> {
        self.lookup("uvs", handle).map(|p| p.render_uvs())
    }

    pub fn indices(&self, handle: PlayerHandle) -> Result<&[u32], PackError> {
        self.lookup("indices", handle).map(|p| p.asset().indices())
    }

    /// Every buffer of the current frame in one borrow.
    pub fn render_frame(&self, handle: PlayerHandle) -> Result<RenderFrame<'_>, PackError> {
        let player = self.lookup("render_frame", handle)?;
        Ok(RenderFrame {
            points: player.render_points(),
            colors: player.render_colors(),
            uvs: player.render_uvs(),
            indices: player.asset().indices(),
        })
    }

    pub fn bounds(&self, handle: PlayerHandle) -> Result<PlayerBounds, PackError> {
        let points = self.lookup("bounds", handle)?.render_points();
        compute_bounds(points).ok_or_else(|| {
            let err = PackError::EmptyRenderData { handle };
            warn!("bounds: {err}");
            err
        })
    }
}
