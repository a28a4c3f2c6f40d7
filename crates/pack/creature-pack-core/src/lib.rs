//! Creature Pack Core (engine-agnostic)
//!
//! Handle-based runtime registry for Creature pack assets and the playback
//! instances bound to them. The crate owns:
//! - named, shared, immutable assets ([`AssetRegistry`]),
//! - playback instances keyed by monotonic [`PlayerHandle`]s ([`InstanceRegistry`]),
//! - the [`PackManager`] facade that validates handles, drives playback and
//!   exposes borrowed render buffers ([`RenderFrame`], [`PlayerBounds`]).
//!
//! Decoding a pack and evaluating its animations are delegated to the
//! [`PackAsset`] / [`PackPlayer`] collaborators. [`baked`] ships a small
//! JSON-backed implementation of both for tests and host bindings.

pub mod assets;
pub mod baked;
pub mod config;
pub mod error;
pub mod ids;
pub mod instances;
pub mod manager;
pub mod pack;
pub mod render;

// Re-exports for consumers (adapters)
pub use assets::AssetRegistry;
pub use baked::{AnimationState, BakedAnimation, BakedFrame, BakedPack, BakedPackError, BakedPlayer};
pub use config::Config;
pub use error::PackError;
pub use ids::{HandleAllocator, PlayerHandle};
pub use instances::InstanceRegistry;
pub use manager::PackManager;
pub use pack::{PackAsset, PackPlayer};
pub use render::{compute_bounds, PlayerBounds, RenderFrame};
