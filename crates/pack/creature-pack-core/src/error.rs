//! Error types for the pack registry.

use serde::{Deserialize, Serialize};

use crate::ids::PlayerHandle;

/// Failures reported by [`crate::PackManager`] and its registries.
///
/// Every variant is recovered locally: the operation leaves the registry
/// untouched and hands the error back to the caller.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PackError {
    /// An asset with this name is already registered
    #[error("pack asset '{name}' already exists")]
    DuplicateAsset { name: String },

    /// No asset is registered under this name
    #[error("pack asset '{name}' does not exist")]
    AssetNotFound { name: String },

    /// The handle was never issued or its player has been removed
    #[error("player with handle {handle} not found")]
    PlayerNotFound { handle: PlayerHandle },

    /// The asset collaborator rejected the byte buffer
    #[error("failed to decode pack asset '{name}': {reason}")]
    Decode { name: String, reason: String },

    /// The player currently exports no points, so no bounds exist
    #[error("player with handle {handle} has no render points")]
    EmptyRenderData { handle: PlayerHandle },

    /// The handle counter reached its limit
    #[error("player handles exhausted")]
    HandlesExhausted,
}

impl PackError {
    /// Short label used when logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DuplicateAsset { .. } => "duplicate",
            Self::AssetNotFound { .. } | Self::PlayerNotFound { .. } => "not_found",
            Self::Decode { .. } => "decode",
            Self::EmptyRenderData { .. } => "render",
            Self::HandlesExhausted => "capacity",
        }
    }

    /// True for the not-found family (missing asset name or dead handle).
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AssetNotFound { .. } | Self::PlayerNotFound { .. }
        )
    }
}
