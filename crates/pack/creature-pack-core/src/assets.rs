//! Named registry of shared, immutable pack assets.

use std::sync::Arc;

use hashbrown::HashMap;
use log::{info, warn};

use crate::error::PackError;
use crate::pack::PackAsset;

/// Owns every registered asset behind an `Arc` so players can share it.
#[derive(Debug)]
pub struct AssetRegistry<A> {
    assets: HashMap<String, Arc<A>>,
}

impl<A> Default for AssetRegistry<A> {
    fn default() -> Self {
        Self {
            assets: HashMap::new(),
        }
    }
}

impl<A: PackAsset> AssetRegistry<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            assets: HashMap::with_capacity(capacity),
        }
    }

    /// Decode `bytes` and store the result under `name`.
    /// The registry is left untouched when the name is taken or decoding fails.
    pub fn register(&mut self, name: &str, bytes: &[u8]) -> Result<(), PackError> {
        if self.assets.contains_key(name) {
            let err = PackError::DuplicateAsset {
                name: name.to_string(),
            };
            warn!("register asset: {err}");
            return Err(err);
        }

        let asset = A::decode(bytes).map_err(|e| {
            let err = PackError::Decode {
                name: name.to_string(),
                reason: e.to_string(),
            };
            warn!("register asset: {err}");
            err
        })?;

        info!(
            "added pack asset '{}' ({} points, {} indices)",
            name,
            asset.point_count(),
            asset.index_count()
        );
        self.assets.insert(name.to_string(), Arc::new(asset));
        Ok(())
    }

    /// Drop the registry's reference to `name`.
    /// Players created earlier keep their own `Arc` and stay valid.
    pub fn unregister(&mut self, name: &str) -> Result<(), PackError> {
        match self.assets.remove(name) {
            Some(asset) => {
                info!(
                    "removed pack asset '{}' ({} players still bound)",
                    name,
                    Arc::strong_count(&asset) - 1
                );
                Ok(())
            }
            None => {
                let err = PackError::AssetNotFound {
                    name: name.to_string(),
                };
                warn!("unregister asset: {err}");
                Err(err)
            }
        }
    }

    pub(crate) fn get(&self, name: &str) -> Result<Arc<A>, PackError> {
        self.assets
            .get(name)
            .cloned()
            .ok_or_else(|| PackError::AssetNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.assets.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
