use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    packs: HashMap<String, PackEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PackEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        animations: Vec<String>,
    },
}

impl PackEntry {
    fn as_path(&self) -> &str {
        match self {
            PackEntry::Path(path) => path,
            PackEntry::Detailed { path, .. } => path,
        }
    }

    fn animations(&self) -> &[String] {
        match self {
            PackEntry::Path(_) => &[],
            PackEntry::Detailed { animations, .. } => animations,
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_bytes(rel: &str) -> Result<Vec<u8>> {
    let path = resolve_path(rel);
    fs::read(&path).with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn lookup(name: &str) -> Result<&'static PackEntry> {
    MANIFEST
        .packs
        .get(name)
        .ok_or_else(|| anyhow!("unknown pack fixture '{name}'"))
}

pub mod packs {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.packs.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Raw pack bytes, exactly as a host would hand them to the registry.
    pub fn bytes(name: &str) -> Result<Vec<u8>> {
        read_bytes(lookup(name)?.as_path())
    }

    /// Animation names the manifest promises the pack contains.
    pub fn animations(name: &str) -> Result<Vec<String>> {
        Ok(lookup(name)?.animations().to_vec())
    }
}
