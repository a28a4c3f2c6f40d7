//! Baked JSON packs: a small reference implementation of [`PackAsset`] and
//! [`PackPlayer`].
//!
//! Model:
//! - A pack carries the mesh topology (`indices`), base `uvs` and `colors`, and a
//!   list of animations made of pre-baked frames of `x, y` points.
//! - Frames are evenly spaced at `fps`; an animation lasts `frames / fps` seconds.
//! - Sampling picks the frame at `floor(run_time * fps)` (no interpolation).
//! - A blend cross-fades the sampled frames of the current and target
//!   animations; progress grows by `blend_delta` on every step.
//!
//! The JSON schema is:
//! `{ name, point_count, indices, uvs, colors?, animations: [{ name, fps, frames: [{ points, colors? }] }] }`

use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::pack::{PackAsset, PackPlayer};

/// Errors produced while decoding a baked pack buffer.
#[derive(Debug, thiserror::Error)]
pub enum BakedPackError {
    #[error("pack json parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("pack has no animations")]
    NoAnimations,
    #[error("animation '{name}': {reason}")]
    InvalidAnimation { name: String, reason: String },
    #[error("{buffer} has length {len}, expected {expected}")]
    BufferLength {
        buffer: String,
        len: usize,
        expected: usize,
    },
    #[error("index {index} out of range for {point_count} points")]
    IndexOutOfRange { index: u32, point_count: usize },
    #[error("point count {point_count} is too large")]
    PointCountTooLarge { point_count: usize },
}

/// One baked frame. `colors` overrides the pack colors when present.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BakedFrame {
    pub points: Vec<f32>,
    #[serde(default)]
    pub colors: Option<Vec<u8>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BakedAnimation {
    pub name: String,
    pub fps: f32,
    pub frames: Vec<BakedFrame>,
}

impl BakedAnimation {
    /// Length in seconds.
    pub fn duration(&self) -> f32 {
        self.frames.len() as f32 / self.fps
    }

    /// Frame shown at `time` seconds (clamped to the last frame).
    /// `None` only for an animation without frames.
    pub fn frame_at(&self, time: f32) -> Option<&BakedFrame> {
        let last = self.frames.len().checked_sub(1)?;
        let idx = (time.max(0.0) * self.fps).floor() as usize;
        self.frames.get(idx.min(last))
    }
}

/// Decoded pack shared by every [`BakedPlayer`] created from it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BakedPack {
    #[serde(default)]
    pub name: String,
    pub point_count: usize,
    pub indices: Vec<u32>,
    pub uvs: Vec<f32>,
    /// Base RGBA colors; filled with opaque white on decode when omitted.
    #[serde(default)]
    pub colors: Vec<u8>,
    pub animations: Vec<BakedAnimation>,
}

impl BakedPack {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, BakedPackError> {
        let mut pack: BakedPack = serde_json::from_slice(bytes)?;
        // uvs are real data, so a matching length bounds the default colors below.
        check_len("uvs", pack.uvs.len(), scaled(pack.point_count, 2)?)?;
        if pack.colors.is_empty() {
            pack.colors = vec![255; scaled(pack.point_count, 4)?];
        }
        pack.validate()?;
        Ok(pack)
    }

    pub fn to_json_vec(&self) -> Result<Vec<u8>, BakedPackError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Check buffer lengths and index ranges against `point_count`.
    pub fn validate(&self) -> Result<(), BakedPackError> {
        let n = self.point_count;
        let (xy_len, rgba_len) = (scaled(n, 2)?, scaled(n, 4)?);
        check_len("uvs", self.uvs.len(), xy_len)?;
        check_len("colors", self.colors.len(), rgba_len)?;
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(BakedPackError::IndexOutOfRange {
                index,
                point_count: n,
            });
        }
        if self.animations.is_empty() {
            return Err(BakedPackError::NoAnimations);
        }
        for anim in &self.animations {
            let invalid = |reason: &str| BakedPackError::InvalidAnimation {
                name: anim.name.clone(),
                reason: reason.to_string(),
            };
            if !anim.fps.is_finite() || anim.fps <= 0.0 {
                return Err(invalid("fps must be finite and > 0"));
            }
            if anim.frames.is_empty() {
                return Err(invalid("no frames"));
            }
            for (i, frame) in anim.frames.iter().enumerate() {
                let label = format!("{}[{i}]", anim.name);
                check_len(&format!("{label}.points"), frame.points.len(), xy_len)?;
                if let Some(colors) = &frame.colors {
                    check_len(&format!("{label}.colors"), colors.len(), rgba_len)?;
                }
            }
        }
        Ok(())
    }

    pub fn animation_index(&self, name: &str) -> Option<usize> {
        self.animations.iter().position(|a| a.name == name)
    }

    pub fn animation_names(&self) -> Vec<&str> {
        self.animations.iter().map(|a| a.name.as_str()).collect()
    }
}

/// Length of a per-point buffer with `per_point` values per point.
fn scaled(point_count: usize, per_point: usize) -> Result<usize, BakedPackError> {
    point_count
        .checked_mul(per_point)
        .ok_or(BakedPackError::PointCountTooLarge { point_count })
}

fn check_len(buffer: &str, len: usize, expected: usize) -> Result<(), BakedPackError> {
    if len == expected {
        Ok(())
    } else {
        Err(BakedPackError::BufferLength {
            buffer: buffer.to_string(),
            len,
            expected,
        })
    }
}

impl PackAsset for BakedPack {
    type Error = BakedPackError;

    fn decode(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_json_slice(bytes)
    }

    fn point_count(&self) -> usize {
        self.point_count
    }

    fn indices(&self) -> &[u32] {
        &self.indices
    }
}

/// Animation sub-state of a player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationState<'a> {
    Cut(&'a str),
    Blending {
        from: &'a str,
        to: &'a str,
        progress: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Blend {
    target: usize,
    progress: f32,
    delta: f32,
}

/// Playback of a [`BakedPack`].
#[derive(Debug)]
pub struct BakedPlayer {
    pack: Arc<BakedPack>,
    active: usize,
    blend: Option<Blend>,
    run_time: f32,
    looping: bool,
    points: Vec<f32>,
    colors: Vec<u8>,
    uvs: Vec<f32>,
}

fn fmod(a: f32, b: f32) -> f32 {
    if b == 0.0 {
        return 0.0;
    }
    let m = a % b;
    if (m < 0.0 && b > 0.0) || (m > 0.0 && b < 0.0) {
        m + b
    } else {
        m
    }
}

/// Map `t` into `[0, duration)` when looping, else clamp into `[0, duration]`.
fn wrap_time(t: f32, duration: f32, looping: bool) -> f32 {
    if duration <= 0.0 {
        return 0.0;
    }
    if looping {
        let m = fmod(t, duration);
        // m + duration may round up to duration for tiny negative m
        if m >= duration {
            0.0
        } else {
            m
        }
    } else {
        t.clamp(0.0, duration)
    }
}

impl BakedPlayer {
    /// Current animation state.
    /// A pack built by hand without animations reports `Cut("")`.
    pub fn state(&self) -> AnimationState<'_> {
        match self.blend {
            None => AnimationState::Cut(self.animation_name(self.active)),
            Some(b) => AnimationState::Blending {
                from: self.animation_name(self.active),
                to: self.animation_name(b.target),
                progress: b.progress,
            },
        }
    }

    pub fn active_animation(&self) -> &str {
        self.animation_name(self.active)
    }

    /// Duration of the active animation in seconds.
    pub fn duration(&self) -> f32 {
        self.pack
            .animations
            .get(self.active)
            .map_or(0.0, BakedAnimation::duration)
    }

    fn animation_name(&self, idx: usize) -> &str {
        self.pack.animations.get(idx).map_or("", |a| a.name.as_str())
    }

    fn lookup_animation(&self, op: &str, name: &str) -> Option<usize> {
        let idx = self.pack.animation_index(name);
        if idx.is_none() {
            warn!("{op}: pack '{}' has no animation '{name}'", self.pack.name);
        }
        idx
    }
}

impl PackPlayer for BakedPlayer {
    type Asset = BakedPack;

    fn new(asset: Arc<BakedPack>) -> Self {
        let mut player = Self {
            active: 0,
            blend: None,
            run_time: 0.0,
            looping: true,
            points: vec![0.0; asset.uvs.len()],
            colors: asset.colors.clone(),
            uvs: asset.uvs.clone(),
            pack: asset,
        };
        player.sync_render_data();
        player
    }

    fn asset(&self) -> &BakedPack {
        &self.pack
    }

    fn set_active_animation(&mut self, name: &str) {
        if let Some(idx) = self.lookup_animation("set_active_animation", name) {
            self.active = idx;
            self.blend = None;
            self.run_time = 0.0;
        }
    }

    fn blend_to_animation(&mut self, name: &str, blend_delta: f32) {
        if let Some(target) = self.lookup_animation("blend_to_animation", name) {
            self.blend = Some(Blend {
                target,
                progress: 0.0,
                delta: blend_delta,
            });
        }
    }

    fn step_time(&mut self, delta: f32) {
        if let Some(blend) = self.blend.as_mut() {
            blend.progress += blend.delta;
            if blend.progress >= 1.0 {
                self.active = blend.target;
                self.blend = None;
            }
        }
        let duration = self.duration();
        self.run_time = wrap_time(self.run_time + delta, duration, self.looping);
    }

    // Decoded packs always line up; hand-built ones may not, so copies stop
    // at the shorter buffer and a missing frame leaves the buffers as they were.
    fn sync_render_data(&mut self) {
        let pack = Arc::clone(&self.pack);
        let Some(current) = pack
            .animations
            .get(self.active)
            .and_then(|a| a.frame_at(self.run_time))
        else {
            return;
        };
        let current_colors = current.colors.as_deref().unwrap_or(pack.colors.as_slice());

        let target = self.blend.and_then(|blend| {
            let anim = pack.animations.get(blend.target)?;
            let time = wrap_time(self.run_time, anim.duration(), self.looping);
            Some((anim.frame_at(time)?, blend.progress.clamp(0.0, 1.0)))
        });

        match target {
            None => {
                for (out, &v) in self.points.iter_mut().zip(&current.points) {
                    *out = v;
                }
                for (out, &c) in self.colors.iter_mut().zip(current_colors) {
                    *out = c;
                }
            }
            Some((target, w)) => {
                let target_colors = target.colors.as_deref().unwrap_or(pack.colors.as_slice());
                let points = current.points.iter().zip(&target.points);
                for (out, (&a, &b)) in self.points.iter_mut().zip(points) {
                    *out = a + (b - a) * w;
                }
                let colors = current_colors.iter().zip(target_colors);
                for (out, (&a, &b)) in self.colors.iter_mut().zip(colors) {
                    *out = (a as f32 + (b as f32 - a as f32) * w).round() as u8;
                }
            }
        }
    }

    fn run_time(&self) -> f32 {
        self.run_time
    }

    fn is_looping(&self) -> bool {
        self.looping
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn render_points(&self) -> &[f32] {
        &self.points
    }

    fn render_colors(&self) -> &[u8] {
        &self.colors
    }

    fn render_uvs(&self) -> &[f32] {
        &self.uvs
    }
}
