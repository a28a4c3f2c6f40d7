//! Collaborator contracts consumed by the registry.
//!
//! The registry never looks inside a pack: decoding bytes and evaluating
//! animations belong to the implementors of these traits.

use std::fmt;
use std::sync::Arc;

/// Decoded, immutable pack data shared read-only by every player bound to it.
pub trait PackAsset: Sized {
    type Error: fmt::Display;

    /// Build an asset from a raw pack buffer.
    fn decode(bytes: &[u8]) -> Result<Self, Self::Error>;

    /// Number of mesh points (each point is an `x, y` pair in the render buffers).
    fn point_count(&self) -> usize;

    /// Triangle index buffer; every player bound to this asset exports it as-is.
    fn indices(&self) -> &[u32];

    fn index_count(&self) -> usize {
        self.indices().len()
    }
}

/// Mutable playback state bound to one asset for its whole lifetime.
///
/// Render buffers are only guaranteed to describe the current run time after
/// [`PackPlayer::sync_render_data`] has run; the registry always pairs it with
/// [`PackPlayer::step_time`].
pub trait PackPlayer {
    type Asset: PackAsset;

    fn new(asset: Arc<Self::Asset>) -> Self;

    fn asset(&self) -> &Self::Asset;

    /// Cut to `name`, discarding any blend in progress.
    fn set_active_animation(&mut self, name: &str);

    /// Start blending from the current animation into `name`.
    /// `blend_delta` is the per-step progress increment, expected in `(0, 1]`.
    fn blend_to_animation(&mut self, name: &str, blend_delta: f32);

    /// Advance run time (and any blend) by `delta` seconds.
    fn step_time(&mut self, delta: f32);

    /// Recompute the render buffers for the current run time.
    fn sync_render_data(&mut self);

    fn run_time(&self) -> f32;

    fn is_looping(&self) -> bool;

    fn set_looping(&mut self, looping: bool);

    /// Interleaved `x, y` pairs, `2 * point_count` long.
    fn render_points(&self) -> &[f32];

    /// Interleaved `r, g, b, a` bytes, `4 * point_count` long.
    fn render_colors(&self) -> &[u8];

    /// Interleaved `u, v` pairs, `2 * point_count` long.
    fn render_uvs(&self) -> &[f32];
}
