//! Borrowed render views and bounds derived from them.
//!
//! Nothing here copies: every view borrows the player that owns the buffer,
//! so the borrow checker rejects a `step` or `remove` while a view is alive.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounds of a player's current points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerBounds {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl PlayerBounds {
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

/// Bounds of interleaved `x, y` points, seeded from the first point.
/// Returns `None` when there is no complete point; a trailing odd value is ignored.
pub fn compute_bounds(points: &[f32]) -> Option<PlayerBounds> {
    let mut pairs = points.chunks_exact(2);
    let first = pairs.next()?;
    let seed = PlayerBounds {
        x1: first[0],
        y1: first[1],
        x2: first[0],
        y2: first[1],
    };
    Some(pairs.fold(seed, |b, p| PlayerBounds {
        x1: b.x1.min(p[0]),
        y1: b.y1.min(p[1]),
        x2: b.x2.max(p[0]),
        y2: b.y2.max(p[1]),
    }))
}

/// All render buffers of one player for the current frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderFrame<'a> {
    pub points: &'a [f32],
    pub colors: &'a [u8],
    pub uvs: &'a [f32],
    pub indices: &'a [u32],
}

impl RenderFrame<'_> {
    pub fn point_count(&self) -> usize {
        self.points.len() / 2
    }

    pub fn bounds(&self) -> Option<PlayerBounds> {
        compute_bounds(self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_three_points() {
        let pts = [0.0, 0.0, 5.0, 2.0, -1.0, 7.0];
        let b = compute_bounds(&pts).unwrap();
        assert_eq!(
            b,
            PlayerBounds {
                x1: -1.0,
                y1: 0.0,
                x2: 5.0,
                y2: 7.0
            }
        );
        assert_eq!(b.width(), 6.0);
        assert_eq!(b.height(), 7.0);
    }

    #[test]
    fn single_point_is_degenerate_box() {
        let b = compute_bounds(&[2.5, -3.0]).unwrap();
        assert_eq!((b.x1, b.y1, b.x2, b.y2), (2.5, -3.0, 2.5, -3.0));
    }

    #[test]
    fn empty_or_incomplete_has_no_bounds() {
        assert_eq!(compute_bounds(&[]), None);
        assert_eq!(compute_bounds(&[1.0]), None);
    }

    #[test]
    fn trailing_odd_value_is_ignored() {
        let b = compute_bounds(&[1.0, 1.0, 2.0, 2.0, 100.0]).unwrap();
        assert_eq!(b.x2, 2.0);
    }
}
