//! Player handles and the monotonic allocator that issues them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity of a live playback instance.
///
/// Handles are issued strictly increasing starting at 1 and are never reused,
/// so a handle that has been removed stays invalid forever.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct PlayerHandle(pub u32);

impl PlayerHandle {
    /// Convert a host-side integer (where `-1` means "no player") into a handle.
    pub fn from_raw(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().map(PlayerHandle)
    }

    /// Host-side integer form. The default allocator never issues handles
    /// above `i32::MAX`.
    pub fn to_raw(self) -> i32 {
        i32::try_from(self.0).unwrap_or(-1)
    }
}

impl fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic allocator for [`PlayerHandle`].
/// The counter starts at 0 and is pre-incremented, so the first handle is 1.
#[derive(Debug)]
pub struct HandleAllocator {
    last: u32,
    limit: u32,
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::with_limit(i32::MAX as u32)
    }

    /// Allocator that refuses to issue handles above `limit`.
    pub fn with_limit(limit: u32) -> Self {
        Self { last: 0, limit }
    }

    /// Issue the next handle, or `None` once the limit has been reached.
    #[inline]
    pub fn alloc(&mut self) -> Option<PlayerHandle> {
        if self.last >= self.limit {
            return None;
        }
        self.last += 1;
        Some(PlayerHandle(self.last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic_from_one() {
        let mut alloc = HandleAllocator::new();
        assert_eq!(alloc.alloc(), Some(PlayerHandle(1)));
        assert_eq!(alloc.alloc(), Some(PlayerHandle(2)));
    }

    #[test]
    fn alloc_stops_at_limit() {
        let mut alloc = HandleAllocator::with_limit(2);
        assert!(alloc.alloc().is_some());
        assert!(alloc.alloc().is_some());
        assert_eq!(alloc.alloc(), None);
        assert_eq!(alloc.alloc(), None);
    }

    #[test]
    fn raw_conversion_rejects_negative() {
        assert_eq!(PlayerHandle::from_raw(-1), None);
        assert_eq!(PlayerHandle::from_raw(7), Some(PlayerHandle(7)));
        assert_eq!(PlayerHandle(7).to_raw(), 7);
    }
}
