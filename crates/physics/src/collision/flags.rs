//! Content flags for collision filtering.
//!
//! Every brush in the world carries a content set; queries carry a mask and
//! only see brushes whose contents intersect it.

use serde::{Deserialize, Serialize};

/// What kind of volume a brush is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContentFlags(pub u32);

impl ContentFlags {
    /// Empty space.
    pub const EMPTY: Self = Self(0);

    /// Solid world geometry: walls, floors, ramps.
    pub const SOLID: Self = Self(1 << 0);

    /// Invisible wall that blocks characters only.
    pub const PLAYER_CLIP: Self = Self(1 << 1);

    /// Walkable surface that is not otherwise solid for traces, e.g. a
    /// ground layer used by overlap-based ground checks.
    pub const GROUND: Self = Self(1 << 2);

    /// Trigger volume. Never blocks movement.
    pub const TRIGGER: Self = Self(1 << 3);

    /// Water volume. Never blocks movement.
    pub const WATER: Self = Self(1 << 4);

    /// Standard mask for character movement traces.
    pub const MASK_CHARACTER_SOLID: Self = Self(Self::SOLID.0 | Self::PLAYER_CLIP.0);

    /// Standard mask for ground checks.
    pub const MASK_WALKABLE: Self = Self(Self::SOLID.0 | Self::GROUND.0);

    /// Every content type.
    pub const ALL: Self = Self(u32::MAX);

    /// Check if these flags contain every flag in `other`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any flag in `other` is set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for ContentFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for ContentFlags {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_mask() {
        let mask = ContentFlags::MASK_CHARACTER_SOLID;
        assert!(mask.contains(ContentFlags::SOLID));
        assert!(mask.contains(ContentFlags::PLAYER_CLIP));
        assert!(!mask.intersects(ContentFlags::TRIGGER | ContentFlags::WATER));
    }

    #[test]
    fn test_walkable_mask_sees_ground_layer() {
        assert!(ContentFlags::MASK_WALKABLE.intersects(ContentFlags::GROUND));
        assert!(!ContentFlags::MASK_CHARACTER_SOLID.intersects(ContentFlags::GROUND));
        assert_eq!(
            (ContentFlags::SOLID | ContentFlags::GROUND) & ContentFlags::GROUND,
            ContentFlags::GROUND
        );
    }
}
