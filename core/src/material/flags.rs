use std::ops::BitAnd;

use fixedbitset::FixedBitSet;

use super::error::{MaterialPropertyError, MaterialPropertyResult};
use super::index::MaterialPropertyIndex;
use super::layout::MaterialPropertiesLayout;

/// One bit per property of a material layout.
///
/// Used for two things with the same shape:
/// - a functor's declared dependencies (fixed once the functor is built)
/// - the dirty flags the driver accumulates between evaluation passes
///
/// The bitset is sized to the layout's property count rather than a fixed
/// maximum, since property counts vary per material definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialPropertyFlags {
    bits: FixedBitSet,
}

impl MaterialPropertyFlags {
    /// Empty flags for a layout of `property_count` properties.
    pub fn new(property_count: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(property_count),
        }
    }

    /// Flags with every property set.
    pub fn all(property_count: usize) -> Self {
        let mut bits = FixedBitSet::with_capacity(property_count);
        bits.insert_range(..);
        Self { bits }
    }

    /// Flags with the given properties set.
    pub fn from_indices(
        property_count: usize,
        indices: impl IntoIterator<Item = MaterialPropertyIndex>,
    ) -> Self {
        let mut flags = Self::new(property_count);
        for index in indices {
            flags.set(index);
        }
        flags
    }

    /// Flags for the named properties of `layout`.
    ///
    /// This is how a functor turns its author-declared dependency list into a
    /// dependency set. Naming a property the layout does not have is an error.
    pub fn from_names<I, S>(
        layout: &MaterialPropertiesLayout,
        names: I,
    ) -> MaterialPropertyResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::new(layout.property_count());
        for name in names {
            let name = name.as_ref();
            let index = layout.find_property_index(name);
            if !index.is_valid() {
                return Err(MaterialPropertyError::UnknownProperty(name.to_owned()));
            }
            flags.set(index);
        }
        Ok(flags)
    }

    /// Number of property slots covered.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the flags cover no property slots at all.
    pub fn is_empty(&self) -> bool {
        self.bits.len() == 0
    }

    /// Set the bit for `index`. Invalid handles are ignored.
    pub fn set(&mut self, index: MaterialPropertyIndex) {
        if !index.is_valid() {
            return;
        }
        let slot = index.index();
        if slot >= self.bits.len() {
            self.bits.grow(slot + 1);
        }
        self.bits.insert(slot);
    }

    /// Clear the bit for `index`.
    pub fn unset(&mut self, index: MaterialPropertyIndex) {
        if index.is_valid() && index.index() < self.bits.len() {
            self.bits.set(index.index(), false);
        }
    }

    /// Test the bit for `index`. Invalid or out-of-range handles test false.
    #[inline]
    pub fn test(&self, index: MaterialPropertyIndex) -> bool {
        index.is_valid() && self.bits.contains(index.index())
    }

    /// Whether any bit is set.
    pub fn any(&self) -> bool {
        !self.bits.is_clear()
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Whether `self` and `other` share at least one set bit.
    ///
    /// Compares whole blocks, so the cost is proportional to the word count
    /// of the bitset, not to the number of properties.
    #[inline]
    pub fn intersects(&self, other: &MaterialPropertyFlags) -> bool {
        !self.bits.is_disjoint(&other.bits)
    }

    /// Set every bit that is set in `other`.
    pub fn union_with(&mut self, other: &MaterialPropertyFlags) {
        self.bits.union_with(&other.bits);
    }

    /// Clear all bits, keeping the size.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Iterate the set properties.
    pub fn ones(&self) -> impl Iterator<Item = MaterialPropertyIndex> + '_ {
        self.bits.ones().map(MaterialPropertyIndex::new)
    }
}

impl BitAnd for &MaterialPropertyFlags {
    type Output = MaterialPropertyFlags;

    fn bitand(self, rhs: Self) -> Self::Output {
        MaterialPropertyFlags {
            bits: &self.bits & &rhs.bits,
        }
    }
}
