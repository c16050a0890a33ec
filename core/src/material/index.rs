use std::fmt;

/// Dense handle to a property in a [`MaterialPropertiesLayout`].
///
/// The handle may be invalid (for example the result of looking up an unknown
/// name), so callers check [`is_valid`](Self::is_valid) before relying on it.
///
/// [`MaterialPropertiesLayout`]: super::MaterialPropertiesLayout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialPropertyIndex(u32);

impl MaterialPropertyIndex {
    /// The invalid handle.
    pub const INVALID: Self = Self(u32::MAX);

    /// Create a handle for the property at `index`.
    pub const fn new(index: usize) -> Self {
        if index >= u32::MAX as usize {
            Self::INVALID
        } else {
            Self(index as u32)
        }
    }

    /// Whether this handle refers to a property slot at all.
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// The raw slot index. Meaningless for an invalid handle.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for MaterialPropertyIndex {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for MaterialPropertyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            write!(f, "#invalid")
        }
    }
}

/// A material property addressed either by layout index or by name.
///
/// Every accessor taking a property accepts `impl Into<MaterialPropertyRef>`,
/// so both `ctx.property_value(index)` and `ctx.property_value("roughness")`
/// work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialPropertyRef<'a> {
    /// Address by layout index.
    Index(MaterialPropertyIndex),
    /// Address by property name (the property id).
    Name(&'a str),
}

impl From<MaterialPropertyIndex> for MaterialPropertyRef<'_> {
    fn from(index: MaterialPropertyIndex) -> Self {
        Self::Index(index)
    }
}

impl<'a> From<&'a str> for MaterialPropertyRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for MaterialPropertyRef<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_by_default() {
        assert!(!MaterialPropertyIndex::default().is_valid());
        assert!(MaterialPropertyIndex::new(0).is_valid());
        assert_eq!(MaterialPropertyIndex::new(7).index(), 7);
    }

    #[test]
    fn display() {
        assert_eq!(MaterialPropertyIndex::new(3).to_string(), "#3");
        assert_eq!(MaterialPropertyIndex::INVALID.to_string(), "#invalid");
    }

    #[test]
    fn property_ref_conversions() {
        let by_index: MaterialPropertyRef<'_> = MaterialPropertyIndex::new(1).into();
        assert_eq!(by_index, MaterialPropertyRef::Index(MaterialPropertyIndex::new(1)));

        let by_name: MaterialPropertyRef<'_> = "roughness".into();
        assert_eq!(by_name, MaterialPropertyRef::Name("roughness"));
    }
}
