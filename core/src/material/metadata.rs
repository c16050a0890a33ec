//! Editor presentation records that editor functors adjust at edit time.

use super::value::MaterialPropertyValue;

/// How the editor presents a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum MaterialPropertyVisibility {
    /// Visible and editable.
    #[default]
    Enabled,
    /// Visible but read-only.
    Disabled,
    /// Not shown.
    Hidden,
}

/// How the editor presents a property group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum MaterialPropertyGroupVisibility {
    #[default]
    Enabled,
    Hidden,
}

/// Value range presented for a numeric property.
///
/// The hard bounds clamp what may be entered; the soft bounds only shape the
/// slider. An [`Invalid`](MaterialPropertyValue::Invalid) bound means unset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaterialPropertyRange {
    pub min: MaterialPropertyValue,
    pub max: MaterialPropertyValue,
    pub soft_min: MaterialPropertyValue,
    pub soft_max: MaterialPropertyValue,
}

/// Dynamic presentation metadata of one property.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaterialPropertyDynamicMetadata {
    pub visibility: MaterialPropertyVisibility,
    pub description: String,
    pub property_range: MaterialPropertyRange,
}

impl MaterialPropertyDynamicMetadata {
    /// Enabled, no description, no range.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: MaterialPropertyVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the hard range.
    #[must_use]
    pub fn with_range(
        mut self,
        min: impl Into<MaterialPropertyValue>,
        max: impl Into<MaterialPropertyValue>,
    ) -> Self {
        self.property_range.min = min.into();
        self.property_range.max = max.into();
        self
    }

    /// Set the soft (slider) range.
    #[must_use]
    pub fn with_soft_range(
        mut self,
        soft_min: impl Into<MaterialPropertyValue>,
        soft_max: impl Into<MaterialPropertyValue>,
    ) -> Self {
        self.property_range.soft_min = soft_min.into();
        self.property_range.soft_max = soft_max.into();
        self
    }
}

/// Dynamic presentation metadata of one property group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaterialPropertyGroupDynamicMetadata {
    pub visibility: MaterialPropertyGroupVisibility,
}

impl MaterialPropertyGroupDynamicMetadata {
    pub fn new(visibility: MaterialPropertyGroupVisibility) -> Self {
        Self { visibility }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_builder() {
        let metadata = MaterialPropertyDynamicMetadata::new()
            .with_visibility(MaterialPropertyVisibility::Disabled)
            .with_description("Surface roughness")
            .with_range(0.0f32, 1.0f32)
            .with_soft_range(0.1f32, 0.9f32);

        assert_eq!(metadata.visibility, MaterialPropertyVisibility::Disabled);
        assert_eq!(metadata.description, "Surface roughness");
        assert_eq!(metadata.property_range.min, MaterialPropertyValue::Float(0.0));
        assert_eq!(metadata.property_range.soft_max, MaterialPropertyValue::Float(0.9));
    }

    #[test]
    fn unset_range_is_invalid() {
        let metadata = MaterialPropertyDynamicMetadata::default();
        assert!(!metadata.property_range.min.is_valid());
        assert!(!metadata.property_range.soft_max.is_valid());
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn visibility_serializes_by_name() {
        let text = ron::to_string(&MaterialPropertyVisibility::Hidden).unwrap();
        assert_eq!(text, "Hidden");
    }
}
