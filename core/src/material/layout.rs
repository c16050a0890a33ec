use std::collections::HashMap;

use super::error::{MaterialPropertyError, MaterialPropertyResult};
use super::index::MaterialPropertyIndex;
use super::value::MaterialPropertyDataType;

/// Describes one property of a material.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialPropertyDescriptor {
    /// Property id (e.g., "roughness", "base_color.texture_map").
    pub name: String,
    /// Expected value type.
    pub data_type: MaterialPropertyDataType,
    /// Id of the property group this property is presented in, if any.
    pub group: Option<String>,
}

impl MaterialPropertyDescriptor {
    /// Create an ungrouped descriptor.
    pub fn new(name: impl Into<String>, data_type: MaterialPropertyDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            group: None,
        }
    }

    /// Place the property in a property group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// The ordered set of properties a material exposes.
///
/// Each property's position is its [`MaterialPropertyIndex`]; names resolve to
/// indices through a lookup table.
///
/// # Example
///
/// ```
/// use redlilium_core::material::{MaterialPropertiesLayout, MaterialPropertyDataType};
///
/// let layout = MaterialPropertiesLayout::new()
///     .with_property("use_texture", MaterialPropertyDataType::Bool)
///     .with_property("roughness", MaterialPropertyDataType::Float);
///
/// assert_eq!(layout.find_property_index("roughness").index(), 1);
/// assert!(!layout.find_property_index("metallic").is_valid());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MaterialPropertiesLayout {
    descriptors: Vec<MaterialPropertyDescriptor>,
    lookup: HashMap<String, MaterialPropertyIndex>,
}

impl MaterialPropertiesLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ungrouped property.
    ///
    /// A duplicate name is logged and ignored; use [`add_property`](Self::add_property)
    /// to handle it as an error.
    #[must_use]
    pub fn with_property(
        self,
        name: impl Into<String>,
        data_type: MaterialPropertyDataType,
    ) -> Self {
        self.with_descriptor(MaterialPropertyDescriptor::new(name, data_type))
    }

    /// Add a property from a full descriptor. Duplicates are logged and ignored.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: MaterialPropertyDescriptor) -> Self {
        if let Err(e) = self.add_property(descriptor) {
            log::error!("{e}");
        }
        self
    }

    /// Append a property, returning its index.
    pub fn add_property(
        &mut self,
        descriptor: MaterialPropertyDescriptor,
    ) -> MaterialPropertyResult<MaterialPropertyIndex> {
        if self.lookup.contains_key(&descriptor.name) {
            return Err(MaterialPropertyError::DuplicateProperty(descriptor.name));
        }
        let index = MaterialPropertyIndex::new(self.descriptors.len());
        self.lookup.insert(descriptor.name.clone(), index);
        self.descriptors.push(descriptor);
        Ok(index)
    }

    /// Look up a property by name. Returns [`MaterialPropertyIndex::INVALID`]
    /// if the layout has no such property.
    pub fn find_property_index(&self, name: &str) -> MaterialPropertyIndex {
        self.lookup
            .get(name)
            .copied()
            .unwrap_or(MaterialPropertyIndex::INVALID)
    }

    /// Descriptor of the property at `index`, if the index is valid and in range.
    pub fn property_descriptor(
        &self,
        index: MaterialPropertyIndex,
    ) -> Option<&MaterialPropertyDescriptor> {
        if !index.is_valid() {
            return None;
        }
        self.descriptors.get(index.index())
    }

    /// Name of the property at `index`.
    pub fn property_name(&self, index: MaterialPropertyIndex) -> Option<&str> {
        self.property_descriptor(index).map(|d| d.name.as_str())
    }

    /// Number of properties.
    pub fn property_count(&self) -> usize {
        self.descriptors.len()
    }

    /// All descriptors in index order.
    pub fn descriptors(&self) -> &[MaterialPropertyDescriptor] {
        &self.descriptors
    }
}
