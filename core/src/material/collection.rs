use std::sync::Arc;

use super::error::{MaterialPropertyError, MaterialPropertyResult};
use super::flags::MaterialPropertyFlags;
use super::index::{MaterialPropertyIndex, MaterialPropertyRef};
use super::layout::MaterialPropertiesLayout;
use super::value::MaterialPropertyValue;

/// Returned for reads of indices the collection does not hold.
static INVALID_VALUE: MaterialPropertyValue = MaterialPropertyValue::Invalid;

/// Current property values of one material, plus the flags of properties
/// changed since the dirty flags were last cleared.
#[derive(Debug, Clone)]
pub struct MaterialPropertyCollection {
    layout: Arc<MaterialPropertiesLayout>,
    values: Vec<MaterialPropertyValue>,
    dirty: MaterialPropertyFlags,
}

impl MaterialPropertyCollection {
    /// Create a collection with every property at its type's default value.
    pub fn new(layout: Arc<MaterialPropertiesLayout>) -> Self {
        let values = layout
            .descriptors()
            .iter()
            .map(|d| MaterialPropertyValue::default_for(d.data_type))
            .collect();
        let dirty = MaterialPropertyFlags::new(layout.property_count());
        Self {
            layout,
            values,
            dirty,
        }
    }

    /// The layout describing these properties.
    pub fn layout(&self) -> &Arc<MaterialPropertiesLayout> {
        &self.layout
    }

    /// Value of the property at `index`.
    ///
    /// Invalid or out-of-range indices read as [`MaterialPropertyValue::Invalid`].
    pub fn property_value(&self, index: MaterialPropertyIndex) -> &MaterialPropertyValue {
        if !index.is_valid() {
            return &INVALID_VALUE;
        }
        self.values.get(index.index()).unwrap_or(&INVALID_VALUE)
    }

    /// Resolve a property reference to a valid index of this collection.
    pub fn resolve_index<'k>(
        &self,
        property: impl Into<MaterialPropertyRef<'k>>,
    ) -> MaterialPropertyResult<MaterialPropertyIndex> {
        match property.into() {
            MaterialPropertyRef::Index(index) => {
                if index.is_valid() && index.index() < self.values.len() {
                    Ok(index)
                } else {
                    Err(MaterialPropertyError::InvalidIndex(index))
                }
            }
            MaterialPropertyRef::Name(name) => {
                let index = self.layout.find_property_index(name);
                if index.is_valid() {
                    Ok(index)
                } else {
                    Err(MaterialPropertyError::UnknownProperty(name.to_owned()))
                }
            }
        }
    }

    /// Write a property value.
    ///
    /// The value must match the property's declared type. Returns whether the
    /// stored value changed; a change marks the property dirty.
    pub fn set_property_value<'k>(
        &mut self,
        property: impl Into<MaterialPropertyRef<'k>>,
        value: impl Into<MaterialPropertyValue>,
    ) -> MaterialPropertyResult<bool> {
        let index = self.resolve_index(property)?;
        let value = value.into();
        let descriptor = &self.layout.descriptors()[index.index()];
        if value.data_type() != descriptor.data_type {
            return Err(MaterialPropertyError::TypeMismatch {
                name: descriptor.name.clone(),
                expected: descriptor.data_type,
                actual: value.data_type(),
            });
        }

        let slot = &mut self.values[index.index()];
        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        self.dirty.set(index);
        Ok(true)
    }

    /// Properties changed since the flags were last cleared.
    pub fn property_dirty_flags(&self) -> &MaterialPropertyFlags {
        &self.dirty
    }

    /// Forget all recorded changes.
    pub fn clear_property_dirty_flags(&mut self) {
        self.dirty.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialPropertyDataType;

    fn test_collection() -> MaterialPropertyCollection {
        let layout = MaterialPropertiesLayout::new()
            .with_property("use_texture", MaterialPropertyDataType::Bool)
            .with_property("roughness", MaterialPropertyDataType::Float);
        MaterialPropertyCollection::new(Arc::new(layout))
    }

    #[test]
    fn defaults() {
        let props = test_collection();
        assert_eq!(
            props.property_value(MaterialPropertyIndex::new(0)),
            &MaterialPropertyValue::Bool(false)
        );
        assert_eq!(
            props.property_value(MaterialPropertyIndex::new(1)),
            &MaterialPropertyValue::Float(0.0)
        );
        assert!(!props.property_dirty_flags().any());
    }

    #[test]
    fn invalid_reads() {
        let props = test_collection();
        assert!(!props.property_value(MaterialPropertyIndex::INVALID).is_valid());
        assert!(!props.property_value(MaterialPropertyIndex::new(9)).is_valid());
    }

    #[test]
    fn set_marks_dirty() {
        let mut props = test_collection();
        assert_eq!(props.set_property_value("roughness", 0.5f32), Ok(true));
        assert!(props.property_dirty_flags().test(MaterialPropertyIndex::new(1)));
        assert!(!props.property_dirty_flags().test(MaterialPropertyIndex::new(0)));

        props.clear_property_dirty_flags();
        assert_eq!(props.set_property_value("roughness", 0.5f32), Ok(false));
        assert!(!props.property_dirty_flags().any());
    }

    #[test]
    fn set_errors() {
        let mut props = test_collection();
        assert_eq!(
            props.set_property_value("roughness", true),
            Err(MaterialPropertyError::TypeMismatch {
                name: "roughness".into(),
                expected: MaterialPropertyDataType::Float,
                actual: MaterialPropertyDataType::Bool,
            })
        );
        assert_eq!(
            props.set_property_value("metallic", 1.0f32),
            Err(MaterialPropertyError::UnknownProperty("metallic".into()))
        );
        assert_eq!(
            props.set_property_value(MaterialPropertyIndex::new(4), true),
            Err(MaterialPropertyError::InvalidIndex(MaterialPropertyIndex::new(4)))
        );
    }
}
