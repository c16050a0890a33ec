use std::collections::{HashMap, HashSet};

use redlilium_core::material::{
    MaterialPropertyCollection, MaterialPropertyDynamicMetadata, MaterialPropertyFlags,
    MaterialPropertyGroupDynamicMetadata, MaterialPropertyGroupVisibility, MaterialPropertyRef,
    MaterialPropertyValue, MaterialPropertyVisibility,
};

use super::access::{MaterialPropertyAccess, PropertyReader};

/// What an editor functor sees of a material while it runs.
///
/// Metadata is keyed by property name (or group id). Every setter records the
/// ids it actually changed, so the editor only refreshes those rows.
pub struct EditorContext<'a> {
    reader: PropertyReader<'a>,
    property_metadata: &'a mut HashMap<String, MaterialPropertyDynamicMetadata>,
    property_group_metadata: &'a mut HashMap<String, MaterialPropertyGroupDynamicMetadata>,
    updated_properties: &'a mut HashSet<String>,
    updated_property_groups: &'a mut HashSet<String>,
}

impl<'a> EditorContext<'a> {
    pub fn new(
        properties: &'a MaterialPropertyCollection,
        property_metadata: &'a mut HashMap<String, MaterialPropertyDynamicMetadata>,
        property_group_metadata: &'a mut HashMap<String, MaterialPropertyGroupDynamicMetadata>,
        updated_properties: &'a mut HashSet<String>,
        updated_property_groups: &'a mut HashSet<String>,
        dependencies: &'a MaterialPropertyFlags,
    ) -> Self {
        Self {
            reader: PropertyReader::new(properties, dependencies),
            property_metadata,
            property_group_metadata,
            updated_properties,
            updated_property_groups,
        }
    }

    pub fn property_metadata<'k>(
        &self,
        property: impl Into<MaterialPropertyRef<'k>>,
    ) -> Option<&MaterialPropertyDynamicMetadata> {
        let id = resolve_property_id(self.reader, property.into())?;
        let metadata = self.property_metadata.get(id);
        if metadata.is_none() {
            log::error!("Couldn't find metadata for material property: {id}.");
        }
        metadata
    }

    pub fn property_group_metadata(
        &self,
        group_id: &str,
    ) -> Option<&MaterialPropertyGroupDynamicMetadata> {
        let metadata = self.property_group_metadata.get(group_id);
        if metadata.is_none() {
            log::error!("Couldn't find metadata for material property group: {group_id}.");
        }
        metadata
    }

    pub fn set_material_property_visibility<'k>(
        &mut self,
        property: impl Into<MaterialPropertyRef<'k>>,
        visibility: MaterialPropertyVisibility,
    ) -> bool {
        self.update_property_metadata(property.into(), visibility, |m| &mut m.visibility)
    }

    pub fn set_material_property_description<'k>(
        &mut self,
        property: impl Into<MaterialPropertyRef<'k>>,
        description: impl Into<String>,
    ) -> bool {
        self.update_property_metadata(property.into(), description.into(), |m| &mut m.description)
    }

    pub fn set_material_property_min_value<'k>(
        &mut self,
        property: impl Into<MaterialPropertyRef<'k>>,
        min: impl Into<MaterialPropertyValue>,
    ) -> bool {
        self.update_property_metadata(property.into(), min.into(), |m| &mut m.property_range.min)
    }

    pub fn set_material_property_max_value<'k>(
        &mut self,
        property: impl Into<MaterialPropertyRef<'k>>,
        max: impl Into<MaterialPropertyValue>,
    ) -> bool {
        self.update_property_metadata(property.into(), max.into(), |m| &mut m.property_range.max)
    }

    pub fn set_material_property_soft_min_value<'k>(
        &mut self,
        property: impl Into<MaterialPropertyRef<'k>>,
        soft_min: impl Into<MaterialPropertyValue>,
    ) -> bool {
        self.update_property_metadata(property.into(), soft_min.into(), |m| {
            &mut m.property_range.soft_min
        })
    }

    pub fn set_material_property_soft_max_value<'k>(
        &mut self,
        property: impl Into<MaterialPropertyRef<'k>>,
        soft_max: impl Into<MaterialPropertyValue>,
    ) -> bool {
        self.update_property_metadata(property.into(), soft_max.into(), |m| {
            &mut m.property_range.soft_max
        })
    }

    pub fn set_material_property_group_visibility(
        &mut self,
        group_id: &str,
        visibility: MaterialPropertyGroupVisibility,
    ) -> bool {
        let Some(metadata) = self.property_group_metadata.get_mut(group_id) else {
            log::error!("Couldn't find metadata for material property group: {group_id}.");
            return false;
        };
        if metadata.visibility != visibility {
            metadata.visibility = visibility;
            self.updated_property_groups.insert(group_id.to_owned());
        }
        true
    }

    /// Property ids changed so far by this context.
    pub fn updated_properties(&self) -> &HashSet<String> {
        self.updated_properties
    }

    /// Group ids changed so far by this context.
    pub fn updated_property_groups(&self) -> &HashSet<String> {
        self.updated_property_groups
    }

    fn update_property_metadata<T: PartialEq>(
        &mut self,
        property: MaterialPropertyRef<'_>,
        value: T,
        field: fn(&mut MaterialPropertyDynamicMetadata) -> &mut T,
    ) -> bool {
        let Some(id) = resolve_property_id(self.reader, property) else {
            return false;
        };
        let Some(metadata) = self.property_metadata.get_mut(id) else {
            log::error!("Couldn't find metadata for material property: {id}.");
            return false;
        };
        let slot = field(metadata);
        if *slot != value {
            *slot = value;
            self.updated_properties.insert(id.to_owned());
        }
        true
    }
}

/// Metadata id (property name) of `property`.
fn resolve_property_id<'r>(
    reader: PropertyReader<'r>,
    property: MaterialPropertyRef<'r>,
) -> Option<&'r str> {
    match property {
        MaterialPropertyRef::Name(name) => Some(name),
        MaterialPropertyRef::Index(index) => {
            let name = reader.property_name(index);
            if name.is_none() {
                log::error!("Couldn't find material property {index}.");
            }
            name
        }
    }
}

impl MaterialPropertyAccess for EditorContext<'_> {
    fn property_reader(&self) -> PropertyReader<'_> {
        self.reader
    }
}

static_assertions::assert_impl_all!(EditorContext<'static>: Send);
