use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use redlilium_core::material::{
    MaterialPropertyCollection, MaterialPropertyDynamicMetadata, MaterialPropertyFlags,
    MaterialPropertyGroupDynamicMetadata, MaterialPropertyRef, MaterialPropertyResult,
    MaterialPropertyValue,
};

use super::{EditorContext, MaterialFunctor, MaterialPropertyPsoHandling, RuntimeContext};
use crate::shader::{MaterialPipelineShaderCollections, ShaderResourceGroup};

/// Ids whose editor metadata changed during one editor pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorFunctorOutput {
    pub updated_properties: HashSet<String>,
    pub updated_property_groups: HashSet<String>,
}

impl EditorFunctorOutput {
    pub fn is_empty(&self) -> bool {
        self.updated_properties.is_empty() && self.updated_property_groups.is_empty()
    }
}

/// Owns one material's state and runs its functors against it.
///
/// The first [`process_runtime`](Self::process_runtime) call runs every
/// functor; later calls only run functors whose dependencies were written
/// since the previous call.
pub struct MaterialFunctorDriver {
    properties: MaterialPropertyCollection,
    shader_collections: MaterialPipelineShaderCollections,
    shader_resource_group: Option<ShaderResourceGroup>,
    pso_handling: MaterialPropertyPsoHandling,
    functors: Vec<Arc<dyn MaterialFunctor>>,
    property_metadata: HashMap<String, MaterialPropertyDynamicMetadata>,
    property_group_metadata: HashMap<String, MaterialPropertyGroupDynamicMetadata>,
    built: bool,
}

impl MaterialFunctorDriver {
    pub fn new(
        properties: MaterialPropertyCollection,
        shader_collections: MaterialPipelineShaderCollections,
    ) -> Self {
        Self {
            properties,
            shader_collections,
            shader_resource_group: None,
            pso_handling: MaterialPropertyPsoHandling::default(),
            functors: Vec::new(),
            property_metadata: HashMap::new(),
            property_group_metadata: HashMap::new(),
            built: false,
        }
    }

    #[must_use]
    pub fn with_shader_resource_group(
        mut self,
        shader_resource_group: ShaderResourceGroup,
    ) -> Self {
        self.shader_resource_group = Some(shader_resource_group);
        self
    }

    #[must_use]
    pub fn with_pso_handling(mut self, pso_handling: MaterialPropertyPsoHandling) -> Self {
        self.pso_handling = pso_handling;
        self
    }

    #[must_use]
    pub fn with_functor(mut self, functor: Arc<dyn MaterialFunctor>) -> Self {
        self.functors.push(functor);
        self
    }

    #[must_use]
    pub fn with_property_metadata(
        mut self,
        property_id: impl Into<String>,
        metadata: MaterialPropertyDynamicMetadata,
    ) -> Self {
        self.property_metadata.insert(property_id.into(), metadata);
        self
    }

    #[must_use]
    pub fn with_property_group_metadata(
        mut self,
        group_id: impl Into<String>,
        metadata: MaterialPropertyGroupDynamicMetadata,
    ) -> Self {
        self.property_group_metadata.insert(group_id.into(), metadata);
        self
    }

    /// Write a property. Returns whether the value changed.
    pub fn set_property_value<'k>(
        &mut self,
        property: impl Into<MaterialPropertyRef<'k>>,
        value: impl Into<MaterialPropertyValue>,
    ) -> MaterialPropertyResult<bool> {
        self.properties.set_property_value(property, value)
    }

    /// Run runtime functors affected by property writes since the last call
    /// (all of them on the first call), then clear the dirty flags.
    ///
    /// Returns the number of functors run.
    pub fn process_runtime(&mut self) -> usize {
        let first_build = !self.built;
        let dirty = self.properties.property_dirty_flags();
        let mut processed = 0;

        for functor in &self.functors {
            if !first_build && !functor.needs_process(dirty) {
                continue;
            }
            let mut context = RuntimeContext::new(
                &self.properties,
                &mut self.shader_collections,
                self.shader_resource_group.as_mut(),
                functor.material_property_dependencies(),
                self.pso_handling,
            );
            functor.process_runtime(&mut context);
            processed += 1;
        }

        log::debug!(
            "Ran {}/{} material functors (first build: {})",
            processed,
            self.functors.len(),
            first_build
        );
        self.properties.clear_property_dirty_flags();
        self.built = true;
        processed
    }

    /// Run editor functors. With `dirty`, only functors depending on one of
    /// those properties run; with `None`, all of them do.
    pub fn process_editor(&mut self, dirty: Option<&MaterialPropertyFlags>) -> EditorFunctorOutput {
        let mut output = EditorFunctorOutput::default();
        for functor in &self.functors {
            if dirty.is_some_and(|dirty| !functor.needs_process(dirty)) {
                continue;
            }
            let mut context = EditorContext::new(
                &self.properties,
                &mut self.property_metadata,
                &mut self.property_group_metadata,
                &mut output.updated_properties,
                &mut output.updated_property_groups,
                functor.material_property_dependencies(),
            );
            functor.process_editor(&mut context);
        }
        output
    }

    pub fn properties(&self) -> &MaterialPropertyCollection {
        &self.properties
    }

    pub fn shader_collections(&self) -> &MaterialPipelineShaderCollections {
        &self.shader_collections
    }

    pub fn shader_collections_mut(&mut self) -> &mut MaterialPipelineShaderCollections {
        &mut self.shader_collections
    }

    pub fn shader_resource_group(&self) -> Option<&ShaderResourceGroup> {
        self.shader_resource_group.as_ref()
    }

    pub fn property_metadata(&self, property_id: &str) -> Option<&MaterialPropertyDynamicMetadata> {
        self.property_metadata.get(property_id)
    }

    pub fn property_group_metadata(
        &self,
        group_id: &str,
    ) -> Option<&MaterialPropertyGroupDynamicMetadata> {
        self.property_group_metadata.get(group_id)
    }

    pub fn functor_count(&self) -> usize {
        self.functors.len()
    }

    /// Whether the first runtime pass has happened.
    pub fn is_built(&self) -> bool {
        self.built
    }
}

static_assertions::assert_impl_all!(MaterialFunctorDriver: Send, Sync);
static_assertions::assert_impl_all!(EditorFunctorOutput: Send, Sync);
