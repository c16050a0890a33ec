use redlilium_core::material::{MaterialPropertyCollection, MaterialPropertyFlags};

use super::MaterialPropertyPsoHandling;
use super::access::{MaterialPropertyAccess, PropertyReader};
use crate::shader::{
    MATERIAL_PIPELINE_NAME_COMMON, MaterialPipelineShaderCollections, RenderStates,
    ShaderCollection, ShaderItem, ShaderItemRef, ShaderOptionValueSource, ShaderResourceGroup,
    merge_state_into,
};

static EMPTY_SHADER_COLLECTION: ShaderCollection = ShaderCollection::new();

/// What a runtime functor sees of a material while it runs.
///
/// Borrows the material's properties, its shader collections and its shader
/// resource group for the duration of one functor invocation.
pub struct RuntimeContext<'a> {
    reader: PropertyReader<'a>,
    shader_collections: &'a mut MaterialPipelineShaderCollections,
    shader_resource_group: Option<&'a mut ShaderResourceGroup>,
    pso_handling: MaterialPropertyPsoHandling,
    common_pipeline: Option<usize>,
}

impl<'a> RuntimeContext<'a> {
    pub fn new(
        properties: &'a MaterialPropertyCollection,
        shader_collections: &'a mut MaterialPipelineShaderCollections,
        shader_resource_group: Option<&'a mut ShaderResourceGroup>,
        dependencies: &'a MaterialPropertyFlags,
        pso_handling: MaterialPropertyPsoHandling,
    ) -> Self {
        let common_pipeline = shader_collections.find_pipeline(MATERIAL_PIPELINE_NAME_COMMON);
        Self {
            reader: PropertyReader::new(properties, dependencies),
            shader_collections,
            shader_resource_group,
            pso_handling,
            common_pipeline,
        }
    }

    pub fn pso_handling(&self) -> MaterialPropertyPsoHandling {
        self.pso_handling
    }

    pub fn shader_resource_group(&self) -> Option<&ShaderResourceGroup> {
        self.shader_resource_group.as_deref()
    }

    pub fn shader_resource_group_mut(&mut self) -> Option<&mut ShaderResourceGroup> {
        self.shader_resource_group.as_deref_mut()
    }

    /// Number of shaders in the common pipeline.
    pub fn shader_count(&self) -> usize {
        self.common_collection().len()
    }

    /// A shader of the common pipeline.
    pub fn shader<'t>(&self, item: impl Into<ShaderItemRef<'t>>) -> Option<&ShaderItem> {
        self.common_collection().item(item)
    }

    /// Set a material-owned shader option on every shader of every pipeline
    /// that has it.
    ///
    /// Nothing is changed if any shader carrying the option does not let the
    /// material own it. Returns `true` if at least one shader took the value.
    pub fn set_shader_option_value<V>(&mut self, name: &str, value: V) -> bool
    where
        V: ShaderOptionValueSource,
    {
        let mut owned = 0usize;
        let mut not_owned = 0usize;
        for (_, collection) in self.shader_collections.iter() {
            for item in collection.iter() {
                let layout = item.shader_options().layout();
                let Some(index) = layout.find_shader_option_index(name) else {
                    continue;
                };
                if item.material_owns_shader_option(index) {
                    owned += 1;
                } else {
                    not_owned += 1;
                }
            }
        }

        if not_owned > 0 {
            log::error!("Shader option '{name}' is not owned by this material.");
            debug_assert!(
                owned == 0,
                "Shader option '{name}' is owned by some shaders of this material but not others."
            );
            return false;
        }
        if owned == 0 {
            log::error!("Shader option '{name}' not found.");
            return false;
        }

        let mut did_set_one = false;
        for (_, collection) in self.shader_collections.iter_mut() {
            for item in collection.iter_mut() {
                let layout = item.shader_options().layout();
                let Some(index) = layout.find_shader_option_index(name) else {
                    continue;
                };
                if item.shader_options_mut().set_value(index, &value) {
                    did_set_one = true;
                }
            }
        }
        did_set_one
    }

    /// Enable or disable a shader of the common pipeline.
    pub fn set_shader_enabled<'t>(
        &mut self,
        item: impl Into<ShaderItemRef<'t>>,
        enabled: bool,
    ) -> bool {
        match self.common_item_mut(item.into()) {
            Some(shader) => {
                shader.set_enabled(enabled);
                true
            }
            None => false,
        }
    }

    /// Route a shader of the common pipeline to another draw list. An empty
    /// tag restores the default.
    pub fn set_shader_draw_list_tag_override<'t>(
        &mut self,
        item: impl Into<ShaderItemRef<'t>>,
        draw_list_tag: &str,
    ) -> bool {
        match self.common_item_mut(item.into()) {
            Some(shader) => {
                shader.set_draw_list_tag_override(draw_list_tag);
                true
            }
            None => false,
        }
    }

    /// Merge `render_states` into the overlay of a shader of the common
    /// pipeline.
    pub fn apply_shader_render_state_overlay<'t>(
        &mut self,
        item: impl Into<ShaderItemRef<'t>>,
        render_states: &RenderStates,
    ) -> bool {
        match self.common_item_mut(item.into()) {
            Some(shader) => {
                merge_state_into(render_states, shader.render_states_overlay_mut());
                true
            }
            None => false,
        }
    }

    fn common_collection(&self) -> &ShaderCollection {
        self.common_pipeline
            .and_then(|slot| self.shader_collections.collection_at(slot))
            .unwrap_or(&EMPTY_SHADER_COLLECTION)
    }

    fn common_item_mut(&mut self, item: ShaderItemRef<'_>) -> Option<&mut ShaderItem> {
        let Some(slot) = self.common_pipeline else {
            log::error!("Material has no '{MATERIAL_PIPELINE_NAME_COMMON}' pipeline.");
            return None;
        };
        let shader = self
            .shader_collections
            .collection_at_mut(slot)
            .and_then(|collection| collection.item_mut(item));
        if shader.is_none() {
            log::error!(
                "Shader {item} not found in the '{MATERIAL_PIPELINE_NAME_COMMON}' pipeline."
            );
        }
        shader
    }
}

impl MaterialPropertyAccess for RuntimeContext<'_> {
    fn property_reader(&self) -> PropertyReader<'_> {
        self.reader
    }
}

static_assertions::assert_impl_all!(RuntimeContext<'static>: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{
        CullMode, ShaderOptionDescriptor, ShaderOptionGroupLayout, ShaderOptionValue,
    };
    use redlilium_core::material::{MaterialPropertiesLayout, MaterialPropertyDataType};
    use std::sync::Arc;

    fn properties() -> MaterialPropertyCollection {
        MaterialPropertyCollection::new(Arc::new(
            MaterialPropertiesLayout::new()
                .with_property("doubleSided", MaterialPropertyDataType::Bool),
        ))
    }

    fn pipelines() -> MaterialPipelineShaderCollections {
        let options = Arc::new(
            ShaderOptionGroupLayout::new()
                .with_option(ShaderOptionDescriptor::boolean("o_twoSided", false)),
        );
        MaterialPipelineShaderCollections::new().with_pipeline(
            MATERIAL_PIPELINE_NAME_COMMON,
            ShaderCollection::new()
                .with_item(ShaderItem::new("depth", options.clone()))
                .with_item(
                    ShaderItem::new("forward", options).with_owned_shader_option("o_twoSided"),
                ),
        )
    }

    #[test]
    fn missing_common_pipeline_reads_empty() {
        let properties = properties();
        let deps = MaterialPropertyFlags::all(1);
        let mut collections = MaterialPipelineShaderCollections::new();
        let mut context = RuntimeContext::new(
            &properties,
            &mut collections,
            None,
            &deps,
            MaterialPropertyPsoHandling::Allowed,
        );
        assert_eq!(context.shader_count(), 0);
        assert!(context.shader(0usize).is_none());
        assert!(!context.set_shader_enabled(0usize, false));
        assert!(context.shader_resource_group().is_none());
        assert_eq!(context.pso_handling(), MaterialPropertyPsoHandling::Allowed);
    }

    #[test]
    fn common_item_edits() {
        let properties = properties();
        let deps = MaterialPropertyFlags::all(1);
        let mut collections = pipelines();
        {
            let mut context = RuntimeContext::new(
                &properties,
                &mut collections,
                None,
                &deps,
                MaterialPropertyPsoHandling::default(),
            );
            assert_eq!(context.shader_count(), 2);
            assert!(context.set_shader_enabled("depth", false));
            assert!(context.set_shader_draw_list_tag_override(1usize, "transparent"));
            assert!(context.apply_shader_render_state_overlay(
                "forward",
                &RenderStates::new().with_cull_mode(CullMode::None)
            ));
            assert!(!context.set_shader_enabled("shadow", false));
            assert!(!context.set_shader_enabled(5usize, false));
        }

        let common = collections.get(MATERIAL_PIPELINE_NAME_COMMON).unwrap();
        assert!(!common.item("depth").unwrap().is_enabled());
        let forward = common.item("forward").unwrap();
        assert_eq!(forward.draw_list_tag_override(), Some("transparent"));
        assert_eq!(forward.render_states_overlay().cull_mode, Some(CullMode::None));
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "owned by some shaders"))]
    fn mixed_ownership_is_rejected() {
        let properties = properties();
        let deps = MaterialPropertyFlags::all(1);
        let mut collections = pipelines();
        let mut context = RuntimeContext::new(
            &properties,
            &mut collections,
            None,
            &deps,
            MaterialPropertyPsoHandling::default(),
        );
        assert!(!context.set_shader_option_value("o_twoSided", true));
        let forward = context.shader("forward").unwrap();
        assert_eq!(
            forward.shader_options().value_by_name("o_twoSided"),
            Some(ShaderOptionValue(0))
        );
    }
}
