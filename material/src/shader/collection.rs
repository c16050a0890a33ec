//! Shader items grouped per material pipeline.

use std::fmt;
use std::sync::Arc;

use fixedbitset::FixedBitSet;

use super::options::{ShaderOptionGroup, ShaderOptionGroupLayout, ShaderOptionIndex};
use super::render_states::RenderStates;

/// Name of the pipeline whose shaders runtime functors configure directly.
pub const MATERIAL_PIPELINE_NAME_COMMON: &str = "Common";

/// One shader used by a material, with the per-material state functors may
/// change.
#[derive(Debug, Clone)]
pub struct ShaderItem {
    shader_tag: String,
    enabled: bool,
    draw_list_tag_override: Option<String>,
    render_states_overlay: RenderStates,
    shader_options: ShaderOptionGroup,
    owned_shader_options: FixedBitSet,
}

impl ShaderItem {
    /// Create an enabled item with default option values and no owned options.
    pub fn new(
        shader_tag: impl Into<String>,
        options_layout: Arc<ShaderOptionGroupLayout>,
    ) -> Self {
        Self {
            shader_tag: shader_tag.into(),
            enabled: true,
            draw_list_tag_override: None,
            render_states_overlay: RenderStates::new(),
            shader_options: ShaderOptionGroup::new(options_layout),
            owned_shader_options: FixedBitSet::new(),
        }
    }

    /// Mark the named option as owned by the material.
    #[must_use]
    pub fn with_owned_shader_option(mut self, name: &str) -> Self {
        match self.shader_options.layout().find_shader_option_index(name) {
            Some(index) => {
                self.owned_shader_options.grow(index.index() + 1);
                self.owned_shader_options.insert(index.index());
            }
            None => log::warn!(
                "Shader '{}' has no option '{}' to take ownership of.",
                self.shader_tag,
                name
            ),
        }
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn shader_tag(&self) -> &str {
        &self.shader_tag
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn draw_list_tag_override(&self) -> Option<&str> {
        self.draw_list_tag_override.as_deref()
    }

    /// Override the draw list this shader is submitted to. An empty tag clears
    /// the override.
    pub fn set_draw_list_tag_override(&mut self, tag: &str) {
        self.draw_list_tag_override = (!tag.is_empty()).then(|| tag.to_owned());
    }

    pub fn render_states_overlay(&self) -> &RenderStates {
        &self.render_states_overlay
    }

    pub fn render_states_overlay_mut(&mut self) -> &mut RenderStates {
        &mut self.render_states_overlay
    }

    pub fn shader_options(&self) -> &ShaderOptionGroup {
        &self.shader_options
    }

    pub fn shader_options_mut(&mut self) -> &mut ShaderOptionGroup {
        &mut self.shader_options
    }

    /// Whether the material (as opposed to the render pipeline) controls this
    /// option.
    #[inline]
    pub fn material_owns_shader_option(&self, index: ShaderOptionIndex) -> bool {
        self.owned_shader_options.contains(index.index())
    }
}

/// Addresses a shader item by position or by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderItemRef<'a> {
    Index(usize),
    Tag(&'a str),
}

impl From<usize> for ShaderItemRef<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl<'a> From<&'a str> for ShaderItemRef<'a> {
    fn from(tag: &'a str) -> Self {
        Self::Tag(tag)
    }
}

impl fmt::Display for ShaderItemRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "#{index}"),
            Self::Tag(tag) => write!(f, "'{tag}'"),
        }
    }
}

/// Ordered shader items of one material pipeline.
#[derive(Debug, Clone, Default)]
pub struct ShaderCollection {
    items: Vec<ShaderItem>,
}

impl ShaderCollection {
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn with_item(mut self, item: ShaderItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn push(&mut self, item: ShaderItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShaderItem> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ShaderItem> {
        self.items.iter_mut()
    }

    /// Position of the first item with `tag`.
    pub fn find_by_tag(&self, tag: &str) -> Option<usize> {
        self.items.iter().position(|item| item.shader_tag == tag)
    }

    pub fn item<'t>(&self, item: impl Into<ShaderItemRef<'t>>) -> Option<&ShaderItem> {
        match item.into() {
            ShaderItemRef::Index(index) => self.items.get(index),
            ShaderItemRef::Tag(tag) => self.items.iter().find(|i| i.shader_tag == tag),
        }
    }

    pub fn item_mut<'t>(&mut self, item: impl Into<ShaderItemRef<'t>>) -> Option<&mut ShaderItem> {
        match item.into() {
            ShaderItemRef::Index(index) => self.items.get_mut(index),
            ShaderItemRef::Tag(tag) => self.items.iter_mut().find(|i| i.shader_tag == tag),
        }
    }
}

/// Shader collections keyed by material pipeline name, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MaterialPipelineShaderCollections {
    pipelines: Vec<(String, ShaderCollection)>,
}

impl MaterialPipelineShaderCollections {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pipeline(mut self, name: impl Into<String>, collection: ShaderCollection) -> Self {
        self.insert(name, collection);
        self
    }

    /// Add or replace the collection of pipeline `name`.
    pub fn insert(&mut self, name: impl Into<String>, collection: ShaderCollection) {
        let name = name.into();
        match self.find_pipeline(&name) {
            Some(slot) => self.pipelines[slot].1 = collection,
            None => self.pipelines.push((name, collection)),
        }
    }

    /// Slot of pipeline `name`, stable until the next insertion of a new name.
    pub fn find_pipeline(&self, name: &str) -> Option<usize> {
        self.pipelines.iter().position(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&ShaderCollection> {
        self.find_pipeline(name).map(|slot| &self.pipelines[slot].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ShaderCollection> {
        let slot = self.find_pipeline(name)?;
        Some(&mut self.pipelines[slot].1)
    }

    pub fn collection_at(&self, slot: usize) -> Option<&ShaderCollection> {
        self.pipelines.get(slot).map(|(_, c)| c)
    }

    pub fn collection_at_mut(&mut self, slot: usize) -> Option<&mut ShaderCollection> {
        self.pipelines.get_mut(slot).map(|(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShaderCollection)> {
        self.pipelines.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut ShaderCollection)> {
        self.pipelines.iter_mut().map(|(n, c)| (n.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::options::ShaderOptionDescriptor;

    fn options() -> Arc<ShaderOptionGroupLayout> {
        Arc::new(
            ShaderOptionGroupLayout::new()
                .with_option(ShaderOptionDescriptor::boolean("o_a", false))
                .with_option(ShaderOptionDescriptor::boolean("o_b", false)),
        )
    }

    #[test]
    fn ownership() {
        let item = ShaderItem::new("forward", options()).with_owned_shader_option("o_b");
        let a = item.shader_options().layout().find_shader_option_index("o_a").unwrap();
        let b = item.shader_options().layout().find_shader_option_index("o_b").unwrap();
        assert!(!item.material_owns_shader_option(a));
        assert!(item.material_owns_shader_option(b));
    }

    #[test]
    fn item_lookup() {
        let mut collection = ShaderCollection::new()
            .with_item(ShaderItem::new("depth", options()))
            .with_item(ShaderItem::new("forward", options()));

        assert_eq!(collection.find_by_tag("forward"), Some(1));
        assert_eq!(collection.item(0usize).map(ShaderItem::shader_tag), Some("depth"));
        assert!(collection.item("shadow").is_none());
        assert!(collection.item(2usize).is_none());

        collection.item_mut("depth").unwrap().set_enabled(false);
        assert!(!collection.item(0usize).unwrap().is_enabled());
    }

    #[test]
    fn draw_list_override_clears_on_empty() {
        let mut item = ShaderItem::new("forward", options());
        item.set_draw_list_tag_override("transparent");
        assert_eq!(item.draw_list_tag_override(), Some("transparent"));
        item.set_draw_list_tag_override("");
        assert_eq!(item.draw_list_tag_override(), None);
    }

    #[test]
    fn pipelines_keep_insertion_order() {
        let mut pipelines = MaterialPipelineShaderCollections::new()
            .with_pipeline("Deferred", ShaderCollection::new())
            .with_pipeline(MATERIAL_PIPELINE_NAME_COMMON, ShaderCollection::new());
        assert_eq!(pipelines.find_pipeline(MATERIAL_PIPELINE_NAME_COMMON), Some(1));

        pipelines.insert(
            "Deferred",
            ShaderCollection::new().with_item(ShaderItem::new("gbuffer", options())),
        );
        assert_eq!(pipelines.len(), 2);
        assert_eq!(pipelines.get("Deferred").map(ShaderCollection::len), Some(1));
        let names: Vec<_> = pipelines.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["Deferred", MATERIAL_PIPELINE_NAME_COMMON]);
    }
}
