//! The shader-side state material functors configure: shader items with their
//! options and render state overlays, grouped per material pipeline, and the
//! material's shader resource group.

mod collection;
mod options;
mod render_states;
mod resource_group;

pub use collection::{
    MATERIAL_PIPELINE_NAME_COMMON, MaterialPipelineShaderCollections, ShaderCollection,
    ShaderItem, ShaderItemRef,
};
pub use options::{
    ShaderOptionDescriptor, ShaderOptionGroup, ShaderOptionGroupLayout, ShaderOptionIndex,
    ShaderOptionType, ShaderOptionValue, ShaderOptionValueSource,
};
pub use render_states::{
    BlendComponent, BlendFactor, BlendOperation, BlendState, ColorWriteMask, CompareFunction,
    CullMode, FillMode, RenderStates, merge_state_into,
};
pub use resource_group::{ShaderResourceGroup, ShaderResourceGroupLayout};
