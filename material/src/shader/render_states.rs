//! Fixed-function render state overrides.
//!
//! A [`RenderStates`] value is sparse: every field is optional and `None` means
//! "inherit". Shader items carry one as an overlay that material functors
//! write into with [`merge_state_into`].

use bitflags::bitflags;

/// Which triangle faces are culled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    None,
    Front,
    #[default]
    Back,
}

/// Polygon rasterization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillMode {
    #[default]
    Solid,
    Wireframe,
}

/// Depth comparison function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareFunction {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    #[default]
    GreaterEqual,
    Always,
}

bitflags! {
    /// Color channels written by a pass.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColorWriteMask: u8 {
        const RED = 1 << 0;
        const GREEN = 1 << 1;
        const BLUE = 1 << 2;
        const ALPHA = 1 << 3;
        const COLOR = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits();
        const ALL = Self::COLOR.bits() | Self::ALPHA.bits();
    }
}

/// Multiplier applied to a blend input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendFactor {
    #[default]
    Zero,
    One,
    Src,
    OneMinusSrc,
    SrcAlpha,
    OneMinusSrcAlpha,
    Dst,
    OneMinusDst,
    DstAlpha,
    OneMinusDstAlpha,
    /// min(source alpha, 1 - destination alpha)
    SrcAlphaSaturated,
    Constant,
    OneMinusConstant,
}

/// How the weighted source and destination are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendOperation {
    #[default]
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

/// Blend equation for one set of channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendComponent {
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
    pub operation: BlendOperation,
}

impl Default for BlendComponent {
    /// Replace: `src * 1 + dst * 0`.
    fn default() -> Self {
        Self::new(BlendFactor::One, BlendFactor::Zero, BlendOperation::Add)
    }
}

impl BlendComponent {
    pub const fn new(
        src_factor: BlendFactor,
        dst_factor: BlendFactor,
        operation: BlendOperation,
    ) -> Self {
        Self {
            src_factor,
            dst_factor,
            operation,
        }
    }

    /// Standard "over" compositing with straight alpha.
    pub const fn over() -> Self {
        Self::new(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha, BlendOperation::Add)
    }

    /// "Over" compositing with premultiplied alpha.
    pub const fn premultiplied() -> Self {
        Self::new(BlendFactor::One, BlendFactor::OneMinusSrcAlpha, BlendOperation::Add)
    }

    pub const fn additive() -> Self {
        Self::new(BlendFactor::One, BlendFactor::One, BlendOperation::Add)
    }
}

/// Color and alpha blend equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlendState {
    pub color: BlendComponent,
    pub alpha: BlendComponent,
}

impl BlendState {
    pub const fn alpha_blending() -> Self {
        Self {
            color: BlendComponent::over(),
            alpha: BlendComponent::over(),
        }
    }

    pub const fn premultiplied_alpha() -> Self {
        Self {
            color: BlendComponent::premultiplied(),
            alpha: BlendComponent::premultiplied(),
        }
    }

    pub const fn additive() -> Self {
        Self {
            color: BlendComponent::additive(),
            alpha: BlendComponent::additive(),
        }
    }
}

/// Sparse set of render state overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderStates {
    pub cull_mode: Option<CullMode>,
    pub fill_mode: Option<FillMode>,
    pub depth_bias: Option<i32>,
    pub depth_test_enable: Option<bool>,
    pub depth_write_enable: Option<bool>,
    pub depth_compare: Option<CompareFunction>,
    pub blend_enable: Option<bool>,
    pub blend_state: Option<BlendState>,
    pub color_write_mask: Option<ColorWriteMask>,
}

impl RenderStates {
    /// An overlay that overrides nothing.
    pub const fn new() -> Self {
        Self {
            cull_mode: None,
            fill_mode: None,
            depth_bias: None,
            depth_test_enable: None,
            depth_write_enable: None,
            depth_compare: None,
            blend_enable: None,
            blend_state: None,
            color_write_mask: None,
        }
    }

    /// True if no field is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }

    #[must_use]
    pub fn with_cull_mode(mut self, cull_mode: CullMode) -> Self {
        self.cull_mode = Some(cull_mode);
        self
    }

    #[must_use]
    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = Some(fill_mode);
        self
    }

    #[must_use]
    pub fn with_depth_bias(mut self, depth_bias: i32) -> Self {
        self.depth_bias = Some(depth_bias);
        self
    }

    /// Override depth testing, writing and comparison together.
    #[must_use]
    pub fn with_depth(mut self, test: bool, write: bool, compare: CompareFunction) -> Self {
        self.depth_test_enable = Some(test);
        self.depth_write_enable = Some(write);
        self.depth_compare = Some(compare);
        self
    }

    /// Enable blending with `blend_state`.
    #[must_use]
    pub fn with_blend_state(mut self, blend_state: BlendState) -> Self {
        self.blend_enable = Some(true);
        self.blend_state = Some(blend_state);
        self
    }

    #[must_use]
    pub fn with_blending_disabled(mut self) -> Self {
        self.blend_enable = Some(false);
        self
    }

    #[must_use]
    pub fn with_color_write_mask(mut self, mask: ColorWriteMask) -> Self {
        self.color_write_mask = Some(mask);
        self
    }
}

macro_rules! merge_fields {
    ($source:ident => $target:ident: $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $source.$field {
                $target.$field = Some(value);
            }
        )+
    };
}

/// Copy every field `source` overrides into `target`, leaving the others as
/// they are.
pub fn merge_state_into(source: &RenderStates, target: &mut RenderStates) {
    merge_fields!(source => target:
        cull_mode,
        fill_mode,
        depth_bias,
        depth_test_enable,
        depth_write_enable,
        depth_compare,
        blend_enable,
        blend_state,
        color_write_mask,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overrides_only_set_fields() {
        let mut target = RenderStates::new()
            .with_cull_mode(CullMode::Back)
            .with_depth_bias(4);
        let source = RenderStates::new()
            .with_cull_mode(CullMode::None)
            .with_blend_state(BlendState::alpha_blending());

        merge_state_into(&source, &mut target);

        assert_eq!(target.cull_mode, Some(CullMode::None));
        assert_eq!(target.depth_bias, Some(4));
        assert_eq!(target.blend_enable, Some(true));
        assert_eq!(target.blend_state, Some(BlendState::alpha_blending()));
        assert_eq!(target.fill_mode, None);
    }

    #[test]
    fn merge_empty_is_noop() {
        let mut target = RenderStates::new().with_fill_mode(FillMode::Wireframe);
        let before = target;
        merge_state_into(&RenderStates::new(), &mut target);
        assert_eq!(target, before);
        assert!(RenderStates::default().is_empty());
        assert!(!before.is_empty());
    }

    #[test]
    fn color_mask_composites() {
        assert_eq!(ColorWriteMask::ALL, ColorWriteMask::COLOR | ColorWriteMask::ALPHA);
        assert!(!ColorWriteMask::COLOR.contains(ColorWriteMask::ALPHA));
    }
}
