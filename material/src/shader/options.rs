//! Shader options a material may override.
//!
//! Only the option-level contract is modelled here: each option has a name, a
//! type and a current value. Packing option values into shader variant keys is
//! the shader system's business.

use std::fmt;
use std::sync::Arc;

/// Index of an option within a [`ShaderOptionGroupLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderOptionIndex(u32);

impl ShaderOptionIndex {
    pub const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Raw value of a shader option (0/1 for booleans, enumerant position, or the
/// integer itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ShaderOptionValue(pub u32);

/// The value domain of a shader option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderOptionType {
    /// `false` / `true`.
    Boolean,
    /// Named enumerants; values are their positions.
    Enumeration(Vec<String>),
    /// Inclusive integer range.
    IntegerRange { min: u32, max: u32 },
}

impl ShaderOptionType {
    /// Whether `value` lies in this option's domain.
    pub fn contains(&self, value: ShaderOptionValue) -> bool {
        match self {
            Self::Boolean => value.0 <= 1,
            Self::Enumeration(names) => (value.0 as usize) < names.len(),
            Self::IntegerRange { min, max } => (*min..=*max).contains(&value.0),
        }
    }

    /// Resolve a value given by name ("true", an enumerant, or a decimal integer).
    pub fn find_value(&self, name: &str) -> Option<ShaderOptionValue> {
        let value = match self {
            Self::Boolean => match name {
                "false" => ShaderOptionValue(0),
                "true" => ShaderOptionValue(1),
                _ => return None,
            },
            Self::Enumeration(names) => {
                ShaderOptionValue(names.iter().position(|n| n == name)? as u32)
            }
            Self::IntegerRange { .. } => ShaderOptionValue(name.parse().ok()?),
        };
        self.contains(value).then_some(value)
    }
}

/// Describes one shader option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderOptionDescriptor {
    pub name: String,
    pub option_type: ShaderOptionType,
    pub default_value: ShaderOptionValue,
}

impl ShaderOptionDescriptor {
    /// A boolean option.
    pub fn boolean(name: impl Into<String>, default_value: bool) -> Self {
        Self {
            name: name.into(),
            option_type: ShaderOptionType::Boolean,
            default_value: ShaderOptionValue(default_value as u32),
        }
    }

    /// An enumeration option defaulting to its first enumerant.
    pub fn enumeration<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            option_type: ShaderOptionType::Enumeration(
                values.into_iter().map(Into::into).collect(),
            ),
            default_value: ShaderOptionValue(0),
        }
    }

    /// An integer range option defaulting to `min`.
    pub fn integer_range(name: impl Into<String>, min: u32, max: u32) -> Self {
        Self {
            name: name.into(),
            option_type: ShaderOptionType::IntegerRange { min, max },
            default_value: ShaderOptionValue(min),
        }
    }
}

/// The options a shader exposes, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderOptionGroupLayout {
    options: Vec<ShaderOptionDescriptor>,
}

impl ShaderOptionGroupLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option.
    #[must_use]
    pub fn with_option(mut self, option: ShaderOptionDescriptor) -> Self {
        self.options.push(option);
        self
    }

    /// Find an option by name.
    pub fn find_shader_option_index(&self, name: &str) -> Option<ShaderOptionIndex> {
        self.options
            .iter()
            .position(|o| o.name == name)
            .map(ShaderOptionIndex::new)
    }

    /// Descriptor of the option at `index`.
    pub fn option(&self, index: ShaderOptionIndex) -> Option<&ShaderOptionDescriptor> {
        self.options.get(index.index())
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

/// Something a shader option value can be produced from.
///
/// Implemented for raw [`ShaderOptionValue`]s, `bool`, `u32` and names
/// (`str` / `String`), so functors can write
/// `ctx.set_shader_option_value("o_useTexture", true)` or
/// `ctx.set_shader_option_value("o_mode", "Clearcoat")`.
pub trait ShaderOptionValueSource: fmt::Debug {
    /// Resolve to a raw value for `option`, or `None` if the option's type
    /// cannot represent it.
    fn resolve(&self, option: &ShaderOptionDescriptor) -> Option<ShaderOptionValue>;
}

impl ShaderOptionValueSource for ShaderOptionValue {
    fn resolve(&self, option: &ShaderOptionDescriptor) -> Option<ShaderOptionValue> {
        option.option_type.contains(*self).then_some(*self)
    }
}

impl ShaderOptionValueSource for u32 {
    fn resolve(&self, option: &ShaderOptionDescriptor) -> Option<ShaderOptionValue> {
        ShaderOptionValue(*self).resolve(option)
    }
}

impl ShaderOptionValueSource for bool {
    fn resolve(&self, option: &ShaderOptionDescriptor) -> Option<ShaderOptionValue> {
        ShaderOptionValue(*self as u32).resolve(option)
    }
}

impl ShaderOptionValueSource for str {
    fn resolve(&self, option: &ShaderOptionDescriptor) -> Option<ShaderOptionValue> {
        option.option_type.find_value(self)
    }
}

impl ShaderOptionValueSource for String {
    fn resolve(&self, option: &ShaderOptionDescriptor) -> Option<ShaderOptionValue> {
        self.as_str().resolve(option)
    }
}

impl<T: ShaderOptionValueSource + ?Sized> ShaderOptionValueSource for &T {
    fn resolve(&self, option: &ShaderOptionDescriptor) -> Option<ShaderOptionValue> {
        (**self).resolve(option)
    }
}

/// Current option values of one shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderOptionGroup {
    layout: Arc<ShaderOptionGroupLayout>,
    values: Vec<ShaderOptionValue>,
}

impl ShaderOptionGroup {
    /// Create a group with every option at its default value.
    pub fn new(layout: Arc<ShaderOptionGroupLayout>) -> Self {
        let values = layout.options.iter().map(|o| o.default_value).collect();
        Self { layout, values }
    }

    pub fn layout(&self) -> &Arc<ShaderOptionGroupLayout> {
        &self.layout
    }

    /// Current value of the option at `index`.
    pub fn value(&self, index: ShaderOptionIndex) -> Option<ShaderOptionValue> {
        self.values.get(index.index()).copied()
    }

    /// Current value of the named option.
    pub fn value_by_name(&self, name: &str) -> Option<ShaderOptionValue> {
        self.value(self.layout.find_shader_option_index(name)?)
    }

    /// Set the option at `index`. Returns `false` (and logs) if the index is
    /// out of range or the value does not fit the option's type.
    pub fn set_value<V>(&mut self, index: ShaderOptionIndex, value: &V) -> bool
    where
        V: ShaderOptionValueSource + ?Sized,
    {
        let Some(option) = self.layout.option(index) else {
            log::error!("Shader option index {} is out of range.", index.index());
            return false;
        };
        let Some(resolved) = value.resolve(option) else {
            log::error!(
                "Value {:?} is not valid for shader option '{}'.",
                value,
                option.name
            );
            return false;
        };
        self.values[index.index()] = resolved;
        true
    }
}
