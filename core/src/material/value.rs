use std::fmt;
use std::sync::Arc;

use crate::math::{Color, Vec2, Vec3, Vec4};

/// Data type of a material property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialPropertyDataType {
    /// No value / unresolved property.
    Invalid,
    Bool,
    Int,
    UInt,
    Float,
    Vector2,
    Vector3,
    Vector4,
    Color,
    /// Reference to an image asset.
    Image,
}

impl fmt::Display for MaterialPropertyDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Opaque reference to an image asset, compared by asset id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(Arc<str>);

impl ImageRef {
    /// Reference the image asset with the given id.
    pub fn new(asset_id: impl Into<Arc<str>>) -> Self {
        Self(asset_id.into())
    }

    /// The referenced asset id.
    pub fn asset_id(&self) -> &str {
        &self.0
    }
}

/// A typed material property value.
///
/// Owned by a [`MaterialPropertyCollection`](super::MaterialPropertyCollection);
/// functors only ever see it by shared reference.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MaterialPropertyValue {
    /// No value. Returned for unknown properties and used for unset range bounds.
    #[default]
    Invalid,
    Bool(bool),
    Int(i32),
    UInt(u32),
    Float(f32),
    Vector2(Vec2),
    Vector3(Vec3),
    Vector4(Vec4),
    Color(Color),
    /// Image reference; `None` when no image is assigned.
    Image(Option<ImageRef>),
}

impl MaterialPropertyValue {
    /// Default value for a property of the given type.
    pub fn default_for(data_type: MaterialPropertyDataType) -> Self {
        match data_type {
            MaterialPropertyDataType::Invalid => Self::Invalid,
            MaterialPropertyDataType::Bool => Self::Bool(false),
            MaterialPropertyDataType::Int => Self::Int(0),
            MaterialPropertyDataType::UInt => Self::UInt(0),
            MaterialPropertyDataType::Float => Self::Float(0.0),
            MaterialPropertyDataType::Vector2 => Self::Vector2(Vec2::zeros()),
            MaterialPropertyDataType::Vector3 => Self::Vector3(Vec3::zeros()),
            MaterialPropertyDataType::Vector4 => Self::Vector4(Vec4::zeros()),
            MaterialPropertyDataType::Color => Self::Color(Color::WHITE),
            MaterialPropertyDataType::Image => Self::Image(None),
        }
    }

    /// The type tag of this value.
    pub fn data_type(&self) -> MaterialPropertyDataType {
        match self {
            Self::Invalid => MaterialPropertyDataType::Invalid,
            Self::Bool(_) => MaterialPropertyDataType::Bool,
            Self::Int(_) => MaterialPropertyDataType::Int,
            Self::UInt(_) => MaterialPropertyDataType::UInt,
            Self::Float(_) => MaterialPropertyDataType::Float,
            Self::Vector2(_) => MaterialPropertyDataType::Vector2,
            Self::Vector3(_) => MaterialPropertyDataType::Vector3,
            Self::Vector4(_) => MaterialPropertyDataType::Vector4,
            Self::Color(_) => MaterialPropertyDataType::Color,
            Self::Image(_) => MaterialPropertyDataType::Image,
        }
    }

    /// Whether this holds an actual value.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Extract the value as `T`, or `None` if the variant does not match.
    pub fn get<T: PropertyValueType>(&self) -> Option<&T> {
        T::from_value(self)
    }
}

/// Concrete Rust types a [`MaterialPropertyValue`] can be read as.
///
/// Implemented for `bool`, `i32`, `u32`, `f32`, [`Vec2`], [`Vec3`], [`Vec4`],
/// [`Color`] and `Option<ImageRef>`.
pub trait PropertyValueType: Sized + 'static {
    /// The property data type this Rust type corresponds to.
    const DATA_TYPE: MaterialPropertyDataType;

    /// Borrow the matching variant's payload.
    fn from_value(value: &MaterialPropertyValue) -> Option<&Self>;
}

macro_rules! impl_property_value_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl PropertyValueType for $ty {
                const DATA_TYPE: MaterialPropertyDataType = MaterialPropertyDataType::$variant;

                fn from_value(value: &MaterialPropertyValue) -> Option<&Self> {
                    match value {
                        MaterialPropertyValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for MaterialPropertyValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_property_value_type! {
    bool => Bool,
    i32 => Int,
    u32 => UInt,
    f32 => Float,
    Vec2 => Vector2,
    Vec3 => Vector3,
    Vec4 => Vector4,
    Color => Color,
    Option<ImageRef> => Image,
}

impl From<ImageRef> for MaterialPropertyValue {
    fn from(image: ImageRef) -> Self {
        Self::Image(Some(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_access() {
        let value = MaterialPropertyValue::from(0.5f32);
        assert_eq!(value.get::<f32>(), Some(&0.5));
        assert_eq!(value.get::<bool>(), None);
        assert_eq!(value.data_type(), MaterialPropertyDataType::Float);
    }

    #[test]
    fn vector_and_color_are_distinct() {
        let color = MaterialPropertyValue::from(Color::new(1.0, 0.0, 0.0, 1.0));
        assert!(color.get::<Vec4>().is_none());
        assert_eq!(color.get::<Color>(), Some(&Color::new(1.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn image_values() {
        let value = MaterialPropertyValue::from(ImageRef::new("textures/brick.png"));
        let image = value.get::<Option<ImageRef>>().unwrap().as_ref().unwrap();
        assert_eq!(image.asset_id(), "textures/brick.png");
        assert_eq!(
            MaterialPropertyValue::default_for(MaterialPropertyDataType::Image),
            MaterialPropertyValue::Image(None)
        );
    }

    #[test]
    fn defaults_match_their_type() {
        for data_type in [
            MaterialPropertyDataType::Invalid,
            MaterialPropertyDataType::Bool,
            MaterialPropertyDataType::Int,
            MaterialPropertyDataType::UInt,
            MaterialPropertyDataType::Float,
            MaterialPropertyDataType::Vector2,
            MaterialPropertyDataType::Vector3,
            MaterialPropertyDataType::Vector4,
            MaterialPropertyDataType::Color,
            MaterialPropertyDataType::Image,
        ] {
            assert_eq!(MaterialPropertyValue::default_for(data_type).data_type(), data_type);
        }
    }

    #[test]
    fn invalid_value() {
        let value = MaterialPropertyValue::default();
        assert!(!value.is_valid());
        assert!(value.get::<i32>().is_none());
    }
}
