//! CPU-side material property data consumed by material functors.
//!
//! A material's properties are described once by a [`MaterialPropertiesLayout`]
//! and hold their current values in a [`MaterialPropertyCollection`]:
//!
//! - [`MaterialPropertyIndex`]: dense handle into a layout (may be invalid)
//! - [`MaterialPropertyRef`]: a property addressed by index or by name
//! - [`MaterialPropertyFlags`]: one bit per property; used both for a
//!   functor's declared dependencies and for the per-pass dirty flags
//! - [`MaterialPropertyValue`]: tagged property value
//! - [`MaterialPropertyDynamicMetadata`] / [`MaterialPropertyGroupDynamicMetadata`]:
//!   editor presentation records that editor functors mutate

mod collection;
mod error;
mod flags;
mod index;
mod layout;
mod metadata;
mod value;

pub use collection::MaterialPropertyCollection;
pub use error::{MaterialPropertyError, MaterialPropertyResult};
pub use flags::MaterialPropertyFlags;
pub use index::{MaterialPropertyIndex, MaterialPropertyRef};
pub use layout::{MaterialPropertiesLayout, MaterialPropertyDescriptor};
pub use metadata::{
    MaterialPropertyDynamicMetadata, MaterialPropertyGroupDynamicMetadata,
    MaterialPropertyGroupVisibility, MaterialPropertyRange, MaterialPropertyVisibility,
};
pub use value::{ImageRef, MaterialPropertyDataType, MaterialPropertyValue, PropertyValueType};
