//! Dependency-checked property reads shared by the runtime and editor contexts.

use redlilium_core::material::{
    MaterialPropertiesLayout, MaterialPropertyCollection, MaterialPropertyFlags,
    MaterialPropertyIndex, MaterialPropertyRef, MaterialPropertyValue, PropertyValueType,
};

/// Warn if a functor reads a property it did not declare as a dependency.
///
/// Compiled in with `debug_assertions` or the `access-checks` feature. The read
/// itself is never blocked.
#[cfg(any(debug_assertions, feature = "access-checks"))]
#[inline]
pub fn check_property_access(
    index: MaterialPropertyIndex,
    dependencies: &MaterialPropertyFlags,
    layout: &MaterialPropertiesLayout,
) {
    if !dependencies.test(index) {
        report_undeclared_access(index, layout);
    }
}

#[cfg(not(any(debug_assertions, feature = "access-checks")))]
#[inline(always)]
pub fn check_property_access(
    _index: MaterialPropertyIndex,
    _dependencies: &MaterialPropertyFlags,
    _layout: &MaterialPropertiesLayout,
) {
}

#[cfg(any(debug_assertions, feature = "access-checks"))]
#[cold]
#[inline(never)]
fn report_undeclared_access(index: MaterialPropertyIndex, layout: &MaterialPropertiesLayout) {
    let name = layout.property_name(index).unwrap_or("<unknown>");
    log::warn!("Material functor accessing an unregistered material property '{name}'.");
}

/// A property collection viewed through one functor's dependency set.
///
/// Every value read goes through [`check_property_access`]; the underlying
/// collection is not reachable from here.
#[derive(Clone, Copy)]
pub struct PropertyReader<'a> {
    properties: &'a MaterialPropertyCollection,
    dependencies: &'a MaterialPropertyFlags,
}

impl<'a> PropertyReader<'a> {
    pub fn new(
        properties: &'a MaterialPropertyCollection,
        dependencies: &'a MaterialPropertyFlags,
    ) -> Self {
        Self {
            properties,
            dependencies,
        }
    }

    pub fn layout(self) -> &'a MaterialPropertiesLayout {
        self.properties.layout()
    }

    /// Index of `property`; unknown names give the invalid index.
    pub fn resolve(self, property: MaterialPropertyRef<'_>) -> MaterialPropertyIndex {
        match property {
            MaterialPropertyRef::Index(index) => index,
            MaterialPropertyRef::Name(name) => self.layout().find_property_index(name),
        }
    }

    pub fn property_name(self, index: MaterialPropertyIndex) -> Option<&'a str> {
        self.layout().property_name(index)
    }

    /// Read a property, checking it against the dependency set.
    pub fn value(self, property: MaterialPropertyRef<'_>) -> &'a MaterialPropertyValue {
        let index = self.resolve(property);
        check_property_access(index, self.dependencies, self.layout());
        self.properties.property_value(index)
    }

    /// Read a property as `T`, logging an error if it holds another type.
    pub fn value_as<T: PropertyValueType>(
        self,
        property: MaterialPropertyRef<'_>,
    ) -> Option<&'a T> {
        let index = self.resolve(property);
        let value = self.value(MaterialPropertyRef::Index(index));
        let typed = value.get::<T>();
        if typed.is_none() {
            log::error!(
                "Material property '{}' holds {}, not {}.",
                self.property_name(index).unwrap_or("<unknown>"),
                value.data_type(),
                T::DATA_TYPE
            );
        }
        typed
    }
}

/// Guarded property reads, available on every functor context.
pub trait MaterialPropertyAccess {
    fn property_reader(&self) -> PropertyReader<'_>;

    fn material_properties_layout(&self) -> &MaterialPropertiesLayout {
        self.property_reader().layout()
    }

    /// Value of a property given by index or name.
    ///
    /// Warns (in checked builds) if the property is not a declared dependency.
    /// Unknown properties read as [`MaterialPropertyValue::Invalid`].
    fn property_value<'k>(
        &self,
        property: impl Into<MaterialPropertyRef<'k>>,
    ) -> &MaterialPropertyValue {
        self.property_reader().value(property.into())
    }

    /// Typed variant of [`property_value`](Self::property_value).
    fn property_value_as<'k, T: PropertyValueType>(
        &self,
        property: impl Into<MaterialPropertyRef<'k>>,
    ) -> Option<&T> {
        self.property_reader().value_as::<T>(property.into())
    }
}
