//! Material functors.
//!
//! A functor derives shader-side state (option values, render state overlays,
//! resource group constants) or editor presentation metadata from a subset of
//! a material's properties. It declares that subset up front as its
//! dependency set; the driver only runs it when one of those properties
//! changed, and the contexts warn when it reads a property outside the set.

mod access;
mod closure;
mod driver;
mod editor;
mod runtime;

pub use access::{MaterialPropertyAccess, PropertyReader, check_property_access};
pub use closure::MaterialFunctorFn;
pub use driver::{EditorFunctorOutput, MaterialFunctorDriver};
pub use editor::EditorContext;
pub use runtime::RuntimeContext;

use redlilium_core::material::MaterialPropertyFlags;

/// How a functor should treat changes that would require a new pipeline state
/// object. Opaque to the contexts, which just hand it to functors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaterialPropertyPsoHandling {
    /// PSO-affecting changes are errors.
    Error,
    /// PSO-affecting changes are allowed but reported.
    #[default]
    Warning,
    /// PSO-affecting changes are allowed silently.
    Allowed,
}

/// A unit of material logic driven by property changes.
pub trait MaterialFunctor: Send + Sync {
    /// Properties this functor reads.
    fn material_property_dependencies(&self) -> &MaterialPropertyFlags;

    /// Whether any property in `dirty` is a dependency of this functor.
    #[inline]
    fn needs_process(&self, dirty: &MaterialPropertyFlags) -> bool {
        self.material_property_dependencies().intersects(dirty)
    }

    /// Apply the functor to the material's runtime shader state.
    fn process_runtime(&self, _context: &mut RuntimeContext<'_>) {}

    /// Apply the functor to the material's editor metadata.
    fn process_editor(&self, _context: &mut EditorContext<'_>) {}

    /// Debug label.
    fn label(&self) -> Option<&str> {
        None
    }
}
