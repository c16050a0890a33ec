//! # RedLilium Material
//!
//! Material functors for RedLilium: small units of material logic that turn
//! property values into shader state at runtime, or into property
//! presentation metadata in the editor.
//!
//! ## Layout
//!
//! - [`functor`]: the [`MaterialFunctor`](functor::MaterialFunctor) trait,
//!   the runtime and editor contexts functors operate on, and the driver that
//!   decides which functors run after a property change
//! - [`shader`]: the shader-side state runtime functors configure

pub mod functor;
pub mod shader;

pub use functor::{
    EditorContext, EditorFunctorOutput, MaterialFunctor, MaterialFunctorDriver, MaterialFunctorFn,
    MaterialPropertyAccess, MaterialPropertyPsoHandling, RuntimeContext,
};

/// Material library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the material library version.
pub fn init() {
    log::info!("RedLilium Material v{} initialized", VERSION);
}
