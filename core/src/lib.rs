//! # RedLilium Engine Core
//!
//! Core crate for RedLilium Engine material data: property layouts,
//! property values and collections, dirty/dependency flags and the dynamic
//! metadata the editor presents for each property.

pub mod material;
pub mod math;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core library version.
pub fn init() {
    log::info!("RedLilium Core v{} initialized", VERSION);
}
