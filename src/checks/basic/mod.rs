//! Built-in checks of the `basic` group.

pub mod fully_qualified_image;
pub mod reference;
pub mod unused_secret;

pub use fully_qualified_image::FullyQualifiedImageCheck;
pub use unused_secret::UnusedSecretCheck;

use super::{Legacy, Registry, RegistryError};

/// Group every check in this module belongs to.
pub const GROUP: &str = "basic";

/// Register the built-in checks.
pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(Legacy(FullyQualifiedImageCheck))?;
    registry.register(UnusedSecretCheck)?;
    Ok(())
}
