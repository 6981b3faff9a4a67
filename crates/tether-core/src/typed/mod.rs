//! Typed - job payloads and their registry.
//!
//! Records only carry the `klass` discriminator; the registry turns it back
//! into runnable work.

pub mod registry;
pub mod work;

pub use self::registry::{RegistryError, WorkRegistry};
pub use self::work::{NoopWork, Work, WorkContext, WorkError};
