//! Plugins bundle the type registrations of a binding package.
//!
//! Each binding package ships one plugin that registers every adapter type
//! it defines. Applications add the plugins they use to their
//! [`TypeRegistry`] once, during initialization.

use crate::registry::TypeRegistry;
use core::any::TypeId;

/// Unique identifier for a plugin type.
///
/// Used for duplicate detection. Based on [`TypeId`], so each plugin type
/// has exactly one `PluginId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PluginId {
    type_id: TypeId,
    type_name: &'static str,
}

impl PluginId {
    /// Creates a `PluginId` for the given plugin type.
    #[must_use]
    pub fn of<P: Plugin>() -> Self {
        Self {
            type_id: TypeId::of::<P>(),
            type_name: core::any::type_name::<P>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the type name for debugging.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// A set of type registrations added to a [`TypeRegistry`] as a unit.
pub trait Plugin: Send + Sync + 'static {
    /// Registers this plugin's types. Called once per registry.
    fn build(&self, registry: &mut TypeRegistry);

    /// Returns the plugin's name for debugging and log output.
    ///
    /// Default implementation returns the type name.
    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }
}
