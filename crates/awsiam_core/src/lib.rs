//! Deferred values and resource registration for awsiam (Layer 1).
//!
//! `awsiam_core` provides the engine-facing primitives every resource
//! binding is written against:
//!
//! - [`output`] - Deferred values with `map`/`zip` combinators
//! - [`input`] - Values accepted as resource inputs
//! - [`context`] - The registration seam to the orchestration engine
//! - [`resource`] - Typed handles and the validating constructor
//! - [`options`] - Resource options forwarded to the engine
//! - [`registry`] - Adapter type registry for type-erased marshalling
//! - [`plugin`] - Bundles of registry entries
//! - [`config`] - Deployment information
//! - [`tracing_config`] - Log subscriber setup
//!
//! # Architecture
//!
//! - **Layer 1** (`awsiam_core`): engine-facing primitives (this crate)
//! - **Layer 2** (`awsiam_resources`): the `aws-iam` resource bindings
//!
//! # Example
//!
//! ```
//! use awsiam_core::output::Output;
//! use awsiam_core::input::Input;
//!
//! # futures::executor::block_on(async {
//! let arns = vec![
//!     Output::resolved("arn:aws:iam::aws:policy/ReadOnlyAccess".to_string()),
//!     Output::resolved("arn:aws:iam::aws:policy/SecurityAudit".to_string()),
//! ];
//! let second = arns.to_output().index(1_usize);
//!
//! assert_eq!(second.await.unwrap(), "arn:aws:iam::aws:policy/SecurityAudit");
//! # });
//! ```

/// Deployment information.
pub mod config;

/// The registration seam to the orchestration engine.
pub mod context;

/// Values accepted as resource inputs.
pub mod input;

/// Resource options.
pub mod options;

/// Deferred values.
pub mod output;

/// Plugins bundling type registrations.
pub mod plugin;

/// Adapter type registry.
pub mod registry;

/// Typed handles and the validating constructor.
pub mod resource;

/// Log subscriber setup.
pub mod tracing_config;

/// Resource identity.
pub mod urn;

/// In-memory context for tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::config::*;
    pub use crate::context::*;
    pub use crate::input::*;
    pub use crate::options::*;
    pub use crate::output::*;
    pub use crate::plugin::*;
    pub use crate::registry::*;
    pub use crate::resource::*;
    pub use crate::urn::*;
}
