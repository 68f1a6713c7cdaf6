//! # awsiam Internal Library
//!
//! Re-exports the awsiam crates for convenience.

/// Layer 1: deferred values and resource registration.
pub use awsiam_core;

/// Layer 2: the `aws-iam` resource bindings.
pub use awsiam_resources;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use awsiam_core::prelude::*;
    pub use awsiam_resources::prelude::*;
}
