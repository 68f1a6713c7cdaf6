//! Typed bindings for the `aws-iam` component resources.
//!
//! Declares IAM policies and roles inside an infrastructure-as-code engine's
//! dependency graph. See [`awsiam_resources`] for the resource bindings and
//! [`awsiam_core`] for the deferred-value and registration machinery.

pub use awsiam_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use awsiam_internal::prelude::*;
}
