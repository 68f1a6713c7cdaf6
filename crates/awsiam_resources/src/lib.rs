//! Bindings for the `aws-iam` component package (Layer 2).
//!
//! Each resource has an argument record, a typed handle created by a
//! validating constructor, and collection aliases for passing handles
//! around as inputs and outputs:
//!
//! - [`policy`] - `aws-iam:index:Policy`
//! - [`role`] - `aws-iam:index:Role`
//! - [`document`] - Builders for the policy JSON both resources accept
//!
//! Register the adapter types with [`AwsIamPlugin`] before marshalling.
//!
//! # Example
//!
//! ```
//! use awsiam_core::mock::MockContext;
//! use awsiam_resources::document::{PolicyDocument, PolicyStatement};
//! use awsiam_resources::policy::{Policy, PolicyArgs};
//!
//! let document = PolicyDocument::new()
//!     .with_statement(PolicyStatement::new(["s3:GetObject"]).with_sid("ReadAssets"));
//!
//! let ctx = MockContext::new();
//! let args = PolicyArgs::new()
//!     .name("assets-reader")
//!     .name_suffix(document.default_name_suffix())
//!     .policy_document(&document)
//!     .unwrap();
//!
//! let policy = Policy::new(&ctx, "assets-reader", Some(args), []).unwrap();
//! assert_eq!(policy.name(), "assets-reader");
//! assert_eq!(ctx.registration_count(), 1);
//! ```

pub mod document;
pub mod policy;
pub mod role;

mod plugin;

pub use plugin::AwsIamPlugin;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::AwsIamPlugin;
    pub use crate::document::*;
    pub use crate::policy::*;
    pub use crate::role::*;
}
