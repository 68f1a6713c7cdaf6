//! Registers the `aws-iam` adapter types.

use crate::policy::register_policy_types;
use crate::role::register_role_types;
use awsiam_core::plugin::Plugin;
use awsiam_core::registry::TypeRegistry;

/// Plugin that registers the input and output adapter types of every
/// `aws-iam` resource.
///
/// # Usage
///
/// Add it once during program initialization, before marshalling any
/// resource values. Adding it again is a no-op.
///
/// ```
/// use awsiam_core::registry::TypeRegistry;
/// use awsiam_resources::AwsIamPlugin;
///
/// let mut registry = TypeRegistry::new();
/// assert!(registry.add_plugin(AwsIamPlugin));
/// assert!(!registry.add_plugin(AwsIamPlugin));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct AwsIamPlugin;

impl Plugin for AwsIamPlugin {
    fn build(&self, registry: &mut TypeRegistry) {
        tracing::debug!(plugin = self.name(), "registering adapter types");
        register_policy_types(registry);
        register_role_types(registry);
    }

    fn name(&self) -> &str {
        "aws-iam"
    }
}
