//! The `aws-iam:index:Policy` component resource.
//!
//! Declares an IAM policy. The provider appends `name_suffix` (or a hash of
//! the statement names) to `name` to build the policy's actual name.
//!
//! ```
//! use awsiam_core::mock::MockContext;
//! use awsiam_resources::policy::{Policy, PolicyArgs};
//!
//! let ctx = MockContext::new();
//! let policy = Policy::new(
//!     &ctx,
//!     "readers",
//!     Some(PolicyArgs::new().name("readers").description("Read-only access")),
//!     [],
//! )
//! .unwrap();
//!
//! assert_eq!(policy.name(), "readers");
//! ```

use crate::document::{DocumentError, PolicyDocument};
use awsiam_core::context::{Context, PropertyMap, ResourceArgs, ResourceState};
use awsiam_core::input::{ElementType, Input};
use awsiam_core::options::ResourceOption;
use awsiam_core::output::{Output, OutputError};
use awsiam_core::registry::TypeRegistry;
use awsiam_core::resource::{
    ComponentResource, ResourceError, register_component, resource_output,
};
use awsiam_core::urn::Urn;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Type token of the policy component.
pub const POLICY_TYPE: &str = "aws-iam:index:Policy";

/// Resolved arguments of a policy, in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyProperties {
    /// Description of Policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of Role or Policy.
    pub name: String,
    /// Optional suffix for Policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_suffix: Option<String>,
    /// Policy statements for access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_statements: Option<String>,
}

/// The set of arguments for constructing a [`Policy`].
///
/// Every field accepts plain values or deferred [`Output`]s.
#[derive(Debug, Clone, Default)]
pub struct PolicyArgs {
    /// Description of Policy.
    pub description: Option<Output<String>>,
    /// Name of Role or Policy. Required.
    pub name: Option<Output<String>>,
    /// Optional suffix for Policy.
    pub name_suffix: Option<Output<String>>,
    /// Policy statements for access, as a serialised policy document.
    pub policy_statements: Option<Output<String>>,
}

impl PolicyArgs {
    /// Creates an empty argument record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Input<Element = String>) -> Self {
        self.description = Some(description.to_output());
        self
    }

    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Input<Element = String>) -> Self {
        self.name = Some(name.to_output());
        self
    }

    /// Sets the name suffix.
    #[must_use]
    pub fn name_suffix(mut self, name_suffix: impl Input<Element = String>) -> Self {
        self.name_suffix = Some(name_suffix.to_output());
        self
    }

    /// Sets the policy statements.
    ///
    /// The string is passed through as given; it is not checked for valid
    /// policy syntax.
    #[must_use]
    pub fn policy_statements(mut self, statements: impl Input<Element = String>) -> Self {
        self.policy_statements = Some(statements.to_output());
        self
    }

    /// Sets the policy statements from a document.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] if the document cannot be serialised.
    pub fn policy_document(self, document: &PolicyDocument) -> Result<Self, DocumentError> {
        Ok(self.policy_statements(document.to_json()?))
    }

    /// Checks that an argument record was given and that it has a name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingArguments`] for `None` and
    /// [`ResourceError::MissingRequiredField`] when `name` is absent.
    pub fn validate(args: Option<Self>) -> Result<Self, ResourceError> {
        let args = args.ok_or(ResourceError::MissingArguments)?;
        if args.name.is_none() {
            return Err(ResourceError::MissingRequiredField("Name"));
        }
        Ok(args)
    }

    /// Returns the JSON schema of the wire form.
    #[must_use]
    pub fn schema() -> Schema {
        schema_for!(PolicyProperties)
    }
}

impl ResourceArgs for PolicyArgs {
    fn element_type(&self) -> ElementType {
        ElementType::of::<PolicyProperties>()
    }

    fn to_property_map(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        properties.insert_optional("description", self.description.as_ref());
        properties.insert_optional("name", self.name.as_ref());
        properties.insert_optional("name_suffix", self.name_suffix.as_ref());
        properties.insert_optional("policy_statements", self.policy_statements.as_ref());
        properties
    }
}

impl Input for PolicyArgs {
    type Element = PolicyProperties;

    fn to_output(&self) -> Output<PolicyProperties> {
        self.to_property_map().to_output().apply(|properties| {
            serde_json::from_value(serde_json::Value::Object(properties))
                .map_err(|err| OutputError::Marshal(err.to_string()))
        })
    }
}

/// Handle to a declared IAM policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    state: ResourceState,
}

impl Policy {
    /// Registers a new policy with the given unique name, arguments, and options.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingArguments`] or
    /// [`ResourceError::MissingRequiredField`] before contacting `ctx`, or
    /// the context's own error unchanged.
    pub fn new(
        ctx: &dyn Context,
        name: &str,
        args: Option<PolicyArgs>,
        options: impl IntoIterator<Item = ResourceOption>,
    ) -> Result<Self, ResourceError> {
        register_component(ctx, name, args, options)
    }

    /// Returns the instance name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.state.resource().name()
    }

    /// Returns the policy's URN.
    #[must_use]
    pub fn urn(&self) -> Output<Urn> {
        self.state.urn()
    }
}

impl ComponentResource for Policy {
    const TYPE_TOKEN: &'static str = POLICY_TYPE;

    type Args = PolicyArgs;

    fn validate(args: Option<PolicyArgs>) -> Result<PolicyArgs, ResourceError> {
        PolicyArgs::validate(args)
    }

    fn from_state(state: ResourceState) -> Self {
        Self { state }
    }

    fn state(&self) -> &ResourceState {
        &self.state
    }
}

impl Input for Policy {
    type Element = Policy;

    fn to_output(&self) -> PolicyOutput {
        resource_output(self)
    }
}

/// Anything that resolves to a [`Policy`].
pub type PolicyInput = Arc<dyn Input<Element = Policy>>;

/// An ordered collection of policy inputs.
pub type PolicyArray = Vec<PolicyInput>;

/// A string-keyed collection of policy inputs.
pub type PolicyMap = HashMap<String, PolicyInput>;

/// A deferred [`Policy`].
pub type PolicyOutput = Output<Policy>;

/// A deferred sequence of policies.
pub type PolicyArrayOutput = Output<Vec<Policy>>;

/// A deferred string-keyed mapping of policies.
pub type PolicyMapOutput = Output<HashMap<String, Policy>>;

/// Registers the policy adapter types with `registry`.
pub fn register_policy_types(registry: &mut TypeRegistry) {
    registry.register_input_type::<Policy>();
    registry.register_input_type::<PolicyArray>();
    registry.register_input_type::<PolicyMap>();
    registry.register_output_type::<Policy>();
    registry.register_output_type::<Vec<Policy>>();
    registry.register_output_type::<HashMap<String, Policy>>();
}
