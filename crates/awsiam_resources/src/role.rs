//! The `aws-iam:index:Role` component resource.

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

/// Type token of the role component.
pub const ROLE_TYPE: &str = "aws-iam:index:Role";

/// Resolved arguments of a role, in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoleProperties {
    /// Name of the role.
    pub name: String,
    /// Environment the role belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    /// Inline policy statements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_statements: Option<String>,
    /// Trust policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assume_role_policy: Option<String>,
    /// ARNs of managed policies to attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_policy_arns: Option<Vec<String>>,
    /// Maximum session duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_session_duration: Option<i64>,
    /// Treat `name` as a prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_is_prefix: Option<bool>,
}

/// The set of arguments for constructing a [`Role`].
#[derive(Debug, Clone, Default)]
pub struct RoleArgs {
    /// Name of the role. Required.
    pub name: Option<Output<String>>,
    /// Environment the role belongs to.
    pub env: Option<Output<String>>,
    /// Inline policy statements.
    pub policy_statements: Option<Output<String>>,
    /// Trust policy.
    pub assume_role_policy: Option<Output<String>>,
    /// ARNs of managed policies to attach.
    pub managed_policy_arns: Option<Output<Vec<String>>>,
    /// Maximum session duration in seconds.
    pub max_session_duration: Option<Output<i64>>,
    /// Treat `name` as a prefix.
    pub name_is_prefix: Option<Output<bool>>,
}

impl RoleArgs {
    /// Creates an empty argument record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Input<Element = String>) -> Self {
        self.name = Some(name.to_output());
        self
    }

    /// Sets the environment.
    #[must_use]
    pub fn env(mut self, env: impl Input<Element = String>) -> Self {
        self.env = Some(env.to_output());
        self
    }

    /// Sets the inline policy statements.
    #[must_use]
    pub fn policy_statements(mut self, statements: impl Input<Element = String>) -> Self {
        self.policy_statements = Some(statements.to_output());
        self
    }

    /// Sets the trust policy.
    #[must_use]
    pub fn assume_role_policy(mut self, policy: impl Input<Element = String>) -> Self {
        self.assume_role_policy = Some(policy.to_output());
        self
    }

    /// Sets the trust policy from a document.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] if the document cannot be serialised.
    pub fn assume_role_document(self, document: &PolicyDocument) -> Result<Self, DocumentError> {
        Ok(self.assume_role_policy(document.to_json()?))
    }

    /// Sets the managed policy ARNs.
    #[must_use]
    pub fn managed_policy_arns(mut self, arns: impl Input<Element = Vec<String>>) -> Self {
        self.managed_policy_arns = Some(arns.to_output());
        self
    }

    /// Sets the maximum session duration in seconds.
    #[must_use]
    pub fn max_session_duration(mut self, seconds: impl Input<Element = i64>) -> Self {
        self.max_session_duration = Some(seconds.to_output());
        self
    }

    /// Sets whether `name` is a prefix.
    #[must_use]
    pub fn name_is_prefix(mut self, prefix: impl Input<Element = bool>) -> Self {
        self.name_is_prefix = Some(prefix.to_output());
        self
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
        schema_for!(RoleProperties)
    }
}

impl ResourceArgs for RoleArgs {
    fn element_type(&self) -> ElementType {
        ElementType::of::<RoleProperties>()
    }

    fn to_property_map(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        properties.insert_optional("name", self.name.as_ref());
        properties.insert_optional("env", self.env.as_ref());
        properties.insert_optional("policy_statements", self.policy_statements.as_ref());
        properties.insert_optional("assume_role_policy", self.assume_role_policy.as_ref());
        properties.insert_optional("managed_policy_arns", self.managed_policy_arns.as_ref());
        properties.insert_optional("max_session_duration", self.max_session_duration.as_ref());
        properties.insert_optional("name_is_prefix", self.name_is_prefix.as_ref());
        properties
    }
}

impl Input for RoleArgs {
    type Element = RoleProperties;

    fn to_output(&self) -> Output<RoleProperties> {
        self.to_property_map().to_output().apply(|properties| {
            serde_json::from_value(serde_json::Value::Object(properties))
                .map_err(|err| OutputError::Marshal(err.to_string()))
        })
    }
}

/// Handle to a declared IAM role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    state: ResourceState,
}

impl Role {
    /// Registers a new role with the given unique name, arguments, and options.
    ///
    /// # Errors
    ///
    /// See [`Policy::new`](crate::policy::Policy::new).
    pub fn new(
        ctx: &dyn Context,
        name: &str,
        args: Option<RoleArgs>,
        options: impl IntoIterator<Item = ResourceOption>,
    ) -> Result<Self, ResourceError> {
        register_component(ctx, name, args, options)
    }

    /// Returns the instance name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.state.resource().name()
    }

    /// Returns the role's URN.
    #[must_use]
    pub fn urn(&self) -> Output<Urn> {
        self.state.urn()
    }
}

impl ComponentResource for Role {
    const TYPE_TOKEN: &'static str = ROLE_TYPE;

    type Args = RoleArgs;

    fn validate(args: Option<RoleArgs>) -> Result<RoleArgs, ResourceError> {
        RoleArgs::validate(args)
    }

    fn from_state(state: ResourceState) -> Self {
        Self { state }
    }

    fn state(&self) -> &ResourceState {
        &self.state
    }
}

impl Input for Role {
    type Element = Role;

    fn to_output(&self) -> RoleOutput {
        resource_output(self)
    }
}

/// Anything that resolves to a [`Role`].
pub type RoleInput = Arc<dyn Input<Element = Role>>;

/// An ordered collection of role inputs.
pub type RoleArray = Vec<RoleInput>;

/// A string-keyed collection of role inputs.
pub type RoleMap = HashMap<String, RoleInput>;

/// A deferred [`Role`].
pub type RoleOutput = Output<Role>;

/// A deferred sequence of roles.
pub type RoleArrayOutput = Output<Vec<Role>>;

/// A deferred string-keyed mapping of roles.
pub type RoleMapOutput = Output<HashMap<String, Role>>;

/// Registers the role adapter types with `registry`.
pub fn register_role_types(registry: &mut TypeRegistry) {
    registry.register_input_type::<Role>();
    registry.register_input_type::<RoleArray>();
    registry.register_input_type::<RoleMap>();
    registry.register_output_type::<Role>();
    registry.register_output_type::<Vec<Role>>();
    registry.register_output_type::<HashMap<String, Role>>();
}
