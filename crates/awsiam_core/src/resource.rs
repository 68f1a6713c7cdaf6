//! Component resource handles and their constructor.

use crate::context::{Context, RegisterError, ResourceArgs, ResourceState};
use crate::input::Input;
use crate::options::{ResourceOption, ResourceOptions};
use crate::output::Output;

/// Errors constructing a component resource.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// No argument record was supplied.
    #[error("missing one or more required arguments")]
    MissingArguments,

    /// A required field of the argument record is absent.
    #[error("invalid value for required argument '{0}'")]
    MissingRequiredField(&'static str),

    /// The context refused the registration.
    #[error(transparent)]
    Register(#[from] RegisterError),
}

/// A typed handle to a remote component resource.
///
/// Implemented by every binding's resource type. A handle is cheap to clone
/// and only references the engine-owned resource; dropping it does nothing
/// to the remote resource.
pub trait ComponentResource: Input<Element = Self> + Clone + core::fmt::Debug {
    /// Namespaced type identifier, e.g. `aws-iam:index:Policy`.
    const TYPE_TOKEN: &'static str;

    /// The argument record this resource is declared with.
    type Args: ResourceArgs;

    /// Checks the required fields of `args`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingArguments`] or
    /// [`ResourceError::MissingRequiredField`].
    fn validate(args: Option<Self::Args>) -> Result<Self::Args, ResourceError>;

    /// Wraps state returned by the engine.
    fn from_state(state: ResourceState) -> Self;

    /// Returns the engine state this handle wraps.
    fn state(&self) -> &ResourceState;
}

/// Validates `args` and registers a new `R` named `name` with `ctx`.
///
/// Validation happens before the context is touched. The context is called
/// exactly once on success, and its errors are returned as they are.
///
/// # Errors
///
/// Returns a validation error from [`ComponentResource::validate`], or
/// [`ResourceError::Register`] wrapping the context's error.
pub fn register_component<R: ComponentResource>(
    ctx: &dyn Context,
    name: &str,
    args: Option<R::Args>,
    options: impl IntoIterator<Item = ResourceOption>,
) -> Result<R, ResourceError> {
    let args = R::validate(args)?;
    let options: ResourceOptions = options.into_iter().collect();

    tracing::debug!(
        type_token = R::TYPE_TOKEN,
        name,
        "registering remote component resource"
    );

    let state = ctx
        .register_remote_component_resource(R::TYPE_TOKEN, name, &args, options)
        .inspect_err(|err| {
            tracing::warn!(
                type_token = R::TYPE_TOKEN,
                name,
                error = %err,
                "remote component resource registration failed"
            );
        })?;

    Ok(R::from_state(state))
}

/// Returns an already-resolved output holding `resource` that depends on it.
///
/// Bindings use this to implement [`Input`] for their handles.
#[must_use]
pub fn resource_output<R: ComponentResource>(resource: &R) -> Output<R> {
    Output::resolved(resource.clone()).with_dependency(resource.state().resource().clone())
}
