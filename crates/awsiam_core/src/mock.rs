//! An in-memory [`Context`] for tests.
//!
//! [`MockContext`] records every registration it receives, hands out URNs
//! derived from its [`RunInfo`], rejects duplicate URNs like a real engine,
//! and can be told to refuse registrations.
//!
//! Available with the `test-utils` feature.
//!
//! ```
//! use awsiam_core::mock::MockContext;
//!
//! let ctx = MockContext::new();
//! assert_eq!(ctx.registration_count(), 0);
//! ```

use crate::config::RunInfo;
use crate::context::{Context, PropertyMap, RegisterError, ResourceArgs, ResourceState};
use crate::input::ElementType;
use crate::options::ResourceOptions;
use crate::output::Output;
use crate::urn::{ResourceRef, Urn};
use core::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;

/// One registration seen by a [`MockContext`].
#[derive(Debug, Clone)]
pub struct Registration {
    /// Type token passed by the binding.
    pub type_token: String,
    /// Instance name passed by the binding.
    pub name: String,
    /// URN assigned to the resource.
    pub urn: Urn,
    /// Element type reported by the argument record.
    pub element_type: ElementType,
    /// Marshalled arguments.
    pub properties: PropertyMap,
    /// Folded options.
    pub options: ResourceOptions,
}

/// Records registrations instead of talking to an engine.
#[derive(Debug)]
pub struct MockContext {
    run_info: RunInfo,
    attempts: AtomicUsize,
    registrations: Mutex<Vec<Registration>>,
    failure: Mutex<Option<RegisterError>>,
}

impl Default for MockContext {
    fn default() -> Self {
        Self::new()
    }
}

impl MockContext {
    /// Creates a mock for project `project` on stack `test`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_run_info(RunInfo::new("project", "test"))
    }

    /// Creates a mock for the given deployment.
    #[must_use]
    pub fn with_run_info(run_info: RunInfo) -> Self {
        Self {
            run_info,
            attempts: AtomicUsize::new(0),
            registrations: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// Makes every following registration fail with `error`.
    pub fn fail_with(&self, error: RegisterError) {
        *self.failure.lock() = Some(error);
    }

    /// Lets registrations succeed again.
    pub fn clear_failure(&self) {
        *self.failure.lock() = None;
    }

    /// Returns a copy of all recorded registrations, oldest first.
    #[must_use]
    pub fn registrations(&self) -> Vec<Registration> {
        self.registrations.lock().clone()
    }

    /// Returns the number of successful registrations.
    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.registrations.lock().len()
    }

    /// Returns the number of registration calls received, including rejected ones.
    #[must_use]
    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Context for MockContext {
    fn run_info(&self) -> &RunInfo {
        &self.run_info
    }

    fn register_remote_component_resource(
        &self,
        type_token: &str,
        name: &str,
        args: &dyn ResourceArgs,
        options: ResourceOptions,
    ) -> Result<ResourceState, RegisterError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }

        let urn = match &options.parent {
            Some(parent) => self
                .run_info
                .child_urn(parent.type_token(), type_token, name),
            None => self.run_info.urn(type_token, name),
        };

        let mut registrations = self.registrations.lock();
        if registrations.iter().any(|r| r.urn == urn) {
            return Err(RegisterError::DuplicateUrn(urn));
        }

        registrations.push(Registration {
            type_token: type_token.to_string(),
            name: name.to_string(),
            urn: urn.clone(),
            element_type: args.element_type(),
            properties: args.to_property_map(),
            options,
        });

        Ok(ResourceState::new(
            ResourceRef::new(type_token, name),
            Output::resolved(urn),
        ))
    }
}
