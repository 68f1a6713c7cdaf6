//! The registration seam between bindings and the orchestration engine.
//!
//! Bindings never talk to the engine directly. They validate their
//! arguments, then call
//! [`Context::register_remote_component_resource`] exactly once and wrap the
//! returned [`ResourceState`] in a typed handle. Everything past that call
//! (planning, diffing, the provider protocol) belongs to the engine.

use crate::config::RunInfo;
use crate::input::{ElementType, Input};
use crate::options::ResourceOptions;
use crate::output::{Output, OutputError, Value};
use crate::urn::{ResourceRef, Urn};
use downcast_rs::{Downcast, impl_downcast};
use indexmap::IndexMap;
use serde::Serialize;

/// Errors reported by a [`Context`] when it refuses a registration.
///
/// Bindings return these to callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    /// A resource with the same URN is already part of the graph.
    #[error("duplicate resource URN '{0}'")]
    DuplicateUrn(Urn),

    /// The engine does not recognise the resource type.
    #[error("unknown resource type '{0}'")]
    InvalidTypeToken(String),

    /// The engine rejected the registration for another reason.
    #[error("resource registration rejected: {0}")]
    Rejected(String),
}

/// An argument record for a resource.
///
/// Implemented by each binding's `*Args` type. Engines read the record
/// through [`to_property_map`](Self::to_property_map); tests and
/// binding-aware engines can recover the concrete record with
/// [`downcast_ref`](Downcast).
pub trait ResourceArgs: Downcast + Send + Sync + core::fmt::Debug {
    /// Returns the type of the plain record these arguments resolve to.
    fn element_type(&self) -> ElementType;

    /// Marshals the present fields into a property bag keyed by wire name.
    fn to_property_map(&self) -> PropertyMap;
}

impl_downcast!(ResourceArgs);

/// Resource properties keyed by wire name, in declaration order.
///
/// Every property is a deferred JSON value. Absent optional fields are left
/// out entirely rather than stored as `null`.
#[derive(Debug, Clone, Default)]
pub struct PropertyMap {
    properties: IndexMap<&'static str, Output<serde_json::Value>>,
}

impl PropertyMap {
    /// Creates an empty property map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` under the wire name `key`, replacing any previous value.
    pub fn insert<T>(&mut self, key: &'static str, value: &Output<T>)
    where
        T: Value + Serialize,
    {
        let marshalled = value.apply(|value| {
            serde_json::to_value(value).map_err(|err| OutputError::Marshal(err.to_string()))
        });
        self.properties.insert(key, marshalled);
    }

    /// Adds `value` under `key` if it is present.
    pub fn insert_optional<T>(&mut self, key: &'static str, value: Option<&Output<T>>)
    where
        T: Value + Serialize,
    {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Returns the property stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Output<serde_json::Value>> {
        self.properties.get(key)
    }

    /// Returns the wire names present, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.keys().copied()
    }

    /// Returns the number of properties present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if no properties are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns the resources any property depends on.
    #[must_use]
    pub fn dependencies(&self) -> Vec<ResourceRef> {
        let mut dependencies: Vec<ResourceRef> = Vec::new();
        for dep in self.properties.values().flat_map(Output::dependencies) {
            if !dependencies.contains(dep) {
                dependencies.push(dep.clone());
            }
        }
        dependencies
    }
}

impl Input for PropertyMap {
    type Element = serde_json::Map<String, serde_json::Value>;

    fn to_output(&self) -> Output<Self::Element> {
        let keys: Vec<&'static str> = self.keys().collect();
        Output::all(self.properties.values().cloned()).map(move |values| {
            keys.into_iter()
                .map(str::to_string)
                .zip(values)
                .collect()
        })
    }
}

/// What the engine hands back for a registered resource.
#[derive(Debug, Clone)]
pub struct ResourceState {
    resource: ResourceRef,
    urn: Output<Urn>,
}

impl ResourceState {
    /// Creates resource state for `resource` whose URN resolves through `urn`.
    #[must_use]
    pub fn new(resource: ResourceRef, urn: Output<Urn>) -> Self {
        Self { resource, urn }
    }

    /// Returns the reference other resources use to depend on this one.
    #[must_use]
    pub fn resource(&self) -> &ResourceRef {
        &self.resource
    }

    /// Returns the resource's URN.
    ///
    /// The returned output depends on this resource.
    #[must_use]
    pub fn urn(&self) -> Output<Urn> {
        self.urn.clone().with_dependency(self.resource.clone())
    }
}

impl PartialEq for ResourceState {
    fn eq(&self, other: &Self) -> bool {
        self.resource == other.resource
    }
}

impl Eq for ResourceState {}

/// The orchestration engine, as seen by a binding.
///
/// Implementations own the dependency graph. They enforce name uniqueness,
/// resolve the returned state asynchronously, and decide what the options
/// mean.
pub trait Context: Send + Sync {
    /// Returns information about the current deployment.
    fn run_info(&self) -> &RunInfo;

    /// Declares a remote component resource.
    ///
    /// # Arguments
    ///
    /// * `type_token` - Namespaced resource type, e.g. `aws-iam:index:Policy`
    /// * `name` - Instance name, unique within the graph
    /// * `args` - Validated argument record
    /// * `options` - Folded resource options
    ///
    /// # Errors
    ///
    /// Returns a [`RegisterError`] if the engine refuses the declaration.
    fn register_remote_component_resource(
        &self,
        type_token: &str,
        name: &str,
        args: &dyn ResourceArgs,
        options: ResourceOptions,
    ) -> Result<ResourceState, RegisterError>;
}
