//! Resource options.
//!
//! Options tune how the engine manages a resource: parenting, explicit
//! dependencies, provider selection, protection. Bindings never inspect
//! them; they fold the caller's options into [`ResourceOptions`] and hand
//! them to the [`Context`](crate::context::Context).

use crate::urn::{ResourceRef, Urn};
use indexmap::IndexMap;

/// A single option passed when declaring a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceOption {
    /// Declares the resource as a child of `parent`.
    Parent(ResourceRef),
    /// Adds explicit dependencies. Repeated options accumulate.
    DependsOn(Vec<ResourceRef>),
    /// Selects the provider used for the provider's package.
    Provider(ResourceRef),
    /// Selects several providers at once. Repeated options accumulate.
    Providers(Vec<ResourceRef>),
    /// Prevents deletion of the resource.
    Protect(bool),
    /// Property names whose changes the engine should ignore. Repeated options accumulate.
    IgnoreChanges(Vec<String>),
    /// Previous URNs of this resource. Repeated options accumulate.
    Aliases(Vec<Urn>),
    /// Leaves the remote resource in place when it is removed from the graph.
    RetainOnDelete(bool),
    /// Replaces the resource by deleting it before creating its successor.
    DeleteBeforeReplace(bool),
    /// Pins the provider plugin version.
    Version(String),
    /// Overrides where the provider plugin is downloaded from.
    PluginDownloadUrl(String),
}

/// The folded set of options for one resource.
///
/// Built from an iterator of [`ResourceOption`]s: list-valued options
/// accumulate, scalar options keep the last value given.
///
/// ```
/// use awsiam_core::options::{ResourceOption, ResourceOptions};
/// use awsiam_core::urn::ResourceRef;
///
/// let options: ResourceOptions = [
///     ResourceOption::Protect(true),
///     ResourceOption::DependsOn(vec![ResourceRef::new("aws-iam:index:Role", "ci")]),
///     ResourceOption::Protect(false),
/// ]
/// .into_iter()
/// .collect();
///
/// assert!(!options.protect);
/// assert_eq!(options.depends_on.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceOptions {
    /// Parent resource.
    pub parent: Option<ResourceRef>,
    /// Explicit dependencies, without duplicates.
    pub depends_on: Vec<ResourceRef>,
    /// Providers keyed by the package they serve.
    pub providers: IndexMap<String, ResourceRef>,
    /// Whether the resource is protected from deletion.
    pub protect: bool,
    /// Ignored property names.
    pub ignore_changes: Vec<String>,
    /// Previous URNs.
    pub aliases: Vec<Urn>,
    /// Whether the remote resource outlives its declaration.
    pub retain_on_delete: bool,
    /// Whether replacement deletes first.
    pub delete_before_replace: bool,
    /// Provider plugin version.
    pub version: Option<String>,
    /// Provider plugin download URL.
    pub plugin_download_url: Option<String>,
}

impl ResourceOptions {
    /// Creates an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `option` into this set.
    pub fn apply(&mut self, option: ResourceOption) {
        match option {
            ResourceOption::Parent(parent) => self.parent = Some(parent),
            ResourceOption::DependsOn(resources) => {
                for resource in resources {
                    if !self.depends_on.contains(&resource) {
                        self.depends_on.push(resource);
                    }
                }
            }
            ResourceOption::Provider(provider) => self.insert_provider(provider),
            ResourceOption::Providers(providers) => {
                for provider in providers {
                    self.insert_provider(provider);
                }
            }
            ResourceOption::Protect(protect) => self.protect = protect,
            ResourceOption::IgnoreChanges(names) => self.ignore_changes.extend(names),
            ResourceOption::Aliases(aliases) => self.aliases.extend(aliases),
            ResourceOption::RetainOnDelete(retain) => self.retain_on_delete = retain,
            ResourceOption::DeleteBeforeReplace(first) => self.delete_before_replace = first,
            ResourceOption::Version(version) => self.version = Some(version),
            ResourceOption::PluginDownloadUrl(url) => self.plugin_download_url = Some(url),
        }
    }

    fn insert_provider(&mut self, provider: ResourceRef) {
        let package = provider
            .provider_package()
            .unwrap_or(provider.type_token())
            .to_string();
        self.providers.insert(package, provider);
    }
}

impl FromIterator<ResourceOption> for ResourceOptions {
    fn from_iter<I: IntoIterator<Item = ResourceOption>>(iter: I) -> Self {
        let mut options = Self::new();
        for option in iter {
            options.apply(option);
        }
        options
    }
}

impl Extend<ResourceOption> for ResourceOptions {
    fn extend<I: IntoIterator<Item = ResourceOption>>(&mut self, iter: I) {
        for option in iter {
            self.apply(option);
        }
    }
}
