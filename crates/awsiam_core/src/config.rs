//! Run configuration.
//!
//! [`RunInfo`] describes the deployment a program is running against: which
//! project and stack, and whether this is a preview. Engines populate it
//! from the environment they launch the program with.

use crate::urn::Urn;

const PROJECT_VAR: &str = "PULUMI_PROJECT";
const STACK_VAR: &str = "PULUMI_STACK";
const ORGANIZATION_VAR: &str = "PULUMI_ORGANIZATION";
const DRY_RUN_VAR: &str = "PULUMI_DRY_RUN";
const PARALLEL_VAR: &str = "PULUMI_PARALLEL";

/// Errors loading a [`RunInfo`] from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set to something unparsable.
    #[error("invalid value '{value}' for environment variable {var}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Information about the current deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInfo {
    /// Project name.
    pub project: String,
    /// Stack name.
    pub stack: String,
    /// Organization owning the stack, if known.
    pub organization: Option<String>,
    /// `true` during a preview, when no changes are applied.
    pub dry_run: bool,
    /// Maximum number of resource operations the engine runs concurrently.
    pub parallel: usize,
}

impl RunInfo {
    /// Creates run information for `project` and `stack` with default settings.
    pub fn new(project: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            stack: stack.into(),
            organization: None,
            dry_run: false,
            parallel: 1,
        }
    }

    /// Sets the organization.
    #[must_use]
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Marks this run as a preview.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets the engine parallelism.
    #[must_use]
    pub fn with_parallel(mut self, parallel: usize) -> Self {
        self.parallel = parallel;
        self
    }

    /// Loads run information from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if `PULUMI_PROJECT` or `PULUMI_STACK`
    /// is unset, and [`ConfigError::Invalid`] if an optional variable cannot
    /// be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads run information through `lookup`, which maps variable names to values.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project = lookup(PROJECT_VAR).ok_or(ConfigError::Missing(PROJECT_VAR))?;
        let stack = lookup(STACK_VAR).ok_or(ConfigError::Missing(STACK_VAR))?;

        let mut info = Self::new(project, stack);
        info.organization = lookup(ORGANIZATION_VAR).filter(|org| !org.is_empty());

        if let Some(value) = lookup(DRY_RUN_VAR) {
            info.dry_run = parse_bool(DRY_RUN_VAR, value)?;
        }

        if let Some(value) = lookup(PARALLEL_VAR) {
            info.parallel = match value.trim().parse::<usize>() {
                Ok(parallel) if parallel > 0 => parallel,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: PARALLEL_VAR,
                        value,
                    });
                }
            };
        }

        Ok(info)
    }

    /// Builds the URN of a top-level resource in this deployment.
    #[must_use]
    pub fn urn(&self, type_token: &str, name: &str) -> Urn {
        Urn::new(&self.stack, &self.project, type_token, name)
    }

    /// Builds the URN of a resource parented to a resource of type `parent_type`.
    #[must_use]
    pub fn child_urn(&self, parent_type: &str, type_token: &str, name: &str) -> Urn {
        let qualified = format!("{parent_type}${type_token}");
        Urn::new(&self.stack, &self.project, &qualified, name)
    }
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        _ => Err(ConfigError::Invalid { var, value }),
    }
}
