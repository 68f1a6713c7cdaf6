//! Resource identity.

use serde::{Deserialize, Serialize};

const URN_PREFIX: &str = "urn:pulumi:";
const PROVIDER_PREFIX: &str = "pulumi:providers:";

/// Uniform resource name of a registered resource.
///
/// Format: `urn:pulumi:{stack}::{project}::{qualified type}::{name}`, where
/// the qualified type is the resource's type token, prefixed with its
/// parent's type and a `$` for child resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Urn(String);

impl Urn {
    /// Builds a URN from its parts.
    #[must_use]
    pub fn new(stack: &str, project: &str, qualified_type: &str, name: &str) -> Self {
        Self(format!(
            "{URN_PREFIX}{stack}::{project}::{qualified_type}::{name}"
        ))
    }

    /// Returns the URN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the resource's own type token, without any parent qualification.
    #[must_use]
    pub fn type_token(&self) -> Option<&str> {
        let qualified = self.parts()?.2;
        Some(qualified.rsplit('$').next().unwrap_or(qualified))
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.parts().map(|(_, _, _, name)| name)
    }

    fn parts(&self) -> Option<(&str, &str, &str, &str)> {
        let rest = self.0.strip_prefix(URN_PREFIX)?;
        let mut parts = rest.splitn(4, "::");
        Some((parts.next()?, parts.next()?, parts.next()?, parts.next()?))
    }
}

impl core::fmt::Display for Urn {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Urn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reference to a declared resource, known as soon as it is registered.
///
/// Outputs carry these to track which resources they depend on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceRef {
    type_token: String,
    name: String,
}

impl ResourceRef {
    /// Creates a reference to the resource `name` of type `type_token`.
    pub fn new(type_token: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_token: type_token.into(),
            name: name.into(),
        }
    }

    /// Returns the resource's type token.
    #[must_use]
    pub fn type_token(&self) -> &str {
        &self.type_token
    }

    /// Returns the resource's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the package this provider serves, if this is a provider resource.
    ///
    /// `pulumi:providers:aws` serves the `aws` package.
    #[must_use]
    pub fn provider_package(&self) -> Option<&str> {
        self.type_token.strip_prefix(PROVIDER_PREFIX)
    }
}

impl core::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}::{}", self.type_token, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urn_format() {
        let urn = Urn::new("dev", "infra", "aws-iam:index:Policy", "readers");
        assert_eq!(
            urn.as_str(),
            "urn:pulumi:dev::infra::aws-iam:index:Policy::readers"
        );
        assert_eq!(urn.type_token(), Some("aws-iam:index:Policy"));
        assert_eq!(urn.name(), Some("readers"));
    }

    #[test]
    fn child_urn_strips_parent_type() {
        let urn = Urn::new(
            "dev",
            "infra",
            "aws-iam:index:Role$aws-iam:index:Policy",
            "readers",
        );
        assert_eq!(urn.type_token(), Some("aws-iam:index:Policy"));
    }

    #[test]
    fn malformed_urn_has_no_parts() {
        let urn: Urn = serde_json::from_str("\"not-a-urn\"").unwrap();
        assert_eq!(urn.name(), None);
        assert_eq!(urn.type_token(), None);
    }

    #[test]
    fn provider_package() {
        assert_eq!(
            ResourceRef::new("pulumi:providers:aws", "east").provider_package(),
            Some("aws")
        );
        assert_eq!(
            ResourceRef::new("aws-iam:index:Policy", "p").provider_package(),
            None
        );
    }
}
