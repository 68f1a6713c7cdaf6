//! IAM policy documents.
//!
//! Builds the JSON the `policy_statements` argument carries. A document is
//! a list of [`PolicyStatement`]s, each allowing or denying `actions` on
//! `resources`. ARNs and actions may be wildcarded.
//!
//! ```
//! use awsiam_resources::document::{Effect, PolicyDocument, PolicyStatement};
//!
//! let document = PolicyDocument::new()
//!     .with_statement(
//!         PolicyStatement::new(["s3:GetObject"])
//!             .with_sid("ReadAssets")
//!             .with_resources(["arn:aws:s3:::assets/*"]),
//!     )
//!     .with_statement(PolicyStatement::new(["s3:DeleteObject"]).with_effect(Effect::Deny));
//!
//! let json = document.to_json().unwrap();
//! assert!(json.starts_with(r#"{"Version":"2012-10-17","Statement":[{"Sid":"ReadAssets""#));
//! ```
//!
//! IAM limits policy size (6,144 or 10,240 characters depending on where the
//! policy is attached). Documents are not checked against that limit here;
//! the provider reports it.

use blake2::digest::consts::U8;
use blake2::{Blake2b, Digest};
use serde::Serialize;

// ─────────────────────────────────────────────────────────────────────────────
// Version and hashing
// ─────────────────────────────────────────────────────────────────────────────

/// Policy language version written into every document.
pub const POLICY_VERSION: &str = "2012-10-17";

type Blake2b64 = Blake2b<U8>;

/// Returns the 8-byte BLAKE2b digest of `data` as lowercase hex.
///
/// Used to derive statement names and policy name suffixes.
#[must_use]
pub fn short_hash(data: &str) -> String {
    hex::encode(Blake2b64::digest(data.as_bytes()))
}

// ─────────────────────────────────────────────────────────────────────────────
// DocumentError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors building a policy document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// A statement's conditions are not valid JSON.
    #[error("invalid condition JSON in statement '{statement}': {source}")]
    InvalidCondition {
        /// Name of the offending statement.
        statement: String,
        /// The parse error.
        source: serde_json::Error,
    },

    /// The document could not be serialised.
    #[error("failed to serialize policy document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Whether a statement grants or denies access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Effect {
    /// Grants the actions.
    #[default]
    Allow,
    /// Denies the actions, overriding any grant.
    Deny,
}

// ─────────────────────────────────────────────────────────────────────────────
// PolicyStatement
// ─────────────────────────────────────────────────────────────────────────────

/// One statement of a policy document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyStatement {
    /// Statement identifier. Derived from the actions and resources when absent.
    pub sid: Option<String>,
    /// Allow or deny.
    pub effect: Effect,
    /// Actions, e.g. `s3:GetObject`.
    pub actions: Vec<String>,
    /// Resource ARNs. Defaults to `*`.
    pub resources: Vec<String>,
    /// Condition block as a JSON string.
    pub conditions: Option<String>,
}

#[derive(Serialize)]
struct StatementJson<'a> {
    #[serde(rename = "Sid")]
    sid: String,
    #[serde(rename = "Effect")]
    effect: Effect,
    #[serde(rename = "Action")]
    actions: &'a [String],
    #[serde(rename = "Resource")]
    resources: &'a [String],
    #[serde(rename = "Condition", skip_serializing_if = "Option::is_none")]
    condition: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct DocumentJson<'a> {
    #[serde(rename = "Version")]
    version: &'static str,
    #[serde(rename = "Statement")]
    statements: Vec<StatementJson<'a>>,
}

impl PolicyStatement {
    /// Creates an `Allow` statement for `actions` on all resources.
    pub fn new<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sid: None,
            effect: Effect::Allow,
            actions: actions.into_iter().map(Into::into).collect(),
            resources: vec!["*".to_string()],
            conditions: None,
        }
    }

    /// Sets the statement identifier.
    #[must_use]
    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    /// Sets the effect.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    /// Replaces the resource ARNs.
    #[must_use]
    pub fn with_resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = resources.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the condition block, given as a JSON object string.
    #[must_use]
    pub fn with_conditions(mut self, conditions: impl Into<String>) -> Self {
        self.conditions = Some(conditions.into());
        self
    }

    /// Returns the statement's name: its sid, or a hash of its actions and resources.
    #[must_use]
    pub fn name(&self) -> String {
        match self.sid.as_deref() {
            Some(sid) if !sid.is_empty() => sid.to_string(),
            _ => {
                let mut joined = self.actions.concat();
                joined.push_str(&self.resources.concat());
                short_hash(&joined)
            }
        }
    }

    fn to_json(&self) -> Result<StatementJson<'_>, DocumentError> {
        let sid = self.name();
        let condition = match &self.conditions {
            Some(raw) => Some(serde_json::from_str::<serde_json::Value>(raw).map_err(|source| {
                DocumentError::InvalidCondition {
                    statement: sid.clone(),
                    source,
                }
            })?),
            None => None,
        };

        Ok(StatementJson {
            sid,
            effect: self.effect,
            actions: &self.actions,
            resources: &self.resources,
            condition,
        })
    }

    /// Returns the statement as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidCondition`] if the conditions are not valid JSON.
    pub fn to_value(&self) -> Result<serde_json::Value, DocumentError> {
        Ok(serde_json::to_value(self.to_json()?)?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PolicyDocument
// ─────────────────────────────────────────────────────────────────────────────

/// A versioned list of statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyDocument {
    /// Statements in document order.
    pub statements: Vec<PolicyStatement>,
}

impl PolicyDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a statement.
    #[must_use]
    pub fn with_statement(mut self, statement: PolicyStatement) -> Self {
        self.statements.push(statement);
        self
    }

    /// Returns the name suffix the provider derives when none is given:
    /// a hash of all statement names.
    #[must_use]
    pub fn default_name_suffix(&self) -> String {
        let names: String = self.statements.iter().map(PolicyStatement::name).collect();
        short_hash(&names)
    }

    /// Returns the document as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidCondition`] if any statement's
    /// conditions are not valid JSON.
    pub fn to_value(&self) -> Result<serde_json::Value, DocumentError> {
        Ok(serde_json::to_value(self.to_document_json()?)?)
    }

    /// Returns the document as a compact JSON string.
    ///
    /// # Errors
    ///
    /// See [`to_value`](Self::to_value).
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(&self.to_document_json()?)?)
    }

    fn to_document_json(&self) -> Result<DocumentJson<'_>, DocumentError> {
        let statements = self
            .statements
            .iter()
            .map(PolicyStatement::to_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DocumentJson {
            version: POLICY_VERSION,
            statements,
        })
    }
}

impl FromIterator<PolicyStatement> for PolicyDocument {
    fn from_iter<I: IntoIterator<Item = PolicyStatement>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}
