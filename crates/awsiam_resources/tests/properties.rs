//! Property tests for validation and registration.
//!
//! `proptest` does not support async test functions, so cases that need to
//! resolve outputs build a `tokio::runtime::Runtime` and `block_on` inside
//! the proptest closure.

use awsiam_core::input::Input;
use awsiam_core::mock::MockContext;
use awsiam_core::resource::ResourceError;
use awsiam_resources::document::{PolicyDocument, PolicyStatement};
use awsiam_resources::policy::{Policy, PolicyArgs, PolicyArray, PolicyInput};
use proptest::prelude::*;
use std::sync::Arc;

fn arb_optional_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-zA-Z0-9 _-]{0,24}")
}

fn args_from(
    name: Option<String>,
    description: Option<String>,
    suffix: Option<String>,
    statements: Option<String>,
) -> PolicyArgs {
    let mut args = PolicyArgs::new();
    if let Some(name) = name {
        args = args.name(name);
    }
    if let Some(description) = description {
        args = args.description(description);
    }
    if let Some(suffix) = suffix {
        args = args.name_suffix(suffix);
    }
    if let Some(statements) = statements {
        args = args.policy_statements(statements);
    }
    args
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Without a name, no combination of optional fields reaches the engine.
    #[test]
    fn prop_nameless_args_never_register(
        description in arb_optional_text(),
        suffix in arb_optional_text(),
        statements in arb_optional_text(),
    ) {
        let ctx = MockContext::new();
        let args = args_from(None, description, suffix, statements);

        let result = Policy::new(&ctx, "p", Some(args), []);

        prop_assert!(matches!(result, Err(ResourceError::MissingRequiredField("Name"))));
        prop_assert_eq!(ctx.attempt_count(), 0);
    }

    /// With a name, the engine sees exactly the values given, including
    /// policy statements that are not valid JSON.
    #[test]
    fn prop_named_args_register_unchanged(
        name in "[a-z][a-z0-9-]{0,16}",
        description in arb_optional_text(),
        suffix in arb_optional_text(),
        statements in arb_optional_text(),
    ) {
        let ctx = MockContext::new();
        let args = args_from(
            Some(name.clone()),
            description.clone(),
            suffix.clone(),
            statements.clone(),
        );

        let policy = Policy::new(&ctx, &name, Some(args), []);
        prop_assert!(policy.is_ok());
        prop_assert_eq!(ctx.attempt_count(), 1);
        prop_assert_eq!(ctx.registration_count(), 1);

        let registration = ctx.registrations().remove(0);
        prop_assert_eq!(registration.type_token.as_str(), "aws-iam:index:Policy");
        prop_assert_eq!(registration.name.as_str(), name.as_str());

        let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
        let values = rt.block_on(registration.properties.to_output().into_future()).expect("resolved");

        let text = |key: &str| values.get(key).and_then(|v| v.as_str()).map(str::to_string);
        prop_assert_eq!(text("name"), Some(name));
        prop_assert_eq!(text("description"), description);
        prop_assert_eq!(text("name_suffix"), suffix);
        prop_assert_eq!(text("policy_statements"), statements);
    }

    /// Indexing an array of handles resolves to the handle at that position,
    /// or to an out-of-range fault past the end.
    #[test]
    fn prop_index_matches_position(len in 1..6_usize, index in 0..8_usize) {
        let ctx = MockContext::new();
        let handles: Vec<Policy> = (0..len)
            .map(|i| {
                let name = format!("p{i}");
                Policy::new(&ctx, &name, Some(PolicyArgs::new().name(name.clone())), [])
                    .expect("registered")
            })
            .collect();
        let array: PolicyArray = handles
            .iter()
            .cloned()
            .map(|p| Arc::new(p) as PolicyInput)
            .collect();

        let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
        let selected = rt.block_on(array.to_output().index(index).into_future());

        match handles.get(index) {
            Some(expected) => prop_assert_eq!(selected.as_ref().ok(), Some(expected)),
            None => prop_assert!(selected.is_err()),
        }
    }

    /// Statement names are stable and independent of effect.
    #[test]
    fn prop_statement_name_ignores_effect(
        actions in prop::collection::vec("[a-z0-9]{1,8}:[A-Za-z*]{1,12}", 1..4),
    ) {
        let allow = PolicyStatement::new(actions.clone());
        let deny = PolicyStatement::new(actions)
            .with_effect(awsiam_resources::document::Effect::Deny);

        prop_assert_eq!(allow.name(), deny.name());
        prop_assert_eq!(allow.name().len(), 16);

        let document: PolicyDocument = [allow].into_iter().collect();
        prop_assert_eq!(document.default_name_suffix().len(), 16);
    }
}
