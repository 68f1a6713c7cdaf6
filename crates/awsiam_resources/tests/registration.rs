//! Registration tests for the `aws-iam` bindings.
//!
//! These tests run the constructors against `MockContext` and check what the
//! engine sees: how often it is called, with which type token, name,
//! arguments and options, and how its errors reach the caller.

use awsiam_core::context::RegisterError;
use awsiam_core::input::{ElementType, Input};
use awsiam_core::mock::MockContext;
use awsiam_core::options::ResourceOption;
use awsiam_core::output::Output;
use awsiam_core::resource::{ComponentResource, ResourceError};
use awsiam_core::urn::Urn;
use awsiam_resources::document::{PolicyDocument, PolicyStatement};
use awsiam_resources::policy::{POLICY_TYPE, Policy, PolicyArgs, PolicyProperties};
use awsiam_resources::role::{ROLE_TYPE, Role, RoleArgs};
use serde_json::json;

#[test]
fn missing_arguments_never_registers() {
    let ctx = MockContext::new();

    let err = Policy::new(&ctx, "p", None, []).unwrap_err();

    assert!(matches!(err, ResourceError::MissingArguments));
    assert_eq!(err.to_string(), "missing one or more required arguments");
    assert_eq!(ctx.attempt_count(), 0);
}

#[test]
fn missing_name_never_registers() {
    let ctx = MockContext::new();
    let args = PolicyArgs::new()
        .description("x")
        .policy_statements("{}");

    let err = Policy::new(&ctx, "p", Some(args), []).unwrap_err();

    assert!(matches!(err, ResourceError::MissingRequiredField("Name")));
    assert_eq!(ctx.attempt_count(), 0);
}

#[tokio::test]
async fn registers_once_with_type_token_and_values() {
    let ctx = MockContext::new();
    let args = PolicyArgs::new().name("readers").description("r/o");

    let policy = Policy::new(&ctx, "p1", Some(args), []).unwrap();

    let registrations = ctx.registrations();
    assert_eq!(registrations.len(), 1);

    let registration = &registrations[0];
    assert_eq!(registration.type_token, "aws-iam:index:Policy");
    assert_eq!(registration.name, "p1");
    assert_eq!(
        registration.element_type,
        ElementType::of::<PolicyProperties>()
    );
    assert_eq!(
        registration.properties.keys().collect::<Vec<_>>(),
        vec!["description", "name"]
    );

    let values = registration.properties.to_output().await.unwrap();
    assert_eq!(
        serde_json::Value::Object(values),
        json!({"description": "r/o", "name": "readers"})
    );

    assert_eq!(policy.name(), "p1");
    assert_eq!(
        policy.urn().await.unwrap(),
        Urn::new("test", "project", POLICY_TYPE, "p1")
    );
}

#[tokio::test]
async fn deferred_arguments_are_forwarded_unresolved() {
    let ctx = MockContext::new();
    let (name, resolver) = Output::<String>::pending();

    Policy::new(&ctx, "p", Some(PolicyArgs::new().name(name)), []).unwrap();

    let registration = ctx.registrations().remove(0);
    let property = registration.properties.get("name").unwrap().clone();
    assert!(property.peek().is_none());

    resolver.resolve("late".into());
    assert_eq!(property.await.unwrap(), json!("late"));
}

#[test]
fn context_errors_pass_through_verbatim() {
    let ctx = MockContext::new();
    let rejection = RegisterError::Rejected("quota exceeded".into());
    ctx.fail_with(rejection.clone());

    let err = Policy::new(&ctx, "p", Some(PolicyArgs::new().name("n")), []).unwrap_err();

    assert_eq!(err.to_string(), rejection.to_string());
    assert!(matches!(err, ResourceError::Register(inner) if inner == rejection));
    assert_eq!(ctx.attempt_count(), 1);
    assert_eq!(ctx.registration_count(), 0);
}

#[test]
fn duplicate_names_surface_engine_error() {
    let ctx = MockContext::new();
    Policy::new(&ctx, "same", Some(PolicyArgs::new().name("a")), []).unwrap();

    let err = Policy::new(&ctx, "same", Some(PolicyArgs::new().name("b")), []).unwrap_err();

    let expected = Urn::new("test", "project", POLICY_TYPE, "same");
    assert!(matches!(
        err,
        ResourceError::Register(RegisterError::DuplicateUrn(urn)) if urn == expected
    ));
    assert_eq!(ctx.attempt_count(), 2);
    assert_eq!(ctx.registration_count(), 1);
}

#[test]
fn same_name_different_type_is_not_a_duplicate() {
    let ctx = MockContext::new();
    Policy::new(&ctx, "ci", Some(PolicyArgs::new().name("ci")), []).unwrap();
    Role::new(&ctx, "ci", Some(RoleArgs::new().name("ci")), []).unwrap();

    let tokens: Vec<_> = ctx
        .registrations()
        .into_iter()
        .map(|r| r.type_token)
        .collect();
    assert_eq!(tokens, vec![POLICY_TYPE, ROLE_TYPE]);
}

#[tokio::test]
async fn options_are_folded_and_forwarded() {
    let ctx = MockContext::new();
    let role = Role::new(&ctx, "deployer", Some(RoleArgs::new().name("deployer")), []).unwrap();
    let parent = role.state().resource().clone();

    let policy = Policy::new(
        &ctx,
        "deployer-inline",
        Some(PolicyArgs::new().name("deployer-inline")),
        [
            ResourceOption::Parent(parent.clone()),
            ResourceOption::Protect(true),
            ResourceOption::DependsOn(vec![parent.clone()]),
            ResourceOption::Version("1.2.0".into()),
        ],
    )
    .unwrap();

    let options = &ctx.registrations()[1].options;
    assert_eq!(options.parent.as_ref(), Some(&parent));
    assert!(options.protect);
    assert_eq!(options.depends_on, vec![parent]);
    assert_eq!(options.version.as_deref(), Some("1.2.0"));

    let urn = policy.urn().await.unwrap();
    assert_eq!(urn.type_token(), Some(POLICY_TYPE));
    assert_eq!(
        urn.as_str(),
        "urn:pulumi:test::project::aws-iam:index:Role$aws-iam:index:Policy::deployer-inline"
    );
}

#[tokio::test]
async fn document_round_trips_through_registration() {
    let ctx = MockContext::new();
    let document = PolicyDocument::new()
        .with_statement(PolicyStatement::new(["s3:GetObject"]).with_sid("Read"));
    let args = PolicyArgs::new()
        .name("reader")
        .name_suffix(document.default_name_suffix())
        .policy_document(&document)
        .unwrap();

    Policy::new(&ctx, "reader", Some(args), []).unwrap();

    let values = ctx.registrations()[0].properties.to_output().await.unwrap();
    let statements: serde_json::Value =
        serde_json::from_str(values["policy_statements"].as_str().unwrap()).unwrap();
    assert_eq!(statements, document.to_value().unwrap());
    assert_eq!(values["name_suffix"], json!(document.default_name_suffix()));
}

#[tokio::test]
async fn urn_output_depends_on_the_resource() {
    let ctx = MockContext::new();
    let role = Role::new(&ctx, "r", Some(RoleArgs::new().name("r")), []).unwrap();

    let urn = role.urn();
    assert_eq!(urn.dependencies(), &[role.state().resource().clone()]);

    let handle = role.to_output();
    assert_eq!(handle.dependencies(), urn.dependencies());
    assert_eq!(handle.await.unwrap(), role);
}

#[tokio::test]
async fn borrowed_names_are_passed_as_owned_strings() {
    let ctx = MockContext::new();
    let names: Vec<String> = (1..=2).map(|i| format!("team-{i}")).collect();

    for name in &names {
        let name: &str = name;
        Policy::new(&ctx, name, Some(PolicyArgs::new().name(name.to_string())), []).unwrap();
    }

    let registrations = ctx.registrations();
    assert_eq!(registrations.len(), 2);
    let second = registrations[1].properties.get("name").unwrap().clone();
    assert_eq!(second.await.unwrap(), json!("team-2"));
}
