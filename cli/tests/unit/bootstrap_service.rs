//! Tests for the bootstrap pipeline: version gating, ordering and error
//! propagation.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use plinth_cli::application::services::bootstrap::deploy_bootstrap_stack;
use plinth_cli::domain::{
    AccessMode, BootstrapError, BootstrapOptions, Environment, Parameters, Template,
};
use plinth_common::{Tag, UpgradeDecision};
use serde_json::json;

use crate::helpers::{
    ACCOUNT, CollaboratorError, FailAt, FakeCloud, REGION, RecordingReporter, STACK, concrete_env,
    template_with_output, template_with_resource, template_without_markers,
};

async fn run(
    cloud: &FakeCloud,
    template: Template,
    force: bool,
) -> anyhow::Result<plinth_cli::application::services::bootstrap::BootstrapOutcome> {
    let options = BootstrapOptions {
        force,
        ..BootstrapOptions::default()
    };
    deploy_bootstrap_stack(
        cloud,
        cloud,
        cloud,
        &RecordingReporter::default(),
        template,
        Parameters::new(),
        &concrete_env(),
        &options,
    )
    .await
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fresh_install_from_output_marker() {
    let cloud = FakeCloud::empty();
    let outcome = run(&cloud, template_with_output(json!("6")), false)
        .await
        .expect("fresh install succeeds");

    assert_eq!(outcome.decision, UpgradeDecision::InitialInstall { to: 6 });
    let requests = cloud.requests();
    assert_eq!(requests.len(), 1);
    let artifact = &requests[0].stack;
    assert_eq!(artifact.stack_name(), STACK);
    assert_eq!(
        plinth_cli::domain::extract_version(&artifact.template),
        6,
        "dispatched artifact carries the version 6 template"
    );
}

#[tokio::test]
async fn test_downgrade_rejected_without_force() {
    let cloud = FakeCloud::with_deployed(7);
    let err = run(&cloud, template_with_resource(json!(5)), false)
        .await
        .unwrap_err();

    let rejected = err
        .downcast_ref::<BootstrapError>()
        .expect("typed bootstrap error");
    assert_eq!(
        *rejected,
        BootstrapError::DowngradeRejected {
            stack_name: STACK.to_string(),
            deployed: 7,
            proposed: 5,
        }
    );
    assert_eq!(cloud.deploy_count(), 0, "dispatch must never be invoked");
    let msg = err.to_string();
    assert!(msg.contains("'7'") && msg.contains("'5'"), "got: {msg}");
    assert!(msg.contains("--force"), "got: {msg}");
}

#[tokio::test]
async fn test_downgrade_permitted_with_force() {
    let cloud = FakeCloud::with_deployed(7);
    let outcome = run(&cloud, template_with_resource(json!(5)), true)
        .await
        .expect("forced downgrade succeeds");

    assert_eq!(
        outcome.decision,
        UpgradeDecision::ForcedDowngrade { from: 7, to: 5 }
    );
    assert_eq!(cloud.deploy_count(), 1);
    assert!(cloud.requests()[0].force, "force is forwarded to the engine");
}

#[tokio::test]
async fn test_no_markers_over_version_zero_is_reapply() {
    let cloud = FakeCloud::with_deployed(0);
    let outcome = run(&cloud, template_without_markers(), false)
        .await
        .expect("re-apply succeeds");
    assert_eq!(outcome.decision, UpgradeDecision::Reapply { version: 0 });
    assert_eq!(cloud.deploy_count(), 1);
}

#[tokio::test]
async fn test_upgrade_over_older_stack() {
    let cloud = FakeCloud::with_deployed(3);
    let outcome = run(&cloud, template_with_output(json!(21)), false)
        .await
        .unwrap();
    assert_eq!(outcome.decision, UpgradeDecision::Upgrade { from: 3, to: 21 });
}

#[tokio::test]
async fn test_equal_version_is_permitted() {
    let cloud = FakeCloud::with_deployed(21);
    let outcome = run(&cloud, template_with_output(json!("21")), false)
        .await
        .unwrap();
    assert_eq!(outcome.decision, UpgradeDecision::Reapply { version: 21 });
}

// ── Ordering ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_pipeline_call_order() {
    let cloud = FakeCloud::empty();
    run(&cloud, template_with_output(json!(6)), false)
        .await
        .unwrap();
    assert_eq!(
        cloud.calls(),
        vec![
            format!("resolve:aws://{ACCOUNT}/{REGION}"),
            "session:ForWriting".to_string(),
            format!("lookup:{STACK}"),
            "session:ForWriting".to_string(),
            format!("deploy:{STACK}"),
        ]
    );
}

#[tokio::test]
async fn test_rejection_stops_after_lookup() {
    let cloud = FakeCloud::with_deployed(9);
    let _ = run(&cloud, template_with_output(json!(2)), false).await;
    assert_eq!(cloud.calls().last().map(String::as_str), Some("lookup:CDKToolkit"));
}

// ── Request contents ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_request_carries_options_parameters_and_resolved_env() {
    let cloud = FakeCloud::empty();
    let options = BootstrapOptions {
        stack_name: "TeamToolkit".to_string(),
        force: false,
        role_arn: Some("arn:aws:iam::123456789012:role/deployer".to_string()),
        tags: vec!["team=platform".parse::<Tag>().unwrap()],
        termination_protection: Some(true),
        execute: false,
    };
    let mut parameters = Parameters::new();
    parameters.insert("Qualifier".to_string(), Some("abc".to_string()));
    parameters.insert("TrustedAccounts".to_string(), None);

    let outcome = deploy_bootstrap_stack(
        &cloud,
        &cloud,
        &cloud,
        &RecordingReporter::default(),
        template_with_output(json!(6)),
        parameters.clone(),
        &Environment::unknown(),
        &options,
    )
    .await
    .unwrap();

    let request = cloud.requests().remove(0);
    assert_eq!(request.stack.stack_name(), "TeamToolkit");
    assert_eq!(request.parameters, parameters);
    assert_eq!(request.role_arn, options.role_arn);
    assert_eq!(request.tags, options.tags);
    assert!(!request.execute);
    assert!(request.stack.properties.termination_protection);
    assert_eq!(request.session.mode, AccessMode::ForWriting);
    assert_eq!(request.environment.account, ACCOUNT);
    assert_eq!(request.environment.region, REGION);
    assert_eq!(outcome.environment, request.environment);
    // The artifact keeps the logical environment, placeholders included.
    assert_eq!(
        request.stack.environment,
        "aws://unknown-account/unknown-region"
    );
}

#[tokio::test]
async fn test_termination_protection_defaults_off() {
    let cloud = FakeCloud::empty();
    run(&cloud, template_with_output(json!(6)), false)
        .await
        .unwrap();
    assert!(!cloud.requests()[0].stack.properties.termination_protection);
}

#[tokio::test]
async fn test_engine_result_returned_unmodified() {
    let cloud = FakeCloud::with_deployed(6).reporting_no_op();
    let outcome = run(&cloud, template_with_output(json!(6)), false)
        .await
        .unwrap();
    assert!(outcome.result.no_op);
    assert_eq!(outcome.result.stack_name, STACK);
    assert_eq!(outcome.result.outputs["BucketName"], "assets");
    assert_eq!(
        outcome.result.stack_arn.as_deref(),
        Some("arn:aws:cloudformation:eu-west-1:123456789012:stack/CDKToolkit/1")
    );
}

// ── Error propagation ────────────────────────────────────────────────────────

async fn failure_at(at: FailAt) -> (FakeCloud, anyhow::Error) {
    let cloud = FakeCloud::empty().failing_at(at);
    let err = run(&cloud, template_with_output(json!(6)), false)
        .await
        .unwrap_err();
    (cloud, err)
}

#[tokio::test]
async fn test_resolver_failure_propagates() {
    let (cloud, err) = failure_at(FailAt::Resolve).await;
    assert_eq!(
        err.downcast_ref::<CollaboratorError>(),
        Some(&CollaboratorError("resolve"))
    );
    assert_eq!(cloud.calls().len(), 1);
    assert_eq!(cloud.deploy_count(), 0);
}

#[tokio::test]
async fn test_session_failure_propagates() {
    let (cloud, err) = failure_at(FailAt::Session).await;
    assert_eq!(
        err.downcast_ref::<CollaboratorError>(),
        Some(&CollaboratorError("session"))
    );
    assert!(!cloud.calls().iter().any(|c| c.starts_with("lookup")));
}

#[tokio::test]
async fn test_lookup_failure_propagates_with_stack_context() {
    let (cloud, err) = failure_at(FailAt::Lookup).await;
    assert_eq!(
        err.downcast_ref::<CollaboratorError>(),
        Some(&CollaboratorError("lookup"))
    );
    assert!(format!("{err:#}").contains(STACK), "got: {err:#}");
    assert_eq!(cloud.deploy_count(), 0);
}

#[tokio::test]
async fn test_engine_failure_propagates() {
    let (cloud, err) = failure_at(FailAt::Deploy).await;
    assert_eq!(
        err.downcast_ref::<CollaboratorError>(),
        Some(&CollaboratorError("deploy"))
    );
    assert_eq!(cloud.calls().iter().filter(|c| c.starts_with("deploy")).count(), 1, "no retry");
}

// ── Progress reporting ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_forced_downgrade_emits_warning() {
    let cloud = FakeCloud::with_deployed(7);
    let reporter = RecordingReporter::default();
    let options = BootstrapOptions {
        force: true,
        ..BootstrapOptions::default()
    };
    deploy_bootstrap_stack(
        &cloud,
        &cloud,
        &cloud,
        &reporter,
        template_with_output(json!(5)),
        Parameters::new(),
        &concrete_env(),
        &options,
    )
    .await
    .unwrap();
    let warnings = reporter.warnings.lock().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("from version 7 to 5"), "got: {}", warnings[0]);
}
