use clusterlint::checks::{
    self, Check, CheckError, CheckFilter, Diagnostic, DiagnosticFilter, Kind, ObjectRef, Registry,
    Selection, Severity,
};
use clusterlint::cluster::Objects;
use k8s_openapi::api::core::v1::{Pod, Secret};
use std::fs;
use std::path::Path;

fn load_objects() -> Objects {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cluster");
    let pods: Vec<Pod> =
        serde_json::from_str(&fs::read_to_string(dir.join("pods.json")).unwrap()).unwrap();
    let secrets: Vec<Secret> =
        serde_json::from_str(&fs::read_to_string(dir.join("secrets.json")).unwrap()).unwrap();
    Objects::new(pods, secrets)
}

fn run(selection: Selection, level: Option<Severity>) -> checks::RunOutcome {
    let registry = Registry::with_builtin().unwrap();
    let filter = CheckFilter::new(selection, &registry).unwrap();
    checks::run(&load_objects(), filter.checks(), &DiagnosticFilter::new(level))
}

fn summary(diagnostics: &[Diagnostic]) -> Vec<(String, Severity, String)> {
    diagnostics
        .iter()
        .map(|d| (d.check.clone(), d.severity, d.object.to_string()))
        .collect()
}

#[test]
fn test_full_run_over_fixture_cluster() {
    let outcome = run(Selection::new(), None);
    assert!(outcome.is_success());
    assert_eq!(
        summary(&outcome.diagnostics),
        vec![
            (
                "fully-qualified-image".to_string(),
                Severity::Warning,
                "default/web".to_string()
            ),
            (
                "fully-qualified-image".to_string(),
                Severity::Error,
                "default/broken".to_string()
            ),
            ("unused-secret".to_string(), Severity::Warning, "default/b".to_string()),
        ]
    );

    let web = &outcome.diagnostics[0];
    assert_eq!(web.kind, Kind::Pod);
    assert_eq!(web.owners.len(), 1);
    assert_eq!(web.owners[0].kind, "ReplicaSet");
    assert!(web.message.contains("docker.io/library/nginx:latest"));
}

#[test]
fn test_severity_level_keeps_only_that_severity() {
    let outcome = run(Selection::new(), Some(Severity::Error));
    assert_eq!(
        summary(&outcome.diagnostics),
        vec![(
            "fully-qualified-image".to_string(),
            Severity::Error,
            "default/broken".to_string()
        )]
    );
}

#[test]
fn test_excluding_a_check_by_name() {
    let outcome = run(Selection::new().ignore_check("fully-qualified-image"), None);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].kind, Kind::Secret);
    assert_eq!(outcome.diagnostics[0].object, ObjectRef::new("b", "default"));
}

#[test]
fn test_excluded_group_runs_nothing() {
    let outcome = run(Selection::new().group("basic").ignore_group("basic"), None);
    assert!(outcome.diagnostics.is_empty());
    assert!(outcome.is_success());
}

#[test]
fn test_json_output_round_trips() {
    let outcome = run(Selection::new(), None);
    let json = serde_json::to_string(&outcome.diagnostics).unwrap();
    let decoded: Vec<Diagnostic> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, outcome.diagnostics);
}

struct AlwaysFails;

impl Check for AlwaysFails {
    fn name(&self) -> &str {
        "always-fails"
    }

    fn groups(&self) -> &[&str] {
        &["experimental"]
    }

    fn description(&self) -> &str {
        "Reports that it cannot complete"
    }

    fn run(&self, _objects: &Objects) -> Result<Vec<Diagnostic>, CheckError> {
        Err(CheckError::Failed("cluster version not supported".to_string()))
    }
}

#[test]
fn test_failing_plugin_keeps_other_diagnostics() {
    let mut registry = Registry::with_builtin().unwrap();
    registry.register(AlwaysFails).unwrap();
    let filter = CheckFilter::new(Selection::new(), &registry).unwrap();

    let outcome = checks::run(&load_objects(), filter.checks(), &DiagnosticFilter::default());
    assert_eq!(outcome.diagnostics.len(), 3);
    let error = outcome.error.unwrap();
    assert_eq!(error.checks(), vec!["always-fails"]);
    assert!(error.to_string().contains("cluster version not supported"));
}

#[test]
fn test_two_pods_one_unused_opaque_secret() {
    let pods: Vec<Pod> = serde_json::from_value(serde_json::json!([
        {
            "metadata": { "name": "reader", "namespace": "default" },
            "spec": {
                "containers": [
                    { "name": "app", "image": "docker.io/library/nginx:1.25" }
                ],
                "volumes": [
                    { "name": "creds", "secret": { "secretName": "a" } }
                ]
            }
        },
        {
            "metadata": { "name": "worker", "namespace": "default" },
            "spec": {
                "containers": [
                    {
                        "name": "app",
                        "image": "docker.io/library/busybox:1.36",
                        "envFrom": [ { "secretRef": { "name": "b" } } ]
                    }
                ]
            }
        }
    ]))
    .unwrap();
    let secrets: Vec<Secret> = ["a", "b", "c"]
        .into_iter()
        .map(|name| {
            serde_json::from_value(serde_json::json!({
                "metadata": { "name": name, "namespace": "default" },
                "type": "Opaque"
            }))
            .unwrap()
        })
        .collect();

    let registry = Registry::with_builtin().unwrap();
    let filter = CheckFilter::new(Selection::new(), &registry).unwrap();
    let outcome = checks::run(
        &Objects::new(pods, secrets),
        filter.checks(),
        &DiagnosticFilter::default(),
    );

    assert!(outcome.is_success());
    assert_eq!(
        summary(&outcome.diagnostics),
        vec![("unused-secret".to_string(), Severity::Warning, "default/c".to_string())]
    );
}
