use std::path::{Path, PathBuf};

use tokamap_schema::{SchemaError, SchemaValidator};
use tokamap_walker::{
    DocumentKind, FailurePolicy, Progress, Silent, Target, TargetOutcome, WalkError, WalkOptions,
    Walker,
};

const GLOBALS_SCHEMA: &str = include_str!("../../../schemas/globals.schema.json");
const MAPPINGS_SCHEMA: &str = include_str!("../../../schemas/mappings.schema.json");

const VALID_GLOBALS: &str = r#"{
    "MACHINE": "JET",
    "PLUGIN_CONFIG": { "UDA": { "ARGS": { "host": "uda.jet.uk" } } }
}"#;

const VALID_MAPPINGS: &str = r#"{
    "ids_properties/homogeneous_time": { "MAP_TYPE": "VALUE", "VALUE": 1 },
    "flux_loop/flux/data": {
        "MAP_TYPE": "PLUGIN",
        "PLUGIN": "UDA",
        "ARGS": { "signal": "MAGN/FLUX" },
        "SCALE": 0.5
    },
    "flux_loop/flux/time": { "MAP_TYPE": "DIMENSION", "DI_PROBE": "flux_loop/flux/data" }
}"#;

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "tokamap-walk-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("parent dir should be creatable");
    }
    std::fs::write(path, contents).expect("fixture should be writable");
}

/// Root with a config listing `names` and valid documents for each.
fn valid_tree(tag: &str, names: &[&str]) -> PathBuf {
    let root = unique_temp_dir(tag);
    let listed = names
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ");
    write(
        &root,
        "mappings.cfg.json",
        &format!(r#"{{"mappings": {{"3.39.0": [{listed}]}}}}"#),
    );
    write(&root, "globals.json", VALID_GLOBALS);
    for name in names {
        write(&root, &format!("{name}/globals.json"), VALID_GLOBALS);
        write(&root, &format!("{name}/mappings.json"), VALID_MAPPINGS);
    }
    root
}

fn walker(options: WalkOptions) -> Walker {
    let globals = SchemaValidator::from_json("globals.schema.json", GLOBALS_SCHEMA)
        .expect("globals schema should compile");
    let mappings = SchemaValidator::from_json("mappings.schema.json", MAPPINGS_SCHEMA)
        .expect("mappings schema should compile");
    Walker::with_options(globals, mappings, options)
}

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Progress for Recorder {
    fn reading_config(&mut self, path: &Path) {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        self.events.push(format!("config {name}"));
    }

    fn mappings_found(&mut self, version: &str, names: &[String]) {
        self.events.push(format!("found {version} {names:?}"));
    }

    fn target_started(&mut self, target: &Target) {
        self.events.push(format!("start {target}"));
    }

    fn target_finished(&mut self, outcome: &TargetOutcome) {
        let status = if outcome.is_ok() { "ok" } else { "FAILED" };
        self.events.push(format!("end {} {status}", outcome.target));
    }
}

#[test]
fn valid_tree_validates_every_mapping_in_listed_order() {
    let root = valid_tree("valid", &["pf_active", "magnetics", "equilibrium"]);
    let mut recorder = Recorder::default();

    let report = walker(WalkOptions::default())
        .run(&root, &mut recorder)
        .expect("walk should complete");

    assert!(report.is_success());
    assert!(!report.stopped_early);
    assert_eq!(report.version, "3.39.0");
    assert_eq!(report.files_checked(), 7);
    let targets: Vec<Target> = report.outcomes.iter().map(|o| o.target.clone()).collect();
    assert_eq!(
        targets,
        vec![
            Target::RootGlobals,
            Target::Mapping("pf_active".to_string()),
            Target::Mapping("magnetics".to_string()),
            Target::Mapping("equilibrium".to_string()),
        ]
    );
    let kinds: Vec<DocumentKind> = report.outcomes[1].checks.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![DocumentKind::Globals, DocumentKind::Mappings]);

    assert_eq!(
        recorder.events,
        vec![
            "config mappings.cfg.json".to_string(),
            r#"found 3.39.0 ["pf_active", "magnetics", "equilibrium"]"#.to_string(),
            "start top-level globals".to_string(),
            "end top-level globals ok".to_string(),
            "start mapping 'pf_active'".to_string(),
            "end mapping 'pf_active' ok".to_string(),
            "start mapping 'magnetics'".to_string(),
            "end mapping 'magnetics' ok".to_string(),
            "start mapping 'equilibrium'".to_string(),
            "end mapping 'equilibrium' ok".to_string(),
        ]
    );

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn root_that_is_not_a_directory_is_usage_error() {
    let dir = unique_temp_dir("not-dir");
    let file = dir.join("plain.json");
    std::fs::write(&file, "{}").expect("fixture should be writable");
    let mut recorder = Recorder::default();

    let err = walker(WalkOptions::default())
        .run(&file, &mut recorder)
        .expect_err("file root should fail");

    assert!(matches!(err, WalkError::NotADirectory(_)));
    assert!(err.is_usage());
    assert!(recorder.events.is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_config_stops_before_validation() {
    let root = valid_tree("missing-config", &["magnetics"]);
    std::fs::remove_file(root.join("mappings.cfg.json")).expect("config should exist");
    let mut recorder = Recorder::default();

    let err = walker(WalkOptions::default())
        .run(&root, &mut recorder)
        .expect_err("missing config should fail");

    assert!(matches!(err, WalkError::MissingConfig(_)));
    assert!(err.to_string().contains("mappings.cfg.json"));
    assert!(recorder.events.is_empty());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn missing_root_globals_stops_before_any_mapping() {
    let root = valid_tree("missing-globals", &["magnetics"]);
    std::fs::remove_file(root.join("globals.json")).expect("globals should exist");
    let mut recorder = Recorder::default();

    let err = walker(WalkOptions::default())
        .run(&root, &mut recorder)
        .expect_err("missing root globals should fail");

    assert!(matches!(err, WalkError::MissingRootGlobals(_)));
    assert!(!recorder.events.iter().any(|e| e.starts_with("start")));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn unknown_version_fails_fast_with_available_versions() {
    let root = valid_tree("unknown-version", &["magnetics"]);
    let options = WalkOptions {
        version: "4.0.0".to_string(),
        ..WalkOptions::default()
    };

    let err = walker(options)
        .run(&root, &mut Silent)
        .expect_err("unknown version should fail");

    match &err {
        WalkError::UnknownVersion {
            version, available, ..
        } => {
            assert_eq!(version, "4.0.0");
            assert_eq!(available, &vec!["3.39.0".to_string()]);
        }
        other => panic!("expected UnknownVersion, got {other:?}"),
    }
    assert!(err.to_string().contains("available: 3.39.0"));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn selected_version_chooses_its_own_mapping_list() {
    let root = valid_tree("other-version", &["magnetics"]);
    write(
        &root,
        "mappings.cfg.json",
        r#"{"mappings": {"3.39.0": ["magnetics"], "3.41.0": ["magnetics", "missing"]}}"#,
    );
    let options = WalkOptions {
        version: "3.41.0".to_string(),
        failure_policy: FailurePolicy::CollectAll,
        ..WalkOptions::default()
    };

    let report = walker(options)
        .run(&root, &mut Silent)
        .expect("walk should complete");

    assert_eq!(report.version, "3.41.0");
    assert_eq!(report.outcomes.len(), 3);
    assert!(matches!(
        report.first_error(),
        Some(SchemaError::NotFound { .. })
    ));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn wrong_type_in_mappings_is_schema_violation() {
    let root = valid_tree("wrong-type", &["regionA"]);
    write(
        &root,
        "regionA/mappings.json",
        r#"{"flux_loop/flux/data": {"MAP_TYPE": "PLUGIN", "PLUGIN": "UDA", "ARGS": "MAGN/FLUX"}}"#,
    );
    let mut recorder = Recorder::default();

    let report = walker(WalkOptions::default())
        .run(&root, &mut recorder)
        .expect("walk should complete");

    assert!(!report.is_success());
    assert_eq!(report.failure_count(), 1);
    let failure = report.failures().next().expect("one failure");
    assert_eq!(failure.kind, DocumentKind::Mappings);
    assert_eq!(failure.path, root.join("regionA").join("mappings.json"));

    let err = failure.error.as_ref().expect("failure carries an error");
    let violation = &err.violations()[0];
    assert!(violation.instance_path.ends_with("/ARGS"));
    assert!(violation.schema_path.ends_with("/ARGS/type"));
    assert!(violation.message.contains("object"));
    assert_eq!(
        recorder.events.last().map(String::as_str),
        Some("end mapping 'regionA' FAILED")
    );

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn missing_required_property_is_reported() {
    let root = valid_tree("missing-required", &["regionA"]);
    write(
        &root,
        "regionA/mappings.json",
        r#"{"ids_properties/homogeneous_time": {"MAP_TYPE": "VALUE"}}"#,
    );

    let report = walker(WalkOptions::default())
        .run(&root, &mut Silent)
        .expect("walk should complete");

    match report.first_error() {
        Some(SchemaError::Violation { violations, .. }) => {
            assert!(violations[0].schema_path.ends_with("/required"));
            assert!(violations[0].message.contains("VALUE"));
        }
        other => panic!("expected violation, got {other:?}"),
    }

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn fail_fast_stops_at_first_failing_mapping() {
    let root = valid_tree("fail-fast", &["first", "second", "third"]);
    write(&root, "second/globals.json", "[1, 2");
    write(&root, "third/mappings.json", r#"{"x": {"MAP_TYPE": "NOPE"}}"#);

    let report = walker(WalkOptions::default())
        .run(&root, &mut Silent)
        .expect("walk should complete");

    assert!(report.stopped_early);
    assert_eq!(report.outcomes.len(), 3);
    let second = &report.outcomes[2];
    assert_eq!(second.target, Target::Mapping("second".to_string()));
    // mappings.json of the failing directory is not attempted.
    assert_eq!(second.checks.len(), 1);
    assert!(matches!(
        second.checks[0].error,
        Some(SchemaError::Parse { .. })
    ));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn collect_all_reports_every_failing_mapping() {
    let root = valid_tree("collect-all", &["first", "second", "third"]);
    write(&root, "globals.json", r#"{"PLUGIN_CONFIG": {"UDA": {}}}"#);
    write(&root, "second/globals.json", "[1, 2");
    std::fs::remove_file(root.join("third/mappings.json")).expect("fixture should exist");

    let options = WalkOptions {
        failure_policy: FailurePolicy::CollectAll,
        ..WalkOptions::default()
    };
    let report = walker(options)
        .run(&root, &mut Silent)
        .expect("walk should complete");

    assert!(!report.stopped_early);
    assert_eq!(report.outcomes.len(), 4);
    assert_eq!(report.files_checked(), 7);
    assert_eq!(report.failure_count(), 3);

    let failed: Vec<String> = report
        .outcomes
        .iter()
        .filter(|o| !o.is_ok())
        .map(|o| o.target.to_string())
        .collect();
    assert_eq!(
        failed,
        vec!["top-level globals", "mapping 'second'", "mapping 'third'"]
    );
    assert!(matches!(
        report.outcomes[3].checks[1].error,
        Some(SchemaError::NotFound { .. })
    ));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn missing_mapping_directory_surfaces_as_not_found() {
    let root = valid_tree("missing-dir", &["magnetics"]);
    write(
        &root,
        "mappings.cfg.json",
        r#"{"mappings": {"3.39.0": ["magnetics", "ghost"]}}"#,
    );

    let report = walker(WalkOptions::default())
        .run(&root, &mut Silent)
        .expect("walk should complete");

    match report.first_error() {
        Some(SchemaError::NotFound { path }) => {
            assert_eq!(path, &root.join("ghost").join("globals.json"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn shot_directories_are_validated_when_enabled() {
    let root = valid_tree("shots", &["magnetics"]);
    for shot in ["80000", "12000"] {
        write(&root, &format!("magnetics/{shot}/globals.json"), VALID_GLOBALS);
        write(
            &root,
            &format!("magnetics/{shot}/mappings.json"),
            VALID_MAPPINGS,
        );
    }
    write(&root, "magnetics/80000/mappings.json", r#"{"x": {}}"#);

    let flat = walker(WalkOptions::default())
        .run(&root, &mut Silent)
        .expect("walk should complete");
    assert!(flat.is_success());
    assert_eq!(flat.files_checked(), 3);

    let options = WalkOptions {
        expand_shots: true,
        failure_policy: FailurePolicy::CollectAll,
        ..WalkOptions::default()
    };
    let report = walker(options)
        .run(&root, &mut Silent)
        .expect("walk should complete");

    assert_eq!(report.files_checked(), 5);
    let paths: Vec<PathBuf> = report.outcomes[1]
        .checks
        .iter()
        .map(|c| c.path.clone())
        .collect();
    assert_eq!(paths[0], root.join("magnetics/12000/globals.json"));
    assert_eq!(paths[3], root.join("magnetics/80000/mappings.json"));
    assert_eq!(report.failure_count(), 1);

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn repeated_runs_give_identical_results() {
    let root = valid_tree("idempotent", &["regionA"]);
    write(&root, "regionA/mappings.json", r#"{"x": {"MAP_TYPE": 7}}"#);
    let walker = walker(WalkOptions::default());

    let first = walker.run(&root, &mut Silent).expect("first walk");
    let second = walker.run(&root, &mut Silent).expect("second walk");

    assert_eq!(first.failure_count(), second.failure_count());
    assert_eq!(
        first.first_error().map(|e| e.violations().to_vec()),
        second.first_error().map(|e| e.violations().to_vec())
    );

    let _ = std::fs::remove_dir_all(&root);
}
