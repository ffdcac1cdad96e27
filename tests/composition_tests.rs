mod common;

use brain_slicer::app::builtin::{brain_slicer_descriptor, builtin_registry};
use brain_slicer::app::mediators::ControlsReset;
use brain_slicer::app::tools::{
    CameraControls, CameraParameters, PlaneParameters, PlanesMaterialManager,
};
use brain_slicer::app::{compose, ApplicationDescriptor, Component, ComponentRegistry};
use brain_slicer::core::{shared, UpdateMode};
use brain_slicer::{EngineOptions, FailurePolicy, QuadViewLayout};
use common::{call_log, entries, CallLog, Inert, RecordingLayout, RecordingScene, Tracker};
use std::path::Path;

/// Registry mit Test-Doubles; Factories protokollieren ihre Aufrufreihenfolge.
fn tracking_registry(log: &CallLog) -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    let scene_log = log.clone();
    registry.register_scene("RecordingScene", move || Ok(RecordingScene::updatable(&scene_log)));
    let layout_log = log.clone();
    registry.register_layout("RecordingLayout", move || Ok(RecordingLayout::new(&layout_log)));

    let tool_log = log.clone();
    registry.register_tool("Tracker", move |deps| {
        tool_log.borrow_mut().push(format!("build:{}", deps.owner()));
        Ok(Component::updatable(shared(Tracker::new(deps.owner(), &tool_log))))
    });
    registry.register_tool("Inert", |_| Ok(Component::passive(shared(Inert))));
    let mediator_log = log.clone();
    registry.register_mediator("Tracker", move |deps| {
        mediator_log.borrow_mut().push(format!("build:{}", deps.owner()));
        Ok(Component::updatable(shared(Tracker::new(deps.owner(), &mediator_log))))
    });
    registry.register_mediator("NeedsView", |deps| {
        deps.view("view")?;
        Ok(Component::passive(shared(Inert)))
    });
    registry
}

fn descriptor(json: &str) -> ApplicationDescriptor {
    ApplicationDescriptor::from_json_str(json).expect("Test-Descriptor sollte parsen")
}

const CANVAS: &str = r#""page": {
    "name": "main",
    "canvas3ds": [{ "name": "view", "layout": "RecordingLayout", "scene": "RecordingScene" }]
}"#;

#[test]
fn test_builtin_descriptor_composes_brain_slicer() {
    let options = EngineOptions::default();
    let descriptor = brain_slicer_descriptor().expect("eingebetteter Descriptor sollte parsen");
    let composition = compose(&descriptor, &builtin_registry(&options), FailurePolicy::Isolate)
        .expect("BrainSlicer sollte komponierbar sein");

    let app = &composition.application;
    assert_eq!(app.name(), "BrainSlicer");
    assert!(app.scene().is_some());
    assert!(app.layout().is_some());

    let tools: Vec<(&str, UpdateMode)> = app
        .tools()
        .iter()
        .map(|t| (t.name.as_str(), t.component.update_mode()))
        .collect();
    assert_eq!(
        tools,
        vec![
            ("materialManager", UpdateMode::Passive),
            ("planeParams", UpdateMode::Passive),
            ("cameraParams", UpdateMode::Passive),
            ("cameraControls", UpdateMode::Updatable),
        ]
    );
    let mediators: Vec<&str> = app.mediators().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(mediators, vec!["planeShifter", "cameraControlsReset"]);

    assert!(composition.component::<PlanesMaterialManager>("materialManager").is_some());
    assert!(composition.component::<PlaneParameters>("planeParams").is_some());
    assert!(composition.component::<CameraControls>("cameraControls").is_some());
    assert!(composition.component::<CameraParameters>("cameraParams").is_some());
    assert!(composition.find::<ControlsReset>().is_some());
    let view = composition.view("view").expect("Canvas 'view' fehlt");
    assert!(view.layout_as::<QuadViewLayout>().is_some());
    assert!(view.layout_as::<PlaneParameters>().is_none());
}

#[test]
fn test_components_are_built_and_registered_in_declared_order() {
    let log = call_log();
    let json = format!(
        r#"{{
            "type": "Order", {CANVAS},
            "tools": [
                {{ "name": "t2", "tool": "Tracker", "dependencies": ["view"] }},
                {{ "name": "t1", "tool": "Tracker", "dependencies": ["t2"] }}
            ],
            "mediators": [
                {{ "name": "m", "mediator": "Tracker", "dependencies": ["t1", "t2"] }}
            ]
        }}"#
    );
    let composition = compose(&descriptor(&json), &tracking_registry(&log), FailurePolicy::Isolate)
        .expect("Komposition sollte gelingen");

    assert_eq!(entries(&log), vec!["build:t2", "build:t1", "build:m"]);
    let names: Vec<&str> = composition
        .application
        .tools()
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, vec!["t2", "t1"]);
}

#[test]
fn test_dependency_declared_later_is_rejected() {
    let log = call_log();
    let json = r#"{
        "type": "Later",
        "tools": [
            { "name": "a", "tool": "Tracker", "dependencies": ["b"] },
            { "name": "b", "tool": "Tracker" }
        ]
    }"#;
    let err = compose(&descriptor(json), &tracking_registry(&log), FailurePolicy::Isolate)
        .err()
        .expect("spätere Abhängigkeit sollte abgelehnt werden");

    let message = format!("{:#}", err);
    assert!(message.contains("'a'"), "{message}");
    assert!(message.contains("'b'"), "{message}");
    assert!(entries(&log).is_empty(), "nichts darf gebaut werden");
}

#[test]
fn test_missing_dependency_is_rejected() {
    let log = call_log();
    let json = r#"{
        "type": "Missing",
        "mediators": [{ "name": "m", "mediator": "Tracker", "dependencies": ["ghost"] }]
    }"#;
    let err = compose(&descriptor(json), &tracking_registry(&log), FailurePolicy::Isolate)
        .err()
        .expect("fehlende Abhängigkeit sollte abgelehnt werden");
    assert!(format!("{:#}", err).contains("ghost"));
}

#[test]
fn test_duplicate_name_is_rejected() {
    let log = call_log();
    let json = r#"{
        "type": "Duplicate",
        "tools": [{ "name": "x", "tool": "Inert" }],
        "mediators": [{ "name": "x", "mediator": "Tracker" }]
    }"#;
    let err = compose(&descriptor(json), &tracking_registry(&log), FailurePolicy::Isolate)
        .err()
        .expect("doppelter Name sollte abgelehnt werden");
    assert!(format!("{:#}", err).contains("'x'"));
}

#[test]
fn test_unknown_implementation_is_rejected() {
    let log = call_log();
    let json = r#"{
        "type": "Unknown",
        "tools": [{ "name": "x", "tool": "DoesNotExist" }]
    }"#;
    let err = compose(&descriptor(json), &tracking_registry(&log), FailurePolicy::Isolate)
        .err()
        .expect("unbekannte Implementierung sollte abgelehnt werden");
    assert!(format!("{:#}", err).contains("DoesNotExist"));
}

#[test]
fn test_factory_sees_only_declared_dependencies() {
    let log = call_log();
    let undeclared = format!(
        r#"{{ "type": "Scoped", {CANVAS},
            "mediators": [{{ "name": "m", "mediator": "NeedsView" }}] }}"#
    );
    let err = compose(&descriptor(&undeclared), &tracking_registry(&log), FailurePolicy::Isolate)
        .err()
        .expect("nicht deklarierter Canvas darf nicht sichtbar sein");
    assert!(format!("{:#}", err).contains("view"));

    let declared = format!(
        r#"{{ "type": "Scoped", {CANVAS},
            "mediators": [{{ "name": "m", "mediator": "NeedsView", "dependencies": ["view"] }}] }}"#
    );
    assert!(compose(&descriptor(&declared), &tracking_registry(&log), FailurePolicy::Isolate).is_ok());
}

#[test]
fn test_failure_policy_is_passed_to_application() {
    let log = call_log();
    let json = format!(r#"{{ "type": "Policy", {CANVAS} }}"#);
    let composition = compose(&descriptor(&json), &tracking_registry(&log), FailurePolicy::FailFast)
        .expect("Komposition sollte gelingen");
    assert_eq!(composition.application.failure_policy(), FailurePolicy::FailFast);
}

#[test]
fn test_toml_descriptor_matches_json() {
    let toml = r#"
        type = "BrainSlicer"

        [page]
        name = "mainPage"
        controller = "QuadViewOrthoPlanes"

        [[page.canvas3ds]]
        name = "view"
        layout = "XYZPerspectiveQuadView"
        scene = "OrthoPlanes"

        [[tools]]
        name = "materialManager"
        tool = "PlanesMaterialManager"
        dependencies = ["view"]

        [[tools]]
        name = "planeParams"
        tool = "OrthoPlanesParameters"
        dependencies = ["view"]

        [[tools]]
        name = "cameraParams"
        tool = "QuadViewCameraParameters"
        dependencies = ["view"]

        [[tools]]
        name = "cameraControls"
        tool = "QuadViewCameraControls"
        dependencies = ["view"]

        [[mediators]]
        name = "planeShifter"
        mediator = "QuadViewXYZOrthoPlanesShifter"
        dependencies = ["view", "cameraControls", "materialManager", "planeParams"]

        [[mediators]]
        name = "cameraControlsReset"
        mediator = "QuadViewControlsReset"
        dependencies = ["cameraControls", "cameraParams"]
    "#;
    let from_toml = ApplicationDescriptor::from_toml_str(toml).expect("TOML sollte parsen");
    let builtin = brain_slicer_descriptor().expect("eingebetteter Descriptor sollte parsen");
    assert_eq!(from_toml, builtin);
}

#[test]
fn test_load_from_file_picks_format_by_extension() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/brain_slicer.json");
    let loaded = ApplicationDescriptor::load_from_file(&path).expect("Asset sollte ladbar sein");
    assert_eq!(loaded.kind, "BrainSlicer");
    assert_eq!(loaded.canvases().len(), 1);
}
