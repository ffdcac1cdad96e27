//! Komposition einer Application aus einem deklarativen Descriptor.
//!
//! Canvases, Tools und Mediatoren werden strikt in deklarierter Reihenfolge
//! gebaut. Jede Abhängigkeit muss zu diesem Zeitpunkt bereits existieren;
//! es gibt keine Umsortierung.

use super::application::Application;
use super::component::Component;
use crate::core::{shared, Layout, Scene, Shared};
use crate::shared::FailurePolicy;
use anyhow::{bail, Context};
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use std::any::Any;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

// ── Descriptor ──────────────────────────────────────────────────────

/// Deklarative Beschreibung einer Application (JSON oder TOML).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDescriptor {
    /// Application-Typ, wird zum Namen der Application
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub page: Option<PageDescriptor>,
    #[serde(default, serialize_with = "serialize_tools")]
    pub tools: Vec<ComponentDescriptor>,
    #[serde(default, serialize_with = "serialize_mediators")]
    pub mediators: Vec<ComponentDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub name: String,
    /// Name des UI-Controllers (nur informativ)
    #[serde(default)]
    pub controller: Option<String>,
    #[serde(default)]
    pub canvas3ds: Vec<CanvasDescriptor>,
}

/// Zeichenfläche: benanntes Paar aus Layout und Szene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasDescriptor {
    pub name: String,
    pub layout: String,
    pub scene: String,
}

/// Tool oder Mediator mit Implementierungsname und Abhängigkeiten.
///
/// Der Schlüssel der Implementierung hängt an der Rolle (`tool` bzw.
/// `mediator`) und wird daher über [`ApplicationDescriptor`] serialisiert.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentDescriptor {
    pub name: String,
    #[serde(alias = "tool", alias = "mediator")]
    pub implementation: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Ein Eintrag mit rollenabhängigem Implementierungs-Schlüssel.
struct RoleEntry<'a> {
    key: &'static str,
    entry: &'a ComponentDescriptor,
}

impl Serialize for RoleEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("name", &self.entry.name)?;
        map.serialize_entry(self.key, &self.entry.implementation)?;
        map.serialize_entry("dependencies", &self.entry.dependencies)?;
        map.end()
    }
}

fn serialize_role<S: Serializer>(
    key: &'static str,
    entries: &[ComponentDescriptor],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(entries.len()))?;
    for entry in entries {
        seq.serialize_element(&RoleEntry { key, entry })?;
    }
    seq.end()
}

fn serialize_tools<S: Serializer>(entries: &[ComponentDescriptor], serializer: S) -> Result<S::Ok, S::Error> {
    serialize_role("tool", entries, serializer)
}

fn serialize_mediators<S: Serializer>(
    entries: &[ComponentDescriptor],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serialize_role("mediator", entries, serializer)
}

impl ApplicationDescriptor {
    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        serde_json::from_str(content).context("Descriptor (JSON) ungültig")
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Descriptor (TOML) ungültig")
    }

    /// Lädt einen Descriptor; das Format ergibt sich aus der Dateiendung.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Descriptor nicht lesbar: {}", path.display()))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let descriptor = match extension.as_deref() {
            Some("json") => Self::from_json_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            _ => bail!(
                "Unbekanntes Descriptor-Format (erwartet .json oder .toml): {}",
                path.display()
            ),
        };
        log::info!(
            "Descriptor '{}' geladen aus: {}",
            descriptor.kind,
            path.display()
        );
        Ok(descriptor)
    }

    /// Alle Canvases der Page (leer ohne Page).
    pub fn canvases(&self) -> &[CanvasDescriptor] {
        self.page
            .as_ref()
            .map(|page| page.canvas3ds.as_slice())
            .unwrap_or_default()
    }
}

// ── Registry ────────────────────────────────────────────────────────

type ComponentFactory = Box<dyn Fn(&Dependencies) -> anyhow::Result<Component>>;
type SceneFactory = Box<dyn Fn() -> anyhow::Result<(Shared<dyn Scene>, Rc<dyn Any>)>>;
type LayoutFactory = Box<dyn Fn() -> anyhow::Result<(Shared<dyn Layout>, Rc<dyn Any>)>>;

/// Factories für Szenen, Layouts, Tools und Mediatoren, nach Implementierungsname.
#[derive(Default)]
pub struct ComponentRegistry {
    scenes: IndexMap<String, SceneFactory>,
    layouts: IndexMap<String, LayoutFactory>,
    tools: IndexMap<String, ComponentFactory>,
    mediators: IndexMap<String, ComponentFactory>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_scene<T, F>(&mut self, implementation: impl Into<String>, factory: F)
    where
        T: Scene + 'static,
        F: Fn() -> anyhow::Result<T> + 'static,
    {
        self.scenes.insert(
            implementation.into(),
            Box::new(move || {
                let scene = shared(factory()?);
                let erased: Shared<dyn Scene> = scene.clone();
                let any: Rc<dyn Any> = scene;
                Ok((erased, any))
            }),
        );
    }

    pub fn register_layout<T, F>(&mut self, implementation: impl Into<String>, factory: F)
    where
        T: Layout + 'static,
        F: Fn() -> anyhow::Result<T> + 'static,
    {
        self.layouts.insert(
            implementation.into(),
            Box::new(move || {
                let layout = shared(factory()?);
                let erased: Shared<dyn Layout> = layout.clone();
                let any: Rc<dyn Any> = layout;
                Ok((erased, any))
            }),
        );
    }

    pub fn register_tool<F>(&mut self, implementation: impl Into<String>, factory: F)
    where
        F: Fn(&Dependencies) -> anyhow::Result<Component> + 'static,
    {
        self.tools.insert(implementation.into(), Box::new(factory));
    }

    pub fn register_mediator<F>(&mut self, implementation: impl Into<String>, factory: F)
    where
        F: Fn(&Dependencies) -> anyhow::Result<Component> + 'static,
    {
        self.mediators.insert(implementation.into(), Box::new(factory));
    }

    /// Registrierte Implementierungsnamen (Szenen, Layouts, Tools, Mediatoren).
    pub fn implementations(&self) -> impl Iterator<Item = &str> {
        self.scenes
            .keys()
            .chain(self.layouts.keys())
            .chain(self.tools.keys())
            .chain(self.mediators.keys())
            .map(String::as_str)
    }
}

// ── Views und Abhängigkeiten ────────────────────────────────────────

/// Instanzierter Canvas: Szene und Layout, typ-gelöscht und konkret abrufbar.
#[derive(Clone)]
pub struct CanvasView {
    pub name: String,
    pub scene: Shared<dyn Scene>,
    pub layout: Shared<dyn Layout>,
    scene_any: Rc<dyn Any>,
    layout_any: Rc<dyn Any>,
}

impl CanvasView {
    pub fn scene_as<T: 'static>(&self) -> Option<Shared<T>> {
        Rc::clone(&self.scene_any).downcast::<RefCell<T>>().ok()
    }

    pub fn layout_as<T: 'static>(&self) -> Option<Shared<T>> {
        Rc::clone(&self.layout_any).downcast::<RefCell<T>>().ok()
    }
}

impl std::fmt::Debug for CanvasView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasView").field("name", &self.name).finish()
    }
}

/// Sicht einer Factory auf ihre deklarierten Abhängigkeiten.
///
/// Zugriff nur auf Namen, die im Descriptor der Komponente stehen.
pub struct Dependencies<'a> {
    owner: &'a str,
    declared: &'a [String],
    views: &'a IndexMap<String, CanvasView>,
    components: &'a IndexMap<String, Component>,
}

impl Dependencies<'_> {
    /// Name der Komponente, die gerade gebaut wird.
    pub fn owner(&self) -> &str {
        self.owner
    }

    pub fn declared(&self) -> &[String] {
        self.declared
    }

    fn ensure_declared(&self, name: &str) -> anyhow::Result<()> {
        if !self.declared.iter().any(|dep| dep == name) {
            bail!("'{}' deklariert keine Abhängigkeit '{}'", self.owner, name);
        }
        Ok(())
    }

    /// Canvas mit diesem Namen.
    pub fn view(&self, name: &str) -> anyhow::Result<&CanvasView> {
        self.ensure_declared(name)?;
        self.views
            .get(name)
            .with_context(|| format!("'{}': Abhängigkeit '{}' ist kein Canvas", self.owner, name))
    }

    /// Erster deklarierter Canvas.
    pub fn first_view(&self) -> anyhow::Result<&CanvasView> {
        self.declared
            .iter()
            .find_map(|dep| self.views.get(dep))
            .with_context(|| format!("'{}' hängt von keinem Canvas ab", self.owner))
    }

    /// Komponente mit diesem Namen als konkreter Typ.
    pub fn component<T: 'static>(&self, name: &str) -> anyhow::Result<Shared<T>> {
        self.ensure_declared(name)?;
        let component = self
            .components
            .get(name)
            .with_context(|| format!("'{}': Abhängigkeit '{}' ist keine Komponente", self.owner, name))?;
        component.downcast::<T>().with_context(|| {
            format!(
                "'{}': Abhängigkeit '{}' ist kein {}",
                self.owner,
                name,
                std::any::type_name::<T>()
            )
        })
    }

    /// Erste deklarierte Komponente vom Typ `T`.
    pub fn find<T: 'static>(&self) -> anyhow::Result<Shared<T>> {
        self.declared
            .iter()
            .filter_map(|dep| self.components.get(dep))
            .find_map(Component::downcast::<T>)
            .with_context(|| {
                format!(
                    "'{}' hängt von keinem {} ab",
                    self.owner,
                    std::any::type_name::<T>()
                )
            })
    }
}

// ── Komposition ─────────────────────────────────────────────────────

/// Ergebnis von [`compose`]: die konfigurierte (nicht gestartete) Application.
pub struct Composition {
    pub application: Application,
    pub views: IndexMap<String, CanvasView>,
    pub components: IndexMap<String, Component>,
}

impl Composition {
    pub fn view(&self, name: &str) -> Option<&CanvasView> {
        self.views.get(name)
    }

    pub fn component<T: 'static>(&self, name: &str) -> Option<Shared<T>> {
        self.components.get(name)?.downcast::<T>()
    }

    /// Erste Komponente vom Typ `T` in deklarierter Reihenfolge.
    pub fn find<T: 'static>(&self) -> Option<Shared<T>> {
        self.components.values().find_map(Component::downcast::<T>)
    }
}

#[derive(Clone, Copy)]
enum Role {
    Tool,
    Mediator,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Self::Tool => "Tool",
            Self::Mediator => "Mediator",
        }
    }
}

/// Baut Canvases, Tools und Mediatoren in deklarierter Reihenfolge.
///
/// Fehler: unbekannte Implementierung, doppelter Name, fehlende oder erst
/// später deklarierte Abhängigkeit, fehlschlagende Factory.
pub fn compose(
    descriptor: &ApplicationDescriptor,
    registry: &ComponentRegistry,
    policy: FailurePolicy,
) -> anyhow::Result<Composition> {
    let mut application = Application::new(descriptor.kind.clone()).with_failure_policy(policy);
    let mut views: IndexMap<String, CanvasView> = IndexMap::new();
    let mut components: IndexMap<String, Component> = IndexMap::new();

    for canvas in descriptor.canvases() {
        if views.contains_key(&canvas.name) {
            bail!("Canvas '{}' ist doppelt deklariert", canvas.name);
        }
        let scene_factory = registry
            .scenes
            .get(&canvas.scene)
            .with_context(|| format!("Canvas '{}': unbekannte Szene '{}'", canvas.name, canvas.scene))?;
        let layout_factory = registry.layouts.get(&canvas.layout).with_context(|| {
            format!("Canvas '{}': unbekanntes Layout '{}'", canvas.name, canvas.layout)
        })?;
        let (scene, scene_any) = scene_factory()
            .with_context(|| format!("Canvas '{}': Szene nicht erstellbar", canvas.name))?;
        let (layout, layout_any) = layout_factory()
            .with_context(|| format!("Canvas '{}': Layout nicht erstellbar", canvas.name))?;
        log::debug!(
            "Canvas '{}' erstellt ({} / {})",
            canvas.name,
            canvas.layout,
            canvas.scene
        );
        views.insert(
            canvas.name.clone(),
            CanvasView {
                name: canvas.name.clone(),
                scene,
                layout,
                scene_any,
                layout_any,
            },
        );
    }

    if let Some(view) = views.values().next() {
        application.set_scene(view.scene.clone());
        application.set_layout(view.layout.clone());
        if views.len() > 1 {
            log::warn!(
                "Application '{}': {} Canvases deklariert, nur '{}' wird gerendert",
                descriptor.kind,
                views.len(),
                view.name
            );
        }
    }

    let stages = [
        (Role::Tool, &descriptor.tools, &registry.tools),
        (Role::Mediator, &descriptor.mediators, &registry.mediators),
    ];
    for (role, declared, factories) in stages {
        for entry in declared {
            if views.contains_key(&entry.name) || components.contains_key(&entry.name) {
                bail!("{} '{}': Name ist bereits vergeben", role.label(), entry.name);
            }
            for dep in &entry.dependencies {
                if !views.contains_key(dep) && !components.contains_key(dep) {
                    bail!(
                        "{} '{}' hängt von '{}' ab, das fehlt oder erst später deklariert ist",
                        role.label(),
                        entry.name,
                        dep
                    );
                }
            }
            let factory = factories.get(&entry.implementation).with_context(|| {
                format!(
                    "{} '{}': unbekannte Implementierung '{}'",
                    role.label(),
                    entry.name,
                    entry.implementation
                )
            })?;

            let deps = Dependencies {
                owner: &entry.name,
                declared: &entry.dependencies,
                views: &views,
                components: &components,
            };
            let component = factory(&deps).with_context(|| {
                format!(
                    "{} '{}' ({}) nicht erstellbar",
                    role.label(),
                    entry.name,
                    entry.implementation
                )
            })?;
            log::debug!(
                "{} '{}' erstellt ({:?})",
                role.label(),
                entry.name,
                component.update_mode()
            );

            match role {
                Role::Tool => application.add_tool(entry.name.clone(), component.clone()),
                Role::Mediator => application.add_mediator(entry.name.clone(), component.clone()),
            }
            components.insert(entry.name.clone(), component);
        }
    }

    log::info!(
        "Application '{}' komponiert: {} Tools, {} Mediatoren",
        descriptor.kind,
        application.tools().len(),
        application.mediators().len()
    );
    Ok(Composition {
        application,
        views,
        components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_alias_fields() {
        let descriptor = ApplicationDescriptor::from_json_str(
            r#"{
                "type": "Mini",
                "tools": [{ "name": "a", "tool": "A" }],
                "mediators": [{ "name": "m", "mediator": "M", "dependencies": ["a"] }]
            }"#,
        )
        .expect("JSON sollte parsen");

        assert_eq!(descriptor.kind, "Mini");
        assert!(descriptor.canvases().is_empty());
        assert_eq!(descriptor.tools[0].implementation, "A");
        assert!(descriptor.tools[0].dependencies.is_empty());
        assert_eq!(descriptor.mediators[0].dependencies, vec!["a".to_string()]);
    }

    #[test]
    fn test_serialized_components_keep_role_key() {
        let descriptor = ApplicationDescriptor::from_json_str(
            r#"{
                "type": "Mini",
                "tools": [{ "name": "a", "tool": "A" }],
                "mediators": [{ "name": "m", "mediator": "M", "dependencies": ["a"] }]
            }"#,
        )
        .expect("JSON sollte parsen");

        let value = serde_json::to_value(&descriptor).expect("Serialisierung");
        assert_eq!(value["tools"][0]["tool"], "A");
        assert_eq!(value["mediators"][0]["mediator"], "M");
        assert!(value["tools"][0].get("implementation").is_none());

        let text = serde_json::to_string(&descriptor).expect("Serialisierung");
        let back = ApplicationDescriptor::from_json_str(&text).expect("JSON sollte parsen");
        assert_eq!(back, descriptor);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = ApplicationDescriptor::load_from_file(Path::new("Cargo.lock"))
            .expect_err("Endung .lock ist kein Descriptor");
        assert!(format!("{:#}", err).contains("Descriptor"));
    }
}
