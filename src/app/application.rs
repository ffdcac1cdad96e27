//! Application: Lifecycle und Frame-Loop der Komponenten-Komposition.
//!
//! Eine Application besitzt Tools, Mediatoren, genau eine Szene und genau
//! ein Layout. Solange sie läuft, wird pro Frame in fester Reihenfolge
//! aktualisiert: alle Mediatoren, dann alle Tools, dann die Szene, dann
//! rendert das Layout die Szene.

use super::component::{Component, NamedComponent};
use super::frame_loop::{FrameQueue, RunToken};
use crate::core::{Layout, Scene, Shared, UpdateMode};
use crate::shared::FailurePolicy;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_UID: AtomicU64 = AtomicU64::new(1);

/// Lifecycle-Zustand einer Application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Erstellt/konfiguriert, noch nie gestartet
    #[default]
    Idle,
    /// Frame-Loop aktiv
    Running,
    /// Angehalten, Komponenten-Zustand bleibt erhalten
    Stopped,
    /// Endgültig beendet, Layout freigegeben
    Disposed,
}

/// Szene mit dem bei `set_scene` ermittelten Update-Modus.
struct SceneSlot {
    scene: Shared<dyn Scene>,
    mode: UpdateMode,
}

/// Plugin-Komposition mit explizitem Lifecycle.
pub struct Application {
    uid: u64,
    name: String,
    tools: Vec<NamedComponent>,
    mediators: Vec<NamedComponent>,
    scene: Option<SceneSlot>,
    layout: Option<Shared<dyn Layout>>,
    lifecycle: Lifecycle,
    run_token: Option<RunToken>,
    frames: FrameQueue,
    failure_policy: FailurePolicy,
    frame_count: u64,
    last_error: Option<anyhow::Error>,
}

impl Application {
    /// Erstellt eine leere, inaktive Application mit prozessweit eindeutiger UID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uid: NEXT_UID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            tools: Vec::new(),
            mediators: Vec::new(),
            scene: None,
            layout: None,
            lifecycle: Lifecycle::Idle,
            run_token: None,
            frames: FrameQueue::new(),
            failure_policy: FailurePolicy::default(),
            frame_count: 0,
            last_error: None,
        }
    }

    /// Setzt die Fehler-Policy für Komponenten-Updates.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn uid(&self) -> u64 {
        self.uid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    // ── Komposition ─────────────────────────────────────────────

    /// Setzt die Szene. Austausch während des Laufs liegt in der Verantwortung des Aufrufers.
    pub fn set_scene(&mut self, scene: Shared<dyn Scene>) {
        if self.is_running() {
            log::warn!(
                "Application '{}': Szene wird während des Laufs ersetzt (vorher stop() aufrufen)",
                self.name
            );
        }
        let mode = scene.borrow().update_mode();
        self.scene = Some(SceneSlot { scene, mode });
    }

    pub fn scene(&self) -> Option<&Shared<dyn Scene>> {
        self.scene.as_ref().map(|slot| &slot.scene)
    }

    /// Setzt das Layout. Austausch während des Laufs liegt in der Verantwortung des Aufrufers.
    pub fn set_layout(&mut self, layout: Shared<dyn Layout>) {
        if self.is_running() {
            log::warn!(
                "Application '{}': Layout wird während des Laufs ersetzt (vorher stop() aufrufen)",
                self.name
            );
        }
        self.layout = Some(layout);
    }

    pub fn layout(&self) -> Option<&Shared<dyn Layout>> {
        self.layout.as_ref()
    }

    /// Hängt ein Tool an (keine Duplikat-Prüfung, Reihenfolge = Registrierung).
    pub fn add_tool(&mut self, name: impl Into<String>, tool: Component) {
        self.tools.push(NamedComponent {
            name: name.into(),
            component: tool,
        });
    }

    pub fn tools(&self) -> &[NamedComponent] {
        &self.tools
    }

    /// Erstes Tool mit diesem Namen.
    pub fn tool(&self, name: &str) -> Option<&Component> {
        find_by_name(&self.tools, name)
    }

    /// Hängt einen Mediator an (keine Duplikat-Prüfung, Reihenfolge = Registrierung).
    pub fn add_mediator(&mut self, name: impl Into<String>, mediator: Component) {
        self.mediators.push(NamedComponent {
            name: name.into(),
            component: mediator,
        });
    }

    pub fn mediators(&self) -> &[NamedComponent] {
        &self.mediators
    }

    /// Erster Mediator mit diesem Namen.
    pub fn mediator(&self, name: &str) -> Option<&Component> {
        find_by_name(&self.mediators, name)
    }

    // ── Zustand ─────────────────────────────────────────────────

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// Anzahl vollständig ausgeführter Ticks seit Erstellung.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Letzter Fehler eines Komponenten-Updates (bei beiden Policies).
    pub fn last_error(&self) -> Option<&anyhow::Error> {
        self.last_error.as_ref()
    }

    /// Gibt `true` zurück, wenn ein nicht abgebrochener Tick auf den nächsten Frame wartet.
    pub fn has_pending_frame(&self) -> bool {
        self.frames.has_live()
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Startet den Frame-Loop. Ohne Layout ein stiller No-op.
    ///
    /// Der erste Tick läuft sofort, alle weiteren über [`Application::pump_frame`].
    pub fn run(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            log::warn!("Application '{}' ist bereits disposed, run() ignoriert", self.name);
            return;
        }
        let Some(layout) = self.layout.clone() else {
            log::debug!("Application '{}' ohne Layout, run() ignoriert", self.name);
            return;
        };
        if self.is_running() {
            log::debug!("Application '{}' läuft bereits", self.name);
            return;
        }

        {
            let mut layout = layout.borrow_mut();
            layout.add_layout_listeners();
            layout.enable_viewports(true);
        }

        let token = RunToken::new();
        self.run_token = Some(token.clone());
        self.lifecycle = Lifecycle::Running;
        log::info!("Application '{}' (uid {}) gestartet", self.name, self.uid);

        self.run_application_loop(&token);
    }

    /// Ein Tick des Frame-Loops. Plant sich selbst für den nächsten Frame neu ein.
    ///
    /// Beendet die Kette ohne Neuplanung, wenn `token` abgebrochen wurde.
    /// Gibt `true` zurück, wenn der Tick vollständig ausgeführt wurde.
    pub fn run_application_loop(&mut self, token: &RunToken) -> bool {
        let Some(layout) = self.layout.clone() else {
            return false;
        };
        if token.is_cancelled() || !self.is_running() {
            log::trace!("Application '{}': Tick verworfen (gestoppt)", self.name);
            return false;
        }

        if let Err(e) = self.tick(&layout) {
            log::error!(
                "Application '{}': Frame {} abgebrochen: {:#}",
                self.name,
                self.frame_count,
                e
            );
            self.last_error = Some(e);
            self.stop();
            return false;
        }

        self.frame_count += 1;
        self.frames.request(token.clone());
        true
    }

    /// Führt alle bis jetzt angeforderten Ticks aus (ein Host-Frame).
    ///
    /// Während des Pumpens neu angeforderte Ticks laufen erst beim nächsten Aufruf.
    /// Gibt die Anzahl tatsächlich ausgeführter Ticks zurück.
    pub fn pump_frame(&mut self) -> usize {
        let due = self.frames.take_due();
        let mut executed = 0;
        for token in &due {
            if self.run_application_loop(token) {
                executed += 1;
            }
        }
        executed
    }

    /// Hält den Frame-Loop an. Ohne Layout ein stiller No-op.
    ///
    /// Tools, Mediatoren und Szene bleiben erhalten; `run()` setzt fort.
    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        let Some(layout) = self.layout.clone() else {
            log::debug!("Application '{}' ohne Layout, stop() ignoriert", self.name);
            return;
        };

        {
            let mut layout = layout.borrow_mut();
            layout.remove_layout_listeners();
            layout.clear_canvas();
            layout.enable_viewports(false);
        }

        if let Some(token) = self.run_token.take() {
            token.cancel();
        }
        if self.lifecycle == Lifecycle::Running {
            self.lifecycle = Lifecycle::Stopped;
            log::info!(
                "Application '{}' gestoppt nach {} Frames",
                self.name,
                self.frame_count
            );
        }
    }

    /// Stoppt und gibt das Layout frei. Danach ist kein `run()` mehr möglich.
    pub fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.stop();
        if let Some(layout) = &self.layout {
            layout.borrow_mut().dispose();
        }
        self.frames.clear();
        self.lifecycle = Lifecycle::Disposed;
        log::info!("Application '{}' disposed", self.name);
    }

    // ── Frame ───────────────────────────────────────────────────

    /// Mediatoren → Tools → Szene → Render. Harte Reihenfolge.
    fn tick(&mut self, layout: &Shared<dyn Layout>) -> anyhow::Result<()> {
        let policy = self.failure_policy;
        let mut isolated = Vec::new();

        for entry in &self.mediators {
            let result = entry.component.update();
            settle("Mediator", Some(&entry.name), result, policy, &mut isolated)?;
        }
        for entry in &self.tools {
            let result = entry.component.update();
            settle("Tool", Some(&entry.name), result, policy, &mut isolated)?;
        }

        if let Some(slot) = &self.scene {
            if slot.mode == UpdateMode::Updatable {
                let result = match slot.scene.try_borrow_mut() {
                    Ok(mut scene) => scene.update(),
                    Err(_) => Err(anyhow::anyhow!("Szene ist während des Updates bereits ausgeliehen")),
                };
                settle("Szene", None, result, policy, &mut isolated)?;
            }

            let scene = slot.scene.borrow();
            layout.borrow_mut().render(scene.render_graph());
        } else {
            log::trace!("Application '{}': keine Szene, Render übersprungen", self.name);
        }

        if let Some(e) = isolated.pop() {
            self.last_error = Some(e);
        }
        Ok(())
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        if let Some(token) = self.run_token.take() {
            token.cancel();
        }
    }
}

/// Wendet die Fehler-Policy auf das Ergebnis eines Komponenten-Updates an.
///
/// `name` ist der Registrierungsname; die Szene hat keinen.
fn settle(
    kind: &str,
    name: Option<&str>,
    result: anyhow::Result<()>,
    policy: FailurePolicy,
    isolated: &mut Vec<anyhow::Error>,
) -> anyhow::Result<()> {
    let Err(e) = result else {
        return Ok(());
    };
    let e = match name {
        Some(name) => e.context(format!("{kind} '{name}': Update fehlgeschlagen")),
        None => e.context(format!("{kind}: Update fehlgeschlagen")),
    };
    match policy {
        FailurePolicy::Isolate => {
            log::error!("{:#}", e);
            isolated.push(e);
            Ok(())
        }
        FailurePolicy::FailFast => Err(e),
    }
}

fn find_by_name<'a>(entries: &'a [NamedComponent], name: &str) -> Option<&'a Component> {
    entries
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| &entry.component)
}
