//! Gemeinsame Test-Doubles für Application- und Dispatch-Tests.
#![allow(dead_code)]

use brain_slicer::core::{Camera2D, Layout, RenderGraph, Scene, Update, UpdateMode, Viewport};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// Gemeinsames Protokoll aller Test-Doubles (Reihenfolge der Aufrufe).
pub type CallLog = Rc<RefCell<Vec<String>>>;

pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(log: &CallLog) -> Vec<String> {
    log.borrow().clone()
}

/// Einträge ab Position `from` (z.B. nach dem ersten Tick).
pub fn entries_since(log: &CallLog, from: usize) -> Vec<String> {
    log.borrow()[from..].to_vec()
}

pub fn count(log: &CallLog, entry: &str) -> usize {
    log.borrow().iter().filter(|e| e.as_str() == entry).count()
}

// ── Layout ──────────────────────────────────────────────────────────

pub struct RecordingLayout {
    log: CallLog,
}

impl RecordingLayout {
    pub fn new(log: &CallLog) -> Self {
        Self { log: log.clone() }
    }
}

impl Layout for RecordingLayout {
    fn render(&mut self, _graph: &RenderGraph) {
        self.log.borrow_mut().push("render".into());
    }
    fn add_layout_listeners(&mut self) {
        self.log.borrow_mut().push("listeners:add".into());
    }
    fn remove_layout_listeners(&mut self) {
        self.log.borrow_mut().push("listeners:remove".into());
    }
    fn enable_viewports(&mut self, enabled: bool) {
        let entry = if enabled { "viewports:on" } else { "viewports:off" };
        self.log.borrow_mut().push(entry.into());
    }
    fn clear_canvas(&mut self) {
        self.log.borrow_mut().push("clear".into());
    }
    fn dispose(&mut self) {
        self.log.borrow_mut().push("dispose".into());
    }
}

// ── Szene ───────────────────────────────────────────────────────────

pub struct RecordingScene {
    graph: RenderGraph,
    log: CallLog,
    mode: UpdateMode,
}

impl RecordingScene {
    pub fn updatable(log: &CallLog) -> Self {
        Self {
            graph: RenderGraph::new(),
            log: log.clone(),
            mode: UpdateMode::Updatable,
        }
    }

    pub fn passive(log: &CallLog) -> Self {
        Self {
            mode: UpdateMode::Passive,
            ..Self::updatable(log)
        }
    }
}

impl Scene for RecordingScene {
    fn render_graph(&self) -> &RenderGraph {
        &self.graph
    }
    fn update_mode(&self) -> UpdateMode {
        self.mode
    }
    fn update(&mut self) -> anyhow::Result<()> {
        self.log.borrow_mut().push("scene:update".into());
        Ok(())
    }
}

// ── Komponenten ─────────────────────────────────────────────────────

/// Updatable Komponente, die jedes Update protokolliert.
pub struct Tracker {
    name: String,
    log: CallLog,
    fail: bool,
}

impl Tracker {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
            fail: false,
        }
    }

    pub fn failing(name: &str, log: &CallLog) -> Self {
        Self {
            fail: true,
            ..Self::new(name, log)
        }
    }
}

impl Update for Tracker {
    fn update(&mut self) -> anyhow::Result<()> {
        self.log.borrow_mut().push(format!("update:{}", self.name));
        if self.fail {
            anyhow::bail!("{} kaputt", self.name);
        }
        Ok(())
    }
}

/// Passive Komponente ohne Frame-Update.
pub struct Inert;

// ── Viewport ────────────────────────────────────────────────────────

pub struct FakeViewport {
    pub hit: bool,
    pub reference: Vec2,
    pub camera: Camera2D,
}

impl FakeViewport {
    pub fn hit() -> Self {
        Self {
            hit: true,
            reference: Vec2::ZERO,
            camera: Camera2D::new(),
        }
    }

    pub fn miss() -> Self {
        Self {
            hit: false,
            ..Self::hit()
        }
    }
}

impl Viewport for FakeViewport {
    fn pan(&self) -> Vec2 {
        self.camera.position
    }
    fn mouse_intersects(&self) -> bool {
        self.hit
    }
    fn mouse_pos_reference(&self) -> Vec2 {
        self.reference
    }
    fn camera(&self) -> &Camera2D {
        &self.camera
    }
}
