//! Core-Domänentypen: Kamera, Capability-Verträge, Render-Graph.

pub mod camera;
/// Strukturelle Verträge, die die Engine von Szene, Layout und Viewports verlangt.
pub mod capabilities;
pub mod render_graph;

pub use camera::Camera2D;
pub use capabilities::{shared, Layout, Scene, Shared, Update, UpdateMode, Viewport};
pub use render_graph::{RenderGraph, RenderNode};
