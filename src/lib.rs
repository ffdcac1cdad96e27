//! BrainSlicer Engine Library.
//! Plugin-Komposition, Frame-Loop und Viewport-Input als Library exportiert
//! für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod render;
pub mod shared;
pub mod ui;

pub use app::{compose, Application, ApplicationDescriptor, Component, ComponentRegistry, Lifecycle};
pub use core::{shared, Camera2D, Layout, RenderGraph, RenderNode, Scene, Shared, Update, UpdateMode, Viewport};
pub use render::{OrthoViewport, QuadViewLayout, ViewAxis};
pub use shared::{EngineOptions, FailurePolicy};
pub use ui::{ActionEvent, MouseAction, MouseButton, PointerEvent, Propagation, ViewportEventHandler};
