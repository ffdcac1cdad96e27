//! Layout-Backend auf Basis von egui.
//!
//! `QuadViewLayout` implementiert den `Layout`-Vertrag: vier Viewports,
//! die den zuletzt gerenderten Render-Graphen mit dem egui-Painter zeichnen.

mod paint;
mod quad_view;

pub use quad_view::{OrthoViewport, QuadViewLayout, ViewAxis, ViewportPane};
