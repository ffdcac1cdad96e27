//! UI-Layer: Viewport-Input und die Brücke von egui zu nativen Pointer-Events.

pub mod input;
mod pointer_events;

pub use input::{
    handler, ActionEvent, ActionHandler, HandlerChains, InputSurface, MouseAction, MouseButton,
    PointerEvent, PointerEventKind, PointerSurface, Propagation, ViewportEventHandler,
};
pub use pointer_events::{collect_pointer_events, map_button};
