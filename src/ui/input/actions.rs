//! Domain-Aktionen und die Interceptor-Ketten, über die sie verteilt werden.

use super::MouseButton;
use glam::Vec2;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Aktionen, an die sich Interceptors hängen können.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// `mouseDownAction(x, y, button)`
    MouseDown,
    /// `mouseMoveAction(dx, dy, button)`
    MouseMove,
    /// `mouseUpAction(x, y, button)`
    MouseUp,
    /// `mouseWheelAction(delta_y, x, y)`
    MouseWheel,
}

impl MouseAction {
    /// Alle Aktionen in fester Reihenfolge.
    pub const ALL: [Self; 4] = [
        Self::MouseDown,
        Self::MouseMove,
        Self::MouseUp,
        Self::MouseWheel,
    ];

    /// Registrierungsname, wie er in Descriptors und Mediatoren verwendet wird.
    pub fn name(self) -> &'static str {
        match self {
            Self::MouseDown => "mouseDownAction",
            Self::MouseMove => "mouseMoveAction",
            Self::MouseUp => "mouseUpAction",
            Self::MouseWheel => "mouseWheelAction",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::MouseDown => 0,
            Self::MouseMove => 1,
            Self::MouseUp => 2,
            Self::MouseWheel => 3,
        }
    }
}

impl fmt::Display for MouseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MouseAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| anyhow::anyhow!("Unbekannte Maus-Aktion: '{}'", s))
    }
}

/// Argumente einer verteilten Aktion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionEvent {
    /// Down/Up: Position in Pixeln; Move: zoom-skaliertes Delta seit Drag-Start
    Pointer {
        x: f32,
        y: f32,
        button: Option<MouseButton>,
    },
    /// Mausrad mit normalisierter Viewport-Mausposition
    Wheel { delta_y: f32, x: f32, y: f32 },
}

impl ActionEvent {
    /// Position bzw. Delta als Vektor.
    pub fn position(&self) -> Vec2 {
        match *self {
            Self::Pointer { x, y, .. } | Self::Wheel { x, y, .. } => Vec2::new(x, y),
        }
    }

    /// Beteiligte Maustaste (nur bei Pointer-Aktionen).
    pub fn button(&self) -> Option<MouseButton> {
        match *self {
            Self::Pointer { button, .. } => button,
            Self::Wheel { .. } => None,
        }
    }

    /// Rad-Delta (nur bei Wheel-Aktionen).
    pub fn wheel_delta(&self) -> Option<f32> {
        match *self {
            Self::Wheel { delta_y, .. } => Some(delta_y),
            Self::Pointer { .. } => None,
        }
    }
}

/// `stopPropagation`-Fähigkeit, die jeder Interceptor erhält.
#[derive(Debug, Default)]
pub struct Propagation {
    stopped: bool,
}

impl Propagation {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Überspringt alle später registrierten Interceptors dieser Aktion.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// Interceptor: `(stopPropagation, enabled, args)`.
pub type ActionHandler = Rc<dyn Fn(&mut Propagation, bool, &ActionEvent) -> anyhow::Result<()>>;

/// Verpackt eine Closure als [`ActionHandler`].
pub fn handler<F>(f: F) -> ActionHandler
where
    F: Fn(&mut Propagation, bool, &ActionEvent) -> anyhow::Result<()> + 'static,
{
    Rc::new(f)
}

/// Unveränderliche, geordnete Interceptor-Listen pro Aktion.
///
/// Jede Registrierung ersetzt die Liste der Aktion durch eine neue
/// (Copy-on-Write). Ein laufender Dispatch iteriert über seinen Snapshot.
#[derive(Clone)]
pub struct HandlerChains {
    chains: [Rc<[ActionHandler]>; 4],
}

impl Default for HandlerChains {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerChains {
    /// Erstellt leere Ketten für alle Aktionen.
    pub fn new() -> Self {
        Self {
            chains: std::array::from_fn(|_| Rc::from(Vec::new())),
        }
    }

    /// Hängt einen Interceptor an (Reihenfolge bleibt erhalten, keine Deduplizierung).
    pub fn register(&mut self, action: MouseAction, handler: ActionHandler) {
        let chain = &mut self.chains[action.index()];
        let mut next: Vec<ActionHandler> = chain.iter().cloned().collect();
        next.push(handler);
        *chain = Rc::from(next);
    }

    /// Aktueller Snapshot der Kette einer Aktion.
    pub fn snapshot(&self, action: MouseAction) -> Rc<[ActionHandler]> {
        Rc::clone(&self.chains[action.index()])
    }

    /// Anzahl registrierter Interceptors einer Aktion.
    pub fn len(&self, action: MouseAction) -> usize {
        self.chains[action.index()].len()
    }

    /// Verteilt eine Aktion an die Kette.
    ///
    /// Interceptors laufen in Registrierungsreihenfolge, bis einer
    /// `Propagation::stop` aufruft. Ein fehlschlagender Interceptor wird
    /// geloggt, die Kette läuft weiter. Ergebnis: `enabled && !gestoppt`.
    pub fn dispatch(&self, action: MouseAction, enabled: bool, event: &ActionEvent) -> bool {
        let handlers = self.snapshot(action);
        let mut propagation = Propagation::new();
        for (index, handler) in handlers.iter().enumerate() {
            if propagation.is_stopped() {
                break;
            }
            if let Err(e) = handler(&mut propagation, enabled, event) {
                log::error!("Interceptor #{} für {} fehlgeschlagen: {:#}", index, action, e);
            }
        }
        enabled && !propagation.is_stopped()
    }
}

impl fmt::Debug for HandlerChains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for action in MouseAction::ALL {
            map.entry(&action.name(), &self.len(action));
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn pointer() -> ActionEvent {
        ActionEvent::Pointer {
            x: 1.0,
            y: 2.0,
            button: Some(MouseButton::Primary),
        }
    }

    #[test]
    fn test_action_names_roundtrip() {
        for action in MouseAction::ALL {
            let parsed: MouseAction = action.name().parse().expect("Name sollte parsen");
            assert_eq!(parsed, action);
        }
        assert!("mouseClickAction".parse::<MouseAction>().is_err());
    }

    #[test]
    fn test_registration_does_not_touch_existing_snapshot() {
        let mut chains = HandlerChains::new();
        chains.register(MouseAction::MouseDown, handler(|_, _, _| Ok(())));
        let before = chains.snapshot(MouseAction::MouseDown);

        chains.register(MouseAction::MouseDown, handler(|_, _, _| Ok(())));
        assert_eq!(before.len(), 1);
        assert_eq!(chains.len(MouseAction::MouseDown), 2);
        assert_eq!(chains.len(MouseAction::MouseUp), 0);
    }

    #[test]
    fn test_failing_handler_does_not_stop_chain() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut chains = HandlerChains::new();

        let log = calls.clone();
        chains.register(
            MouseAction::MouseUp,
            handler(move |_, _, _| {
                log.borrow_mut().push("erster");
                anyhow::bail!("absichtlicher Fehler")
            }),
        );
        let log = calls.clone();
        chains.register(
            MouseAction::MouseUp,
            handler(move |_, _, _| {
                log.borrow_mut().push("zweiter");
                Ok(())
            }),
        );

        assert!(chains.dispatch(MouseAction::MouseUp, true, &pointer()));
        assert_eq!(*calls.borrow(), vec!["erster", "zweiter"]);
    }

    #[test]
    fn test_handlers_observe_enabled_flag() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut chains = HandlerChains::new();
        let log = seen.clone();
        chains.register(
            MouseAction::MouseMove,
            handler(move |_, enabled, _| {
                log.borrow_mut().push(enabled);
                Ok(())
            }),
        );

        assert!(!chains.dispatch(MouseAction::MouseMove, false, &pointer()));
        assert!(chains.dispatch(MouseAction::MouseMove, true, &pointer()));
        assert_eq!(*seen.borrow(), vec![false, true]);
    }

    #[test]
    fn test_event_accessors() {
        let wheel = ActionEvent::Wheel {
            delta_y: -3.0,
            x: 0.5,
            y: -0.5,
        };
        assert_eq!(wheel.wheel_delta(), Some(-3.0));
        assert_eq!(wheel.button(), None);
        assert_eq!(wheel.position(), Vec2::new(0.5, -0.5));
        assert_eq!(pointer().button(), Some(MouseButton::Primary));
        assert_eq!(pointer().wheel_delta(), None);
    }
}
