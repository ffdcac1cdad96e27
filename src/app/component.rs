//! Registrierte Tools und Mediatoren als typ-gelöschte, geteilte Handles.
//!
//! Die Engine kennt von einer Komponente nur den `UpdateMode` und das
//! optionale Frame-Update. Andere Komponenten greifen per `downcast` auf
//! den konkreten Typ zu.

use crate::core::{Shared, Update, UpdateMode};
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Typ-gelöschtes Handle auf ein Tool oder einen Mediator.
#[derive(Clone)]
pub struct Component {
    handle: Rc<dyn Any>,
    updater: Option<Rc<RefCell<dyn Update>>>,
}

impl Component {
    /// Registriert eine Komponente mit Frame-Update.
    pub fn updatable<T: Update + 'static>(component: Shared<T>) -> Self {
        let updater: Rc<RefCell<dyn Update>> = component.clone();
        Self {
            handle: component,
            updater: Some(updater),
        }
    }

    /// Registriert eine passive Komponente (wird im Frame-Loop übersprungen).
    pub fn passive<T: 'static>(component: Shared<T>) -> Self {
        Self {
            handle: component,
            updater: None,
        }
    }

    /// Bei der Registrierung festgelegter Update-Modus.
    pub fn update_mode(&self) -> UpdateMode {
        if self.updater.is_some() {
            UpdateMode::Updatable
        } else {
            UpdateMode::Passive
        }
    }

    /// Liefert das konkrete Handle, falls die Komponente vom Typ `T` ist.
    pub fn downcast<T: 'static>(&self) -> Option<Shared<T>> {
        Rc::clone(&self.handle).downcast::<RefCell<T>>().ok()
    }

    /// Prüft, ob zwei Handles auf dieselbe Komponente zeigen.
    pub fn ptr_eq(&self, other: &Component) -> bool {
        Rc::ptr_eq(&self.handle, &other.handle)
    }

    /// Führt das Frame-Update aus. Passive Komponenten sind ein No-op.
    pub(crate) fn update(&self) -> anyhow::Result<()> {
        let Some(updater) = &self.updater else {
            return Ok(());
        };
        let mut target = updater
            .try_borrow_mut()
            .map_err(|_| anyhow::anyhow!("Komponente ist während des Updates bereits ausgeliehen"))?;
        target.update()
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("update_mode", &self.update_mode())
            .finish()
    }
}

/// Komponente mit ihrem Registrierungsnamen.
#[derive(Debug, Clone)]
pub struct NamedComponent {
    /// Name aus dem Application-Descriptor (nicht zwingend eindeutig)
    pub name: String,
    /// Handle auf die Komponente
    pub component: Component,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shared;

    struct Counter {
        updates: u32,
    }

    impl Update for Counter {
        fn update(&mut self) -> anyhow::Result<()> {
            self.updates += 1;
            Ok(())
        }
    }

    struct Marker;

    #[test]
    fn test_updatable_component_updates_shared_state() {
        let counter = shared(Counter { updates: 0 });
        let component = Component::updatable(counter.clone());

        assert_eq!(component.update_mode(), UpdateMode::Updatable);
        component.update().expect("Update sollte gelingen");
        component.update().expect("Update sollte gelingen");
        assert_eq!(counter.borrow().updates, 2);
    }

    #[test]
    fn test_passive_component_is_skipped() {
        let component = Component::passive(shared(Marker));
        assert_eq!(component.update_mode(), UpdateMode::Passive);
        assert!(component.update().is_ok());
    }

    #[test]
    fn test_downcast_returns_same_instance() {
        let counter = shared(Counter { updates: 7 });
        let component = Component::updatable(counter.clone());

        let back = component.downcast::<Counter>().expect("Typ sollte passen");
        assert!(Rc::ptr_eq(&back, &counter));
        assert!(component.downcast::<Marker>().is_none());
    }

    #[test]
    fn test_update_while_borrowed_reports_error() {
        let counter = shared(Counter { updates: 0 });
        let component = Component::updatable(counter.clone());

        let _guard = counter.borrow_mut();
        assert!(component.update().is_err());
    }
}
