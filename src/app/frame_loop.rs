//! Frame-Scheduling: Abbruch-Token und Frame-Queue.
//!
//! Jeder `run()` erzeugt ein neues [`RunToken`]. Jeder geplante Tick trägt
//! eine Kopie davon; `stop()` bricht das Token ab, und der nächste Tick
//! beendet die Kette, ohne sich neu einzuplanen.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Abbruch-Token eines Application-Laufs.
#[derive(Debug, Clone, Default)]
pub struct RunToken {
    cancelled: Rc<Cell<bool>>,
}

impl RunToken {
    /// Erstellt ein aktives Token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bricht den Lauf ab. Wirkt beim nächsten Tick, nicht sofort.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Gibt `true` zurück, wenn der Lauf abgebrochen wurde.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Per-Frame-Callback-Facility des Hosts.
///
/// Angeforderte Ticks werden erst beim nächsten `take_due` ausgeliefert,
/// also mit genau einem logischen Frame Latenz.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: VecDeque<RunToken>,
}

impl FrameQueue {
    /// Erstellt eine leere Queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plant einen Tick für den nächsten Frame ein.
    pub fn request(&mut self, token: RunToken) {
        self.pending.push_back(token);
    }

    /// Entnimmt alle bis jetzt angeforderten Ticks.
    pub fn take_due(&mut self) -> Vec<RunToken> {
        self.pending.drain(..).collect()
    }

    /// Gibt `true` zurück, wenn kein Tick angefordert ist.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Gibt `true` zurück, wenn mindestens ein nicht abgebrochener Tick wartet.
    pub fn has_live(&self) -> bool {
        self.pending.iter().any(|token| !token.is_cancelled())
    }

    /// Verwirft alle angeforderten Ticks.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
