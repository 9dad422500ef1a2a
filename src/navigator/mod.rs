// Navigator module - whistle-driven list selection
//
// A rising chirp moves the selection up, a falling chirp moves it down, both
// wrapping around the ends of the list. Each move is mirrored as one
// arrow-key press through the `KeyInjector` seam.

pub mod keys;
pub mod selection;

pub use keys::{KeyInjector, LogKeyInjector, NavKey, RecordingKeyInjector};
pub use selection::{ListItem, SelectionList, ITEM_COUNT};

use crate::analysis::NavSignal;

/// Selection state machine driven by navigation signals
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    list: SelectionList,
    transitions: u64,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.list.selected()
    }

    pub fn list(&self) -> &SelectionList {
        &self.list
    }

    /// Number of moves applied since construction
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Apply one signal, emitting a key for every move
    ///
    /// Returns the key that was sent, or `None` when the signal was `None`.
    pub fn apply<K: KeyInjector + ?Sized>(
        &mut self,
        signal: NavSignal,
        keys: &mut K,
    ) -> Option<NavKey> {
        let (key, selected) = match signal {
            NavSignal::Up => (NavKey::Up, self.list.select_previous()),
            NavSignal::Down => (NavKey::Down, self.list.select_next()),
            NavSignal::None => return None,
        };

        self.transitions += 1;
        tracing::info!("[Navigator] {:?} -> item {}", signal, selected);
        keys.press_and_release(key);
        Some(key)
    }
}
