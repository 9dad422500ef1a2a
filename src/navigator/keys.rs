//! Key injection seam.
//!
//! Every navigation step is mirrored to the OS input layer as a press and
//! release of an arrow key. The injector is a trait so the session can be
//! driven with a recorder in tests and a logger from the CLI.

use serde::Serialize;

/// Logical keys the navigator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NavKey {
    Up,
    Down,
}

/// Trait implemented by input-injection backends.
pub trait KeyInjector {
    fn press_and_release(&mut self, key: NavKey);
}

/// Injector that only logs the key events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogKeyInjector;

impl KeyInjector for LogKeyInjector {
    fn press_and_release(&mut self, key: NavKey) {
        tracing::info!("[Keys] press+release {:?}", key);
    }
}

/// Injector that records every event, for tests and reports.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingKeyInjector {
    events: Vec<NavKey>,
}

impl RecordingKeyInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[NavKey] {
        &self.events
    }
}

impl KeyInjector for RecordingKeyInjector {
    fn press_and_release(&mut self, key: NavKey) {
        self.events.push(key);
    }
}

impl<K: KeyInjector + ?Sized> KeyInjector for Box<K> {
    fn press_and_release(&mut self, key: NavKey) {
        (**self).press_and_release(key);
    }
}

impl<K: KeyInjector + ?Sized> KeyInjector for &mut K {
    fn press_and_release(&mut self, key: NavKey) {
        (**self).press_and_release(key);
    }
}
