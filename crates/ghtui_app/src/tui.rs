//! Bridges the app to the toolkit runtime.

use std::sync::Arc;

use ghtui::{Component, InputEvent};

use crate::msg::{Msg, ScreenSize};
use crate::runtime::{lock_unpoisoned, AppController};

/// Root component: input becomes [`Msg::Input`] and size changes become [`Msg::Resize`].
/// Both join the controller's queue behind any host responses already waiting there, so
/// the app sees every message in arrival order. Rendering is the app's view.
pub struct AppComponent {
    controller: Arc<AppController>,
    size: Option<ScreenSize>,
}

impl AppComponent {
    pub fn new(controller: Arc<AppController>) -> Self {
        Self {
            controller,
            size: None,
        }
    }
}

impl Component for AppComponent {
    fn render(&mut self, _width: usize) -> Vec<String> {
        lock_unpoisoned(self.controller.app()).view()
    }

    fn set_viewport_size(&mut self, cols: usize, rows: usize) {
        let size = ScreenSize::new(cols, rows);
        if self.size != Some(size) {
            self.size = Some(size);
            self.controller.enqueue(Msg::Resize(size));
        }
    }

    fn handle_event(&mut self, event: &InputEvent) {
        // Size changes arrive through `set_viewport_size`.
        if let InputEvent::Resize { .. } = event {
            return;
        }
        self.controller.enqueue(Msg::Input(event.clone()));
    }
}
