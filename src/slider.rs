use std::{sync::Arc, time::Duration};

use tracing::debug;

use crate::AppState;

/// Cyclic position within the featured list. The list itself lives in the
/// catalog and may change length between calls, so every operation takes it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SliderController {
    current: usize,
}

impl SliderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_for(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.current % len)
    }

    pub fn advance(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.current = (self.current % len + 1) % len;
    }

    pub fn retreat(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.current = (self.current % len + len - 1) % len;
    }

    pub fn jump(&mut self, index: usize, len: usize) {
        if index < len {
            self.current = index;
        }
    }
}

/// Advances the banner on a fixed period. Manual navigation does not reset the phase.
pub fn spawn_ticker(state: Arc<AppState>, period: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await;
        loop {
            interval.tick().await;
            let len = state.catalog.read().await.featured().len();
            let mut slider = state.slider.lock().await;
            slider.advance(len);
            debug!(featured = len, current = ?slider.current_for(len), "banner tick");
        }
    })
}
