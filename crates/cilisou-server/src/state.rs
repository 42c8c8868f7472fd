use cilisou_core::{Gateway, ResolveBackend};

/// Shared application state
///
/// Generic over the mirror-resolution backend so handler tests can run
/// against a mock instead of a real browser.
pub struct AppState<B> {
    gateway: Gateway<B>,
}

impl<B: ResolveBackend> AppState<B> {
    pub fn new(gateway: Gateway<B>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway<B> {
        &self.gateway
    }
}
