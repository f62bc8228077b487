//! Shared handler state

use focus_api::WhitelistPreset;
use focus_core::FocusGateway;
use focus_store::{Store, StoreWriter};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gateway: FocusGateway,
    /// Read side of the store; writes go through `writer`
    pub store: Arc<dyn Store>,
    pub writer: StoreWriter,
    pub presets: Arc<Vec<WhitelistPreset>>,
}

impl AppState {
    pub fn new(
        gateway: FocusGateway,
        store: Arc<dyn Store>,
        writer: StoreWriter,
        presets: Vec<WhitelistPreset>,
    ) -> Self {
        Self {
            gateway,
            store,
            writer,
            presets: Arc::new(presets),
        }
    }
}
