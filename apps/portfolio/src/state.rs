use std::sync::Arc;

use crate::config::Config;
use crate::html::PageRenderer;
use crate::sheets::SheetSource;
use crate::tailoring::TailorController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Spreadsheet backend. `SheetsClient` in production, a fake in tests.
    pub sheets: Arc<dyn SheetSource>,
    pub tailor: Arc<TailorController>,
    pub renderer: Arc<PageRenderer>,
}
