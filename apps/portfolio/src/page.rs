//! Page orchestration: fetch every tab, render the sections, or fall back to
//! a single error panel. The tailoring panel is attached either way.

use serde::Serialize;
use tracing::{error, info};

use crate::sections::{PortfolioView, Section};
use crate::sheets::{fetch_all, SheetError, SheetName, SheetSource};
use crate::tailoring::TailorPanel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
    pub anchor: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPanel {
    pub details: String,
    pub checklist: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageContent {
    Ready(PortfolioView),
    Failed(ErrorPanel),
}

#[derive(Debug, Clone, Serialize)]
pub struct PageModel {
    pub loading: bool,
    pub header_visible: bool,
    pub footer_visible: bool,
    pub nav: Vec<NavLink>,
    pub content: PageContent,
    pub tailor: TailorPanel,
}

impl PageModel {
    /// Expands experience entry `index`, collapsing the others. A no-op on
    /// the error panel or when the index is out of range.
    pub fn expand_experience(&mut self, index: usize) {
        if let PageContent::Ready(view) = &mut self.content {
            view.experience.toggle(index);
        }
    }

    #[cfg(test)]
    pub fn portfolio(&self) -> Option<&PortfolioView> {
        match &self.content {
            PageContent::Ready(view) => Some(view),
            PageContent::Failed(_) => None,
        }
    }

    #[cfg(test)]
    pub fn error_panel(&self) -> Option<&ErrorPanel> {
        match &self.content {
            PageContent::Ready(_) => None,
            PageContent::Failed(panel) => Some(panel),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Error panel
// ────────────────────────────────────────────────────────────────────────────

/// Likely misconfigurations behind a failed load.
pub fn troubleshooting_checklist() -> Vec<String> {
    let tabs = SheetName::ALL
        .iter()
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        "Ensure SHEETS_API_KEY is set to a valid Google Sheets API key.".to_string(),
        "Ensure SPREADSHEET_ID is set to the correct spreadsheet identifier.".to_string(),
        "The Google Sheet must be shared as \"Anyone with the link can view\".".to_string(),
        format!("Sheet tab names must exactly match: {tabs}."),
        "The Google Sheets API must be enabled in your Google Cloud project.".to_string(),
        "The API key restrictions (if any) must allow this host and the Google Sheets API."
            .to_string(),
    ]
}

impl ErrorPanel {
    pub fn from_error(err: &SheetError) -> Self {
        Self {
            details: err.to_string(),
            checklist: troubleshooting_checklist(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Navigation
// ────────────────────────────────────────────────────────────────────────────

/// Links for the rendered sections, in page order. Every section renders
/// (items or placeholder), so every section gets a link.
fn nav_links() -> Vec<NavLink> {
    [
        ("objective", "About"),
        ("skills", "Skills"),
        ("experience", "Experience"),
        ("projects", "Projects"),
        ("education", "Education"),
        ("awards", "Awards"),
        ("testimonials", "Testimonials"),
        ("tailor", "Tailor Resume"),
    ]
    .into_iter()
    .map(|(anchor, label)| NavLink { anchor, label })
    .collect()
}

fn count_available<T>(section: &Section<T>) -> usize {
    usize::from(section.is_available())
}

/// Loads the whole page. Any tab failing aborts every section; the
/// tailoring panel does not depend on sheet data and is always attached.
pub async fn load_page(source: &dyn SheetSource, tailor: TailorPanel) -> PageModel {
    let mut page = PageModel {
        loading: true,
        header_visible: false,
        footer_visible: false,
        nav: Vec::new(),
        content: PageContent::Failed(ErrorPanel {
            details: String::new(),
            checklist: Vec::new(),
        }),
        tailor,
    };

    match fetch_all(source).await {
        Ok(bundle) => {
            let view = PortfolioView::render(&bundle);
            let available = count_available(&view.core_skills)
                + count_available(&view.technical_skills)
                + count_available(&view.experience)
                + count_available(&view.projects)
                + count_available(&view.education)
                + count_available(&view.awards)
                + count_available(&view.testimonials);
            info!(
                "Portfolio rendered: {available}/7 list sections with data, {} experience entries",
                view.experience.items().len()
            );
            page.nav = nav_links();
            page.header_visible = true;
            page.footer_visible = true;
            page.content = PageContent::Ready(view);
        }
        Err(e) => {
            error!("Failed to load portfolio data: {e}");
            page.content = PageContent::Failed(ErrorPanel::from_error(&e));
        }
    }

    page.loading = false;
    page
}
