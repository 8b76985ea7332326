use handlebars::Handlebars;

use crate::errors::AppError;
use crate::page::PageModel;

const PAGE_TEMPLATE: &str = "portfolio";

/// Renders a `PageModel` into the HTML document. Values are HTML-escaped.
pub struct PageRenderer {
    registry: Handlebars<'static>,
}

impl PageRenderer {
    /// Compiles the embedded page template. A broken template fails startup.
    pub fn new() -> anyhow::Result<Self> {
        Self::from_template(include_str!("../templates/portfolio.hbs"))
    }

    fn from_template(template: &str) -> anyhow::Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry
            .register_template_string(PAGE_TEMPLATE, template)
            .map_err(|e| anyhow::anyhow!("page template failed to compile: {e}"))?;
        Ok(Self { registry })
    }

    pub fn render(&self, page: &PageModel) -> Result<String, AppError> {
        self.registry
            .render(PAGE_TEMPLATE, page)
            .map_err(|e| AppError::Render(e.to_string()))
    }
}
