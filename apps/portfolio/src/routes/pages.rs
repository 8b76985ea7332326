use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};

use serde::Deserialize;

use crate::errors::AppError;
use crate::page::{load_page, PageModel};
use crate::state::AppState;

const PORTFOLIO_JS: &str = include_str!("../../static/portfolio.js");

/// `?expanded=N` selects the open experience entry. Anything that is not an
/// index leaves the default (first entry) open.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    expanded: Option<String>,
}

impl PageQuery {
    fn expanded_index(&self) -> Option<usize> {
        self.expanded.as_deref()?.trim().parse().ok()
    }
}

async fn current_page(state: &AppState, query: &PageQuery) -> PageModel {
    let mut page = load_page(state.sheets.as_ref(), state.tailor.panel()).await;
    if let Some(index) = query.expanded_index() {
        page.expand_experience(index);
    }
    page
}

/// GET /?expanded=N
pub async fn handle_index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let page = current_page(&state, &query).await;
    Ok(Html(state.renderer.render(&page)?))
}

/// GET /api/v1/portfolio?expanded=N
pub async fn handle_portfolio_json(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<PageModel> {
    Json(current_page(&state, &query).await)
}

/// GET /static/portfolio.js
pub async fn handle_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        PORTFOLIO_JS,
    )
}
