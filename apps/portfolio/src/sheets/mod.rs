//! Sheet data: the eight named tabs that feed the portfolio page.
//!
//! Every tab is read as a row-major grid of strings. Column meaning is
//! positional and owned by the section renderer that consumes the tab.
//! Row 1 is always data: no tab carries a header row.

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::{SheetsClient, SheetsCredentials};

// ────────────────────────────────────────────────────────────────────────────
// Tab names
// ────────────────────────────────────────────────────────────────────────────

/// The tabs the page is built from. `as_str` must match the workbook exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetName {
    Profile,
    SkillsCore,
    SkillsTechnical,
    Experience,
    Projects,
    Education,
    Awards,
    Testimonials,
}

impl SheetName {
    pub const ALL: [SheetName; 8] = [
        SheetName::Profile,
        SheetName::SkillsCore,
        SheetName::SkillsTechnical,
        SheetName::Experience,
        SheetName::Projects,
        SheetName::Education,
        SheetName::Awards,
        SheetName::Testimonials,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SheetName::Profile => "Profile",
            SheetName::SkillsCore => "SkillsCore",
            SheetName::SkillsTechnical => "SkillsTechnical",
            SheetName::Experience => "Experience",
            SheetName::Projects => "Projects",
            SheetName::Education => "Education",
            SheetName::Awards => "Awards",
            SheetName::Testimonials => "Testimonials",
        }
    }
}

impl std::fmt::Display for SheetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Table model
// ────────────────────────────────────────────────────────────────────────────

/// A fetched tab. Rows may be ragged or short; readers must tolerate missing cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetTable {
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with at least one non-blank cell among the first `width` columns.
    pub fn records(&self, width: usize) -> impl Iterator<Item = Record<'_>> {
        self.rows
            .iter()
            .map(|cells| Record { cells })
            .filter(move |record| (0..width).any(|i| record.field(i).is_some()))
    }

    /// First row whose first cell equals `key` exactly; returns its trimmed
    /// second cell, or an empty string when the key or value is missing.
    pub fn lookup(&self, key: &str) -> &str {
        self.rows
            .iter()
            .find(|row| row.first().map(String::as_str) == Some(key))
            .and_then(|row| row.get(1))
            .map(|value| value.trim())
            .unwrap_or("")
    }
}

impl From<Vec<Vec<&str>>> for SheetTable {
    fn from(rows: Vec<Vec<&str>>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(String::from).collect())
                .collect(),
        )
    }
}

/// One non-blank row, read positionally.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    cells: &'a [String],
}

impl<'a> Record<'a> {
    /// Trimmed cell at `index`, or `None` when the cell is missing or blank.
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.cells
            .get(index)
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
    }

    pub fn field_or(&self, index: usize, fallback: &str) -> String {
        self.field(index).unwrap_or(fallback).to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Guidance attached to a non-success status from the values endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusDiagnosis {
    PermissionOrEnablement,
    MalformedRequest,
    NotFound,
    Unclassified,
}

impl StatusDiagnosis {
    pub fn from_status(status: u16) -> Self {
        match status {
            403 => StatusDiagnosis::PermissionOrEnablement,
            400 => StatusDiagnosis::MalformedRequest,
            404 => StatusDiagnosis::NotFound,
            _ => StatusDiagnosis::Unclassified,
        }
    }

    pub fn guidance(&self, sheet: &SheetName) -> String {
        match self {
            StatusDiagnosis::PermissionOrEnablement => "This is usually a permission or \
                enablement problem: the Google Sheets API is not enabled for the project, the \
                API key is invalid or restricted, or the sheet is not shared as 'Anyone with \
                the link can view'."
                .to_string(),
            StatusDiagnosis::MalformedRequest => "This often indicates an 'API key not valid' \
                error or a problem with the request itself. Double-check SHEETS_API_KEY."
                .to_string(),
            StatusDiagnosis::NotFound => format!(
                "The spreadsheet or the tab named \"{sheet}\" might not exist. \
                 Check SPREADSHEET_ID and the tab name."
            ),
            StatusDiagnosis::Unclassified => String::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SheetError {
    /// Detected before any network call.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "Could not fetch data for sheet \"{sheet}\". Status: {status} {reason}. Response: {body}. {}",
        .diagnosis.guidance(.sheet)
    )]
    Status {
        sheet: SheetName,
        status: u16,
        reason: String,
        body: String,
        diagnosis: StatusDiagnosis,
    },

    #[error("Failed to reach the spreadsheet API for sheet \"{sheet}\": {source}")]
    Transport {
        sheet: SheetName,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode data for sheet \"{sheet}\": {message}")]
    Decode { sheet: SheetName, message: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Source trait + concurrent fetch
// ────────────────────────────────────────────────────────────────────────────

/// Anything that can produce a tab by name. `SheetsClient` is the HTTP backend.
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch(&self, sheet: SheetName) -> Result<SheetTable, SheetError>;
}

/// All eight tabs, fetched together.
#[derive(Debug, Clone, Default)]
pub struct SheetBundle {
    pub profile: SheetTable,
    pub skills_core: SheetTable,
    pub skills_technical: SheetTable,
    pub experience: SheetTable,
    pub projects: SheetTable,
    pub education: SheetTable,
    pub awards: SheetTable,
    pub testimonials: SheetTable,
}

/// Fetches every tab concurrently. The first failure fails the whole join;
/// no partial bundle is ever returned.
pub async fn fetch_all(source: &dyn SheetSource) -> Result<SheetBundle, SheetError> {
    let (
        profile,
        skills_core,
        skills_technical,
        experience,
        projects,
        education,
        awards,
        testimonials,
    ) = tokio::try_join!(
        source.fetch(SheetName::Profile),
        source.fetch(SheetName::SkillsCore),
        source.fetch(SheetName::SkillsTechnical),
        source.fetch(SheetName::Experience),
        source.fetch(SheetName::Projects),
        source.fetch(SheetName::Education),
        source.fetch(SheetName::Awards),
        source.fetch(SheetName::Testimonials),
    )?;

    Ok(SheetBundle {
        profile,
        skills_core,
        skills_technical,
        experience,
        projects,
        education,
        awards,
        testimonials,
    })
}


#[cfg(test)]
mod tests {
    use super::fakes::FakeSheets;
    use super::*;

    #[test]
    fn test_lookup_returns_trimmed_value_for_exact_key() {
        let table = SheetTable::from(vec![vec!["Name", "  Jane Doe "], vec!["Title", "PM"]]);
        assert_eq!(table.lookup("Name"), "Jane Doe");
        assert_eq!(table.lookup("Title"), "PM");
    }

    #[test]
    fn test_lookup_missing_key_returns_empty() {
        let table = SheetTable::from(vec![vec!["Name", "Jane Doe"]]);
        assert_eq!(table.lookup("Missing"), "");
        assert_eq!(table.lookup("name"), "", "lookup is case-sensitive");
    }

    #[test]
    fn test_lookup_first_match_wins_and_tolerates_short_rows() {
        let table = SheetTable::from(vec![vec!["Email"], vec!["Email", "second@x.io"]]);
        assert_eq!(table.lookup("Email"), "");
    }

    #[test]
    fn test_records_skip_blank_rows() {
        let table = SheetTable::from(vec![vec!["skillA"], vec!["  "], vec![], vec!["skillB"]]);
        let names: Vec<_> = table.records(1).filter_map(|r| r.field(0)).collect();
        assert_eq!(names, vec!["skillA", "skillB"]);
    }

    #[test]
    fn test_records_only_consider_columns_in_width() {
        let table = SheetTable::from(vec![vec!["", "", "extra"]]);
        assert_eq!(table.records(2).count(), 0);
        assert_eq!(table.records(3).count(), 1);
    }

    #[test]
    fn test_record_field_or_uses_fallback_for_missing_cells() {
        let table = SheetTable::from(vec![vec!["2020", " "]]);
        let record = table.records(4).next().unwrap();
        assert_eq!(record.field_or(0, "Date N/A"), "2020");
        assert_eq!(record.field_or(1, "Title N/A"), "Title N/A");
        assert_eq!(record.field_or(3, "Details"), "Details");
    }

    #[test]
    fn test_diagnosis_guidance_for_403_mentions_permissions() {
        let guidance = StatusDiagnosis::from_status(403).guidance(&SheetName::Profile);
        assert!(guidance.contains("not enabled"));
        assert!(guidance.contains("Anyone with the link"));
    }

    #[test]
    fn test_diagnosis_classifies_known_statuses() {
        assert_eq!(StatusDiagnosis::from_status(400), StatusDiagnosis::MalformedRequest);
        assert_eq!(StatusDiagnosis::from_status(404), StatusDiagnosis::NotFound);
        assert_eq!(StatusDiagnosis::from_status(500), StatusDiagnosis::Unclassified);
        assert!(StatusDiagnosis::from_status(404)
            .guidance(&SheetName::Awards)
            .contains("\"Awards\""));
    }

    #[test]
    fn test_status_error_message_includes_guidance() {
        let err = SheetError::Status {
            sheet: SheetName::Experience,
            status: 403,
            reason: "Forbidden".to_string(),
            body: "denied".to_string(),
            diagnosis: StatusDiagnosis::PermissionOrEnablement,
        };
        let msg = err.to_string();
        assert!(msg.contains("\"Experience\""));
        assert!(msg.contains("403"));
        assert!(msg.contains("API key is invalid or restricted"));
    }

    #[tokio::test]
    async fn test_fetch_all_collects_every_tab() {
        let source = FakeSheets::default()
            .with(SheetName::Profile, vec![vec!["Name", "Jane"]])
            .with(SheetName::Awards, vec![vec!["Best PM"]]);

        let bundle = fetch_all(&source).await.unwrap();
        assert_eq!(source.call_count(), 8);
        assert_eq!(bundle.profile.lookup("Name"), "Jane");
        assert_eq!(bundle.awards.len(), 1);
        assert!(bundle.testimonials.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_fails_when_any_tab_fails() {
        let source = FakeSheets::default()
            .with(SheetName::Profile, vec![vec!["Name", "Jane"]])
            .failing_with(SheetName::Education, 403);

        let err = fetch_all(&source).await.unwrap_err();
        assert!(matches!(
            err,
            SheetError::Status {
                sheet: SheetName::Education,
                status: 403,
                ..
            }
        ));
    }

    #[test]
    fn test_sheet_names_are_unique_tab_titles() {
        let mut names: Vec<_> = SheetName::ALL.iter().map(|s| s.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 8);
    }
}
