//! HTTP backend for `SheetSource` over the spreadsheet values endpoint.
//!
//! `GET {base}/spreadsheets/{id}/values/{tab}?key={key}` returns
//! `{"values": [[...], ...]}`; the field is absent when the tab is empty.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{error, info, warn};

use super::{SheetError, SheetName, SheetSource, SheetTable, StatusDiagnosis};

const SPREADSHEET_ID_PLACEHOLDER: &str = "YOUR_SPREADSHEET_ID";
const API_KEY_PLACEHOLDER: &str = "YOUR_GOOGLE_SHEETS_API_KEY";
const CLIENT_SECRET_PREFIX: &str = "GOCSPX-";

/// Credentials for the values endpoint.
#[derive(Debug, Clone)]
pub struct SheetsCredentials {
    pub api_key: String,
    pub spreadsheet_id: String,
}

impl SheetsCredentials {
    /// Rejects empty and known placeholder values before anything touches the network.
    pub fn validate(&self) -> Result<(), SheetError> {
        let id = self.spreadsheet_id.trim();
        if id.is_empty() || id == SPREADSHEET_ID_PLACEHOLDER {
            return Err(SheetError::Config(format!(
                "The spreadsheet ID ('{id}') is a placeholder or empty. \
                 Set SPREADSHEET_ID to the ID of your workbook."
            )));
        }

        let key = self.api_key.trim();
        if key.is_empty() || key == API_KEY_PLACEHOLDER {
            return Err(SheetError::Config(format!(
                "The Google Sheets API key ('{key}') is a placeholder or empty. \
                 Set SHEETS_API_KEY to a valid API key."
            )));
        }
        if key.starts_with(CLIENT_SECRET_PREFIX) {
            return Err(SheetError::Config(
                "SHEETS_API_KEY looks like an OAuth client secret, not an API key. \
                 Use a Google Sheets API key instead."
                    .to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Reads tabs from the spreadsheet API. Cheap to clone.
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    base_url: String,
    credentials: SheetsCredentials,
}

impl SheetsClient {
    pub fn new(base_url: String, credentials: SheetsCredentials) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
            credentials,
        })
    }

    /// Builds the values URL with every path segment percent-encoded.
    fn values_url(&self, sheet: SheetName) -> Result<Url, SheetError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            SheetError::Config(format!("SHEETS_API_BASE is not a valid URL: {e}"))
        })?;
        url.path_segments_mut()
            .map_err(|_| SheetError::Config("SHEETS_API_BASE cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend([
                "spreadsheets",
                self.credentials.spreadsheet_id.trim(),
                "values",
                sheet.as_str(),
            ]);
        url.query_pairs_mut()
            .append_pair("key", self.credentials.api_key.trim());
        Ok(url)
    }
}

#[async_trait]
impl SheetSource for SheetsClient {
    async fn fetch(&self, sheet: SheetName) -> Result<SheetTable, SheetError> {
        self.credentials.validate()?;
        let url = self.values_url(sheet)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SheetError::Transport { sheet, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Error fetching sheet {sheet}: {status}: {body}");
            return Err(SheetError::Status {
                sheet,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                body,
                diagnosis: StatusDiagnosis::from_status(status.as_u16()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| SheetError::Transport { sheet, source })?;
        let table = decode_values(sheet, &body)?;
        if table.is_empty() {
            warn!("Sheet {sheet} returned no rows");
        } else {
            info!("Fetched sheet {sheet}: {} rows", table.len());
        }
        Ok(table)
    }
}

fn decode_values(sheet: SheetName, body: &str) -> Result<SheetTable, SheetError> {
    let range: ValueRange = serde_json::from_str(body).map_err(|e| SheetError::Decode {
        sheet,
        message: e.to_string(),
    })?;
    Ok(SheetTable::new(range.values))
}
