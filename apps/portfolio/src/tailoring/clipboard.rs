//! Feedback for the copy-to-clipboard button. The copy itself runs in the
//! browser; the page carries these values on the button's data attributes.

use std::time::Duration;

use serde::Serialize;

/// How long the copy confirmation (or failure) indicator stays visible.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_secs(2);

/// Transient indicator shown after a copy attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopyFeedback {
    pub success: bool,
    pub message: String,
    pub visible_for_ms: u64,
}

impl CopyFeedback {
    pub fn copied() -> Self {
        Self {
            success: true,
            message: "Copied to clipboard!".to_string(),
            visible_for_ms: COPY_FEEDBACK_DURATION.as_millis() as u64,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: "Copy failed. Please select the text and copy it manually.".to_string(),
            visible_for_ms: COPY_FEEDBACK_DURATION.as_millis() as u64,
        }
    }
}
