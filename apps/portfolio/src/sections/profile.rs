//! Profile tab: a two-column key/value table driving the header, the
//! objective, the contact block and the footer links.

use serde::Serialize;

use crate::sheets::{SheetName, SheetTable};

use super::Section;

pub const KEY_NAME: &str = "Name";
pub const KEY_TITLE: &str = "Title";
pub const KEY_PICTURE: &str = "ProfileImageURL";
pub const KEY_RESUME: &str = "ResumePDFURL";
pub const KEY_OBJECTIVE: &str = "Objective";
pub const KEY_LINKEDIN: &str = "LinkedInURL";
pub const KEY_EMAIL: &str = "Email";
pub const KEY_PHONE: &str = "Phone";
pub const KEY_LOCATION: &str = "Location";

const PICTURE_FALLBACK: &str = "https://via.placeholder.com/160";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    LinkedIn,
    Email,
    Phone,
    Location,
}

/// One entry of the contact block. `href` is `None` for plain-text entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactItem {
    pub kind: ContactKind,
    pub label: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub title: String,
    pub picture_url: String,
    pub resume_url: String,
    pub objective: String,
    pub contacts: Section<ContactItem>,
    /// Shown in the footer only when the profile provides them.
    pub footer_linkedin: Option<String>,
    pub footer_email: Option<String>,
}

/// Value for `key` in the profile table, or an empty string.
pub fn profile_value<'a>(table: &'a SheetTable, key: &str) -> &'a str {
    table.lookup(key)
}

/// Prefixes `https://` unless the value already carries a known scheme.
pub fn normalize_link(raw: &str) -> String {
    let value = raw.trim();
    const SCHEMES: [&str; 4] = ["http://", "https://", "mailto:", "tel:"];
    if SCHEMES.iter().any(|scheme| value.starts_with(scheme)) {
        value.to_string()
    } else {
        format!("https://{value}")
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

pub fn render_profile(table: &SheetTable) -> ProfileView {
    let linkedin = Some(profile_value(table, KEY_LINKEDIN))
        .filter(|v| !v.is_empty())
        .map(normalize_link);
    let email = Some(profile_value(table, KEY_EMAIL)).filter(|v| !v.is_empty());

    let mut contacts = Vec::new();
    if let Some(href) = &linkedin {
        contacts.push(ContactItem {
            kind: ContactKind::LinkedIn,
            label: "LinkedIn".to_string(),
            href: Some(href.clone()),
        });
    }
    if let Some(address) = email {
        contacts.push(ContactItem {
            kind: ContactKind::Email,
            label: address.to_string(),
            href: Some(format!("mailto:{address}")),
        });
    }
    for (key, kind) in [(KEY_PHONE, ContactKind::Phone), (KEY_LOCATION, ContactKind::Location)] {
        let text = profile_value(table, key);
        if !text.is_empty() {
            contacts.push(ContactItem {
                kind,
                label: text.to_string(),
                href: None,
            });
        }
    }

    ProfileView {
        name: or_fallback(profile_value(table, KEY_NAME), "Name N/A"),
        title: or_fallback(profile_value(table, KEY_TITLE), "Title N/A"),
        picture_url: or_fallback(profile_value(table, KEY_PICTURE), PICTURE_FALLBACK),
        resume_url: or_fallback(profile_value(table, KEY_RESUME), "#"),
        objective: or_fallback(
            profile_value(table, KEY_OBJECTIVE),
            &format!(
                "Career objective could not be loaded. Please check sheet \"{}\".",
                SheetName::Profile
            ),
        ),
        contacts: Section::from_items(contacts, "Contact details not available."),
        footer_linkedin: linkedin,
        footer_email: email.map(|address| format!("mailto:{address}")),
    }
}
