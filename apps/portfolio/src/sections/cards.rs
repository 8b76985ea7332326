//! Card grids: projects, education, testimonials.

use serde::Serialize;

use crate::sheets::{SheetName, SheetTable};

use super::Section;

/// Projects row: [name, description].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCard {
    pub name: String,
    pub description: String,
}

/// Education row: [degree, institution, year].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

/// Testimonials row: [quote, author].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
}

fn unavailable(label: &str, sheet: SheetName) -> String {
    format!("{label} data not available. Please check sheet \"{sheet}\".")
}

pub fn render_projects(table: &SheetTable) -> Section<ProjectCard> {
    let cards = table
        .records(2)
        .map(|r| ProjectCard {
            name: r.field_or(0, "Project Name N/A"),
            description: r.field_or(1, "Description not available."),
        })
        .collect();
    Section::from_items(cards, unavailable("Project", SheetName::Projects))
}

pub fn render_education(table: &SheetTable) -> Section<EducationEntry> {
    let entries = table
        .records(3)
        .map(|r| EducationEntry {
            degree: r.field_or(0, "Degree N/A"),
            institution: r.field_or(1, "Institution N/A"),
            year: r.field_or(2, "Year N/A"),
        })
        .collect();
    Section::from_items(entries, unavailable("Education", SheetName::Education))
}

pub fn render_testimonials(table: &SheetTable) -> Section<Testimonial> {
    let cards = table
        .records(2)
        .map(|r| Testimonial {
            quote: r.field_or(0, "Quote not available."),
            author: r.field_or(1, "Author N/A"),
        })
        .collect();
    Section::from_items(cards, unavailable("Testimonial", SheetName::Testimonials))
}
