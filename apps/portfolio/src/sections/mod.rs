//! Section renderers: pure `SheetTable → view model` conversions.
//!
//! Nothing here knows about HTML. The page template (or any other
//! presentation layer) consumes the serialized view model.

pub mod cards;
pub mod experience;
pub mod lists;
pub mod profile;

use serde::Serialize;

use crate::sheets::SheetBundle;

pub use cards::{EducationEntry, ProjectCard, Testimonial};
pub use experience::TimelineEntry;
pub use profile::ProfileView;

/// Rendered body of a page region: at least one item, or a single placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section<T> {
    Available(Vec<T>),
    Unavailable(String),
}

impl<T> Section<T> {
    /// Wraps `items`, falling back to `placeholder` when there are none.
    pub fn from_items(items: Vec<T>, placeholder: impl Into<String>) -> Self {
        if items.is_empty() {
            Section::Unavailable(placeholder.into())
        } else {
            Section::Available(items)
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Section::Available(items) => items,
            Section::Unavailable(_) => &[],
        }
    }

    #[cfg(test)]
    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Section::Available(_) => None,
            Section::Unavailable(message) => Some(message),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Section::Available(_))
    }
}

/// Everything the page shows when all tabs loaded.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioView {
    pub profile: ProfileView,
    pub core_skills: Section<String>,
    pub technical_skills: Section<String>,
    pub experience: Section<TimelineEntry>,
    pub projects: Section<ProjectCard>,
    pub education: Section<EducationEntry>,
    pub awards: Section<String>,
    pub testimonials: Section<Testimonial>,
}

impl PortfolioView {
    /// Runs every renderer in page order: profile, skills, experience,
    /// projects, education, awards, testimonials.
    pub fn render(bundle: &SheetBundle) -> Self {
        let profile = profile::render_profile(&bundle.profile);
        let (core_skills, technical_skills) =
            lists::render_skills(&bundle.skills_core, &bundle.skills_technical);
        let experience = experience::render_experience(&bundle.experience);
        let projects = cards::render_projects(&bundle.projects);
        let education = cards::render_education(&bundle.education);
        let awards = lists::render_awards(&bundle.awards);
        let testimonials = cards::render_testimonials(&bundle.testimonials);

        Self {
            profile,
            core_skills,
            technical_skills,
            experience,
            projects,
            education,
            awards,
            testimonials,
        }
    }
}
