//! Experience timeline with single-expanded-entry accordion state.
//!
//! Row layout: [date, title, company, description]. The description holds
//! `;`-separated points.

use serde::Serialize;

use crate::sheets::{SheetName, SheetTable};

use super::Section;

const DETAILS_UNAVAILABLE: &str = "Details not available.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub date: String,
    pub title: String,
    pub company: String,
    pub points: Vec<String>,
    pub expanded: bool,
}

/// Splits a description on `;`, trimming and dropping empty points.
pub fn split_points(description: &str) -> Vec<String> {
    description
        .split(';')
        .map(str::trim)
        .filter(|point| !point.is_empty())
        .map(String::from)
        .collect()
}

pub fn render_experience(table: &SheetTable) -> Section<TimelineEntry> {
    let entries: Vec<TimelineEntry> = table
        .records(4)
        .enumerate()
        .map(|(i, r)| {
            let points = r.field(3).map(split_points).unwrap_or_default();
            TimelineEntry {
                date: r.field_or(0, "Date N/A"),
                title: r.field_or(1, "Title N/A"),
                company: r.field_or(2, "Company N/A"),
                points: if points.is_empty() {
                    vec![DETAILS_UNAVAILABLE.to_string()]
                } else {
                    points
                },
                expanded: i == 0,
            }
        })
        .collect();

    Section::from_items(
        entries,
        format!(
            "Work experience data not available. Please check sheet \"{}\".",
            SheetName::Experience
        ),
    )
}

impl Section<TimelineEntry> {
    /// Click on entry `index`: it becomes the only expanded entry. Clicking the
    /// entry that is already expanded keeps it expanded; out-of-range is a no-op.
    pub fn toggle(&mut self, index: usize) {
        let Section::Available(entries) = self else {
            return;
        };
        if index >= entries.len() {
            return;
        }
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.expanded = i == index;
        }
    }

    #[cfg(test)]
    pub fn expanded_index(&self) -> Option<usize> {
        self.items().iter().position(|entry| entry.expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_jobs() -> SheetTable {
        SheetTable::from(vec![
            vec!["2022 - Now", "Lead PM", "Acme", "Shipped X; Grew Y ;"],
            vec!["", "", "", ""],
            vec!["2019 - 2022", "PM", "Globex", ""],
            vec!["2017", "Analyst"],
        ])
    }

    fn expanded_count(section: &Section<TimelineEntry>) -> usize {
        section.items().iter().filter(|e| e.expanded).count()
    }

    #[test]
    fn test_split_points_trims_and_drops_empty() {
        assert_eq!(split_points(" a ;; b;  "), vec!["a", "b"]);
        assert!(split_points(" ; ").is_empty());
    }

    #[test]
    fn test_render_skips_blank_rows_and_fills_fallbacks() {
        let section = render_experience(&three_jobs());
        let items = section.items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].points, vec!["Shipped X", "Grew Y"]);
        assert_eq!(items[1].points, vec![DETAILS_UNAVAILABLE]);
        assert_eq!(items[2].company, "Company N/A");
    }

    #[test]
    fn test_first_non_empty_entry_is_expanded_initially() {
        let table = SheetTable::from(vec![vec![" ", "", ""], vec!["2020", "PM", "Acme", "x"]]);
        let section = render_experience(&table);
        assert_eq!(section.expanded_index(), Some(0));
        assert_eq!(section.items()[0].date, "2020");
        assert_eq!(expanded_count(&section), 1);
    }

    #[test]
    fn test_toggle_other_entry_moves_expansion() {
        let mut section = render_experience(&three_jobs());
        section.toggle(2);
        assert_eq!(section.expanded_index(), Some(2));
        assert_eq!(expanded_count(&section), 1);
    }

    #[test]
    fn test_toggle_every_sequence_keeps_exactly_one_expanded() {
        let mut section = render_experience(&three_jobs());
        for click in [1, 1, 0, 2, 2, 7, 0] {
            section.toggle(click);
            assert_eq!(expanded_count(&section), 1, "after click {click}");
        }
        assert_eq!(section.expanded_index(), Some(0));
    }

    #[test]
    fn test_toggle_on_placeholder_is_noop() {
        let mut section = render_experience(&SheetTable::default());
        section.toggle(0);
        assert!(section.placeholder().unwrap().contains("\"Experience\""));
        assert_eq!(section.expanded_index(), None);
    }
}
