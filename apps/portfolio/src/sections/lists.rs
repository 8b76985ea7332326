//! Single-column lists: core skills, technical skills, awards.

use crate::sheets::{SheetName, SheetTable};

use super::Section;

const SKILLS_UNAVAILABLE: &str = "Skills data not available.";

/// Names from column 1, blank rows skipped.
fn render_name_list(table: &SheetTable, placeholder: &str) -> Section<String> {
    let names = table
        .records(1)
        .filter_map(|record| record.field(0).map(String::from))
        .collect();
    Section::from_items(names, placeholder)
}

/// Core and technical skills render independently; each gets its own placeholder.
pub fn render_skills(
    core: &SheetTable,
    technical: &SheetTable,
) -> (Section<String>, Section<String>) {
    (
        render_name_list(core, SKILLS_UNAVAILABLE),
        render_name_list(technical, SKILLS_UNAVAILABLE),
    )
}

pub fn render_awards(table: &SheetTable) -> Section<String> {
    render_name_list(
        table,
        &format!(
            "Awards data not available. Please check sheet \"{}\".",
            SheetName::Awards
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_skip_blank_rows() {
        let core = SheetTable::from(vec![vec!["skillA"], vec!["  "], vec!["skillB"]]);
        let (core, technical) = render_skills(&core, &SheetTable::default());

        assert_eq!(core.items(), ["skillA".to_string(), "skillB".to_string()]);
        assert_eq!(technical.placeholder(), Some(SKILLS_UNAVAILABLE));
    }

    #[test]
    fn test_skill_names_are_trimmed() {
        let (core, _) = render_skills(
            &SheetTable::from(vec![vec!["  Roadmapping  ", "ignored"]]),
            &SheetTable::default(),
        );
        assert_eq!(core.items(), ["Roadmapping".to_string()]);
    }

    #[test]
    fn test_awards_all_blank_is_placeholder() {
        let awards = render_awards(&SheetTable::from(vec![vec![" "], vec![""]]));
        assert!(awards.items().is_empty());
        assert!(awards.placeholder().unwrap().contains("\"Awards\""));
    }

    #[test]
    fn test_awards_keep_row_order() {
        let awards = render_awards(&SheetTable::from(vec![vec!["Gold"], vec!["Silver"]]));
        assert_eq!(awards.items(), ["Gold".to_string(), "Silver".to_string()]);
    }
}
