//! Filtering and rendering of note content by classification.

use tracing::debug;

use crate::classify::{Classification, classify};
use crate::grammar::TagGrammar;

use super::types::{
    DisplayLine, FilterOutcome, FilterSelection, FilterStatus, RenderMode, TagFilter,
};

/// Applies the classifier across every line of a note.
#[derive(Debug, Clone, Copy)]
pub struct NoteFilterEngine<'g> {
    grammar: &'g TagGrammar,
    include_unmatched_general_text: bool,
}

impl<'g> NoteFilterEngine<'g> {
    /// Untagged lines are included in multi-filter views by default.
    pub fn new(grammar: &'g TagGrammar) -> Self {
        Self { grammar, include_unmatched_general_text: true }
    }

    /// Choose whether untagged lines appear in [`Self::apply_multi_filter`] results.
    pub fn include_unmatched_general_text(mut self, include: bool) -> Self {
        self.include_unmatched_general_text = include;
        self
    }

    /// Version of the grammar the engine classifies with.
    pub fn grammar_version(&self) -> u64 {
        self.grammar.version()
    }

    /// Lines carrying the given tag, trimmed, tagged with the matched classification.
    pub fn filter_by_classification(&self, content: &str, filter: &TagFilter) -> FilterOutcome {
        let lines: Vec<DisplayLine> = content
            .split('\n')
            .filter_map(|line| {
                let stripped = line.trim();
                classify(stripped, self.grammar)
                    .into_iter()
                    .find(|c| filter.matches(c))
                    .map(|c| DisplayLine::new(stripped, c))
            })
            .collect();

        debug!(filter = filter.name(), matched = lines.len(), "filtered note");
        FilterOutcome::from_lines(lines, || {
            format!("no lines found for '{}' in this note", filter.name())
        })
    }

    /// Lines matching any selected value in any dimension.
    ///
    /// The first classification that matches (roles, then Eisenhower, then
    /// task type) colors the line. With an empty selection the note is passed
    /// through as [`Self::render_all`] in role mode.
    pub fn apply_multi_filter(&self, content: &str, selection: &FilterSelection) -> FilterOutcome {
        if selection.is_empty() {
            return FilterOutcome {
                lines: self.render_all(content, RenderMode::Role),
                status: FilterStatus::Unfiltered,
            };
        }

        let mut lines = Vec::new();
        for line in content.split('\n') {
            let stripped = line.trim();
            if stripped.is_empty() {
                continue;
            }

            let tags = classify(stripped, self.grammar);
            if let Some(hit) = tags.iter().find(|c| selection.selects(c)) {
                lines.push(DisplayLine::new(stripped, hit.clone()));
            } else if self.include_unmatched_general_text
                && tags.iter().any(Classification::is_general_text)
            {
                lines.push(DisplayLine::new(stripped, Classification::GeneralText));
            }
        }

        debug!(selected = selection.len(), matched = lines.len(), "applied multi filter");
        FilterOutcome::from_lines(lines, || "no lines match the active filters".to_string())
    }

    /// Every line of the note, colored by its preferred tag.
    ///
    /// Role mode prefers the first role, then the Eisenhower quadrant;
    /// Eisenhower mode prefers them the other way round. Task types never
    /// color a full render. Lines are kept verbatim.
    pub fn render_all(&self, content: &str, mode: RenderMode) -> Vec<DisplayLine> {
        content
            .split('\n')
            .map(|line| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                let tags = classify(line, self.grammar);
                DisplayLine::new(line, preferred_tag(&tags, mode))
            })
            .collect()
    }
}

fn preferred_tag(tags: &[Classification], mode: RenderMode) -> Classification {
    let role = tags.iter().find(|c| matches!(c, Classification::Role(_)));
    let quadrant = tags.iter().find(|c| matches!(c, Classification::Eisenhower(_)));

    let preferred = match mode {
        RenderMode::Role => role.or(quadrant),
        RenderMode::Eisenhower => quadrant.or(role),
    };
    preferred.cloned().unwrap_or(Classification::GeneralText)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{EisenhowerCategory, TaskType};

    const NOTE: &str = "# Semana

[Programador][E:HA] fix login bug
[Trabajo] [T:TAREA] send report
[E:P][T:IDEA] blog post
buy milk

[Social][Trabajo] team dinner";

    fn grammar() -> TagGrammar {
        TagGrammar::new(["Programador", "Social", "Trabajo"]).unwrap()
    }

    fn render(lines: &[DisplayLine]) -> String {
        lines
            .iter()
            .map(|l| format!("{}: {}", l.display_tag(), l.text).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_filter_by_role() {
        let g = grammar();
        let outcome = NoteFilterEngine::new(&g)
            .filter_by_classification(NOTE, &TagFilter::Role("Trabajo".into()));

        let texts: Vec<_> = outcome.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["[Trabajo] [T:TAREA] send report", "[Social][Trabajo] team dinner"]);
        assert!(outcome.lines.iter().all(|l| l.display_tag() == "Trabajo"));
        assert_eq!(outcome.status, FilterStatus::Matched(2));
    }

    #[test]
    fn test_filter_by_eisenhower_and_task_type_tags() {
        let g = grammar();
        let engine = NoteFilterEngine::new(&g);

        let urgent = engine.filter_by_classification(
            NOTE,
            &TagFilter::Eisenhower(EisenhowerCategory::HacerAhora),
        );
        assert_eq!(urgent.lines.len(), 1);
        assert_eq!(urgent.lines[0].display_tag(), "EISENHOWER_HACER_AHORA");

        let ideas = engine.filter_by_classification(NOTE, &TagFilter::TaskType(TaskType::Idea));
        assert_eq!(ideas.lines[0].text, "[E:P][T:IDEA] blog post");
        assert_eq!(ideas.lines[0].display_tag(), "TASK_TYPE_IDEA");
    }

    #[test]
    fn test_filter_without_matches_reports_status() {
        let g = grammar();
        let outcome = NoteFilterEngine::new(&g)
            .filter_by_classification(NOTE, &TagFilter::Eisenhower(EisenhowerCategory::Delegar));

        assert!(!outcome.has_matches());
        assert!(matches!(outcome.status, FilterStatus::NoMatches(ref m) if m.contains("DELEGAR")));
    }

    #[test]
    fn test_multi_filter_with_general_text() {
        let g = grammar();
        let selection = FilterSelection::new()
            .with_role("Social")
            .with_eisenhower(EisenhowerCategory::HacerAhora);
        let outcome = NoteFilterEngine::new(&g).apply_multi_filter(NOTE, &selection);

        assert_eq!(
            render(&outcome.lines),
            "general_text: # Semana\n\
             EISENHOWER_HACER_AHORA: [Programador][E:HA] fix login bug\n\
             general_text: buy milk\n\
             Social: [Social][Trabajo] team dinner"
        );
    }

    #[test]
    fn test_multi_filter_strict() {
        let g = grammar();
        let selection = FilterSelection::new()
            .with_role("Trabajo")
            .with_task_type(TaskType::Idea);
        let outcome = NoteFilterEngine::new(&g)
            .include_unmatched_general_text(false)
            .apply_multi_filter(NOTE, &selection);

        let tags: Vec<_> = outcome.lines.iter().map(DisplayLine::display_tag).collect();
        assert_eq!(tags, ["Trabajo", "TASK_TYPE_IDEA", "Trabajo"]);
    }

    #[test]
    fn test_multi_filter_first_match_wins_in_scan_order() {
        let g = grammar();
        let selection = FilterSelection::new()
            .with_role("Trabajo")
            .with_role("Social");
        let outcome = NoteFilterEngine::new(&g)
            .include_unmatched_general_text(false)
            .apply_multi_filter("[Trabajo][Social] x", &selection);
        assert_eq!(outcome.lines[0].display_tag(), "Trabajo");
    }

    #[test]
    fn test_multi_filter_no_matches() {
        let g = grammar();
        let selection = FilterSelection::new().with_task_type(TaskType::Proyecto);
        let outcome = NoteFilterEngine::new(&g)
            .include_unmatched_general_text(false)
            .apply_multi_filter(NOTE, &selection);

        assert!(outcome.lines.is_empty());
        assert!(matches!(outcome.status, FilterStatus::NoMatches(_)));
    }

    #[test]
    fn test_empty_selection_passes_through() {
        let g = grammar();
        let engine = NoteFilterEngine::new(&g);
        let outcome = engine.apply_multi_filter(NOTE, &FilterSelection::default());

        assert_eq!(outcome.status, FilterStatus::Unfiltered);
        assert_eq!(outcome.lines, engine.render_all(NOTE, RenderMode::Role));
    }

    #[test]
    fn test_render_all_role_mode() {
        let g = grammar();
        let lines = NoteFilterEngine::new(&g).render_all(NOTE, RenderMode::Role);

        insta::assert_snapshot!(render(&lines), @r"
        general_text: # Semana
        general_text:
        Programador: [Programador][E:HA] fix login bug
        Trabajo: [Trabajo] [T:TAREA] send report
        EISENHOWER_PLANIFICAR: [E:P][T:IDEA] blog post
        general_text: buy milk
        general_text:
        Social: [Social][Trabajo] team dinner
        ");
    }

    #[test]
    fn test_render_all_eisenhower_mode_prefers_quadrant() {
        let g = grammar();
        let lines = NoteFilterEngine::new(&g).render_all(NOTE, RenderMode::Eisenhower);

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[2].display_tag(), "EISENHOWER_HACER_AHORA");
        assert_eq!(lines[3].display_tag(), "Trabajo");
        assert_eq!(lines[5].display_tag(), "general_text");
    }

    #[test]
    fn test_engine_reports_grammar_version() {
        let mut g = grammar();
        g.add_role("Tesista").unwrap();
        assert_eq!(NoteFilterEngine::new(&g).grammar_version(), 1);
    }
}
