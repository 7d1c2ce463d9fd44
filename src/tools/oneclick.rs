//! One-Click Draft: a single form, then a complete template draft.

use crate::wizard::{Requirement, Rule, StepDef, WizardSession};

use super::{FieldSpec, InputKind, StepLayout};

pub static STEPS: &[StepDef] = &[
    StepDef {
        index: 1,
        title: "Topic",
        description: "Title, description and keywords",
        required: &[
            Requirement {
                field: "title",
                rule: Rule::NonEmptyText,
            },
            Requirement {
                field: "description",
                rule: Rule::NonEmptyText,
            },
        ],
    },
    StepDef {
        index: 2,
        title: "Draft",
        description: "Your generated draft",
        required: &[],
    },
];

const TOPIC_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "title",
        label: "Blog Title",
        placeholder: "Enter your blog title...",
        kind: InputKind::Line,
    },
    FieldSpec {
        name: "description",
        label: "Description",
        placeholder: "Describe what you want to write about...",
        kind: InputKind::Paragraph,
    },
    FieldSpec {
        name: "keywords",
        label: "Keywords",
        placeholder: "Enter keywords separated by commas...",
        kind: InputKind::Line,
    },
];

pub fn layout(step: usize) -> StepLayout {
    match step {
        1 => StepLayout::Form(TOPIC_FIELDS),
        _ => StepLayout::Output,
    }
}

/// Template draft interpolated from the topic form.
pub fn compose(session: &WizardSession) -> String {
    let title = session.text("title").trim();
    let description = session.text("description").trim();
    let keywords: Vec<&str> = session
        .text("keywords")
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect();

    let mut out = format!("{title}\n\n{description}\n\n");
    out.push_str(&format!(
        "Understanding {title} starts with the fundamentals. This guide walks through the \
         ideas that matter most, why they matter, and how to put them to work.\n\n"
    ));
    if !keywords.is_empty() {
        out.push_str(&format!(
            "Along the way we'll touch on {}, with practical examples for each.\n\n",
            keywords.join(", ")
        ));
    }
    out.push_str(
        "Start small, measure what changes, and iterate. The best results come from \
         consistent, focused effort rather than one-off pushes.\n",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolKind;

    #[test]
    fn generate_button_stays_blocked_without_title_and_description() {
        let mut s = ToolKind::OneClick.new_session();
        s.set_text("title", "Composting 101");
        assert!(!s.can_advance());
        s.set_text("description", "A starter guide to composting at home.");
        assert!(s.can_advance());
    }

    #[test]
    fn compose_interpolates_topic_and_keywords() {
        let mut s = ToolKind::OneClick.new_session();
        s.set_text("title", "Composting 101");
        s.set_text("description", "A starter guide.");
        s.set_text("keywords", "soil, worms");
        let draft = compose(&s);
        assert!(draft.starts_with("Composting 101"));
        assert!(draft.contains("soil, worms"));
    }
}
