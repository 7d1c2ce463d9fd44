//! Step by Step Content Builder: describe, pick a title, pick an outline,
//! write, review.

use crate::wizard::{Requirement, Rule, StepDef, WizardSession};

use super::{FieldSpec, InputKind, StepLayout};

pub static STEPS: &[StepDef] = &[
    StepDef {
        index: 1,
        title: "Basic Info",
        description: "Start with a description and keywords",
        required: &[Requirement {
            field: "description",
            rule: Rule::NonEmptyText,
        }],
    },
    StepDef {
        index: 2,
        title: "Title Selection",
        description: "Choose the perfect title",
        required: &[Requirement {
            field: "title",
            rule: Rule::ChoiceMade,
        }],
    },
    StepDef {
        index: 3,
        title: "Content Outline",
        description: "Select the best structure",
        required: &[Requirement {
            field: "outline",
            rule: Rule::ChoiceMade,
        }],
    },
    StepDef {
        index: 4,
        title: "Content Writing",
        description: "Create your content",
        required: &[Requirement {
            field: "content",
            rule: Rule::NonEmptyText,
        }],
    },
    StepDef {
        index: 5,
        title: "Final Content",
        description: "Review and finish",
        required: &[],
    },
];

const BASIC_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "description",
        label: "Content Description",
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

const WRITING_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "content",
    label: "Content",
    placeholder: "Start writing your content...",
    kind: InputKind::Paragraph,
}];

/// Canned title suggestions offered on step 2.
pub const TITLES: &[&str] = &[
    "The Ultimate Guide to Effective Content Creation",
    "10 Proven Strategies for Engaging Content",
    "How to Create Content That Converts",
    "Content Creation: A Step-by-Step Guide",
    "Mastering the Art of Content Writing",
];

pub const OUTLINES: &[&str] = &[
    "1. Introduction\n2. Understanding Your Audience\n3. Creating Engaging Content\n4. Optimizing for SEO\n5. Measuring Success",
    "1. Content Strategy Basics\n2. Research and Planning\n3. Writing Techniques\n4. Content Distribution\n5. Analytics and Improvement",
    "1. Content Goals\n2. Target Audience Analysis\n3. Content Structure\n4. Writing Process\n5. Review and Optimize",
];

pub fn layout(step: usize) -> StepLayout {
    match step {
        1 => StepLayout::Form(BASIC_FIELDS),
        2 => StepLayout::Pick {
            field: "title",
            options: TITLES,
        },
        3 => StepLayout::Pick {
            field: "outline",
            options: OUTLINES,
        },
        4 => StepLayout::Form(WRITING_FIELDS),
        _ => StepLayout::Output,
    }
}

pub fn selected_title(session: &WizardSession) -> &'static str {
    session
        .choice("title")
        .and_then(|i| TITLES.get(i))
        .copied()
        .unwrap_or("Untitled Draft")
}

fn selected_outline(session: &WizardSession) -> &'static str {
    session
        .choice("outline")
        .and_then(|i| OUTLINES.get(i))
        .copied()
        .unwrap_or("")
}

/// Assemble the reviewed draft shown on the final step.
pub fn compose(session: &WizardSession) -> String {
    let mut out = String::new();
    out.push_str(selected_title(session));
    out.push_str("\n\n");
    let outline = selected_outline(session);
    if !outline.is_empty() {
        out.push_str("Outline:\n");
        out.push_str(outline);
        out.push_str("\n\n");
    }
    out.push_str(session.text("content"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolKind;

    #[test]
    fn walks_all_five_steps_with_valid_input() {
        let mut s = ToolKind::Guided.new_session();
        assert!(!s.advance());
        s.set_text("description", "A piece about gardening");
        assert!(s.advance());

        assert!(!s.advance());
        s.set_choice("title", 2);
        assert!(s.advance());

        s.set_choice("outline", 0);
        assert!(s.advance());

        s.set_text("content", "Full draft body.");
        assert!(s.advance());
        assert!(s.is_last());
        assert_eq!(s.current_step(), 5);
    }

    #[test]
    fn compose_joins_title_outline_and_body() {
        let mut s = ToolKind::Guided.new_session();
        s.set_choice("title", 0);
        s.set_choice("outline", 1);
        s.set_text("content", "Body text.");
        let draft = compose(&s);
        assert!(draft.starts_with(TITLES[0]));
        assert!(draft.contains("Content Strategy Basics"));
        assert!(draft.ends_with("Body text."));
    }
}
