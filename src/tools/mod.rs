//! The tool catalog: every drafting tool is a static wizard step table
//! plus pure composition functions over the session payload.

pub mod chatbot;
pub mod comparison;
pub mod guided;
pub mod oneclick;
pub mod optimizer;

use serde::Serialize;

use crate::wizard::{StepDef, WizardSession};

/// A companion free-text field activated when a select's "custom" option
/// is chosen.
#[derive(Debug, Clone, Copy)]
pub struct CustomSlot {
    pub index: usize,
    pub field: &'static str,
    pub label: &'static str,
}

/// How a form field is edited.
#[derive(Debug, Clone, Copy)]
pub enum InputKind {
    /// Single-line text.
    Line,
    /// Multi-line text.
    Paragraph,
    /// Pick one option from a fixed list.
    Select {
        options: &'static [&'static str],
        custom: Option<CustomSlot>,
    },
    /// Small integer adjusted with +/- keys, stored as a choice value.
    Stepper { min: usize, max: usize },
}

/// One editable field on a form step.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: InputKind,
}

/// What the wizard panel shows for a given step.
#[derive(Debug, Clone, Copy)]
pub enum StepLayout {
    /// A plain form of editable fields.
    Form(&'static [FieldSpec]),
    /// Pick one item from a bank of canned options into `field`.
    Pick {
        field: &'static str,
        options: &'static [&'static str],
    },
    /// Product entry grid (comparison tool, step 2).
    Products,
    /// Paragraph parts with per-part keywords (optimizer, step 2).
    Parts,
    /// Chat transcript plus input line (chatbot studio, step 2).
    Chat,
    /// Read-only review of the composed draft.
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    Guided,
    Chatbot,
    Comparison,
    Optimizer,
    OneClick,
}

/// Catalog order shown in the tool list.
pub const CATALOG: &[ToolKind] = &[
    ToolKind::Guided,
    ToolKind::Chatbot,
    ToolKind::Comparison,
    ToolKind::Optimizer,
    ToolKind::OneClick,
];

impl ToolKind {
    pub fn title(self) -> &'static str {
        match self {
            ToolKind::Guided => "Step by Step Content Builder",
            ToolKind::Chatbot => "Chatbot Studio",
            ToolKind::Comparison => "Product Comparison Builder",
            ToolKind::Optimizer => "Content Optimizer",
            ToolKind::OneClick => "One-Click Draft",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            ToolKind::Guided => "Create content in 5 guided steps",
            ToolKind::Chatbot => "Configure an assistant, then talk to it",
            ToolKind::Comparison => "Build a product comparison article",
            ToolKind::Optimizer => "Weave keywords through existing copy",
            ToolKind::OneClick => "A full draft from a single form",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ToolKind::Guided => "guided",
            ToolKind::Chatbot => "chatbot",
            ToolKind::Comparison => "comparison",
            ToolKind::Optimizer => "optimizer",
            ToolKind::OneClick => "one-click",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        CATALOG.iter().copied().find(|t| t.slug() == s)
    }

    pub fn steps(self) -> &'static [StepDef] {
        match self {
            ToolKind::Guided => guided::STEPS,
            ToolKind::Chatbot => chatbot::STEPS,
            ToolKind::Comparison => comparison::STEPS,
            ToolKind::Optimizer => optimizer::STEPS,
            ToolKind::OneClick => oneclick::STEPS,
        }
    }

    pub fn new_session(self) -> WizardSession {
        WizardSession::new(self.steps())
    }

    pub fn layout(self, step: usize) -> StepLayout {
        match self {
            ToolKind::Guided => guided::layout(step),
            ToolKind::Chatbot => chatbot::layout(step),
            ToolKind::Comparison => comparison::layout(step),
            ToolKind::Optimizer => optimizer::layout(step),
            ToolKind::OneClick => oneclick::layout(step),
        }
    }

    /// Step from which advancing runs a simulated generation pass before
    /// the wizard moves on.
    pub fn generates_from(self, step: usize) -> bool {
        match self {
            ToolKind::Guided => false,
            ToolKind::Chatbot => false,
            ToolKind::Comparison => step == 2,
            ToolKind::Optimizer => step == 1,
            ToolKind::OneClick => step == 1,
        }
    }

    /// Fill the payload with whatever the simulated generation produces
    /// for leaving `step`, without touching the step index.
    pub fn run_generation(self, session: &mut WizardSession, step: usize) {
        match self {
            ToolKind::Comparison if step == 2 => {
                let article = comparison::compose(session);
                session.set_text("content", article);
            }
            ToolKind::Optimizer if step == 1 => {
                optimizer::split_into_parts(session);
            }
            ToolKind::OneClick if step == 1 => {
                let draft = oneclick::compose(session);
                session.set_text("content", draft);
            }
            _ => {}
        }
    }

    /// The finished draft for this session, if the tool produces one.
    pub fn draft_body(self, session: &WizardSession) -> Option<String> {
        match self {
            ToolKind::Guided => Some(guided::compose(session)),
            ToolKind::Chatbot => Some(chatbot::transcript(session)),
            ToolKind::Comparison => Some(session.text("content").to_string()),
            ToolKind::Optimizer => Some(optimizer::final_content(session)),
            ToolKind::OneClick => Some(session.text("content").to_string()),
        }
    }

    /// A human title for the draft, for export naming.
    pub fn draft_title(self, session: &WizardSession) -> String {
        let title = match self {
            ToolKind::Guided => guided::selected_title(session).to_string(),
            ToolKind::Chatbot => format!("{} transcript", session.text("name")),
            ToolKind::Comparison | ToolKind::Optimizer | ToolKind::OneClick => {
                session.text("title").to_string()
            }
        };
        if title.trim().is_empty() {
            self.title().to_string()
        } else {
            title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_step_table_is_contiguous_and_one_based() {
        for tool in CATALOG {
            for (i, def) in tool.steps().iter().enumerate() {
                assert_eq!(def.index, i + 1, "{:?} step table out of order", tool);
            }
            assert!(!tool.steps().is_empty());
        }
    }

    #[test]
    fn slugs_round_trip() {
        for tool in CATALOG {
            assert_eq!(ToolKind::from_slug(tool.slug()), Some(*tool));
        }
        assert_eq!(ToolKind::from_slug("nope"), None);
    }

    #[test]
    fn draft_title_uses_the_entered_title_or_falls_back() {
        for tool in [ToolKind::Comparison, ToolKind::Optimizer, ToolKind::OneClick] {
            let mut s = tool.new_session();
            assert_eq!(tool.draft_title(&s), tool.title());
            s.set_text("title", "My Piece");
            assert_eq!(tool.draft_title(&s), "My Piece");
        }
    }

    #[test]
    fn fresh_sessions_start_pending_at_step_one() {
        for tool in CATALOG {
            let s = tool.new_session();
            assert_eq!(s.current_step(), 1);
            assert!(s.is_empty_payload());
            // Every tool gates its first step on some user input.
            assert!(!s.can_advance(), "{:?} first step should require input", tool);
        }
    }
}
