//! Chatbot Studio: configure a simulated assistant, then chat with it.
//!
//! Replies are canned templates picked deterministically from the
//! configured type, interpolated with the user's message and expertise.

use crate::wizard::{Entry, Requirement, Rule, StepDef, WizardSession};

use super::{CustomSlot, FieldSpec, InputKind, StepLayout};

/// Index of the "Custom Type" option in [`TYPES`].
pub const CUSTOM_TYPE: usize = 6;
/// Index of "Custom Expertise" in [`EXPERTISE_AREAS`].
pub const CUSTOM_EXPERTISE: usize = 20;

pub static STEPS: &[StepDef] = &[
    StepDef {
        index: 1,
        title: "Configuration",
        description: "Set up your chatbot",
        required: &[
            Requirement {
                field: "name",
                rule: Rule::NonEmptyText,
            },
            Requirement {
                field: "kind",
                rule: Rule::ChoiceOrCustom {
                    custom_index: CUSTOM_TYPE,
                    custom_field: "kind_custom",
                },
            },
            Requirement {
                field: "expertise",
                rule: Rule::ChoiceOrCustom {
                    custom_index: CUSTOM_EXPERTISE,
                    custom_field: "expertise_custom",
                },
            },
        ],
    },
    StepDef {
        index: 2,
        title: "Chat",
        description: "Talk with your assistant",
        required: &[],
    },
];

pub const TYPES: &[&str] = &[
    "Personal Assistant",
    "Domain Expert",
    "Creative Partner",
    "Data Analyst",
    "Life Coach",
    "Learning Tutor",
    "Custom Type",
];

pub const EXPERTISE_AREAS: &[&str] = &[
    "Marketing & Advertising",
    "Software Development",
    "Data Science",
    "Content Writing",
    "SEO & Digital Marketing",
    "Business Strategy",
    "Finance & Investment",
    "Health & Wellness",
    "Education & Training",
    "Creative Writing",
    "Psychology & Counseling",
    "Technology Consulting",
    "Project Management",
    "Sales & Customer Service",
    "Legal Advice",
    "Design & UX/UI",
    "Social Media Management",
    "E-commerce",
    "Real Estate",
    "Travel & Tourism",
    "Custom Expertise",
];

const CONFIG_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        label: "Chatbot Name",
        placeholder: "e.g., Alex, Marketing Guru, Code Helper...",
        kind: InputKind::Line,
    },
    FieldSpec {
        name: "kind",
        label: "Chatbot Type",
        placeholder: "Select chatbot type",
        kind: InputKind::Select {
            options: TYPES,
            custom: Some(CustomSlot {
                index: CUSTOM_TYPE,
                field: "kind_custom",
                label: "Custom type",
            }),
        },
    },
    FieldSpec {
        name: "expertise",
        label: "Area of Expertise",
        placeholder: "Select expertise area",
        kind: InputKind::Select {
            options: EXPERTISE_AREAS,
            custom: Some(CustomSlot {
                index: CUSTOM_EXPERTISE,
                field: "expertise_custom",
                label: "Custom expertise",
            }),
        },
    },
    FieldSpec {
        name: "description",
        label: "Additional Description (optional)",
        placeholder: "Traits, communication style, extra expertise...",
        kind: InputKind::Paragraph,
    },
];

pub fn layout(step: usize) -> StepLayout {
    match step {
        1 => StepLayout::Form(CONFIG_FIELDS),
        _ => StepLayout::Chat,
    }
}

/// The effective type label, resolving the custom variant.
pub fn display_type(session: &WizardSession) -> String {
    match session.choice("kind") {
        Some(i) if i == CUSTOM_TYPE => session.text("kind_custom").to_string(),
        Some(i) => TYPES.get(i).copied().unwrap_or("Assistant").to_string(),
        None => "Assistant".to_string(),
    }
}

/// The effective expertise label, resolving the custom variant.
pub fn display_expertise(session: &WizardSession) -> String {
    match session.choice("expertise") {
        Some(i) if i == CUSTOM_EXPERTISE => session.text("expertise_custom").to_string(),
        Some(i) => EXPERTISE_AREAS
            .get(i)
            .copied()
            .unwrap_or("general topics")
            .to_string(),
        None => "general topics".to_string(),
    }
}

/// Append a message to the transcript.
pub fn push_message(session: &mut WizardSession, role: &str, text: &str) {
    let mut entry = Entry::new();
    entry.set("role", role);
    entry.set("text", text);
    session.push_entry("messages", entry);
}

/// Canned reply for `user_message`, varied by message count so the bot
/// does not repeat itself turn after turn.
pub fn reply(session: &WizardSession, user_message: &str) -> String {
    let expertise = display_expertise(session);
    let topic = user_message.trim().to_lowercase();
    let turn = session.entries("messages").len();

    let bank: &[fn(&str, &str) -> String] = match session.choice("kind") {
        Some(1) => &[
            |e, t| format!("As an expert in {e}, I can tell you that {t} is quite important. Here's my professional perspective..."),
            |e, _| format!("From my specialized knowledge in {e}, I'd recommend considering these key factors..."),
            |e, _| format!("That's an excellent question about {e}. Based on industry best practices..."),
        ],
        Some(2) => &[
            |_, t| format!("What an exciting creative challenge! Let's brainstorm some innovative ideas for {t}..."),
            |_, _| "I love your creative thinking! Here are some imaginative approaches we could explore...".to_string(),
            |_, _| "That sparks so many creative possibilities! Let me share some unique perspectives...".to_string(),
        ],
        Some(3) => &[
            |_, t| format!("Let me analyze this for you. Based on the patterns I see in {t}..."),
            |_, t| format!("From an analytical perspective, here's what the data suggests about {t}..."),
            |_, _| "I've processed your request and here are the key insights and trends I've identified...".to_string(),
        ],
        Some(4) => &[
            |_, t| format!("I believe in your potential! Regarding {t}, here's how we can approach this challenge..."),
            |_, t| format!("You're asking the right questions! Let's break down {t} into actionable steps..."),
            |_, t| format!("That's a powerful goal! Here's how we can work together to achieve success with {t}..."),
        ],
        Some(5) => &[
            |_, t| format!("Great question! Let me explain {t} in a way that's easy to understand..."),
            |_, t| format!("I'm excited to help you learn about this! Here's a step-by-step breakdown of {t}..."),
            |_, t| format!("Learning about {t} is a wonderful choice! Let's start with the fundamentals..."),
        ],
        _ => &[
            |e, _| format!("I'd be happy to help you with that! Based on my expertise in {e}, here's what I think..."),
            |_, t| format!("That's a great question! Let me provide you with some insights about {t}..."),
            |e, _| format!("I understand what you're looking for. In my experience with {e}, I can suggest..."),
        ],
    };

    bank[turn % bank.len()](&expertise, &topic)
}

/// Plain-text transcript for export.
pub fn transcript(session: &WizardSession) -> String {
    let bot = if session.text("name").is_empty() {
        "Assistant".to_string()
    } else {
        session.text("name").to_string()
    };
    session
        .entries("messages")
        .iter()
        .map(|m| {
            let who = if m.get("role") == "user" { "You" } else { bot.as_str() };
            format!("{who}: {}", m.get("text"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolKind;

    #[test]
    fn configure_step_gates_on_name_type_and_expertise() {
        let mut s = ToolKind::Chatbot.new_session();
        s.set_text("name", "Alex");
        s.set_choice("kind", 0);
        assert!(!s.can_advance());
        s.set_choice("expertise", 3);
        assert!(s.advance());
        assert_eq!(s.current_step(), 2);
    }

    #[test]
    fn custom_variants_need_their_companion_fields() {
        let mut s = ToolKind::Chatbot.new_session();
        s.set_text("name", "Alex");
        s.set_choice("kind", CUSTOM_TYPE);
        s.set_choice("expertise", CUSTOM_EXPERTISE);
        assert!(!s.can_advance());
        s.set_text("kind_custom", "Travel Planner");
        assert!(!s.can_advance());
        s.set_text("expertise_custom", "Budget Travel");
        assert!(s.can_advance());
        assert_eq!(display_type(&s), "Travel Planner");
        assert_eq!(display_expertise(&s), "Budget Travel");
    }

    #[test]
    fn replies_rotate_and_mention_expertise_or_topic() {
        let mut s = ToolKind::Chatbot.new_session();
        s.set_choice("kind", 1);
        s.set_choice("expertise", 1);

        let first = reply(&s, "Testing strategy");
        assert!(first.contains("Software Development"));
        assert!(first.contains("testing strategy"));

        push_message(&mut s, "user", "Testing strategy");
        push_message(&mut s, "bot", &first);
        let second = reply(&s, "Testing strategy");
        assert_ne!(first, second);
    }

    #[test]
    fn transcript_labels_both_sides() {
        let mut s = ToolKind::Chatbot.new_session();
        s.set_text("name", "Iris");
        push_message(&mut s, "user", "Hello");
        push_message(&mut s, "bot", "Hi there");
        assert_eq!(transcript(&s), "You: Hello\nIris: Hi there");
    }
}
