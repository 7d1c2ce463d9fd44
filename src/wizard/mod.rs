//! Linear wizard state machine shared by every tool.
//!
//! Each tool declares a static table of [`StepDef`]s; a [`WizardSession`]
//! walks that table with a clamped 1-based step index. Forward movement is
//! gated by the active step's validation rules, backward movement never is.
//! All user-entered data lives in the session payload and is only mutated
//! through the explicit update operations below.

use std::collections::BTreeMap;

/// Validation rule for one required field of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Text field, non-empty after trimming.
    NonEmptyText,
    /// A choice has been made (any option index).
    ChoiceMade,
    /// A choice has been made and, when the chosen option is `custom_index`,
    /// the companion text field must be non-empty as well.
    ChoiceOrCustom {
        custom_index: usize,
        custom_field: &'static str,
    },
    /// At least one entry, and every entry has all `required_keys` filled.
    EntriesPopulated {
        required_keys: &'static [&'static str],
    },
}

/// One required field of a step, paired with how to validate it.
#[derive(Debug, Clone, Copy)]
pub struct Requirement {
    pub field: &'static str,
    pub rule: Rule,
}

/// Static definition of a single wizard step. Immutable for the lifetime
/// of any session created over it.
#[derive(Debug, Clone, Copy)]
pub struct StepDef {
    /// 1-based position in the wizard.
    pub index: usize,
    pub title: &'static str,
    pub description: &'static str,
    pub required: &'static [Requirement],
}

/// One composite row of an `Entries` field (a product, a chat message).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    fields: BTreeMap<String, String>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or "" when unset.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn is_populated(&self, keys: &[&str]) -> bool {
        keys.iter().all(|k| !self.get(k).trim().is_empty())
    }
}

/// A value in the wizard payload. Scalar text, a selected option index,
/// or a list of composite entries.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Choice(usize),
    Entries(Vec<Entry>),
}

/// Derived per-step display state for the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Required data missing.
    Pending,
    /// Requirements satisfied but not yet passed.
    Valid,
    /// Behind the current step.
    Complete,
}

/// A live walk through one tool's step table.
///
/// The step index always stays within `[1, N]`; `advance` past N and
/// `retreat` before 1 are no-ops.
#[derive(Debug, Clone)]
pub struct WizardSession {
    defs: &'static [StepDef],
    current: usize,
    payload: BTreeMap<String, FieldValue>,
}

impl WizardSession {
    /// New session at step 1 with an empty payload.
    pub fn new(defs: &'static [StepDef]) -> Self {
        debug_assert!(!defs.is_empty(), "wizard needs at least one step");
        Self {
            defs,
            current: 1,
            payload: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn is_last(&self) -> bool {
        self.current == self.defs.len()
    }

    pub fn current_def(&self) -> &StepDef {
        // current is clamped to [1, N] by construction
        &self.defs[self.current - 1]
    }

    pub fn defs(&self) -> &'static [StepDef] {
        self.defs
    }

    // --- payload updates -------------------------------------------------

    /// Unconditional write; validation only happens on `advance`.
    pub fn update_field(&mut self, name: &str, value: FieldValue) {
        self.payload.insert(name.to_string(), value);
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.update_field(name, FieldValue::Text(value.into()));
    }

    pub fn set_choice(&mut self, name: &str, index: usize) {
        self.update_field(name, FieldValue::Choice(index));
    }

    /// Append one entry to an `Entries` field, creating the field if absent.
    pub fn push_entry(&mut self, name: &str, entry: Entry) {
        match self.payload.get_mut(name) {
            Some(FieldValue::Entries(list)) => list.push(entry),
            _ => self.update_field(name, FieldValue::Entries(vec![entry])),
        }
    }

    /// Set one key of one entry row. Out-of-range rows are ignored.
    pub fn update_entry(&mut self, name: &str, row: usize, key: &str, value: impl Into<String>) {
        if let Some(FieldValue::Entries(list)) = self.payload.get_mut(name) {
            if let Some(entry) = list.get_mut(row) {
                entry.set(key, value);
            }
        }
    }

    /// Grow or shrink an `Entries` field to exactly `count` rows.
    pub fn resize_entries(&mut self, name: &str, count: usize) {
        match self.payload.get_mut(name) {
            Some(FieldValue::Entries(list)) => list.resize(count, Entry::new()),
            _ => self.update_field(name, FieldValue::Entries(vec![Entry::new(); count])),
        }
    }

    // --- payload reads ---------------------------------------------------

    pub fn is_empty_payload(&self) -> bool {
        self.payload.is_empty()
    }

    /// Text value, or "" for missing/non-text fields.
    pub fn text(&self, name: &str) -> &str {
        match self.payload.get(name) {
            Some(FieldValue::Text(s)) => s,
            _ => "",
        }
    }

    pub fn choice(&self, name: &str) -> Option<usize> {
        match self.payload.get(name) {
            Some(FieldValue::Choice(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn entries(&self, name: &str) -> &[Entry] {
        match self.payload.get(name) {
            Some(FieldValue::Entries(list)) => list,
            _ => &[],
        }
    }

    // --- validation ------------------------------------------------------

    fn requirement_met(&self, req: &Requirement) -> bool {
        match req.rule {
            Rule::NonEmptyText => !self.text(req.field).trim().is_empty(),
            Rule::ChoiceMade => self.choice(req.field).is_some(),
            Rule::ChoiceOrCustom {
                custom_index,
                custom_field,
            } => match self.choice(req.field) {
                Some(i) if i == custom_index => !self.text(custom_field).trim().is_empty(),
                Some(_) => true,
                None => false,
            },
            Rule::EntriesPopulated { required_keys } => {
                let list = self.entries(req.field);
                !list.is_empty() && list.iter().all(|e| e.is_populated(required_keys))
            }
        }
    }

    fn step_satisfied(&self, index: usize) -> bool {
        self.defs[index - 1]
            .required
            .iter()
            .all(|req| self.requirement_met(req))
    }

    /// Pure predicate: may the active step be left in the forward direction?
    pub fn can_advance(&self) -> bool {
        self.step_satisfied(self.current)
    }

    // --- transitions -----------------------------------------------------

    /// Move forward one step when the active step validates. Blocked or
    /// already-at-N calls leave the session untouched and return false.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() || self.current >= self.defs.len() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move back one step. Never gated; no-op at step 1.
    pub fn retreat(&mut self) -> bool {
        if self.current <= 1 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump straight to `target` (clamped to `[1, N]`). Backward jumps are
    /// always allowed; a forward jump requires every step from the current
    /// one up to (excluding) the target to validate, so it can never reach
    /// a state that repeated `advance` calls could not.
    pub fn jump(&mut self, target: usize) -> bool {
        let target = target.clamp(1, self.defs.len());
        if target <= self.current {
            self.current = target;
            return true;
        }
        if (self.current..target).all(|i| self.step_satisfied(i)) {
            self.current = target;
            return true;
        }
        false
    }

    /// Back to step 1 with a cleared payload. One fixed policy for every
    /// tool: reset discards entered data.
    pub fn reset(&mut self) {
        self.current = 1;
        self.payload.clear();
    }

    /// Derived status per step, in table order.
    pub fn step_status(&self) -> Vec<StepStatus> {
        self.defs
            .iter()
            .map(|def| {
                if def.index < self.current {
                    StepStatus::Complete
                } else if self.step_satisfied(def.index) {
                    StepStatus::Valid
                } else {
                    StepStatus::Pending
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_REQS: &[Requirement] = &[];

    static THREE_STEPS: &[StepDef] = &[
        StepDef {
            index: 1,
            title: "Basics",
            description: "Title required",
            required: &[Requirement {
                field: "title",
                rule: Rule::NonEmptyText,
            }],
        },
        StepDef {
            index: 2,
            title: "Middle",
            description: "Nothing required",
            required: NO_REQS,
        },
        StepDef {
            index: 3,
            title: "Done",
            description: "Review",
            required: NO_REQS,
        },
    ];

    static CHOICE_STEPS: &[StepDef] = &[StepDef {
        index: 1,
        title: "Pick",
        description: "",
        required: &[Requirement {
            field: "kind",
            rule: Rule::ChoiceOrCustom {
                custom_index: 2,
                custom_field: "kind_custom",
            },
        }],
    }];

    static ENTRY_STEPS: &[StepDef] = &[StepDef {
        index: 1,
        title: "Products",
        description: "",
        required: &[Requirement {
            field: "products",
            rule: Rule::EntriesPopulated {
                required_keys: &["details", "pros", "cons"],
            },
        }],
    }];

    #[test]
    fn fresh_session_starts_at_one_with_empty_payload() {
        let s = WizardSession::new(THREE_STEPS);
        assert_eq!(s.current_step(), 1);
        assert!(s.is_empty_payload());
        assert_eq!(s.text("title"), "");
    }

    #[test]
    fn advance_is_noop_until_step_validates() {
        let mut s = WizardSession::new(THREE_STEPS);
        s.set_text("title", "");
        assert!(!s.can_advance());
        assert!(!s.advance());
        assert_eq!(s.current_step(), 1);

        s.set_text("title", "Hello");
        assert!(s.advance());
        assert_eq!(s.current_step(), 2);
    }

    #[test]
    fn whitespace_only_text_does_not_validate() {
        let mut s = WizardSession::new(THREE_STEPS);
        s.set_text("title", "   \t ");
        assert!(!s.advance());
        assert_eq!(s.current_step(), 1);
    }

    #[test]
    fn advance_clamps_at_last_step() {
        let mut s = WizardSession::new(THREE_STEPS);
        s.set_text("title", "Hello");
        assert!(s.advance());
        assert!(s.advance());
        assert_eq!(s.current_step(), 3);
        // Repeated advance at N leaves state unchanged.
        assert!(!s.advance());
        assert!(!s.advance());
        assert_eq!(s.current_step(), 3);
    }

    #[test]
    fn retreat_is_unguarded_and_clamped_at_one() {
        let mut s = WizardSession::new(THREE_STEPS);
        assert!(!s.retreat());
        assert_eq!(s.current_step(), 1);

        s.set_text("title", "Hello");
        s.advance();
        // Invalidate the earlier step; retreat must still work.
        s.set_text("title", "");
        assert!(s.retreat());
        assert_eq!(s.current_step(), 1);
    }

    #[test]
    fn step_index_never_leaves_bounds() {
        let mut s = WizardSession::new(THREE_STEPS);
        s.set_text("title", "x");
        for _ in 0..20 {
            s.advance();
        }
        assert_eq!(s.current_step(), 3);
        for _ in 0..20 {
            s.retreat();
        }
        assert_eq!(s.current_step(), 1);
    }

    #[test]
    fn jump_backward_always_allowed_forward_gated() {
        let mut s = WizardSession::new(THREE_STEPS);
        assert!(!s.jump(3));
        assert_eq!(s.current_step(), 1);

        s.set_text("title", "x");
        assert!(s.jump(3));
        assert_eq!(s.current_step(), 3);

        s.set_text("title", "");
        assert!(s.jump(1));
        assert_eq!(s.current_step(), 1);

        // Out-of-range targets clamp instead of escaping the table.
        s.set_text("title", "x");
        assert!(s.jump(99));
        assert_eq!(s.current_step(), 3);
    }

    #[test]
    fn reset_returns_to_start_and_clears_data() {
        let mut s = WizardSession::new(THREE_STEPS);
        s.set_text("title", "Hello");
        s.advance();
        s.reset();
        assert_eq!(s.current_step(), 1);
        assert!(s.is_empty_payload());
    }

    #[test]
    fn step_status_tracks_progress() {
        let mut s = WizardSession::new(THREE_STEPS);
        assert_eq!(
            s.step_status(),
            vec![StepStatus::Pending, StepStatus::Valid, StepStatus::Valid]
        );
        s.set_text("title", "Hello");
        s.advance();
        assert_eq!(
            s.step_status(),
            vec![StepStatus::Complete, StepStatus::Valid, StepStatus::Valid]
        );
    }

    #[test]
    fn custom_choice_needs_companion_text() {
        let mut s = WizardSession::new(CHOICE_STEPS);
        assert!(!s.can_advance());

        s.set_choice("kind", 0);
        assert!(s.can_advance());

        s.set_choice("kind", 2);
        assert!(!s.can_advance());

        s.set_text("kind_custom", "Travel bot");
        assert!(s.can_advance());
    }

    #[test]
    fn entries_validate_only_when_all_rows_filled() {
        let mut s = WizardSession::new(ENTRY_STEPS);
        assert!(!s.can_advance());

        s.resize_entries("products", 2);
        assert!(!s.can_advance());

        for row in 0..2 {
            s.update_entry("products", row, "details", "specs");
            s.update_entry("products", row, "pros", "good");
        }
        assert!(!s.can_advance());

        s.update_entry("products", 0, "cons", "pricey");
        assert!(!s.can_advance());
        s.update_entry("products", 1, "cons", "bulky");
        assert!(s.can_advance());
    }
}
