use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

use crate::config::{AppConfig, DraftRecord};
use crate::tools::{chatbot, comparison, optimizer, CustomSlot, FieldSpec, InputKind, StepLayout, ToolKind, CATALOG};
use crate::wizard::WizardSession;

/// Seconds the simulated generation pass takes.
const GENERATION_SECONDS: u64 = 2;

/// Work scheduled behind the generation countdown.
#[derive(Debug, Clone, PartialEq)]
pub enum GenAction {
    /// Run the tool's generation for the current step, then advance.
    StepOutput,
    /// Append a canned chatbot reply to the transcript.
    ChatReply { message: String },
}

#[derive(Debug, Clone)]
pub struct PendingGeneration {
    pub label: String,
    pub action: GenAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Catalog,
    Wizard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
    ConfirmReset,
    RecentDrafts,
}

/// Runtime form field, with custom companion slots already expanded.
#[derive(Debug, Clone, Copy)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FormFieldKind,
}

#[derive(Debug, Clone, Copy)]
pub enum FormFieldKind {
    Line,
    Paragraph,
    Select { options: &'static [&'static str] },
    Stepper { min: usize, max: usize },
}

pub struct App {
    pub section: Section,
    pub popup: Popup,

    // Catalog state
    pub selected_tool: usize,

    // Active wizard
    pub tool: Option<ToolKind>,
    pub session: Option<WizardSession>,

    // Per-layout cursors
    pub focus_field: usize,     // form field focus
    pub pick_selected: usize,   // highlight in Pick banks
    pub product_selected: usize,
    pub product_field: usize,   // which product key is focused
    pub part_selected: usize,
    pub part_editing: bool,     // editing the selected part's keywords
    pub chat_input: String,
    pub output_scroll: usize,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    // Simulated generation countdown
    pub pending: Option<PendingGeneration>,
    pub pending_start: Option<Instant>,
    pub countdown_seconds: u8,

    // Info line content
    pub info_message: Option<String>,

    pub config: AppConfig,
    persist_config: bool,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = AppConfig::load().unwrap_or_default();
        let mut app = Self::with_config(config);
        app.persist_config = true;
        Ok(app)
    }

    /// Build an app around an in-memory config that is never written back
    /// to disk.
    pub fn with_config(config: AppConfig) -> Self {
        // Preselect the tool used last time
        let selected_tool = config
            .last_tool
            .as_deref()
            .and_then(ToolKind::from_slug)
            .and_then(|t| CATALOG.iter().position(|c| *c == t))
            .unwrap_or(0);

        let mut app = Self {
            section: Section::Catalog,
            popup: Popup::None,

            selected_tool,

            tool: None,
            session: None,

            focus_field: 0,
            pick_selected: 0,
            product_selected: 0,
            product_field: 0,
            part_selected: 0,
            part_editing: false,
            chat_input: String::new(),
            output_scroll: 0,

            status_message: None,
            status_message_time: None,

            pending: None,
            pending_start: None,
            countdown_seconds: 0,

            info_message: None,

            config,
            persist_config: false,
        };
        app.update_info_message();
        app
    }

    fn save_config(&self) {
        if !self.persist_config {
            return;
        }
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Whether a bare 'q' may quit the app (never while typing into a wizard)
    pub fn quit_on_q(&self) -> bool {
        self.section == Section::Catalog && self.popup == Popup::None
    }

    pub fn layout(&self) -> Option<StepLayout> {
        let tool = self.tool?;
        let session = self.session.as_ref()?;
        Some(tool.layout(session.current_step()))
    }

    /// Form fields for the active step, with custom companion fields
    /// expanded in place after their selects.
    pub fn form_fields(&self) -> Vec<FormField> {
        let Some(StepLayout::Form(specs)) = self.layout() else {
            return Vec::new();
        };
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let mut fields = Vec::new();
        for spec in specs {
            fields.push(to_form_field(spec));
            if let InputKind::Select {
                custom: Some(slot), ..
            } = spec.kind
            {
                if session.choice(spec.name) == Some(slot.index) {
                    fields.push(custom_form_field(&slot));
                }
            }
        }
        fields
    }

    // --- key handling ----------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }

        match self.section {
            Section::Catalog => self.handle_catalog_key(key),
            Section::Wizard => self.handle_wizard_key(key),
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::Help | Popup::RecentDrafts => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')
                ) {
                    self.popup = Popup::None;
                }
                Ok(())
            }
            Popup::ConfirmReset => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => {
                        if let Some(session) = self.session.as_mut() {
                            session.reset();
                        }
                        self.reset_cursors();
                        self.cancel_pending();
                        self.set_status("Wizard reset, entered data cleared");
                        self.popup = Popup::None;
                    }
                    KeyCode::Char('n') | KeyCode::Esc => {
                        self.popup = Popup::None;
                    }
                    _ => {}
                }
                Ok(())
            }
            Popup::None => Ok(()),
        }
    }

    fn handle_catalog_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected_tool = (self.selected_tool + 1) % CATALOG.len();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_tool = self
                    .selected_tool
                    .checked_sub(1)
                    .unwrap_or(CATALOG.len() - 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.open_tool(CATALOG[self.selected_tool]);
            }
            KeyCode::Char('d') => self.popup = Popup::RecentDrafts,
            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,
            _ => {}
        }
        Ok(())
    }

    pub fn open_tool(&mut self, tool: ToolKind) {
        let mut session = tool.new_session();

        // Preselect the configured language where the tool has one
        if tool == ToolKind::Comparison {
            if let Some(lang) = self.config.default_language.as_deref() {
                if let Some(i) = comparison::LANGUAGES
                    .iter()
                    .position(|l| l.eq_ignore_ascii_case(lang))
                {
                    session.set_choice("language", i);
                }
            }
        }

        self.tool = Some(tool);
        self.session = Some(session);
        self.section = Section::Wizard;
        self.reset_cursors();

        self.config.last_tool = Some(tool.slug().to_string());
        self.save_config();
    }

    fn reset_cursors(&mut self) {
        self.focus_field = 0;
        self.pick_selected = 0;
        self.product_selected = 0;
        self.product_field = 0;
        self.part_selected = 0;
        self.part_editing = false;
        self.chat_input.clear();
        self.output_scroll = 0;
    }

    /// Leave the wizard and return to the catalog.
    fn close_wizard(&mut self) {
        self.tool = None;
        self.session = None;
        self.section = Section::Catalog;
        self.cancel_pending();
        self.reset_cursors();
    }

    fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        // Esc cancels a pending generation first
        if key.code == KeyCode::Esc && self.pending.is_some() {
            self.cancel_pending();
            self.set_status("Generation cancelled");
            return Ok(());
        }

        // Global wizard navigation
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => {
                    self.try_advance();
                    return Ok(());
                }
                KeyCode::Char('p') => {
                    self.retreat();
                    return Ok(());
                }
                KeyCode::Char('r') => {
                    self.popup = Popup::ConfirmReset;
                    return Ok(());
                }
                // Save works from any step; chat transcripts have no
                // review step of their own.
                KeyCode::Char('s') => {
                    self.export_draft();
                    return Ok(());
                }
                _ => {}
            }
        }
        if key.code == KeyCode::Char('?') && !self.typing_captures_keys() {
            self.popup = Popup::Help;
            return Ok(());
        }

        match self.layout() {
            Some(StepLayout::Form(_)) => self.handle_form_key(key),
            Some(StepLayout::Pick { field, options }) => self.handle_pick_key(key, field, options),
            Some(StepLayout::Products) => self.handle_products_key(key),
            Some(StepLayout::Parts) => self.handle_parts_key(key),
            Some(StepLayout::Chat) => self.handle_chat_key(key),
            Some(StepLayout::Output) => self.handle_output_key(key),
            None => Ok(()),
        }
    }

    /// Layouts where every printable character belongs to a text field.
    fn typing_captures_keys(&self) -> bool {
        match self.layout() {
            Some(StepLayout::Form(_)) | Some(StepLayout::Products) | Some(StepLayout::Chat) => true,
            Some(StepLayout::Parts) => self.part_editing,
            _ => false,
        }
    }

    /// Attempt a forward transition. Blocked steps stay put; steps that
    /// generate schedule the countdown instead of moving immediately.
    fn try_advance(&mut self) {
        let (Some(tool), Some(session)) = (self.tool, self.session.as_mut()) else {
            return;
        };
        if self.pending.is_some() {
            return;
        }
        if !session.can_advance() {
            self.set_status("Complete the required fields first");
            return;
        }
        if session.is_last() {
            return;
        }

        let step = session.current_step();

        // Leaving the comparison basics sizes the product list
        if tool == ToolKind::Comparison && step == 1 {
            comparison::seed_products(session);
        }

        if tool.generates_from(step) {
            let label = match tool {
                ToolKind::Optimizer => "Analyzing content".to_string(),
                ToolKind::Comparison => "Generating comparison".to_string(),
                _ => "Generating draft".to_string(),
            };
            self.schedule(PendingGeneration {
                label,
                action: GenAction::StepOutput,
            });
            return;
        }

        session.advance();
        self.on_step_changed();
    }

    fn retreat(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if session.retreat() {
                self.on_step_changed();
            } else {
                self.close_wizard();
            }
        }
    }

    fn on_step_changed(&mut self) {
        self.focus_field = 0;
        self.pick_selected = self
            .session
            .as_ref()
            .zip(self.pick_field())
            .and_then(|(s, f)| s.choice(f))
            .unwrap_or(0);
        self.output_scroll = 0;
        self.part_editing = false;
    }

    fn pick_field(&self) -> Option<&'static str> {
        match self.layout() {
            Some(StepLayout::Pick { field, .. }) => Some(field),
            _ => None,
        }
    }

    // --- form steps ------------------------------------------------------

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let fields = self.form_fields();
        if fields.is_empty() {
            return Ok(());
        }
        self.focus_field = self.focus_field.min(fields.len() - 1);
        let field = fields[self.focus_field];

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_field = (self.focus_field + 1) % fields.len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_field = self
                    .focus_field
                    .checked_sub(1)
                    .unwrap_or(fields.len() - 1);
            }
            KeyCode::Esc => self.retreat(),
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                self.cycle_field(&field, forward);
            }
            KeyCode::Enter => match field.kind {
                FormFieldKind::Paragraph => self.edit_text(field.name, Some('\n'), false),
                _ => {
                    if self.focus_field + 1 == fields.len() {
                        self.try_advance();
                    } else {
                        self.focus_field += 1;
                    }
                }
            },
            KeyCode::Backspace => {
                if matches!(field.kind, FormFieldKind::Line | FormFieldKind::Paragraph) {
                    self.edit_text(field.name, None, true);
                }
            }
            KeyCode::Char(' ') if matches!(field.kind, FormFieldKind::Select { .. }) => {
                self.cycle_field(&field, true);
            }
            KeyCode::Char(c) => {
                if matches!(field.kind, FormFieldKind::Line | FormFieldKind::Paragraph) {
                    self.edit_text(field.name, Some(c), false);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn edit_text(&mut self, name: &str, push: Option<char>, pop: bool) {
        if let Some(session) = self.session.as_mut() {
            let mut value = session.text(name).to_string();
            if pop {
                value.pop();
            }
            if let Some(c) = push {
                value.push(c);
            }
            session.set_text(name, value);
        }
    }

    fn cycle_field(&mut self, field: &FormField, forward: bool) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match field.kind {
            FormFieldKind::Select { options } => {
                let current = session.choice(field.name);
                let next = match (current, forward) {
                    (None, _) => 0,
                    (Some(i), true) => (i + 1) % options.len(),
                    (Some(i), false) => i.checked_sub(1).unwrap_or(options.len() - 1),
                };
                session.set_choice(field.name, next);
                // A shrinking field list must not strand the focus
                let len = self.form_fields().len();
                self.focus_field = self.focus_field.min(len.saturating_sub(1));
            }
            FormFieldKind::Stepper { min, max } => {
                // Unset steppers show the midpoint default
                let current = session.choice(field.name).unwrap_or((min + max) / 2);
                let next = if forward {
                    (current + 1).min(max)
                } else {
                    current.saturating_sub(1).max(min)
                };
                session.set_choice(field.name, next);
            }
            _ => {}
        }
    }

    // --- pick steps (title/outline banks) --------------------------------

    fn handle_pick_key(
        &mut self,
        key: KeyEvent,
        field: &'static str,
        options: &'static [&'static str],
    ) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.pick_selected = (self.pick_selected + 1) % options.len();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.pick_selected = self
                    .pick_selected
                    .checked_sub(1)
                    .unwrap_or(options.len() - 1);
            }
            KeyCode::Char(' ') => {
                if let Some(session) = self.session.as_mut() {
                    session.set_choice(field, self.pick_selected);
                }
            }
            KeyCode::Enter => {
                if let Some(session) = self.session.as_mut() {
                    session.set_choice(field, self.pick_selected);
                }
                self.try_advance();
            }
            KeyCode::Esc => self.retreat(),
            KeyCode::Char(c @ '1'..='9') => {
                // Direct jump across already-valid steps
                let target = c as usize - '0' as usize;
                if let Some(session) = self.session.as_mut() {
                    if session.jump(target) {
                        self.on_step_changed();
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    // --- product grid -----------------------------------------------------

    fn handle_products_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        let count = session.entries("products").len();
        if count == 0 {
            return Ok(());
        }
        self.product_selected = self.product_selected.min(count - 1);
        let keys = comparison::PRODUCT_KEYS;
        let (field_key, _) = keys[self.product_field.min(keys.len() - 1)];

        match key.code {
            KeyCode::Left => {
                self.product_selected = self
                    .product_selected
                    .checked_sub(1)
                    .unwrap_or(count - 1);
            }
            KeyCode::Right => {
                self.product_selected = (self.product_selected + 1) % count;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.product_field = (self.product_field + 1) % keys.len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.product_field = self.product_field.checked_sub(1).unwrap_or(keys.len() - 1);
            }
            KeyCode::Esc => self.retreat(),
            KeyCode::Enter => {
                // Pros/cons are one-per-line lists
                if field_key == "pros" || field_key == "cons" {
                    self.edit_product_text(field_key, Some('\n'), false);
                } else {
                    self.product_field = (self.product_field + 1) % keys.len();
                }
            }
            KeyCode::Backspace => self.edit_product_text(field_key, None, true),
            KeyCode::Char(c) => self.edit_product_text(field_key, Some(c), false),
            _ => {}
        }
        Ok(())
    }

    fn edit_product_text(&mut self, key: &str, push: Option<char>, pop: bool) {
        let row = self.product_selected;
        if let Some(session) = self.session.as_mut() {
            let mut value = session
                .entries("products")
                .get(row)
                .map(|e| e.get(key).to_string())
                .unwrap_or_default();
            if pop {
                value.pop();
            }
            if let Some(c) = push {
                value.push(c);
            }
            session.update_entry("products", row, key, value);
        }
    }

    // --- optimizer parts --------------------------------------------------

    fn handle_parts_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        let count = session.entries("parts").len();
        if count == 0 {
            return Ok(());
        }
        self.part_selected = self.part_selected.min(count - 1);

        if self.part_editing {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.part_editing = false,
                KeyCode::Backspace => self.edit_part_keywords(None, true),
                KeyCode::Char(c) => self.edit_part_keywords(Some(c), false),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.part_selected = (self.part_selected + 1) % count;
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.part_selected = self.part_selected.checked_sub(1).unwrap_or(count - 1);
            }
            KeyCode::Enter | KeyCode::Char('o') => {
                let row = self.part_selected;
                if let Some(session) = self.session.as_mut() {
                    optimizer::optimize_part(session, row);
                }
                self.set_status(format!("Part {} optimized", self.part_selected + 1));
            }
            KeyCode::Char('a') => {
                if let Some(session) = self.session.as_mut() {
                    for row in 0..count {
                        optimizer::optimize_part(session, row);
                    }
                }
                self.set_status("All parts optimized");
            }
            KeyCode::Char('e') => self.part_editing = true,
            KeyCode::Esc => self.retreat(),
            _ => {}
        }
        Ok(())
    }

    fn edit_part_keywords(&mut self, push: Option<char>, pop: bool) {
        let row = self.part_selected;
        if let Some(session) = self.session.as_mut() {
            let mut value = session
                .entries("parts")
                .get(row)
                .map(|e| e.get("keywords").to_string())
                .unwrap_or_default();
            if pop {
                value.pop();
            }
            if let Some(c) = push {
                value.push(c);
            }
            session.update_entry("parts", row, "keywords", value);
        }
    }

    // --- chat -------------------------------------------------------------

    fn handle_chat_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => {
                let message = self.chat_input.trim().to_string();
                if message.is_empty() || self.pending.is_some() {
                    return Ok(());
                }
                self.chat_input.clear();
                if let Some(session) = self.session.as_mut() {
                    chatbot::push_message(session, "user", &message);
                }
                self.schedule(PendingGeneration {
                    label: "Thinking".to_string(),
                    action: GenAction::ChatReply { message },
                });
            }
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Esc => self.retreat(),
            KeyCode::Char(c) => self.chat_input.push(c),
            _ => {}
        }
        Ok(())
    }

    // --- output steps -----------------------------------------------------

    fn handle_output_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.output_scroll = self.output_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.output_scroll = self.output_scroll.saturating_sub(1);
            }
            KeyCode::Char('s') => self.export_draft(),
            KeyCode::Enter => {
                // Terminal state: finish exits the wizard
                self.set_status("Draft finished");
                self.close_wizard();
            }
            KeyCode::Esc => self.retreat(),
            KeyCode::Char(c @ '1'..='9') => {
                let target = c as usize - '0' as usize;
                if let Some(session) = self.session.as_mut() {
                    if session.jump(target) {
                        self.on_step_changed();
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Export the finished draft to the configured directory.
    fn export_draft(&mut self) {
        let (Some(tool), Some(session)) = (self.tool, self.session.as_ref()) else {
            return;
        };
        let Some(body) = tool.draft_body(session) else {
            return;
        };
        let title = tool.draft_title(session);
        let dir = self.config.export_dir();

        match crate::draft::export(&dir, &title, &body) {
            Ok(path) => {
                self.set_status(format!("Saved to {}", path.display()));
                self.config.remember_draft(DraftRecord {
                    title: title.clone(),
                    tool: tool.slug().to_string(),
                    path: path.clone(),
                });
                self.save_config();
                if self.config.notifications {
                    let _ = crate::notify("penna", &format!("Draft saved: {}", title));
                }
            }
            Err(e) => {
                tracing::error!("Draft export failed: {}", e);
                self.set_status(format!("Export failed: {}", e));
            }
        }
    }

    // --- countdown / tick -------------------------------------------------

    /// Schedule simulated generation (resets any countdown already running)
    fn schedule(&mut self, pending: PendingGeneration) {
        self.pending = Some(pending);
        self.pending_start = Some(Instant::now());
        self.countdown_seconds = GENERATION_SECONDS as u8;
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
        self.pending_start = None;
        self.countdown_seconds = 0;
    }

    pub fn tick(&mut self) -> Result<()> {
        // Resolve the generation countdown
        if let Some(start) = self.pending_start {
            let elapsed = start.elapsed().as_secs();
            let remaining = GENERATION_SECONDS.saturating_sub(elapsed);
            self.countdown_seconds = remaining as u8;

            if remaining == 0 {
                self.apply_pending();
            }
        }

        // Clear status message after 3 seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        self.update_info_message();
        Ok(())
    }

    fn apply_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        self.pending_start = None;
        self.countdown_seconds = 0;

        let (Some(tool), Some(session)) = (self.tool, self.session.as_mut()) else {
            return;
        };

        match pending.action {
            GenAction::StepOutput => {
                let step = session.current_step();
                tool.run_generation(session, step);
                session.advance();
                self.on_step_changed();
                self.set_status("Content ready");
                if self.config.notifications {
                    let _ = crate::notify("penna", &format!("{} finished generating", tool.title()));
                }
            }
            GenAction::ChatReply { message } => {
                let text = chatbot::reply(session, &message);
                chatbot::push_message(session, "bot", &text);
            }
        }
    }

    /// Update the info line with progress or catalog hints
    fn update_info_message(&mut self) {
        self.info_message = match (self.tool, self.session.as_ref()) {
            (Some(tool), Some(session)) => {
                let def = session.current_def();
                Some(format!(
                    "{} │ Step {}/{} — {}",
                    tool.title(),
                    session.current_step(),
                    session.len(),
                    def.title
                ))
            }
            _ => Some(format!(
                "{} tools │ Enter opens, d shows saved drafts",
                CATALOG.len()
            )),
        };
    }
}

fn to_form_field(spec: &FieldSpec) -> FormField {
    let kind = match spec.kind {
        InputKind::Line => FormFieldKind::Line,
        InputKind::Paragraph => FormFieldKind::Paragraph,
        InputKind::Select { options, .. } => FormFieldKind::Select { options },
        InputKind::Stepper { min, max } => FormFieldKind::Stepper { min, max },
    };
    FormField {
        name: spec.name,
        label: spec.label,
        placeholder: spec.placeholder,
        kind,
    }
}

fn custom_form_field(slot: &CustomSlot) -> FormField {
    FormField {
        name: slot.field,
        label: slot.label,
        placeholder: "",
        kind: FormFieldKind::Line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with_tool(tool: ToolKind) -> App {
        let mut app = App::with_config(AppConfig::default());
        app.open_tool(tool);
        app
    }

    #[test]
    fn typing_fills_the_focused_form_field() {
        let mut app = app_with_tool(ToolKind::OneClick);
        for c in "Hi".chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.text("title"), "Hi");
    }

    #[test]
    fn blocked_advance_keeps_step_and_reports() {
        let mut app = app_with_tool(ToolKind::OneClick);
        app.handle_key(ctrl('n')).unwrap();
        assert_eq!(app.session.as_ref().unwrap().current_step(), 1);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn valid_advance_on_generating_step_schedules_countdown() {
        let mut app = app_with_tool(ToolKind::OneClick);
        {
            let session = app.session.as_mut().unwrap();
            session.set_text("title", "T");
            session.set_text("description", "D");
        }
        app.handle_key(ctrl('n')).unwrap();
        // Generation is pending; the step has not moved yet.
        assert!(app.pending.is_some());
        assert_eq!(app.session.as_ref().unwrap().current_step(), 1);

        app.apply_pending();
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.current_step(), 2);
        assert!(!session.text("content").is_empty());
    }

    #[test]
    fn esc_cancels_pending_generation() {
        let mut app = app_with_tool(ToolKind::OneClick);
        {
            let session = app.session.as_mut().unwrap();
            session.set_text("title", "T");
            session.set_text("description", "D");
        }
        app.handle_key(ctrl('n')).unwrap();
        assert!(app.pending.is_some());
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(app.pending.is_none());
        assert_eq!(app.session.as_ref().unwrap().current_step(), 1);
    }

    #[test]
    fn esc_at_step_one_returns_to_catalog() {
        let mut app = app_with_tool(ToolKind::Guided);
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.section, Section::Catalog);
        assert!(app.session.is_none());
    }

    #[test]
    fn custom_select_expands_companion_field() {
        let mut app = app_with_tool(ToolKind::Chatbot);
        let before = app.form_fields().len();
        app.session
            .as_mut()
            .unwrap()
            .set_choice("kind", chatbot::CUSTOM_TYPE);
        assert_eq!(app.form_fields().len(), before + 1);
    }

    #[test]
    fn chat_enter_sends_message_and_schedules_reply() {
        let mut app = app_with_tool(ToolKind::Chatbot);
        {
            let session = app.session.as_mut().unwrap();
            session.set_text("name", "Iris");
            session.set_choice("kind", 0);
            session.set_choice("expertise", 0);
            session.advance();
        }
        app.chat_input = "hello there".to_string();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.entries("messages").len(), 1);
        assert!(app.pending.is_some());

        app.apply_pending();
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.entries("messages").len(), 2);
        assert_eq!(session.entries("messages")[1].get("role"), "bot");
    }

    #[test]
    fn reset_confirm_clears_session() {
        let mut app = app_with_tool(ToolKind::OneClick);
        app.session.as_mut().unwrap().set_text("title", "T");
        app.popup = Popup::ConfirmReset;
        app.handle_key(key(KeyCode::Char('y'))).unwrap();
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.current_step(), 1);
        assert!(session.is_empty_payload());
    }

    #[test]
    fn q_only_quits_from_the_catalog() {
        let mut app = App::with_config(AppConfig::default());
        assert!(app.quit_on_q());
        app.open_tool(ToolKind::Guided);
        assert!(!app.quit_on_q());
    }

    #[test]
    fn with_config_preselects_the_last_tool() {
        let app = App::with_config(AppConfig {
            last_tool: Some("optimizer".to_string()),
            ..AppConfig::default()
        });
        assert_eq!(CATALOG[app.selected_tool], ToolKind::Optimizer);
    }

    #[test]
    fn ctrl_s_exports_the_chat_transcript() {
        let dir = std::env::temp_dir().join(format!("penna-chat-export-{}", std::process::id()));
        let mut app = App::with_config(AppConfig {
            export_dir: Some(dir.clone()),
            ..AppConfig::default()
        });
        app.open_tool(ToolKind::Chatbot);
        {
            let session = app.session.as_mut().unwrap();
            session.set_text("name", "Iris");
            session.set_choice("kind", 0);
            session.set_choice("expertise", 0);
            session.advance();
        }
        app.chat_input = "hello".to_string();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.apply_pending();

        app.handle_key(ctrl('s')).unwrap();
        assert_eq!(app.config.recent_drafts.len(), 1);
        let record = &app.config.recent_drafts[0];
        assert_eq!(record.tool, "chatbot");
        let saved = std::fs::read_to_string(&record.path).unwrap();
        assert!(saved.contains("hello"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
