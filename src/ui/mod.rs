use std::sync::OnceLock;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect, Alignment},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, FormField, FormFieldKind, Popup, Section};
use crate::theme::Theme;
use crate::tools::{chatbot, comparison, StepLayout, ToolKind, CATALOG};
use crate::wizard::{StepStatus, WizardSession};

// Load theme colors once at startup
static THEME: OnceLock<Theme> = OnceLock::new();

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::load)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn accent_bright() -> Color { theme().accent_bright }
fn inactive() -> Color { theme().inactive }
fn success() -> Color { theme().success }
fn warning() -> Color { theme().warning }
fn danger() -> Color { theme().danger }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg_selected() -> Color { theme().bg_selected }
fn header() -> Color { theme().header }

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(8),    // Catalog or wizard panel
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);

    match app.section {
        Section::Catalog => draw_catalog(f, app, chunks[1]),
        Section::Wizard => draw_wizard(f, app, chunks[1]),
    }

    draw_footer(f, app, chunks[2]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f),
        Popup::ConfirmReset => draw_confirm_reset(f),
        Popup::RecentDrafts => draw_recent_drafts(f, app),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: generation countdown > status message > info message > ready
    let line = if let Some(ref pending) = app.pending {
        let countdown_color = match app.countdown_seconds {
            2.. => accent(),
            1 => warning(),
            0 => danger(),
        };

        Line::from(vec![
            Span::styled("󰔟 ", Style::default().fg(countdown_color)),
            Span::styled(
                format!("{}", app.countdown_seconds),
                Style::default().fg(countdown_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(text_dim())),
            Span::styled(format!("{}...", pending.label), Style::default().fg(text())),
            Span::styled(" │ ", Style::default().fg(text_dim())),
            Span::styled("(Esc cancels)", Style::default().fg(text_dim())),
        ])
    } else if let Some(ref status) = app.status_message {
        Line::from(vec![
            Span::styled(status, Style::default().fg(warning())),
        ])
    } else if let Some(ref info) = app.info_message {
        Line::from(vec![
            Span::styled(info, Style::default().fg(text_dim())),
        ])
    } else {
        Line::from(vec![
            Span::styled("Ready", Style::default().fg(text_dim())),
        ])
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_catalog(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            " Drafting Tools ",
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent()));

    let rows: Vec<Row> = CATALOG
        .iter()
        .enumerate()
        .map(|(i, tool)| {
            let marker = if i == app.selected_tool { "▸" } else { " " };
            let row_style = if i == app.selected_tool {
                Style::default().bg(bg_selected()).fg(text())
            } else {
                Style::default()
            };

            Row::new(vec![
                Span::styled(marker, Style::default().fg(accent())),
                Span::styled(tool.title(), Style::default().fg(text())),
                Span::styled(tool.tagline(), Style::default().fg(text_dim())),
            ])
            .style(row_style)
        })
        .collect();

    let widths = vec![
        Constraint::Length(2),
        Constraint::Percentage(40),
        Constraint::Percentage(55),
    ];

    let table = Table::new(rows, widths).block(block);
    f.render_widget(table, area);
}

fn draw_wizard(f: &mut Frame, app: &App, area: Rect) {
    let (Some(tool), Some(session)) = (app.tool, app.session.as_ref()) else {
        return;
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", tool.title()),
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Step progress
            Constraint::Min(4),    // Step content
        ])
        .split(inner);

    draw_progress(f, session, chunks[0]);

    match tool.layout(session.current_step()) {
        StepLayout::Form(_) => draw_form(f, app, session, chunks[1]),
        StepLayout::Pick { field, options } => {
            draw_pick(f, app, session, field, options, chunks[1])
        }
        StepLayout::Products => draw_products(f, app, session, chunks[1]),
        StepLayout::Parts => draw_parts(f, app, session, chunks[1]),
        StepLayout::Chat => draw_chat(f, app, session, chunks[1]),
        StepLayout::Output => draw_output(f, app, tool, session, chunks[1]),
    }
}

/// Step chips across the top of the wizard panel, colored by status.
fn draw_progress(f: &mut Frame, session: &WizardSession, area: Rect) {
    let statuses = session.step_status();
    let mut spans = vec![Span::raw(" ")];

    for (i, def) in session.defs().iter().enumerate() {
        let step = i + 1;
        let is_current = step == session.current_step();

        let color = match statuses[i] {
            StepStatus::Complete => success(),
            StepStatus::Valid => accent_bright(),
            StepStatus::Pending => text_dim(),
        };
        let mut style = Style::default().fg(color);
        if is_current {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }

        let marker = match statuses[i] {
            StepStatus::Complete => "●",
            StepStatus::Valid => "◐",
            StepStatus::Pending => "○",
        };
        spans.push(Span::styled(format!("{} {} {}", marker, step, def.title), style));

        if step < session.len() {
            spans.push(Span::styled(" ── ", Style::default().fg(inactive())));
        }
    }

    let progress = Paragraph::new(vec![Line::from(spans), Line::from("")]);
    f.render_widget(progress, area);
}

fn draw_form(f: &mut Frame, app: &App, session: &WizardSession, area: Rect) {
    let fields = app.form_fields();
    let mut lines: Vec<Line> = Vec::new();

    for (i, field) in fields.iter().enumerate() {
        let focused = i == app.focus_field;
        let label_style = if focused {
            Style::default().fg(accent()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(header())
        };
        lines.push(Line::from(Span::styled(format!(" {}", field.label), label_style)));

        match field.kind {
            FormFieldKind::Line | FormFieldKind::Paragraph => {
                push_text_value(&mut lines, session, field, focused);
            }
            FormFieldKind::Select { options } => {
                let (value, value_style) = match session.choice(field.name) {
                    Some(i) if i < options.len() => {
                        (options[i], Style::default().fg(accent_bright()))
                    }
                    _ => (field.placeholder, Style::default().fg(text_dim())),
                };
                lines.push(Line::from(vec![
                    Span::styled("   ◂ ", Style::default().fg(if focused { accent() } else { inactive() })),
                    Span::styled(value, value_style),
                    Span::styled(" ▸", Style::default().fg(if focused { accent() } else { inactive() })),
                ]));
            }
            FormFieldKind::Stepper { min, max } => {
                let value = session.choice(field.name).unwrap_or((min + max) / 2);
                lines.push(Line::from(vec![
                    Span::styled("   − ", Style::default().fg(if focused { accent() } else { inactive() })),
                    Span::styled(
                        format!("{}", value),
                        Style::default().fg(accent_bright()).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" +", Style::default().fg(if focused { accent() } else { inactive() })),
                ]));
            }
        }
        lines.push(Line::from(""));
    }

    let form = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(form, area);
}

/// Append the value lines of a text field, with placeholder and cursor.
fn push_text_value(lines: &mut Vec<Line>, session: &WizardSession, field: &FormField, focused: bool) {
    let value = session.text(field.name);

    if value.is_empty() && !focused {
        lines.push(Line::from(Span::styled(
            format!("   {}", field.placeholder),
            Style::default().fg(text_dim()),
        )));
        return;
    }

    let mut value_lines: Vec<String> = value.split('\n').map(str::to_string).collect();
    if focused {
        match value_lines.last_mut() {
            Some(last) => last.push('_'),
            None => value_lines.push("_".to_string()),
        }
    }
    for vl in value_lines {
        lines.push(Line::from(Span::styled(
            format!("   {}", vl),
            Style::default().fg(text()),
        )));
    }
}

fn draw_pick(
    f: &mut Frame,
    app: &App,
    session: &WizardSession,
    field: &str,
    options: &[&str],
    area: Rect,
) {
    let chosen = session.choice(field);
    let mut lines: Vec<Line> = Vec::new();

    for (i, option) in options.iter().enumerate() {
        let highlighted = i == app.pick_selected;
        let marker = if chosen == Some(i) { "●" } else { "○" };
        let marker_color = if chosen == Some(i) { success() } else { text_dim() };

        let mut row_style = Style::default().fg(text());
        if highlighted {
            row_style = row_style.bg(bg_selected());
        }

        // Options may span several lines (outlines do)
        for (j, option_line) in option.split('\n').enumerate() {
            if j == 0 {
                lines.push(Line::from(vec![
                    Span::styled(format!(" {} ", marker), Style::default().fg(marker_color)),
                    Span::styled(option_line.to_string(), row_style),
                ]));
            } else {
                lines.push(Line::from(Span::styled(
                    format!("   {}", option_line),
                    row_style.fg(text_dim()),
                )));
            }
        }
        lines.push(Line::from(""));
    }

    let pick = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(pick, area);
}

fn draw_products(f: &mut Frame, app: &App, session: &WizardSession, area: Rect) {
    let products = session.entries("products");
    if products.is_empty() {
        let empty = Paragraph::new(" No products yet")
            .style(Style::default().fg(text_dim()));
        f.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Product tabs
            Constraint::Min(4),    // Fields of the selected product
        ])
        .split(area);

    // Tabs
    let mut tab_spans = vec![Span::raw(" ")];
    for (i, product) in products.iter().enumerate() {
        let name = product.get("name").trim();
        let label = if name.is_empty() {
            format!(" Product {} ", i + 1)
        } else {
            format!(" {} ", name)
        };
        let style = if i == app.product_selected {
            Style::default().bg(bg_selected()).fg(text()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(text_dim())
        };
        tab_spans.push(Span::styled(label, style));
        tab_spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(tab_spans)), chunks[0]);

    // Fields
    let entry = &products[app.product_selected.min(products.len() - 1)];
    let mut lines: Vec<Line> = Vec::new();
    for (i, (key, label)) in comparison::PRODUCT_KEYS.iter().enumerate() {
        let focused = i == app.product_field;
        let label_style = if focused {
            Style::default().fg(accent()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(header())
        };
        lines.push(Line::from(Span::styled(format!(" {}", label), label_style)));

        let value = entry.get(key);
        if value.is_empty() && !focused {
            lines.push(Line::from(Span::styled("   ...", Style::default().fg(text_dim()))));
        } else {
            let mut value_lines: Vec<String> = value.split('\n').map(str::to_string).collect();
            if focused {
                match value_lines.last_mut() {
                    Some(last) => last.push('_'),
                    None => value_lines.push("_".to_string()),
                }
            }
            for vl in value_lines {
                lines.push(Line::from(Span::styled(
                    format!("   {}", vl),
                    Style::default().fg(text()),
                )));
            }
        }
        lines.push(Line::from(""));
    }

    let fields = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(fields, chunks[1]);
}

fn draw_parts(f: &mut Frame, app: &App, session: &WizardSession, area: Rect) {
    let parts = session.entries("parts");
    if parts.is_empty() {
        let empty = Paragraph::new(" No content parts")
            .style(Style::default().fg(text_dim()));
        f.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30), // Part list
            Constraint::Percentage(70), // Selected part detail
        ])
        .split(area);

    let rows: Vec<Row> = parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let optimized = !part.get("optimized").trim().is_empty();
            let (icon, icon_color) = if optimized {
                ("✓", success())
            } else {
                ("·", text_dim())
            };
            let row_style = if i == app.part_selected {
                Style::default().bg(bg_selected()).fg(text())
            } else {
                Style::default()
            };
            Row::new(vec![
                Span::styled(icon, Style::default().fg(icon_color)),
                Span::styled(format!("Part {}", i + 1), Style::default().fg(text())),
            ])
            .style(row_style)
        })
        .collect();

    let list = Table::new(rows, vec![Constraint::Length(2), Constraint::Min(6)]).block(
        Block::default()
            .title(Span::styled(" Parts ", Style::default().fg(header())))
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(inactive())),
    );
    f.render_widget(list, chunks[0]);

    // Detail of the selected part
    let part = &parts[app.part_selected.min(parts.len() - 1)];
    let keywords = part.get("keywords");
    let keyword_cursor = if app.part_editing { "_" } else { "" };
    let keyword_style = if app.part_editing {
        Style::default().fg(accent())
    } else {
        Style::default().fg(accent_bright())
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Keywords: ", Style::default().fg(header())),
            Span::styled(format!("{}{}", keywords, keyword_cursor), keyword_style),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Original", Style::default().fg(header()))),
    ];
    for l in part.get("original").split('\n') {
        lines.push(Line::from(Span::styled(
            format!("   {}", l),
            Style::default().fg(text_dim()),
        )));
    }
    lines.push(Line::from(""));

    let optimized = part.get("optimized");
    if optimized.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            " Not optimized yet (Enter runs it)",
            Style::default().fg(text_dim()),
        )));
    } else {
        lines.push(Line::from(Span::styled(" Optimized", Style::default().fg(success()))));
        for l in optimized.split('\n') {
            lines.push(Line::from(Span::styled(
                format!("   {}", l),
                Style::default().fg(text()),
            )));
        }
    }

    let detail = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(detail, chunks[1]);
}

fn draw_chat(f: &mut Frame, app: &App, session: &WizardSession, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Transcript
            Constraint::Length(3), // Input line
        ])
        .split(area);

    let bot_name = {
        let name = session.text("name").trim().to_string();
        if name.is_empty() { "Bot".to_string() } else { name }
    };

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", bot_name), Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("│ {} │ {}", chatbot::display_type(session), chatbot::display_expertise(session)),
                Style::default().fg(text_dim()),
            ),
        ]),
        Line::from(""),
    ];
    for message in session.entries("messages") {
        let (label, label_color) = if message.get("role") == "user" {
            ("You".to_string(), accent())
        } else {
            (bot_name.clone(), header())
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {}: ", label), Style::default().fg(label_color).add_modifier(Modifier::BOLD)),
            Span::styled(message.get("text").to_string(), Style::default().fg(text())),
        ]));
        lines.push(Line::from(""));
    }
    if app.pending.is_some() {
        lines.push(Line::from(Span::styled(
            format!(" {} is typing...", bot_name),
            Style::default().fg(text_dim()).add_modifier(Modifier::ITALIC),
        )));
    }
    if session.entries("messages").is_empty() && app.pending.is_none() {
        lines.push(Line::from(Span::styled(
            " Say hello to try out your assistant",
            Style::default().fg(text_dim()),
        )));
    }

    // Keep the tail of the transcript in view
    let visible = chunks[0].height as usize;
    let skip = lines.len().saturating_sub(visible);
    let transcript = Paragraph::new(lines[skip..].to_vec()).wrap(Wrap { trim: false });
    f.render_widget(transcript, chunks[0]);

    let input = Paragraph::new(format!("{}_", app.chat_input))
        .style(Style::default().fg(text()))
        .block(
            Block::default()
                .title(Span::styled(" Message ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        );
    f.render_widget(input, chunks[1]);
}

fn draw_output(f: &mut Frame, app: &App, tool: ToolKind, session: &WizardSession, area: Rect) {
    let body = tool.draft_body(session).unwrap_or_default();

    let block = Block::default()
        .title(Span::styled(" Draft Preview ", Style::default().fg(header())))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));

    let lines: Vec<Line> = body
        .lines()
        .map(|line| {
            if line.starts_with("##") {
                Line::styled(line.to_string(), Style::default().fg(accent_bright()).add_modifier(Modifier::BOLD))
            } else if line.starts_with('-') {
                Line::styled(line.to_string(), Style::default().fg(text()))
            } else {
                Line::styled(line.to_string(), Style::default().fg(text()))
            }
        })
        .collect();

    let preview = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.output_scroll as u16, 0));
    f.render_widget(preview, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.section {
        Section::Catalog => vec![
            ("↑↓", "Nav"),
            ("Enter", "Open"),
            ("d", "Drafts"),
            ("h", "Help"),
            ("q", "Quit"),
        ],
        Section::Wizard => match app.layout() {
            Some(StepLayout::Form(_)) => vec![
                ("Tab", "Field"),
                ("←→", "Options"),
                ("^n", "Next"),
                ("^p", "Back"),
                ("^r", "Reset"),
                ("Esc", "Back"),
            ],
            Some(StepLayout::Pick { .. }) => vec![
                ("↑↓", "Nav"),
                ("Enter", "Choose"),
                ("^p", "Back"),
                ("^r", "Reset"),
                ("Esc", "Back"),
            ],
            Some(StepLayout::Products) => vec![
                ("←→", "Product"),
                ("Tab", "Field"),
                ("^n", "Generate"),
                ("^p", "Back"),
                ("Esc", "Back"),
            ],
            Some(StepLayout::Parts) => vec![
                ("↑↓", "Nav"),
                ("Enter", "Optimize"),
                ("a", "All"),
                ("e", "Keywords"),
                ("^n", "Next"),
            ],
            Some(StepLayout::Chat) => vec![
                ("Enter", "Send"),
                ("^s", "Save"),
                ("^p", "Back"),
                ("^r", "Reset"),
                ("Esc", "Back"),
            ],
            Some(StepLayout::Output) => vec![
                ("↑↓", "Scroll"),
                ("s", "Save"),
                ("Enter", "Finish"),
                ("Esc", "Back"),
            ],
            None => vec![],
        },
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else if area.width < 80 { 5 } else { hints.len() };

    let blocked = app
        .session
        .as_ref()
        .map(|s| !s.can_advance())
        .unwrap_or(false);

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            // Dim the Next hint while the step's requirements are unmet
            let key_color = if *key == "^n" && blocked { inactive() } else { accent() };
            vec![
                Span::styled(*key, Style::default().fg(key_color)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 70 },
        if area.height < 40 { 95 } else { 80 },
        area
    );

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled("═══ Catalog ═══", Style::default().fg(header()).add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::styled("  ↑/↓ j/k   ", Style::default().fg(accent())),
            Span::raw("Move through the tool list"),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", Style::default().fg(accent())),
            Span::raw("Open the selected tool"),
        ]),
        Line::from(vec![
            Span::styled("  d         ", Style::default().fg(accent())),
            Span::raw("Show recently exported drafts"),
        ]),
        Line::from(""),
        Line::from(Span::styled("═══ Wizard ═══", Style::default().fg(header()).add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::styled("  Ctrl-n    ", Style::default().fg(accent())),
            Span::raw("Next step (blocked until required fields are filled)"),
        ]),
        Line::from(vec![
            Span::styled("  Ctrl-p    ", Style::default().fg(accent())),
            Span::raw("Previous step (always allowed, keeps your input)"),
        ]),
        Line::from(vec![
            Span::styled("  Ctrl-r    ", Style::default().fg(accent())),
            Span::raw("Reset the wizard (asks first, clears everything)"),
        ]),
        Line::from(vec![
            Span::styled("  Esc       ", Style::default().fg(accent())),
            Span::raw("Cancel generation, else back (exits at step 1)"),
        ]),
        Line::from(vec![
            Span::styled("  Tab       ", Style::default().fg(accent())),
            Span::raw("Next field on a form"),
        ]),
        Line::from(vec![
            Span::styled("  ←/→       ", Style::default().fg(accent())),
            Span::raw("Cycle select options, adjust counters, switch products"),
        ]),
        Line::from(""),
        Line::from(Span::styled("═══ Finishing ═══", Style::default().fg(header()).add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::styled("  s         ", Style::default().fg(accent())),
            Span::raw("Save the draft as Markdown on a preview step"),
        ]),
        Line::from(vec![
            Span::styled("  Ctrl-s    ", Style::default().fg(accent())),
            Span::raw("Save from any step (chat transcripts included)"),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", Style::default().fg(accent())),
            Span::raw("Finish and return to the catalog"),
        ]),
        Line::from(""),
        Line::from(Span::styled("═══ Quick Start ═══", Style::default().fg(header()).add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::styled("  penna                  ", Style::default().fg(accent())),
            Span::raw("Launch this TUI"),
        ]),
        Line::from(vec![
            Span::styled("  penna --tool one-click ", Style::default().fg(accent())),
            Span::raw("Open a tool directly"),
        ]),
        Line::from(vec![
            Span::styled("  penna --tools          ", Style::default().fg(accent())),
            Span::raw("List tools as JSON for scripts"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" 󰋖 penna Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn draw_confirm_reset(f: &mut Frame) {
    let popup_area = centered_rect(40, 20, f.area());

    f.render_widget(Clear, popup_area);

    let confirm = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Reset this wizard? All entered data is cleared.",
            Style::default().fg(warning()),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y", Style::default().fg(success()).add_modifier(Modifier::BOLD)),
            Span::raw(" Yes   "),
            Span::styled("n", Style::default().fg(danger()).add_modifier(Modifier::BOLD)),
            Span::raw(" No"),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Confirm ", Style::default().fg(warning())))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(warning())),
    )
    .alignment(Alignment::Center);

    f.render_widget(confirm, popup_area);
}

fn draw_recent_drafts(f: &mut Frame, app: &App) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 90 { 90 } else { 70 },
        if area.height < 30 { 80 } else { 60 },
        area
    );

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(" Recent Drafts ", Style::default().fg(accent())))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent()));

    let rows: Vec<Row> = if app.config.recent_drafts.is_empty() {
        vec![Row::new(vec![
            Span::styled("  No drafts exported yet", Style::default().fg(text_dim())),
        ])]
    } else {
        app.config
            .recent_drafts
            .iter()
            .rev()
            .map(|record| {
                Row::new(vec![
                    Span::styled(record.title.clone(), Style::default().fg(text())),
                    Span::styled(record.tool.clone(), Style::default().fg(accent_bright())),
                    Span::styled(
                        record.path.to_string_lossy().into_owned(),
                        Style::default().fg(text_dim()),
                    ),
                ])
            })
            .collect()
    };

    let widths = vec![
        Constraint::Percentage(35),
        Constraint::Percentage(15),
        Constraint::Percentage(50),
    ];

    let table = Table::new(rows, widths)
        .header(Row::new(vec![
            Span::styled("Title", Style::default().fg(header())),
            Span::styled("Tool", Style::default().fg(header())),
            Span::styled("File", Style::default().fg(header())),
        ]))
        .block(block);

    f.render_widget(table, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
