use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use installer_core::catalog::MODEL_CATALOG;
use installer_core::layout::API_START_COMMAND;
use installer_core::StepStatus;

use crate::app::navigator::Navigator;
use crate::app::steps::{build_install_summary, WizardPage, PAGES};
use crate::app::validation::custom_model_hint;
use crate::model::App;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
pub(crate) const SPINNER_LEN: usize = SPINNER.len();

pub(crate) const PREF_ROWS: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum ModelFocus {
    #[default]
    Choices,
    CustomUrl,
    CustomFilename,
}

/// Render-only state of the wizard screen.
#[derive(Debug, Default)]
pub(crate) struct WizardView {
    /// Blocking message; any key dismisses it.
    pub prompt: Option<String>,
    pub model_focus: ModelFocus,
    pub prefs_row: usize,
}

fn key_style() -> Style {
    Style::default().fg(Color::Cyan)
}

fn accent() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

fn bordered(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title)
}

pub(crate) fn draw_wizard(f: &mut Frame, nav: &Navigator, view: &WizardView) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(3),
    ])
    .areas(f.area());

    f.render_widget(page_header(nav), header);

    let lines = match nav.page() {
        WizardPage::Terms => terms_lines(nav),
        WizardPage::Model => model_lines(nav, view),
        WizardPage::Preferences => prefs_lines(nav, view),
        WizardPage::Install => install_lines(nav),
    };
    let title = format!(" {} ", nav.page().title());
    f.render_widget(
        Paragraph::new(lines)
            .block(bordered(&title))
            .wrap(Wrap { trim: false }),
        body,
    );
    f.render_widget(nav_bar(nav), footer);

    if let Some(message) = &view.prompt {
        draw_prompt(f, message);
    }
}

fn page_header(nav: &Navigator) -> Paragraph<'static> {
    let mut spans = vec![Span::styled("Vox Browser Installer  ", accent())];
    for (index, page) in PAGES.iter().enumerate() {
        let style = if index == nav.current_page() {
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if index < nav.current_page() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {}. {} ", index + 1, page.title()), style));
    }
    Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM))
}

fn nav_bar(nav: &Navigator) -> Paragraph<'static> {
    let controls = nav.controls();
    let mut spans = Vec::new();
    if controls.back_visible {
        spans.push(Span::styled("Esc", key_style()));
        spans.push(Span::raw(" Back   "));
    }
    if controls.next_visible {
        spans.push(Span::styled("Enter", key_style()));
        spans.push(Span::raw(" Next   "));
    } else {
        spans.push(Span::styled("Enter", key_style()));
        spans.push(Span::raw(" Install   "));
    }
    spans.push(Span::styled("Ctrl+Q", key_style()));
    spans.push(Span::raw(" Quit"));
    Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP))
}

fn terms_lines(nav: &Navigator) -> Vec<Line<'static>> {
    let checkbox = if nav.state().terms_accepted { "[x]" } else { "[ ]" };
    vec![
        Line::from("By installing Vox, you agree to:"),
        Line::from("  - Use open-source LLMs for local inference only"),
        Line::from("  - Accept that large models require significant disk and RAM"),
        Line::from("  - No data is sent to any cloud by default"),
        Line::from("  - You are responsible for your own privacy and compliance"),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{checkbox} "), accent()),
            Span::raw("I accept the terms and conditions  "),
            Span::styled("(Space to toggle)", Style::default().fg(Color::DarkGray)),
        ]),
    ]
}

fn input_line(label: &str, value: &str, enabled: bool, focused: bool) -> Line<'static> {
    let value_style = if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::raw(format!("  {label:<18}")),
        Span::styled(format!("{value}{cursor}"), value_style),
    ])
}

fn model_lines(nav: &Navigator, view: &WizardView) -> Vec<Line<'static>> {
    let state = nav.state();
    let mut lines = vec![Line::from("Choose your local AI model:"), Line::from("")];
    for (index, choice) in MODEL_CATALOG.iter().enumerate() {
        let selected = index == state.selected_model;
        let marker = if selected { "(•)" } else { "( )" };
        let style = if selected && view.model_focus == ModelFocus::Choices {
            accent()
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("  {marker} {}", choice.label),
            style,
        )));
    }

    let enabled = nav.custom_fields_enabled();
    lines.push(Line::from(""));
    lines.push(input_line(
        "Custom model URL:",
        &state.custom_url,
        enabled,
        enabled && view.model_focus == ModelFocus::CustomUrl,
    ));
    lines.push(input_line(
        "Custom filename:",
        &state.custom_filename,
        enabled,
        enabled && view.model_focus == ModelFocus::CustomFilename,
    ));
    if enabled {
        if let Some(hint) = custom_model_hint(&state.custom_url, &state.custom_filename) {
            lines.push(Line::from(Span::styled(
                format!("  {hint}"),
                Style::default().fg(Color::Yellow),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("↑/↓", key_style()),
        Span::raw(" select  "),
        Span::styled("Tab", key_style()),
        Span::raw(" edit custom fields"),
    ]));
    lines
}

fn prefs_lines(nav: &Navigator, view: &WizardView) -> Vec<Line<'static>> {
    let state = nav.state();
    let rows = [
        ("Tab layout:", state.tab_layout.as_str()),
        ("Theme:", state.theme.as_str()),
        ("Search engine:", state.search_engine.as_str()),
    ];
    let mut lines = vec![Line::from("Browser preferences:"), Line::from("")];
    for (index, (label, value)) in rows.iter().enumerate() {
        let style = if index == view.prefs_row {
            accent()
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {label:<16}")),
            Span::styled(format!("< {value} >"), style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("↑/↓", key_style()),
        Span::raw(" choose  "),
        Span::styled("Space/←/→", key_style()),
        Span::raw(" change value"),
    ]));
    lines
}

fn install_lines(nav: &Navigator) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Ready to install Vox Browser!", accent())),
        Line::from(""),
    ];
    for item in build_install_summary(nav.state()) {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<15}", item.label)),
            Span::styled(item.value, Style::default().add_modifier(Modifier::BOLD)),
        ]));
    }
    lines.extend([
        Line::from(""),
        Line::from("Press Enter to begin. This may take several minutes."),
        Line::from("You can start the local AI server after install:"),
        Line::from(Span::styled(
            format!("  {API_START_COMMAND}"),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled("[ Install Vox ]", accent().add_modifier(Modifier::REVERSED))),
    ]);
    lines
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_prompt(f: &mut Frame, message: &str) {
    let area = centered(f.area(), 54, 7);
    f.render_widget(Clear, area);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key", Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .block(bordered(" Terms Required "))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn status_marker(status: StepStatus, spinner_idx: usize) -> (&'static str, Style) {
    match status {
        StepStatus::Pending => ("·", Style::default().fg(Color::DarkGray)),
        StepStatus::Running => (SPINNER[spinner_idx % SPINNER_LEN], Style::default().fg(Color::Cyan)),
        StepStatus::Done => ("✓", Style::default().fg(Color::Green)),
        StepStatus::Skipped => ("-", Style::default().fg(Color::DarkGray)),
        StepStatus::Failed => ("✗", Style::default().fg(Color::Red)),
    }
}

pub(crate) fn draw_progress(f: &mut Frame, app: &App) {
    let [steps_area, gauge_area, status_area, logs_area, footer] = Layout::vertical([
        Constraint::Length(app.steps.len() as u16 + 2),
        Constraint::Length(3),
        Constraint::Length(6),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let items: Vec<ListItem> = app
        .steps
        .iter()
        .map(|step| {
            let (marker, style) = status_marker(step.status, app.spinner_idx);
            let mut spans = vec![
                Span::styled(format!(" {marker} "), style),
                Span::raw(step.name.clone()),
            ];
            if let Some(err) = &step.err {
                let first = err.lines().next().unwrap_or_default().to_string();
                spans.push(Span::styled(format!("  {first}"), Style::default().fg(Color::Red)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    f.render_widget(List::new(items).block(bordered(" Installing Vox ")), steps_area);

    let gauge_style = match &app.outcome {
        Some(outcome) if !outcome.is_success() => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Magenta),
    };
    f.render_widget(
        Gauge::default()
            .block(bordered(" Progress "))
            .gauge_style(gauge_style)
            .ratio(app.progress.clamp(0.0, 1.0)),
        gauge_area,
    );

    let status_lines: Vec<Line> = app.status.lines().map(|l| Line::from(l.to_string())).collect();
    f.render_widget(
        Paragraph::new(status_lines)
            .block(bordered(" Status "))
            .wrap(Wrap { trim: false }),
        status_area,
    );

    let visible = logs_area.height.saturating_sub(2) as usize;
    let skip = app.logs.len().saturating_sub(visible);
    let log_lines: Vec<Line> = app
        .logs
        .iter()
        .skip(skip)
        .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(Color::Gray))))
        .collect();
    f.render_widget(Paragraph::new(log_lines).block(bordered(" Log ")), logs_area);

    let hint = if app.done {
        Line::from(vec![Span::styled("Enter", key_style()), Span::raw(" Exit")])
    } else {
        Line::from(Span::styled(
            "Installation in progress; it cannot be cancelled.",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(hint), footer);
}
