//! Ratatui drawing helpers for installer screens.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, ConfiguringPage, RunState, Screen};
use crate::model::{ActionStep, SimulationOptions, StepStatus};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    frame.render_widget(Clear, frame.area());
    match app.screen {
        Screen::Welcome => draw_welcome(frame, app),
        Screen::Configuring => draw_configuring(frame, app),
    }
}

fn draw_welcome(frame: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, layout[0]);

    let status_block = Block::default()
        .title("Simulated server")
        .borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(render_options(&app.options))
            .block(status_block)
            .wrap(Wrap { trim: true }),
        layout[1],
    );

    let footer = key_hints(&[
        ("Enter", "configure"),
        ("F", "toggle failure"),
        ("B", "toggle busy server"),
        ("Q", "quit"),
    ]);
    frame.render_widget(footer, layout[2]);
}

fn draw_configuring(frame: &mut Frame<'_>, app: &App) {
    let page = &app.page;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, layout[0]);

    if page.progress.visible {
        let percent = (page.progress.ratio() * 100.0).round() as u16;
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(page.progress.ratio())
            .label(format!("{} {}%", page.progress_text, percent));
        frame.render_widget(gauge, layout[1]);
    } else {
        let (label, color) = status_label(app.run_state);
        let mut spans = vec![Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )];
        if let Some(err) = &app.last_error {
            spans.push(Span::raw(format!(": {}", truncate_to_width(err, 72))));
        }
        let status = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, layout[1]);
    }

    frame.render_widget(
        Paragraph::new(render_banners(page))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        layout[2],
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout[3]);

    let steps = render_steps(&app.steps, body[0].width);
    let steps_block = Block::default().title("Steps").borders(Borders::ALL);
    frame.render_widget(steps.block(steps_block), body[0]);

    let logs = render_logs(&app.logs, body[1].width, body[1].height);
    let logs_block = Block::default().title("Logs").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(logs).block(logs_block), body[1]);

    let footer = if !page.enabled {
        Paragraph::new("Configuring...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    } else if page.back_visible {
        key_hints(&[("Enter", "back to menu"), ("Q", "quit")])
    } else {
        Paragraph::new("").block(Block::default().borders(Borders::TOP))
    };
    frame.render_widget(footer, layout[4]);

    if let Some(notice) = &page.error_notice {
        draw_error_notice(frame, notice);
    }
}

fn draw_header(frame: &mut Frame<'_>, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "setupvisor",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  -  Server configuration"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn draw_error_notice(frame: &mut Frame<'_>, notice: &str) {
    let area = centered(frame.area(), 60, 7);
    frame.render_widget(Clear, area);
    let mut lines: Vec<Line<'static>> = notice
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter = dismiss",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    let block = Block::default()
        .title("Error")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
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

fn key_hints(hints: &[(&'static str, &'static str)]) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(
            *key,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" = {action}  ")));
    }
    Paragraph::new(Text::from(Line::from(spans)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP))
}

fn status_label(state: RunState) -> (&'static str, Color) {
    match state {
        RunState::Running => ("In progress", Color::Yellow),
        RunState::Completed => ("Completed", Color::Green),
        RunState::Failed => ("Failed", Color::Red),
        RunState::Idle => ("Pending", Color::Gray),
    }
}

fn render_options(options: &SimulationOptions) -> Text<'static> {
    let describe = |step: Option<crate::actions::StepKind>| match step {
        Some(step) => step.label().to_string(),
        None => "never".to_string(),
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);
    Text::from(vec![
        Line::from(vec![
            Span::styled("Fails at: ", bold),
            Span::raw(describe(options.fail_at)),
        ]),
        Line::from(vec![
            Span::styled("Busy during: ", bold),
            Span::raw(describe(options.busy_at)),
        ]),
        Line::from(vec![
            Span::styled("Busy for: ", bold),
            Span::raw(format!("{}s", options.busy_for.as_secs())),
        ]),
    ])
}

fn render_banners(page: &ConfiguringPage) -> Text<'static> {
    let mut lines = Vec::new();
    if page.wait_info_visible && !page.wait_info_text.is_empty() {
        lines.push(Line::from(page.wait_info_text.clone()));
    }
    if page.busy_visible && !page.busy_text.is_empty() {
        lines.push(Line::from(Span::styled(
            page.busy_text.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }
    Text::from(lines)
}

fn render_steps(steps: &[ActionStep], width: u16) -> List<'static> {
    let inner_width = width.saturating_sub(2) as usize;
    let items = steps
        .iter()
        .map(|step| {
            let (symbol, style) = match step.status {
                StepStatus::Pending => ("[ ]", Style::default().fg(Color::Gray)),
                StepStatus::Running => ("[..]", Style::default().fg(Color::Yellow)),
                StepStatus::Done => ("[ok]", Style::default().fg(Color::Green)),
                StepStatus::Failed => ("[!!]", Style::default().fg(Color::Red)),
            };
            let available = inner_width.saturating_sub(symbol.len() + 1);
            let label = truncate_to_width(step.name, available);
            ListItem::new(Line::from(vec![
                Span::styled(symbol, style.add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::raw(label),
            ]))
        })
        .collect::<Vec<_>>();

    List::new(items)
}

fn render_logs(logs: &[String], width: u16, height: u16) -> Text<'static> {
    let inner_width = width.saturating_sub(2) as usize;
    let inner_height = height.saturating_sub(2) as usize;
    // Keep the newest lines in view.
    let skip = logs.len().saturating_sub(inner_height);
    let lines = logs
        .iter()
        .skip(skip)
        .map(|line| Line::from(truncate_to_width(line, inner_width)))
        .collect::<Vec<_>>();
    Text::from(lines)
}

fn truncate_to_width(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut out: String = text.chars().take(width - 3).collect();
    out.push_str("...");
    out
}
