use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap};

use crate::state::{AppState, FormField, HeadToHead, PredictionResult, RequestState};

pub fn ui(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(9),
            Constraint::Min(9),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_form(frame, chunks[1], state);
    render_prediction(frame, chunks[2], state);

    let console = Paragraph::new(console_text(state, 3))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[3]);

    let footer =
        Paragraph::new(footer_text(state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[4]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

pub fn header_text(state: &AppState) -> String {
    let mut title = "MATCH PREDICTOR".to_string();
    if state.request.is_loading() {
        title.push_str(" | Calculating...");
    }
    format!("{title}\nEnter two teams and optional decimal odds, then hit Enter")
}

pub fn footer_text(state: &AppState) -> String {
    let submit = if state.request.is_loading() {
        "Calculating..."
    } else if state.form.has_teams() {
        "Enter Predict"
    } else {
        "Enter Predict (needs both teams)"
    };
    format!("Tab/↓/↑ Field | {submit} | F1 Help | Esc Quit")
}

fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Matchup").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    render_input_row(frame, rows[0], state, FormField::HomeTeam, "Home Team");
    render_input_row(frame, rows[1], state, FormField::AwayTeam, "Away Team");

    let section =
        Paragraph::new("Betting Odds (Optional)").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(section, rows[3]);

    render_input_row(frame, rows[4], state, FormField::OddsHome, "Home");
    render_input_row(frame, rows[5], state, FormField::OddsDraw, "Draw");
    render_input_row(frame, rows[6], state, FormField::OddsAway, "Away");
}

fn render_input_row(frame: &mut Frame, area: Rect, state: &AppState, field: FormField, label: &str) {
    if area.height == 0 {
        return;
    }
    let focused = state.focus == field;
    let row_style = if focused {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    if focused {
        frame.render_widget(Block::default().style(row_style), area);
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(12),
            Constraint::Min(10),
        ])
        .split(area);

    let marker = if focused { "> " } else { "  " };
    frame.render_widget(Paragraph::new(marker).style(row_style), cols[0]);
    frame.render_widget(
        Paragraph::new(label).style(row_style.add_modifier(Modifier::BOLD)),
        cols[1],
    );

    let raw = state.form.value(field);
    let value = if focused {
        format!("{raw}\u{2588}")
    } else {
        raw.to_string()
    };
    frame.render_widget(Paragraph::new(value).style(row_style), cols[2]);
}

fn render_prediction(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Prediction").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    match &state.request {
        RequestState::Idle => {
            let empty =
                Paragraph::new("No prediction yet").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, inner);
        }
        RequestState::Loading => {
            let busy = Paragraph::new("Calculating...").style(Style::default().fg(Color::Yellow));
            frame.render_widget(busy, inner);
        }
        RequestState::Failed(message) => {
            let error = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false });
            frame.render_widget(error, inner);
        }
        RequestState::Success(result) => render_result(frame, inner, result),
    }
}

fn render_result(frame: &mut Frame, area: Rect, result: &PredictionResult) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let colors = [Color::Green, Color::Yellow, Color::Red];
    for (idx, (label, prob)) in outcome_rows(result).into_iter().enumerate() {
        render_outcome_row(frame, rows[idx], &label, prob, colors[idx]);
    }

    render_head_to_head(frame, rows[4], result.head_to_head.as_ref());
}

fn render_outcome_row(frame: &mut Frame, area: Rect, label: &str, prob: f64, color: Color) {
    if area.height == 0 {
        return;
    }
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Min(10),
            Constraint::Length(7),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(label), cols[0]);

    let bar = Bar::default()
        .value(bar_value(prob))
        .text_value(String::new())
        .style(Style::default().fg(color));
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&[bar]))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .group_gap(0)
        .max(100);
    frame.render_widget(chart, cols[1]);

    frame.render_widget(Paragraph::new(percent_label(prob)), cols[2]);
}

fn render_head_to_head(frame: &mut Frame, area: Rect, h2h: Option<&HeadToHead>) {
    if area.height == 0 {
        return;
    }
    let Some(h2h) = h2h else {
        return;
    };

    let mut lines = vec![format!("H2H: {}", h2h.summary)];
    for meeting in h2h.last_5.iter().take(5) {
        lines.push(format!("  {meeting}"));
    }
    let paragraph = Paragraph::new(lines.join("\n")).style(Style::default().fg(Color::Gray));
    frame.render_widget(paragraph, area);
}

/// Outcome labels and probabilities in display order: home win, draw, away
/// win. Labels use the names the service resolved, not the typed input.
pub fn outcome_rows(result: &PredictionResult) -> [(String, f64); 3] {
    [
        (
            format!("{} Win", result.found_home_team),
            result.home_team_win_prob,
        ),
        ("Draw".to_string(), result.draw_prob),
        (
            format!("{} Win", result.found_away_team),
            result.away_team_win_prob,
        ),
    ]
}

/// Probability as a percentage with one decimal, passed through unclamped.
pub fn percent_label(prob: f64) -> String {
    format!("{:.1}%", prob * 100.0)
}

/// Bar length on the 0-100 scale the chart is capped at. Values the chart
/// cannot draw (NaN, negative) collapse to an empty bar.
pub fn bar_value(prob: f64) -> u64 {
    let pct = prob * 100.0;
    if pct.is_finite() && pct > 0.0 {
        pct.round() as u64
    } else {
        0
    }
}

pub fn console_text(state: &AppState, max_lines: usize) -> String {
    if state.logs.is_empty() {
        return "No activity yet".to_string();
    }
    let skip = state.logs.len().saturating_sub(max_lines);
    state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Match Predictor - Help",
        "",
        "  Tab / ↓      Next field",
        "  Shift+Tab / ↑  Previous field",
        "  Enter        Request prediction",
        "  Backspace    Delete last character",
        "  F1           Toggle help",
        "  Esc / Ctrl-C Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
