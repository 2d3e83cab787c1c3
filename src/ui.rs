use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::{
    app::{App, AppState},
    board::{Cell, KEY_ROWS},
    scoring::LetterOutcome,
    util::{fit_to_width, format_clock},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

fn outcome_style(outcome: Option<LetterOutcome>) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match outcome {
        Some(LetterOutcome::Exact) => bold.bg(Color::Green).fg(Color::White),
        Some(LetterOutcome::Present) => bold.bg(Color::Yellow).fg(Color::Black),
        Some(LetterOutcome::Absent) => bold.bg(Color::DarkGray).fg(Color::White),
        None => bold,
    }
}

fn cell_span(cell: &Cell, flashing: bool) -> Span<'static> {
    let text = match cell.letter {
        Some(c) => format!(" {c} "),
        None => " · ".to_string(),
    };
    let mut style = outcome_style(cell.outcome);
    if cell.outcome.is_none() {
        style = if flashing {
            style.fg(Color::Red)
        } else if cell.letter.is_none() {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        };
    }
    Span::styled(text, style)
}

fn render_playing(app: &App, area: Rect, buf: &mut Buffer, now: Instant) {
    let session = app.controller.session();
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let board_lines = session.board.rows().len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),           // timer and score
            Constraint::Length(1),           // padding
            Constraint::Length(board_lines), // grid
            Constraint::Length(1),           // padding
            Constraint::Length(KEY_ROWS.len() as u16),
            Constraint::Length(1), // padding
            Constraint::Length(1), // notice
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Time: {}", format_clock(session.remaining_secs)),
            bold_style,
        ),
        Span::raw("    "),
        Span::styled(
            format!("Words Solved: {}", session.solved_count),
            Style::default().patch(bold_style).fg(Color::Cyan),
        ),
    ]))
    .alignment(Alignment::Center);
    header.render(chunks[0], buf);

    let flash_row = app.flash.row(now);
    let grid: Vec<Line> = session
        .board
        .rows()
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let flashing = flash_row == Some(idx);
            let mut spans = Vec::with_capacity(row.len() * 2);
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(cell_span(cell, flashing));
            }
            Line::from(spans)
        })
        .collect();
    Paragraph::new(grid)
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    let keys: Vec<Line> = KEY_ROWS
        .iter()
        .map(|row| {
            Line::from(
                row.chars()
                    .map(|c| {
                        let style = match session.keyboard.state(c) {
                            None => Style::default().add_modifier(Modifier::DIM),
                            state => outcome_style(state),
                        };
                        Span::styled(format!(" {c} "), style)
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    Paragraph::new(keys)
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    if let Some(text) = app.notices.current(now) {
        Paragraph::new(Span::styled(
            fit_to_width(text, chunks[6].width as usize),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);
    }

    let legend = if app.is_validating() {
        "checking word..."
    } else {
        "type a word, (enter) to guess / (esc)ape"
    };
    Paragraph::new(Span::styled(legend, italic_style)).render(chunks[8], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // score
            Constraint::Length(1), // padding
            Constraint::Min(1),    // rounds
            Constraint::Length(1), // legend
        ])
        .split(area);

    let Some(summary) = app.summary.as_ref() else {
        return;
    };

    Paragraph::new(Span::styled(
        "Time's up!",
        Style::default().patch(bold_style).fg(Color::Magenta),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "Words Solved: {}   ({} in {}, finished {})",
            summary.solved_count,
            summary.rounds.len(),
            format_clock(summary.duration_secs),
            summary.ended_at.format("%H:%M")
        ),
        bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    let rounds: Vec<Line> = summary
        .rounds
        .iter()
        .map(|round| {
            if round.solved {
                Line::from(Span::styled(
                    format!("{}  solved in {}", round.target, round.attempts),
                    Style::default().fg(Color::Green),
                ))
            } else {
                Line::from(Span::styled(
                    format!("{}  missed", round.target),
                    Style::default().fg(Color::Red),
                ))
            }
        })
        .collect();
    Paragraph::new(rounds)
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    Paragraph::new(Span::styled("(r)estart / (esc)ape", italic_style)).render(chunks[4], buf);
}

fn render_unavailable(message: &str, area: Rect, buf: &mut Buffer) {
    let text = vec![
        Line::from(Span::styled(
            "Could not start a game",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "(r)etry / (esc)ape",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(area);
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let now = Instant::now();
        match &self.state {
            AppState::Playing => render_playing(self, area, buf, now),
            AppState::Results => render_results(self, area, buf),
            AppState::Unavailable(message) => render_unavailable(message, area, buf),
        }
    }
}
