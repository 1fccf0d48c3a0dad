//! Stateless rendering of the play view.

use super::app::PlayApp;
use super::input::COLUMNS;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::time::Instant;
use strictly_connections::{Difficulty, INITIAL_MISTAKES, PuzzleState, PuzzleStatus, reveal};

const ROW_HEIGHT: u16 = 3;

/// Background color of a tier.
pub fn tier_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Yellow => Color::Yellow,
        Difficulty::Green => Color::Green,
        Difficulty::Blue => Color::Blue,
        Difficulty::Purple => Color::Magenta,
    }
}

/// Lives line, e.g. `Mistakes remaining: ● ● ○ ○`.
pub fn lives_line(state: &PuzzleState) -> String {
    let remaining = state.remaining_mistakes();
    let dots: Vec<&str> = (0..INITIAL_MISTAKES)
        .map(|i| if i < remaining { "●" } else { "○" })
        .collect();
    format!("Mistakes remaining: {}", dots.join(" "))
}

/// Renders the whole play view.
pub fn draw(frame: &mut Frame, app: &PlayApp, now: Instant) {
    let state = app.session().state();
    let solved_rows = u16::try_from(state.solved_group_ids().len()).unwrap_or(u16::MAX);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                        // Title
            Constraint::Length(solved_rows * ROW_HEIGHT), // Solved groups
            Constraint::Min(ROW_HEIGHT),                  // Board or results
            Constraint::Length(3),                        // Status
            Constraint::Length(1),                        // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Connections")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    draw_solved(frame, chunks[1], state);
    if state.status().is_terminal() {
        draw_results(frame, chunks[2], app);
    } else {
        draw_board(frame, chunks[2], app);
    }

    let mut status = vec![Span::raw(lives_line(state))];
    if let Some(feedback) = app.session().feedback(now) {
        status.push(Span::raw("   "));
        status.push(Span::styled(
            feedback.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    let status = Paragraph::new(Line::from(status))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let help = if state.status().is_terminal() {
        "r: play again   q: quit"
    } else {
        "arrows: move   space: select   enter: submit   s: shuffle   d: deselect   r: reset   q: quit"
    };
    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn draw_solved(frame: &mut Frame, area: Rect, state: &PuzzleState) {
    let groups: Vec<_> = state.solved_groups().collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(groups.iter().map(|_| Constraint::Length(ROW_HEIGHT)))
        .split(area);

    for (group, row) in groups.iter().zip(rows.iter()) {
        let style = Style::default().fg(Color::Black).bg(tier_color(group.difficulty));
        let text = vec![
            Line::from(Span::styled(
                group.connection.clone(),
                style.add_modifier(Modifier::BOLD),
            )),
            Line::from(state.definition().member_texts(group).join(", ")),
        ];
        let paragraph = Paragraph::new(text).style(style).alignment(Alignment::Center);
        frame.render_widget(paragraph, *row);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, app: &PlayApp) {
    let state = app.session().state();
    let items = app.unsolved_items();
    let row_count = items.len().div_ceil(COLUMNS);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints((0..row_count).map(|_| Constraint::Length(ROW_HEIGHT)))
        .split(area);

    for (row_index, row) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); COLUMNS])
            .split(*row);

        for (column, cell) in cells.iter().enumerate() {
            let index = row_index * COLUMNS + column;
            let Some(id) = items.get(index) else {
                continue;
            };
            let text = state
                .definition()
                .item(id)
                .map(|item| item.text.clone())
                .unwrap_or_default();

            let selected = state.selected().contains(id);
            let style = if selected {
                Style::default().fg(Color::White).bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let border = if index == app.cursor() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };

            let paragraph = Paragraph::new(text)
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(border));
            frame.render_widget(paragraph, *cell);
        }
    }
}

fn draw_results(frame: &mut Frame, area: Rect, app: &PlayApp) {
    let state = app.session().state();
    let heading = match state.status() {
        PuzzleStatus::Won => "Congratulations!",
        _ => "Game Over",
    };

    let mut lines = vec![
        Line::from(Span::styled(heading, Style::default().add_modifier(Modifier::BOLD))),
        Line::default(),
    ];
    lines.extend(
        reveal(state)
            .iter()
            .filter(|group| !group.solved())
            .map(|group| {
                Line::from(Span::styled(
                    group.to_string(),
                    Style::default().fg(tier_color(*group.difficulty())),
                ))
            }),
    );
    lines.push(Line::default());
    if let Some(summary) = app.summary() {
        lines.extend(summary.lines().map(|line| Line::from(line.to_string())));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Results"));
    frame.render_widget(paragraph, area);
}
