//! Stateless UI rendering for 2048.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use strictly_2048::{Cell, GameState};

const CELL_WIDTH: u16 = 8;
const CELL_HEIGHT: u16 = 3;
const BOARD_BG: Color = Color::Rgb(187, 173, 160);
const DARK_TEXT: Color = Color::Rgb(119, 110, 101);
const LIGHT_TEXT: Color = Color::Rgb(249, 246, 242);

/// Renders score panels, the grid, and the status line.
pub fn draw(frame: &mut Frame, state: &GameState, status: &str) {
    let size = state.grid().size() as u16;
    let board_height = size * CELL_HEIGHT + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and scores
            Constraint::Min(board_height), // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);
    draw_board(frame, chunks[1], state);

    let status_style = if *state.game_over() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if *state.won() {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let status_text = Paragraph::new(status)
        .style(status_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[2]);

    let help = Paragraph::new("arrows/wasd/hjkl: move   n: new game   q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &GameState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(14),
            Constraint::Length(14),
        ])
        .split(area);

    let title = Paragraph::new("2048")
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::NONE));
    frame.render_widget(title, cols[0]);

    draw_score_box(frame, cols[1], "SCORE", *state.score());
    draw_score_box(frame, cols[2], "BEST", *state.best_score());
}

fn draw_score_box(frame: &mut Frame, area: Rect, label: &str, value: u64) {
    let score = Paragraph::new(value.to_string())
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(label));
    frame.render_widget(score, area);
}

fn draw_board(frame: &mut Frame, area: Rect, state: &GameState) {
    let grid = state.grid();
    let size = grid.size() as u16;
    let board_area = center_rect(area, size * CELL_WIDTH + 2, size * CELL_HEIGHT + 2);

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BOARD_BG));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); grid.size()])
        .split(inner);

    for (r, row) in grid.rows().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CELL_WIDTH); grid.size()])
            .split(rows[r]);
        for (c, cell) in row.iter().enumerate() {
            draw_cell(frame, cols[c], *cell);
        }
    }

    if *state.game_over() {
        draw_banner(frame, board_area, "Game Over!", Color::Red);
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, cell: Cell) {
    let style = tile_style(cell);
    let label = match cell {
        Cell::Empty => String::new(),
        Cell::Tile(v) => v.to_string(),
    };

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(label, style)),
        Line::default(),
    ];
    let paragraph = Paragraph::new(lines)
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_banner(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let banner_area = center_rect(area, 20, 3);
    frame.render_widget(Clear, banner_area);
    let banner = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, banner_area);
}

/// Background and text colors for a tile, warming up as values grow.
pub fn tile_style(cell: Cell) -> Style {
    let (bg, fg) = match cell.value() {
        0 => (Color::Rgb(205, 193, 180), DARK_TEXT),
        2 => (Color::Rgb(238, 228, 218), DARK_TEXT),
        4 => (Color::Rgb(237, 224, 200), DARK_TEXT),
        8 => (Color::Rgb(242, 177, 121), LIGHT_TEXT),
        16 => (Color::Rgb(245, 149, 99), LIGHT_TEXT),
        32 => (Color::Rgb(246, 124, 95), LIGHT_TEXT),
        64 => (Color::Rgb(246, 94, 59), LIGHT_TEXT),
        128 => (Color::Rgb(237, 207, 114), LIGHT_TEXT),
        256 => (Color::Rgb(237, 204, 97), LIGHT_TEXT),
        512 => (Color::Rgb(237, 200, 80), LIGHT_TEXT),
        1024 => (Color::Rgb(237, 197, 63), LIGHT_TEXT),
        2048 => (Color::Rgb(237, 194, 46), LIGHT_TEXT),
        _ => (Color::Rgb(60, 58, 50), LIGHT_TEXT),
    };

    let style = Style::default().bg(bg).fg(fg);
    if cell.value() >= 128 {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(horizontal[1])[1]
}
