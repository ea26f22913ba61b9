use crate::game::{Board, Cell, GameSession, Phase, Player};
use crate::stats::{StatsStore, WinStats};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::animation::DropAnimation;

pub fn render<S: StatsStore>(
    frame: &mut Frame,
    session: &GameSession<S>,
    selected_column: usize,
    animation: Option<&DropAnimation>,
    message: &Option<String>,
) {
    let board = session.board();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                       // Status
            Constraint::Length(3),                       // Stats
            Constraint::Min(board.height() as u16 + 4), // Board
            Constraint::Length(3),                       // Message
            Constraint::Length(3),                       // Controls
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    render_stats(frame, session.stats(), chunks[1]);
    render_board(
        frame,
        board,
        session.preview_cell(),
        selected_column,
        animation,
        chunks[2],
    );
    render_message(frame, message, chunks[3]);
    render_controls(frame, chunks[4]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

fn cell_span(cell: Cell) -> Span<'static> {
    match cell {
        Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
        Cell::Red => Span::styled(" ● ", Style::default().fg(Color::Red)),
        Cell::Yellow => Span::styled(" ● ", Style::default().fg(Color::Yellow)),
    }
}

fn render_header<S: StatsStore>(frame: &mut Frame, session: &GameSession<S>, area: Rect) {
    let state = session.state();
    let mut status = state.status_message().to_string();
    match state.phase() {
        Phase::Concluded(_) => status.push_str("  |  R: Reset"),
        Phase::AwaitingMove => status.push_str(&format!("  |  Move {}", session.move_count() + 1)),
    }

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(state.current_player()))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_stats(frame: &mut Frame, stats: WinStats, area: Rect) {
    let line = Line::from(vec![
        Span::styled("Red", Style::default().fg(Color::Red)),
        Span::raw(format!(": {}   ", stats.wins(Player::Red))),
        Span::styled("Yellow", Style::default().fg(Color::Yellow)),
        Span::raw(format!(": {}   ", stats.wins(Player::Yellow))),
        Span::raw(format!("Draws: {}", stats.draws)),
    ]);
    let title = format!("Stats ({} games)", stats.games());

    let widget = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(widget, area);
}

fn render_board(
    frame: &mut Frame,
    board: &Board,
    preview: Cell,
    selected_column: usize,
    animation: Option<&DropAnimation>,
    area: Rect,
) {
    let width = board.width();
    let rule = "═".repeat(width * 3 + 1);
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..width {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    // Ghost of the piece about to drop
    let mut preview_line = vec![Span::raw("   ")];
    for col in 0..width {
        if col == selected_column && !board.is_column_full(col) {
            let ghost = Style::default().add_modifier(Modifier::DIM);
            preview_line.push(cell_span(preview).patch_style(ghost));
        } else {
            preview_line.push(Span::raw("   "));
        }
    }
    preview_line.push(Span::raw("  "));
    lines.push(Line::from(preview_line));

    lines.push(Line::from(format!("  ╔{rule}╗")));

    for row in 0..board.height() {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..width {
            let cell = match animation {
                Some(anim) => anim.cell_at(board, col, row),
                None => board.get(col, row),
            };
            row_spans.push(cell_span(cell));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from(
        "←/→: Move  |  1-9: Drop in column  |  Enter: Drop  |  R: Reset  |  Q: Quit",
    );

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
