use super::board_widget::{board_lines, player_color};
use super::session::Snapshot;
use crate::game::GameOutcome;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    snapshot: &Snapshot,
    selected_column: usize,
    message: Option<&str>,
    replay_prompt: bool,
) {
    let board_height = snapshot.board.rows() as u16 + 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Min(board_height),    // Board
            Constraint::Length(3),            // Message
            Constraint::Length(3),            // Controls
        ])
        .split(frame.area());

    render_header(frame, snapshot, chunks[0]);
    render_board(frame, snapshot, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);

    if replay_prompt {
        if let Some(outcome) = snapshot.outcome {
            render_replay_prompt(frame, outcome);
        }
    }
}

/// Headline for a finished game
pub fn outcome_text(outcome: GameOutcome) -> String {
    match outcome {
        GameOutcome::Winner(player) => format!("{} wins!", player.name()),
        GameOutcome::Draw => "It's a draw!".to_string(),
    }
}

fn render_header(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let (status, color) = match (snapshot.turn, snapshot.outcome) {
        (Some(player), _) => (format!("Current turn: {}", player.name()), player_color(player)),
        (None, Some(GameOutcome::Winner(player))) => {
            (format!("Game Over  |  {} wins", player.name()), player_color(player))
        }
        (None, _) => ("Game Over  |  Draw".to_string(), Color::White),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, snapshot: &Snapshot, selected_column: usize, area: Rect) {
    let selected = snapshot.turn.map(|_| selected_column);
    let board_widget =
        Paragraph::new(board_lines(&snapshot.board, selected)).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(Line::from(
        "\u{2190}/\u{2192}: Move  |  Enter: Drop  |  1-9: Column  |  R: Restart  |  Q: Quit",
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Controls"),
    );

    frame.render_widget(controls, area);
}

fn render_replay_prompt(frame: &mut Frame, outcome: GameOutcome) {
    let area = centered(frame.area(), 32, 5);
    let lines = vec![
        Line::from(Span::styled(
            outcome_text(outcome),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Play again? (y/n)"),
    ];
    let prompt = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Game Over"));

    frame.render_widget(Clear, area);
    frame.render_widget(prompt, area);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameEngine, Player};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(snapshot: &Snapshot, replay_prompt: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|f| render(f, snapshot, 3, Some("hello"), replay_prompt))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_outcome_text() {
        assert_eq!(outcome_text(GameOutcome::Winner(Player::Yellow)), "Yellow wins!");
        assert_eq!(outcome_text(GameOutcome::Draw), "It's a draw!");
    }

    #[test]
    fn test_renders_turn_and_message() {
        let engine = GameEngine::new(6, 7).unwrap();
        let text = screen(&Snapshot::of(&engine), false);
        assert!(text.contains("Current turn: Red"));
        assert!(text.contains("hello"));
        assert!(!text.contains("Play again?"));
    }

    #[test]
    fn test_renders_replay_prompt_after_win() {
        let mut engine = GameEngine::new(6, 7).unwrap();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            engine.apply_move(col).unwrap();
        }
        let text = screen(&Snapshot::of(&engine), true);
        assert!(text.contains("Red wins!"));
        assert!(text.contains("Play again? (y/n)"));
    }

    #[test]
    fn test_centered_fits_small_area() {
        let area = Rect::new(0, 0, 10, 3);
        assert_eq!(centered(area, 32, 5), Rect::new(0, 0, 10, 3));
    }
}
