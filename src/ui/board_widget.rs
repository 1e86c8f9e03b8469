use crate::game::{Board, Cell, Player};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Display colour for a player's discs
pub fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

fn cell_span(cell: Cell) -> Span<'static> {
    match cell {
        Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
        Cell::Occupied(player) => {
            Span::styled(" \u{25cf} ", Style::default().fg(player_color(player)))
        }
    }
}

/// Board as styled lines: column numbers, framed rows with the top row first,
/// and a marker under the selected column.
pub fn board_lines(board: &Board, selected_column: Option<usize>) -> Vec<Line<'static>> {
    let columns = board.columns();
    let mut lines = Vec::with_capacity(board.rows() + 4);

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..columns {
        let label = format!(" {} ", col + 1);
        if Some(col) == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    let rule = "\u{2550}".repeat(columns * 3 + 1);
    lines.push(Line::from(format!("  \u{2554}{rule}\u{2557}")));

    for row in (0..board.rows()).rev() {
        let mut row_spans = vec![Span::raw("  \u{2551}")];
        row_spans.extend((0..columns).map(|col| cell_span(board.get(row, col))));
        row_spans.push(Span::raw(" \u{2551}"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  \u{255a}{rule}\u{255d}")));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..columns {
        if Some(col) == selected_column {
            indicator_line.push(Span::styled(" \u{25b2} ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_line_count_follows_rows() {
        let board = Board::new(5, 4).unwrap();
        assert_eq!(board_lines(&board, None).len(), 5 + 4);
    }

    #[test]
    fn test_bottom_row_drawn_last() {
        let mut board = Board::new(4, 4).unwrap();
        board.drop_piece(0, Player::Red).unwrap();
        let lines = board_lines(&board, Some(0));

        // header, top border, rows 3..=0, bottom border, indicator
        assert_eq!(text(&lines[2]), "  \u{2551} .  .  .  .  \u{2551}");
        assert_eq!(text(&lines[5]), "  \u{2551} \u{25cf}  .  .  .  \u{2551}");
        assert_eq!(lines[5].spans[1].style.fg, Some(Color::Red));
        assert!(text(&lines[7]).contains('\u{25b2}'));
    }

    #[test]
    fn test_border_matches_width() {
        let board = Board::new(6, 7).unwrap();
        let lines = board_lines(&board, None);
        assert_eq!(text(&lines[1]).chars().count(), text(&lines[2]).chars().count());
    }
}
