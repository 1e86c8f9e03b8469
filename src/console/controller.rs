use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use log::{debug, info, warn};

use super::ConsoleView;
use crate::error::DriverError;
use crate::game::GameEngine;

/// How a console session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// A player entered `0`
    Quit,
    /// Anything but "yes" at the replay prompt
    Declined,
    /// Input ran out
    InputClosed,
}

/// Whitespace-separated tokens pulled lazily from a line reader.
struct Tokens<R: BufRead> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Tokens {
            input,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}

/// Plays Connect Four over a text stream.
///
/// Columns are entered 1-based; `0` quits. After a finished game the players
/// are asked whether to play again.
pub struct ConsoleController<R: BufRead, W: Write> {
    input: Tokens<R>,
    view: ConsoleView<W>,
}

impl<R: BufRead, W: Write> ConsoleController<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsoleController {
            input: Tokens::new(input),
            view: ConsoleView::new(output),
        }
    }

    /// Run games on `engine` until a player quits, declines a replay, or the
    /// input ends.
    pub fn play_game(&mut self, engine: &mut GameEngine) -> Result<SessionEnd, DriverError> {
        loop {
            if let Some(player) = engine.turn() {
                self.view.display_game_state(&engine.render())?;
                self.view.display_player_turn(player)?;

                if let Some(end) = self.read_move(engine)? {
                    return Ok(end);
                }
            }

            if engine.is_game_over() {
                self.view.display_game_over(engine.winner())?;
                self.view.ask_play_again()?;
                match self.input.next_token()? {
                    Some(answer) if answer.eq_ignore_ascii_case("yes") => {
                        info!("players chose to play again");
                        engine.reset();
                    }
                    Some(_) => return Ok(SessionEnd::Declined),
                    None => return Ok(SessionEnd::InputClosed),
                }
            }
        }
    }

    /// Prompt until one move is accepted. Returns `Some` when the session ends
    /// instead.
    fn read_move(&mut self, engine: &mut GameEngine) -> Result<Option<SessionEnd>, DriverError> {
        loop {
            self.view.ask_for_move()?;
            let Some(token) = self.input.next_token()? else {
                return Ok(Some(SessionEnd::InputClosed));
            };

            let Ok(choice) = token.parse::<isize>() else {
                debug!("ignoring non-numeric input {token:?}");
                self.view.display_invalid_input()?;
                continue;
            };

            if choice == 0 {
                self.view.display_game_quit(&engine.render())?;
                return Ok(Some(SessionEnd::Quit));
            }

            match engine.apply_move(choice.saturating_sub(1)) {
                Ok(()) => return Ok(None),
                Err(err) => {
                    warn!("rejected move {choice}: {err}");
                    self.view.display_invalid_number(choice, &err)?;
                }
            }
        }
    }

    pub fn into_output(self) -> W {
        self.view.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;
    use std::io::Cursor;

    fn run(input: &str, engine: &mut GameEngine) -> (SessionEnd, String) {
        let mut controller = ConsoleController::new(Cursor::new(input.to_string()), Vec::new());
        let end = controller.play_game(engine).unwrap();
        let output = String::from_utf8(controller.into_output()).unwrap();
        (end, output)
    }

    #[test]
    fn test_valid_moves_red_wins() {
        let mut engine = GameEngine::new(6, 7).unwrap();
        let (end, output) = run("1\n2\n1\n2\n1\n2\n1\nn\n", &mut engine);
        assert_eq!(end, SessionEnd::Declined);
        assert!(engine.is_game_over());
        assert_eq!(engine.winner(), Some(Player::Red));
        assert!(output.contains("Game over! Red is the winner!\n"));
    }

    #[test]
    fn test_valid_moves_yellow_wins() {
        let mut engine = GameEngine::new(6, 7).unwrap();
        let (_, output) = run("1 2 1 2 1 2 3 2 n", &mut engine);
        assert_eq!(engine.winner(), Some(Player::Yellow));
        assert!(output.contains("Game over! Yellow is the winner!\n"));
    }

    #[test]
    fn test_valid_moves_tie() {
        let mut engine = GameEngine::new(4, 4).unwrap();
        let (end, output) = run("1\n2\n3\n4\n1\n2\n3\n4\n4\n3\n2\n1\n1\n2\n3\n4\nn\n", &mut engine);
        assert_eq!(end, SessionEnd::Declined);
        assert!(engine.is_game_over());
        assert_eq!(engine.winner(), None);
        assert!(output.ends_with("Game over! It's a tie!\nDo you want to play again? (yes/no)\n"));
    }

    #[test]
    fn test_allows_replay() {
        let mut engine = GameEngine::new(4, 4).unwrap();
        let (end, output) = run(
            "1\n2\n3\n4\n1\n2\n3\n4\n4\n3\n2\n1\n1\n2\n3\n4\nYES\n0\n",
            &mut engine,
        );
        assert_eq!(end, SessionEnd::Quit);
        assert!(!engine.is_game_over());
        assert_eq!(engine.winner(), None);
        assert_eq!(engine.move_count(), 0);
        assert!(output.ends_with(
            "Game quit! Ending game state:\n_ _ _ _\n_ _ _ _\n_ _ _ _\n_ _ _ _\n\n"
        ));
    }

    #[test]
    fn test_allows_quit_mid_game() {
        let mut engine = GameEngine::new(4, 4).unwrap();
        let (end, _) = run("1\n2\n3\n4\n1\n2\n3\n0\n", &mut engine);
        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(engine.winner(), None);
        assert_eq!(engine.move_count(), 7);
        assert_eq!(engine.turn(), Some(Player::Yellow));
    }

    #[test]
    fn test_allows_quit_when_game_over() {
        let mut engine = GameEngine::new(4, 4).unwrap();
        let (end, _) = run(
            "1\n2\n3\n4\n1\n2\n3\n4\n4\n3\n2\n1\n1\n2\n3\n4\nno\n",
            &mut engine,
        );
        assert_eq!(end, SessionEnd::Declined);
        assert!(engine.is_game_over());
        assert_eq!(engine.winner(), None);
    }

    #[test]
    fn test_rejected_moves_reprompt_same_player() {
        let mut engine = GameEngine::new(4, 4).unwrap();
        let (end, output) = run("1 1 1 1 1 five 9 -3 2", &mut engine);
        assert_eq!(end, SessionEnd::InputClosed);
        // Fifth disc in column 1 plus three bad tokens, then Red plays column 2
        assert_eq!(engine.move_count(), 5);
        assert_eq!(engine.turn(), Some(Player::Yellow));
        assert!(output.contains("Not a valid number: Column full: 1\n"));
        assert!(output.contains("Invalid input. Please enter a valid number.\n"));
        assert!(output.contains("Not a valid number: Invalid column 9 (expected 1..=4)\n"));
        assert!(output.contains("Not a valid number: Invalid column -3 (expected 1..=4)\n"));
        assert!(!output.contains("Column full: 0"));
    }

    #[test]
    fn test_first_prompt_format() {
        let mut engine = GameEngine::new(4, 4).unwrap();
        let (end, output) = run("", &mut engine);
        assert_eq!(end, SessionEnd::InputClosed);
        assert_eq!(
            output,
            "_ _ _ _\n_ _ _ _\n_ _ _ _\n_ _ _ _\n\n\
             Player Red, make your move: \n\
             Enter a column number to make a move: \n"
        );
    }

    #[test]
    fn test_finished_engine_goes_straight_to_replay_prompt() {
        let mut engine = GameEngine::new(6, 7).unwrap();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            engine.apply_move(col).unwrap();
        }
        let (end, output) = run("no", &mut engine);
        assert_eq!(end, SessionEnd::Declined);
        assert_eq!(
            output,
            "Game over! Red is the winner!\nDo you want to play again? (yes/no)\n"
        );
    }
}
