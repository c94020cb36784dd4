use std::thread;
use std::time::Duration;

use crate::apple::Apple;
use crate::snake::{Coordinates, Snake};
use crate::terminal::Terminal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameDifficulty {
    Easy,
    Medium,
    Hard,
}

impl GameDifficulty {
    pub fn get_target_score(&self) -> i32 {
        match self {
            GameDifficulty::Easy => 30,
            GameDifficulty::Medium => 60,
            GameDifficulty::Hard => 120,
        }
    }

    pub fn get_speed(&self) -> u64 {
        match self {
            GameDifficulty::Easy => 250, // 4 fps
            GameDifficulty::Medium => 100, // 10 fps
            GameDifficulty::Hard => 50, // 20 fps
        }
    }
}

// top level controller, owns the snake and at most one apple of each kind
pub struct Game {
    snake: Snake,
    normal_apple: Option<Apple>,
    golden_apple: Option<Apple>,
    difficulty: GameDifficulty,
}

impl Game {
    pub fn new(board_size: Coordinates, difficulty: GameDifficulty) -> Game {
        Game {
            snake: Snake::new(board_size, difficulty.get_target_score()),
            normal_apple: None,
            golden_apple: None,
            difficulty,
        }
    }

    // one tick runs input, spawn, consume, alive check, render, delay, move,
    // in that order
    pub fn play(&mut self, terminal: &mut Terminal) {
        terminal.draw_title_screen();
        terminal.wait_for_enter();
        loop {
            if let Some(direction) = terminal.poll_direction() {
                self.snake.set_direction(direction);
            }
            self.generate_apples();
            self.update_apples();
            self.snake.update_is_alive();
            self.draw(terminal);
            thread::sleep(Duration::from_millis(self.difficulty.get_speed()));
            self.snake.move_one_unit();
            // aliveness was evaluated against the pre-move shape, so the end
            // of the game shows up one frame after the position that caused
            // it and the final frame sits one cell past that position
            if self.is_finished() {
                self.draw(terminal);
                terminal.draw_result(&self.snake);
                terminal.wait_for_enter();
                return;
            }
        }
    }

    fn is_finished(&self) -> bool {
        !self.snake.is_alive() || self.snake.has_won()
    }

    fn draw(&self, terminal: &mut Terminal) {
        terminal.draw_frame(
            &self.snake,
            self.normal_apple.as_ref(),
            self.golden_apple.as_ref(),
        );
    }

    // exactly one normal apple at a time, a golden one only while the score
    // sits at a positive multiple of six
    fn generate_apples(&mut self) {
        if self.normal_apple.is_none() {
            self.normal_apple = Some(Apple::new(&self.snake, false));
        }
        if self.snake.score() != 0 && self.snake.score() % 6 == 0 && self.golden_apple.is_none() {
            self.golden_apple = Some(Apple::new(&self.snake, true));
        }
    }

    // only the normal apple makes the snake grow
    fn update_apples(&mut self) {
        if let Some(apple) = self.normal_apple {
            if apple.consumed(&self.snake) {
                self.snake.extend_by_one();
                apple.add_consumed_score(&mut self.snake);
                self.normal_apple = None;
            }
        }
        if let Some(apple) = self.golden_apple {
            if apple.consumed(&self.snake) {
                apple.add_consumed_score(&mut self.snake);
                self.golden_apple = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::SnakeDirection;

    fn test_game() -> Game {
        Game::new(Coordinates::new(15, 15), GameDifficulty::Easy)
    }

    #[test]
    fn a_normal_apple_spawns_whenever_absent() {
        let mut game = test_game();
        game.generate_apples();
        assert!(game.normal_apple.is_some());
        assert!(game.golden_apple.is_none());
    }

    #[test]
    fn a_golden_apple_spawns_at_positive_multiples_of_six() {
        let mut game = test_game();
        game.snake.add_score(5);
        game.generate_apples();
        assert!(game.golden_apple.is_none());
        game.snake.add_score(1);
        game.generate_apples();
        assert!(game.golden_apple.is_some());
        assert!(game.golden_apple.unwrap().is_golden());
    }

    #[test]
    fn eating_a_normal_apple_scores_and_grows() {
        let mut game = test_game();
        game.normal_apple = Some(Apple::at(game.snake.head(), false));
        game.update_apples();
        assert_eq!(game.snake.score(), 1);
        assert_eq!(game.snake.body().len() + 2, 5);
        assert!(game.normal_apple.is_none());
    }

    #[test]
    fn eating_a_golden_apple_scores_without_growing() {
        let mut game = test_game();
        game.golden_apple = Some(Apple::at(game.snake.head(), true));
        game.update_apples();
        assert_eq!(game.snake.score(), 3);
        assert_eq!(game.snake.body().len() + 2, 4);
        assert!(game.golden_apple.is_none());
    }

    #[test]
    fn an_apple_on_the_tail_survives_the_tick() {
        let mut game = test_game();
        game.normal_apple = Some(Apple::at(game.snake.tail(), false));
        game.update_apples();
        assert_eq!(game.snake.score(), 0);
        assert!(game.normal_apple.is_some());
    }

    #[test]
    fn thirty_consumptions_win_an_easy_game() {
        let mut game = test_game();
        for _tick in 0..30 {
            if let Some(direction) = steer(&game.snake) {
                game.snake.set_direction(direction);
            }
            game.generate_apples();
            // pin this tick's apple onto the head and keep golden apples out
            // so exactly thirty normal consumptions drive the score
            game.normal_apple = Some(Apple::at(game.snake.head(), false));
            game.golden_apple = None;
            game.update_apples();
            game.snake.update_is_alive();
            assert!(game.snake.is_alive());
            game.snake.move_one_unit();
        }
        assert_eq!(game.snake.score(), 30);
        assert!(game.snake.has_won());
        assert!(game.snake.is_alive());
        assert_eq!(game.snake.body().len() + 2, 34);
        assert!(game.is_finished());
    }

    // hug the border clockwise, the head advances two cells on a tick that
    // consumes an apple so turns come one cell early
    fn steer(snake: &Snake) -> Option<SnakeDirection> {
        let head = snake.head();
        match snake.direction() {
            SnakeDirection::Right if head.x >= 12 => Some(SnakeDirection::Down),
            SnakeDirection::Down if head.y >= 12 => Some(SnakeDirection::Left),
            SnakeDirection::Left if head.x <= 1 => Some(SnakeDirection::Up),
            SnakeDirection::Up if head.y <= 1 => Some(SnakeDirection::Right),
            _ => None,
        }
    }
}
