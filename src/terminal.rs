// raw mode terminal shell around the game
// a detached thread pumps stdin bytes into a channel so the tick loop never
// blocks on input, and a small circular buffer feeds the escape sequence
// parser on the main thread
use std::io;
use std::io::Read;
use std::sync::mpsc;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::TryRecvError;
use std::thread;
use std::time::Duration;

use circular_buffer::CircularBuffer;
use colored::{Color, ColoredString, Colorize};
use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW};

use crate::apple::Apple;
use crate::game::GameDifficulty;
use crate::snake::{Coordinates, Snake, SnakeDirection};

type InputBuffer = CircularBuffer<1024, u8>; // 1024 bytes in input buffer

fn clear_screen() {
    print!("{}[2J", 27 as char);
    print!("{}[1;1H", 27 as char);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Direction(SnakeDirection),
    Difficulty(GameDifficulty),
    Confirm,
    Quit,
}

pub struct Terminal {
    old_termios: Termios,
    new_termios: Termios,
    input_buffer: InputBuffer,
    stdin_channel: Receiver<u8>,
}

impl Terminal {
    pub fn new() -> Terminal {
        let termios = Termios::from_fd(0).unwrap(); // 0 is file descriptor for stdin
        let mut new_termios = termios;
        new_termios.c_lflag &= !(ICANON | ECHO); // no echo and canonical mode for stdin
        Terminal {
            old_termios: termios,
            new_termios,
            input_buffer: InputBuffer::new(),
            stdin_channel: spawn_stdin_channel(),
        }
    }

    pub fn setup_streams(&mut self) {
        // setup stdin to not require enter press and not showing the input
        tcsetattr(0, TCSANOW, &self.new_termios).unwrap();
    }

    pub fn reset_streams(&mut self) {
        // reset stdin to default
        tcsetattr(0, TCSANOW, &self.old_termios).unwrap();
    }

    // quitting is valid from any screen and always exits with status 0
    pub fn quit(&mut self) -> ! {
        self.reset_streams();
        std::process::exit(0);
    }

    // first buffered direction wins, later ones stay queued for later ticks
    pub fn poll_direction(&mut self) -> Option<SnakeDirection> {
        self.pump_input();
        while let Some(event) = parse_event(&mut self.input_buffer) {
            match event {
                InputEvent::Direction(direction) => return Some(direction),
                InputEvent::Quit => self.quit(),
                _ => {}
            }
        }
        None
    }

    pub fn wait_for_enter(&mut self) {
        loop {
            self.pump_input();
            while let Some(event) = parse_event(&mut self.input_buffer) {
                match event {
                    InputEvent::Confirm => return,
                    InputEvent::Quit => self.quit(),
                    _ => {}
                }
            }
            thread::sleep(Duration::from_millis(3));
        }
    }

    pub fn select_difficulty(&mut self) -> GameDifficulty {
        self.draw_difficulty_menu();
        loop {
            self.pump_input();
            while let Some(event) = parse_event(&mut self.input_buffer) {
                match event {
                    InputEvent::Difficulty(difficulty) => return difficulty,
                    InputEvent::Quit => self.quit(),
                    _ => {}
                }
            }
            thread::sleep(Duration::from_millis(3));
        }
    }

    fn pump_input(&mut self) {
        loop {
            match self.stdin_channel.try_recv() {
                Ok(key) => buffer_key(&mut self.input_buffer, key),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => panic!("Channel disconnected"),
            }
        }
    }

    fn draw_difficulty_menu(&self) {
        clear_screen();
        println!("{}", "SNAKE".green().bold());
        println!();
        println!("choose a difficulty:");
        println!(
            "  [1] easy    first to {:>3} points, {:>3} ms per move",
            GameDifficulty::Easy.get_target_score(),
            GameDifficulty::Easy.get_speed()
        );
        println!(
            "  [2] medium  first to {:>3} points, {:>3} ms per move",
            GameDifficulty::Medium.get_target_score(),
            GameDifficulty::Medium.get_speed()
        );
        println!(
            "  [3] hard    first to {:>3} points, {:>3} ms per move",
            GameDifficulty::Hard.get_target_score(),
            GameDifficulty::Hard.get_speed()
        );
        println!();
        println!("press q to quit");
    }

    pub fn draw_title_screen(&self) {
        clear_screen();
        println!("{}", "SNAKE".green().bold());
        println!();
        println!("{}", "press enter to start".bold());
    }

    pub fn draw_result(&self, snake: &Snake) {
        if snake.has_won() {
            println!("{}", "You won!".bright_yellow().bold());
        } else {
            println!("{}", "Game Over!".red().bold());
        }
        println!("Final Score: {}", snake.score());
        println!("{}", "press enter to exit".bold());
    }

    pub fn draw_frame(
        &mut self,
        snake: &Snake,
        normal_apple: Option<&Apple>,
        golden_apple: Option<&Apple>,
    ) {
        clear_screen();
        println!("Score: {:02}", snake.score());
        let board_size = snake.board_size();
        // the drawn range includes the wall ring at -1 and size - 1, and the
        // head can sit on the ring in the frame after a fatal move
        for y in -1..board_size.y {
            for x in -1..board_size.x {
                draw_cell(Coordinates::new(x, y), snake, normal_apple, golden_apple);
            }
            println!();
        }
    }
}

fn spawn_stdin_channel() -> Receiver<u8> {
    let (tx, rx) = mpsc::channel::<u8>();
    thread::spawn(move || loop {
        // one byte at a time, arrow keys arrive as three of them
        let mut reader = io::stdin();
        let mut buffer: [u8; 1] = [0; 1];
        if reader.read_exact(&mut buffer).is_err() {
            return; // stdin closed
        }
        tx.send(buffer[0]).unwrap();
    });
    rx
}

// only bytes that can form an event enter the buffer
fn buffer_key(buffer: &mut InputBuffer, key: u8) {
    match key {
        27 | 91 | 65..=68 | b'\r' | b'\n' | b'q' | b'1'..=b'3' => {
            // if the buffer is full, ignore the input
            if buffer.is_full() {
                return;
            }
            buffer.push_back(key);
        }
        _ => {}
    }
}

// arrow keys are 3 bytes long, 27 and 91 followed by the key code
fn parse_event(buffer: &mut InputBuffer) -> Option<InputEvent> {
    while !buffer.is_empty() {
        let key = *buffer.nth_front(0).unwrap();
        match key {
            b'q' => {
                buffer.pop_front();
                return Some(InputEvent::Quit);
            }
            b'\r' | b'\n' => {
                buffer.pop_front();
                return Some(InputEvent::Confirm);
            }
            b'1' => {
                buffer.pop_front();
                return Some(InputEvent::Difficulty(GameDifficulty::Easy));
            }
            b'2' => {
                buffer.pop_front();
                return Some(InputEvent::Difficulty(GameDifficulty::Medium));
            }
            b'3' => {
                buffer.pop_front();
                return Some(InputEvent::Difficulty(GameDifficulty::Hard));
            }
            27 => {
                if buffer.len() < 3 {
                    // wait for the rest of the escape sequence
                    return None;
                }
                if *buffer.nth_front(1).unwrap() != 91 {
                    buffer.pop_front();
                    continue;
                }
                let direction = match *buffer.nth_front(2).unwrap() {
                    65 => Some(SnakeDirection::Up),
                    66 => Some(SnakeDirection::Down),
                    67 => Some(SnakeDirection::Right),
                    68 => Some(SnakeDirection::Left),
                    _ => None,
                };
                buffer.pop_front();
                buffer.pop_front();
                buffer.pop_front();
                if let Some(direction) = direction {
                    return Some(InputEvent::Direction(direction));
                }
            }
            _ => {
                buffer.pop_front();
            }
        }
    }
    None
}

fn draw_cell(
    position: Coordinates,
    snake: &Snake,
    normal_apple: Option<&Apple>,
    golden_apple: Option<&Apple>,
) {
    if position == snake.head() {
        print!("{}", paint_for_status(head_glyph(snake.direction()), snake, Color::Yellow));
    } else if snake.body().contains(&position) {
        print!("{}", paint_for_status("⏺ ", snake, Color::Green));
    } else if position == snake.tail() {
        print!("{}", paint_for_status(tail_glyph(snake.tail_direction()), snake, Color::Green));
    } else if let Some(apple) = apple_at(position, normal_apple, golden_apple) {
        print!("{}", apple_glyph(apple));
    } else if is_wall(position, snake.board_size()) {
        print!("▓▓");
    } else {
        print!("  ");
    }
}

// the golden apple draws over the normal one on the off chance they overlap
fn apple_at<'a>(
    position: Coordinates,
    normal_apple: Option<&'a Apple>,
    golden_apple: Option<&'a Apple>,
) -> Option<&'a Apple> {
    golden_apple
        .filter(|apple| apple.position() == position)
        .or_else(|| normal_apple.filter(|apple| apple.position() == position))
}

fn apple_glyph(apple: &Apple) -> ColoredString {
    if apple.is_golden() {
        "♦ ".bright_yellow()
    } else {
        "♦ ".red()
    }
}

fn is_wall(position: Coordinates, board_size: Coordinates) -> bool {
    position.x == -1
        || position.y == -1
        || position.x == board_size.x - 1
        || position.y == board_size.y - 1
}

fn head_glyph(direction: SnakeDirection) -> &'static str {
    match direction {
        SnakeDirection::Up => "▲ ",
        SnakeDirection::Down => "▼ ",
        SnakeDirection::Left => "◀ ",
        SnakeDirection::Right => "▶ ",
    }
}

fn tail_glyph(direction: SnakeDirection) -> &'static str {
    match direction {
        SnakeDirection::Up => "╵ ",
        SnakeDirection::Down => "╷ ",
        SnakeDirection::Left => "╴ ",
        SnakeDirection::Right => "╶ ",
    }
}

fn paint_for_status(glyph: &str, snake: &Snake, alive_color: Color) -> ColoredString {
    if snake.has_won() {
        glyph.bright_yellow()
    } else if !snake.is_alive() {
        glyph.red()
    } else {
        glyph.color(alive_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(keys: &[u8]) -> InputBuffer {
        let mut buffer = InputBuffer::new();
        for &key in keys {
            buffer_key(&mut buffer, key);
        }
        buffer
    }

    #[test]
    fn arrow_sequences_become_directions() {
        let mut buffer = buffer_with(&[27, 91, 65, 27, 91, 66, 27, 91, 67, 27, 91, 68]);
        assert_eq!(
            parse_event(&mut buffer),
            Some(InputEvent::Direction(SnakeDirection::Up))
        );
        assert_eq!(
            parse_event(&mut buffer),
            Some(InputEvent::Direction(SnakeDirection::Down))
        );
        assert_eq!(
            parse_event(&mut buffer),
            Some(InputEvent::Direction(SnakeDirection::Right))
        );
        assert_eq!(
            parse_event(&mut buffer),
            Some(InputEvent::Direction(SnakeDirection::Left))
        );
        assert_eq!(parse_event(&mut buffer), None);
    }

    #[test]
    fn partial_escape_sequences_wait_for_more_bytes() {
        let mut buffer = buffer_with(&[27, 91]);
        assert_eq!(parse_event(&mut buffer), None);
        buffer_key(&mut buffer, 65);
        assert_eq!(
            parse_event(&mut buffer),
            Some(InputEvent::Direction(SnakeDirection::Up))
        );
    }

    #[test]
    fn single_byte_events_parse_in_order() {
        let mut buffer = buffer_with(&[b'\n', b'q', b'1', b'2', b'3']);
        assert_eq!(parse_event(&mut buffer), Some(InputEvent::Confirm));
        assert_eq!(parse_event(&mut buffer), Some(InputEvent::Quit));
        assert_eq!(
            parse_event(&mut buffer),
            Some(InputEvent::Difficulty(GameDifficulty::Easy))
        );
        assert_eq!(
            parse_event(&mut buffer),
            Some(InputEvent::Difficulty(GameDifficulty::Medium))
        );
        assert_eq!(
            parse_event(&mut buffer),
            Some(InputEvent::Difficulty(GameDifficulty::Hard))
        );
    }

    #[test]
    fn unrelated_bytes_never_enter_the_buffer() {
        let mut buffer = buffer_with(&[b'x', b'z', 7, b'q']);
        assert_eq!(buffer.len(), 1);
        assert_eq!(parse_event(&mut buffer), Some(InputEvent::Quit));
    }

    #[test]
    fn a_stray_escape_resyncs_on_the_next_sequence() {
        let mut buffer = buffer_with(&[27, 27, 91, 66]);
        assert_eq!(
            parse_event(&mut buffer),
            Some(InputEvent::Direction(SnakeDirection::Down))
        );
        assert_eq!(parse_event(&mut buffer), None);
    }
}
