use game::Game;
use snake::Coordinates;
use terminal::Terminal;

mod apple;
mod game;
mod snake;
mod terminal;

fn main() {
    let mut terminal = Terminal::new();
    terminal.setup_streams();
    let difficulty = terminal.select_difficulty();
    let mut game = Game::new(Coordinates::new(15, 15), difficulty);
    game.play(&mut terminal);
    terminal.reset_streams();
}
