// the snake occupies the head cell, the interior body cells and the tail cell,
// with the body stored tail first
// moving translates the whole snake by one cell per frame, eating an apple
// pushes the head forward without popping the tail
use std::collections::VecDeque;

const INIT_SNAKE_SIZE: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Coordinates {
        Coordinates { x, y }
    }

    pub fn move_left(&mut self) {
        self.x -= 1;
    }
    pub fn move_right(&mut self) {
        self.x += 1;
    }
    pub fn move_up(&mut self) {
        self.y -= 1;
    }
    pub fn move_down(&mut self) {
        self.y += 1;
    }
    pub fn get_left(&self) -> Coordinates {
        let mut res = Coordinates::new(self.x, self.y);
        res.move_left();
        res
    }
    pub fn get_right(&self) -> Coordinates {
        let mut res = Coordinates::new(self.x, self.y);
        res.move_right();
        res
    }
    pub fn get_up(&self) -> Coordinates {
        let mut res = Coordinates::new(self.x, self.y);
        res.move_up();
        res
    }
    pub fn get_down(&self) -> Coordinates {
        let mut res = Coordinates::new(self.x, self.y);
        res.move_down();
        res
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SnakeDirection {
    pub fn opposite(&self) -> SnakeDirection {
        match self {
            SnakeDirection::Up => SnakeDirection::Down,
            SnakeDirection::Down => SnakeDirection::Up,
            SnakeDirection::Left => SnakeDirection::Right,
            SnakeDirection::Right => SnakeDirection::Left,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Snake {
    board_size: Coordinates,
    head: Coordinates,
    tail: Coordinates,
    body: VecDeque<Coordinates>, // tail-most segment at the front
    direction: SnakeDirection,
    tail_direction: SnakeDirection,
    alive: bool,
    score: i32,
    target_score: i32,
}

impl Snake {
    pub fn new(board_size: Coordinates, target_score: i32) -> Self {
        if board_size.x < 10 || board_size.y < 10 {
            panic!("Board size must be at least 10x10");
        }
        let tail = Coordinates::new(4, 4);
        let mut body: VecDeque<Coordinates> = VecDeque::new();
        let mut current_position = tail;
        for _i in 0..INIT_SNAKE_SIZE - 2 {
            current_position.move_right();
            body.push_back(current_position);
        }
        Snake {
            board_size,
            head: current_position.get_right(),
            tail,
            body,
            direction: SnakeDirection::Right,
            tail_direction: SnakeDirection::Right,
            alive: true,
            score: 0,
            target_score,
        }
    }

    pub fn head(&self) -> Coordinates {
        self.head
    }

    pub fn tail(&self) -> Coordinates {
        self.tail
    }

    pub fn body(&self) -> &VecDeque<Coordinates> {
        &self.body
    }

    pub fn direction(&self) -> SnakeDirection {
        self.direction
    }

    pub fn tail_direction(&self) -> SnakeDirection {
        self.tail_direction
    }

    pub fn board_size(&self) -> Coordinates {
        self.board_size
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn add_score(&mut self, value: i32) {
        self.score += value;
    }

    // an exact reversal is silently ignored
    pub fn set_direction(&mut self, direction: SnakeDirection) {
        if direction != self.direction.opposite() {
            self.direction = direction;
        }
    }

    pub fn move_one_unit(&mut self) {
        self.update_tail_direction();
        self.tail = self.body.pop_front().unwrap();
        self.body.push_back(self.head);
        self.head = self.advanced_head();
    }

    // growth variant, the vacated tail segment is kept
    pub fn extend_by_one(&mut self) {
        self.body.push_back(self.head);
        self.head = self.advanced_head();
    }

    // the outermost ring of cells is a lethal wall, so the playable interior
    // runs from 0 to size - 2 on both axes
    pub fn update_is_alive(&mut self) {
        let inside_walls = self.head.x != self.board_size.x - 1
            && self.head.x != -1
            && self.head.y != self.board_size.y - 1
            && self.head.y != -1;
        let clear_of_itself = !self.body.contains(&self.head) && self.head != self.tail;
        self.alive = inside_walls && clear_of_itself;
    }

    pub fn has_won(&self) -> bool {
        self.score >= self.target_score
    }

    fn advanced_head(&self) -> Coordinates {
        match self.direction {
            SnakeDirection::Up => self.head.get_up(),
            SnakeDirection::Down => self.head.get_down(),
            SnakeDirection::Left => self.head.get_left(),
            SnakeDirection::Right => self.head.get_right(),
        }
    }

    // purely cosmetic, only the tail sprite orientation depends on this
    // the body always holds at least two segments
    fn update_tail_direction(&mut self) {
        let first = self.body[0];
        let second = self.body[1];
        if first.x == second.x {
            self.tail_direction = if first.y == second.y + 1 {
                SnakeDirection::Up
            } else {
                SnakeDirection::Down
            };
        } else if first.y == second.y {
            self.tail_direction = if first.x == second.x + 1 {
                SnakeDirection::Left
            } else {
                SnakeDirection::Right
            };
        }
    }
}
