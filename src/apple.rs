use crate::snake::{Coordinates, Snake};

// a single collectible cell, worth one point, or three for the golden kind
#[derive(Debug, Clone, Copy)]
pub struct Apple {
    position: Coordinates,
    score_value: i32,
}

impl Apple {
    pub fn new(consumer: &Snake, golden: bool) -> Apple {
        Apple {
            position: Apple::generate_position(consumer),
            score_value: if golden { 3 } else { 1 },
        }
    }

    #[cfg(test)]
    pub(crate) fn at(position: Coordinates, golden: bool) -> Apple {
        Apple {
            position,
            score_value: if golden { 3 } else { 1 },
        }
    }

    // resamples until the cell is free of the snake
    // the interior always keeps free cells at the scores this game runs to,
    // so the loop terminates
    fn generate_position(consumer: &Snake) -> Coordinates {
        let board_size = consumer.board_size();
        loop {
            let random_x = num::abs(rand::random::<i32>()) % (board_size.x - 1);
            let random_y = num::abs(rand::random::<i32>()) % (board_size.y - 1);
            let position = Coordinates::new(random_x, random_y);
            let interrupted = position == consumer.head()
                || position == consumer.tail()
                || consumer.body().contains(&position);
            if !interrupted {
                return position;
            }
        }
    }

    // the tail cell does not count, it is about to be vacated
    pub fn consumed(&self, consumer: &Snake) -> bool {
        self.position == consumer.head() || consumer.body().contains(&self.position)
    }

    pub fn add_consumed_score(&self, consumer: &mut Snake) {
        consumer.add_score(self.score_value);
    }

    pub fn position(&self) -> Coordinates {
        self.position
    }

    pub fn is_golden(&self) -> bool {
        self.score_value != 1
    }
}
