use crate::counter::EdgeCounter;

#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum Player {
    One,
    Two,
}

/// Two-player rapid-clicker: whoever reaches the threshold first wins
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct ClickerGame {
    players: [EdgeCounter; 2],
    winner: Option<Player>,
}

impl ClickerGame {
    pub const fn new(threshold: u8, limit: u8) -> Self {
        ClickerGame {
            players: [
                EdgeCounter::new(threshold, limit),
                EdgeCounter::new(threshold, limit),
            ],
            winner: None,
        }
    }

    /// Samples both players' buttons. Presses stop counting once there is a winner.
    pub fn update(&mut self, one: bool, two: bool) -> Option<Player> {
        let [first, second] = &mut self.players;
        if self.winner.is_some() {
            // score is frozen until the reset
            first.track(one);
            second.track(two);
            return self.winner;
        }

        let tick_one = first.update(one);
        let tick_two = second.update(two);
        // polling order breaks a tie
        self.winner = if tick_one.reached {
            Some(Player::One)
        } else if tick_two.reached {
            Some(Player::Two)
        } else {
            None
        };
        self.winner
    }

    pub fn reset(&mut self) {
        for player in self.players.iter_mut() {
            player.reset();
        }
        self.winner = None;
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn score(&self, player: Player) -> u8 {
        self.player(player).count()
    }

    pub fn is_pressed(&self, player: Player) -> bool {
        self.player(player).is_pressed()
    }

    fn player(&self, player: Player) -> &EdgeCounter {
        match player {
            Player::One => &self.players[0],
            Player::Two => &self.players[1],
        }
    }
}
