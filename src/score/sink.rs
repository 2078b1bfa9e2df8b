use std::time::{Duration, Instant};

/// Receives score updates from the host
pub trait ScoreSink {
    /// A new game began; the current score goes back to zero
    fn game_started(&mut self);

    /// Called after every tick
    fn publish(&mut self, score: u32, best_score: u32);

    fn game_over(&mut self, final_score: u32);
}

/// What the header shows: scores, games played and play time
///
/// The clock runs from `game_started` and stops at `game_over`, so the
/// game-over screen keeps showing how long the last game lasted.
pub struct Scoreboard {
    score: u32,
    best_score: u32,
    games_played: u32,
    started_at: Instant,
    final_time: Option<Duration>,
}

impl Scoreboard {
    pub fn new(best_score: u32) -> Self {
        Self {
            score: 0,
            best_score,
            games_played: 0,
            started_at: Instant::now(),
            final_time: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn play_time(&self) -> Duration {
        self.final_time.unwrap_or_else(|| self.started_at.elapsed())
    }

    pub fn clock(&self) -> String {
        format_clock(self.play_time())
    }
}

impl ScoreSink for Scoreboard {
    fn game_started(&mut self) {
        self.score = 0;
        self.started_at = Instant::now();
        self.final_time = None;
    }

    fn publish(&mut self, score: u32, best_score: u32) {
        self.score = score;
        self.best_score = self.best_score.max(best_score);
    }

    fn game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.score = final_score;
        self.best_score = self.best_score.max(final_score);
        self.final_time = Some(self.started_at.elapsed());
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(0)
    }
}

/// `MM:SS`, with minutes allowed past 59
fn format_clock(time: Duration) -> String {
    let secs = time.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
