pub mod sink;
pub mod store;

pub use sink::{ScoreSink, Scoreboard};
pub use store::{BEST_SCORE_KEY, BestScoreStore, FileBestScoreStore, MemoryBestScoreStore};
