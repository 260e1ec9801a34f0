pub mod ai;
pub mod analysis;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod search;
pub mod session;

pub use ai::ConnectFourAI;
pub use analysis::{analyze_move, Analysis, AnalysisStep};
pub use config::SearchConfig;
pub use error::EngineError;
pub use evaluation::{evaluate_window, score_position};
pub use search::{search_best_move, PvStep, SearchResult, WIN_SCORE};
pub use session::GameSession;
