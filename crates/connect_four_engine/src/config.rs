use log::warn;

pub const DEFAULT_AI_DEPTH: u8 = 4;       // Plies searched when choosing the computer's move
pub const DEFAULT_ANALYSIS_DEPTH: u8 = 3; // Plies of replies searched after an analyzed move
pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 8;              // 7^8 leaves before pruning is already slow

const AI_DEPTH_VAR: &str = "CONNECT_FOUR_AI_DEPTH";
const ANALYSIS_DEPTH_VAR: &str = "CONNECT_FOUR_ANALYSIS_DEPTH";
const PARALLEL_VAR: &str = "CONNECT_FOUR_PARALLEL";

/// Search tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    ai_depth: u8,
    analysis_depth: u8,
    parallel_root: bool,
}

impl SearchConfig {
    pub fn new(ai_depth: u8, analysis_depth: u8) -> Self {
        Self {
            ai_depth: ai_depth.clamp(MIN_DEPTH, MAX_DEPTH),
            analysis_depth: analysis_depth.clamp(MIN_DEPTH, MAX_DEPTH),
            parallel_root: false,
        }
    }

    pub fn ai_depth(&self) -> u8 {
        self.ai_depth
    }

    pub fn analysis_depth(&self) -> u8 {
        self.analysis_depth
    }

    /// Search each root column on its own rayon task.
    pub fn parallel_root(&self) -> bool {
        self.parallel_root
    }

    pub fn with_parallel_root(mut self, parallel_root: bool) -> Self {
        self.parallel_root = parallel_root;
        self
    }

    /// Reads overrides from `CONNECT_FOUR_AI_DEPTH`, `CONNECT_FOUR_ANALYSIS_DEPTH`
    /// and `CONNECT_FOUR_PARALLEL`, keeping the default for anything unset or
    /// unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let ai_depth = parse_var(&lookup, AI_DEPTH_VAR, defaults.ai_depth);
        let analysis_depth = parse_var(&lookup, ANALYSIS_DEPTH_VAR, defaults.analysis_depth);
        let parallel_root = parse_var(&lookup, PARALLEL_VAR, defaults.parallel_root);
        Self::new(ai_depth, analysis_depth).with_parallel_root(parallel_root)
    }
}

fn parse_var<T: std::str::FromStr + Copy>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {}={:?}: not a valid value", key, raw);
            default
        }),
        None => default,
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ai_depth: DEFAULT_AI_DEPTH,
            analysis_depth: DEFAULT_ANALYSIS_DEPTH,
            parallel_root: false,
        }
    }
}
