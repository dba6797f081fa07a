//! Engine settings shared by every strategy.
//!
//! Options can be set programmatically with the `with_*` builders or by name
//! through `set_option`, which takes the same string pairs a front end would
//! collect from a settings screen.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::{ChessError, ChessResult};
use crate::search::minimax::SearchConfig;

pub const OPTION_DEPTH: &str = "Depth";
pub const OPTION_ALPHA_BETA: &str = "AlphaBeta";
pub const OPTION_TRANSPOSITION_CACHE: &str = "TranspositionCache";
pub const OPTION_SEED: &str = "Seed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Plies searched below each root move by the minimax engine.
    pub depth: u8,
    pub alpha_beta: bool,
    pub use_cache: bool,
    /// Fixed seed for tie-breaks; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let search = SearchConfig::default();
        Self {
            depth: search.depth,
            alpha_beta: search.alpha_beta,
            use_cache: search.use_cache,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.alpha_beta = enabled;
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets one option by name (case-insensitive). `Seed` accepts an integer
    /// or `none`.
    pub fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        let invalid = || ChessError::InvalidEngineOption {
            name: name.to_owned(),
            value: value.to_owned(),
        };
        let value_trimmed = value.trim();

        if name.eq_ignore_ascii_case(OPTION_DEPTH) {
            self.depth = value_trimmed.parse().map_err(|_| invalid())?;
        } else if name.eq_ignore_ascii_case(OPTION_ALPHA_BETA) {
            self.alpha_beta = parse_bool(value_trimmed).ok_or_else(invalid)?;
        } else if name.eq_ignore_ascii_case(OPTION_TRANSPOSITION_CACHE) {
            self.use_cache = parse_bool(value_trimmed).ok_or_else(invalid)?;
        } else if name.eq_ignore_ascii_case(OPTION_SEED) {
            self.seed = if value_trimmed.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(value_trimmed.parse().map_err(|_| invalid())?)
            };
        } else {
            return Err(invalid());
        }
        Ok(())
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            depth: self.depth,
            alpha_beta: self.alpha_beta,
            use_cache: self.use_cache,
        }
    }

    pub fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Some(true),
        "false" | "off" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn defaults_match_search_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.depth, 2);
        assert!(config.alpha_beta);
        assert!(config.use_cache);
        assert_eq!(config.seed, None);
        assert_eq!(config.search_config(), SearchConfig::default());
    }

    #[test]
    fn options_parse_by_name() {
        let mut config = EngineConfig::default();
        config.set_option("Depth", "4").expect("valid depth");
        config.set_option("alphabeta", "off").expect("valid switch");
        config.set_option("TranspositionCache", "false").expect("valid switch");
        config.set_option("Seed", "42").expect("valid seed");
        assert_eq!(
            config,
            EngineConfig::default()
                .with_depth(4)
                .with_alpha_beta(false)
                .with_cache(false)
                .with_seed(42)
        );
        config.set_option("Seed", "none").expect("clearing the seed");
        assert_eq!(config.seed, None);
    }

    #[test]
    fn unknown_or_unparsable_options_are_rejected() {
        let mut config = EngineConfig::default();
        assert_eq!(
            config.set_option("Hash", "64"),
            Err(ChessError::InvalidEngineOption {
                name: "Hash".to_owned(),
                value: "64".to_owned()
            })
        );
        assert!(config.set_option("Depth", "deep").is_err());
        assert!(config.set_option("AlphaBeta", "maybe").is_err());
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn seeded_rngs_repeat() {
        let config = EngineConfig::default().with_seed(7);
        let a: u64 = config.make_rng().random();
        let b: u64 = config.make_rng().random();
        assert_eq!(a, b);
    }
}
