//! Graph algorithms

pub mod matching;

pub use self::matching::{BlossomMatcher, MatcherConfig};
