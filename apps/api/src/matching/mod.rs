// Matching core: scoring strategies, ranking, filtering and the salary heuristic.
// Pure functions over in-memory data; no I/O happens under this module.

pub mod matcher;
pub mod reference;
pub mod salary;
pub mod scorer;
pub mod stop_words;
pub mod tfidf;

pub use matcher::{filter, JobMatcher, DEFAULT_RESULT_LIMIT};
pub use reference::ReferenceData;
pub use salary::SalaryEstimator;
pub use scorer::{scorer_for, ScoringPolicy};
