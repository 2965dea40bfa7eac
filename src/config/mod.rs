pub mod ml;
pub mod scoring;

pub use ml::MlConfig;
pub use scoring::ScoringConfig;
