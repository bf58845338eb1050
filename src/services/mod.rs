pub mod aggregator;
pub mod providers;
pub mod votes;

pub use aggregator::JokeAggregator;
