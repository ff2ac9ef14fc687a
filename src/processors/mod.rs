pub mod aggregator;
pub mod derived;
pub mod locations;
pub mod preprocess;
pub mod timestamps;

pub use aggregator::TripAggregator;
pub use derived::{DerivedMetricCalculator, DerivedReport};
pub use locations::extract_location;
pub use preprocess::Preprocessor;
pub use timestamps::{ParseStrategy, TimestampNormalizer};
