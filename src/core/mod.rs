pub mod aggregator;
pub mod classifier;
pub mod codec;
pub mod extractor;
pub mod log;
pub mod pipeline;
