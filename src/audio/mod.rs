pub mod analyzer;
pub mod devices;
pub mod state;

pub use analyzer::FrequencyAnalyzer;
pub use state::AudioState;
