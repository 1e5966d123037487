//! Application services - Use case implementations

mod content_fetcher;
mod limits;
mod pipeline;
mod script_generator;
mod speech_synthesizer;

pub use content_fetcher::ContentFetcher;
pub use limits::StageLimits;
pub use pipeline::{PipelineConfig, PodcastPipeline};
pub use script_generator::ScriptGenerator;
pub use speech_synthesizer::SpeechSynthesizer;
