//! Domain entities - Transient objects created and consumed within one run

mod article;
mod script;
mod synthesis;

pub use article::{ArticleOrigin, ArticleText};
pub use script::PodcastScript;
pub use synthesis::SynthesisResult;
