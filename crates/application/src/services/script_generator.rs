//! Script generator - Article text to a bounded podcast script

use std::{fmt, sync::Arc, time::Instant};

use domain::{ArticleText, PodcastScript, ScriptBudget};
use tracing::{debug, info, instrument};

use crate::{error::ApplicationError, ports::InferencePort};

const SYSTEM_PROMPT: &str = "You write concise, engaging podcast scripts.";

/// Build the user prompt asking for a monologue of about `max_chars`
fn build_prompt(article: &str, max_chars: u32) -> String {
    format!(
        "You are an expert podcast script writer.\n\n\
         Task:\n\
         - Write a conversational, engaging podcast monologue based on the blog content below.\n\
         - Maximum length: about {max_chars} characters.\n\
         - Use a friendly tone, like a host talking to listeners.\n\
         - Do NOT read out section titles or links verbatim; instead, paraphrase them.\n\n\
         Here is the blog content:\n\
         -------------------------\n\
         {article}\n\
         -------------------------\n"
    )
}

/// Turns article text into a podcast script with one model call
///
/// The model is asked for roughly the budget; the returned script is cut at
/// the budget's hard cap whatever the model produced.
pub struct ScriptGenerator {
    writer: Arc<dyn InferencePort>,
}

impl fmt::Debug for ScriptGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptGenerator")
            .field("model", &self.writer.current_model())
            .finish()
    }
}

impl ScriptGenerator {
    /// Create a generator over a language model
    pub fn new(writer: Arc<dyn InferencePort>) -> Self {
        Self { writer }
    }

    /// Generate a script for `article` within `budget`
    ///
    /// # Errors
    ///
    /// Returns the provider error, or `InvalidResponse` if the model
    /// produced only whitespace.
    #[instrument(
        skip(self, article),
        fields(article_chars = article.char_count(), budget = %budget)
    )]
    pub async fn generate(
        &self,
        article: &ArticleText,
        budget: ScriptBudget,
    ) -> Result<PodcastScript, ApplicationError> {
        let start = Instant::now();
        info!(model = %self.writer.current_model(), "Generating podcast script");

        let prompt = build_prompt(article.as_str(), budget.max_chars());
        let result = self.writer.generate_with_system(SYSTEM_PROMPT, &prompt).await?;

        let script = PodcastScript::from_model_output(&result.content, budget);
        if script.is_empty() {
            return Err(ApplicationError::InvalidResponse(
                "model returned an empty script".to_string(),
            ));
        }

        debug!(
            model = %result.model,
            tokens = ?result.tokens_used,
            chars = script.char_count(),
            truncated = script.was_truncated(),
            latency_ms = start.elapsed().as_millis(),
            "Script generated"
        );

        Ok(script)
    }
}
