//! Content fetcher - Article text from a URL with rich-to-basic fallback

use std::{fmt, sync::Arc};

use domain::{ArticleText, SourceUrl};
use tracing::{debug, info, instrument, warn};

use super::limits::{StageLimits, within};
use crate::{
    error::ApplicationError,
    outcome::{PipelineStage, StageOutcome, StageWarning},
    ports::ArticleSourcePort,
    services::PipelineConfig,
};

/// Fetches article text through an ordered chain of sources
///
/// The optional rich source is tried first. Its failure or an empty answer
/// becomes a warning and the mandatory basic source runs. A basic-source
/// failure is returned as is; an empty basic answer is returned as empty
/// text. Each attempt runs under its own limit, so a hanging rich source
/// ends as a warning and the basic source still gets its full time.
pub struct ContentFetcher {
    rich: Option<Arc<dyn ArticleSourcePort>>,
    basic: Arc<dyn ArticleSourcePort>,
    limits: StageLimits,
}

impl fmt::Debug for ContentFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentFetcher")
            .field("rich", &self.rich.as_ref().map(|s| s.source_name()))
            .field("basic", &self.basic.source_name())
            .field("limits", &self.limits)
            .finish()
    }
}

impl ContentFetcher {
    /// Create a fetcher from its strategies
    pub fn new(
        rich: Option<Arc<dyn ArticleSourcePort>>,
        basic: Arc<dyn ArticleSourcePort>,
    ) -> Self {
        Self {
            rich,
            basic,
            limits: PipelineConfig::default().fetch_limits(),
        }
    }

    /// Override the attempt limits
    #[must_use]
    pub fn with_limits(mut self, limits: StageLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Fetch the article at `url`
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(
        &self,
        url: &SourceUrl,
    ) -> Result<StageOutcome<ArticleText>, ApplicationError> {
        let mut warnings = Vec::new();

        if let Some(rich) = &self.rich {
            let name = rich.source_name();
            info!(source = %name, "Fetching article with rich scraper");

            match within(self.limits.optional, rich.fetch_article(url.as_str())).await {
                Ok(text) if !text.trim().is_empty() => {
                    let article = ArticleText::new(text, rich.origin());
                    debug!(chars = article.char_count(), "Rich scrape succeeded");
                    return Ok(StageOutcome::with_warnings(article, warnings));
                },
                Ok(_) => {
                    warn!(source = %name, "Rich scraper returned no content, falling back");
                    warnings.push(StageWarning::new(
                        PipelineStage::Fetch,
                        &name,
                        format!(
                            "{name} returned no content, falling back to {}",
                            self.basic.source_name()
                        ),
                    ));
                },
                Err(e) => {
                    warn!(source = %name, error = %e, "Rich scraper failed, falling back");
                    warnings.push(StageWarning::new(
                        PipelineStage::Fetch,
                        &name,
                        format!(
                            "{name} scraping failed, falling back to {}: {e}",
                            self.basic.source_name()
                        ),
                    ));
                },
            }
        }

        info!(source = %self.basic.source_name(), "Fetching article with basic fetcher");
        let text = within(self.limits.mandatory, self.basic.fetch_article(url.as_str())).await?;
        let article = ArticleText::new(text, self.basic.origin());
        debug!(chars = article.char_count(), "Basic fetch finished");

        Ok(StageOutcome::with_warnings(article, warnings))
    }
}
