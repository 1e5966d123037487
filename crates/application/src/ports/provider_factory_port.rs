//! Provider factory port - Builds the per-request strategy chains
//!
//! A strategy is offered only when its credential is present and its
//! provider is part of the build. Strategies hold the request's keys and are
//! dropped with the request.

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::ports::{ArticleSourcePort, InferencePort, SpeechPort};
use crate::request::Credentials;

/// Port for constructing providers from request credentials
#[cfg_attr(test, automock)]
pub trait ProviderFactoryPort: Send + Sync {
    /// Optional rich scraper, offered when a rich-scrape key is present
    fn rich_article_source(&self, credentials: &Credentials) -> Option<Arc<dyn ArticleSourcePort>>;

    /// Mandatory basic HTML fetcher
    fn basic_article_source(&self) -> Arc<dyn ArticleSourcePort>;

    /// Script writer bound to the primary key
    fn script_writer(
        &self,
        credentials: &Credentials,
    ) -> Result<Arc<dyn InferencePort>, ApplicationError>;

    /// Optional premium voice provider, offered when a premium key is present
    fn premium_speech(&self, credentials: &Credentials) -> Option<Arc<dyn SpeechPort>>;

    /// Mandatory default voice provider bound to the primary key
    fn default_speech(
        &self,
        credentials: &Credentials,
    ) -> Result<Arc<dyn SpeechPort>, ApplicationError>;
}
