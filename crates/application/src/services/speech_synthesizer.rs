//! Speech synthesizer - Script to audio with premium-to-default fallback

use std::{fmt, sync::Arc};

use domain::{PodcastScript, SynthesisResult, VoiceSelection};
use tracing::{debug, info, instrument, warn};

use super::limits::{StageLimits, within};
use crate::{
    error::ApplicationError,
    outcome::{PipelineStage, StageOutcome, StageWarning},
    ports::SpeechPort,
    services::PipelineConfig,
};

/// Synthesizes a script through an ordered chain of voice providers
///
/// The premium provider is tried only for premium-catalog voices and only
/// when it was offered for this request. Its failure becomes a warning. The
/// default provider always runs last and its failure is returned. A premium
/// attempt that outlives its limit is abandoned like any other failure.
pub struct SpeechSynthesizer {
    premium: Option<Arc<dyn SpeechPort>>,
    default: Arc<dyn SpeechPort>,
    limits: StageLimits,
}

impl fmt::Debug for SpeechSynthesizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechSynthesizer")
            .field("premium", &self.premium.as_ref().map(|p| p.provider_name()))
            .field("default", &self.default.provider_name())
            .field("limits", &self.limits)
            .finish()
    }
}

impl SpeechSynthesizer {
    /// Create a synthesizer from its strategies
    pub fn new(premium: Option<Arc<dyn SpeechPort>>, default: Arc<dyn SpeechPort>) -> Self {
        Self {
            premium,
            default,
            limits: PipelineConfig::default().synthesis_limits(),
        }
    }

    /// Override the attempt limits
    #[must_use]
    pub fn with_limits(mut self, limits: StageLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Narrate `script` with `voice`
    #[instrument(skip(self, script), fields(script_chars = script.char_count(), voice = %voice))]
    pub async fn synthesize(
        &self,
        script: &PodcastScript,
        voice: &VoiceSelection,
    ) -> Result<StageOutcome<SynthesisResult>, ApplicationError> {
        let mut warnings = Vec::new();
        let default_name = self.default.provider_name();

        if voice.is_premium() {
            match &self.premium {
                Some(premium) => {
                    let name = premium.provider_name();
                    info!(provider = %name, "Synthesizing with premium voice");

                    let attempt = premium.synthesize(script.as_str(), voice.id());
                    match within(self.limits.optional, attempt).await {
                        Ok(audio) if !audio.is_empty() => {
                            debug!(audio_bytes = audio.len(), "Premium synthesis succeeded");
                            let result =
                                SynthesisResult::new(audio, premium.engine(), voice.id(), &name);
                            return Ok(StageOutcome::with_warnings(result, warnings));
                        },
                        Ok(_) => {
                            warn!(provider = %name, "Premium provider returned no audio");
                            warnings.push(StageWarning::new(
                                PipelineStage::Synthesis,
                                &name,
                                format!(
                                    "{name} returned no audio, falling back to {default_name}"
                                ),
                            ));
                        },
                        Err(e) => {
                            warn!(provider = %name, error = %e, "Premium synthesis failed");
                            warnings.push(StageWarning::new(
                                PipelineStage::Synthesis,
                                &name,
                                format!(
                                    "{name} audio generation failed, falling back to \
                                     {default_name}: {e}"
                                ),
                            ));
                        },
                    }
                },
                None => {
                    warn!(voice = %voice, "No premium voice provider for this request");
                    warnings.push(StageWarning::new(
                        PipelineStage::Synthesis,
                        voice.id(),
                        format!(
                            "Voice '{}' needs a premium voice key, using '{}' with {default_name}",
                            voice.id(),
                            voice.default_engine_voice()
                        ),
                    ));
                },
            }
        }

        let voice_used = voice.default_engine_voice();
        info!(provider = %default_name, voice = voice_used, "Synthesizing with default voice");

        let attempt = self.default.synthesize(script.as_str(), voice_used);
        let audio = within(self.limits.mandatory, attempt).await?;
        if audio.is_empty() {
            return Err(ApplicationError::InvalidResponse(format!(
                "{default_name} returned no audio"
            )));
        }
        debug!(audio_bytes = audio.len(), "Default synthesis succeeded");

        let result = SynthesisResult::new(audio, self.default.engine(), voice_used, default_name);
        Ok(StageOutcome::with_warnings(result, warnings))
    }
}
