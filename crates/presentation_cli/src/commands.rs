//! Command implementations

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use application::{Credentials, PipelineRequest, PipelineResult, PodcastPipeline};
use domain::{DEFAULT_VOICES, FALLBACK_VOICE, PREMIUM_VOICES};
use infrastructure::{AppConfig, ELEVENLABS_ENABLED, ProviderFactory};
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use crate::cli::{GenerateArgs, SourceArgs};

/// Read the article text from a file, or from stdin when the path is `-`
async fn read_text_file(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read article text from stdin")?;
        return Ok(text);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read article text from {}", path.display()))
}

/// Turn the CLI arguments into a pipeline request
pub async fn build_request(args: GenerateArgs) -> anyhow::Result<PipelineRequest> {
    let credentials = Credentials::from_keys(
        args.keys.openai_api_key,
        args.keys.firecrawl_api_key,
        args.keys.elevenlabs_api_key,
    );

    let request = match args.source {
        SourceArgs {
            url: Some(url), ..
        } => PipelineRequest::from_url(url, credentials),
        SourceArgs {
            text: Some(text), ..
        } => PipelineRequest::from_text(text, credentials),
        SourceArgs {
            text_file: Some(path),
            ..
        } => PipelineRequest::from_text(read_text_file(&path).await?, credentials),
        _ => bail!("Provide article text or a blog URL"),
    };

    Ok(request.with_budget(args.max_chars).with_voice(args.voice))
}

/// Run the pipeline and write its outputs
pub async fn generate(config: AppConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let output = args.output.clone();
    let script_output = args.script_output.clone();
    let request = build_request(args).await?;

    let pipeline_config = config.pipeline.clone();
    let factory = ProviderFactory::new(config).context("Failed to set up providers")?;
    let pipeline = PodcastPipeline::with_config(Arc::new(factory), pipeline_config);

    let result = tokio::select! {
        result = pipeline.run(request) => result.context("Podcast generation failed")?,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, cancelling the run");
            bail!("Interrupted");
        },
    };

    write_outputs(&result, &output, script_output.as_deref()).await
}

async fn write_outputs(
    result: &PipelineResult,
    output: &Path,
    script_output: Option<&Path>,
) -> anyhow::Result<()> {
    for warning in &result.warnings {
        eprintln!("⚠️  {warning}");
    }

    match script_output {
        Some(path) => {
            tokio::fs::write(path, result.script.as_str())
                .await
                .with_context(|| format!("Failed to write script to {}", path.display()))?;
            println!("📝 Script written to {}", path.display());
        },
        None => {
            println!("📝 Script:\n");
            println!("{}\n", result.script.as_str());
        },
    }

    tokio::fs::write(output, &result.synthesis.audio)
        .await
        .with_context(|| format!("Failed to write audio to {}", output.display()))?;

    info!(
        run_id = %result.run_id,
        bytes = result.synthesis.size_bytes(),
        path = %output.display(),
        "Episode written"
    );

    println!(
        "🎙️  Podcast generated using {} ({})",
        result.synthesis.provider, result.synthesis.voice
    );
    println!("   📁 {}", output.display());
    Ok(())
}

/// Render the voice catalogs
pub fn voices_listing() -> String {
    let list = |voices: &[&str]| -> String {
        voices.iter().map(|voice| format!("  {voice}\n")).collect()
    };
    let premium_note = if ELEVENLABS_ENABLED {
        ""
    } else {
        ", not compiled into this build"
    };

    format!(
        "Default voices (OpenAI TTS):\n{}\nPremium voices (ElevenLabs{premium_note}):\n{}\n\
         Premium voices need an ElevenLabs key; without one '{FALLBACK_VOICE}' is used.\n",
        list(&DEFAULT_VOICES),
        list(&PREMIUM_VOICES),
    )
}

/// Print the voice catalogs
pub fn voices() {
    print!("{}", voices_listing());
}

/// Print the effective configuration
pub fn show_config(config: &AppConfig) -> anyhow::Result<()> {
    let rendered = config
        .to_toml()
        .context("Failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::io::Write;

    fn generate_args(args: &[&str]) -> GenerateArgs {
        let mut argv = vec!["blogcast", "generate"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Generate(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[tokio::test]
    async fn build_request_from_url() {
        let args = generate_args(&["--url", "https://example.com/post", "--openai-api-key", "sk"]);
        let request = build_request(args).await.unwrap();

        assert_eq!(request.url(), Some("https://example.com/post"));
        assert!(request.credentials.primary().is_some());
        assert!(request.credentials.premium_voice().is_none());
    }

    #[tokio::test]
    async fn build_request_reads_text_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "  Article from a file.  ").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = generate_args(&["--text-file", &path, "--voice", "Bella"]);
        let request = build_request(args).await.unwrap();

        assert_eq!(request.manual_text(), Some("Article from a file."));
        assert_eq!(request.voice.id(), "Bella");
    }

    #[tokio::test]
    async fn build_request_missing_file_fails() {
        let args = generate_args(&["--text-file", "/nonexistent/article.txt"]);
        assert!(build_request(args).await.is_err());
    }

    #[tokio::test]
    async fn write_outputs_creates_files() {
        use application::{PipelineStage, StageWarning};
        use chrono::Utc;
        use domain::{
            ArticleOrigin, PodcastScript, RunId, ScriptBudget, SynthesisEngine, SynthesisResult,
        };

        let dir = tempfile::tempdir().unwrap();
        let audio_path = dir.path().join("episode.mp3");
        let script_path = dir.path().join("script.txt");
        let result = PipelineResult {
            run_id: RunId::new(),
            script: PodcastScript::from_model_output("Hello listeners.", ScriptBudget::default()),
            synthesis: SynthesisResult::new(
                b"ID3".to_vec(),
                SynthesisEngine::Default,
                "coral",
                "OpenAI TTS",
            ),
            article_origin: ArticleOrigin::Manual,
            warnings: vec![StageWarning::new(PipelineStage::Synthesis, "Rachel", "substituted")],
            generated_at: Utc::now(),
        };

        write_outputs(&result, &audio_path, Some(&script_path)).await.unwrap();

        assert_eq!(std::fs::read(&audio_path).unwrap(), b"ID3");
        assert_eq!(std::fs::read_to_string(&script_path).unwrap(), "Hello listeners.");
    }

    #[test]
    fn voices_listing_includes_both_catalogs() {
        let listing = voices_listing();
        assert!(listing.contains("coral"));
        assert!(listing.contains("Rachel"));
        assert!(listing.contains("James"));
    }
}
