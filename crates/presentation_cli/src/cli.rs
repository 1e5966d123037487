//! Command-line definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use domain::{ScriptBudget, VoiceSelection};

/// Default file the narrated episode is written to
pub const DEFAULT_OUTPUT: &str = "podcast_episode.mp3";

/// blogcast CLI
#[derive(Debug, Parser)]
#[command(name = "blogcast")]
#[command(author, version, long_about = None)]
#[command(about = "Turn blog posts into narrated podcast episodes")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./blogcast.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a podcast episode from a blog post
    ///
    /// Example: blogcast generate --url https://example.com/post --voice Rachel
    Generate(GenerateArgs),

    /// List the available voices
    Voices,

    /// Print the effective configuration as TOML (API keys are never shown)
    Config,
}

/// Where the article text comes from
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Blog post URL to fetch
    #[arg(long)]
    pub url: Option<String>,

    /// Article text given inline
    #[arg(long)]
    pub text: Option<String>,

    /// File holding the article text ("-" reads standard input)
    #[arg(long, value_name = "PATH")]
    pub text_file: Option<PathBuf>,
}

/// API keys for this run
#[derive(Args)]
pub struct KeyArgs {
    /// OpenAI API key (required)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Firecrawl API key enables rich scraping
    #[arg(long, env = "FIRECRAWL_API_KEY", hide_env_values = true)]
    pub firecrawl_api_key: Option<String>,

    /// ElevenLabs API key enables premium voices
    #[arg(long, env = "ELEVENLABS_API_KEY", hide_env_values = true)]
    pub elevenlabs_api_key: Option<String>,
}

impl std::fmt::Debug for KeyArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyArgs")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "[REDACTED]"))
            .field(
                "firecrawl_api_key",
                &self.firecrawl_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "elevenlabs_api_key",
                &self.elevenlabs_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Target script length in characters (500-4000)
    #[arg(long, default_value = "2000", value_parser = parse_budget)]
    pub max_chars: ScriptBudget,

    /// Voice id from either catalog (see `blogcast voices`)
    #[arg(long, default_value = "coral")]
    pub voice: VoiceSelection,

    /// Where to write the MP3 episode
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Write the script to this file instead of printing it
    #[arg(long, value_name = "PATH")]
    pub script_output: Option<PathBuf>,

    #[command(flatten)]
    pub keys: KeyArgs,
}

/// Parse and range-check a script budget
pub fn parse_budget(raw: &str) -> Result<ScriptBudget, String> {
    let value: u32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a whole number"))?;
    ScriptBudget::new(value).map_err(|e| e.to_string())
}
