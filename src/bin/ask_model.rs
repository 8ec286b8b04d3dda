//! Command-line check of the Bedrock model used by the pipeline.
//!
//! A thin shim over [`pdf2summary::pipeline::summarize::Summarizer`]: `ask`
//! sends a raw prompt through the same InvokeModel path the summariser uses,
//! `speak` sends one chat message through the Converse API. Results go to the
//! log stream on stderr. With no subcommand it runs `speak` with its defaults.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdf2summary::aws::{load_sdk_config, BedrockGenerator};
use pdf2summary::config::DEFAULT_MODEL_ID;
use pdf2summary::logging::{self, LogFormat};
use pdf2summary::pipeline::summarize::Summarizer;
use pdf2summary::PipelineConfig;
use std::sync::Arc;
use tracing::error;

const DEFAULT_SPEAK_PROMPT: &str = "What is your name?";
const DEFAULT_ROLE: &str = "user";

#[derive(Parser, Debug)]
#[command(
    name = "ask-model",
    version,
    about = "Send a prompt to the pipeline's Bedrock model and log the response",
    color = clap::ColorChoice::Auto
)]
struct Cli {
    /// AWS region (defaults to the SDK provider chain).
    #[arg(long, env = "AWS_REGION", global = true)]
    region: Option<String>,

    /// Show debug logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Defaults to `speak` with its default prompt.
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    fn command(&self) -> Command {
        self.command.clone().unwrap_or_else(|| Command::Speak {
            prompt: DEFAULT_SPEAK_PROMPT.to_string(),
            role: DEFAULT_ROLE.to_string(),
            model: DEFAULT_MODEL_ID.to_string(),
        })
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// InvokeModel with the pipeline's generation settings.
    Ask {
        /// Prompt for the model.
        #[arg(long, default_value = "")]
        prompt: String,

        /// Bedrock model id.
        #[arg(long, env = "MODEL_ID", default_value = DEFAULT_MODEL_ID)]
        model: String,
    },
    /// Converse with a single message.
    Speak {
        /// Prompt for the model.
        #[arg(long, default_value = DEFAULT_SPEAK_PROMPT)]
        prompt: String,

        /// Message role: user or assistant.
        #[arg(long = "type", default_value = DEFAULT_ROLE)]
        role: String,

        /// Bedrock model id.
        #[arg(long, default_value = DEFAULT_MODEL_ID)]
        model: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.verbose { "debug" } else { "info" }, LogFormat::Plain);

    let mut builder = PipelineConfig::builder();
    if let Some(region) = &cli.region {
        builder = builder.region(region);
    }
    let config = builder.build().context("Invalid configuration")?;
    let sdk = load_sdk_config(&config).await;
    let summarizer = Summarizer::new(&config, Arc::new(BedrockGenerator::new(&sdk)));

    match cli.command() {
        Command::Ask { prompt, model } => {
            if let Err(e) = summarizer.with_model(model).generate(&prompt).await {
                error!("Error summarizing text: {}", e);
            }
        }
        Command::Speak { prompt, role, model } => {
            if let Err(e) = summarizer.with_model(model).converse(&role, &prompt).await {
                error!("Error: {}", e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_runs_speak_with_defaults() {
        let cli = Cli::try_parse_from(["ask-model"]).unwrap();
        assert_eq!(
            cli.command(),
            Command::Speak {
                prompt: "What is your name?".into(),
                role: "user".into(),
                model: DEFAULT_MODEL_ID.into(),
            }
        );
    }

    #[test]
    fn explicit_subcommand_wins() {
        let cli = Cli::try_parse_from(["ask-model", "ask", "--prompt", "hi", "--model", "m"]).unwrap();
        assert_eq!(
            cli.command(),
            Command::Ask {
                prompt: "hi".into(),
                model: "m".into(),
            }
        );
    }

    #[test]
    fn speak_flags_match_bare_defaults() {
        let cli = Cli::try_parse_from(["ask-model", "speak"]).unwrap();
        assert_eq!(cli.command(), Cli::try_parse_from(["ask-model"]).unwrap().command());
    }
}
