use anyhow::bail;
use clap::Parser;
use colored::Colorize;
use domain::catalog::{is_known_model, KNOWN_MODELS};
use infrastructure::config::Config;
use infrastructure::gemini::GeminiClient;
use shared::types::Result;

use crate::chat;

/// Terminal chat client for Google's Gemini API.
#[derive(Parser)]
#[command(name = "gemchat")]
#[command(about = "Chat with the Gemini API from the terminal", long_about = None)]
pub struct Cli {
    /// Model to use (skips the interactive picker)
    #[arg(long)]
    pub model: Option<String>,

    /// List known model identifiers and exit
    #[arg(long)]
    pub list_models: bool,

    /// One-shot prompt; when empty, starts an interactive session
    #[arg(trailing_var_arg = true)]
    pub prompt: Vec<String>,
}

pub struct CliApp;

impl CliApp {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&mut self, cli: Cli) -> Result<()> {
        if cli.list_models {
            for name in KNOWN_MODELS {
                println!("{name}");
            }
            return Ok(());
        }

        let config = Config::load();
        let Some(api_key) = config.api_key.clone() else {
            eprintln!("{}", "GEMINI_API_KEY is not set.".red().bold());
            eprintln!("Set it in your environment or in a .env file in the working directory:");
            eprintln!("    GEMINI_API_KEY=your-api-key");
            bail!("missing API credential");
        };

        if let Some(model) = &cli.model {
            if !is_known_model(model) {
                bail!("unknown model '{model}' (see --list-models)");
            }
        }

        let client = GeminiClient::new(api_key, config.api_base.clone());
        let model = cli.model.clone().unwrap_or_else(|| config.model.clone());

        let prompt_text = cli.prompt.join(" ");
        if !prompt_text.trim().is_empty() {
            return chat::run_one_shot(&client, &model, prompt_text.trim()).await;
        }

        // Interactive sessions open with the picker unless --model was given.
        chat::run_chat(&client, model, cli.model.is_none()).await
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
