use application::chat_service;
use colored::Colorize;
use dialoguer::{Input, Select};
use domain::catalog::KNOWN_MODELS;
use domain::conversation::{Conversation, Role, Turn};
use infrastructure::gemini::GeminiClient;
use infrastructure::http_client::HttpClient;
use shared::telemetry::Telemetry;
use shared::types::Result;

pub fn select_model(current: &str) -> Result<String> {
    let default = KNOWN_MODELS
        .iter()
        .position(|model| *model == current)
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Select a Gemini model")
        .items(KNOWN_MODELS)
        .default(default)
        .interact()?;
    Ok(KNOWN_MODELS[choice].to_string())
}

fn render_turn(turn: &Turn) -> String {
    match turn.role {
        Role::User => format!("{} {}", "You:".green().bold(), turn.content),
        Role::Assistant => format!("{} {}", "Gemini:".cyan().bold(), turn.content),
    }
}

/// Pure rendering: displaying the same conversation twice yields the same
/// text.
fn render_history(conversation: &Conversation) -> String {
    conversation
        .turns()
        .iter()
        .map(render_turn)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Interactive loop. Blank input is skipped, `exit`/`quit` ends the session,
/// `/model` switches models between turns, `/history` reprints the
/// conversation.
pub async fn run_chat<T: HttpClient>(
    client: &GeminiClient<T>,
    mut model: String,
    pick_model: bool,
) -> Result<()> {
    if pick_model {
        model = select_model(&model)?;
    }
    println!("Model: {}", model.yellow());
    println!("Type a message. 'exit' or 'quit' ends the session, '/model' switches models, '/history' reprints the conversation.");

    let mut conversation = Conversation::new();

    loop {
        let user_input: String = Input::new()
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()?;
        let trimmed = user_input.trim();

        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        if trimmed == "/model" {
            model = select_model(&model)?;
            println!("Model: {}", model.yellow());
            continue;
        }
        if trimmed == "/history" {
            println!("{}", render_history(&conversation));
            continue;
        }

        eprintln!("{}", format!("{model} is thinking...").dimmed());
        let timer = Telemetry::new();
        let reply = chat_service::handle_turn(client, &mut conversation, &model, trimmed).await;
        println!("{} {}", "Gemini:".cyan().bold(), reply);
        eprintln!("{}", format!("({:.1}s)", timer.elapsed_secs()).dimmed());
    }

    Ok(())
}

/// Send a single prompt and print the reply to stdout.
pub async fn run_one_shot<T: HttpClient>(
    client: &GeminiClient<T>,
    model: &str,
    prompt_text: &str,
) -> Result<()> {
    let mut conversation = Conversation::new();

    eprintln!("{}", format!("{model} is thinking...").dimmed());
    let reply = chat_service::handle_turn(client, &mut conversation, model, prompt_text).await;
    println!("{reply}");

    Ok(())
}
