use async_trait::async_trait;
use clap::Parser;
use persona_chat::api::services::{parse_inbound, InboundEvent};
use persona_chat::api::{ChatId, MessageSink, OutboundMessage, SendError};
use persona_chat::utils::SetupUtils;
use persona_chat::{BotHandler, MistralClient, PersistenceStore, PromptAssembler};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "persona-console", about = "Chat with personas from the terminal")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = "persona_chat.toml")]
    config: PathBuf,

    #[arg(long, default_value_t = 1)]
    user_id: i64,

    #[arg(long, default_value_t = 1)]
    chat_id: i64,
}

struct StdoutSink;

#[async_trait]
impl MessageSink for StdoutSink {
    async fn send_text(&self, _chat_id: ChatId, message: &OutboundMessage) -> Result<(), SendError> {
        println!("{}", message.text);
        for row in &message.buttons {
            let labels: Vec<String> = row
                .iter()
                .map(|button| format!("[{}] !{}", button.label, button.token))
                .collect();
            println!("  {}", labels.join("  "));
        }
        println!();
        Ok(())
    }

    async fn send_typing(&self, _chat_id: ChatId) -> Result<(), SendError> {
        println!("...");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    SetupUtils::init_logging();
    let args = Args::parse();

    let config = SetupUtils::run_setup(&args.config)?;
    let llm = MistralClient::new(config.llm.clone())?;
    let store = PersistenceStore::json_files(&config.storage.data_dir);

    let handler = BotHandler::new(
        store,
        Arc::new(llm),
        PromptAssembler::with_random_drift(),
        Arc::new(StdoutSink),
    );
    tracing::info!(user_id = args.user_id, chat_id = args.chat_id, "console started");

    handler.on_command("start", args.user_id, args.chat_id).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_inbound(&line) {
            InboundEvent::Command(name) => handler.on_command(&name, args.user_id, args.chat_id).await,
            InboundEvent::ButtonPress(token) => {
                handler.on_button_press(args.user_id, args.chat_id, &token).await
            }
            InboundEvent::Text(text) => handler.on_text(args.user_id, args.chat_id, &text).await,
            InboundEvent::Empty => {}
        }
    }

    Ok(())
}
