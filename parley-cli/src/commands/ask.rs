use anyhow::Result;
use colored::Colorize;
use parley_core::{Assistant, AssistantReply, OpenAiAssistant, ParleyConfig};

/// One assistant round outside of any transcript.
pub async fn cmd_ask(config: &ParleyConfig, prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        anyhow::bail!("Prompt is empty");
    }

    let assistant = OpenAiAssistant::from_config(&config.assistant)?;
    let reply = assistant.reply(prompt).await;

    match &reply {
        AssistantReply::Answer(text) => println!("{}", text),
        AssistantReply::NotConfigured => println!("{}", reply.text().yellow()),
        AssistantReply::Failed | AssistantReply::Empty => println!("{}", reply.text().red()),
    }

    Ok(())
}
