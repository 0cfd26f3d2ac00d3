use anyhow::{bail, Result};
use clap::ValueEnum;
use colored::Colorize;
use parley_core::format::message_time;
use parley_core::{
    filter_messages, ChatBackend, HttpBackend, Message, MessageKind, NewMessage, ParleyConfig,
    UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryFormat {
    Text,
    Json,
}

pub async fn cmd_history(
    config: &ParleyConfig,
    peer: UserId,
    search: Option<&str>,
    format: HistoryFormat,
) -> Result<()> {
    let backend = HttpBackend::from_config(config)?;
    let (profile, history) = tokio::join!(backend.fetch_profile(peer), backend.fetch_history(peer));
    let messages = history?;

    // History is still worth showing without the header profile.
    let peer_name = match profile {
        Ok(profile) => profile.name,
        Err(e) => {
            e.log();
            format!("#{}", peer)
        }
    };

    let visible = filter_messages(&messages, search.unwrap_or(""));

    if format == HistoryFormat::Json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Conversation with".cyan().bold(),
        peer_name.yellow()
    );
    println!("{}", "═".repeat(60).dimmed());

    if visible.is_empty() {
        println!();
        match search {
            Some(term) if !term.trim().is_empty() => {
                println!("No messages matching '{}'", term.yellow())
            }
            _ => println!("{}", "No messages yet.".dimmed()),
        }
        return Ok(());
    }

    let me = config.current_user_id();
    for message in &visible {
        println!("{}", history_line(message, me, &peer_name));
    }
    println!();
    println!("  Shown: {} of {} messages", visible.len(), messages.len());

    Ok(())
}

pub async fn cmd_send(config: &ParleyConfig, peer: UserId, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        bail!("Message is empty, nothing was sent");
    }

    let backend = HttpBackend::from_config(config)?;
    let message = NewMessage {
        from_user: config.current_user_id(),
        to_user: peer,
        message: text.to_string(),
    };
    backend.post_message(&message).await?;

    println!("{} Sent to #{}", "✓".green().bold(), peer);
    Ok(())
}

fn message_body(message: &Message) -> String {
    match message.kind() {
        MessageKind::Text | MessageKind::Unknown => message.message.clone(),
        MessageKind::Audio => "♪ Voice message".to_string(),
        MessageKind::File => {
            let name = message.file_name.as_deref().unwrap_or(&message.message);
            match message.file_size.as_deref() {
                Some(size) => format!("📎 {} ({})", name, size),
                None => format!("📎 {}", name),
            }
        }
    }
}

fn history_line(message: &Message, me: UserId, peer_name: &str) -> String {
    let author = if message.is_from(me) { "You" } else { peer_name };
    let time = message_time(message);
    if time.is_empty() {
        format!("{}: {}", author, message_body(message))
    } else {
        format!("[{}] {}: {}", time, author, message_body(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ParleyConfig {
        let mut config = ParleyConfig::default();
        config.backend.base_url = server.uri();
        config
    }

    #[test]
    fn test_history_line_authors() {
        let mine = Message::text(1, 1, 2, "on my way");
        let theirs = Message::text(2, 2, 1, "great");

        assert_eq!(history_line(&mine, 1, "Dana"), "You: on my way");
        assert_eq!(history_line(&theirs, 1, "Dana"), "Dana: great");
    }

    #[test]
    fn test_file_and_audio_bodies() {
        let mut file = Message::text(1, 2, 1, "report.pdf");
        file.kind = Some(MessageKind::File);
        file.file_size = Some("2.4 MB".to_string());
        assert_eq!(message_body(&file), "📎 report.pdf (2.4 MB)");

        let mut audio = Message::text(2, 2, 1, "");
        audio.kind = Some(MessageKind::Audio);
        assert_eq!(message_body(&audio), "♪ Voice message");
    }

    #[tokio::test]
    async fn test_send_posts_message_as_typed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/add"))
            .and(body_json(serde_json::json!({
                "fromUser": 1,
                "toUser": 7,
                "message": "  hello there "
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        cmd_send(&config_for(&server), 7, "  hello there ")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_blank_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        assert!(cmd_send(&config_for(&server), 7, "   ").await.is_err());
    }

    #[tokio::test]
    async fn test_send_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/add"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = cmd_send(&config_for(&server), 7, "hi").await.unwrap_err();
        assert!(err.downcast_ref::<parley_core::ParleyError>().is_some());
    }

    #[tokio::test]
    async fn test_history_survives_missing_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/7"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/chatByUserId/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "fromUser": 7, "toUser": 1, "message": "ping"}
            ])))
            .mount(&server)
            .await;

        cmd_history(&config_for(&server), 7, None, HistoryFormat::Text)
            .await
            .unwrap();
    }
}
