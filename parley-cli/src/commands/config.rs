use anyhow::Result;
use colored::Colorize;
use parley_core::{get_config_dir, ParleyConfig};

pub fn cmd_config(config: &ParleyConfig) -> Result<()> {
    println!("{}", "Parley Configuration".cyan().bold());
    println!("{}", "═".repeat(50).dimmed());

    for (section, rows) in config_rows(config) {
        println!();
        println!("  {}", section.yellow().bold());
        for (key, value) in rows {
            println!("    {:<16} {}", format!("{}:", key), value);
        }
    }

    println!();
    match get_config_dir() {
        Some(dir) => println!(
            "  {} {}",
            "Config dir:".dimmed(),
            dir.join("config.toml").display()
        ),
        None => println!("  {}", "No config directory on this platform".dimmed()),
    }

    Ok(())
}

type Section = (&'static str, Vec<(&'static str, String)>);

fn config_rows(config: &ParleyConfig) -> Vec<Section> {
    let log_file = config
        .log_file()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    vec![
        (
            "Backend",
            vec![
                ("base_url", config.backend.base_url.clone()),
                ("timeout_secs", config.backend.timeout_secs.to_string()),
            ],
        ),
        (
            "Assistant",
            vec![
                ("api_key", mask_key(config.assistant.usable_api_key())),
                ("endpoint", config.assistant.endpoint.clone()),
                ("model", config.assistant.model.clone()),
                ("timeout_secs", config.assistant.timeout_secs.to_string()),
            ],
        ),
        (
            "Session",
            vec![("current_user_id", config.current_user_id().to_string())],
        ),
        (
            "Logging",
            vec![
                ("level", config.log_level().to_string()),
                ("file", log_file),
            ],
        ),
        (
            "TUI",
            vec![
                ("theme", config.tui.theme.clone()),
                ("tick_rate_ms", config.tui.tick_rate_ms.to_string()),
                ("narrow_width", config.tui.narrow_width.to_string()),
            ],
        ),
    ]
}

fn mask_key(key: Option<&str>) -> String {
    match key {
        None => "(not set)".to_string(),
        Some(k) if k.chars().count() <= 8 => "****".to_string(),
        Some(k) => {
            let head: String = k.chars().take(3).collect();
            let tail: String = k.chars().skip(k.chars().count() - 4).collect();
            format!("{}****{}", head, tail)
        }
    }
}
