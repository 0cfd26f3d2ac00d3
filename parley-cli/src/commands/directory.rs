use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use parley_core::format::{relative_age, truncate};
use parley_core::{ChatBackend, Group, GroupPanel, HttpBackend, ParleyConfig, User, UserPanel};

const PREVIEW_WIDTH: usize = 40;

pub async fn cmd_users(config: &ParleyConfig, search: Option<&str>) -> Result<()> {
    let backend = HttpBackend::from_config(config)?;
    let mut panel = UserPanel::new("users");
    panel.apply(Ok(backend.list_users().await?));
    if let Some(term) = search {
        panel.set_filter(term);
    }

    let users = panel.visible();
    if users.is_empty() {
        match search {
            Some(term) => println!("No contacts matching '{}'", term.yellow()),
            None => println!("{}", "No contacts yet.".yellow()),
        }
        return Ok(());
    }

    println!("{}", "Contacts".cyan().bold());
    println!("{}", "═".repeat(60).dimmed());
    println!();
    println!("{}", users_table(&users, &Utc::now()));
    println!();
    println!("  Total: {} contacts", users.len());

    Ok(())
}

pub async fn cmd_groups(config: &ParleyConfig) -> Result<()> {
    let backend = HttpBackend::from_config(config)?;
    let mut panel = GroupPanel::new("groups");
    panel.apply(Ok(backend.list_groups().await?));

    let groups = panel.visible();
    if groups.is_empty() {
        println!("{}", "No groups yet.".yellow());
        return Ok(());
    }

    println!("{}", "Groups".cyan().bold());
    println!("{}", "═".repeat(60).dimmed());
    println!();
    println!("{}", groups_table(&groups));
    println!();
    println!("  Total: {} groups", groups.len());

    Ok(())
}

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(label).fg(comfy_table::Color::Cyan))
        .collect()
}

fn users_table(users: &[&User], now: &DateTime<Utc>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&["ID", "Name", "Status", "Last message", "Unread", "Active"]));

    for user in users {
        let status = if user.online() {
            Cell::new("● Online").fg(comfy_table::Color::Green)
        } else {
            Cell::new("○ Offline").fg(comfy_table::Color::DarkGrey)
        };
        let preview = if user.preview_is_file() {
            format!("📄 {}", truncate(user.preview(), PREVIEW_WIDTH))
        } else {
            truncate(user.preview(), PREVIEW_WIDTH)
        };
        let unread = match user.unread() {
            0 => String::new(),
            n => n.to_string(),
        };
        let active = user
            .last_active()
            .map(|ts| relative_age(&ts, now))
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(user.id),
            Cell::new(&user.name),
            status,
            Cell::new(preview),
            Cell::new(unread),
            Cell::new(active),
        ]);
    }

    table
}

fn groups_table(groups: &[&Group]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&["ID", "", "Name", "Description", "Unread"]));

    for group in groups {
        let unread = match group.unread() {
            0 => String::new(),
            n => n.to_string(),
        };
        table.add_row(vec![
            Cell::new(group.id),
            Cell::new(&group.initials),
            Cell::new(&group.name),
            Cell::new(truncate(
                group.description.as_deref().unwrap_or(""),
                PREVIEW_WIDTH,
            )),
            Cell::new(unread),
        ]);
    }

    table
}
