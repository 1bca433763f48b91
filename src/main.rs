//! userdesk binary entry point

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use userdesk::{
    cli::{Cli, Commands},
    config::Config,
    gateway::UserGateway,
    models::ListQuery,
    tui::App,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "userdesk=info");
    }

    // Log to a file so TUI output is never corrupted by log lines
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("userdesk.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    // Subcommands print and exit without the TUI
    if let Some(command) = cli.command {
        return handle_cli_command(command, &config).await;
    }

    info!("Starting userdesk TUI against {}", config.base_url);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config)?;
    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(_) => {
            info!("userdesk exited successfully");
        }
        Err(e) => {
            error!("userdesk encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Handle CLI mode commands - print output and exit
async fn handle_cli_command(command: Commands, config: &Config) -> Result<()> {
    let gateway = UserGateway::new(config)?;

    match command {
        Commands::List {
            search,
            page,
            size,
            sort_by,
            sort_dir,
        } => {
            let query = ListQuery {
                search,
                // CLI takes 1-based pages like the wire; internal state is 0-based
                page: page.saturating_sub(1),
                size,
                sort_by: Commands::parse_sort_field(&sort_by)?,
                sort_dir: Commands::parse_sort_direction(&sort_dir)?,
            };

            let page_data = gateway.list(&query).await?;
            if page_data.users.is_empty() {
                println!("No users found.");
                return Ok(());
            }

            println!(
                "{:<6} {:<20} {:<28} {:<8} {:<14} {:<12}",
                "ID", "Name", "Description", "Gender", "Country", "Born"
            );
            println!("{}", "-".repeat(94));
            for user in &page_data.users {
                println!(
                    "{:<6} {:<20} {:<28} {:<8} {:<14} {:<12}",
                    user.id,
                    truncate(&user.name, 20),
                    truncate(&user.description, 28),
                    user.gender.map(|g| g.as_str()).unwrap_or("-"),
                    truncate(&user.country, 14),
                    user.date_of_birth,
                );
            }
            println!();
            println!(
                "Page {} of {} ({} users total)",
                query.page + 1,
                (page_data.total_items as usize + query.size - 1) / query.size.max(1),
                page_data.total_items
            );
        }
        Commands::Show { id } => {
            let user = gateway.get(id).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
            if let Some(url) = user
                .profile_picture_path
                .as_deref()
                .and_then(|p| gateway.file_url(p))
            {
                println!("Profile picture: {}", url);
            }
            if let Some(url) = user
                .supporting_document_path
                .as_deref()
                .and_then(|p| gateway.file_url(p))
            {
                println!("Supporting document: {}", url);
            }
        }
        Commands::Delete { id, yes } => {
            if !yes {
                eprintln!("Refusing to delete user {} without --yes", id);
                std::process::exit(1);
            }
            gateway.delete(id).await?;
            println!("Deleted user {}", id);
        }
    }

    Ok(())
}

/// Truncate string to specified length with ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
