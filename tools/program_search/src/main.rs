use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use confprogram::search::{load_program, overview, search};

#[derive(Parser, Debug)]
#[command(name = "program_search")]
#[command(about = "Browse a compact conference program produced by scrape_program")]
struct Args {
    /// Compact program file
    #[arg(short, long, default_value = "igarss_2025_program.json")]
    input: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show conference name, dates and totals
    Overview,
    /// Find sessions by title, author, institution, type or weekday
    Search {
        /// Free-text query, e.g. "sea ice" or "poster sessions on tuesday"
        query: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let program = load_program(&args.input)?;
    info!("Loaded {} from {}", program.conference_name, args.input.display());

    match args.command {
        Command::Overview => {
            println!("{}", overview(&program));
        }
        Command::Search { query } => {
            let query = query.join(" ");
            let response = search(&program, &query);

            println!("{}", response.summary);
            println!("{}", response.contextual_summary);
            for hit in &response.results {
                let session = hit.session;
                println!(
                    "\n{} [{}] {}",
                    hit.day.date,
                    session.session_id_internal.as_deref().unwrap_or("-"),
                    session.title.as_deref().unwrap_or("(untitled)")
                );
                let when = match (&session.schedule.start, &session.schedule.end) {
                    (Some(start), Some(end)) => format!("{}-{}", start, end),
                    _ => "time tbd".to_string(),
                };
                println!(
                    "  {} | {} | {}",
                    session.kind.as_deref().unwrap_or("-"),
                    when,
                    session.loc.as_deref().unwrap_or("location tbd")
                );
                for paper in &session.papers {
                    let authors: Vec<&str> = paper.aut.iter().map(|a| a.name.as_str()).collect();
                    println!(
                        "  - {} ({})",
                        paper.title.as_deref().unwrap_or("(untitled)"),
                        authors.join(", ")
                    );
                }
            }
        }
    }

    Ok(())
}
