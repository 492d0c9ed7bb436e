//! End-to-end run: scrape, organize, compact, write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tracing::{error, info};

use crate::config::ScrapeConfig;
use crate::extract::{scrape_session, scrape_session_links, scrape_tutorials};
use crate::fetch::DocumentSource;
use crate::models::Conference;
use crate::organize::organize_days;
use crate::output::write_program;

/// Scrape tutorials and every technical session, then group them by day.
///
/// Pages that cannot be fetched are skipped; this never fails.
pub async fn scrape_program<S: DocumentSource>(source: &S, config: &ScrapeConfig) -> Conference {
    info!("Starting {} program scrape.", config.conference.name);

    let mut sessions = scrape_tutorials(source, config).await;

    let session_urls = scrape_session_links(source, config).await;
    let pb = ProgressBar::new(session_urls.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("Scraping technical sessions [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    for url in &session_urls {
        if let Some(session) = scrape_session(source, config, url).await {
            sessions.push(session);
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let conference = Conference {
        conference_name: config.conference.name.clone(),
        conference_dates: config.conference.dates.clone(),
        location: config.conference.location.clone(),
        main_program_url: config
            .technical_program_url()
            .map(|u| u.to_string())
            .unwrap_or_default(),
        days: organize_days(sessions, config.conference.year),
    };

    info!(
        "Scraping complete: {} days, {} sessions, {} papers.",
        conference.days.len(),
        conference.session_count(),
        conference.paper_count()
    );
    conference
}

/// Apply the configured compaction rules to the program tree
pub fn compact_program(conference: &Conference, config: &ScrapeConfig) -> Result<Value> {
    let tree = serde_json::to_value(conference).context("Failed to build program tree")?;
    Ok(config.compaction.compact(tree))
}

/// Full run. Only a failure to produce the output file is an error.
pub async fn run<S: DocumentSource>(source: &S, config: &ScrapeConfig) -> Result<PathBuf> {
    let conference = scrape_program(source, config).await;

    info!("Cleaning, renaming keys, and removing non-standard characters...");
    let compacted = compact_program(&conference, config)?;

    let path = config.output_path.clone();
    info!("Saving compressed data to {}...", path.display());
    match write_program(&path, &compacted) {
        Ok(size) => {
            info!(
                "Successfully created compressed file. Size: {:.2} KB",
                size as f64 / 1024.0
            );
            Ok(path)
        }
        Err(e) => {
            error!("An error occurred while saving the file: {}", e);
            Err(e).with_context(|| format!("Failed to write {}", path.display()))
        }
    }
}
