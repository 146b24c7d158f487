//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `video_scout` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Rendering results and writing export files
//!
//! All core functionality is implemented in the library crate.

use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;

use video_scout::app::{print_request_statistics, print_search_summary, progress_logger};
use video_scout::config::{Cli, Command, CommentsArgs, SearchArgs};
use video_scout::initialization::init_logger_with;
use video_scout::storage::FileKeyStore;
use video_scout::{ExportError, Session, VideoRow};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting YOUTUBE_API_KEY in .env without exporting it manually
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let session = Session::new(cli.config(), Arc::new(FileKeyStore::new(&cli.key_file)))
        .context("Failed to initialize session")?;
    if let Some(key) = &cli.api_key {
        session.set_api_key(key);
    }

    let result = match &cli.command {
        Command::VerifyKey => verify_key(&session).await,
        Command::Search(args) => search(&session, args).await,
        Command::Comments(args) => comments(&session, args).await,
    };
    print_request_statistics(session.stats());

    if let Err(e) = result {
        eprintln!("video_scout error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn verify_key(session: &Session) -> Result<()> {
    let check = session
        .verify_and_save_key()
        .await
        .context("Failed to save API key")?;
    if check.ok {
        println!("API key verified and saved");
        Ok(())
    } else {
        bail!(
            "API key rejected: {}",
            check.reason.unwrap_or_else(|| "unknown reason".to_string())
        )
    }
}

fn print_rows(rows: &[VideoRow]) {
    println!(
        "{:>12} {:>12} {:>8} {:>8}  {:<11} {:<5} TITLE",
        "VIEWS", "SUBSCRIBERS", "SPREAD", "RULE", "VIDEO", "SHORT"
    );
    for row in rows {
        println!(
            "{:>12} {:>12} {:>8} {:>8}  {:<11} {:<5} {}",
            row.view_count,
            row.subscriber_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            row.spread_rate
                .map(|r| format!("{:.2}", r))
                .unwrap_or_else(|| "-".to_string()),
            row.matched_rule.label(),
            row.video_id,
            if row.is_short { "yes" } else { "no" },
            row.title
        );
    }
}

/// Reports a one-shot export notice without failing the command.
fn report_export(result: Result<std::path::PathBuf, ExportError>) -> Result<()> {
    match result {
        Ok(path) => {
            println!("Wrote {}", path.display());
            Ok(())
        }
        Err(ExportError::NothingToExport(notice)) => {
            println!("{}", notice);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn search(session: &Session, args: &SearchArgs) -> Result<()> {
    let started = Instant::now();
    session
        .search(&args.filter_config(), &progress_logger())
        .await
        .context("Search failed")?;

    let state = session.search_state();
    print_search_summary(&state, started.elapsed().as_secs_f64());
    print_rows(&session.sorted_rows(args.sort_state()));
    println!(
        "{} of {} videos kept ({} pages, {} ids fetched)",
        state.rows.len(),
        state.total_before,
        state.progress.current_page,
        state.progress.total_fetched
    );

    let now = Utc::now();
    let out_dir = args.export.as_deref().unwrap_or(Path::new("."));
    if args.export.is_some() {
        report_export(session.export_videos(out_dir, now))?;
    }

    if !args.selected.is_empty() {
        for video_id in &args.selected {
            session.set_selected(video_id, true);
            if let Err(e) = session.fetch_comments(video_id).await {
                eprintln!("Comments for {}: {}", video_id, e);
            }
        }
        report_export(session.export_selected_comments(out_dir, now))?;
    }
    Ok(())
}

async fn comments(session: &Session, args: &CommentsArgs) -> Result<()> {
    let now = Utc::now();
    for video_id in &args.video_ids {
        match session.fetch_comments(video_id).await {
            Ok(count) => {
                println!("{}: {} comments", video_id, count);
                report_export(session.export_comments(video_id, &args.output_dir, now))?;
            }
            Err(e) => eprintln!("Comments for {}: {}", video_id, e),
        }
    }
    Ok(())
}
