use clap::Parser;
use devlog::application::{run_startup, ImageSync, JournalService, StartupOutcome};
use devlog::cli::{self, Cli, Commands};
use devlog::domain::{JournalQuery, RawEntry, SortKey};
use devlog::error::{DevlogError, Result};
use devlog::infrastructure::{Config, ContentSource, GithubSource, LocalSource};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    match run(cli).await {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("DEVLOG_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Pick the content source: a local checkout if requested, otherwise the
/// remote API, which needs a token
fn build_source(cli: &Cli, config: &Config) -> Result<Arc<dyn ContentSource>> {
    match &cli.source_dir {
        Some(dir) => Ok(Arc::new(LocalSource::new(dir.clone()))),
        None => {
            let token = config.token()?;
            Ok(Arc::new(GithubSource::new(config, &token)?))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Parse { file } => {
            let markdown = std::fs::read_to_string(file)?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let entry = RawEntry::from_markdown(&file_name, &markdown)
                .into_entry()
                .map_err(|report| DevlogError::InvalidEntry(report.to_string()))?;
            print!("{}", cli::format_entry_details(&entry));
            Ok(())
        }
        Commands::List {
            app_type,
            technology,
            sort,
            select,
            json,
        } => {
            let query = JournalQuery {
                application_type: app_type.clone(),
                technology: technology.clone(),
                sort: SortKey::parse_or_default(sort),
                selected_title: select.clone(),
            };

            let service = JournalService::new(build_source(&cli, &config)?, &config);
            let view = service.browse(&query).await;

            if *json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", cli::format_entry_list(&view));
                if view.entries.is_empty() {
                    println!();
                }
            }
            Ok(())
        }
        Commands::Show { title, html } => {
            let service = JournalService::new(build_source(&cli, &config)?, &config);
            let catalog = service.populate_catalog().await;
            let entry = catalog
                .iter()
                .find(|entry| entry.title() == title)
                .ok_or_else(|| DevlogError::EntryNotFound(title.clone()))?;
            print!("{}", cli::format_entry(entry, *html));
            Ok(())
        }
        Commands::Facets => {
            let service = JournalService::new(build_source(&cli, &config)?, &config);
            let catalog = service.populate_catalog().await;
            println!(
                "{}",
                cli::format_facets(
                    &catalog.unique_application_types(),
                    &catalog.unique_technologies()
                )
                .trim_end()
            );
            Ok(())
        }
        Commands::Sync { dest } => {
            let source = build_source(&cli, &config)?;
            let journals = JournalService::new(Arc::clone(&source), &config);
            let images = match dest {
                Some(dest) => ImageSync::with_dest(source, &config, dest.clone()),
                None => ImageSync::new(source, &config),
            };

            let shutdown = async {
                let _ = tokio::signal::ctrl_c().await;
            };
            match run_startup(&journals, &images, shutdown).await {
                StartupOutcome::Completed {
                    entries,
                    images_synced,
                } => {
                    println!("Journal entries: {}", entries);
                    match images.synced_count() {
                        Some(count) if images_synced => {
                            println!("Images synced: {} -> {}", count, images.dest().display())
                        }
                        _ => println!("Images not synced (see log)"),
                    }
                    Ok(())
                }
                StartupOutcome::Cancelled => {
                    println!("Sync cancelled");
                    Ok(())
                }
            }
        }
    }
}
