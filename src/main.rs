use anyhow::Result;
use clap::{Arg, Command};
use std::sync::Arc;
use tracing::{info, warn};

use yt_ranker::cache::{CacheStore, FileCacheStore, MemoryCacheStore};
use yt_ranker::config::Config;
use yt_ranker::search::SearchOrchestrator;
use yt_ranker::youtube::YouTubeClient;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("yt-ranker")
        .version("0.1.0")
        .about("YouTube keyword search with short-form filtering and composite ranking")
        .arg(
            Arg::new("keyword")
                .value_name("KEYWORD")
                .help("Search keyword")
                .required_unless_present_any(["cleanup-cache", "clear-cache"]),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Config file path (default: search yt-ranker.toml locations)"),
        )
        .arg(
            Arg::new("region")
                .short('r')
                .long("region")
                .value_name("CODE")
                .help("Override the configured region hint (ISO 3166-1 alpha-2)"),
        )
        .arg(
            Arg::new("limit")
                .short('l')
                .long("limit")
                .value_name("NUM")
                .help("Display at most NUM results")
                .default_value("20"),
        )
        .arg(
            Arg::new("no-cache")
                .long("no-cache")
                .help("Skip the file cache for this run")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("cleanup-cache")
                .long("cleanup-cache")
                .help("Remove expired cache entries and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("clear-cache")
                .long("clear-cache")
                .help("Remove all cache entries and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    tracing_subscriber::fmt()
        .with_env_filter(if verbose {
            "yt_ranker=debug,info"
        } else {
            "yt_ranker=info,warn"
        })
        .init();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => Config::load_from(std::path::Path::new(path))?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }),
    };
    if let Some(region) = matches.get_one::<String>("region") {
        config.api.region_code = region.clone();
    }

    if matches.get_flag("cleanup-cache") || matches.get_flag("clear-cache") {
        let cache = FileCacheStore::new(config.cache.cache_dir.clone());
        cache.initialize().await?;
        let removed = if matches.get_flag("clear-cache") {
            cache.clear_all().await?
        } else {
            cache.cleanup_expired().await?
        };
        println!("Removed {} cache entries", removed);
        return Ok(());
    }

    config.validate()?;
    let keyword = matches.get_one::<String>("keyword").expect("required arg");
    let limit: usize = matches.get_one::<String>("limit").expect("has default").parse()?;

    let cache: Arc<dyn CacheStore> = if config.cache.enabled && !matches.get_flag("no-cache") {
        let file_cache = FileCacheStore::new(config.cache.cache_dir.clone());
        file_cache.initialize().await?;
        Arc::new(file_cache)
    } else {
        Arc::new(MemoryCacheStore::new())
    };

    let api_key = config.api.api_key.clone().expect("validated above");
    let source = Arc::new(YouTubeClient::new(
        api_key,
        config.api.region_code.clone(),
        config.api.request_timeout_seconds,
    ));

    let orchestrator = SearchOrchestrator::new(source, cache);

    info!("🔍 Searching for '{}'", keyword);
    let start_time = std::time::Instant::now();
    let results = orchestrator.search(keyword).await?;
    let duration = start_time.elapsed();

    if results.is_empty() {
        println!("No results for '{}'", keyword);
        return Ok(());
    }

    println!(
        "{:<4} {:<50} {:<24} {:>12} {:>12} {:>8}",
        "#", "Title", "Channel", "Views", "Subscribers", "Score"
    );
    for (rank, video) in results.iter().take(limit).enumerate() {
        println!(
            "{:<4} {:<50} {:<24} {:>12} {:>12} {:>8.4}",
            rank + 1,
            truncate(&video.candidate.title, 48),
            truncate(&video.candidate.channel_title, 22),
            video.view_count,
            video.subscriber_count,
            video.score,
        );
    }
    info!(
        "✅ {} results in {:.2}s",
        results.len(),
        duration.as_secs_f64()
    );

    Ok(())
}

/// Shorten a string to at most `max` characters for table display
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
