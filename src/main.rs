use std::env;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Context;
use chrono::Local;
use listharvest::core::{parse_query_jobs, parse_url_jobs, Mode};
use listharvest::scrapers::WebDriverScraper;
use listharvest::{CrawlContext, Crawler, CrawlerConfig, CsvStorage, RunLog};

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn config_from_env() -> CrawlerConfig {
    let mut config = CrawlerConfig::default();
    if let Ok(url) = env::var("WEBDRIVER_URL") {
        config = config.with_webdriver_url(url);
    }
    if let Ok(value) = env::var("HEADLESS") {
        let headless = !matches!(value.trim().to_lowercase().as_str(), "0" | "false" | "no");
        config = config.with_headless(headless);
    }
    config
}

async fn harvest(config: CrawlerConfig, log: RunLog) -> anyhow::Result<()> {
    let mode = prompt(
        "Input parsing mode (query - for analysis by search query, url - for analysis by url): >>> ",
    )?;
    let Ok(mode) = mode.parse::<Mode>() else {
        println!("[ERROR] Input valid mode");
        return Ok(());
    };

    let jobs = match mode {
        Mode::Query => parse_query_jobs(&prompt(
            "Enter the text of requests separated by commas (phone, charger, headphones): ",
        )?),
        Mode::Url => parse_url_jobs(&prompt(
            "Enter the url in the format (name of the file to be written: url-address) separated by commas: ",
        )?)?,
    };

    println!("Init browser...");
    let scraper = WebDriverScraper::connect(&config)
        .await
        .context("Failed to start the browser session")?;
    let storage = CsvStorage::new(&config.output_root)?;

    let crawler = Crawler::new(CrawlContext {
        scraper: Box::new(scraper),
        storage: Box::new(storage),
        log,
        config,
    });
    crawler.run_all(&jobs).await;

    let stats = crawler.stats().clone();
    crawler.shutdown().await?;
    stats.print_summary();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .filter_module("hyper", log::LevelFilter::Warn)
        .init();

    let config = config_from_env();
    let log = RunLog::create(&config.log_root, Local::now())?;
    log.info("The program started");
    let started = Instant::now();

    let result = harvest(config, log.clone()).await;
    if let Err(e) = &result {
        log.error(format!("{:#}", e));
    }

    log.info(format!(
        "The program ran for {} seconds",
        started.elapsed().as_secs_f64()
    ));
    result
}
