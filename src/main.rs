use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use review_harvester::config::Config;
use review_harvester::controller;

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    info!(
        "Harvesting reviews from {} into {}",
        config.input_path.display(),
        config.output_path.display()
    );

    let summary = controller::run(&config).context("Error harvesting restaurant reviews")?;

    info!(
        "Processed {} restaurants, {} places, {} reviews written",
        summary.restaurants, summary.places, summary.reviews_written
    );
    Ok(())
}
