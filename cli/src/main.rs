use clap::Parser;
use color_eyre::Result;
use engine::{BatchConfig, BatchRunner, GenerationClient};
use log::LevelFilter;

mod cli;
mod presets;

use cli::Cli;

const RULE: &str = "================================================================================";

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    color_eyre::install()?;
    let cli = Cli::parse();

    let batch = cli.preset.batch()?;
    let config = BatchConfig {
        output_dir: cli.output_dir(),
        aspect: cli.aspect.unwrap_or(batch.aspect),
    };
    let client = GenerationClient::new(cli.endpoint.clone()).with_timeout(cli.timeout());
    let mut runner = BatchRunner::new(Box::new(client), cli.throttle());

    println!("{RULE}");
    println!(
        "Generating {} images for preset {} ({})",
        batch.items.len(),
        cli.preset,
        config.aspect
    );
    println!("{RULE}");

    let summary = runner.run(batch.items.iter(), &config).await;

    println!("\n{RULE}");
    println!("GENERATION SUMMARY");
    println!("{RULE}");
    print!("{summary}");
    println!("{RULE}");
    println!("Complete! Generated {} images", summary.successful().count());

    Ok(())
}
