use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use engine::{AspectRatio, GenerationClient, client::DEFAULT_ENDPOINT};

#[derive(clap::Parser)]
struct Arg {
    filename: String,
    description: String,
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    #[arg(short, long, value_enum, default_value_t)]
    aspect: AspectRatio,
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    color_eyre::install()?;
    let Arg {
        filename,
        description,
        endpoint,
        aspect,
        output_dir,
    } = Arg::parse();
    let client = GenerationClient::new(endpoint);

    let saved = client
        .generate_image(&description, &filename, &output_dir, aspect)
        .await?;
    println!("Saved {}, {} KB", saved.path.display(), saved.bytes / 1024);

    Ok(())
}
