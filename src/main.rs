use clap::Parser;
use contrastive::ContrastConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Print the contrast palette generated for an image.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Image to extract the palette from
    image: PathBuf,

    /// JSON file overriding the default thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of dominant colors to extract
    #[arg(long)]
    colors: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ContrastConfig::from_json_file(path)?,
        None => ContrastConfig::default(),
    };

    if let Some(colors) = args.colors {
        config.color_count = colors;
    }

    let result = contrastive::preload_and_extract_with(&args.image, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{:#?}", result);
    }

    Ok(())
}
