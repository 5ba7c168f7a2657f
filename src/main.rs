use anyhow::{bail, Result};
use ascii_art::pipeline;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::Level;

const DEFAULT_OUTPUT_STEM: &str = "ascii_image";

/// Redraw a raster image using ASCII characters instead of pixels.
/// Saves the art as a text file and as a PNG containing the same text.
#[derive(Parser, Debug)]
#[command(name = "ascii-art")]
struct Cli {
    /// Path to the source image; prompted for when missing
    image: Option<PathBuf>,

    /// Output file name without extension
    #[arg(short, long, default_value = DEFAULT_OUTPUT_STEM)]
    output: String,

    /// Monospace font file used for the PNG rendering
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// Character width of the art; defaults to one column per source pixel
    #[arg(short = 'w', long = "width")]
    columns: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
    let cli = Cli::parse();

    let input = match cli.image {
        Some(path) => path,
        None => prompt_for_image_path()?,
    };
    let outputs = pipeline::run(&input, &cli.output, cli.font.as_deref(), cli.columns)?;

    println!("ASCII art text file generated: {}", outputs.text_path.display());
    println!("Image version of the same file: {}", outputs.image_path.display());
    Ok(())
}

/// Keep asking until a non-blank path comes back
fn prompt_for_image_path() -> Result<PathBuf> {
    loop {
        print!("Enter the path to the image file: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            bail!("no image path provided");
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            println!("Received blank input.");
            continue;
        }
        return Ok(PathBuf::from(trimmed));
    }
}
