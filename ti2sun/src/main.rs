use libsunras::Encoding;
use std::path::PathBuf;
use ti2sun::{summary, ti_to_sun, ImagePaths};
use tracing::{info, Level};

use anyhow::Result;
use clap::Parser;

#[cfg(not(debug_assertions))]
const DEFAULT_DEBUG_LEVEL: u8 = 1;
#[cfg(debug_assertions)]
const DEFAULT_DEBUG_LEVEL: u8 = 99;

/// Converts TI-99/4A image data files (NAME.TIAC colour table, NAME.TIAP bitmap pattern)
/// into a Sun Raster image file (NAME.ras).
///
/// Input files can be raw binary files or TIFILES format data.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, default_value_t = DEFAULT_DEBUG_LEVEL, action = clap::ArgAction::Count)]
    verbosity: u8,

    /// Compress the output image data using the Sun RLE format
    #[arg(short, long)]
    compress: bool,

    /// The output file name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// The image name, without extension
    image_name: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(true)
        .with_line_number(true)
        .init();

    let paths = ImagePaths::from_image_name(&cli.image_name)?.with_output(cli.output);
    info!("output name: {}", paths.output.display());

    let report = ti_to_sun(&paths, Encoding::from_compressed(cli.compress))?;
    for line in summary(&report) {
        println!("{line}");
    }
    println!("Created Sun Raster image file: {}", paths.output.display());
    if report.is_expanded() {
        println!(
            "Warning: the RLE encoded image size of {} bytes is larger than uncompressed image size.",
            report.total()
        );
    }
    println!("Done.");
    Ok(())
}
