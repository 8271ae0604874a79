use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use resieve::{CompressionReport, SieveConfig};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resieve")]
#[command(version)]
#[command(about = "DCT threshold compressor for images and audio", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress an image into a grayscale JPEG
    Image {
        /// Input image file (png, jpeg, bmp, gif, ...)
        input: PathBuf,
        /// Output JPEG file
        output: PathBuf,
        /// Absolute coefficient cutoff (default 50)
        #[arg(short, long)]
        threshold: Option<f64>,
        /// Block edge length (default 8)
        #[arg(short, long)]
        block_size: Option<usize>,
        /// JPEG quality, 1-100 (default 75)
        #[arg(short, long)]
        quality: Option<u8>,
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compress an audio file into a 16-bit WAV
    Audio {
        /// Input audio file (wav, flac, mp3, ogg, ...)
        input: PathBuf,
        /// Output WAV file
        output: PathBuf,
        /// Cutoff as a fraction of the peak coefficient (default 0.1)
        #[arg(short, long)]
        ratio: Option<f64>,
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as JSON
    Config {
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Image {
            input,
            output,
            threshold,
            block_size,
            quality,
            config,
            json,
        } => {
            let mut cfg = load_config(config.as_deref())?;
            let mut image_opts = cfg.image;
            if let Some(t) = threshold {
                image_opts = image_opts.with_threshold(t);
            }
            if let Some(b) = block_size {
                image_opts = image_opts.with_block_size(b);
            }
            cfg = cfg.with_image(image_opts);
            if let Some(q) = quality {
                cfg = cfg.with_jpeg_quality(q);
            }
            image(&input, &output, &cfg, json)?;
        }
        Commands::Audio {
            input,
            output,
            ratio,
            config,
            json,
        } => {
            let mut cfg = load_config(config.as_deref())?;
            if let Some(r) = ratio {
                cfg = cfg.with_audio(cfg.audio.with_relative_threshold(r));
            }
            audio(&input, &output, &cfg, json)?;
        }
        Commands::Config { config } => {
            let cfg = load_config(config.as_deref())?;
            let json = serde_json::to_string_pretty(&cfg).context("Failed to serialize config")?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SieveConfig> {
    match path {
        Some(p) => SieveConfig::load(p),
        None => Ok(SieveConfig::default()),
    }
}

fn image(input: &Path, output: &Path, config: &SieveConfig, json: bool) -> Result<()> {
    let bytes = fs::read(input).context("Failed to read input file")?;

    if !json {
        println!("Reading {}...", input.display());
        println!(
            "Compressing ({}x{} blocks, cutoff {})...",
            config.image.block_size, config.image.block_size, config.image.threshold
        );
    }

    let outcome = resieve::compress_image_bytes(&bytes, config)?;
    fs::write(output, &outcome.jpeg).context("Failed to write output file")?;

    print_report(&outcome.report, output, json)
}

fn audio(input: &Path, output: &Path, config: &SieveConfig, json: bool) -> Result<()> {
    let bytes = fs::read(input).context("Failed to read input file")?;

    if !json {
        println!("Reading {}...", input.display());
        println!(
            "Compressing (cutoff {} x peak)...",
            config.audio.relative_threshold
        );
    }

    let outcome = resieve::compress_audio_bytes(&bytes, config)?;
    fs::write(output, &outcome.wav).context("Failed to write output file")?;

    print_report(&outcome.report, output, json)
}

fn print_report(report: &CompressionReport, output: &Path, json: bool) -> Result<()> {
    if json {
        let json_str =
            serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{}", json_str);
        return Ok(());
    }

    println!("Done!");
    println!("  Output:      {}", output.display());
    if let (Some(w), Some(h)) = (report.width, report.height) {
        println!("  Dimensions:  {}x{}", w, h);
    }
    if let (Some(rate), Some(ch)) = (report.sample_rate, report.channels) {
        println!("  Sample rate: {} Hz", rate);
        println!("  Channels:    {}", ch);
    }
    let total = report.coefficients_kept + report.coefficients_zeroed;
    println!(
        "  Kept:        {} of {} coefficients",
        report.coefficients_kept, total
    );
    for guard in &report.guards {
        println!("  Note:        {}", guard);
    }
    println!(
        "  Size:        {} -> {} bytes ({:.1}x)",
        report.original_size, report.compressed_size, report.ratio
    );

    Ok(())
}
