use clap::{Args, Parser, Subcommand};
use rust_dotbar::tools::{GridLayout, synthesize_print};
use rust_dotbar::{Decoder, DecoderConfig, ImagingConfig, Polarity};
use rust_dotbar::{ContourExtractor, DecodeReport};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dotbar", version, about = "Dot/bar ground-code decoder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode an image and print one line of text per block
    Decode {
        #[arg(long)]
        image: PathBuf,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Print blocks, unit widths, runs and symbols found in an image
    Inspect {
        #[arg(long)]
        image: PathBuf,
        #[command(flatten)]
        tuning: Tuning,
    },
    /// Render text as a synthetic print (one character per line)
    Render {
        #[arg(long)]
        text: String,
        #[arg(long)]
        output: PathBuf,
        /// Draw dark marks on a light background
        #[arg(long)]
        dark_marks: bool,
    },
}

/// Threshold overrides on top of the `DOTBAR_*` environment
#[derive(Args)]
struct Tuning {
    /// Maximum area step (percent) between regions of one block
    #[arg(long)]
    area_similarity: Option<f64>,
    /// Line height tolerance (percent of the line's first center)
    #[arg(long)]
    line_tolerance: Option<f64>,
    /// Smallest accepted block
    #[arg(long)]
    min_block: Option<usize>,
    /// Largest accepted block
    #[arg(long)]
    max_block: Option<usize>,
    /// Marks are darker than the background
    #[arg(long)]
    dark_marks: bool,
    /// Decode blocks in parallel
    #[arg(long)]
    parallel: bool,
}

impl Tuning {
    fn decoder(&self) -> Decoder {
        let mut config = DecoderConfig::from_env();
        if let Some(pct) = self.area_similarity {
            config = config.with_area_similarity_percent(pct);
        }
        if let Some(pct) = self.line_tolerance {
            config = config.with_line_y_tolerance_percent(pct);
        }
        let min = self.min_block.unwrap_or(*config.block_size_range.start());
        let max = self.max_block.unwrap_or(*config.block_size_range.end());
        config = config.with_block_size_range(min..=max);
        if self.parallel {
            config = config.with_parallel(true);
        }

        let mut imaging = ImagingConfig::from_env();
        if self.dark_marks {
            imaging = imaging.with_polarity(Polarity::Dark);
        }
        Decoder::with_source(config, ContourExtractor::new(imaging))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Decode { image, tuning } => decode_cmd(&image, &tuning),
        Command::Inspect { image, tuning } => inspect_cmd(&image, &tuning),
        Command::Render {
            text,
            output,
            dark_marks,
        } => render_cmd(&text, &output, dark_marks),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn read_image(image: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(image).map_err(|err| format!("Failed to read image {}: {}", image.display(), err))
}

fn decode_cmd(image: &Path, tuning: &Tuning) -> Result<(), String> {
    let bytes = read_image(image)?;
    let text = tuning
        .decoder()
        .decode_image(&bytes)
        .map_err(|err| format!("Failed to decode {}: {}", image.display(), err))?;
    println!("{text}");
    Ok(())
}

fn inspect_cmd(image: &Path, tuning: &Tuning) -> Result<(), String> {
    let bytes = read_image(image)?;
    let report = tuning
        .decoder()
        .report_image(&bytes)
        .map_err(|err| format!("Failed to decode {}: {}", image.display(), err))?;
    print_report(image, &report);
    Ok(())
}

fn print_report(image: &Path, report: &DecodeReport) {
    let tel = &report.telemetry;
    println!("Image: {}", image.display());
    println!(
        "Regions: {}, clusters: {}, blocks kept: {}",
        tel.regions_in, tel.clusters_formed, tel.blocks_kept
    );
    for (i, block) in report.blocks.iter().enumerate() {
        println!(
            "  Block {}: {} regions, unit width {:.2}px",
            i, block.region_count, block.unit_width
        );
        for (j, line) in block.lines.iter().enumerate() {
            let y = line.centers.first().map(|c| c.y).unwrap_or_default();
            println!(
                "    Line {} (y={:.1}, {} marks over {} cells): run={} symbol={:?}",
                j,
                y,
                line.run.mark_count(),
                line.run.len(),
                line.run,
                line.symbol
            );
        }
    }
    println!("Text:\n{}", report.text());
}

fn render_cmd(text: &str, output: &Path, dark_marks: bool) -> Result<(), String> {
    let polarity = if dark_marks {
        Polarity::Dark
    } else {
        Polarity::Bright
    };
    let png = synthesize_print(text, &GridLayout::default(), polarity)
        .map_err(|err| format!("Failed to render {text:?}: {err}"))?;
    std::fs::write(output, png)
        .map_err(|err| format!("Failed to write {}: {}", output.display(), err))?;
    println!("Wrote {}", output.display());
    Ok(())
}
