use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use comic_impose::{
    BookletOptions, BookletStatistics, DecodePolicy, NoSwapSpec, PageFormat, PrepareOptions,
    PrepareReport, RunOptions,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "comict", about = "Comic archive booklet tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract CBZ archives and repair, scale and convert their pages
    Prepare {
        #[command(flatten)]
        prepare: PrepareArgs,
    },

    /// Impose prepared pages into a saddle-stitch booklet PDF
    Booklet {
        /// Directory containing processed pages
        #[arg(long)]
        processed_dir: PathBuf,

        /// Directory containing start pages
        #[arg(long)]
        start_pages_dir: PathBuf,

        /// Directory containing end pages
        #[arg(long)]
        end_pages_dir: PathBuf,

        /// Width of output page images in pixels
        #[arg(long, default_value = "1000")]
        page_width: u32,

        /// Height of output page images in pixels
        #[arg(long, default_value = "1500")]
        page_height: u32,

        /// Pages per booklet (must be even)
        #[arg(long, default_value = "24")]
        ppb: usize,

        /// Resolution used to size PDF pages
        #[arg(long, default_value = "72")]
        dpi: f32,

        /// What to do with a page that cannot be decoded
        #[arg(long, default_value = "skip", value_enum)]
        on_decode_error: DecodeArg,

        /// Show statistics only, don't render anything
        #[arg(long)]
        stats_only: bool,
    },

    /// Write a configuration file for `run`
    InitConfig {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Directory containing start pages
        #[arg(long)]
        start_pages_dir: PathBuf,

        /// Directory containing end pages
        #[arg(long)]
        end_pages_dir: PathBuf,

        /// Pages per booklet (must be even)
        #[arg(long, default_value = "24")]
        ppb: usize,

        #[command(flatten)]
        prepare: PrepareArgs,
    },

    /// Run preparation and imposition from a configuration file
    Run {
        /// Configuration JSON written by `init-config`
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Args)]
struct PrepareArgs {
    /// Directory containing CBZ files
    #[arg(long)]
    input_dir: PathBuf,

    /// Width of output page images in pixels
    #[arg(long, default_value = "1000")]
    page_width: u32,

    /// Height of output page images in pixels
    #[arg(long, default_value = "1500")]
    page_height: u32,

    /// Comma-separated CBZ names to exclude from swapping _01 with _00,
    /// 'all' to disable swapping, 'none' to swap all
    #[arg(long = "no-swap-01", default_value = "none")]
    no_swap: NoSwapSpec,

    /// Convert images to jpg (default), png (lossless) or webp (lossless)
    #[arg(long, default_value = "jpg", value_enum)]
    convert_format: FormatArg,

    /// What to do with a page that cannot be decoded
    #[arg(long, default_value = "skip", value_enum)]
    on_decode_error: DecodeArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Jpg,
    Png,
    Webp,
}

#[derive(Clone, Copy, ValueEnum)]
enum DecodeArg {
    Skip,
    Abort,
}

impl From<FormatArg> for PageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Jpg => Self::Jpg,
            FormatArg::Png => Self::Png,
            FormatArg::Webp => Self::Webp,
        }
    }
}

impl From<DecodeArg> for DecodePolicy {
    fn from(arg: DecodeArg) -> Self {
        match arg {
            DecodeArg::Skip => Self::Skip,
            DecodeArg::Abort => Self::Abort,
        }
    }
}

impl From<PrepareArgs> for PrepareOptions {
    fn from(args: PrepareArgs) -> Self {
        Self {
            input_dir: args.input_dir,
            page_width: args.page_width,
            page_height: args.page_height,
            no_swap: args.no_swap,
            convert_format: args.convert_format.into(),
            decode_policy: args.on_decode_error.into(),
        }
    }
}

fn print_prepare_report(report: &PrepareReport) {
    println!("Preparation:");
    println!("  Units: {}", report.units.len());
    println!("  Pages: {}", report.pages.len());
    println!("  Leading swaps: {}", report.swaps.swapped.len());
    for failure in &report.swaps.failed {
        println!("  Swap failed for {}: {}", failure.unit, failure.message);
    }
    for archive in &report.skipped_archives {
        println!("  Skipped archive: {archive}");
    }
    for entry in &report.skipped_entries {
        println!("  Skipped entry: {entry}");
    }
}

fn print_statistics(stats: &BookletStatistics) {
    println!("Booklet Statistics:");
    println!(
        "  Source pages: {} front, {} main, {} back",
        stats.front_pages, stats.main_pages, stats.back_pages
    );
    println!("  Blank pages added: {}", stats.blank_pages_added);
    println!("  Total pages: {}", stats.total_pages);
    println!("  Signatures: {}", stats.signatures);
    println!("  Spreads: {}", stats.spreads);
    println!("  Sheets: {}", stats.sheets);
}

async fn run_pipeline(options: RunOptions) -> Result<()> {
    options.validate()?;

    let report = comic_impose::prepare(&options.prepare).await?;
    print_prepare_report(&report);

    let output = comic_impose::create_booklet(&options.booklet).await?;
    print_statistics(&output.statistics);
    println!("Booklet → {}", output.document.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Prepare { prepare } => {
            let options = PrepareOptions::from(prepare);
            let report = comic_impose::prepare(&options).await?;
            print_prepare_report(&report);
            println!("Pages → {}", options.extracted_dir().display());
        }

        Commands::Booklet {
            processed_dir,
            start_pages_dir,
            end_pages_dir,
            page_width,
            page_height,
            ppb,
            dpi,
            on_decode_error,
            stats_only,
        } => {
            let options = BookletOptions {
                processed_dir,
                start_pages_dir,
                end_pages_dir,
                page_width,
                page_height,
                pages_per_booklet: ppb,
                document_dpi: dpi,
                decode_policy: on_decode_error.into(),
            };

            if stats_only {
                let stats = comic_impose::plan_booklet(&options).await?;
                print_statistics(&stats);
                return Ok(());
            }

            let output = comic_impose::create_booklet(&options).await?;
            print_statistics(&output.statistics);
            println!("Booklet → {}", output.document.display());
        }

        Commands::InitConfig {
            output,
            start_pages_dir,
            end_pages_dir,
            ppb,
            prepare,
        } => {
            let mut options = RunOptions::new(prepare.into(), start_pages_dir, end_pages_dir);
            options.booklet.pages_per_booklet = ppb;
            options.validate()?;
            options.save(&output).await?;
            println!("Configuration → {}", output.display());
        }

        Commands::Run { config } => {
            let options = RunOptions::load(&config).await?;
            log::debug!("Loaded configuration from {}", config.display());
            run_pipeline(options).await?;
        }
    }

    Ok(())
}
