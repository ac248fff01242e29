use anyhow::Result;
use auction_exporter::export::{finish_run, FileTables};
use auction_exporter::validation::validate_export;
use auction_exporter::{ExportConfig, ExportPipeline};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "auction-exporter")]
#[command(about = "Flatten eBay auction JSON exports into SQL bulk-load tables", long_about = None)]
struct Args {
    /// Export documents to process (only *.json paths are read)
    #[arg(required_unless_present = "validate")]
    paths: Vec<PathBuf>,

    /// Directory for items.dat, user.dat, bids.dat and category.dat
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: String,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Only validate existing tables (don't export)
    #[arg(long)]
    validate: bool,

    /// Skip validation of the tables after export
    #[arg(long)]
    skip_validation: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in the output directory
    let output_dir = shellexpand::tilde(&args.output_dir);
    let config = ExportConfig::new(PathBuf::from(output_dir.as_ref()));

    // If validate-only mode, just validate and exit
    if args.validate {
        log::info!("Validation mode - checking existing tables...");
        validate_export(&config)?;
        log::info!("Validation completed!");
        return Ok(());
    }

    // Tables stay open for the whole run so every document appends to the same files
    let tables = FileTables::open(&config)?;
    let mut pipeline = ExportPipeline::new(config.clone(), tables);
    let result = pipeline.run(args.paths.as_slice(), |path| {
        println!("Success parsing {}", path.display());
    });

    // Close even on failure so rows from earlier documents reach disk
    let closed = pipeline.into_sink().close();
    let summary = finish_run(result, closed)?;

    if summary.documents == 0 {
        log::warn!("No {} documents among the given paths", config.extension);
    }

    if !args.skip_validation {
        log::info!("Running post-export validation...");
        validate_export(&config)?;
        log::info!("Validation passed!");
    }

    Ok(())
}
