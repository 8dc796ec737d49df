use anyhow::Result;
use audiopsy::{AnalysisPipeline, ConsoleReporter, InputSelection, PipelineConfig};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "audiopsy")]
#[command(about = "Inspect audio file properties and render waveform plots", long_about = None)]
#[command(group(ArgGroup::new("input").required(true)))]
struct Args {
    /// Directory containing the audio files to analyze
    #[arg(short = 'd', long, group = "input")]
    directory: Option<String>,

    /// Comma-separated list of audio file paths to analyze
    #[arg(short = 'f', long, group = "input")]
    files: Option<String>,

    /// Output directory for the report and waveform plots
    #[arg(short = 'o', long, default_value = "output")]
    output: String,

    /// Display each waveform after saving it
    #[arg(short = 'v', long)]
    view_waveforms: bool,

    /// Verbose logging
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(args) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    log::info!("Audiopsy - Forensic Audio Analysis");
    log::info!("==================================");

    // Expand ~ in paths
    let selection = if let Some(directory) = &args.directory {
        let directory = shellexpand::tilde(directory);
        InputSelection::Directory(PathBuf::from(directory.as_ref()))
    } else {
        // The clap group guarantees exactly one of the two flags is present
        let files = args.files.as_deref().unwrap_or_default();
        InputSelection::FileList(files.to_string())
    };

    let output_dir = PathBuf::from(shellexpand::tilde(&args.output).as_ref());

    let config = PipelineConfig::new(output_dir).with_view_waveforms(args.view_waveforms);
    let pipeline = AnalysisPipeline::new(config, ConsoleReporter);
    let summary = pipeline.run(&selection)?;

    log::info!(
        "Analyzed {} file(s); report at {}",
        summary.table.len(),
        summary.csv_path.display()
    );

    Ok(())
}
