use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use camino::Utf8PathBuf;
use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use biomart_harvester::app::App;
use biomart_harvester::biomart::BiomartHttpClient;
use biomart_harvester::config::ConfigLoader;
use biomart_harvester::domain::Chromosome;
use biomart_harvester::error::HarvestError;
use biomart_harvester::output::{JsonOutput, TextOutput};

#[derive(Parser)]
#[command(name = "mart-harvest")]
#[command(about = "Retrieve per-chromosome gene annotations from Ensembl BioMart")]
#[command(version, author)]
struct Cli {
    /// JSON config file with endpoint and timing overrides.
    #[arg(long)]
    config: Option<String>,

    /// Directory the CSV files are written to.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Restrict the run to the given chromosomes (repeatable).
    #[arg(long = "chromosome")]
    chromosomes: Vec<String>,

    /// Print the run summary as JSON instead of the text block.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(harvest) = report.downcast_ref::<HarvestError>() {
            return ExitCode::from(map_exit_code(harvest));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &HarvestError) -> u8 {
    match error {
        HarvestError::Interrupted => 130,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ConfigLoader::resolve(cli.config.as_deref()).into_diagnostic()?;
    if let Some(out_dir) = cli.out_dir {
        config.output_dir = out_dir;
    }

    let chromosomes = select_chromosomes(&cli.chromosomes).into_diagnostic()?;

    let interrupt = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupt);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)).into_diagnostic()?;

    let client = BiomartHttpClient::new(&config).into_diagnostic()?;
    let app = App::new(config, client, interrupt);
    let report = app
        .run(&chromosomes)
        .map_err(|err| miette::Report::new(err))?;

    if cli.json {
        JsonOutput::print_report(&report).into_diagnostic()?;
    } else {
        TextOutput::print_report(&report).into_diagnostic()?;
    }
    Ok(())
}

/// The full canonical list when no restriction is given, otherwise the
/// requested chromosomes validated and reordered canonically. Repeated
/// requests collapse to one fetch.
fn select_chromosomes(requested: &[String]) -> Result<Vec<Chromosome>, HarvestError> {
    let canonical = Chromosome::human_autosomes_and_allosomes();
    if requested.is_empty() {
        return Ok(canonical);
    }
    let mut selected = Vec::new();
    for value in requested {
        selected.push(value.parse::<Chromosome>()?);
    }
    Ok(canonical
        .into_iter()
        .filter(|chromosome| selected.contains(chromosome))
        .collect())
}
