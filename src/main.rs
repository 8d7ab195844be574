use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::info;

use sketchsmell::analysis::sort_by_location;
use sketchsmell::{Config, FileFinder, ReportFormat, Reporter, Severity, SmellAnalyzer};

/// sketchsmell - Design smell detection for Processing sketches
#[derive(Parser, Debug)]
#[command(name = "sketchsmell")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the sketchbook or project directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Rules to run, comma-separated codes or names (e.g. "PS001,long-method")
    #[arg(long)]
    detect: Option<String>,

    /// Statement budget for the long-method rule
    #[arg(long, value_name = "N")]
    max_statements: Option<usize>,

    /// Minimum severity to report (info, warning, error)
    #[arg(long, default_value = "info")]
    min_severity: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable parallel processing for faster analysis (enabled by default)
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Compact,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completions
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose, cli.quiet);

    info!("sketchsmell v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    run_analysis(&config, &cli)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path).into_diagnostic()?
    } else {
        Config::from_default_locations(&cli.path).into_diagnostic()?
    };

    // Override with CLI arguments
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if let Some(detect) = &cli.detect {
        config.rules = detect
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(max) = cli.max_statements {
        config.max_statements = max;
    }

    Ok(config)
}

fn run_analysis(config: &Config, cli: &Cli) -> Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;

    let start_time = Instant::now();

    // Step 1: Discover units
    info!("Discovering files...");
    let finder = FileFinder::new(config);
    let sources = finder.find_units(&cli.path).into_diagnostic()?;

    if sources.is_empty() {
        println!("{}", "No Processing or Java files found.".yellow());
        return Ok(());
    }
    info!("Found {} units to analyze", sources.len());

    // Step 2: Parse and analyze each unit
    let analyzer = SmellAnalyzer::new(config.clone());
    let smells = if cli.parallel {
        if !cli.quiet && matches!(cli.format, OutputFormat::Terminal) {
            println!(
                "{}",
                format!("⚡ Parallel mode: analyzing {} units...", sources.len()).cyan()
            );
        }
        analyzer.analyze(&sources, true).into_diagnostic()?
    } else {
        let pb = ProgressBar::new(sources.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .into_diagnostic()?
                .progress_chars("#>-"),
        );

        let mut smells = Vec::new();
        for source in &sources {
            smells.extend(analyzer.analyze_source(source).into_diagnostic()?);
            pb.inc(1);
        }
        pb.finish_and_clear();
        sort_by_location(&mut smells);
        smells
    };

    // Step 3: Filter by severity
    let min_severity = cli
        .min_severity
        .parse::<Severity>()
        .unwrap_or(Severity::Info);
    let smells: Vec<_> = smells
        .into_iter()
        .filter(|s| s.severity >= min_severity)
        .collect();

    info!("Found {} design smell candidates", smells.len());

    // Step 4: Report results
    let format = match cli.format {
        OutputFormat::Terminal => ReportFormat::Terminal,
        OutputFormat::Compact => ReportFormat::Compact,
        OutputFormat::Json => ReportFormat::Json,
    };
    let mut options = sketchsmell::report::ReportOptions::new();
    options.output_path = cli.output.clone();
    options.base_path = Some(cli.path.clone());

    let reporter = Reporter::with_options(format, options);
    reporter.report(&smells)?;

    // Print timing
    let elapsed = start_time.elapsed();
    if !cli.quiet && matches!(cli.format, OutputFormat::Terminal) {
        println!(
            "{}",
            format!(
                "⏱  Analyzed {} units in {:.2}s",
                sources.len(),
                elapsed.as_secs_f64()
            )
            .dimmed()
        );
    }

    Ok(())
}
