//! # Email Refinery CLI
//!
//! Command-line interface for the Email Refinery library
//! (`email_refinery_core`). This binary parses arguments, sets up
//! configuration, loads author rows from a JSON file, runs the
//! classification pipeline, and writes the named output tables — or, in
//! single-email mode, spot-checks one address on standard output.

use email_refinery_core::{
    country_for_domain, extract_name_from_email, is_junk_email, is_name_similar_to_email,
    is_valid_email, process_records, records_from_rows, AuthorRecord, Config, ConfigBuilder,
    Report,
};

// Dependencies specific to the CLI binary
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Cleans, classifies and deduplicates harvested academic contact emails.",
    long_about = "Email Refinery filters junk and placeholder addresses, classifies domains by \
                  country, infers author names from email local parts, and merges everything \
                  into deduplicated contact tables."
)]
struct AppArgs {
    /// Path to the input JSON file containing author rows (file mode).
    #[arg(short, long, default_value = "input.json", env = "EMAIL_REFINERY_INPUT")]
    input: String,

    /// Path to the output JSON file where the report tables will be saved.
    #[arg(
        short,
        long,
        default_value = "report.json",
        env = "EMAIL_REFINERY_OUTPUT"
    )]
    output: String,

    /// A single email address to classify (enables single-email CLI mode).
    #[arg(long, env = "EMAIL_REFINERY_EMAIL")]
    email: Option<String>,

    /// Declared name to check the email against (single-email mode only).
    #[arg(long, env = "EMAIL_REFINERY_NAME", requires = "email")]
    name: Option<String>,

    /// Path to a configuration file (TOML format) to load settings from.
    /// CLI args override file settings.
    #[arg(long, env = "EMAIL_REFINERY_CONFIG")]
    config_file: Option<String>,

    /// Skip the relaxed second-chance extraction pass over blank rows.
    #[arg(long, action = clap::ArgAction::SetTrue, env = "EMAIL_REFINERY_NO_RELAXED_PASS")]
    no_relaxed_pass: bool,

    /// Re-check declared names against local parts before trusting the
    /// upstream similar-email marking.
    #[arg(long, action = clap::ArgAction::SetTrue, env = "EMAIL_REFINERY_VERIFY_SIMILAR")]
    verify_similar_names: bool,

    /// Keep repeated names visible in the clean table instead of masking
    /// them.
    #[arg(long, action = clap::ArgAction::SetTrue, env = "EMAIL_REFINERY_NO_NAME_MASKING")]
    no_name_masking: bool,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Setting up tracing subscriber failed")?;

    tracing::info!(
        "Email Refinery CLI v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let args = AppArgs::parse();
    tracing::debug!("Parsed CLI arguments: {:?}", args);

    let mut config_builder = ConfigBuilder::new();
    if let Some(ref path) = args.config_file {
        config_builder = config_builder.config_file(path);
    }
    if args.no_relaxed_pass {
        config_builder = config_builder.relaxed_second_pass(false);
    }
    if args.verify_similar_names {
        config_builder = config_builder.verify_similar_names(true);
    }
    if args.no_name_masking {
        config_builder = config_builder.mask_repeated_names(false);
    }

    let config = match config_builder.build() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return Err(anyhow::anyhow!("Failed to build configuration: {}", e));
        }
    };
    tracing::debug!("Effective configuration loaded: {:?}", config);

    if let Some(ref email) = args.email {
        process_single_email(&config, email, args.name.as_deref());
        return Ok(());
    }

    process_file_mode(&config, &args)
}

fn process_file_mode(config: &Config, args: &AppArgs) -> Result<()> {
    tracing::info!(
        "Running in File Processing mode. Input: '{}', Output: '{}'",
        args.input,
        args.output
    );
    let start_time = Instant::now();
    let input_path = Path::new(&args.input);
    let output_path = Path::new(&args.output);

    if !input_path.exists() || !input_path.is_file() {
        return Err(anyhow::anyhow!(
            "Input file not found or is not a file: {}",
            args.input
        ));
    }
    if let Some(parent_dir) = output_path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            tracing::debug!("Creating output directory: {}", parent_dir.display());
            std::fs::create_dir_all(parent_dir).with_context(|| {
                format!(
                    "Failed to create output directory '{}'",
                    parent_dir.display()
                )
            })?;
        }
    }

    tracing::info!("Loading author rows from '{}'...", args.input);
    let records = load_records(&args.input)?;
    let total_records = records.len();
    if total_records == 0 {
        tracing::warn!(
            "Input file '{}' is empty or contains no author rows. Saving empty report.",
            args.input
        );
        save_report(&process_records(config, &[]), &args.output)?;
        return Ok(());
    }
    tracing::info!("Loaded {} author rows from input file.", total_records);

    let pb = ProgressBar::new(total_records as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .context("Failed to set progress bar template")?
            .progress_chars("=> "),
    );
    pb.set_message("Classifying authors...");

    let report = process_records(config, &records);

    pb.set_position(total_records as u64);
    pb.finish_with_message(format!("Processed {} authors", total_records));

    tracing::info!("Saving report to '{}'...", args.output);
    save_report(&report, &args.output)?;
    tracing::info!("Report saved successfully.");

    log_summary(&report, total_records, start_time);
    Ok(())
}

fn load_records(file_path: &str) -> Result<Vec<AuthorRecord>> {
    tracing::debug!("Opening input file: {}", file_path);
    let file = File::open(file_path)
        .with_context(|| format!("Failed to open input file '{}'", file_path))?;
    let reader = BufReader::new(file);

    tracing::debug!("Parsing JSON from file: {}", file_path);
    let rows: Vec<serde_json::Value> = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse JSON from '{}'. Ensure it's an array of row objects.",
            file_path
        )
    })?;

    records_from_rows(&rows).with_context(|| format!("Invalid dataset in '{}'", file_path))
}

/// Saves the report tables to the specified JSON file.
/// Uses `serde_json` with pretty printing for human readability.
fn save_report(report: &Report, file_path: &str) -> Result<()> {
    tracing::debug!("Creating output file: {}", file_path);
    let file = File::create(file_path)
        .with_context(|| format!("Failed to create/truncate output file '{}'", file_path))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report)
        .with_context(|| format!("Failed to serialize report to JSON for '{}'", file_path))?;

    Ok(())
}

/// Logs a summary of the run to the console using `tracing::info`.
fn log_summary(report: &Report, total_authors: usize, start_time: Instant) {
    tracing::info!("-------------------- Processing Summary --------------------");
    tracing::info!("Author Rows in Input File   : {}", total_authors);
    for stat in &report.summary {
        tracing::info!("  - {:<25}: {}", stat.metric, stat.count);
    }
    tracing::info!("Total Time Taken            : {:.2?}", start_time.elapsed());
    tracing::info!("----------------------------------------------------------");
}

/// Classifies one address and prints the verdicts to standard output
/// (single-email CLI mode).
fn process_single_email(config: &Config, email: &str, name: Option<&str>) {
    const BLUE: &str = "\x1b[34m";
    const GREEN: &str = "\x1b[32m";
    const YELLOW: &str = "\x1b[33m";
    const RED: &str = "\x1b[31m";
    const RESET: &str = "\x1b[0m";

    println!("\n{BLUE}===== Email Refinery Results ====={RESET}");
    println!("Email:  {}", email);

    if !is_valid_email(config, email) {
        println!("\n{RED}Status: MALFORMED{RESET}");
        println!("Reason: Not shaped like local@domain.tld.");
        println!("{BLUE}=================================={RESET}\n");
        return;
    }
    if is_junk_email(config, email) {
        println!("\n{YELLOW}Status: JUNK{RESET}");
        println!("Reason: Matches a placeholder/scraped-sentence heuristic.");
        println!("{BLUE}=================================={RESET}\n");
        return;
    }

    println!("\n{GREEN}Status: CLEAN{RESET}");
    let domain = email.split_once('@').map(|(_, d)| d).unwrap_or_default();
    println!("Domain:  {}", domain);
    println!("Country: {}", country_for_domain(domain));

    let strict = extract_name_from_email(config, email, false);
    let relaxed = extract_name_from_email(config, email, true);
    match (strict.is_empty(), relaxed.is_empty()) {
        (false, _) => println!("Name:    {GREEN}{}{RESET} (strict extraction)", strict),
        (true, false) => println!("Name:    {YELLOW}{}{RESET} (relaxed extraction)", relaxed),
        (true, true) => println!("Name:    {YELLOW}none extracted{RESET}"),
    }

    if let Some(name) = name {
        if is_name_similar_to_email(config, name, email) {
            println!("Match:   {GREEN}'{}' is embedded in the local part{RESET}", name);
        } else {
            println!("Match:   {YELLOW}'{}' not found in the local part{RESET}", name);
        }
    }
    println!("{BLUE}=================================={RESET}\n");
}
