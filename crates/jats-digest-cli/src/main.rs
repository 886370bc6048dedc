#![allow(
    clippy::needless_pass_by_value,    // clap requires owned strings
    clippy::fn_params_excessive_bools, // CLI commands have many boolean flags
    clippy::unnecessary_wraps,         // consistent Result return for CLI handlers
    clippy::too_many_arguments,        // command handlers take resolved CLI values
)]

//! jats-digest CLI - bounded plain-text digests of JATS articles
//!
//! Reads JATS/NLM XML, extracts title, abstract, authors, body and
//! conclusions, and prints a compact digest or the full prompt handed to a
//! text-generation step.

mod config;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use colored::Colorize;
use config::{Config, CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE};
use jats_digest_backend::JatsDigester;
use jats_digest_core::{
    compose_prompt, Digest, DigestError, EmptySectionPolicy, ExtractionOptions, JsonOptions,
    JsonSerializer,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Path argument meaning "read standard input"
const STDIN_PATH: &str = "-";

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if output should be shown (not quiet)
    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Default `env_logger` filter; `RUST_LOG` overrides it
    const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
enum OutputFormat {
    /// Plain-text digest (default)
    Text,
    /// JSON with per-section content and the rendered text
    Json,
}

impl OutputFormat {
    /// Resolve output format from CLI, config, or default
    fn resolve(cli_value: Option<Self>, config_value: Option<&str>) -> Self {
        if let Some(format) = cli_value {
            return format;
        }

        match config_value.map(str::to_lowercase).as_deref() {
            Some("json") => Self::Json,
            _ => Self::Text,
        }
    }

    const fn extension(self) -> &'static str {
        match self {
            Self::Text => "digest.txt",
            Self::Json => "digest.json",
        }
    }
}

/// Extraction limits shared by every digesting command
#[derive(clap::Args, Debug, Clone, Default)]
struct ExtractionFlags {
    /// Maximum number of authors listed (default: 5)
    #[arg(long, value_name = "N")]
    max_authors: Option<usize>,

    /// Maximum number of body sections summarized (default: 5)
    #[arg(long, value_name = "N")]
    max_body_sections: Option<usize>,

    /// Maximum paragraphs taken from each body section (default: 3)
    #[arg(long, value_name = "N")]
    max_paragraphs: Option<usize>,

    /// Emit a found-but-empty title or abstract as an empty section
    #[arg(long)]
    keep_empty_sections: bool,
}

impl ExtractionFlags {
    /// Apply CLI overrides on top of configured options
    fn apply(&self, mut options: ExtractionOptions) -> ExtractionOptions {
        if let Some(n) = self.max_authors {
            options = options.with_max_authors(n);
        }
        if let Some(n) = self.max_body_sections {
            options = options.with_max_body_sections(n);
        }
        if let Some(n) = self.max_paragraphs {
            options = options.with_max_paragraphs_per_section(n);
        }
        if self.keep_empty_sections {
            options = options.with_empty_sections(EmptySectionPolicy::Keep);
        }
        options
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "jats-digest",
    about = "Condense JATS scientific articles into bounded plain-text digests",
    long_about = "Condense JATS/NLM scientific-article XML into a short plain-text digest.\n\
                  \n\
                  The digest lists the title, abstract, first authors, leading body\n\
                  sections and conclusions, in that order, under `## Name` headings.",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Use this configuration file instead of ~/.jats-digest.toml and ./.jats-digest.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the digest of a JATS article
    #[command(long_about = "Print the digest of a JATS article.\n\
                      \n\
                      Unparseable input is not a failure: the diagnostic text\n\
                      (\"XML parsing error: ...\") is printed in place of the digest.\n\
                      Use --strict to exit with an error instead.\n\
                      \n\
                      Examples:\n\
                        jats-digest digest article.xml\n\
                        jats-digest digest article.xml -f json -o digest.json\n\
                        cat article.xml | jats-digest digest -")]
    Digest {
        /// Input XML file, or - for standard input
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Compact JSON output (no pretty-printing)
        #[arg(long)]
        compact: bool,

        /// Exit with an error when the input cannot be digested
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        extraction: ExtractionFlags,
    },

    /// Digest many articles in parallel
    #[command(long_about = "Digest many articles in parallel.\n\
                      \n\
                      Writes one <stem>.digest.txt (or .digest.json) per input into\n\
                      the output directory.\n\
                      \n\
                      Examples:\n\
                        jats-digest batch papers/*.xml -o digests/\n\
                        jats-digest batch papers/*.xml -o digests/ -j 4 --continue-on-error")]
    Batch {
        /// Input XML files
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "OUTPUT_DIR", required = true)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Compact JSON output (no pretty-printing)
        #[arg(long)]
        compact: bool,

        /// Keep going when an input cannot be read or written
        #[arg(long)]
        continue_on_error: bool,

        /// Number of worker threads (default: number of CPUs)
        #[arg(short = 'j', long, value_name = "N")]
        jobs: Option<usize>,

        #[command(flatten)]
        extraction: ExtractionFlags,
    },

    /// Print the text-generation prompt for an article
    #[command(long_about = "Print the text-generation prompt for an article.\n\
                      \n\
                      The prompt is the instruction prefix, a blank line,\n\
                      \"Summarize this XML:\" and the digest.\n\
                      \n\
                      Examples:\n\
                        jats-digest prompt article.xml --instruction \"Be concise.\"\n\
                        jats-digest prompt article.xml --instruction-file reviewer.txt")]
    Prompt {
        /// Input XML file, or - for standard input
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Instruction prefix text
        #[arg(long, value_name = "TEXT", conflicts_with = "instruction_file")]
        instruction: Option<String>,

        /// Read the instruction prefix from a file
        #[arg(long, value_name = "FILE")]
        instruction_file: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        #[command(flatten)]
        extraction: ExtractionFlags,
    },

    /// Manage configuration settings
    #[command(long_about = "Manage jats-digest configuration files.\n\
                      \n\
                      Configuration files are loaded in this order (later overrides earlier):\n\
                        1. User config: ~/.jats-digest.toml\n\
                        2. Project config: ./.jats-digest.toml\n\
                        3. Command-line arguments\n\
                      \n\
                      Examples:\n\
                        jats-digest config init    # Create .jats-digest.toml with defaults\n\
                        jats-digest config show    # Display current configuration")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(long_about = "Generate shell completion scripts for jats-digest.\n\
                      \n\
                      Examples:\n\
                        jats-digest completions bash > ~/.local/share/bash-completion/completions/jats-digest\n\
                        jats-digest completions zsh > ~/.zfunc/_jats-digest")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Create a new .jats-digest.toml configuration file with sensible defaults
    Init {
        /// Create in user home directory (~/.jats-digest.toml) instead of current directory
        #[arg(long)]
        global: bool,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Display the current effective configuration
    Show {
        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Extract global verbosity settings
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.log_filter()),
    )
    .target(env_logger::Target::Stderr)
    .init();

    match args.command {
        Commands::Digest {
            input,
            output,
            format,
            compact,
            strict,
            extraction,
        } => {
            let config = Config::resolve(args.config.as_deref())?;
            digest_command(
                &input,
                output.as_deref(),
                format,
                compact,
                strict,
                &extraction,
                &config,
                verbosity,
            )
        }

        Commands::Batch {
            inputs,
            output,
            format,
            compact,
            continue_on_error,
            jobs,
            extraction,
        } => {
            let config = Config::resolve(args.config.as_deref())?;
            batch_command(
                inputs,
                &output,
                format,
                compact,
                continue_on_error,
                jobs,
                &extraction,
                &config,
                verbosity,
            )
        }

        Commands::Prompt {
            input,
            instruction,
            instruction_file,
            output,
            extraction,
        } => {
            let config = Config::resolve(args.config.as_deref())?;
            prompt_command(
                &input,
                instruction,
                instruction_file.as_deref(),
                output.as_deref(),
                &extraction,
                &config,
            )
        }

        Commands::Config { action } => config_command(action, args.config.as_deref(), verbosity),

        Commands::Completions { shell } => completion_command(shell),
    }
}

/// Read an input file, or standard input for `-`
fn read_input(input: &Path) -> Result<Vec<u8>> {
    if input.as_os_str() == STDIN_PATH {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .context("Failed to read standard input")?;
        Ok(buffer)
    } else {
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input.display()))
    }
}

/// Write to the output file, or standard output when none is given
fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, format!("{content}\n"))
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{content}").context("Failed to write to stdout")
        }
    }
}

fn serializer(compact: bool) -> JsonSerializer {
    JsonSerializer::with_options(JsonOptions { pretty: !compact })
}

/// Render a digest outcome; extraction diagnostics become the content
fn render_outcome(
    outcome: &std::result::Result<Digest, DigestError>,
    format: OutputFormat,
    compact: bool,
) -> Result<String> {
    let rendered = match (outcome, format) {
        (Ok(digest), OutputFormat::Text) => digest.render(),
        (Ok(digest), OutputFormat::Json) => serializer(compact).serialize_digest(digest)?,
        (Err(err), OutputFormat::Text) => err.to_string(),
        (Err(err), OutputFormat::Json) => {
            serializer(compact).serialize_diagnostic(&err.to_string())?
        }
    };
    Ok(rendered)
}

/// Digest a single article
fn digest_command(
    input: &Path,
    output: Option<&Path>,
    format: Option<OutputFormat>,
    compact: bool,
    strict: bool,
    extraction: &ExtractionFlags,
    config: &Config,
    verbosity: Verbosity,
) -> Result<()> {
    // Resolve final values with precedence: CLI > config > defaults
    let format = OutputFormat::resolve(format, config.output_format());
    let compact = compact || config.compact();
    let options = extraction.apply(config.extraction_options());

    let bytes = read_input(input)?;
    let outcome = JatsDigester::with_options(options).digest_bytes(&bytes);

    if let Err(err) = &outcome {
        if strict {
            eprintln!("{} {}", "Error:".red().bold(), err);
            anyhow::bail!("Failed to digest {}", input.display());
        }
        if verbosity.should_show_output() {
            eprintln!("{} {}", "Warning:".yellow().bold(), err);
        }
    }

    write_output(output, &render_outcome(&outcome, format, compact)?)?;

    if let (Some(path), Ok(digest)) = (output, &outcome) {
        if verbosity.should_show_output() {
            eprintln!(
                "{} Wrote {} sections to {}",
                "Success:".green().bold(),
                digest.len(),
                path.display()
            );
        }
    }

    Ok(())
}

/// Digest many articles into an output directory
fn batch_command(
    inputs: Vec<PathBuf>,
    output_dir: &Path,
    format: Option<OutputFormat>,
    compact: bool,
    continue_on_error: bool,
    jobs: Option<usize>,
    extraction: &ExtractionFlags,
    config: &Config,
    verbosity: Verbosity,
) -> Result<()> {
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    enum FileOutcome {
        Digested(PathBuf),
        Diagnostic(PathBuf, String),
        Failed(PathBuf, String),
        Skipped,
    }

    // Resolve final values with precedence: CLI > config > defaults
    let format = OutputFormat::resolve(format, config.output_format());
    let compact = compact || config.compact();
    let digester = JatsDigester::with_options(extraction.apply(config.extraction_options()));

    // Create output directory if it doesn't exist
    if !output_dir.exists() {
        fs::create_dir_all(output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                output_dir.display()
            )
        })?;
    }

    // Verify output directory is actually a directory
    if !output_dir.is_dir() {
        eprintln!(
            "{} Output path is not a directory: {}",
            "Error:".red().bold(),
            output_dir.display()
        );
        anyhow::bail!("Output path is not a directory: {}", output_dir.display());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()
        .context("Failed to build worker pool")?;

    if verbosity.should_show_output() {
        eprintln!(
            "{} Digesting {} files with {} workers...",
            "Info:".blue().bold(),
            inputs.len().to_string().cyan(),
            pool.current_num_threads().to_string().cyan()
        );
    }

    // Early termination flag for fail-fast behavior
    let should_stop = AtomicBool::new(false);

    let process_file = |input: &PathBuf| -> FileOutcome {
        if !continue_on_error && should_stop.load(Ordering::SeqCst) {
            return FileOutcome::Skipped;
        }

        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let output_path = output_dir.join(format!("{stem}.{}", format.extension()));

        let outcome = digester.digest_file(input);
        if let Err(err) = &outcome {
            if !err.is_diagnostic() {
                should_stop.store(true, Ordering::SeqCst);
                return FileOutcome::Failed(input.clone(), err.to_string());
            }
        }

        let written = render_outcome(&outcome, format, compact).and_then(|content| {
            fs::write(&output_path, format!("{content}\n")).with_context(|| {
                format!("Failed to write output file: {}", output_path.display())
            })
        });

        match (written, outcome) {
            (Err(err), _) => {
                should_stop.store(true, Ordering::SeqCst);
                FileOutcome::Failed(input.clone(), format!("{err:#}"))
            }
            (Ok(()), Ok(_)) => FileOutcome::Digested(output_path),
            (Ok(()), Err(err)) => FileOutcome::Diagnostic(input.clone(), err.to_string()),
        }
    };

    let outcomes: Vec<FileOutcome> = pool.install(|| inputs.par_iter().map(process_file).collect());

    let mut digested = 0;
    let mut diagnostics = 0;
    let mut failed = 0;
    for outcome in &outcomes {
        match outcome {
            FileOutcome::Digested(path) => {
                digested += 1;
                log::debug!("wrote {}", path.display());
            }
            FileOutcome::Diagnostic(path, message) => {
                diagnostics += 1;
                if verbosity.should_show_output() {
                    eprintln!(
                        "{} {}: {}",
                        "Warning:".yellow().bold(),
                        path.display(),
                        message
                    );
                }
            }
            FileOutcome::Failed(path, message) => {
                failed += 1;
                eprintln!("{} {}: {}", "Error:".red().bold(), path.display(), message);
            }
            FileOutcome::Skipped => {}
        }
    }

    if verbosity.should_show_output() {
        eprintln!(
            "{} {} digested, {} with diagnostics, {} failed",
            "Done:".green().bold(),
            digested.to_string().green(),
            diagnostics.to_string().yellow(),
            failed.to_string().red()
        );
    }

    if failed > 0 && !continue_on_error {
        anyhow::bail!("{failed} of {} files failed", inputs.len());
    }

    Ok(())
}

/// Compose the generation prompt for an article
fn prompt_command(
    input: &Path,
    instruction: Option<String>,
    instruction_file: Option<&Path>,
    output: Option<&Path>,
    extraction: &ExtractionFlags,
    config: &Config,
) -> Result<()> {
    let instruction = match (instruction, instruction_file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read instruction file: {}", path.display()))?,
        (None, None) => config.instruction()?.unwrap_or_default(),
    };

    let bytes = read_input(input)?;
    let digest = JatsDigester::with_options(extraction.apply(config.extraction_options()))
        .extract(&bytes);

    write_output(output, &compose_prompt(&instruction, &digest))
}

fn config_command(action: ConfigAction, explicit: Option<&Path>, verbosity: Verbosity) -> Result<()> {
    match action {
        ConfigAction::Init { global, force } => config_init(global, force, verbosity),
        ConfigAction::Show { json } => config_show(explicit, json),
    }
}

/// Create a new configuration file with sensible defaults
fn config_init(global: bool, force: bool, verbosity: Verbosity) -> Result<()> {
    let config_path = if global {
        Config::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
    } else {
        Config::project_config_path()
    };

    if config_path.exists() && !force {
        eprintln!(
            "{} Configuration file already exists: {}",
            "Error:".red().bold(),
            config_path.display()
        );
        eprintln!("{} Use --force to overwrite", "Hint:".cyan().bold());
        anyhow::bail!("{CONFIG_FILE_NAME} already exists");
    }

    fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    if verbosity.should_show_output() {
        println!(
            "{} Created configuration file: {}",
            "Success:".green().bold(),
            config_path.display()
        );
    }

    Ok(())
}

/// Display the current effective configuration
fn config_show(explicit: Option<&Path>, json_output: bool) -> Result<()> {
    let merged = Config::resolve(explicit)?;

    if json_output {
        let json = serde_json::to_string_pretty(&merged)?;
        println!("{json}");
    } else {
        let toml = toml::to_string_pretty(&merged)?;
        println!("{toml}");
    }

    Ok(())
}

fn completion_command(shell: Shell) -> Result<()> {
    let mut cmd = Args::command();
    let bin_name = cmd.get_name().to_string();

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
