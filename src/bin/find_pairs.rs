use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use clap::Parser;
use log::{debug, error};
use cooccur::{
    CooccurConfig,
    CooccurrenceRun,
    Error,
    MatchStrategy,
    config::subsystems::parser::parse_delimiter,
    utils::init_logging,
};

/// Find pairs of items that appear together in at least THRESHOLD groups.
///
/// Each line of INPUT is one group of delimiter-separated item names.
/// Matches are written to the output file and printed to stdout.
#[derive(Parser, Debug)]
#[command(name = "find_pairs", version)]
struct Cli {
    /// File with one group per line
    input: PathBuf,

    /// Minimum number of shared groups for a pair (default 50)
    #[arg(short, long, env = "COOCCUR_THRESHOLD")]
    threshold: Option<usize>,

    /// Item separator within a line (default ",")
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Where to write matches (default output.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// INI file with [file], [parser], [matcher] and [processor] sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Compare items on all cores
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel (0 = one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Abort if the run takes longer than this
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Strip whitespace around item names
    #[arg(long)]
    trim: bool,

    /// Show a progress bar on stderr while matching
    #[arg(long)]
    progress: bool,

    /// error, warn, info, debug, trace or none
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Defaults, then the INI file, then flags and environment.
    fn load_config(&self) -> Result<CooccurConfig, Error> {
        let mut config = match &self.config {
            Some(path) => CooccurConfig::from_ini(path)?,
            None => CooccurConfig::default(),
        };

        if let Some(threshold) = self.threshold {
            config.matcher.threshold = threshold;
        }
        if let Some(delimiter) = &self.delimiter {
            config.parser.delimiter = parse_delimiter(delimiter)?;
        }
        if let Some(output) = &self.output {
            config.files.output_path = output.clone();
        }
        if self.parallel {
            config.matcher.strategy = MatchStrategy::Parallel;
        }
        if let Some(threads) = self.threads {
            config.processor.thread_count = threads;
        }
        if let Some(secs) = self.deadline_secs {
            config.processor.deadline_secs = secs;
        }
        if self.trim {
            config.parser.trim_items = true;
        }
        if self.progress {
            config.processor.show_progress = true;
        }
        if let Some(level) = &self.log_level {
            config.processor.log_level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    // Reported time covers argument parsing and config loading too
    let start = Instant::now();
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(config.processor.get_log_level(), config.processor.log_file.as_deref()) {
        eprintln!("Failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }
    let run = match CooccurrenceRun::started_at(config, start) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!("Effective configuration: {:?}", run.config());

    let stdout = io::stdout();
    let mut console = stdout.lock();
    match run.execute(&cli.input, &mut console) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
