//! LearnBox: quiz performance analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use learnbox::analyzer::{AggregateStats, PerformanceAnalyzer};
use learnbox::config::{
    build_ignore_set, default_config_json, is_ignored, load_config, Config, CONFIG_FILENAME,
};
use learnbox::history::{
    append_run, format_delta, load_history, previous_entry, save_history, topic_deltas,
    HistoryFile,
};
use learnbox::reporter::{ConsoleReporter, JsonReporter};
use learnbox::PerformanceReport;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// LearnBox: quiz performance analyzer and study-plan recommender
#[derive(Parser, Debug)]
#[command(name = "learnbox")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Submission file or directory to analyze (omit when using a subcommand)
    #[arg(required = true)]
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Minimum passing score (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<u8>,

    /// Quiet mode (minimal output)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (expanded study plans)
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .learnboxrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Record this run in .learnbox-history.json and show progress since the last run
    #[arg(long)]
    track: bool,

    /// Analyze submissions in parallel (default for directories with many files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .learnboxrc.json with sensible defaults
    Init {
        /// Minimum passing score (e.g. 70)
        #[arg(long)]
        threshold: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("LEARNBOX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(cmd) = args.command {
        match cmd {
            Commands::Init { threshold, dir } => {
                return run_init(threshold, dir.as_deref());
            }
        }
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("A submission path is required");
    };

    // Resolve work directory for config search and history
    let work_dir = if path.is_file() {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf()
    } else {
        path.clone()
    };

    // Load config (CLI flags override config file)
    let config = load_config(&work_dir, args.config.as_deref())?.merge_with_cli(args.threshold);

    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let files = collect_submission_files(&path, &config, ignore_set.as_ref())?;
    if files.is_empty() {
        eprintln!("{}: No submission files found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let analyzer = PerformanceAnalyzer::new().with_thresholds(config.thresholds.clone());
    let use_parallel = args.parallel || files.len() > 10;
    tracing::info!(files = files.len(), parallel = use_parallel, "analyzing submissions");

    let outcomes = if use_parallel {
        analyzer.analyze_parallel(&files)
    } else {
        analyzer.analyze_many(&files)
    };

    let mut had_errors = false;
    let mut reports = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                had_errors = true;
                eprintln!("{}: {}", "Error".red(), e);
            }
        }
    }

    if reports.is_empty() {
        eprintln!("{}: All submissions failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    let stats = PerformanceAnalyzer::aggregate_stats(&reports);
    let history = args.track.then(|| load_history(&work_dir));

    if args.json {
        let reporter = JsonReporter::new().pretty();
        if reports.len() == 1 {
            println!("{}", reporter.report(&reports[0]));
        } else {
            println!("{}", reporter.report_with_summary(&reports, &stats));
        }
    } else {
        let mut reporter = ConsoleReporter::new().with_thresholds(analyzer.thresholds().clone());
        if args.verbose {
            reporter = reporter.verbose();
        }
        print_reports(
            &reporter,
            &reports,
            &stats,
            history.as_ref().map(|h| (h, work_dir.as_path())),
            args.quiet,
        );
    }

    if let Some(mut history) = history {
        append_run(&mut history, &reports, &work_dir);
        if let Err(e) = save_history(&work_dir, &history) {
            if !args.quiet {
                eprintln!("{}: Failed to save history: {}", "Warning".yellow(), e);
            }
        }
    }

    // Check threshold (config or CLI)
    if let Some(threshold) = config.threshold {
        let score = if reports.len() == 1 {
            reports[0].score.value
        } else {
            stats.average_score.value
        };

        if score < threshold {
            if !args.quiet && !args.json {
                eprintln!(
                    "\n{}: Score {} is below threshold {}",
                    "Failed".red().bold(),
                    score,
                    threshold
                );
            }
            return Ok(ExitCode::from(1));
        }
    }

    if had_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// History is paired with the directory its keys are relative to
fn print_reports(
    reporter: &ConsoleReporter,
    reports: &[PerformanceReport],
    stats: &AggregateStats,
    history: Option<(&HistoryFile, &Path)>,
    quiet: bool,
) {
    if quiet {
        for report in reports {
            let previous = history.and_then(|(h, base)| previous_entry(h, report, base));
            let delta = format_delta(previous.map(|p| p.score), report.score.value);
            println!("{}", reporter.render_quiet(report, &delta));
        }
        return;
    }

    if reports.len() == 1 {
        reporter.report(&reports[0]);
    } else {
        reporter.report_many(reports, stats);
    }

    let Some((history, base)) = history else {
        return;
    };
    for report in reports {
        let Some(previous) = previous_entry(history, report, base) else {
            continue;
        };
        let label = report
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        println!(
            "{}: {}{}",
            "Progress".blue(),
            label,
            format_delta(Some(previous.score), report.score.value)
        );
        for (topic, diff) in topic_deltas(previous, report).iter().take(5) {
            println!("   {} {:+.1}%", topic, diff);
        }
    }
}

fn run_init(threshold: Option<u8>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let json = default_config_json(threshold.unwrap_or(60));
    std::fs::write(&config_path, json).with_context(|| {
        format!("Failed to write config to {}", config_path.display())
    })?;

    eprintln!("{}: Created {}", "Info".blue(), config_path.display());
    Ok(ExitCode::SUCCESS)
}

fn collect_submission_files(
    path: &Path,
    config: &Config,
    ignore_set: Option<&globset::GlobSet>,
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if entry.file_type().is_file() && config.is_submission_file(file_path) {
            if let Some(set) = ignore_set {
                if is_ignored(file_path, set) {
                    continue;
                }
            }
            files.push(file_path.to_path_buf());
        }
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}
