use analogy_eval::{FileReport, Method, Summary, Tally, VectorTable, discover, evaluate_groups};
use anyhow::{Context, bail};
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

/// Command-line arguments parsed by Clap.
#[derive(Parser, Debug)]
#[command(author, version, about = "Word analogy accuracy of a set of word vectors", long_about = None)]
struct Cli {
    /// Set verbosity level
    #[arg(short, long, default_value_t = 2)]
    verbose: i32,

    /// Word vector file: one `<word> <float>...` row per word
    #[arg(long, default_value = "vectors.txt")]
    vectors: PathBuf,

    /// Scoring rule: additive (3CosAdd) or multiplicative (3CosMul)
    #[arg(short, long, default_value_t = Method::Add)]
    method: Method,

    /// Rescale vectors to unit length after loading
    #[arg(long)]
    normalize: bool,

    /// Test files or directories, optionally prefixed with a group name: NAME=PATH
    #[arg(value_name = "TESTS", required = true)]
    tests: Vec<String>,
}

/// Configuration parameters, built from command-line arguments.
#[derive(Debug, Clone)]
struct Config {
    vectors: PathBuf,
    method: Method,
    normalize: bool,
    tests: Vec<String>,
    verbose: i32,
}

fn accuracy(tally: &Tally) -> String {
    match tally.accuracy() {
        Some(acc) => format!("{:4.2}% ({}/{})", 100.0 * acc, tally.correct, tally.total),
        None => "n/a (0/0)".to_string(),
    }
}

fn print_summary(summary: &Summary) {
    for group in &summary.groups {
        println!("\n{}", group.name);
        for file in &group.files {
            println!(
                "File: {} — Accuracy: {}",
                file.path.display(),
                accuracy(&file.tally)
            );
        }
        if group.shows_group_line() {
            println!("{} Total Accuracy: {}", group.name, accuracy(&group.tally));
        }
    }

    println!("\nOVERALL RESULTS:");
    println!("Total Accuracy: {}", accuracy(&summary.overall));
}

fn run(config: &Config) -> anyhow::Result<()> {
    let start = Instant::now();
    if config.verbose > 0 {
        eprintln!("Reading word vectors from {}", config.vectors.display());
    }
    let mut vocab = VectorTable::from_file(&config.vectors)
        .with_context(|| format!("loading vectors from {}", config.vectors.display()))?;
    if config.normalize {
        vocab = vocab.into_normalized();
    }
    if config.verbose > 1 {
        eprintln!("vocab size: {}", vocab.size());
        eprintln!("vector size: {}", vocab.dimension());
        eprintln!("method: {}", config.method);
    }

    let groups = discover(config.tests.as_slice()).context("collecting test files")?;
    if groups.iter().all(|g| g.files.is_empty()) {
        bail!("no test files found in {:?}", config.tests);
    }
    if config.verbose > 2 {
        for g in &groups {
            eprintln!("group {}: {} file(s)", g.name, g.files.len());
        }
    }

    let verbose = config.verbose;
    let on_file = |group: &str, report: &FileReport| {
        if verbose > 1 {
            let time_str = Local::now().format("%x - %I:%M.%S%p");
            eprintln!(
                "{time_str}, {group}: {} {}",
                report.path.display(),
                accuracy(&report.tally)
            );
        }
    };
    let summary = evaluate_groups(&vocab, &groups, config.method, on_file)?;

    print_summary(&summary);
    if config.verbose > 0 {
        eprintln!("Evaluated in {:.2}s", start.elapsed().as_secs_f64());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config {
        vectors: cli.vectors,
        method: cli.method,
        normalize: cli.normalize,
        tests: cli.tests,
        verbose: cli.verbose,
    };

    run(&config)
}
