use std::env;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use docrank_core::collector::DocumentCollector;
use docrank_core::config::Config;
use docrank_rank::{Pipeline, RankingReport};

const USAGE: &str = "Usage: docrank <rank [--json] <file>... | rank-dir [--json] [--limit N] <dir>>";

fn usage_exit() -> ! {
    eprintln!("{USAGE}");
    std::process::exit(2)
}

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() { usage_exit(); }
    let cmd = args.remove(0);
    (cmd, args)
}

#[derive(Default)]
struct Options {
    json: bool,
    limit: Option<usize>,
    inputs: Vec<PathBuf>,
}

fn parse_options(args: Vec<String>) -> anyhow::Result<Options> {
    let mut opts = Options::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => opts.json = true,
            "--limit" => {
                let n = iter.next().ok_or_else(|| anyhow::anyhow!("--limit needs a value"))?;
                opts.limit = Some(n.parse().map_err(|e| anyhow::anyhow!("invalid --limit '{}': {}", n, e))?);
            }
            _ => opts.inputs.push(PathBuf::from(arg)),
        }
    }
    Ok(opts)
}

fn progress_bar(len: usize) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%) {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn print_report(report: &RankingReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let (cmd, args) = parse_args();
    let opts = parse_options(args).unwrap_or_else(|e| { eprintln!("{e}"); usage_exit() });

    let paths = match cmd.as_str() {
        "rank" => {
            if opts.inputs.is_empty() || opts.limit.is_some() { usage_exit(); }
            opts.inputs
        }
        "rank-dir" => {
            let [dir] = opts.inputs.as_slice() else { usage_exit() };
            let collector = match opts.limit {
                Some(limit) => DocumentCollector::with_limit(limit),
                None => DocumentCollector::new(),
            };
            collector.collect(dir)?
        }
        _ => { eprintln!("Unknown command: {}", cmd); usage_exit() }
    };
    tracing::info!("{} documents to rank", paths.len());

    let pipeline = Pipeline::from_settings(&settings);
    let pb = progress_bar(paths.len())?;
    let report = tokio::runtime::Runtime::new()?.block_on(pipeline.run_with_progress(paths, |outcome| {
        pb.set_message(outcome.id.display_name().to_string());
        pb.inc(1);
    }));
    pb.finish_and_clear();

    print_report(&report, opts.json)
}
