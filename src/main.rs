use std::{error::Error, fs, process::ExitCode};

use log::{LevelFilter, Log, Metadata, Record};
use serde::Serialize;

use pagesim::common::config::DEFAULT_FRAMES;
use pagesim::{
    compare, AccessRecord, FrameMeta, FrameSnapshot, PolicyKind, ReferenceTrace, RunReport,
    Statistics, TickSchedule,
};

const HELP: &str = "\
pagesim - replay a page reference string against replacement policies

USAGE:
  pagesim [OPTIONS]

OPTIONS:
  -p, --policy <list>     fifo, lru, clock, aging, optimal, comma separated, or all [default: all]
  -f, --frames <n>        number of physical frames [default: 3]
  -t, --trace <list>      page numbers separated by commas [default: textbook string]
      --trace-file <path> read page numbers from a file
      --tick <k>          aging tick after every k accesses [default: 4]
      --ticks <list>      aging ticks after these 0-based accesses
      --json <path>       write per-policy statistics as JSON
  -q, --quiet             only print statistics
  -v, --verbose           debug logging on stderr
  -h, --help              print this help
";

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

#[derive(Serialize)]
struct RunSummary<'a> {
    policy: PolicyKind,
    frames: usize,
    stats: &'a Statistics,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }

    let verbose = args.contains(["-v", "--verbose"]);
    let quiet = args.contains(["-q", "--quiet"]);
    log::set_logger(&LOGGER).map_err(|err| err.to_string())?;
    log::set_max_level(if verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Warn
    });

    let policy: String = args
        .opt_value_from_str(["-p", "--policy"])?
        .unwrap_or_else(|| "all".to_string());
    let frames: i64 = args
        .opt_value_from_str(["-f", "--frames"])?
        .unwrap_or(DEFAULT_FRAMES);

    let trace_file: Option<String> = args.opt_value_from_str("--trace-file")?;
    let trace_list: Option<String> = args.opt_value_from_str(["-t", "--trace"])?;
    let trace: ReferenceTrace = match (trace_file, trace_list) {
        (Some(path), _) => fs::read_to_string(path)?.parse()?,
        (None, Some(list)) => list.parse()?,
        (None, None) => ReferenceTrace::canonical(),
    };

    let tick_every: Option<u64> = args.opt_value_from_str("--tick")?;
    let tick_list: Option<String> = args.opt_value_from_str("--ticks")?;
    let ticks = match (tick_list, tick_every) {
        (Some(list), _) => TickSchedule::at(parse_positions(&list)?),
        (None, Some(k)) => TickSchedule::Every(k),
        (None, None) => TickSchedule::Never,
    };

    let json_path: Option<String> = args.opt_value_from_str("--json")?;

    let remaining = args.finish();
    if !remaining.is_empty() {
        return Err(format!("unexpected arguments: {:?}", remaining).into());
    }

    let policies = if policy.eq_ignore_ascii_case("all") {
        PolicyKind::ALL.to_vec()
    } else {
        policy
            .split(',')
            .map(str::parse)
            .collect::<pagesim::Result<Vec<PolicyKind>>>()?
    };

    let reports = compare(&policies, frames, &ticks, &trace)?;
    for report in &reports {
        if !quiet {
            print_run(report);
        }
        print_stats(report);
    }

    if let Some(path) = json_path {
        let summaries: Vec<_> = reports
            .iter()
            .map(|r| RunSummary {
                policy: r.policy,
                frames: r.capacity,
                stats: &r.stats,
            })
            .collect();
        serde_json::to_writer_pretty(fs::File::create(path)?, &summaries)?;
    }

    Ok(())
}

fn parse_positions(list: &str) -> Result<Vec<usize>, std::num::ParseIntError> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

fn print_run(report: &RunReport) {
    println!(
        "Simulating {} with {} frames\n",
        report.policy.name().to_uppercase(),
        report.capacity
    );
    for record in &report.records {
        println!("{}", format_record(record));
    }
    println!();
}

fn format_record(record: &AccessRecord) -> String {
    let frames: Vec<String> = record.frames.iter().map(format_frame).collect();
    let outcome = match record.outcome.evicted() {
        _ if record.outcome.is_hit() => "HIT".to_string(),
        Some(victim) => format!("MISS (remove {})", victim),
        None => "MISS".to_string(),
    };
    let tick = if record.ticked { " | TICK" } else { "" };

    format!(
        "Page {:>3} | Frames [{}] | {}{}",
        record.page,
        frames.join(", "),
        outcome,
        tick
    )
}

fn format_frame(snapshot: &FrameSnapshot) -> String {
    let page = snapshot
        .page
        .map_or_else(|| "-".to_string(), |p| p.to_string());

    match snapshot.meta {
        FrameMeta::Plain => page,
        FrameMeta::Clock { referenced, hand } => format!(
            "{}(R:{}){}",
            page,
            u8::from(referenced),
            if hand { "<-" } else { "" }
        ),
        FrameMeta::Aging { referenced, age } => {
            format!("{}(R:{} Age:{:08b})", page, u8::from(referenced), age)
        }
    }
}

fn print_stats(report: &RunReport) {
    let stats = &report.stats;
    println!(
        "--- Final statistics ({}) ---",
        report.policy.name().to_uppercase()
    );
    println!("Total accesses:  {}", stats.total_accesses());
    println!("Page faults:     {}", stats.faults);
    println!("Hits:            {}", stats.hits);
    println!("Hit ratio:       {:.2}%", stats.hit_ratio() * 100.0);
    println!();
}
