use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use opentsg::GeometryResolver as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "opentsg", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every frame of a test card to PNG plus a JSON report.
    Run(RunArgs),
    /// Validate a test card without rendering it.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input test-card JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Maximum number of widget handlers running at once.
    #[arg(long)]
    runners: Option<usize>,

    /// Give up on a widget after its ordering wait sees no progress for this long (milliseconds).
    #[arg(long)]
    queue_deadline_ms: Option<u64>,

    /// Log filter (overrides RUST_LOG), e.g. `info` or `opentsg=debug`.
    #[arg(long)]
    log_level: Option<String>,

    /// Print per-widget handler timings.
    #[arg(long)]
    profile: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input test-card JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_logging(level: Option<&str>) -> anyhow::Result<()> {
    let filter = match level {
        Some(l) => EnvFilter::try_new(l).with_context(|| format!("invalid log level '{l}'"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    init_logging(args.log_level.as_deref())?;

    let mut tsg = opentsg::OpenTsg::from_path(&args.in_path)
        .with_context(|| format!("load test card '{}'", args.in_path.display()))?;

    let mut opts = tsg.opts().clone();
    if let Some(n) = args.runners {
        opts.runner_slots = n.max(1);
    }
    if let Some(ms) = args.queue_deadline_ms {
        opts.queue_deadline = Some(Duration::from_millis(ms));
    }
    tsg = tsg.with_opts(opts);

    let profiler = opentsg::ProfilingMiddleware::new();
    tsg.use_middleware(opentsg::TracingMiddleware);
    if args.profile {
        tsg.use_middleware(profiler.clone());
    }

    let summary = tsg
        .run(&args.out)
        .with_context(|| format!("render into '{}'", args.out.display()))?;

    for f in &summary.frames {
        eprintln!(
            "wrote {} ({} widgets, {} errors)",
            f.output.display(),
            f.outcomes.len(),
            f.error_count
        );
    }

    if args.profile {
        let mut timings = profiler.timings();
        timings.sort_by(|a, b| b.elapsed.cmp(&a.elapsed));
        eprintln!("widget timings:");
        for t in timings {
            eprintln!("  {:>10.3?}  {} ({})", t.elapsed, t.alias, t.widget_type);
        }
    }

    if summary.total_errors > 0 {
        anyhow::bail!("{} widget(s) failed; see report.json", summary.total_errors);
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let card = opentsg::TestCard::from_path(&args.in_path)
        .with_context(|| format!("load test card '{}'", args.in_path.display()))?;
    let registry = opentsg::Registry::with_builtins();
    let c = &card.config().canvas;
    let geometry = opentsg::GridGeometry::new(c.width, c.height, c.grid.rows, c.grid.columns)?;

    let mut problems = 0usize;
    for index in 0..card.frame_count() {
        for w in card.descriptors(index)? {
            if w.widget_type == opentsg::CANVAS_WIDGET_TYPE {
                continue;
            }
            let at = w
                .source
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unknown location".to_string());
            if let Err(e) = geometry
                .resolve_location(&w.location)
                .and_then(|_| geometry.resolve_geometry(&w.location))
            {
                problems += 1;
                eprintln!("{at}: widget '{}' has an invalid location: {e}", w.alias);
            }
            let Some(reg) = registry.get(&w.widget_type) else {
                problems += 1;
                eprintln!("{at}: widget '{}' has unknown type '{}'", w.alias, w.widget_type);
                continue;
            };
            let Some(schema) = reg.schema() else {
                continue;
            };
            match w.parse_props() {
                Ok(props) => {
                    if let Err(errs) = schema.validate(&props) {
                        problems += errs.errors.len();
                        for e in &errs.errors {
                            eprintln!("{at}: widget '{}': {e}", w.alias);
                        }
                    }
                }
                Err(e) => {
                    problems += 1;
                    eprintln!("{at}: widget '{}' has unparsable props: {e}", w.alias);
                }
            }
        }
    }
    if problems > 0 {
        anyhow::bail!("{problems} problem(s) found");
    }
    eprintln!(
        "{}: ok ({} frames)",
        args.in_path.display(),
        card.frame_count()
    );
    Ok(())
}
