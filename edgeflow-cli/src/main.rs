use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use edgeflow::{EdgeDetectionEngine, EngineOpts, ExecStats, PixelBuffer, Strategy};

const DEFAULT_IMAGE: &str = "Valve_original_(1).PNG";

#[derive(Parser, Debug)]
#[command(name = "edgeflow", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one strategy and write the edge map as a PNG.
    Detect(DetectArgs),
    /// Time every strategy on the same image and check they agree.
    Bench(BenchArgs),
}

#[derive(Parser, Debug)]
struct WorkArgs {
    /// Worker threads for the parallel strategies.
    #[arg(long, default_value_t = 10)]
    workers: usize,

    /// Task-pool tasks per worker.
    #[arg(long, default_value_t = 2)]
    tasks_per_worker: usize,
}

#[derive(Parser, Debug)]
struct DetectArgs {
    /// Input image (decoded and converted to grayscale).
    #[arg(default_value = DEFAULT_IMAGE)]
    image: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// sequential, static-threads or task-pool.
    #[arg(long, default_value_t = Strategy::TaskPool)]
    strategy: Strategy,

    #[command(flatten)]
    work: WorkArgs,
}

#[derive(Parser, Debug)]
struct BenchArgs {
    /// Input image (decoded and converted to grayscale).
    #[arg(default_value = DEFAULT_IMAGE)]
    image: PathBuf,

    #[command(flatten)]
    work: WorkArgs,

    /// Write one `<strategy>.png` per run into this directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(serde::Serialize, Debug)]
struct BenchReport {
    image: String,
    width: usize,
    height: usize,
    runs: Vec<BenchRun>,
}

#[derive(serde::Serialize, Debug)]
struct BenchRun {
    strategy: Strategy,
    millis: f64,
    workers: usize,
    tasks: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Detect(args) => cmd_detect(args),
        Command::Bench(args) => cmd_bench(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_gray(path: &Path) -> anyhow::Result<PixelBuffer> {
    let img = image::open(path).with_context(|| format!("read image '{}'", path.display()))?;
    let buf = PixelBuffer::from_dynamic(&img)?;
    tracing::info!(
        path = %path.display(),
        width = buf.width(),
        height = buf.height(),
        "image loaded"
    );
    Ok(buf)
}

fn engine(work: &WorkArgs) -> anyhow::Result<EdgeDetectionEngine> {
    Ok(EdgeDetectionEngine::new(EngineOpts {
        tasks_per_worker: work.tasks_per_worker,
    })?)
}

fn write_png(path: &Path, buf: PixelBuffer) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let img = buf.into_luma8()?;
    image::save_buffer_with_format(
        path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::L8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_detect(args: DetectArgs) -> anyhow::Result<()> {
    let src = load_gray(&args.image)?;
    let engine = engine(&args.work)?;

    let (edges, stats) = engine.process_image_with_stats(&src, args.strategy, args.work.workers)?;
    tracing::info!(
        strategy = %stats.strategy,
        workers = stats.workers,
        tasks = stats.tasks,
        "detect done"
    );

    write_png(&args.out, edges)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_bench(args: BenchArgs) -> anyhow::Result<()> {
    let src = load_gray(&args.image)?;
    let engine = engine(&args.work)?;

    let mut runs = Vec::with_capacity(Strategy::ALL.len());
    let mut baseline: Option<PixelBuffer> = None;
    for strategy in Strategy::ALL {
        let started = Instant::now();
        let (edges, stats) = engine
            .process_image_with_stats(&src, strategy, args.work.workers)
            .with_context(|| format!("run strategy '{strategy}'"))?;
        let millis = started.elapsed().as_secs_f64() * 1000.0;

        match baseline.as_ref() {
            Some(expected) => anyhow::ensure!(
                *expected == edges,
                "strategy '{strategy}' disagrees with the sequential output"
            ),
            None => baseline = Some(edges.clone()),
        }

        if let Some(dir) = &args.out_dir {
            write_png(&dir.join(format!("{strategy}.png")), edges)?;
        }
        runs.push(bench_run(stats, millis));
    }

    let report = BenchReport {
        image: args.image.display().to_string(),
        width: src.width(),
        height: src.height(),
        runs,
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} ({}x{})", report.image, report.width, report.height);
        for run in &report.runs {
            println!(
                "{:<15} {:>10.3} ms  workers={} tasks={}",
                run.strategy.as_str(),
                run.millis,
                run.workers,
                run.tasks
            );
        }
    }
    Ok(())
}

fn bench_run(stats: ExecStats, millis: f64) -> BenchRun {
    BenchRun {
        strategy: stats.strategy,
        millis,
        workers: stats.workers,
        tasks: stats.tasks,
    }
}
