use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use framefit::{Config, FrameCache, pipeline, validate};

#[derive(Parser, Debug)]
#[command(name = "framefit", version)]
struct Cli {
    /// Frames root directory (overrides FRAMEFIT_FRAMES_DIR and the config file).
    #[arg(long, global = true)]
    frames_dir: Option<PathBuf>,

    /// Extra registry JSON merged over the built-in profiles.
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Frame one screenshot, or every .png in a directory.
    Run(RunArgs),
    /// Check every registry profile against its bezel asset.
    Validate,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Platform key the screenshots belong to (e.g. "ios", "android").
    platform: String,

    /// A screenshot file, or a directory of .png screenshots.
    input: PathBuf,

    /// Destination directory for framed output (default: current directory).
    dest: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.frames_dir, cli.registry)?;
    let registry = config.build_registry()?;

    match cli.cmd {
        Command::Run(args) => cmd_run(args, &config, &registry),
        Command::Validate => cmd_validate(&config, &registry),
    }
}

fn cmd_run(args: RunArgs, config: &Config, registry: &framefit::Registry) -> anyhow::Result<()> {
    if !registry.contains_platform(&args.platform) {
        anyhow::bail!("unknown platform '{}'", args.platform);
    }

    let inputs = pipeline::collect_inputs(&args.input)?;
    if inputs.is_empty() {
        anyhow::bail!("no .png screenshots found in '{}'", args.input.display());
    }

    let dest = args.dest.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dest)
        .with_context(|| format!("create destination dir '{}'", dest.display()))?;

    let mut cache = FrameCache::new(&config.frames_dir);
    let summary = pipeline::run_batch(registry, &mut cache, &args.platform, &inputs, &dest);

    println!("framed {} screenshot(s), skipped {}", summary.framed, summary.skipped);
    Ok(())
}

fn cmd_validate(config: &Config, registry: &framefit::Registry) -> anyhow::Result<()> {
    let reports = validate::validate_registry(registry, &config.frames_dir);
    for report in &reports {
        println!("{report}");
    }

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    println!("checked {} profile(s), {failed} with findings", reports.len());
    Ok(())
}
