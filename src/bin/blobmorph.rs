use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "blobmorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence.
    Sequence(SequenceArgs),
    /// Extract the radial profile of an SVG silhouette and print it as JSON.
    Profile(ProfileArgs),
}

#[derive(Parser, Debug)]
struct EngineArgs {
    /// Engine config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 640)]
    height: u32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Seconds since the animation started.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Pointer x in `[-1, 1]`.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pointer_x: f64,

    /// Pointer y in `[-1, 1]`.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pointer_y: f64,

    /// Scroll progress in `[0, 1]`.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Seconds to render.
    #[arg(long, default_value_t = 15.0)]
    duration: f64,

    /// Directory receiving `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ProfileArgs {
    /// Silhouette SVG.
    #[arg(long)]
    svg: PathBuf,

    /// Output JSON path. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Profile(args) => cmd_profile(args),
    }
}

fn read_config(path: &Path) -> anyhow::Result<blobmorph::EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let config = blobmorph::EngineConfig::from_json_str(&text)
        .with_context(|| format!("parse config '{}'", path.display()))?;
    Ok(config)
}

fn build_engine(args: &EngineArgs) -> anyhow::Result<blobmorph::MorphEngine> {
    let (config, base_dir) = match &args.config {
        Some(path) => (
            read_config(path)?,
            path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
        ),
        None => (blobmorph::EngineConfig::default(), PathBuf::from(".")),
    };

    let measurer = blobmorph::ArcLengthMeasurer::default();
    let (mut engine, mut builder) =
        blobmorph::MorphEngine::from_config(config, &base_dir, &measurer)?;
    if builder.has_deferred() {
        engine.retry_deferred(&mut builder, &measurer);
    }

    let report = builder.report();
    for skipped in &report.skipped {
        tracing::warn!(silhouette = %skipped.name, reason = %skipped.reason, "silhouette skipped");
    }
    for name in &report.deferred {
        tracing::warn!(silhouette = %name, "silhouette still deferred; rendering without it");
    }
    Ok(engine)
}

fn write_png(path: &Path, frame: &blobmorph::FrameRgba) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let engine = build_engine(&args.engine)?;
    let mut surface = blobmorph::CpuSurface::new(args.engine.width, args.engine.height)?;
    let input = blobmorph::RenderFrameInput {
        pointer_x: args.pointer_x,
        pointer_y: args.pointer_y,
        scroll_progress: args.scroll,
        elapsed: args.time,
    };

    let mut ctx = blobmorph::FrameContext::new();
    engine.render_frame(&mut ctx, &input, &mut surface)?;
    let frame = surface.finish();
    write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }
    if !args.duration.is_finite() || args.duration <= 0.0 {
        anyhow::bail!("--duration must be finite and > 0");
    }

    let engine = build_engine(&args.engine)?;
    let mut surface = blobmorph::CpuSurface::new(args.engine.width, args.engine.height)?;
    let mut ctx = blobmorph::FrameContext::new();
    let frames = (args.duration * f64::from(args.fps)).ceil() as u64;

    for i in 0..frames {
        let input = blobmorph::RenderFrameInput::at(i as f64 / f64::from(args.fps));
        engine.render_frame(&mut ctx, &input, &mut surface)?;
        let frame = surface.finish();
        write_png(&args.out_dir.join(format!("frame_{i:05}.png")), &frame)?;
    }

    eprintln!("wrote {frames} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_profile(args: ProfileArgs) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(&args.svg).with_context(|| format!("read svg '{}'", args.svg.display()))?;
    let name = args
        .svg
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("silhouette");
    let source = blobmorph::SilhouetteSource::from_svg(name, &bytes)?;
    let profile = blobmorph::extract_profile(
        &source,
        &blobmorph::ArcLengthMeasurer::default(),
        blobmorph::ExtractOptions::default(),
    )?;

    let json = serde_json::to_string_pretty(&profile).context("serialize profile")?;
    match args.out {
        Some(out) => {
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
