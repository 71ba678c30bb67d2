use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "orrery", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a sequence of frames as numbered PNGs.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Tick count to advance before rendering (0 renders the initial pose).
    #[arg(long, default_value_t = 0)]
    tick: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of ticks to render.
    #[arg(long, default_value_t = 96)]
    ticks: u64,

    /// Output directory for frame_NNNN.png files.
    #[arg(long, default_value = "target/frames")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Host configuration JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font for the hour labels (overrides the config).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Render without hour labels when the font is missing or unreadable.
    #[arg(long)]
    skip_text: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load_config(args: &CommonArgs) -> anyhow::Result<orrery::FaceConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
            let r = BufReader::new(f);
            serde_json::from_reader(r).with_context(|| "parse config JSON")?
        }
        None => orrery::FaceConfig::default(),
    };
    if let Some(font) = &args.font {
        config.font = Some(font.clone());
    }
    if args.skip_text {
        config.glyph_policy = orrery::GlyphPolicy::SkipText;
    }
    config.validate()?;
    Ok(config)
}

fn write_png(path: &Path, frame: &orrery::FrameRgba) -> anyhow::Result<()> {
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
    let config = load_config(&args.common)?;
    let mut app = orrery::FaceApp::new(&config)?;

    app.expose();
    for _ in 0..args.tick {
        app.tick();
    }
    let frame = app.redraw()?.context("exposed surface produced no frame")?;
    write_png(&args.out, &frame)?;
    app.shutdown();

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(&args.common)?;
    let mut app = orrery::FaceApp::new(&config)?;

    let out = args.out.clone();
    let stats = app.run(args.ticks, |i, frame| {
        let path = out.join(format!("frame_{i:04}.png"));
        write_png(&path, &frame).map_err(orrery::OrreryError::from)
    })?;
    app.shutdown();

    eprintln!(
        "wrote {} frames to {}",
        stats.frames,
        args.out.display()
    );
    Ok(())
}
