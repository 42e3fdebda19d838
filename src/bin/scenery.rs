use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use scenery::Widget as _;

#[derive(Parser, Debug)]
#[command(name = "scenery", version)]
struct Cli {
    /// Log verbosity (written to stderr).
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log: LogLevel,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a headless scene and save the last presented frame as PNG.
    Render(RenderArgs),
    /// Print where a virtual screen lands when letterboxed into a window.
    Letterbox(LetterboxArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Scene config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Window width.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Window height.
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Pictures to show, laid out left to right.
    #[arg(long = "image")]
    images: Vec<PathBuf>,

    /// Text drawn below the pictures. Needs `--font`.
    #[arg(long)]
    text: Option<String>,

    /// TrueType/OpenType font for `--text` and the FPS overlay.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font size in pixels.
    #[arg(long, default_value_t = 24.0)]
    font_size: f32,

    /// Output PNG path.
    #[arg(long, default_value = "out.png")]
    out: PathBuf,

    /// Also write every presented frame into this directory.
    #[arg(long)]
    sequence_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LetterboxArgs {
    /// Virtual screen width.
    vw: u32,
    /// Virtual screen height.
    vh: u32,
    /// Window width.
    ww: u32,
    /// Window height.
    wh: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(cli.log))
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Letterbox(args) => cmd_letterbox(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => scenery::SceneConfig::from_path(path)?,
        None => scenery::SceneConfig::default(),
    };
    if args.text.is_some() && args.font.is_none() {
        anyhow::bail!("--text needs --font");
    }

    let mut renderer = scenery::CpuRenderer::new(
        args.width,
        args.height,
        scenery::CpuRendererOpts::default(),
    )?;
    if let Some(dir) = &args.sequence_dir {
        renderer = renderer.with_sink(Box::new(scenery::PngSequenceSink::new(dir, 1)?));
    }

    let mut fonts = scenery::FontCache::new();
    if let Some(path) = &args.font {
        fonts.load("text", path, args.font_size)?;
        fonts.load(&config.fps_font, path, args.font_size * 0.75)?;
    }

    let clock = scenery::ManualClock::new();
    let events = scenery::ScriptedEvents::idle_frames(
        usize::try_from(args.frames.saturating_sub(1)).context("frame count")?,
    );
    let mut scene = scenery::Scene::new(
        renderer,
        Box::new(events),
        Rc::new(clock),
        fonts,
        config,
    );

    let mut widgets: Vec<scenery::WidgetHandle> = Vec::new();
    let mut x = 0;
    let mut row_h = 0;
    for path in &args.images {
        let mut img = scenery::Image::new();
        img.load(scene.renderer_mut(), path)
            .with_context(|| format!("load image '{}'", path.display()))?;
        let size = img.native_size();
        img.base_mut().set_position(scenery::PixelPoint::new(x, 0));
        x += size.w;
        row_h = row_h.max(size.h);
        widgets.push(scenery::share(img));
    }
    if let (Some(text), Some(font)) = (&args.text, scene.fonts().get("text")) {
        let mut label = scenery::Label::with_text(text.clone(), font);
        label
            .base_mut()
            .set_position(scenery::PixelPoint::new(0, row_h));
        widgets.push(scenery::share(label));
    }
    for w in &widgets {
        scene.add(w);
    }

    let stats = scene.start(&mut scenery::DefaultHandler)?;
    tracing::info!(frames = stats.frames, fps = stats.last_fps, "scene finished");

    let renderer = scene.into_renderer();
    let frame = renderer
        .last_frame()
        .context("renderer presented no frame")?;
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    scenery::write_png(&args.out, frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_letterbox(args: LetterboxArgs) -> anyhow::Result<()> {
    let to_px = |v: u32| i32::try_from(v).context("dimension too large");
    let virtual_size = scenery::PixelSize::new(to_px(args.vw)?, to_px(args.vh)?);
    let window = scenery::PixelSize::new(to_px(args.ww)?, to_px(args.wh)?);
    match scenery::letterbox(virtual_size, window) {
        Some(r) => println!("{} {} {} {}", r.x, r.y, r.w, r.h),
        None => println!("none"),
    }
    Ok(())
}
