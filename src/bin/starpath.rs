use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "starpath", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default scene JSON to edit by hand.
    Init(InitArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence, stepping the animation at a fixed fps.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct InitArgs {
    /// Output scene JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON; defaults to the built-in scene (12 dots on a
    /// heptagram, speed 0.2, deceleration 1, rotation 10 deg/s).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Simulated time in seconds before the frame is taken.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Integer upscale of the 400x400 logical viewport.
    #[arg(long, default_value_t = 1)]
    scale: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON; defaults to the built-in scene.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Length of the rendered sequence in seconds.
    #[arg(long, default_value_t = 5.0)]
    seconds: f64,

    /// Frames per second of the simulated clock.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Integer upscale of the 400x400 logical viewport.
    #[arg(long, default_value_t = 1)]
    scale: u32,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Init(args) => cmd_init(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_scene_config(path: Option<&Path>) -> anyhow::Result<starpath::SceneConfig> {
    let Some(path) = path else {
        return Ok(starpath::SceneConfig::default());
    };
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let config: starpath::SceneConfig =
        serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(config)
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let config = starpath::SceneConfig::default();
    let json = serde_json::to_string_pretty(&config)?;
    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("write scene '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = read_scene_config(args.in_path.as_deref())?;
    let mut scene = starpath::Scene::new(config)?;
    if args.time > 0.0 {
        scene.tick(args.time);
    }

    let frame = starpath::render_scene(
        &scene,
        &starpath::RenderSettings {
            scale: args.scale,
            ..starpath::RenderSettings::default()
        },
    )?;

    ensure_parent_dir(&args.out)?;
    save_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("fps must be > 0");
    }
    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        anyhow::bail!("seconds must be finite and > 0");
    }

    let config = read_scene_config(args.in_path.as_deref())?;
    let mut scene = starpath::Scene::new(config)?;
    let settings = starpath::RenderSettings {
        scale: args.scale,
        ..starpath::RenderSettings::default()
    };

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let dt = 1.0 / f64::from(args.fps);
    let frame_count = (args.seconds * f64::from(args.fps)).ceil() as u64;
    for i in 0..frame_count {
        let frame = starpath::render_scene(&scene, &settings)?;
        let out = args.out_dir.join(format!("frame_{i:04}.png"));
        save_png(&frame, &out)?;
        scene.tick(dt);
    }

    eprintln!(
        "wrote {frame_count} frames to {}",
        args.out_dir.display()
    );
    Ok(())
}

fn save_png(frame: &starpath::FrameRgba, out: &Path) -> anyhow::Result<()> {
    // The frame is premultiplied; on an opaque background that equals straight
    // RGBA, which is what PNG stores.
    image::save_buffer_with_format(
        out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
