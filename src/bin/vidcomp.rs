use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgGroup, Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidcomp::{
    ClipSources, Collaborators, CompareConfig, Dimensions, FfmpegDecoder, FfmpegPreview,
    FfmpegStreamOpts, FrameSelection, JobConfig, LabelFrameInfo, PngScreenshotWriter,
    PrepareOptions, PreviewConfig, ResizeKernel, ResolutionPreset, ScreenshotConfig,
};

#[derive(Parser, Debug)]
#[command(name = "vidcomp", version, about = "Compare a source video against its encodes")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an interleaved preview of the source and its encodes (requires `ffmpeg`).
    Compare(CompareArgs),
    /// Write PNG screenshots of the same frames from every rendition.
    Screenshots(ScreenshotArgs),
    /// Preview the first of the given inputs (requires `ffmpeg`).
    Preview(PreviewArgs),
    /// Run a compare, screenshots or preview job described in a JSON file.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Source (reference) video.
    source: PathBuf,

    /// Encoded videos to compare against the source.
    #[arg(long, num_args = 1.., conflicts_with = "input_directory")]
    encodes: Vec<PathBuf>,

    /// Directory to pick encodes from (mp4, mkv, m2ts, ts).
    #[arg(long)]
    input_directory: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PrepareArgs {
    /// Crop every clip to WIDTH HEIGHT (default: first encode's size).
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    crop: Option<Vec<u32>>,

    /// Titles for the frame info overlay, source first.
    #[arg(long, num_args = 1..)]
    titles: Vec<String>,

    /// Kernel used to resize the source: bilinear, bicubic, point, lanczos, spline16/36/64.
    #[arg(long, default_value_t = ResizeKernel::default())]
    resize_kernel: ResizeKernel,

    /// Do not attach frame info.
    #[arg(long)]
    no_frame_info: bool,
}

#[derive(Args, Debug)]
struct CompareArgs {
    #[command(flatten)]
    sources: SourceArgs,

    #[command(flatten)]
    prepare: PrepareArgs,

    /// Only compare source frames START..=END.
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    frames: Option<Vec<u64>>,

    /// Preview size: 720p, 1080p, 1440p or 2160p.
    #[arg(long, default_value_t = ResolutionPreset::default())]
    preview_resolution: ResolutionPreset,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("selection").required(true).args(["frames", "random_frames"])))]
struct ScreenshotArgs {
    #[command(flatten)]
    sources: SourceArgs,

    #[command(flatten)]
    prepare: PrepareArgs,

    /// Frame numbers to screenshot.
    #[arg(long, num_args = 1..)]
    frames: Vec<u64>,

    /// Pick COUNT random frames between START and STOP.
    #[arg(long, num_args = 3, value_names = ["START", "STOP", "COUNT"])]
    random_frames: Option<Vec<u64>>,

    /// Offset added to source frame numbers.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i64,

    /// Where to write screenshots (default: a new `screens` directory next to the source).
    ///
    /// Tags continue after the letters already used in the directory, so a second run with the
    /// same number of clips writes new files. Later runs can land on tags that are already taken;
    /// the run then stops with an output collision before writing anything.
    #[arg(long)]
    output_directory: Option<PathBuf>,

    /// Seed for --random-frames.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Input videos; the first existing one is previewed.
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Preview size: 720p, 1080p, 1440p or 2160p.
    #[arg(long, default_value_t = ResolutionPreset::default())]
    resolution: ResolutionPreset,

    /// Kernel used to scale to the preview size.
    #[arg(long, default_value_t = ResizeKernel::default())]
    resize_kernel: ResizeKernel,

    /// Output MP4 path.
    #[arg(long, default_value = "preview.mp4")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Job JSON with a `command` field of `compare`, `screenshots` or `preview`.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidcomp=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compare(args) => cmd_compare(args),
        Command::Screenshots(args) => cmd_screenshots(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn collaborators() -> Collaborators<'static> {
    Collaborators {
        decoder: &FfmpegDecoder,
        tonemapper: None,
        frame_info: &LabelFrameInfo,
    }
}

fn cmd_compare(args: CompareArgs) -> anyhow::Result<()> {
    let cfg = CompareConfig {
        clips: args.sources.into(),
        prepare: args.prepare.into_options(),
        frames: args.frames.as_deref().map(|f| (f[0], f[1])),
        preview_resolution: args.preview_resolution,
        out: args.out,
    };
    compare(cfg)
}

fn compare(cfg: CompareConfig) -> anyhow::Result<()> {
    let mut viewer = FfmpegPreview::new(FfmpegStreamOpts::new(&cfg.out))
        .with_kernel(cfg.prepare.resize_kernel);

    let summary = vidcomp::run_compare(&cfg, &collaborators(), &mut viewer)
        .with_context(|| format!("compare '{}'", cfg.clips.source.display()))?;
    eprintln!(
        "wrote {} ({} clips at {})",
        cfg.out.display(),
        summary.titles.len(),
        summary.view
    );
    Ok(())
}

fn cmd_screenshots(args: ScreenshotArgs) -> anyhow::Result<()> {
    let frames = match args.random_frames.as_deref() {
        Some(r) => FrameSelection::Random {
            start: r[0],
            stop: r[1],
            count: r[2],
        },
        None => FrameSelection::Explicit(args.frames),
    };
    let cfg = ScreenshotConfig {
        clips: args.sources.into(),
        prepare: args.prepare.into_options(),
        frames,
        offset: args.offset,
        output_directory: args.output_directory,
        seed: args.seed,
    };
    screenshots(cfg)
}

fn screenshots(cfg: ScreenshotConfig) -> anyhow::Result<()> {
    let summary = vidcomp::run_screenshots(&cfg, &collaborators(), &PngScreenshotWriter)
        .with_context(|| format!("screenshots of '{}'", cfg.clips.source.display()))?;
    eprintln!(
        "wrote {} screenshots to {}",
        summary.written.len(),
        summary.directory.display()
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let cfg = PreviewConfig {
        inputs: args.inputs,
        resolution: args.resolution,
        resize_kernel: args.resize_kernel,
        out: args.out,
    };
    preview(cfg)
}

fn preview(cfg: PreviewConfig) -> anyhow::Result<()> {
    let mut viewer =
        FfmpegPreview::new(FfmpegStreamOpts::new(&cfg.out)).with_kernel(cfg.resize_kernel);

    let view = vidcomp::run_preview(&cfg, &FfmpegDecoder, &mut viewer)?;
    eprintln!("wrote {} at {view}", cfg.out.display());
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let job = JobConfig::from_path(&args.in_path)
        .with_context(|| format!("load job '{}'", args.in_path.display()))?;
    match job {
        JobConfig::Compare(cfg) => compare(cfg),
        JobConfig::Screenshots(cfg) => screenshots(cfg),
        JobConfig::Preview(cfg) => preview(cfg),
    }
}

impl From<SourceArgs> for ClipSources {
    fn from(args: SourceArgs) -> Self {
        Self {
            source: args.source,
            encodes: args.encodes,
            input_directory: args.input_directory,
        }
    }
}

impl PrepareArgs {
    fn into_options(self) -> PrepareOptions {
        PrepareOptions {
            crop: self.crop.as_deref().map(|c| Dimensions::new(c[0], c[1])),
            titles: self.titles,
            resize_kernel: self.resize_kernel,
            frame_info: !self.no_frame_info,
        }
    }
}
