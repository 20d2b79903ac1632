use std::{
    cell::RefCell,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    rc::Rc,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use papercast::{
    AnimationElement, ElementMotion, ManualFrames, PresentationScript, RawSection, RepairOpts,
    Timeline, TimelineOpts,
};

#[derive(Parser, Debug)]
#[command(name = "papercast", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the timeline state at a time as JSON.
    State(StateArgs),
    /// Align a raw section's segments with its steps and print them as JSON.
    Repair(RepairArgs),
    /// Sample an element's motion at a step-local progress.
    Sample(SampleArgs),
    /// Play a script in real time, printing each caption change.
    Play(PlayArgs),
    /// Check a script's structural invariants.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct StateArgs {
    /// Input presentation script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Absolute time in seconds.
    #[arg(long, allow_negative_numbers = true)]
    time: f64,
}

#[derive(Parser, Debug)]
struct RepairArgs {
    /// Input raw section JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Speaking rate for duration estimates.
    #[arg(long, default_value_t = 150.0)]
    wpm: f64,

    /// Minimum estimated segment duration, seconds.
    #[arg(long, default_value_t = 2.5)]
    min_secs: f64,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input animation element JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Step-local progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Element index within its step (staggers legacy entrances).
    #[arg(long, default_value_t = 0)]
    index: usize,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input presentation script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Playback speed multiplier.
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Frames per second for the playback loop.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Start offset in seconds.
    #[arg(long, default_value_t = 0.0)]
    from: f64,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input presentation script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::State(args) => cmd_state(args),
        Command::Repair(args) => cmd_repair(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Play(args) => cmd_play(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_script(path: &Path) -> anyhow::Result<PresentationScript> {
    PresentationScript::from_path(path)
        .with_context(|| format!("load script '{}'", path.display()))
}

fn cmd_state(args: StateArgs) -> anyhow::Result<()> {
    let script = load_script(&args.in_path)?;
    let timeline = Timeline::new(script, ManualFrames::new());
    let state = timeline.get_state_at_time(args.time);
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn cmd_repair(args: RepairArgs) -> anyhow::Result<()> {
    let raw = RawSection::from_path(&args.in_path)
        .with_context(|| format!("load raw section '{}'", args.in_path.display()))?;
    let opts = RepairOpts {
        words_per_minute: args.wpm,
        min_segment_secs: args.min_secs,
        ..RepairOpts::default()
    };
    let segments = raw.repaired_segments(&opts);
    println!("{}", serde_json::to_string_pretty(&segments)?);
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let f = File::open(&args.in_path)
        .with_context(|| format!("open element '{}'", args.in_path.display()))?;
    let element: AnimationElement = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse element '{}'", args.in_path.display()))?;

    let motion = match element.motion() {
        ElementMotion::Keyframes(_) => "keyframes",
        ElementMotion::Legacy(_) => "legacy",
        ElementMotion::Static => "static",
    };
    let out = serde_json::json!({
        "motion": motion,
        "state": element.sample(args.index, args.progress),
        "transform3D": element.sample_3d(args.progress),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "--fps must be positive");
    let script = load_script(&args.in_path)?;
    anyhow::ensure!(
        !script.sections.is_empty(),
        "script '{}' has no sections",
        args.in_path.display()
    );

    let frames = ManualFrames::new();
    let mut timeline = Timeline::with_opts(
        script,
        frames.clone(),
        TimelineOpts { speed: args.speed },
    );

    let last_caption: Rc<RefCell<Option<(usize, usize)>>> = Rc::new(RefCell::new(None));
    let seen = Rc::clone(&last_caption);
    let _sub = timeline.subscribe(move |state| {
        let key = (state.section_index, state.segment_index);
        if state.current_text.is_empty() || seen.borrow().as_ref() == Some(&key) {
            return;
        }
        *seen.borrow_mut() = Some(key);
        println!(
            "[{:>7.2}s] {}/{} {}",
            state.global_time, state.section_index, state.segment_index, state.current_text
        );
    });

    timeline.seek(args.from);
    timeline.play();
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(args.fps));
    let start = Instant::now();
    while timeline.is_playing() {
        std::thread::sleep(frame_time);
        let now = start.elapsed().as_secs_f64();
        for id in frames.take_pending() {
            timeline.on_frame(id, now);
        }
    }
    timeline.destroy();
    eprintln!("done at {:.2}s", timeline.current_time());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let script = load_script(&args.in_path)?;
    script
        .validate()
        .with_context(|| format!("validate '{}'", args.in_path.display()))?;
    eprintln!(
        "ok: {} sections, {:.2}s",
        script.sections.len(),
        script.total_duration
    );
    Ok(())
}
