use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "salary-counter", version)]
struct Cli {
    /// Log filter directive, e.g. `salary_counter=debug`. Falls back to `RUST_LOG`, then `info`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the counter as transparent PNG frames.
    Frames(FramesArgs),
    /// Assemble a directory of PNG frames into a looping GIF.
    Gif(GifArgs),
    /// Build a request from form fields and/or a JSON file, then render and assemble.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Amount accrued over one year.
    #[arg(long, allow_negative_numbers = true)]
    annual_amount: f64,

    /// Animation length in seconds.
    #[arg(long, default_value_t = salary_counter::DEFAULT_DURATION_SECONDS)]
    duration: f64,

    /// Frames per second.
    #[arg(long, default_value_t = salary_counter::DEFAULT_FPS)]
    fps: f64,

    /// Font file used for the counter text.
    #[arg(long, default_value = salary_counter::DEFAULT_FONT_PATH)]
    font: PathBuf,

    /// Directory the PNG frames are written into.
    #[arg(long, default_value = salary_counter::DEFAULT_OUTPUT_DIRECTORY)]
    out_dir: PathBuf,

    /// Print diagnostics about the font (family name + SHA-256 of font bytes).
    #[arg(long)]
    dump_font: bool,
}

#[derive(Parser, Debug)]
struct GifArgs {
    /// Directory holding `*.png` frames.
    #[arg(long, default_value = salary_counter::DEFAULT_OUTPUT_DIRECTORY)]
    frames_dir: PathBuf,

    /// Output GIF path.
    #[arg(long, default_value = salary_counter::DEFAULT_GIF_PATH)]
    out: PathBuf,

    /// Delay between frames in milliseconds.
    #[arg(long, default_value_t = salary_counter::DEFAULT_DELAY_MS)]
    delay_ms: u16,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// JSON request file; form fields given with `--field` override it.
    #[arg(long)]
    request: Option<PathBuf>,

    /// Form field as `key=value` (e.g. `annual_salary=120000`). Repeatable.
    #[arg(long = "field", value_name = "KEY=VALUE")]
    fields: Vec<String>,

    /// Output GIF path.
    #[arg(long, default_value = salary_counter::DEFAULT_GIF_PATH)]
    out: PathBuf,

    /// Delay between frames in milliseconds.
    #[arg(long, default_value_t = salary_counter::DEFAULT_DELAY_MS)]
    delay_ms: u16,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let res = match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Gif(args) => cmd_gif(args),
        Command::Run(args) => cmd_run(args),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let bad_request = err
                .downcast_ref::<salary_counter::CounterError>()
                .is_some_and(|e| e.is_invalid_input());
            if bad_request {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn init_tracing(directive: Option<&str>) {
    let filter = directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    // Fails only if a global subscriber is already installed.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    if args.dump_font {
        dump_font_diagnostics(&args.font)?;
    }

    let request = salary_counter::RenderRequest {
        annual_amount: args.annual_amount,
        duration_seconds: args.duration,
        fps: args.fps,
        font_path: args.font,
        output_directory: args.out_dir,
    };

    let n = salary_counter::render_frames(&request)?;
    println!(
        "saved {n} transparent PNG frames to '{}'",
        request.output_directory.display()
    );
    Ok(())
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let opts = salary_counter::GifOptions::default().with_delay_ms(args.delay_ms);
    let n = salary_counter::assemble_gif(&args.frames_dir, &args.out, opts)?;
    if n == 0 {
        println!(
            "no frames found in '{}'; nothing written",
            args.frames_dir.display()
        );
    } else {
        println!("wrote {} ({n} frames)", args.out.display());
    }
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut request = match &args.request {
        Some(path) => salary_counter::RenderRequest::from_json_file(path)?,
        None => salary_counter::RenderRequest::default(),
    };
    request.apply_key_value_pairs(&args.fields)?;

    let opts = salary_counter::GifOptions::default().with_delay_ms(args.delay_ms);
    match salary_counter::run_pipeline(&request, &args.out, opts)? {
        Some(asset) => println!(
            "wrote {} ({} frames, {} ms/frame)",
            asset.path.display(),
            asset.frame_count,
            asset.per_frame_delay_ms
        ),
        None => println!("duration * fps is below one frame; nothing written"),
    }
    Ok(())
}

fn dump_font_diagnostics(path: &Path) -> anyhow::Result<()> {
    let engine = salary_counter::TextLayoutEngine::from_font_file(path)
        .with_context(|| format!("load font '{}'", path.display()))?;
    eprintln!("font diagnostics:");
    eprintln!("  source:  {}", path.display());
    eprintln!("  family:  {}", engine.family_name());
    eprintln!("  sha256:  {}", sha256_hex(engine.font_bytes()));
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
