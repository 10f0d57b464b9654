use std::io::IsTerminal;
use std::path::PathBuf;

use argh::FromArgs;
use warper::imgproc::parallel::{CancellationToken, ExecutionStrategy};
use warper::{CommandReader, Interpreter, Pipeline};

#[derive(FromArgs)]
/// Warp an image by rotate, scale, translate and shear commands read from stdin.
///
/// Commands: `r <deg>`, `s <sx> <sy>`, `t <tx> <ty>`, `h <hx> <hy>` and `d` to finish.
struct Args {
    /// path to the input image
    #[argh(positional)]
    input: PathBuf,

    /// path to write the warped image to
    #[argh(positional)]
    output: Option<PathBuf>,

    /// resample on the current thread only
    #[argh(switch)]
    serial: bool,

    /// number of resampling threads, defaults to the global pool
    #[argh(option)]
    threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let strategy = match (args.serial, args.threads) {
        (true, _) => ExecutionStrategy::Serial,
        (false, Some(n)) => ExecutionStrategy::Fixed(n),
        (false, None) => ExecutionStrategy::ParallelRows,
    };

    let cancel = CancellationToken::new();
    let pipeline = Pipeline::new(strategy).with_cancellation(cancel.clone());

    let src = pipeline.ingest(&args.input)?;

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut commands = CommandReader::new(stdin.lock());
    if interactive {
        commands = commands.with_prompt(std::io::stdout());
    }

    let m = Interpreter::new().run(commands, |e| eprintln!("{e}"))?;

    println!("Accumulated Matrix:");
    println!("{m}");

    // from here on Ctrl+C cancels the warp instead of killing the process
    ctrlc::set_handler(move || {
        log::warn!("cancelling the warp");
        cancel.cancel();
    })?;

    let (dst, canvas) = pipeline.transform(&src, &m)?;
    log::info!(
        "canvas x [{}, {}] y [{}, {}]",
        canvas.min.0,
        canvas.max.0,
        canvas.min.1,
        canvas.max.1
    );

    match args.output {
        Some(path) => pipeline.emit(path, &dst)?,
        None => log::info!("no output path given, skipping write"),
    }

    Ok(())
}
