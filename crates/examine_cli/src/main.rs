use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;

use examine::{logging, platform, NavConfig, Navigator, QUIT_ERROR, QUIT_OK};
use examine_cli::console::ConsoleHost;
use examine_cli::session::{copy_all, run_commands};

const USAGE: &str = "usage: examine [FILE]...\n\nWith no FILE, or when FILE is -, read standard input.";

fn main() -> ExitCode {
    match run() {
        Ok(code) => exit_code(code),
        Err(error) => {
            eprintln!("examine: {error}");
            exit_code(QUIT_ERROR)
        }
    }
}

fn run() -> io::Result<i32> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{USAGE}");
        return Ok(QUIT_OK);
    }

    let config = NavConfig::from_env().map_err(io::Error::other)?;
    logging::init_tracing(&config)?;
    let abort = platform::AbortFlag::new();
    #[cfg(unix)]
    let _abort_signal = platform::install_abort_signal(&abort)?;

    let interactive = config.interactive;
    let mut nav = Navigator::new(ConsoleHost::new(), config).with_abort_flag(abort);
    for arg in &args {
        nav.register(arg);
    }
    let opened = if args.is_empty() {
        nav.open_stdin()
    } else {
        nav.open_first()
    };
    if let Err(error) = opened {
        tracing::debug!(%error, "nothing to show");
        return Ok(error.exit_code().unwrap_or(QUIT_ERROR));
    }

    let mut stdout = io::stdout().lock();
    if !interactive {
        return copy_all(&mut nav, &mut stdout);
    }
    let mut commands = command_input()?;
    run_commands(&mut nav, &mut commands, &mut stdout)
}

/// Commands come from the terminal even when standard input is being viewed.
fn command_input() -> io::Result<Box<dyn BufRead>> {
    if platform::stdin_is_tty() {
        return Ok(Box::new(io::stdin().lock()));
    }
    Ok(Box::new(BufReader::new(File::open("/dev/tty")?)))
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
