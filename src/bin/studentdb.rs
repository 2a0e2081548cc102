//! Interactive shell over a studentdb table.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use studentdb::{Command, Config, Interpreter, Outcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "studentdb", about = "In-memory student records indexed by a B-tree")]
struct Cli {
    /// Snapshot file used by OPEN and SAVE without a path
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Load the snapshot file before reading commands
    #[arg(long)]
    open: bool,
}

fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studentdb=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(file) = cli.file {
        config.data_file = file;
    }
    config.open_on_start |= cli.open;

    tracing::debug!(data_file = %config.data_file.display(), "starting");
    let open_on_start = config.open_on_start;
    let mut interpreter = Interpreter::new(config);

    let mut stdout = io::stdout().lock();
    if open_on_start {
        match interpreter.execute(Command::Open(None)) {
            Ok(message) => writeln!(stdout, "{message}")?,
            Err(e) => writeln!(stdout, "Error: {e}")?,
        }
    }

    let interactive = io::stdin().is_terminal();
    if interactive {
        writeln!(stdout, "studentdb. Type HELP for commands, EXIT to quit.")?;
    }

    let mut stdin = io::stdin().lock();
    let mut line = Vec::new();
    loop {
        if interactive {
            write!(stdout, "studentdb> ")?;
            stdout.flush()?;
        }

        line.clear();
        if stdin.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        match interpreter.execute_bytes(&line) {
            Outcome::Continue(message) if message.is_empty() => {}
            Outcome::Continue(message) => writeln!(stdout, "{message}")?,
            Outcome::Exit => break,
        }
    }
    Ok(())
}
