mod remote;

use std::path::{Path, PathBuf};

use canvas::doc::Drawing;
use canvas::persist::{self, ExportError, ImportError};
use canvas::summary::ShapeCounts;
use clap::{Parser, Subcommand};

use crate::remote::{RemoteError, RemoteStore};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid drawing file: {0}")]
    Import(#[from] ImportError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Parser, Debug)]
#[command(name = "drawboard", about = "Save, load, and inspect drawing board files")]
struct Cli {
    #[arg(long, env = "DRAWBOARD_BASE_URL", default_value = "http://127.0.0.1:4000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Upload a drawing file under a username.
    Save {
        #[arg(long)]
        username: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Download the most recent drawing for a username.
    Load {
        #[arg(long)]
        username: String,
        #[arg(long, help = "Output file; defaults to \"{drawingName}.json\"")]
        output: Option<PathBuf>,
    },
    /// Print a drawing file's name and shape counts.
    Inspect {
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let store = RemoteStore::new(cli.base_url);
    match cli.command {
        Command::Ping => {
            store.ping().await?;
            println!("ok");
        }
        Command::Save { username, file } => {
            let drawing = read_drawing(&file)?;
            let id = store.save(&username, &drawing).await?;
            println!("saved {:?} as #{id}", drawing.drawing_name);
        }
        Command::Load { username, output } => {
            let saved = store.load(&username).await?;
            let export = persist::export_drawing(&saved.drawing)?;
            let path = output.unwrap_or_else(|| PathBuf::from(&export.file_name));
            std::fs::write(&path, export.contents).map_err(|source| CliError::Write { path: path.clone(), source })?;
            println!("wrote {} from saved drawing #{}", path.display(), saved.id);
        }
        Command::Inspect { file } => {
            let drawing = read_drawing(&file)?;
            print_summary(&drawing);
        }
    }
    Ok(())
}

fn read_drawing(path: &Path) -> Result<Drawing, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })?;
    Ok(persist::import_drawing(&text)?)
}

fn print_summary(drawing: &Drawing) {
    let counts = ShapeCounts::tally(&drawing.canvas_items);
    println!("{}", drawing.drawing_name);
    for (kind, _, count) in counts.entries() {
        println!("  {:<8} {count}", kind.as_str());
    }
    println!("  {:<8} {}", "total", counts.total());
}
