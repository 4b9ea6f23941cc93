use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use ecaview::avec::{Automaton, Bitmap};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "ecaview",
    about = "Inspect and render windows of elementary cellular automaton histories",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rows of a history
    Inspect {
        /// History file ("-" reads stdin)
        file: PathBuf,
        /// Print per-row details
        #[arg(long)]
        rows: bool,
    },
    /// Render a window of a history
    Render {
        /// History file ("-" reads stdin)
        file: PathBuf,
        /// First column of the window
        #[arg(short, long, allow_negative_numbers = true, default_value_t = -32)]
        x: i64,
        /// First generation of the window
        #[arg(short, long, allow_negative_numbers = true, default_value_t = 0)]
        y: i64,
        /// Columns in the window
        #[arg(short = 'w', long, default_value_t = 64)]
        width: usize,
        /// Generations in the window
        #[arg(short = 'H', long, default_value_t = 32)]
        height: usize,
        /// Read the explicit cells of each row instead of only its edge runs
        #[arg(long)]
        cells: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// `#` for marked cells, `.` for blank ones
    Text,
    /// Binary PBM image
    Pbm,
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();

    if path.to_str() == Some("-") {
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("reading history from stdin")?;
    } else {
        File::open(path)
            .and_then(|mut f| f.read_to_end(&mut bytes))
            .with_context(|| format!("reading history file {:?}", path))?;
    }

    Ok(bytes)
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_inspect(file: PathBuf, show_rows: bool) -> anyhow::Result<()> {
    let bytes = read_input(&file)?;
    let automaton = Automaton::from_slice(&bytes)
        .with_context(|| format!("decoding history {:?}", file))?;

    println!("  rows        : {}", automaton.len());
    println!("  bytes       : {}", bytes.len());

    if let (Some(first), Some(last)) = (automaton.rows().first(), automaton.rows().last()) {
        println!("  first row   : offset {}, {} bytes", first.offset(), first.byte_length());
        println!("  last row    : offset {}, {} bytes", last.offset(), last.byte_length());
    }

    if show_rows {
        println!();
        println!("  {:>6}  {:>12}  {:>8}  head  tail", "row", "offset", "bytes");
        for (i, row) in automaton.rows().iter().enumerate() {
            println!(
                "  {:>6}  {:>12}  {:>8}  {:>4}  {:>4}",
                i,
                row.offset(),
                row.byte_length(),
                row.head(),
                row.tail()
            );
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_render(
    file: PathBuf,
    x: i64,
    y: i64,
    width: usize,
    height: usize,
    cells: bool,
    format: Format,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let bytes = read_input(&file)?;
    let automaton = Automaton::from_slice(&bytes)
        .with_context(|| format!("decoding history {:?}", file))?;

    let bitmap: Bitmap = if cells {
        automaton.render_window(x, y, width, height)
    } else {
        automaton.render(x, y, width, height)
    };

    let mut dst: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating output file {:?}", path))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        Format::Text => write!(dst, "{bitmap}")?,
        Format::Pbm => bitmap.write_pbm(&mut dst)?,
    }
    dst.flush()?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Inspect { file, rows } => run_inspect(file, rows),
        Commands::Render {
            file,
            x,
            y,
            width,
            height,
            cells,
            format,
            output,
        } => run_render(file, x, y, width, height, cells, format, output),
    }
}
