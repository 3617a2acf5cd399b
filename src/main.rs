use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use wavelet_occupancy::{Frame, FrameSet, Result, Shell, Symbol};

#[derive(Parser)]
#[command(
    name = "occupancy",
    about = "Symbol rank and band occupancy queries over integer sequences",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (honours RUST_LOG)
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logging
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show the length, value range and first bins of each frame
    Summary {
        /// Sequence files, one frame each
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Count occurrences of SYMBOL in positions 0..=INDEX
    Rank {
        file: PathBuf,
        #[arg(allow_negative_numbers = true)]
        symbol: Symbol,
        index: usize,
    },

    /// Count occurrences of SYMBOL in positions START..=END
    Count {
        file: PathBuf,
        #[arg(allow_negative_numbers = true)]
        symbol: Symbol,
        start: usize,
        end: usize,
    },

    /// Count positions in START..=END whose symbol lies in [LOW, HIGH]
    Region {
        file: PathBuf,
        #[arg(allow_negative_numbers = true)]
        low: Symbol,
        #[arg(allow_negative_numbers = true)]
        high: Symbol,
        start: usize,
        end: usize,
    },

    /// Occupancy fraction of [LOW, HIGH] over each whole frame
    Series {
        #[arg(allow_negative_numbers = true)]
        low: Symbol,
        #[arg(allow_negative_numbers = true)]
        high: Symbol,
        /// Sequence files, one frame each, in time order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Interactive menu, optionally preloading frames
    Shell { files: Vec<PathBuf> },
}

fn init_tracing(cli: &Cli) {
    // --quiet → off, --verbose → RUST_LOG or info, default → warnings only
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Summary { files } => {
            let frames = load_frames(&files)?;
            let summaries = frames.summaries();
            if json {
                return print_json(&summaries);
            }
            println!("Total frames: {}", summaries.len());
            for (index, s) in summaries.iter().enumerate() {
                let preview: Vec<String> = s.preview.iter().map(Symbol::to_string).collect();
                println!(
                    "[{}] {} length={} range=[{}, {}]",
                    index, s.name, s.len, s.min, s.max
                );
                println!("First up to {} bins: {}", s.preview.len(), preview.join(" "));
            }
        }

        Command::Rank {
            file,
            symbol,
            index,
        } => {
            let rank = Frame::load(&file)?.rank(symbol, index)?;
            if json {
                return print_json(&serde_json::json!({
                    "symbol": symbol,
                    "index": index,
                    "rank": rank,
                }));
            }
            println!("rank({symbol}, {index}) = {rank}");
        }

        Command::Count {
            file,
            symbol,
            start,
            end,
        } => {
            let count = Frame::load(&file)?.count_symbol(symbol, start, end)?;
            if json {
                return print_json(&serde_json::json!({
                    "symbol": symbol,
                    "start": start,
                    "end": end,
                    "count": count,
                }));
            }
            println!("Count = {count}");
        }

        Command::Region {
            file,
            low,
            high,
            start,
            end,
        } => {
            let occupancy = Frame::load(&file)?.region_occupancy(low, high, start, end)?;
            if json {
                return print_json(&occupancy);
            }
            println!("Region count = {}", occupancy.count);
            println!("Fraction = {}", occupancy.fraction);
        }

        Command::Series { low, high, files } => {
            let series = load_frames(&files)?.region_series(low, high)?;
            if json {
                return print_json(&series);
            }
            println!("Region time-series:");
            for point in series {
                println!("[{}] {} fraction={}", point.frame, point.name, point.fraction);
            }
        }

        Command::Shell { files } => {
            let mut shell = Shell::new(load_frames(&files)?);
            shell.run(std::io::stdin().lock(), std::io::stdout().lock())?;
        }
    }
    Ok(())
}

fn load_frames(files: &[PathBuf]) -> Result<FrameSet> {
    let mut frames = FrameSet::new();
    for file in files {
        frames.push(Frame::load(file)?);
    }
    Ok(frames)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(std::io::Error::from)?;
    writeln!(stdout)?;
    Ok(())
}
