//! facetline CLI - per-patch outline extraction.
//!
//! Usage: facetline <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `facetline --help` for available commands.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};

use facetline::algo::outline::{self, OutlineOptions};
use facetline::algo::Progress;
use facetline::io;
use facetline::mesh::{WeldStrategy, DEFAULT_WELD_EPSILON};

#[derive(Parser)]
#[command(name = "facetline")]
#[command(author, version, about = "Outline extraction for triangle meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh and outline statistics
    Info {
        /// Input mesh file (STL or PLY)
        input: PathBuf,

        #[command(flatten)]
        params: OutlineArgs,
    },

    /// Extract boundary edges per normal group and write them as OBJ lines
    Outline {
        /// Input mesh file (STL or PLY)
        input: PathBuf,

        /// Output OBJ file
        output: PathBuf,

        #[command(flatten)]
        params: OutlineArgs,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

#[derive(Args)]
struct OutlineArgs {
    /// Welding tolerance per axis
    #[arg(short, long, default_value_t = DEFAULT_WELD_EPSILON)]
    epsilon: f64,

    /// Cosine similarity needed to join a normal group
    #[arg(short, long, default_value = "0.99")]
    threshold: f64,

    /// Only merge bit-identical positions
    #[arg(long)]
    exact_weld: bool,
}

impl OutlineArgs {
    fn options(&self) -> OutlineOptions {
        let strategy = if self.exact_weld {
            WeldStrategy::Exact
        } else {
            WeldStrategy::Grid
        };
        OutlineOptions::default()
            .with_weld_epsilon(self.epsilon)
            .with_weld_strategy(strategy)
            .with_normal_threshold(self.threshold)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input, params } => {
            cmd_info(&input, &params.options())?;
        }

        Commands::Outline {
            input,
            output,
            params,
            sequential,
        } => {
            let options = params.options().with_parallel(!sequential);
            cmd_outline(&input, &output, &options)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let raw_percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Monotonic: never redraw a lower percentage.
        let previous = max_percent.fetch_max(raw_percent, Ordering::Relaxed);
        if raw_percent < previous || (raw_percent == previous && raw_percent != 100) {
            return;
        }

        let bar_width = 30;
        let filled = (raw_percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {:<28}", bar, space, raw_percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_info(input: &PathBuf, options: &OutlineOptions) -> Result<(), Box<dyn std::error::Error>> {
    let soup = io::load(input)?;
    let outline = outline::extract_outline(&soup, options)?;

    println!("File: {}", input.display());
    println!("Vertices (input): {}", outline.vertex_count_before);
    println!("Vertices (welded): {}", outline.vertex_count_after);
    println!("Triangles: {}", outline.triangle_count);
    println!("Normal groups: {}", outline.groups.len());
    println!("Boundary edges: {}", outline.edge_count());

    if let Some(largest) = outline.groups.iter().max_by_key(|g| g.len()) {
        println!(
            "Largest group: {} edges, normal ({:.4}, {:.4}, {:.4})",
            largest.len(),
            largest.normal.x,
            largest.normal.y,
            largest.normal.z
        );
    }

    let closed = outline.groups.iter().filter(|g| g.is_empty()).count();
    if closed > 0 {
        println!("Closed groups (no boundary): {}", closed);
    }

    Ok(())
}

fn cmd_outline(
    input: &PathBuf,
    output: &PathBuf,
    options: &OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let soup = io::load(input)?;

    println!(
        "Loaded: {} vertices, {} triangles",
        soup.num_vertices(),
        soup.num_triangles()
    );

    let mode = if options.parallel { "parallel" } else { "sequential" };
    println!(
        "Extracting outline (epsilon {:e}, threshold {}, {})...",
        options.weld.epsilon, options.normal_threshold, mode
    );

    let progress = create_progress();

    let start = Instant::now();
    let result = outline::extract_outline_with_progress(&soup, options, &progress)?;
    let elapsed = start.elapsed();

    println!(
        "Result: {} welded vertices, {} groups, {} boundary edges",
        result.vertex_count_after,
        result.groups.len(),
        result.edge_count()
    );
    io::obj::save_lines(&result, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}
