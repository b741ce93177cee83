//! # sudoku-sat
//!
//! Command-line front end for the Sudoku CNF solver. A puzzle file holds
//! one row per line, cells separated by `|` or whitespace, with `0`, `.`
//! or any non-numeric marker meaning "empty".
//!
//! Subcommands:
//! - `solve`: compile one puzzle and solve it, printing the solved grid
//!   and a statistics table (or the raw report with `--json`).
//! - `compare`: run every cardinality encoding on one puzzle and tabulate
//!   variables, clauses and timing side by side.
//! - `batch`: solve every puzzle file found under a directory.

#![warn(clippy::all, clippy::pedantic)]

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use sudoku_sat::sudoku::compiler::CnfCompiler;
use sudoku_sat::sudoku::encoding::EncodingMode;
use sudoku_sat::sudoku::puzzle::Puzzle;
use sudoku_sat::sudoku::solver::{SolveReport, solve};
use walkdir::WalkDir;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(
    name = "sudoku-sat",
    version,
    about = "Solve Sudoku puzzles by compiling them to CNF"
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a single puzzle file.
    Solve {
        /// Path to the puzzle file.
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,

        /// Print the report as JSON instead of the statistics table.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Write the generated CNF next to the puzzle as `<path>.cnf`.
        #[arg(short, long, default_value_t = false)]
        export_dimacs: bool,
    },

    /// Run every encoding mode on one puzzle and tabulate the results.
    Compare {
        /// Path to the puzzle file.
        path: PathBuf,

        /// Block size B for an N = B² grid; inferred from the row count
        /// when omitted.
        #[arg(short, long)]
        block_size: Option<usize>,
    },

    /// Solve every puzzle file found under a directory.
    Batch {
        /// Directory to walk for `.sudoku` and `.txt` files.
        dir: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },
}

#[derive(Args, Debug)]
struct CommonOptions {
    /// Cardinality encoding used for every constraint group.
    #[arg(short, long, value_enum, default_value_t = EncodingMode::Binomial)]
    mode: EncodingMode,

    /// Block size B for an N = B² grid; inferred from the row count when
    /// omitted.
    #[arg(short, long)]
    block_size: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Commands::Solve {
            path,
            common,
            json,
            export_dimacs,
        } => run_solve(&path, &common, json, export_dimacs),
        Commands::Compare { path, block_size } => run_compare(&path, block_size),
        Commands::Batch { dir, common } => run_batch(&dir, &common),
    }
}

fn load_puzzle(path: &Path, block_size: Option<usize>) -> Result<Puzzle> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Puzzle::parse(&text, block_size)
        .with_context(|| format!("invalid puzzle in {}", path.display()))
}

fn run_solve(path: &Path, common: &CommonOptions, json: bool, export_dimacs: bool) -> Result<()> {
    let puzzle = load_puzzle(path, common.block_size)?;

    if export_dimacs {
        let compiled = CnfCompiler::new(puzzle.block_size(), common.mode).compile(&puzzle);
        let dimacs_path = path.with_extension("cnf");
        fs::write(&dimacs_path, compiled.cnf.to_string())
            .with_context(|| format!("unable to write {}", dimacs_path.display()))?;
        println!("DIMACS written to {}", dimacs_path.display());
    }

    let report = solve(&puzzle, common.mode)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{puzzle}");
    if let Some(grid) = &report.result {
        let solved = Puzzle::new(puzzle.block_size(), grid.clone())
            .context("decoded grid failed validation")?;
        println!("Solution:\n{solved}");
    } else {
        println!("UNSATISFIABLE");
    }
    print_stats(&report);
    Ok(())
}

fn run_compare(path: &Path, block_size: Option<usize>) -> Result<()> {
    let puzzle = load_puzzle(path, block_size)?;
    println!("{puzzle}");
    println!(
        "{:<12} {:>6} {:>10} {:>10} {:>10} {:>12}",
        "mode", "sat", "variables", "clauses", "total", "time (ms)"
    );
    for mode in EncodingMode::ALL {
        let report = solve(&puzzle, mode)?;
        println!(
            "{:<12} {:>6} {:>10} {:>10} {:>10} {:>12.3}",
            report.method,
            report.satisfiable,
            report.number_of_variable,
            report.number_of_clause,
            report.number_of_clause_total,
            report.time_in_milliseconds
        );
    }
    Ok(())
}

fn run_batch(dir: &Path, common: &CommonOptions) -> Result<()> {
    let mut satisfiable = 0usize;
    let mut unsatisfiable = 0usize;

    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let known = path
            .extension()
            .is_some_and(|ext| ext == "sudoku" || ext == "txt");
        if !known {
            continue;
        }

        let puzzle = match load_puzzle(path, common.block_size) {
            Ok(puzzle) => puzzle,
            Err(e) => {
                warn!("skipping {}: {e:#}", path.display());
                continue;
            }
        };
        let report = solve(&puzzle, common.mode)?;
        if report.satisfiable {
            satisfiable += 1;
        } else {
            unsatisfiable += 1;
        }
        println!(
            "{:<48} {:>6} {:>12.3} ms",
            path.display(),
            if report.satisfiable { "SAT" } else { "UNSAT" },
            report.time_in_milliseconds
        );
    }

    println!("{satisfiable} satisfiable, {unsatisfiable} unsatisfiable");
    Ok(())
}

fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {:<26} {:>18}  |", label, value);
}

fn print_stats(report: &SolveReport) {
    println!("==================[ Statistics ]===================");
    stat_line("Encoding", report.method);
    stat_line("Satisfiable", report.satisfiable);
    stat_line("Variables", report.number_of_variable);
    stat_line("Clauses (structural)", report.number_of_clause);
    stat_line("Clauses (with clues)", report.number_of_clause_total);
    stat_line(
        "Time (ms)",
        format!("{:.3}", report.time_in_milliseconds),
    );
    println!("===================================================");
}
