//! Command-line entry points: decode a single syndrome, or run a batch of
//! noise trials against a catalog code and report a decoding-failure ratio.
//! Grounded in the teacher's `src/cli.rs` (`Args`/`Parser`, verbosity-gated
//! `println!` reporting) and `src/application.rs` (`anyhow::Context`-chained
//! I/O, `write_to_file_or_stdout`).

use std::{fs, time::Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::Rng;
use rayon::prelude::*;

use crate::codes::{self, Code};
use crate::decoder::Decoder;
use crate::growth::GrowthStrategy;
use crate::linalg::row_space_contains;
use crate::random::Seed;
use crate::record::{DecodingFailureRatio, TrialRecord};

#[derive(Parser)]
#[command(author, version, about = "Union-Find decoder for qLDPC codes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a single syndrome against a catalog or file-provided code.
    Decode {
        #[arg(long, default_value = "steane", help = "Catalog code name, or path to a JSON Code file")]
        code: String,
        #[arg(long, help = "JSON-encoded bit array, e.g. [true,false,false]")]
        syndrome: String,
        #[arg(long, value_enum, default_value = "standard")]
        growth: GrowthArg,
        #[arg(short, long, action = clap::ArgAction::Count, help = "Print human-readable output [repeat for more verbose]")]
        verbose: u8,
    },
    /// Run repeated iid-noise trials against a catalog code.
    Trial {
        #[arg(long, default_value = "steane")]
        code: String,
        #[arg(short = 'N', long, help = "Number of trials")]
        number: u64,
        #[arg(short = 'p', long, help = "Physical error rate per qubit")]
        error_rate: f64,
        #[arg(long, value_enum, default_value = "standard")]
        growth: GrowthArg,
        #[arg(long, help = "Output file [default stdout]")]
        output: Option<String>,
        #[arg(long, default_value_t = 1, help = "Number of threads")]
        threads: usize,
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum GrowthArg {
    Standard,
    SmallestFirst,
    RandomFirst,
}

impl From<GrowthArg> for GrowthStrategy {
    fn from(arg: GrowthArg) -> Self {
        match arg {
            GrowthArg::Standard => GrowthStrategy::Standard,
            GrowthArg::SmallestFirst => GrowthStrategy::SmallestFirst,
            GrowthArg::RandomFirst => GrowthStrategy::RandomFirst,
        }
    }
}

fn load_code(name_or_path: &str) -> Result<Code> {
    match name_or_path {
        "steane" => Ok(codes::steane()),
        "surface_distance_3" => Ok(codes::surface_distance_3()),
        path => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading code file {path}"))?;
            serde_json::from_str(&contents).with_context(|| format!("parsing code file {path}"))
        }
    }
}

fn sample_iid_pauli_noise<R: Rng + ?Sized>(n: usize, physical_error_rate: f64, rng: &mut R) -> Vec<bool> {
    (0..n).map(|_| rng.gen_bool(physical_error_rate)).collect()
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Decode { code, syndrome, growth, verbose } => run_decode(&code, &syndrome, growth.into(), verbose),
        Command::Trial { code, number, error_rate, growth, output, threads, verbose } => {
            run_trial(&code, number, error_rate, growth.into(), output, threads, verbose)
        }
    }
}

fn run_decode(code_arg: &str, syndrome_arg: &str, growth: GrowthStrategy, verbose: u8) -> Result<()> {
    let code = load_code(code_arg)?;
    let syndrome: Vec<bool> =
        serde_json::from_str(syndrome_arg).context("parsing --syndrome as a JSON bit array")?;
    let mut decoder = Decoder::new();
    decoder.set_code(code);
    decoder.set_growth(growth);
    let result = decoder.decode(&syndrome)?;
    if verbose >= 1 {
        println!(
            "estimate_indices: {:?}\ndecoding_time: {:.3} ms",
            result.estimate_indices,
            result.decoding_time.as_secs_f64() * 1000.0
        );
    } else {
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_trial(
    code_arg: &str,
    number: u64,
    error_rate: f64,
    growth: GrowthStrategy,
    output: Option<String>,
    threads: usize,
    verbose: u8,
) -> Result<()> {
    let code = load_code(code_arg)?;
    let threads = threads.clamp(1, 1024);
    if verbose >= 1 {
        println!(
            "Starting {} trials on {} (n={}, m={}) at p={}, growth={:?}",
            number,
            code_arg,
            code.n,
            code.m(),
            error_rate,
            growth
        );
    }

    let start = Instant::now();
    let failures: u64 = if threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("building thread pool")?;
        pool.install(|| run_trials_parallel(&code, number, error_rate, growth))
    } else {
        run_trials_sequential(&code, number, error_rate, growth)
    };
    let runtime = start.elapsed();

    let dfr = DecodingFailureRatio::from(failures as usize, number as usize)
        .expect("failure count cannot exceed trial count");
    let record = TrialRecord::new(code_arg.to_string(), error_rate, growth, dfr.clone(), runtime);

    match output {
        Some(path) => fs::write(&path, record.to_string()).with_context(|| format!("writing {path}"))?,
        None => println!("{record}"),
    }
    if verbose >= 1 {
        println!(
            "Failures: {}/{} (ratio {:.6}), runtime {:.3} s",
            dfr.failure_count(),
            dfr.trials(),
            dfr.ratio(),
            runtime.as_secs_f64()
        );
    }
    Ok(())
}

fn run_trials_sequential(code: &Code, number: u64, error_rate: f64, growth: GrowthStrategy) -> u64 {
    let mut decoder = Decoder::new();
    decoder.set_code(code.clone());
    decoder.set_growth(growth);
    let mut rng = Seed::from_entropy().stream();
    (0..number)
        .filter(|_| !trial_succeeds(&mut decoder, code, error_rate, &mut rng))
        .count() as u64
}

fn run_trials_parallel(code: &Code, number: u64, error_rate: f64, growth: GrowthStrategy) -> u64 {
    (0..number)
        .into_par_iter()
        .map_init(
            || {
                let mut decoder = Decoder::new();
                decoder.set_code(code.clone());
                decoder.set_growth(growth);
                (decoder, Seed::from_entropy().stream())
            },
            |(decoder, rng), _| u64::from(!trial_succeeds(decoder, code, error_rate, rng)),
        )
        .sum()
}

fn trial_succeeds<R: Rng + ?Sized>(decoder: &mut Decoder, code: &Code, error_rate: f64, rng: &mut R) -> bool {
    let error = sample_iid_pauli_noise(code.n, error_rate, rng);
    let syndrome: Vec<bool> = code
        .h
        .iter()
        .map(|row| row.iter().zip(error.iter()).filter(|(&h, &e)| h && e).count() % 2 == 1)
        .collect();
    let result = match decoder.decode(&syndrome) {
        Ok(result) => result,
        Err(_) => return false,
    };
    let mut diff = result.estimate;
    for (d, &e) in diff.iter_mut().zip(error.iter()) {
        *d ^= e;
    }
    row_space_contains(&code.h, &diff)
}
