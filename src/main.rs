extern crate clap;
extern crate pbr;

use sweep_decoder::lattice::*;
use sweep_decoder::runner::*;
use clap::{Parser, Subcommand};
use pbr::ProgressBar;
use rayon::prelude::*;
use serde_json::json;
use std::sync::Mutex;

#[derive(Parser, Clone)]
#[clap(version = env!("CARGO_PKG_VERSION")
    , about = "Sweep decoder simulation for 3D rhombic and cubic topological codes", long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// estimate the logical failure rate at one parameter point
    Benchmark {
        /// lattice linear size, an even integer >= 4
        #[clap(value_parser)]
        size: usize,
        /// data error probability per qubit per round
        #[clap(value_parser)]
        p: f64,
        /// measurement error probability per edge per round
        #[clap(short = 'q', long, default_value_t = 0.)]
        q: f64,
        /// noisy rounds before readout
        #[clap(short = 'r', long, default_value_t = 0)]
        rounds: usize,
        /// lattice variant
        #[clap(short = 'c', long, default_value_t = format!("rhombic_toric"))]
        lattice_type: String,
        /// sweep schedule
        #[clap(short = 's', long, default_value_t = format!("rotating_XZ"))]
        schedule: String,
        /// sweep a single fixed direction instead of a named schedule
        #[clap(short = 'd', long)]
        direction: Option<String>,
        /// rounds spent on one direction before the schedule advances
        #[clap(long, default_value_t = 1)]
        sweep_limit: usize,
        /// sweeps applied per round
        #[clap(long, default_value_t = 1)]
        sweep_rate: usize,
        /// readout sweep budget
        #[clap(long, default_value_t = 256)]
        timeout: usize,
        /// restrict single-edge flips to extremal vertices
        #[clap(long, action)]
        greedy: bool,
        /// apply correlated two-qubit data errors
        #[clap(long, action)]
        correlated: bool,
        /// the number of trials to run
        #[clap(short = 't', long, default_value_t = 1000)]
        trials: u64,
        /// base RNG seed; trial i runs with seed + i
        #[clap(long, default_value_t = 0)]
        seed: u64,
        /// message on the progress bar
        #[clap(long, default_value_t = format!(""))]
        pb_message: String,
    },
}

impl Cli {
    pub fn run(self) {
        match self.command {
            Commands::Benchmark { size, p, q, rounds, lattice_type, schedule, direction,
                    sweep_limit, sweep_rate, timeout, greedy, correlated, trials, seed,
                    pb_message } => {
                let lattice_type: LatticeType = lattice_type.parse()
                    .unwrap_or_else(|error| panic!("{error}"));
                let schedule: SweepSchedule = match direction {
                    Some(direction) => SweepSchedule::Fixed(direction.parse()
                        .unwrap_or_else(|error| panic!("{error}"))),
                    None => schedule.parse().unwrap_or_else(|error| panic!("{error}")),
                };
                let base_parameters = TrialParameters {
                    size, lattice_type, p, q, rounds, sweep_limit, sweep_rate, schedule,
                    timeout, greedy, correlated, seed,
                };
                // fail early on bad probabilities rather than in every worker
                if let Err(error) = run_one_trial(&TrialParameters { timeout: 0, rounds: 0, ..base_parameters.clone() }) {
                    panic!("{error}");
                }
                let mut pb = ProgressBar::on(std::io::stderr(), trials);
                pb.message(format!("{pb_message} ").as_str());
                let progress = Mutex::new(pb);
                let outcomes: Vec<TrialOutcome> = (0..trials).into_par_iter().map(|trial_index| {
                    let outcome = run_one_trial(&TrialParameters {
                        seed: seed.wrapping_add(trial_index),
                        ..base_parameters.clone()
                    }).expect("parameters already validated");
                    progress.lock().unwrap().inc();
                    outcome
                }).collect();
                progress.lock().unwrap().finish();
                let successes = outcomes.iter().filter(|outcome| outcome.success).count();
                let converged = outcomes.iter().filter(|outcome| outcome.converged).count();
                let record = json!({
                    "parameters": base_parameters,
                    "trials": trials,
                    "successes": successes,
                    "failures": trials as usize - successes,
                    "converged": converged,
                    "success_rate": successes as f64 / trials as f64,
                    "finished_at": chrono::Utc::now().to_rfc3339(),
                });
                println!("{}", serde_json::to_string_pretty(&record).unwrap());
            }
        }
    }
}

fn main() {
    Cli::parse().run();
}
