extern crate cfg_if;
extern crate chrono;
extern crate clap;
extern crate derivative;
extern crate pbr;
#[cfg(test)]
extern crate petgraph;
extern crate rand;
extern crate rand_xoshiro;
extern crate rayon;
extern crate serde;
extern crate serde_json;

pub mod util;
pub mod lattice;
pub mod rhombic_lattice;
pub mod cubic_lattice;
pub mod code;
pub mod sweep;
pub mod runner;

use util::*;
use runner::{TrialParameters, TrialOutcome};

/// decode one trial end to end (to optimize throughput across many trials of the same
/// code, consider sharing a [`lattice::Lattice`] and driving [`code::Code`] directly)
pub fn run_one_trial(parameters: &TrialParameters) -> Result<TrialOutcome, SweepError> {
    runner::run_one_trial(parameters)
}
