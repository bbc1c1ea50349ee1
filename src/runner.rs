//! Trial Runner
//!
//! Drives one decoding trial: rounds of data and measurement noise interleaved with
//! sweeps under a direction schedule, then a readout phase that iterates sweeps on a
//! noise-free syndrome until it is clean or the sweep budget runs out. Trials are
//! independent; each owns its code instance and RNG, so an outer driver can fan them
//! out across threads freely.

use crate::util::*;
use crate::lattice::*;
use crate::code::Code;
use rand::Rng;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// named direction schedules; the eight-element ones visit every direction once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepSchedule {
    #[serde(rename = "rotating_XZ")]
    RotatingXZ,
    #[serde(rename = "rotating_YZ")]
    RotatingYZ,
    #[serde(rename = "rotating_XY")]
    RotatingXY,
    #[serde(rename = "alternating_XZ")]
    AlternatingXZ,
    #[serde(rename = "alternating_YZ")]
    AlternatingYZ,
    #[serde(rename = "alternating_XY")]
    AlternatingXY,
    #[serde(rename = "random")]
    Random,
    #[serde(rename = "const")]
    Const,
    #[serde(rename = "pm_XYZ")]
    PmXYZ,
    #[serde(rename = "four_directions")]
    FourDirections,
    /// sweep one fixed direction, supplied as a string at the driver boundary
    #[serde(rename = "fixed")]
    Fixed(Direction),
}

impl SweepSchedule {
    /// the schedule's direction cycle; `Random` redraws from [`Direction::ALL`] instead
    pub fn directions(self) -> Vec<Direction> {
        use Direction::*;
        match self {
            Self::RotatingXZ => vec![XYZ, XY, MinusXZ, YZ, XZ, MinusYZ, MinusXYZ, MinusXY],
            Self::AlternatingXZ => vec![XYZ, MinusXZ, MinusYZ, MinusXY, MinusXYZ, XZ, YZ, XY],
            Self::RotatingYZ => vec![XYZ, XY, MinusYZ, XZ, YZ, MinusXZ, MinusXYZ, MinusXY],
            Self::AlternatingYZ => vec![XYZ, MinusYZ, MinusXZ, MinusXY, MinusXYZ, YZ, XZ, XY],
            Self::RotatingXY => vec![XYZ, YZ, MinusXY, XZ, XY, MinusXZ, MinusXYZ, MinusYZ],
            Self::AlternatingXY => vec![XYZ, MinusXY, MinusXZ, MinusYZ, MinusXYZ, XY, XZ, YZ],
            // the random schedule draws uniformly from the canonical eight directions
            Self::Random => Direction::ALL.to_vec(),
            Self::Const => vec![MinusXYZ],
            Self::PmXYZ => vec![MinusXYZ, XYZ],
            Self::FourDirections => vec![XYZ, XY, MinusXZ, YZ],
            Self::Fixed(direction) => vec![direction],
        }
    }

    pub fn is_random(self) -> bool {
        matches!(self, Self::Random)
    }
}

impl FromStr for SweepSchedule {
    type Err = SweepError;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "rotating_XZ" => Ok(Self::RotatingXZ),
            "rotating_YZ" => Ok(Self::RotatingYZ),
            "rotating_XY" => Ok(Self::RotatingXY),
            "alternating_XZ" => Ok(Self::AlternatingXZ),
            "alternating_YZ" => Ok(Self::AlternatingYZ),
            "alternating_XY" => Ok(Self::AlternatingXY),
            "random" => Ok(Self::Random),
            "const" => Ok(Self::Const),
            "pm_XYZ" => Ok(Self::PmXYZ),
            "four_directions" => Ok(Self::FourDirections),
            _ => Err(SweepError::InvalidSchedule(name.to_string())),
        }
    }
}

impl std::fmt::Display for SweepSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::RotatingXZ => "rotating_XZ",
            Self::RotatingYZ => "rotating_YZ",
            Self::RotatingXY => "rotating_XY",
            Self::AlternatingXZ => "alternating_XZ",
            Self::AlternatingYZ => "alternating_YZ",
            Self::AlternatingXY => "alternating_XY",
            Self::Random => "random",
            Self::Const => "const",
            Self::PmXYZ => "pm_XYZ",
            Self::FourDirections => "four_directions",
            Self::Fixed(direction) => return write!(f, "{direction}"),
        };
        write!(f, "{name}")
    }
}

/// everything one trial needs; serializable so drivers can log it next to outcomes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialParameters {
    pub size: usize,
    pub lattice_type: LatticeType,
    /// data error probability per qubit per round
    pub p: f64,
    /// measurement error probability per edge per round
    pub q: f64,
    /// noisy rounds before readout
    pub rounds: usize,
    /// rounds spent on one direction before the schedule advances
    pub sweep_limit: usize,
    /// sweeps applied per round
    pub sweep_rate: usize,
    pub schedule: SweepSchedule,
    /// readout sweep budget; exhausting it scores the trial as unconverged
    pub timeout: usize,
    pub greedy: bool,
    pub correlated: bool,
    pub seed: u64,
}

impl Default for TrialParameters {
    fn default() -> Self {
        Self {
            size: 4,
            lattice_type: LatticeType::RhombicToric,
            p: 0.01,
            q: 0.,
            rounds: 0,
            sweep_limit: 1,
            sweep_rate: 1,
            schedule: SweepSchedule::RotatingXZ,
            timeout: 256,
            greedy: true,
            correlated: false,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// the decoder restored the logical state
    pub success: bool,
    /// the readout loop reached a clean syndrome within its budget
    pub converged: bool,
}

/// run one complete decode trial; see the module documentation for the phases
pub fn run_one_trial(parameters: &TrialParameters) -> Result<TrialOutcome, SweepError> {
    assert!(parameters.sweep_limit >= 1, "sweep_limit must be at least 1");
    assert!(parameters.sweep_rate >= 1, "sweep_rate must be at least 1");
    let mut code = Code::new(parameters.size, parameters.lattice_type, parameters.p,
        parameters.q, parameters.seed)?;
    if parameters.correlated {
        code.build_correlated_indices();
    }
    let directions = parameters.schedule.directions();
    let random_schedule = parameters.schedule.is_random();
    let mut sweep_index = if random_schedule {
        code.rng.gen_range(0..directions.len())
    } else {
        0
    };
    let mut sweep_count = 0;
    for _round in 0..parameters.rounds {
        if sweep_count == parameters.sweep_limit {
            sweep_index = if random_schedule {
                code.rng.gen_range(0..directions.len())
            } else {
                (sweep_index + 1) % directions.len()
            };
            sweep_count = 0;
        }
        code.generate_data_error(parameters.correlated);
        code.calculate_syndrome();
        if parameters.q > 0. {
            code.generate_meas_error();
        }
        for _ in 0..parameters.sweep_rate {
            code.sweep(directions[sweep_index], parameters.greedy);
        }
        sweep_count += 1;
    }
    // data errors stand in for measurement errors at readout
    code.generate_data_error(parameters.correlated);
    code.calculate_syndrome();
    for _attempt in 0..parameters.timeout {
        // the readout phase advances the schedule every `size` sweeps, regardless of
        // sweep_limit, and inherits the counter from the rounds phase
        if sweep_count == parameters.size {
            sweep_index = if random_schedule {
                code.rng.gen_range(0..directions.len())
            } else {
                (sweep_index + 1) % directions.len()
            };
            sweep_count = 0;
        }
        code.sweep(directions[sweep_index], parameters.greedy);
        code.calculate_syndrome();
        if code.syndrome_is_clean() {
            return Ok(TrialOutcome { success: code.check_correction(), converged: true });
        }
        sweep_count += 1;
    }
    Ok(TrialOutcome { success: false, converged: false })
}
