use crate::rand_xoshiro::rand_core::RngCore;
use serde::{Serialize, Deserialize};

cfg_if::cfg_if! {
    if #[cfg(feature="u32_index")] {
        // use u32 to store indices, for less memory usage
        pub type VertexIndex = u32;  // vertex of the cell complex
        pub type EdgeIndex = u32;  // syndrome slot attached to an edge
        pub type QubitIndex = u32;  // face-qubit of the cell complex
    } else {
        pub type VertexIndex = usize;
        pub type EdgeIndex = usize;
        pub type QubitIndex = usize;
    }
}

/// use Xoshiro256StarStar for deterministic random number generator
pub type DeterministicRng = rand_xoshiro::Xoshiro256StarStar;

pub trait F64Rng {
    fn next_f64(&mut self) -> f64;
}

impl F64Rng for DeterministicRng {
    fn next_f64(&mut self) -> f64 {
        f64::from_bits(0x3FF << 52 | self.next_u64() >> 12) - 1.
    }
}

/// vertex coordinate in the doubled unit cell; `w` distinguishes the two
/// interleaved sublattices of the rhombic tilings (cubic lattices use `w = 0`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cartesian4 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub w: i32,
}

impl Cartesian4 {
    pub fn new(x: i32, y: i32, z: i32, w: i32) -> Self {
        Self { x, y, z, w }
    }
    /// parity of the spatial coordinate sum, selects the sublattice of a vertex
    pub fn parity(&self) -> i32 {
        (self.x + self.y + self.z).rem_euclid(2)
    }
}

impl std::fmt::Display for Cartesian4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

/// fatal configuration errors; invariant violations inside the decoder are
/// programming errors and panic instead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SweepError {
    /// data or measurement error probability outside `[0, 1]`
    InvalidProbability(f64),
    /// unknown lattice variant name
    InvalidLatticeType(String),
    /// direction name outside the octahedral set
    InvalidDirection(String),
    /// direction pair that does not span a face
    InvalidDirections(String),
    /// unknown sweep schedule name
    InvalidSchedule(String),
}

impl std::fmt::Display for SweepError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidProbability(p) => write!(f, "invalid error probability {p}, expect a value in [0, 1]"),
            Self::InvalidLatticeType(name) => write!(f, "invalid lattice type `{name}`"),
            Self::InvalidDirection(name) => write!(f, "invalid direction `{name}`"),
            Self::InvalidDirections(message) => write!(f, "invalid directions: {message}"),
            Self::InvalidSchedule(name) => write!(f, "invalid sweep schedule `{name}`"),
        }
    }
}

impl std::error::Error for SweepError { }
