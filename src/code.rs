//! Code State
//!
//! This module contains the mutable state of one code instance during a trial: the
//! Pauli-Z error set, the edge syndrome, and the flip bits the sweep rule accumulates.
//! The cell complex itself lives in a shared read-only [`Lattice`]; every `Code` owns
//! its own deterministic RNG so trials stay reproducible and trivially parallel.

use crate::util::*;
use crate::lattice::*;
use crate::rand_xoshiro::rand_core::SeedableRng;
use crate::derivative::Derivative;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Derivative)]
#[derivative(Debug)]
pub struct Code {
    lattice: Arc<Lattice>,
    /// data error probability
    p: f64,
    /// measurement error probability
    q: f64,
    /// qubits currently carrying a Pauli-Z error
    error: BTreeSet<QubitIndex>,
    #[derivative(Debug = "ignore")]
    syndrome: Vec<u8>,
    #[derivative(Debug = "ignore")]
    flip_bits: Vec<u8>,
    /// qubit pairs flipped together by correlated noise; empty until
    /// [`Code::build_correlated_indices`] runs
    correlated_indices: Vec<(QubitIndex, QubitIndex)>,
    #[derivative(Debug = "ignore")]
    pub(crate) rng: DeterministicRng,
}

impl Code {
    pub fn new(size: usize, lattice_type: LatticeType, p: f64, q: f64, seed: u64)
            -> Result<Self, SweepError> {
        Self::new_with_lattice(Arc::new(Lattice::new(size, lattice_type)), p, q, seed)
    }

    /// share one lattice between many code instances, e.g. across parallel trials
    pub fn new_with_lattice(lattice: Arc<Lattice>, p: f64, q: f64, seed: u64)
            -> Result<Self, SweepError> {
        for probability in [p, q] {
            if !(0. ..=1.).contains(&probability) {
                return Err(SweepError::InvalidProbability(probability));
            }
        }
        let syndrome = vec![0; lattice.syndrome_length];
        let flip_bits = vec![0; lattice.qubit_count];
        Ok(Self {
            lattice,
            p,
            q,
            error: BTreeSet::new(),
            syndrome,
            flip_bits,
            correlated_indices: Vec::new(),
            rng: DeterministicRng::seed_from_u64(seed),
        })
    }

    pub fn lattice(&self) -> &Arc<Lattice> {
        &self.lattice
    }

    pub fn error(&self) -> &BTreeSet<QubitIndex> {
        &self.error
    }

    pub fn syndrome(&self) -> &[u8] {
        &self.syndrome
    }

    pub fn flip_bits(&self) -> &[u8] {
        &self.flip_bits
    }

    pub fn toggle_error(&mut self, qubit_index: QubitIndex) {
        if !self.error.remove(&qubit_index) {
            self.error.insert(qubit_index);
        }
    }

    /// independent Bernoulli(p) flip per qubit; with `correlated`, a second pass flips
    /// both members of each precomputed pair with probability p
    pub fn generate_data_error(&mut self, correlated: bool) {
        for qubit_index in 0..self.lattice.qubit_count as QubitIndex {
            if self.rng.next_f64() < self.p {
                self.toggle_error(qubit_index);
            }
        }
        if correlated {
            for pair_index in 0..self.correlated_indices.len() {
                let (first, second) = self.correlated_indices[pair_index];
                if self.rng.next_f64() < self.p {
                    self.toggle_error(first);
                    self.toggle_error(second);
                }
            }
        }
    }

    /// deterministic pairing of qubits hit together by correlated noise
    pub fn build_correlated_indices(&mut self) {
        self.correlated_indices.clear();
        let qubit_count = self.lattice.qubit_count as QubitIndex;
        let mut qubit_index = 0;
        while qubit_index + 1 < qubit_count {
            self.correlated_indices.push((qubit_index, qubit_index + 1));
            qubit_index += 2;
        }
    }

    pub fn correlated_indices(&self) -> &[(QubitIndex, QubitIndex)] {
        &self.correlated_indices
    }

    /// recompute every syndrome bit from the current error; idempotent
    pub fn calculate_syndrome(&mut self) {
        self.syndrome.fill(0);
        for &qubit_index in self.error.iter() {
            for &edge_index in self.lattice.face_edge_list(qubit_index) {
                self.syndrome[edge_index as usize] ^= 1;
            }
        }
    }

    /// flip each measurement outcome with probability q; on periodic lattices the raw
    /// slot array is flipped wholesale, on bounded ones only the measured edges
    pub fn generate_meas_error(&mut self) {
        if self.lattice.lattice_type.is_periodic() {
            for slot in 0..self.syndrome.len() {
                if self.rng.next_f64() < self.q {
                    self.syndrome[slot] ^= 1;
                }
            }
        } else {
            for index in 0..self.lattice.measured_edge_list().len() {
                let edge_index = self.lattice.measured_edge_list()[index];
                if self.rng.next_f64() < self.q {
                    self.syndrome[edge_index as usize] ^= 1;
                }
            }
        }
    }

    /// toggle the proposed correction on the face joining the four vertices
    pub fn local_flip(&mut self, vertices: &[VertexIndex; 4]) {
        let qubit_index = self.lattice.find_face(vertices)
            .unwrap_or_else(|| panic!("no face joins vertices {vertices:?}"));
        self.flip_bits[qubit_index as usize] ^= 1;
    }

    /// true iff the residual error is a pure stabilizer: clean syndrome and even
    /// overlap with every logical representative
    pub fn check_correction(&mut self) -> bool {
        self.calculate_syndrome();
        if self.syndrome.iter().any(|&bit| bit != 0) {
            return false;  // incomplete correction
        }
        for logical in self.lattice.logical_zs.iter() {
            let overlap = logical.iter().filter(|&qubit_index| self.error.contains(qubit_index)).count();
            if overlap % 2 == 1 {
                return false;
            }
        }
        true
    }

    pub fn syndrome_is_clean(&self) -> bool {
        self.syndrome.iter().all(|&bit| bit == 0)
    }

    // test and debugging support

    pub fn set_error(&mut self, qubits: &[QubitIndex]) {
        self.error.clear();
        self.error.extend(qubits.iter().copied());
    }

    pub fn set_syndrome(&mut self, syndrome: Vec<u8>) {
        assert_eq!(syndrome.len(), self.lattice.syndrome_length);
        self.syndrome = syndrome;
    }

    pub fn clear_syndrome(&mut self) {
        self.syndrome.fill(0);
    }

    pub fn clear_flip_bits(&mut self) {
        self.flip_bits.fill(0);
    }

    pub(crate) fn flip_qubit(&mut self, qubit_index: QubitIndex) {
        self.flip_bits[qubit_index as usize] ^= 1;
    }

    pub(crate) fn fold_flips_into_error(&mut self) {
        for qubit_index in 0..self.flip_bits.len() {
            if self.flip_bits[qubit_index] == 1 {
                self.toggle_error(qubit_index as QubitIndex);
            }
        }
    }
}
