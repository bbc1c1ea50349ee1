//! Sweep Engine
//!
//! The cellular-automaton decoding rule. A sweep fixes an "up" direction, visits every
//! vertex once, and proposes face flips from nothing but the syndrome bits on the
//! vertex's up edges. Full vertices also see the edge along the sweep direction itself;
//! half and cubic vertices only see their up edges and flip the faces spanned by pairs
//! of them. All proposals of one pass read the same syndrome snapshot, then fold into
//! the error set at once; recomputing the syndrome is the caller's job.

use crate::util::*;
use crate::lattice::*;
use crate::code::Code;
use rand::Rng;

impl Code {
    /// the up edges (and, at full vertices, the sweep-direction edge) currently
    /// carrying syndrome, reported by their direction labels
    pub fn find_sweep_edges(&self, vertex_index: VertexIndex, direction: Direction) -> Vec<Direction> {
        let stencil = self.lattice().stencil(direction, vertex_index);
        let mut sweep_edges = Vec::new();
        if let Some(edge_index) = stencil.direction_edge {
            if self.syndrome()[edge_index as usize] == 1 {
                sweep_edges.push(direction);
            }
        }
        let up = direction.up_directions();
        for slot in 0..3 {
            if let Some(edge_index) = stencil.up_edges[slot] {
                if self.syndrome()[edge_index as usize] == 1 {
                    sweep_edges.push(up[slot]);
                }
            }
        }
        sweep_edges
    }

    /// true iff the vertex touches syndrome and none of it lies strictly below the
    /// sweep direction
    pub fn check_extremal_vertex(&self, vertex_index: VertexIndex, direction: Direction) -> bool {
        let stencil = self.lattice().stencil(direction, vertex_index);
        let mut any_syndrome = false;
        for &edge_index in self.lattice().vertex_edge_list(vertex_index) {
            if self.syndrome()[edge_index as usize] == 0 {
                continue;
            }
            let above = stencil.direction_edge == Some(edge_index)
                || stencil.up_edges.contains(&Some(edge_index));
            if !above {
                return false;
            }
            any_syndrome = true;
        }
        any_syndrome
    }

    fn propose(&mut self, face: Option<QubitIndex>) {
        if let Some(qubit_index) = face {
            self.flip_qubit(qubit_index);
        }
    }

    /// decoding rule at a full vertex; `sweep_edges` may include the sweep direction
    pub fn sweep_full_vertex(&mut self, vertex_index: VertexIndex, sweep_edges: &[Direction],
            direction: Direction) {
        let stencil = *self.lattice().stencil(direction, vertex_index);
        let up = direction.up_directions();
        let has_direction = sweep_edges.contains(&direction);
        let set_slots: Vec<usize> = (0..3).filter(|&slot| sweep_edges.contains(&up[slot])).collect();
        match (has_direction, set_slots.len()) {
            // a lone syndrome bit on the sweep-direction edge points at no face
            (true, 0) | (false, 0) => { }
            // the face between the sweep edge and the one syndrome up edge
            (true, 1) | (false, 1) => self.propose(stencil.direction_faces[set_slots[0]]),
            // two syndrome up edges leave both of their faces in doubt: with the sweep
            // edge set, one of the two is a measurement artefact, pick at random;
            // without it, flip both
            (true, 2) => {
                let pick = self.rng.gen_range(0..2);
                self.propose(stencil.direction_faces[set_slots[pick]]);
            }
            (false, 2) => {
                self.propose(stencil.direction_faces[set_slots[0]]);
                self.propose(stencil.direction_faces[set_slots[1]]);
            }
            // all three up edges without the sweep edge: drop one at random
            (false, 3) => {
                let drop = self.rng.gen_range(0..3);
                for slot in 0..3 {
                    if slot != drop {
                        self.propose(stencil.direction_faces[slot]);
                    }
                }
            }
            // the full local cross flips every face above the vertex
            (true, 3) => {
                for slot in 0..3 {
                    self.propose(stencil.direction_faces[slot]);
                }
            }
            _ => unreachable!("at most three up slots"),
        }
    }

    /// decoding rule at a half or cubic vertex; only up edges ever appear here
    pub fn sweep_half_vertex(&mut self, vertex_index: VertexIndex, sweep_edges: &[Direction],
            direction: Direction) {
        let stencil = *self.lattice().stencil(direction, vertex_index);
        let up = direction.up_directions();
        let set_slots: Vec<usize> = (0..3).filter(|&slot| sweep_edges.contains(&up[slot])).collect();
        match set_slots.len() {
            0 => { }
            // a single syndrome up edge sits on two candidate faces; peek at the far
            // endpoint of that edge to decide which one continues the error
            1 => {
                let slot = set_slots[0];
                let others: Vec<usize> = (0..3).filter(|&other| other != slot).collect();
                let mut picked = None;
                for &other in others.iter() {
                    if let Some(probe) = stencil.probe_edges[slot][other] {
                        if self.syndrome()[probe as usize] == 1 {
                            picked = Some(other);
                            break;
                        }
                    }
                }
                let other = picked.unwrap_or(others[0]);
                self.propose(stencil.pair_faces[pair_slot(slot, other)]);
            }
            // two syndrome up edges single out the face they span
            2 => self.propose(stencil.pair_faces[pair_slot(set_slots[0], set_slots[1])]),
            // all three: a likely measurement error, resolve one face at random
            3 => {
                let pick = self.rng.gen_range(0..3);
                self.propose(stencil.pair_faces[pick]);
            }
            _ => unreachable!("at most three up slots"),
        }
    }

    /// one full pass over the lattice; in greedy mode single-edge proposals fire only
    /// at extremal vertices
    pub fn sweep(&mut self, direction: Direction, greedy: bool) {
        self.clear_flip_bits();
        let vertex_count = self.lattice().vertex_count;
        for vertex_index in 0..vertex_count as VertexIndex {
            let kind = self.lattice().vertex_kind(vertex_index);
            if kind == VertexKind::Isolated {
                continue;
            }
            let sweep_edges = self.find_sweep_edges(vertex_index, direction);
            if sweep_edges.is_empty() {
                continue;
            }
            if greedy && sweep_edges.len() == 1 && !self.check_extremal_vertex(vertex_index, direction) {
                continue;
            }
            match kind {
                VertexKind::Full => self.sweep_full_vertex(vertex_index, &sweep_edges, direction),
                _ => self.sweep_half_vertex(vertex_index, &sweep_edges, direction),
            }
        }
        self.fold_flips_into_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(size: usize, lattice_type: LatticeType) -> Code {
        Code::new(size, lattice_type, 0.1, 0.1, 0).unwrap()
    }

    fn assert_sweep_edges(code: &Code, vertex_index: VertexIndex, direction: Direction,
            expected: &[Direction]) {
        let sweep_edges = code.find_sweep_edges(vertex_index, direction);
        assert_eq!(sweep_edges.len(), expected.len(),
            "vertex {vertex_index} direction {direction}: got {sweep_edges:?}");
        for direction in expected {
            assert!(sweep_edges.contains(direction),
                "vertex {vertex_index}: {direction} missing from {sweep_edges:?}");
        }
    }

    fn assert_only_flips(code: &Code, expected: &[QubitIndex]) {
        for (qubit_index, &bit) in code.flip_bits().iter().enumerate() {
            if expected.contains(&(qubit_index as QubitIndex)) {
                assert_eq!(bit, 1, "qubit {qubit_index} must be flipped");
            } else {
                assert_eq!(bit, 0, "qubit {qubit_index} must not be flipped");
            }
        }
    }

    #[test]
    fn sweep_find_sweep_edges_one_error() {  // cargo test sweep_find_sweep_edges_one_error -- --nocapture
        use Direction::*;
        let mut code = code(4, LatticeType::RhombicToric);
        code.set_error(&[120]);
        code.calculate_syndrome();
        // full vertex
        assert_sweep_edges(&code, 40, XYZ, &[XYZ, YZ]);
        assert_sweep_edges(&code, 40, YZ, &[XYZ, YZ]);
        assert_sweep_edges(&code, 40, XZ, &[XYZ]);
        assert_sweep_edges(&code, 40, XY, &[XYZ]);
        assert_sweep_edges(&code, 40, MinusXY, &[YZ]);
        assert_sweep_edges(&code, 40, MinusXZ, &[YZ]);
        assert_sweep_edges(&code, 40, MinusXYZ, &[]);
        assert_sweep_edges(&code, 40, MinusYZ, &[]);
        // half vertex on the anchor sublattice
        assert_sweep_edges(&code, 104, XYZ, &[YZ]);
        assert_sweep_edges(&code, 104, YZ, &[]);
        assert_sweep_edges(&code, 104, XZ, &[]);
        assert_sweep_edges(&code, 104, XY, &[]);
        assert_sweep_edges(&code, 104, MinusXY, &[MinusXYZ, YZ]);
        assert_sweep_edges(&code, 104, MinusXZ, &[MinusXYZ, YZ]);
        assert_sweep_edges(&code, 104, MinusXYZ, &[]);
        assert_sweep_edges(&code, 104, MinusYZ, &[MinusXYZ]);
        // half vertex on the opposite sublattice
        assert_sweep_edges(&code, 107, XYZ, &[]);
        assert_sweep_edges(&code, 107, YZ, &[XYZ]);
        assert_sweep_edges(&code, 107, XZ, &[XYZ, MinusYZ]);
        assert_sweep_edges(&code, 107, XY, &[XYZ, MinusYZ]);
        assert_sweep_edges(&code, 107, MinusXY, &[]);
        assert_sweep_edges(&code, 107, MinusXZ, &[]);
        assert_sweep_edges(&code, 107, MinusXYZ, &[MinusYZ]);
        assert_sweep_edges(&code, 107, MinusYZ, &[]);
    }

    #[test]
    fn sweep_extremal_vertices_one_error() {  // cargo test sweep_extremal_vertices_one_error -- --nocapture
        use Direction::*;
        let mut code = code(4, LatticeType::RhombicToric);
        code.set_error(&[0]);
        code.calculate_syndrome();
        // one extremal vertex per direction
        let expected: [(Direction, VertexIndex); 8] = [
            (XYZ, 0), (YZ, 0), (XY, 67), (XZ, 67),
            (MinusXY, 64), (MinusXZ, 64), (MinusXYZ, 20), (MinusYZ, 20),
        ];
        for (direction, extremal_vertex) in expected {
            for vertex_index in 0..code.lattice().vertex_count as VertexIndex {
                assert_eq!(code.check_extremal_vertex(vertex_index, direction),
                    vertex_index == extremal_vertex,
                    "vertex {vertex_index}, direction {direction}");
            }
        }
    }

    #[test]
    fn sweep_extremal_vertices_two_errors() {
        use Direction::*;
        let mut code = code(6, LatticeType::RhombicToric);
        code.set_error(&[0, 1]);
        code.calculate_syndrome();
        let cases: [(Direction, &[VertexIndex]); 8] = [
            (XYZ, &[0, 216]),
            (XY, &[221, 246]),
            (XZ, &[221]),
            (YZ, &[246]),
            (MinusXYZ, &[37, 42]),
            (MinusXY, &[0, 216]),
            (MinusYZ, &[42]),
            (MinusXZ, &[37]),
        ];
        for (direction, extremal_vertices) in cases {
            for vertex_index in [0, 37, 42, 216, 221, 246, 1] {
                assert_eq!(code.check_extremal_vertex(vertex_index, direction),
                    extremal_vertices.contains(&vertex_index),
                    "vertex {vertex_index}, direction {direction}");
            }
        }
    }

    #[test]
    fn sweep_full_vertex_qubit_errors_xy() {  // cargo test sweep_full_vertex_qubit_errors_xy -- --nocapture
        let mut code = code(4, LatticeType::RhombicToric);
        // single errors on the three faces above vertex 27, then every pair, then all
        let cases: [(&[QubitIndex], &[QubitIndex]); 7] = [
            (&[81], &[81]), (&[80], &[80]), (&[82], &[82]),
            (&[81, 82], &[81, 82]), (&[80, 82], &[80, 82]), (&[80, 81], &[80, 81]),
            (&[80, 81, 82], &[80, 81, 82]),
        ];
        for (error, expected) in cases {
            code.clear_syndrome();
            code.clear_flip_bits();
            code.set_error(error);
            code.calculate_syndrome();
            let sweep_edges = code.find_sweep_edges(27, Direction::XY);
            code.sweep_full_vertex(27, &sweep_edges, Direction::XY);
            assert_only_flips(&code, expected);
        }
    }

    #[test]
    fn sweep_full_vertex_measurement_errors_xy() {  // cargo test sweep_full_vertex_measurement_errors_xy -- --nocapture
        let mut code = code(4, LatticeType::RhombicToric);
        let syndrome_length = code.lattice().syndrome_length;
        // xy, xyz and -yz edges of vertex 27: one of the two spanned faces flips
        let cases: [(&[EdgeIndex], &[QubitIndex]); 3] = [
            (&[189, 191, 501], &[80, 82]),
            (&[191, 501, 524], &[81, 82]),
            (&[191, 189, 524], &[80, 81]),
        ];
        for (edges, candidates) in cases {
            code.clear_flip_bits();
            let mut syndrome = vec![0; syndrome_length];
            for &edge_index in edges {
                syndrome[edge_index as usize] = 1;
            }
            code.set_syndrome(syndrome);
            let sweep_edges = code.find_sweep_edges(27, Direction::XY);
            code.sweep_full_vertex(27, &sweep_edges, Direction::XY);
            let flipped: Vec<QubitIndex> = candidates.iter().copied()
                .filter(|&qubit_index| code.flip_bits()[qubit_index as usize] == 1).collect();
            assert_eq!(flipped.len(), 1, "exactly one of {candidates:?} must flip");
            for (qubit_index, &bit) in code.flip_bits().iter().enumerate() {
                if !candidates.contains(&(qubit_index as QubitIndex)) {
                    assert_eq!(bit, 0);
                }
            }
        }
        // xyz, -xz and -yz edges without the sweep edge: exactly one pair flips
        code.clear_flip_bits();
        let mut syndrome = vec![0; syndrome_length];
        for edge_index in [501, 189, 524] {
            syndrome[edge_index] = 1;
        }
        code.set_syndrome(syndrome);
        let sweep_edges = code.find_sweep_edges(27, Direction::XY);
        code.sweep_full_vertex(27, &sweep_edges, Direction::XY);
        let flipped: Vec<QubitIndex> = [80, 81, 82].into_iter()
            .filter(|&qubit_index| code.flip_bits()[qubit_index as usize] == 1).collect();
        assert_eq!(flipped.len(), 2, "exactly one pair of {{80, 81, 82}} must flip");
    }

    #[test]
    fn sweep_full_vertex_measurement_errors_xyz() {
        let mut code = code(4, LatticeType::RhombicToric);
        let syndrome_length = code.lattice().syndrome_length;
        // xyz with two of the up edges of vertex 27
        let cases: [(&[EdgeIndex], &[QubitIndex]); 3] = [
            (&[189, 193, 195], &[78, 79]),
            (&[191, 189, 193], &[80, 78]),
            (&[189, 195, 191], &[79, 80]),
        ];
        for (edges, candidates) in cases {
            code.clear_flip_bits();
            let mut syndrome = vec![0; syndrome_length];
            for &edge_index in edges {
                syndrome[edge_index as usize] = 1;
            }
            code.set_syndrome(syndrome);
            let sweep_edges = code.find_sweep_edges(27, Direction::XYZ);
            code.sweep_full_vertex(27, &sweep_edges, Direction::XYZ);
            let flipped: Vec<QubitIndex> = candidates.iter().copied()
                .filter(|&qubit_index| code.flip_bits()[qubit_index as usize] == 1).collect();
            assert_eq!(flipped.len(), 1, "exactly one of {candidates:?} must flip");
        }
        // the three up edges alone
        code.clear_flip_bits();
        let mut syndrome = vec![0; syndrome_length];
        for edge_index in [191, 195, 193] {
            syndrome[edge_index] = 1;
        }
        code.set_syndrome(syndrome);
        let sweep_edges = code.find_sweep_edges(27, Direction::XYZ);
        code.sweep_full_vertex(27, &sweep_edges, Direction::XYZ);
        let flipped: Vec<QubitIndex> = [78, 79, 80].into_iter()
            .filter(|&qubit_index| code.flip_bits()[qubit_index as usize] == 1).collect();
        assert_eq!(flipped.len(), 2);
    }

    #[test]
    fn sweep_half_vertex_qubit_errors_xy() {  // cargo test sweep_half_vertex_qubit_errors_xy -- --nocapture
        let mut code = code(6, LatticeType::RhombicToric);
        // vertex 283 touches faces 109 (xyz -xz), 204 (xyz -yz) and 113 (-xz -yz);
        // one error identifies its own face, two errors leave only the third
        let cases: [(&[QubitIndex], &[QubitIndex]); 6] = [
            (&[109], &[109]), (&[204], &[204]), (&[113], &[113]),
            (&[109, 113], &[204]), (&[109, 204], &[113]), (&[113, 204], &[109]),
        ];
        for (error, expected) in cases {
            code.clear_syndrome();
            code.clear_flip_bits();
            code.set_error(error);
            code.calculate_syndrome();
            let sweep_edges = code.find_sweep_edges(283, Direction::XY);
            code.sweep_half_vertex(283, &sweep_edges, Direction::XY);
            assert_only_flips(&code, expected);
        }
    }

    #[test]
    fn sweep_half_vertex_measurement_errors() {
        let mut code = code(6, LatticeType::RhombicToric);
        let syndrome_length = code.lattice().syndrome_length;
        // all three up edges of vertex 283 for xy, then for xz: one face flips
        let cases: [(Direction, &[EdgeIndex], &[QubitIndex]); 2] = [
            (Direction::XY, &[1981, 480, 265], &[109, 113, 204]),
            (Direction::XZ, &[1981, 480, 723], &[310, 308, 204]),
        ];
        for (direction, edges, candidates) in cases {
            code.clear_flip_bits();
            let mut syndrome = vec![0; syndrome_length];
            for &edge_index in edges {
                syndrome[edge_index as usize] = 1;
            }
            code.set_syndrome(syndrome);
            let sweep_edges = code.find_sweep_edges(283, direction);
            assert_eq!(sweep_edges.len(), 3);
            code.sweep_half_vertex(283, &sweep_edges, direction);
            let flipped: Vec<QubitIndex> = candidates.iter().copied()
                .filter(|&qubit_index| code.flip_bits()[qubit_index as usize] == 1).collect();
            assert_eq!(flipped.len(), 1, "exactly one of {candidates:?} must flip");
            for (qubit_index, &bit) in code.flip_bits().iter().enumerate() {
                if !candidates.contains(&(qubit_index as QubitIndex)) {
                    assert_eq!(bit, 0);
                }
            }
        }
    }

    #[test]
    fn sweep_greedy_xyz_trajectory() {  // cargo test sweep_greedy_xyz_trajectory -- --nocapture
        let mut code = code(4, LatticeType::RhombicToric);
        code.set_error(&[44, 45, 151]);
        code.calculate_syndrome();
        code.sweep(Direction::XYZ, true);
        code.calculate_syndrome();
        assert_only_flips(&code, &[45]);
        assert!(!code.error().contains(&45));
        assert!(code.error().contains(&44));
        assert!(code.error().contains(&151));
        let expected_unsatisfied = [811, 357, 363, 107, 105, 555];
        for (edge_index, &bit) in code.syndrome().iter().enumerate() {
            assert_eq!(bit, u8::from(expected_unsatisfied.contains(&edge_index)),
                "edge {edge_index}");
        }
        code.sweep(Direction::XYZ, true);
        code.calculate_syndrome();
        assert_only_flips(&code, &[44, 151]);
        assert!(code.error().is_empty());
        assert!(code.syndrome_is_clean());
        assert!(code.check_correction());
    }

    #[test]
    fn sweep_greedy_minus_xyz_trajectory() {
        let mut code = code(4, LatticeType::RhombicToric);
        code.set_error(&[44, 45, 151]);
        code.calculate_syndrome();
        code.sweep(Direction::MinusXYZ, true);
        code.calculate_syndrome();
        assert_only_flips(&code, &[44, 151]);
        assert!(code.error().contains(&45));
        let expected_unsatisfied = [363, 107, 884, 888];
        for (edge_index, &bit) in code.syndrome().iter().enumerate() {
            assert_eq!(bit, u8::from(expected_unsatisfied.contains(&edge_index)),
                "edge {edge_index}");
        }
        code.sweep(Direction::MinusXYZ, true);
        code.calculate_syndrome();
        assert_only_flips(&code, &[45]);
        assert!(code.error().is_empty());
        assert!(code.syndrome_is_clean());
    }

    #[test]
    fn sweep_greedy_xy_trajectory() {
        let mut code = code(4, LatticeType::RhombicToric);
        code.set_error(&[44, 45, 151]);
        code.calculate_syndrome();
        code.sweep(Direction::XY, true);
        code.calculate_syndrome();
        assert_only_flips(&code, &[44, 45]);
        assert!(code.error().contains(&151));
        let expected_unsatisfied = [357, 811, 889, 363];
        for (edge_index, &bit) in code.syndrome().iter().enumerate() {
            assert_eq!(bit, u8::from(expected_unsatisfied.contains(&edge_index)),
                "edge {edge_index}");
        }
        code.sweep(Direction::XY, true);
        code.calculate_syndrome();
        assert_only_flips(&code, &[151]);
        assert!(code.error().is_empty());
        assert!(code.syndrome_is_clean());
    }

    #[test]
    fn sweep_greedy_minus_xy_trajectory() {
        let mut code = code(4, LatticeType::RhombicToric);
        code.set_error(&[44, 45, 151]);
        code.calculate_syndrome();
        code.sweep(Direction::MinusXY, true);
        code.calculate_syndrome();
        assert_only_flips(&code, &[151]);
        assert!(code.error().contains(&44));
        assert!(code.error().contains(&45));
        let expected_unsatisfied = [363, 889, 884, 888, 105, 555];
        for (edge_index, &bit) in code.syndrome().iter().enumerate() {
            assert_eq!(bit, u8::from(expected_unsatisfied.contains(&edge_index)),
                "edge {edge_index}");
        }
        code.sweep(Direction::MinusXY, true);
        code.calculate_syndrome();
        assert_only_flips(&code, &[44, 45]);
        assert!(code.error().is_empty());
        assert!(code.syndrome_is_clean());
    }

    #[test]
    fn sweep_half_vertex_lone_edge_probes_far_endpoint() {
        // vertex 283, direction xy: a lone syndrome bit on the xyz up edge leaves two
        // candidate faces; the far endpoint of that edge breaks the tie
        let mut code = code(6, LatticeType::RhombicToric);
        let syndrome_length = code.lattice().syndrome_length;
        let cases: [(&[EdgeIndex], &[QubitIndex]); 3] = [
            // the -xz edge of the far vertex continues onto the xyz -xz face
            (&[1981, 1777], &[109]),
            // the -yz edge of the far vertex continues onto the xyz -yz face
            (&[1981, 1992], &[204]),
            // nothing beyond the lone edge, fall back to the first candidate
            (&[1981], &[109]),
        ];
        for (edges, expected) in cases {
            code.clear_flip_bits();
            let mut syndrome = vec![0; syndrome_length];
            for &edge_index in edges {
                syndrome[edge_index as usize] = 1;
            }
            code.set_syndrome(syndrome);
            let sweep_edges = code.find_sweep_edges(283, Direction::XY);
            assert_eq!(sweep_edges, vec![Direction::XYZ]);
            code.sweep_half_vertex(283, &sweep_edges, Direction::XY);
            assert_only_flips(&code, expected);
        }
    }

    #[test]
    fn sweep_clean_syndrome_proposes_nothing() {
        for lattice_type in [LatticeType::RhombicToric, LatticeType::CubicToric] {
            let mut code = code(4, lattice_type);
            code.calculate_syndrome();
            for direction in Direction::ALL {
                for greedy in [false, true] {
                    code.sweep(direction, greedy);
                    assert!(code.flip_bits().iter().all(|&bit| bit == 0));
                    assert!(code.error().is_empty());
                }
            }
        }
    }

    #[test]
    fn sweep_cubic_corrects_single_error() {  // cargo test sweep_cubic_corrects_single_error -- --nocapture
        for direction in [Direction::XYZ, Direction::MinusXYZ] {
            let mut code = code(4, LatticeType::CubicToric);
            let vertex_index = code.lattice().coordinate_to_index(&Cartesian4::new(1, 1, 1, 0));
            code.set_error(&[3 * vertex_index]);
            code.calculate_syndrome();
            code.sweep(direction, true);
            code.calculate_syndrome();
            assert!(code.error().is_empty(), "direction {direction}");
            assert!(code.syndrome_is_clean());
            assert!(code.check_correction());
        }
    }

    #[test]
    fn sweep_bounded_rhombic_corrects_single_error() {
        let mut code = code(4, LatticeType::RhombicBoundaries);
        let vertex_index = code.lattice().coordinate_to_index(&Cartesian4::new(1, 1, 1, 0));
        let qubit_index = code.lattice()
            .face_qubit(vertex_index, Direction::XYZ, Direction::XY).unwrap();
        code.set_error(&[qubit_index]);
        code.calculate_syndrome();
        code.sweep(Direction::XYZ, true);
        code.calculate_syndrome();
        assert!(code.error().is_empty());
        assert!(code.syndrome_is_clean());
        assert!(code.check_correction());
    }
}
