//! Lattice Model
//!
//! This module contains the shared cell-complex model behind every code variant: the
//! octahedral direction set with its sweep ("up") tables, the dense vertex/edge/face
//! indexing, and the precomputed sweep stencils the decoding rule reads at every vertex.
//!
//! All tables are populated once at construction and are read-only afterwards, so a
//! lattice can be shared between trials behind an `Arc` without any locking.

use crate::util::*;
use crate::rhombic_lattice;
use crate::cubic_lattice;
use std::collections::HashMap;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// the closed set of octahedral directions used by the sweep rule; `-d` is `opposite()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    XYZ,
    XY,
    XZ,
    YZ,
    MinusXYZ,
    MinusXY,
    MinusXZ,
    MinusYZ,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::XYZ, Direction::XY, Direction::XZ, Direction::YZ,
        Direction::MinusXYZ, Direction::MinusXY, Direction::MinusXZ, Direction::MinusYZ,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Self::XYZ => Self::MinusXYZ,
            Self::XY => Self::MinusXY,
            Self::XZ => Self::MinusXZ,
            Self::YZ => Self::MinusYZ,
            Self::MinusXYZ => Self::XYZ,
            Self::MinusXY => Self::XY,
            Self::MinusXZ => Self::XZ,
            Self::MinusYZ => Self::YZ,
        }
    }

    /// whether an edge along this direction is stored at the vertex it leaves
    pub fn is_positive(self) -> bool {
        matches!(self, Self::XYZ | Self::XY | Self::XZ | Self::YZ)
    }

    /// syndrome slot offset of the positive directions within a vertex's block of seven
    pub fn edge_offset(self) -> usize {
        match self {
            Self::XYZ => 0,
            Self::XY => 2,
            Self::YZ => 4,
            Self::XZ => 6,
            _ => panic!("edge offset is defined on positive directions, got {self}"),
        }
    }

    /// the three directions "above" `self`, in the fixed order the stencil slots use
    pub fn up_directions(self) -> [Direction; 3] {
        match self {
            Self::XYZ => [Self::XY, Self::XZ, Self::YZ],
            Self::XY => [Self::XYZ, Self::MinusXZ, Self::MinusYZ],
            Self::XZ => [Self::XYZ, Self::MinusXY, Self::MinusYZ],
            Self::YZ => [Self::XYZ, Self::MinusXY, Self::MinusXZ],
            Self::MinusXYZ => [Self::MinusXY, Self::MinusXZ, Self::MinusYZ],
            Self::MinusXY => [Self::MinusXYZ, Self::XZ, Self::YZ],
            Self::MinusXZ => [Self::MinusXYZ, Self::XY, Self::YZ],
            Self::MinusYZ => [Self::MinusXYZ, Self::XY, Self::XZ],
        }
    }

    /// the octant of a cubic lattice this direction selects, one sign per axis
    pub fn octant(self) -> [i32; 3] {
        match self {
            Self::XYZ => [1, 1, 1],
            Self::XY => [1, 1, -1],
            Self::XZ => [1, -1, 1],
            Self::YZ => [-1, 1, 1],
            Self::MinusXYZ => [-1, -1, -1],
            Self::MinusXY => [-1, -1, 1],
            Self::MinusXZ => [-1, 1, -1],
            Self::MinusYZ => [1, -1, -1],
        }
    }

    /// position within [`Direction::ALL`]
    pub fn index(self) -> usize {
        match self {
            Self::XYZ => 0,
            Self::XY => 1,
            Self::XZ => 2,
            Self::YZ => 3,
            Self::MinusXYZ => 4,
            Self::MinusXY => 5,
            Self::MinusXZ => 6,
            Self::MinusYZ => 7,
        }
    }
}

impl FromStr for Direction {
    type Err = SweepError;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "xyz" => Ok(Self::XYZ),
            "xy" => Ok(Self::XY),
            "xz" => Ok(Self::XZ),
            "yz" => Ok(Self::YZ),
            "-xyz" => Ok(Self::MinusXYZ),
            "-xy" => Ok(Self::MinusXY),
            "-xz" => Ok(Self::MinusXZ),
            "-yz" => Ok(Self::MinusYZ),
            _ => Err(SweepError::InvalidDirection(name.to_string())),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::XYZ => "xyz",
            Self::XY => "xy",
            Self::XZ => "xz",
            Self::YZ => "yz",
            Self::MinusXYZ => "-xyz",
            Self::MinusXY => "-xy",
            Self::MinusXZ => "-xz",
            Self::MinusYZ => "-yz",
        };
        write!(f, "{name}")
    }
}

/// the four supported code variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LatticeType {
    RhombicToric,
    RhombicBoundaries,
    CubicToric,
    CubicBoundaries,
}

impl LatticeType {
    pub fn is_periodic(self) -> bool {
        matches!(self, Self::RhombicToric | Self::CubicToric)
    }
    pub fn is_rhombic(self) -> bool {
        matches!(self, Self::RhombicToric | Self::RhombicBoundaries)
    }
}

impl FromStr for LatticeType {
    type Err = SweepError;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "rhombic_toric" => Ok(Self::RhombicToric),
            "rhombic_boundaries" => Ok(Self::RhombicBoundaries),
            "cubic_toric" => Ok(Self::CubicToric),
            "cubic_boundaries" => Ok(Self::CubicBoundaries),
            _ => Err(SweepError::InvalidLatticeType(name.to_string())),
        }
    }
}

impl std::fmt::Display for LatticeType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::RhombicToric => "rhombic_toric",
            Self::RhombicBoundaries => "rhombic_boundaries",
            Self::CubicToric => "cubic_toric",
            Self::CubicBoundaries => "cubic_boundaries",
        };
        write!(f, "{name}")
    }
}

/// local structure of a vertex, fixed at construction; it selects which sweep rule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexKind {
    /// rhombic vertex with the complete eight-edge neighbourhood; the only kind that
    /// owns an edge along the sweep direction itself
    Full,
    /// rhombic half vertex on the anchor sublattice, four edges
    HalfOne,
    /// rhombic half vertex on the opposite sublattice, four edges
    HalfTwo,
    /// cubic vertex, six axis edges, swept with the pair-face rule
    Cubic,
    /// index padding with no incident edges
    Isolated,
}

/// everything the per-vertex sweep rule reads, precomputed for one (vertex, direction)
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepStencil {
    /// the edge along the sweep direction itself; populated for full vertices only
    pub direction_edge: Option<EdgeIndex>,
    /// the up edges, slot i labelled by `direction.up_directions()[i]`
    pub up_edges: [Option<EdgeIndex>; 3],
    /// face spanned by the sweep direction and up direction i; full vertices only
    pub direction_faces: [Option<QubitIndex>; 3],
    /// face spanned by up-direction pairs (0,1), (0,2), (1,2); half and cubic vertices
    pub pair_faces: [Option<QubitIndex>; 3],
    /// `probe_edges[i][j]`: the up-j edge at the far end of up-edge i, read to
    /// disambiguate a lone syndrome edge
    pub probe_edges: [[Option<EdgeIndex>; 3]; 3],
}

/// slot within `pair_faces` of the unordered up-direction pair (i, j)
pub fn pair_slot(i: usize, j: usize) -> usize {
    match (i.min(j), i.max(j)) {
        (0, 1) => 0,
        (0, 2) => 1,
        (1, 2) => 2,
        _ => panic!("invalid up-direction pair ({i}, {j})"),
    }
}

/// immutable cell complex of one code instance; see the builders in
/// [`crate::rhombic_lattice`] and [`crate::cubic_lattice`]
#[derive(Debug, Clone)]
pub struct Lattice {
    pub size: usize,
    pub lattice_type: LatticeType,
    pub vertex_count: usize,
    pub qubit_count: usize,
    /// length of the syndrome array; rhombic lattices reserve seven slots per vertex
    /// and leave the slots of absent edges permanently zero
    pub syndrome_length: usize,
    pub(crate) vertex_kinds: Vec<VertexKind>,
    pub(crate) neighbor_table: Vec<[Option<VertexIndex>; 8]>,
    pub(crate) edge_table: Vec<[Option<EdgeIndex>; 8]>,
    pub(crate) vertex_edges: Vec<Vec<EdgeIndex>>,
    pub(crate) edge_mask: Vec<bool>,
    /// sorted list of syndrome slots that carry a stabilizer measurement
    pub(crate) measured_edges: Vec<EdgeIndex>,
    pub(crate) face_corners: Vec<[VertexIndex; 4]>,
    pub(crate) face_edges: Vec<Vec<EdgeIndex>>,
    pub(crate) face_index_map: HashMap<[VertexIndex; 4], QubitIndex>,
    /// indexed `[direction.index()][vertex]`
    pub(crate) stencils: Vec<Vec<SweepStencil>>,
    /// representatives of the logical Z operators, three for toric variants
    pub logical_zs: Vec<Vec<QubitIndex>>,
}

impl Lattice {
    pub fn new(size: usize, lattice_type: LatticeType) -> Self {
        assert!(size >= 4 && size % 2 == 0, "lattice size must be an even integer >= 4, got {size}");
        match lattice_type {
            LatticeType::RhombicToric => rhombic_lattice::build(size, true),
            LatticeType::RhombicBoundaries => rhombic_lattice::build(size, false),
            LatticeType::CubicToric => cubic_lattice::build(size, true),
            LatticeType::CubicBoundaries => cubic_lattice::build(size, false),
        }
    }

    pub fn coordinate_to_index(&self, coordinate: &Cartesian4) -> VertexIndex {
        let l = self.size as i32;
        debug_assert!((0..l).contains(&coordinate.x) && (0..l).contains(&coordinate.y)
            && (0..l).contains(&coordinate.z), "coordinate {coordinate} out of range");
        (coordinate.x + coordinate.y * l + coordinate.z * l * l + coordinate.w * l * l * l) as VertexIndex
    }

    pub fn index_to_coordinate(&self, vertex_index: VertexIndex) -> Cartesian4 {
        let l = self.size as i32;
        let vertex_index = vertex_index as i32;
        Cartesian4 {
            x: vertex_index % l,
            y: (vertex_index / l) % l,
            z: (vertex_index / (l * l)) % l,
            w: vertex_index / (l * l * l),
        }
    }

    /// the vertex one step along `direction`, regardless of whether an edge is there
    pub fn neighbor(&self, vertex_index: VertexIndex, direction: Direction) -> Option<VertexIndex> {
        self.neighbor_table[vertex_index as usize][direction.index()]
    }

    /// the syndrome slot of the edge leaving `vertex_index` along `direction`; querying
    /// from either endpoint resolves to the same slot
    pub fn edge_index(&self, vertex_index: VertexIndex, direction: Direction) -> Option<EdgeIndex> {
        self.edge_table[vertex_index as usize][direction.index()]
    }

    pub fn vertex_kind(&self, vertex_index: VertexIndex) -> VertexKind {
        self.vertex_kinds[vertex_index as usize]
    }

    /// all edges incident to a vertex
    pub fn vertex_edge_list(&self, vertex_index: VertexIndex) -> &[EdgeIndex] {
        &self.vertex_edges[vertex_index as usize]
    }

    pub fn is_measured(&self, edge_index: EdgeIndex) -> bool {
        self.edge_mask[edge_index as usize]
    }

    pub fn measured_edge_list(&self) -> &[EdgeIndex] {
        &self.measured_edges
    }

    pub fn face_corner_list(&self, qubit_index: QubitIndex) -> &[VertexIndex; 4] {
        &self.face_corners[qubit_index as usize]
    }

    /// the measured boundary edges of a face
    pub fn face_edge_list(&self, qubit_index: QubitIndex) -> &[EdgeIndex] {
        &self.face_edges[qubit_index as usize]
    }

    pub fn stencil(&self, direction: Direction, vertex_index: VertexIndex) -> &SweepStencil {
        &self.stencils[direction.index()][vertex_index as usize]
    }

    /// look up a face by its four corners, in any order
    pub fn find_face(&self, vertices: &[VertexIndex; 4]) -> Option<QubitIndex> {
        let mut key = *vertices;
        key.sort_unstable();
        self.face_index_map.get(&key).copied()
    }

    /// the four corners of the face emanating from `vertex_index` along the two
    /// directions; both orderings of the pair return the same corners
    pub fn face_vertices(&self, vertex_index: VertexIndex, directions: [Direction; 2])
            -> Result<[VertexIndex; 4], SweepError> {
        let [d1, d2] = directions;
        if d1 == d2 {
            return Err(SweepError::InvalidDirections(format!("repeated direction {d1}")));
        }
        if d1 == d2.opposite() {
            return Err(SweepError::InvalidDirections(format!("antiparallel directions {d1} and {d2}")));
        }
        let missing = || SweepError::InvalidDirections(
            format!("no face at vertex {vertex_index} along {d1} and {d2}"));
        let n1 = self.neighbor(vertex_index, d1).ok_or_else(missing)?;
        let n2 = self.neighbor(vertex_index, d2).ok_or_else(missing)?;
        let n3 = self.neighbor(n1, d2).ok_or_else(missing)?;
        let mut corners = [vertex_index, n1, n2, n3];
        corners.sort_unstable();
        if !self.face_index_map.contains_key(&corners) {
            return Err(missing());
        }
        Ok(corners)
    }

    /// the qubit on the face spanned by the two directions at `vertex_index`
    pub fn face_qubit(&self, vertex_index: VertexIndex, d1: Direction, d2: Direction) -> Option<QubitIndex> {
        let corners = self.face_vertices(vertex_index, [d1, d2]).ok()?;
        self.find_face(&corners)
    }
}
