//! Rhombic Lattices
//!
//! Builders for the rhombic dodecahedral cell complex, periodic (toric) and bounded.
//! Vertices live on a doubled cubic grid: the `w = 0` layer on the anchor sublattice
//! carries the eight-edge full vertices, the `w = 1` layer splits into the two
//! four-edge half-vertex types, and the remaining `w = 0` vertices are index padding.
//! Each full vertex anchors six rhombic faces; every face joins two full and two half
//! vertices and its four boundary edges carry the syndrome bits.
//!
//! The bounded variant is the truncation of the periodic complex to the `[0, L)^3` box
//! with the anchor sublattice shifted to the odd parity: walks that leave the box
//! resolve to nothing, faces require all four corners, and only surviving edges are
//! measured.

use crate::lattice::*;
use crate::util::*;
use std::collections::HashMap;

/// direction pairs of the six faces anchored at a full vertex, in slot order
const FACE_PAIRS: [(Direction, Direction); 6] = [
    (Direction::XYZ, Direction::YZ),
    (Direction::XYZ, Direction::XZ),
    (Direction::XYZ, Direction::XY),
    (Direction::XY, Direction::MinusXZ),
    (Direction::XY, Direction::MinusYZ),
    (Direction::XZ, Direction::MinusYZ),
];

/// one step of the rhombic walk before range handling
fn raw_neighbor(coordinate: &Cartesian4, direction: Direction) -> Cartesian4 {
    let &Cartesian4 { x, y, z, w } = coordinate;
    if w == 0 {
        match direction {
            Direction::XYZ => Cartesian4::new(x, y, z, 1),
            Direction::MinusXYZ => Cartesian4::new(x - 1, y - 1, z - 1, 1),
            Direction::XY => Cartesian4::new(x, y, z - 1, 1),
            Direction::MinusXY => Cartesian4::new(x - 1, y - 1, z, 1),
            Direction::XZ => Cartesian4::new(x, y - 1, z, 1),
            Direction::MinusXZ => Cartesian4::new(x - 1, y, z - 1, 1),
            Direction::YZ => Cartesian4::new(x - 1, y, z, 1),
            Direction::MinusYZ => Cartesian4::new(x, y - 1, z - 1, 1),
        }
    } else {
        match direction {
            Direction::XYZ => Cartesian4::new(x + 1, y + 1, z + 1, 0),
            Direction::MinusXYZ => Cartesian4::new(x, y, z, 0),
            Direction::XY => Cartesian4::new(x + 1, y + 1, z, 0),
            Direction::MinusXY => Cartesian4::new(x, y, z + 1, 0),
            Direction::XZ => Cartesian4::new(x + 1, y, z + 1, 0),
            Direction::MinusXZ => Cartesian4::new(x, y + 1, z, 0),
            Direction::YZ => Cartesian4::new(x, y + 1, z + 1, 0),
            Direction::MinusYZ => Cartesian4::new(x + 1, y, z, 0),
        }
    }
}

fn resolve(coordinate: Cartesian4, l: i32, periodic: bool) -> Option<Cartesian4> {
    if periodic {
        Some(Cartesian4::new(
            coordinate.x.rem_euclid(l),
            coordinate.y.rem_euclid(l),
            coordinate.z.rem_euclid(l),
            coordinate.w,
        ))
    } else {
        let in_range = |value: i32| (0..l).contains(&value);
        (in_range(coordinate.x) && in_range(coordinate.y) && in_range(coordinate.z))
            .then_some(coordinate)
    }
}

pub(crate) fn build(size: usize, periodic: bool) -> Lattice {
    let l = size as i32;
    let anchor_parity: i32 = if periodic { 0 } else { 1 };
    let vertex_count = 2 * size * size * size;
    let syndrome_length = 14 * size * size * size;

    let to_index = |coordinate: &Cartesian4| -> VertexIndex {
        (coordinate.x + coordinate.y * l + coordinate.z * l * l + coordinate.w * l * l * l) as VertexIndex
    };
    let to_coordinate = |vertex_index: VertexIndex| -> Cartesian4 {
        let vertex_index = vertex_index as i32;
        Cartesian4::new(vertex_index % l, (vertex_index / l) % l, (vertex_index / (l * l)) % l,
            vertex_index / (l * l * l))
    };

    // vertex kinds and the walk table
    let mut vertex_kinds = Vec::with_capacity(vertex_count);
    let mut neighbor_table = Vec::with_capacity(vertex_count);
    for vertex_index in 0..vertex_count as VertexIndex {
        let coordinate = to_coordinate(vertex_index);
        let kind = match (coordinate.w, coordinate.parity() == anchor_parity) {
            (0, true) => VertexKind::Full,
            (0, false) => VertexKind::Isolated,
            (_, true) => VertexKind::HalfOne,
            (_, false) => VertexKind::HalfTwo,
        };
        vertex_kinds.push(kind);
        let mut row = [None; 8];
        for direction in Direction::ALL {
            row[direction.index()] = resolve(raw_neighbor(&coordinate, direction), l, periodic)
                .map(|neighbor| to_index(&neighbor));
        }
        neighbor_table.push(row);
    }

    // an edge exists when its w = 0 endpoint sits on the anchor sublattice; it is
    // stored in the slot block of whichever endpoint it leaves in a positive direction
    let mut edge_table = vec![[None; 8]; vertex_count];
    let mut edge_mask = vec![false; syndrome_length];
    for vertex_index in 0..vertex_count as VertexIndex {
        let coordinate = to_coordinate(vertex_index);
        for direction in Direction::ALL {
            let neighbor = match neighbor_table[vertex_index as usize][direction.index()] {
                Some(neighbor) => neighbor,
                None => continue,
            };
            let full_side = if coordinate.w == 0 { coordinate } else { to_coordinate(neighbor) };
            if full_side.parity() != anchor_parity {
                continue;
            }
            let edge_index = if direction.is_positive() {
                7 * vertex_index + direction.edge_offset() as EdgeIndex
            } else {
                7 * neighbor + direction.opposite().edge_offset() as EdgeIndex
            };
            edge_table[vertex_index as usize][direction.index()] = Some(edge_index);
            edge_mask[edge_index as usize] = true;
        }
    }
    let vertex_edges: Vec<Vec<EdgeIndex>> = edge_table.iter()
        .map(|row| row.iter().flatten().copied().collect())
        .collect();
    let measured_edges: Vec<EdgeIndex> = edge_mask.iter().enumerate()
        .filter_map(|(edge_index, &measured)| measured.then_some(edge_index as EdgeIndex))
        .collect();

    // six faces per full vertex, in vertex then pair order
    let mut face_corners = Vec::new();
    let mut face_edges = Vec::new();
    let mut face_index_map = HashMap::new();
    for vertex_index in 0..(size * size * size) as VertexIndex {
        if vertex_kinds[vertex_index as usize] != VertexKind::Full {
            continue;
        }
        for (d1, d2) in FACE_PAIRS {
            let walk = |from: VertexIndex, direction: Direction| {
                neighbor_table[from as usize][direction.index()]
            };
            let (n1, n2) = match (walk(vertex_index, d1), walk(vertex_index, d2)) {
                (Some(n1), Some(n2)) => (n1, n2),
                _ => continue,
            };
            let n3 = match walk(n1, d2) {
                Some(n3) => n3,
                None => continue,
            };
            debug_assert_eq!(walk(n2, d1), Some(n3));
            let mut corners = [vertex_index, n1, n2, n3];
            corners.sort_unstable();
            let boundary: Vec<EdgeIndex> = [
                edge_table[vertex_index as usize][d1.index()],
                edge_table[vertex_index as usize][d2.index()],
                edge_table[n1 as usize][d2.index()],
                edge_table[n2 as usize][d1.index()],
            ].into_iter().flatten().collect();
            if boundary.len() < 4 {
                continue;
            }
            let qubit_index = face_corners.len() as QubitIndex;
            face_index_map.insert(corners, qubit_index);
            face_corners.push(corners);
            face_edges.push(boundary);
        }
    }
    let qubit_count = face_corners.len();

    let find_face = |from: VertexIndex, d1: Direction, d2: Direction| -> Option<QubitIndex> {
        let n1 = neighbor_table[from as usize][d1.index()]?;
        let n2 = neighbor_table[from as usize][d2.index()]?;
        let n3 = neighbor_table[n1 as usize][d2.index()]?;
        let mut corners = [from, n1, n2, n3];
        corners.sort_unstable();
        face_index_map.get(&corners).copied()
    };

    // per-direction stencils
    let mut stencils = Vec::with_capacity(8);
    for direction in Direction::ALL {
        let up = direction.up_directions();
        let mut per_vertex = Vec::with_capacity(vertex_count);
        for vertex_index in 0..vertex_count as VertexIndex {
            let mut stencil = SweepStencil::default();
            match vertex_kinds[vertex_index as usize] {
                VertexKind::Full => {
                    stencil.direction_edge = edge_table[vertex_index as usize][direction.index()];
                    for (slot, u) in up.into_iter().enumerate() {
                        stencil.up_edges[slot] = edge_table[vertex_index as usize][u.index()];
                        stencil.direction_faces[slot] = find_face(vertex_index, direction, u);
                    }
                }
                VertexKind::HalfOne | VertexKind::HalfTwo => {
                    for (slot, u) in up.into_iter().enumerate() {
                        stencil.up_edges[slot] = edge_table[vertex_index as usize][u.index()];
                    }
                    for i in 0..3 {
                        for j in (i + 1)..3 {
                            stencil.pair_faces[pair_slot(i, j)] = find_face(vertex_index, up[i], up[j]);
                        }
                    }
                    for i in 0..3 {
                        for j in 0..3 {
                            if i == j {
                                continue;
                            }
                            stencil.probe_edges[i][j] = neighbor_table[vertex_index as usize][up[i].index()]
                                .and_then(|neighbor| edge_table[neighbor as usize][up[j].index()]);
                        }
                    }
                }
                _ => { }
            }
            per_vertex.push(stencil);
        }
        stencils.push(per_vertex);
    }

    // logical Z representatives: pairs of faces collected while stepping the origin
    // along each primary axis two cells at a time
    let mut logical_zs = Vec::new();
    if periodic {
        let axis_walks: [([i32; 3], [Direction; 2], [Direction; 2]); 3] = [
            // (step axis, trailing face pair, leading face pair)
            ([1, 0, 0], [Direction::MinusXYZ, Direction::MinusXZ], [Direction::XY, Direction::MinusYZ]),
            ([0, 1, 0], [Direction::MinusXYZ, Direction::MinusYZ], [Direction::XY, Direction::MinusXZ]),
            ([0, 0, 1], [Direction::MinusXYZ, Direction::MinusXZ], [Direction::YZ, Direction::MinusXY]),
        ];
        for (axis, trailing, leading) in axis_walks {
            let mut logical = Vec::new();
            for step in (0..l).step_by(2) {
                let coordinate = Cartesian4::new(axis[0] * step, axis[1] * step, axis[2] * step, 0);
                let vertex_index = to_index(&coordinate);
                logical.push(find_face(vertex_index, trailing[0], trailing[1])
                    .expect("toric logical walk must stay on faces"));
                logical.push(find_face(vertex_index, leading[0], leading[1])
                    .expect("toric logical walk must stay on faces"));
            }
            logical_zs.push(logical);
        }
    } else {
        // a single chain along x through the bulk, terminating on the two x boundaries
        let mut logical = Vec::new();
        for x in (1..l).step_by(2) {
            let vertex_index = to_index(&Cartesian4::new(x, 1, 1, 0));
            logical.extend(find_face(vertex_index, Direction::MinusXYZ, Direction::MinusXZ));
            logical.extend(find_face(vertex_index, Direction::XY, Direction::MinusYZ));
        }
        logical_zs.push(logical);
    }

    Lattice {
        size,
        lattice_type: if periodic { LatticeType::RhombicToric } else { LatticeType::RhombicBoundaries },
        vertex_count,
        qubit_count,
        syndrome_length,
        vertex_kinds,
        neighbor_table,
        edge_table,
        vertex_edges,
        edge_mask,
        measured_edges,
        face_corners,
        face_edges,
        face_index_map,
        stencils,
        logical_zs,
    }
}
