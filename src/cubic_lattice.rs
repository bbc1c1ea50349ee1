//! Cubic Lattices
//!
//! Builders for the plain cubic cell complex, periodic (toric) and bounded. Vertices
//! carry six axis edges (`edge = 3 * vertex + axis`, stored at the lower endpoint) and
//! anchor the three positive-quadrant plane faces (`xy`, `xz`, `yz`). The octahedral
//! sweep directions act through their octants: direction `d` signs the three axes, the
//! signed axis edges fill the stencil's up slots, and the octant's plane faces fill the
//! pair-face slots, so every cubic vertex sweeps with the half-vertex rule.

use crate::lattice::*;
use crate::util::*;
use std::collections::HashMap;

/// axis pairs of the three faces anchored at a vertex, in slot order (xy, xz, yz)
const PLANE_AXES: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

fn axis_step(coordinate: &Cartesian4, axis: usize, sign: i32) -> Cartesian4 {
    let mut stepped = *coordinate;
    match axis {
        0 => stepped.x += sign,
        1 => stepped.y += sign,
        _ => stepped.z += sign,
    }
    stepped
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
    let vertex_count = size * size * size;
    let syndrome_length = 3 * size * size * size;

    let to_index = |coordinate: &Cartesian4| -> VertexIndex {
        (coordinate.x + coordinate.y * l + coordinate.z * l * l) as VertexIndex
    };
    let to_coordinate = |vertex_index: VertexIndex| -> Cartesian4 {
        let vertex_index = vertex_index as i32;
        Cartesian4::new(vertex_index % l, (vertex_index / l) % l, vertex_index / (l * l), 0)
    };

    // the edge along `axis` leaving `coordinate` with `sign`, anchored at its lower endpoint
    let axis_edge = |coordinate: &Cartesian4, axis: usize, sign: i32| -> Option<EdgeIndex> {
        let anchor = if sign > 0 { *coordinate } else { resolve(axis_step(coordinate, axis, -1), l, periodic)? };
        resolve(axis_step(&anchor, axis, 1), l, periodic)?;
        Some(3 * to_index(&anchor) + axis as EdgeIndex)
    };

    let vertex_kinds = vec![VertexKind::Cubic; vertex_count];
    let mut neighbor_table = Vec::with_capacity(vertex_count);
    let mut vertex_edges = Vec::with_capacity(vertex_count);
    let mut edge_mask = vec![false; syndrome_length];
    for vertex_index in 0..vertex_count as VertexIndex {
        let coordinate = to_coordinate(vertex_index);
        let mut row = [None; 8];
        for direction in Direction::ALL {
            let [sx, sy, sz] = direction.octant();
            let stepped = Cartesian4::new(coordinate.x + sx, coordinate.y + sy, coordinate.z + sz, 0);
            row[direction.index()] = resolve(stepped, l, periodic).map(|neighbor| to_index(&neighbor));
        }
        neighbor_table.push(row);
        let mut incident = Vec::with_capacity(6);
        for axis in 0..3 {
            for sign in [1, -1] {
                if let Some(edge_index) = axis_edge(&coordinate, axis, sign) {
                    incident.push(edge_index);
                    edge_mask[edge_index as usize] = true;
                }
            }
        }
        vertex_edges.push(incident);
    }
    let measured_edges: Vec<EdgeIndex> = edge_mask.iter().enumerate()
        .filter_map(|(edge_index, &measured)| measured.then_some(edge_index as EdgeIndex))
        .collect();

    // three plane faces per vertex
    let mut face_corners = Vec::new();
    let mut face_edges = Vec::new();
    let mut face_index_map = HashMap::new();
    let mut face_at: Vec<[Option<QubitIndex>; 3]> = vec![[None; 3]; vertex_count];
    for vertex_index in 0..vertex_count as VertexIndex {
        let coordinate = to_coordinate(vertex_index);
        for (plane, &(a, b)) in PLANE_AXES.iter().enumerate() {
            let n1 = resolve(axis_step(&coordinate, a, 1), l, periodic);
            let n2 = resolve(axis_step(&coordinate, b, 1), l, periodic);
            let (n1, n2) = match (n1, n2) {
                (Some(n1), Some(n2)) => (n1, n2),
                _ => continue,
            };
            let n3 = match resolve(axis_step(&n1, b, 1), l, periodic) {
                Some(n3) => n3,
                None => continue,
            };
            let mut corners = [vertex_index, to_index(&n1), to_index(&n2), to_index(&n3)];
            corners.sort_unstable();
            let boundary: Vec<EdgeIndex> = [
                axis_edge(&coordinate, a, 1),
                axis_edge(&coordinate, b, 1),
                axis_edge(&n1, b, 1),
                axis_edge(&n2, a, 1),
            ].into_iter().flatten().collect();
            debug_assert_eq!(boundary.len(), 4);
            let qubit_index = face_corners.len() as QubitIndex;
            face_index_map.insert(corners, qubit_index);
            face_corners.push(corners);
            face_edges.push(boundary);
            face_at[vertex_index as usize][plane] = Some(qubit_index);
        }
    }
    let qubit_count = face_corners.len();

    // stencils: signed axis edges in the up slots, octant plane faces in the pair slots
    let mut stencils = Vec::with_capacity(8);
    for direction in Direction::ALL {
        let signs = direction.octant();
        let mut per_vertex = Vec::with_capacity(vertex_count);
        for vertex_index in 0..vertex_count as VertexIndex {
            let coordinate = to_coordinate(vertex_index);
            let mut stencil = SweepStencil::default();
            for axis in 0..3 {
                stencil.up_edges[axis] = axis_edge(&coordinate, axis, signs[axis]);
            }
            for i in 0..3 {
                for j in (i + 1)..3 {
                    let mut anchor = coordinate;
                    if signs[i] < 0 {
                        anchor = axis_step(&anchor, i, -1);
                    }
                    if signs[j] < 0 {
                        anchor = axis_step(&anchor, j, -1);
                    }
                    stencil.pair_faces[pair_slot(i, j)] = resolve(anchor, l, periodic)
                        .and_then(|anchor| face_at[to_index(&anchor) as usize][pair_slot(i, j)]);
                }
            }
            for i in 0..3 {
                let far = resolve(axis_step(&coordinate, i, signs[i]), l, periodic);
                for j in 0..3 {
                    if i == j {
                        continue;
                    }
                    stencil.probe_edges[i][j] = far.as_ref()
                        .and_then(|far| axis_edge(far, j, signs[j]));
                }
            }
            per_vertex.push(stencil);
        }
        stencils.push(per_vertex);
    }

    // logical Z strings pierce the faces normal to each primary axis
    let mut logical_zs = Vec::new();
    if periodic {
        for (axis, plane) in [(0, pair_slot(1, 2)), (1, pair_slot(0, 2)), (2, pair_slot(0, 1))] {
            let mut logical = Vec::new();
            for step in 0..l {
                let coordinate = axis_step(&Cartesian4::new(0, 0, 0, 0), axis, step);
                logical.push(face_at[to_index(&coordinate) as usize][plane]
                    .expect("toric lattice keeps every plane face"));
            }
            logical_zs.push(logical);
        }
    } else {
        let mut logical = Vec::new();
        for x in 0..l {
            let vertex_index = to_index(&Cartesian4::new(x, 1, 1, 0));
            logical.extend(face_at[vertex_index as usize][pair_slot(1, 2)]);
        }
        logical_zs.push(logical);
    }

    Lattice {
        size,
        lattice_type: if periodic { LatticeType::CubicToric } else { LatticeType::CubicBoundaries },
        vertex_count,
        qubit_count,
        syndrome_length,
        vertex_kinds,
        neighbor_table,
        edge_table: vec![[None; 8]; vertex_count],
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Lattice;

    #[test]
    fn cubic_lattice_face_sharing() {  // cargo test cubic_lattice_face_sharing -- --nocapture
        let lattice = Lattice::new(4, LatticeType::CubicToric);
        // every edge borders exactly four faces in the cubic complex
        let mut edge_face_count = vec![0usize; lattice.syndrome_length];
        for qubit_index in 0..lattice.qubit_count as QubitIndex {
            for &edge_index in lattice.face_edge_list(qubit_index) {
                edge_face_count[edge_index as usize] += 1;
            }
        }
        for &edge_index in lattice.measured_edge_list() {
            assert_eq!(edge_face_count[edge_index as usize], 4);
        }
    }

    #[test]
    fn cubic_lattice_octant_stencil_geometry() {
        let lattice = Lattice::new(4, LatticeType::CubicToric);
        // in the all-positive octant the pair faces are the vertex's own plane faces
        let vertex_index = lattice.coordinate_to_index(&Cartesian4::new(1, 2, 3, 0));
        let stencil = lattice.stencil(Direction::XYZ, vertex_index);
        assert_eq!(stencil.up_edges, [
            Some(3 * vertex_index), Some(3 * vertex_index + 1), Some(3 * vertex_index + 2),
        ]);
        for plane in 0..3 {
            assert_eq!(stencil.pair_faces[plane], Some(3 * vertex_index + plane as QubitIndex));
        }
        // the opposite octant anchors each pair face one cell back along both of its axes
        let stencil = lattice.stencil(Direction::MinusXYZ, vertex_index);
        let anchor_xy = lattice.coordinate_to_index(&Cartesian4::new(0, 1, 3, 0));
        let anchor_xz = lattice.coordinate_to_index(&Cartesian4::new(0, 2, 2, 0));
        let anchor_yz = lattice.coordinate_to_index(&Cartesian4::new(1, 1, 2, 0));
        assert_eq!(stencil.pair_faces[0], Some(3 * anchor_xy));
        assert_eq!(stencil.pair_faces[1], Some(3 * anchor_xz + 1));
        assert_eq!(stencil.pair_faces[2], Some(3 * anchor_yz + 2));
    }

    #[test]
    fn cubic_lattice_bounded_truncation() {
        let lattice = Lattice::new(4, LatticeType::CubicBoundaries);
        let corner = lattice.coordinate_to_index(&Cartesian4::new(0, 0, 0, 0));
        assert_eq!(lattice.vertex_edge_list(corner).len(), 3);
        let interior = lattice.coordinate_to_index(&Cartesian4::new(1, 1, 1, 0));
        assert_eq!(lattice.vertex_edge_list(interior).len(), 6);
        assert_eq!(lattice.logical_zs[0].len(), 4);
    }
}
