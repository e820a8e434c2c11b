//! Cycle tracing: turning the unsigned face/edge incidence into a signed
//! boundary operator by walking each face's edge loop once.
//!
//! Every face is traced independently (the rows of the output are
//! disjoint), so the per-face walks run in parallel and only the final
//! triplet collection is sequential.

use crate::{
  arrangement::ExteriorCycleLocator,
  basis::CellBasis,
  coords::VertexCoords,
  error::ChainError,
  operators::{coboundary_0, unsigned_coboundary_1},
  sign::Sign,
  sparse::SparseMatrix,
};

use rayon::prelude::*;
use std::collections::HashMap;

type CycleRow = Vec<(usize, Sign)>;

/// Signed face x edge coboundary operator.
///
/// Each face's unsigned edge set is traced into one consistently
/// oriented boundary cycle. The seed edge is the first in basis order
/// and gets sign +1; any valid seed yields an equally valid orientation,
/// possibly globally reversed for that face.
///
/// With an [`ExteriorCycleLocator`] (2D only) the unbounded face is
/// moved to row 0 and negated, and the remaining rows are re-signed so
/// that the two faces of every edge carry opposite signs.
pub fn coboundary_1(
  vertices: &VertexCoords,
  faces: &CellBasis,
  edges: &CellBasis,
  convex: bool,
  exterior: Option<&dyn ExteriorCycleLocator>,
) -> Result<SparseMatrix, ChainError> {
  let unsigned = unsigned_coboundary_1(faces, edges, convex)?;

  let mut face_edges = vec![Vec::new(); faces.len()];
  for &(iface, iedge, _) in unsigned.triplets() {
    face_edges[iface].push(iedge);
  }

  let rows = face_edges
    .par_iter()
    .enumerate()
    .map(|(iface, incident)| trace_cycle(iface, incident, edges))
    .collect::<Result<Vec<_>, _>>()?;

  match exterior {
    Some(locator) => orient_exterior(vertices, rows, edges, locator),
    None => Ok(rows_into_matrix(&rows, edges.len())),
  }
}

/// Walks one face's unsigned edge set into a signed boundary cycle.
///
/// The partial cycle is extended at both of its open endpoints per step:
/// the vertex with coefficient +1 in the partial boundary (head) and the
/// one with -1 (tail). An edge set that branches, disconnects or closes
/// early is rejected.
fn trace_cycle(iface: usize, incident: &[usize], edges: &CellBasis) -> Result<CycleRow, ChainError> {
  let mut chain = incident.to_vec();
  if chain.is_empty() {
    return Err(ChainError::BrokenCycle { face: iface });
  }

  let mut cycle = CycleRow::with_capacity(chain.len());
  cycle.push((chain.remove(0), Sign::Pos));

  while !chain.is_empty() {
    let (head, tail) = match partial_boundary(&cycle, edges) {
      PartialBoundary::Open { head, tail } => (head, tail),
      _ => return Err(ChainError::BrokenCycle { face: iface }),
    };

    // extension continuing the walk out of the head vertex: its own
    // tail/head convention decides the contribution sign
    let iright = chain
      .iter()
      .position(|&e| edges[e].contains(&head))
      .ok_or(ChainError::BrokenCycle { face: iface })?;
    let eright = chain[iright];
    let sright = Sign::from_bool(edges[eright][0] == head);

    // symmetric extension out of the tail vertex
    let ileft = chain
      .iter()
      .position(|&e| edges[e].contains(&tail))
      .ok_or(ChainError::BrokenCycle { face: iface })?;
    let eleft = chain[ileft];
    let sleft = Sign::from_bool(edges[eleft][1] == tail);

    if eright == eleft {
      // the walk closes on a single edge approached from both ends
      cycle.push((eright, sright));
      chain.remove(iright);
    } else {
      cycle.push((eright, sright));
      cycle.push((eleft, sleft));
      let (hi, lo) = if iright > ileft {
        (iright, ileft)
      } else {
        (ileft, iright)
      };
      chain.remove(hi);
      chain.remove(lo);
    }
  }

  match partial_boundary(&cycle, edges) {
    PartialBoundary::Closed => Ok(cycle),
    _ => Err(ChainError::BrokenCycle { face: iface }),
  }
}

enum PartialBoundary {
  Closed,
  Open { head: usize, tail: usize },
  Broken,
}

/// Vertex boundary of a partial cycle under the boundary-1 relation
/// (edge tail -1, head +1, scaled by the cycle coefficient).
fn partial_boundary(cycle: &[(usize, Sign)], edges: &CellBasis) -> PartialBoundary {
  let mut coeffs = HashMap::new();
  for &(iedge, sign) in cycle {
    let edge = &edges[iedge];
    *coeffs.entry(edge[0]).or_insert(0) -= sign.as_i32();
    *coeffs.entry(edge[1]).or_insert(0) += sign.as_i32();
  }
  coeffs.retain(|_, coeff| *coeff != 0);

  if coeffs.is_empty() {
    return PartialBoundary::Closed;
  }
  if coeffs.len() == 2 {
    let head = coeffs.iter().find(|(_, &c)| c == 1).map(|(&v, _)| v);
    let tail = coeffs.iter().find(|(_, &c)| c == -1).map(|(&v, _)| v);
    if let (Some(head), Some(tail)) = (head, tail) {
      return PartialBoundary::Open { head, tail };
    }
  }
  PartialBoundary::Broken
}

fn rows_into_matrix(rows: &[CycleRow], nedges: usize) -> SparseMatrix {
  let mut mat = SparseMatrix::zeros(rows.len(), nedges);
  for (iface, row) in rows.iter().enumerate() {
    for &(iedge, sign) in row {
      mat.push(iface, iedge, sign.as_f64());
    }
  }
  mat
}

/// Moves the unbounded face to row 0 with opposite orientation, then
/// re-signs the remaining rows so every edge's two faces cancel.
fn orient_exterior(
  vertices: &VertexCoords,
  mut rows: Vec<CycleRow>,
  edges: &CellBasis,
  locator: &dyn ExteriorCycleLocator,
) -> Result<SparseMatrix, ChainError> {
  let nfaces = rows.len();
  let nedges = edges.len();

  let edge_operator = coboundary_0(edges)?;
  let face_operator = rows_into_matrix(&rows, nedges);
  let iexterior = locator.exterior_cycle(vertices, &edge_operator, &face_operator)?;
  if iexterior >= nfaces {
    return Err(ChainError::ExteriorOutOfRange {
      face: iexterior,
      nfaces,
    });
  }

  let mut exterior = rows.remove(iexterior);
  flip_row(&mut exterior);
  rows.insert(0, exterior);

  let mut edge_rows = vec![Vec::new(); nedges];
  for (iface, row) in rows.iter().enumerate() {
    for &(iedge, _) in row {
      edge_rows[iedge].push(iface);
    }
  }

  // single pass in edge order: whenever the two incident faces agree in
  // sign, flip the row that comes later in row order
  for (iedge, incident) in edge_rows.iter().enumerate() {
    let &[first, second] = incident.as_slice() else {
      return Err(ChainError::IncoherentOrientation { edge: iedge });
    };
    if sign_in_row(&rows[first], iedge) == sign_in_row(&rows[second], iedge) {
      flip_row(&mut rows[second]);
    }
  }

  // the pass must have reached a globally coherent orientation
  for (iedge, incident) in edge_rows.iter().enumerate() {
    if sign_in_row(&rows[incident[0]], iedge) == sign_in_row(&rows[incident[1]], iedge) {
      return Err(ChainError::IncoherentOrientation { edge: iedge });
    }
  }

  Ok(rows_into_matrix(&rows, nedges))
}

fn flip_row(row: &mut CycleRow) {
  for (_, sign) in row {
    *sign = -*sign;
  }
}

fn sign_in_row(row: &CycleRow, iedge: usize) -> Sign {
  row
    .iter()
    .find(|&&(e, _)| e == iedge)
    .map(|&(_, sign)| sign)
    .unwrap()
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::basis::CellBasis;

  fn coords(nvertices: usize) -> VertexCoords {
    VertexCoords::new(na::DMatrix::zeros(2, nvertices))
  }

  #[test]
  fn traces_square_cycle() {
    let edges =
      CellBasis::try_new(vec![vec![0, 1], vec![1, 2], vec![2, 3], vec![0, 3]], 4).unwrap();
    let faces = CellBasis::try_new(vec![vec![0, 1, 2, 3]], 4).unwrap();
    let signed = coboundary_1(&coords(4), &faces, &edges, true, None).unwrap();
    let expected = na::DMatrix::from_row_slice(1, 4, &[1.0, 1.0, 1.0, -1.0]);
    assert_eq!(signed.to_nalgebra_dense(), expected);
  }

  #[test]
  fn rejects_disconnected_edge_set() {
    // the face's vertex set picks up two opposite edges of the square
    // but nothing connecting them
    let edges = CellBasis::try_new(vec![vec![0, 1], vec![2, 3]], 4).unwrap();
    let faces = CellBasis::try_new(vec![vec![0, 1, 2, 3]], 4).unwrap();
    let result = coboundary_1(&coords(4), &faces, &edges, true, None);
    assert!(matches!(result, Err(ChainError::BrokenCycle { face: 0 })));
  }
}
