//! Incidence operators between chain spaces.
//!
//! All operators address cells by their position in the input bases and
//! store entries as `f64` triplets (values are exact small integers).

use crate::{basis::CellBasis, error::ChainError, sign::Sign, sparse::SparseMatrix};

use std::cmp::Ordering;

/// Binary cell x vertex incidence matrix.
///
/// Entry (f, k) = 1 iff vertex k belongs to cell f.
pub fn characteristic_matrix(cells: &CellBasis) -> SparseMatrix {
  let mut mat = SparseMatrix::zeros(cells.len(), cells.nvertices());
  for (icell, cell) in cells.iter().enumerate() {
    for &ivertex in cell {
      mat.push(icell, ivertex, 1.0);
    }
  }
  mat
}

/// Signed vertex x edge incidence.
///
/// Column e carries -1 at the edge tail and +1 at the edge head, the
/// orientation following the storage order inside the edge cell.
pub fn boundary_1(edges: &CellBasis) -> Result<SparseMatrix, ChainError> {
  edges.check_edges()?;
  let mut mat = SparseMatrix::zeros(edges.nvertices(), edges.len());
  for (iedge, edge) in edges.iter().enumerate() {
    mat.push(edge[0], iedge, Sign::Neg.as_f64());
    mat.push(edge[1], iedge, Sign::Pos.as_f64());
  }
  Ok(mat)
}

/// Transpose of [`boundary_1`]: the signed edge x vertex map C0 -> C1.
pub fn coboundary_0(edges: &CellBasis) -> Result<SparseMatrix, ChainError> {
  Ok(boundary_1(edges)?.transpose())
}

/// Unsigned face x edge incidence via the product of characteristic
/// matrices: both endpoints of an edge lying on a face show up as a 2.
///
/// Exact for convex cells. A non-convex cell can contain both endpoints
/// of an edge without the edge lying on its boundary, so with
/// `convex = false` the result additionally runs through the redundancy
/// fixer, which must leave exactly two incident faces per edge (the
/// exterior cell included).
pub fn unsigned_coboundary_1(
  faces: &CellBasis,
  edges: &CellBasis,
  convex: bool,
) -> Result<SparseMatrix, ChainError> {
  edges.check_edges()?;
  let faces_char = characteristic_matrix(faces).to_nalgebra_csr();
  let edges_char = characteristic_matrix(edges).to_nalgebra_csr();
  let product = &faces_char * &edges_char.transpose();

  let mut mat = SparseMatrix::zeros(faces.len(), edges.len());
  for (iface, iedge, &value) in product.triplet_iter() {
    if value == 2.0 {
      mat.push(iface, iedge, 1.0);
    }
  }

  if convex {
    Ok(mat)
  } else {
    fix_redundancy(mat, faces, edges)
  }
}

/// Removes the spurious incidences produced by non-convex cells.
///
/// A (face, edge) pair is removed iff the edge is reported on more than
/// two faces, the face has a positive defect (more incident edges than
/// vertices; a simple boundary cycle has V = E), and both edge endpoints
/// meet the face in more than the two edges a simple cycle would allow.
fn fix_redundancy(
  mut mat: SparseMatrix,
  faces: &CellBasis,
  edges: &CellBasis,
) -> Result<SparseMatrix, ChainError> {
  let mut face_edges = vec![Vec::new(); faces.len()];
  let mut edge_faces = vec![Vec::new(); edges.len()];
  for &(iface, iedge, _) in mat.triplets() {
    face_edges[iface].push(iedge);
    edge_faces[iedge].push(iface);
  }

  let nfixs: Vec<isize> = face_edges
    .iter()
    .zip(faces.iter())
    .map(|(incident, cell)| incident.len() as isize - cell.len() as isize)
    .collect();

  let mut vertex_edges = vec![Vec::new(); edges.nvertices()];
  for (iedge, edge) in edges.iter().enumerate() {
    vertex_edges[edge[0]].push(iedge);
    vertex_edges[edge[1]].push(iedge);
  }

  let mut spurious = Vec::new();
  for (iedge, edge) in edges.iter().enumerate() {
    if edge_faces[iedge].len() <= 2 {
      continue;
    }
    for &iface in &edge_faces[iedge] {
      if nfixs[iface] <= 0 {
        continue;
      }
      let shared = |ivertex: usize| {
        vertex_edges[ivertex]
          .iter()
          .filter(|e| face_edges[iface].contains(e))
          .count()
      };
      if shared(edge[0]) > 2 && shared(edge[1]) > 2 {
        spurious.push((iface, iedge));
      }
    }
  }

  if !spurious.is_empty() {
    tracing::debug!(npairs = spurious.len(), "removing redundant incidences");
    mat.set_zero(|r, c| spurious.contains(&(r, c)));
  }

  let expected = 2 * edges.len();
  match mat.nnz().cmp(&expected) {
    Ordering::Equal => Ok(mat),
    Ordering::Less => Err(ChainError::Unsupported(
      "repairing an incidence deficit (fix_lack) is not implemented",
    )),
    Ordering::Greater => Err(ChainError::RedundancyUnfixed {
      nnz: mat.nnz(),
      expected,
    }),
  }
}

/// Unsigned solid x face incidence: a face is incident iff every one of
/// its vertices lies in the solid, i.e. the characteristic product entry
/// reaches the face's full vertex count.
///
/// Valid for convex cells only; there is no 3D analogue of the
/// redundancy fixer.
pub fn unsigned_coboundary_2(
  solids: &CellBasis,
  faces: &CellBasis,
  convex: bool,
) -> Result<SparseMatrix, ChainError> {
  if !convex {
    return Err(ChainError::Unsupported(
      "unsigned_coboundary_2 requires convex cells",
    ));
  }
  let solids_char = characteristic_matrix(solids).to_nalgebra_csr();
  let faces_char = characteristic_matrix(faces).to_nalgebra_csr();
  let product = &solids_char * &faces_char.transpose();

  let mut mat = SparseMatrix::zeros(solids.len(), faces.len());
  for (isolid, iface, &value) in product.triplet_iter() {
    if value == faces[iface].len() as f64 {
      mat.push(isolid, iface, 1.0);
    }
  }
  Ok(mat)
}

/// Every edge column carries exactly two incidences: the two faces
/// sharing the edge, the exterior cell included.
pub fn two_faces_per_edge(mat: &SparseMatrix) -> bool {
  let mut counts = vec![0usize; mat.ncols()];
  for &(_, iedge, _) in mat.triplets() {
    counts[iedge] += 1;
  }
  counts.iter().all(|&count| count == 2)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::basis::CellBasis;

  fn triangle_pair() -> (CellBasis, CellBasis) {
    // two triangles glued along edge (1,2); the outer face is concave in
    // the incidence sense: it contains both endpoints of the shared edge
    let edges = CellBasis::try_new(
      vec![vec![0, 1], vec![1, 2], vec![0, 2], vec![1, 3], vec![2, 3]],
      4,
    )
    .unwrap();
    let faces = CellBasis::try_new(vec![vec![0, 1, 2], vec![1, 2, 3], vec![0, 1, 2, 3]], 4).unwrap();
    (faces, edges)
  }

  #[test]
  fn characteristic_of_triangle() {
    let cells = CellBasis::try_new(vec![vec![0, 1, 2], vec![1, 2, 3]], 4).unwrap();
    let dense = characteristic_matrix(&cells).to_nalgebra_dense();
    let expected = na::DMatrix::from_row_slice(
      2,
      4,
      &[
        1.0, 1.0, 1.0, 0.0, //
        0.0, 1.0, 1.0, 1.0,
      ],
    );
    assert_eq!(dense, expected);
  }

  #[test]
  fn boundary_1_signs_follow_edge_order() {
    let edges = CellBasis::try_new(vec![vec![0, 1], vec![2, 0]], 3).unwrap();
    let dense = boundary_1(&edges).unwrap().to_nalgebra_dense();
    let expected = na::DMatrix::from_row_slice(
      3,
      2,
      &[
        -1.0, 1.0, //
        1.0, 0.0, //
        0.0, -1.0,
      ],
    );
    assert_eq!(dense, expected);
  }

  #[test]
  fn boundary_1_rejects_non_edges() {
    let cells = CellBasis::try_new(vec![vec![0, 1, 2]], 3).unwrap();
    assert!(boundary_1(&cells).is_err());
  }

  #[test]
  fn redundancy_fix_on_glued_triangles() {
    let (faces, edges) = triangle_pair();

    // without repair the outer face reports the shared edge too
    let unfixed = unsigned_coboundary_1(&faces, &edges, true).unwrap();
    assert_eq!(unfixed.nnz(), 11);

    let fixed = unsigned_coboundary_1(&faces, &edges, false).unwrap();
    assert_eq!(fixed.nnz(), 2 * edges.len());
    assert!(two_faces_per_edge(&fixed));
    assert_eq!(fixed.to_nalgebra_dense()[(2, 1)], 0.0);
  }

  #[test]
  fn coboundary_2_requires_convex() {
    let faces = CellBasis::try_new(vec![vec![0, 1, 2]], 4).unwrap();
    let solids = CellBasis::try_new(vec![vec![0, 1, 2, 3]], 4).unwrap();
    assert!(matches!(
      unsigned_coboundary_2(&solids, &faces, false),
      Err(ChainError::Unsupported(_))
    ));
    let mat = unsigned_coboundary_2(&solids, &faces, true).unwrap();
    assert_eq!(mat.to_nalgebra_dense()[(0, 0)], 1.0);
  }
}
