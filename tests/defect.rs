use lar::{two_faces_per_edge, unsigned_coboundary_1, CellBasis, ChainError};

/// Comb-shaped region [0,5]x[0,2] with two notch squares [1,2]x[1,2] and
/// [3,4]x[1,2] cut from the top, plus a hexagonal island face floating
/// inside the comb. Vertices 0..11 walk the comb outline, 12..17 the
/// island.
fn comb_edges() -> CellBasis {
  CellBasis::try_new(
    vec![
      vec![0, 1],
      vec![1, 2],
      vec![2, 3],
      vec![3, 4],
      vec![4, 5],
      vec![5, 6],
      vec![6, 7],
      vec![7, 8],
      vec![8, 9],
      vec![9, 10],
      vec![10, 11],
      vec![0, 11],
      vec![3, 6],
      vec![7, 10],
      vec![12, 13],
      vec![13, 14],
      vec![14, 15],
      vec![15, 16],
      vec![16, 17],
      vec![12, 17],
    ],
    18,
  )
  .unwrap()
}

/// Face 0 is the comb itself (every vertex, two notches and the island
/// hole on its boundary), faces 1 and 2 the notch squares, face 3 the
/// island, face 4 the unbounded cell.
fn comb_faces() -> CellBasis {
  CellBasis::try_new(
    vec![
      (0..18).collect(),
      vec![3, 4, 5, 6],
      vec![7, 8, 9, 10],
      vec![12, 13, 14, 15, 16, 17],
      vec![0, 1, 2, 3, 6, 7, 10, 11],
    ],
    18,
  )
  .unwrap()
}

#[test]
fn repairs_the_nonconvex_comb() {
  let edges = comb_edges();
  let faces = comb_faces();

  // the characteristic product sees the notch mouths (3,6) and (7,10) on
  // the comb face too, since the comb contains all of their endpoints
  let unfixed = unsigned_coboundary_1(&faces, &edges, true).unwrap();
  assert_eq!(unfixed.nnz(), 42);
  assert!(!two_faces_per_edge(&unfixed));

  let fixed = unsigned_coboundary_1(&faces, &edges, false).unwrap();
  assert_eq!(fixed.nnz(), 2 * edges.len());
  assert!(two_faces_per_edge(&fixed));

  let dense = fixed.to_nalgebra_dense();
  // the spurious comb incidences are gone
  assert_eq!(dense[(0, 12)], 0.0);
  assert_eq!(dense[(0, 13)], 0.0);
  // the notch mouths stay between their notch square and the exterior
  assert_eq!(dense[(1, 12)], 1.0);
  assert_eq!(dense[(4, 12)], 1.0);
  assert_eq!(dense[(2, 13)], 1.0);
  assert_eq!(dense[(4, 13)], 1.0);
  // the island edges lie between the island and the comb
  for iedge in 14..20 {
    assert_eq!(dense[(0, iedge)], 1.0);
    assert_eq!(dense[(3, iedge)], 1.0);
  }
}

#[test]
fn reports_incidence_deficit() {
  // without the unbounded cell every outline edge has only one face, a
  // deficit the fixer cannot repair
  let edges = CellBasis::try_new(
    vec![vec![0, 1], vec![1, 2], vec![0, 2], vec![1, 3], vec![2, 3]],
    4,
  )
  .unwrap();
  let faces = CellBasis::try_new(vec![vec![0, 1, 2], vec![1, 2, 3]], 4).unwrap();
  assert!(matches!(
    unsigned_coboundary_1(&faces, &edges, false),
    Err(ChainError::Unsupported(_))
  ));
}
