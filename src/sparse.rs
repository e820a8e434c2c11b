//! Growable triplet sparse matrix, finalized to compressed formats on
//! demand.
//!
//! Incidence operators are built by pushing one entry per relation while
//! still under construction (the redundancy fixer and the orientation
//! tracer both act on a matrix in this state) and only converted to a
//! compressed `nalgebra-sparse` structure when queried or multiplied.

#[derive(Default, Debug, Clone)]
pub struct SparseMatrix {
  nrows: usize,
  ncols: usize,
  triplets: Vec<(usize, usize, f64)>,
}

impl SparseMatrix {
  pub fn zeros(nrows: usize, ncols: usize) -> Self {
    Self::new(nrows, ncols, Vec::new())
  }
  pub fn new(nrows: usize, ncols: usize, triplets: Vec<(usize, usize, f64)>) -> Self {
    Self {
      nrows,
      ncols,
      triplets,
    }
  }

  pub fn nrows(&self) -> usize {
    self.nrows
  }
  pub fn ncols(&self) -> usize {
    self.ncols
  }
  pub fn nnz(&self) -> usize {
    self.triplets.len()
  }
  pub fn triplets(&self) -> &[(usize, usize, f64)] {
    &self.triplets
  }

  pub fn into_parts(self) -> (usize, usize, Vec<(usize, usize, f64)>) {
    (self.nrows, self.ncols, self.triplets)
  }

  pub fn push(&mut self, r: usize, c: usize, v: f64) {
    assert!(r < self.nrows() && c < self.ncols());
    if v != 0.0 {
      self.triplets.push((r, c, v));
    }
  }

  /// Drops every entry whose position satisfies the predicate.
  pub fn set_zero<F>(&mut self, predicate: F)
  where
    F: Fn(usize, usize) -> bool,
  {
    let mut i = 0;
    while i < self.triplets.len() {
      let (r, c, _) = self.triplets[i];
      if predicate(r, c) {
        self.triplets.swap_remove(i);
      } else {
        i += 1;
      }
    }
  }

  pub fn transpose(&self) -> SparseMatrix {
    let mut triplets = self.triplets.clone();
    for t in &mut triplets {
      std::mem::swap(&mut t.0, &mut t.1);
    }
    Self::new(self.ncols, self.nrows, triplets)
  }

  pub fn to_nalgebra_coo(&self) -> nas::CooMatrix<f64> {
    let rows = self.triplets.iter().map(|t| t.0).collect();
    let cols = self.triplets.iter().map(|t| t.1).collect();
    let vals = self.triplets.iter().map(|t| t.2).collect();
    nas::CooMatrix::try_from_triplets(self.nrows, self.ncols, rows, cols, vals).unwrap()
  }

  pub fn to_nalgebra_csr(&self) -> nas::CsrMatrix<f64> {
    (&self.to_nalgebra_coo()).into()
  }

  pub fn to_nalgebra_dense(&self) -> na::DMatrix<f64> {
    (&self.to_nalgebra_coo()).into()
  }
}

#[cfg(test)]
mod test {
  use super::SparseMatrix;

  #[test]
  fn set_zero_drops_predicated_entries() {
    let mut mat = SparseMatrix::zeros(2, 3);
    mat.push(0, 0, 1.0);
    mat.push(0, 2, 1.0);
    mat.push(1, 1, -1.0);
    mat.set_zero(|_, c| c == 2);
    assert_eq!(mat.nnz(), 2);
    let dense = mat.to_nalgebra_dense();
    assert_eq!(dense[(0, 2)], 0.0);
    assert_eq!(dense[(1, 1)], -1.0);
  }

  #[test]
  fn transpose_swaps_shape() {
    let mut mat = SparseMatrix::zeros(2, 3);
    mat.push(1, 2, -1.0);
    let t = mat.transpose();
    assert_eq!((t.nrows(), t.ncols()), (3, 2));
    assert_eq!(t.to_nalgebra_dense()[(2, 1)], -1.0);
  }
}
