use crate::Dim;

/// Ambient vertex coordinates, one column per vertex.
///
/// The kernel itself never evaluates geometric predicates on these; they
/// are carried for the arrangement collaborators, which do.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexCoords {
  matrix: na::DMatrix<f64>,
}

impl VertexCoords {
  pub fn new(matrix: na::DMatrix<f64>) -> Self {
    Self { matrix }
  }

  pub fn dim(&self) -> Dim {
    self.matrix.nrows()
  }
  pub fn nvertices(&self) -> usize {
    self.matrix.ncols()
  }

  pub fn coord(&self, ivertex: usize) -> na::DVectorView<'_, f64> {
    self.matrix.column(ivertex)
  }
  pub fn matrix(&self) -> &na::DMatrix<f64> {
    &self.matrix
  }
  pub fn into_matrix(self) -> na::DMatrix<f64> {
    self.matrix
  }
}

impl From<na::DMatrix<f64>> for VertexCoords {
  fn from(matrix: na::DMatrix<f64>) -> Self {
    Self::new(matrix)
  }
}
