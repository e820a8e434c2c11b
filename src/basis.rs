use crate::{error::ChainError, VertexIdx};

use itertools::Itertools;

/// One topological cell: the vertices it is built from, in storage order.
///
/// Semantically a set; an edge has exactly two entries, a face at least
/// three (in no particular rotational order).
pub type Cell = Vec<VertexIdx>;

/// An ordered sequence of same-dimension cells over a fixed vertex count.
///
/// Insertion order is significant: it is the row/column addressing scheme
/// of every operator derived from the basis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBasis {
  cells: Vec<Cell>,
  nvertices: usize,
}

impl CellBasis {
  pub fn try_new(cells: Vec<Cell>, nvertices: usize) -> Result<Self, ChainError> {
    for (icell, cell) in cells.iter().enumerate() {
      if cell.is_empty() {
        return Err(ChainError::EmptyCell { cell: icell });
      }
      for &vertex in cell {
        if vertex >= nvertices {
          return Err(ChainError::VertexOutOfRange {
            cell: icell,
            vertex,
            nvertices,
          });
        }
      }
      if let Some(&vertex) = cell.iter().duplicates().next() {
        return Err(ChainError::DuplicateVertex {
          cell: icell,
          vertex,
        });
      }
    }
    Ok(Self { cells, nvertices })
  }

  pub fn len(&self) -> usize {
    self.cells.len()
  }
  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }
  pub fn nvertices(&self) -> usize {
    self.nvertices
  }

  pub fn cells(&self) -> &[Cell] {
    &self.cells
  }
  pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
    self.cells.iter()
  }
  pub fn into_cells(self) -> Vec<Cell> {
    self.cells
  }

  /// Every cell must be an edge: exactly two (distinct) vertices.
  pub fn check_edges(&self) -> Result<(), ChainError> {
    for (icell, cell) in self.cells.iter().enumerate() {
      if cell.len() != 2 {
        return Err(ChainError::CellArity {
          cell: icell,
          len: cell.len(),
          expected: 2,
        });
      }
    }
    Ok(())
  }
}

impl std::ops::Index<usize> for CellBasis {
  type Output = Cell;
  fn index(&self, index: usize) -> &Self::Output {
    &self.cells[index]
  }
}

#[cfg(test)]
mod test {
  use super::CellBasis;
  use crate::error::ChainError;

  #[test]
  fn rejects_out_of_range_vertex() {
    let err = CellBasis::try_new(vec![vec![0, 4]], 4).unwrap_err();
    assert!(matches!(err, ChainError::VertexOutOfRange { vertex: 4, .. }));
  }

  #[test]
  fn rejects_duplicate_vertex() {
    let err = CellBasis::try_new(vec![vec![1, 2, 1]], 4).unwrap_err();
    assert!(matches!(err, ChainError::DuplicateVertex { vertex: 1, .. }));
  }

  #[test]
  fn edge_check_rejects_triangle() {
    let basis = CellBasis::try_new(vec![vec![0, 1], vec![0, 1, 2]], 3).unwrap();
    assert!(matches!(
      basis.check_edges(),
      Err(ChainError::CellArity { cell: 1, len: 3, .. })
    ));
  }
}
