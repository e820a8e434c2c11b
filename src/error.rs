/// Error taxonomy of the kernel.
///
/// Every error is terminal for the current assembly call: there is no
/// retry and no fallback orientation. Callers are expected to validate
/// and clean their geometry before invoking the operators.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
  #[error("cell {cell} is empty")]
  EmptyCell { cell: usize },

  #[error("cell {cell} has {len} vertices, expected {expected}")]
  CellArity {
    cell: usize,
    len: usize,
    expected: usize,
  },

  #[error("cell {cell} lists vertex {vertex} more than once")]
  DuplicateVertex { cell: usize, vertex: usize },

  #[error("cell {cell} references vertex {vertex}, but only {nvertices} vertices exist")]
  VertexOutOfRange {
    cell: usize,
    vertex: usize,
    nvertices: usize,
  },

  #[error("incidence repair left {nnz} entries, expected {expected} (two faces per edge)")]
  RedundancyUnfixed { nnz: usize, expected: usize },

  #[error("face {face} has a branching or disconnected edge set, not a single boundary cycle")]
  BrokenCycle { face: usize },

  #[error("edge {edge} is not shared by exactly two faces of opposite orientation")]
  IncoherentOrientation { edge: usize },

  #[error("exterior cycle locator returned row {face}, but only {nfaces} faces exist")]
  ExteriorOutOfRange { face: usize, nfaces: usize },

  #[error("unsupported configuration: {0}")]
  Unsupported(&'static str),

  #[error("arrangement failed: {0}")]
  Arrangement(String),
}
