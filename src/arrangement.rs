//! External arrangement collaborators, specified at their boundary only.
//!
//! The kernel never computes geometric arrangements itself: it consumes
//! a consistent, non-overlapping decomposition produced behind these
//! traits and derives incidence algebra from it. Any failure of a
//! collaborator (degenerate or duplicate geometry, no consistent
//! decomposition) propagates as a fatal [`ChainError`].

use crate::{coords::VertexCoords, error::ChainError, sparse::SparseMatrix};

/// Output of a planar arrangement: the refined vertex set together with
/// the signed edge x vertex operator and the discovered face x edge
/// operator of the decomposition.
#[derive(Debug, Clone)]
pub struct PlanarCells {
  pub vertices: VertexCoords,
  /// Signed edge x vertex operator of the refined 1-skeleton.
  pub edge_operator: SparseMatrix,
  /// Signed face x edge operator of the discovered face basis.
  pub face_operator: SparseMatrix,
}

/// 3D analogue of [`PlanarCells`], additionally carrying the signed
/// solid x face operator. Row 0 of the solid operator is the exterior
/// (unbounded) cell by convention.
#[derive(Debug, Clone)]
pub struct SpatialCells {
  pub vertices: VertexCoords,
  pub edge_operator: SparseMatrix,
  pub face_operator: SparseMatrix,
  pub solid_operator: SparseMatrix,
}

/// Computes a consistent planar decomposition of raw 1-cells.
///
/// Implementations must guarantee that no two output edges cross outside
/// a shared (possibly inserted) vertex and that every maximal face of
/// the output is a simple cycle.
pub trait PlanarArrangement {
  fn arrange(
    &self,
    vertices: &VertexCoords,
    edge_operator: &SparseMatrix,
  ) -> Result<PlanarCells, ChainError>;
}

/// Computes a mutually non-overlapping spatial cell decomposition.
pub trait SpatialArrangement {
  fn arrange(
    &self,
    vertices: &VertexCoords,
    edge_operator: &SparseMatrix,
    face_operator: &SparseMatrix,
  ) -> Result<SpatialCells, ChainError>;
}

/// Locates the unbounded face among the cycles of a planar face operator.
pub trait ExteriorCycleLocator {
  /// Row index of the unbounded face in `face_operator`.
  fn exterior_cycle(
    &self,
    vertices: &VertexCoords,
    edge_operator: &SparseMatrix,
    face_operator: &SparseMatrix,
  ) -> Result<usize, ChainError>;
}
