//! Chain-complex (LAR) kernel for cellular complexes.
//!
//! Builds the Linear Algebraic Representation of a cellular complex:
//! given raw cells as vertex-index sets, derives at every dimension the
//! signed incidence operators relating vertices, edges, faces and solids.
//!
//! - Characteristic (cell x vertex) matrices
//! - Signed boundary/coboundary operators between chain spaces
//! - Redundancy repair for non-convex cells
//! - Per-face cycle tracing for coherent boundary orientation
//! - 2D/3D chain-complex assembly on top of external arrangement
//!   collaborators

extern crate nalgebra as na;
extern crate nalgebra_sparse as nas;

pub mod arrangement;
pub mod basis;
pub mod complex;
pub mod coords;
pub mod error;
pub mod operators;
pub mod orientation;
pub mod sign;
pub mod sparse;

pub type Dim = usize;
pub type VertexIdx = usize;

pub use arrangement::{
  ExteriorCycleLocator, PlanarArrangement, PlanarCells, SpatialArrangement, SpatialCells,
};
pub use basis::{Cell, CellBasis};
pub use complex::{chain_complex_2d, chain_complex_3d, CellKind, ChainComplex2, ChainComplex3};
pub use coords::VertexCoords;
pub use error::ChainError;
pub use operators::{
  boundary_1, characteristic_matrix, coboundary_0, two_faces_per_edge, unsigned_coboundary_1,
  unsigned_coboundary_2,
};
pub use orientation::coboundary_1;
pub use sign::Sign;
pub use sparse::SparseMatrix;
