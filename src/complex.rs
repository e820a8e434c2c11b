//! Top-level assembly: from raw vertex/edge(/face) input to the full
//! basis/operator tuple of every dimension.

use crate::{
  arrangement::{PlanarArrangement, PlanarCells, SpatialArrangement, SpatialCells},
  basis::{Cell, CellBasis},
  coords::VertexCoords,
  error::ChainError,
  operators::coboundary_0,
  orientation::coboundary_1,
  sign::Sign,
  sparse::SparseMatrix,
};

use itertools::Itertools;

/// Distinguishes the conventionally-first unbounded cell row of an
/// operator from the bounded ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
  Exterior,
  Bounded,
}

/// Fully assembled planar chain complex.
#[derive(Debug, Clone)]
pub struct ChainComplex2 {
  pub vertices: VertexCoords,
  pub edges: CellBasis,
  pub faces: CellBasis,
  /// Signed edge x vertex operator, every edge tail canonicalized to the
  /// smaller vertex index.
  pub edge_operator: SparseMatrix,
  /// Signed face x edge operator.
  pub face_operator: SparseMatrix,
}

impl ChainComplex2 {
  pub fn euler_characteristic(&self) -> isize {
    self.vertices.nvertices() as isize - self.edges.len() as isize + self.faces.len() as isize
  }
}

/// Fully assembled spatial chain complex.
///
/// The solid operator keeps its exterior row 0; the solid basis holds
/// the bounded solids only.
#[derive(Debug, Clone)]
pub struct ChainComplex3 {
  pub vertices: VertexCoords,
  pub edges: CellBasis,
  pub faces: CellBasis,
  pub solids: CellBasis,
  pub edge_operator: SparseMatrix,
  pub face_operator: SparseMatrix,
  pub solid_operator: SparseMatrix,
}

impl ChainComplex3 {
  /// Bounded cells only; the exterior solid does not count.
  pub fn euler_characteristic(&self) -> isize {
    self.vertices.nvertices() as isize - self.edges.len() as isize + self.faces.len() as isize
      - self.solids.len() as isize
  }

  /// Rows of the solid operator, tagged with their convention role.
  pub fn solid_rows(&self) -> impl Iterator<Item = (CellKind, usize)> + '_ {
    (0..self.solid_operator.nrows()).map(|irow| (solid_row_kind(irow), irow))
  }
}

fn solid_row_kind(irow: usize) -> CellKind {
  match irow {
    0 => CellKind::Exterior,
    _ => CellKind::Bounded,
  }
}

/// Assembles the planar chain complex of a raw edge set.
///
/// The planar arrangement collaborator refines the input into a
/// consistent decomposition and discovers the face basis; the edge and
/// face bases are then re-derived from the refined operators.
pub fn chain_complex_2d(
  vertices: &VertexCoords,
  edges: &CellBasis,
  arrangement: &impl PlanarArrangement,
) -> Result<ChainComplex2, ChainError> {
  let edge_operator = coboundary_0(edges)?;
  let PlanarCells {
    vertices,
    edge_operator,
    face_operator,
  } = arrangement.arrange(vertices, &edge_operator)?;

  let (edge_operator, face_operator, edge_cells) =
    canonicalize_edges(edge_operator, face_operator)?;
  let edges = CellBasis::try_new(edge_cells, vertices.nvertices())?;
  let faces = CellBasis::try_new(
    derive_cells(&face_operator, edges.cells()),
    vertices.nvertices(),
  )?;

  tracing::debug!(
    nvertices = vertices.nvertices(),
    nedges = edges.len(),
    nfaces = faces.len(),
    "assembled planar chain complex"
  );

  Ok(ChainComplex2 {
    vertices,
    edges,
    faces,
    edge_operator,
    face_operator,
  })
}

/// Assembles the spatial chain complex of a raw edge/face input.
///
/// Coboundary-0 and the signed coboundary-1 are computed from the input
/// bases first; the spatial arrangement collaborator then produces the
/// consistent decomposition including the solid operator, from which all
/// cell bases are derived by per-row set union of their lower cells.
pub fn chain_complex_3d(
  vertices: &VertexCoords,
  faces: &CellBasis,
  edges: &CellBasis,
  arrangement: &impl SpatialArrangement,
) -> Result<ChainComplex3, ChainError> {
  let edge_operator = coboundary_0(edges)?;
  let face_operator = coboundary_1(vertices, faces, edges, true, None)?;
  let SpatialCells {
    vertices,
    edge_operator,
    face_operator,
    solid_operator,
  } = arrangement.arrange(vertices, &edge_operator, &face_operator)?;

  let edge_cells = edge_endpoints(&edge_operator)?
    .into_iter()
    .map(|(tail, head)| vec![tail, head])
    .collect();
  let edges = CellBasis::try_new(edge_cells, vertices.nvertices())?;
  let faces = CellBasis::try_new(
    derive_cells(&face_operator, edges.cells()),
    vertices.nvertices(),
  )?;

  let solid_cells = derive_cells(&solid_operator, faces.cells())
    .into_iter()
    .enumerate()
    .filter(|&(irow, _)| solid_row_kind(irow) == CellKind::Bounded)
    .map(|(_, cell)| cell)
    .collect();
  let solids = CellBasis::try_new(solid_cells, vertices.nvertices())?;

  tracing::debug!(
    nvertices = vertices.nvertices(),
    nedges = edges.len(),
    nfaces = faces.len(),
    nsolids = solids.len(),
    "assembled spatial chain complex"
  );

  Ok(ChainComplex3 {
    vertices,
    edges,
    faces,
    solids,
    edge_operator,
    face_operator,
    solid_operator,
  })
}

/// Signed (tail, head) endpoints of every row of an edge x vertex
/// operator.
fn edge_endpoints(edge_operator: &SparseMatrix) -> Result<Vec<(usize, usize)>, ChainError> {
  let nedges = edge_operator.nrows();
  let mut tails = vec![None; nedges];
  let mut heads = vec![None; nedges];
  for &(iedge, ivertex, value) in edge_operator.triplets() {
    match Sign::from_f64(value) {
      Some(Sign::Neg) => tails[iedge] = Some(ivertex),
      Some(Sign::Pos) => heads[iedge] = Some(ivertex),
      None => {}
    }
  }
  (0..nedges)
    .map(|iedge| {
      tails[iedge].zip(heads[iedge]).ok_or_else(|| {
        ChainError::Arrangement(format!(
          "edge {iedge} of the refined edge operator is not a signed vertex pair"
        ))
      })
    })
    .collect()
}

/// Flips every edge row whose tail is not the smaller vertex index and
/// compensates the corresponding face-operator column, so that both
/// operators keep describing the same oriented complex.
fn canonicalize_edges(
  edge_operator: SparseMatrix,
  face_operator: SparseMatrix,
) -> Result<(SparseMatrix, SparseMatrix, Vec<Cell>), ChainError> {
  let endpoints = edge_endpoints(&edge_operator)?;

  let mut flipped = vec![false; endpoints.len()];
  let mut cells = Vec::with_capacity(endpoints.len());
  for (iedge, &(tail, head)) in endpoints.iter().enumerate() {
    if tail <= head {
      cells.push(vec![tail, head]);
    } else {
      flipped[iedge] = true;
      cells.push(vec![head, tail]);
    }
  }

  let edge_operator = negate_where(edge_operator, |irow, _| flipped[irow]);
  let face_operator = negate_where(face_operator, |_, icol| flipped[icol]);
  Ok((edge_operator, face_operator, cells))
}

fn negate_where<F>(mat: SparseMatrix, predicate: F) -> SparseMatrix
where
  F: Fn(usize, usize) -> bool,
{
  let (nrows, ncols, triplets) = mat.into_parts();
  let triplets = triplets
    .into_iter()
    .map(|(r, c, v)| if predicate(r, c) { (r, c, -v) } else { (r, c, v) })
    .collect();
  SparseMatrix::new(nrows, ncols, triplets)
}

/// One cell per operator row: the union of the lower-dimensional cells
/// the row is incident to, as a sorted vertex list.
fn derive_cells(operator: &SparseMatrix, lower: &[Cell]) -> Vec<Cell> {
  let mut row_cols = vec![Vec::new(); operator.nrows()];
  for &(irow, icol, _) in operator.triplets() {
    row_cols[irow].push(icol);
  }
  row_cols
    .into_iter()
    .map(|cols| {
      cols
        .into_iter()
        .flat_map(|icol| lower[icol].iter().copied())
        .sorted()
        .dedup()
        .collect()
    })
    .collect()
}
