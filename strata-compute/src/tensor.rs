//! Tensor and shape types shared by kernel programs and layers
//!
//! Tensors are rectangular arrays of `f64` cells of rank 2 or rank 3, stored
//! depth-major, then row-major, then column-minor: an `Array2` is indexed
//! `[y, x]` and an `Array3` is indexed `[z, y, x]`. Rank is carried in the
//! type as an explicit variant rather than an optional depth field, so rank
//! dispatch is a `match`, never a null check.

use std::fmt;

use ndarray::{Array2, Array3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ComputeError, Result};

// === SHAPE ===

/// Dimensions of a tensor, fixed for the life of whatever owns it.
///
/// `width` is the column count (innermost axis), `height` the row count.
/// A missing depth, or a depth of 1, denotes rank-2 operation; use
/// [`TensorShape::from_dims`] to apply that normalization when adopting
/// dimensions from an upstream layer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TensorShape {
  Rank2 { width: usize, height: usize },
  Rank3 { width: usize, height: usize, depth: usize },
}

impl TensorShape {
  /// Rank-2 shape of `width` columns by `height` rows.
  pub fn rank2(width: usize, height: usize) -> Self {
    TensorShape::Rank2 { width, height }
  }

  /// Rank-3 shape of `depth` stacked `width` x `height` slices.
  pub fn rank3(width: usize, height: usize, depth: usize) -> Self {
    TensorShape::Rank3 {
      width,
      height,
      depth,
    }
  }

  /// Builds a shape from layer-style dimensions. A depth that is absent or
  /// not greater than 1 selects rank-2 operation.
  pub fn from_dims(width: usize, height: usize, depth: Option<usize>) -> Self {
    match depth {
      Some(depth) if depth > 1 => TensorShape::Rank3 {
        width,
        height,
        depth,
      },
      _ => TensorShape::Rank2 { width, height },
    }
  }

  pub fn width(&self) -> usize {
    match *self {
      TensorShape::Rank2 { width, .. } | TensorShape::Rank3 { width, .. } => width,
    }
  }

  pub fn height(&self) -> usize {
    match *self {
      TensorShape::Rank2 { height, .. } | TensorShape::Rank3 { height, .. } => height,
    }
  }

  /// Depth of a rank-3 shape; `None` for rank 2.
  pub fn depth(&self) -> Option<usize> {
    match *self {
      TensorShape::Rank2 { .. } => None,
      TensorShape::Rank3 { depth, .. } => Some(depth),
    }
  }

  /// Total number of cells in the coordinate space.
  pub fn total_cells(&self) -> usize {
    match *self {
      TensorShape::Rank2 { width, height } => width * height,
      TensorShape::Rank3 {
        width,
        height,
        depth,
      } => width * height * depth,
    }
  }
}

impl fmt::Display for TensorShape {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      TensorShape::Rank2 { width, height } => write!(f, "[{}, {}]", width, height),
      TensorShape::Rank3 {
        width,
        height,
        depth,
      } => write!(f, "[{}, {}, {}]", width, height, depth),
    }
  }
}

// === TENSOR ===

/// A rank-2 or rank-3 rectangular array of `f64` cells.
#[derive(Debug, Clone, PartialEq)]
pub enum Tensor {
  Rank2(Array2<f64>),
  Rank3(Array3<f64>),
}

impl Tensor {
  /// A zero-filled tensor of the given shape.
  pub fn zeros(shape: TensorShape) -> Self {
    match shape {
      TensorShape::Rank2 { width, height } => Tensor::Rank2(Array2::zeros((height, width))),
      TensorShape::Rank3 {
        width,
        height,
        depth,
      } => Tensor::Rank3(Array3::zeros((depth, height, width))),
    }
  }

  /// Builds a rank-2 tensor from nested rows, rejecting jagged input.
  pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
    let height = rows.len();
    if height == 0 {
      return Err(ComputeError::InvalidShape("no rows".to_string()));
    }
    let width = rows[0].len();
    if width == 0 {
      return Err(ComputeError::InvalidShape("empty rows".to_string()));
    }

    let mut data = Array2::zeros((height, width));
    for (y, row) in rows.iter().enumerate() {
      if row.len() != width {
        return Err(ComputeError::JaggedTensor {
          index: y,
          expected: width,
          actual: row.len(),
        });
      }
      for (x, &value) in row.iter().enumerate() {
        data[[y, x]] = value;
      }
    }
    Ok(Tensor::Rank2(data))
  }

  /// Builds a rank-3 tensor from nested depth slices, rejecting jagged input
  /// at every nesting level.
  pub fn from_slices(slices: &[Vec<Vec<f64>>]) -> Result<Self> {
    let depth = slices.len();
    if depth == 0 {
      return Err(ComputeError::InvalidShape("no depth slices".to_string()));
    }
    let height = slices[0].len();
    let width = slices[0].first().map_or(0, Vec::len);
    if height == 0 || width == 0 {
      return Err(ComputeError::InvalidShape("empty depth slice".to_string()));
    }

    let mut data = Array3::zeros((depth, height, width));
    for (z, slice) in slices.iter().enumerate() {
      if slice.len() != height {
        return Err(ComputeError::JaggedTensor {
          index: z,
          expected: height,
          actual: slice.len(),
        });
      }
      for (y, row) in slice.iter().enumerate() {
        if row.len() != width {
          return Err(ComputeError::JaggedTensor {
            index: y,
            expected: width,
            actual: row.len(),
          });
        }
        for (x, &value) in row.iter().enumerate() {
          data[[z, y, x]] = value;
        }
      }
    }
    Ok(Tensor::Rank3(data))
  }

  pub fn shape(&self) -> TensorShape {
    match self {
      Tensor::Rank2(data) => TensorShape::Rank2 {
        width: data.ncols(),
        height: data.nrows(),
      },
      Tensor::Rank3(data) => {
        let (depth, height, width) = data.dim();
        TensorShape::Rank3 {
          width,
          height,
          depth,
        }
      }
    }
  }

  /// Cell read used by rank-2 kernel programs.
  ///
  /// The dispatcher validates input shapes against the kernel's bound output
  /// shape before scheduling, so reaching a rank-3 tensor here is a
  /// dispatcher bug, not a caller error.
  pub fn cell_2d(&self, x: usize, y: usize) -> f64 {
    match self {
      Tensor::Rank2(data) => data[[y, x]],
      Tensor::Rank3(_) => panic!("rank-2 cell read on a rank-3 tensor"),
    }
  }

  /// Cell read used by rank-3 kernel programs. See [`Tensor::cell_2d`].
  pub fn cell_3d(&self, x: usize, y: usize, z: usize) -> f64 {
    match self {
      Tensor::Rank3(data) => data[[z, y, x]],
      Tensor::Rank2(_) => panic!("rank-3 cell read on a rank-2 tensor"),
    }
  }

  pub fn as_rank2(&self) -> Option<&Array2<f64>> {
    match self {
      Tensor::Rank2(data) => Some(data),
      Tensor::Rank3(_) => None,
    }
  }

  pub fn as_rank3(&self) -> Option<&Array3<f64>> {
    match self {
      Tensor::Rank3(data) => Some(data),
      Tensor::Rank2(_) => None,
    }
  }
}

impl From<Array2<f64>> for Tensor {
  fn from(data: Array2<f64>) -> Self {
    Tensor::Rank2(data)
  }
}

impl From<Array3<f64>> for Tensor {
  fn from(data: Array3<f64>) -> Self {
    Tensor::Rank3(data)
  }
}

// === TESTS ===

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn shape_from_dims_normalizes_depth() {
    assert_eq!(
      TensorShape::from_dims(4, 3, None),
      TensorShape::rank2(4, 3)
    );
    assert_eq!(
      TensorShape::from_dims(4, 3, Some(1)),
      TensorShape::rank2(4, 3)
    );
    assert_eq!(
      TensorShape::from_dims(4, 3, Some(2)),
      TensorShape::rank3(4, 3, 2)
    );
  }

  #[test]
  fn shape_accessors() {
    let shape = TensorShape::rank3(4, 3, 2);
    assert_eq!(shape.width(), 4);
    assert_eq!(shape.height(), 3);
    assert_eq!(shape.depth(), Some(2));
    assert_eq!(shape.total_cells(), 24);
    assert_eq!(TensorShape::rank2(4, 3).depth(), None);
  }

  #[test]
  fn zeros_matches_requested_shape() {
    let tensor = Tensor::zeros(TensorShape::rank3(5, 4, 3));
    assert_eq!(tensor.shape(), TensorShape::rank3(5, 4, 3));
    assert_eq!(tensor.cell_3d(4, 3, 2), 0.0);
  }

  #[test]
  fn from_rows_preserves_layout() {
    let tensor = Tensor::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    assert_eq!(tensor.shape(), TensorShape::rank2(3, 2));
    // x selects the column, y the row
    assert_eq!(tensor.cell_2d(2, 0), 3.0);
    assert_eq!(tensor.cell_2d(0, 1), 4.0);
  }

  #[test]
  fn from_rows_rejects_jagged_input() {
    let err = Tensor::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
    assert!(matches!(
      err,
      ComputeError::JaggedTensor {
        index: 1,
        expected: 2,
        actual: 1
      }
    ));
  }

  #[test]
  fn from_slices_preserves_depth_major_layout() {
    let tensor = Tensor::from_slices(&[
      vec![vec![1.0, 2.0], vec![3.0, 4.0]],
      vec![vec![5.0, 6.0], vec![7.0, 8.0]],
    ])
    .unwrap();
    assert_eq!(tensor.shape(), TensorShape::rank3(2, 2, 2));
    assert_eq!(tensor.cell_3d(1, 0, 1), 6.0);
  }

  #[test]
  fn from_slices_rejects_jagged_slices() {
    let err = Tensor::from_slices(&[
      vec![vec![1.0, 2.0], vec![3.0, 4.0]],
      vec![vec![5.0, 6.0]],
    ])
    .unwrap_err();
    assert!(matches!(err, ComputeError::JaggedTensor { .. }));
  }
}
