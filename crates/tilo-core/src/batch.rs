//! Row-major batch buffers and the [`Shape`] descriptor.

use crate::error::FeatureError;
use smallvec::{smallvec, SmallVec};

/// Ordered axis lengths of a space or tensor.
///
/// Inline capacity of four covers every vector and image-shaped space
/// without heap allocation.
pub type Shape = SmallVec<[usize; 4]>;

/// Number of scalar components described by `shape`.
///
/// The empty shape describes a scalar and has one component.
pub fn component_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// A batch of equally sized `f32` rows stored in one flat buffer.
///
/// The outer axis is the batch axis; each row is one observation, goal
/// or feature vector of `width` components.
///
/// # Examples
///
/// ```
/// use tilo_core::Batch;
///
/// let batch = Batch::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3).unwrap();
/// assert_eq!(batch.rows(), 2);
/// assert_eq!(batch.width(), 3);
/// assert_eq!(batch.row(1), &[4.0, 5.0, 6.0]);
///
/// assert!(Batch::new(vec![1.0, 2.0, 3.0], 2).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    data: Vec<f32>,
    width: usize,
}

impl Batch {
    /// Wrap a flat buffer as rows of `width` components.
    ///
    /// Returns `Err(FeatureError::RaggedBatch)` if the buffer length is
    /// not a multiple of `width`, or if `width == 0` with a non-empty
    /// buffer.
    pub fn new(data: Vec<f32>, width: usize) -> Result<Self, FeatureError> {
        let ragged = if width == 0 {
            !data.is_empty()
        } else {
            data.len() % width != 0
        };
        if ragged {
            return Err(FeatureError::RaggedBatch {
                len: data.len(),
                width,
            });
        }
        Ok(Self { data, width })
    }

    /// A batch holding a single row.
    pub fn from_row(row: Vec<f32>) -> Self {
        let width = row.len();
        Self { data: row, width }
    }

    /// Copy a slice of rows into a batch.
    ///
    /// Returns `Err(FeatureError::WidthMismatch)` if the rows differ in
    /// length. An empty slice produces an empty batch of width 0.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self, FeatureError> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(width * rows.len());
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(FeatureError::WidthMismatch {
                    operand: "row",
                    expected: width,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, width })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.data.len() / self.width
        }
    }

    /// Components per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// `true` if the batch holds no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `[rows, width]`.
    pub fn shape(&self) -> Shape {
        smallvec![self.rows(), self.width]
    }

    /// Borrow row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.rows()`.
    pub fn row(&self, index: usize) -> &[f32] {
        &self.data[index * self.width..(index + 1) * self.width]
    }

    /// Iterate over rows in batch order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks_exact(0) panics; a zero-width batch has no rows.
        self.data.chunks_exact(self.width.max(1)).take(self.rows())
    }

    /// Iterate mutably over rows in batch order.
    pub fn iter_rows_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        let rows = self.rows();
        self.data.chunks_exact_mut(self.width.max(1)).take(rows)
    }

    /// The flat row-major buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consume the batch, returning the flat buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Check that this batch has `expected` components per row.
    pub fn expect_width(&self, operand: &'static str, expected: usize) -> Result<(), FeatureError> {
        if self.width != expected {
            return Err(FeatureError::WidthMismatch {
                operand,
                expected,
                actual: self.width,
            });
        }
        Ok(())
    }
}
