use crate::error::{NnError, Result};
use crate::math::matrix::Matrix;

/// Feature rows and their class labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// (N, M) feature matrix, no bias column.
    pub features: Matrix,
    /// N labels in `[0, num_classes)`.
    pub labels: Vec<usize>,
}

impl Dataset {
    /// Pairs `features` with `labels`, checking row counts and label range.
    pub fn new(features: Matrix, labels: Vec<usize>, num_classes: usize) -> Result<Dataset> {
        if features.rows != labels.len() {
            return Err(NnError::ShapeMismatch(format!(
                "{} feature rows but {} labels",
                features.rows,
                labels.len()
            )));
        }
        if let Some(&label) = labels.iter().find(|&&l| l >= num_classes) {
            return Err(NnError::InvalidLabel { label, num_classes });
        }
        Ok(Dataset { features, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn num_features(&self) -> usize {
        self.features.cols
    }

    /// Features with the leading ones column the linear layers expect.
    pub fn features_with_bias(&self) -> Matrix {
        self.features.with_bias_column()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_row_count_mismatch() {
        let features = Matrix::zeros(3, 2);
        assert!(matches!(
            Dataset::new(features, vec![0, 1], 10),
            Err(NnError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn rejects_labels_outside_class_range() {
        let features = Matrix::zeros(2, 2);
        assert!(matches!(
            Dataset::new(features, vec![0, 4], 4),
            Err(NnError::InvalidLabel { label: 4, num_classes: 4 })
        ));
    }

    #[test]
    fn bias_column_is_prepended() {
        let ds = Dataset::new(Matrix::from_data(vec![vec![0.0, 1.0]]), vec![3], 10).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.num_features(), 2);
        assert_eq!(ds.features_with_bias().data, vec![vec![1.0, 0.0, 1.0]]);
    }
}
