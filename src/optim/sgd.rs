use crate::network::{backward::Gradients, params::Parameters};

pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one SGD update in place: `p -= lr * g` for alpha and beta.
    pub fn step(&self, params: &mut Parameters, grads: &Gradients) {
        descend(&mut params.alpha.data, &grads.alpha.data, self.learning_rate);
        descend(&mut params.beta.data, &grads.beta.data, self.learning_rate);
    }
}

fn descend(weights: &mut [Vec<f64>], grads: &[Vec<f64>], lr: f64) {
    assert_eq!(weights.len(), grads.len(), "gradient rows do not match parameter rows");
    for (w_row, g_row) in weights.iter_mut().zip(grads.iter()) {
        assert_eq!(w_row.len(), g_row.len(), "gradient columns do not match parameter columns");
        for (w, g) in w_row.iter_mut().zip(g_row.iter()) {
            *w -= lr * g;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Matrix;

    fn grads(alpha: Matrix, beta: Matrix) -> Gradients {
        Gradients {
            a: Matrix::default(),
            b: Matrix::default(),
            z: Matrix::default(),
            alpha,
            beta,
        }
    }

    #[test]
    fn step_moves_against_gradient() {
        let mut params = Parameters {
            alpha: Matrix::from_data(vec![vec![0.0, 1.0]]),
            beta: Matrix::from_data(vec![vec![0.5, 0.5]]),
        };
        let g = grads(
            Matrix::from_data(vec![vec![1.0, -2.0]]),
            Matrix::from_data(vec![vec![0.0, 4.0]]),
        );
        Sgd::new(0.25).step(&mut params, &g);
        assert_eq!(params.alpha.data, vec![vec![-0.25, 1.5]]);
        assert_eq!(params.beta.data, vec![vec![0.5, -0.5]]);
    }

    #[test]
    fn zero_learning_rate_is_a_no_op() {
        let original = Parameters {
            alpha: Matrix::from_data(vec![vec![0.0, 0.3]]),
            beta: Matrix::from_data(vec![vec![-0.7, 0.0]]),
        };
        let mut params = original.clone();
        let g = grads(
            Matrix::from_data(vec![vec![3.0, -1.0]]),
            Matrix::from_data(vec![vec![-2.0, 5.0]]),
        );
        Sgd::new(0.0).step(&mut params, &g);
        assert_eq!(params, original);
    }
}
