/// Toy classification demo for ferrite-mlp.
///
/// Ten classes, each owning a block of three binary features. Examples
/// switch on their class's block plus one bit of deterministic noise.
///
/// Run with:
///   cargo run --example toy_digits

use ferrite_mlp::{train_and_validate, Dataset, InitMode, Matrix, TrainConfig};

const FEATURES: usize = 30;

fn make_split(per_class: usize, offset: usize) -> Dataset {
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for class in 0..10 {
        for i in 0..per_class {
            let mut row = vec![0.0; FEATURES];
            for j in 0..3 {
                row[3 * class + j] = 1.0;
            }
            let noise = (7 * (i + offset) + 3 * class) % FEATURES;
            row[noise] = 1.0;
            rows.push(row);
            labels.push(class);
        }
    }
    Dataset::new(Matrix::from_data(rows), labels, 10).expect("toy dataset is well-formed")
}

fn main() {
    env_logger::init();

    let train = make_split(6, 0);
    let valid = make_split(2, 100);
    let config = TrainConfig::new(8, 15, InitMode::Uniform, 0.1).with_seed(2024);

    let report = train_and_validate(&train, &valid, &config).expect("training failed");

    for (epoch, (tr, va)) in report.train_losses.iter().zip(report.valid_losses.iter()).enumerate() {
        println!("Epoch {:>2}: train loss = {:.6}, validation loss = {:.6}", epoch + 1, tr, va);
    }
    println!("Train error:      {:.4}", report.train_error);
    println!("Validation error: {:.4}", report.valid_error);
    println!("Validation predictions: {:?}", report.valid_predictions);
}
