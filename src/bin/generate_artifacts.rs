//! Writes a demonstration `scaler.json`, `model.json` and `sample_batch.csv`
//! into the given directory (default: current directory), so the app can be
//! started without a trained model.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use frp_bond_predictor::features::FEATURE_COUNT;
use frp_bond_predictor::model::{ModelArtifact, ScalerArtifact, Tree};

/// SplitMix64: enough for reproducible sample rows.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }

    /// One of `1..=max`.
    fn code(&mut self, max: u8) -> f64 {
        (1 + self.next_u64() % max as u64) as f64
    }

    fn pick(&mut self, choices: &[f64]) -> f64 {
        choices[(self.next_u64() % choices.len() as u64) as usize]
    }
}

/// Column statistics of a typical pull-out test database.
fn demo_scaler() -> ScalerArtifact {
    ScalerArtifact::Standard {
        mean: vec![45.0, 2.6, 1.5, 2.8, 12.5, 95.0, 42.0, 4.2],
        scale: vec![60.0, 1.3, 0.7, 1.4, 3.8, 48.0, 13.0, 2.1],
    }
}

/// A depth-3 regression tree over scaled fc, d, T and FM.
fn demo_model() -> ModelArtifact {
    const L: i64 = -1;
    let tree = Tree {
        //                  0   1   2   3   4   5   6   7   8   9  10  11  12  13  14
        children_left: vec![1, 3, 5, 7, 9, 11, 13, L, L, L, L, L, L, L, L],
        children_right: vec![2, 4, 6, 8, 10, 12, 14, L, L, L, L, L, L, L, L],
        feature: vec![6, 4, 0, 1, 0, 4, 1, -2, -2, -2, -2, -2, -2, -2, -2],
        threshold: vec![
            0.15, -0.2, 1.1, -0.5, 0.9, 0.3, 0.2, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0, -2.0,
        ],
        value: vec![
            14.2, 11.8, 17.1, 13.9, 9.6, 18.4, 12.3, 12.1, 15.2, 10.4, 6.8, 19.6, 16.3, 13.5, 9.2,
        ],
    };
    ModelArtifact::DecisionTree {
        n_features: FEATURE_COUNT,
        tree,
    }
}

fn sample_rows(rng: &mut SampleRng, n: usize) -> Vec<[f64; FEATURE_COUNT]> {
    (0..n)
        .map(|_| {
            [
                rng.pick(&[20.0, 25.0, 60.0, 100.0, 200.0]),
                rng.code(5),
                rng.code(3),
                rng.code(5),
                rng.pick(&[6.0, 8.0, 10.0, 12.0, 16.0, 20.0]),
                (rng.uniform(40.0, 250.0) / 5.0).round() * 5.0,
                (rng.uniform(25.0, 65.0) * 10.0).round() / 10.0,
                (rng.uniform(1.0, 8.0) * 100.0).round() / 100.0,
            ]
        })
        .collect()
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir).context("creating output directory")?;

    let scaler = demo_scaler();
    let model = demo_model();
    scaler.validate()?;
    model.validate()?;
    write_json(&out_dir.join("scaler.json"), &scaler)?;
    write_json(&out_dir.join("model.json"), &model)?;

    let mut rng = SampleRng(42);
    let rows = sample_rows(&mut rng, 10);
    let csv_path = out_dir.join("sample_batch.csv");
    let mut writer = csv::Writer::from_path(&csv_path).context("creating sample CSV")?;
    for row in &rows {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;

    println!(
        "Wrote scaler.json, model.json and {} sample rows to {}",
        rows.len(),
        out_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use frp_bond_predictor::features::FeatureVector;

    use super::*;

    #[test]
    fn sample_rows_are_valid_specimens() {
        let mut rng = SampleRng(7);
        for row in sample_rows(&mut rng, 200) {
            assert!(FeatureVector::from_row(row).is_ok(), "{row:?}");
        }
    }

    #[test]
    fn demo_artifacts_validate() {
        assert!(demo_scaler().validate().is_ok());
        assert!(demo_model().validate().is_ok());
    }
}
