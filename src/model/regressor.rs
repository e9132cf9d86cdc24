use serde::{Deserialize, Serialize};

use super::{ArtifactError, Matrix, PredictionError, Regressor};

/// `children_left` marker for a leaf node.
pub const LEAF: i64 = -1;

// ---------------------------------------------------------------------------
// Tree – flat node arrays
// ---------------------------------------------------------------------------

/// A fitted regression tree in flat array form. Node `i` is a leaf when
/// `children_left[i] == -1`; otherwise a sample goes left when
/// `x[feature[i]] <= threshold[i]` and right otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl Tree {
    /// A single-leaf tree.
    pub fn constant(value: f64) -> Self {
        Self {
            children_left: vec![LEAF],
            children_right: vec![LEAF],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![value],
        }
    }

    pub fn node_count(&self) -> usize {
        self.value.len()
    }

    /// Children must point forward, which rules out cycles and makes
    /// `evaluate` terminate.
    fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        let lens = [
            self.children_left.len(),
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
        ];
        if lens.iter().any(|&l| l != n) {
            return Err(format!("node arrays differ in length: {lens:?} vs {n} values"));
        }
        for i in 0..n {
            let (l, r) = (self.children_left[i], self.children_right[i]);
            if l == LEAF {
                if r != LEAF {
                    return Err(format!("node {i} has a right child but no left child"));
                }
                continue;
            }
            for child in [l, r] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(format!("node {i} has out-of-order child {child}"));
                }
            }
            let f = self.feature[i];
            if f < 0 || f as usize >= n_features {
                return Err(format!("node {i} splits on unknown feature {f}"));
            }
            if self.threshold[i].is_nan() {
                return Err(format!("node {i} has a NaN threshold"));
            }
        }
        Ok(())
    }

    pub fn evaluate(&self, row: &[f64]) -> f64 {
        let mut node = 0;
        loop {
            let left = self.children_left[node];
            if left == LEAF {
                return self.value[node];
            }
            let x = row[self.feature[node] as usize];
            node = if x <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

// ---------------------------------------------------------------------------
// Model artifact
// ---------------------------------------------------------------------------

/// A fitted regression model, tagged by `kind` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    DecisionTree {
        n_features: usize,
        tree: Tree,
    },
    /// Mean of the tree outputs.
    RandomForest {
        n_features: usize,
        trees: Vec<Tree>,
    },
    /// `init + learning_rate * sum(tree outputs)`.
    GradientBoosting {
        n_features: usize,
        init: f64,
        learning_rate: f64,
        trees: Vec<Tree>,
    },
}

impl ModelArtifact {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let check_trees = |n_features: usize, trees: &[Tree]| -> Result<(), String> {
            if n_features == 0 {
                return Err("n_features must be positive".into());
            }
            if trees.is_empty() {
                return Err("ensemble has no trees".into());
            }
            for (i, tree) in trees.iter().enumerate() {
                tree.validate(n_features).map_err(|e| format!("tree {i}: {e}"))?;
            }
            Ok(())
        };

        let result = match self {
            ModelArtifact::Linear {
                coefficients,
                intercept,
            } => {
                if coefficients.is_empty() {
                    Err("no coefficients".to_string())
                } else if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    Err("coefficients must be finite".to_string())
                } else {
                    Ok(())
                }
            }
            ModelArtifact::DecisionTree { n_features, tree } => {
                check_trees(*n_features, std::slice::from_ref(tree))
            }
            ModelArtifact::RandomForest { n_features, trees } => check_trees(*n_features, trees),
            ModelArtifact::GradientBoosting {
                n_features,
                learning_rate,
                init,
                trees,
            } => {
                if !learning_rate.is_finite() || !init.is_finite() {
                    Err("init and learning_rate must be finite".to_string())
                } else {
                    check_trees(*n_features, trees)
                }
            }
        };
        result.map_err(|reason| ArtifactError::Invalid {
            what: "model",
            reason,
        })
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        match self {
            ModelArtifact::Linear {
                coefficients,
                intercept,
            } => intercept + row.iter().zip(coefficients).map(|(x, c)| x * c).sum::<f64>(),
            ModelArtifact::DecisionTree { tree, .. } => tree.evaluate(row),
            ModelArtifact::RandomForest { trees, .. } => {
                trees.iter().map(|t| t.evaluate(row)).sum::<f64>() / trees.len() as f64
            }
            ModelArtifact::GradientBoosting {
                init,
                learning_rate,
                trees,
                ..
            } => init + learning_rate * trees.iter().map(|t| t.evaluate(row)).sum::<f64>(),
        }
    }
}

impl Regressor for ModelArtifact {
    fn n_features(&self) -> usize {
        match self {
            ModelArtifact::Linear { coefficients, .. } => coefficients.len(),
            ModelArtifact::DecisionTree { n_features, .. }
            | ModelArtifact::RandomForest { n_features, .. }
            | ModelArtifact::GradientBoosting { n_features, .. } => *n_features,
        }
    }

    fn predict(&self, input: &Matrix) -> Result<Vec<f64>, PredictionError> {
        input.expect_cols(self.n_features())?;
        Ok(input.iter_rows().map(|row| self.predict_row(row)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Root splits on feature 0 at 0.5; left leaf 1.0, right leaf 3.0.
    fn stump() -> Tree {
        Tree {
            children_left: vec![1, LEAF, LEAF],
            children_right: vec![2, LEAF, LEAF],
            feature: vec![0, -2, -2],
            threshold: vec![0.5, -2.0, -2.0],
            value: vec![2.0, 1.0, 3.0],
        }
    }

    #[test]
    fn tree_goes_left_on_equal() {
        let t = stump();
        assert_eq!(t.evaluate(&[0.5, 9.0]), 1.0);
        assert_eq!(t.evaluate(&[0.6, 9.0]), 3.0);
    }

    #[test]
    fn forest_averages_and_boosting_sums() {
        let forest = ModelArtifact::RandomForest {
            n_features: 2,
            trees: vec![stump(), Tree::constant(5.0)],
        };
        let boost = ModelArtifact::GradientBoosting {
            n_features: 2,
            init: 10.0,
            learning_rate: 0.5,
            trees: vec![stump(), stump()],
        };
        let x = Matrix::from_rows(&[[0.0, 0.0], [1.0, 0.0]]);
        assert_eq!(forest.predict(&x).unwrap(), vec![3.0, 4.0]);
        assert_eq!(boost.predict(&x).unwrap(), vec![11.0, 13.0]);
    }

    #[test]
    fn linear_is_dot_plus_intercept() {
        let m = ModelArtifact::Linear {
            coefficients: vec![2.0, -1.0],
            intercept: 0.5,
        };
        assert_eq!(m.predict(&Matrix::single([3.0, 1.0])).unwrap(), vec![5.5]);
    }

    #[test]
    fn backward_child_is_rejected() {
        let mut t = stump();
        t.children_right[0] = 0;
        let m = ModelArtifact::DecisionTree {
            n_features: 2,
            tree: t,
        };
        assert!(matches!(m.validate(), Err(ArtifactError::Invalid { what: "model", .. })));
    }

    #[test]
    fn split_on_missing_feature_is_rejected() {
        let m = ModelArtifact::DecisionTree {
            n_features: 2,
            tree: Tree {
                feature: vec![7, -2, -2],
                ..stump()
            },
        };
        assert!(m.validate().is_err());
    }

    #[test]
    fn width_mismatch_is_reported() {
        let m = ModelArtifact::DecisionTree {
            n_features: 8,
            tree: stump(),
        };
        assert!(matches!(
            m.predict(&Matrix::single([0.0, 0.0])),
            Err(PredictionError::DimensionMismatch { expected: 8, actual: 2 })
        ));
    }
}
