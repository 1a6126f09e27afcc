//! Serialized regressor formats.
//!
//! Artifacts are JSON exports of a fitted model. Two shapes are supported:
//! a linear model (`intercept + Σ coef·x`) and an averaged ensemble of binary
//! regression trees using the scikit-learn split rule `x[feature] <= threshold`.

use serde::{Deserialize, Serialize};

use crate::encoding::{FeatureVector, FEATURE_COUNT};
use crate::model::ModelError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub trees: Vec<RegressionTree>,
}

/// Flat node array; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl ModelArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::Linear(_) => "linear",
            ModelArtifact::TreeEnsemble(_) => "tree_ensemble",
        }
    }

    /// Checks structural invariants so that `predict` cannot index out of
    /// bounds or loop.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            ModelArtifact::Linear(m) => m.validate(),
            ModelArtifact::TreeEnsemble(e) => e.validate(),
        }
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let x = features.to_f64();
        let y = match self {
            ModelArtifact::Linear(m) => m.predict(&x),
            ModelArtifact::TreeEnsemble(e) => e.predict(&x)?,
        };
        if !y.is_finite() {
            return Err(ModelError::Invalid(format!(
                "model produced a non-finite prediction ({y})"
            )));
        }
        Ok(y)
    }
}

impl LinearModel {
    fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::Invalid(format!(
                "expected {FEATURE_COUNT} coefficients, found {}",
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Invalid(
                "linear model contains non-finite parameters".to_string(),
            ));
        }
        Ok(())
    }

    fn predict(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x.iter())
                .map(|(c, v)| c * v)
                .sum::<f64>()
    }
}

impl TreeEnsemble {
    fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("tree ensemble has no trees".to_string()));
        }
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|reason| ModelError::Invalid(format!("tree {t}: {reason}")))?;
        }
        Ok(())
    }

    fn predict(&self, x: &[f64; FEATURE_COUNT]) -> Result<f64, ModelError> {
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.predict(x)?;
        }
        Ok(total / self.trees.len() as f64)
    }
}

impl RegressionTree {
    fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("empty tree".to_string());
        }
        let n = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Leaf { value } if !value.is_finite() => {
                    return Err(format!("node {i}: non-finite leaf value"));
                }
                TreeNode::Leaf { .. } => {}
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(format!("node {i}: feature index {feature} out of range"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {i}: non-finite threshold"));
                    }
                    // Children after their parent rules out cycles.
                    for child in [left, right] {
                        if child <= i || child >= n {
                            return Err(format!("node {i}: invalid child index {child}"));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn predict(&self, x: &[f64; FEATURE_COUNT]) -> Result<f64, ModelError> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let v = x.get(*feature).copied().unwrap_or(f64::NAN);
                    idx = if v <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(ModelError::Invalid(format!(
                        "tree traversal reached missing node {idx}"
                    )))
                }
            }
        }
    }
}
