//! Species inference.
//!
//! The classifier itself is an opaque artifact trained elsewhere; all this
//! module knows is how to feed it four measurements and how to name the class
//! index it hands back.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Number of input features the classifier expects.
pub const N_FEATURES: usize = 4;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("model artifact is not valid: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model artifact has inconsistent shape: {0}")]
    Shape(String),

    #[error("classifier returned unknown class index {0}")]
    UnknownClass(usize),

    #[error("feature {0} is not a finite number")]
    NonFinite(usize),
}

/// Anything that can turn a feature vector into a class index.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: [f64; N_FEATURES]) -> Result<usize, ModelError>;
}

/// A multinomial logistic regression as exported from the training notebook.
///
/// The artifact is JSON of the form
/// `{"classes": [...], "coef": [[f64; 4]; n], "intercept": [f64; n]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticRegression {
    #[serde(default)]
    classes: Vec<String>,
    coef: Vec<[f64; N_FEATURES]>,
    intercept: Vec<f64>,
}

impl LogisticRegression {
    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let model: LogisticRegression = serde_json::from_str(raw)?;
        model.check_shape()?;
        Ok(model)
    }

    /// Load the artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let model = Self::from_json(&raw)?;
        tracing::info!(
            "Loaded classifier from {} ({} classes)",
            path.display(),
            model.coef.len()
        );
        Ok(model)
    }

    fn check_shape(&self) -> Result<(), ModelError> {
        if self.coef.is_empty() {
            return Err(ModelError::Shape("no classes".into()));
        }
        if self.coef.len() != self.intercept.len() {
            return Err(ModelError::Shape(format!(
                "{} coefficient rows but {} intercepts",
                self.coef.len(),
                self.intercept.len()
            )));
        }
        if !self.classes.is_empty() && self.classes.len() != self.coef.len() {
            return Err(ModelError::Shape(format!(
                "{} class names for {} classes",
                self.classes.len(),
                self.coef.len()
            )));
        }
        Ok(())
    }

    /// Linear decision score of each class. Softmax is monotonic so argmax of
    /// these is the predicted class.
    fn decision_function(&self, features: &[f64; N_FEATURES]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, features: [f64; N_FEATURES]) -> Result<usize, ModelError> {
        if let Some(i) = features.iter().position(|x| !x.is_finite()) {
            return Err(ModelError::NonFinite(i));
        }
        let scores = self.decision_function(&features);
        let (best, _) = scores
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(bi, bs), (i, &s)| {
                if s > bs {
                    (i, s)
                } else {
                    (bi, bs)
                }
            });
        Ok(best)
    }
}

/// The three iris species the classifier distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    const BY_CLASS: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    pub fn from_class_index(index: usize) -> Result<Self, ModelError> {
        Self::BY_CLASS
            .get(index)
            .copied()
            .ok_or(ModelError::UnknownClass(index))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Species::Setosa => "iris-setosa",
            Species::Versicolor => "iris-versicolor",
            Species::Virginica => "iris-virginica",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Flower measurements in centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl Measurements {
    fn features(&self) -> [f64; N_FEATURES] {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
    }
}

/// The boundary between the web layer and the loaded classifier.
#[derive(Clone)]
pub struct SpeciesPredictor {
    classifier: Arc<dyn Classifier>,
}

impl SpeciesPredictor {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Load a logistic regression artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        Ok(Self::new(Arc::new(LogisticRegression::load(path)?)))
    }

    pub fn predict(&self, measurements: &Measurements) -> Result<Species, ModelError> {
        let class = self.classifier.predict(measurements.features())?;
        let species = Species::from_class_index(class)?;
        tracing::debug!("Predicted {} for {:?}", species, measurements);
        Ok(species)
    }
}

impl fmt::Debug for SpeciesPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeciesPredictor").finish_non_exhaustive()
    }
}
