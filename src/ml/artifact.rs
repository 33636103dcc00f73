//! Persistence of the fitted vectorizer and classifier.
//!
//! Both artifacts are written with `bincode` into a models directory:
//!
//! ```text
//! models/
//! ├── tfidf_vectorizer.bin
//! └── classifier.bin
//! ```
//!
//! The encoding is opaque; artifacts are only meant to be read back by the
//! same version of this crate.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::ml::MLError;
use crate::ml::logistic::LogisticRegression;
use crate::ml::tfidf::TfIdfVectorizer;

/// File name of the serialized vectorizer.
pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.bin";

/// File name of the serialized classifier.
pub const CLASSIFIER_FILE: &str = "classifier.bin";

/// The pair of fitted models produced by training.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub vectorizer: TfIdfVectorizer,
    pub classifier: LogisticRegression,
}

impl ModelArtifacts {
    /// Bundle fitted models.
    pub fn new(vectorizer: TfIdfVectorizer, classifier: LogisticRegression) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }

    /// Write both artifacts into `dir`, creating it if needed.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        write_artifact(&dir.join(VECTORIZER_FILE), &self.vectorizer)?;
        write_artifact(&dir.join(CLASSIFIER_FILE), &self.classifier)?;
        Ok(())
    }

    /// Read both artifacts from `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let vectorizer: TfIdfVectorizer = read_artifact(&dir.join(VECTORIZER_FILE))?;
        let classifier: LogisticRegression = read_artifact(&dir.join(CLASSIFIER_FILE))?;

        if !vectorizer.is_fitted() || !classifier.is_trained() {
            return Err(MLError::ModelNotTrained {
                message: format!("artifacts in {} are not fitted", dir.display()),
            }
            .into());
        }
        if classifier.n_features() != vectorizer.vocabulary_size() {
            return Err(MLError::DimensionMismatch {
                expected: vectorizer.vocabulary_size(),
                got: classifier.n_features(),
            }
            .into());
        }

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Paths the artifacts occupy under `dir`.
    pub fn paths<P: AsRef<Path>>(dir: P) -> [PathBuf; 2] {
        let dir = dir.as_ref();
        [dir.join(VECTORIZER_FILE), dir.join(CLASSIFIER_FILE)]
    }
}

fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let save_error = |reason: &dyn std::fmt::Display| MLError::ModelSaveError {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };

    let file = File::create(path).map_err(|e| save_error(&e))?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, value).map_err(|e| save_error(&e))?;
    writer.flush().map_err(|e| save_error(&e))?;
    debug!("Saved model artifact to {}", path.display());
    Ok(())
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let load_error = |reason: &dyn std::fmt::Display| MLError::ModelLoadError {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };

    let file = File::open(path).map_err(|e| load_error(&e))?;
    let value = bincode::deserialize_from(BufReader::new(file)).map_err(|e| load_error(&e))?;
    debug!("Loaded model artifact from {}", path.display());
    Ok(value)
}
