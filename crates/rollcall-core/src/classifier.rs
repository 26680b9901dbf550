//! Consumed capability boundary for face detection and recognition.
//!
//! The actual models are external collaborators; this crate only defines
//! the traits it drives them through. Implementations are expected to be
//! pre-built (e.g. a cascade detector plus an LBPH-style recognizer) and
//! entirely opaque here.

use crate::types::{FaceBox, Prediction, TrainingSample};
use image::GrayImage;
use thiserror::Error;

/// Failure inside the external classifier. Callers in this crate catch
/// these and degrade to Unknown; they never propagate further.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("training failed: {0}")]
    Train(String),
    #[error("prediction failed: {0}")]
    Predict(String),
}

/// Locates faces in a single-channel intensity image.
pub trait FaceDetector {
    /// Return zero or more face bounding boxes.
    fn detect(&self, image: &GrayImage) -> Vec<FaceBox>;
}

/// Trains on labeled face crops and predicts a (label, distance) pair
/// for a new crop.
pub trait Recognizer {
    /// Fit the model to the given samples. Must only be called with a
    /// non-empty slice.
    fn train(&mut self, samples: &[TrainingSample]) -> Result<(), ClassifierError>;

    /// Predict the closest label for a crop. Distance is non-negative;
    /// 0 is a perfect match, larger is more dissimilar, unbounded above.
    /// May fail for malformed input.
    fn predict(&self, crop: &GrayImage) -> Result<Prediction, ClassifierError>;
}
