//! rollcall-core — Identity catalog and recognition decision engine.
//!
//! Builds a training set and label mapping from a directory of labeled
//! face images, and thresholds classifier predictions into accepted
//! identities. Detection and recognition themselves are external
//! capabilities consumed through the traits in [`classifier`].

pub mod catalog;
pub mod classifier;
pub mod decision;
pub mod session;
pub mod types;

pub use catalog::{Catalog, CatalogError, LabelMap};
pub use classifier::{ClassifierError, FaceDetector, Recognizer};
pub use decision::Decision;
pub use session::Session;
pub use types::{FaceBox, Identity, Prediction, TrainingSample};
