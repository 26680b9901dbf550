//! Recognition session — owns the trained model and label map for one
//! process run.
//!
//! Training happens once, synchronously, at startup. A catalog with no
//! training crops (or a training failure) degrades the whole session to
//! all-Unknown with a single warning rather than aborting.

use crate::catalog::Catalog;
use crate::classifier::Recognizer;
use crate::decision::{self, Decision};
use crate::LabelMap;
use image::GrayImage;

pub struct Session<R: Recognizer> {
    model: Option<R>,
    labels: LabelMap,
}

impl<R: Recognizer> Session<R> {
    /// Train `recognizer` on the catalog and start a session.
    ///
    /// The recognizer is only trained (and only kept) when the catalog
    /// holds at least one crop.
    pub fn start(catalog: Catalog, mut recognizer: R) -> Self {
        let Catalog { samples, labels } = catalog;

        let model = if samples.is_empty() {
            tracing::warn!(
                identities = labels.len(),
                "no training samples; recognition disabled for this session"
            );
            None
        } else {
            match recognizer.train(&samples) {
                Ok(()) => {
                    tracing::info!(
                        samples = samples.len(),
                        identities = labels.len(),
                        "recognizer trained"
                    );
                    Some(recognizer)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "training failed; recognition disabled for this session");
                    None
                }
            }
        };

        Self { model, labels }
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Whether a trained model is available for this session.
    pub fn recognition_enabled(&self) -> bool {
        self.model.is_some()
    }

    /// Decide the identity for one detected face crop.
    pub fn observe(&self, crop: &GrayImage) -> Decision {
        decision::decide(self.model.as_ref(), &self.labels, crop)
    }
}
