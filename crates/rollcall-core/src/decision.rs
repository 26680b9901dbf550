//! Recognition decision — turns a raw classifier prediction into an
//! accepted identity or Unknown.

use crate::catalog::LabelMap;
use crate::classifier::Recognizer;
use crate::types::Identity;
use image::GrayImage;

/// Distance at or above which a prediction is rejected as Unknown.
pub const DISTANCE_CUTOFF: f32 = 100.0;

/// Outcome of thresholding one prediction.
///
/// `identity` of `None` means Unknown. `confidence` is present whenever
/// the classifier actually ran and returned, even for a rejected
/// prediction — a rejected crop still reports its (possibly zero or
/// negative) confidence percentage. That asymmetry is deliberate and
/// user-visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub identity: Option<Identity>,
    pub confidence: Option<i32>,
}

impl Decision {
    pub const UNKNOWN: Decision = Decision {
        identity: None,
        confidence: None,
    };

    pub fn is_known(&self) -> bool {
        self.identity.is_some()
    }
}

/// Decide the identity for one crop.
///
/// With no model (empty training set) the classifier is never invoked
/// and the result is Unknown with no confidence. A predict failure is
/// caught here and likewise degrades to Unknown; it never propagates.
pub fn decide<R: Recognizer + ?Sized>(
    model: Option<&R>,
    labels: &LabelMap,
    crop: &GrayImage,
) -> Decision {
    let Some(model) = model else {
        return Decision::UNKNOWN;
    };

    let prediction = match model.predict(crop) {
        Ok(p) => p,
        Err(err) => {
            tracing::warn!(error = %err, "predict failed; treating crop as unknown");
            return Decision::UNKNOWN;
        }
    };

    let confidence = (100.0 - prediction.distance).round() as i32;
    let identity = if prediction.distance < DISTANCE_CUTOFF {
        // A label id missing from the map also resolves to Unknown.
        labels.get(prediction.label).cloned()
    } else {
        None
    };

    Decision {
        identity,
        confidence: Some(confidence),
    }
}
