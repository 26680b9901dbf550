use image::GrayImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between external id and display name in sample file names
/// (`007_Ada.jpg`).
pub const BASENAME_SEPARATOR: char = '_';

/// Separator between external id and display name in the composite
/// string form (`"007:Ada"`).
pub const COMPOSITE_SEPARATOR: char = ':';

/// A person known to the system: an optional external id (student id,
/// badge number) plus a display name.
///
/// This is the one structured representation of what was historically an
/// ad hoc `"id:name"` string; every boundary (file-name parsing, display,
/// dedup keys) goes through the parse/serialize pair here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub external_id: Option<String>,
    pub display_name: String,
}

impl Identity {
    /// Parse an identity from a sample file's basename (extension already
    /// stripped). Splits once at the first `_`; a name without the
    /// separator is a bare display name.
    pub fn from_basename(stem: &str) -> Self {
        match stem.split_once(BASENAME_SEPARATOR) {
            Some((id, name)) => Self {
                external_id: Some(id.to_string()),
                display_name: name.to_string(),
            },
            None => Self {
                external_id: None,
                display_name: stem.to_string(),
            },
        }
    }

    /// Parse an identity from its composite string form
    /// (`"externalId:displayName"` or bare `"displayName"`).
    pub fn parse(composite: &str) -> Self {
        match composite.split_once(COMPOSITE_SEPARATOR) {
            Some((id, name)) => Self {
                external_id: Some(id.to_string()),
                display_name: name.to_string(),
            },
            None => Self {
                external_id: None,
                display_name: composite.to_string(),
            },
        }
    }

    /// Composite string form, the inverse of [`parse`](Self::parse).
    pub fn canonical(&self) -> String {
        match &self.external_id {
            Some(id) => format!("{id}{COMPOSITE_SEPARATOR}{}", self.display_name),
            None => self.display_name.clone(),
        }
    }

    /// File-name stem for this identity (`"007_Ada"` or `"Ada"`), with
    /// both components sanitized. Used by enrollment-side callers when
    /// writing sample images.
    pub fn file_stem(&self) -> String {
        let name = sanitize_component(&self.display_name);
        match &self.external_id {
            Some(id) => format!("{}{BASENAME_SEPARATOR}{name}", sanitize_component(id)),
            None => name,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Strip everything but alphanumerics, `-` and `_` from a file-name
/// component.
pub fn sanitize_component(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Bounding box of a detected face within a sample image or frame,
/// in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A grayscale face crop tagged with the label id of its source sample.
#[derive(Debug, Clone)]
pub struct TrainingSample {
    pub pixels: GrayImage,
    pub label: u32,
}

/// Raw classifier output for one crop: the predicted label and a
/// dissimilarity distance (0 = perfect match, unbounded above).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: u32,
    pub distance: f32,
}
