//! Identity catalog — builds a training set and label mapping from a
//! flat directory of labeled sample images.
//!
//! File names carry the identity (`007_Ada.jpg` or `Ada.jpg`); each file
//! is decoded to grayscale and run through the detection capability, and
//! every detected face becomes one training crop tagged with the file's
//! label id.

use crate::classifier::FaceDetector;
use crate::types::{Identity, TrainingSample};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Supported sample image extensions, matched case-insensitively.
const SAMPLE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("sample directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Dense label ids (0, 1, 2, …) assigned to distinct identities in
/// first-seen order within one catalog build.
///
/// The mapping is a bijection for the lifetime of the build that produced
/// it; ids are NOT stable across rebuilds.
#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    identities: Vec<Identity>,
}

impl LabelMap {
    /// Resolve a label id to its identity.
    pub fn get(&self, label: u32) -> Option<&Identity> {
        self.identities.get(label as usize)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Iterate `(label, identity)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Identity)> {
        self.identities
            .iter()
            .enumerate()
            .map(|(i, id)| (i as u32, id))
    }

    /// Return the existing id for `identity`, or assign the next dense id.
    pub(crate) fn intern(&mut self, identity: Identity) -> u32 {
        match self.identities.iter().position(|i| *i == identity) {
            Some(i) => i as u32,
            None => {
                self.identities.push(identity);
                (self.identities.len() - 1) as u32
            }
        }
    }
}

/// Output of one catalog build: the training crops and the label map
/// they are tagged against. Immutable once built; owned by the session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub samples: Vec<TrainingSample>,
    pub labels: LabelMap,
}

/// Build a catalog from the sample images directly in `dir` (non-recursive).
///
/// A missing directory is created and yields an empty catalog — a fresh
/// install, not an error. Unreadable or corrupt images are skipped with a
/// diagnostic. A file in which no face is detected still registers its
/// identity in the label map but contributes no training samples.
pub fn build(dir: &Path, detector: &dyn FaceDetector) -> Result<Catalog, CatalogError> {
    let io_err = |source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    };

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(&io_err)?;
        tracing::info!(path = %dir.display(), "created empty sample directory");
        return Ok(Catalog::default());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(&io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|p| has_sample_extension(p))
        .collect();
    // read_dir order is platform-dependent; sort so label assignment
    // is deterministic for a given directory.
    paths.sort();

    let mut catalog = Catalog::default();

    for path in &paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::warn!(path = %path.display(), "non-UTF8 file name; skipping");
            continue;
        };
        let label = catalog.labels.intern(Identity::from_basename(stem));

        let img = match image::open(path) {
            Ok(decoded) => decoded.to_luma8(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unreadable sample image; skipping");
                continue;
            }
        };

        for face in detector.detect(&img) {
            let pixels = image::imageops::crop_imm(&img, face.x, face.y, face.width, face.height)
                .to_image();
            catalog.samples.push(TrainingSample { pixels, label });
        }
    }

    tracing::info!(
        files = paths.len(),
        samples = catalog.samples.len(),
        identities = catalog.labels.len(),
        "catalog built"
    );

    Ok(catalog)
}

fn has_sample_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            SAMPLE_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}
