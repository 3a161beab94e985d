//! JSON result writer for distance profiles.

use std::fs;
use std::path::{Path, PathBuf};

use nearmiss_core::{DistanceProfile, OracleKind, ScanMode};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::ExperimentName;

/// Parameters of the scan that produced a profile, recorded alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanMetadata {
    /// Fixed-length or variable-length candidates.
    pub mode: ScanMode,
    /// Alignment oracle used for every candidate.
    pub oracle: OracleKind,
    /// Configured warping radius.
    pub radius: usize,
    /// Series length.
    pub n: usize,
    /// Query length.
    pub m: usize,
}

/// Writes distance profiles to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_profile.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Path of the profile artifact, whether or not it has been written.
    #[must_use]
    pub fn profile_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_profile.json", self.experiment.as_str()))
    }

    /// Write `profile` to `{experiment}_profile.json` and return the path.
    ///
    /// Padded entries serialize as `null`. When `threshold` is set, `flagged`
    /// lists every position scoring at or below it.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Serialize`] | JSON encoding fails |
    /// | [`IoError::WriteFile`] | The file cannot be written |
    #[instrument(skip_all, fields(experiment = %self.experiment))]
    pub fn write_profile(
        &self,
        meta: &ScanMetadata,
        profile: &DistanceProfile,
        threshold: Option<f64>,
    ) -> Result<PathBuf, IoError> {
        let path = self.profile_path();
        let stride = profile.stride();

        let artifact = ProfileArtifact {
            experiment: self.experiment.as_str(),
            mode: meta.mode.as_str(),
            oracle: meta.oracle.as_str(),
            radius: meta.radius,
            n: meta.n,
            m: meta.m,
            stride,
            computed: profile.computed(),
            profile: profile.values(),
            best: profile.best().map(|(position, score)| BestEntry {
                position,
                anchor: position * stride,
                score,
            }),
            threshold,
            flagged: threshold.map(|t| profile.positions_below(t)),
        };

        let json = serde_json::to_string_pretty(&artifact).map_err(|e| IoError::Serialize {
            path: path.clone(),
            source: e,
        })?;
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), len = profile.len(), "profile written");
        Ok(path)
    }
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct ProfileArtifact<'a> {
    experiment: &'a str,
    mode: &'static str,
    oracle: &'static str,
    radius: usize,
    n: usize,
    m: usize,
    stride: usize,
    computed: usize,
    profile: &'a [Option<f64>],
    best: Option<BestEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flagged: Option<Vec<usize>>,
}

#[derive(Serialize)]
struct BestEntry {
    position: usize,
    anchor: usize,
    score: f64,
}
