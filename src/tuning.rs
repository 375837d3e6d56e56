//! Author-facing tuning for target acquisition and lunges.
//!
//! Values are read once when a character is built and never change while it
//! lives. They can be loaded from JSON; missing fields fall back to the
//! defaults in [`crate::constants`].
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_ATTACK_DURATION, DEFAULT_ATTACK_RADIUS, DEFAULT_DEBUG_TARGET_POINT_SIZE,
    DEFAULT_DUEL_DOT_DISTANCE_SCALAR, DEFAULT_DUEL_DOT_THRESHOLD, DEFAULT_FAR_ATTACK_DISTANCE,
    DEFAULT_SPHERE_CAST_DISTANCE, DEFAULT_SPHERE_CAST_RADIUS,
};

/// Failure while loading or validating [`TuningParameters`].
#[derive(Debug, Error)]
pub enum TuningError {
    /// The configuration file could not be read.
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration was not valid JSON for this schema.
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the driver cannot use.
    #[error("tuning field `{field}` must be finite and non-negative, got {value}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
}

/// Per-character tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningParameters {
    /// Length of the forward targeting sweep.
    pub sphere_cast_distance: f32,
    /// Radius of the forward targeting sweep.
    pub sphere_cast_radius: f32,
    /// A lunge ends as soon as the target is closer than this.
    pub attack_radius: f32,
    /// Seconds a lunge takes to cover the distance to its target.
    pub attack_duration: f32,
    /// Base facing dot needed to keep the current duel.
    pub duel_dot_threshold: f32,
    /// How strongly the distance term raises the duel threshold.
    ///
    /// May be negative; only the other fields are range-checked.
    pub duel_dot_distance_scalar: f32,
    /// Size of the debug markers over targets.
    pub debug_target_point_size: f32,
    /// Commit distance above which an attack counts as far.
    pub far_attack_distance: f32,
    /// Whether a finished lunge forgets its locked target.
    pub clear_target_on_complete: bool,
}

impl Default for TuningParameters {
    fn default() -> Self {
        Self {
            sphere_cast_distance: DEFAULT_SPHERE_CAST_DISTANCE,
            sphere_cast_radius: DEFAULT_SPHERE_CAST_RADIUS,
            attack_radius: DEFAULT_ATTACK_RADIUS,
            attack_duration: DEFAULT_ATTACK_DURATION,
            duel_dot_threshold: DEFAULT_DUEL_DOT_THRESHOLD,
            duel_dot_distance_scalar: DEFAULT_DUEL_DOT_DISTANCE_SCALAR,
            debug_target_point_size: DEFAULT_DEBUG_TARGET_POINT_SIZE,
            far_attack_distance: DEFAULT_FAR_ATTACK_DISTANCE,
            clear_target_on_complete: true,
        }
    }
}

impl TuningParameters {
    /// Parses and validates tuning from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`TuningError::Parse`] for malformed JSON and
    /// [`TuningError::Invalid`] for unusable values.
    ///
    /// # Examples
    ///
    /// ```
    /// use brawler::TuningParameters;
    ///
    /// let tuning = TuningParameters::from_json_str(r#"{ "attack_radius": 80.0 }"#).unwrap();
    /// assert_eq!(tuning.attack_radius, 80.0);
    /// assert_eq!(tuning.attack_duration, 1.0);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validated()
    }

    /// Reads, parses and validates a JSON tuning file.
    ///
    /// # Errors
    ///
    /// Returns [`TuningError::Io`] if the file cannot be read, otherwise the
    /// errors of [`TuningParameters::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let file = path.as_ref();
        let json = fs::read_to_string(file).map_err(|source| TuningError::Io {
            path: file.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        info!("Loaded tuning from {}", file.display());
        Ok(tuning)
    }

    /// Returns `self` if every range-checked field is finite and
    /// non-negative.
    ///
    /// A zero `attack_duration` is accepted and makes lunges snap in one
    /// tick.
    ///
    /// # Errors
    ///
    /// Returns [`TuningError::Invalid`] naming the first offending field.
    pub fn validated(self) -> Result<Self, TuningError> {
        let checked = [
            ("sphere_cast_distance", self.sphere_cast_distance),
            ("sphere_cast_radius", self.sphere_cast_radius),
            ("attack_radius", self.attack_radius),
            ("attack_duration", self.attack_duration),
            ("duel_dot_threshold", self.duel_dot_threshold),
            ("debug_target_point_size", self.debug_target_point_size),
            ("far_attack_distance", self.far_attack_distance),
        ];
        if let Some((field, value)) = checked
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(TuningError::Invalid { field, value });
        }
        if !self.duel_dot_distance_scalar.is_finite() {
            return Err(TuningError::Invalid {
                field: "duel_dot_distance_scalar",
                value: self.duel_dot_distance_scalar,
            });
        }
        Ok(self)
    }
}
