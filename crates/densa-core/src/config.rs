//! Tuning knobs for the in-process linear-algebra provider.
//!
//! Settings live in a TOML file, either under a `[linalg]` section (for a
//! config file shared with other tools) or directly at the root:
//!
//! ```toml
//! [linalg]
//! # Sweep cap for the Jacobi eigen/SVD iterations (default: 100)
//! jacobi_max_sweeps = 200
//!
//! # QR iteration cap per eigenvalue in the general eigen solver (default: 30)
//! qr_max_iterations = 60
//!
//! # Inverse-iteration sweeps for general eigenvectors (default: 3)
//! inverse_iterations = 3
//!
//! # Convergence tolerance as a multiple of machine epsilon (default: 100)
//! tolerance_scale = 100.0
//!
//! # Relative singular value cutoff for the pseudo-inverse (default: 1e-15)
//! pinv_rcond = 1e-15
//! ```
//!
//! Missing fields take their defaults. Nothing here is global: a config is
//! a value handed to [`NativeProvider::with_config`](crate::linalg::NativeProvider::with_config)
//! or [`Linalg::with_config`](crate::linalg::Linalg::with_config).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Iteration caps and tolerances for the decompositions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinalgConfig {
    /// Sweep cap for the cyclic Jacobi (symmetric eigen) and one-sided
    /// Jacobi (SVD) iterations.
    pub jacobi_max_sweeps: usize,

    /// QR iteration cap per eigenvalue in the general eigen solver.
    pub qr_max_iterations: usize,

    /// Inverse-iteration sweeps used to recover general eigenvectors.
    pub inverse_iterations: usize,

    /// Convergence tolerance as a multiple of machine epsilon.
    pub tolerance_scale: f64,

    /// Singular values at or below `pinv_rcond * max(s)` are treated as
    /// zero by the pseudo-inverse.
    pub pinv_rcond: f64,
}

impl Default for LinalgConfig {
    fn default() -> Self {
        Self {
            jacobi_max_sweeps: 100,
            qr_max_iterations: 30,
            inverse_iterations: 3,
            tolerance_scale: 100.0,
            pinv_rcond: 1e-15,
        }
    }
}

/// Accepts both the sectioned and the direct layout.
#[derive(Debug, Deserialize, Default)]
struct RootConfig {
    #[serde(default)]
    linalg: Option<LinalgConfig>,

    #[serde(flatten)]
    direct: Option<LinalgConfig>,
}

impl LinalgConfig {
    /// Load from a TOML file.
    ///
    /// ```no_run
    /// use densa_core::LinalgConfig;
    ///
    /// let config = LinalgConfig::load("densa.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        Self::parse(&contents).map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))
    }

    /// Parse TOML text.
    ///
    /// ```
    /// use densa_core::LinalgConfig;
    ///
    /// let cfg = LinalgConfig::from_toml_str("qr_max_iterations = 60").unwrap();
    /// assert_eq!(cfg.qr_max_iterations, 60);
    /// assert_eq!(cfg.jacobi_max_sweeps, 100);
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents).map_err(|e| ConfigError::ParseError(PathBuf::from("<string>"), e))
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let root: RootConfig = toml::from_str(contents)?;
        // Prefer the sectioned format, fall back to the direct one.
        Ok(root.linalg.or(root.direct).unwrap_or_default())
    }

    /// Write as TOML under a `[linalg]` section.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = self.to_toml_string()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::IoError(path.to_path_buf(), e))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        #[derive(Serialize)]
        struct Sectioned<'a> {
            linalg: &'a LinalgConfig,
        }
        toml::to_string_pretty(&Sectioned { linalg: self }).map_err(ConfigError::SerializeError)
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    IoError(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config file {0}: {1}")]
    ParseError(PathBuf, #[source] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] toml::ser::Error),
}
