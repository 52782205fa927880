//! Parameter loading: TOML file, then per-flag overrides

use clap::Args;
use lumen_core::{ChainInputs, LumenError, LumenResult};
use std::path::{Path, PathBuf};

/// Chain parameters accepted on the command line
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// TOML parameter file (missing keys take defaults)
    #[arg(short, long, value_name = "FILE", env = "LUMEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Scene illuminance (lux)
    #[arg(long, value_name = "LUX", env = "LUMEN_SCENE_ILLUMINANCE")]
    pub scene_illuminance: Option<f64>,

    /// Scene reflectance (0-1)
    #[arg(long, env = "LUMEN_SCENE_REFLECTANCE")]
    pub scene_reflectance: Option<f64>,

    /// Lens transmittance (0-1)
    #[arg(long, env = "LUMEN_LENS_TRANSMITTANCE")]
    pub lens_transmittance: Option<f64>,

    /// Lens f-number
    #[arg(short, long, env = "LUMEN_F_NUMBER")]
    pub f_number: Option<f64>,

    /// Pixel size (um)
    #[arg(long, value_name = "UM", env = "LUMEN_PIXEL_SIZE")]
    pub pixel_size: Option<f64>,

    /// Exposure time (ms)
    #[arg(short, long, value_name = "MS", env = "LUMEN_EXPOSURE_TIME")]
    pub exposure_time: Option<f64>,

    /// Mean wavelength (nm)
    #[arg(short, long, value_name = "NM", env = "LUMEN_WAVELENGTH")]
    pub wavelength: Option<f64>,

    /// Quantum efficiency (0-1)
    #[arg(short, long, env = "LUMEN_QUANTUM_EFFICIENCY")]
    pub quantum_efficiency: Option<f64>,

    /// Read noise (electrons RMS)
    #[arg(long, env = "LUMEN_READ_NOISE")]
    pub read_noise: Option<f64>,

    /// Dark current (electrons/s)
    #[arg(long, env = "LUMEN_DARK_CURRENT_RATE")]
    pub dark_current_rate: Option<f64>,
}

impl ParamArgs {
    /// Build the chain inputs: defaults, then file, then flags
    pub fn resolve(&self) -> LumenResult<ChainInputs> {
        let base = match &self.config {
            Some(path) => load_file(path)?,
            None => ChainInputs::default(),
        };
        self.apply(base)
    }

    fn overrides(&self) -> [(&'static str, Option<f64>); 10] {
        [
            ("scene_illuminance", self.scene_illuminance),
            ("scene_reflectance", self.scene_reflectance),
            ("lens_transmittance", self.lens_transmittance),
            ("f_number", self.f_number),
            ("pixel_size", self.pixel_size),
            ("exposure_time", self.exposure_time),
            ("wavelength", self.wavelength),
            ("quantum_efficiency", self.quantum_efficiency),
            ("read_noise", self.read_noise),
            ("dark_current_rate", self.dark_current_rate),
        ]
    }

    fn apply(&self, inputs: ChainInputs) -> LumenResult<ChainInputs> {
        self.overrides()
            .into_iter()
            .try_fold(inputs, |acc, (name, value)| match value {
                Some(value) => {
                    tracing::debug!(name, value, "parameter override");
                    acc.with_parameter(name, value)
                }
                None => Ok(acc),
            })
    }
}

/// Parse chain inputs from TOML text
pub fn from_toml_str(content: &str) -> LumenResult<ChainInputs> {
    parse(content, "parameters")
}

fn parse(content: &str, origin: &str) -> LumenResult<ChainInputs> {
    toml::from_str(content).map_err(|e| LumenError::Config(format!("Failed to parse {}: {}", origin, e)))
}

/// Load chain inputs from a TOML file
pub fn load_file(path: &Path) -> LumenResult<ChainInputs> {
    let content = std::fs::read_to_string(path)?;
    tracing::info!(path = %path.display(), "loaded parameter file");
    parse(&content, &path.display().to_string())
}

/// Serialize chain inputs as a TOML parameter file
pub fn to_toml(inputs: &ChainInputs) -> LumenResult<String> {
    toml::to_string_pretty(inputs).map_err(|e| LumenError::Serialization(e.to_string()))
}
