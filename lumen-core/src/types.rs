//! Registros de valor que fluem pela cadeia
//!
//! Todos são construídos a cada invocação e nunca mutados depois.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DARK_CURRENT, DEFAULT_READ_NOISE};
use crate::error::{LumenError, LumenResult};

// ═══════════════════════════════════════════════════════════════════════════════
// ENTRADAS
// ═══════════════════════════════════════════════════════════════════════════════

/// Parâmetros de cena, lente e sensor
///
/// Os nomes com sufixo de unidade (`pixel_size_um`, `exposure_time_ms`, ...)
/// são aceitos como aliases na desserialização.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainInputs {
    /// Iluminância da cena (lux, > 0)
    #[serde(alias = "scene_illuminance_lux")]
    pub scene_illuminance: f64,
    /// Refletância da cena (0..1)
    pub scene_reflectance: f64,
    /// Transmitância da lente (0..1)
    pub lens_transmittance: f64,
    /// Número f da lente (> 0)
    pub f_number: f64,
    /// Lado do pixel (µm, > 0)
    #[serde(alias = "pixel_size_um")]
    pub pixel_size: f64,
    /// Tempo de exposição (ms, ≥ 0)
    #[serde(alias = "exposure_time_ms")]
    pub exposure_time: f64,
    /// Comprimento de onda médio (nm, > 0)
    #[serde(alias = "wavelength_nm")]
    pub wavelength: f64,
    /// Eficiência quântica (0..1)
    pub quantum_efficiency: f64,
    /// Read noise (e⁻ RMS, ≥ 0)
    #[serde(alias = "read_noise_electrons")]
    pub read_noise: f64,
    /// Dark current (e⁻/s, ≥ 0)
    #[serde(alias = "dark_current_e_per_s")]
    pub dark_current_rate: f64,
}

impl Default for ChainInputs {
    fn default() -> Self {
        Self {
            scene_illuminance: 500.0,
            scene_reflectance: 0.18,
            lens_transmittance: 0.9,
            f_number: 2.8,
            pixel_size: 4.0,
            exposure_time: 10.0,
            wavelength: 550.0,
            quantum_efficiency: 0.6,
            read_noise: DEFAULT_READ_NOISE,
            dark_current_rate: DEFAULT_DARK_CURRENT,
        }
    }
}

/// Faixa documentada de um parâmetro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Positive,
    NonNegative,
    UnitInterval,
}

impl Bound {
    fn contains(self, value: f64) -> bool {
        match self {
            Bound::Positive => value > 0.0,
            Bound::NonNegative => value >= 0.0,
            Bound::UnitInterval => (0.0..=1.0).contains(&value),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Bound::Positive => "> 0",
            Bound::NonNegative => ">= 0",
            Bound::UnitInterval => "0..=1",
        }
    }
}

/// Parâmetro fora da faixa documentada
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeViolation {
    pub field: &'static str,
    pub value: f64,
    pub expected: &'static str,
}

impl From<RangeViolation> for LumenError {
    fn from(v: RangeViolation) -> Self {
        LumenError::OutOfRange {
            field: v.field,
            value: v.value,
            expected: v.expected,
        }
    }
}

impl ChainInputs {
    /// Nomes aceitos por [`ChainInputs::with_parameter`]
    pub const PARAMETER_NAMES: [&'static str; 10] = [
        "scene_illuminance",
        "scene_reflectance",
        "lens_transmittance",
        "f_number",
        "pixel_size",
        "exposure_time",
        "wavelength",
        "quantum_efficiency",
        "read_noise",
        "dark_current_rate",
    ];

    fn bounded_fields(&self) -> [(&'static str, f64, Bound); 10] {
        [
            ("scene_illuminance", self.scene_illuminance, Bound::Positive),
            ("scene_reflectance", self.scene_reflectance, Bound::UnitInterval),
            ("lens_transmittance", self.lens_transmittance, Bound::UnitInterval),
            ("f_number", self.f_number, Bound::Positive),
            ("pixel_size", self.pixel_size, Bound::Positive),
            ("exposure_time", self.exposure_time, Bound::NonNegative),
            ("wavelength", self.wavelength, Bound::Positive),
            ("quantum_efficiency", self.quantum_efficiency, Bound::UnitInterval),
            ("read_noise", self.read_noise, Bound::NonNegative),
            ("dark_current_rate", self.dark_current_rate, Bound::NonNegative),
        ]
    }

    /// Todos os parâmetros fora da faixa física documentada.
    ///
    /// Valores fora da faixa não impedem o cálculo; só produzem resultados
    /// fisicamente implausíveis. NaN nunca está dentro de nenhuma faixa.
    pub fn range_violations(&self) -> Vec<RangeViolation> {
        self.bounded_fields()
            .into_iter()
            .filter(|(_, value, bound)| !bound.contains(*value))
            .map(|(field, value, bound)| RangeViolation {
                field,
                value,
                expected: bound.describe(),
            })
            .collect()
    }

    /// Checagem opcional: falha na primeira violação de faixa
    pub fn validate(&self) -> LumenResult<()> {
        match self.range_violations().into_iter().next() {
            Some(violation) => Err(violation.into()),
            None => Ok(()),
        }
    }

    /// Valor de um parâmetro pelo nome
    pub fn parameter(&self, name: &str) -> LumenResult<f64> {
        self.bounded_fields()
            .into_iter()
            .find(|(field, _, _)| *field == name)
            .map(|(_, value, _)| value)
            .ok_or_else(|| LumenError::InvalidParameter(format!("unknown parameter '{}'", name)))
    }

    /// Cópia com um parâmetro substituído pelo nome
    pub fn with_parameter(mut self, name: &str, value: f64) -> LumenResult<Self> {
        let slot = match name {
            "scene_illuminance" => &mut self.scene_illuminance,
            "scene_reflectance" => &mut self.scene_reflectance,
            "lens_transmittance" => &mut self.lens_transmittance,
            "f_number" => &mut self.f_number,
            "pixel_size" => &mut self.pixel_size,
            "exposure_time" => &mut self.exposure_time,
            "wavelength" => &mut self.wavelength,
            "quantum_efficiency" => &mut self.quantum_efficiency,
            "read_noise" => &mut self.read_noise,
            "dark_current_rate" => &mut self.dark_current_rate,
            other => {
                return Err(LumenError::InvalidParameter(format!(
                    "unknown parameter '{}'",
                    other
                )));
            }
        };
        *slot = value;
        Ok(self)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESULTADOS
// ═══════════════════════════════════════════════════════════════════════════════

/// Valores intermediários da conversão iluminância → fótons
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChainIntermediates {
    /// Irradiância no sensor (W/m²)
    pub sensor_irradiance: f64,
    /// Área do pixel (m²)
    pub pixel_area: f64,
    /// Energia de um fóton (J)
    pub photon_energy: f64,
    /// Exposição (s)
    pub exposure_time_seconds: f64,
    /// Energia total coletada pelo pixel (J)
    pub total_energy_per_pixel: f64,
}

/// Saída de cada estágio da cadeia
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChainResults {
    /// Luminância da cena (nits)
    pub scene_luminance: f64,
    /// Iluminância no sensor (lux)
    pub sensor_illuminance: f64,
    /// Fótons por pixel (real, sem quantização)
    pub photon_count: f64,
    /// Elétrons por pixel (real, sem quantização)
    pub electron_count: f64,
}

/// Fonte de ruído dominante
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseRegime {
    /// Shot noise do sinal domina
    ShotLimited,
    /// Dark current domina
    DarkLimited,
    /// Ruído de leitura domina
    ReadLimited,
    /// Shot e dark comparáveis
    ShotDarkLimited,
}

impl NoiseRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseRegime::ShotLimited => "shot_limited",
            NoiseRegime::DarkLimited => "dark_limited",
            NoiseRegime::ReadLimited => "read_limited",
            NoiseRegime::ShotDarkLimited => "shot_dark_limited",
        }
    }

    /// Rótulo para exibição ("Shot Dark Limited")
    pub fn label(&self) -> &'static str {
        match self {
            NoiseRegime::ShotLimited => "Shot Limited",
            NoiseRegime::DarkLimited => "Dark Limited",
            NoiseRegime::ReadLimited => "Read Limited",
            NoiseRegime::ShotDarkLimited => "Shot Dark Limited",
        }
    }
}

impl fmt::Display for NoiseRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decomposição do ruído e relação sinal/ruído
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoiseAnalysis {
    pub signal_electrons: f64,
    pub dark_electrons: f64,
    pub shot_noise: f64,
    pub dark_noise: f64,
    pub read_noise: f64,
    pub total_noise: f64,
    pub snr_linear: f64,
    /// `-inf` quando não há sinal utilizável (serializa como `null`)
    pub snr_db: f64,
    pub noise_regime: NoiseRegime,
    pub exposure_time_seconds: f64,
}

/// Pacote completo entregue à camada de apresentação
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultBundle {
    pub inputs: ChainInputs,
    pub results: ChainResults,
    pub noise_analysis: NoiseAnalysis,
    pub intermediates: ChainIntermediates,
}
