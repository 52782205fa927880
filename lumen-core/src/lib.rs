//! # 🔦 lumen-core — Cadeia Óptico-Elétrica de um Pixel
//!
//! Converte a iluminação de uma cena em sinal elétrico num pixel de sensor de
//! câmera e decompõe o ruído resultante (shot, dark, read).
//!
//! ## Arquitetura
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                        LUMEN SIGNAL CHAIN                          │
//! │                                                                    │
//! │  lux ──► luminância ──► iluminância no sensor ──► fótons ──► e⁻    │
//! │         (Lambert)        (abertura f/N)          (h·c/λ)    (QE)   │
//! │                                                        │           │
//! │                                                        ▼           │
//! │                                   ┌─────────────────────────────┐  │
//! │                                   │ NoiseAnalysis               │  │
//! │                                   │ shot | dark | read | SNR    │  │
//! │                                   │ regime dominante            │  │
//! │                                   └─────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Todas as funções são puras: nenhuma mantém estado entre chamadas e todas
//! podem ser chamadas concorrentemente sem coordenação.
//!
//! ## Uso
//!
//! ```
//! use lumen_core::{run_full_chain, ChainInputs, NoiseRegime};
//!
//! let bundle = run_full_chain(&ChainInputs::default());
//! assert!(bundle.results.electron_count > 1000.0);
//! assert_eq!(bundle.noise_analysis.noise_regime, NoiseRegime::ShotLimited);
//! ```

pub mod chain;
pub mod error;
pub mod noise;
pub mod radiometry;
pub mod types;

pub use chain::run_full_chain;
pub use error::{LumenError, LumenResult};
pub use noise::{classify_noise_regime, compute_noise};
pub use radiometry::{electron_count, photon_count, scene_luminance, sensor_illuminance};
pub use types::{
    ChainInputs, ChainIntermediates, ChainResults, NoiseAnalysis, NoiseRegime, RangeViolation,
    ResultBundle,
};

/// Constantes físicas e fatores de conversão de unidade
pub mod constants {
    /// Constante de Planck (J·s)
    pub const PLANCK_CONSTANT: f64 = 6.62607015e-34;

    /// Velocidade da luz no vácuo (m/s)
    pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

    /// Eficácia luminosa máxima (lm/W a 555 nm)
    pub const LUX_CONVERSION_FACTOR: f64 = 683.0;

    /// Micrômetro → metro
    pub const MICROMETER: f64 = 1e-6;

    /// Nanômetro → metro
    pub const NANOMETER: f64 = 1e-9;

    /// Milissegundos por segundo
    pub const MS_PER_SECOND: f64 = 1000.0;

    /// Read noise padrão (e⁻ RMS)
    pub const DEFAULT_READ_NOISE: f64 = 3.0;

    /// Dark current padrão (e⁻/s)
    pub const DEFAULT_DARK_CURRENT: f64 = 0.1;

    /// Fator de dominância usado na classificação do regime de ruído.
    ///
    /// Um termo domina o outro quando é estritamente maior que o dobro dele.
    pub const REGIME_DOMINANCE_FACTOR: f64 = 2.0;
}
