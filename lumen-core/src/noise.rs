//! Modelo de ruído do pixel
//!
//! Shot e dark seguem estatística de Poisson (variância = média); o read
//! noise é constante. Contagens negativas são tratadas como zero antes de
//! qualquer raiz quadrada.

use crate::constants::{MS_PER_SECOND, REGIME_DOMINANCE_FACTOR};
use crate::types::{NoiseAnalysis, NoiseRegime};

/// Decomposição completa do ruído para um sinal em elétrons
///
/// # Argumentos
///
/// * `signal_electrons` - Elétrons de sinal
/// * `exposure_time` - Exposição (ms)
/// * `read_noise` - Read noise (e⁻ RMS)
/// * `dark_current_rate` - Dark current (e⁻/s)
///
/// Nunca falha: `total_noise = 0` produz SNR 0 e `snr_db = -inf`.
pub fn compute_noise(
    signal_electrons: f64,
    exposure_time: f64,
    read_noise: f64,
    dark_current_rate: f64,
) -> NoiseAnalysis {
    let exposure_time_seconds = exposure_time / MS_PER_SECOND;
    let dark_electrons = dark_current_rate * exposure_time_seconds;

    let shot_noise = signal_electrons.max(0.0).sqrt();
    let dark_noise = dark_electrons.max(0.0).sqrt();

    // Soma das variâncias (RSS)
    let variance = signal_electrons + dark_electrons + read_noise * read_noise;
    let total_noise = variance.max(0.0).sqrt();

    let snr_linear = if total_noise > 0.0 {
        signal_electrons / total_noise
    } else {
        0.0
    };
    let snr_db = if snr_linear > 0.0 {
        20.0 * snr_linear.log10()
    } else {
        f64::NEG_INFINITY
    };

    let noise_regime = classify_noise_regime(signal_electrons, dark_electrons, read_noise);

    tracing::trace!(
        dark_electrons,
        shot_noise,
        dark_noise,
        total_noise,
        snr_linear,
        regime = noise_regime.as_str(),
        "noise decomposed"
    );

    NoiseAnalysis {
        signal_electrons,
        dark_electrons,
        shot_noise,
        dark_noise,
        read_noise,
        total_noise,
        snr_linear,
        snr_db,
        noise_regime,
        exposure_time_seconds,
    }
}

/// Classifica o regime de ruído dominante
///
/// Se `sqrt(sinal + dark)` não supera o dobro do read noise, o regime é
/// `ReadLimited` (comparação `<=`). Caso contrário, sinal e dark são
/// comparados com fator 2 estrito em cada lado; o intervalo entre os dois
/// limites cai em `ShotDarkLimited`.
pub fn classify_noise_regime(
    signal_electrons: f64,
    dark_electrons: f64,
    read_noise: f64,
) -> NoiseRegime {
    let shot_dark = (signal_electrons + dark_electrons).max(0.0).sqrt();

    // NaN também cai em ReadLimited
    if shot_dark > read_noise * REGIME_DOMINANCE_FACTOR {
        if signal_electrons > dark_electrons * REGIME_DOMINANCE_FACTOR {
            NoiseRegime::ShotLimited
        } else if dark_electrons > signal_electrons * REGIME_DOMINANCE_FACTOR {
            NoiseRegime::DarkLimited
        } else {
            NoiseRegime::ShotDarkLimited
        }
    } else {
        NoiseRegime::ReadLimited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compute_noise_reference() {
        let n = compute_noise(1005.1837321123542, 10.0, 3.0, 0.1);

        assert_relative_eq!(n.dark_electrons, 0.001, max_relative = 1e-12);
        assert_relative_eq!(n.shot_noise, 31.704632660107485, max_relative = 1e-12);
        assert_relative_eq!(n.dark_noise, 0.03162277660168379, max_relative = 1e-12);
        assert_eq!(n.read_noise, 3.0);
        assert_relative_eq!(n.total_noise, 31.846267161354312, max_relative = 1e-12);
        assert_relative_eq!(n.snr_linear, 31.563628070424286, max_relative = 1e-12);
        assert_relative_eq!(n.snr_db, 29.983738344743486, max_relative = 1e-12);
        assert_eq!(n.noise_regime, NoiseRegime::ShotLimited);
        assert_eq!(n.exposure_time_seconds, 0.01);
    }

    #[test]
    fn test_zero_total_noise() {
        let n = compute_noise(0.0, 0.0, 0.0, 0.0);
        assert_eq!(n.total_noise, 0.0);
        assert_eq!(n.snr_linear, 0.0);
        assert_eq!(n.snr_db, f64::NEG_INFINITY);
    }

    #[test]
    fn test_zero_signal_with_read_noise() {
        let n = compute_noise(0.0, 10.0, 3.0, 0.0);
        assert_eq!(n.total_noise, 3.0);
        assert_eq!(n.snr_linear, 0.0);
        assert_eq!(n.snr_db, f64::NEG_INFINITY);
        assert_eq!(n.noise_regime, NoiseRegime::ReadLimited);
    }

    #[test]
    fn test_negative_signal_clamped() {
        let n = compute_noise(-4.0, 10.0, 0.0, 0.0);
        assert_eq!(n.shot_noise, 0.0);
        assert_eq!(n.dark_noise, 0.0);
        assert_eq!(n.total_noise, 0.0);
        assert_eq!(n.snr_linear, 0.0);
        assert!(!n.total_noise.is_nan());
    }

    #[test]
    fn test_read_limited_boundary_inclusive() {
        // sqrt(16 + 20) = 6 = 2 × 3
        assert_eq!(classify_noise_regime(16.0, 20.0, 3.0), NoiseRegime::ReadLimited);
        // logo acima do limite
        assert_eq!(classify_noise_regime(16.0, 20.5, 3.0), NoiseRegime::ShotDarkLimited);
    }

    #[test]
    fn test_equal_signal_and_dark() {
        assert_eq!(classify_noise_regime(50.0, 50.0, 1.0), NoiseRegime::ShotDarkLimited);
    }

    #[test]
    fn test_dominance_factor_is_strict() {
        // exatamente o dobro ainda não domina
        assert_eq!(classify_noise_regime(200.0, 100.0, 1.0), NoiseRegime::ShotDarkLimited);
        assert_eq!(classify_noise_regime(100.0, 200.0, 1.0), NoiseRegime::ShotDarkLimited);

        assert_eq!(classify_noise_regime(201.0, 100.0, 1.0), NoiseRegime::ShotLimited);
        assert_eq!(classify_noise_regime(100.0, 201.0, 1.0), NoiseRegime::DarkLimited);
    }

    #[test]
    fn test_read_noise_dominates_even_when_shot_is_largest_source() {
        // shot (4) > read (3), mas 4 <= 6 → read limited
        assert_eq!(classify_noise_regime(16.0, 0.0, 3.0), NoiseRegime::ReadLimited);
    }

    #[test]
    fn test_compute_noise_is_idempotent() {
        let a = compute_noise(812.5, 33.0, 2.2, 4.0);
        let b = compute_noise(812.5, 33.0, 2.2, 4.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_nan_magnitude_is_read_limited() {
        assert_eq!(classify_noise_regime(f64::NAN, 0.0, 1.0), NoiseRegime::ReadLimited);
        assert_eq!(classify_noise_regime(10.0, f64::NAN, 0.0), NoiseRegime::ReadLimited);
    }
}
