//! Conversões radiométricas e fotométricas da cadeia
//!
//! Quatro funções puras encadeadas:
//! iluminância → luminância → iluminância no sensor → fótons → elétrons.
//!
//! As conversões de unidade são fixas (µm → m, nm → m, ms → s). Divisões por
//! zero (f/0, λ = 0) seguem IEEE-754 e resultam em infinito.

use std::f64::consts::PI;

use crate::constants::{
    LUX_CONVERSION_FACTOR, MICROMETER, MS_PER_SECOND, NANOMETER, PLANCK_CONSTANT, SPEED_OF_LIGHT,
};
use crate::types::ChainIntermediates;

/// Luminância de uma superfície Lambertiana (nits)
///
/// `L = E · ρ / π`
pub fn scene_luminance(illuminance: f64, reflectance: f64) -> f64 {
    illuminance * reflectance / PI
}

/// Iluminância no plano do sensor através da lente (lux)
///
/// `E = L · T · π / (4 · N²)`; cai com o quadrado do número f.
pub fn sensor_illuminance(luminance: f64, transmittance: f64, f_number: f64) -> f64 {
    luminance * transmittance * PI / (4.0 * (f_number * f_number))
}

/// Fótons coletados por um pixel durante a exposição
///
/// # Argumentos
///
/// * `illuminance` - Iluminância no sensor (lux)
/// * `pixel_size` - Lado do pixel (µm)
/// * `exposure_time` - Exposição (ms)
/// * `wavelength` - Comprimento de onda médio (nm)
///
/// # Retorna
///
/// A contagem (real, não quantizada) e todos os intermediários do cálculo.
pub fn photon_count(
    illuminance: f64,
    pixel_size: f64,
    exposure_time: f64,
    wavelength: f64,
) -> (f64, ChainIntermediates) {
    // Fotométrico → radiométrico
    let sensor_irradiance = illuminance / LUX_CONVERSION_FACTOR;

    let pixel_size_m = pixel_size * MICROMETER;
    let pixel_area = pixel_size_m * pixel_size_m;

    // E = h·c / λ
    let wavelength_m = wavelength * NANOMETER;
    let photon_energy = PLANCK_CONSTANT * SPEED_OF_LIGHT / wavelength_m;

    let exposure_time_seconds = exposure_time / MS_PER_SECOND;

    let total_energy_per_pixel = sensor_irradiance * pixel_area * exposure_time_seconds;
    let count = total_energy_per_pixel / photon_energy;

    (
        count,
        ChainIntermediates {
            sensor_irradiance,
            pixel_area,
            photon_energy,
            exposure_time_seconds,
            total_energy_per_pixel,
        },
    )
}

/// Elétrons gerados a partir dos fótons incidentes
pub fn electron_count(photon_count: f64, quantum_efficiency: f64) -> f64 {
    photon_count * quantum_efficiency
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scene_luminance_lambertian() {
        assert_relative_eq!(scene_luminance(PI, 1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(scene_luminance(500.0, 0.18), 28.64788975654116, epsilon = 1e-9);
    }

    #[test]
    fn test_sensor_illuminance_f_number_squared() {
        let at_f2 = sensor_illuminance(100.0, 1.0, 2.0);
        let at_f4 = sensor_illuminance(100.0, 1.0, 4.0);
        assert_relative_eq!(at_f2 / at_f4, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sensor_illuminance_zero_f_number_is_infinite() {
        assert_eq!(sensor_illuminance(10.0, 0.9, 0.0), f64::INFINITY);
    }

    #[test]
    fn test_photon_count_intermediates() {
        let (count, inter) = photon_count(683.0, 1.0, 1000.0, 550.0);

        assert_eq!(inter.sensor_irradiance, 1.0);
        assert_eq!(inter.exposure_time_seconds, 1.0);
        assert_eq!(inter.pixel_area, (1.0 * 1e-6) * (1.0 * 1e-6));
        assert_relative_eq!(inter.photon_energy, 3.611719740270779e-19, max_relative = 1e-12);
        assert_eq!(inter.total_energy_per_pixel, inter.sensor_irradiance * inter.pixel_area * inter.exposure_time_seconds);
        assert_eq!(count, inter.total_energy_per_pixel / inter.photon_energy);
    }

    #[test]
    fn test_photon_count_zero_exposure() {
        let (count, inter) = photon_count(2.5, 4.0, 0.0, 550.0);
        assert_eq!(count, 0.0);
        assert_eq!(inter.total_energy_per_pixel, 0.0);
    }

    #[test]
    fn test_photon_count_zero_wavelength() {
        // Energia do fóton infinita → contagem zero
        let (count, inter) = photon_count(2.5, 4.0, 10.0, 0.0);
        assert_eq!(inter.photon_energy, f64::INFINITY);
        assert_eq!(count, 0.0);
    }

    #[test]
    fn test_electron_count_scales_with_qe() {
        assert_eq!(electron_count(1000.0, 0.5), 500.0);
        assert_eq!(electron_count(1000.0, 0.0), 0.0);
    }
}
