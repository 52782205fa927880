//! Orquestração da cadeia completa

use crate::noise::compute_noise;
use crate::radiometry::{electron_count, photon_count, scene_luminance, sensor_illuminance};
use crate::types::{ChainInputs, ChainResults, ResultBundle};

/// Executa os cinco estágios em sequência
///
/// Cada estágio recebe apenas a saída do anterior. Nenhum estágio é pulado
/// ou repetido; casos degenerados propagam como valores IEEE-754.
pub fn run_full_chain(inputs: &ChainInputs) -> ResultBundle {
    let luminance = scene_luminance(inputs.scene_illuminance, inputs.scene_reflectance);
    tracing::debug!(scene_luminance = luminance, "stage 1: scene luminance");

    let illuminance = sensor_illuminance(luminance, inputs.lens_transmittance, inputs.f_number);
    tracing::debug!(sensor_illuminance = illuminance, "stage 2: sensor illuminance");

    let (photons, intermediates) = photon_count(
        illuminance,
        inputs.pixel_size,
        inputs.exposure_time,
        inputs.wavelength,
    );
    tracing::debug!(photon_count = photons, "stage 3: photon count");
    tracing::trace!(?intermediates, "photon intermediates");

    let electrons = electron_count(photons, inputs.quantum_efficiency);
    tracing::debug!(electron_count = electrons, "stage 4: electron count");

    let noise_analysis = compute_noise(
        electrons,
        inputs.exposure_time,
        inputs.read_noise,
        inputs.dark_current_rate,
    );
    tracing::debug!(
        snr_db = noise_analysis.snr_db,
        regime = noise_analysis.noise_regime.as_str(),
        "stage 5: noise analysis"
    );

    ResultBundle {
        inputs: *inputs,
        results: ChainResults {
            scene_luminance: luminance,
            sensor_illuminance: illuminance,
            photon_count: photons,
            electron_count: electrons,
        },
        noise_analysis,
        intermediates,
    }
}
