//! Plain-text rendering of a result bundle

use colored::{ColoredString, Colorize};
use lumen_core::{NoiseRegime, ResultBundle};
use std::fmt;

/// Regime label colored the same way on every report
pub fn regime_badge(regime: NoiseRegime) -> ColoredString {
    let label = regime.label();
    match regime {
        NoiseRegime::ShotLimited => label.green(),
        NoiseRegime::DarkLimited => label.red(),
        NoiseRegime::ReadLimited => label.yellow(),
        NoiseRegime::ShotDarkLimited => label.cyan(),
    }
}

/// Full terminal report: signal, SNR, noise components, steps, intermediates
pub struct Report<'a>(pub &'a ResultBundle);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let res = &self.0.results;
        let noise = &self.0.noise_analysis;
        let inter = &self.0.intermediates;

        writeln!(f, "{}", "Light Calculator Results".bold())?;
        writeln!(f)?;
        writeln!(f, "  {:<18} {:.0} electrons", "Signal:".bold(), res.electron_count)?;
        writeln!(
            f,
            "  {:<18} {:.1} ({:.1} dB)",
            "Signal-to-Noise:".bold(),
            noise.snr_linear,
            noise.snr_db
        )?;
        writeln!(f)?;

        writeln!(f, "{}", "Noise Analysis:".bold())?;
        writeln!(f, "  Shot Noise:  {:>10.1} e-", noise.shot_noise)?;
        writeln!(f, "  Dark Noise:  {:>10.1} e-", noise.dark_noise)?;
        writeln!(f, "  Read Noise:  {:>10.1} e-", noise.read_noise)?;
        writeln!(f, "  Total Noise: {:>10.1} e-", noise.total_noise)?;
        writeln!(f, "  Noise Regime: {}", regime_badge(noise.noise_regime).bold())?;
        writeln!(f)?;

        writeln!(f, "{}", "Calculation Steps:".bold())?;
        writeln!(f, "  1. Scene Luminance:    {:.2} nits", res.scene_luminance)?;
        writeln!(f, "  2. Sensor Illuminance: {:.2} lux", res.sensor_illuminance)?;
        writeln!(f, "  3. Photon Count:       {:.0} photons/pixel", res.photon_count)?;
        writeln!(f, "  4. Signal Electrons:   {:.0} electrons/pixel", res.electron_count)?;
        writeln!(f, "  5. Dark Electrons:     {:.1} electrons/pixel", noise.dark_electrons)?;
        writeln!(f)?;

        writeln!(f, "{}", "Intermediate Values:".bold())?;
        writeln!(f, "  Sensor Irradiance:      {:.2e} W/m2", inter.sensor_irradiance)?;
        writeln!(f, "  Pixel Area:             {:.2e} m2", inter.pixel_area)?;
        writeln!(f, "  Photon Energy:          {:.2e} J", inter.photon_energy)?;
        writeln!(f, "  Exposure Time:          {:.3} s", inter.exposure_time_seconds)?;
        writeln!(f, "  Total Energy per Pixel: {:.2e} J", inter.total_energy_per_pixel)
    }
}

/// JSON form of the bundle; `-inf` SNR becomes `null`
pub fn render_json(bundle: &ResultBundle) -> serde_json::Result<String> {
    serde_json::to_string_pretty(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{run_full_chain, ChainInputs};

    #[test]
    fn test_render_reference() {
        let text = Report(&run_full_chain(&ChainInputs::default())).to_string();

        assert!(text.contains("1005 electrons"));
        assert!(text.contains("31.6 (30.0 dB)"));
        assert!(text.contains("28.65 nits"));
        assert!(text.contains("2.58 lux"));
        assert!(text.contains("1675 photons/pixel"));
        assert!(text.contains("Shot Limited"));
        assert!(text.contains("1.60e-11 m2"));
        assert!(text.contains("0.010 s"));
    }

    #[test]
    fn test_render_no_signal() {
        let inputs = ChainInputs {
            exposure_time: 0.0,
            ..ChainInputs::default()
        };
        let text = Report(&run_full_chain(&inputs)).to_string();
        assert!(text.contains("-inf dB"));
        assert!(text.contains("Read Limited"));
    }

    #[test]
    fn test_json_fields() {
        let inputs = ChainInputs {
            exposure_time: 0.0,
            ..ChainInputs::default()
        };
        let json = render_json(&run_full_chain(&inputs)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["noise_analysis"]["noise_regime"], "read_limited");
        assert!(value["noise_analysis"]["snr_db"].is_null());
        assert_eq!(value["inputs"]["f_number"], 2.8);
        assert!(value["intermediates"]["pixel_area"].is_number());
        assert!(value["results"]["electron_count"].is_number());
    }
}
