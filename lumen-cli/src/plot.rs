//! Log-scale series of the four chain stages, for charting

use lumen_core::ResultBundle;
use serde::Serialize;

/// Values below this floor are charted at the floor
pub const LOG_FLOOR: f64 = 1e-10;

/// Widest bar drawn; infinite stages are drawn at this width
pub const MAX_BAR_CELLS: usize = 80;

const STEP_NAMES: [&str; 4] = [
    "Scene Luminance",
    "Sensor Illuminance",
    "Photon Count",
    "Electron Count",
];

const STEP_UNITS: [&str; 4] = ["nits", "lux", "photons", "electrons"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepPoint {
    pub name: &'static str,
    pub value: f64,
    pub log10_value: f64,
    pub unit: &'static str,
}

pub fn step_series(bundle: &ResultBundle) -> Vec<StepPoint> {
    let res = &bundle.results;
    let values = [
        res.scene_luminance,
        res.sensor_illuminance,
        res.photon_count,
        res.electron_count,
    ];

    STEP_NAMES
        .iter()
        .zip(STEP_UNITS)
        .zip(values)
        .map(|((&name, unit), value)| StepPoint {
            name,
            value,
            log10_value: value.max(LOG_FLOOR).log10(),
            unit,
        })
        .collect()
}

/// Horizontal bar chart, one decade per four cells
pub fn render_bars(points: &[StepPoint]) -> String {
    points
        .iter()
        .map(|p| {
            let cells = if p.log10_value.is_finite() {
                ((p.log10_value.max(0.0) * 4.0).round() as usize).min(MAX_BAR_CELLS)
            } else {
                MAX_BAR_CELLS
            };
            format!(
                "{:<20} {:>12.3e} {:<9} {:>6.2} |{}\n",
                p.name,
                p.value,
                p.unit,
                p.log10_value,
                "#".repeat(cells)
            )
        })
        .collect()
}
