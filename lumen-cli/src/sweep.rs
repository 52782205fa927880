//! Repeated chain evaluation over a range of one parameter

use lumen_core::{run_full_chain, ChainInputs, LumenError, LumenResult, ResultBundle};

/// `steps` evenly spaced values from `from` to `to`, both inclusive
pub fn linspace(from: f64, to: f64, steps: usize) -> LumenResult<Vec<f64>> {
    match steps {
        0 => Err(LumenError::InvalidParameter("sweep needs at least one step".into())),
        1 => Ok(vec![from]),
        n => {
            let span = to - from;
            let last = (n - 1) as f64;
            Ok((0..n).map(|i| from + span * i as f64 / last).collect())
        }
    }
}

/// One chain run per value of `param`, every other input fixed
pub fn sweep(
    base: &ChainInputs,
    param: &str,
    from: f64,
    to: f64,
    steps: usize,
) -> LumenResult<Vec<(f64, ResultBundle)>> {
    // Fails early on unknown names
    base.parameter(param)?;

    linspace(from, to, steps)?
        .into_iter()
        .map(|value| {
            let inputs = base.with_parameter(param, value)?;
            Ok((value, run_full_chain(&inputs)))
        })
        .collect()
}

/// Fixed-width table, one row per sweep step
pub fn render_table(param: &str, rows: &[(f64, ResultBundle)]) -> String {
    let mut out = format!(
        "{:>14} {:>14} {:>12} {:>10} {:>10}  {}\n",
        param, "electrons", "total_noise", "snr", "snr_db", "regime"
    );
    for (value, bundle) in rows {
        let noise = &bundle.noise_analysis;
        out.push_str(&format!(
            "{:>14.4} {:>14.2} {:>12.3} {:>10.2} {:>10.2}  {}\n",
            value,
            bundle.results.electron_count,
            noise.total_noise,
            noise.snr_linear,
            noise.snr_db,
            noise.noise_regime
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::NoiseRegime;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(1.0, 3.0, 3).unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(linspace(5.0, 9.0, 1).unwrap(), vec![5.0]);
        assert!(linspace(0.0, 1.0, 0).is_err());
    }

    #[test]
    fn test_sweep_exposure_crosses_regimes() {
        let base = ChainInputs {
            scene_illuminance: 1.0,
            ..ChainInputs::default()
        };
        let rows = sweep(&base, "exposure_time", 0.0, 1000.0, 5).unwrap();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].1.noise_analysis.noise_regime, NoiseRegime::ReadLimited);
        assert_eq!(rows[4].1.noise_analysis.noise_regime, NoiseRegime::ShotLimited);
        assert!(rows.windows(2).all(|w| w[1].1.results.electron_count > w[0].1.results.electron_count));
    }

    #[test]
    fn test_sweep_unknown_parameter() {
        let err = sweep(&ChainInputs::default(), "iso", 100.0, 800.0, 4).unwrap_err();
        assert!(matches!(err, LumenError::InvalidParameter(_)));
    }

    #[test]
    fn test_render_table() {
        let rows = sweep(&ChainInputs::default(), "f_number", 2.0, 8.0, 4).unwrap();
        let table = render_table("f_number", &rows);
        assert_eq!(table.lines().count(), 5);
        assert!(table.lines().next().unwrap().contains("f_number"));
    }
}
