//! End-to-end volatility study: simulate, split, fit, forecast, and chart.
//!
//! Purpose
//! -------
//! Reproduce the complete GARCH(2, 2) experiment in one call:
//!
//! 1. simulate `n` returns and their true volatility path;
//! 2. hold out the last `k = floor(n · test_fraction)` returns;
//! 3. fit on the training prefix and forecast `k` steps (short) and
//!    `long_horizon` steps (long) from the end of training;
//! 4. run the rolling one-step engine over the held-out window;
//! 5. assemble four labelled panels for a [`ChartSink`].
//!
//! Rendering is the caller's concern; this module only produces ordered
//! `f64` sequences with their titles and trace labels.
use crate::garch::{
    core::{
        data::ReturnSeries, forecasts::ForecastResult, options::SimOpts, params::GarchParams,
        shape::GarchOrder, variance::VarianceSeries,
    },
    errors::{GarchError, GarchResult},
    models::garch::{fit_with_options, FitResult},
    rolling::{rolling_forecast_with_options, RollingOptions},
    simulation::simulate_with_opts,
};
use ndarray::array;
use tracing::info;

pub const DATA_TITLE: &str = "Data and Volatility";
pub const SHORT_TITLE: &str = "Short-Term Volatility Prediction";
pub const LONG_TITLE: &str = "Long-Term Volatility Prediction";
pub const ROLLING_TITLE: &str = "Rolling Volatility Prediction";

/// Receiver of chart traces. One call per trace, in panel order.
pub trait ChartSink {
    fn draw(&mut self, title: &str, label: &str, values: &[f64]);
}

/// Study configuration.
///
/// Default: GARCH(2, 2), `n = 1000`, `ω = 0.5`, `α = [0.1, 0.2]`,
/// `β = [0.3, 0.4]`, `test_fraction = 0.1`, `long_horizon = 1000`, seed 42.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyConfig {
    pub order: GarchOrder,
    pub n: usize,
    /// Parameters of the simulated process (need not be stationary).
    pub params: GarchParams,
    pub test_fraction: f64,
    pub long_horizon: usize,
    pub seed: Option<u64>,
}

impl StudyConfig {
    /// Build a validated configuration.
    ///
    /// # Errors
    /// - [`GarchError::InvalidStudyConfig`] if `test_fraction` is not in
    ///   `(0, 1)`, if the held-out window `floor(n · test_fraction)` is empty
    ///   or leaves no training data, or if `long_horizon == 0`.
    /// - Length mismatches between `params` and `order`.
    pub fn new(
        order: GarchOrder, n: usize, params: GarchParams, test_fraction: f64,
        long_horizon: usize, seed: Option<u64>,
    ) -> GarchResult<Self> {
        params.check_order(&order)?;
        if !test_fraction.is_finite() || test_fraction <= 0.0 || test_fraction >= 1.0 {
            return Err(GarchError::InvalidStudyConfig {
                reason: "test_fraction must lie strictly between 0 and 1.",
            });
        }
        let config = StudyConfig { order, n, params, test_fraction, long_horizon, seed };
        let k = config.test_length();
        if k == 0 || k >= n {
            return Err(GarchError::InvalidStudyConfig {
                reason: "the held-out window must be non-empty and leave training data.",
            });
        }
        if long_horizon == 0 {
            return Err(GarchError::InvalidStudyConfig {
                reason: "long_horizon must be at least one step.",
            });
        }
        Ok(config)
    }

    /// Held-out window length `floor(n · test_fraction)`.
    pub fn test_length(&self) -> usize {
        (self.n as f64 * self.test_fraction).floor() as usize
    }

    /// The short forecast horizon equals the held-out window.
    pub fn short_horizon(&self) -> usize {
        self.test_length()
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        StudyConfig {
            order: GarchOrder { p: 2, q: 2 },
            n: 1000,
            params: GarchParams { omega: 0.5, alpha: array![0.1, 0.2], beta: array![0.3, 0.4] },
            test_fraction: 0.1,
            long_horizon: 1000,
            seed: Some(42),
        }
    }
}

/// One labelled sequence inside a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub label: &'static str,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: &'static str,
    pub traces: Vec<Trace>,
}

/// The four study panels, all on the standard-deviation scale.
#[derive(Debug, Clone, PartialEq)]
pub struct StudySeries {
    pub panels: Vec<Panel>,
}

impl StudySeries {
    fn assemble(
        returns: &ReturnSeries, truth: &VarianceSeries, k: usize, short: &ForecastResult,
        long: &ForecastResult, rolling: &ForecastResult,
    ) -> GarchResult<Self> {
        let held_out = truth.tail(k)?.to_vec();
        let versus = |title, label, forecast: &ForecastResult| Panel {
            title,
            traces: vec![
                Trace { label: "True Volatility", values: held_out.clone() },
                Trace { label, values: forecast.sigma.to_vec() },
            ],
        };
        let panels = vec![
            Panel {
                title: DATA_TITLE,
                traces: vec![
                    Trace { label: "Data", values: returns.data.to_vec() },
                    Trace { label: "Volatility", values: truth.sigma.to_vec() },
                ],
            },
            versus(SHORT_TITLE, "Predicted Volatility", short),
            versus(LONG_TITLE, "Predicted Volatility", long),
            versus(ROLLING_TITLE, "Rolling Prediction", rolling),
        ];
        Ok(StudySeries { panels })
    }

    /// Hand every trace to `sink`, panel by panel.
    pub fn render<S: ChartSink + ?Sized>(&self, sink: &mut S) {
        for panel in &self.panels {
            for trace in &panel.traces {
                sink.draw(panel.title, trace.label, &trace.values);
            }
        }
    }
}

/// Everything the study produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyOutcome {
    pub returns: ReturnSeries,
    pub true_volatility: VarianceSeries,
    pub fit: FitResult,
    pub short: ForecastResult,
    pub long: ForecastResult,
    pub rolling: ForecastResult,
    pub series: StudySeries,
}

/// Run the study with default rolling options (parallel, default fits).
pub fn run_study(config: &StudyConfig) -> GarchResult<StudyOutcome> {
    run_study_with_options(config, &RollingOptions::default())
}

/// Run the study; `opts.estimation` is used for the direct fit too.
pub fn run_study_with_options(
    config: &StudyConfig, opts: &RollingOptions,
) -> GarchResult<StudyOutcome> {
    let k = config.test_length();
    info!(n = config.n, test_length = k, long_horizon = config.long_horizon, "running study");

    let (returns, true_volatility) =
        simulate_with_opts(&config.params, config.n, &SimOpts::new(config.seed))?;
    let train = returns.prefix(config.n - k)?;
    let fit = fit_with_options(&config.order, &train, &opts.estimation)?;
    let short = fit.forecast(config.short_horizon())?;
    let long = fit.forecast(config.long_horizon)?;
    let rolling = rolling_forecast_with_options(&config.order, &returns, k, opts)?;

    let series = StudySeries::assemble(&returns, &true_volatility, k, &short, &long, &rolling)?;
    Ok(StudyOutcome { returns, true_volatility, fit, short, long, rolling, series })
}

/// Run the study and draw its panels into `sink`.
pub fn run_and_render<S: ChartSink + ?Sized>(
    config: &StudyConfig, sink: &mut S,
) -> GarchResult<StudyOutcome> {
    let outcome = run_study(config)?;
    outcome.series.render(sink);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Configuration validation and the default experiment.
    // - Panel layout and rendering order on a reduced study.
    // -------------------------------------------------------------------------

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(String, String, usize)>,
    }

    impl ChartSink for Recorder {
        fn draw(&mut self, title: &str, label: &str, values: &[f64]) {
            self.calls.push((title.to_string(), label.to_string(), values.len()));
        }
    }

    #[test]
    // Purpose
    // -------
    // The default configuration is the GARCH(2, 2) experiment with a
    // 100-point held-out window.
    //
    // Given
    // -----
    // - `StudyConfig::default()`.
    //
    // Expect
    // ------
    // - Test length 100, short horizon 100, integrated true process.
    fn default_config_matches_experiment() {
        let config = StudyConfig::default();

        assert_eq!(config.test_length(), 100);
        assert_eq!(config.short_horizon(), 100);
        assert_eq!(config.order, GarchOrder { p: 2, q: 2 });
        assert!((config.params.persistence() - 1.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Inconsistent configurations are rejected.
    //
    // Given
    // -----
    // - test_fraction 0, test_fraction 0.001 with n = 100 (empty window), and
    //   long_horizon 0.
    //
    // Expect
    // ------
    // - `InvalidStudyConfig` for each.
    fn invalid_configs_are_rejected() {
        let base = StudyConfig::default();
        let build = |n, frac, long| {
            StudyConfig::new(base.order, n, base.params.clone(), frac, long, Some(1))
        };

        assert!(matches!(build(1000, 0.0, 10), Err(GarchError::InvalidStudyConfig { .. })));
        assert!(matches!(build(100, 0.001, 10), Err(GarchError::InvalidStudyConfig { .. })));
        assert!(matches!(build(1000, 0.1, 0), Err(GarchError::InvalidStudyConfig { .. })));
    }

    #[test]
    // Purpose
    // -------
    // A reduced study produces four panels with the expected titles, labels,
    // and lengths, and renders them in order.
    //
    // Given
    // -----
    // - GARCH(1, 1), n = 400, test_fraction 0.01 (k = 4), long horizon 50.
    //
    // Expect
    // ------
    // - 8 draw calls; data panel lengths 400 / 401; forecast panels k, k, 50, k.
    fn reduced_study_renders_four_panels() {
        // Arrange
        let order = GarchOrder::new(1, 1).expect("valid order");
        let params = GarchParams::new(0.2, array![0.1], array![0.7]).expect("valid");
        let config = StudyConfig::new(order, 400, params, 0.01, 50, Some(9)).expect("valid");
        let mut sink = Recorder::default();

        // Act
        let outcome = run_and_render(&config, &mut sink).expect("study");

        // Assert
        let expected = vec![
            (DATA_TITLE, "Data", 400),
            (DATA_TITLE, "Volatility", 401),
            (SHORT_TITLE, "True Volatility", 4),
            (SHORT_TITLE, "Predicted Volatility", 4),
            (LONG_TITLE, "True Volatility", 4),
            (LONG_TITLE, "Predicted Volatility", 50),
            (ROLLING_TITLE, "True Volatility", 4),
            (ROLLING_TITLE, "Rolling Prediction", 4),
        ];
        let got: Vec<(&str, &str, usize)> =
            sink.calls.iter().map(|(t, l, n)| (t.as_str(), l.as_str(), *n)).collect();
        assert_eq!(got, expected);
        assert_eq!(outcome.fit.n_obs, 396);
    }
}
