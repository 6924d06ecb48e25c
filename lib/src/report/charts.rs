//! SVG chart rendering.
//!
//! Draws three standalone SVG documents with `plotters` (importance bar
//! chart, price histogram, actual-vs-predicted scatter) and returns them as
//! `data:image/svg+xml;base64,...` URIs ready to embed in an `<img>` tag.

use super::{ChartRenderer, Charts};
use crate::error::PipelineError;
use crate::importance::FeatureImportance;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use plotters::prelude::*;

const MARGIN: i32 = 16;
const BAR_COLOR: RGBColor = RGBColor(76, 120, 168);
const POINT_COLOR: RGBColor = RGBColor(245, 133, 24);
const GUIDE_COLOR: RGBColor = RGBColor(157, 157, 157);

/// [`ChartRenderer`] producing base64-encoded SVG images.
#[derive(Clone, Debug)]
pub struct SvgChartRenderer {
    pub width: u32,
    pub height: u32,
    /// Number of histogram bins for the price distribution.
    pub bins: usize,
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
            bins: 20,
        }
    }
}

impl SvgChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal bars, one per feature, highest importance on top.
    pub fn importance_chart(
        &self,
        importances: &[FeatureImportance],
    ) -> Result<String, PipelineError> {
        let rows = importances.len().max(1) as f64;
        let max = importances
            .iter()
            .map(|f| finite_or_zero(f.importance))
            .fold(0.0_f64, f64::max);
        // Leave room right of the longest bar for its label.
        let x_max = if max > 0.0 { max * 1.6 } else { 1.0 };

        let mut svg = String::new();
        {
            let root =
                SVGBackend::with_string(&mut svg, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE).map_err(chart_error)?;

            let mut chart = ChartBuilder::on(&root)
                .caption("Feature importance", ("sans-serif", 20))
                .margin(MARGIN)
                .x_label_area_size(30)
                .build_cartesian_2d(0f64..x_max, 0f64..rows)
                .map_err(chart_error)?;

            chart
                .configure_mesh()
                .disable_y_mesh()
                .x_desc("importance")
                .draw()
                .map_err(chart_error)?;

            let top = |rank: usize| rows - rank as f64;
            chart
                .draw_series(importances.iter().enumerate().map(|(rank, item)| {
                    Rectangle::new(
                        [
                            (0.0, top(rank) - 0.85),
                            (finite_or_zero(item.importance), top(rank) - 0.15),
                        ],
                        BAR_COLOR.filled(),
                    )
                }))
                .map_err(chart_error)?;

            chart
                .draw_series(importances.iter().enumerate().map(|(rank, item)| {
                    let value = finite_or_zero(item.importance);
                    Text::new(
                        format!("{} {:.3}", item.feature, value),
                        (value + x_max * 0.01, top(rank) - 0.3),
                        ("sans-serif", 12).into_font(),
                    )
                }))
                .map_err(chart_error)?;

            root.present().map_err(chart_error)?;
        }
        Ok(svg)
    }

    /// Histogram of the raw prices.
    pub fn price_histogram(&self, prices: &[f64]) -> Result<String, PipelineError> {
        let (lo, hi, counts) = histogram(prices, self.bins.max(1));
        let width = (hi - lo) / counts.len() as f64;
        let max_count = counts.iter().copied().max().unwrap_or(0).max(1) as f64;

        let mut svg = String::new();
        {
            let root =
                SVGBackend::with_string(&mut svg, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE).map_err(chart_error)?;

            let mut chart = ChartBuilder::on(&root)
                .caption("Price distribution", ("sans-serif", 20))
                .margin(MARGIN)
                .x_label_area_size(30)
                .y_label_area_size(40)
                .build_cartesian_2d(lo..hi, 0f64..max_count * 1.1)
                .map_err(chart_error)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc("price")
                .y_desc("listings")
                .draw()
                .map_err(chart_error)?;

            chart
                .draw_series(counts.iter().enumerate().map(|(i, &count)| {
                    let left = lo + i as f64 * width;
                    Rectangle::new(
                        [(left, 0.0), (left + width, count as f64)],
                        BAR_COLOR.filled(),
                    )
                }))
                .map_err(chart_error)?;

            root.present().map_err(chart_error)?;
        }
        Ok(svg)
    }

    /// Scatter of evaluation predictions against actual prices, with the
    /// `predicted == actual` diagonal.
    pub fn prediction_scatter(&self, predictions: &[(f64, f64)]) -> Result<String, PipelineError> {
        let points: Vec<(f64, f64)> = predictions
            .iter()
            .copied()
            .filter(|(a, p)| a.is_finite() && p.is_finite())
            .collect();
        let values: Vec<f64> = points.iter().flat_map(|&(a, p)| [a, p]).collect();
        let (lo, hi) = axis_range(&values);
        let pad = (hi - lo) * 0.05;
        let (lo, hi) = (lo - pad, hi + pad);

        let mut svg = String::new();
        {
            let root =
                SVGBackend::with_string(&mut svg, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE).map_err(chart_error)?;

            let mut chart = ChartBuilder::on(&root)
                .caption("Actual vs predicted", ("sans-serif", 20))
                .margin(MARGIN)
                .x_label_area_size(30)
                .y_label_area_size(40)
                .build_cartesian_2d(lo..hi, lo..hi)
                .map_err(chart_error)?;

            chart
                .configure_mesh()
                .x_desc("actual")
                .y_desc("predicted")
                .draw()
                .map_err(chart_error)?;

            chart
                .draw_series(LineSeries::new([(lo, lo), (hi, hi)], &GUIDE_COLOR))
                .map_err(chart_error)?;

            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(actual, predicted)| {
                            Circle::new((actual, predicted), 3, POINT_COLOR.filled())
                        }),
                )
                .map_err(chart_error)?;

            root.present().map_err(chart_error)?;
        }
        Ok(svg)
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(
        &self,
        importances: &[FeatureImportance],
        prices: &[f64],
        predictions: &[(f64, f64)],
    ) -> Result<Charts, PipelineError> {
        Ok(Charts {
            feature_importance: Some(data_uri(&self.importance_chart(importances)?)),
            price_distribution: Some(data_uri(&self.price_histogram(prices)?)),
            actual_vs_predicted: Some(data_uri(&self.prediction_scatter(predictions)?)),
        })
    }
}

/// Encode an SVG document as a base64 data URI.
pub fn data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}

fn chart_error<E: std::fmt::Display>(err: E) -> PipelineError {
    PipelineError::Chart(err.to_string())
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Min and max of the finite values, widened to a unit span when they
/// coincide; `(0, 1)` without finite values.
fn axis_range(values: &[f64]) -> (f64, f64) {
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let Some(first) = finite.next() else {
        return (0.0, 1.0);
    };
    let (lo, hi) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

/// Equal-width bin counts over [`axis_range`]; the max value lands in the
/// last bin. Returns the range with the counts.
fn histogram(values: &[f64], bins: usize) -> (f64, f64, Vec<usize>) {
    let (lo, hi) = axis_range(values);
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0; bins];

    for &v in values.iter().filter(|v| v.is_finite()) {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    (lo, hi, counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(uri: &str) -> String {
        let payload = uri.strip_prefix("data:image/svg+xml;base64,").unwrap();
        String::from_utf8(STANDARD.decode(payload).unwrap()).unwrap()
    }

    fn importances() -> Vec<FeatureImportance> {
        vec![
            FeatureImportance {
                feature: "Power".to_string(),
                importance: 0.7,
            },
            FeatureImportance {
                feature: "Fuel<&>Type".to_string(),
                importance: 0.3,
            },
        ]
    }

    #[test]
    fn test_render_produces_svg_data_uris() {
        let renderer = SvgChartRenderer::new();
        let charts = renderer
            .render(&importances(), &[1.0, 2.5, 4.0], &[(1.0, 1.2), (4.0, 3.5)])
            .unwrap();

        for uri in [
            charts.feature_importance.unwrap(),
            charts.price_distribution.unwrap(),
            charts.actual_vs_predicted.unwrap(),
        ] {
            let svg = decode(&uri);
            assert!(svg.contains("<svg"));
            assert!(svg.trim_end().ends_with("</svg>"));
        }
    }

    #[test]
    fn test_importance_chart_labels_are_escaped() {
        let svg = SvgChartRenderer::new()
            .importance_chart(&importances())
            .unwrap();
        assert!(svg.contains("Power 0.700"));
        assert!(svg.contains("Fuel&lt;&amp;&gt;Type"));
        assert!(!svg.contains("Fuel<&>Type"));
    }

    #[test]
    fn test_empty_inputs_still_render() {
        let renderer = SvgChartRenderer::new();
        let charts = renderer.render(&[], &[], &[]).unwrap();
        assert!(decode(&charts.actual_vs_predicted.unwrap()).contains("</svg>"));
        assert!(!renderer.prediction_scatter(&[]).unwrap().contains("<circle"));
    }

    #[test]
    fn test_scatter_has_one_point_per_finite_prediction() {
        let svg = SvgChartRenderer::new()
            .prediction_scatter(&[(1.0, 1.0), (2.0, 3.0), (5.0, 4.0), (f64::NAN, 2.0)])
            .unwrap();
        assert_eq!(svg.matches("<circle").count(), 3);
    }

    #[test]
    fn test_histogram_bins() {
        assert_eq!(histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 2), (0.0, 4.0, vec![2, 3]));
        assert_eq!(histogram(&[5.0, 5.0], 3), (4.5, 5.5, vec![0, 2, 0]));
        assert_eq!(histogram(&[], 2), (0.0, 1.0, vec![0, 0]));
    }

    #[test]
    fn test_axis_range_skips_non_finite() {
        assert_eq!(axis_range(&[f64::NAN, 2.0, f64::INFINITY, 6.0]), (2.0, 6.0));
        assert_eq!(axis_range(&[3.0]), (2.5, 3.5));
    }
}
