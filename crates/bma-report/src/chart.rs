//! Generic chart data builder.
//!
//! One builder parameterized by a field selector and a chart kind,
//! instead of one near-identical function per chart. The output is pure
//! data; rendering belongs to whatever frontend consumes it.

use serde::Serialize;

use bma_models::BrandAnalysis;

/// Chart families the frontend knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
    Radar,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Radar => "radar",
        }
    }
}

/// Selects one of the record's list-valued dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Themes,
    AudienceInterests,
    Platforms,
    MarketNiches,
    CollaborationTypes,
    CoreValues,
}

impl Dimension {
    /// Human-readable chart title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Themes => "Content Themes",
            Self::AudienceInterests => "Audience Interests",
            Self::Platforms => "Main Platforms",
            Self::MarketNiches => "Market Niches",
            Self::CollaborationTypes => "Collaboration Types",
            Self::CoreValues => "Core Values",
        }
    }

    /// Borrow the selected labels from the record.
    pub fn labels<'a>(&self, analysis: &'a BrandAnalysis) -> &'a [String] {
        match self {
            Self::Themes => &analysis.themes,
            Self::AudienceInterests => &analysis.audience.interests,
            Self::Platforms => &analysis.platforms,
            Self::MarketNiches => &analysis.market_niches,
            Self::CollaborationTypes => &analysis.collaboration_types,
            Self::CoreValues => &analysis.values_tone.values,
        }
    }
}

/// Chart data ready for a renderer: labels plus relevance weights.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub weights: Vec<f64>,
}

/// Build chart data for one dimension of the record.
///
/// The record's lists are relevance-ordered, so weights descend by rank:
/// with `n` labels the first weighs `1.0` and the last `1/n`.
pub fn build_chart(analysis: &BrandAnalysis, dimension: Dimension, kind: ChartKind) -> ChartSpec {
    let labels = dimension.labels(analysis).to_vec();
    let n = labels.len();
    let weights = (0..n).map(|i| (n - i) as f64 / n as f64).collect();

    ChartSpec {
        kind,
        title: dimension.title().to_string(),
        labels,
        weights,
    }
}

/// The default chart set shown alongside the report.
pub fn standard_charts(analysis: &BrandAnalysis) -> Vec<ChartSpec> {
    vec![
        build_chart(analysis, Dimension::Themes, ChartKind::Bar),
        build_chart(analysis, Dimension::AudienceInterests, ChartKind::Pie),
        build_chart(analysis, Dimension::Platforms, ChartKind::Radar),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bma_models::{AudienceProfile, BrandMatch, ValuesTone};

    fn sample() -> BrandAnalysis {
        BrandAnalysis {
            video_url: "gs://b/uploads/v.mp4".to_string(),
            themes: vec!["moda".into(), "lifestyle".into(), "viagem".into()],
            content_style: "informal".to_string(),
            audience: AudienceProfile {
                age_range: "18-24".to_string(),
                gender: "feminino".to_string(),
                interests: vec!["moda".into(), "beleza".into()],
                geography: "Brasil".to_string(),
            },
            engagement: "alto".to_string(),
            values_tone: ValuesTone {
                values: vec!["autenticidade".into()],
                tone: "informal".to_string(),
            },
            platforms: vec!["Instagram".into(), "TikTok".into()],
            prior_collaborations: "Nenhuma".to_string(),
            market_niches: vec!["moda".into()],
            brand_matches: vec![BrandMatch {
                brand_type: "moda feminina".to_string(),
                examples: vec!["Farm".into()],
                justification: "afinidade".to_string(),
            }],
            collaboration_types: vec!["post patrocinado".into()],
            brand_image_notes: "positiva".to_string(),
        }
    }

    #[test]
    fn test_weights_descend_by_rank() {
        let spec = build_chart(&sample(), Dimension::Themes, ChartKind::Bar);
        assert_eq!(spec.labels.len(), 3);
        assert_eq!(spec.weights, vec![1.0, 2.0 / 3.0, 1.0 / 3.0]);
        assert_eq!(spec.title, "Content Themes");
    }

    #[test]
    fn test_every_dimension_selects_the_right_field() {
        let analysis = sample();
        assert_eq!(
            Dimension::AudienceInterests.labels(&analysis),
            &["moda", "beleza"]
        );
        assert_eq!(Dimension::Platforms.labels(&analysis), &["Instagram", "TikTok"]);
        assert_eq!(Dimension::CoreValues.labels(&analysis), &["autenticidade"]);
    }

    #[test]
    fn test_empty_dimension_builds_an_empty_chart() {
        let mut analysis = sample();
        analysis.market_niches.clear();

        let spec = build_chart(&analysis, Dimension::MarketNiches, ChartKind::Pie);
        assert!(spec.labels.is_empty());
        assert!(spec.weights.is_empty());
    }

    #[test]
    fn test_standard_chart_set() {
        let charts = standard_charts(&sample());
        assert_eq!(charts.len(), 3);
        assert_eq!(charts[0].kind, ChartKind::Bar);
        assert_eq!(charts[1].kind, ChartKind::Pie);
        assert_eq!(charts[2].kind, ChartKind::Radar);
    }

    #[test]
    fn test_chart_spec_serializes_kind_as_snake_case() {
        let spec = build_chart(&sample(), Dimension::Themes, ChartKind::Bar);
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["kind"], "bar");
    }
}
