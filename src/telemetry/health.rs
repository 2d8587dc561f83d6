use std::fmt;

use super::{stats::standard_deviation, summary::to_fixed};

/// Sensitivities and weights of the health score. The sensitivities are
/// tuned by hand, they are not derived from anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthWeights {
    pub voltage_sensitivity: f64,
    pub current_sensitivity: f64,
    pub voltage_weight: f64,
    pub current_weight: f64,
}

impl HealthWeights {
    pub const DEFAULT: Self = Self {
        voltage_sensitivity: 8.0,
        current_sensitivity: 10.0,
        voltage_weight: 0.6,
        current_weight: 0.4,
    };
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthLabel {
    Healthy,
    Warning,
    Critical,
}

impl HealthLabel {
    /// Each band includes its lower bound. A `NaN` score matches no band
    /// check and lands on `Healthy`.
    pub fn from_score(score: f64) -> Self {
        if score < 50.0 {
            Self::Critical
        } else if score < 80.0 {
            Self::Warning
        } else {
            Self::Healthy
        }
    }
}

impl fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Healthy => "Healthy",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthAssessment {
    pub score: f64,
    pub label: HealthLabel,
}

impl HealthAssessment {
    pub fn display_score(&self) -> String {
        format!("{}%", to_fixed(self.score, 0))
    }

    /// Style tier of the score card. Unlike the label, a `NaN` score fails
    /// every threshold and falls to the worst tier.
    pub fn severity_class(&self) -> &'static str {
        if self.score >= 80.0 {
            "good"
        } else if self.score >= 50.0 {
            "warn"
        } else {
            "bad"
        }
    }
}

pub fn score_health(voltage: &[f64], current: &[f64]) -> HealthAssessment {
    score_health_with(voltage, current, HealthWeights::DEFAULT)
}

pub fn score_health_with(voltage: &[f64], current: &[f64], weights: HealthWeights) -> HealthAssessment {
    let score = score_from_deviations(
        standard_deviation(voltage),
        standard_deviation(current),
        weights,
    );

    HealthAssessment {
        score,
        label: HealthLabel::from_score(score),
    }
}

fn score_from_deviations(std_voltage: f64, std_current: f64, weights: HealthWeights) -> f64 {
    let voltage_component = (100.0 - std_voltage * weights.voltage_sensitivity).max(0.0);
    let current_component = (100.0 - std_current * weights.current_sensitivity).max(0.0);

    (voltage_component * weights.voltage_weight + current_component * weights.current_weight)
        .clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_bands() {
        assert_eq!(HealthLabel::from_score(49.9), HealthLabel::Critical);
        assert_eq!(HealthLabel::from_score(50.0), HealthLabel::Warning);
        assert_eq!(HealthLabel::from_score(79.9), HealthLabel::Warning);
        assert_eq!(HealthLabel::from_score(80.0), HealthLabel::Healthy);
        assert_eq!(HealthLabel::from_score(100.0), HealthLabel::Healthy);
    }

    #[test]
    fn steady_pack_scores_full() {
        let health = score_health(&[3.9, 3.9, 3.9], &[7.0, 7.0, 7.0]);

        assert!((health.score - 100.0).abs() < 1e-9);
        assert_eq!(health.label, HealthLabel::Healthy);
        assert_eq!(health.display_score(), "100%");
    }

    #[test]
    fn severity_follows_score() {
        let tier = |score: f64| HealthAssessment {
            score,
            label: HealthLabel::from_score(score),
        };
        assert_eq!(tier(100.0).severity_class(), "good");
        assert_eq!(tier(80.0).severity_class(), "good");
        assert_eq!(tier(79.9).severity_class(), "warn");
        assert_eq!(tier(50.0).severity_class(), "warn");
        assert_eq!(tier(49.9).severity_class(), "bad");

        let unknown = tier(f64::NAN);
        assert_eq!(unknown.label, HealthLabel::Healthy);
        assert_eq!(unknown.severity_class(), "bad");
        assert_eq!(unknown.display_score(), "NaN%");
    }

    #[test]
    fn half_percent_rounds_up() {
        let health = HealthAssessment {
            score: 87.5,
            label: HealthLabel::Healthy,
        };
        assert_eq!(health.display_score(), "88%");
    }

    #[test]
    fn known_score() {
        // std(voltage) = 1, std(current) = 2
        let health = score_health(&[1.0, 3.0], &[0.0, 4.0]);

        // 0.6 * (100 - 8) + 0.4 * (100 - 20)
        assert!((health.score - 87.2).abs() < 1e-9);
        assert_eq!(health.label, HealthLabel::Healthy);
    }

    #[test]
    fn score_is_clamped() {
        let health = score_health(&[0.0, 100.0], &[0.0, 100.0]);

        assert!(health.score.abs() < 1e-9);
        assert_eq!(health.label, HealthLabel::Critical);
    }

    #[test]
    fn more_variance_never_improves_score() {
        let weights = HealthWeights::DEFAULT;
        let deviations = [0.0, 0.5, 1.0, 2.5, 5.0, 10.0, 12.5, 20.0, 100.0];

        for pair in deviations.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            for other in deviations {
                assert!(
                    score_from_deviations(higher, other, weights)
                        <= score_from_deviations(lower, other, weights)
                );
                assert!(
                    score_from_deviations(other, higher, weights)
                        <= score_from_deviations(other, lower, weights)
                );
            }
        }
    }

    #[test]
    fn scores_stay_in_range() {
        let weights = HealthWeights::DEFAULT;
        for std_voltage in [0.0, 1.0, 6.0, 13.0, 1e6] {
            for std_current in [0.0, 1.0, 5.0, 10.0, 1e6] {
                let score = score_from_deviations(std_voltage, std_current, weights);
                assert!((0.0..=100.0).contains(&score));
            }
        }
    }
}
