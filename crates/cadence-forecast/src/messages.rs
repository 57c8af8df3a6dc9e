//! Deterministic trend classification and recommendation text.

use cadence_core::models::{TrendDelta, TrendDirection};
use cadence_core::traits::MessageGenerator;

/// Relative change (percent) beyond which a score move counts as a
/// trend rather than noise.
const TREND_THRESHOLD_PCT: f64 = 5.0;

/// Classify the change between the current and previous score.
/// A zero previous score reports stable rather than dividing.
pub fn calculate_trend(current: f64, previous: f64) -> TrendDelta {
    if previous == 0.0 {
        return TrendDelta::stable();
    }

    let value = current - previous;
    let percentage = value / previous.abs() * 100.0;

    let direction = if percentage > TREND_THRESHOLD_PCT {
        TrendDirection::Up
    } else if percentage < -TREND_THRESHOLD_PCT {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    TrendDelta {
        direction,
        percentage: percentage.abs(),
        value,
    }
}

/// Deterministic recommendation source: a score band picks the base
/// message, a strong trend appends a modifier, low efficiency appends a
/// hint. Same inputs, same string, every time.
pub struct DefaultMessages;

impl MessageGenerator for DefaultMessages {
    fn recommendation(&self, score: f64, trend: &TrendDelta, efficiency: f64) -> String {
        let base = if score >= 90.0 {
            "Outstanding performance! You're at the top of your game."
        } else if score >= 80.0 {
            "Great job! You're performing at an excellent level."
        } else if score >= 70.0 {
            "Good work! You're maintaining solid productivity."
        } else if score >= 60.0 {
            "Decent performance! There's room for improvement."
        } else {
            "Let's improve together! Every small step counts."
        };

        let modifier = match trend.direction {
            TrendDirection::Up if trend.percentage > 10.0 => {
                " And you're improving rapidly!"
            }
            TrendDirection::Down if trend.percentage > 10.0 => {
                " Let's reverse this downward trend."
            }
            _ => "",
        };

        let hint = if efficiency < 50.0 {
            " Try batching similar tasks to lift your completion rate."
        } else {
            ""
        };

        format!("{base}{modifier}{hint}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_moves_are_stable() {
        let delta = calculate_trend(82.0, 80.0);
        assert_eq!(delta.direction, TrendDirection::Stable);
    }

    #[test]
    fn large_moves_have_direction() {
        assert_eq!(calculate_trend(90.0, 80.0).direction, TrendDirection::Up);
        assert_eq!(calculate_trend(70.0, 80.0).direction, TrendDirection::Down);
    }

    #[test]
    fn zero_previous_is_stable_not_a_division() {
        let delta = calculate_trend(50.0, 0.0);
        assert_eq!(delta.direction, TrendDirection::Stable);
        assert_eq!(delta.percentage, 0.0);
    }

    #[test]
    fn messages_are_deterministic() {
        let generator = DefaultMessages;
        let trend = calculate_trend(90.0, 70.0);
        let a = generator.recommendation(90.0, &trend, 80.0);
        let b = generator.recommendation(90.0, &trend, 80.0);
        assert_eq!(a, b);
        assert!(a.contains("improving rapidly"));
    }

    #[test]
    fn low_efficiency_appends_hint() {
        let generator = DefaultMessages;
        let message = generator.recommendation(45.0, &TrendDelta::stable(), 40.0);
        assert!(message.contains("batching similar tasks"));
    }
}
