use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressScores {
    pub personal: f64,
    pub professional: f64,
}

/// Derives the two stress scores from a weekly form. Personal stress is the
/// mean of q1-q3, professional stress the mean of q4-q7. Missing keys count
/// as 0 and the divisors stay fixed, so a sparse form lowers the score
/// instead of failing.
pub fn stress_scores(responses: &HashMap<String, i32>) -> StressScores {
    let score = |key: &str| responses.get(key).copied().unwrap_or(0) as f64;

    StressScores {
        personal: (score("q1") + score("q2") + score("q3")) / 3.0,
        professional: (score("q4") + score("q5") + score("q6") + score("q7")) / 4.0,
    }
}

/// Arithmetic mean of per-employee scores, rounded to one decimal. An empty
/// team averages to zero rather than dividing by zero.
pub fn team_average(scores: &[StressScores]) -> StressScores {
    if scores.is_empty() {
        return StressScores {
            personal: 0.0,
            professional: 0.0,
        };
    }

    let count = scores.len() as f64;
    StressScores {
        personal: round_one_decimal(scores.iter().map(|s| s.personal).sum::<f64>() / count),
        professional: round_one_decimal(scores.iter().map(|s| s.professional).sum::<f64>() / count),
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responses(pairs: &[(&str, i32)]) -> HashMap<String, i32> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect()
    }

    #[test]
    fn full_form_splits_personal_and_professional() {
        let scores = stress_scores(&responses(&[
            ("q1", 3),
            ("q2", 3),
            ("q3", 3),
            ("q4", 2),
            ("q5", 2),
            ("q6", 2),
            ("q7", 2),
        ]));
        assert_eq!(scores.personal, 3.0);
        assert_eq!(scores.professional, 2.0);
    }

    #[test]
    fn missing_keys_count_as_zero() {
        let scores = stress_scores(&responses(&[("q4", 4), ("q5", 4), ("q6", 4), ("q7", 4)]));
        assert_eq!(scores.personal, 0.0);
        assert_eq!(scores.professional, 4.0);
    }

    #[test]
    fn divisors_stay_fixed_for_sparse_forms() {
        let scores = stress_scores(&responses(&[("q1", 3)]));
        assert_eq!(scores.personal, 1.0);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let scores = stress_scores(&responses(&[("q1", 3), ("q8", 5), ("note", 1)]));
        assert_eq!(scores.personal, 1.0);
        assert_eq!(scores.professional, 0.0);
    }

    #[test]
    fn empty_team_averages_to_zero() {
        let avg = team_average(&[]);
        assert_eq!(avg.personal, 0.0);
        assert_eq!(avg.professional, 0.0);
    }

    #[test]
    fn team_average_rounds_to_one_decimal() {
        let avg = team_average(&[
            StressScores {
                personal: 1.0,
                professional: 2.0,
            },
            StressScores {
                personal: 2.0,
                professional: 2.5,
            },
            StressScores {
                personal: 2.0,
                professional: 2.0,
            },
        ]);
        assert_eq!(avg.personal, 1.7);
        assert_eq!(avg.professional, 2.2);
    }
}
