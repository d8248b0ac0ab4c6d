//! Grade calculator.
//!
//! Two independent, stateless modes:
//! - **simple**: points earned over points possible
//! - **weighted**: per-category percentages blended by normalized weights
//!
//! Weights do not need to add up to 100. Categories with a non-positive
//! weight contribute nothing as long as another category has a positive
//! weight; if none does, every valid category gets an equal share.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const FALLBACK_CATEGORY_NAME: &str = "Category";

/// Round to two decimals, the precision results are reported with.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn is_valid_score(earned: f64, possible: f64) -> bool {
    // NaN fails both comparisons
    earned >= 0.0 && possible > 0.0
}

/// Result of the simple mode, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimpleGrade {
    pub percentage: f64,
}

impl fmt::Display for SimpleGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {:.2}%", self.percentage)
    }
}

/// `earned / possible * 100`, rounded to two decimals.
///
/// # Errors
/// Returns [`ValidationError::InvalidScore`] unless `earned >= 0` and `possible > 0`.
pub fn simple(earned: f64, possible: f64) -> Result<SimpleGrade, ValidationError> {
    if !is_valid_score(earned, possible) {
        return Err(ValidationError::InvalidScore);
    }
    Ok(SimpleGrade {
        percentage: round2(earned / possible * 100.0),
    })
}

/// One row of the weighted form. Blank numeric inputs are `NaN`, a blank
/// weight is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub earned: f64,
    pub possible: f64,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl Category {
    pub fn new(name: impl Into<String>, earned: f64, possible: f64, weight: Option<f64>) -> Self {
        Self {
            name: name.into(),
            earned,
            possible,
            weight,
        }
    }

    /// Rows a fresh form starts with: named and weighted, no scores yet.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Exams", f64::NAN, f64::NAN, Some(40.0)),
            Self::new("Quizzes", f64::NAN, f64::NAN, Some(20.0)),
            Self::new("Homework", f64::NAN, f64::NAN, Some(40.0)),
        ]
    }

    fn is_valid(&self) -> bool {
        is_valid_score(self.earned, self.possible)
    }

    fn positive_weight(&self) -> Option<f64> {
        self.weight.filter(|w| *w > 0.0)
    }

    fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            FALLBACK_CATEGORY_NAME
        } else {
            trimmed
        }
    }
}

/// Parses `NAME:EARNED/POSSIBLE[@WEIGHT]`.
///
/// Numbers that are blank or do not parse become `NaN` (the row is then
/// dropped by the calculator); only a missing `:` or `/` is an error.
impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::MalformedCategory {
            input: s.to_string(),
        };
        let (name, rest) = s.split_once(':').ok_or_else(malformed)?;
        let (scores, weight) = match rest.split_once('@') {
            Some((scores, weight)) => (scores, Some(weight)),
            None => (rest, None),
        };
        let (earned, possible) = scores.split_once('/').ok_or_else(malformed)?;

        Ok(Self {
            name: name.trim().to_string(),
            earned: parse_lenient(earned),
            possible: parse_lenient(possible),
            weight: weight.map(parse_lenient).filter(|w| !w.is_nan()),
        })
    }
}

/// Blank, unparsable and infinite input all become `NaN`.
pub fn parse_lenient(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(f64::NAN)
}

/// Per-category line of the weighted result. Figures are rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub category_pct: f64,
    /// Normalized weight as a percentage of the blend.
    pub weight_percent: f64,
    pub contribution: f64,
}

impl fmt::Display for CategoryBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2}% × {:.1}% = {:.2}%",
            self.name, self.category_pct, self.weight_percent, self.contribution
        )
    }
}

/// Result of the weighted mode.
///
/// `final_grade` is the rounded sum of the unrounded contributions, so it can
/// differ from the sum of the breakdown lines in the last digit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedGrade {
    pub final_grade: f64,
    pub breakdown: Vec<CategoryBreakdown>,
}

impl fmt::Display for WeightedGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Final Grade: {:.2}%", self.final_grade)?;
        for line in &self.breakdown {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

/// Blend the valid categories into a final grade.
///
/// Invalid rows are dropped before any weight is summed.
///
/// # Errors
/// Returns [`ValidationError::NoValidCategory`] if no row has
/// `earned >= 0` and `possible > 0`, and [`ValidationError::DegenerateWeights`]
/// if the positive weights do not add up to a positive total.
pub fn weighted(categories: &[Category]) -> Result<WeightedGrade, ValidationError> {
    let rows: Vec<&Category> = categories.iter().filter(|c| c.is_valid()).collect();
    if rows.is_empty() {
        return Err(ValidationError::NoValidCategory);
    }

    let has_any_weight = rows.iter().any(|c| c.positive_weight().is_some());
    let total_weight: f64 = if has_any_weight {
        rows.iter().filter_map(|c| c.positive_weight()).sum()
    } else {
        rows.len() as f64
    };
    if !total_weight.is_finite() || total_weight <= 0.0 {
        return Err(ValidationError::DegenerateWeights);
    }

    let equal_share = 1.0 / rows.len() as f64;
    let mut final_grade = 0.0;
    let breakdown = rows
        .iter()
        .map(|c| {
            let category_pct = c.earned / c.possible * 100.0;
            let normalized = if has_any_weight {
                c.positive_weight().map_or(0.0, |w| w / total_weight)
            } else {
                equal_share
            };
            let contribution = category_pct * normalized;
            final_grade += contribution;
            CategoryBreakdown {
                name: c.display_name().to_string(),
                category_pct: round2(category_pct),
                weight_percent: round2(normalized * 100.0),
                contribution: round2(contribution),
            }
        })
        .collect();

    Ok(WeightedGrade {
        final_grade: round2(final_grade),
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(earned: f64, possible: f64, weight: Option<f64>) -> Category {
        Category::new("c", earned, possible, weight)
    }

    #[test]
    fn simple_percentage() {
        let grade = simple(42.0, 48.0).unwrap();
        assert_eq!(round2(grade.percentage), 87.5);
        assert_eq!(grade.to_string(), "Score: 87.50%");
        assert_eq!(simple(0.0, 10.0).unwrap().percentage, 0.0);
        assert_eq!(round2(simple(110.0, 100.0).unwrap().percentage), 110.0);
    }

    #[test]
    fn simple_rejects_bad_input() {
        assert_eq!(simple(-1.0, 10.0), Err(ValidationError::InvalidScore));
        assert_eq!(simple(5.0, 0.0), Err(ValidationError::InvalidScore));
        assert_eq!(simple(5.0, -3.0), Err(ValidationError::InvalidScore));
        assert_eq!(simple(f64::NAN, 10.0), Err(ValidationError::InvalidScore));
        assert_eq!(simple(5.0, f64::NAN), Err(ValidationError::InvalidScore));
    }

    #[test]
    fn weighted_blend() {
        let grade = weighted(&[
            cat(80.0, 100.0, Some(40.0)),
            cat(90.0, 100.0, Some(20.0)),
            cat(70.0, 100.0, Some(40.0)),
        ])
        .unwrap();
        assert_eq!(round2(grade.final_grade), 78.0);
        assert_eq!(round2(grade.breakdown[0].contribution), 32.0);
        assert_eq!(round2(grade.breakdown[1].weight_percent), 20.0);
    }

    #[test]
    fn weights_need_not_sum_to_100() {
        let grade = weighted(&[cat(50.0, 100.0, Some(1.0)), cat(100.0, 100.0, Some(3.0))]).unwrap();
        assert_eq!(round2(grade.final_grade), 87.5);
    }

    #[test]
    fn no_weights_means_equal_shares() {
        let grade = weighted(&[cat(80.0, 100.0, Some(0.0)), cat(60.0, 100.0, Some(0.0))]).unwrap();
        assert_eq!(round2(grade.final_grade), 70.0);
        let blank = weighted(&[cat(80.0, 100.0, None), cat(60.0, 100.0, None)]).unwrap();
        assert_eq!(round2(blank.final_grade), 70.0);
        assert_eq!(blank.breakdown[0].weight_percent, 50.0);
    }

    #[test]
    fn non_positive_weight_contributes_nothing() {
        let grade = weighted(&[
            cat(100.0, 100.0, Some(-10.0)),
            cat(60.0, 100.0, Some(30.0)),
            cat(80.0, 100.0, Some(10.0)),
        ])
        .unwrap();
        // (60*30 + 80*10) / 40
        assert_eq!(round2(grade.final_grade), 65.0);
        assert_eq!(grade.breakdown.len(), 3);
        assert_eq!(grade.breakdown[0].weight_percent, 0.0);
        assert_eq!(grade.breakdown[0].contribution, 0.0);
    }

    #[test]
    fn invalid_rows_are_dropped_before_normalizing() {
        let grade = weighted(&[
            cat(f64::NAN, 100.0, Some(50.0)),
            cat(90.0, 0.0, Some(25.0)),
            cat(75.0, 100.0, Some(25.0)),
        ])
        .unwrap();
        assert_eq!(grade.breakdown.len(), 1);
        assert_eq!(grade.breakdown[0].weight_percent, 100.0);
        assert_eq!(round2(grade.final_grade), 75.0);
    }

    #[test]
    fn empty_or_all_invalid_fails() {
        assert_eq!(weighted(&[]), Err(ValidationError::NoValidCategory));
        assert_eq!(
            weighted(&Category::defaults()),
            Err(ValidationError::NoValidCategory)
        );
    }

    #[test]
    fn infinite_weight_is_degenerate() {
        assert_eq!(
            weighted(&[cat(50.0, 100.0, Some(f64::INFINITY))]),
            Err(ValidationError::DegenerateWeights)
        );
    }

    #[test]
    fn parse_category_rows() {
        let c: Category = "Exams:80/100@40".parse().unwrap();
        assert_eq!(c, Category::new("Exams", 80.0, 100.0, Some(40.0)));

        let c: Category = "Labs: 9 / 10".parse().unwrap();
        assert_eq!(c, Category::new("Labs", 9.0, 10.0, None));

        let c: Category = "Quiz:/10@".parse().unwrap();
        assert!(c.earned.is_nan());
        assert_eq!(c.weight, None);

        assert!("Exams".parse::<Category>().is_err());
        assert!("Exams:80".parse::<Category>().is_err());
    }

    #[test]
    fn results_are_rounded_to_two_decimals() {
        assert_eq!(simple(1.0, 3.0).unwrap().percentage, 33.33);
        let grade = weighted(&[cat(1.0, 3.0, Some(1.0)), cat(2.0, 3.0, Some(2.0))]).unwrap();
        assert_eq!(grade.final_grade, 55.56);
        assert_eq!(grade.breakdown[0].category_pct, 33.33);
        assert_eq!(grade.breakdown[0].weight_percent, 33.33);
        assert_eq!(grade.breakdown[0].contribution, 11.11);
        assert_eq!(grade.breakdown[1].contribution, 44.44);
    }

    #[test]
    fn infinite_scores_are_dropped() {
        let c: Category = "A:inf/100".parse().unwrap();
        assert!(c.earned.is_nan());
        let c: Category = "A:5/infinity@-inf".parse().unwrap();
        assert!(c.possible.is_nan());
        assert_eq!(c.weight, None);
        assert_eq!(
            weighted(&["A:inf/100".parse().unwrap()]),
            Err(ValidationError::NoValidCategory)
        );
        let grade = weighted(&["A:inf/100".parse().unwrap(), cat(40.0, 50.0, None)]).unwrap();
        assert_eq!(grade.final_grade, 80.0);
    }

    #[test]
    fn breakdown_lines() {
        let grade = weighted(&[
            Category::new("Exams", 80.0, 100.0, Some(40.0)),
            Category::new("  ", 90.0, 100.0, Some(60.0)),
        ])
        .unwrap();
        let text = grade.to_string();
        assert!(text.starts_with("Final Grade: 86.00%"));
        assert!(text.contains("Exams: 80.00% × 40.0% = 32.00%"));
        assert!(text.contains("Category: 90.00% × 60.0% = 54.00%"));
    }
}
