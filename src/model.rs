//! Analysis result returned by the scoring service

use crate::error::ResponseShapeError;
use serde::{Deserialize, Serialize};

/// Structured scoring payload for one candidate.
///
/// Category totals and the overall score are whatever the service sent;
/// nothing here recomputes them from the sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub candidate_name: String,
    pub recommendation: String,
    pub scores: Scores,
    pub summary_justification: SummaryJustification,
    pub detailed_evaluation: Vec<CriterionEvaluation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub general_qualifications: GeneralQualifications,
    pub adequacy_for_assignment: AdequacyForAssignment,
    pub specific_skills_competencies: SpecificSkillsCompetencies,
    pub total_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralQualifications {
    pub education: f64,
    pub years_of_experience: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdequacyForAssignment {
    pub relevant_project_experience: f64,
    pub donor_experience: f64,
    pub regional_experience: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificSkillsCompetencies {
    pub technical_skills: f64,
    pub language_proficiency: f64,
    pub certifications: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryJustification {
    pub key_strengths: String,
    pub key_weaknesses: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionEvaluation {
    pub criterion: String,
    pub weight: f64,
    pub score: f64,
    pub justification: String,
}

impl AnalysisResult {
    /// Parse a response body and check it against the expected schema.
    pub fn from_json_slice(body: &[u8]) -> std::result::Result<Self, ResponseShapeError> {
        let result: AnalysisResult = serde_json::from_slice(body)?;
        result.check_score_ranges()?;
        Ok(result)
    }

    /// Every displayed score, keyed by its JSON path.
    fn scored_fields(&self) -> Vec<(&'static str, f64)> {
        let s = &self.scores;
        vec![
            (
                "scores.general_qualifications.education",
                s.general_qualifications.education,
            ),
            (
                "scores.general_qualifications.years_of_experience",
                s.general_qualifications.years_of_experience,
            ),
            (
                "scores.general_qualifications.total",
                s.general_qualifications.total,
            ),
            (
                "scores.adequacy_for_assignment.relevant_project_experience",
                s.adequacy_for_assignment.relevant_project_experience,
            ),
            (
                "scores.adequacy_for_assignment.donor_experience",
                s.adequacy_for_assignment.donor_experience,
            ),
            (
                "scores.adequacy_for_assignment.regional_experience",
                s.adequacy_for_assignment.regional_experience,
            ),
            (
                "scores.adequacy_for_assignment.total",
                s.adequacy_for_assignment.total,
            ),
            (
                "scores.specific_skills_competencies.technical_skills",
                s.specific_skills_competencies.technical_skills,
            ),
            (
                "scores.specific_skills_competencies.language_proficiency",
                s.specific_skills_competencies.language_proficiency,
            ),
            (
                "scores.specific_skills_competencies.certifications",
                s.specific_skills_competencies.certifications,
            ),
            (
                "scores.specific_skills_competencies.total",
                s.specific_skills_competencies.total,
            ),
            ("scores.total_score", s.total_score),
        ]
    }

    fn check_score_ranges(&self) -> std::result::Result<(), ResponseShapeError> {
        for (field, value) in self.scored_fields() {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ResponseShapeError::ScoreOutOfRange {
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Format a score exactly as it was sent. Whole numbers print without `.0`.
pub fn format_score(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn sample_result() -> AnalysisResult {
        AnalysisResult {
            candidate_name: "Jane Mwangi".to_string(),
            recommendation: "Recommended with reservations".to_string(),
            scores: Scores {
                general_qualifications: GeneralQualifications {
                    education: 80.0,
                    years_of_experience: 70.0,
                    total: 75.0,
                },
                adequacy_for_assignment: AdequacyForAssignment {
                    relevant_project_experience: 72.0,
                    donor_experience: 65.0,
                    regional_experience: 90.0,
                    total: 73.5,
                },
                specific_skills_competencies: SpecificSkillsCompetencies {
                    technical_skills: 68.0,
                    language_proficiency: 85.0,
                    certifications: 40.0,
                    total: 70.0,
                },
                total_score: 73.0,
            },
            summary_justification: SummaryJustification {
                key_strengths: "Long field presence in East Africa.".to_string(),
                key_weaknesses: "No formal M&E certification.".to_string(),
            },
            detailed_evaluation: vec![CriterionEvaluation {
                criterion: "Education".to_string(),
                weight: 10.0,
                score: 80.0,
                justification: "MSc in Development Economics.".to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"{
        "candidate_name": "Jane Mwangi",
        "recommendation": "Recommended with reservations",
        "scores": {
            "general_qualifications": {"education": 80, "years_of_experience": 70, "total": 75},
            "adequacy_for_assignment": {"relevant_project_experience": 72, "donor_experience": 65, "regional_experience": 90, "total": 73.5},
            "specific_skills_competencies": {"technical_skills": 68, "language_proficiency": 85, "certifications": 40, "total": 70},
            "total_score": 73
        },
        "summary_justification": {"key_strengths": "Long field presence in East Africa.", "key_weaknesses": "No formal M&E certification."},
        "detailed_evaluation": [
            {"criterion": "Education", "weight": 10, "score": 80, "justification": "MSc in Development Economics."}
        ]
    }"#;

    #[test]
    fn test_parse_valid_response() {
        let result = AnalysisResult::from_json_slice(SAMPLE_JSON.as_bytes()).unwrap();
        assert_eq!(result, fixtures::sample_result());
    }

    #[test]
    fn test_missing_field_is_shape_error() {
        let body = r#"{"candidate_name": "X", "recommendation": "Y"}"#;
        let err = AnalysisResult::from_json_slice(body.as_bytes()).unwrap_err();
        assert!(matches!(err, ResponseShapeError::Json(_)));
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        let body = SAMPLE_JSON.replace("\"total_score\": 73", "\"total_score\": 140");
        let err = AnalysisResult::from_json_slice(body.as_bytes()).unwrap_err();
        match err {
            ResponseShapeError::ScoreOutOfRange { field, value } => {
                assert_eq!(field, "scores.total_score");
                assert_eq!(value, 140.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_detailed_evaluation_is_shape_error() {
        let mut value: serde_json::Value = serde_json::from_str(SAMPLE_JSON).unwrap();
        value.as_object_mut().unwrap().remove("detailed_evaluation");
        let body = serde_json::to_vec(&value).unwrap();

        let err = AnalysisResult::from_json_slice(&body).unwrap_err();
        assert!(matches!(err, ResponseShapeError::Json(_)));
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(73.0), "73");
        assert_eq!(format_score(73.5), "73.5");
        assert_eq!(format_score(66.666), "66.666");
        assert_eq!(format_score(72.005), "72.005");
        assert_eq!(format_score(0.0), "0");
    }
}
