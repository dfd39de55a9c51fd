//! Presentation model for an analysis result
//!
//! Everything the formatters draw comes from here: the chart series, the
//! grouped breakdown table and the summary. Weights are fixed display labels
//! and are never checked against the scores.

use crate::model::AnalysisResult;
use serde::Serialize;

pub const CHART_TITLE: &str = "Candidate Performance Overview";
pub const CHART_SERIES_LABEL: &str = "Candidate Scores";
pub const CHART_MAX: f64 = 100.0;

/// Chart labels, in plotting order.
pub const CHART_LABELS: [&str; 8] = [
    "Education",
    "Years of Experience",
    "Project Experience",
    "Donor Experience",
    "Regional Experience",
    "Technical Skills",
    "Language Proficiency",
    "Certifications",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreChart {
    pub title: &'static str,
    pub series_label: &'static str,
    pub max: f64,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    GeneralQualifications,
    AdequacyForAssignment,
    SpecificSkills,
}

impl Category {
    pub fn title(&self) -> &'static str {
        match self {
            Category::GeneralQualifications => "General Qualifications",
            Category::AdequacyForAssignment => "Adequacy for Assignment",
            Category::SpecificSkills => "Specific Skills & Competencies",
        }
    }

    pub fn weight(&self) -> u8 {
        match self {
            Category::GeneralQualifications => 20,
            Category::AdequacyForAssignment => 50,
            Category::SpecificSkills => 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub label: &'static str,
    pub weight: u8,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSection {
    pub category: Category,
    pub rows: Vec<BreakdownRow>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownTable {
    pub sections: Vec<BreakdownSection>,
    pub total_score: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub key_strengths: String,
    pub key_weaknesses: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationEntry {
    pub criterion: String,
    pub weight: f64,
    pub score: f64,
    pub justification: String,
}

/// Everything needed to display one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedResult {
    pub candidate_name: String,
    pub chart: ScoreChart,
    pub table: BreakdownTable,
    pub summary: Summary,
    pub detailed_evaluation: Vec<EvaluationEntry>,
}

impl RenderedResult {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            candidate_name: result.candidate_name.clone(),
            chart: build_chart(result),
            table: build_table(result),
            summary: Summary {
                key_strengths: result.summary_justification.key_strengths.clone(),
                key_weaknesses: result.summary_justification.key_weaknesses.clone(),
            },
            detailed_evaluation: result
                .detailed_evaluation
                .iter()
                .map(|e| EvaluationEntry {
                    criterion: e.criterion.clone(),
                    weight: e.weight,
                    score: e.score,
                    justification: e.justification.clone(),
                })
                .collect(),
        }
    }
}

pub fn build_chart(result: &AnalysisResult) -> ScoreChart {
    let s = &result.scores;
    let values = [
        s.general_qualifications.education,
        s.general_qualifications.years_of_experience,
        s.adequacy_for_assignment.relevant_project_experience,
        s.adequacy_for_assignment.donor_experience,
        s.adequacy_for_assignment.regional_experience,
        s.specific_skills_competencies.technical_skills,
        s.specific_skills_competencies.language_proficiency,
        s.specific_skills_competencies.certifications,
    ];

    ScoreChart {
        title: CHART_TITLE,
        series_label: CHART_SERIES_LABEL,
        max: CHART_MAX,
        points: CHART_LABELS
            .iter()
            .zip(values)
            .map(|(label, value)| ChartPoint { label: *label, value })
            .collect(),
    }
}

pub fn build_table(result: &AnalysisResult) -> BreakdownTable {
    let s = &result.scores;
    let row = |label: &'static str, weight: u8, score: f64| BreakdownRow { label, weight, score };

    BreakdownTable {
        sections: vec![
            BreakdownSection {
                category: Category::GeneralQualifications,
                rows: vec![
                    row("Education", 10, s.general_qualifications.education),
                    row("Years of Experience", 10, s.general_qualifications.years_of_experience),
                ],
                total: s.general_qualifications.total,
            },
            BreakdownSection {
                category: Category::AdequacyForAssignment,
                rows: vec![
                    row("Relevant Project Experience", 25, s.adequacy_for_assignment.relevant_project_experience),
                    row("Donor Experience", 15, s.adequacy_for_assignment.donor_experience),
                    row("Regional Experience", 10, s.adequacy_for_assignment.regional_experience),
                ],
                total: s.adequacy_for_assignment.total,
            },
            BreakdownSection {
                category: Category::SpecificSkills,
                rows: vec![
                    row("Technical Skills", 15, s.specific_skills_competencies.technical_skills),
                    row("Language Proficiency", 10, s.specific_skills_competencies.language_proficiency),
                    row("Certifications", 5, s.specific_skills_competencies.certifications),
                ],
                total: s.specific_skills_competencies.total,
            },
        ],
        total_score: s.total_score,
        recommendation: result.recommendation.clone(),
    }
}
