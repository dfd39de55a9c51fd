//! Output formatters for analysis results

use crate::config::OutputFormat;
use crate::error::{CvAnalyzerError, Result};
use crate::model::{format_score, AnalysisResult};
use crate::output::report::*;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

const BAR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 32;

/// Trait for formatting analysis results
pub trait OutputFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String>;
}

/// Console formatter with colors, a bar chart and the breakdown table
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter, emits the result as received
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    detailed: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
    detailed: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Analysis Results for {{ candidate_name }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            color: #1f2937;
            max-width: 1100px;
            margin: 0 auto;
            padding: 20px;
            background: #f9fafb;
        }
        .container {
            background: white;
            padding: 40px;
            border-radius: 12px;
            border: 1px solid #e5e7eb;
        }
        h1 { text-align: center; }
        .chart { background: #f9fafb; padding: 24px; border-radius: 8px; }
        .bar-row { display: flex; align-items: center; margin: 8px 0; }
        .bar-label { width: 200px; font-weight: bold; color: #4b5563; }
        .bar-track { flex: 1; background: rgba(0, 0, 0, 0.06); height: 18px; border-radius: 4px; }
        .bar { background: rgba(59, 130, 246, 0.6); border: 1px solid rgba(59, 130, 246, 1); height: 16px; border-radius: 4px; }
        .bar-value { width: 60px; text-align: right; color: #6b7280; }
        table { width: 100%; border-collapse: collapse; margin: 24px 0; }
        th { text-align: left; font-size: 0.75em; text-transform: uppercase; color: #6b7280; padding: 12px; }
        td { padding: 12px; border-top: 1px solid #e5e7eb; }
        .category { font-weight: bold; }
        .category-0 { background: #eff6ff; color: #1e3a8a; }
        .category-1 { background: #f0fdf4; color: #14532d; }
        .category-2 { background: #faf5ff; color: #581c87; }
        .total-row td { font-weight: bold; }
        .grand-total { background: #f3f4f6; font-weight: bold; }
        .recommendation { background: #fefce8; color: #854d0e; }
        .summary { background: #f9fafb; padding: 24px; border-radius: 8px; }
        .strengths h4 { color: #16a34a; }
        .weaknesses h4 { color: #dc2626; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h1>Analysis Results for {{ candidate_name }}</h1>

        <div class="chart">
            <h2>{{ chart_title }}</h2>
            {% for point in chart_points %}
            <div class="bar-row">
                <span class="bar-label">{{ point.label }}</span>
                <div class="bar-track"><div class="bar" style="width: {{ point.width }}%"></div></div>
                <span class="bar-value">{{ point.value }}%</span>
            </div>
            {% endfor %}
        </div>

        <table>
            <thead>
                <tr><th>Category</th><th>Subcategory</th><th>Score</th></tr>
            </thead>
            <tbody>
                {% for section in sections %}
                <tr class="category category-{{ loop.index0 }}"><td colspan="3">{{ section.title }} ({{ section.weight }}%)</td></tr>
                {% for row in section.rows %}
                <tr><td></td><td>{{ row.label }} ({{ row.weight }}%)</td><td>{{ row.score }}%</td></tr>
                {% endfor %}
                <tr class="total-row"><td></td><td>Total</td><td>{{ section.total }}%</td></tr>
                {% endfor %}
                <tr class="grand-total"><td colspan="2">Total Score (100%)</td><td>{{ total_score }}%</td></tr>
                <tr class="recommendation"><td colspan="3"><strong>Recommendation:</strong> {{ recommendation }}</td></tr>
            </tbody>
        </table>

        <div class="summary">
            <h3>Analysis Summary</h3>
            <div class="strengths">
                <h4>Key Strengths</h4>
                <p>{{ key_strengths }}</p>
            </div>
            <div class="weaknesses">
                <h4>Key Weaknesses</h4>
                <p>{{ key_weaknesses }}</p>
            </div>
        </div>

        {% if has_evaluations %}
        <div class="summary">
            <h3>Detailed Evaluation</h3>
            {% for entry in evaluations %}
            <h4>{{ entry.criterion }} (weight {{ entry.weight }}%, score {{ entry.score }}%)</h4>
            <p>{{ entry.justification }}</p>
            {% endfor %}
        </div>
        {% endif %}
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    candidate_name: String,
    chart_title: String,
    chart_points: Vec<HtmlChartPoint>,
    sections: Vec<HtmlSection>,
    total_score: String,
    recommendation: String,
    key_strengths: String,
    key_weaknesses: String,
    has_evaluations: bool,
    evaluations: Vec<HtmlEvaluation>,
}

struct HtmlChartPoint {
    label: String,
    value: String,
    width: String,
}

struct HtmlSection {
    title: String,
    weight: u8,
    rows: Vec<HtmlRow>,
    total: String,
}

struct HtmlRow {
    label: String,
    weight: u8,
    score: String,
}

struct HtmlEvaluation {
    criterion: String,
    weight: String,
    score: String,
    justification: String,
}

fn category_color(category: Category) -> Color {
    match category {
        Category::GeneralQualifications => Color::Blue,
        Category::AdequacyForAssignment => Color::Green,
        Category::SpecificSkills => Color::Magenta,
    }
}

/// Width of a bar for `value` on a 0..=max scale, clamped to the track.
fn bar_cells(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    let ratio = (value / max).clamp(0.0, 1.0);
    (ratio * width as f64).round() as usize
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_chart(&self, chart: &ScoreChart) -> String {
        let mut output = self.format_header(chart.title, 2);
        output.push_str(&format!("{}\n", self.colorize(chart.series_label, Color::BrightBlack)));

        for point in &chart.points {
            let filled = bar_cells(point.value, chart.max, BAR_WIDTH);
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
            output.push_str(&format!(
                "  {:<width$} {} {:>4}%\n",
                point.label,
                self.colorize(&bar, Color::Blue),
                format_score(point.value),
                width = LABEL_WIDTH - 2,
            ));
        }

        output.push_str(&format!(
            "  {:<width$} 0%{}{}%\n",
            "Score (%)",
            " ".repeat(BAR_WIDTH - 3),
            format_score(chart.max),
            width = LABEL_WIDTH - 2,
        ));
        output
    }

    fn format_table(&self, table: &BreakdownTable) -> String {
        let mut output = self.format_header("Score Breakdown", 2);
        output.push_str(&format!("{:<width$} {:>6}\n", "CATEGORY / SUBCATEGORY", "SCORE", width = LABEL_WIDTH + 4));

        for section in &table.sections {
            let color = category_color(section.category);
            let heading = format!("{} ({}%)", section.category.title(), section.category.weight());
            output.push_str(&format!("{}\n", self.colorize(&heading, color)));

            for row in &section.rows {
                let label = format!("{} ({}%)", row.label, row.weight);
                output.push_str(&format!(
                    "    {:<width$} {:>6}\n",
                    label,
                    format!("{}%", format_score(row.score)),
                    width = LABEL_WIDTH,
                ));
            }
            output.push_str(&format!(
                "    {:<width$} {}\n",
                "Total",
                self.colorize(&format!("{:>6}", format!("{}%", format_score(section.total))), color),
                width = LABEL_WIDTH,
            ));
        }

        output.push_str(&format!(
            "{:<width$} {:>6}\n",
            "Total Score (100%)",
            format!("{}%", format_score(table.total_score)),
            width = LABEL_WIDTH + 4,
        ));
        output.push_str(&format!(
            "{} {}\n",
            self.colorize("Recommendation:", Color::Yellow),
            table.recommendation
        ));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        let rendered = RenderedResult::from_result(result);
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("Analysis Results for {}", rendered.candidate_name), 1));
        output.push_str(&self.format_chart(&rendered.chart));
        output.push_str(&self.format_table(&rendered.table));

        output.push_str(&self.format_header("Analysis Summary", 2));
        output.push_str(&format!("{}\n", self.colorize("Key Strengths", Color::Green)));
        output.push_str(&format!("  {}\n", rendered.summary.key_strengths));
        output.push_str(&format!("{}\n", self.colorize("Key Weaknesses", Color::Red)));
        output.push_str(&format!("  {}\n", rendered.summary.key_weaknesses));

        if self.detailed && !rendered.detailed_evaluation.is_empty() {
            output.push_str(&self.format_header("Detailed Evaluation", 3));
            for (i, entry) in rendered.detailed_evaluation.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {} (weight: {}%, score: {}%)\n",
                    i + 1,
                    self.colorize(&entry.criterion, Color::Cyan),
                    format_score(entry.weight),
                    format_score(entry.score)
                ));
                output.push_str(&format!("   {}\n", entry.justification));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(result)?)
        } else {
            Ok(serde_json::to_string(result)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        let rendered = RenderedResult::from_result(result);
        let mut output = String::new();

        output.push_str(&format!("# Analysis Results for {}\n\n", rendered.candidate_name));

        output.push_str(&format!("## {}\n\n", rendered.chart.title));
        output.push_str("| Criterion | Score |\n");
        output.push_str("|-----------|-------|\n");
        for point in &rendered.chart.points {
            output.push_str(&format!("| {} | {}% |\n", point.label, format_score(point.value)));
        }
        output.push('\n');

        output.push_str("## Score Breakdown\n\n");
        output.push_str("| Category | Subcategory | Score |\n");
        output.push_str("|----------|-------------|-------|\n");
        for section in &rendered.table.sections {
            output.push_str(&format!(
                "| **{} ({}%)** | | |\n",
                section.category.title(),
                section.category.weight()
            ));
            for row in &section.rows {
                output.push_str(&format!("| | {} ({}%) | {}% |\n", row.label, row.weight, format_score(row.score)));
            }
            output.push_str(&format!("| | **Total** | **{}%** |\n", format_score(section.total)));
        }
        output.push_str(&format!(
            "| **Total Score (100%)** | | **{}%** |\n",
            format_score(rendered.table.total_score)
        ));
        output.push_str(&format!(
            "| **Recommendation:** {} | | |\n\n",
            Self::escape_cell(&rendered.table.recommendation)
        ));

        output.push_str("## Analysis Summary\n\n");
        output.push_str(&format!("### Key Strengths\n\n{}\n\n", rendered.summary.key_strengths));
        output.push_str(&format!("### Key Weaknesses\n\n{}\n\n", rendered.summary.key_weaknesses));

        if self.detailed && !rendered.detailed_evaluation.is_empty() {
            output.push_str("## Detailed Evaluation\n\n");
            for entry in &rendered.detailed_evaluation {
                output.push_str(&format!(
                    "- **{}** (weight {}%, score {}%): {}\n",
                    entry.criterion,
                    format_score(entry.weight),
                    format_score(entry.score),
                    entry.justification
                ));
            }
            output.push('\n');
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool, detailed: bool) -> Self {
        Self { include_styles, detailed }
    }

    fn create_template_data(&self, rendered: &RenderedResult) -> HtmlTemplate {
        let chart_points = rendered
            .chart
            .points
            .iter()
            .map(|point| HtmlChartPoint {
                label: point.label.to_string(),
                value: format_score(point.value),
                width: format_score((point.value / rendered.chart.max * 100.0).clamp(0.0, 100.0)),
            })
            .collect();

        let sections = rendered
            .table
            .sections
            .iter()
            .map(|section| HtmlSection {
                title: section.category.title().to_string(),
                weight: section.category.weight(),
                rows: section
                    .rows
                    .iter()
                    .map(|row| HtmlRow {
                        label: row.label.to_string(),
                        weight: row.weight,
                        score: format_score(row.score),
                    })
                    .collect(),
                total: format_score(section.total),
            })
            .collect();

        let evaluations: Vec<HtmlEvaluation> = if self.detailed {
            rendered
                .detailed_evaluation
                .iter()
                .map(|entry| HtmlEvaluation {
                    criterion: entry.criterion.clone(),
                    weight: format_score(entry.weight),
                    score: format_score(entry.score),
                    justification: entry.justification.clone(),
                })
                .collect()
        } else {
            Vec::new()
        };

        HtmlTemplate {
            include_styles: self.include_styles,
            candidate_name: rendered.candidate_name.clone(),
            chart_title: rendered.chart.title.to_string(),
            chart_points,
            sections,
            total_score: format_score(rendered.table.total_score),
            recommendation: rendered.table.recommendation.clone(),
            key_strengths: rendered.summary.key_strengths.clone(),
            key_weaknesses: rendered.summary.key_weaknesses.clone(),
            has_evaluations: !evaluations.is_empty(),
            evaluations,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        let rendered = RenderedResult::from_result(result);
        self.create_template_data(&rendered)
            .render()
            .map_err(|e| CvAnalyzerError::OutputFormatting(e.to_string()))
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(detailed),
            html_formatter: HtmlFormatter::new(true, detailed),
        }
    }

    pub fn generate_report(&self, result: &AnalysisResult, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_result(result),
            OutputFormat::Json => self.json_formatter.format_result(result),
            OutputFormat::Markdown => self.markdown_formatter.format_result(result),
            OutputFormat::Html => self.html_formatter.format_result(result),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, candidate_name: &str, timestamp: bool) -> String {
    let slug: String = candidate_name
        .split_whitespace()
        .map(|part| {
            part.chars()
                .filter(|c| c.is_alphanumeric() || *c == '-')
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    let base_name = if slug.is_empty() { "candidate".to_string() } else { slug };

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_analysis{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_analysis{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_analysis{}.md", base_name, timestamp_suffix),
        OutputFormat::Html => format!("{}_analysis{}.html", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_result;

    fn total_score_line(output: &str) -> &str {
        output
            .lines()
            .find(|line| line.contains("Total Score (100%)"))
            .expect("total score row")
    }

    #[test]
    fn test_console_total_and_recommendation() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_result(&sample_result()).unwrap();

        assert!(total_score_line(&output).contains("73"));
        assert!(output.contains("Recommended with reservations"));
        assert!(output.contains("Analysis Results for Jane Mwangi"));
        assert!(output.contains("General Qualifications (20%)"));
        assert!(output.contains("Adequacy for Assignment (50%)"));
        assert!(output.contains("Specific Skills & Competencies (30%)"));
        assert!(output.contains("Relevant Project Experience (25%)"));
        assert!(output.contains("Certifications (5%)"));
        assert!(output.contains("Long field presence in East Africa."));
        assert!(output.contains("No formal M&E certification."));
        assert!(!output.contains("Detailed Evaluation"));
    }

    #[test]
    fn test_console_chart_keeps_label_order() {
        let mut result = sample_result();
        result.scores.general_qualifications.education = 1.0;
        result.scores.specific_skills_competencies.certifications = 100.0;

        let output = ConsoleFormatter::new(false, false).format_result(&result).unwrap();
        let positions: Vec<usize> = CHART_LABELS
            .iter()
            .map(|label| output.find(&format!("  {:<30}", label)).expect("chart label"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_console_detailed_evaluation() {
        let output = ConsoleFormatter::new(false, true).format_result(&sample_result()).unwrap();
        assert!(output.contains("Detailed Evaluation"));
        assert!(output.contains("1. Education (weight: 10%, score: 80%)"));
        assert!(output.contains("MSc in Development Economics."));
    }

    #[test]
    fn test_fractional_scores_render_as_sent() {
        let mut result = sample_result();
        result.scores.total_score = 66.666;
        result.scores.adequacy_for_assignment.total = 72.005;

        let console = ConsoleFormatter::new(false, false).format_result(&result).unwrap();
        assert!(total_score_line(&console).contains("66.666%"));
        assert!(console.contains("72.005%"));

        let markdown = MarkdownFormatter::new(false).format_result(&result).unwrap();
        assert!(markdown.contains("| **Total Score (100%)** | | **66.666%** |"));
        assert!(markdown.contains("| | **Total** | **72.005%** |"));
    }

    #[test]
    fn test_bar_cells() {
        assert_eq!(bar_cells(0.0, 100.0, 40), 0);
        assert_eq!(bar_cells(50.0, 100.0, 40), 20);
        assert_eq!(bar_cells(100.0, 100.0, 40), 40);
        assert_eq!(bar_cells(250.0, 100.0, 40), 40);
        assert_eq!(bar_cells(f64::NAN, 100.0, 40), 0);
    }

    #[test]
    fn test_json_is_verbatim_result() {
        let output = JsonFormatter::new(false).format_result(&sample_result()).unwrap();
        let parsed: AnalysisResult = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, sample_result());
    }

    #[test]
    fn test_markdown_table() {
        let output = MarkdownFormatter::new(false).format_result(&sample_result()).unwrap();
        assert!(output.contains("| **Total Score (100%)** | | **73%** |"));
        assert!(output.contains("| | Donor Experience (15%) | 65% |"));
        assert!(output.contains("Recommended with reservations"));
    }

    #[test]
    fn test_html_escapes_and_renders() {
        let mut result = sample_result();
        result.candidate_name = "<script>alert(1)</script>".to_string();

        let output = HtmlFormatter::new(false, true).format_result(&result).unwrap();
        assert!(!output.contains("<script>alert(1)</script>"));
        assert!(output.contains("Total Score (100%)</td><td>73%"));
        assert!(output.contains("Recommended with reservations"));
        assert!(output.contains("style=\"width: 72%\""));
        assert!(output.contains("Detailed Evaluation"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Html, "Jane  Mwangi", false),
            "jane_mwangi_analysis.html"
        );
        assert_eq!(suggest_filename(&OutputFormat::Json, "", false), "candidate_analysis.json");
    }

    #[test]
    fn test_generator_dispatches_by_format() {
        let generator = ReportGenerator::with_options(false, false);
        let result = sample_result();

        let json = generator.generate_report(&result, &OutputFormat::Json).unwrap();
        assert!(json.trim_start().starts_with('{'));

        let markdown = generator.generate_report(&result, &OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# Analysis Results for Jane Mwangi"));
    }
}
