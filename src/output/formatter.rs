use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::chart::ChartPoint;
use crate::scoring::{FactorName, ScoreSummary, Scorecard, MAX_POSSIBLE_SCORE};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Traffic-light band for a score on the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Mid,
    Low,
}

impl ScoreBand {
    /// >= 70% of max is high, >= 40% is mid, anything below is low.
    pub fn for_score(score: f64) -> Self {
        let ratio = score / MAX_POSSIBLE_SCORE;
        if ratio >= 0.7 {
            ScoreBand::High
        } else if ratio >= 0.4 {
            ScoreBand::Mid
        } else {
            ScoreBand::Low
        }
    }
}

fn paint(text: &str, score: f64, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match ScoreBand::for_score(score) {
        ScoreBand::High => text.green().to_string(),
        ScoreBand::Mid => text.yellow().to_string(),
        ScoreBand::Low => text.red().to_string(),
    }
}

/// Format the per-factor table followed by the totals.
///
/// ```text
/// Factor    Avg   Weight
/// Team      5.00  0.50
/// ...
/// Total Score: 3.50 / 5.00 (70.00%)
/// Overall Rating: 4 - Good
/// ```
pub fn format_summary(summary: &ScoreSummary, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let header = format!("{:<9} {:>5}  {:>6}", "Factor", "Avg", "Weight");
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    for fs in &summary.factors {
        let score = paint(&format!("{:>5.2}", fs.score), fs.score, use_colors);
        lines.push(format!("{:<9} {}  {:>6.2}", fs.name.label(), score, fs.weight));
    }

    lines.push(String::new());
    let total = format!(
        "{:.2} / {:.2}",
        summary.overall,
        summary.max_possible()
    );
    lines.push(format!(
        "Total Score: {} ({:.2}%)",
        paint(&total, summary.overall, use_colors),
        summary.percentage()
    ));
    lines.push(format!(
        "Overall Rating: {} - {}",
        summary.overall_rating(),
        summary.overall_description()
    ));

    lines.join("\n")
}

/// Format every subfactor with its rating and comment (for verbose mode)
pub fn format_scorecard_detail(card: &Scorecard, use_colors: bool) -> String {
    let mut lines = Vec::new();
    for factor in card.factors() {
        let heading = format!("{} (weight {:.2})", factor.name.label(), factor.weight);
        lines.push(if use_colors {
            heading.bold().to_string()
        } else {
            heading
        });
        for sub in &factor.subfactors {
            let rating = sub.effective_rating();
            let marker = if sub.rating.is_none() { " (default)" } else { "" };
            lines.push(format!(
                "  {:<14} {} - {}{}",
                sub.name.label(),
                rating,
                rating.description(),
                marker
            ));
            if !sub.comment.is_empty() {
                let comment = if use_colors {
                    sub.comment.dimmed().to_string()
                } else {
                    sub.comment.clone()
                };
                lines.push(format!("    {}", comment));
            }
        }
    }
    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Width of a bar column given the terminal width.
fn bar_width(term_width: Option<usize>) -> usize {
    // label (9) + value (6) + separators (4)
    const FIXED: usize = 19;
    match term_width {
        Some(w) if w > FIXED + 10 => (w - FIXED).min(50),
        Some(_) => 10,
        None => 40,
    }
}

/// Render a 0-5 series as horizontal bars, one line per axis.
pub fn format_bars(title: &str, series: &[ChartPoint], use_colors: bool) -> String {
    let width = bar_width(get_terminal_width());
    let mut lines = vec![title.to_string()];
    for point in series {
        let filled = ((point.value / MAX_POSSIBLE_SCORE) * width as f64)
            .round()
            .clamp(0.0, width as f64) as usize;
        let bar = format!("{}{}", "█".repeat(filled), "·".repeat(width - filled));
        lines.push(format!(
            "  {:<8} {}  {:.2}",
            point.label,
            paint(&bar, point.value, use_colors),
            point.value
        ));
    }
    lines.join("\n")
}

/// Machine-readable summary for `--json`.
#[derive(Debug, Serialize)]
pub struct JsonSummary<'a> {
    pub factors: Vec<JsonFactor>,
    pub overall: f64,
    pub max_possible: f64,
    pub percentage: f64,
    pub overall_rating: u8,
    pub overall_description: &'a str,
}

#[derive(Debug, Serialize)]
pub struct JsonFactor {
    pub factor: FactorName,
    pub weight: f64,
    pub score: f64,
}

pub fn format_json(summary: &ScoreSummary) -> serde_json::Result<String> {
    let json = JsonSummary {
        factors: summary
            .factors
            .iter()
            .map(|f| JsonFactor {
                factor: f.name,
                weight: f.weight,
                score: f.score,
            })
            .collect(),
        overall: summary.overall,
        max_possible: summary.max_possible(),
        percentage: summary.percentage(),
        overall_rating: summary.overall_rating(),
        overall_description: summary.overall_description(),
    };
    serde_json::to_string_pretty(&json)
}
