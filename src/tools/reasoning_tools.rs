//! Self-review tools: analyze_reasoning and review_decision
//!
//! Both are pure text generators. They give the model a structured mirror of
//! its own plan, scored with simple length and count heuristics.

use crate::tools::{parse_args, ToolError};
use chrono::Local;
use serde::Deserialize;

/// Registry name of the reasoning analysis tool
pub const ANALYZE_NAME: &str = "analyze_reasoning";

/// Description of the reasoning analysis tool
pub const ANALYZE_DESCRIPTION: &str = r#"Analyzes and validates your own reasoning process. Use it to check that an approach is well founded. Requires JSON with "problem", "approach" and "confidence" (1-10). Example: {"problem": "I need to implement X", "approach": "I will use Y because Z", "confidence": 7}"#;

/// Registry name of the decision review tool
pub const REVIEW_NAME: &str = "review_decision";

/// Description of the decision review tool
pub const REVIEW_DESCRIPTION: &str = r#"Critically reviews a decision by looking at the factors and alternatives considered. Use it to validate important decisions. Requires JSON with "decision", "factors" (array) and "alternatives" (array). Example: {"decision": "I will use X", "factors": ["performance", "cost"], "alternatives": ["use Y", "keep Z"]}"#;

const MAX_DECISION_SCORE: usize = 7;

#[derive(Debug, Deserialize)]
struct AnalyzeParams {
    #[serde(default)]
    problem: String,
    #[serde(default)]
    approach: String,
    #[serde(default)]
    confidence: i64,
}

#[derive(Debug, Deserialize)]
struct ReviewParams {
    #[serde(default)]
    decision: String,
    #[serde(default)]
    factors: Vec<String>,
    #[serde(default)]
    alternatives: Vec<String>,
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Indent non-blank lines by two spaces, or flag a missing field
fn indent_block(text: &str) -> String {
    if text.trim().is_empty() {
        return "  (not provided)".to_string();
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn numbered(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return format!("  {}", empty);
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("  {}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn yes_no(condition: bool) -> &'static str {
    if condition {
        "yes"
    } else {
        "no"
    }
}

fn confidence_label(confidence: i64) -> &'static str {
    match confidence {
        c if c >= 9 => "very high",
        c if c >= 7 => "high",
        c if c >= 5 => "medium",
        c if c >= 3 => "low",
        _ => "very low",
    }
}

/// Structured self-review of a problem statement and approach
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyzeReasoningTool;

impl AnalyzeReasoningTool {
    /// Create the tool
    pub fn new() -> Self {
        Self
    }

    /// Produce the analysis report
    pub fn execute(&self, raw_args: &str) -> Result<String, ToolError> {
        let params: AnalyzeParams = parse_args(raw_args)?;
        if params.problem.is_empty() {
            return Err(ToolError::InvalidArguments(
                "'problem' is required".to_string(),
            ));
        }

        Ok(format!(
            "REASONING ANALYSIS\nTimestamp: {}\n\nPROBLEM:\n{}\n\nAPPROACH:\n{}\n\n\
             CONFIDENCE: {}/10 ({})\n\nCHECKS:\n\
             - Problem clearly defined: {}\n\
             - Approach structured: {}\n\
             - Confidence adequate: {}\n\nRECOMMENDATIONS:\n{}",
            timestamp(),
            indent_block(&params.problem),
            indent_block(&params.approach),
            params.confidence,
            confidence_label(params.confidence),
            yes_no(params.problem.len() > 10),
            yes_no(params.approach.len() > 20),
            yes_no(params.confidence >= 6),
            analysis_recommendations(&params),
        ))
    }
}

fn analysis_recommendations(params: &AnalyzeParams) -> String {
    let mut recommendations = Vec::new();
    if params.problem.len() < 10 {
        recommendations.push("- Describe the problem in more detail");
    }
    if params.approach.len() < 20 {
        recommendations.push("- Elaborate on the proposed approach");
    }
    if params.confidence < 6 {
        recommendations.push("- Gather more information before proceeding");
    }
    if params.confidence > 9 {
        recommendations.push("- Check for overconfidence and consider how this could fail");
    }
    if recommendations.is_empty() {
        recommendations.push("- The analysis is well structured; proceed with confidence");
    }
    recommendations.join("\n")
}

/// Critical review of a decision, its factors and its alternatives
#[derive(Debug, Default, Clone, Copy)]
pub struct ReviewDecisionTool;

impl ReviewDecisionTool {
    /// Create the tool
    pub fn new() -> Self {
        Self
    }

    /// Produce the review report
    pub fn execute(&self, raw_args: &str) -> Result<String, ToolError> {
        let params: ReviewParams = parse_args(raw_args)?;
        if params.decision.is_empty() {
            return Err(ToolError::InvalidArguments(
                "'decision' is required".to_string(),
            ));
        }

        Ok(format!(
            "DECISION REVIEW\nTimestamp: {}\n\nDECISION:\n{}\n\nFACTORS CONSIDERED:\n{}\n\n\
             ALTERNATIVES EVALUATED:\n{}\n\nCRITICAL ANALYSIS:\n\
             - Completeness of factors: {}\n\
             - Consideration of alternatives: {}\n\
             - Clarity of the decision: {}\n\nOVERALL SCORE: {}",
            timestamp(),
            indent_block(&params.decision),
            numbered(&params.factors, "no factors given"),
            numbered(&params.alternatives, "no alternatives considered"),
            completeness_verdict(params.factors.len()),
            alternatives_verdict(params.alternatives.len()),
            clarity_verdict(params.decision.len()),
            overall_score(&params),
        ))
    }
}

fn completeness_verdict(count: usize) -> &'static str {
    match count {
        0 => "insufficient (0 factors)",
        1 => "limited (1 factor)",
        2 => "reasonable (2 factors)",
        _ => "good (3+ factors)",
    }
}

fn alternatives_verdict(count: usize) -> &'static str {
    match count {
        0 => "insufficient (0 alternatives)",
        1 => "limited (1 alternative)",
        _ => "good (2+ alternatives)",
    }
}

fn clarity_verdict(length: usize) -> &'static str {
    if length >= 50 {
        "clear and detailed"
    } else if length >= 20 {
        "reasonably clear"
    } else {
        "too vague"
    }
}

fn decision_score(params: &ReviewParams) -> usize {
    let factors = params.factors.len().min(3);
    let alternatives = params.alternatives.len().min(2);
    let clarity = match params.decision.len() {
        n if n >= 50 => 2,
        n if n >= 20 => 1,
        _ => 0,
    };
    factors + alternatives + clarity
}

fn overall_score(params: &ReviewParams) -> String {
    let score = decision_score(params);
    let percentage = score * 100 / MAX_DECISION_SCORE;
    let label = match percentage {
        p if p >= 85 => "excellent",
        p if p >= 70 => "good",
        p if p >= 50 => "reasonable",
        _ => "needs improvement",
    };
    format!(
        "{} ({}/{} - {}%)",
        label, score, MAX_DECISION_SCORE, percentage
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_requires_problem() {
        let err = AnalyzeReasoningTool::new()
            .execute(r#"{"approach": "x"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid arguments: 'problem' is required");
    }

    #[test]
    fn test_analyze_well_formed_input() {
        let out = AnalyzeReasoningTool::new()
            .execute(
                r#"{"problem": "Parse a config file safely", "approach": "Use serde with strict field checks", "confidence": 8}"#,
            )
            .unwrap();
        assert!(out.contains("CONFIDENCE: 8/10 (high)"));
        assert!(out.contains("- Problem clearly defined: yes"));
        assert!(out.contains("proceed with confidence"));
    }

    #[test]
    fn test_analyze_weak_input_gets_recommendations() {
        let out = AnalyzeReasoningTool::new()
            .execute(r#"{"problem": "bug", "confidence": 2}"#)
            .unwrap();
        assert!(out.contains("(very low)"));
        assert!(out.contains("Describe the problem in more detail"));
        assert!(out.contains("Elaborate on the proposed approach"));
        assert!(out.contains("Gather more information"));
        assert!(out.contains("(not provided)"));
    }

    #[test]
    fn test_analyze_flags_overconfidence() {
        let out = AnalyzeReasoningTool::new()
            .execute(r#"{"problem": "Rename a variable everywhere", "approach": "Search and replace across the tree", "confidence": 10}"#)
            .unwrap();
        assert!(out.contains("overconfidence"));
    }

    #[test]
    fn test_review_requires_decision() {
        let err = ReviewDecisionTool::new().execute("{}").unwrap_err();
        assert!(err.to_string().contains("'decision' is required"));
    }

    #[test]
    fn test_review_full_score() {
        let out = ReviewDecisionTool::new()
            .execute(
                r#"{"decision": "Adopt an embedded key-value store for the local cache layer", "factors": ["latency", "ops cost", "footprint"], "alternatives": ["sqlite", "flat files"]}"#,
            )
            .unwrap();
        assert!(out.contains("OVERALL SCORE: excellent (7/7 - 100%)"));
        assert!(out.contains("  1. latency"));
        assert!(out.contains("good (2+ alternatives)"));
    }

    #[test]
    fn test_review_minimal_score() {
        let out = ReviewDecisionTool::new()
            .execute(r#"{"decision": "use X"}"#)
            .unwrap();
        assert!(out.contains("needs improvement (0/7 - 0%)"));
        assert!(out.contains("no factors given"));
        assert!(out.contains("too vague"));
    }

    #[test]
    fn test_review_partial_score() {
        let params = ReviewParams {
            decision: "Use the existing HTTP client".to_string(),
            factors: vec!["reuse".to_string(), "size".to_string()],
            alternatives: vec!["new client".to_string()],
        };
        assert_eq!(decision_score(&params), 4);
        assert!(overall_score(&params).starts_with("reasonable"));
    }
}
