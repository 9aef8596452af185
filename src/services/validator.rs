use serde::{Deserialize, Serialize};

use crate::model::listing::{Listing, TargetLanguage, TranslatedListing};
use crate::services::text_metrics;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QualityIssue {
    pub severity: Severity,
    pub category: String,
    pub message: String,
    pub field: String,

    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QualityReport {
    pub issues: Vec<QualityIssue>,
    pub score: u8,
    pub grade: String,
    pub summary: String,
}

/// Avaliação determinística do par (original, tradução).
/// Nunca falha: achados viram issues no relatório, não erros.
pub fn evaluate(source: &Listing, translated: &TranslatedListing) -> QualityReport {
    let mut issues: Vec<QualityIssue> = Vec::new();

    check_title(translated, &mut issues);
    check_length_ratio(source, translated, &mut issues);
    check_numbers(source, translated, &mut issues);
    check_residue(translated, &mut issues);
    check_options(source, translated, &mut issues);

    let score = compute_score(&issues);

    QualityReport {
        score,
        grade: grade_for(score).to_string(),
        summary: summary_for(&issues).to_string(),
        issues,
    }
}

fn title_ceiling(lang: TargetLanguage) -> usize {
    match lang {
        TargetLanguage::English => 200,
        TargetLanguage::Japanese => 100,
    }
}

fn ratio_bounds(lang: TargetLanguage) -> (f64, f64) {
    match lang {
        TargetLanguage::English => (0.8, 2.5),
        TargetLanguage::Japanese => (0.5, 1.8),
    }
}

fn check_title(translated: &TranslatedListing, issues: &mut Vec<QualityIssue>) {
    // Comprimento em chars, não em bytes (hangul/CJK contam 1 cada).
    let len = translated.title.chars().count();

    if len < 10 {
        issues.push(QualityIssue {
            severity: Severity::Warning,
            category: "TITLE_TOO_SHORT".to_string(),
            message: "title too short".to_string(),
            field: "title".to_string(),
            hint: Some("use a more descriptive title".to_string()),
        });
    } else if len > title_ceiling(translated.target_language) {
        issues.push(QualityIssue {
            severity: Severity::Info,
            category: "TITLE_TOO_LONG".to_string(),
            message: "title exceeds recommended length, may be truncated by downstream marketplaces"
                .to_string(),
            field: "title".to_string(),
            hint: None,
        });
    }
}

fn check_length_ratio(
    source: &Listing,
    translated: &TranslatedListing,
    issues: &mut Vec<QualityIssue>,
) {
    let source_len = source.description.chars().count();
    let translated_len = translated.description.chars().count();

    // Sem base de comparação não há o que medir.
    if source_len == 0 || translated_len == 0 {
        return;
    }

    let ratio = translated_len as f64 / source_len as f64;
    let (low, high) = ratio_bounds(translated.target_language);

    if ratio < low {
        issues.push(QualityIssue {
            severity: Severity::Warning,
            category: "LENGTH_RATIO".to_string(),
            message: "translation shorter than expected, possible missing content".to_string(),
            field: "description".to_string(),
            hint: None,
        });
    } else if ratio > high {
        issues.push(QualityIssue {
            severity: Severity::Warning,
            category: "LENGTH_RATIO".to_string(),
            message: "translation longer than expected, possible inserted content".to_string(),
            field: "description".to_string(),
            hint: None,
        });
    }
}

fn check_numbers(
    source: &Listing,
    translated: &TranslatedListing,
    issues: &mut Vec<QualityIssue>,
) {
    let source_tokens = text_metrics::digit_tokens(&source.description);
    if source_tokens.is_empty() {
        return;
    }

    let translated_tokens = text_metrics::digit_tokens(&translated.description);
    let translated_values: Vec<f64> = translated_tokens
        .iter()
        .filter_map(|t| text_metrics::numeric_value(t))
        .collect();

    let mut missing: Vec<String> = Vec::new();

    for token in &source_tokens {
        if translated_tokens.iter().any(|t| t == token) {
            continue;
        }

        // Match por valor cobre formatos diferentes ("45000" vs "45000.0").
        let value_match = text_metrics::numeric_value(token)
            .map(|v| translated_values.iter().any(|&t| (t - v).abs() < f64::EPSILON))
            .unwrap_or(false);

        if !value_match && !missing.contains(token) {
            missing.push(token.clone());
        }
    }

    if missing.is_empty() {
        return;
    }

    // Um único error para todos os números ausentes, listando até três.
    let shown: Vec<&str> = missing.iter().take(3).map(|s| s.as_str()).collect();

    issues.push(QualityIssue {
        severity: Severity::Error,
        category: "MISSING_NUMBERS".to_string(),
        message: "numeric information may be missing, check size/quantity/price".to_string(),
        field: "description".to_string(),
        hint: Some(format!("missing from translation: {}", shown.join(", "))),
    });
}

fn check_residue(translated: &TranslatedListing, issues: &mut Vec<QualityIssue>) {
    const RESIDUE_LIMIT: usize = 5;

    if text_metrics::hangul_count(&translated.description) > RESIDUE_LIMIT {
        issues.push(QualityIssue {
            severity: Severity::Error,
            category: "UNTRANSLATED_TEXT".to_string(),
            message: "untranslated source-language text remains".to_string(),
            field: "description".to_string(),
            hint: None,
        });
    }
}

fn check_options(
    source: &Listing,
    translated: &TranslatedListing,
    issues: &mut Vec<QualityIssue>,
) {
    if source.options.len() != translated.options.len() {
        issues.push(QualityIssue {
            severity: Severity::Warning,
            category: "OPTION_COUNT_MISMATCH".to_string(),
            message: "option count differs from source".to_string(),
            field: "options".to_string(),
            hint: None,
        });
        return;
    }

    for (source_group, translated_group) in source.options.iter().zip(translated.options.iter()) {
        if source_group.values.len() != translated_group.values.len() {
            issues.push(QualityIssue {
                severity: Severity::Warning,
                category: "OPTION_VALUES_MISMATCH".to_string(),
                message: format!(
                    "option \"{}\" has a different number of values",
                    source_group.name
                ),
                field: "options".to_string(),
                hint: None,
            });
            // A primeira divergência basta; não inunda o relatório.
            break;
        }
    }
}

fn compute_score(issues: &[QualityIssue]) -> u8 {
    let mut score: i32 = 100;

    for issue in issues {
        score -= match issue.severity {
            Severity::Error => 20,
            Severity::Warning => 10,
            Severity::Info => 5,
        };
    }

    score.clamp(0, 100) as u8
}

fn grade_for(score: u8) -> &'static str {
    match score {
        90..=100 => "A",
        80..=89 => "B",
        70..=79 => "C",
        60..=69 => "D",
        _ => "F",
    }
}

fn summary_for(issues: &[QualityIssue]) -> &'static str {
    if issues.is_empty() {
        return "quality is excellent";
    }

    if issues.iter().any(|i| i.severity == Severity::Error) {
        return "issues require review";
    }

    if issues.iter().any(|i| i.severity == Severity::Warning) {
        return "minor improvements suggested";
    }

    "generally acceptable"
}
