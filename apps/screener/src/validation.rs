//! Field validators for candidate input.
//!
//! Every validator takes raw user text and returns either the normalized value or a
//! `ValidationError` carrying a human-readable reason. Malformed input is always an
//! ordinary `Err`, never a panic.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Longest accepted identity field after sanitization.
pub const MAX_FIELD_LEN: usize = 500;
/// Longest accepted assessment answer after sanitization.
pub const MAX_ANSWER_LEN: usize = 2000;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EXPERIENCE_YEARS: f64 = 50.0;
const MAX_EMAIL_LEN: usize = 254;
const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;
const MAX_TECHNOLOGY_NAME_LEN: usize = 50;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$"
    ).unwrap();

    // Digits with common separators and an optional leading plus.
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9\s().-]+$").unwrap();

    static ref NAME_REGEX: Regex = Regex::new(r"^[\p{L}][\p{L}\s.'-]*$").unwrap();

    static ref TECHNOLOGY_REGEX: Regex = Regex::new(r"^[\p{L}0-9][\p{L}0-9 .+#/_-]*$").unwrap();

    // "python: advanced", "python - advanced", "python (advanced)"
    static ref TECH_ENTRY_REGEX: Regex = Regex::new(
        r"^(?P<name>.+?)\s*(?:(?::|\s-\s)\s*(?P<level>[\p{L} -]+)|\((?P<plevel>[\p{L} -]+)\))?$"
    ).unwrap();

    static ref TECH_SEPARATOR_REGEX: Regex = Regex::new(r"[,;|\n]").unwrap();
}

/// Which piece of input failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Experience,
    Technology,
    Answer,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: String,
}

impl ValidationError {
    fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

pub type Validated<T> = Result<T, ValidationError>;

/// Self-rated proficiency for a technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "beginner" | "junior" | "basic" | "novice" => Some(SkillLevel::Beginner),
            "intermediate" | "mid" | "mid-level" | "medium" => Some(SkillLevel::Intermediate),
            "advanced" | "expert" | "senior" => Some(SkillLevel::Advanced),
            _ => None,
        }
    }

    /// Level implied by total years of professional experience.
    pub fn from_years(years: f64) -> Self {
        if years < 2.0 {
            SkillLevel::Beginner
        } else if years < 5.0 {
            SkillLevel::Intermediate
        } else {
            SkillLevel::Advanced
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

/// One "technology[: level]" entry as typed by the candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct TechnologyEntry {
    pub name: String,
    pub level: Option<SkillLevel>,
}

/// Strips characters that have no business in stored free text and caps the length.
pub fn sanitize_input(text: &str, max_len: usize) -> String {
    text.chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | ';' | '\\'))
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .take(max_len)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Rejects identity input longer than `MAX_FIELD_LEN` before any pattern runs.
fn check_field_len(field: Field, trimmed: &str) -> Validated<()> {
    if trimmed.chars().count() > MAX_FIELD_LEN {
        return Err(ValidationError::new(
            field,
            format!("Input must be at most {MAX_FIELD_LEN} characters"),
        ));
    }
    Ok(())
}

pub fn validate_name(raw: &str) -> Validated<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(Field::Name, "Name is required"));
    }
    check_field_len(Field::Name, trimmed)?;
    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::new(
            Field::Name,
            "Name must not contain control characters",
        ));
    }

    let normalized = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    let len = normalized.chars().count();
    if len < 2 {
        return Err(ValidationError::new(
            Field::Name,
            "Name must be at least 2 characters long",
        ));
    }
    if len > MAX_NAME_LEN {
        return Err(ValidationError::new(
            Field::Name,
            format!("Name must be at most {MAX_NAME_LEN} characters long"),
        ));
    }
    if !NAME_REGEX.is_match(&normalized) {
        return Err(ValidationError::new(
            Field::Name,
            "Name may only contain letters, spaces, hyphens, apostrophes and periods",
        ));
    }

    Ok(normalized)
}

/// Returns the address lowercased and trimmed.
pub fn validate_email(raw: &str) -> Validated<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(Field::Email, "Email is required"));
    }
    check_field_len(Field::Email, trimmed)?;
    if trimmed.len() > MAX_EMAIL_LEN || trimmed.contains("..") || !EMAIL_REGEX.is_match(trimmed) {
        return Err(ValidationError::new(
            Field::Email,
            "Please enter a valid email address (e.g. name@example.com)",
        ));
    }
    Ok(trimmed.to_lowercase())
}

/// Returns the number reduced to an optional leading `+` followed by digits.
pub fn validate_phone(raw: &str) -> Validated<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(Field::Phone, "Phone number is required"));
    }
    check_field_len(Field::Phone, trimmed)?;
    if !PHONE_REGEX.is_match(trimmed) {
        return Err(ValidationError::new(
            Field::Phone,
            "Phone number may only contain digits, spaces, dashes, dots, parentheses and a leading +",
        ));
    }

    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < MIN_PHONE_DIGITS {
        return Err(ValidationError::new(
            Field::Phone,
            format!("Phone number must have at least {MIN_PHONE_DIGITS} digits"),
        ));
    }
    if digits.len() > MAX_PHONE_DIGITS {
        return Err(ValidationError::new(
            Field::Phone,
            format!("Phone number must have at most {MAX_PHONE_DIGITS} digits"),
        ));
    }

    if trimmed.starts_with('+') {
        Ok(format!("+{digits}"))
    } else {
        Ok(digits)
    }
}

pub fn validate_experience(raw: &str) -> Validated<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            Field::Experience,
            "Years of experience is required",
        ));
    }

    let years: f64 = trimmed.parse().map_err(|_| {
        ValidationError::new(
            Field::Experience,
            "Please enter a valid number for years of experience",
        )
    })?;

    if !years.is_finite() {
        return Err(ValidationError::new(
            Field::Experience,
            "Please enter a valid number for years of experience",
        ));
    }
    if years < 0.0 {
        return Err(ValidationError::new(
            Field::Experience,
            "Years of experience cannot be negative",
        ));
    }
    if years > MAX_EXPERIENCE_YEARS {
        return Err(ValidationError::new(
            Field::Experience,
            format!("Years of experience must be at most {MAX_EXPERIENCE_YEARS}"),
        ));
    }

    Ok(years)
}

/// Accepts any non-empty answer; the stored value is sanitized and capped.
pub fn validate_answer(raw: &str) -> Validated<String> {
    let answer = sanitize_input(raw, MAX_ANSWER_LEN);
    if answer.is_empty() {
        return Err(ValidationError::new(
            Field::Answer,
            "Please type an answer before continuing",
        ));
    }
    Ok(answer)
}

/// Parses one input line that may list several technologies.
pub fn validate_technology_entries(raw: &str) -> Validated<Vec<TechnologyEntry>> {
    let parts: Vec<&str> = TECH_SEPARATOR_REGEX
        .split(raw)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        return Err(ValidationError::new(
            Field::Technology,
            "Please enter at least one technology",
        ));
    }

    parts.into_iter().map(parse_technology_entry).collect()
}

fn parse_technology_entry(part: &str) -> Validated<TechnologyEntry> {
    let caps = TECH_ENTRY_REGEX.captures(part).ok_or_else(|| {
        ValidationError::new(
            Field::Technology,
            format!("Could not understand '{part}'"),
        )
    })?;

    let name = caps
        .name("name")
        .map(|m| m.as_str().trim())
        .unwrap_or_default();

    if name.is_empty() || !TECHNOLOGY_REGEX.is_match(name) {
        return Err(ValidationError::new(
            Field::Technology,
            format!("'{part}' is not a valid technology name"),
        ));
    }
    if name.chars().count() > MAX_TECHNOLOGY_NAME_LEN {
        return Err(ValidationError::new(
            Field::Technology,
            format!("Technology names must be at most {MAX_TECHNOLOGY_NAME_LEN} characters"),
        ));
    }

    let level = match caps.name("level").or_else(|| caps.name("plevel")) {
        None => None,
        Some(m) => Some(SkillLevel::parse(m.as_str()).ok_or_else(|| {
            ValidationError::new(
                Field::Technology,
                format!(
                    "Unknown skill level '{}' for {name} (use beginner, intermediate or advanced)",
                    m.as_str().trim()
                ),
            )
        })?),
    };

    Ok(TechnologyEntry {
        name: name.to_string(),
        level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert_eq!(validate_email("a@b.com").unwrap(), "a@b.com");
        assert_eq!(validate_email("  Jane@X.com ").unwrap(), "jane@x.com");
        assert!(validate_email("first.last+tag@sub.example.co.uk").is_ok());
    }

    #[test]
    fn test_malformed_emails_have_reasons() {
        for bad in [
            "",
            "plainaddress",
            "@missing-local.org",
            "jane@",
            "jane@x",
            "jane@@x.com",
            "jane doe@x.com",
            "jane..doe@x.com",
            "jane@x.c",
        ] {
            let err = validate_email(bad).unwrap_err();
            assert_eq!(err.field, Field::Email);
            assert!(!err.reason.is_empty(), "empty reason for {bad:?}");
        }
    }

    #[test]
    fn test_valid_phones_normalized() {
        assert_eq!(validate_phone("+1-555-123-4567").unwrap(), "+15551234567");
        assert_eq!(validate_phone("555-000-1111").unwrap(), "5550001111");
        assert_eq!(validate_phone("(555) 000.1111").unwrap(), "5550001111");
    }

    #[test]
    fn test_malformed_phones_have_reasons() {
        for bad in ["", "555-1234", "phone me", "+1 555 123 4567 890 12", "555-000-111a"] {
            let err = validate_phone(bad).unwrap_err();
            assert_eq!(err.field, Field::Phone);
            assert!(!err.reason.is_empty(), "empty reason for {bad:?}");
        }
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(validate_name("  Jane   Doe ").unwrap(), "Jane Doe");
        assert!(validate_name("Siobhán O'Neil-Smith").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("J").is_err());
        assert!(validate_name("Jane\u{7}Doe").is_err());
        assert!(validate_name("Robert'); DROP TABLE").is_err());
        assert!(validate_name(&"a".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_experience_bounds() {
        assert_eq!(validate_experience("3").unwrap(), 3.0);
        assert_eq!(validate_experience("0").unwrap(), 0.0);
        assert_eq!(validate_experience("2.5").unwrap(), 2.5);
        assert_eq!(validate_experience("50").unwrap(), 50.0);
        assert!(validate_experience("-1").is_err());
        assert!(validate_experience("51").is_err());
        assert!(validate_experience("three").is_err());
        assert!(validate_experience("NaN").is_err());
        assert!(validate_experience("inf").is_err());
    }

    #[test]
    fn test_answer_sanitized() {
        assert_eq!(
            validate_answer("  <b>Use \"decorators\"</b>; ok  ").unwrap(),
            "bUse decorators/b ok"
        );
        assert!(validate_answer("   ").is_err());
        assert!(validate_answer("<>").is_err());
        assert_eq!(
            validate_answer(&"x".repeat(MAX_ANSWER_LEN + 50)).unwrap().len(),
            MAX_ANSWER_LEN
        );
    }

    #[test]
    fn test_technology_entries_forms() {
        let entries =
            validate_technology_entries("Python: intermediate, React (beginner); Go - expert | SQL")
                .unwrap();
        assert_eq!(
            entries,
            vec![
                TechnologyEntry {
                    name: "Python".into(),
                    level: Some(SkillLevel::Intermediate)
                },
                TechnologyEntry {
                    name: "React".into(),
                    level: Some(SkillLevel::Beginner)
                },
                TechnologyEntry {
                    name: "Go".into(),
                    level: Some(SkillLevel::Advanced)
                },
                TechnologyEntry {
                    name: "SQL".into(),
                    level: None
                },
            ]
        );
    }

    #[test]
    fn test_technology_names_with_symbols() {
        let entries = validate_technology_entries("C++, C#, node.js: mid").unwrap();
        assert_eq!(entries[0].name, "C++");
        assert_eq!(entries[1].name, "C#");
        assert_eq!(entries[2].name, "node.js");
        assert_eq!(entries[2].level, Some(SkillLevel::Intermediate));
    }

    #[test]
    fn test_hyphenated_levels_accepted() {
        let entries =
            validate_technology_entries("Python: mid-level, Go (mid-level), Rust - advanced").unwrap();
        assert_eq!(entries[0].name, "Python");
        assert_eq!(entries[0].level, Some(SkillLevel::Intermediate));
        assert_eq!(entries[1].name, "Go");
        assert_eq!(entries[1].level, Some(SkillLevel::Intermediate));
        assert_eq!(entries[2].name, "Rust");
        assert_eq!(entries[2].level, Some(SkillLevel::Advanced));
    }

    #[test]
    fn test_technology_unknown_level_rejected() {
        let err = validate_technology_entries("Rust: wizard").unwrap_err();
        assert!(err.reason.contains("wizard"));
    }

    #[test]
    fn test_technology_empty_rejected() {
        assert!(validate_technology_entries(" , ; ").is_err());
        assert!(validate_technology_entries("<script>").is_err());
    }

    #[test]
    fn test_level_from_years() {
        assert_eq!(SkillLevel::from_years(0.5), SkillLevel::Beginner);
        assert_eq!(SkillLevel::from_years(3.0), SkillLevel::Intermediate);
        assert_eq!(SkillLevel::from_years(12.0), SkillLevel::Advanced);
    }

    #[test]
    fn test_oversized_identity_input_rejected() {
        let long = format!("{}@example.com", "a".repeat(MAX_FIELD_LEN));
        let err = validate_email(&long).unwrap_err();
        assert_eq!(err.field, Field::Email);
        assert!(err.reason.contains("at most"));
        assert!(validate_phone(&"1".repeat(MAX_FIELD_LEN + 1)).is_err());
    }
}
