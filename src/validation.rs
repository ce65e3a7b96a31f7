//! Input validation for user-entered recipe box text

/// Text validation errors with helpful messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} is too long (maximum {max} characters)")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} contains control characters: {chars}")]
    ControlCharacters { field: &'static str, chars: String },

    #[error("total time of {minutes} minutes is more than a week")]
    UnreasonableMinutes { minutes: u32 },
}

/// Length and character rules for one kind of text field
#[derive(Debug, Clone)]
pub struct TextRules {
    pub field: &'static str,
    pub max_chars: usize,
}

impl TextRules {
    pub const RECIPE_TITLE: TextRules = TextRules {
        field: "recipe title",
        max_chars: 120,
    };
    pub const CATEGORY_NAME: TextRules = TextRules {
        field: "category name",
        max_chars: 40,
    };
    pub const INGREDIENT_NAME: TextRules = TextRules {
        field: "ingredient name",
        max_chars: 80,
    };
    pub const NICKNAME: TextRules = TextRules {
        field: "nickname",
        max_chars: 30,
    };
}

/// Longest plausible total cooking time: one week.
pub const MAX_TOTAL_MINUTES: u32 = 7 * 24 * 60;

/// Validate a single-line text field and return it trimmed
pub fn validate_text(value: &str, rules: &TextRules) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: rules.field });
    }
    if trimmed.chars().count() > rules.max_chars {
        return Err(ValidationError::TooLong {
            field: rules.field,
            max: rules.max_chars,
        });
    }

    if trimmed.chars().any(|c| c.is_control()) {
        let chars = trimmed
            .chars()
            .filter(|c| c.is_control())
            .map(|c| format!("\\u{{{:04x}}}", c as u32))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(ValidationError::ControlCharacters {
            field: rules.field,
            chars,
        });
    }

    Ok(trimmed.to_string())
}

pub fn validate_recipe_title(title: &str) -> Result<String, ValidationError> {
    validate_text(title, &TextRules::RECIPE_TITLE)
}

pub fn validate_category_name(name: &str) -> Result<String, ValidationError> {
    validate_text(name, &TextRules::CATEGORY_NAME)
}

pub fn validate_ingredient_name(name: &str) -> Result<String, ValidationError> {
    validate_text(name, &TextRules::INGREDIENT_NAME)
}

pub fn validate_total_minutes(minutes: u32) -> Result<u32, ValidationError> {
    if minutes > MAX_TOTAL_MINUTES {
        return Err(ValidationError::UnreasonableMinutes { minutes });
    }
    Ok(minutes)
}
