use thiserror::Error;

/// Malformed or missing request input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{message}")]
    Required { field: String, message: String },

    #[error("{field}: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("{field}: Ensure this field has at least {min} characters.")]
    TooShort { field: String, min: usize },
}

impl ValidationError {
    pub fn required(field: &str) -> Self {
        Self::Required {
            field: field.to_string(),
            message: format!("{} is required", capitalize(field)),
        }
    }

    pub fn invalid_format(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn too_short(field: &str, min: usize) -> Self {
        Self::TooShort {
            field: field.to_string(),
            min,
        }
    }

    /// Name of the offending input field
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field, .. } => field,
            Self::InvalidFormat { field, .. } => field,
            Self::TooShort { field, .. } => field,
        }
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    }
}
