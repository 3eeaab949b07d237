use serde::Deserialize;

use crate::error::CopydeskError;

pub const MAX_IDENT_LEN: usize = 128;
pub const MAX_VALUE_LEN: usize = 64 * 1024;

#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    pub section: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub section: String,
    pub key: String,
    pub value: String,
}

impl UpdateContentRequest {
    /// Trim identifiers and enforce size limits. The value is stored as given.
    pub fn validated(self) -> Result<Self, CopydeskError> {
        let section = validate_ident("section", &self.section)?;
        let key = validate_ident("key", &self.key)?;
        if self.value.len() > MAX_VALUE_LEN {
            return Err(CopydeskError::BadRequest(format!(
                "value must be at most {MAX_VALUE_LEN} bytes"
            )));
        }
        Ok(Self {
            section,
            key,
            value: self.value,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validated(self) -> Result<Self, CopydeskError> {
        Ok(Self {
            username: validate_ident("username", &self.username)?,
            password: self.password,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Trimmed, non-empty, at most [`MAX_IDENT_LEN`] characters.
pub fn validate_ident(field: &str, raw: &str) -> Result<String, CopydeskError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CopydeskError::BadRequest(format!(
            "{field} must not be empty"
        )));
    }
    if trimmed.chars().count() > MAX_IDENT_LEN {
        return Err(CopydeskError::BadRequest(format!(
            "{field} must be at most {MAX_IDENT_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
