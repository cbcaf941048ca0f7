//! Authentication stand-ins: MFA strategy, page gate and onboarding flow.
//!
//! There is no identity provider. Login stores what the user typed, and the
//! only secret is the MFA code checked by an [`AuthStrategy`].

mod flow;
mod gate;

pub use flow::*;
pub use gate::*;

use crate::db::StoreError;
use crate::forms::{FieldErrorKind, ValidationErrors};
use thiserror::Error;

/// Code accepted by [`DemoAuthStrategy::default`].
pub const DEMO_MFA_CODE: &str = "488 519";

/// Digits in an MFA code.
pub const MFA_CODE_LEN: usize = 6;

/// Auth errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("The MFA code is incorrect. Try again.")]
    MfaMismatch,

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Decides whether an MFA code is correct.
pub trait AuthStrategy: Send + Sync {
    /// `code` has already been stripped of whitespace.
    fn verify_code(&self, code: &str) -> bool;
}

/// Accepts a single fixed code, whitespace-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAuthStrategy {
    expected: String,
}

impl DemoAuthStrategy {
    pub fn new(code: &str) -> Self {
        Self {
            expected: normalize_mfa_code(code),
        }
    }

    /// Code as shown to the user (e.g. "488 519").
    pub fn display_code(&self) -> String {
        format_mfa_code(&self.expected)
    }
}

impl Default for DemoAuthStrategy {
    fn default() -> Self {
        Self::new(DEMO_MFA_CODE)
    }
}

impl AuthStrategy for DemoAuthStrategy {
    fn verify_code(&self, code: &str) -> bool {
        normalize_mfa_code(code) == self.expected
    }
}

/// Strip every whitespace character.
pub fn normalize_mfa_code(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Input mask for the code field: digits only, at most six, grouped 3+3.
pub fn format_mfa_code(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MFA_CODE_LEN)
        .collect();
    if digits.len() <= 3 {
        digits
    } else {
        format!("{} {}", &digits[..3], &digits[3..])
    }
}

/// Check that the entry is six digits once whitespace is removed.
pub fn validate_mfa_code(input: &str) -> Result<String, ValidationErrors> {
    let code = normalize_mfa_code(input);
    if code.is_empty() {
        return Err(ValidationErrors::single(
            "code",
            FieldErrorKind::Required,
            "Enter the 6-digit code",
        ));
    }
    if code.len() != MFA_CODE_LEN || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationErrors::single(
            "code",
            FieldErrorKind::InvalidCode,
            "The code must have 6 digits",
        ));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_code_any_spacing() {
        let strategy = DemoAuthStrategy::default();
        assert!(strategy.verify_code("488519"));
        assert!(strategy.verify_code("488 519"));
        assert!(strategy.verify_code(" 4 8 8 5 1 9 "));
        assert!(!strategy.verify_code("488518"));
    }

    #[test]
    fn test_custom_code() {
        let strategy = DemoAuthStrategy::new("123456");
        assert!(strategy.verify_code("123 456"));
        assert!(!strategy.verify_code("488519"));
        assert_eq!(strategy.display_code(), "123 456");
    }

    #[test]
    fn test_format_mfa_code() {
        assert_eq!(format_mfa_code(""), "");
        assert_eq!(format_mfa_code("48"), "48");
        assert_eq!(format_mfa_code("488"), "488");
        assert_eq!(format_mfa_code("4885"), "488 5");
        assert_eq!(format_mfa_code("488-519-77"), "488 519");
        assert_eq!(format_mfa_code("abc"), "");
    }

    #[test]
    fn test_validate_mfa_code() {
        assert_eq!(validate_mfa_code("488 519").unwrap(), "488519");
        assert_eq!(
            validate_mfa_code("").unwrap_err().get("code").unwrap().kind,
            FieldErrorKind::Required
        );
        assert_eq!(
            validate_mfa_code("48851").unwrap_err().get("code").unwrap().kind,
            FieldErrorKind::InvalidCode
        );
        assert!(validate_mfa_code("48851a").is_err());
    }
}
