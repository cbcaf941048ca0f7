//! Login and signup forms.

use super::{Checker, FieldErrorKind, ValidationErrors};
use crate::models::Role;

/// Minimum password length at signup.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Login draft: an email or username plus the portal's role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub identifier: String,
    pub role: Role,
}

impl LoginForm {
    pub fn veterinarian(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            role: Role::Veterinarian,
        }
    }

    pub fn client(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            role: Role::Client,
        }
    }

    /// Returns the trimmed identifier.
    pub fn validate(&self) -> Result<String, ValidationErrors> {
        let identifier = self.identifier.trim();
        if identifier.is_empty() {
            return Err(ValidationErrors::single(
                "email",
                FieldErrorKind::Required,
                "Please enter a valid email",
            ));
        }
        Ok(identifier.to_string())
    }
}

/// Signup draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    /// "veterinarian" or "client"
    pub role: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub phone: String,
}

/// Validated signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub role: Role,
    pub email: String,
    pub full_name: String,
    pub phone: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<Signup, ValidationErrors> {
        let mut v = Checker::new();

        let role = v.choice(
            "role",
            &self.role,
            |s| s.parse::<Role>().ok(),
            "Please select an account type",
        );

        if self.email.trim().is_empty() || !self.email.contains('@') {
            v.fail("email", FieldErrorKind::InvalidEmail, "Please enter a valid email");
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            v.fail(
                "password",
                FieldErrorKind::TooShort {
                    min: MIN_PASSWORD_LEN,
                },
                "Password must have at least 6 characters",
            );
        } else if self.password != self.confirm_password {
            v.fail("confirmPassword", FieldErrorKind::Mismatch, "Passwords do not match");
        }

        let full_name = v.required("fullName", &self.full_name, "Please enter your full name");
        let phone = v.required("phone", &self.phone, "Please enter a valid phone number");

        let errors = v.into_errors();
        match role {
            Some(role) if errors.is_empty() => Ok(Signup {
                role,
                email: self.email.trim().to_string(),
                full_name,
                phone,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> SignupForm {
        SignupForm {
            role: "client".into(),
            email: "owner@mail.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            full_name: "Juan Pérez García".into(),
            phone: "+34 666 123 456".into(),
        }
    }

    #[test]
    fn test_login_requires_identifier() {
        assert!(LoginForm::veterinarian("   ").validate().is_err());
        assert_eq!(
            LoginForm::veterinarian(" vet@clinic.com ").validate().unwrap(),
            "vet@clinic.com"
        );
    }

    #[test]
    fn test_valid_signup() {
        let signup = valid_signup().validate().unwrap();
        assert_eq!(signup.role, Role::Client);
        assert_eq!(signup.email, "owner@mail.com");
    }

    #[test]
    fn test_signup_field_errors() {
        let mut form = valid_signup();
        form.role = String::new();
        form.email = "owner.mail.com".into();
        form.password = "abc".into();
        form.confirm_password = "abc".into();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields(), vec!["role", "email", "password"]);
    }

    #[test]
    fn test_signup_password_mismatch() {
        let mut form = valid_signup();
        form.confirm_password = "secret2".into();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("confirmPassword").unwrap().kind, FieldErrorKind::Mismatch);
    }
}
