use validator::Validate;

use crate::api::models::{Credentials, Registration};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    EmailChanged(String),
    PasswordChanged(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
/// Login screen input.
pub struct LoginForm {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

impl LoginForm {
    pub fn update(&mut self, event: LoginEvent) {
        match event {
            LoginEvent::EmailChanged(v) => self.email = v,
            LoginEvent::PasswordChanged(v) => self.password = v,
        }
    }

    pub fn submit(&self) -> Result<Credentials> {
        let form = LoginForm { email: self.email.trim().to_string(), password: self.password.clone() };
        form.validate()?;
        Ok(Credentials { email: form.email, password: form.password })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationEvent {
    NameChanged(String),
    EmailChanged(String),
    PasswordChanged(String),
    ConfirmChanged(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
/// Account creation input.
pub struct RegistrationForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn update(&mut self, event: RegistrationEvent) {
        match event {
            RegistrationEvent::NameChanged(v) => self.name = v,
            RegistrationEvent::EmailChanged(v) => self.email = v,
            RegistrationEvent::PasswordChanged(v) => self.password = v,
            RegistrationEvent::ConfirmChanged(v) => self.confirm_password = v,
        }
    }

    /// Trimmed name, trimmed lowercase email.
    pub fn submit(&self) -> Result<Registration> {
        let form = RegistrationForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        };
        form.validate()?;
        Ok(Registration { name: form.name, email: form.email, password: form.password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn registration(password: &str, confirm: &str) -> RegistrationForm {
        let mut form = RegistrationForm::default();
        form.update(RegistrationEvent::NameChanged("  Ann Lee ".into()));
        form.update(RegistrationEvent::EmailChanged(" Ann@Example.COM ".into()));
        form.update(RegistrationEvent::PasswordChanged(password.into()));
        form.update(RegistrationEvent::ConfirmChanged(confirm.into()));
        form
    }

    #[test]
    fn login_requires_both_fields() {
        let mut form = LoginForm::default();
        form.update(LoginEvent::EmailChanged("   ".into()));
        form.update(LoginEvent::PasswordChanged("secret".into()));
        assert!(matches!(form.submit(), Err(Error::Validation(_))));

        form.update(LoginEvent::EmailChanged(" ann@example.com ".into()));
        let creds = form.submit().unwrap();
        assert_eq!(creds.email, "ann@example.com");
    }

    #[test]
    fn registration_normalizes_name_and_email() {
        let reg = registration("secret1", "secret1").submit().unwrap();
        assert_eq!(reg.name, "Ann Lee");
        assert_eq!(reg.email, "ann@example.com");
    }

    #[test]
    fn registration_rejects_short_or_mismatched_passwords() {
        let err = registration("abc", "abc").submit().unwrap_err();
        match err {
            Error::Validation(errors) => assert!(errors.field_errors().contains_key("password")),
            other => panic!("unexpected {other:?}"),
        }
        let err = registration("secret1", "secret2").submit().unwrap_err();
        match err {
            Error::Validation(errors) => {
                assert!(errors.field_errors().contains_key("confirm_password"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn registration_rejects_malformed_email() {
        let mut form = registration("secret1", "secret1");
        form.update(RegistrationEvent::EmailChanged("not-an-email".into()));
        assert!(form.submit().is_err());
    }
}
