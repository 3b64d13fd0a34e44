use validator::Validate;

use crate::api::models::{PasswordChange, Profile};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
}

impl ProfileForm {
    pub fn from_profile(profile: &Profile) -> Self {
        Self { name: profile.name.clone() }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The trimmed new name.
    pub fn submit(&self) -> Result<String> {
        let form = ProfileForm { name: self.name.trim().to_string() };
        form.validate()?;
        Ok(form.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordEvent {
    CurrentChanged(String),
    NewChanged(String),
    ConfirmChanged(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct PasswordForm {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 6, message = "New password must be at least 6 characters long"))]
    pub new_password: String,
    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

impl PasswordForm {
    pub fn update(&mut self, event: PasswordEvent) {
        match event {
            PasswordEvent::CurrentChanged(v) => self.current_password = v,
            PasswordEvent::NewChanged(v) => self.new_password = v,
            PasswordEvent::ConfirmChanged(v) => self.confirm_password = v,
        }
    }

    pub fn submit(&self) -> Result<PasswordChange> {
        self.validate()?;
        Ok(PasswordChange {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}
