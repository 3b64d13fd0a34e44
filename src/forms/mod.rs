//! Input state for the login, registration, contact and profile screens.
//!
//! Each form is changed only through its event enum and turned into an API payload by
//! `submit`, which runs the presence/format checks.

pub mod auth;
pub mod contact;
pub mod profile;

pub use auth::{LoginEvent, LoginForm, RegistrationEvent, RegistrationForm};
pub use contact::{ContactEvent, ContactForm, LabeledValue, RowField};
pub use profile::{PasswordEvent, PasswordForm, ProfileForm};
