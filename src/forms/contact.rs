use validator::Validate;

use crate::api::models::{Contact, ContactDraft, EmailDraft, PhoneDraft};
use crate::error::Result;

pub const DEFAULT_LABEL: &str = "work";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

impl LabeledValue {
    fn blank() -> Self {
        Self { label: DEFAULT_LABEL.to_string(), value: String::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Label,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactEvent {
    FirstNameChanged(String),
    LastNameChanged(String),
    TitleChanged(String),
    EmailAdded,
    EmailRemoved(usize),
    EmailEdited(usize, RowField, String),
    PhoneAdded,
    PhoneRemoved(usize),
    PhoneEdited(usize, RowField, String),
}

/// Add/edit contact screen state. Starts with one empty email row and one empty phone row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub emails: Vec<LabeledValue>,
    pub phone_numbers: Vec<LabeledValue>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            title: String::new(),
            emails: vec![LabeledValue::blank()],
            phone_numbers: vec![LabeledValue::blank()],
        }
    }
}

#[derive(Validate)]
struct ContactCheck {
    #[validate(length(min = 1, message = "First name is required"))]
    first_name: String,
    #[validate(nested)]
    emails: Vec<EmailCheck>,
}

#[derive(Validate)]
struct EmailCheck {
    #[validate(email(message = "Please enter a valid email address"))]
    email: String,
}

impl ContactForm {
    /// Seed the form for editing. Missing labels fall back to "work".
    pub fn from_contact(contact: &Contact) -> Self {
        let mut form = Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            title: contact.title.clone().unwrap_or_default(),
            emails: contact
                .emails
                .iter()
                .map(|e| LabeledValue {
                    label: e.label.clone().unwrap_or_else(|| DEFAULT_LABEL.to_string()),
                    value: e.address.clone(),
                })
                .collect(),
            phone_numbers: contact
                .phone_numbers
                .iter()
                .map(|p| LabeledValue {
                    label: p.label.clone().unwrap_or_else(|| DEFAULT_LABEL.to_string()),
                    value: p.number.clone(),
                })
                .collect(),
        };
        if form.emails.is_empty() {
            form.emails.push(LabeledValue::blank());
        }
        if form.phone_numbers.is_empty() {
            form.phone_numbers.push(LabeledValue::blank());
        }
        form
    }

    pub fn update(&mut self, event: ContactEvent) {
        match event {
            ContactEvent::FirstNameChanged(v) => self.first_name = v,
            ContactEvent::LastNameChanged(v) => self.last_name = v,
            ContactEvent::TitleChanged(v) => self.title = v,
            ContactEvent::EmailAdded => self.emails.push(LabeledValue::blank()),
            ContactEvent::EmailRemoved(i) => remove_row(&mut self.emails, i),
            ContactEvent::EmailEdited(i, field, v) => edit_row(&mut self.emails, i, field, v),
            ContactEvent::PhoneAdded => self.phone_numbers.push(LabeledValue::blank()),
            ContactEvent::PhoneRemoved(i) => remove_row(&mut self.phone_numbers, i),
            ContactEvent::PhoneEdited(i, field, v) => edit_row(&mut self.phone_numbers, i, field, v),
        }
    }

    /// Validate and build the request body. Blank email and phone rows are dropped.
    pub fn submit(&self) -> Result<ContactDraft> {
        let emails: Vec<EmailDraft> = self
            .emails
            .iter()
            .filter(|row| !row.value.trim().is_empty())
            .map(|row| EmailDraft { label: row.label.trim().to_string(), email: row.value.trim().to_string() })
            .collect();
        let phone_numbers: Vec<PhoneDraft> = self
            .phone_numbers
            .iter()
            .filter(|row| !row.value.trim().is_empty())
            .map(|row| PhoneDraft { label: row.label.trim().to_string(), number: row.value.trim().to_string() })
            .collect();

        ContactCheck {
            first_name: self.first_name.trim().to_string(),
            emails: emails.iter().map(|e| EmailCheck { email: e.email.clone() }).collect(),
        }
        .validate()?;

        let title = self.title.trim();
        Ok(ContactDraft {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            title: (!title.is_empty()).then(|| title.to_string()),
            emails,
            phone_numbers,
        })
    }
}

fn remove_row(rows: &mut Vec<LabeledValue>, index: usize) {
    if index < rows.len() {
        rows.remove(index);
    }
}

fn edit_row(rows: &mut [LabeledValue], index: usize, field: RowField, value: String) {
    if let Some(row) = rows.get_mut(index) {
        match field {
            RowField::Label => row.label = value,
            RowField::Value => row.value = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ContactId, Email, PhoneNumber};
    use crate::error::Error;

    #[test]
    fn new_form_has_one_blank_row_of_each() {
        let form = ContactForm::default();
        assert_eq!(form.emails, vec![LabeledValue { label: "work".into(), value: String::new() }]);
        assert_eq!(form.phone_numbers.len(), 1);
    }

    #[test]
    fn rows_can_be_added_edited_and_removed() {
        let mut form = ContactForm::default();
        form.update(ContactEvent::EmailAdded);
        form.update(ContactEvent::EmailEdited(1, RowField::Label, "home".into()));
        form.update(ContactEvent::EmailEdited(1, RowField::Value, "bob@home.example".into()));
        form.update(ContactEvent::EmailRemoved(0));
        form.update(ContactEvent::PhoneRemoved(5));
        assert_eq!(form.emails.len(), 1);
        assert_eq!(form.emails[0].label, "home");
        assert_eq!(form.phone_numbers.len(), 1);
    }

    #[test]
    fn submit_trims_and_drops_blank_rows() {
        let mut form = ContactForm::default();
        form.update(ContactEvent::FirstNameChanged(" Alice ".into()));
        form.update(ContactEvent::LastNameChanged("Smith".into()));
        form.update(ContactEvent::EmailEdited(0, RowField::Value, " alice@example.com ".into()));
        form.update(ContactEvent::PhoneAdded);
        form.update(ContactEvent::PhoneEdited(1, RowField::Value, "555-0100".into()));

        let draft = form.submit().unwrap();
        assert_eq!(draft.first_name, "Alice");
        assert_eq!(draft.title, None);
        assert_eq!(draft.emails, vec![EmailDraft { label: "work".into(), email: "alice@example.com".into() }]);
        assert_eq!(draft.phone_numbers, vec![PhoneDraft { label: "work".into(), number: "555-0100".into() }]);
    }

    #[test]
    fn submit_requires_first_name_and_valid_emails() {
        let form = ContactForm::default();
        assert!(matches!(form.submit(), Err(Error::Validation(_))));

        let mut form = ContactForm::default();
        form.update(ContactEvent::FirstNameChanged("Alice".into()));
        form.update(ContactEvent::EmailEdited(0, RowField::Value, "alice-at-example".into()));
        assert!(matches!(form.submit(), Err(Error::Validation(_))));
    }

    #[test]
    fn editing_starts_from_the_stored_contact() {
        let contact = Contact {
            id: ContactId(4),
            first_name: "Bob".into(),
            last_name: "Jones".into(),
            title: Some("CTO".into()),
            emails: vec![Email { id: Some(1), label: None, address: "bob@example.com".into() }],
            phone_numbers: vec![PhoneNumber { id: Some(2), label: Some("mobile".into()), number: "555".into() }],
        };
        let form = ContactForm::from_contact(&contact);
        assert_eq!(form.title, "CTO");
        assert_eq!(form.emails[0].label, "work");
        assert_eq!(form.phone_numbers[0].label, "mobile");
        assert_eq!(form.submit().unwrap().title.as_deref(), Some("CTO"));
    }
}
