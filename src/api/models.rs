use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Server-assigned contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub i64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "email", default)]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub emails: Vec<Email>,
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Name plus title, the way a list row shows it.
    pub fn display_name(&self) -> String {
        let name = self.full_name();
        let name = name.trim();
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => format!("{name} {title}"),
            _ => name.to_string(),
        }
    }
}

/// Labelled value sent when creating or updating a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailDraft {
    pub label: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneDraft {
    pub label: String,
    pub number: String,
}

/// Body of `POST /contacts` and `PUT /contacts/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub emails: Vec<EmailDraft>,
    pub phone_numbers: Vec<PhoneDraft>,
}

/// One slice of the user's contacts plus the pagination metadata the server computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub size: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Page {
    pub fn empty() -> Self {
        Self {
            contacts: Vec::new(),
            current_page: 0,
            total_pages: 0,
            total_elements: 0,
            size: 0,
            has_next: false,
            has_previous: false,
        }
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.contacts.iter().any(|c| c.id == id)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::empty()
    }
}

/// Page sizes the list screen offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    pub const ALLOWED: [usize; 4] = [5, 10, 25, 50];

    pub fn get(self) -> usize {
        self.0
    }

    pub fn all() -> impl Iterator<Item = PageSize> {
        Self::ALLOWED.into_iter().map(PageSize)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(10)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        if Self::ALLOWED.contains(&value) {
            Ok(PageSize(value))
        } else {
            Err(Error::InvalidPageSize(value))
        }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> usize {
        size.0
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single `GET /contacts` request. Always sorted by first name, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: PageSize,
}

impl PageRequest {
    pub const SORT_BY: &'static str = "firstName";
    pub const SORT_DIR: &'static str = "asc";

    pub fn new(page: u32, size: PageSize) -> Self {
        Self { page, size }
    }
}

/// Account details as returned by the profile endpoints. The server also echoes the
/// stored password, which is not part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
    pub user: Profile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_server_page() {
        let json = r#"{
            "contacts": [{
                "id": 7,
                "firstName": "Alice",
                "lastName": "Smith",
                "title": null,
                "emails": [{"id": 1, "label": "work", "email": "alice@example.com"}],
                "phoneNumbers": [{"id": 2, "label": "home", "number": "555-0100"}]
            }],
            "currentPage": 0,
            "totalPages": 3,
            "totalElements": 25,
            "size": 10,
            "hasNext": true,
            "hasPrevious": false
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 3);
        let alice = &page.contacts[0];
        assert_eq!(alice.id, ContactId(7));
        assert_eq!(alice.emails[0].address, "alice@example.com");
        assert_eq!(alice.phone_numbers[0].number, "555-0100");
        assert_eq!(alice.display_name(), "Alice Smith");
    }

    #[test]
    fn contact_tolerates_missing_fields() {
        let contact: Contact = serde_json::from_str(r#"{"id": 3, "firstName": "Bob"}"#).unwrap();
        assert_eq!(contact.last_name, "");
        assert!(contact.emails.is_empty());
        assert!(contact.phone_numbers.is_empty());
    }

    #[test]
    fn profile_drops_the_password_field() {
        let profile: Profile = serde_json::from_str(
            r#"{"id": 1, "name": "Ann", "email": "ann@example.com", "password": "hunter2"}"#,
        )
        .unwrap();
        let echoed = serde_json::to_string(&profile).unwrap();
        assert!(!echoed.contains("hunter2"));
    }

    #[test]
    fn page_size_only_accepts_the_offered_sizes() {
        assert_eq!(PageSize::try_from(25).unwrap().get(), 25);
        assert!(matches!(PageSize::try_from(7), Err(Error::InvalidPageSize(7))));
        assert_eq!(PageSize::default().get(), 10);
        assert_eq!(PageSize::all().count(), 4);
    }

    #[test]
    fn draft_uses_server_field_names() {
        let draft = ContactDraft {
            first_name: "Alice".into(),
            last_name: "Smith".into(),
            title: None,
            emails: vec![EmailDraft { label: "work".into(), email: "a@example.com".into() }],
            phone_numbers: vec![],
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["firstName"], "Alice");
        assert_eq!(value["emails"][0]["email"], "a@example.com");
        assert!(value.get("title").is_none());
        assert!(value["phoneNumbers"].as_array().unwrap().is_empty());
    }
}
