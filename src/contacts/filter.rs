//! Client-side search over the contacts of the loaded page.

use crate::api::models::Contact;

/// Whitespace-only queries do not filter.
pub fn is_active(query: &str) -> bool {
    !query.trim().is_empty()
}

/// Name, title and email addresses match case-insensitively; phone numbers match as written.
pub fn matches(contact: &Contact, query: &str) -> bool {
    let needle = query.to_lowercase();
    if contact.full_name().to_lowercase().contains(&needle) {
        return true;
    }
    if contact
        .title
        .as_deref()
        .is_some_and(|title| title.to_lowercase().contains(&needle))
    {
        return true;
    }
    if contact.emails.iter().any(|e| e.address.to_lowercase().contains(&needle)) {
        return true;
    }
    contact.phone_numbers.iter().any(|p| p.number.contains(query))
}

/// Contacts matching `query`, in their original order. Everything when the query is blank.
pub fn filter<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    if !is_active(query) {
        return contacts.iter().collect();
    }
    contacts.iter().filter(|c| matches(c, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ContactId, Email, PhoneNumber};

    fn contact(id: i64, first: &str, last: &str) -> Contact {
        Contact {
            id: ContactId(id),
            first_name: first.into(),
            last_name: last.into(),
            title: None,
            emails: vec![],
            phone_numbers: vec![],
        }
    }

    fn names(list: &[&Contact]) -> Vec<String> {
        list.iter().map(|c| c.full_name()).collect()
    }

    #[test]
    fn matches_across_first_and_last_name() {
        let c = contact(1, "Alice", "Smith");
        assert!(matches(&c, "smith"));
        assert!(matches(&c, "CE SM"));
        assert!(!matches(&c, "jones"));
    }

    #[test]
    fn matches_title_and_email_ignoring_case() {
        let mut c = contact(1, "Bob", "Jones");
        c.title = Some("Director".into());
        c.emails.push(Email { id: None, label: None, address: "Bob@Example.com".into() });
        assert!(matches(&c, "direct"));
        assert!(matches(&c, "example.COM"));
    }

    #[test]
    fn phone_numbers_match_as_written() {
        let mut c = contact(1, "Carol", "King");
        c.phone_numbers.push(PhoneNumber { id: None, label: None, number: "+1 555-0100".into() });
        assert!(matches(&c, "555-01"));
        assert!(!matches(&c, "5550100"));
    }

    #[test]
    fn filter_keeps_page_order() {
        let page = vec![
            contact(1, "Alice", "Smith"),
            contact(2, "Bob", "Jones"),
            contact(3, "Adam", "Smithers"),
        ];
        assert_eq!(names(&filter(&page, "smith")), ["Alice Smith", "Adam Smithers"]);
    }

    #[test]
    fn blank_query_returns_everything() {
        let page = vec![contact(1, "Alice", "Smith"), contact(2, "Bob", "Jones")];
        assert_eq!(filter(&page, "").len(), 2);
        assert_eq!(filter(&page, "   ").len(), 2);
        assert!(!is_active("  "));
    }
}
