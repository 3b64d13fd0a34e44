pub mod client;
pub mod models;

use crate::api::models::{ContactId, Page, PageRequest};
use crate::error::Result;
use crate::session::Session;

/// The slice of the Contact Manager API the contact list depends on.
#[allow(async_fn_in_trait)]
pub trait ContactsApi {
    /// Fetch one page of the session user's contacts.
    async fn list_contacts(&self, session: &Session, request: PageRequest) -> Result<Page>;

    /// Delete a contact owned by the session user.
    async fn delete_contact(&self, session: &Session, id: ContactId) -> Result<()>;
}
