//! Contact list view model: one server page at a time, searched locally.
//!
//! The server owns pagination. Search only ever narrows the page that is already
//! loaded, so pagination controls are withheld while a query is active. Fetches are
//! issued as [`LoadTicket`]s; only the most recently issued ticket may change state.

pub mod filter;

use log::{debug, warn};

use crate::api::ContactsApi;
use crate::api::models::{Contact, ContactId, Page, PageRequest, PageSize};
use crate::error::{Error, Result};
use crate::session::Session;

/// Handle for one in-flight page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    request: PageRequest,
}

impl LoadTicket {
    pub fn request(&self) -> PageRequest {
        self.request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer fetch was issued after this one; its result was dropped.
    Stale,
}

/// Result of [`ContactList::finish_reload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadStep {
    Done(LoadOutcome),
    /// The reloaded page no longer exists; fetch this ticket next.
    StepBack(LoadTicket),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    QueryChanged(String),
    QueryCleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub page_size: PageSize,
}

impl PaginationControls {
    pub fn label(&self) -> String {
        if self.total_pages == 0 {
            "No pages".to_string()
        } else {
            format!("Page {} of {}", self.current_page + 1, self.total_pages)
        }
    }
}

/// A delete the user has asked for but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    id: ContactId,
    name: String,
}

impl PendingDelete {
    pub fn id(&self) -> ContactId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn confirm(self) -> ConfirmedDelete {
        ConfirmedDelete { id: self.id }
    }
}

/// Only obtainable through [`PendingDelete::confirm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedDelete {
    id: ContactId,
}

impl ConfirmedDelete {
    pub fn id(&self) -> ContactId {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct ContactList {
    page: Page,
    page_size: PageSize,
    query: String,
    loading: bool,
    issued: u64,
}

impl Default for ContactList {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl ContactList {
    pub fn new(page_size: PageSize) -> Self {
        Self { page: Page::empty(), page_size, query: String::new(), loading: false, issued: 0 }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_filtering(&self) -> bool {
        filter::is_active(&self.query)
    }

    /// The contacts to show: the loaded page, narrowed by the query.
    pub fn displayed(&self) -> Vec<&Contact> {
        filter::filter(&self.page.contacts, &self.query)
    }

    /// Pagination is hidden while a query filters the loaded page.
    pub fn pagination(&self) -> Option<PaginationControls> {
        if self.is_filtering() {
            return None;
        }
        Some(PaginationControls {
            current_page: self.page.current_page,
            total_pages: self.page.total_pages,
            total_elements: self.page.total_elements,
            has_previous: self.page.has_previous,
            has_next: self.page.has_next,
            page_size: self.page_size,
        })
    }

    pub fn search_summary(&self) -> Option<String> {
        if !self.is_filtering() {
            return None;
        }
        Some(format!(
            "Showing {} of {} contacts for \"{}\"",
            self.displayed().len(),
            self.page.contacts.len(),
            self.query
        ))
    }

    pub fn empty_message(&self) -> Option<String> {
        if !self.displayed().is_empty() {
            return None;
        }
        if self.is_filtering() {
            Some(format!("No contacts found matching \"{}\"", self.query))
        } else {
            Some("No contacts to show yet.".to_string())
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn update(&mut self, event: ListEvent) {
        match event {
            ListEvent::QueryChanged(text) => self.set_query(text),
            ListEvent::QueryCleared => self.query.clear(),
        }
    }

    /// Issue a fetch. Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self, page: u32, size: PageSize) -> LoadTicket {
        self.issued += 1;
        self.loading = true;
        LoadTicket { seq: self.issued, request: PageRequest::new(page, size) }
    }

    /// Apply the result of a fetch. Results for stale tickets never touch state.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Page>) -> Result<LoadOutcome> {
        if ticket.seq != self.issued {
            debug!(
                "dropping response for page {} (ticket {}, latest {})",
                ticket.request.page, ticket.seq, self.issued
            );
            return Ok(LoadOutcome::Stale);
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.page = page;
                self.page_size = ticket.request.size;
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                warn!("loading page {} failed: {err}", ticket.request.page);
                Err(err)
            }
        }
    }

    pub fn request_page(&mut self, page: u32) -> Result<LoadTicket> {
        if page >= self.page.total_pages {
            return Err(Error::OutOfRange { requested: page, total_pages: self.page.total_pages });
        }
        Ok(self.begin_load(page, self.page_size))
    }

    /// New sizes invalidate the old page offsets, so the first page is fetched.
    pub fn request_page_size(&mut self, size: usize) -> Result<LoadTicket> {
        let size = PageSize::try_from(size)?;
        Ok(self.begin_load(0, size))
    }

    pub fn reload(&mut self) -> LoadTicket {
        self.begin_load(self.page.current_page, self.page_size)
    }

    /// Apply a refetch of the current page, e.g. after a delete. A page that now lies
    /// past the end is not applied; a fetch for the new last page is issued instead and
    /// the loaded page stays as it was until that fetch succeeds.
    pub fn finish_reload(&mut self, ticket: LoadTicket, result: Result<Page>) -> Result<ReloadStep> {
        if ticket.seq == self.issued {
            if let Ok(page) = &result {
                if let Some(last) = last_page_if_past_end(page) {
                    debug!("page {} is past the end, stepping back to {last}", page.current_page);
                    return Ok(ReloadStep::StepBack(self.begin_load(last, ticket.request.size)));
                }
            }
        }
        self.finish_load(ticket, result).map(ReloadStep::Done)
    }

    pub fn request_delete(&self, id: ContactId) -> Result<PendingDelete> {
        self.page
            .contacts
            .iter()
            .find(|c| c.id == id)
            .map(|c| PendingDelete { id, name: c.display_name() })
            .ok_or(Error::UnknownContact(id))
    }

    /// Fetch and apply one page. If the returned future is dropped before it completes,
    /// `is_loading()` stays set until a later load finishes.
    pub async fn load_page<A: ContactsApi>(
        &mut self,
        api: &A,
        session: Option<&Session>,
        page: u32,
        size: PageSize,
    ) -> Result<LoadOutcome> {
        let session = session.ok_or(Error::Unauthenticated)?;
        let ticket = self.begin_load(page, size);
        let result = api.list_contacts(session, ticket.request()).await;
        self.finish_load(ticket, result)
    }

    pub async fn go_to_page<A: ContactsApi>(
        &mut self,
        api: &A,
        session: Option<&Session>,
        page: u32,
    ) -> Result<LoadOutcome> {
        if page >= self.page.total_pages {
            return Err(Error::OutOfRange { requested: page, total_pages: self.page.total_pages });
        }
        self.load_page(api, session, page, self.page_size).await
    }

    pub async fn change_page_size<A: ContactsApi>(
        &mut self,
        api: &A,
        session: Option<&Session>,
        size: usize,
    ) -> Result<LoadOutcome> {
        let size = PageSize::try_from(size)?;
        self.load_page(api, session, 0, size).await
    }

    /// Delete, then refetch so counts and page flags come from the server.
    pub async fn delete_contact<A: ContactsApi>(
        &mut self,
        api: &A,
        session: Option<&Session>,
        confirmed: ConfirmedDelete,
    ) -> Result<LoadOutcome> {
        let session = session.ok_or(Error::Unauthenticated)?;
        api.delete_contact(session, confirmed.id).await?;
        let ticket = self.reload();
        let result = api.list_contacts(session, ticket.request()).await;
        match self.finish_reload(ticket, result)? {
            ReloadStep::Done(outcome) => Ok(outcome),
            ReloadStep::StepBack(ticket) => {
                let result = api.list_contacts(session, ticket.request()).await;
                self.finish_load(ticket, result)
            }
        }
    }
}

/// Last valid page index when `page` came back empty past the end of the list.
fn last_page_if_past_end(page: &Page) -> Option<u32> {
    let past_end =
        page.contacts.is_empty() && page.total_pages > 0 && page.current_page >= page.total_pages;
    past_end.then(|| page.total_pages - 1)
}
