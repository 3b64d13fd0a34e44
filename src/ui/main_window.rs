use std::cell::{Cell, RefCell};
use std::rc::Rc;

use adw::prelude::*;
use adw::Application;
use contact_manager::api::models::{ContactId, Page, PageSize};
use contact_manager::contacts::{
    ConfirmedDelete, ContactList, ListEvent, LoadOutcome, LoadTicket, ReloadStep,
};
use contact_manager::session::Session;
use contact_manager::{Error, Result};
use gtk4 as gtk;

use crate::app::AppContext;
use crate::ui::contact_row::ContactRow;

/// Contact dashboard: search entry, the current page of contacts and the pager.
struct ListScreen {
    app: Application,
    ctx: Rc<AppContext>,
    session: Session,
    window: adw::ApplicationWindow,
    overlay: adw::ToastOverlay,
    model: RefCell<ContactList>,
    list: gtk::ListBox,
    placeholder: gtk::Label,
    summary: gtk::Label,
    spinner: gtk::Spinner,
    pager: gtk::Box,
    prev_btn: gtk::Button,
    next_btn: gtk::Button,
    page_label: gtk::Label,
    size_dropdown: gtk::DropDown,
    /// Set while the drop-down is moved back to the model's size.
    syncing_size: Cell<bool>,
}

pub fn show_main_window(app: &Application, ctx: Rc<AppContext>, session: Session) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Contact Manager")
        .default_width(820)
        .default_height(640)
        .build();

    let overlay = adw::ToastOverlay::new();
    let content = gtk::Box::new(gtk::Orientation::Vertical, 8);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);

    let search = gtk::SearchEntry::new();
    search.set_placeholder_text(Some("Search by name, email, or phone..."));
    search.set_hexpand(true);
    content.append(&search);

    let summary = gtk::Label::new(None);
    summary.add_css_class("dim-label");
    summary.set_halign(gtk::Align::Start);
    summary.set_visible(false);
    content.append(&summary);

    let list = gtk::ListBox::new();
    list.add_css_class("boxed-list");
    list.set_selection_mode(gtk::SelectionMode::None);
    let placeholder = gtk::Label::new(None);
    placeholder.add_css_class("dim-label");
    placeholder.set_margin_top(24);
    placeholder.set_margin_bottom(24);
    list.set_placeholder(Some(&placeholder));
    let scroller = gtk::ScrolledWindow::builder()
        .vexpand(true)
        .hexpand(true)
        .build();
    scroller.set_child(Some(&list));
    content.append(&scroller);

    let pager = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    let prev_btn = gtk::Button::with_label("Previous");
    let page_label = gtk::Label::new(None);
    let next_btn = gtk::Button::with_label("Next");
    let spacer = gtk::Box::new(gtk::Orientation::Horizontal, 0);
    spacer.set_hexpand(true);
    let per_page = gtk::Label::new(Some("Per page"));
    let size_labels: Vec<String> = PageSize::ALLOWED.iter().map(|s| s.to_string()).collect();
    let size_strs: Vec<&str> = size_labels.iter().map(String::as_str).collect();
    let size_dropdown = gtk::DropDown::from_strings(&size_strs);
    let page_size = ctx.config.page_size();
    let initial = PageSize::ALLOWED.iter().position(|s| *s == page_size.get()).unwrap_or(1);
    size_dropdown.set_selected(initial as u32);
    pager.append(&prev_btn);
    pager.append(&page_label);
    pager.append(&next_btn);
    pager.append(&spacer);
    pager.append(&per_page);
    pager.append(&size_dropdown);
    content.append(&pager);

    overlay.set_child(Some(&content));

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk::Label::new(Some("Contact Dashboard"));
    header.set_title_widget(Some(&title));
    let add_btn = gtk::Button::with_label("+ Add Contact");
    add_btn.add_css_class("suggested-action");
    header.pack_start(&add_btn);
    let profile_btn = gtk::Button::with_label("User Details");
    header.pack_end(&profile_btn);
    let spinner = gtk::Spinner::new();
    header.pack_end(&spinner);
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));

    let screen = Rc::new(ListScreen {
        app: app.clone(),
        ctx,
        session,
        window: window.clone(),
        overlay,
        model: RefCell::new(ContactList::new(page_size)),
        list,
        placeholder,
        summary,
        spinner,
        pager,
        prev_btn: prev_btn.clone(),
        next_btn: next_btn.clone(),
        page_label,
        size_dropdown: size_dropdown.clone(),
        syncing_size: Cell::new(false),
    });

    {
        let screen = screen.clone();
        search.connect_search_changed(move |entry| {
            screen
                .model
                .borrow_mut()
                .update(ListEvent::QueryChanged(entry.text().to_string()));
            screen.render();
        });
    }
    {
        let screen = screen.clone();
        prev_btn.connect_clicked(move |_| screen.step(-1));
    }
    {
        let screen = screen.clone();
        next_btn.connect_clicked(move |_| screen.step(1));
    }
    {
        let screen = screen.clone();
        size_dropdown.connect_selected_notify(move |dd| {
            if screen.syncing_size.get() {
                return;
            }
            let Some(size) = PageSize::ALLOWED.get(dd.selected() as usize).copied() else {
                return;
            };
            let ticket = screen.model.borrow_mut().request_page_size(size);
            match ticket {
                Ok(ticket) => screen.fetch(ticket),
                Err(err) => {
                    screen.sync_page_size();
                    screen.report(err);
                }
            }
        });
    }
    {
        let screen = screen.clone();
        add_btn.connect_clicked(move |_| screen.edit(None));
    }
    {
        let screen = screen.clone();
        profile_btn.connect_clicked(move |_| screen.open_profile());
    }

    window.present();
    screen.render();
    let ticket = screen.model.borrow_mut().begin_load(0, page_size);
    screen.fetch(ticket);
}

impl ListScreen {
    fn fetch(self: &Rc<Self>, ticket: LoadTicket) {
        self.spinner.set_spinning(true);
        let api = self.ctx.api.clone();
        let session = self.session.clone();
        let screen = self.clone();
        crate::runtime::run_async_to_main(
            async move { api.list_contacts(&session, ticket.request()).await },
            move |res| screen.loaded(ticket, res),
        );
    }

    /// Refetch the current page; steps back when it no longer exists.
    fn refetch(self: &Rc<Self>) {
        self.spinner.set_spinning(true);
        let ticket = self.model.borrow_mut().reload();
        let api = self.ctx.api.clone();
        let session = self.session.clone();
        let screen = self.clone();
        crate::runtime::run_async_to_main(
            async move { api.list_contacts(&session, ticket.request()).await },
            move |res| {
                let step = screen.model.borrow_mut().finish_reload(ticket, res);
                match step {
                    Ok(ReloadStep::StepBack(next)) => screen.fetch(next),
                    Ok(ReloadStep::Done(outcome)) => screen.settled(Ok(outcome)),
                    Err(err) => screen.settled(Err(err)),
                }
            },
        );
    }

    fn loaded(self: &Rc<Self>, ticket: LoadTicket, res: Result<Page>) {
        let outcome = self.model.borrow_mut().finish_load(ticket, res);
        self.settled(outcome);
    }

    fn settled(self: &Rc<Self>, outcome: Result<LoadOutcome>) {
        let still_loading = self.model.borrow().is_loading();
        self.spinner.set_spinning(still_loading);
        match outcome {
            Ok(LoadOutcome::Applied) => {
                self.sync_page_size();
                self.render();
            }
            Ok(LoadOutcome::Stale) => {}
            Err(err) => {
                self.sync_page_size();
                self.report(err);
            }
        }
    }

    /// Point the drop-down at the size of the page actually shown.
    fn sync_page_size(&self) {
        let size = self.model.borrow().page_size();
        let Some(index) = PageSize::ALLOWED.iter().position(|s| *s == size.get()) else {
            return;
        };
        if self.size_dropdown.selected() as usize != index {
            self.syncing_size.set(true);
            self.size_dropdown.set_selected(index as u32);
            self.syncing_size.set(false);
        }
    }

    fn report(self: &Rc<Self>, err: Error) {
        if err.requires_login() {
            crate::app::sign_out(&self.app, self.ctx.clone(), &self.window);
        } else {
            self.overlay.add_toast(adw::Toast::new(&err.to_string()));
        }
    }

    fn render(self: &Rc<Self>) {
        // Rows only; the placeholder is a child of the list too.
        while let Some(row) = self.list.row_at_index(0) {
            self.list.remove(&row);
        }
        let model = self.model.borrow();
        for contact in model.displayed() {
            let row = ContactRow::new(contact);
            let id = contact.id;
            {
                let screen = self.clone();
                row.edit_btn.connect_clicked(move |_| screen.edit(Some(id)));
            }
            {
                let screen = self.clone();
                row.delete_btn.connect_clicked(move |_| screen.confirm_delete(id));
            }
            self.list.append(&row.row);
        }
        self.placeholder.set_label(&model.empty_message().unwrap_or_default());

        match model.search_summary() {
            Some(text) => {
                self.summary.set_label(&text);
                self.summary.set_visible(true);
            }
            None => self.summary.set_visible(false),
        }

        match model.pagination() {
            Some(controls) => {
                self.pager.set_visible(true);
                self.page_label
                    .set_label(&format!("{} · {} contacts", controls.label(), controls.total_elements));
                self.prev_btn.set_sensitive(controls.has_previous);
                self.next_btn.set_sensitive(controls.has_next);
            }
            None => self.pager.set_visible(false),
        }
    }

    fn step(self: &Rc<Self>, delta: i64) {
        let target = i64::from(self.model.borrow().page().current_page) + delta;
        let Ok(target) = u32::try_from(target) else {
            return;
        };
        let ticket = self.model.borrow_mut().request_page(target);
        match ticket {
            Ok(ticket) => self.fetch(ticket),
            Err(err) => self.report(err),
        }
    }

    fn confirm_delete(self: &Rc<Self>, id: ContactId) {
        let pending = self.model.borrow().request_delete(id);
        let pending = match pending {
            Ok(p) => p,
            Err(err) => {
                self.report(err);
                return;
            }
        };

        let body = format!("Are you sure you want to delete {}?", pending.name());
        let dialog = adw::MessageDialog::new(Some(&self.window), Some("Delete contact?"), Some(&body));
        dialog.add_responses(&[("cancel", "Cancel"), ("delete", "Delete")]);
        dialog.set_response_appearance("delete", adw::ResponseAppearance::Destructive);
        dialog.set_default_response(Some("cancel"));
        dialog.set_close_response("cancel");

        let pending = RefCell::new(Some(pending));
        let screen = self.clone();
        dialog.connect_response(None, move |_, response| {
            if response != "delete" {
                return;
            }
            let taken = pending.borrow_mut().take();
            if let Some(p) = taken {
                screen.delete(p.confirm());
            }
        });
        dialog.present();
    }

    fn delete(self: &Rc<Self>, confirmed: ConfirmedDelete) {
        let api = self.ctx.api.clone();
        let session = self.session.clone();
        let screen = self.clone();
        crate::runtime::run_async_to_main(
            async move { api.delete_contact(&session, confirmed.id()).await },
            move |res| match res {
                Ok(()) => {
                    screen.overlay.add_toast(adw::Toast::new("Contact deleted successfully!"));
                    screen.refetch();
                }
                Err(err) => screen.report(err),
            },
        );
    }

    fn edit(self: &Rc<Self>, id: Option<ContactId>) {
        let on_saved: Rc<dyn Fn()> = {
            let screen = self.clone();
            Rc::new(move || screen.refetch())
        };
        let on_auth_lost: Rc<dyn Fn()> = {
            let screen = self.clone();
            Rc::new(move || screen.report(Error::Unauthenticated))
        };
        crate::ui::contact_editor::show_contact_editor(
            &self.window,
            self.ctx.api.clone(),
            self.session.clone(),
            id,
            on_saved,
            on_auth_lost,
        );
    }

    fn open_profile(self: &Rc<Self>) {
        let on_logout: Rc<dyn Fn()> = {
            let screen = self.clone();
            Rc::new(move || crate::app::sign_out(&screen.app, screen.ctx.clone(), &screen.window))
        };
        crate::ui::profile::show_profile_dialog(
            &self.window,
            self.ctx.api.clone(),
            self.session.clone(),
            on_logout,
        );
    }
}
