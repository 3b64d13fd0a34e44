use std::cell::RefCell;
use std::rc::Rc;

use adw::prelude::*;
use contact_manager::api::client::ApiClient;
use contact_manager::api::models::ContactId;
use contact_manager::forms::{ContactEvent, ContactForm, RowField};
use contact_manager::session::Session;
use gtk4 as gtk;

#[derive(Clone, Copy)]
enum RowKind {
    Email,
    Phone,
}

impl RowKind {
    fn edited(self, index: usize, field: RowField, value: String) -> ContactEvent {
        match self {
            RowKind::Email => ContactEvent::EmailEdited(index, field, value),
            RowKind::Phone => ContactEvent::PhoneEdited(index, field, value),
        }
    }

    fn removed(self, index: usize) -> ContactEvent {
        match self {
            RowKind::Email => ContactEvent::EmailRemoved(index),
            RowKind::Phone => ContactEvent::PhoneRemoved(index),
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            RowKind::Email => "Email address",
            RowKind::Phone => "Phone number",
        }
    }
}

/// Add (`existing == None`) or edit a contact in a modal window.
pub fn show_contact_editor(
    parent: &adw::ApplicationWindow,
    api: ApiClient,
    session: Session,
    existing: Option<ContactId>,
    on_saved: Rc<dyn Fn()>,
    on_auth_lost: Rc<dyn Fn()>,
) {
    let dialog = gtk::Window::builder()
        .title(if existing.is_some() { "Edit Contact" } else { "Add Contact" })
        .transient_for(parent)
        .modal(true)
        .default_width(480)
        .default_height(560)
        .build();

    let content = gtk::Box::new(gtk::Orientation::Vertical, 8);
    content.set_margin_top(18);
    content.set_margin_bottom(18);
    content.set_margin_start(18);
    content.set_margin_end(18);

    let first_name = gtk::Entry::new();
    first_name.set_placeholder_text(Some("Enter first name"));
    let last_name = gtk::Entry::new();
    last_name.set_placeholder_text(Some("Enter last name"));
    let title = gtk::Entry::new();
    title.set_placeholder_text(Some("Enter title"));
    content.append(&first_name);
    content.append(&last_name);
    content.append(&title);

    let emails_box = gtk::Box::new(gtk::Orientation::Vertical, 6);
    let phones_box = gtk::Box::new(gtk::Orientation::Vertical, 6);
    let add_email = gtk::Button::with_label("+ Add Email");
    let add_phone = gtk::Button::with_label("+ Add Phone Number");
    for (heading, rows, button) in [("Emails", &emails_box, &add_email), ("Phone Numbers", &phones_box, &add_phone)] {
        let lbl = gtk::Label::new(Some(heading));
        lbl.add_css_class("heading");
        lbl.set_halign(gtk::Align::Start);
        content.append(&lbl);
        content.append(rows);
        button.set_halign(gtk::Align::Start);
        content.append(button);
    }

    let status = gtk::Label::new(None);
    status.add_css_class("error");
    status.set_wrap(true);
    status.set_halign(gtk::Align::Start);
    content.append(&status);

    let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    buttons.set_halign(gtk::Align::End);
    let cancel_btn = gtk::Button::with_label("Cancel");
    let save_btn = gtk::Button::with_label(if existing.is_some() { "Update Contact" } else { "Save Contact" });
    save_btn.add_css_class("suggested-action");
    buttons.append(&cancel_btn);
    buttons.append(&save_btn);
    content.append(&buttons);

    let scroller = gtk::ScrolledWindow::builder().vexpand(true).build();
    scroller.set_child(Some(&content));
    dialog.set_child(Some(&scroller));

    let form = Rc::new(RefCell::new(ContactForm::default()));
    let editor = Rc::new(Editor {
        form: form.clone(),
        first_name: first_name.clone(),
        last_name: last_name.clone(),
        title: title.clone(),
        emails_box,
        phones_box,
    });

    {
        let form = form.clone();
        first_name.connect_changed(move |e| {
            form.borrow_mut().update(ContactEvent::FirstNameChanged(e.text().to_string()))
        });
    }
    {
        let form = form.clone();
        last_name.connect_changed(move |e| {
            form.borrow_mut().update(ContactEvent::LastNameChanged(e.text().to_string()))
        });
    }
    {
        let form = form.clone();
        title.connect_changed(move |e| {
            form.borrow_mut().update(ContactEvent::TitleChanged(e.text().to_string()))
        });
    }
    {
        let editor = editor.clone();
        add_email.connect_clicked(move |_| {
            editor.form.borrow_mut().update(ContactEvent::EmailAdded);
            editor.render_rows();
        });
    }
    {
        let editor = editor.clone();
        add_phone.connect_clicked(move |_| {
            editor.form.borrow_mut().update(ContactEvent::PhoneAdded);
            editor.render_rows();
        });
    }
    {
        let dialog = dialog.clone();
        cancel_btn.connect_clicked(move |_| dialog.close());
    }
    {
        let dialog = dialog.clone();
        let status = status.clone();
        let api = api.clone();
        let session = session.clone();
        let on_auth_lost = on_auth_lost.clone();
        save_btn.connect_clicked(move |btn| {
            let draft = match form.borrow().submit() {
                Ok(d) => d,
                Err(e) => {
                    status.set_label(&e.to_string());
                    return;
                }
            };
            btn.set_sensitive(false);
            let api = api.clone();
            let session = session.clone();
            let dialog = dialog.clone();
            let status = status.clone();
            let btn = btn.clone();
            let on_saved = on_saved.clone();
            let on_auth_lost = on_auth_lost.clone();
            crate::runtime::run_async_to_main(
                async move {
                    match existing {
                        Some(id) => api.update_contact(&session, id, &draft).await,
                        None => api.create_contact(&session, &draft).await,
                    }
                },
                move |res| {
                    btn.set_sensitive(true);
                    match res {
                        Ok(contact) => {
                            log::info!("Saved contact {}", contact.id);
                            (on_saved)();
                            dialog.close();
                        }
                        Err(err) if err.requires_login() => {
                            dialog.close();
                            (on_auth_lost)();
                        }
                        Err(err) => status.set_label(&format!("Failed to save contact: {err}")),
                    }
                },
            );
        });
    }

    editor.render_rows();
    dialog.present();

    if let Some(id) = existing {
        save_btn.set_sensitive(false);
        status.set_label("Loading contact data...");
        let editor = editor.clone();
        crate::runtime::run_async_to_main(
            async move { api.get_contact(&session, id).await },
            move |res| match res {
                Ok(contact) => {
                    status.set_label("");
                    save_btn.set_sensitive(true);
                    editor.load(ContactForm::from_contact(&contact));
                }
                Err(err) if err.requires_login() => {
                    dialog.close();
                    (on_auth_lost)();
                }
                Err(err) => status.set_label(&format!("Failed to load contact data: {err}")),
            },
        );
    }
}

struct Editor {
    form: Rc<RefCell<ContactForm>>,
    first_name: gtk::Entry,
    last_name: gtk::Entry,
    title: gtk::Entry,
    emails_box: gtk::Box,
    phones_box: gtk::Box,
}

impl Editor {
    /// Replace the whole form, e.g. once the stored contact arrives.
    fn load(self: &Rc<Self>, loaded: ContactForm) {
        // Entry signals write back into the form, so set the text first.
        self.first_name.set_text(&loaded.first_name);
        self.last_name.set_text(&loaded.last_name);
        self.title.set_text(&loaded.title);
        *self.form.borrow_mut() = loaded;
        self.render_rows();
    }

    fn render_rows(self: &Rc<Self>) {
        self.render_kind(RowKind::Email, &self.emails_box);
        self.render_kind(RowKind::Phone, &self.phones_box);
    }

    fn render_kind(self: &Rc<Self>, kind: RowKind, container: &gtk::Box) {
        while let Some(child) = container.first_child() {
            container.remove(&child);
        }
        let rows = match kind {
            RowKind::Email => self.form.borrow().emails.clone(),
            RowKind::Phone => self.form.borrow().phone_numbers.clone(),
        };
        for (index, row) in rows.into_iter().enumerate() {
            let line = gtk::Box::new(gtk::Orientation::Horizontal, 6);
            let label = gtk::Entry::new();
            label.set_text(&row.label);
            label.set_placeholder_text(Some("Label"));
            label.set_width_chars(8);
            let value = gtk::Entry::new();
            value.set_text(&row.value);
            value.set_placeholder_text(Some(kind.placeholder()));
            value.set_hexpand(true);
            let remove = gtk::Button::with_label("Remove");

            {
                let form = self.form.clone();
                label.connect_changed(move |e| {
                    form.borrow_mut().update(kind.edited(index, RowField::Label, e.text().to_string()))
                });
            }
            {
                let form = self.form.clone();
                value.connect_changed(move |e| {
                    form.borrow_mut().update(kind.edited(index, RowField::Value, e.text().to_string()))
                });
            }
            {
                let editor = self.clone();
                remove.connect_clicked(move |_| {
                    editor.form.borrow_mut().update(kind.removed(index));
                    editor.render_rows();
                });
            }

            line.append(&label);
            line.append(&value);
            line.append(&remove);
            container.append(&line);
        }
    }
}
