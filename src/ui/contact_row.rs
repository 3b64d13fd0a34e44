use gtk4 as gtk;
use gtk4::prelude::*;

use contact_manager::api::models::Contact;

/// One list entry: name and title, then phones and emails, with edit and delete buttons.
pub struct ContactRow {
    pub row: gtk::ListBoxRow,
    pub edit_btn: gtk::Button,
    pub delete_btn: gtk::Button,
}

fn detail(label: Option<&str>, fallback: &str, value: &str) -> gtk::Label {
    let text = format!("{}: {}", label.filter(|l| !l.is_empty()).unwrap_or(fallback), value);
    let lbl = gtk::Label::new(Some(&text));
    lbl.add_css_class("dim-label");
    lbl.set_halign(gtk::Align::Start);
    lbl.set_selectable(true);
    lbl
}

impl ContactRow {
    pub fn new(contact: &Contact) -> Self {
        let outer = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        outer.set_margin_top(8);
        outer.set_margin_bottom(8);
        outer.set_margin_start(8);
        outer.set_margin_end(8);

        let info = gtk::Box::new(gtk::Orientation::Vertical, 2);
        info.set_hexpand(true);
        let name = gtk::Label::new(Some(&contact.display_name()));
        name.add_css_class("heading");
        name.set_halign(gtk::Align::Start);
        info.append(&name);

        if contact.phone_numbers.is_empty() {
            info.append(&detail(None, "Phone", "none"));
        }
        for pn in &contact.phone_numbers {
            info.append(&detail(pn.label.as_deref(), "Phone", &pn.number));
        }
        if contact.emails.is_empty() {
            info.append(&detail(None, "Email", "none"));
        }
        for em in &contact.emails {
            info.append(&detail(em.label.as_deref(), "Email", &em.address));
        }
        outer.append(&info);

        let actions = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        actions.set_valign(gtk::Align::Center);
        let edit_btn = gtk::Button::with_label("Edit");
        let delete_btn = gtk::Button::with_label("Delete");
        delete_btn.add_css_class("destructive-action");
        actions.append(&edit_btn);
        actions.append(&delete_btn);
        outer.append(&actions);

        let row = gtk::ListBoxRow::new();
        row.set_activatable(false);
        row.set_child(Some(&outer));
        Self { row, edit_btn, delete_btn }
    }
}
