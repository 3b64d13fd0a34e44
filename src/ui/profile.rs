use std::cell::RefCell;
use std::rc::Rc;

use adw::prelude::*;
use contact_manager::api::client::ApiClient;
use contact_manager::forms::{PasswordEvent, PasswordForm, ProfileForm};
use contact_manager::session::Session;
use gtk4 as gtk;

fn info_row(label: &str) -> (gtk::Box, gtk::Label) {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    let key = gtk::Label::new(Some(label));
    key.add_css_class("dim-label");
    let value = gtk::Label::new(None);
    value.set_halign(gtk::Align::Start);
    value.set_selectable(true);
    row.append(&key);
    row.append(&value);
    (row, value)
}

/// Account information with rename, password change and logout.
pub fn show_profile_dialog(
    parent: &adw::ApplicationWindow,
    api: ApiClient,
    session: Session,
    on_logout: Rc<dyn Fn()>,
) {
    let dialog = gtk::Window::builder()
        .title("User Profile")
        .transient_for(parent)
        .modal(true)
        .default_width(420)
        .build();

    let overlay = adw::ToastOverlay::new();
    let content = gtk::Box::new(gtk::Orientation::Vertical, 10);
    content.set_margin_top(18);
    content.set_margin_bottom(18);
    content.set_margin_start(18);
    content.set_margin_end(18);

    let heading = gtk::Label::new(Some("Account Information"));
    heading.add_css_class("title-4");
    heading.set_halign(gtk::Align::Start);
    content.append(&heading);

    let (email_row, email_value) = info_row("Email:");
    email_value.set_label(&session.user.email);
    content.append(&email_row);

    let name_entry = gtk::Entry::new();
    name_entry.set_placeholder_text(Some("Name"));
    name_entry.set_text(&session.user.name);
    let save_name = gtk::Button::with_label("Update Profile");
    let name_line = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    name_entry.set_hexpand(true);
    name_line.append(&name_entry);
    name_line.append(&save_name);
    content.append(&name_line);

    let pw_heading = gtk::Label::new(Some("Change Password"));
    pw_heading.add_css_class("heading");
    pw_heading.set_halign(gtk::Align::Start);
    content.append(&pw_heading);

    let password_form = Rc::new(RefCell::new(PasswordForm::default()));
    let pw_inputs: [(&str, fn(String) -> PasswordEvent); 3] = [
        ("Current password", PasswordEvent::CurrentChanged),
        ("New password (min 6 chars)", PasswordEvent::NewChanged),
        ("Confirm new password", PasswordEvent::ConfirmChanged),
    ];
    let mut pw_entries = Vec::new();
    for (placeholder, event) in pw_inputs {
        let entry = gtk::PasswordEntry::new();
        entry.set_placeholder_text(Some(placeholder));
        let form = password_form.clone();
        entry.connect_changed(move |e| form.borrow_mut().update(event(e.text().to_string())));
        content.append(&entry);
        pw_entries.push(entry);
    }
    let change_pw = gtk::Button::with_label("Change Password");
    change_pw.set_halign(gtk::Align::End);
    content.append(&change_pw);

    let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    buttons.set_halign(gtk::Align::End);
    let logout_btn = gtk::Button::with_label("Logout");
    logout_btn.add_css_class("destructive-action");
    let close_btn = gtk::Button::with_label("Back to Dashboard");
    buttons.append(&logout_btn);
    buttons.append(&close_btn);
    content.append(&buttons);

    overlay.set_child(Some(&content));
    dialog.set_child(Some(&overlay));

    let report = {
        let overlay = overlay.clone();
        let dialog = dialog.clone();
        let on_logout = on_logout.clone();
        Rc::new(move |err: contact_manager::Error| {
            if err.requires_login() {
                dialog.close();
                (on_logout)();
            } else {
                overlay.add_toast(adw::Toast::new(&err.to_string()));
            }
        })
    };

    {
        let api = api.clone();
        let session = session.clone();
        let name_entry = name_entry.clone();
        let email_value = email_value.clone();
        let report = report.clone();
        crate::runtime::run_async_to_main(
            async move { api.profile(&session).await },
            move |res| match res {
                Ok(profile) => {
                    email_value.set_label(&profile.email);
                    name_entry.set_text(&ProfileForm::from_profile(&profile).name);
                }
                Err(err) => (report)(err),
            },
        );
    }
    {
        let api = api.clone();
        let session = session.clone();
        let overlay = overlay.clone();
        let report = report.clone();
        save_name.connect_clicked(move |_| {
            let mut form = ProfileForm::default();
            form.set_name(name_entry.text().to_string());
            let name = match form.submit() {
                Ok(name) => name,
                Err(e) => {
                    overlay.add_toast(adw::Toast::new(&e.to_string()));
                    return;
                }
            };
            let api = api.clone();
            let session = session.clone();
            let overlay = overlay.clone();
            let report = report.clone();
            crate::runtime::run_async_to_main(
                async move { api.update_profile(&session, &name).await },
                move |res| match res {
                    Ok(profile) => {
                        overlay.add_toast(adw::Toast::new(&format!("Name changed to {}", profile.name)))
                    }
                    Err(err) => (report)(err),
                },
            );
        });
    }
    {
        let overlay = overlay.clone();
        change_pw.connect_clicked(move |_| {
            let change = match password_form.borrow().submit() {
                Ok(c) => c,
                Err(e) => {
                    overlay.add_toast(adw::Toast::new(&e.to_string()));
                    return;
                }
            };
            let api = api.clone();
            let session = session.clone();
            let overlay = overlay.clone();
            let report = report.clone();
            let entries = pw_entries.clone();
            crate::runtime::run_async_to_main(
                async move { api.change_password(&session, &change).await },
                move |res| match res {
                    Ok(()) => {
                        for entry in &entries {
                            entry.set_text("");
                        }
                        overlay.add_toast(adw::Toast::new("Password changed successfully"));
                    }
                    Err(err) => (report)(err),
                },
            );
        });
    }
    {
        let dialog = dialog.clone();
        logout_btn.connect_clicked(move |_| {
            dialog.close();
            (on_logout)();
        });
    }
    {
        let dialog = dialog.clone();
        close_btn.connect_clicked(move |_| dialog.close());
    }

    dialog.present();
}
