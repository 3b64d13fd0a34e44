use std::cell::RefCell;
use std::rc::Rc;

use adw::prelude::*;
use contact_manager::forms::{RegistrationEvent, RegistrationForm};
use contact_manager::Error;
use gtk4 as gtk;

use crate::app::AppContext;

fn field(placeholder: &str, secret: bool) -> gtk::Widget {
    if secret {
        let entry = gtk::PasswordEntry::new();
        entry.set_placeholder_text(Some(placeholder));
        entry.set_show_peek_icon(true);
        entry.upcast()
    } else {
        let entry = gtk::Entry::new();
        entry.set_placeholder_text(Some(placeholder));
        entry.upcast()
    }
}

pub fn show_register_dialog(
    parent: &adw::ApplicationWindow,
    ctx: Rc<AppContext>,
    login_overlay: adw::ToastOverlay,
) {
    let dialog = gtk::Window::builder()
        .title("Create Account")
        .transient_for(parent)
        .modal(true)
        .default_width(380)
        .build();

    let content = gtk::Box::new(gtk::Orientation::Vertical, 8);
    content.set_margin_top(18);
    content.set_margin_bottom(18);
    content.set_margin_start(18);
    content.set_margin_end(18);

    let form = Rc::new(RefCell::new(RegistrationForm::default()));
    let inputs: [(&str, bool, fn(String) -> RegistrationEvent); 4] = [
        ("Enter your full name", false, RegistrationEvent::NameChanged),
        ("Enter your email", false, RegistrationEvent::EmailChanged),
        ("Enter password (min 6 chars)", true, RegistrationEvent::PasswordChanged),
        ("Confirm your password", true, RegistrationEvent::ConfirmChanged),
    ];
    for (placeholder, secret, event) in inputs {
        let widget = field(placeholder, secret);
        if let Some(editable) = widget.dynamic_cast_ref::<gtk::Editable>() {
            let form = form.clone();
            editable.connect_changed(move |e| form.borrow_mut().update(event(e.text().to_string())));
        }
        content.append(&widget);
    }

    let status = gtk::Label::new(None);
    status.add_css_class("error");
    status.set_wrap(true);
    status.set_halign(gtk::Align::Start);
    content.append(&status);

    let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    buttons.set_halign(gtk::Align::End);
    let cancel_btn = gtk::Button::with_label("Back to Login");
    let submit_btn = gtk::Button::with_label("Sign Up");
    submit_btn.add_css_class("suggested-action");
    buttons.append(&cancel_btn);
    buttons.append(&submit_btn);
    content.append(&buttons);
    dialog.set_child(Some(&content));

    {
        let dialog = dialog.clone();
        cancel_btn.connect_clicked(move |_| dialog.close());
    }
    {
        let dialog = dialog.clone();
        submit_btn.connect_clicked(move |btn| {
            let registration = match form.borrow().submit() {
                Ok(r) => r,
                Err(e) => {
                    status.set_label(&e.to_string());
                    return;
                }
            };
            btn.set_sensitive(false);
            btn.set_label("Creating Account...");

            let api = ctx.api.clone();
            let dialog = dialog.clone();
            let status = status.clone();
            let btn = btn.clone();
            let overlay = login_overlay.clone();
            crate::runtime::run_async_to_main(
                async move { api.register(&registration).await },
                move |res| {
                    btn.set_sensitive(true);
                    btn.set_label("Sign Up");
                    match res {
                        Ok(profile) => {
                            log::info!("Registered {}", profile.email);
                            overlay.add_toast(adw::Toast::new("Registration successful! Please log in."));
                            dialog.close();
                        }
                        Err(Error::ServerRejected { status: 409, .. }) => {
                            status.set_label("Email already exists! Please use a different email.");
                        }
                        Err(err) => status.set_label(&format!("Registration failed: {err}")),
                    }
                },
            );
        });
    }

    dialog.present();
}
