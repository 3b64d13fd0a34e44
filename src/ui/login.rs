use std::cell::RefCell;
use std::rc::Rc;

use adw::prelude::*;
use adw::Application;
use contact_manager::forms::{LoginEvent, LoginForm};
use contact_manager::Error;
use gtk4 as gtk;

use crate::app::AppContext;

pub fn show_login_window(app: &Application, ctx: Rc<AppContext>) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Contact Manager Login")
        .default_width(420)
        .default_height(300)
        .resizable(false)
        .build();

    let toast_overlay = adw::ToastOverlay::new();

    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);

    let title = gtk::Label::new(Some("Login"));
    title.add_css_class("title-2");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    let email_entry = gtk::Entry::new();
    email_entry.set_placeholder_text(Some("Enter your email"));
    email_entry.set_hexpand(true);

    let pass_entry = gtk::PasswordEntry::new();
    pass_entry.set_placeholder_text(Some("Enter your password"));
    pass_entry.set_show_peek_icon(true);
    pass_entry.set_hexpand(true);

    let form_box = gtk::Box::new(gtk::Orientation::Vertical, 8);
    form_box.append(&email_entry);
    form_box.append(&pass_entry);
    root.append(&form_box);

    let status = gtk::Label::new(None);
    status.add_css_class("dim-label");
    status.set_halign(gtk::Align::Start);
    root.append(&status);

    let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    buttons.set_halign(gtk::Align::End);
    let register_btn = gtk::Button::with_label("Create Account");
    let login_btn = gtk::Button::with_label("Login");
    login_btn.add_css_class("suggested-action");
    buttons.append(&register_btn);
    buttons.append(&login_btn);
    root.append(&buttons);

    toast_overlay.set_child(Some(&root));
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let header_title = gtk::Label::new(Some("Contact Manager"));
    header.set_title_widget(Some(&header_title));
    container.append(&header);
    container.append(&toast_overlay);
    window.set_content(Some(&container));

    let form = Rc::new(RefCell::new(LoginForm::default()));
    {
        let form = form.clone();
        email_entry.connect_changed(move |e| {
            form.borrow_mut().update(LoginEvent::EmailChanged(e.text().to_string()));
        });
    }
    {
        let form = form.clone();
        pass_entry.connect_changed(move |e| {
            form.borrow_mut().update(LoginEvent::PasswordChanged(e.text().to_string()));
        });
    }

    let on_login = {
        let app = app.clone();
        let window = window.clone();
        let overlay = toast_overlay.clone();
        let status = status.clone();
        let login_btn = login_btn.clone();
        let ctx = ctx.clone();
        move || {
            let credentials = match form.borrow().submit() {
                Ok(c) => c,
                Err(e) => {
                    overlay.add_toast(adw::Toast::new(&e.to_string()));
                    return;
                }
            };

            status.set_label("Logging in…");
            login_btn.set_sensitive(false);

            let api = ctx.api.clone();
            let app = app.clone();
            let window = window.clone();
            let overlay = overlay.clone();
            let status = status.clone();
            let login_btn = login_btn.clone();
            let ctx = ctx.clone();
            crate::runtime::run_async_to_main(
                async move { api.login(&credentials).await },
                move |res| {
                    login_btn.set_sensitive(true);
                    match res {
                        Ok(session) => {
                            log::info!("Logged in as {}", session.user.email);
                            crate::app::signed_in(&app, ctx, session);
                            window.close();
                        }
                        Err(Error::Unauthenticated) => {
                            status.set_label("");
                            overlay.add_toast(adw::Toast::new("Invalid email or password"));
                        }
                        Err(err) => {
                            log::warn!("Login failed: {err}");
                            status.set_label("Login failed");
                            overlay.add_toast(adw::Toast::new(&format!("Error logging in: {err}")));
                        }
                    }
                },
            );
        }
    };

    let on_login: Rc<dyn Fn()> = Rc::new(on_login);
    {
        let on_login = on_login.clone();
        login_btn.connect_clicked(move |_| (on_login)());
    }
    {
        let on_login = on_login.clone();
        email_entry.connect_activate(move |_| (on_login)());
    }
    {
        let on_login = on_login.clone();
        pass_entry.connect_activate(move |_| (on_login)());
    }
    {
        let window = window.clone();
        let overlay = toast_overlay.clone();
        register_btn.connect_clicked(move |_| {
            crate::ui::register::show_register_dialog(&window, ctx.clone(), overlay.clone());
        });
    }

    window.present();
}
