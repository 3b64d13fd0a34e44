use std::rc::Rc;

use adw::prelude::*;
use adw::Application;
use contact_manager::api::client::ApiClient;
use contact_manager::config::AppConfig;
use contact_manager::session::{Session, SessionStore};
use log::{error, warn};

/// Everything the screens share. The session itself is passed to each screen explicitly.
pub struct AppContext {
    pub config: AppConfig,
    pub api: ApiClient,
    pub sessions: SessionStore,
}

impl AppContext {
    pub fn load() -> contact_manager::Result<Self> {
        let config = AppConfig::load().unwrap_or_else(|e| {
            warn!("Ignoring unreadable config: {e}");
            AppConfig::default()
        });
        let api = ApiClient::new(&config)?;
        let sessions = SessionStore::open_default()?;
        Ok(Self { config, api, sessions })
    }
}

pub fn build_ui(app: &Application) {
    let ctx = match AppContext::load() {
        Ok(ctx) => Rc::new(ctx),
        Err(e) => {
            error!("Cannot start: {e}");
            app.quit();
            return;
        }
    };
    match ctx.sessions.load() {
        Ok(Some(session)) => crate::ui::main_window::show_main_window(app, ctx, session),
        Ok(None) => crate::ui::login::show_login_window(app, ctx),
        Err(e) => {
            warn!("Discarding stored session: {e}");
            crate::ui::login::show_login_window(app, ctx);
        }
    }
}

pub fn signed_in(app: &Application, ctx: Rc<AppContext>, session: Session) {
    if let Err(e) = ctx.sessions.save(&session) {
        warn!("Failed to save session: {e}");
    }
    crate::ui::main_window::show_main_window(app, ctx, session);
}

/// Forget the session and go back to the login screen.
pub fn sign_out(app: &Application, ctx: Rc<AppContext>, window: &impl IsA<gtk4::Window>) {
    if let Err(e) = ctx.sessions.clear() {
        warn!("Failed to clear session: {e}");
    }
    crate::ui::login::show_login_window(app, ctx);
    window.close();
}
