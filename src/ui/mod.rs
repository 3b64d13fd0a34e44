pub mod contact_editor;
pub mod contact_row;
pub mod login;
pub mod main_window;
pub mod profile;
pub mod register;
