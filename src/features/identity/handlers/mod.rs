mod login_handler;

pub use login_handler::{login_page, login_submit};
