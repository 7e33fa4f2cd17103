mod record_handler;

pub use record_handler::{export_table, show_table};
