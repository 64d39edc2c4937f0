//! UIコンポーネント

pub mod feedback_banner;
pub mod form_dialog;
pub mod header;
pub mod record_table;
pub mod resource_page;
pub mod settings_panel;
pub mod upload_area;
