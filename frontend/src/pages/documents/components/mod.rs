pub mod edit_form;
pub mod list;
pub mod preview;
pub mod thumbnail;
pub mod toolbar;
pub mod upload_form;
