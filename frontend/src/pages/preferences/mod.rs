pub mod repository;
pub mod view_model;

mod panel;

pub use panel::PreferencesPage;
