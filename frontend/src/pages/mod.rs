pub mod documents;
pub mod login;
pub mod portfolio;
pub mod preferences;
pub mod users;

pub use documents::DocumentsPage;
pub use login::LoginPage;
pub use portfolio::PortfolioPage;
pub use preferences::PreferencesPage;
pub use users::UsersPage;
