pub mod client;
mod documents;
mod portfolio;
mod preferences;
pub mod single_flight;
pub mod token;
pub mod transport;
pub mod types;
mod users;

pub use client::*;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
