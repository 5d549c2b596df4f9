pub mod browser;
pub mod download;
pub mod lifetime;
pub mod object_url;
pub mod search;
pub mod size;
pub mod timer;
