pub mod extract;
pub mod health;
pub mod sessions;
pub mod ui;
