pub mod output;
pub mod setup;
pub mod ui;
