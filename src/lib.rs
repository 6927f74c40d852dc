pub mod api;
pub mod appsettings;
pub mod codec;
pub mod color;
pub mod dashboard;
pub mod events;
pub mod form;
pub mod interval;
pub mod list;
pub mod models;
pub mod timezone;
pub mod ui;
