mod model;
mod ui;

pub mod app;
