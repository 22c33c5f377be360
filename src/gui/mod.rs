mod app;
mod views;

pub use app::launch_gui;
