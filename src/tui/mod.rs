//! Terminal UI
//!
//! Login form, dashboard layout and theme switcher. Pure presentation: all
//! numbers come from [`crate::dashboard`], all data from [`crate::api`].

pub mod app;
pub mod ui;

pub use app::{App, Screen, Theme};
pub use ui::run;
