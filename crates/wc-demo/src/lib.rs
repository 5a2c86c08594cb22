#![forbid(unsafe_code)]

//! Simulated host page for shadow widgets.

pub mod cli;
pub mod error;
pub mod page;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{DemoError, Result};
pub use page::{PageReport, PageScript, render_report, run_page};
