#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use,
    clippy::cast_precision_loss
)]

pub mod backend;
pub mod cli;
pub mod config;
pub mod engagement;
pub mod error;
pub mod intel;
pub mod persona;
pub mod prompt;

pub use config::Config;
pub use error::{LureError, Result};
