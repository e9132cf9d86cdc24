//! FRP-concrete bond strength prediction.
//!
//! Loads a pre-fitted scaler and regression model, and applies them either
//! to one specimen entered in a form or to every row of a spreadsheet.
//! The egui front end lives in the binary; everything here is UI-free.

pub mod batch;
pub mod config;
pub mod data;
pub mod features;
pub mod i18n;
pub mod logging;
pub mod model;
pub mod pipeline;
