//! Form logic: parameters, uploads, validation, results and the controller.

pub mod params;
pub mod upload;
pub mod validation;
pub mod config_validation;
pub mod result;
pub mod render;
pub mod notification;
pub mod controller;
pub mod csv_check;
pub mod error;
