pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod phone;
pub mod server;
pub mod service;

pub use error::SambazaError;
