//! Core module: tree model, builder, generators and the facade over them

pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod service;

pub use error::MindMapError;
pub use service::{GeneratedDocument, MindMapService};
