// src/lib.rs

// Top-level modules (each has its own mod.rs or file):
pub mod error;
pub mod database;
pub mod parser;
pub mod writer;
pub mod converter;
pub mod config;

pub use config::{ConverterConfig, OutputFormat};
pub use converter::{ConvertPaths, MeshConverter};
pub use database::{ConversionSummary, Face, MeshData, Vertex};
pub use error::{ConfigError, ConvertError, ParseError, WriterError};
