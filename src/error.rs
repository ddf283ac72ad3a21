use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

/// Errors raised while reading the vertex table or the index list.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),                              // Read failures on an already opened source
    #[error("vertex table is empty, expected a header row")]
    MissingHeader,
    #[error("malformed vertex row at line {line}: {reason}")]
    MalformedVertexRow { line: usize, reason: String },     // Fewer than 4 columns or a non-numeric coordinate
    #[error("malformed index token '{token}' at line {line}")]
    MalformedIndexToken { line: usize, token: String },     // Token that is not an integer
}

/// Errors raised while emitting a mesh.
#[derive(Error, Debug)]
pub enum WriterError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("invalid mesh data: {0}")]
    InvalidData(String),
    #[error("VTK error: {0}")]
    VtkError(String),
}

/// Errors surfaced by a whole conversion run.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("cannot open input file {path}: {source}")]
    InputNotFound { path: PathBuf, source: io::Error },
    #[error("cannot create output file {path}: {source}")]
    OutputCreate { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Write(#[from] WriterError),
}

impl ConvertError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ConvertError::InputNotFound { .. } | ConvertError::Parse(_) => ExitCode::from(1),
            ConvertError::OutputCreate { .. } | ConvertError::Write(_) => ExitCode::from(2),
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            ConvertError::InputNotFound { .. } => "Run from the directory holding the simulation output or pass --vertices/--indices.",
            ConvertError::OutputCreate { .. } => "Check write permissions or choose another --output path.",
            ConvertError::Parse(ParseError::MalformedVertexRow { .. }) => "Each data row needs id,x,y,z,w with numeric x, y and z.",
            ConvertError::Parse(ParseError::MalformedIndexToken { .. }) => "The index list must only contain integers separated by whitespace.",
            ConvertError::Parse(_) => "Verify the input files are readable text.",
            ConvertError::Write(_) => "Ensure the output location is writable and has free space.",
        }
    }
}

/// Errors raised while loading the TOML configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("precision must be between 0 and {max}, got {value}")]
    InvalidPrecision { value: usize, max: usize },
}

impl ConfigError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(1)
    }
}
