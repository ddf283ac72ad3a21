// Command line entry point: resolve settings, set up logging, run the conversion.
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{debug, error, info};

use sim2obj::config::{ConverterConfig, LogLevel, OutputFormat};
use sim2obj::converter;
use sim2obj::error::ConfigError;

/// Every flag is optional; with none given the fixed file names in the working directory are used.
#[derive(Parser, Debug)]
#[command(
    name = "sim2obj",
    version,
    about = "Convert a simulation vertex table and index list into an OBJ mesh"
)]
struct CliArgs {
    /// Vertex table (CSV: header row, then id,x,y,z,w rows).
    #[arg(long, value_name = "FILE")]
    vertices: Option<PathBuf>,
    /// Index list (integers, three per triangle).
    #[arg(long, value_name = "FILE")]
    indices: Option<PathBuf>,
    /// Mesh file to create or overwrite.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Path to TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Output mesh format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Log verbosity level.
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

fn main() -> ExitCode {
    let start = Instant::now();
    let cli = CliArgs::parse();                                 // clap prints usage and exits on bad flags

    let mut config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);                        // Logger is not up yet
            return err.exit_code();
        }
    };

    init_logger(&resolve_log_level(&cli, &config));

    for override_entry in apply_overrides(&mut config, &cli) {
        debug!("CLI override: {}", override_entry);
    }

    info!("Vertices: {}", config.vertices.display());
    info!("Indices: {}", config.indices.display());
    info!("Output: {} ({:?})", config.output_path().display(), config.format);

    match converter::run(&config) {
        Ok(summary) => {
            info!(
                "Wrote {} vertices and {} faces in {} ms",
                summary.vertex_count,
                summary.face_count,
                start.elapsed().as_millis()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Conversion failed: {}", err);
            error!("Suggestion: {}", err.suggestion());
            err.exit_code()
        }
    }
}

fn load_config(cli: &CliArgs) -> Result<ConverterConfig, ConfigError> {
    match &cli.config {
        Some(path) => ConverterConfig::load(path),
        None => Ok(ConverterConfig::default()),
    }
}

fn resolve_log_level(cli: &CliArgs, config: &ConverterConfig) -> String {
    if let Some(level) = cli.log_level {
        return level.as_str().to_string();
    }

    if let Ok(level) = std::env::var("RUST_LOG") {
        if !level.trim().is_empty() {
            return level;
        }
    }

    if let Some(level) = config.log_level {
        return level.as_str().to_string();
    }

    "info".to_string()
}

fn init_logger(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.target(env_logger::Target::Stderr);                 // stdout stays free for the user
    builder.filter_level(log::LevelFilter::Info);
    builder.parse_filters(level);
    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(buf, "{} [{}] {}", buf.timestamp_millis(), record.level(), record.args())
    });

    if let Err(err) = builder.try_init() {
        eprintln!("Failed to initialize logger: {}", err);
    }
}

/// Apply CLI flags on top of the loaded config; returns a description of each change.
fn apply_overrides(config: &mut ConverterConfig, cli: &CliArgs) -> Vec<String> {
    let mut overrides = Vec::new();

    if let Some(vertices) = cli.vertices.clone() {
        overrides.push(format!("vertices = {}", vertices.display()));
        config.vertices = vertices;
    }

    if let Some(indices) = cli.indices.clone() {
        overrides.push(format!("indices = {}", indices.display()));
        config.indices = indices;
    }

    if let Some(output) = cli.output.clone() {
        overrides.push(format!("output = {}", output.display()));
        config.output = output;
    }

    if let Some(format) = cli.format {
        if config.format != format {
            overrides.push(format!("format = {:?}", format));
        }
        config.format = format;
    }

    overrides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_defaults() {
        let cli = CliArgs::parse_from(["sim2obj"]);
        let mut config = ConverterConfig::default();

        assert!(apply_overrides(&mut config, &cli).is_empty());
        assert_eq!(config, ConverterConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = CliArgs::parse_from([
            "sim2obj",
            "--vertices",
            "v.csv",
            "--output",
            "mesh.vtu",
            "--format",
            "vtu",
            "--log-level",
            "debug",
        ]);
        let mut config = ConverterConfig::default();
        let overrides = apply_overrides(&mut config, &cli);

        assert_eq!(overrides.len(), 3);
        assert_eq!(config.vertices, PathBuf::from("v.csv"));
        assert_eq!(config.indices, PathBuf::from("OutputIndices.txt"));
        assert_eq!(config.output, PathBuf::from("mesh.vtu"));
        assert_eq!(config.format, OutputFormat::Vtu);
        assert_eq!(resolve_log_level(&cli, &config), "debug");
    }
}
