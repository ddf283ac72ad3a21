//! The conversion itself: vertex table + index list in, mesh text out.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::{self, ConverterConfig, OutputFormat};
use crate::database::*;
use crate::error::*;
use crate::parser::simulation::index_txt::{faces_from_indices, FaceAssembler, IndexListParser};
use crate::parser::simulation::vertex_csv::VertexCsvParser;
use crate::writer::obj_writer::ObjWriter;
use crate::writer::xml_writer::VTUWriter;

/// Locations of the two inputs and the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertPaths {
    pub vertices: PathBuf,
    pub indices: PathBuf,
    pub output: PathBuf,
}

impl Default for ConvertPaths {
    fn default() -> Self {
        ConvertPaths {
            vertices: PathBuf::from(config::DEFAULT_VERTICES_PATH),
            indices: PathBuf::from(config::DEFAULT_INDICES_PATH),
            output: PathBuf::from(config::DEFAULT_OUTPUT_PATH),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MeshConverter {
    object_name: String,
    precision: usize,
}

impl Default for MeshConverter {
    fn default() -> Self {
        MeshConverter::new(config::DEFAULT_OBJECT_NAME, config::DEFAULT_PRECISION)
    }
}

impl MeshConverter {
    pub fn new(object_name: impl Into<String>, precision: usize) -> Self {
        MeshConverter {
            object_name: object_name.into(),
            precision,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        MeshConverter::new(config.object_name.clone(), config.precision)
    }

    /// Stream an OBJ mesh into `output_sink`.
    ///
    /// The object line comes first, then one `v` line per data row of
    /// `vertex_source` (its first row is a header and is skipped), then one `f`
    /// line per complete triple of `index_source`. A trailing group of one or
    /// two indices is dropped and counted in the returned summary. Any parse
    /// or I/O failure aborts the conversion; lines already written stay in
    /// the sink.
    pub fn convert<V, I, W>(
        &self,
        vertex_source: V,
        index_source: I,
        output_sink: W,
    ) -> Result<ConversionSummary, ConvertError>
    where
        V: BufRead,
        I: BufRead,
        W: Write,
    {
        let mut writer = ObjWriter::new(output_sink, self.precision);
        let mut summary = ConversionSummary::default();

        writer.write_object(&self.object_name)?;

        for vertex in VertexCsvParser::rows(vertex_source) {
            writer.write_vertex(&vertex?)?;
            summary.vertex_count += 1;
        }

        let mut assembler = FaceAssembler::new();
        for index in IndexListParser::tokens(index_source) {
            if let Some(face) = assembler.push(index?) {
                writer.write_face(&face)?;
                summary.face_count += 1;
            }
        }
        summary.dropped_indices = assembler.finish();
        warn_dropped(summary.dropped_indices);

        writer.finish()?;

        Ok(summary)
    }

    /// Open both inputs, create the output and run [`MeshConverter::convert`].
    ///
    /// Inputs are opened before the output is created, so a missing input
    /// leaves an existing output untouched.
    pub fn convert_files(&self, paths: &ConvertPaths) -> Result<ConversionSummary, ConvertError> {
        let vertex_file = open_input(&paths.vertices)?;
        let index_file = open_input(&paths.indices)?;
        let output_file = File::create(&paths.output).map_err(|source| ConvertError::OutputCreate {
            path: paths.output.clone(),
            source,
        })?;
        debug!(
            "converting {} + {} -> {}",
            paths.vertices.display(),
            paths.indices.display(),
            paths.output.display()
        );

        self.convert(
            BufReader::new(vertex_file),
            BufReader::new(index_file),
            BufWriter::new(output_file),
        )
    }

    /// Read both inputs into memory. Returns the mesh and the number of dropped trailing indices.
    pub fn load_mesh(&self, vertex_path: &Path, index_path: &Path) -> Result<(MeshData, usize), ConvertError> {
        let vertices = VertexCsvParser::parse(BufReader::new(open_input(vertex_path)?))?;
        let indices = IndexListParser::parse(BufReader::new(open_input(index_path)?))?;
        let (faces, dropped) = faces_from_indices(&indices);
        debug!("loaded {} vertices, {} indices", vertices.len(), indices.len());

        Ok((
            MeshData {
                object_name: self.object_name.clone(),
                vertices,
                faces,
            },
            dropped,
        ))
    }

    /// Same inputs, written as a VTK XML unstructured grid of triangles.
    pub fn convert_to_vtu(&self, paths: &ConvertPaths) -> Result<ConversionSummary, ConvertError> {
        let (mesh, dropped) = self.load_mesh(&paths.vertices, &paths.indices)?;
        warn_dropped(dropped);

        VTUWriter::write_vtu(&mesh, &paths.output)?;

        Ok(ConversionSummary::from_mesh(&mesh, dropped))
    }
}

/// Run a conversion as described by `config`.
pub fn run(config: &ConverterConfig) -> Result<ConversionSummary, ConvertError> {
    let converter = MeshConverter::from_config(config);
    let paths = config.paths();

    match config.format {
        OutputFormat::Obj => converter.convert_files(&paths),
        OutputFormat::Vtu => converter.convert_to_vtu(&paths),
    }
}

fn open_input(path: &Path) -> Result<File, ConvertError> {
    File::open(path).map_err(|source| ConvertError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })
}

fn warn_dropped(dropped: usize) {
    if dropped > 0 {
        warn!(
            "index count is not a multiple of 3, dropping {} trailing index(es)",
            dropped
        );
    }
}
