use vtkio::model::*; // import model definition of a VTK file

use std::fs;
use std::path::Path;

use log::debug;

use crate::database::*;
use crate::error::WriterError;

pub struct VTUWriter;  // Writes a triangle mesh as a VTK XML unstructured grid (.vtu)

impl VTUWriter {

    pub fn write_vtu<P: AsRef<Path>>(
        mesh_data: &MeshData,
        output_path: P,
    ) -> Result<(), WriterError> {

        let mut vtu = Vec::new();  // XML is rendered in memory first, then written in one go

        // 1. Prepare points data
        let points_data: Vec<f64> = mesh_data
            .vertices
            .iter()
            .flat_map(|vertex| vertex.coordinates())
            .collect();

        // 2. Connectivity: OBJ indices are 1-based, VTK wants 0-based
        let connectivity = Self::connectivity(mesh_data)?;
        let offsets: Vec<u64> = (1..=mesh_data.faces.len() as u64).map(|i| i * 3).collect();
        let cell_types = vec![CellType::Triangle; mesh_data.faces.len()];

        debug!(
            "VTU piece: {} points, {} triangle cells",
            mesh_data.vertices.len(),
            cell_types.len()
        );

        Vtk {
            version: Version { major: 2, minor: 2 },
            title: mesh_data.object_name.clone(),
            byte_order: ByteOrder::LittleEndian,
            file_path: None,
            data: DataSet::inline(UnstructuredGridPiece {
                points: IOBuffer::F64(points_data),
                cells: Cells {
                    cell_verts: VertexNumbers::XML {
                        connectivity,
                        offsets,
                    },
                    types: cell_types,
                },
                data: Attributes {
                    ..Default::default()
                },
            }),
        }
        .write_xml(&mut vtu)
        .map_err(|e| WriterError::VtkError(format!("{:?}", e)))?;

        // Write the vector to file
        fs::write(output_path, &vtu)?;

        Ok(())
    }

    /// Flattened 0-based connectivity; every index must name an existing vertex.
    fn connectivity(mesh_data: &MeshData) -> Result<Vec<u64>, WriterError> {
        let num_vertices = mesh_data.vertices.len() as i64;
        let mut connectivity = Vec::with_capacity(mesh_data.faces.len() * 3);

        for (face_number, face) in mesh_data.faces.iter().enumerate() {
            for &index in &face.indices {
                if index < 1 || index > num_vertices {
                    return Err(WriterError::InvalidData(format!(
                        "face {} references vertex {} but the mesh has {} vertices",
                        face_number + 1,
                        index,
                        num_vertices
                    )));
                }
                connectivity.push((index - 1) as u64);
            }
        }

        Ok(connectivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        let mut mesh = MeshData::new("Flag");
        mesh.vertices.push(Vertex::new(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::new(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::new(0.0, 1.0, 0.0));
        mesh.faces.push(Face::new(1, 2, 3));
        mesh
    }

    #[test]
    fn test_connectivity_is_zero_based() {
        let mut mesh = triangle();
        mesh.faces.push(Face::new(3, 1, 2));

        let connectivity = VTUWriter::connectivity(&mesh).unwrap();
        assert_eq!(connectivity, vec![0, 1, 2, 2, 0, 1]);
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let mut mesh = triangle();
        mesh.faces.push(Face::new(1, 2, 4));
        assert!(matches!(VTUWriter::connectivity(&mesh), Err(WriterError::InvalidData(_))));

        let mut mesh = triangle();
        mesh.faces.push(Face::new(0, 1, 2));
        assert!(matches!(VTUWriter::connectivity(&mesh), Err(WriterError::InvalidData(_))));
    }

    #[test]
    fn test_write_vtu_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.vtu");

        VTUWriter::write_vtu(&triangle(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("UnstructuredGrid"));
        assert!(content.contains("NumberOfPoints=\"3\""));
        assert!(content.contains("NumberOfCells=\"1\""));
    }
}
