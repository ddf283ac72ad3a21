// Mesh data model shared by the parsers, writers and the converter.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {                         // Defines a structure to represent a mesh vertex
    pub x: f64,                             // Position along x
    pub y: f64,                             // Position along y
    pub z: f64,                             // Position along z
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vertex { x, y, z }
    }

    pub fn coordinates(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Triangle referencing three vertices by their 1-based position in the vertex table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [i64; 3],                  // Vertex indices exactly as read from the index list
}

impl Face {
    pub fn new(a: i64, b: i64, c: i64) -> Self {
        Face { indices: [a, b, c] }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub object_name: String,                // Name written on the `o` line
    pub vertices: Vec<Vertex>,              // Vertices in input row order
    pub faces: Vec<Face>,                   // Faces in index list order
}

impl MeshData {
    pub fn new(object_name: impl Into<String>) -> Self {
        MeshData {
            object_name: object_name.into(),
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }
}

/// Counts reported back to the caller once a conversion has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub vertex_count: usize,                // Number of `v` lines written
    pub face_count: usize,                  // Number of `f` lines written
    pub dropped_indices: usize,             // Trailing indices that did not fill a triple (0, 1 or 2)
}

impl ConversionSummary {
    pub fn from_mesh(mesh: &MeshData, dropped_indices: usize) -> Self {
        ConversionSummary {
            vertex_count: mesh.num_vertices(),
            face_count: mesh.num_faces(),
            dropped_indices,
        }
    }
}
