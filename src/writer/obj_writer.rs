use std::fmt;
use std::io::Write;

use crate::database::*;
use crate::error::WriterError;

/// Line-oriented Wavefront OBJ emitter.
///
/// Coordinates are written in fixed-point notation with `precision` fractional
/// digits; face indices are written exactly as given.
pub struct ObjWriter<W: Write> {
    sink: W,
    precision: usize,
}

impl<W: Write> ObjWriter<W> {
    pub fn new(sink: W, precision: usize) -> Self {
        ObjWriter { sink, precision }
    }

    /// `o <name>`
    pub fn write_object(&mut self, name: &str) -> Result<(), WriterError> {
        writeln!(self.sink, "o {}", name)?;
        Ok(())
    }

    /// `v <x> <y> <z>`
    pub fn write_vertex(&mut self, vertex: &Vertex) -> Result<(), WriterError> {
        writeln!(
            self.sink,
            "v {} {} {}",
            Fixed(vertex.x, self.precision),
            Fixed(vertex.y, self.precision),
            Fixed(vertex.z, self.precision),
        )?;
        Ok(())
    }

    /// `f <a> <b> <c>`
    pub fn write_face(&mut self, face: &Face) -> Result<(), WriterError> {
        let [a, b, c] = face.indices;
        writeln!(self.sink, "f {} {} {}", a, b, c)?;
        Ok(())
    }

    /// Flush and hand the sink back.
    pub fn finish(mut self) -> Result<W, WriterError> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Fixed-point rendering of a coordinate. NaN is spelled `nan`, infinities `inf`/`-inf`.
struct Fixed(f64, usize);

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str("nan")
        } else {
            write!(f, "{:.*}", self.1, self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(mesh: &MeshData, precision: usize) -> String {
        let mut writer = ObjWriter::new(Vec::new(), precision);
        writer.write_object(&mesh.object_name).unwrap();
        for vertex in &mesh.vertices {
            writer.write_vertex(vertex).unwrap();
        }
        for face in &mesh.faces {
            writer.write_face(face).unwrap();
        }
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_vertex_line_has_six_decimals() {
        let mut mesh = MeshData::new("Flag");
        mesh.vertices.push(Vertex::new(1.0, 2.5, -3.25));

        assert_eq!(render(&mesh, 6), "o Flag\nv 1.000000 2.500000 -3.250000\n");
    }

    #[test]
    fn test_faces_follow_vertices() {
        let mut mesh = MeshData::new("Flag");
        mesh.vertices.push(Vertex::new(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::new(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::new(0.0, 1.0, 0.0));
        mesh.faces.push(Face::new(1, 2, 3));

        let text = render(&mesh, 6);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "o Flag");
        assert!(lines[1..4].iter().all(|l| l.starts_with("v ")));
        assert_eq!(lines[4], "f 1 2 3");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_large_and_tiny_values_stay_fixed_point() {
        let mut mesh = MeshData::new("Flag");
        mesh.vertices.push(Vertex::new(1.0e10, 1.0e-9, -0.0000004));

        let text = render(&mesh, 6);
        assert_eq!(text.lines().nth(1), Some("v 10000000000.000000 0.000000 -0.000000"));
        assert!(!text.contains('e'));
    }

    #[test]
    fn test_rounding_and_precision() {
        let mut mesh = MeshData::new("Part");
        mesh.vertices.push(Vertex::new(0.1234565, 2.0, 3.0));

        assert_eq!(render(&mesh, 2).lines().nth(1), Some("v 0.12 2.00 3.00"));
        assert_eq!(render(&mesh, 0).lines().nth(1), Some("v 0 2 3"));
    }

    #[test]
    fn test_non_finite_coordinates() {
        let mut mesh = MeshData::new("Flag");
        mesh.vertices.push(Vertex::new(f64::NAN, f64::INFINITY, f64::NEG_INFINITY));

        assert_eq!(render(&mesh, 6).lines().nth(1), Some("v nan inf -inf"));
    }
}
