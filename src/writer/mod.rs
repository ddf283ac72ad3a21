pub mod obj_writer;         // Wavefront OBJ output
pub mod xml_writer;         // VTK XML unstructured grid output
