pub mod vertex_csv;
pub mod index_txt;
