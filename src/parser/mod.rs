pub mod simulation;         // Vertex table and index list parsers
