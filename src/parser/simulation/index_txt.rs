use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::database::*;                     // Import mesh data structures from database module
use crate::error::*;                        // Import error types from error module

pub struct IndexListParser;  // Parser for the triangle index list (integers separated by whitespace or newlines)

impl IndexListParser {
    /// Parse an index list from disk
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<i64>, ParseError> {
        let path = path.as_ref();
        debug!("reading index list {}", path.display());
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /// Parse every token of the index list into memory
    pub fn parse<R: BufRead>(reader: R) -> Result<Vec<i64>, ParseError> {
        Self::tokens(reader).collect()
    }

    /// Lazily iterate over the integer tokens, one line is buffered at a time
    pub fn tokens<R: BufRead>(reader: R) -> IndexTokens<R> {
        IndexTokens {
            reader,
            line: String::new(),
            line_number: 0,
            pending: Vec::new().into_iter(),
        }
    }
}

/// Streaming iterator over the integers of an index list.
pub struct IndexTokens<R> {
    reader: R,
    line: String,
    line_number: usize,
    pending: std::vec::IntoIter<String>,    // Tokens of the current line not yet handed out
}

impl<R: BufRead> Iterator for IndexTokens<R> {
    type Item = Result<i64, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.next() {
                let line = self.line_number;
                return Some(
                    token
                        .parse::<i64>()
                        .map_err(|_| ParseError::MalformedIndexToken { line, token }),
                );
            }

            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_number += 1;
            self.pending = self
                .line
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
                .into_iter();
        }
    }
}

/// Groups a flat index stream into consecutive, non-overlapping triangles.
#[derive(Debug, Default)]
pub struct FaceAssembler {
    pending: [i64; 3],
    len: usize,
}

impl FaceAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one index; a face is returned every third call.
    pub fn push(&mut self, index: i64) -> Option<Face> {
        self.pending[self.len] = index;
        self.len += 1;

        if self.len == 3 {
            self.len = 0;
            Some(Face { indices: self.pending })
        } else {
            None
        }
    }

    /// Number of trailing indices that never completed a face.
    pub fn finish(self) -> usize {
        self.len
    }
}

/// Slice form of [`FaceAssembler`]: returns the faces and the count of dropped trailing indices.
pub fn faces_from_indices(indices: &[i64]) -> (Vec<Face>, usize) {
    let chunks = indices.chunks_exact(3);
    let dropped = chunks.remainder().len();
    let faces = chunks.map(|c| Face::new(c[0], c[1], c[2])).collect();
    (faces, dropped)
}
