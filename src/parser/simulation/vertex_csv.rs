use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::database::*;                     // Import mesh data structures from database module
use crate::error::*;                        // Import error types from error module

const MIN_COLUMNS: usize = 4;               // id, x, y, z
const AXES: [&str; 3] = ["x", "y", "z"];

pub struct VertexCsvParser;  // Parser for the comma separated vertex table (header row, then id,x,y,z,w rows)

impl VertexCsvParser {
    /// Parse a vertex table from disk
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vertex>, ParseError> {
        let path = path.as_ref();
        debug!("reading vertex table {}", path.display());
        let file = File::open(path)?;                // Open the file, ? propagates the io::Error
        Self::parse(BufReader::new(file))           // Buffered reader for line-by-line processing
    }

    /// Parse every data row of the vertex table into memory
    pub fn parse<R: BufRead>(reader: R) -> Result<Vec<Vertex>, ParseError> {
        Self::rows(reader).collect()                // Stops at the first malformed row
    }

    /// Lazily iterate over the data rows; the header row is consumed on the first call to `next`
    pub fn rows<R: BufRead>(reader: R) -> VertexRows<R> {
        VertexRows {
            reader,
            line: String::new(),
            line_number: 0,
            header_seen: false,
        }
    }

    /// Parse one data row. `line_number` is 1-based and only used for error reporting.
    pub fn parse_record(record: &str, line_number: usize) -> Result<Vertex, ParseError> {
        let fields = Self::split_record(record);    // Column 0 is the identifier, columns beyond 3 are ignored

        if fields.len() < MIN_COLUMNS {
            return Err(ParseError::MalformedVertexRow {
                line: line_number,
                reason: format!("expected at least {} columns, found {}", MIN_COLUMNS, fields.len()),
            });
        }

        let mut coordinates = [0.0f64; 3];
        for (axis, (value, field)) in coordinates.iter_mut().zip(&fields[1..MIN_COLUMNS]).enumerate() {
            *value = field.trim().parse::<f64>().map_err(|_| ParseError::MalformedVertexRow {
                line: line_number,
                reason: format!("{} coordinate '{}' is not a number", AXES[axis], field.trim()),
            })?;
        }

        Ok(Vertex::new(coordinates[0], coordinates[1], coordinates[2]))
    }

    /// Split a single CSV record into fields.
    /// A field starting with `"` runs to the closing quote, `""` inside it is a literal quote.
    fn split_record(record: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut chars = record.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes => {
                    if chars.peek() == Some(&'"') {
                        field.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                }
                '"' if field.is_empty() => in_quotes = true,
                ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
        fields.push(field);

        fields
    }
}

/// Streaming iterator over the data rows of a vertex table.
pub struct VertexRows<R> {
    reader: R,
    line: String,               // Reused line buffer
    line_number: usize,         // 1-based number of the last line read
    header_seen: bool,
}

impl<R: BufRead> Iterator for VertexRows<R> {
    type Item = Result<Vertex, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    if !self.header_seen {                      // Not even a header row
                        self.header_seen = true;
                        return Some(Err(ParseError::MissingHeader));
                    }
                    return None;
                }
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_number += 1;

            if !self.header_seen {                              // Header content is not inspected
                self.header_seen = true;
                continue;
            }

            let record = self.line.trim_end_matches(&['\n', '\r'][..]);
            return Some(VertexCsvParser::parse_record(record, self.line_number));
        }
    }
}
