/*!
# IO

Reading and writing the plain-text formats of this crate.

- **Graph text**: a `#`-comment header, the vertex count, then one `src dst cost` line per
  edge (see [`GraphTextReader`] / [`GraphTextWriter`]).
- **Find-merge text**: the number of elements, the number of merges, then one `(i,j)` line per
  merge (see [`FindMergeText`]).
- **Tree dump** (output only): a header carrying root and total cost, the vertex count, then one
  `vid parent cost` line per reached non-root vertex (see [`TreeDump`]).

Lines starting with the comment identifier and blank lines are skipped by all readers.
Malformed input is reported as an [`ErrorKind::InvalidData`] error; readers never panic.

## Traits

To generalize over reading/writing:
- [`GraphReader`] and [`GraphWriter`] are implemented by readers and writers for a specific format.
- [`GraphTextRead`], [`GraphTextWrite`], [`FindMergeText`] and [`TreeDump`] are shorthands on
  the types themselves using default settings.
*/

pub mod find_merge_text;
pub mod graph_text;
pub mod tree_dump;

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, ErrorKind, Lines, Result, Write},
    path::Path,
};

use crate::prelude::*;

pub use find_merge_text::*;
pub use graph_text::*;
pub use tree_dump::*;

/// Trait for types that can read graphs in a specific format.
///
/// This trait provides both a low-level method to read from any
/// [`BufRead`] instance and a convenience wrapper to read directly
/// from files.
pub trait GraphReader<G> {
    /// Reads a graph from the given reader according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the input is not a valid representation
    /// of a graph in the expected format.
    fn try_read_graph<R>(&self, reader: R) -> Result<G>
    where
        R: BufRead;

    /// Reads a graph from a file according to the settings in `self`.
    ///
    /// Internally wraps the file in a buffered reader.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if its contents
    /// are not a valid representation of a graph in the expected format.
    fn try_read_graph_file<P>(&self, path: P) -> Result<G>
    where
        P: AsRef<Path>,
    {
        self.try_read_graph(BufReader::new(File::open(path)?))
    }
}

/// Trait for types that can write graphs in a specific format.
///
/// This trait provides both a low-level method to write to any
/// [`Write`] instance and a convenience wrapper to write directly
/// to files.
pub trait GraphWriter<G> {
    /// Writes the given graph to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if writing fails (e.g., IO errors).
    fn try_write_graph<W>(&self, graph: &G, writer: W) -> Result<()>
    where
        W: Write;

    /// Writes the given graph to a file according to the settings in `self`.
    ///
    /// Internally wraps the file in a buffered writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or if writing fails.
    fn try_write_graph_file<P>(&self, graph: &G, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_graph(graph, &mut writer)?;
        writer.flush()
    }
}

/// Shorthand for creating a new IO-error
macro_rules! io_error {
    ($kind: expr, $info: expr) => {
        std::io::Error::new($kind, $info)
    };
}

/// Shorthand for returning `Err(std::io::Error)` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(io_error!($kind, $info));
        }
    };
}

/// Tries to parse the next value in an iterator and returns early if it fails
macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {{
        let Some(token) = $iterator.next() else {
            return Err(io_error!(
                ErrorKind::InvalidData,
                format!("Premature end of line when parsing {}.", $name)
            ));
        };

        match token.parse() {
            Ok(value) => value,
            Err(_) => {
                return Err(io_error!(
                    ErrorKind::InvalidData,
                    format!("Invalid value {token:?}. Cannot parse {}.", $name)
                ));
            }
        }
    }};
}

use io_error;
use parse_next_value;
use raise_error_unless;

/// Lines of a reader without comment lines and blank lines.
/// Every returned line carries its 1-based line number for error messages.
pub(crate) struct ContentLines<'a, R> {
    lines: Lines<R>,
    comment_identifier: &'a str,
    line_no: usize,
}

impl<'a, R: BufRead> ContentLines<'a, R> {
    pub(crate) fn new(reader: R, comment_identifier: &'a str) -> Self {
        Self {
            lines: reader.lines(),
            comment_identifier,
            line_no: 0,
        }
    }

    /// Returns the next content line if it exists or propagates an error
    pub(crate) fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(self.comment_identifier) {
                continue;
            }
            return Ok(Some((self.line_no, trimmed.to_string())));
        }
        Ok(None)
    }

    /// Same as [`ContentLines::next_line`] but a missing line is an error naming `what`
    pub(crate) fn expect_line(&mut self, what: &str) -> Result<(usize, String)> {
        self.next_line()?.ok_or_else(|| {
            io_error!(
                ErrorKind::InvalidData,
                format!("Premature end of input: {what} not found.")
            )
        })
    }
}
