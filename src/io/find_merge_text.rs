//! # Find-Merge Text Format
//!
//! ```text
//! # number of elements (at least 5)
//! 5
//! # number of merges (positive)
//! 2
//! (0,1)
//! (3, 4)
//! ```
//!
//! All lines are validated before the first merge is executed.

use tracing::debug;

use super::*;
use crate::algo::FindMerge;

/// Reads a single `(i,j)` pair; whitespace around the numbers is ignored
fn parse_pair(line: &str, line_no: usize, n: NumNodes) -> Result<(Node, Node)> {
    let pair = line
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .and_then(|inner| inner.split_once(','));
    let Some((first, second)) = pair else {
        return Err(io_error!(
            ErrorKind::InvalidData,
            format!("Line {line_no}: {line:?} should be (i,j)")
        ));
    };

    let mut parts = [first.trim(), second.trim()].into_iter();
    let u: Node = parse_next_value!(parts, "first element");
    let v: Node = parse_next_value!(parts, "second element");

    raise_error_unless!(
        u < n && v < n,
        ErrorKind::InvalidData,
        format!("Line {line_no}: ({u},{v}) out of range for {n} elements")
    );
    Ok((u, v))
}

/// Text input and output of [`FindMerge`]
pub trait FindMergeText: Sized {
    /// Reads the number of elements, the number of merges and all merge pairs, then executes
    /// the merges in order.
    ///
    /// # Errors
    /// Fails on fewer than [`FindMerge::MIN_NODES`] elements, a merge count of zero, a count
    /// that does not match the number of pair lines, or a malformed or out-of-range pair.
    fn try_read_text<R: BufRead>(reader: R) -> Result<Self>;

    /// Same as [`FindMergeText::try_read_text`] for a file
    fn try_read_text_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_text(BufReader::new(File::open(path)?))
    }

    /// Writes the textual rendering of all sets
    fn try_write_text<W: Write>(&self, writer: W) -> Result<()>;

    /// Same as [`FindMergeText::try_write_text`] for a file
    fn try_write_text_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_text(&mut writer)?;
        writer.flush()
    }
}

impl FindMergeText for FindMerge {
    fn try_read_text<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = ContentLines::new(reader, "#");

        let (_, line) = lines.expect_line("number of elements")?;
        let n: NumNodes = parse_next_value!(line.split_whitespace(), "number of elements");
        raise_error_unless!(
            n >= FindMerge::MIN_NODES,
            ErrorKind::InvalidData,
            format!(
                "Number of elements {n} is below the minimum of {}",
                FindMerge::MIN_NODES
            )
        );

        let (_, line) = lines.expect_line("number of merges")?;
        let m: NumEdges = parse_next_value!(line.split_whitespace(), "number of merges");
        raise_error_unless!(
            m > 0,
            ErrorKind::InvalidData,
            "Number of merges must be positive"
        );

        let mut pairs = Vec::with_capacity(m as usize);
        while let Some((line_no, line)) = lines.next_line()? {
            pairs.push(parse_pair(&line, line_no, n)?);
        }
        raise_error_unless!(
            pairs.len() == m as usize,
            ErrorKind::InvalidData,
            format!("Expected {m} merges but found {}", pairs.len())
        );

        let mut fm = FindMerge::new(n);
        for (u, v) in pairs {
            fm.merge(u, v);
        }

        debug!(n, merges = m, sets = fm.number_of_sets(), "parsed find-merge text");
        Ok(fm)
    }

    fn try_write_text<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{self}")
    }
}
