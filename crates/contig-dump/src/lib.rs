//! Human-readable dumps of arena state.
//!
//! Renders anything implementing [`ArenaInspect`]: the arena header, each
//! chunk header, payload bytes and every non-empty gap, in address order.
//! Rendering only reads; it never mutates the arena.
//!
//! ```text
//! ----------------------------------------------------------------
//! arena 1 (150 bytes)
//!     first: *
//! chunk @16
//!     payload_size: 12
//!     prev: NULL
//!     next: NULL
//! 12 byte chunk: Hello World\x00
//! 90 byte gap
//! ----------------------------------------------------------------
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::fmt::{self, Write};

use contig_core::{ArenaInspect, GapInfo};

const RULE: &str = "----------------------------------------------------------------";

/// Render a full dump of `arena` into a string.
pub fn render<A>(arena: &A) -> String
where
    A: ArenaInspect + ?Sized,
{
    Dump(arena).to_string()
}

/// `Display` adapter that dumps an arena.
pub struct Dump<'a, A: ?Sized>(pub &'a A);

impl<A> fmt::Display for Dump<'_, A>
where
    A: ArenaInspect + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arena = self.0;
        let chunks = arena.chunk_list();
        let gaps = arena.gap_list();

        writeln!(f, "{RULE}")?;
        writeln!(f, "arena {} ({} bytes)", arena.arena_id(), arena.total_size())?;
        writeln!(f, "    first: {}", star_or_null(arena.first_chunk()))?;

        // Gap i precedes chunk i; the last gap trails the list. An empty
        // arena reports its whole data area even when it is zero bytes.
        let mut gaps = gaps.iter();
        if chunks.is_empty() {
            if let Some(gap) = gaps.next() {
                writeln!(f, "{} byte gap", gap.len)?;
            }
        }
        for chunk in &chunks {
            if let Some(gap) = gaps.next() {
                write_gap(f, gap)?;
            }
            writeln!(f, "chunk @{}", chunk.offset)?;
            writeln!(f, "    payload_size: {}", chunk.payload_size)?;
            writeln!(f, "    prev: {}", star_or_null(chunk.prev))?;
            writeln!(f, "    next: {}", star_or_null(chunk.next))?;
            write!(f, "{} byte chunk: ", chunk.payload_size)?;
            match arena.payload_of(chunk) {
                Some(bytes) => write_escaped(f, bytes)?,
                None => f.write_str("<out of bounds>")?,
            }
            writeln!(f)?;
        }
        if !chunks.is_empty() {
            if let Some(gap) = gaps.next() {
                write_gap(f, gap)?;
            }
        }
        writeln!(f, "{RULE}")
    }
}

fn write_gap(f: &mut fmt::Formatter<'_>, gap: &GapInfo) -> fmt::Result {
    if gap.len != 0 {
        writeln!(f, "{} byte gap", gap.len)?;
    }
    Ok(())
}

fn star_or_null(link: Option<usize>) -> &'static str {
    if link.is_some() {
        "*"
    } else {
        "NULL"
    }
}

/// Escape `bytes` for display: printable ASCII other than backslash is
/// written as-is, everything else as `\xHH`.
pub fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    // Writing to a String cannot fail.
    let _ = write_escaped(&mut out, bytes);
    out
}

fn write_escaped<W: Write>(out: &mut W, bytes: &[u8]) -> fmt::Result {
    for &b in bytes {
        if (0x20..0x80).contains(&b) && b != b'\\' {
            out.write_char(char::from(b))?;
        } else {
            write!(out, "\\x{b:02X}")?;
        }
    }
    Ok(())
}
