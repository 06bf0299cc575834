//! # Stitch File Records
//!
//! Byte-level builders for the placeholder stitch file format.
//!
//! ## File Layout
//!
//! ```text
//! ┌──────────────────────────────┬─────────┬─────────┬─────┬─────────┐
//! │ header (512 bytes)           │ record  │ record  │ ... │ end     │
//! │ "EMB1" + 508 zero bytes      │ 3 bytes │ 3 bytes │     │ 00 00 01│
//! └──────────────────────────────┴─────────┴─────────┴─────┴─────────┘
//! ```
//!
//! ## Records
//!
//! Every record is three bytes: two coordinate bytes (low 8 bits of each
//! value) and a flag byte.
//!
//! | Record | Bytes | Flag |
//! |--------|-------|------|
//! | Jump   | dx dy 00 | 0x00 |
//! | End    | 00 00 01 | 0x01 |
//! | Stitch | dx dy 02 | 0x02 |
//!
//! This is a structurally shaped placeholder, not a Tajima DST encoder: it
//! carries no ternary-encoded displacements and no real DST header fields.

// ============================================================================
// CONSTANTS
// ============================================================================

/// Size of the fixed file header in bytes.
pub const HEADER_LEN: usize = 512;

/// Magic tag at the start of the header.
pub const MAGIC: &[u8; 4] = b"EMB1";

/// Size of one command record in bytes.
pub const RECORD_LEN: usize = 3;

/// Flag byte of a jump (move without stitching) record.
pub const FLAG_JUMP: u8 = 0x00;

/// Flag byte of the end-of-pattern record.
pub const FLAG_END: u8 = 0x01;

/// Flag byte of a normal stitch record.
pub const FLAG_STITCH: u8 = 0x02;

/// Conventional file extension.
pub const FILE_EXTENSION: &str = "dst";

// ============================================================================
// BUILDERS
// ============================================================================

/// Low 8 bits of a coordinate.
#[inline]
fn low_byte(v: i32) -> u8 {
    (v & 0xFF) as u8
}

/// # File Header
///
/// 512 bytes: the ASCII magic `EMB1` followed by zeros.
///
/// ## Example
///
/// ```
/// use stitchwork::stitch::commands;
///
/// let header = commands::header();
/// assert_eq!(header.len(), 512);
/// assert_eq!(&header[0..4], b"EMB1");
/// assert!(header[4..].iter().all(|&b| b == 0));
/// ```
pub fn header() -> Vec<u8> {
    let mut header = vec![0u8; HEADER_LEN];
    header[..MAGIC.len()].copy_from_slice(MAGIC);
    header
}

/// # Jump Record (dx dy 00)
///
/// Moves the needle without stitching.
#[inline]
pub fn jump(dx: i32, dy: i32) -> [u8; RECORD_LEN] {
    [low_byte(dx), low_byte(dy), FLAG_JUMP]
}

/// # Stitch Record (dx dy 02)
///
/// ## Example
///
/// ```
/// use stitchwork::stitch::commands;
///
/// // Coordinates keep only their low byte: 300 = 0x12C → 0x2C
/// assert_eq!(commands::stitch(300, 50), [0x2C, 0x32, 0x02]);
/// ```
#[inline]
pub fn stitch(dx: i32, dy: i32) -> [u8; RECORD_LEN] {
    [low_byte(dx), low_byte(dy), FLAG_STITCH]
}

/// # End-of-Pattern Record (00 00 01)
#[inline]
pub fn end() -> [u8; RECORD_LEN] {
    [0x00, 0x00, FLAG_END]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        let h = header();
        assert_eq!(h.len(), HEADER_LEN);
        assert_eq!(&h[0..4], &[b'E', b'M', b'B', b'1']);
        assert!(h[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_jump() {
        assert_eq!(jump(0, 0), [0x00, 0x00, 0x00]);
        assert_eq!(jump(-1, 256), [0xFF, 0x00, 0x00]);
    }

    #[test]
    fn test_stitch() {
        assert_eq!(stitch(50, 100), [50, 100, 0x02]);
        assert_eq!(stitch(300, 0), [0x2C, 0x00, 0x02]);
    }

    #[test]
    fn test_end() {
        assert_eq!(end(), [0x00, 0x00, 0x01]);
    }
}
