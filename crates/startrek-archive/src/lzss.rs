//! LZSS decompression for compressed data records
//!
//! The container uses classic sliding-window LZSS:
//!
//! - A 4096-byte ring buffer, zero-filled, write position starting at 0
//! - One control byte per eight tokens, consumed least significant bit first
//! - Bit set: one literal byte follows
//! - Bit clear: a 16-bit little-endian token follows; the low 4 bits hold
//!   `length - 3` and the high 12 bits the distance back from the current
//!   ring write position
//!
//! Decoding stops as soon as the requested number of bytes has been
//! produced. Whatever is left of the input (including unused control bits)
//! is padding.

use crate::error::{ArchiveError, Result};
use tracing::{trace, warn};

/// Size of the history ring buffer
pub const RING_SIZE: usize = 0x1000;

/// Initial fill value of the ring buffer
pub const RING_SEED: u8 = 0x00;

/// Shortest back-reference
pub const MIN_MATCH: usize = 3;

/// Longest back-reference (4-bit length field)
pub const MAX_MATCH: usize = 0x0F + MIN_MATCH;

const RING_MASK: usize = RING_SIZE - 1;

/// Expand `input` into exactly `output_size` bytes
pub fn decompress(input: &[u8], output_size: usize) -> Result<Vec<u8>> {
    let mut ring = [RING_SEED; RING_SIZE];
    let mut ring_pos = 0usize;
    let mut output = Vec::with_capacity(output_size);
    let mut pos = 0usize;

    'outer: while output.len() < output_size {
        let Some(&flags) = input.get(pos) else {
            return Err(ArchiveError::TruncatedInput {
                expected: output_size,
                produced: output.len(),
            });
        };
        pos += 1;

        for bit in 0..8 {
            if output.len() >= output_size {
                break 'outer;
            }

            if flags & (1 << bit) != 0 {
                let Some(&byte) = input.get(pos) else {
                    return Err(ArchiveError::TruncatedInput {
                        expected: output_size,
                        produced: output.len(),
                    });
                };
                pos += 1;

                output.push(byte);
                ring[ring_pos] = byte;
                ring_pos = (ring_pos + 1) & RING_MASK;
            } else {
                let token = match input.get(pos..pos + 2) {
                    Some(&[lo, hi]) => u16::from_le_bytes([lo, hi]),
                    _ if pos < input.len() => {
                        return Err(ArchiveError::CorruptStream(format!(
                            "back-reference token cut short at input offset {pos}"
                        )));
                    }
                    _ => {
                        return Err(ArchiveError::TruncatedInput {
                            expected: output_size,
                            produced: output.len(),
                        });
                    }
                };
                pos += 2;

                let length = (token & 0x0F) as usize + MIN_MATCH;
                let distance = (token >> 4) as usize;
                let start = ring_pos.wrapping_sub(distance) & RING_MASK;

                for i in 0..length {
                    if output.len() >= output_size {
                        break;
                    }
                    let byte = ring[(start + i) & RING_MASK];
                    output.push(byte);
                    ring[ring_pos] = byte;
                    ring_pos = (ring_pos + 1) & RING_MASK;
                }
            }
        }
    }

    let unused = input.len().saturating_sub(pos);
    if unused > 2 {
        warn!(
            "LZSS stream finished with {} unused input bytes ({} produced)",
            unused,
            output.len()
        );
    } else {
        trace!("LZSS decoded {} -> {} bytes", pos, output.len());
    }

    Ok(output)
}
