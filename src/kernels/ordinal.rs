//! This module contains the pure, stateless kernels for fixed-width,
//! big-endian ordinal codes.
//!
//! An ordinal code is the position of a value in its sorted, deduplicated
//! universe, written most-significant byte first at a fixed width. Because
//! the byte order is big-endian and the width is fixed, byte-lexicographic
//! comparison of two codes equals numeric comparison of their ordinals, which
//! in turn equals the ordering of the underlying values. This is what allows
//! binary search and bin assignment directly on packed bytes, without
//! decoding.

//==================================================================================
// 1. Public API
//==================================================================================

/// Encodes an ordinal as a big-endian byte sequence of exactly `width` bytes.
///
/// The caller guarantees `v < 256^width`; higher-order bytes of `v` beyond
/// `width` are truncated.
pub fn encode_ordinal(v: u64, width: usize) -> Vec<u8> {
    let mut buf = vec![0u8; width];
    write_ordinal(v, &mut buf);
    buf
}

/// Writes an ordinal big-endian into an existing buffer, using the buffer's
/// full length as the code width.
pub fn write_ordinal(v: u64, buf: &mut [u8]) {
    let mut v = v;
    for slot in buf.iter_mut().rev() {
        *slot = (v & 0xff) as u8;
        v >>= 8;
    }
}

/// Decodes a fixed-width big-endian byte sequence back into its ordinal.
///
/// Inverse of [`encode_ordinal`] for widths up to 8 bytes (a `u64`). The
/// histogram engine uses this on packed column bytes.
pub fn decode_ordinal(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8, "ordinal wider than u64");
    let mut res = 0u64;
    for &b in bytes {
        res = (res << 8) | u64::from(b);
    }
    res
}

/// Returns the minimal code width `W` such that `256^W >= uniques`.
///
/// `uniques == 0` needs no code at all and yields width 0; a single unique
/// value still needs one byte. Width grows only once capacity is exceeded,
/// not merely reached: 256 uniques fit one byte, 257 need two, 65536 fit
/// two, 65537 need three.
pub fn width_for_count(uniques: usize) -> usize {
    if uniques == 0 {
        return 0;
    }
    let mut width = 1;
    let mut capacity: u128 = 256;
    while (uniques as u128) > capacity {
        capacity *= 256;
        width += 1;
    }
    width
}
