//! SHA-1 (FIPS 180-1) and HMAC-SHA1 (RFC 2104).
//!
//! The digest is embedded rather than imported because the signer's
//! correctness story includes the exact byte-level behavior of its
//! primitive. The unit tests pin the published FIPS vectors and
//! cross-check against the RustCrypto `sha1`/`hmac` crates.

/// SHA-1 block size in bytes.
const BLOCK_SIZE: usize = 64;

/// SHA-1 digest size in bytes.
pub const DIGEST_SIZE: usize = 20;

/// Computes the SHA-1 digest of `msg`.
pub fn sha1(msg: &[u8]) -> [u8; DIGEST_SIZE] {
    // Pad: 0x80, zero bytes, then the message bit length as a 64-bit
    // big-endian integer, to a multiple of 64 bytes.
    let bit_len = (msg.len() as u64) * 8;
    let mut buf = Vec::with_capacity(msg.len() + BLOCK_SIZE + 9);
    buf.extend_from_slice(msg);
    buf.push(0x80);
    while buf.len() % BLOCK_SIZE != 56 {
        buf.push(0);
    }
    buf.extend_from_slice(&bit_len.to_be_bytes());

    let mut state: [u32; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

    for block in buf.chunks_exact(BLOCK_SIZE) {
        let mut w = [0u32; 80];
        for (i, word) in block.chunks_exact(4).enumerate() {
            w[i] = u32::from_be_bytes([word[0], word[1], word[2], word[3]]);
        }
        for i in 16..80 {
            w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = state;

        for (i, &word) in w.iter().enumerate() {
            let (f, k) = match i {
                0..=19 => ((b & c) | (!b & d), 0x5A827999),
                20..=39 => (b ^ c ^ d, 0x6ED9EBA1),
                40..=59 => ((b & c) | (b & d) | (c & d), 0x8F1BBCDC),
                _ => (b ^ c ^ d, 0xCA62C1D6),
            };
            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(word);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        state[0] = state[0].wrapping_add(a);
        state[1] = state[1].wrapping_add(b);
        state[2] = state[2].wrapping_add(c);
        state[3] = state[3].wrapping_add(d);
        state[4] = state[4].wrapping_add(e);
    }

    let mut digest = [0u8; DIGEST_SIZE];
    for (chunk, word) in digest.chunks_exact_mut(4).zip(state) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    digest
}

/// Computes HMAC-SHA1 over `msg` with `key`.
///
/// A key longer than the 64-byte block is hashed down first; shorter keys
/// are zero-padded to the block size.
pub fn hmac_sha1(key: &[u8], msg: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut block_key = [0u8; BLOCK_SIZE];
    if key.len() > BLOCK_SIZE {
        block_key[..DIGEST_SIZE].copy_from_slice(&sha1(key));
    } else {
        block_key[..key.len()].copy_from_slice(key);
    }

    let mut inner = Vec::with_capacity(BLOCK_SIZE + msg.len());
    let mut outer = Vec::with_capacity(BLOCK_SIZE + DIGEST_SIZE);
    for &b in &block_key {
        inner.push(b ^ 0x36);
    }
    for &b in &block_key {
        outer.push(b ^ 0x5C);
    }
    inner.extend_from_slice(msg);
    outer.extend_from_slice(&sha1(&inner));
    sha1(&outer)
}
