//! SHA-1 implemented as per RFC 3174: https://www.rfc-editor.org/rfc/rfc3174
//!
//! The padding rule, block segmentation and compression function are exposed
//! as standalone primitives so that [`crate::attack`] can resume a hash from
//! a published digest. SHA-1 is cryptographically broken; this module exists
//! to demonstrate the algorithm and its length-extension weakness, not to
//! provide secure hashing.

use crate::crypto::Hasher;
use crate::encoding::Encodable;
use crate::util::{as_chunks, cast_as_arrays};
use std::mem;

pub mod constants {
    pub const H0: u32 = 0x67452301;
    pub const H1: u32 = 0xEFCDAB89;
    pub const H2: u32 = 0x98BADCFE;
    pub const H3: u32 = 0x10325476;
    pub const H4: u32 = 0xC3D2E1F0;

    pub const INIT_STATE: [u32; STATE_SIZE] = [H0, H1, H2, H3, H4];

    pub const K: [u32; 4] = [0x5A827999, 0x6ED9EBA1, 0x8F1BBCDC, 0xCA62C1D6];

    pub const STATE_SIZE: usize = 5;
    pub const DIGEST_SIZE: usize = 20;
    pub const BLOCK_SIZE: usize = 64;
    pub const ROUNDS: usize = 80;
}
use constants::*;

macro_rules! Ch {
    ($x:expr, $y:expr, $z:expr) => {
        ($x & $y) | (!$x & $z)
    };
}

macro_rules! Parity {
    ($x:expr, $y:expr, $z:expr) => {
        $x ^ $y ^ $z
    };
}

macro_rules! Maj {
    ($x:expr, $y:expr, $z:expr) => {
        ($x & $y) | ($x & $z) | ($y & $z)
    };
}

/// A SHA-1 digest: the five state words serialized big-endian.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Sha1Digest(pub [u8; DIGEST_SIZE]);

impl AsRef<[u8]> for Sha1Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Encodable for Sha1Digest {
    fn encode_hex(&self) -> String {
        self.0.encode_hex()
    }
}

impl From<[u32; STATE_SIZE]> for Sha1Digest {
    fn from(state: [u32; STATE_SIZE]) -> Self {
        let mut bytes = [0; DIGEST_SIZE];
        for (chunk, word) in bytes.chunks_exact_mut(mem::size_of::<u32>()).zip(state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        Self(bytes)
    }
}

impl From<Sha1Digest> for [u32; STATE_SIZE] {
    fn from(digest: Sha1Digest) -> Self {
        let mut state = [0; STATE_SIZE];
        for (word, chunk) in state.iter_mut().zip(cast_as_arrays(&digest.0)) {
            *word = u32::from_be_bytes(*chunk);
        }
        state
    }
}

/// Compute the padding appended to a message of `message_len` bytes: a single
/// 0x80 byte, zeroes until the length is congruent to 56 mod 64, then the
/// original bit-length as a big-endian u64.
///
/// The padding depends only on the message length, never its content, which
/// is exactly what makes length-extension possible.
pub fn padding_for_length(message_len: u64) -> Vec<u8> {
    let bit_len = message_len * u8::BITS as u64;

    let mut padding = vec![0x80];
    let k = bit_len
        .wrapping_neg()
        .wrapping_sub(u64::BITS as u64)
        .wrapping_sub(u8::BITS as u64)
        .rem_euclid(BLOCK_SIZE as u64 * u8::BITS as u64);
    padding.extend_from_slice(&vec![0; k as usize / u8::BITS as usize]);
    padding.extend_from_slice(&bit_len.to_be_bytes());

    padding
}

/// Pad a message out to a whole number of blocks.
pub fn pad(message: &[u8]) -> Vec<u8> {
    let mut padded = message.to_vec();
    padded.extend_from_slice(&padding_for_length(message.len() as u64));
    padded
}

/// Segment a padded message into blocks, zero-copy.
///
/// Panics if the input is not a whole number of blocks.
pub fn blocks(padded: &[u8]) -> &[[u8; BLOCK_SIZE]] {
    cast_as_arrays(padded)
}

/// Mix one block into the state, returning the new state.
#[allow(non_snake_case)]
pub fn compress(state: [u32; STATE_SIZE], block: &[u8; BLOCK_SIZE]) -> [u32; STATE_SIZE] {
    // The message schedule
    let mut W: [u32; ROUNDS] = [0; ROUNDS];

    // Split the block into word sized chunks
    let chunks = cast_as_arrays(block);
    for (schedule_word, chunk) in W.iter_mut().zip(chunks.iter()) {
        *schedule_word = u32::from_be_bytes(*chunk);
    }

    // Expand the message into the rest of the schedule
    for t in 16..ROUNDS {
        W[t] = u32::rotate_left(W[t - 3] ^ W[t - 8] ^ W[t - 14] ^ W[t - 16], 1);
    }

    // Working variables
    let [mut a, mut b, mut c, mut d, mut e] = state;

    // Compute the core rounds
    for t in 0..ROUNDS {
        let f = match t {
            0..=19 => Ch!(b, c, d),
            20..=39 | 60..=79 => Parity!(b, c, d),
            40..=59 => Maj!(b, c, d),
            _ => unreachable!(),
        };
        let T = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(K[t / 20])
            .wrapping_add(W[t]);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = T;
    }

    // Feed the working variables back into the state
    [
        state[0].wrapping_add(a),
        state[1].wrapping_add(b),
        state[2].wrapping_add(c),
        state[3].wrapping_add(d),
        state[4].wrapping_add(e),
    ]
}

/// One-shot SHA-1 of a byte sequence.
pub fn sha1(message: impl AsRef<[u8]>) -> Sha1Digest {
    let padded = pad(message.as_ref());
    blocks(&padded)
        .iter()
        .fold(INIT_STATE, compress)
        .into()
}

/// Streaming SHA-1 hasher.
#[derive(Debug, Clone)]
pub struct Sha1 {
    state: [u32; STATE_SIZE],
    message_length: u64,
    unprocessed_data: Vec<u8>,
    finalized: bool,
}

impl Hasher for Sha1 {
    type Digest = Sha1Digest;

    const BLOCK_SIZE: usize = constants::BLOCK_SIZE;

    fn new() -> Self {
        Self {
            state: INIT_STATE,
            message_length: 0,
            unprocessed_data: Vec::new(),
            finalized: false,
        }
    }

    fn update(&mut self, data: impl AsRef<[u8]>) {
        assert!(!self.finalized, "Cannot update a finalized Hasher.");

        self.unprocessed_data.extend_from_slice(data.as_ref());
        let data = mem::take(&mut self.unprocessed_data);
        let (blocks, remaining) = as_chunks(&data);
        for block in blocks {
            self.state = compress(self.state, block);
            self.message_length += Self::BLOCK_SIZE as u64;
        }
        self.unprocessed_data.extend_from_slice(remaining);
    }

    fn finalize(&mut self) {
        self.message_length += self.unprocessed_data.len() as u64;

        let padding = padding_for_length(self.message_length);
        self.unprocessed_data.extend_from_slice(&padding);

        self.update("");
        self.finalized = true;

        assert!(
            self.unprocessed_data.is_empty(),
            "There must be no unprocessed data after finalization."
        );
    }

    fn digest(&self) -> Self::Digest {
        assert!(
            self.finalized,
            "Attempting to get the digest of an unfinalized Hasher."
        );
        self.state.into()
    }

    fn reset(&mut self) {
        self.state = INIT_STATE;
        self.message_length = 0;
        self.unprocessed_data = Vec::new();
        self.finalized = false;
    }

    fn set_message_len(&mut self, message_len: u64) {
        self.message_length = message_len;
    }
}

impl From<Sha1Digest> for Sha1 {
    fn from(digest: Sha1Digest) -> Self {
        Self {
            state: digest.into(),
            message_length: 0,
            unprocessed_data: Vec::new(),
            finalized: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // test vectors from https://www.di-mgt.com.au/sha_testvectors.html and RFC 3174
    #[test]
    fn test_sha1_known_vectors() {
        let test_vectors = [
            ("", "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
            ("abc", "a9993e364706816aba3e25717850c26c9cd0d89d"),
            (
                "The quick brown fox jumps over the lazy dog",
                "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12",
            ),
            (
                "The quick brown fox jumps over the lazy cog",
                "de9f2c7fd25e1b3afad3e85a0bd17d9b100db4b3",
            ),
            (
                "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
                "84983e441c3bd26ebaae4aa1f95129e5e54670f1",
            ),
            (
                &"a".repeat(1_000_000),
                "34aa973cd4c4daa4f61eeb2bdbad27316534016f",
            ),
        ];
        for (test, correct) in test_vectors {
            assert_eq!(sha1(test).encode_hex(), correct);
        }
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let data: Vec<u8> = (0..=255).cycle().take(1000).collect();
        let mut hasher = Sha1::new();
        for chunk in data.chunks(37) {
            hasher.update(chunk);
        }
        hasher.finalize();
        assert_eq!(hasher.digest(), sha1(&data));
    }

    #[test]
    fn test_sha1_is_deterministic() {
        let data = b"determinism check";
        assert_eq!(sha1(data), sha1(data));
    }

    #[test]
    fn test_pad_invariants() {
        for len in 0..300 {
            let message: Vec<u8> = (0..len).map(|b| b as u8).collect();
            let padded = pad(&message);

            assert_eq!(padded.len() % BLOCK_SIZE, 0);
            assert!(!padded.is_empty());
            assert_eq!(&padded[..len], &message[..]);
            assert_eq!(padded[len], 0x80);

            let length_field = u64::from_be_bytes(padded[padded.len() - 8..].try_into().unwrap());
            assert_eq!(length_field, len as u64 * 8);
        }
    }

    #[test]
    fn test_padding_depends_only_on_length() {
        for len in [0usize, 1, 55, 56, 63, 64, 100] {
            let zeroes = vec![0u8; len];
            let ones = vec![0xFF; len];
            assert_eq!(&pad(&zeroes)[len..], &padding_for_length(len as u64)[..]);
            assert_eq!(&pad(&ones)[len..], &padding_for_length(len as u64)[..]);
        }
    }

    #[test]
    fn test_blocks_round_trip() {
        let padded = pad(&[0xAB; 150]);
        let blocks = blocks(&padded);
        assert!(blocks.iter().all(|b| b.len() == BLOCK_SIZE));
        assert_eq!(blocks.concat(), padded);
    }

    #[test]
    #[should_panic]
    fn test_blocks_ragged_input_fails() {
        blocks(&[0u8; 65]);
    }

    #[test]
    fn test_rotate() {
        assert_eq!(0xff00aa55u32.rotate_left(1), 0xfe0154ab);
    }

    #[test]
    fn test_compress_empty_message() {
        let padded = pad(b"");
        assert_eq!(padded.len(), BLOCK_SIZE);
        let state = compress(INIT_STATE, blocks(&padded).first().unwrap());
        assert_eq!(
            Sha1Digest::from(state).encode_hex(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn test_sha1_to_from_digest() {
        let mut hasher = Sha1::new();
        hasher.update("Wow this string sure isn't very long.");
        hasher.finalize();
        let recovered = Sha1::from(hasher.digest());
        assert_eq!(hasher.state, recovered.state);
    }

    #[test]
    fn test_digest_is_be() {
        let digest: Sha1Digest = [1u32, 2, 3, 4, 5].into();
        let repr = [1u32, 2, 3, 4, 5].map(u32::to_be_bytes).concat();
        assert_eq!(&digest.0[..], &repr[..]);
        assert_eq!(<[u32; STATE_SIZE]>::from(digest), [1, 2, 3, 4, 5]);
    }
}
