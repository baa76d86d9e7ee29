//! Length-extension attack against SHA-1.
//!
//! SHA-1 has no finalization step beyond padding: the published digest *is*
//! the internal state after the last block. Anyone holding a digest of
//! `secret || known` can therefore resume compression over bytes of their
//! choosing and forge a valid digest for
//! `secret || known || padding || extension` without learning the secret.

use crate::crypto::sha1::{padding_for_length, Sha1, Sha1Digest};
use crate::crypto::Hasher;
use crate::util::try_cast_as_array;

#[derive(Debug, Copy, Clone)]
pub enum ExtendError {
    /// The supplied digest was not exactly 20 bytes long.
    InvalidDigestLength(usize),
}

impl std::fmt::Display for ExtendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ExtendError {}

/// Forge a digest for `secret || known_data || padding || extension` given
/// only the digest of `secret || known_data` and the secret's length in
/// bytes.
///
/// Returns the forged digest together with the forged message
/// `known_data || padding || extension`, the suffix a verifier must append
/// to the secret for the forged digest to validate.
///
/// `secret_len` is trusted input: the attack's premise is that the attacker
/// knows or guesses it.
pub fn sha1_extend(
    mac: &[u8],
    known_data: &[u8],
    extension: &[u8],
    secret_len: usize,
) -> Result<(Sha1Digest, Vec<u8>), ExtendError> {
    let digest_bytes = try_cast_as_array(mac)
        .map_err(|_| ExtendError::InvalidDigestLength(mac.len()))?;

    // The padding the original computation appended depends only on the
    // length of secret || known_data, all of which we know.
    let glue = padding_for_length((secret_len + known_data.len()) as u64);

    let mut forged_message = known_data.to_vec();
    forged_message.extend_from_slice(&glue);

    // Everything up to here has already been compressed into the digest we
    // were handed, a whole number of blocks by construction. Claim that
    // length and only ever process the extension's blocks.
    let processed_len = secret_len as u64 + forged_message.len() as u64;
    forged_message.extend_from_slice(extension);

    let mut hasher = Sha1::from(Sha1Digest(*digest_bytes));
    hasher.set_message_len(processed_len);
    hasher.update(extension);
    hasher.finalize();

    Ok((hasher.digest(), forged_message))
}
