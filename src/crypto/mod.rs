pub mod sha1;

pub trait Hasher {
    type Digest: AsRef<[u8]>;

    const BLOCK_SIZE: usize;

    fn new() -> Self;

    fn update(&mut self, data: impl AsRef<[u8]>);

    fn finalize(&mut self);

    fn digest(&self) -> Self::Digest;

    fn reset(&mut self);

    /// Overwrite the processed-prefix length, in bytes.
    ///
    /// This exists for resuming a hash from a published digest: the length
    /// claimed here is what ends up in the length field of the final padding.
    fn set_message_len(&mut self, message_len: u64);
}
