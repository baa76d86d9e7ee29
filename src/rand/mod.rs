pub mod xorshift32;
pub use xorshift32::XorShift32;

pub trait Rng32 {
    /// Construct a generator seeded from system entropy
    fn new() -> Self;

    /// Construct a generator from an explicit seed
    fn from_seed(seed: u32) -> Self;

    /// Generate a 32 bit random value
    fn gen(&mut self) -> u32;

    /// Generate a sequence of random bytes
    fn gen_bytes(&mut self, n: usize) -> Vec<u8> {
        std::iter::from_fn(|| Some(self.gen().to_le_bytes()))
            .flatten()
            .take(n)
            .collect()
    }
}
