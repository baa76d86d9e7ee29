pub mod attack;
pub mod crypto;
pub mod encoding;
pub mod rand;
pub mod util;
