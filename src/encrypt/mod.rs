pub(crate) mod ciphertext;
pub(crate) mod decryption_share;

pub(crate) use ciphertext::encrypt;
pub use ciphertext::{CipherText, VerifiedCipherText};
pub use decryption_share::{DecryptionShare, VerifiedDecryptionShare};
