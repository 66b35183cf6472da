use core::fmt::Debug;
use core::marker::{Send, Sync};

use ark_ec::pairing::Pairing;
use digest::core_api::BlockSizeUser;
use digest::Digest;
use zeroize::Zeroize;

use crate::utils::{to_compressed_bytes, String, Vec, G1, G2};
use crate::ThresholdResult;

/// A trait defining the pairing engine and hash-to-curve details of this
/// threshold encryption and signature scheme instantiation.
pub trait CipherSuite: Copy + Clone + PartialEq + Eq + Debug + Send + Sync + Zeroize {
    /// The pairing-friendly curve on which this [`CipherSuite`] operates.
    ///
    /// Public keys, decryption shares and ciphertext randomness commitments live in `G1`,
    /// signatures and ciphertext integrity tags live in `G2`.
    type Engine: Pairing;

    /// The underlying hasher used to derive ciphertext keystreams.
    type InnerHasher: Default + Clone + Digest + BlockSizeUser;

    //////////////////////////////////////////////////////////////////////////////////////////////

    // Required methods

    /// A method returning this [`CipherSuite`]'s custom context string, to be used in the different
    /// random oracles invoked in the scheme.
    fn context_string() -> String;

    /// Hash `message` to an element of `G2`, under the domain separation tag `domain`.
    fn hash_to_g2(domain: &[u8], message: &[u8]) -> ThresholdResult<G2<Self>>;

    ///////////////////////////////////////////////////////////////////////////////////////////////

    // Provided methods

    /// The maximum length of a message that can be encrypted under this [`CipherSuite`] .
    ///
    /// Keystreams are obtained by HKDF expansion, which is bounded to 255 blocks
    /// of the inner hasher output.
    fn max_message_length() -> usize {
        255 * <Self::InnerHasher as Digest>::output_size()
    }

    /// Signature hash for this [`CipherSuite`] .
    ///
    /// The context string is this [`CipherSuite`]'s `CONTEXT_STRING`,
    /// concatenated with "signature".
    ///
    /// It is used to hash messages before signing them.
    fn hash_message(message: &[u8]) -> ThresholdResult<G2<Self>> {
        Self::hash_to_g2((Self::context_string() + "signature").as_bytes(), message)
    }

    /// Ciphertext hash for this [`CipherSuite`] .
    ///
    /// The context string is this [`CipherSuite`]'s `CONTEXT_STRING`,
    /// concatenated with "ciphertext".
    ///
    /// It binds the randomness commitment `u` and the masked payload `v`
    /// of a ciphertext to its integrity tag.
    fn hash_ciphertext(u: &G1<Self>, v: &[u8]) -> ThresholdResult<G2<Self>> {
        let mut message: Vec<u8> = to_compressed_bytes(u)?;
        message.extend_from_slice(v);

        Self::hash_to_g2((Self::context_string() + "ciphertext").as_bytes(), &message)
    }
}
