use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::ciphersuite::CipherSuite;
use crate::encrypt::CipherText;
use crate::serialization::impl_serialization_traits;
use crate::utils::{Vec, G1};

/// A decryption share \\( U^{sk_i} \\) of a ciphertext, as produced by a single participant.
///
/// A threshold of decryption shares can be combined to decrypt a ciphertext.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct DecryptionShare<C: CipherSuite>(pub(crate) G1<C>);

impl_serialization_traits!(DecryptionShare<CipherSuite>);

/// A [`DecryptionShare`] which passed its pairing check against the
/// [`PublicKeyShare`](crate::keys::PublicKeyShare) of the participant `index`,
/// for the ciphertext whose randomness commitment is `randomness`.
///
/// It can only be obtained through
/// [`PublicKeyShare::verify_decryption_share`](crate::keys::PublicKeyShare::verify_decryption_share),
/// and is deliberately not deserializable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedDecryptionShare<C: CipherSuite> {
    pub(crate) index: u32,
    pub(crate) share: DecryptionShare<C>,
    pub(crate) randomness: G1<C>,
}

impl<C: CipherSuite> VerifiedDecryptionShare<C> {
    /// The index of the participant who produced this share.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The underlying decryption share.
    pub fn share(&self) -> &DecryptionShare<C> {
        &self.share
    }

    /// Whether this share was verified against `ciphertext`.
    pub fn is_share_of(&self, ciphertext: &CipherText<C>) -> bool {
        self.randomness == ciphertext.u
    }
}
