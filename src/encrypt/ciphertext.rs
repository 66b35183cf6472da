//! Ciphertexts bound to their encryption randomness by a pairing-checkable tag.

use core::ops::Deref;

use crate::ciphersuite::CipherSuite;
use crate::dealer::polynomial::g1_size;
use crate::utils::{to_compressed_bytes, xor_with_keystream, Scalar, Vec, G1, G2};
use crate::{Error, ThresholdResult};

use ark_ec::pairing::Pairing;
use ark_ec::Group;
use ark_ff::{UniformRand, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use rand::{CryptoRng, RngCore};

use tracing::{instrument, trace};

/// A ciphertext \\( (U, V, W) \\), where \\( U = g_1^r \\) commits to the encryption
/// randomness, \\( V \\) is the masked message and \\( W = H(U, V)^r \\) binds both.
///
/// A ciphertext must pass [`CipherText::verify`] before any decryption, partial or not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CipherText<C: CipherSuite> {
    pub(crate) u: G1<C>,
    pub(crate) v: Vec<u8>,
    pub(crate) w: G2<C>,
}

impl<C: CipherSuite> CipherText<C> {
    /// The randomness commitment \\( U \\).
    pub fn u(&self) -> &G1<C> {
        &self.u
    }

    /// The masked message \\( V \\).
    pub fn v(&self) -> &[u8] {
        &self.v
    }

    /// The integrity tag \\( W \\).
    pub fn w(&self) -> &G2<C> {
        &self.w
    }

    pub(crate) fn hash(&self) -> ThresholdResult<G2<C>> {
        C::hash_ciphertext(&self.u, &self.v)
    }

    pub(crate) fn check(&self) -> ThresholdResult<()> {
        if self.verify() {
            Ok(())
        } else {
            Err(Error::InvalidCiphertext)
        }
    }

    /// Returns `true` if this is a valid ciphertext, i.e. if
    /// \\( e(g_1, W) = e(U, H(U, V)) \\).
    ///
    /// This check is necessary to prevent chosen-ciphertext attacks.
    pub fn verify(&self) -> bool {
        if self.u.is_zero() || self.v.len() > C::max_message_length() {
            trace!("rejected degenerate ciphertext");
            return false;
        }

        let hash = match self.hash() {
            Ok(hash) => hash,
            Err(_) => return false,
        };

        let valid =
            C::Engine::pairing(G1::<C>::generator(), self.w) == C::Engine::pairing(self.u, hash);
        if !valid {
            trace!("rejected ciphertext failing its pairing check");
        }

        valid
    }

    /// Verify this ciphertext, promoting it to a [`VerifiedCipherText`].
    pub fn into_verified(self) -> ThresholdResult<VerifiedCipherText<C>> {
        self.check()?;

        Ok(VerifiedCipherText(self))
    }

    /// Serialize this `CipherText` as \\( U \\| W \\| V \\), with both points compressed.
    pub fn to_bytes(&self) -> ThresholdResult<Vec<u8>> {
        let mut bytes = to_compressed_bytes(&self.u)?;
        self.w
            .serialize_compressed(&mut bytes)
            .map_err(|_| Error::SerializationError)?;
        bytes.extend_from_slice(&self.v);

        Ok(bytes)
    }

    /// Attempt to deserialize a `CipherText` from a slice of bytes.
    ///
    /// This only checks that both points are valid group elements: the result
    /// must still be checked with [`CipherText::verify`].
    pub fn from_bytes(bytes: &[u8]) -> ThresholdResult<Self> {
        let u_size = g1_size::<C>();
        let w_size = G2::<C>::generator().compressed_size();

        if bytes.len() < u_size + w_size {
            return Err(Error::DeserializationError);
        }
        if bytes.len() - u_size - w_size > C::max_message_length() {
            return Err(Error::MessageTooLong(bytes.len() - u_size - w_size));
        }

        let u = G1::<C>::deserialize_compressed(&bytes[..u_size])
            .map_err(|_| Error::DeserializationError)?;
        let w = G2::<C>::deserialize_compressed(&bytes[u_size..u_size + w_size])
            .map_err(|_| Error::DeserializationError)?;
        let v = bytes[u_size + w_size..].to_vec();

        Ok(Self { u, v, w })
    }
}

/// A [`CipherText`] which passed its integrity check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedCipherText<C: CipherSuite>(CipherText<C>);

impl<C: CipherSuite> VerifiedCipherText<C> {
    /// Unwrap the underlying [`CipherText`].
    pub fn into_inner(self) -> CipherText<C> {
        self.0
    }
}

impl<C: CipherSuite> Deref for VerifiedCipherText<C> {
    type Target = CipherText<C>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Encrypt `message` under the public key `public_key`.
#[instrument(level = "trace", skip_all, fields(len = message.len()))]
pub(crate) fn encrypt<C: CipherSuite>(
    public_key: &G1<C>,
    message: &[u8],
    mut rng: impl RngCore + CryptoRng,
) -> ThresholdResult<CipherText<C>> {
    if message.len() > C::max_message_length() {
        return Err(Error::MessageTooLong(message.len()));
    }

    let r = Scalar::<C>::rand(&mut rng);
    let u = G1::<C>::generator() * r;
    let v = xor_with_keystream::<C>(&(*public_key * r), message)?;
    let w = C::hash_ciphertext(&u, &v)? * r;

    Ok(CipherText { u, v, w })
}
