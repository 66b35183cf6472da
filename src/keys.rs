use core::fmt::Debug;

use crate::ciphersuite::CipherSuite;
use crate::encrypt::{encrypt, CipherText, DecryptionShare, VerifiedDecryptionShare};
use crate::serialization::impl_serialization_traits;
use crate::sign::{Signature, SignatureShare, VerifiedSignatureShare};
use crate::utils::{xor_with_keystream, Scalar, Vec, G1};
use crate::{Error, FromBytes, ThresholdResult, ToBytes};

use ark_ec::pairing::Pairing;
use ark_ec::Group;
use ark_ff::UniformRand;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use rand::{CryptoRng, RngCore};

use tracing::trace;

use zeroize::Zeroize;

/// A secret key, either the master key of a dealing or a standalone BLS key.
///
/// Equality compares the underlying scalars and is not constant-time.
#[derive(Clone, Eq, PartialEq, CanonicalSerialize, CanonicalDeserialize, Zeroize)]
pub struct SecretKey<C: CipherSuite>(pub(crate) Scalar<C>);

impl_serialization_traits!(SecretKey<CipherSuite>);

impl<C: CipherSuite> Drop for SecretKey<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<C: CipherSuite> Debug for SecretKey<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SecretKey(..)")
    }
}

impl<C: CipherSuite> SecretKey<C> {
    /// Sample a uniformly random secret key.
    pub fn random(mut rng: impl RngCore + CryptoRng) -> Self {
        Self(Scalar::<C>::rand(&mut rng))
    }

    pub(crate) fn from_scalar(scalar: Scalar<C>) -> Self {
        Self(scalar)
    }

    /// Derive the corresponding public key \\( g_1^{sk} \\) for this secret key.
    pub fn public_key(&self) -> PublicKey<C> {
        PublicKey(G1::<C>::generator() * self.0)
    }

    /// Sign `message`, as \\( H(m)^{sk} \\) where \\( H \\) hashes to `G2`.
    ///
    /// Signing is deterministic: the same key and message always yield the same signature.
    pub fn sign(&self, message: &[u8]) -> ThresholdResult<Signature<C>> {
        let hash = C::hash_message(message)?;

        Ok(Signature(hash * self.0))
    }

    /// Decrypt `ciphertext`, failing with [`Error::InvalidCiphertext`] if it doesn't
    /// pass its integrity check.
    pub fn decrypt(&self, ciphertext: &CipherText<C>) -> ThresholdResult<Vec<u8>> {
        ciphertext.check()?;

        let g = ciphertext.u * self.0;
        xor_with_keystream::<C>(&g, &ciphertext.v)
    }
}

/// A public key, either the group key of a dealing or a standalone BLS key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PublicKey<C: CipherSuite>(pub(crate) G1<C>);

impl_serialization_traits!(PublicKey<CipherSuite>);

impl<C: CipherSuite> PublicKey<C> {
    pub(crate) fn from_point(point: G1<C>) -> Self {
        Self(point)
    }

    /// The underlying `G1` element.
    pub fn point(&self) -> &G1<C> {
        &self.0
    }

    /// Check a signature on `message` against this key, i.e. that
    /// \\( e(g_1, \sigma) = e(pk, H(m)) \\).
    ///
    /// Returns `false` if the message cannot be hashed to the curve.
    pub fn verify(&self, signature: &Signature<C>, message: &[u8]) -> bool {
        match C::hash_message(message) {
            Ok(hash) => {
                C::Engine::pairing(G1::<C>::generator(), signature.0)
                    == C::Engine::pairing(self.0, hash)
            }
            Err(_) => false,
        }
    }

    /// Encrypt `message` under this key.
    ///
    /// Fails with [`Error::MessageTooLong`] if `message` exceeds the
    /// [`CipherSuite`]'s maximum message length.
    pub fn encrypt(
        &self,
        message: &[u8],
        rng: impl RngCore + CryptoRng,
    ) -> ThresholdResult<CipherText<C>> {
        encrypt(&self.0, message, rng)
    }
}

/// A secret key share, held by a single participant of a dealing.
///
/// It is the evaluation of the dealer's secret polynomial at `index + 1`.
#[derive(Clone, Eq, PartialEq)]
pub struct SecretKeyShare<C: CipherSuite> {
    /// The participant index to which this share belongs.
    pub(crate) index: u32,
    /// The participant's secret share of the master key.
    pub(crate) key: SecretKey<C>,
}

impl<C: CipherSuite> Debug for SecretKeyShare<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecretKeyShare")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<C: CipherSuite> SecretKeyShare<C> {
    /// Bind a secret key to the participant index `index`.
    pub fn new(index: u32, key: SecretKey<C>) -> Self {
        Self { index, key }
    }

    /// The participant index to which this share belongs.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The underlying secret key.
    pub fn secret_key(&self) -> &SecretKey<C> {
        &self.key
    }

    /// Derive the corresponding public key share.
    pub fn public_key_share(&self) -> PublicKeyShare<C> {
        PublicKeyShare {
            index: self.index,
            key: self.key.public_key(),
        }
    }

    /// Produce this participant's signature share on `message`.
    pub fn sign(&self, message: &[u8]) -> ThresholdResult<SignatureShare<C>> {
        let signature = self.key.sign(message)?;

        Ok(SignatureShare(signature.0))
    }

    /// Produce this participant's decryption share of `ciphertext`, failing with
    /// [`Error::InvalidCiphertext`] if it doesn't pass its integrity check.
    pub fn decrypt_share(&self, ciphertext: &CipherText<C>) -> ThresholdResult<DecryptionShare<C>> {
        ciphertext.check()?;

        Ok(self.decrypt_share_unchecked(ciphertext))
    }

    /// Produce this participant's decryption share \\( U^{sk_i} \\) of `ciphertext`,
    /// without checking the ciphertext integrity.
    ///
    /// Callers are responsible for checking the ciphertext, and recipients for
    /// verifying the share against this participant's [`PublicKeyShare`].
    pub fn decrypt_share_unchecked(&self, ciphertext: &CipherText<C>) -> DecryptionShare<C> {
        DecryptionShare(ciphertext.u * self.key.0)
    }

    /// Serialize this `SecretKeyShare`, exactly like its underlying [`SecretKey`].
    ///
    /// The participant index is not part of the encoding.
    pub fn to_bytes(&self) -> ThresholdResult<Vec<u8>> {
        self.key.to_bytes()
    }

    /// Attempt to deserialize the `SecretKeyShare` of participant `index` from a slice of bytes.
    pub fn from_bytes(index: u32, bytes: &[u8]) -> ThresholdResult<Self> {
        Ok(Self {
            index,
            key: SecretKey::from_bytes(bytes)?,
        })
    }
}

/// A public key share, allowing anyone to verify the signature and
/// decryption shares of a participant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PublicKeyShare<C: CipherSuite> {
    /// The participant index to which this key belongs.
    pub(crate) index: u32,
    /// The public counterpart of the participant's secret key share.
    pub(crate) key: PublicKey<C>,
}

impl_serialization_traits!(PublicKeyShare<CipherSuite>);

impl<C: CipherSuite> PublicKeyShare<C> {
    /// Bind a public key to the participant index `index`.
    pub fn new(index: u32, key: PublicKey<C>) -> Self {
        Self { index, key }
    }

    /// The participant index to which this key belongs.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The underlying public key.
    pub fn public_key(&self) -> &PublicKey<C> {
        &self.key
    }

    /// Check a signature share on `message` against this key.
    pub fn verify(&self, share: &SignatureShare<C>, message: &[u8]) -> bool {
        self.key.verify(&Signature(share.0), message)
    }

    /// Verify a signature share on `message`, promoting it to a [`VerifiedSignatureShare`].
    pub fn verify_signature_share(
        &self,
        share: &SignatureShare<C>,
        message: &[u8],
    ) -> ThresholdResult<VerifiedSignatureShare<C>> {
        if !self.verify(share, message) {
            trace!(index = self.index, "rejected signature share");
            return Err(Error::ShareVerificationError(self.index));
        }

        Ok(VerifiedSignatureShare {
            index: self.index,
            share: share.clone(),
        })
    }

    /// Check a decryption share of `ciphertext` against this key, i.e. that
    /// \\( e(D_i, H(U, V)) = e(pk_i, W) \\).
    pub fn is_valid_decryption_share(
        &self,
        share: &DecryptionShare<C>,
        ciphertext: &CipherText<C>,
    ) -> bool {
        match ciphertext.hash() {
            Ok(hash) => {
                C::Engine::pairing(share.0, hash) == C::Engine::pairing(self.key.0, ciphertext.w)
            }
            Err(_) => false,
        }
    }

    /// Verify a decryption share of `ciphertext`, promoting it to a [`VerifiedDecryptionShare`].
    ///
    /// The verified share is bound to this participant and to the randomness
    /// commitment of `ciphertext`. The ciphertext itself is checked when the
    /// shares are combined.
    pub fn verify_decryption_share(
        &self,
        share: &DecryptionShare<C>,
        ciphertext: &CipherText<C>,
    ) -> ThresholdResult<VerifiedDecryptionShare<C>> {
        if !self.is_valid_decryption_share(share, ciphertext) {
            trace!(index = self.index, "rejected decryption share");
            return Err(Error::ShareVerificationError(self.index));
        }

        Ok(VerifiedDecryptionShare {
            index: self.index,
            share: share.clone(),
            randomness: ciphertext.u,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::Bls12381Sha256;

    use ark_ff::Zero;
    use rand::rngs::OsRng;

    type Sk = SecretKey<Bls12381Sha256>;

    #[test]
    fn test_simple_signature() {
        let mut rng = OsRng;
        let sk0 = Sk::random(&mut rng);
        let sk1 = Sk::random(&mut rng);
        let pk0 = sk0.public_key();
        let msg0 = b"Real news";
        let msg1 = b"Fake news";

        let sig0 = sk0.sign(msg0).unwrap();
        assert!(pk0.verify(&sig0, msg0));
        assert!(!pk0.verify(&sk1.sign(msg0).unwrap(), msg0));
        assert!(!pk0.verify(&sig0, msg1));
        assert!(!sk1.public_key().verify(&sig0, msg0));
        assert_eq!(sig0, sk0.sign(msg0).unwrap());
    }

    #[test]
    fn test_simple_encryption() {
        let mut rng = OsRng;
        let sk_bob = Sk::random(&mut rng);
        let sk_eve = Sk::random(&mut rng);
        let pk_bob = sk_bob.public_key();
        let msg = b"Muffins in the canteen today! Don't tell Eve!";

        let ciphertext = pk_bob.encrypt(&msg[..], &mut rng).unwrap();
        assert!(ciphertext.verify());

        assert_eq!(sk_bob.decrypt(&ciphertext).unwrap(), msg.to_vec());
        assert_ne!(sk_eve.decrypt(&ciphertext).unwrap(), msg.to_vec());

        let empty = pk_bob.encrypt(&[], &mut rng).unwrap();
        assert!(sk_bob.decrypt(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_message_too_long() {
        let mut rng = OsRng;
        let pk = Sk::random(&mut rng).public_key();
        let max = <Bls12381Sha256 as CipherSuite>::max_message_length();
        assert_eq!(max, 8160);

        let mut msg = Vec::new();
        msg.resize(max, 7u8);
        assert!(pk.encrypt(&msg, &mut rng).is_ok());
        msg.push(7u8);
        assert_eq!(
            pk.encrypt(&msg, &mut rng),
            Err(Error::MessageTooLong(max + 1))
        );
    }

    #[test]
    fn test_rejected_ciphertext_is_never_decrypted() {
        let mut rng = OsRng;
        let sk = Sk::random(&mut rng);
        let mut ciphertext = sk.public_key().encrypt(b"secret", &mut rng).unwrap();

        ciphertext.w = G2Point::generator();
        assert!(!ciphertext.verify());
        assert_eq!(sk.decrypt(&ciphertext), Err(Error::InvalidCiphertext));

        let share = SecretKeyShare::new(0, sk.clone());
        assert_eq!(
            share.decrypt_share(&ciphertext),
            Err(Error::InvalidCiphertext)
        );
    }

    #[test]
    fn test_identity_randomness_is_rejected() {
        let mut rng = OsRng;
        let sk = Sk::random(&mut rng);
        let mut ciphertext = sk.public_key().encrypt(b"secret", &mut rng).unwrap();

        ciphertext.u = G1::<Bls12381Sha256>::zero();
        ciphertext.w = G2Point::zero();
        assert!(!ciphertext.verify());
    }

    #[test]
    fn test_serialization() {
        let mut rng = OsRng;

        for _ in 0..20 {
            let sk = Sk::random(&mut rng);
            let bytes = sk.to_bytes().unwrap();
            assert_eq!(bytes.len(), 32);
            assert_eq!(sk, Sk::from_bytes(&bytes).unwrap());

            let share = SecretKeyShare::new(3, sk.clone());
            let bytes = share.to_bytes().unwrap();
            assert_eq!(bytes, sk.to_bytes().unwrap());
            assert_eq!(share, SecretKeyShare::from_bytes(3, &bytes).unwrap());

            let pk = sk.public_key();
            assert_eq!(pk, PublicKey::from_bytes(&pk.to_bytes().unwrap()).unwrap());

            let pk_share = share.public_key_share();
            assert_eq!(
                pk_share,
                PublicKeyShare::from_bytes(&pk_share.to_bytes().unwrap()).unwrap()
            );
        }

        assert_eq!(Sk::from_bytes(&[0u8; 31]), Err(Error::DeserializationError));
        assert_eq!(Sk::from_bytes(&[0u8; 33]), Err(Error::DeserializationError));
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let sk = Sk::from_scalar(Scalar::<Bls12381Sha256>::from(123456789u64));
        let output = format!("{:?}", sk);
        assert!(!output.contains("123456789"));

        let share = SecretKeyShare::new(4, sk);
        assert_eq!(format!("{:?}", share), "SecretKeyShare { index: 4, .. }");
    }

    type G2Point = crate::utils::G2<Bls12381Sha256>;
}
