//! Capability traits shared by the complete keys and the key shares,
//! allowing code to be written once for both.

use crate::ciphersuite::CipherSuite;
use crate::encrypt::{CipherText, DecryptionShare};
use crate::keys::{PublicKey, PublicKeyShare, SecretKey, SecretKeyShare};
use crate::sign::{Signature, SignatureShare};
use crate::utils::Vec;
use crate::ThresholdResult;

/// A key able to sign messages.
pub trait Signer {
    /// The signature, or signature share, produced by this key.
    type Signature;

    /// Sign `message` with this key.
    fn sign(&self, message: &[u8]) -> ThresholdResult<Self::Signature>;
}

/// A key able to check signatures.
pub trait Verifier {
    /// The signature, or signature share, checked by this key.
    type Signature;

    /// Check `signature` on `message` against this key.
    fn verify(&self, signature: &Self::Signature, message: &[u8]) -> bool;
}

/// A key able to process ciphertexts.
pub trait Decryptor<C: CipherSuite> {
    /// The plaintext, or decryption share, produced by this key.
    type Output;

    /// Process `ciphertext` with this key. Ciphertexts failing their
    /// integrity check are always rejected.
    fn decrypt(&self, ciphertext: &CipherText<C>) -> ThresholdResult<Self::Output>;
}

impl<C: CipherSuite> Signer for SecretKey<C> {
    type Signature = Signature<C>;

    fn sign(&self, message: &[u8]) -> ThresholdResult<Signature<C>> {
        SecretKey::sign(self, message)
    }
}

impl<C: CipherSuite> Signer for SecretKeyShare<C> {
    type Signature = SignatureShare<C>;

    fn sign(&self, message: &[u8]) -> ThresholdResult<SignatureShare<C>> {
        SecretKeyShare::sign(self, message)
    }
}

impl<C: CipherSuite> Verifier for PublicKey<C> {
    type Signature = Signature<C>;

    fn verify(&self, signature: &Signature<C>, message: &[u8]) -> bool {
        PublicKey::verify(self, signature, message)
    }
}

impl<C: CipherSuite> Verifier for PublicKeyShare<C> {
    type Signature = SignatureShare<C>;

    fn verify(&self, signature: &SignatureShare<C>, message: &[u8]) -> bool {
        PublicKeyShare::verify(self, signature, message)
    }
}

impl<C: CipherSuite> Decryptor<C> for SecretKey<C> {
    type Output = Vec<u8>;

    fn decrypt(&self, ciphertext: &CipherText<C>) -> ThresholdResult<Vec<u8>> {
        SecretKey::decrypt(self, ciphertext)
    }
}

impl<C: CipherSuite> Decryptor<C> for SecretKeyShare<C> {
    type Output = DecryptionShare<C>;

    fn decrypt(&self, ciphertext: &CipherText<C>) -> ThresholdResult<DecryptionShare<C>> {
        self.decrypt_share(ciphertext)
    }
}
