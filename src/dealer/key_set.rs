//! The dealer's secret key set and its public counterpart, from which
//! every participant's key shares are derived.

use core::fmt::Debug;

use crate::ciphersuite::CipherSuite;
use crate::dealer::polynomial::{Commitment, Polynomial};
use crate::keys::{PublicKey, PublicKeyShare, SecretKey, SecretKeyShare};
use crate::utils::{evaluation_point, Scalar, Vec};
use crate::ThresholdResult;

use ark_ff::Zero;

use rand::{CryptoRng, RngCore};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use tracing::{debug, instrument};

/// A secret key and an associated set of secret key shares.
///
/// The coefficients of the underlying polynomial evaluate at `0` to the
/// master secret key, and at `i + 1` to the secret key share of participant `i`.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKeySet<C: CipherSuite> {
    poly: Polynomial<C>,
}

impl<C: CipherSuite> Debug for SecretKeySet<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecretKeySet")
            .field("threshold", &self.threshold())
            .finish_non_exhaustive()
    }
}

impl<C: CipherSuite> From<Polynomial<C>> for SecretKeySet<C> {
    fn from(poly: Polynomial<C>) -> SecretKeySet<C> {
        SecretKeySet { poly }
    }
}

impl<C: CipherSuite> SecretKeySet<C> {
    /// Create a set of secret key shares, where any `threshold + 1` of them can
    /// collaboratively sign and decrypt.
    ///
    /// This is the only operation of a dealing consuming randomness.
    #[instrument(level = "debug", skip_all, fields(threshold = threshold))]
    pub fn random(threshold: usize, rng: impl RngCore + CryptoRng) -> Self {
        let poly = Polynomial::random(threshold, rng);
        debug!("sampled a new secret polynomial");

        SecretKeySet { poly }
    }

    /// Returns the threshold `t`: any set of `t + 1` shares can be combined.
    pub fn threshold(&self) -> usize {
        self.poly.degree()
    }

    /// Returns a reference to the secret polynomial.
    pub fn poly(&self) -> &Polynomial<C> {
        &self.poly
    }

    /// Returns the secret key share of the participant with index `index`,
    /// i.e. the evaluation of the secret polynomial at `index + 1`.
    pub fn secret_key_share(&self, index: u32) -> SecretKeyShare<C> {
        let evaluation = self.poly.evaluate(&evaluation_point::<C>(index));

        SecretKeyShare::new(index, SecretKey::from_scalar(evaluation))
    }

    /// Returns the secret key shares of all the participants with indices `0..n`.
    #[instrument(level = "debug", skip_all, fields(n = n))]
    pub fn secret_key_shares(&self, n: u32) -> Vec<SecretKeyShare<C>> {
        #[cfg(feature = "parallel")]
        let shares = (0..n)
            .into_par_iter()
            .map(|index| self.secret_key_share(index))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let shares = (0..n).map(|index| self.secret_key_share(index)).collect();

        shares
    }

    /// Returns the master secret key.
    ///
    /// Participants never need it: it is exposed for dealers auditing their own dealing.
    pub fn secret_key(&self) -> SecretKey<C> {
        SecretKey::from_scalar(self.poly.evaluate(&Scalar::<C>::zero()))
    }

    /// Returns the corresponding public key set. That information can be shared publicly.
    pub fn public_keys(&self) -> PublicKeySet<C> {
        PublicKeySet {
            commitment: self.poly.commitment(),
        }
    }

    /// Serialize this `SecretKeySet` as the concatenation of its fixed-width coefficients.
    pub fn to_bytes(&self) -> ThresholdResult<Vec<u8>> {
        self.poly.to_bytes()
    }

    /// Attempt to deserialize a `SecretKeySet` from a concatenation of fixed-width coefficients.
    pub fn from_bytes(bytes: &[u8]) -> ThresholdResult<Self> {
        Polynomial::from_bytes(bytes).map(SecretKeySet::from)
    }
}

/// A public key and an associated set of public key shares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKeySet<C: CipherSuite> {
    commitment: Commitment<C>,
}

impl<C: CipherSuite> From<Commitment<C>> for PublicKeySet<C> {
    fn from(commitment: Commitment<C>) -> PublicKeySet<C> {
        PublicKeySet { commitment }
    }
}

impl<C: CipherSuite> PublicKeySet<C> {
    /// Returns the threshold `t`: any set of `t + 1` shares can be combined.
    pub fn threshold(&self) -> usize {
        self.commitment.degree()
    }

    /// Returns the public commitment to the secret polynomial.
    pub fn commitment(&self) -> &Commitment<C> {
        &self.commitment
    }

    /// Returns the group public key, under which messages are encrypted and
    /// combined signatures are verified.
    pub fn public_key(&self) -> PublicKey<C> {
        PublicKey::from_point(*self.commitment.public_key())
    }

    /// Returns the public key share of the participant with index `index`,
    /// without requiring any knowledge of its secret counterpart.
    pub fn public_key_share(&self, index: u32) -> PublicKeyShare<C> {
        let point = self.commitment.evaluate(&evaluation_point::<C>(index));

        PublicKeyShare::new(index, PublicKey::from_point(point))
    }

    /// Serialize this `PublicKeySet` as the concatenation of its compressed commitment points.
    pub fn to_bytes(&self) -> ThresholdResult<Vec<u8>> {
        self.commitment.to_bytes()
    }

    /// Attempt to deserialize a `PublicKeySet` from a concatenation of compressed points.
    pub fn from_bytes(bytes: &[u8]) -> ThresholdResult<Self> {
        Commitment::from_bytes(bytes).map(PublicKeySet::from)
    }
}
