//! Combination of a threshold of decryption or signature shares by
//! Lagrange interpolation at zero.
//!
//! Given `t + 1` samples \\( (i, g^{f(i + 1)}) \\) of a polynomial \\( f \\) of degree `t`
//! committed in some group, the combiner recovers \\( g^{f(0)} \\) as
//!
//! \\[
//! g^{f(0)} = \prod\_{i} \left(g^{f(i + 1)}\right)^{\lambda\_i}
//! \\]
//!
//! where \\( \lambda\_i \\) are the Lagrange coefficients at zero of the evaluation points.

use core::borrow::Borrow;

use ark_ec::CurveGroup;
use ark_ff::Zero;

use tracing::{debug, instrument, warn};

use crate::ciphersuite::CipherSuite;
use crate::dealer::PublicKeySet;
use crate::encrypt::{CipherText, DecryptionShare, VerifiedDecryptionShare};
use crate::parameters::ThresholdParameters;
use crate::sign::{Signature, SignatureShare, VerifiedSignatureShare};
use crate::utils::{calculate_lagrange_coefficients, xor_with_keystream, Scalar, Vec, G1, G2};
use crate::{Error, ThresholdResult};

#[cfg(not(feature = "std"))]
use alloc::collections::btree_map::{BTreeMap, Entry};
#[cfg(feature = "std")]
use std::collections::btree_map::{BTreeMap, Entry};

/// Interpolate at zero the group-valued samples `(index, point)`, where
/// `point` is the evaluation at `index + 1` of a polynomial in the exponent.
pub(crate) fn interpolate<C, G>(samples: &[(u32, G)]) -> ThresholdResult<G>
where
    C: CipherSuite,
    G: CurveGroup<ScalarField = Scalar<C>>,
{
    let indices: Vec<u32> = samples.iter().map(|(index, _)| *index).collect();

    let mut result = G::zero();
    for (index, point) in samples.iter() {
        let lambda = calculate_lagrange_coefficients::<C>(*index, &indices)?;
        result += *point * lambda;
    }

    Ok(result)
}

/// The combiner of a dealing, merging any `t + 1` shares of its participants.
///
/// The combiner is an untrusted party: it holds only public information, and
/// may be one of the participants itself. Combination depends only on the set
/// of shares provided, not on their order.
#[derive(Clone, Debug)]
pub struct Combiner<C: CipherSuite> {
    parameters: ThresholdParameters<C>,
    public_keys: PublicKeySet<C>,
}

impl<C: CipherSuite> Combiner<C> {
    /// Construct a new combiner for the participants described by `parameters`,
    /// whose public key set is `public_keys`.
    ///
    /// Fails with [`Error::ThresholdMismatch`] if the threshold of the parameters
    /// doesn't match the degree of the public key set.
    pub fn new(
        parameters: ThresholdParameters<C>,
        public_keys: PublicKeySet<C>,
    ) -> ThresholdResult<Self> {
        if parameters.t as usize != public_keys.threshold() {
            return Err(Error::ThresholdMismatch {
                expected: parameters.t as usize,
                actual: public_keys.threshold(),
            });
        }

        Ok(Self {
            parameters,
            public_keys,
        })
    }

    /// The parameters of the dealing.
    pub fn parameters(&self) -> &ThresholdParameters<C> {
        &self.parameters
    }

    /// The public key set of the dealing.
    pub fn public_keys(&self) -> &PublicKeySet<C> {
        &self.public_keys
    }

    /// Select the `t + 1` samples with the smallest indices, rejecting duplicate
    /// and unknown participant indices.
    fn select_samples<G, S, I>(&self, shares: I) -> ThresholdResult<Vec<(u32, G)>>
    where
        G: Copy,
        S: Borrow<G>,
        I: IntoIterator<Item = (u32, S)>,
    {
        let mut samples: BTreeMap<u32, G> = BTreeMap::new();
        for (index, share) in shares {
            if !self.parameters.contains(index) {
                return Err(Error::UnknownParticipant(index));
            }
            match samples.entry(index) {
                Entry::Occupied(_) => return Err(Error::DuplicateShareIndex(index)),
                Entry::Vacant(entry) => {
                    entry.insert(*share.borrow());
                }
            }
        }

        let required = self.parameters.quorum();
        if samples.len() < required {
            return Err(Error::InsufficientShares {
                required,
                provided: samples.len(),
            });
        }

        Ok(samples.into_iter().take(required).collect())
    }

    /// Combine the decryption shares `(index, share)` of `ciphertext` and
    /// return the decrypted message.
    ///
    /// The ciphertext is checked first, and a rejected ciphertext is never
    /// decrypted. The validity of the shares themselves is not checked: if one
    /// of them is invalid, so is the decrypted message. In adversarial settings,
    /// shares should be checked with [`Combiner::verify_decryption_shares`] and
    /// combined with [`Combiner::decrypt`].
    #[instrument(level = "debug", skip_all, fields(t = self.parameters.t, n = self.parameters.n))]
    pub fn combine_decryption_shares<'a, I>(
        &self,
        ciphertext: &CipherText<C>,
        shares: I,
    ) -> ThresholdResult<Vec<u8>>
    where
        C: 'a,
        I: IntoIterator<Item = (u32, &'a DecryptionShare<C>)>,
    {
        ciphertext.check()?;

        let samples = self.select_samples::<G1<C>, _, _>(
            shares.into_iter().map(|(index, share)| (index, &share.0)),
        )?;
        let g = interpolate::<C, _>(&samples)?;
        debug!("combined {} decryption shares", samples.len());

        xor_with_keystream::<C>(&g, &ciphertext.v)
    }

    /// Combine the signature shares `(index, share)` into a [`Signature`]
    /// under the group public key.
    ///
    /// The validity of the shares is not checked: if one of them is invalid,
    /// so is the resulting signature.
    #[instrument(level = "debug", skip_all, fields(t = self.parameters.t, n = self.parameters.n))]
    pub fn combine_signature_shares<'a, I>(&self, shares: I) -> ThresholdResult<Signature<C>>
    where
        C: 'a,
        I: IntoIterator<Item = (u32, &'a SignatureShare<C>)>,
    {
        let samples = self.select_samples::<G2<C>, _, _>(
            shares.into_iter().map(|(index, share)| (index, &share.0)),
        )?;
        let signature = interpolate::<C, _>(&samples)?;
        debug!("combined {} signature shares", samples.len());

        Ok(Signature(signature))
    }

    /// Verify each decryption share `(index, share)` of `ciphertext` against the
    /// public key share of its participant.
    ///
    /// # Returns
    ///
    /// The verified shares, or [`Error::MisbehavingParticipants`] with the sorted
    /// indices of all participants whose share is invalid.
    pub fn verify_decryption_shares<'a, I>(
        &self,
        ciphertext: &CipherText<C>,
        shares: I,
    ) -> ThresholdResult<Vec<VerifiedDecryptionShare<C>>>
    where
        C: 'a,
        I: IntoIterator<Item = (u32, &'a DecryptionShare<C>)>,
    {
        ciphertext.check()?;

        let mut verified = Vec::new();
        let mut misbehaving_participants = Vec::new();
        for (index, share) in shares {
            if !self.parameters.contains(index) {
                return Err(Error::UnknownParticipant(index));
            }
            match self
                .public_keys
                .public_key_share(index)
                .verify_decryption_share(share, ciphertext)
            {
                Ok(share) => verified.push(share),
                Err(_) => misbehaving_participants.push(index),
            }
        }

        if !misbehaving_participants.is_empty() {
            misbehaving_participants.sort_unstable();
            warn!(?misbehaving_participants, "invalid decryption shares");
            return Err(Error::MisbehavingParticipants(misbehaving_participants));
        }

        Ok(verified)
    }

    /// Verify each signature share `(index, share)` on `message` against the
    /// public key share of its participant.
    ///
    /// # Returns
    ///
    /// The verified shares, or [`Error::MisbehavingParticipants`] with the sorted
    /// indices of all participants whose share is invalid.
    pub fn verify_signature_shares<'a, I>(
        &self,
        message: &[u8],
        shares: I,
    ) -> ThresholdResult<Vec<VerifiedSignatureShare<C>>>
    where
        C: 'a,
        I: IntoIterator<Item = (u32, &'a SignatureShare<C>)>,
    {
        let mut verified = Vec::new();
        let mut misbehaving_participants = Vec::new();
        for (index, share) in shares {
            if !self.parameters.contains(index) {
                return Err(Error::UnknownParticipant(index));
            }
            match self
                .public_keys
                .public_key_share(index)
                .verify_signature_share(share, message)
            {
                Ok(share) => verified.push(share),
                Err(_) => misbehaving_participants.push(index),
            }
        }

        if !misbehaving_participants.is_empty() {
            misbehaving_participants.sort_unstable();
            warn!(?misbehaving_participants, "invalid signature shares");
            return Err(Error::MisbehavingParticipants(misbehaving_participants));
        }

        Ok(verified)
    }

    /// Decrypt `ciphertext` from a threshold of verified decryption shares of it.
    ///
    /// Fails with [`Error::ForeignDecryptionShare`] if one of the shares was
    /// verified against another ciphertext.
    pub fn decrypt(
        &self,
        ciphertext: &CipherText<C>,
        shares: &[VerifiedDecryptionShare<C>],
    ) -> ThresholdResult<Vec<u8>> {
        if let Some(share) = shares.iter().find(|share| !share.is_share_of(ciphertext)) {
            warn!(index = share.index, "decryption share of another ciphertext");
            return Err(Error::ForeignDecryptionShare(share.index));
        }

        self.combine_decryption_shares(
            ciphertext,
            shares.iter().map(|share| (share.index, &share.share)),
        )
    }

    /// Combine a threshold of verified signature shares into a [`Signature`],
    /// and check it against the group public key.
    pub fn sign(
        &self,
        message: &[u8],
        shares: &[VerifiedSignatureShare<C>],
    ) -> ThresholdResult<Signature<C>> {
        let signature =
            self.combine_signature_shares(shares.iter().map(|share| (share.index, &share.share)))?;

        if !self.public_keys.public_key().verify(&signature, message) {
            return Err(Error::InvalidSignature);
        }

        Ok(signature)
    }
}
