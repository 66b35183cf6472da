use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::ciphersuite::CipherSuite;
use crate::serialization::impl_serialization_traits;
use crate::utils::{Vec, G2};

/// A BLS signature \\( H(m)^{sk} \\), either produced by a single key or
/// combined from a threshold of signature shares.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Signature<C: CipherSuite>(pub(crate) G2<C>);

impl_serialization_traits!(Signature<CipherSuite>);

impl<C: CipherSuite> Signature<C> {
    /// The underlying `G2` element.
    pub fn point(&self) -> &G2<C> {
        &self.0
    }
}

/// A signature share \\( H(m)^{sk_i} \\), as produced by a single participant.
///
/// A threshold of signature shares can be combined into a [`Signature`]
/// valid under the group public key.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct SignatureShare<C: CipherSuite>(pub(crate) G2<C>);

impl_serialization_traits!(SignatureShare<CipherSuite>);

/// A [`SignatureShare`] which passed its verification against the
/// [`PublicKeyShare`](crate::keys::PublicKeyShare) of the participant `index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedSignatureShare<C: CipherSuite> {
    pub(crate) index: u32,
    pub(crate) share: SignatureShare<C>,
}

impl<C: CipherSuite> VerifiedSignatureShare<C> {
    /// The index of the participant who produced this share.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The underlying signature share.
    pub fn share(&self) -> &SignatureShare<C> {
        &self.share
    }
}
