//! Configurable parameters for an instance of a threshold encryption and signature scheme.

use core::marker::PhantomData;

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::ciphersuite::CipherSuite;
use crate::serialization::impl_serialization_traits;
use crate::utils::Vec;
use crate::{Error, ThresholdResult};

/// The configuration parameters of a dealing: the number of participants
/// receiving a share, and the threshold.
///
/// Any `t + 1` of the `n` participants can decrypt or sign together,
/// while `t` or fewer of them learn nothing about the master secret key.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ThresholdParameters<C: CipherSuite> {
    /// The number of participants in the scheme.
    pub n: u32,
    /// The threshold, i.e. the degree of the secret polynomial.
    pub t: u32,
    _phantom: PhantomData<C>,
}

impl_serialization_traits!(ThresholdParameters<CipherSuite>);

impl<C: CipherSuite> ThresholdParameters<C> {
    /// Initialize a new set of threshold parameters.
    ///
    /// Fails with [`Error::InvalidThresholdParameters`] if `n` equals 0 or `t >= n`,
    /// as participants could then never reach the `t + 1` shares needed to combine.
    pub fn new(n: u32, t: u32) -> ThresholdResult<Self> {
        if n == 0 || t >= n {
            return Err(Error::InvalidThresholdParameters { n, t });
        }

        Ok(Self {
            n,
            t,
            _phantom: PhantomData,
        })
    }

    /// The number of shares needed to decrypt or sign, i.e. `t + 1`.
    pub fn quorum(&self) -> usize {
        self.t as usize + 1
    }

    /// Whether `index` designates a participant of this instance.
    pub fn contains(&self, index: u32) -> bool {
        index < self.n
    }
}
