//! The secret polynomial held by a dealer, and its public commitment
//! for Feldman's verifiable secret sharing scheme.

use core::fmt::Debug;
use core::ops::Add;

use crate::ciphersuite::CipherSuite;
use crate::utils::{Scalar, Vec, G1};
use crate::{Error, ThresholdResult};

use ark_ec::Group;
use ark_ff::{UniformRand, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use rand::{CryptoRng, RngCore};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use zeroize::Zeroize;

/// Size in bytes of an encoded scalar of this [`CipherSuite`].
pub(crate) fn scalar_size<C: CipherSuite>() -> usize {
    Scalar::<C>::zero().compressed_size()
}

/// Size in bytes of an encoded `G1` element of this [`CipherSuite`].
pub(crate) fn g1_size<C: CipherSuite>() -> usize {
    G1::<C>::generator().compressed_size()
}

/// Split `bytes` into chunks of `chunk` bytes, failing if the length
/// is not a non-zero multiple of `chunk`.
fn exact_chunks(bytes: &[u8], chunk: usize) -> ThresholdResult<core::slice::ChunksExact<'_, u8>> {
    if bytes.is_empty() || bytes.len() % chunk != 0 {
        return Err(Error::InvalidLength {
            chunk,
            length: bytes.len(),
        });
    }

    Ok(bytes.chunks_exact(chunk))
}

/// A polynomial with secret coefficients, ordered from the constant term upwards.
///
/// The coefficients are overwritten with zeroes when the polynomial falls out of scope.
#[derive(Clone, PartialEq, Eq)]
pub struct Polynomial<C: CipherSuite> {
    pub(crate) coefficients: Vec<Scalar<C>>,
}

// Coefficients are zeroed in place, so a zeroized polynomial keeps its degree.
impl<C: CipherSuite> Zeroize for Polynomial<C> {
    fn zeroize(&mut self) {
        for coefficient in self.coefficients.iter_mut() {
            coefficient.zeroize();
        }
    }
}

impl<C: CipherSuite> Drop for Polynomial<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<C: CipherSuite> Debug for Polynomial<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Polynomial {{ degree: {}, .. }}", self.degree())
    }
}

impl<C: CipherSuite> Polynomial<C> {
    /// Construct a polynomial from its coefficients, constant term first.
    pub fn new(coefficients: Vec<Scalar<C>>) -> ThresholdResult<Self> {
        if coefficients.is_empty() {
            return Err(Error::EmptyPolynomial);
        }

        Ok(Self { coefficients })
    }

    /// Sample a polynomial of degree `degree` with uniformly random coefficients.
    pub fn random(degree: usize, mut rng: impl RngCore + CryptoRng) -> Self {
        let coefficients = (0..=degree).map(|_| Scalar::<C>::rand(&mut rng)).collect();

        Self { coefficients }
    }

    /// The degree of this polynomial, i.e. its number of coefficients minus one.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Evaluate the polynomial, `f(x)` for the secret coefficients at the value of `x` .
    pub fn evaluate(&self, x: &Scalar<C>) -> Scalar<C> {
        let mut sum = Scalar::<C>::zero();

        // Evaluate using Horner's method.
        for (k, coefficient) in self.coefficients.iter().rev().enumerate() {
            // The secret is the constant term in the polynomial
            sum += coefficient;

            if k != (self.coefficients.len() - 1) {
                sum *= x;
            }
        }

        sum
    }

    /// Commit to each coefficient \\( a_k \\) as \\( g_1^{a_k} \\).
    pub fn commitment(&self) -> Commitment<C> {
        let generator = G1::<C>::generator();

        #[cfg(feature = "parallel")]
        let points = self
            .coefficients
            .par_iter()
            .map(|coefficient| generator * coefficient)
            .collect();

        #[cfg(not(feature = "parallel"))]
        let points = self
            .coefficients
            .iter()
            .map(|coefficient| generator * coefficient)
            .collect();

        Commitment { points }
    }

    /// Serialize this `Polynomial` as the concatenation of its fixed-width coefficients.
    pub fn to_bytes(&self) -> ThresholdResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.coefficients.len() * scalar_size::<C>());
        for coefficient in self.coefficients.iter() {
            coefficient
                .serialize_compressed(&mut bytes)
                .map_err(|_| Error::SerializationError)?;
        }

        Ok(bytes)
    }

    /// Attempt to deserialize a `Polynomial` from a concatenation of fixed-width coefficients.
    pub fn from_bytes(bytes: &[u8]) -> ThresholdResult<Self> {
        let coefficients = exact_chunks(bytes, scalar_size::<C>())?
            .map(|chunk| {
                Scalar::<C>::deserialize_compressed(chunk).map_err(|_| Error::DeserializationError)
            })
            .collect::<ThresholdResult<Vec<_>>>()?;

        Ok(Self { coefficients })
    }
}

impl<'a, C: CipherSuite> Add<&'a Polynomial<C>> for &'a Polynomial<C> {
    type Output = Polynomial<C>;

    fn add(self, rhs: &'a Polynomial<C>) -> Polynomial<C> {
        let (long, short) = if self.coefficients.len() >= rhs.coefficients.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        let mut coefficients = long.coefficients.clone();
        for (sum, coefficient) in coefficients.iter_mut().zip(short.coefficients.iter()) {
            *sum += coefficient;
        }

        Polynomial { coefficients }
    }
}

/// A commitment to a dealer's secret polynomial coefficients for Feldman's
/// verifiable secret sharing scheme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commitment<C: CipherSuite> {
    /// The commitments to the secret coefficients, constant term first.
    pub(crate) points: Vec<G1<C>>,
}

impl<C: CipherSuite> Commitment<C> {
    /// Construct a commitment from its points, constant term first.
    pub fn new(points: Vec<G1<C>>) -> ThresholdResult<Self> {
        if points.is_empty() {
            return Err(Error::EmptyPolynomial);
        }

        Ok(Self { points })
    }

    /// The degree of the committed polynomial.
    pub fn degree(&self) -> usize {
        self.points.len() - 1
    }

    /// Retrieve \\( g_1^{a_0} \\), the commitment to the constant term.
    pub fn public_key(&self) -> &G1<C> {
        &self.points[0]
    }

    /// The commitments to the coefficients, constant term first.
    pub fn points(&self) -> &[G1<C>] {
        &self.points
    }

    /// Evaluate \\( g_1^{f(x)} \\) without knowing the secret coefficients of the polynomial.
    pub fn evaluate(&self, x: &Scalar<C>) -> G1<C> {
        let mut sum = G1::<C>::zero();

        // Evaluate using Horner's method.
        for (k, point) in self.points.iter().rev().enumerate() {
            sum += point;

            if k != (self.points.len() - 1) {
                sum *= x;
            }
        }

        sum
    }

    /// Serialize this `Commitment` as the concatenation of its compressed points.
    pub fn to_bytes(&self) -> ThresholdResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.points.len() * g1_size::<C>());
        for point in self.points.iter() {
            point
                .serialize_compressed(&mut bytes)
                .map_err(|_| Error::SerializationError)?;
        }

        Ok(bytes)
    }

    /// Attempt to deserialize a `Commitment` from a concatenation of compressed points.
    pub fn from_bytes(bytes: &[u8]) -> ThresholdResult<Self> {
        let points = exact_chunks(bytes, g1_size::<C>())?
            .map(|chunk| {
                G1::<C>::deserialize_compressed(chunk).map_err(|_| Error::DeserializationError)
            })
            .collect::<ThresholdResult<Vec<_>>>()?;

        Ok(Self { points })
    }
}

impl<'a, C: CipherSuite> Add<&'a Commitment<C>> for &'a Commitment<C> {
    type Output = Commitment<C>;

    fn add(self, rhs: &'a Commitment<C>) -> Commitment<C> {
        let (long, short) = if self.points.len() >= rhs.points.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        let mut points = long.points.clone();
        for (sum, point) in points.iter_mut().zip(short.points.iter()) {
            *sum += point;
        }

        Commitment { points }
    }
}
