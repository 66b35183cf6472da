#[cfg(not(feature = "std"))]
pub use alloc::{borrow::ToOwned, string::String, vec::Vec};

#[cfg(feature = "std")]
pub use std::{borrow::ToOwned, string::String, vec::Vec};

use ark_ec::pairing::Pairing;
use ark_ff::Field;
use ark_serialize::CanonicalSerialize;

use crate::ciphersuite::CipherSuite;
use crate::{Error, ThresholdResult};

/// The scalar field of a [`CipherSuite`]'s pairing engine.
pub type Scalar<C> = <<C as CipherSuite>::Engine as Pairing>::ScalarField;
/// The first source group of a [`CipherSuite`]'s pairing engine, holding public keys.
pub type G1<C> = <<C as CipherSuite>::Engine as Pairing>::G1;
/// The second source group of a [`CipherSuite`]'s pairing engine, holding signatures.
pub type G2<C> = <<C as CipherSuite>::Engine as Pairing>::G2;

/// The evaluation point assigned to the participant with index `index`.
///
/// Participant `i` holds the evaluation of the secret polynomial at `i + 1`,
/// as the evaluation at zero is the master secret itself.
pub(crate) fn evaluation_point<C: CipherSuite>(index: u32) -> Scalar<C> {
    Scalar::<C>::from(u64::from(index) + 1)
}

/// Compute the Lagrange coefficient at zero of the participant with index `my_index`
/// among the participants with indices `all_indices`.
pub(crate) fn calculate_lagrange_coefficients<C: CipherSuite>(
    my_index: u32,
    all_indices: &[u32],
) -> ThresholdResult<Scalar<C>> {
    let mut numerator = Scalar::<C>::ONE;
    let mut denominator = Scalar::<C>::ONE;

    let my_index_field = evaluation_point::<C>(my_index);

    for &j in all_indices.iter() {
        if j == my_index {
            continue;
        }
        let s = evaluation_point::<C>(j);

        numerator *= s;
        denominator *= s - my_index_field;
    }

    let inverse = denominator
        .inverse()
        .ok_or(Error::DuplicateShareIndex(my_index))?;

    Ok(numerator * inverse)
}

/// Serialize a curve or field element to its compressed canonical form.
pub(crate) fn to_compressed_bytes<T: CanonicalSerialize>(value: &T) -> ThresholdResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(value.compressed_size());
    value
        .serialize_compressed(&mut bytes)
        .map_err(|_| Error::SerializationError)?;

    Ok(bytes)
}

/// XOR `bytes` with a keystream derived from the group element `g`.
///
/// The keystream is the HKDF expansion, instantiated with this [`CipherSuite`]'s
/// inner hasher, of the compressed encoding of `g`, salted with the suite's
/// context string. Its length is exactly the length of `bytes`.
pub(crate) fn xor_with_keystream<C: CipherSuite>(g: &G1<C>, bytes: &[u8]) -> ThresholdResult<Vec<u8>> {
    if bytes.len() > C::max_message_length() {
        return Err(Error::MessageTooLong(bytes.len()));
    }

    let ikm = to_compressed_bytes(g)?;
    let salt = C::context_string() + "keystream";
    let hkdf = hkdf::SimpleHkdf::<C::InnerHasher>::new(Some(salt.as_bytes()), &ikm);

    let mut keystream = Vec::with_capacity(bytes.len());
    keystream.resize(bytes.len(), 0u8);
    hkdf.expand(&[], &mut keystream)
        .map_err(|_| Error::MessageTooLong(bytes.len()))?;

    for (k, b) in keystream.iter_mut().zip(bytes) {
        *k ^= b;
    }

    Ok(keystream)
}
