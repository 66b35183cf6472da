// -*- mode: rust; -*-
//
// This file is part of tpke.
// Copyright (c) 2023 Toposware Inc.
// See LICENSE for licensing information.
//
// Authors:
// - Toposware developers <dev@toposware.com>

//! This library provides a Rust implementation of **threshold public-key encryption**
//! and **threshold BLS signatures** over pairing-friendly curves.
//!
//! A trusted dealer samples a random secret polynomial of degree `t`, and hands to each of
//! `n` participants its evaluation at a distinct point, along with a public commitment to the
//! polynomial. Anyone can then encrypt a message under the group public key, or check a
//! signature against it, while decrypting and signing require the collaboration of any `t + 1`
//! participants. Every share a participant produces can be checked by anyone against that
//! participant's public key share, so that misbehaving participants can be identified.
//!
//! Ciphertexts carry an integrity tag, checked with a pairing, binding all of their components:
//! a tampered ciphertext is always rejected before any decryption takes place.
//!
//! # Usage
//!
//! The scheme is parameterized by a [`CipherSuite`], defining the pairing engine and the
//! hash-to-curve method. This crate ships one over BLS12-381 in its [`testing`] module.
//!
//! A dealer creates a [`SecretKeySet`] of threshold `t`, and distributes the secret key share
//! of index `i` to participant `i`, for `i` in `0..n`. The corresponding [`PublicKeySet`]
//! is published.
//!
//! ```rust
//! # use tpke::ThresholdResult;
//! use tpke::parameters::ThresholdParameters;
//! use tpke::testing::Bls12381Sha256;
//! use tpke::SecretKeySet;
//! use rand::rngs::OsRng;
//!
//! # fn do_test() -> ThresholdResult<()> {
//! let params = ThresholdParameters::<Bls12381Sha256>::new(5, 2)?;
//!
//! // All methods requiring a source of entropy should use a cryptographic pseudorandom
//! // generator to prevent any risk of private information retrieval.
//! let sk_set = SecretKeySet::<Bls12381Sha256>::random(params.t as usize, OsRng);
//! let pk_set = sk_set.public_keys();
//!
//! let shares = sk_set.secret_key_shares(params.n);
//! # Ok(()) } fn main() { assert!(do_test().is_ok()); }
//! ```
//!
//! Anyone can encrypt a message under the group public key. Participants receiving the
//! ciphertext each produce a decryption share, which a [`Combiner`] verifies before
//! combining a threshold of them into the plaintext.
//!
//! ```rust
//! # use tpke::ThresholdResult;
//! # use tpke::parameters::ThresholdParameters;
//! # use tpke::testing::Bls12381Sha256;
//! # use tpke::SecretKeySet;
//! # use rand::rngs::OsRng;
//! use tpke::Combiner;
//!
//! # fn do_test() -> ThresholdResult<()> {
//! # let params = ThresholdParameters::<Bls12381Sha256>::new(5, 2)?;
//! # let sk_set = SecretKeySet::<Bls12381Sha256>::random(params.t as usize, OsRng);
//! # let pk_set = sk_set.public_keys();
//! # let shares = sk_set.secret_key_shares(params.n);
//! let ciphertext = pk_set.public_key().encrypt(b"hello", OsRng)?;
//!
//! let decryption_shares = shares
//!     .iter()
//!     .take(3)
//!     .map(|share| Ok((share.index(), share.decrypt_share(&ciphertext)?)))
//!     .collect::<ThresholdResult<Vec<_>>>()?;
//!
//! let combiner = Combiner::new(params, pk_set)?;
//! let verified = combiner.verify_decryption_shares(
//!     &ciphertext,
//!     decryption_shares.iter().map(|(index, share)| (*index, share)),
//! )?;
//!
//! assert_eq!(combiner.decrypt(&ciphertext, &verified)?, b"hello");
//! # Ok(()) } fn main() { assert!(do_test().is_ok()); }
//! ```
//!
//! Signing follows the same pattern: each participant signs the message with its
//! secret key share, and any `t + 1` verified signature shares are combined into
//! a signature valid under the group public key.
//!
//! ```rust
//! # use tpke::ThresholdResult;
//! # use tpke::parameters::ThresholdParameters;
//! # use tpke::testing::Bls12381Sha256;
//! # use tpke::{Combiner, SecretKeySet};
//! # use rand::rngs::OsRng;
//! # fn do_test() -> ThresholdResult<()> {
//! # let params = ThresholdParameters::<Bls12381Sha256>::new(5, 2)?;
//! # let sk_set = SecretKeySet::<Bls12381Sha256>::random(params.t as usize, OsRng);
//! # let pk_set = sk_set.public_keys();
//! # let shares = sk_set.secret_key_shares(params.n);
//! # let combiner = Combiner::new(params, pk_set.clone())?;
//! let message = b"Let's meet at noon";
//!
//! let signature_shares = shares
//!     .iter()
//!     .skip(2)
//!     .map(|share| Ok((share.index(), share.sign(message)?)))
//!     .collect::<ThresholdResult<Vec<_>>>()?;
//!
//! let verified = combiner.verify_signature_shares(
//!     message,
//!     signature_shares.iter().map(|(index, share)| (*index, share)),
//! )?;
//! let signature = combiner.sign(message, &verified)?;
//!
//! assert!(pk_set.public_key().verify(&signature, message));
//! # Ok(()) } fn main() { assert!(do_test().is_ok()); }
//! ```
//!
//! If some shares fail their verification, the combiner returns
//! [`Error::MisbehavingParticipants`] with the indices of their senders.
//! Shares can be combined without verification through
//! [`Combiner::combine_decryption_shares`] and [`Combiner::combine_signature_shares`],
//! in which case a single invalid share silently yields a wrong result.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(future_incompatible)]
#![allow(clippy::type_complexity)]

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

#[cfg(not(feature = "std"))]
extern crate alloc;

mod error;
pub use error::{Error, ThresholdResult};

mod serialization;
pub use serialization::{FromBytes, ToBytes};

/// A module defining the different key types used by a threshold encryption and signature instance.
pub mod keys;
/// A module defining the [`ThresholdParameters`](crate::parameters::ThresholdParameters) type used by an instance.
pub mod parameters;

mod ciphersuite;
pub use ciphersuite::CipherSuite;

pub(crate) mod utils;
pub use utils::{Scalar, G1, G2};

/// A module defining the trusted dealer's secret polynomial and key sets.
pub mod dealer;
pub use dealer::{PublicKeySet, SecretKeySet};

/// A module defining ciphertexts and decryption shares.
pub mod encrypt;
/// A module defining signatures and signature shares.
pub mod sign;

mod combiner;
pub use combiner::Combiner;

/// A module defining capability traits shared by keys and key shares.
pub mod traits;

/// This module provides a concrete implementation of a CipherSuite over BLS12-381,
/// with SHA-256 as underlying base hash function.
/// It is made available for testing and benchmarking purposes.
pub mod testing {
    use super::*;

    use ark_bls12_381::{g2, Bls12_381, G2Projective};
    use ark_ec::hashing::{
        curve_maps::wb::WBMap, map_to_curve_hasher::MapToCurveBasedHasher, HashToCurve,
    };
    use ark_ff::field_hashers::DefaultFieldHasher;

    use sha2::Sha256;
    use utils::{String, ToOwned};

    use zeroize::Zeroize;

    type G2Hasher =
        MapToCurveBasedHasher<G2Projective, DefaultFieldHasher<Sha256, 128>, WBMap<g2::Config>>;

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Zeroize)]
    /// An example instance over BLS12-381 with SHA-256 as underlying hasher.
    pub struct Bls12381Sha256;

    impl CipherSuite for Bls12381Sha256 {
        type Engine = Bls12_381;

        type InnerHasher = Sha256;

        fn context_string() -> String {
            "TPKE_BLS12381G2_SHA256".to_owned()
        }

        fn hash_to_g2(domain: &[u8], message: &[u8]) -> ThresholdResult<G2<Self>> {
            let hasher = G2Hasher::new(domain).map_err(|_| Error::HashToCurveError)?;
            let point = hasher.hash(message).map_err(|_| Error::HashToCurveError)?;

            Ok(point.into())
        }
    }
}
