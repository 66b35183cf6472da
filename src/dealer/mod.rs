pub(crate) mod key_set;
pub(crate) mod polynomial;

pub use key_set::{PublicKeySet, SecretKeySet};
pub use polynomial::{Commitment, Polynomial};
