mod signature;

pub use signature::{Signature, SignatureShare, VerifiedSignatureShare};
