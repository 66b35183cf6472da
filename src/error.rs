use crate::utils::Vec;

/// Errors that may happen while dealing, encrypting, signing or combining shares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Serialisation error
    SerializationError,
    /// Deserialisation error
    DeserializationError,
    /// The byte length of an encoded collection is not a non-zero multiple of its element size
    InvalidLength {
        /// The size in bytes of a single encoded element.
        chunk: usize,
        /// The length of the provided encoding.
        length: usize,
    },
    /// A polynomial or commitment must have at least one coefficient
    EmptyPolynomial,
    /// Invalid threshold parameters
    InvalidThresholdParameters {
        /// The number of participants.
        n: u32,
        /// The threshold.
        t: u32,
    },
    /// The threshold parameters don't match the degree of the public key set
    ThresholdMismatch {
        /// The threshold of the parameters.
        expected: usize,
        /// The degree of the public key set.
        actual: usize,
    },
    /// Hashing to the curve failed
    HashToCurveError,
    /// The message is longer than the keystream can cover
    MessageTooLong(usize),
    /// The ciphertext failed its pairing consistency check
    InvalidCiphertext,
    /// Not enough shares were provided to reach the threshold
    InsufficientShares {
        /// The number of shares required, i.e. `t + 1`.
        required: usize,
        /// The number of shares provided.
        provided: usize,
    },
    /// Two shares were provided for the same participant index
    DuplicateShareIndex(u32),
    /// A share was provided for an index outside of the participant set
    UnknownParticipant(u32),
    /// A share failed its verification against the participant's public key share
    ShareVerificationError(u32),
    /// A verified decryption share was verified against another ciphertext
    ForeignDecryptionShare(u32),
    /// Participants which provided invalid shares, with their indices
    MisbehavingParticipants(Vec<u32>),
    /// Invalid signature
    InvalidSignature,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Error::SerializationError => {
                write!(f, "An error happened while serialising.")
            }
            Error::DeserializationError => {
                write!(f, "An error happened while deserialising.")
            }
            Error::InvalidLength { chunk, length } => {
                write!(
                    f,
                    "The byte length {} is not a non-zero multiple of {}.",
                    length, chunk
                )
            }
            Error::EmptyPolynomial => {
                write!(f, "A polynomial must have at least one coefficient.")
            }
            Error::InvalidThresholdParameters { n, t } => {
                write!(
                    f,
                    "Invalid threshold parameters: {} participants with threshold {}.",
                    n, t
                )
            }
            Error::ThresholdMismatch { expected, actual } => {
                write!(
                    f,
                    "The threshold {} does not match the public key set degree {}.",
                    expected, actual
                )
            }
            Error::HashToCurveError => {
                write!(f, "Could not hash the message to the curve.")
            }
            Error::MessageTooLong(len) => {
                write!(f, "The message length {} exceeds the keystream size.", len)
            }
            Error::InvalidCiphertext => {
                write!(f, "The ciphertext is not valid.")
            }
            Error::InsufficientShares { required, provided } => {
                write!(
                    f,
                    "Not enough shares: {} required, {} provided.",
                    required, provided
                )
            }
            Error::DuplicateShareIndex(index) => {
                write!(f, "Duplicate share for participant {}.", index)
            }
            Error::UnknownParticipant(index) => {
                write!(f, "Participant {} is not part of the participant set.", index)
            }
            Error::ShareVerificationError(index) => {
                write!(f, "The share of participant {} is not correct.", index)
            }
            Error::ForeignDecryptionShare(index) => {
                write!(
                    f,
                    "The decryption share of participant {} belongs to another ciphertext.",
                    index
                )
            }
            Error::MisbehavingParticipants(indices) => {
                write!(
                    f,
                    "These participants provided invalid shares: {:?}",
                    indices
                )
            }
            Error::InvalidSignature => {
                write!(f, "The signature is not correct.")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Type alias for a `Result` returning this crate's [`Error`].
pub type ThresholdResult<T> = Result<T, Error>;
