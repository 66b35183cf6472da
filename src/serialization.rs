use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::utils::Vec;
use crate::{Error, ThresholdResult};

/// Utility trait for serializing an object of this crate to a vector of bytes.
pub trait ToBytes: CanonicalSerialize {
    /// Serialize this to a vector of bytes.
    fn to_bytes(&self) -> ThresholdResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.compressed_size());

        <Self as CanonicalSerialize>::serialize_compressed(self, &mut bytes)
            .map_err(|_| Error::SerializationError)?;

        Ok(bytes)
    }
}

/// Utility trait for deserializing an object of this crate from a slice of bytes.
pub trait FromBytes: CanonicalDeserialize + CanonicalSerialize {
    /// Attempt to deserialize a `T` from a slice of bytes.
    ///
    /// The slice must contain exactly one encoded value, trailing bytes are rejected.
    fn from_bytes(bytes: &[u8]) -> ThresholdResult<Self> {
        let value = Self::deserialize_compressed(bytes).map_err(|_| Error::DeserializationError)?;

        if value.compressed_size() != bytes.len() {
            return Err(Error::DeserializationError);
        }

        Ok(value)
    }
}

/// Utility macro for easily deriving `ToBytes` and `FromBytes` traits.
macro_rules! impl_serialization_traits {
    ($type_name:ident <$gen_param:ident>) => {
        impl<$gen_param: crate::CipherSuite> crate::ToBytes for $type_name<$gen_param> {}
        impl<$gen_param: crate::CipherSuite> crate::FromBytes for $type_name<$gen_param> {}
    };
}
pub(crate) use impl_serialization_traits;
