//! Canonical byte encodings of parameters, keys and ciphertexts.
//!
//! Every type uses its arkworks `CanonicalSerialize` encoding in compressed
//! form. Group elements are fully validated on the way in: a G1/G2 value must
//! be on the curve and in the prime-order subgroup, a GT value must lie in the
//! order-r subgroup of Fq12. Lists and maps carry a little-endian `u64` length,
//! state ids and symbol code points are little-endian `u32`.
//!
//! [`Decode`] consumes the whole input and accepts only the canonical encoding:
//! the decoded value must encode back to the same bytes, which rules out
//! unsorted or repeated map keys.

use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};

use crate::automaton;
use crate::dfa::{Symbol, Transition};
use crate::error::{self, Error};
use crate::group::{is_in_gt_subgroup, Gt};
use crate::keyword;

pub const SCALAR_BYTES: usize = 32;
pub const G1_BYTES: usize = 48;
pub const G2_BYTES: usize = 96;
pub const GT_BYTES: usize = 576;
pub const LEN_BYTES: usize = 8;
pub const U32_BYTES: usize = 4;
pub const TAG_BYTES: usize = 32;

pub trait Encode {
    fn encode(&self) -> error::Result<Vec<u8>>;
}

impl<T: CanonicalSerialize> Encode for T {
    fn encode(&self) -> error::Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.compressed_size());
        self.serialize_compressed(&mut bytes)
            .map_err(|e| Error::Encode(e.to_string()))?;
        Ok(bytes)
    }
}

pub trait Decode: Sized {
    /// Decodes `bytes` in full with validation; leftover input is an error.
    fn decode(bytes: &[u8]) -> error::Result<Self>;
}

impl<T: CanonicalSerialize + CanonicalDeserialize> Decode for T {
    fn decode(bytes: &[u8]) -> error::Result<Self> {
        let mut reader = bytes;
        let value = T::deserialize_with_mode(&mut reader, Compress::Yes, Validate::Yes)
            .map_err(|e| Error::Decode(e.to_string()))?;
        if !reader.is_empty() {
            return Err(Error::Decode(format!("{} trailing bytes", reader.len())));
        }
        if value.encode()? != bytes {
            return Err(Error::Decode("non-canonical encoding".to_string()));
        }
        Ok(value)
    }
}

/// Compressed encoding of a target-group element.
pub(crate) fn gt_bytes(x: &Gt) -> error::Result<Vec<u8>> {
    x.encode()
}

fn check_gt(x: &Gt) -> Result<(), SerializationError> {
    if is_in_gt_subgroup(x) {
        Ok(())
    } else {
        Err(SerializationError::InvalidData)
    }
}

fn check_all<'a, T: Valid + 'a>(
    items: impl IntoIterator<Item = &'a T>,
) -> Result<(), SerializationError> {
    items.into_iter().try_for_each(T::check)
}

fn read<T: CanonicalDeserialize, R: Read>(
    reader: R,
    compress: Compress,
) -> Result<T, SerializationError> {
    T::deserialize_with_mode(reader, compress, Validate::No)
}

/// Reads a `len || items` list one item at a time, so the allocation follows
/// the bytes actually present rather than the declared length.
fn read_list<T: CanonicalDeserialize, R: Read>(
    mut reader: R,
    compress: Compress,
) -> Result<Vec<T>, SerializationError> {
    let len: u64 = read(&mut reader, compress)?;
    let mut items = Vec::new();
    for _ in 0..len {
        items.push(read(&mut reader, compress)?);
    }
    Ok(items)
}

fn finish<T: Valid>(value: T, validate: Validate) -> Result<T, SerializationError> {
    if let Validate::Yes = validate {
        value.check()?;
    }
    Ok(value)
}

impl CanonicalSerialize for Symbol {
    fn serialize_with_mode<W: Write>(
        &self,
        writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        u32::from(self.0).serialize_with_mode(writer, compress)
    }

    fn serialized_size(&self, _compress: Compress) -> usize {
        U32_BYTES
    }
}

impl Valid for Symbol {
    fn check(&self) -> Result<(), SerializationError> {
        Ok(())
    }
}

impl CanonicalDeserialize for Symbol {
    fn deserialize_with_mode<R: Read>(
        reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let code = u32::deserialize_with_mode(reader, compress, validate)?;
        char::from_u32(code)
            .map(Symbol)
            .ok_or(SerializationError::InvalidData)
    }
}

impl CanonicalSerialize for Transition {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        self.from.serialize_with_mode(&mut writer, compress)?;
        self.to.serialize_with_mode(&mut writer, compress)?;
        Symbol(self.symbol).serialize_with_mode(&mut writer, compress)
    }

    fn serialized_size(&self, _compress: Compress) -> usize {
        3 * U32_BYTES
    }
}

impl Valid for Transition {
    fn check(&self) -> Result<(), SerializationError> {
        Ok(())
    }
}

impl CanonicalDeserialize for Transition {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        _validate: Validate,
    ) -> Result<Self, SerializationError> {
        let from = read(&mut reader, compress)?;
        let to = read(&mut reader, compress)?;
        let symbol: Symbol = read(&mut reader, compress)?;
        Ok(Transition::new(from, to, symbol.0))
    }
}

impl Valid for keyword::PublicParams {
    fn check(&self) -> Result<(), SerializationError> {
        check_gt(&self.omega)?;
        check_all([&self.g, &self.g0, &self.g1, &self.v1, &self.v2, &self.v3, &self.v4])
    }
}

impl CanonicalDeserialize for keyword::PublicParams {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let pp = Self {
            omega: read(&mut reader, compress)?,
            g: read(&mut reader, compress)?,
            g0: read(&mut reader, compress)?,
            g1: read(&mut reader, compress)?,
            v1: read(&mut reader, compress)?,
            v2: read(&mut reader, compress)?,
            v3: read(&mut reader, compress)?,
            v4: read(&mut reader, compress)?,
        };
        finish(pp, validate)
    }
}

impl Valid for keyword::Ciphertext {
    fn check(&self) -> Result<(), SerializationError> {
        check_gt(&self.c)?;
        check_all([&self.c0, &self.c1, &self.c2, &self.c3, &self.c4])
    }
}

impl CanonicalDeserialize for keyword::Ciphertext {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let ct = Self {
            c: read(&mut reader, compress)?,
            c0: read(&mut reader, compress)?,
            c1: read(&mut reader, compress)?,
            c2: read(&mut reader, compress)?,
            c3: read(&mut reader, compress)?,
            c4: read(&mut reader, compress)?,
        };
        finish(ct, validate)
    }
}

impl Valid for automaton::PublicParams {
    fn check(&self) -> Result<(), SerializationError> {
        check_gt(&self.e)?;
        check_all([&self.g, &self.z, &self.h_start, &self.h_end])?;
        check_all(self.h.values())
    }
}

impl CanonicalDeserialize for automaton::PublicParams {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let pp = Self {
            g: read(&mut reader, compress)?,
            z: read(&mut reader, compress)?,
            h_start: read(&mut reader, compress)?,
            h_end: read(&mut reader, compress)?,
            h: read(&mut reader, compress)?,
            e: read(&mut reader, compress)?,
        };
        finish(pp, validate)
    }
}

impl Valid for automaton::SecretKey {
    fn check(&self) -> Result<(), SerializationError> {
        check_all([&self.start_k1, &self.start_k2])?;
        check_all(&self.transitions)?;
        check_all(&self.accept)?;

        // One transition per (state, symbol), accept states strictly increasing
        let mut edges: Vec<_> = self
            .transitions
            .iter()
            .map(|tk| (tk.transition.from, tk.transition.symbol))
            .collect();
        edges.sort_unstable();
        if edges.windows(2).any(|w| w[0] == w[1]) {
            return Err(SerializationError::InvalidData);
        }
        if self.accept.windows(2).any(|w| w[0].state >= w[1].state) {
            return Err(SerializationError::InvalidData);
        }
        Ok(())
    }
}

impl CanonicalDeserialize for automaton::SecretKey {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let sk = Self {
            start_state: read(&mut reader, compress)?,
            start_k1: read(&mut reader, compress)?,
            start_k2: read(&mut reader, compress)?,
            transitions: read_list(&mut reader, compress)?,
            accept: read_list(&mut reader, compress)?,
        };
        finish(sk, validate)
    }
}

impl Valid for automaton::Ciphertext {
    fn check(&self) -> Result<(), SerializationError> {
        if self.positions.is_empty() {
            return Err(SerializationError::InvalidData);
        }
        check_gt(&self.cm)?;
        check_all([&self.start_c1, &self.start_c2, &self.end_c1, &self.end_c2])?;
        check_all(&self.positions)
    }
}

impl CanonicalDeserialize for automaton::Ciphertext {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let ct = Self {
            start_c1: read(&mut reader, compress)?,
            start_c2: read(&mut reader, compress)?,
            positions: read_list(&mut reader, compress)?,
            end_c1: read(&mut reader, compress)?,
            end_c2: read(&mut reader, compress)?,
            cm: read(&mut reader, compress)?,
            tag: read(&mut reader, compress)?,
        };
        finish(ct, validate)
    }
}
