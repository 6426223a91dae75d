//! Base fees of a header, stored by header hash next to the header itself.
//!
//! Base fees are derived from the parent header and never part of the header encoding,
//! so they are kept in a side table. An entry is a convenience: a missing or unreadable
//! entry means the base fees are not cached, never that the header is invalid.
//!
//! The value is an RLP list of three big-endian integers. An absent element is written
//! as the empty string and reads back as zero.
use crate::{DBErrorMarker, KeyValueStore};
use alloy_rlp::{BufMut, Decodable, Encodable, Error as RlpError, Header as RlpHeader};
use core::fmt;
use primitives::{BigInt, Bytes, Dimension, PriceVector, Sign, B256};
use std::vec::Vec;
use tracing::{trace, warn};

/// Key prefix of the header hash to base fees table.
pub const HEADER_BASE_FEES_PREFIX: &[u8] = b"hb";

/// Error writing base fees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseFeesStoreError<E> {
    /// Base fees can not be negative.
    NegativeFee(Dimension),
    /// Store error.
    Store(E),
}

impl<E: fmt::Display> fmt::Display for BaseFeesStoreError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeFee(dimension) => {
                write!(f, "negative base fee in {dimension} dimension")
            }
            Self::Store(err) => write!(f, "base fees store error: {err}"),
        }
    }
}

impl<E: core::error::Error> core::error::Error for BaseFeesStoreError<E> {}

impl<E: DBErrorMarker> From<E> for BaseFeesStoreError<E> {
    fn from(value: E) -> Self {
        Self::Store(value)
    }
}

/// Key of the base fees of the header with hash `hash`: the prefix followed by the hash.
pub fn header_base_fees_key(hash: B256) -> [u8; 34] {
    let mut key = [0u8; 34];
    key[..2].copy_from_slice(HEADER_BASE_FEES_PREFIX);
    key[2..].copy_from_slice(hash.as_slice());
    key
}

/// Reads the base fees of the header with hash `hash`.
///
/// Returns `None` if no base fees are stored or the stored entry can not be read.
pub fn read_header_base_fees<S: KeyValueStore>(store: &S, hash: B256) -> Option<PriceVector> {
    let data = match store.get(&header_base_fees_key(hash)) {
        Ok(Some(data)) if !data.is_empty() => data,
        Ok(_) => return None,
        Err(err) => {
            warn!(target: "vfm::db", %hash, %err, "failed to read header base fees");
            return None;
        }
    };
    match decode_base_fees(&mut data.as_slice()) {
        Ok(base_fees) => Some(base_fees),
        Err(err) => {
            warn!(target: "vfm::db", %hash, %err, "undecodable header base fees");
            None
        }
    }
}

/// Stores the base fees of the header with hash `hash`.
///
/// Writing `None`, as for a legacy header, stores nothing.
pub fn write_header_base_fees<S: KeyValueStore>(
    store: &mut S,
    hash: B256,
    base_fees: Option<&PriceVector>,
) -> Result<(), BaseFeesStoreError<S::Error>> {
    let Some(base_fees) = base_fees else {
        return Ok(());
    };
    if let Some(dimension) = Dimension::ALL
        .into_iter()
        .find(|d| base_fees[*d].as_ref().is_some_and(|fee| fee.sign() == Sign::Minus))
    {
        return Err(BaseFeesStoreError::NegativeFee(dimension));
    }

    let mut encoded = Vec::new();
    encode_base_fees(base_fees, &mut encoded);
    store.put(&header_base_fees_key(hash), &encoded)?;
    trace!(target: "vfm::db", %hash, "stored header base fees");
    Ok(())
}

/// Removes the base fees of the header with hash `hash`.
pub fn delete_header_base_fees<S: KeyValueStore>(store: &mut S, hash: B256) -> Result<(), S::Error> {
    store.delete(&header_base_fees_key(hash))
}

/// Big-endian magnitude without leading zeros. Zero and absent values are empty.
fn magnitude(value: &Option<BigInt>) -> Vec<u8> {
    match value {
        Some(value) if value.sign() != Sign::NoSign => value.magnitude().to_bytes_be(),
        _ => Vec::new(),
    }
}

fn encode_base_fees(base_fees: &PriceVector, out: &mut dyn BufMut) {
    let items: Vec<Vec<u8>> = base_fees.iter().map(magnitude).collect();
    let payload_length = items.iter().map(|item| item.as_slice().length()).sum();
    RlpHeader {
        list: true,
        payload_length,
    }
    .encode(out);
    for item in &items {
        item.as_slice().encode(out);
    }
}

fn decode_base_fees(buf: &mut &[u8]) -> alloy_rlp::Result<PriceVector> {
    let head = RlpHeader::decode(buf)?;
    if !head.list {
        return Err(RlpError::UnexpectedString);
    }
    if buf.len() < head.payload_length {
        return Err(RlpError::InputTooShort);
    }
    let (mut body, rest) = buf.split_at(head.payload_length);

    let mut base_fees = PriceVector::absent();
    for dimension in Dimension::ALL {
        let bytes = Bytes::decode(&mut body)?;
        if bytes.first() == Some(&0) {
            return Err(RlpError::LeadingZero);
        }
        base_fees[dimension] = Some(BigInt::from_bytes_be(Sign::Plus, &bytes));
    }
    if !body.is_empty() {
        return Err(RlpError::ListLengthMismatch {
            expected: head.payload_length - body.len(),
            got: head.payload_length,
        });
    }
    *buf = rest;
    Ok(base_fees)
}
