//! RLP codec of [`Header`].
//!
//! Both layouts share the prefix
//! `parent_hash, uncle_hash, coinbase, state_root, transactions_root, receipts_root,
//! logs_bloom, difficulty, number`.
//!
//! Legacy layout continues with
//! `gas_limit, gas_used, timestamp, extra_data, mix_hash, nonce` followed by the optional
//! suffix `base_fee_per_gas, withdrawals_root, blob_gas_used, excess_blob_gas,
//! parent_beacon_block_root, requests_hash`. The suffix telescopes: it ends at the last
//! present field and every absent field before it is written as an empty string.
//!
//! Vector layout continues with `timestamp, extra_data, mix_hash, nonce,
//! withdrawals_root, parent_beacon_block_root, requests_hash, gas_limits, gas_used,
//! excess_gas`. The three roots are always written, absent ones as empty strings.
use crate::{Header, HeaderGas, LegacyGas, VectorGas};
use alloy_rlp::{
    BufMut, Decodable, Encodable, Error as RlpError, Header as RlpHeader, EMPTY_STRING_CODE,
};
use primitives::{Bytes, GasVector, B256};

/// Error returned when the fields after `number` fit neither layout.
const NEITHER_LAYOUT: RlpError = RlpError::Custom("header matches neither legacy nor vector layout");

/// Optional field of the trailing part of the header.
#[derive(Clone, Copy)]
enum Optional {
    Int(Option<u64>),
    Hash(Option<B256>),
}

impl Optional {
    fn is_some(&self) -> bool {
        match self {
            Self::Int(value) => value.is_some(),
            Self::Hash(value) => value.is_some(),
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Int(Some(value)) => value.length(),
            Self::Hash(Some(value)) => value.length(),
            _ => 1,
        }
    }

    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Int(Some(value)) => value.encode(out),
            Self::Hash(Some(value)) => value.encode(out),
            _ => out.put_u8(EMPTY_STRING_CODE),
        }
    }
}

/// Layout of the fields following `number`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layout {
    Legacy,
    Vector,
}

impl Header {
    /// Legacy optional suffix, cut after the last present field.
    fn legacy_suffix(&self, gas: &LegacyGas) -> ([Optional; 6], usize) {
        let suffix = [
            Optional::Int(gas.base_fee_per_gas),
            Optional::Hash(self.withdrawals_root),
            Optional::Int(gas.blob_gas_used),
            Optional::Int(gas.excess_blob_gas),
            Optional::Hash(self.parent_beacon_block_root),
            Optional::Hash(self.requests_hash),
        ];
        let end = suffix
            .iter()
            .rposition(Optional::is_some)
            .map_or(0, |last| last + 1);
        (suffix, end)
    }

    fn vector_roots(&self) -> [Optional; 3] {
        [
            Optional::Hash(self.withdrawals_root),
            Optional::Hash(self.parent_beacon_block_root),
            Optional::Hash(self.requests_hash),
        ]
    }

    fn payload_length(&self) -> usize {
        let mut length = self.parent_hash.length()
            + self.uncle_hash.length()
            + self.coinbase.length()
            + self.state_root.length()
            + self.transactions_root.length()
            + self.receipts_root.length()
            + self.logs_bloom.length()
            + self.difficulty.length()
            + self.number.length();

        if let HeaderGas::Legacy(gas) = &self.gas {
            length += gas.gas_limit.length() + gas.gas_used.length();
        }

        length += self.timestamp.length()
            + self.extra_data.length()
            + self.mix_hash.length()
            + self.nonce.length();

        match &self.gas {
            HeaderGas::Legacy(gas) => {
                let (suffix, end) = self.legacy_suffix(gas);
                length += suffix[..end].iter().map(Optional::length).sum::<usize>();
            }
            HeaderGas::Vector(gas) => {
                length += self.vector_roots().iter().map(Optional::length).sum::<usize>();
                length += gas.gas_limits.length() + gas.gas_used.length() + gas.excess_gas.length();
            }
        }
        length
    }
}

impl Encodable for Header {
    fn encode(&self, out: &mut dyn BufMut) {
        RlpHeader {
            list: true,
            payload_length: self.payload_length(),
        }
        .encode(out);

        self.parent_hash.encode(out);
        self.uncle_hash.encode(out);
        self.coinbase.encode(out);
        self.state_root.encode(out);
        self.transactions_root.encode(out);
        self.receipts_root.encode(out);
        self.logs_bloom.encode(out);
        self.difficulty.encode(out);
        self.number.encode(out);

        if let HeaderGas::Legacy(gas) = &self.gas {
            gas.gas_limit.encode(out);
            gas.gas_used.encode(out);
        }

        self.timestamp.encode(out);
        self.extra_data.encode(out);
        self.mix_hash.encode(out);
        self.nonce.encode(out);

        match &self.gas {
            HeaderGas::Legacy(gas) => {
                let (suffix, end) = self.legacy_suffix(gas);
                for field in &suffix[..end] {
                    field.encode(out);
                }
            }
            HeaderGas::Vector(gas) => {
                for root in self.vector_roots() {
                    root.encode(out);
                }
                gas.gas_limits.encode(out);
                gas.gas_used.encode(out);
                gas.excess_gas.encode(out);
            }
        }
    }

    fn length(&self) -> usize {
        let payload_length = self.payload_length();
        payload_length + alloy_rlp::length_of_length(payload_length)
    }
}

impl Decodable for Header {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let rlp_head = RlpHeader::decode(buf)?;
        if !rlp_head.list {
            return Err(RlpError::UnexpectedString);
        }
        if buf.len() < rlp_head.payload_length {
            return Err(RlpError::InputTooShort);
        }
        let (mut body, rest) = buf.split_at(rlp_head.payload_length);
        let body = &mut body;

        let mut header = Self {
            parent_hash: Decodable::decode(body)?,
            uncle_hash: Decodable::decode(body)?,
            coinbase: Decodable::decode(body)?,
            state_root: Decodable::decode(body)?,
            transactions_root: Decodable::decode(body)?,
            receipts_root: Decodable::decode(body)?,
            logs_bloom: Decodable::decode(body)?,
            difficulty: Decodable::decode(body)?,
            number: Decodable::decode(body)?,
            ..Default::default()
        };

        // Either the legacy gas limit or the vector timestamp.
        let first = u64::decode(body)?;
        let layout = detect_layout(body)?;
        let mut legacy = LegacyGas::default();
        match layout {
            Layout::Legacy => {
                legacy.gas_limit = first;
                legacy.gas_used = u64::decode(body)?;
                header.timestamp = u64::decode(body)?;
            }
            Layout::Vector => header.timestamp = first,
        }

        header.extra_data = Bytes::decode(body)?;
        header.mix_hash = Decodable::decode(body)?;
        header.nonce = Decodable::decode(body)?;

        match layout {
            Layout::Legacy => {
                decode_legacy_suffix(body, &mut header, &mut legacy)?;
                header.gas = HeaderGas::Legacy(legacy);
            }
            Layout::Vector => {
                header.gas = HeaderGas::Vector(decode_vector_suffix(body, &mut header)?);
            }
        }

        if !body.is_empty() {
            return Err(RlpError::ListLengthMismatch {
                expected: rlp_head.payload_length - body.len(),
                got: rlp_head.payload_length,
            });
        }
        *buf = rest;
        Ok(header)
    }
}

/// Decides the layout from the two items following the first integer after `number`,
/// without consuming them.
///
/// In the legacy layout both are integers (`gas_used`, `timestamp`). In the vector
/// layout they are `extra_data` and the 32 byte `mix_hash`, and the mix hash never
/// decodes as an integer. A well formed item that is not an integer selects the vector
/// layout. Running out of input is a decoding error, never a layout signal.
fn detect_layout(mut lookahead: &[u8]) -> alloy_rlp::Result<Layout> {
    for _ in 0..2 {
        if !next_is_u64(&mut lookahead)? {
            return Ok(Layout::Vector);
        }
    }
    Ok(Layout::Legacy)
}

/// Advances over the next item and reports whether it is a canonical `u64`.
fn next_is_u64(buf: &mut &[u8]) -> alloy_rlp::Result<bool> {
    let mut probe = *buf;
    match u64::decode(&mut probe) {
        Ok(_) => {
            *buf = probe;
            Ok(true)
        }
        Err(RlpError::InputTooShort) => Err(RlpError::InputTooShort),
        Err(_) => {
            skip_item(buf)?;
            Ok(false)
        }
    }
}

fn skip_item(buf: &mut &[u8]) -> alloy_rlp::Result<()> {
    let head = RlpHeader::decode(buf)?;
    if buf.len() < head.payload_length {
        return Err(RlpError::InputTooShort);
    }
    *buf = &buf[head.payload_length..];
    Ok(())
}

/// Decodes the optional legacy suffix. Decoding stops at the end of the list.
///
/// An empty string in a hash position reads back as `None`. In an integer position it
/// reads back as `Some(0)`, since an absent integer and a zero integer share the same
/// encoding.
fn decode_legacy_suffix(
    body: &mut &[u8],
    header: &mut Header,
    gas: &mut LegacyGas,
) -> alloy_rlp::Result<()> {
    if body.is_empty() {
        return Ok(());
    }
    gas.base_fee_per_gas = Some(u64::decode(body)?);
    if body.is_empty() {
        return Ok(());
    }
    header.withdrawals_root = decode_optional_hash(body)?;
    if body.is_empty() {
        return Ok(());
    }
    gas.blob_gas_used = Some(u64::decode(body)?);
    if body.is_empty() {
        return Ok(());
    }
    gas.excess_blob_gas = Some(u64::decode(body)?);
    if body.is_empty() {
        return Ok(());
    }
    header.parent_beacon_block_root = decode_optional_hash(body)?;
    if body.is_empty() {
        return Ok(());
    }
    header.requests_hash = decode_optional_hash(body)?;
    Ok(())
}

/// Decodes the vector suffix. All six items are required.
fn decode_vector_suffix(body: &mut &[u8], header: &mut Header) -> alloy_rlp::Result<VectorGas> {
    header.withdrawals_root = decode_required(body, decode_optional_hash)?;
    header.parent_beacon_block_root = decode_required(body, decode_optional_hash)?;
    header.requests_hash = decode_required(body, decode_optional_hash)?;

    Ok(VectorGas::new(
        decode_required(body, decode_gas_vector)?,
        decode_required(body, decode_gas_vector)?,
        decode_required(body, decode_gas_vector)?,
    ))
}

fn decode_required<T>(
    body: &mut &[u8],
    decode: fn(&mut &[u8]) -> alloy_rlp::Result<T>,
) -> alloy_rlp::Result<T> {
    if body.is_empty() {
        return Err(NEITHER_LAYOUT);
    }
    decode(body)
}

fn decode_gas_vector(body: &mut &[u8]) -> alloy_rlp::Result<GasVector> {
    GasVector::decode(body).map_err(|err| match err {
        RlpError::UnexpectedString => NEITHER_LAYOUT,
        err => err,
    })
}

fn decode_optional_hash(body: &mut &[u8]) -> alloy_rlp::Result<Option<B256>> {
    if body.first() == Some(&EMPTY_STRING_CODE) {
        *body = &body[1..];
        return Ok(None);
    }
    B256::decode(body).map(Some)
}
