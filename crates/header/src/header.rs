//! Block header data structure.
use primitives::{
    keccak256, Address, Bloom, Bytes, Dimension, GasVector, PriceVector, B256, B64, U256,
};

/// Block header.
///
/// The gas related fields live in [`HeaderGas`], which is either the legacy scalar
/// layout or the vector layout. Reading legacy scalars off a vector-active header
/// through [`Header::gas_limit`] and friends yields zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Header {
    /// Parent block hash
    pub parent_hash: B256,
    /// Uncle hash (ommers hash)
    pub uncle_hash: B256,
    /// Block coinbase/beneficiary address
    pub coinbase: Address,
    /// State root hash after executing this block
    pub state_root: B256,
    /// Root hash of the transaction trie
    pub transactions_root: B256,
    /// Root hash of the receipt trie
    pub receipts_root: B256,
    /// Bloom filter for logs
    pub logs_bloom: Bloom,
    /// Block difficulty (pre-merge) or 0 (post-merge)
    pub difficulty: U256,
    /// Block number
    pub number: u64,
    /// Block timestamp
    pub timestamp: u64,
    /// Extra data field
    pub extra_data: Bytes,
    /// Mix hash for PoW validation
    pub mix_hash: B256,
    /// PoW nonce
    pub nonce: B64,
    /// Withdrawals root hash (post-Shanghai)
    pub withdrawals_root: Option<B256>,
    /// Parent beacon block root (EIP-4788)
    pub parent_beacon_block_root: Option<B256>,
    /// Requests hash (EIP-7685)
    pub requests_hash: Option<B256>,
    /// Gas fields, legacy or vector.
    pub gas: HeaderGas,
    /// Base fees of the block.
    ///
    /// Derived from the parent and never part of the encoding. Consensus checks it when
    /// present but does not require it.
    pub base_fees: Option<PriceVector>,
}

/// Gas fields of a [`Header`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum HeaderGas {
    /// Single dimension gas accounting.
    Legacy(LegacyGas),
    /// Per-dimension gas accounting.
    Vector(VectorGas),
}

impl Default for HeaderGas {
    fn default() -> Self {
        Self::Legacy(LegacyGas::default())
    }
}

/// Scalar gas fields of a legacy header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LegacyGas {
    /// Gas limit for this block
    pub gas_limit: u64,
    /// Gas used by all transactions in this block
    pub gas_used: u64,
    /// Base fee per gas (EIP-1559)
    pub base_fee_per_gas: Option<u64>,
    /// Blob gas used (EIP-4844)
    pub blob_gas_used: Option<u64>,
    /// Excess blob gas (EIP-4844)
    pub excess_blob_gas: Option<u64>,
}

/// Per-dimension gas fields of a vector-active header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct VectorGas {
    /// Gas limit of every dimension.
    pub gas_limits: GasVector,
    /// Gas used in every dimension.
    pub gas_used: GasVector,
    /// Excess gas accumulated in every dimension.
    pub excess_gas: GasVector,
}

impl VectorGas {
    /// Creates vector gas fields.
    pub const fn new(gas_limits: GasVector, gas_used: GasVector, excess_gas: GasVector) -> Self {
        Self {
            gas_limits,
            gas_used,
            excess_gas,
        }
    }
}

impl Header {
    /// Returns `true` if the header carries per-dimension gas fields.
    #[inline]
    pub fn is_vector_active(&self) -> bool {
        matches!(self.gas, HeaderGas::Vector(_))
    }

    /// Returns the legacy gas fields, if any.
    #[inline]
    pub fn legacy_gas(&self) -> Option<&LegacyGas> {
        match &self.gas {
            HeaderGas::Legacy(gas) => Some(gas),
            HeaderGas::Vector(_) => None,
        }
    }

    /// Returns the vector gas fields, if any.
    #[inline]
    pub fn vector_gas(&self) -> Option<&VectorGas> {
        match &self.gas {
            HeaderGas::Legacy(_) => None,
            HeaderGas::Vector(gas) => Some(gas),
        }
    }

    /// Legacy gas limit. Zero for a vector-active header.
    pub fn gas_limit(&self) -> u64 {
        self.legacy_gas().map_or(0, |gas| gas.gas_limit)
    }

    /// Legacy gas used. Zero for a vector-active header.
    pub fn gas_used(&self) -> u64 {
        self.legacy_gas().map_or(0, |gas| gas.gas_used)
    }

    /// Legacy base fee per gas. `None` for a vector-active header.
    pub fn base_fee_per_gas(&self) -> Option<u64> {
        self.legacy_gas().and_then(|gas| gas.base_fee_per_gas)
    }

    /// Legacy blob gas used. `None` for a vector-active header.
    pub fn blob_gas_used(&self) -> Option<u64> {
        self.legacy_gas().and_then(|gas| gas.blob_gas_used)
    }

    /// Legacy excess blob gas. `None` for a vector-active header.
    pub fn excess_blob_gas(&self) -> Option<u64> {
        self.legacy_gas().and_then(|gas| gas.excess_blob_gas)
    }

    /// Gas limits per dimension. `None` for a legacy header.
    pub fn gas_limits(&self) -> Option<&GasVector> {
        self.vector_gas().map(|gas| &gas.gas_limits)
    }

    /// Gas used per dimension. `None` for a legacy header.
    pub fn gas_used_vector(&self) -> Option<&GasVector> {
        self.vector_gas().map(|gas| &gas.gas_used)
    }

    /// Excess gas per dimension. `None` for a legacy header.
    pub fn excess_gas(&self) -> Option<&GasVector> {
        self.vector_gas().map(|gas| &gas.excess_gas)
    }

    /// Accounts execution gas consumed by a transaction included in this block.
    ///
    /// Adds to the execution dimension of a vector-active header, or to the scalar gas
    /// used of a legacy header.
    pub fn add_execution_gas_used(&mut self, gas: u64) {
        match &mut self.gas {
            HeaderGas::Legacy(legacy) => legacy.gas_used = legacy.gas_used.saturating_add(gas),
            HeaderGas::Vector(vector) => {
                let used = &mut vector.gas_used[Dimension::Execution];
                *used = used.saturating_add(gas);
            }
        }
    }

    /// Computes the block hash, the keccak256 of the RLP encoded header.
    ///
    /// This recomputes the encoding on every call.
    pub fn hash_slow(&self) -> B256 {
        keccak256(alloy_rlp::encode(self))
    }
}
