//! Block environment of a state transition.
use fee_market::{blob_base_fee, VectorFeeConfig};
use header::Header;
use primitives::{Address, BigInt, PriceVector};

/// The block environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockEnv {
    /// The number of ancestor blocks of this block (block height).
    pub number: u64,
    /// Beneficiary (Coinbase or miner) is a address that have signed the block.
    ///
    /// This is the receiver address of all the tips paid by transactions.
    pub beneficiary: Address,
    /// The timestamp of the block in seconds since the UNIX epoch.
    pub timestamp: u64,
    /// Legacy base fee per gas.
    pub basefee: Option<u64>,
    /// Legacy blob gas price, derived from the excess blob gas of the block.
    pub blob_gasprice: Option<BigInt>,
    /// Base fees per dimension of a vector-active block.
    pub base_fees: Option<PriceVector>,
}

impl BlockEnv {
    /// Builds the block environment of `header`.
    ///
    /// Base fees are taken from the header as is; a header decoded from the wire carries
    /// none, and the caller fills them in from the parent.
    pub fn from_header(config: &VectorFeeConfig, header: &Header) -> Self {
        Self {
            number: header.number,
            beneficiary: header.coinbase,
            timestamp: header.timestamp,
            basefee: header.base_fee_per_gas(),
            blob_gasprice: header
                .excess_blob_gas()
                .map(|excess| blob_base_fee(config, excess)),
            base_fees: header.base_fees.clone(),
        }
    }

    /// Sets the base fees.
    #[must_use]
    pub fn with_base_fees(mut self, base_fees: PriceVector) -> Self {
        self.base_fees = Some(base_fees);
        self
    }
}
