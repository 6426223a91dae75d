#![allow(dead_code)]

use vfm::{
    database::AccountInfo,
    handler::TransactionType,
    header::{HeaderGas, LegacyGas},
    primitives::{address, Address, Bytes, B256, U256},
    Header, InMemoryDB, TxEnv,
};

pub(crate) const CALLER: Address = address!("0x1000000000000000000000000000000000000001");
pub(crate) const COINBASE: Address = address!("0x2000000000000000000000000000000000000002");
pub(crate) const CALLER_BALANCE: u64 = 1_000_000_000_000;
pub(crate) const GAS_CEIL: u64 = 30_000_000;

/// Installs a test subscriber so rejection logs show up in failing tests.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// Legacy Cancun genesis with a 30M gas limit and no blob usage.
pub(crate) fn legacy_genesis() -> Header {
    Header {
        gas: HeaderGas::Legacy(LegacyGas {
            gas_limit: GAS_CEIL,
            gas_used: 0,
            base_fee_per_gas: Some(1),
            blob_gas_used: Some(0),
            excess_blob_gas: Some(0),
        }),
        ..Default::default()
    }
}

pub(crate) fn funded_db() -> InMemoryDB {
    let mut db = InMemoryDB::default();
    db.insert_account_info(
        CALLER,
        AccountInfo::from_balance(U256::from(CALLER_BALANCE)),
    );
    db
}

/// Vector fee transaction with `blobs` blobs and 32 non-zero calldata bytes.
pub(crate) fn vector_tx(blobs: usize, fee_caps: [u64; 3], tip_caps: [u64; 3]) -> TxEnv {
    TxEnv {
        tx_type: TransactionType::VectorFee,
        caller: CALLER,
        gas_limit: 100_000,
        data: Bytes::from(vec![0xab; 32]),
        blob_hashes: vec![B256::repeat_byte(0x01); blobs],
        max_fees_per_gas: fee_caps.map(U256::from).into(),
        max_priority_fees_per_gas: tip_caps.map(U256::from).into(),
        ..Default::default()
    }
}

pub(crate) fn balance(db: &InMemoryDB, address: Address) -> U256 {
    db.account(&address)
        .map(|info| info.balance)
        .unwrap_or_default()
}
