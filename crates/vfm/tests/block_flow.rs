//! Block over block flow: building, encoding, decoding and verifying vector headers
//! while settling transactions against account state.
mod common;

use alloy_rlp::{Decodable, Encodable};
use common::*;
use vfm::{
    consensus::base_fees_from_parent,
    database::{read_header_base_fees, write_header_base_fees, MemoryKvStore},
    handler::TransactionType,
    primitives::{Dimension, GasVector, PriceVector, U256},
    BlockBuilder, CfgEnv, Header, InvalidHeader, InvalidTransaction, TransitionError, TxEnv,
    VectorFeeConfig,
};

fn cfg() -> CfgEnv {
    CfgEnv::new(VectorFeeConfig::activated_at(1))
}

fn roundtrip(header: &Header) -> Header {
    let mut buf = Vec::new();
    header.encode(&mut buf);
    assert_eq!(buf.len(), header.length());
    Header::decode(&mut buf.as_slice()).unwrap()
}

#[test]
fn first_vector_block_settles_every_dimension() {
    init_tracing();
    let mut db = funded_db();
    let genesis = legacy_genesis();

    let mut builder = BlockBuilder::new(cfg(), &genesis, 12, GAS_CEIL, COINBASE, &mut db).unwrap();
    assert_eq!(
        builder.block_env().base_fees,
        Some(PriceVector::from_u64s(1, 1, 1))
    );

    let outcome = builder
        .transact(&vector_tx(1, [10, 10, 10], [2, 0, 1]), 60_000)
        .unwrap();
    // 32 non-zero bytes are 128 tokens of 4 gas each
    assert_eq!(outcome.gas_used, GasVector::new(60_000, 131_072, 512));
    assert_eq!(builder.gas_pool().gas(), GAS_CEIL - 60_000);

    let header = builder.finish_commit();
    assert_eq!(
        header.gas_used_vector(),
        Some(&GasVector::new(60_000, 131_072, 512))
    );
    assert_eq!(header.parent_hash, genesis.hash_slow());
    assert_eq!(header.number, 1);

    // caller pays the effective prices [3, 1, 2], the beneficiary receives the tips [2, 0, 1]
    let paid = 60_000 * 3 + 131_072 + 512 * 2;
    let tip = 60_000 * 2 + 512;
    assert_eq!(balance(&db, CALLER), U256::from(CALLER_BALANCE - paid));
    assert_eq!(balance(&db, COINBASE), U256::from(tip));
    // the rest is burned at the base fees
    assert_eq!(paid - tip, 60_000 + 131_072 + 512);
}

#[test]
fn chain_of_vector_blocks_verifies() {
    init_tracing();
    let config = cfg();
    let mut db = funded_db();
    let mut parent = legacy_genesis();

    for number in 1..=12u64 {
        let mut builder = BlockBuilder::new(
            config.clone(),
            &parent,
            number * 12,
            GAS_CEIL,
            COINBASE,
            &mut db,
        )
        .unwrap();
        let base_fees = builder.block_env().base_fees.clone().unwrap();
        assert!(!base_fees.contains_absent());

        // every block fills the blob dimension, above its target
        let fee_caps = [1_000, 1_000, 1_000];
        builder.transact(&vector_tx(6, fee_caps, [1, 1, 1]), 21_000).unwrap();
        let header = builder.finish_commit();

        let mut decoded = roundtrip(&header);
        assert_eq!(decoded.base_fees, None);
        assert_eq!(decoded.hash_slow(), header.hash_slow());
        vfm::verify_vector_header(&config.vector_fee, &parent, &decoded).unwrap();

        // the base fees of a decoded header are re-derived from its parent
        decoded.base_fees = Some(base_fees_from_parent(&config.vector_fee, &parent));
        assert_eq!(decoded.base_fees, header.base_fees);
        vfm::verify_vector_header(&config.vector_fee, &parent, &decoded).unwrap();

        parent = decoded;
    }

    let excess = parent.excess_gas().copied().unwrap();
    assert_eq!(excess[Dimension::Execution], 0);
    assert!(excess[Dimension::Blob] > 0);
    assert_eq!(excess[Dimension::Calldata], 0);
}

#[test]
fn base_fees_survive_the_store() {
    let config = cfg();
    let mut db = funded_db();
    let mut store = MemoryKvStore::default();

    let builder = BlockBuilder::new(config.clone(), &legacy_genesis(), 12, GAS_CEIL, COINBASE, &mut db)
        .unwrap();
    let (header, _) = builder.finish();
    let hash = header.hash_slow();
    write_header_base_fees(&mut store, hash, header.base_fees.as_ref()).unwrap();

    let mut decoded = roundtrip(&header);
    decoded.base_fees = read_header_base_fees(&store, hash);
    assert_eq!(decoded, header);

    let mut child = BlockBuilder::new(config.clone(), &decoded, 24, GAS_CEIL, COINBASE, &mut db)
        .unwrap()
        .finish()
        .0;
    vfm::verify_vector_header(&config.vector_fee, &decoded, &child).unwrap();

    child.base_fees = Some(PriceVector::from_u64s(1, 2, 1));
    assert!(matches!(
        vfm::verify_vector_header(&config.vector_fee, &decoded, &child),
        Err(InvalidHeader::BaseFeesMismatch { .. })
    ));
}

#[test]
fn failed_transaction_leaves_block_untouched() {
    let mut db = funded_db();
    let mut builder =
        BlockBuilder::new(cfg(), &legacy_genesis(), 12, GAS_CEIL, COINBASE, &mut db).unwrap();

    let result = builder.transact(&vector_tx(1, [10, 10, 10], [2, 0, 1]), 100_001);
    assert_eq!(
        result,
        Err(TransitionError::Transaction(
            InvalidTransaction::GasUsedExceedsLimit {
                used: 100_001,
                limit: 100_000,
            }
        ))
    );
    assert_eq!(builder.gas_pool().gas(), GAS_CEIL);
    assert_eq!(builder.header().gas_used_vector(), Some(&GasVector::ZERO));

    let (_, changes) = builder.finish();
    assert!(changes.values().all(|account| !account.is_touched()));
}

#[test]
fn blob_dimension_fills_up() {
    let mut db = funded_db();
    let mut builder =
        BlockBuilder::new(cfg(), &legacy_genesis(), 12, GAS_CEIL, COINBASE, &mut db).unwrap();

    builder.transact(&vector_tx(6, [10, 10, 10], [0, 0, 0]), 21_000).unwrap();
    assert_eq!(
        builder.transact(&vector_tx(1, [10, 10, 10], [0, 0, 0]), 21_000),
        Err(TransitionError::Transaction(
            InvalidTransaction::BlockLimitReached {
                dimension: Dimension::Blob,
                available: 0,
                requested: 131_072,
            }
        ))
    );
    // transactions without blobs still fit
    builder.transact(&vector_tx(0, [10, 10, 10], [0, 0, 0]), 21_000).unwrap();
}

#[test]
fn scalar_transaction_has_no_blob_fee_cap() {
    let mut db = funded_db();
    let mut builder =
        BlockBuilder::new(cfg(), &legacy_genesis(), 12, GAS_CEIL, COINBASE, &mut db).unwrap();

    let tx = TxEnv {
        tx_type: TransactionType::Eip1559,
        caller: CALLER,
        gas_limit: 21_000,
        gas_price: 10,
        gas_priority_fee: Some(1),
        ..Default::default()
    };
    assert_eq!(
        builder.transact(&tx, 21_000),
        Err(TransitionError::Transaction(
            InvalidTransaction::FeeCapBelowBaseFee {
                dimension: Dimension::Blob
            }
        ))
    );
}

#[test]
fn zero_fee_transaction_without_base_fee() {
    let mut db = funded_db();
    let cfg = cfg().with_disable_base_fee(true);
    let mut builder =
        BlockBuilder::new(cfg, &legacy_genesis(), 12, GAS_CEIL, COINBASE, &mut db).unwrap();

    let tx = TxEnv {
        tx_type: TransactionType::Legacy,
        caller: CALLER,
        gas_limit: 21_000,
        gas_price: 0,
        ..Default::default()
    };
    builder.transact(&tx, 21_000).unwrap();
    let header = builder.finish_commit();

    assert_eq!(header.gas_used_vector(), Some(&GasVector::new(21_000, 0, 0)));
    assert_eq!(balance(&db, CALLER), U256::from(CALLER_BALANCE));
    assert_eq!(balance(&db, COINBASE), U256::ZERO);
}

#[test]
fn no_vector_block_before_activation() {
    let mut db = funded_db();
    let cfg = CfgEnv::new(VectorFeeConfig::activated_at(100));
    assert!(BlockBuilder::new(cfg, &legacy_genesis(), 99, GAS_CEIL, COINBASE, &mut db).is_none());
}
