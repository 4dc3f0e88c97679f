use escrow_ledger::domain::account::Balance;
use escrow_ledger::domain::transaction::TransactionStatus;
use escrow_ledger::error::EscrowError;

mod common;
use common::{OPENING_BALANCE, bank, drain, engine_with, id};

#[test]
fn test_failed_withdraw_keeps_confirmed() {
    let mut bank = bank();
    bank.reject_incoming(id("receiver"));
    let (mut engine, mut rx) = engine_with(bank);
    engine.deposit(&id("sender"), &id("receiver"), 1000).unwrap();
    engine.confirm(&id("sender"), 1).unwrap();
    drain(&mut rx);

    let result = engine.withdraw(&id("receiver"), 1);

    assert!(matches!(result, Err(EscrowError::TransferFailed(_))));
    assert_eq!(
        engine.transaction(1).unwrap().unwrap().status,
        TransactionStatus::Confirmed
    );
    assert_eq!(engine.custody_balance(), Balance::new(1000));
    assert_eq!(
        engine.balance_of(&id("receiver")),
        Balance::new(OPENING_BALANCE)
    );
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_failed_refund_keeps_dispute_open() {
    let mut bank = bank();
    bank.reject_incoming(id("sender"));
    let (mut engine, mut rx) = engine_with(bank);
    engine.deposit(&id("sender"), &id("receiver"), 1000).unwrap();
    engine.dispute(&id("receiver"), 1).unwrap();
    drain(&mut rx);

    assert!(matches!(
        engine.refund(&id("owner"), 1),
        Err(EscrowError::TransferFailed(_))
    ));
    assert_eq!(
        engine.transaction(1).unwrap().unwrap().status,
        TransactionStatus::Disputed
    );
    assert!(drain(&mut rx).is_empty());

    // The dispute can still be settled the other way.
    engine.release(&id("owner"), 1).unwrap();
    assert_eq!(
        engine.transaction(1).unwrap().unwrap().status,
        TransactionStatus::Released
    );
    assert_eq!(engine.custody_balance(), Balance::ZERO);
}

#[test]
fn test_failed_release_keeps_dispute_open() {
    let mut bank = bank();
    bank.reject_incoming(id("receiver"));
    let (mut engine, _rx) = engine_with(bank);
    engine.deposit(&id("sender"), &id("receiver"), 1000).unwrap();
    engine.dispute(&id("sender"), 1).unwrap();

    assert!(matches!(
        engine.release(&id("owner"), 1),
        Err(EscrowError::TransferFailed(_))
    ));
    assert_eq!(
        engine.transaction(1).unwrap().unwrap().status,
        TransactionStatus::Disputed
    );
    assert_eq!(engine.custody_balance(), Balance::new(1000));
}

#[test]
fn test_failed_deposit_leaves_no_trace() {
    let mut bank = bank();
    bank.reject_incoming(id("escrow"));
    let (mut engine, mut rx) = engine_with(bank);

    assert!(matches!(
        engine.deposit(&id("sender"), &id("receiver"), 1000),
        Err(EscrowError::TransferFailed(_))
    ));
    assert_eq!(engine.next_id(), 1);
    assert!(engine.transaction(1).unwrap().is_none());
    assert!(engine.transactions().unwrap().is_empty());
    assert_eq!(
        engine.balance_of(&id("sender")),
        Balance::new(OPENING_BALANCE)
    );
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_overdraft_deposit_is_transfer_failure() {
    let (mut engine, _rx) = engine_with(bank());

    let result = engine.deposit(&id("sender"), &id("receiver"), OPENING_BALANCE + 1);
    assert!(matches!(result, Err(EscrowError::TransferFailed(_))));

    // An unfunded identity cannot deposit at all.
    assert!(matches!(
        engine.deposit(&id("stranger"), &id("receiver"), 1),
        Err(EscrowError::TransferFailed(_))
    ));
    assert_eq!(engine.next_id(), 1);
}
