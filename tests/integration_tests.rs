//! Integration tests for token-core

use token_core::{
    utils::{EnhancedAddressValidator, EnhancedOperationValidator, MemoryStorage},
    Account, Address, LedgerError, TokenAmount, TokenLedger, TokenStorage, MINT_AMOUNT,
};

fn addr(raw: &str) -> Address {
    Address::from(raw)
}

/// Stable snapshot of the whole ledger state for before/after comparison
async fn snapshot(ledger: &TokenLedger<MemoryStorage>) -> (Vec<Account>, TokenAmount) {
    let mut accounts = ledger.list_accounts().await.unwrap();
    accounts.sort_by(|a, b| a.address.cmp(&b.address));
    let supply = ledger.get_total_supply().await.unwrap();
    (accounts, supply)
}

#[tokio::test]
async fn test_genesis_hands_supply_to_initial_holder() {
    let alice = addr("alice");
    let ledger = TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), 2_000)])
        .await
        .unwrap();

    let supply = ledger.get_total_supply().await.unwrap();
    assert_eq!(ledger.get_balance(&alice).await.unwrap(), supply);
    assert_eq!(supply, 2_000);
}

#[tokio::test]
async fn test_transfer_exceeding_balance_fails() {
    let alice = addr("alice");
    let bob = addr("bob");
    let mut ledger = TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), 2_000)])
        .await
        .unwrap();

    let before = snapshot(&ledger).await;
    let result = ledger.transfer(&alice, &alice, &bob, 2_001).await;

    assert_eq!(result, Err(LedgerError::NotEnoughBalance));
    assert_eq!(snapshot(&ledger).await, before);
}

#[tokio::test]
async fn test_transfer_half_balance() {
    let alice = addr("alice");
    let bob = addr("bob");
    let mut ledger = TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), 2_000)])
        .await
        .unwrap();

    ledger.transfer(&alice, &alice, &bob, 1_000).await.unwrap();

    assert_eq!(ledger.get_balance(&alice).await.unwrap(), 1_000);
    assert_eq!(ledger.get_balance(&bob).await.unwrap(), 1_000);
    assert_eq!(ledger.get_total_supply().await.unwrap(), 2_000);
}

#[tokio::test]
async fn test_delegated_transfer_without_allowance_fails() {
    let alice = addr("alice");
    let bob = addr("bob");
    let mut ledger = TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), 2_000)])
        .await
        .unwrap();

    let before = snapshot(&ledger).await;
    let result = ledger.transfer(&bob, &alice, &bob, 1).await;

    assert_eq!(result, Err(LedgerError::NotEnoughAllowance));
    assert_eq!(snapshot(&ledger).await, before);
}

#[tokio::test]
async fn test_self_approval_rejected() {
    let bob = addr("bob");
    let mut ledger = TokenLedger::new(MemoryStorage::new());

    assert_eq!(
        ledger.approve(&bob, &bob, 50).await,
        Err(LedgerError::IdenticalSpenderSender)
    );
    // The amount never matters, zero included
    assert_eq!(
        ledger.approve(&bob, &bob, 0).await,
        Err(LedgerError::IdenticalSpenderSender)
    );
    assert!(ledger.get_account(&bob).await.unwrap().is_none());
}

#[tokio::test]
async fn test_allowance_grant_spend_and_overspend() {
    let alice = addr("alice");
    let bob = addr("bob");
    let mut ledger = TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), 2_000)])
        .await
        .unwrap();

    ledger.approve(&alice, &bob, 50).await.unwrap();
    assert_eq!(ledger.get_allowance(&alice, &bob).await.unwrap(), 50);

    // Overspending the allowance changes nothing
    let result = ledger.transfer(&bob, &alice, &bob, 51).await;
    assert_eq!(result, Err(LedgerError::NotEnoughAllowance));
    assert_eq!(ledger.get_allowance(&alice, &bob).await.unwrap(), 50);

    // Spending within it moves tokens and burns the allowance
    ledger.transfer(&bob, &alice, &bob, 25).await.unwrap();
    assert_eq!(ledger.get_allowance(&alice, &bob).await.unwrap(), 25);
    assert_eq!(ledger.get_balance(&alice).await.unwrap(), 1_975);
    assert_eq!(ledger.get_balance(&bob).await.unwrap(), 25);
}

#[tokio::test]
async fn test_approve_overwrites_previous_amount() {
    let alice = addr("alice");
    let bob = addr("bob");
    let mut ledger = TokenLedger::new(MemoryStorage::new());

    ledger.approve(&alice, &bob, 40).await.unwrap();
    ledger.approve(&alice, &bob, 70).await.unwrap();

    // Absolute set, never 40 + 70
    assert_eq!(ledger.get_allowance(&alice, &bob).await.unwrap(), 70);
}

#[tokio::test]
async fn test_allowance_query_distinguishes_absent_from_zero() {
    let alice = addr("alice");
    let bob = addr("bob");
    let mut ledger = TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), 100)])
        .await
        .unwrap();

    // Never approved: the pair has no entry, the owner is even unknown
    assert_eq!(
        ledger.get_allowance(&bob, &alice).await,
        Err(LedgerError::NoAllowance)
    );
    // Known owner, never-approved spender
    assert_eq!(
        ledger.get_allowance(&alice, &bob).await,
        Err(LedgerError::NoAllowance)
    );

    // An explicit zero approval is a stored entry
    ledger.approve(&alice, &bob, 0).await.unwrap();
    assert_eq!(ledger.get_allowance(&alice, &bob).await.unwrap(), 0);
}

#[tokio::test]
async fn test_allowance_entry_kept_when_exhausted() {
    let alice = addr("alice");
    let bob = addr("bob");
    let mut ledger = TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), 100)])
        .await
        .unwrap();

    ledger.approve(&alice, &bob, 30).await.unwrap();
    ledger.transfer(&bob, &alice, &bob, 30).await.unwrap();

    // Fully spent reads as an explicit zero, not as never-approved
    assert_eq!(ledger.get_allowance(&alice, &bob).await.unwrap(), 0);
}

#[tokio::test]
async fn test_mint_creates_account_and_raises_supply() {
    let alice = addr("alice");
    let fresh = addr("tz1NhNv9g7rtcjyNsH8Zqu79giY5aTqDDrzB");
    let mut ledger = TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), 500)])
        .await
        .unwrap();

    assert!(ledger.get_account(&fresh).await.unwrap().is_none());

    ledger.mint(&alice, &fresh).await.unwrap();
    assert_eq!(ledger.get_balance(&fresh).await.unwrap(), MINT_AMOUNT);
    assert_eq!(ledger.get_total_supply().await.unwrap(), 500 + MINT_AMOUNT);

    // Minting to an existing holder stacks on its balance
    ledger.mint(&alice, &alice).await.unwrap();
    assert_eq!(ledger.get_balance(&alice).await.unwrap(), 500 + MINT_AMOUNT);
    assert_eq!(
        ledger.get_total_supply().await.unwrap(),
        500 + 2 * MINT_AMOUNT
    );
}

#[tokio::test]
async fn test_conservation_across_transfers() {
    let alice = addr("alice");
    let bob = addr("bob");
    let carol = addr("carol");
    let mut ledger = TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), 1_000)])
        .await
        .unwrap();

    ledger.transfer(&alice, &alice, &bob, 300).await.unwrap();
    ledger.transfer(&bob, &bob, &carol, 120).await.unwrap();
    ledger.approve(&carol, &alice, 60).await.unwrap();
    ledger.transfer(&alice, &carol, &alice, 60).await.unwrap();

    let report = ledger.validate_integrity().await.unwrap();
    assert!(report.is_valid, "issues: {:?}", report.issues);
    assert_eq!(report.computed_supply, 1_000);
    assert_eq!(report.recorded_supply, 1_000);
}

#[tokio::test]
async fn test_delegated_transfer_with_short_balance() {
    let alice = addr("alice");
    let bob = addr("bob");
    let mut ledger = TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), 10)])
        .await
        .unwrap();

    ledger.approve(&alice, &bob, 50).await.unwrap();

    // Allowance covers it, the balance does not; the burn is rolled back
    let before = snapshot(&ledger).await;
    let result = ledger.transfer(&bob, &alice, &bob, 20).await;
    assert_eq!(result, Err(LedgerError::NotEnoughBalance));
    assert_eq!(snapshot(&ledger).await, before);
    assert_eq!(ledger.get_allowance(&alice, &bob).await.unwrap(), 50);
}

#[tokio::test]
async fn test_delegated_transfer_with_both_short_reports_allowance() {
    let alice = addr("alice");
    let bob = addr("bob");
    let mut ledger = TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), 10)])
        .await
        .unwrap();

    ledger.approve(&alice, &bob, 5).await.unwrap();

    // Balance and allowance are both short; the allowance shortfall wins
    let result = ledger.transfer(&bob, &alice, &bob, 20).await;
    assert_eq!(result, Err(LedgerError::NotEnoughAllowance));
}

#[tokio::test]
async fn test_zero_amount_transfer_edges() {
    let alice = addr("alice");
    let bob = addr("bob");
    let ghost = addr("ghost");
    let mut ledger = TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), 100)])
        .await
        .unwrap();

    // A zero transfer to an unknown address must not materialize a record
    ledger.transfer(&alice, &alice, &ghost, 0).await.unwrap();
    assert!(ledger.get_account(&ghost).await.unwrap().is_none());
    assert_eq!(ledger.get_balance(&ghost).await.unwrap(), 0);

    // A zero delegated spend passes without an allowance entry and
    // creates none
    ledger.transfer(&bob, &alice, &bob, 0).await.unwrap();
    assert_eq!(
        ledger.get_allowance(&alice, &bob).await,
        Err(LedgerError::NoAllowance)
    );
}

#[tokio::test]
async fn test_self_addressed_transfer() {
    let alice = addr("alice");
    let bob = addr("bob");
    let mut ledger = TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), 100)])
        .await
        .unwrap();

    ledger.transfer(&alice, &alice, &alice, 40).await.unwrap();
    assert_eq!(ledger.get_balance(&alice).await.unwrap(), 100);

    // Delegated self-addressed spend still burns the allowance
    ledger.approve(&alice, &bob, 30).await.unwrap();
    ledger.transfer(&bob, &alice, &alice, 10).await.unwrap();
    assert_eq!(ledger.get_balance(&alice).await.unwrap(), 100);
    assert_eq!(ledger.get_allowance(&alice, &bob).await.unwrap(), 20);
}

#[tokio::test]
async fn test_supply_overflow_rejected() {
    let alice = addr("alice");
    let bob = addr("bob");
    let mut ledger =
        TokenLedger::with_genesis(MemoryStorage::new(), &[(alice.clone(), TokenAmount::MAX)])
            .await
            .unwrap();

    let before = snapshot(&ledger).await;
    let result = ledger.mint(&bob, &bob).await;

    assert_eq!(result, Err(LedgerError::AmountOverflow));
    assert_eq!(snapshot(&ledger).await, before);
    assert!(ledger.get_account(&bob).await.unwrap().is_none());
}

#[tokio::test]
async fn test_genesis_overflow_rejected() {
    let alice = addr("alice");
    let bob = addr("bob");

    let result = TokenLedger::with_genesis(
        MemoryStorage::new(),
        &[(alice, TokenAmount::MAX), (bob, 1)],
    )
    .await;

    assert!(matches!(result, Err(LedgerError::AmountOverflow)));
}

#[tokio::test]
async fn test_failure_signals_render_verbatim() {
    assert_eq!(LedgerError::NotEnoughBalance.to_string(), "NotEnoughBalance");
    assert_eq!(
        LedgerError::NotEnoughAllowance.to_string(),
        "NotEnoughAllowance"
    );
    assert_eq!(
        LedgerError::IdenticalSpenderSender.to_string(),
        "IdenticalSpenderSender"
    );
    assert_eq!(LedgerError::NoAllowance.to_string(), "NoAllowance");
    assert_eq!(LedgerError::AmountOverflow.to_string(), "AmountOverflow");
}

#[tokio::test]
async fn test_enhanced_validation() {
    let mut ledger = TokenLedger::with_validators(
        MemoryStorage::new(),
        Box::new(EnhancedAddressValidator),
        Box::new(EnhancedOperationValidator),
    );

    let alice = addr("alice");
    let bad = addr("not a valid address!");

    let result = ledger.transfer(&alice, &alice, &bad, 0).await;
    assert!(matches!(result, Err(LedgerError::Validation(_))));

    let result = ledger.get_balance(&addr("")).await;
    assert!(matches!(result, Err(LedgerError::Validation(_))));

    // Well-formed addresses pass through to the engine untouched
    ledger.mint(&alice, &alice).await.unwrap();
    assert_eq!(ledger.get_balance(&alice).await.unwrap(), MINT_AMOUNT);
}

#[tokio::test]
async fn test_memory_storage_operations() {
    let mut storage = MemoryStorage::new();

    let mut account = Account::new(addr("holder1"));
    account.credit(250).unwrap();
    storage.save_account(&account).await.unwrap();

    let retrieved = storage.get_account(&addr("holder1")).await.unwrap();
    assert_eq!(retrieved.as_ref().map(|a| a.balance), Some(250));

    let all_accounts = storage.list_accounts().await.unwrap();
    assert_eq!(all_accounts.len(), 1);

    storage.set_total_supply(250).await.unwrap();
    assert_eq!(storage.get_total_supply().await.unwrap(), 250);

    storage.clear();
    assert!(storage.get_account(&addr("holder1")).await.unwrap().is_none());
    assert_eq!(storage.get_total_supply().await.unwrap(), 0);
}
