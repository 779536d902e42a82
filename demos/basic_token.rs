//! Basic token ledger usage example

use token_core::{Address, MemoryStorage, TokenLedger, MINT_AMOUNT};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🪙 Token Core - Basic Ledger Example\n");

    let alice = Address::from("alice");
    let bob = Address::from("bob");
    let carol = Address::from("carol");

    // 1. Deploy with a genesis distribution: Alice holds the whole supply
    println!("🚀 Seeding genesis distribution...");
    let storage = MemoryStorage::new();
    let mut ledger = TokenLedger::with_genesis(storage, &[(alice.clone(), 10_000)]).await?;

    println!(
        "  ✓ Total supply: {} (all held by {})\n",
        ledger.get_total_supply().await?,
        alice
    );

    // 2. Holder-initiated transfer
    println!("💸 Alice transfers 2,500 tokens to Bob...");
    ledger.transfer(&alice, &alice, &bob, 2_500).await?;
    println!(
        "  ✓ Balances: alice = {}, bob = {}\n",
        ledger.get_balance(&alice).await?,
        ledger.get_balance(&bob).await?
    );

    // 3. Allowance grant and delegated spend
    println!("🤝 Alice approves Bob for 1,000 tokens...");
    ledger.approve(&alice, &bob, 1_000).await?;
    println!(
        "  ✓ Allowance (alice -> bob): {}",
        ledger.get_allowance(&alice, &bob).await?
    );

    println!("💸 Bob spends 400 of his allowance...");
    ledger.transfer(&bob, &alice, &bob, 400).await?;
    println!(
        "  ✓ Balances: alice = {}, bob = {}; remaining allowance = {}\n",
        ledger.get_balance(&alice).await?,
        ledger.get_balance(&bob).await?,
        ledger.get_allowance(&alice, &bob).await?
    );

    // 4. Rejections surface the contract's literal failure signals
    println!("🚫 Bob tries to overspend his allowance...");
    match ledger.transfer(&bob, &alice, &bob, 10_000).await {
        Err(signal) => println!("  ✓ Rejected with: {}", signal),
        Ok(()) => unreachable!(),
    }
    match ledger.approve(&bob, &bob, 50).await {
        Err(signal) => println!("  ✓ Self-approval rejected with: {}\n", signal),
        Ok(()) => unreachable!(),
    }

    // 5. Minting is the only supply-increasing path
    println!("⛲ Minting {} tokens to Carol...", MINT_AMOUNT);
    ledger.mint(&carol, &carol).await?;
    println!(
        "  ✓ carol = {}, total supply = {}\n",
        ledger.get_balance(&carol).await?,
        ledger.get_total_supply().await?
    );

    // 6. Audit the conservation invariant
    println!("🔍 Validating ledger integrity...");
    let report = ledger.validate_integrity().await?;
    println!(
        "  ✓ Balances sum to {} against a recorded supply of {} (valid: {})\n",
        report.computed_supply, report.recorded_supply, report.is_valid
    );

    // 7. Account snapshots are plain serializable data
    if let Some(account) = ledger.get_account(&alice).await? {
        println!("📄 Alice's record:\n{}", serde_json::to_string_pretty(&account)?);
    }

    Ok(())
}
