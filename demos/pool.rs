//! Pool lifecycle example.
//!
//! Demonstrates creating a pool over two in-memory ledgers, providing
//! liquidity, trading in both directions, and withdrawing.
//!
//! # Run
//!
//! ```bash
//! cargo run --example pool
//! ```

use pair_amm::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== Constant Product Pool (x · y = k, 0.30% fee) ===\n");

    // ── 1. Define assets and accounts ───────────────────────────────────
    let usd = AssetId::from_bytes([1u8; 32]);
    let eur = AssetId::from_bytes([2u8; 32]);
    let custody = AccountId::from_bytes([0x50; 32]);
    let provider = AccountId::from_bytes([0xA1; 32]);
    let trader = AccountId::from_bytes([0xB0; 32]);

    println!("Asset A (USD): {usd}");
    println!("Asset B (EUR): {eur}");
    println!("Custody:       {custody}");

    // ── 2. Fund both accounts and approve the custody account ───────────
    let mut usd_ledger = InMemoryLedger::new(usd);
    let mut eur_ledger = InMemoryLedger::new(eur);
    for account in [provider, trader] {
        usd_ledger.mint(&account, Amount::new(10_000_000))?;
        eur_ledger.mint(&account, Amount::new(10_000_000))?;
        usd_ledger.approve(&account, &custody, Amount::MAX)?;
        eur_ledger.approve(&account, &custody, Amount::MAX)?;
    }

    // ── 3. Create the pool ──────────────────────────────────────────────
    let config = PoolConfig::new(AssetPair::new(usd, eur)?, custody)?;
    let mut pool = Pool::new(config, usd_ledger, eur_ledger)?;
    println!("\nPool created, reserves empty: {}", pool.reserves().is_empty());

    // ── 4. Seed liquidity ───────────────────────────────────────────────
    let minted = pool.deposit(&provider, Amount::new(1_000_000), Amount::new(900_000))?;
    let reserves = pool.reserves();
    println!("\n--- Deposit: 1 000 000 USD + 900 000 EUR ---");
    println!("  Shares minted: {minted}");
    println!("  Reserves:      {} USD / {} EUR", reserves.a, reserves.b);
    println!("  Price:         {} EUR per 1000 USD", pool.price());

    // ── 5. Quote, then sell 10 000 USD ──────────────────────────────────
    let amount_in = Amount::new(10_000);
    let quoted = pool.quote_swap(SwapDirection::AToB, amount_in)?;
    let received = pool.swap_with_min_out(&trader, SwapDirection::AToB, amount_in, quoted)?;
    println!("\n--- Swap: sell {amount_in} USD ---");
    println!("  Quoted:   {quoted} EUR");
    println!("  Received: {received} EUR");
    println!("  Price:    {} EUR per 1000 USD", pool.price());

    // ── 6. Sell the EUR back ────────────────────────────────────────────
    let returned = pool.swap(&trader, SwapDirection::BToA, received)?;
    println!("\n--- Swap: sell {received} EUR ---");
    let cost = amount_in.get().saturating_sub(returned.get());
    println!("  Received: {returned} USD (round trip cost {cost} USD)");

    // ── 7. Withdraw half of the position ────────────────────────────────
    let burn = Shares::new(minted.get() / 2);
    let (out_a, out_b) = pool.withdraw(&provider, burn)?;
    let reserves = pool.reserves();
    println!("\n--- Withdraw {burn} shares ---");
    println!("  Paid out:  {out_a} USD + {out_b} EUR");
    println!("  Remaining: {} shares", pool.total_shares());
    println!("  Reserves:  {} USD / {} EUR", reserves.a, reserves.b);

    // ── 8. Audit trail ──────────────────────────────────────────────────
    println!("\n--- Audit trail ---");
    for event in pool.drain_events() {
        println!("  {event}");
    }

    println!("\n=== Done ===");
    Ok(())
}
