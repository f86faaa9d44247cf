//! Balance scanner behavior against a simulated ledger.

mod common;

use common::{init_logs, mock_address, test_seed, MockLedger, MockCrypto};
use iota_types::SecurityLevel;
use iota_wallet::scanner::{scan_addresses_with_balance, ScanOptions};
use iota_wallet::{Wallet, WalletError};

const SECURITY: SecurityLevel = SecurityLevel::Two;

/// Ledger where addresses [0,5) hold [0, 0, 50, 0, 30] and the rest are
/// unused.
fn ledger_with_two_inputs() -> MockLedger {
    let ledger = MockLedger::new();
    ledger.set_balance(&mock_address(SECURITY, 2), 50);
    ledger.set_balance(&mock_address(SECURITY, 4), 30);
    ledger
}

fn indices(scan: &iota_wallet::BalanceScan) -> Vec<u32> {
    scan.found.iter().map(|f| f.index).collect()
}

#[tokio::test]
async fn test_threshold_crossed_mid_batch_stops_at_crossing_element() {
    init_logs();
    let ledger = ledger_with_two_inputs();

    let scan = scan_addresses_with_balance(
        &ledger,
        &MockCrypto::new(),
        &test_seed(),
        SECURITY,
        &ScanOptions {
            start_index: 0,
            needed_balance: 80,
            max_inputs: 0,
        },
    )
    .await
    .unwrap();

    // The element at index 4 crosses the threshold; the scan resumes
    // exactly one past it, not at the batch boundary.
    assert_eq!(indices(&scan), vec![2, 4]);
    assert_eq!(scan.total, 80);
    assert_eq!(scan.next_index, 5);
}

#[tokio::test]
async fn test_threshold_already_covered_by_first_balance() {
    let ledger = ledger_with_two_inputs();

    let scan = scan_addresses_with_balance(
        &ledger,
        &MockCrypto::new(),
        &test_seed(),
        SECURITY,
        &ScanOptions {
            start_index: 0,
            needed_balance: 40,
            max_inputs: 0,
        },
    )
    .await
    .unwrap();

    // Index 2 alone covers 40; index 4 is never examined.
    assert_eq!(indices(&scan), vec![2]);
    assert_eq!(scan.total, 50);
    assert_eq!(scan.next_index, 3);
}

#[tokio::test]
async fn test_zero_needed_balance_scans_to_unused_tail() {
    let ledger = ledger_with_two_inputs();

    let scan = scan_addresses_with_balance(
        &ledger,
        &MockCrypto::new(),
        &test_seed(),
        SECURITY,
        &ScanOptions::default(),
    )
    .await
    .unwrap();

    // Same set as the thresholded scan; the tail batch [8,16) is confirmed
    // unused before stopping.
    assert_eq!(indices(&scan), vec![2, 4]);
    assert_eq!(scan.total, 80);
    assert_eq!(scan.next_index, 16);

    let state = ledger.state.lock().unwrap();
    assert_eq!(state.balance_calls, 2);
    assert_eq!(state.spent_calls, 1);
}

#[tokio::test]
async fn test_spent_gap_continues_scan() {
    let ledger = ledger_with_two_inputs();
    // Batch [8,16) is empty but contains a once-spent address, so the scan
    // must keep going and find the balance at index 17.
    ledger.mark_spent(&mock_address(SECURITY, 9));
    ledger.set_balance(&mock_address(SECURITY, 17), 20);

    let scan = scan_addresses_with_balance(
        &ledger,
        &MockCrypto::new(),
        &test_seed(),
        SECURITY,
        &ScanOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(indices(&scan), vec![2, 4, 17]);
    assert_eq!(scan.total, 100);
    assert_eq!(scan.next_index, 32);
}

#[tokio::test]
async fn test_capped_list_still_counts_full_total() {
    let ledger = MockLedger::new();
    for index in 0..4 {
        ledger.set_balance(&mock_address(SECURITY, index), 10);
    }

    let scan = scan_addresses_with_balance(
        &ledger,
        &MockCrypto::new(),
        &test_seed(),
        SECURITY,
        &ScanOptions {
            start_index: 0,
            needed_balance: 100,
            max_inputs: 3,
        },
    )
    .await
    .unwrap();

    // Only three entries are retained, but the fourth balance still counts
    // toward the total, keeping shortfall classification accurate.
    assert_eq!(indices(&scan), vec![0, 1, 2]);
    assert_eq!(scan.total, 40);
}

#[tokio::test]
async fn test_network_error_aborts_scan() {
    let ledger = ledger_with_two_inputs();
    ledger.state.lock().unwrap().fail_balances_on_call = Some(2);

    let result = scan_addresses_with_balance(
        &ledger,
        &MockCrypto::new(),
        &test_seed(),
        SECURITY,
        &ScanOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(WalletError::Rpc(_))));
}

#[tokio::test]
async fn test_wallet_get_balance_resumes_from_cursor() {
    let ledger = ledger_with_two_inputs();
    let crypto = MockCrypto::new();
    let wallet = Wallet::new(&ledger, &crypto, test_seed());

    let first = wallet.get_balance(None).await.unwrap();
    assert_eq!(first.available, 80);
    assert_eq!(first.next_index, 16);

    // Resuming from next_index re-examines only the unused tail.
    let resumed = wallet.get_balance(Some(first.next_index)).await.unwrap();
    assert_eq!(resumed.available, 0);
    assert_eq!(resumed.next_index, 24);
}
