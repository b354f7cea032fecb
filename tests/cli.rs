use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn spendcap_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spendcap").expect("binary exists");
    cmd.env("SPENDCAP_DATA_DIR", dir.path());
    cmd
}

#[test]
fn init_creates_data_files() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("budgets.json").exists());
    assert!(dir.path().join("data").join("transactions.json").exists());
    assert!(dir.path().join("data").join("versions.json").exists());
}

#[test]
fn budget_add_derives_window_end() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .args(["budget", "add", "Groceries", "600", "--start", "2025-03-01"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Created budget")
                .and(predicate::str::contains("2025-03-01 to 2025-03-31")),
        );
}

#[test]
fn budget_add_derives_leap_february_end() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .args(["budget", "add", "Groceries", "600", "--start", "2024-02-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-01 to 2024-02-29"));
}

#[test]
fn budget_add_rejects_overlapping_window() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .args(["budget", "add", "Groceries", "600", "--start", "2025-03-01"])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args(["budget", "add", "Groceries", "500", "--start", "2025-03-15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already covers this window"));
}

#[test]
fn budget_add_allows_different_period_type() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .args(["budget", "add", "Groceries", "600", "--start", "2025-03-01"])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args([
            "budget", "add", "Groceries", "6000", "--period", "yearly", "--start", "2025-01-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01-01 to 2025-12-31"));
}

#[test]
fn budget_add_rejects_bad_amount_and_period() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .args(["budget", "add", "Fuel", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));

    spendcap_cmd(&dir)
        .args(["budget", "add", "Fuel", "100", "--period", "weekly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid period"));
}

#[test]
fn spend_shows_up_in_budget_list() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .args(["budget", "add", "Groceries", "600", "--start", "2025-03-01"])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args(["txn", "add", "Groceries", "42.50", "--date", "2025-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded expense"));

    spendcap_cmd(&dir)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("$42.50")
                .and(predicate::str::contains("7%"))
                .and(predicate::str::contains("good")),
        );
}

#[test]
fn transactions_outside_window_do_not_count() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .args(["budget", "add", "Groceries", "600", "--start", "2025-03-01"])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args(["txn", "add", "Groceries", "100", "--date", "2025-04-01"])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args(["budget", "show", "Groceries March 2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$0.00 across 0 transaction(s)"));
}

#[test]
fn overspent_budget_is_flagged() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .args(["budget", "add", "Fuel", "100", "--start", "2025-03-01"])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args(["txn", "add", "Fuel", "120", "--date", "2025-03-05"])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args(["budget", "show", "Fuel March 2025"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Over budget by $20.00")
                .and(predicate::str::contains("120%")),
        );

    spendcap_cmd(&dir)
        .args(["budget", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 over"));
}

#[test]
fn deactivated_budget_frees_its_window() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .args([
            "budget", "add", "Groceries", "600", "--start", "2025-03-01", "--name", "March Cap",
        ])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args(["budget", "deactivate", "March Cap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deactivated budget"));

    spendcap_cmd(&dir)
        .args(["budget", "add", "Groceries", "700", "--start", "2025-03-01"])
        .assert()
        .success();
}

#[test]
fn deactivated_transaction_stops_counting() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .args(["budget", "add", "Groceries", "600", "--start", "2025-03-01"])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args(["txn", "add", "Groceries", "50", "--date", "2025-03-10"])
        .assert()
        .success();

    // Pull the short transaction ID out of the listing
    let output = spendcap_cmd(&dir)
        .args(["txn", "list"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let txn_id = stdout
        .lines()
        .find_map(|line| line.split_whitespace().find(|w| w.starts_with("txn-")))
        .expect("listing shows a transaction id")
        .to_string();

    spendcap_cmd(&dir)
        .args(["txn", "deactivate", &txn_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("no longer counts"));

    spendcap_cmd(&dir)
        .args(["budget", "show", "Groceries March 2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$0.00 across 0 transaction(s)"));
}

#[test]
fn summary_partitions_status_counts() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .args(["budget", "add", "Groceries", "600", "--start", "2025-03-01"])
        .assert()
        .success();
    spendcap_cmd(&dir)
        .args(["budget", "add", "Dining", "300", "--start", "2025-03-01"])
        .assert()
        .success();
    spendcap_cmd(&dir)
        .args(["budget", "add", "Fuel", "100", "--start", "2025-03-01"])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args(["txn", "add", "Groceries", "150", "--date", "2025-03-05"])
        .assert()
        .success();
    spendcap_cmd(&dir)
        .args(["txn", "add", "Dining", "240", "--date", "2025-03-06"])
        .assert()
        .success();
    spendcap_cmd(&dir)
        .args(["txn", "add", "Fuel", "120", "--date", "2025-03-07"])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args(["budget", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "3 budget(s): 1 good, 1 warning, 1 over",
        ));
}

#[test]
fn history_records_mutations() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .args(["budget", "add", "Groceries", "600", "--start", "2025-03-01"])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args(["txn", "add", "Groceries", "25", "--date", "2025-03-02"])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args(["history"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("CREATE Budget").and(predicate::str::contains(
                "CREATE Transaction",
            )),
        );
}

#[test]
fn income_does_not_count_toward_budgets() {
    let dir = TempDir::new().unwrap();

    spendcap_cmd(&dir)
        .args(["budget", "add", "Groceries", "600", "--start", "2025-03-01"])
        .assert()
        .success();

    spendcap_cmd(&dir)
        .args([
            "txn", "add", "Groceries", "50", "--date", "2025-03-10", "--income",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded income"));

    spendcap_cmd(&dir)
        .args(["budget", "show", "Groceries March 2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$0.00 across 0 transaction(s)"));
}
