//! End-to-end integration tests
//!
//! These tests drive complete terminal sessions against a database file in a
//! temporary directory. Each test:
//! 1. Opens the database and prepares accounts through the engine where needed
//! 2. Feeds a scripted sequence of answers to the terminal
//! 3. Checks the transcript written to the terminal output
//! 4. Reopens the database and checks what was persisted
//!
//! Card numbers and PINs are random, so scripts are built from the accounts
//! the engine returned, or parsed back out of the transcript.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal::Decimal;
    use simple_banking::cli::Terminal;
    use simple_banking::core::checksum::derive_card_number;
    use simple_banking::{Account, BankEngine, CardStore, SqliteCardStore};
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    async fn open_engine(path: &Path) -> BankEngine<SqliteCardStore> {
        let store = SqliteCardStore::open(path)
            .await
            .unwrap_or_else(|e| panic!("Failed to open {}: {}", path.display(), e));
        BankEngine::new(store)
    }

    /// Run `script` through a fresh terminal session and return the transcript
    async fn run_session(path: &Path, script: &str) -> String {
        let engine = open_engine(path).await;
        let mut terminal = Terminal::new(script.as_bytes(), Vec::new());

        terminal
            .run(&engine)
            .await
            .unwrap_or_else(|e| panic!("Session failed: {}", e));
        engine.shutdown().await;

        String::from_utf8(terminal.into_output()).expect("Transcript is not UTF-8")
    }

    /// Balance persisted for `account`, read from a fresh connection
    async fn persisted_balance(path: &Path, account: &Account) -> Option<Decimal> {
        let engine = open_engine(path).await;
        let record = engine.store().find_by_id(&account.id).await.unwrap();
        engine.shutdown().await;
        record.map(|r| Account::from(r).balance)
    }

    /// Database with account A holding 100 and an empty account B
    async fn prepared_bank() -> (TempDir, Account, Account) {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("card.s3db");

        let engine = open_engine(&path).await;
        let mut a = engine.open_account().await.unwrap();
        engine.deposit(&mut a, Decimal::new(100, 0)).await.unwrap();
        let b = engine.open_account().await.unwrap();
        engine.shutdown().await;

        (dir, a, b)
    }

    fn login(account: &Account) -> String {
        format!("2\n{}\n{}\n", account.card.number, account.card.pin)
    }

    /// Value on the line following `label` in the transcript
    fn value_after<'a>(transcript: &'a str, label: &str) -> &'a str {
        let mut lines = transcript.lines();
        lines
            .by_ref()
            .find(|line| *line == label)
            .unwrap_or_else(|| panic!("'{}' not found in transcript", label));
        lines.next().expect("Missing value after label")
    }

    #[tokio::test]
    async fn test_transfer_session() {
        let (dir, a, b) = prepared_bank().await;
        let path = dir.path().join("card.s3db");

        let script = format!("{}3\n{}\n30\n1\n0\n", login(&a), b.card.number);
        let transcript = run_session(&path, &script).await;

        assert!(transcript.contains("You have successfully logged in!"));
        assert!(transcript.contains("Enter how much money you want to transfer:"));
        assert!(transcript.contains("Success!"));
        assert!(transcript.contains("Balance: 70\n"));
        assert!(transcript.ends_with("Bye!\n"));

        assert_eq!(persisted_balance(&path, &a).await, Some(Decimal::new(70, 0)));
        assert_eq!(persisted_balance(&path, &b).await, Some(Decimal::new(30, 0)));
    }

    #[tokio::test]
    async fn test_income_session() {
        let (dir, _a, b) = prepared_bank().await;
        let path = dir.path().join("card.s3db");

        let script = format!("{}2\n12.5\n2\n0.25\n1\n5\n0\n", login(&b));
        let transcript = run_session(&path, &script).await;

        assert_eq!(transcript.matches("Income was added!").count(), 2);
        assert!(transcript.contains("Balance: 12.75\n"));
        assert!(transcript.contains("You have successfully logged out!"));
        assert_eq!(
            persisted_balance(&path, &b).await,
            Some(Decimal::new(1275, 2))
        );
    }

    #[derive(Debug, Clone, Copy)]
    enum Destination {
        OwnCard,
        BadChecksum,
        UnknownCard,
        OtherAccount,
    }

    /// Rejected transfers leave both balances as they were
    #[rstest]
    #[case::own_card(Destination::OwnCard, "10", "You can't transfer money to the same account!")]
    #[case::bad_checksum(
        Destination::BadChecksum,
        "10",
        "Probably you made a mistake in the card number. Please try again!"
    )]
    #[case::unknown_card(Destination::UnknownCard, "10", "Such a card does not exist.")]
    #[case::not_enough_money(Destination::OtherAccount, "100.01", "Not enough money!")]
    #[case::negative_amount(
        Destination::OtherAccount,
        "-1",
        "Please enter a non-negative amount with at most two decimal places."
    )]
    #[tokio::test]
    async fn test_rejected_transfers(
        #[case] destination: Destination,
        #[case] amount: &str,
        #[case] message: &str,
    ) {
        let (dir, a, b) = prepared_bank().await;
        let path = dir.path().join("card.s3db");

        let (number, amount_answer) = match destination {
            Destination::OwnCard => (a.card.number.clone(), String::new()),
            Destination::BadChecksum => ("1234".to_string(), String::new()),
            Destination::UnknownCard => {
                let unused = ["000000000", "000000001"]
                    .into_iter()
                    .find(|id| *id != a.id && *id != b.id)
                    .unwrap();
                (derive_card_number(unused).unwrap(), String::new())
            }
            Destination::OtherAccount => (b.card.number.clone(), format!("{}\n", amount)),
        };

        let script = format!("{}3\n{}\n{}0\n", login(&a), number, amount_answer);
        let transcript = run_session(&path, &script).await;

        assert!(
            transcript.contains(message),
            "Expected '{}' in transcript:\n{}",
            message,
            transcript
        );
        assert!(!transcript.contains("Success!"));
        assert_eq!(persisted_balance(&path, &a).await, Some(Decimal::new(100, 0)));
        assert_eq!(persisted_balance(&path, &b).await, Some(Decimal::ZERO));
    }

    #[tokio::test]
    async fn test_card_checks_come_before_amount_prompt() {
        let (dir, a, _b) = prepared_bank().await;
        let path = dir.path().join("card.s3db");

        let script = format!("{}3\n1234\n0\n", login(&a));
        let transcript = run_session(&path, &script).await;

        assert!(!transcript.contains("Enter how much money you want to transfer:"));
    }

    #[tokio::test]
    async fn test_created_account_can_log_in_in_a_later_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("card.s3db");

        let first = run_session(&path, "1\n0\n").await;
        let number = value_after(&first, "Your card number:").to_string();
        let pin = value_after(&first, "Your card PIN:").to_string();

        let second = run_session(&path, &format!("2\n{}\n{}\n1\n0\n", number, pin)).await;

        assert!(second.contains("You have successfully logged in!"));
        assert!(second.contains("Balance: 0\n"));
    }

    #[tokio::test]
    async fn test_closed_account_cannot_log_in() {
        let (dir, a, _b) = prepared_bank().await;
        let path = dir.path().join("card.s3db");

        let first = run_session(&path, &format!("{}4\n0\n", login(&a))).await;
        let second = run_session(&path, &format!("{}0\n", login(&a))).await;

        assert!(first.contains("The account has been closed!"));
        assert!(second.contains("Wrong card number or PIN!"));
        assert_eq!(persisted_balance(&path, &a).await, None);
    }

    #[tokio::test]
    async fn test_exit_from_account_menu_ends_program() {
        let (dir, a, _b) = prepared_bank().await;
        let path = dir.path().join("card.s3db");

        let transcript = run_session(&path, &format!("{}0\n1\n", login(&a))).await;

        assert!(transcript.ends_with("Bye!\n"));
        assert!(!transcript.contains("Your card has been created"));
    }
}
