//! Interactive menu loop
//!
//! `Terminal` drives the dialogue: the main menu, the per-account menu of a
//! logged-in session, and the prompts of each operation. It reads one line
//! per answer and treats end of input as a request to exit.
//!
//! Recoverable errors are reported with a short message and the menu is shown
//! again. Storage and terminal I/O errors end the dialogue and are returned.

use crate::core::account_manager::parse_amount;
use crate::core::{BankEngine, CardStore};
use crate::types::{Account, BankError};
use std::io::{BufRead, Write};

const MAIN_MENU: &str = "1. Create an account\n2. Log into account\n0. Exit";

const ACCOUNT_MENU: &str =
    "1. Balance\n2. Add income\n3. Do transfer\n4. Close account\n5. Log out\n0. Exit";

/// What the dialogue does after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Show the current menu again
    Stay,
    /// End the session and go back to the main menu
    LogOut,
    /// Leave the program
    Exit,
}

/// User-facing wording for a recoverable error
pub fn user_message(error: &BankError) -> &'static str {
    match error {
        BankError::SelfTransfer => "You can't transfer money to the same account!",
        BankError::InvalidCardNumber { .. } => {
            "Probably you made a mistake in the card number. Please try again!"
        }
        BankError::CardNotFound { .. } => "Such a card does not exist.",
        BankError::InsufficientFunds { .. } => "Not enough money!",
        BankError::AuthenticationFailed => "Wrong card number or PIN!",
        BankError::InvalidAmount { .. } | BankError::InvalidFormat { .. } => {
            "Please enter a non-negative amount with at most two decimal places."
        }
        BankError::AccountNotFound { .. } => "This account no longer exists.",
        BankError::ArithmeticOverflow { .. } => "That amount is too large.",
        BankError::Storage { .. } | BankError::Io { .. } => "Something went wrong.",
    }
}

/// Line-oriented terminal dialogue over any reader and writer
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Create a terminal reading answers from `input` and writing to `output`
    pub fn new(input: R, output: W) -> Self {
        Terminal { input, output }
    }

    /// Consume the terminal, returning the writer
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the main menu until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Returns the first fatal error (storage or terminal I/O).
    pub async fn run<S: CardStore>(&mut self, engine: &BankEngine<S>) -> Result<(), BankError> {
        loop {
            self.say(MAIN_MENU)?;
            let Some(choice) = self.read_line()? else {
                break;
            };
            self.say("")?;

            let flow = match choice.as_str() {
                "1" => self.create_account(engine).await?,
                "2" => self.log_in(engine).await?,
                "0" => Flow::Exit,
                _ => Flow::Stay,
            };
            if flow == Flow::Exit {
                break;
            }
        }

        self.say("Bye!")?;
        self.output.flush()?;
        Ok(())
    }

    async fn create_account<S: CardStore>(
        &mut self,
        engine: &BankEngine<S>,
    ) -> Result<Flow, BankError> {
        let account = engine.open_account().await?;

        self.say("Your card has been created")?;
        self.say("Your card number:")?;
        self.say(&account.card.number)?;
        self.say("Your card PIN:")?;
        self.say(&account.card.pin)?;
        self.say("")?;
        Ok(Flow::Stay)
    }

    async fn log_in<S: CardStore>(&mut self, engine: &BankEngine<S>) -> Result<Flow, BankError> {
        self.say("Enter your card number:")?;
        let Some(number) = self.read_line()? else {
            return Ok(Flow::Exit);
        };
        self.say("Enter your PIN:")?;
        let Some(pin) = self.read_line()? else {
            return Ok(Flow::Exit);
        };
        self.say("")?;

        match engine.login(&number, &pin).await {
            Ok(account) => {
                self.say("You have successfully logged in!\n")?;
                self.account_menu(engine, account).await
            }
            Err(e) => self.recover(e),
        }
    }

    /// Menu of a logged-in session; the session ends when this returns
    async fn account_menu<S: CardStore>(
        &mut self,
        engine: &BankEngine<S>,
        mut account: Account,
    ) -> Result<Flow, BankError> {
        loop {
            self.say(ACCOUNT_MENU)?;
            let Some(choice) = self.read_line()? else {
                return Ok(Flow::Exit);
            };
            self.say("")?;

            let flow = match choice.as_str() {
                "1" => self.show_balance(engine, &mut account).await?,
                "2" => self.add_income(engine, &mut account).await?,
                "3" => self.do_transfer(engine, &mut account).await?,
                "4" => {
                    return match engine.close_account(account).await {
                        Ok(()) => {
                            self.say("The account has been closed!\n")?;
                            Ok(Flow::Stay)
                        }
                        Err(e) => self.recover(e).map(|_| Flow::Stay),
                    };
                }
                "5" => {
                    self.say("You have successfully logged out!\n")?;
                    return Ok(Flow::Stay);
                }
                "0" => Flow::Exit,
                _ => Flow::Stay,
            };

            match flow {
                Flow::Stay => {}
                // Back at the main menu, which keeps running
                Flow::LogOut => return Ok(Flow::Stay),
                Flow::Exit => return Ok(Flow::Exit),
            }
        }
    }

    async fn show_balance<S: CardStore>(
        &mut self,
        engine: &BankEngine<S>,
        account: &mut Account,
    ) -> Result<Flow, BankError> {
        if let Err(e) = engine.refresh(account).await {
            return self.recover(e);
        }

        self.say(&format!("Balance: {}\n", account.balance.normalize()))?;
        Ok(Flow::Stay)
    }

    async fn add_income<S: CardStore>(
        &mut self,
        engine: &BankEngine<S>,
        account: &mut Account,
    ) -> Result<Flow, BankError> {
        self.say("Enter income:")?;
        let Some(raw) = self.read_line()? else {
            return Ok(Flow::Exit);
        };

        let result = match parse_amount(&raw) {
            Ok(amount) => engine.deposit(account, amount).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => {
                self.say("Income was added!\n")?;
                Ok(Flow::Stay)
            }
            Err(e) => self.recover(e),
        }
    }

    async fn do_transfer<S: CardStore>(
        &mut self,
        engine: &BankEngine<S>,
        account: &mut Account,
    ) -> Result<Flow, BankError> {
        self.say("Transfer")?;
        self.say("Enter card number:")?;
        let Some(number) = self.read_line()? else {
            return Ok(Flow::Exit);
        };

        // The card is checked before asking for an amount
        if let Err(e) = engine.check_destination(account, &number).await {
            return self.recover(e);
        }

        self.say("Enter how much money you want to transfer:")?;
        let Some(raw) = self.read_line()? else {
            return Ok(Flow::Exit);
        };

        let result = match parse_amount(&raw) {
            Ok(amount) => engine.transfer(account, &number, amount).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => {
                self.say("Success!\n")?;
                Ok(Flow::Stay)
            }
            Err(e) => self.recover(e),
        }
    }

    /// Report a recoverable error, or hand a fatal one back
    ///
    /// A session whose account disappeared is logged out.
    fn recover(&mut self, error: BankError) -> Result<Flow, BankError> {
        if error.is_fatal() {
            return Err(error);
        }

        self.say(user_message(&error))?;
        self.say("")?;

        match error {
            BankError::AccountNotFound { .. } => Ok(Flow::LogOut),
            _ => Ok(Flow::Stay),
        }
    }

    fn say(&mut self, text: &str) -> Result<(), BankError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Next answer with surrounding whitespace removed, `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>, BankError> {
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
