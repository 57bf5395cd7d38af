use crate::domain::errors::JournalError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub description: String,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: Decimal, date: NaiveDate) -> Self {
        let description = match kind {
            TransactionKind::Deposit => "deposit transaction",
            TransactionKind::Withdrawal => "withdrawal transaction",
        };
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            amount,
            kind,
            description: description.to_string(),
        }
    }
}

/// Account snapshot the journal tracks alongside trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub currency: String,
    pub initial_capital: Decimal,
    pub current_balance: Decimal,

    // Risk settings
    pub max_daily_loss: Decimal,
    pub max_daily_loss_pct: f64,
    pub max_position_size: Decimal,
    pub max_position_size_pct: f64,
    pub risk_reward_ratio: f64,

    pub deposits: Vec<Transaction>,
    pub withdrawals: Vec<Transaction>,
}

impl Portfolio {
    pub fn new(currency: impl Into<String>, initial_capital: Decimal) -> Self {
        Self {
            currency: currency.into(),
            initial_capital,
            current_balance: initial_capital,
            max_daily_loss: dec!(500),
            max_daily_loss_pct: 5.0,
            max_position_size: dec!(1000),
            max_position_size_pct: 10.0,
            risk_reward_ratio: 2.0,
            deposits: Vec::new(),
            withdrawals: Vec::new(),
        }
    }

    /// Books the net P&L of a closed trade. Fees are already netted into `pnl`.
    pub fn apply_realized_pnl(&mut self, pnl: Decimal) {
        self.current_balance += pnl;
    }

    pub fn record_transaction(&mut self, transaction: Transaction) -> Result<(), JournalError> {
        if transaction.amount <= Decimal::ZERO {
            return Err(JournalError::InvalidAmount {
                amount: transaction.amount,
            });
        }

        match transaction.kind {
            TransactionKind::Deposit => {
                self.current_balance += transaction.amount;
                self.deposits.push(transaction);
            }
            TransactionKind::Withdrawal => {
                self.current_balance -= transaction.amount;
                self.withdrawals.push(transaction);
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> PortfolioSummary {
        let total_pnl = self.current_balance - self.initial_capital;
        let total_return_pct = if self.initial_capital > Decimal::ZERO {
            (total_pnl / self.initial_capital).to_f64().unwrap_or(0.0) * 100.0
        } else {
            0.0
        };

        PortfolioSummary {
            total_pnl,
            total_return_pct,
            total_deposits: self.deposits.iter().map(|t| t.amount).sum(),
            total_withdrawals: self.withdrawals.iter().map(|t| t.amount).sum(),
        }
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new("USD", dec!(10000))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_pnl: Decimal,
    pub total_return_pct: f64,
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
}
