//! Transactions: the only thing this service stores.
//!
//! This module contains:
//! - The `Transaction` model, its `Amount` and the `TransactionBuilder` for creating transactions
//! - Database functions for creating the table and storing transactions
//! - The route handler for creating a transaction

mod amount;
mod core;
mod create_endpoint;

pub use amount::Amount;
pub use self::core::{
    Transaction, TransactionBuilder, create_transaction, create_transaction_table,
    map_transaction_row,
};
pub use create_endpoint::{
    CreateTransactionRequest, CreateTransactionState, create_transaction_endpoint,
};

#[cfg(test)]
pub use self::core::{count_transactions, get_transaction};
