//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::TransactionId, transaction::Amount};

// ============================================================================
// MODELS
// ============================================================================

/// A single financial record, e.g. a purchase or a pay cheque.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the database.
    pub id: TransactionId,
    /// The ID of the user who owns the transaction.
    pub user_id: String,
    /// A short description of what the transaction was for.
    pub title: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: Amount,
    /// The category of the transaction, e.g. "Food", "Transport", "Rent".
    pub category: String,
    /// The date the transaction was recorded, assigned by the database.
    pub created_at: Date,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        user_id: &str,
        title: &str,
        amount: Amount,
        category: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            user_id: user_id.to_owned(),
            title: title.to_owned(),
            amount,
            category: category.to_owned(),
        }
    }
}

/// The caller supplied fields of a [Transaction].
///
/// The `id` and `created_at` fields are filled in by the database when the
/// builder is passed to [create_transaction].
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The ID of the user who owns the transaction.
    pub user_id: String,

    /// A short description of what the transaction was for.
    ///
    /// # Examples
    /// - `"Coffee"`
    /// - `"Salary - January 2025"`
    pub title: String,

    /// The monetary amount of the transaction.
    ///
    /// The sign is not interpreted, but the database only accepts amounts
    /// between [Amount::MIN] and [Amount::MAX].
    pub amount: Amount,

    /// The category of the transaction.
    pub category: String,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a [Error::SqlError] if a column constraint fails
/// (e.g. the amount is out of range or a text field is longer than 255
/// characters), or if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO transactions (user_id, title, amount, category)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, user_id, title, amount, category, created_at",
        )?
        .query_row(
            (
                builder.user_id,
                builder.title,
                builder.amount,
                builder.category,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
#[cfg(test)]
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, user_id, title, amount, category, created_at
             FROM transactions WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// Safe to call on every startup, an existing table is left untouched.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL CHECK (length(user_id) <= 255),
                title TEXT NOT NULL CHECK (length(title) <= 255),
                amount INTEGER NOT NULL CHECK (amount BETWEEN -9999999999 AND 9999999999),
                category TEXT NOT NULL CHECK (length(category) <= 255),
                created_at TEXT NOT NULL DEFAULT (date('now'))
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let user_id = row.get(1)?;
    let title = row.get(2)?;
    let amount = row.get(3)?;
    let category = row.get(4)?;
    let created_at = row.get(5)?;

    Ok(Transaction {
        id,
        user_id,
        title,
        amount,
        category,
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================
