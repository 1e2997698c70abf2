//! Sets up the application's database.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// Create the tables the application needs, if they do not already exist.
///
/// The tables are created inside an exclusive SQL transaction. Calling this
/// function on an already initialized database is a no-op.
///
/// # Errors
/// Returns an [Error::SqlError] if the database is not writable or any
/// statement fails.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        transaction::{Amount, Transaction, count_transactions, create_transaction},
    };

    fn count_tables_named(name: &str, connection: &Connection) -> u32 {
        connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
                |row| row.get(0),
            )
            .expect("Could not query the schema")
    }

    #[test]
    fn creates_transactions_table() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("Could not initialize database");

        assert_eq!(count_tables_named("transactions", &conn), 1);
    }

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("Could not initialize database");
        initialize(&conn).expect("Could not initialize database a second time");

        assert_eq!(count_tables_named("transactions", &conn), 1);
    }

    #[test]
    fn failed_initialize_leaves_no_table_behind() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE other (x); CREATE INDEX transactions ON other (x);")
            .unwrap();

        let result = initialize(&conn);

        assert!(matches!(result, Err(Error::SqlError(_))), "got {result:?}");
        assert_eq!(count_tables_named("transactions", &conn), 0);
        assert!(conn.is_autocommit(), "initialize left a transaction open");
    }

    #[test]
    fn initialize_keeps_existing_rows() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        create_transaction(
            Transaction::build("u1", "Coffee", Amount::from_cents(450), "Food"),
            &conn,
        )
        .expect("Could not create transaction");

        initialize(&conn).expect("Could not initialize database a second time");

        assert_eq!(count_transactions(&conn), Ok(1));
    }
}
