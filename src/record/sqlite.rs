//! A [TransactionStore] backed by a SQLite database.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row};

use crate::Error;

use super::{RecordFilter, TransactionRecord, TransactionStore};

/// Stores transaction records in the `transaction_record` table.
///
/// Records are returned in `rowid` order, i.e. the order they were inserted.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Create a store using `connection`, creating the record table if needed.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_record_table(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SqliteStore {
    /// Replace the table contents inside a single SQL transaction.
    ///
    /// If any insert fails, the transaction is rolled back and the previous
    /// records remain.
    fn replace_all(&self, records: Vec<TransactionRecord>) -> Result<(), Error> {
        let mut connection = self.lock()?;
        let sql_transaction = connection.transaction()?;

        sql_transaction.execute("DELETE FROM transaction_record", ())?;
        {
            let mut statement = sql_transaction.prepare(
                "INSERT INTO transaction_record (id, title, description, price, date_of_sale, category, sold)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;

            for record in &records {
                statement.execute((
                    record.id,
                    &record.title,
                    &record.description,
                    record.price,
                    record.date_of_sale,
                    &record.category,
                    record.sold,
                ))?;
            }
        }

        sql_transaction.commit()?;
        tracing::debug!("Replaced transaction records with {} rows", records.len());

        Ok(())
    }

    fn find(&self, filter: &RecordFilter) -> Result<Vec<TransactionRecord>, Error> {
        let connection = self.lock()?;

        let mut statement = connection.prepare(
            "SELECT id, title, description, price, date_of_sale, category, sold
             FROM transaction_record ORDER BY rowid ASC",
        )?;

        let mut records = Vec::new();
        for record in statement.query_map([], map_record_row)? {
            let record = record?;
            if filter.matches(&record) {
                records.push(record);
            }
        }

        Ok(records)
    }
}

/// Create the record table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_record_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transaction_record (
                id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                date_of_sale TEXT,
                category TEXT NOT NULL,
                sold INTEGER NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [TransactionRecord].
fn map_record_row(row: &Row) -> Result<TransactionRecord, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let description = row.get(2)?;
    let price = row.get(3)?;
    let date_of_sale = row.get(4)?;
    let category = row.get(5)?;
    let sold = row.get(6)?;

    Ok(TransactionRecord {
        id,
        title,
        description,
        price,
        date_of_sale,
        category,
        sold,
    })
}
