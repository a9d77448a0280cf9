//! Database schema and queries for budget categories and entries.

use rusqlite::{Connection, Row};
use time::Date;

use crate::{Error, dates::BudgetDate, view_state::ComponentId};

/// Database identifier for a category.
pub type CategoryId = i64;

/// A saved income or expense category.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub kind: ComponentId,
    pub date: Date,
}

/// A saved income or expense entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: i64,
    pub category_id: CategoryId,
    pub kind: ComponentId,
    pub title: String,
    pub amount: f64,
    pub date: Date,
}

/// Create the tables for the budget if they do not exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
            date TEXT NOT NULL,
            year INTEGER NOT NULL,
            month INTEGER NOT NULL,
            UNIQUE (title, kind, year, month)
        );

        CREATE TABLE IF NOT EXISTS entry (
            id INTEGER PRIMARY KEY,
            category_id INTEGER NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
            title TEXT NOT NULL,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_category_month ON category(year, month);
        CREATE INDEX IF NOT EXISTS idx_entry_category ON entry(category_id);",
    )?;

    Ok(())
}

/// Create a category of `kind` dated `date`.
///
/// # Errors
/// Returns [Error::DuplicateCategory] if a category with the same title and
/// kind already exists in the month of `date`.
pub fn create_category(
    title: &str,
    kind: ComponentId,
    date: Date,
    connection: &Connection,
) -> Result<Category, Error> {
    let result = connection.execute(
        "INSERT INTO category (title, kind, date, year, month) VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            title,
            kind.as_str(),
            date,
            date.year(),
            u8::from(date.month()),
        ),
    );

    match result {
        // Code 2067 occurs when a UNIQUE constraint failed.
        Err(rusqlite::Error::SqliteFailure(sql_error, _)) if sql_error.extended_code == 2067 => {
            return Err(Error::DuplicateCategory(title.to_owned(), date.into()));
        }
        Err(error) => return Err(error.into()),
        Ok(_) => {}
    }

    Ok(Category {
        id: connection.last_insert_rowid(),
        title: title.to_owned(),
        kind,
        date,
    })
}

/// Find the category of `kind` called `title` in the budget month `budget_date`.
pub fn get_category(
    title: &str,
    kind: ComponentId,
    budget_date: BudgetDate,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "SELECT id, title, kind, date FROM category
            WHERE title = :title AND kind = :kind AND year = :year AND month = :month",
        )?
        .query_row(
            rusqlite::named_params! {
                ":title": title,
                ":kind": kind.as_str(),
                ":year": budget_date.year(),
                ":month": u8::from(budget_date.month()),
            },
            map_category_row,
        )
        .map_err(|error| error.into())
}

/// All categories in the budget month `budget_date`, oldest first.
pub fn get_categories(
    budget_date: BudgetDate,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, title, kind, date FROM category
            WHERE year = :year AND month = :month ORDER BY id ASC",
        )?
        .query_map(
            rusqlite::named_params! {
                ":year": budget_date.year(),
                ":month": u8::from(budget_date.month()),
            },
            map_category_row,
        )?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Create an entry in the category `category_id`.
pub fn create_entry(
    category_id: CategoryId,
    kind: ComponentId,
    title: &str,
    amount: f64,
    date: Date,
    connection: &Connection,
) -> Result<Entry, Error> {
    connection.execute(
        "INSERT INTO entry (category_id, kind, title, amount, date) VALUES (?1, ?2, ?3, ?4, ?5)",
        (category_id, kind.as_str(), title, amount, date),
    )?;

    Ok(Entry {
        id: connection.last_insert_rowid(),
        category_id,
        kind,
        title: title.to_owned(),
        amount,
        date,
    })
}

/// All entries in the category `category_id`, oldest first.
pub fn get_entries(category_id: CategoryId, connection: &Connection) -> Result<Vec<Entry>, Error> {
    connection
        .prepare(
            "SELECT id, category_id, kind, title, amount, date FROM entry
            WHERE category_id = :category_id ORDER BY id ASC",
        )?
        .query_map(&[(":category_id", &category_id)], map_entry_row)?
        .map(|maybe_entry| maybe_entry.map_err(|error| error.into()))
        .collect()
}

fn parse_kind(row: &Row, index: usize) -> Result<ComponentId, rusqlite::Error> {
    let kind: String = row.get(index)?;

    ComponentId::from_name(&kind).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            rusqlite::types::Type::Text,
            format!("invalid category kind {kind:?}").into(),
        )
    })
}

fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        title: row.get(1)?,
        kind: parse_kind(row, 2)?,
        date: row.get(3)?,
    })
}

fn map_entry_row(row: &Row) -> Result<Entry, rusqlite::Error> {
    Ok(Entry {
        id: row.get(0)?,
        category_id: row.get(1)?,
        kind: parse_kind(row, 2)?,
        title: row.get(3)?,
        amount: row.get(4)?,
        date: row.get(5)?,
    })
}

#[cfg(test)]
fn stored_month(category_id: CategoryId, connection: &Connection) -> Result<time::Month, Error> {
    let month: u8 = connection.query_row(
        "SELECT month FROM category WHERE id = ?1",
        [category_id],
        |row| row.get(0),
    )?;

    time::Month::try_from(month).map_err(|_| Error::NotFound)
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;
    use time::{Month, macros::date};

    use crate::{
        Error,
        dates::BudgetDate,
        db::{create_category, get_categories, get_category, initialize, stored_month},
        view_state::ComponentId,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();

        let category = create_category(
            "Salary",
            ComponentId::Income,
            date!(2024 - 03 - 05),
            &connection,
        )
        .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.title, "Salary");
        assert_eq!(
            stored_month(category.id, &connection),
            Ok(Month::March)
        );
    }

    #[test]
    fn duplicate_category_in_same_month_fails() {
        let connection = get_test_db_connection();
        create_category("Rent", ComponentId::Expense, date!(2024 - 03 - 01), &connection)
            .expect("Could not create category");

        let result =
            create_category("Rent", ComponentId::Expense, date!(2024 - 03 - 20), &connection);

        assert_eq!(
            result,
            Err(Error::DuplicateCategory(
                "Rent".to_owned(),
                BudgetDate::new(2024, Month::March)
            ))
        );
    }

    #[test]
    fn same_title_allowed_in_other_month_or_kind() {
        let connection = get_test_db_connection();
        create_category("Other", ComponentId::Expense, date!(2024 - 03 - 01), &connection)
            .expect("Could not create category");

        assert!(
            create_category("Other", ComponentId::Expense, date!(2024 - 04 - 01), &connection)
                .is_ok()
        );
        assert!(
            create_category("Other", ComponentId::Income, date!(2024 - 03 - 01), &connection)
                .is_ok()
        );
    }

    #[test]
    fn get_category_matches_title_kind_and_month() {
        let connection = get_test_db_connection();
        let inserted =
            create_category("Salary", ComponentId::Income, date!(2024 - 03 - 05), &connection)
                .expect("Could not create category");
        let march = BudgetDate::new(2024, Month::March);

        assert_eq!(
            get_category("Salary", ComponentId::Income, march, &connection),
            Ok(inserted)
        );
        assert_eq!(
            get_category("Salary", ComponentId::Expense, march, &connection),
            Err(Error::NotFound)
        );
        assert_eq!(
            get_category(
                "Salary",
                ComponentId::Income,
                BudgetDate::new(2024, Month::April),
                &connection
            ),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn get_categories_returns_month_in_insertion_order() {
        let connection = get_test_db_connection();
        create_category("Salary", ComponentId::Income, date!(2024 - 03 - 05), &connection).unwrap();
        create_category("Rent", ComponentId::Expense, date!(2024 - 03 - 06), &connection).unwrap();
        create_category("Bonus", ComponentId::Income, date!(2024 - 04 - 01), &connection).unwrap();

        let got = get_categories(BudgetDate::new(2024, Month::March), &connection)
            .expect("Could not get categories");

        let titles: Vec<&str> = got.iter().map(|category| category.title.as_str()).collect();
        assert_eq!(titles, ["Salary", "Rent"]);
    }
}
