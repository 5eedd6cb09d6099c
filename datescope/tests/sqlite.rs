#![cfg(feature = "sqlite")]

use std::error::Error;

use chrono::{DateTime, Duration, Months, NaiveDate, TimeZone, Utc};
use datescope::config::with_time_zone;
use datescope::database::sqlite::Sqlite;
use datescope::prelude::*;
use datescope::ScopeResult;
use sqlx::{Connection, Row, SqliteConnection};

mod common;

use common::{Author, Book};

type TestResult = Result<(), Box<dyn Error>>;

const AUTHOR_1: i64 = 1;
const AUTHOR_2: i64 = 2;

const BOOK_2000: i64 = 1;
const BOOK_3Y_AGO: i64 = 2;
const BOOK_1W_AGO: i64 = 3;

/// Fixed "now", so day boundaries never depend on when the tests run.
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn years_ago(years: u32) -> DateTime<Utc> {
    now().checked_sub_months(Months::new(12 * years)).unwrap()
}

fn week_ago() -> DateTime<Utc> {
    now() - Duration::weeks(1)
}

fn book_2000_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
}

async fn setup() -> Result<SqliteConnection, sqlx::Error> {
    let mut conn = SqliteConnection::connect("sqlite::memory:").await?;

    sqlx::query(
        "CREATE TABLE authors (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )",
    )
    .execute(&mut conn)
    .await?;

    sqlx::query(
        "CREATE TABLE books (
            id INTEGER PRIMARY KEY,
            author_id INTEGER NOT NULL REFERENCES authors (id),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(&mut conn)
    .await?;

    for (id, name) in [(AUTHOR_1, "author1"), (AUTHOR_2, "author2")] {
        sqlx::query("INSERT INTO authors (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(&mut conn)
            .await?;
    }

    let books = [
        (BOOK_2000, AUTHOR_1, book_2000_created_at()),
        (BOOK_3Y_AGO, AUTHOR_1, years_ago(3) + Duration::seconds(1)),
        (BOOK_1W_AGO, AUTHOR_2, week_ago() + Duration::seconds(1)),
    ];

    for (id, author_id, created_at) in books {
        sqlx::query("INSERT INTO books (id, author_id, created_at, updated_at) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(author_id)
            .bind(created_at)
            .bind(created_at)
            .execute(&mut conn)
            .await?;
    }

    Ok(conn)
}

/// Ids of the rows selected by `build`, which runs in UTC, duplicates kept.
async fn ids<E, F>(conn: &mut SqliteConnection, build: F) -> Result<Vec<i64>, Box<dyn Error>>
where
    E: Table,
    F: FnOnce() -> ScopeResult<Select<E>>,
{
    let select = with_time_zone(chrono_tz::UTC, build)?;
    let statement = select.to_statement::<Sqlite>();

    let mut ids: Vec<i64> = statement
        .query()
        .fetch_all(&mut *conn)
        .await?
        .iter()
        .map(|row| row.get::<i64, _>("id"))
        .collect();

    ids.sort_unstable();
    Ok(ids)
}

fn book_created() -> &'static DateScope<Select<Book>> {
    Book::scope("created").unwrap()
}

#[tokio::test]
async fn books_created_between_and_friends() -> TestResult {
    let mut conn = setup().await?;
    let created = book_created();

    let between = ids(&mut conn, || {
        created.between(Book::query(), years_ago(3), years_ago(1))
    })
    .await?;
    assert_eq!(between, vec![BOOK_3Y_AGO]);

    let between_dates = ids(&mut conn, || {
        created.between(
            Book::query(),
            years_ago(3).format("%Y-%m-%d").to_string(),
            years_ago(1).format("%Y-%m-%d").to_string(),
        )
    })
    .await?;
    assert_eq!(between_dates, between);

    let after = ids(&mut conn, || created.after(Book::query(), week_ago())).await?;
    assert_eq!(after, vec![BOOK_1W_AGO]);

    let before = ids(&mut conn, || {
        created.before(Book::query(), now() - Duration::days(1))
    })
    .await?;
    assert_eq!(before, vec![BOOK_2000, BOOK_3Y_AGO, BOOK_1W_AGO]);

    let before_exact = ids(&mut conn, || {
        created.before(Book::query(), book_2000_created_at())
    })
    .await?;
    assert_eq!(before_exact, vec![BOOK_2000]);

    let before_date = ids(&mut conn, || created.before(Book::query(), "2000-01-01")).await?;
    assert_eq!(before_date, vec![BOOK_2000]);

    Ok(())
}

#[tokio::test]
async fn books_created_on() -> TestResult {
    let mut conn = setup().await?;
    let created = book_created();

    let on_time = ids(&mut conn, || created.on(Book::query(), week_ago())).await?;
    assert_eq!(on_time, vec![BOOK_1W_AGO]);

    let on_date = ids(&mut conn, || {
        created.on(Book::query(), week_ago().date_naive())
    })
    .await?;
    assert_eq!(on_date, vec![BOOK_1W_AGO]);

    let on_2000 = ids(&mut conn, || {
        created.on(Book::query(), NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
    })
    .await?;
    assert_eq!(on_2000, vec![BOOK_2000]);

    Ok(())
}

#[tokio::test]
async fn books_created_on_in_ambient_time_zone() -> TestResult {
    let conn = &mut setup().await?;
    let created = book_created();
    let new_year = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();

    // Midnight UTC on 2000-01-01 is the evening of 1999-12-31 in New York.
    let new_york = |day: NaiveDate| {
        with_time_zone(chrono_tz::America::New_York, || {
            created.on(Book::query(), day)
        })
        .map(|select| select.to_statement::<Sqlite>())
    };

    let statement = new_york(new_year.pred_opt().unwrap())?;
    let rows = statement.query().fetch_all(&mut *conn).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get::<i64, _>("id"), BOOK_2000);

    let statement = new_york(new_year)?;
    assert!(statement.query().fetch_all(&mut *conn).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn between_is_intersection_of_after_and_before() -> TestResult {
    let mut conn = setup().await?;
    let created = book_created();

    let bounds = [
        (years_ago(30), years_ago(2)),
        (years_ago(4), now()),
        (week_ago(), years_ago(1)),
    ];

    for (a, b) in bounds {
        let between = ids(&mut conn, || created.between(Book::query(), a, b)).await?;
        let after = ids(&mut conn, || created.after(Book::query(), a)).await?;
        let before = ids(&mut conn, || created.before(Book::query(), b)).await?;

        let intersection: Vec<i64> = after.into_iter().filter(|id| before.contains(id)).collect();
        assert_eq!(between, intersection);
    }

    Ok(())
}

#[tokio::test]
async fn authors_with_any_books_created() -> TestResult {
    let mut conn = setup().await?;

    for name in ["with_any_books_created", "books_created", "with_any_books_written"] {
        let scope = Author::scope(name)?;

        let between = ids(&mut conn, || {
            scope.between(Author::query(), years_ago(3), years_ago(1))
        })
        .await?;
        assert_eq!(between, vec![AUTHOR_1], "{}_between", name);

        let before = ids(&mut conn, || scope.before(Author::query(), years_ago(4))).await?;
        assert_eq!(before, vec![AUTHOR_1], "{}_before", name);

        let before_any = ids(&mut conn, || scope.before(Author::query(), years_ago(400))).await?;
        assert!(before_any.is_empty(), "{}_before", name);

        let after = ids(&mut conn, || scope.after(Author::query(), week_ago())).await?;
        assert_eq!(after, vec![AUTHOR_2], "{}_after", name);

        let unbounded = ids(&mut conn, || {
            scope.between(Author::query(), None::<NaiveDate>, None::<NaiveDate>)
        })
        .await?;
        assert_eq!(unbounded, vec![AUTHOR_1, AUTHOR_2], "{}_between", name);

        // One row per matching book: the join is not made distinct.
        let before_now = ids(&mut conn, || scope.before(Author::query(), now())).await?;
        assert_eq!(before_now, vec![AUTHOR_1, AUTHOR_1, AUTHOR_2], "{}_before", name);
    }

    Ok(())
}
