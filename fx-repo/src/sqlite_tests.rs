//! SQLite adapter tests against an in-memory database.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use fx_types::{ConversionRepository, NewConversion};

use crate::sqlite::SqliteRepo;

/// Single-connection pool: every handle must see the same in-memory database.
async fn repo() -> SqliteRepo {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    let repo = SqliteRepo::with_pool(pool);
    repo.create_schema().await.unwrap();
    repo
}

fn conversion_at(transaction_date: DateTime<Utc>) -> NewConversion {
    NewConversion {
        base_currency: "EUR".to_string(),
        target_currency: "TRY".to_string(),
        amount: Decimal::from(10),
        converted_amount: Decimal::from(100),
        exchange_rate: Decimal::from(10),
        last_exchange_rate_date: Some(Utc.with_ymd_and_hms(2024, 5, 17, 8, 0, 0).unwrap()),
        transaction_date,
    }
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
}

#[tokio::test]
async fn save_assigns_sequential_ids() {
    let repo = repo().await;

    let first = repo.save(conversion_at(at(17, 8))).await.unwrap();
    let second = repo.save(conversion_at(at(17, 9))).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn find_by_id_round_trips_all_fields() {
    let repo = repo().await;

    let mut new = conversion_at(at(17, 9));
    new.amount = Decimal::from_str("123.4567").unwrap();
    new.converted_amount = Decimal::from_str("1234.567").unwrap();
    new.exchange_rate = Decimal::from_str("10.000001").unwrap();

    let saved = repo.save(new).await.unwrap();
    let found = repo.find_by_id(saved.id).await.unwrap().unwrap();

    assert_eq!(found, saved);
}

#[tokio::test]
async fn find_by_id_missing_returns_none() {
    let repo = repo().await;
    assert!(repo.find_by_id(42).await.unwrap().is_none());
}

#[tokio::test]
async fn absent_rate_date_round_trips_as_none() {
    let repo = repo().await;

    let mut new = conversion_at(at(17, 9));
    new.last_exchange_rate_date = None;

    let saved = repo.save(new).await.unwrap();
    let found = repo.find_by_id(saved.id).await.unwrap().unwrap();

    assert!(found.last_exchange_rate_date.is_none());
}

#[tokio::test]
async fn find_by_day_is_newest_first_and_paginated() {
    let repo = repo().await;

    repo.save(conversion_at(at(17, 8))).await.unwrap();
    repo.save(conversion_at(at(17, 9))).await.unwrap();
    repo.save(conversion_at(at(17, 10))).await.unwrap();
    repo.save(conversion_at(at(18, 8))).await.unwrap();

    let day = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();

    let first_page = repo.find_by_day(day, 0, 2).await.unwrap();
    assert_eq!(first_page.len(), 2);
    assert_eq!(first_page[0].transaction_date, at(17, 10));
    assert_eq!(first_page[1].transaction_date, at(17, 9));

    let second_page = repo.find_by_day(day, 1, 2).await.unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].transaction_date, at(17, 8));
}

#[tokio::test]
async fn find_by_day_excludes_other_days() {
    let repo = repo().await;

    repo.save(conversion_at(at(17, 8))).await.unwrap();

    let other_day = NaiveDate::from_ymd_opt(2024, 5, 18).unwrap();
    assert!(repo.find_by_day(other_day, 0, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn find_by_id_and_day_requires_both_to_match() {
    let repo = repo().await;

    let saved = repo.save(conversion_at(at(17, 8))).await.unwrap();

    let same_day = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
    let other_day = NaiveDate::from_ymd_opt(2024, 5, 18).unwrap();

    let hit = repo.find_by_id_and_day(saved.id, same_day).await.unwrap();
    assert_eq!(hit.unwrap().id, saved.id);

    let miss = repo.find_by_id_and_day(saved.id, other_day).await.unwrap();
    assert!(miss.is_none());
}
