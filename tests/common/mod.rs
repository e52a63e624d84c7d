#![allow(dead_code)]

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use timetable::config::AppConfig;
use timetable::db;
use timetable::models::NewLessonRequest;

/// In-memory databases are per connection, so the pool is capped at one.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    db::migrate(&pool).await.expect("Failed to run migrations");
    pool
}

/// File database opened the way the server opens it, with several
/// connections so requests really run side by side.
pub async fn file_pool(dir: &Path) -> SqlitePool {
    let url = format!("sqlite://{}", dir.join("school.db").display());
    let config = AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some(url.clone()),
        "DATABASE_MAX_CONNECTIONS" => Some("5".to_string()),
        _ => None,
    })
    .expect("valid config");

    db::connect(&config).await.expect("Failed to open database")
}

pub fn new_lesson(
    class_number: i64,
    class_letter: &str,
    lesson_number: i64,
    day_of_week: &str,
) -> NewLessonRequest {
    NewLessonRequest {
        class_number,
        class_letter: class_letter.to_string(),
        classroom: "201".to_string(),
        lesson_number,
        teacher: "Ivanova".to_string(),
        day_of_week: day_of_week.to_string(),
    }
}
