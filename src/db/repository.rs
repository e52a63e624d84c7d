//! Every function takes the pool explicitly and runs one statement on a
//! pooled connection, released when the call returns.
//!
//! List queries order by `day_of_week` as stored text, so days come out
//! alphabetically (friday, monday, saturday, thursday, tuesday, wednesday)
//! rather than in calendar order. Clients depend on this ordering.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{AppError, is_unique_violation};
use crate::models::lesson::{normalize_day, normalize_letter};
use crate::models::{Lesson, LessonSlot, UpdateLessonRequest};

pub async fn insert_lesson(db: &SqlitePool, lesson: Lesson) -> Result<Lesson, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO lessons
            (class_number, class_letter, classroom, lesson_number, teacher, day_of_week)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(lesson.class_number)
    .bind(&lesson.class_letter)
    .bind(&lesson.classroom)
    .bind(lesson.lesson_number)
    .bind(&lesson.teacher)
    .bind(lesson.day_of_week)
    .execute(db)
    .await;

    match result {
        Ok(_) => {
            info!(
                "created lesson {}{} #{} on {}",
                lesson.class_number, lesson.class_letter, lesson.lesson_number, lesson.day_of_week
            );
            Ok(lesson)
        }
        Err(err) if is_unique_violation(&err) => Err(AppError::slot_taken()),
        Err(err) => Err(err.into()),
    }
}

pub async fn fetch_lessons_by_class(
    db: &SqlitePool,
    class_number: i64,
    class_letter: &str,
) -> Result<Vec<Lesson>, AppError> {
    let lessons = sqlx::query_as::<_, Lesson>(
        r#"
        SELECT class_number, class_letter, classroom, lesson_number, teacher, day_of_week
        FROM lessons
        WHERE class_number = ?1 AND class_letter = ?2
        ORDER BY day_of_week, lesson_number
        "#,
    )
    .bind(class_number)
    .bind(normalize_letter(class_letter))
    .fetch_all(db)
    .await?;

    Ok(lessons)
}

pub async fn fetch_lessons_by_class_and_day(
    db: &SqlitePool,
    class_number: i64,
    class_letter: &str,
    day_of_week: &str,
) -> Result<Vec<Lesson>, AppError> {
    let lessons = sqlx::query_as::<_, Lesson>(
        r#"
        SELECT class_number, class_letter, classroom, lesson_number, teacher, day_of_week
        FROM lessons
        WHERE class_number = ?1 AND class_letter = ?2 AND day_of_week = ?3
        ORDER BY lesson_number
        "#,
    )
    .bind(class_number)
    .bind(normalize_letter(class_letter))
    .bind(normalize_day(day_of_week))
    .fetch_all(db)
    .await?;

    Ok(lessons)
}

pub async fn fetch_all_lessons(db: &SqlitePool) -> Result<Vec<Lesson>, AppError> {
    let lessons = sqlx::query_as::<_, Lesson>(
        r#"
        SELECT class_number, class_letter, classroom, lesson_number, teacher, day_of_week
        FROM lessons
        ORDER BY class_number, class_letter, day_of_week, lesson_number
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(lessons)
}

pub async fn fetch_lesson(db: &SqlitePool, slot: &LessonSlot) -> Result<Option<Lesson>, AppError> {
    let lesson = sqlx::query_as::<_, Lesson>(
        r#"
        SELECT class_number, class_letter, classroom, lesson_number, teacher, day_of_week
        FROM lessons
        WHERE class_number = ?1 AND class_letter = ?2 AND lesson_number = ?3 AND day_of_week = ?4
        "#,
    )
    .bind(slot.class_number)
    .bind(&slot.class_letter)
    .bind(slot.lesson_number)
    .bind(&slot.day_of_week)
    .fetch_optional(db)
    .await?;

    Ok(lesson)
}

/// Returns `None` when the slot is empty. An empty patch leaves the row
/// untouched and still returns it.
///
/// The patch is a single statement so no read lock is held across the
/// write; concurrent updates of one slot queue on the busy timeout.
pub async fn update_lesson(
    db: &SqlitePool,
    slot: &LessonSlot,
    req: UpdateLessonRequest,
) -> Result<Option<Lesson>, AppError> {
    if req.is_empty() {
        debug!("empty patch for {:?}, nothing to update", slot);
        return fetch_lesson(db, slot).await;
    }

    let updated = sqlx::query_as::<_, Lesson>(
        r#"
        UPDATE lessons
        SET classroom = COALESCE(?1, classroom),
            teacher = COALESCE(?2, teacher)
        WHERE class_number = ?3 AND class_letter = ?4 AND lesson_number = ?5 AND day_of_week = ?6
        RETURNING class_number, class_letter, classroom, lesson_number, teacher, day_of_week
        "#,
    )
    .bind(req.classroom)
    .bind(req.teacher)
    .bind(slot.class_number)
    .bind(&slot.class_letter)
    .bind(slot.lesson_number)
    .bind(&slot.day_of_week)
    .fetch_optional(db)
    .await?;

    if updated.is_some() {
        info!("updated lesson {:?}", slot);
    }
    Ok(updated)
}

/// Returns `false` when nothing occupied the slot.
pub async fn delete_lesson(db: &SqlitePool, slot: &LessonSlot) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        DELETE FROM lessons
        WHERE class_number = ?1 AND class_letter = ?2 AND lesson_number = ?3 AND day_of_week = ?4
        "#,
    )
    .bind(slot.class_number)
    .bind(&slot.class_letter)
    .bind(slot.lesson_number)
    .bind(&slot.day_of_week)
    .execute(db)
    .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        info!("deleted lesson {:?}", slot);
    }
    Ok(deleted)
}
