use axum::Json;
use axum::extract::{FromRequestParts, Path};
use axum::routing::{post, put};
use axum::{Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

/// `Path` whose rejection is reported as an `AppError` JSON body.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
struct ApiPath<T>(T);

#[derive(Deserialize)]
struct ClassPath {
    class_number: i64,
    class_letter: String,
}

#[derive(Deserialize)]
struct ClassDayPath {
    class_number: i64,
    class_letter: String,
    day_of_week: String,
}

#[derive(Deserialize)]
struct SlotPath {
    class_number: i64,
    class_letter: String,
    lesson_number: i64,
    day_of_week: String,
}

impl From<SlotPath> for LessonSlot {
    fn from(p: SlotPath) -> Self {
        LessonSlot::new(p.class_number, &p.class_letter, p.lesson_number, &p.day_of_week)
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/lessons/", post(create_lesson))
        .route("/lessons", post(create_lesson))
        .route("/lessons/all", get(list_all_lessons))
        .route("/lessons/class/{class_number}/{class_letter}", get(list_class_lessons))
        .route(
            "/lessons/class/{class_number}/{class_letter}/day/{day_of_week}",
            get(list_class_day_lessons),
        )
        .route(
            "/lessons/class/{class_number}/{class_letter}/lesson/{lesson_number}/day/{day_of_week}",
            put(update_lesson).delete(delete_lesson),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

async fn index() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "School Lessons API".to_string(),
    })
}

async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(Json(HealthResponse {
        status: "ok",
        message: "Server is running",
    }))
}

async fn create_lesson(
    State(state): State<AppState>,
    Json(req): Json<NewLessonRequest>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = req.into_lesson()?;
    let lesson = repository::insert_lesson(&state.db, lesson).await?;
    Ok(Json(lesson))
}

async fn list_class_lessons(
    State(state): State<AppState>,
    ApiPath(p): ApiPath<ClassPath>,
) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons =
        repository::fetch_lessons_by_class(&state.db, p.class_number, &p.class_letter).await?;
    Ok(Json(lessons))
}

async fn list_class_day_lessons(
    State(state): State<AppState>,
    ApiPath(p): ApiPath<ClassDayPath>,
) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = repository::fetch_lessons_by_class_and_day(
        &state.db,
        p.class_number,
        &p.class_letter,
        &p.day_of_week,
    )
    .await?;
    Ok(Json(lessons))
}

async fn list_all_lessons(State(state): State<AppState>) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = repository::fetch_all_lessons(&state.db).await?;
    Ok(Json(lessons))
}

async fn update_lesson(
    State(state): State<AppState>,
    ApiPath(p): ApiPath<SlotPath>,
    Json(req): Json<UpdateLessonRequest>,
) -> Result<Json<UpdatedLessonResponse>, AppError> {
    let slot = LessonSlot::from(p);
    let lesson = repository::update_lesson(&state.db, &slot, req)
        .await?
        .ok_or_else(AppError::lesson_not_found)?;
    Ok(Json(UpdatedLessonResponse {
        message: "Lesson updated successfully".to_string(),
        lesson_number: lesson.lesson_number,
    }))
}

async fn delete_lesson(
    State(state): State<AppState>,
    ApiPath(p): ApiPath<SlotPath>,
) -> Result<Json<MessageResponse>, AppError> {
    let slot = LessonSlot::from(p);
    if repository::delete_lesson(&state.db, &slot).await? {
        Ok(Json(MessageResponse {
            message: "Lesson deleted successfully".to_string(),
        }))
    } else {
        Err(AppError::lesson_not_found())
    }
}
