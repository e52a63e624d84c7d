use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

#[derive(Debug, Error)]
#[error("unknown day of week: {0:?}")]
pub struct UnknownDay(pub String);

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 6] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = UnknownDay;

    /// Case-insensitive; surrounding whitespace is not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.as_str() == lowered)
            .ok_or_else(|| UnknownDay(s.to_string()))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the `lessons` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Lesson {
    pub class_number: i64,
    pub class_letter: String,
    pub classroom: String,
    pub lesson_number: i64,
    pub teacher: String,
    pub day_of_week: DayOfWeek,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLessonRequest {
    pub class_number: i64,
    pub class_letter: String,
    pub classroom: String,
    pub lesson_number: i64,
    pub teacher: String,
    pub day_of_week: String,
}

impl NewLessonRequest {
    /// Checks the request and returns the record exactly as it will be stored.
    pub fn into_lesson(self) -> Result<Lesson, AppError> {
        let day_of_week = self
            .day_of_week
            .parse::<DayOfWeek>()
            .map_err(|_| AppError::BadRequest("Invalid day of week".to_string()))?;

        if self.class_number < 1 {
            return Err(AppError::BadRequest(
                "class_number must be a positive integer".to_string(),
            ));
        }
        if self.lesson_number < 1 {
            return Err(AppError::BadRequest(
                "lesson_number must be a positive integer".to_string(),
            ));
        }

        let mut letters = self.class_letter.trim().chars();
        let class_letter = match (letters.next(), letters.next()) {
            (Some(c), None) if c.is_alphabetic() => normalize_letter(&c.to_string()),
            _ => {
                return Err(AppError::BadRequest(
                    "class_letter must be a single letter".to_string(),
                ));
            }
        };

        Ok(Lesson {
            class_number: self.class_number,
            class_letter,
            classroom: self.classroom,
            lesson_number: self.lesson_number,
            teacher: self.teacher,
            day_of_week,
        })
    }
}

/// Only the mutable fields; absent fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLessonRequest {
    pub classroom: Option<String>,
    pub teacher: Option<String>,
}

impl UpdateLessonRequest {
    pub fn is_empty(&self) -> bool {
        self.classroom.is_none() && self.teacher.is_none()
    }
}

/// Identity fields of a lesson, normalized for lookup.
///
/// The day is kept as free text: an unrecognized day matches no row
/// rather than being rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSlot {
    pub class_number: i64,
    pub class_letter: String,
    pub lesson_number: i64,
    pub day_of_week: String,
}

impl LessonSlot {
    pub fn new(class_number: i64, class_letter: &str, lesson_number: i64, day_of_week: &str) -> Self {
        Self {
            class_number,
            class_letter: normalize_letter(class_letter),
            lesson_number,
            day_of_week: normalize_day(day_of_week),
        }
    }
}

pub fn normalize_letter(letter: &str) -> String {
    letter.trim().to_uppercase()
}

pub fn normalize_day(day: &str) -> String {
    day.to_lowercase()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedLessonResponse {
    pub message: String,
    pub lesson_number: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
