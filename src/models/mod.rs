pub mod lesson;

pub use lesson::{
    DayOfWeek, Lesson, LessonSlot, MessageResponse, NewLessonRequest, UpdateLessonRequest,
    UpdatedLessonResponse,
};
