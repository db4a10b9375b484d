//! Typed records for every resource the client reads.
//!
//! Each record is built from one JSON object in a single deserialization
//! step. Unknown fields are dropped, and missing or blank fields become
//! `None`.

pub(crate) mod de;

mod activity;
mod announcement;
mod attendance;
mod detention;
mod homework;
mod student;
mod timetable;

pub use activity::Activity;
pub use announcement::{Announcement, Attachment};
pub use attendance::{
    AttendanceDays, AttendanceMeta, AttendanceRecord, AttendanceSlot, AttendanceStatus, DaySlots,
};
pub use detention::{
    Detention, DetentionLesson, DetentionSubject, DetentionTeacher, DetentionType,
    LessonPupilBehaviour,
};
pub use homework::{Homework, HomeworkAttachment, HomeworkLink, HomeworkStatus, HOMEWORK_TYPE};
pub use student::Student;
pub use timetable::{PeriodNumber, PeriodTimes, TimetableMeta, TimetablePeriod};
