#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::web::Data;
use async_trait::async_trait;
use chrono::NaiveDate;

use academic_dashboard::config::{Config, DbConfig};
use academic_dashboard::errors::{AppError, Result};
use academic_dashboard::model::{
    attendance::AttendanceHistoryRow,
    course::Course,
    grade::{GradeHistoryRow, NewGrade},
    student::Student,
};
use academic_dashboard::storage::AcademicStore;

#[derive(Debug, Clone)]
pub struct StoredGrade {
    pub id: u64,
    pub student_id: u64,
    pub course_id: u64,
    pub score: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct StoredAttendance {
    pub student_id: u64,
    pub course_id: u64,
    pub status: String,
    pub date: NaiveDate,
}

/// In-memory stand-in for the MySQL schema.
#[derive(Default)]
pub struct MemoryStore {
    pub courses: Vec<Course>,
    pub students: Vec<Student>,
    /// (student_id, course_id)
    pub enrollment: Vec<(u64, u64)>,
    pub grades: Mutex<Vec<StoredGrade>>,
    pub attendance: Vec<StoredAttendance>,
    pub fail_attendance: bool,
}

impl MemoryStore {
    fn name_of<T>(items: &[T], id: u64, key: impl Fn(&T) -> (u64, &str)) -> Option<String> {
        items
            .iter()
            .map(key)
            .find(|(item_id, _)| *item_id == id)
            .map(|(_, name)| name.to_string())
    }

    fn student_name(&self, id: u64) -> Option<String> {
        Self::name_of(&self.students, id, |s| (s.id, s.name.as_str()))
    }

    fn course_name(&self, id: u64) -> Option<String> {
        Self::name_of(&self.courses, id, |c| (c.id, c.name.as_str()))
    }
}

#[async_trait]
impl AcademicStore for MemoryStore {
    async fn list_courses(&self) -> Result<Vec<Course>> {
        Ok(self.courses.clone())
    }

    async fn list_enrolled_students(&self, course_id: u64) -> Result<Vec<Student>> {
        Ok(self
            .students
            .iter()
            .filter(|s| self.enrollment.contains(&(s.id, course_id)))
            .cloned()
            .collect())
    }

    async fn record_grade(&self, grade: &NewGrade) -> Result<u64> {
        let mut grades = self.grades.lock().unwrap();
        let id = grades.len() as u64 + 1;
        grades.push(StoredGrade {
            id,
            student_id: grade.student_id,
            course_id: grade.course_id,
            score: grade.score.value(),
            date: grade.date,
        });
        Ok(id)
    }

    async fn fetch_grade_history(&self) -> Result<Vec<GradeHistoryRow>> {
        let mut grades = self.grades.lock().unwrap().clone();
        grades.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        // inner join: rows whose student or course is unknown drop out
        Ok(grades
            .iter()
            .filter_map(|g| {
                Some(GradeHistoryRow {
                    student: self.student_name(g.student_id)?,
                    course: self.course_name(g.course_id)?,
                    score: g.score,
                    date: g.date,
                })
            })
            .collect())
    }

    async fn fetch_attendance_history(&self) -> Result<Vec<AttendanceHistoryRow>> {
        if self.fail_attendance {
            return Err(AppError::Query("Table 'academia.asistencia' doesn't exist".into()));
        }

        let mut rows: Vec<AttendanceHistoryRow> = self
            .attendance
            .iter()
            .filter_map(|a| {
                Some(AttendanceHistoryRow {
                    student: self.student_name(a.student_id)?,
                    course: self.course_name(a.course_id)?,
                    status: a.status.clone(),
                    date: a.date,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

/// Two courses, three students; Ana and Luis take Math, Ana and Eva take Physics.
pub fn seeded_store() -> MemoryStore {
    MemoryStore {
        courses: vec![
            Course { id: 1, name: "Math".into() },
            Course { id: 2, name: "Physics".into() },
        ],
        students: vec![
            Student { id: 10, name: "Ana".into() },
            Student { id: 11, name: "Luis".into() },
            Student { id: 12, name: "Eva".into() },
        ],
        enrollment: vec![(10, 1), (11, 1), (10, 2), (12, 2)],
        ..Default::default()
    }
}

pub fn with_history(mut store: MemoryStore) -> MemoryStore {
    {
        let grades = store.grades.get_mut().unwrap();
        for (student_id, course_id, score, day) in
            [(10, 1, 80.0, 1), (11, 1, 60.0, 1), (10, 2, 95.0, 3)]
        {
            let id = grades.len() as u64 + 1;
            grades.push(StoredGrade { id, student_id, course_id, score, date: date(day) });
        }
    }
    store.attendance = vec![
        StoredAttendance { student_id: 10, course_id: 1, status: "present".into(), date: date(1) },
        StoredAttendance { student_id: 11, course_id: 1, status: "absent".into(), date: date(1) },
        StoredAttendance { student_id: 12, course_id: 2, status: "late".into(), date: date(2) },
        StoredAttendance { student_id: 10, course_id: 1, status: "present".into(), date: date(2) },
    ];
    store
}

pub fn store_data(store: MemoryStore) -> (Arc<MemoryStore>, Data<dyn AcademicStore>) {
    let store = Arc::new(store);
    let shared: Arc<dyn AcademicStore> = store.clone();
    (store, Data::from(shared))
}

pub fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".into(),
        database: DbConfig {
            host: "localhost".into(),
            port: 3306,
            user: "test".into(),
            password: "test".into(),
            name: "academia".into(),
            max_connections: 1,
            acquire_timeout_secs: 1,
        },
        rate_api_per_min: 0,
        api_prefix: "/api".into(),
        log_dir: "logs".into(),
    }
}

/// Builds the app the way `main` does, minus the database pool and docs UI.

macro_rules! test_app {
    ($data:expr) => {{
        let config = common::test_config();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data($data.clone())
                .configure(move |cfg| academic_dashboard::routes::configure(cfg, config.clone())),
        )
        .await
    }};
}
