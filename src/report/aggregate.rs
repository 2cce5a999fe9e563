use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{attendance::AttendanceHistoryRow, grade::GradeHistoryRow};

pub const HISTOGRAM_BUCKETS: usize = 10;
const BUCKET_WIDTH: f64 = 100.0 / HISTOGRAM_BUCKETS as f64;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DateMean {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub mean_score: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CourseCount {
    pub course: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CourseStatusCount {
    pub course: String,
    pub status: String,
    pub count: usize,
}

/// Scores in `[lower, upper)`; the top bucket also holds `upper`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ScoreBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl ScoreBucket {
    pub fn label(&self) -> String {
        format!("{}-{}", self.lower, self.upper)
    }
}

/// Everything the grades view shows about a non-empty history.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GradeSummary {
    pub total: usize,
    pub mean: f64,
    pub by_date: Vec<DateMean>,
    pub by_course: Vec<CourseCount>,
    pub distribution: Vec<ScoreBucket>,
}

/// Mean over the whole table, `None` when there is nothing to average.
pub fn compute_mean(records: &[GradeHistoryRow]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let sum: f64 = records.iter().map(|r| r.score).sum();
    Some(sum / records.len() as f64)
}

/// Mean score per exact date, oldest first.
pub fn group_by_date_mean(records: &[GradeHistoryRow]) -> Vec<DateMean> {
    let mut groups: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.date).or_insert((0.0, 0));
        entry.0 += record.score;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(date, (sum, count))| DateMean {
            date,
            mean_score: sum / count as f64,
            count,
        })
        .collect()
}

/// Number of grade records per course, ordered by course name.
pub fn group_by_course_count(records: &[GradeHistoryRow]) -> Vec<CourseCount> {
    let mut groups: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *groups.entry(record.course.as_str()).or_default() += 1;
    }

    groups
        .into_iter()
        .map(|(course, count)| CourseCount {
            course: course.to_string(),
            count,
        })
        .collect()
}

/// Number of attendance records per (course, status), ordered by course then status.
pub fn group_by_course_and_status(records: &[AttendanceHistoryRow]) -> Vec<CourseStatusCount> {
    let mut groups: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for record in records {
        *groups
            .entry((record.course.as_str(), record.status.as_str()))
            .or_default() += 1;
    }

    groups
        .into_iter()
        .map(|((course, status), count)| CourseStatusCount {
            course: course.to_string(),
            status: status.to_string(),
            count,
        })
        .collect()
}

pub fn score_histogram(records: &[GradeHistoryRow]) -> Vec<ScoreBucket> {
    let mut counts = [0usize; HISTOGRAM_BUCKETS];
    for record in records {
        let index = ((record.score / BUCKET_WIDTH).floor().max(0.0) as usize).min(HISTOGRAM_BUCKETS - 1);
        counts[index] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| ScoreBucket {
            lower: i as f64 * BUCKET_WIDTH,
            upper: (i + 1) as f64 * BUCKET_WIDTH,
            count,
        })
        .collect()
}

pub fn summarize(records: &[GradeHistoryRow]) -> Option<GradeSummary> {
    let mean = compute_mean(records)?;
    Some(GradeSummary {
        total: records.len(),
        mean,
        by_date: group_by_date_mean(records),
        by_course: group_by_course_count(records),
        distribution: score_histogram(records),
    })
}
