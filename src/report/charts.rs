use std::collections::BTreeSet;

use strum_macros::{Display, EnumString};

use super::aggregate::{CourseCount, CourseStatusCount, DateMean, ScoreBucket};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ChartKind {
    ScoreTrend,
    ScoreDistribution,
    GradesByCourse,
    AttendanceByCourse,
}

impl ChartKind {
    pub fn file_name(self) -> String {
        format!("{self}.png")
    }
}

/// The data a chart shows plus its fixed captions.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub body: ChartBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    /// One point per label, drawn left to right.
    Line { points: Vec<(String, f64)> },
    /// `series[s].values[c]` is the bar of series `s` in category `c`.
    Bars {
        categories: Vec<String>,
        series: Vec<BarSeries>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl ChartSpec {
    /// Largest plotted value, used to size the y axis.
    pub fn max_value(&self) -> f64 {
        let values: Box<dyn Iterator<Item = f64> + '_> = match &self.body {
            ChartBody::Line { points } => Box::new(points.iter().map(|(_, v)| *v)),
            ChartBody::Bars { series, .. } => {
                Box::new(series.iter().flat_map(|s| s.values.iter().copied()))
            }
        };
        values.fold(0.0, f64::max)
    }
}

pub fn score_trend(by_date: &[DateMean]) -> ChartSpec {
    ChartSpec {
        title: "Average Score by Date",
        x_label: "Date",
        y_label: "Average score",
        body: ChartBody::Line {
            points: by_date
                .iter()
                .map(|g| (g.date.format("%Y-%m-%d").to_string(), g.mean_score))
                .collect(),
        },
    }
}

pub fn score_distribution(buckets: &[ScoreBucket]) -> ChartSpec {
    ChartSpec {
        title: "Score Distribution",
        x_label: "Score",
        y_label: "Count",
        body: ChartBody::Bars {
            categories: buckets.iter().map(ScoreBucket::label).collect(),
            series: vec![BarSeries {
                name: "grades".to_string(),
                values: buckets.iter().map(|b| b.count as f64).collect(),
            }],
        },
    }
}

pub fn grades_by_course(counts: &[CourseCount]) -> ChartSpec {
    ChartSpec {
        title: "Grades Recorded per Course",
        x_label: "Course",
        y_label: "Number of grades",
        body: ChartBody::Bars {
            categories: counts.iter().map(|c| c.course.clone()).collect(),
            series: vec![BarSeries {
                name: "grades".to_string(),
                values: counts.iter().map(|c| c.count as f64).collect(),
            }],
        },
    }
}

/// One series per status; courses lacking a status get a zero bar.
pub fn attendance_by_course(counts: &[CourseStatusCount]) -> ChartSpec {
    let courses: Vec<String> = counts
        .iter()
        .map(|c| c.course.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let statuses: BTreeSet<&str> = counts.iter().map(|c| c.status.as_str()).collect();

    let series = statuses
        .into_iter()
        .map(|status| BarSeries {
            name: status.to_string(),
            values: courses
                .iter()
                .map(|course| {
                    counts
                        .iter()
                        .find(|c| &c.course == course && c.status == status)
                        .map_or(0.0, |c| c.count as f64)
                })
                .collect(),
        })
        .collect();

    ChartSpec {
        title: "Attendance Summary by Course",
        x_label: "Course",
        y_label: "Count",
        body: ChartBody::Bars {
            categories: courses,
            series,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn status_count(course: &str, status: &str, count: usize) -> CourseStatusCount {
        CourseStatusCount {
            course: course.into(),
            status: status.into(),
            count,
        }
    }

    #[test]
    fn chart_kinds_use_kebab_case_names() {
        assert_eq!(ChartKind::ScoreTrend.to_string(), "score-trend");
        assert_eq!(
            ChartKind::from_str("attendance-by-course").unwrap(),
            ChartKind::AttendanceByCourse
        );
        assert_eq!(ChartKind::GradesByCourse.file_name(), "grades-by-course.png");
        assert!(ChartKind::from_str("pie").is_err());
    }

    #[test]
    fn trend_points_follow_the_date_groups() {
        let groups = vec![
            DateMean {
                date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                mean_score: 50.0,
                count: 2,
            },
            DateMean {
                date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
                mean_score: 78.75,
                count: 2,
            },
        ];

        let spec = score_trend(&groups);
        assert_eq!(
            spec.body,
            ChartBody::Line {
                points: vec![("2026-03-01".into(), 50.0), ("2026-03-04".into(), 78.75)]
            }
        );
        assert_eq!(spec.max_value(), 78.75);
    }

    #[test]
    fn attendance_chart_fills_missing_pairs_with_zero() {
        let spec = attendance_by_course(&[
            status_count("Math", "absent", 1),
            status_count("Math", "present", 2),
            status_count("Physics", "late", 3),
        ]);

        let ChartBody::Bars { categories, series } = spec.body else {
            panic!("expected bars");
        };
        assert_eq!(categories, vec!["Math", "Physics"]);

        let by_name: Vec<(&str, &[f64])> = series
            .iter()
            .map(|s| (s.name.as_str(), s.values.as_slice()))
            .collect();
        assert_eq!(
            by_name,
            vec![
                ("absent", &[1.0, 0.0][..]),
                ("late", &[0.0, 3.0][..]),
                ("present", &[2.0, 0.0][..]),
            ]
        );
    }

    #[test]
    fn course_chart_has_one_bar_per_course() {
        let spec = grades_by_course(&[
            CourseCount { course: "Math".into(), count: 4 },
            CourseCount { course: "Physics".into(), count: 2 },
        ]);
        let ChartBody::Bars { categories, series } = spec.body else {
            panic!("expected bars");
        };
        assert_eq!(categories, vec!["Math", "Physics"]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].values, vec![4.0, 2.0]);
    }
}
