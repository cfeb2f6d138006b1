//! Derived columns.
//!
//! Computes `year` (calendar year of the publication timestamp) and `gain`
//! (cost times subscriber count) for every cleaned record. Pure: no field is
//! changed, only the two derived ones are added. By this point the imputer
//! guarantees `url`, `level` and `cost` are present.

use crate::core::errors::{Error, Result};
use crate::core::{CleaningSummary, Course, CourseRecord};
use crate::pipeline::stage::Stage;

pub struct DeriveColumns;

impl Stage for DeriveColumns {
    type Input = (Vec<CourseRecord>, CleaningSummary);
    type Output = (Vec<Course>, CleaningSummary);

    fn execute(&self, (records, mut summary): Self::Input) -> Result<Self::Output> {
        let courses = records
            .into_iter()
            .map(derive_course)
            .collect::<Result<Vec<_>>>()?;
        summary.rows_out = courses.len();
        Ok((courses, summary))
    }

    fn name(&self) -> &str {
        "derive-columns"
    }
}

fn derive_course(record: CourseRecord) -> Result<Course> {
    let year = record.published_year();
    let url = record
        .url
        .ok_or_else(|| Error::integrity(format!("null url reached derive: course {}", record.course_id)))?;
    let cost = record
        .cost
        .ok_or_else(|| Error::integrity(format!("null cost reached derive: course {}", record.course_id)))?;
    let level = record
        .level
        .ok_or_else(|| Error::integrity(format!("null level reached derive: course {}", record.course_id)))?;

    let gain = cost * record.subscribers as f64;
    Ok(Course {
        course_id: record.course_id,
        title: record.title,
        url,
        is_paid: record.is_paid,
        cost,
        subscribers: record.subscribers,
        reviews: record.reviews,
        lectures: record.lectures,
        level,
        duration_hours: record.duration_hours,
        published_at: record.published_at,
        category: record.category,
        year,
        gain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Level;

    fn record() -> CourseRecord {
        CourseRecord {
            course_id: 9,
            title: "t".into(),
            url: Some("u".into()),
            is_paid: true,
            cost: Some(45.0),
            subscribers: 300,
            reviews: 12,
            lectures: 20,
            level: Some(Level::Intermediate),
            duration_hours: 3.0,
            published_at: "2014-07-19T09:30:00Z".parse().unwrap(),
            category: "Musical Instruments".into(),
        }
    }

    #[test]
    fn gain_is_cost_times_subscribers() {
        let course = derive_course(record()).unwrap();
        assert_eq!(course.gain, 45.0 * 300.0);
        assert!(course.gain >= 0.0);
    }

    #[test]
    fn year_comes_from_the_timestamp() {
        let course = derive_course(record()).unwrap();
        assert_eq!(course.year, 2014);
    }

    #[test]
    fn free_course_has_zero_gain() {
        let course = derive_course(CourseRecord {
            cost: Some(0.0),
            is_paid: false,
            ..record()
        })
        .unwrap();
        assert_eq!(course.gain, 0.0);
    }

    #[test]
    fn lingering_null_is_an_integrity_error() {
        let result = derive_course(CourseRecord {
            cost: None,
            ..record()
        });
        assert!(result.is_err());
    }
}
