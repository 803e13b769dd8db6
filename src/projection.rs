//! Result projection.
//!
//! Maps selected identifiers back to catalog records: `(identifier, name)`
//! pairs for reporting, and full records tagged `"selected": true` for
//! re-import into the schedule visualization tool. Records are looked up,
//! never rebuilt: an ingested record comes back exactly as it was read.

use serde_json::Value;

use crate::error::ProjectionError;
use crate::ilp::Selection;
use crate::models::{Catalog, CourseRecord, SelectedCourse, SolveResult};

/// Builds the reportable result for a solver selection.
pub fn project(catalog: &Catalog, selection: &Selection) -> Result<SolveResult, ProjectionError> {
    let courses = selection
        .course_ids
        .iter()
        .map(|id| lookup(catalog, id).map(|c| SelectedCourse::new(&c.id, &c.name)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SolveResult::new(selection.objective, courses))
}

/// Full catalog records of the selected courses, each tagged `"selected": true`.
pub fn schedule_records(
    catalog: &Catalog,
    result: &SolveResult,
) -> Result<Vec<Value>, ProjectionError> {
    result
        .ids()
        .map(|id| -> Result<Value, ProjectionError> {
            let mut record = lookup(catalog, id)?.export_value()?;
            if let Value::Object(fields) = &mut record {
                fields.insert("selected".into(), Value::Bool(true));
            }
            Ok(record)
        })
        .collect()
}

/// The re-import payload: a JSON array of selected course records.
pub fn to_schedule_json(catalog: &Catalog, result: &SolveResult) -> Result<String, ProjectionError> {
    let records = schedule_records(catalog, result)?;
    Ok(serde_json::to_string(&records)?)
}

fn lookup<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a CourseRecord, ProjectionError> {
    catalog
        .get(id)
        .ok_or_else(|| ProjectionError::UnknownCourse(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json_str(
            r#"{
            "LIT 156 HM-01": {"courseCode": "LIT 156 HM-01", "courseName": "Modern Poetry",
                "courseCredits": "3.0",
                "courseSchedule": [{"scheduleDays": "TR", "scheduleStartTime": "14:45",
                                    "scheduleEndTime": "16:00"}]},
            "SOSC 150 HM-01": {"courseName": "Social Theory", "courseSchedule": []}
        }"#,
        )
        .unwrap()
    }

    fn selection(ids: &[&str]) -> Selection {
        Selection {
            objective: 14.0,
            course_ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_project_pairs() {
        let result = project(&catalog(), &selection(&["LIT 156 HM-01", "SOSC 150 HM-01"])).unwrap();
        assert_eq!(result.objective, 14.0);
        assert_eq!(
            result.pairs(),
            vec![
                ("LIT 156 HM-01", "Modern Poetry"),
                ("SOSC 150 HM-01", "Social Theory")
            ]
        );
    }

    #[test]
    fn test_project_unknown_course() {
        let err = project(&catalog(), &selection(&["GHOST 1 X"])).unwrap_err();
        assert!(matches!(err, ProjectionError::UnknownCourse(ref id) if id == "GHOST 1 X"));
    }

    #[test]
    fn test_schedule_records_tagged() {
        let catalog = catalog();
        let result = project(&catalog, &selection(&["LIT 156 HM-01"])).unwrap();
        let records = schedule_records(&catalog, &result).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["selected"], true);
        assert_eq!(records[0]["courseCode"], "LIT 156 HM-01");
        assert_eq!(records[0]["courseCredits"], "3.0");
        assert_eq!(records[0]["courseSchedule"][0]["scheduleDays"], "TR");
    }

    #[test]
    fn test_schedule_json_is_array() {
        let catalog = catalog();
        let result = project(&catalog, &selection(&["SOSC 150 HM-01"])).unwrap();
        let json = to_schedule_json(&catalog, &result).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed[0]["courseName"], "Social Theory");
    }

    #[test]
    fn test_reexport_keeps_record_verbatim() {
        let source = r#"{"courseCode":"DANC 101 SC-01","courseName":"Ballet","courseSchedule":[{"scheduleDays":"TS","scheduleStartTime":"9:05","scheduleEndTime":"10:20","scheduleLocation":"Studio"}],"courseCredits":"1.0"}"#;
        let catalog = Catalog::from_json_str(&format!(r#"{{"DANC 101 SC-01": {source}}}"#)).unwrap();
        let result = project(&catalog, &selection(&["DANC 101 SC-01"])).unwrap();

        let json = to_schedule_json(&catalog, &result).unwrap();
        let expected = format!(r#"[{},"selected":true}}]"#, &source[..source.len() - 1]);
        assert_eq!(json, expected);
    }

    #[test]
    fn test_built_records_are_serialized() {
        let catalog = Catalog::new().with_course(
            CourseRecord::new("ART 010 PZ-01")
                .with_name("Drawing")
                .with_meeting_str("MW", "9:05", "10:20")
                .unwrap(),
        );
        let result = project(&catalog, &selection(&["ART 010 PZ-01"])).unwrap();
        let records = schedule_records(&catalog, &result).unwrap();
        assert_eq!(records[0]["courseSchedule"][0]["scheduleStartTime"], "09:05");
        assert_eq!(records[0]["selected"], true);
    }

    #[test]
    fn test_empty_selection() {
        let catalog = catalog();
        let result = project(&catalog, &selection(&[])).unwrap();
        assert!(result.is_empty());
        assert_eq!(to_schedule_json(&catalog, &result).unwrap(), "[]");
    }
}
