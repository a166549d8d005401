use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ServiceError;

/// Stored employee row (business view is the entity itself).
pub type Employee = models::employee::Model;

/// Employee payload for create/update. Any `id` it carries is ignored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInput {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    pub age: i32,
    pub position: String,
    #[serde(default)]
    pub team_id: Option<i32>,
}

impl EmployeeInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        models::employee::validate(&self.name, self.age, &self.position)?;
        Ok(())
    }

    /// Full row keyed by `id`, replacing every mutable field.
    pub fn into_employee(self, id: i32) -> Employee {
        Employee { id, name: self.name, age: self.age, position: self.position, team_id: self.team_id }
    }
}

/// Equality predicate requested by a caller: `field = value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParam {
    pub field: String,
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
}

impl FilterParam {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self { field: field.into(), value: value.into() }
    }
}

/// Grid clients send numeric header filters as JSON numbers.
fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw { Text(String), Int(i64), Float(f64), Bool(bool) }
    Ok(match Raw::deserialize(de)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
        Raw::Bool(b) => b.to_string(),
    })
}

/// Listing parameters as received. `page == None` requests the unpaginated collection.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub filters: Vec<FilterParam>,
}

/// One page of employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEnvelope {
    pub last_page: u64,
    pub data: Vec<Employee>,
}

/// Result of `EmployeeService::list`: a bare array or a paged envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EmployeeListing {
    All(Vec<Employee>),
    Page(PageEnvelope),
}

/// Three independent change lists applied atomically. Absent lists are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    #[serde(default)]
    pub created: Option<Vec<EmployeeInput>>,
    #[serde(default)]
    pub updated: Option<Vec<Employee>>,
    #[serde(default)]
    pub deleted_ids: Option<Vec<i32>>,
}

/// Batch summary. Counts are input list lengths, not affected rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub created: Vec<Employee>,
    pub updated_count: usize,
    pub deleted_count: usize,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn batch_request_accepts_missing_and_null_lists() {
        let req: BatchRequest = serde_json::from_value(json!({ "created": null, "deletedIds": [3, 4] })).unwrap();
        assert!(req.created.is_none());
        assert!(req.updated.is_none());
        assert_eq!(req.deleted_ids, Some(vec![3, 4]));
    }

    #[test]
    fn updated_rows_need_an_id_but_team_is_optional() {
        let ok: BatchRequest = serde_json::from_value(json!({
            "updated": [{ "id": 9, "name": "Kim Minsu", "age": 30, "position": "QA" }]
        })).unwrap();
        assert_eq!(ok.updated.unwrap()[0].team_id, None);

        let missing_id = serde_json::from_value::<BatchRequest>(json!({
            "updated": [{ "name": "Kim Minsu", "age": 30, "position": "QA" }]
        }));
        assert!(missing_id.is_err());
    }

    #[test]
    fn filter_values_accept_numbers() {
        let filters: Vec<FilterParam> = serde_json::from_str(r#"[{"field":"age","value":31},{"field":"name","value":"Lee"}]"#).unwrap();
        assert_eq!(filters[0], FilterParam::new("age", "31"));
        assert_eq!(filters[1], FilterParam::new("name", "Lee"));
    }

    #[test]
    fn envelopes_use_wire_key_names() {
        let page = serde_json::to_value(EmployeeListing::Page(PageEnvelope { last_page: 0, data: vec![] })).unwrap();
        assert_eq!(page, json!({ "last_page": 0, "data": [] }));

        let all = serde_json::to_value(EmployeeListing::All(vec![])).unwrap();
        assert_eq!(all, json!([]));

        let batch = serde_json::to_value(BatchResult { created: vec![], updated_count: 2, deleted_count: 1, total: 7 }).unwrap();
        assert_eq!(batch, json!({ "created": [], "updatedCount": 2, "deletedCount": 1, "total": 7 }));
    }

    #[test]
    fn input_id_is_replaced_by_key() {
        let input = EmployeeInput { id: Some(99), name: "Park Subin".into(), age: 40, position: "Manager".into(), team_id: Some(2) };
        let row = input.into_employee(5);
        assert_eq!(row.id, 5);
        assert_eq!(row.team_id, Some(2));
    }
}
