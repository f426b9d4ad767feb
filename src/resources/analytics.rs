use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};

use crate::errors::InternalError;
use crate::types::db::ai_analytics;
use crate::types::dto::analytics::{AnalyticsPatchRequest, AnalyticsRequest};

use super::{Resource, new_record_id, required_text, validate_date};

pub struct AnalyticsResource;

fn encode_value(value: &serde_json::Value) -> Result<String, InternalError> {
    serde_json::to_string(value).map_err(|e| InternalError::parse("analytics value", e.to_string()))
}

impl Resource for AnalyticsResource {
    const ENTITY_NAME: &'static str = "Analytics record";

    type Entity = ai_analytics::Entity;
    type Model = ai_analytics::Model;
    type ActiveModel = ai_analytics::ActiveModel;
    type Request = AnalyticsRequest;
    type Patch = AnalyticsPatchRequest;

    fn id_column() -> ai_analytics::Column {
        ai_analytics::Column::Id
    }

    fn created_column() -> ai_analytics::Column {
        ai_analytics::Column::CalculatedAt
    }

    fn create(request: AnalyticsRequest, now: DateTime<Utc>) -> Result<ai_analytics::ActiveModel, InternalError> {
        Ok(ai_analytics::ActiveModel {
            id: Set(new_record_id()),
            hospital_id: Set(required_text("hospital_id", request.hospital_id)?),
            metric_name: Set(required_text("metric_name", request.metric_name)?),
            metric_date: Set(validate_date("metric_date", request.metric_date)?),
            value: Set(encode_value(&request.value)?),
            calculated_at: Set(now.timestamp()),
        })
    }

    fn replace(existing: ai_analytics::Model, request: AnalyticsRequest) -> Result<ai_analytics::ActiveModel, InternalError> {
        let mut active = existing.into_active_model();
        active.hospital_id = Set(required_text("hospital_id", request.hospital_id)?);
        active.metric_name = Set(required_text("metric_name", request.metric_name)?);
        active.metric_date = Set(validate_date("metric_date", request.metric_date)?);
        active.value = Set(encode_value(&request.value)?);
        Ok(active)
    }

    fn patch(existing: ai_analytics::Model, patch: AnalyticsPatchRequest) -> Result<ai_analytics::ActiveModel, InternalError> {
        let mut active = existing.into_active_model();
        if let Some(hospital_id) = patch.hospital_id {
            active.hospital_id = Set(required_text("hospital_id", hospital_id)?);
        }
        if let Some(metric_name) = patch.metric_name {
            active.metric_name = Set(required_text("metric_name", metric_name)?);
        }
        if let Some(metric_date) = patch.metric_date {
            active.metric_date = Set(validate_date("metric_date", metric_date)?);
        }
        if let Some(value) = patch.value {
            active.value = Set(encode_value(&value)?);
        }
        Ok(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;
    use serde_json::json;

    #[test]
    fn test_create_stores_value_as_json_text() {
        let request = AnalyticsRequest {
            hospital_id: "h1".to_string(),
            metric_name: "admissions".to_string(),
            metric_date: "2024-06-01".to_string(),
            value: json!({"count": 42, "trend": [1, 2, 3]}),
        };

        let active = AnalyticsResource::create(request, Utc::now()).unwrap();

        match active.value {
            ActiveValue::Set(text) => {
                let decoded: serde_json::Value = serde_json::from_str(&text).unwrap();
                assert_eq!(decoded["count"], 42);
            }
            other => panic!("value not set: {:?}", other),
        }
    }

    #[test]
    fn test_create_rejects_bad_metric_date() {
        let request = AnalyticsRequest {
            hospital_id: "h1".to_string(),
            metric_name: "admissions".to_string(),
            metric_date: "June 1st".to_string(),
            value: json!(1),
        };

        let err = AnalyticsResource::create(request, Utc::now()).unwrap_err();
        assert!(matches!(err, InternalError::Validation(ref v) if v.field() == "metric_date"));
    }
}
