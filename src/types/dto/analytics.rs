use poem_openapi::{ApiResponse, Object, payload::Json};
use serde::{Deserialize, Serialize};

use crate::errors::InternalError;
use crate::types::db::ai_analytics;

/// Computed metric for a hospital
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub id: String,
    pub hospital_id: String,
    pub metric_name: String,
    /// YYYY-MM-DD
    pub metric_date: String,
    /// Arbitrary JSON payload
    pub value: serde_json::Value,
    pub calculated_at: i64,
}

impl TryFrom<ai_analytics::Model> for AnalyticsResponse {
    type Error = InternalError;

    fn try_from(model: ai_analytics::Model) -> Result<Self, Self::Error> {
        let value = serde_json::from_str(&model.value)
            .map_err(|e| InternalError::parse("analytics value", e.to_string()))?;

        Ok(Self {
            id: model.id,
            hospital_id: model.hospital_id,
            metric_name: model.metric_name,
            metric_date: model.metric_date,
            value,
            calculated_at: model.calculated_at,
        })
    }
}

#[derive(Object, Debug)]
pub struct AnalyticsRequest {
    pub hospital_id: String,
    pub metric_name: String,
    /// YYYY-MM-DD
    pub metric_date: String,
    pub value: serde_json::Value,
}

#[derive(Object, Debug, Default)]
pub struct AnalyticsPatchRequest {
    pub hospital_id: Option<String>,
    pub metric_name: Option<String>,
    pub metric_date: Option<String>,
    pub value: Option<serde_json::Value>,
}

#[derive(ApiResponse)]
pub enum AnalyticsCreatedResponse {
    #[oai(status = 201)]
    Created(Json<AnalyticsResponse>),
}
