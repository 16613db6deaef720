//! Typed view of the backend's JSON responses.
//!
//! Every endpoint answers with an [`Envelope`]. Its `result` stays untyped
//! until the controller knows the call succeeded; it is then decoded into
//! [`FullResult`] or [`MlpResult`], and any mismatch becomes
//! [`DashboardError::Decode`].

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{DashboardError, Result};

/// One preview row, keyed by column name in the order the server sent.
pub type Record = Map<String, Value>;

/// Wrapper returned by every backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
}

impl Envelope {
    /// Turns the envelope into the typed result, or the failure it reports.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        if !self.ok {
            return Err(DashboardError::Application(self.error));
        }
        let result = self
            .result
            .ok_or_else(|| DashboardError::Decode("`result` missing from ok response".into()))?;
        Ok(serde_json::from_value(result)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub rows: u64,
    pub cols: u64,
    #[serde(rename = "X_cols")]
    pub x_cols: Vec<String>,
    #[serde(rename = "Y_cols")]
    pub y_cols: Vec<String>,
    pub note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub error_rate: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// `[[TN, FP], [FN, TP]]`.
pub type ConfusionMatrix = [[u64; 2]; 2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    pub metrics: Metrics,
    pub confusion_matrix: ConfusionMatrix,
    /// Only the MLP endpoint reports its architecture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Value>,
}

/// `result` of `GET /start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullResult {
    pub dataset_info: DatasetInfo,
    pub logistic: ModelResult,
    #[serde(rename = "preview_X", default)]
    pub preview_x: Vec<Record>,
    #[serde(rename = "preview_Y", default)]
    pub preview_y: Vec<Record>,
}

/// `result` of `GET /start_mlp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpResult {
    pub dataset_info: DatasetInfo,
    pub mlp: ModelResult,
    #[serde(rename = "preview_X", default)]
    pub preview_x: Vec<Record>,
    #[serde(rename = "preview_Y", default)]
    pub preview_y: Vec<Record>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    pub fn dataset_info() -> Value {
        json!({
            "rows": 10000,
            "cols": 9,
            "X_cols": ["Asistencia", "Parcial1", "Parcial2"],
            "Y_cols": ["Aprobado", "PromedioFinal"],
            "note": "Aprobado=1 si PromedioFinal >= 3.0"
        })
    }

    pub fn model() -> Value {
        json!({
            "metrics": {
                "accuracy": 0.8234,
                "error_rate": 0.1766,
                "precision": 0.9,
                "recall": 0.75,
                "f1": 0.81818
            },
            "confusion_matrix": [[8, 2], [1, 9]]
        })
    }

    pub fn full_result() -> Value {
        json!({
            "dataset_info": dataset_info(),
            "logistic": model(),
            "preview_X": [{"Asistencia": 90.5, "Parcial1": 3.2}, {"Asistencia": 71.0, "Parcial1": 2.4}],
            "preview_Y": [{"Aprobado": 1, "PromedioFinal": 3.4}]
        })
    }

    pub fn mlp_result() -> Value {
        let mut mlp = model();
        mlp["architecture"] = json!({
            "input_neurons": 3,
            "hidden_layers": [16, 8],
            "output_neurons": 1,
            "activation": "relu"
        });
        json!({
            "dataset_info": dataset_info(),
            "mlp": mlp,
            "preview_X": [{"Asistencia": 90.5}],
            "preview_Y": [{"Aprobado": 1}]
        })
    }
}
