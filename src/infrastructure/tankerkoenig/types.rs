//! Wire types of the Tankerkönig JSON API.
//!
//! The API reports an absent price as `false` (sometimes `null`) and the
//! post code as a number, so these fields are taken as raw JSON values and
//! normalised exactly once in [`DetailResponse::into_snapshot`].

use crate::domain::errors::FetchError;
use crate::domain::station::{OpenState, StationSnapshot};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub station: Option<StationDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDetail {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub post_code: Value,
    #[serde(default)]
    pub is_open: Value,
    #[serde(default)]
    pub e5: Value,
    #[serde(default)]
    pub e10: Value,
    #[serde(default)]
    pub diesel: Value,
}

impl DetailResponse {
    pub fn into_snapshot(self, requested_id: &str) -> Result<StationSnapshot, FetchError> {
        if !self.ok {
            return Err(FetchError::Api {
                id: requested_id.to_string(),
                message: self
                    .message
                    .unwrap_or_else(|| "request not ok".to_string()),
            });
        }

        let station = self.station.ok_or_else(|| FetchError::Decode {
            id: requested_id.to_string(),
            reason: "response has no station".to_string(),
        })?;

        Ok(station.into())
    }
}

impl From<StationDetail> for StationSnapshot {
    fn from(detail: StationDetail) -> Self {
        StationSnapshot {
            id: detail.id,
            name: detail.name.trim().to_string(),
            place: detail.place.trim().to_string(),
            brand: detail.brand.trim().to_string(),
            post_code: post_code(&detail.post_code),
            open: OpenState::from(detail.is_open.as_bool()),
            diesel: price(&detail.diesel),
            e5: price(&detail.e5),
            e10: price(&detail.e10),
        }
    }
}

fn price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn post_code(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN_STATION: &str = r#"{
        "ok": true,
        "license": "CC BY 4.0 -  https://creativecommons.tankerkoenig.de",
        "data": "MTS-K",
        "status": "ok",
        "station": {
            "id": "474e5046-deaf-4f9b-9a32-9797b778f047",
            "name": "TOTAL BERLIN",
            "brand": "TOTAL",
            "street": "MARGARETE-SOMMER-STR.",
            "houseNumber": "2",
            "postCode": 10407,
            "place": "BERLIN",
            "openingTimes": [],
            "overrideOpeningTimes": [],
            "wholeDay": true,
            "isOpen": true,
            "e5": 1.759,
            "e10": false,
            "diesel": 1.619,
            "lat": 52.53083,
            "lng": 13.440946,
            "state": null
        }
    }"#;

    #[test]
    fn test_false_price_decodes_as_absent() {
        let response: DetailResponse = serde_json::from_str(OPEN_STATION).unwrap();
        let snapshot = response.into_snapshot("474e5046").unwrap();

        assert_eq!(snapshot.id, "474e5046-deaf-4f9b-9a32-9797b778f047");
        assert_eq!(snapshot.label(), "TOTAL BERLIN BERLIN");
        assert_eq!(snapshot.post_code.as_deref(), Some("10407"));
        assert_eq!(snapshot.open, OpenState::Open);
        assert_eq!(snapshot.e5, Some(1.759));
        assert_eq!(snapshot.e10, None);
        assert_eq!(snapshot.diesel, Some(1.619));
    }

    #[test]
    fn test_missing_open_flag_is_unknown() {
        let json = r#"{"ok": true, "station": {"id": "x", "name": "A", "place": "B", "diesel": null}}"#;
        let response: DetailResponse = serde_json::from_str(json).unwrap();
        let snapshot = response.into_snapshot("x").unwrap();

        assert_eq!(snapshot.open, OpenState::Unknown);
        assert_eq!(snapshot.diesel, None);
        assert_eq!(snapshot.post_code, None);
    }

    #[test]
    fn test_not_ok_maps_to_api_error() {
        let json = r#"{"ok": false, "message": "apikey nicht angegeben, falsch, oder im falschen Format", "status": "error"}"#;
        let response: DetailResponse = serde_json::from_str(json).unwrap();
        let err = response.into_snapshot("x").unwrap_err();

        assert!(matches!(err, FetchError::Api { ref message, .. } if message.contains("apikey")));
    }
}
