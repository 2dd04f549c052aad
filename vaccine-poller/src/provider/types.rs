//! Vaccine status API response DTOs.
//!
//! Only the fields the poller reads are declared; anything else in the
//! payload is ignored.

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level response from the per-state status endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineStatusResponse {
    pub response_payload_data: ResponsePayloadData,
}

/// Payload wrapper. `data` is keyed by uppercase state code.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayloadData {
    /// Sites per state.
    pub data: HashMap<String, Vec<SiteDto>>,
}

/// One vaccination site.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteDto {
    /// City name, usually upper case.
    pub city: String,

    /// "Available", "Fully Booked", ...
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_payload() {
        let json = r#"{
            "responsePayloadData": {
                "currentTime": "2021-03-26T05:00:00.000",
                "data": {
                    "TX": [
                        {"city": "ABILENE", "state": "TX", "status": "Fully Booked"},
                        {"city": "AUSTIN", "state": "TX", "status": "Available"}
                    ]
                },
                "isBookingCompleted": false
            },
            "responseMetaData": {"statusCode": "0000"}
        }"#;

        let resp: VaccineStatusResponse = serde_json::from_str(json).unwrap();
        let sites = &resp.response_payload_data.data["TX"];
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[1].city, "AUSTIN");
        assert_eq!(sites[1].status, "Available");
        assert_eq!(sites[0].status, "Fully Booked");
    }

    #[test]
    fn missing_status_defaults_to_empty() {
        let json = r#"{"responsePayloadData": {"data": {"UT": [{"city": "OREM"}]}}}"#;
        let resp: VaccineStatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.response_payload_data.data["UT"][0].status, "");
    }
}
