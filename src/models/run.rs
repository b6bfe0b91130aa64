// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Run session model for storage and API.

use std::collections::HashMap;

use serde_json::Value;

use crate::db::fields;

/// A logged run session. Immutable once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// Allocated identifier (also part of the record's key)
    pub run_id: u64,
    /// Owning user
    pub user_id: u64,
    /// When the run was recorded (RFC 3339, server clock)
    pub recorded_at: String,
    /// Elapsed time in seconds
    pub duration_sec: u64,
    /// Distance covered in kilometers
    pub distance_km: f64,
    /// Minutes per kilometer, 0.0 when undefined
    pub average_pace: f64,
    /// Route points, opaque to the server and preserved verbatim
    pub route_data: Vec<Value>,
    /// Step count
    pub total_steps: u64,
}

/// Caller-supplied data for a new run.
///
/// Integers are signed because the wire accepts them that way; logging
/// clamps negatives to zero. `average_pace` is carried for wire
/// compatibility and never trusted: the server recomputes it.
#[derive(Debug, Clone)]
pub struct NewRun {
    pub duration_sec: i64,
    pub distance_km: f64,
    pub average_pace: f64,
    pub route_data: Vec<Value>,
    pub total_steps: i64,
}

/// Average pace in minutes per kilometer, rounded to two decimals.
///
/// A zero duration or zero distance has no defined pace and yields 0.0.
pub fn average_pace_for(duration_sec: u64, distance_km: f64) -> f64 {
    if duration_sec > 0 && distance_km > 0.0 {
        let pace = (duration_sec as f64 / 60.0) / distance_km;
        (pace * 100.0).round() / 100.0
    } else {
        0.0
    }
}

impl Run {
    /// Encode into the stored field set. Route points are stored as one
    /// JSON text field.
    pub fn to_fields(&self) -> HashMap<String, String> {
        let route_data =
            serde_json::to_string(&self.route_data).unwrap_or_else(|_| "[]".to_string());

        HashMap::from([
            ("run_id".to_string(), self.run_id.to_string()),
            ("user_id".to_string(), self.user_id.to_string()),
            ("recorded_at".to_string(), self.recorded_at.clone()),
            ("duration_sec".to_string(), self.duration_sec.to_string()),
            ("distance_km".to_string(), self.distance_km.to_string()),
            ("average_pace".to_string(), self.average_pace.to_string()),
            ("route_data".to_string(), route_data),
            ("total_steps".to_string(), self.total_steps.to_string()),
        ])
    }

    /// Decode from a stored field set, defaulting malformed values.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        Self {
            run_id: fields::u64_field(fields, "run_id"),
            user_id: fields::u64_field(fields, "user_id"),
            recorded_at: fields::text_field(fields, "recorded_at"),
            duration_sec: fields::u64_field(fields, "duration_sec"),
            distance_km: fields::f64_field(fields, "distance_km"),
            average_pace: fields::f64_field(fields, "average_pace"),
            route_data: fields::json_seq_field(fields, "route_data"),
            total_steps: fields::u64_field(fields, "total_steps"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_average_pace_rounds_to_two_decimals() {
        // 30 minutes over 5 km is 6 min/km.
        assert_eq!(average_pace_for(1800, 5.0), 6.0);
        // 25 minutes over 3 km is 8.333... min/km.
        assert_eq!(average_pace_for(1500, 3.0), 8.33);
        // 10 minutes over 3 km is 3.333... min/km.
        assert_eq!(average_pace_for(600, 3.0), 3.33);
        // 50 minutes over 12 km is 4.1666... min/km, rounds up.
        assert_eq!(average_pace_for(3000, 12.0), 4.17);
    }

    #[test]
    fn test_average_pace_undefined_is_zero() {
        assert_eq!(average_pace_for(0, 5.0), 0.0);
        assert_eq!(average_pace_for(1800, 0.0), 0.0);
        assert_eq!(average_pace_for(0, 0.0), 0.0);
    }

    #[test]
    fn test_field_round_trip_preserves_route_order() {
        let run = Run {
            run_id: 3,
            user_id: 1,
            recorded_at: "2026-08-24T10:00:00+00:00".to_string(),
            duration_sec: 1800,
            distance_km: 5.0,
            average_pace: 6.0,
            route_data: vec![
                json!({"lat": 1.0, "lon": 2.0, "t": 0}),
                json!({"lat": 1.001, "lon": 2.001, "t": 5}),
            ],
            total_steps: 6200,
        };

        assert_eq!(Run::from_fields(&run.to_fields()), run);
    }

    #[test]
    fn test_field_round_trip_keeps_point_key_order() {
        // Clients may order point keys however they like; the decoded
        // value keeps that order instead of alphabetizing it.
        let run = Run {
            run_id: 4,
            user_id: 1,
            recorded_at: "2026-08-24T10:00:00+00:00".to_string(),
            duration_sec: 900,
            distance_km: 2.5,
            average_pace: 6.0,
            route_data: vec![json!({"t": 0, "lon": 2.0, "lat": 1.0})],
            total_steps: 3100,
        };

        let decoded = Run::from_fields(&run.to_fields());
        let keys: Vec<&String> = decoded.route_data[0]
            .as_object()
            .expect("point should decode as an object")
            .keys()
            .collect();
        assert_eq!(keys, ["t", "lon", "lat"]);
    }

    #[test]
    fn test_decode_defaults_for_malformed_fields() {
        let fields = HashMap::from([
            ("run_id".to_string(), "2".to_string()),
            ("duration_sec".to_string(), "soon".to_string()),
            ("distance_km".to_string(), "-4.0".to_string()),
            ("route_data".to_string(), "{broken".to_string()),
        ]);

        let run = Run::from_fields(&fields);
        assert_eq!(run.run_id, 2);
        assert_eq!(run.duration_sec, 0);
        assert_eq!(run.distance_km, 0.0);
        assert!(run.route_data.is_empty());
        assert_eq!(run.total_steps, 0);
        assert_eq!(run.recorded_at, "");
    }
}
