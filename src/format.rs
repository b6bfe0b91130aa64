// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for duration and pace display.

/// Format a second count as e.g. "1h 23m 45s", omitting leading zero
/// units. Zero seconds formats as "0s".
pub fn format_duration(total_sec: u64) -> String {
    let hours = total_sec / 3600;
    let minutes = (total_sec % 3600) / 60;
    let seconds = total_sec % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 || hours > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 || (hours == 0 && minutes == 0) {
        parts.push(format!("{}s", seconds));
    }
    parts.join(" ")
}

/// Format a decimal pace in minutes per kilometer as "M:SS min/km".
///
/// An undefined pace (zero or not a finite positive number) renders as
/// "--". The seconds part can round up to a full minute, which carries
/// into the minutes: 6.999 becomes "7:00 min/km".
pub fn format_pace(pace: f64) -> String {
    if !pace.is_finite() || pace <= 0.0 {
        return "--".to_string();
    }

    let mut minutes = pace.trunc() as u64;
    let mut seconds = (pace.fract() * 60.0).round() as u64;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    format!("{}:{:02} min/km", minutes, seconds)
}
