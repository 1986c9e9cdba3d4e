//! Display unit conversions
//!
//! Fixed-constant conversions used for dashboard display: distance and
//! speed round to one decimal place, elevation to a whole number of feet.

const MILES_PER_KM: f64 = 0.621371;
const MPH_PER_METERS_PER_SEC: f64 = 2.237;
const FEET_PER_METER: f64 = 3.28084;

/// Kilometers to miles, rounded to one decimal place
pub fn km_to_miles(km: f64) -> f64 {
    (km * MILES_PER_KM * 10.0).round() / 10.0
}

/// Meters per second to miles per hour, rounded to one decimal place
pub fn mps_to_mph(mps: f64) -> f64 {
    (mps * MPH_PER_METERS_PER_SEC * 10.0).round() / 10.0
}

/// Meters to whole feet
pub fn meters_to_feet(meters: f64) -> i64 {
    (meters * FEET_PER_METER).round() as i64
}
