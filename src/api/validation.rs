//! Input validation for API requests.
//!
//! This module provides validation functions for API request data,
//! ensuring all inputs meet the required format and constraints.
//!
//! For collecting multiple validation errors and returning them as an ApiError,
//! use the `ValidationErrorBuilder` from the `error` module.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// Regex for validating email addresses
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$"
    ).unwrap();

    /// Regex for validating VINs (11-17 chars, letters I/O/Q excluded)
    static ref VIN_REGEX: Regex = Regex::new(
        r"^[A-HJ-NPR-Z0-9]{11,17}$"
    ).unwrap();

    /// Regex for validating license plates (uppercase alphanumeric with dashes/spaces)
    static ref PLATE_REGEX: Regex = Regex::new(
        r"^[A-Z0-9][A-Z0-9 -]{0,14}[A-Z0-9]$"
    ).unwrap();

    /// Regex for validating phone numbers
    static ref PHONE_REGEX: Regex = Regex::new(
        r"^\+?[0-9][0-9 ()-]{5,18}$"
    ).unwrap();
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email is too long (max 254 characters)".to_string());
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate a password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }

    if password.len() > 128 {
        return Err("Password is too long (max 128 characters)".to_string());
    }

    Ok(())
}

/// Validate an optional person name (first/last)
pub fn validate_person_name(name: &Option<String>) -> Result<(), String> {
    if let Some(n) = name {
        if n.is_empty() {
            return Ok(()); // Empty string treated as no name
        }

        if n.len() > 100 {
            return Err("Name is too long (max 100 characters)".to_string());
        }
    }

    Ok(())
}

/// Validate an optional phone number
pub fn validate_phone(phone: &Option<String>) -> Result<(), String> {
    if let Some(p) = phone {
        if p.is_empty() {
            return Ok(()); // Empty string treated as no phone
        }

        if !PHONE_REGEX.is_match(p) {
            return Err("Invalid phone number format".to_string());
        }
    }

    Ok(())
}

/// Validate a vehicle make
pub fn validate_make(make: &str) -> Result<(), String> {
    if make.is_empty() {
        return Err("Make is required".to_string());
    }

    if make.len() > 100 {
        return Err("Make is too long (max 100 characters)".to_string());
    }

    Ok(())
}

/// Validate a vehicle model
pub fn validate_model(model: &str) -> Result<(), String> {
    if model.is_empty() {
        return Err("Model is required".to_string());
    }

    if model.len() > 100 {
        return Err("Model is too long (max 100 characters)".to_string());
    }

    Ok(())
}

/// Validate a manufacture year
pub fn validate_year(year: i64) -> Result<(), String> {
    if year < 1900 || year > 2100 {
        return Err("Year must be between 1900 and 2100".to_string());
    }

    Ok(())
}

/// Validate a VIN
pub fn validate_vin(vin: &str) -> Result<(), String> {
    if vin.is_empty() {
        return Err("VIN is required".to_string());
    }

    if !VIN_REGEX.is_match(vin) {
        return Err(
            "Invalid VIN format. Must be 11-17 uppercase alphanumeric characters (I, O, Q excluded)"
                .to_string(),
        );
    }

    Ok(())
}

/// Validate a license plate
pub fn validate_license_plate(plate: &str) -> Result<(), String> {
    if plate.is_empty() {
        return Err("License plate is required".to_string());
    }

    if !PLATE_REGEX.is_match(plate) {
        return Err(
            "Invalid license plate format. Use uppercase letters, digits, dashes, and spaces"
                .to_string(),
        );
    }

    Ok(())
}

/// Validate a daily base price
pub fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() {
        return Err("Price must be a number".to_string());
    }

    if price <= 0.0 {
        return Err("Price must be greater than 0".to_string());
    }

    if price > 100_000.0 {
        return Err("Price is too high (max 100000)".to_string());
    }

    Ok(())
}

/// Validate an optional location
pub fn validate_location(location: &Option<String>) -> Result<(), String> {
    if let Some(l) = location {
        if l.len() > 255 {
            return Err("Location is too long (max 255 characters)".to_string());
        }
    }

    Ok(())
}

/// Validate an optional description
pub fn validate_description(description: &Option<String>) -> Result<(), String> {
    if let Some(d) = description {
        if d.len() > 2000 {
            return Err("Description is too long (max 2000 characters)".to_string());
        }
    }

    Ok(())
}

/// Validate an optional HTTP(S) URL field
pub fn validate_url(url: &Option<String>, field_name: &str) -> Result<(), String> {
    if let Some(u) = url {
        if u.is_empty() {
            return Ok(()); // Empty string treated as no URL
        }

        if u.len() > 2048 {
            return Err(format!("{} is too long (max 2048 characters)", field_name));
        }

        if !u.starts_with("http://") && !u.starts_with("https://") {
            return Err(format!("{} must be an HTTP(S) URL", field_name));
        }
    }

    Ok(())
}

/// Validate an optional photo URL list
pub fn validate_photo_urls(urls: &Option<Vec<String>>) -> Result<(), String> {
    if let Some(list) = urls {
        if list.len() > 20 {
            return Err("Too many photo URLs (max 20)".to_string());
        }

        for url in list {
            validate_url(&Some(url.clone()), "photo_urls")?;
        }
    }

    Ok(())
}

/// Validate an optional features payload (must be a JSON object)
pub fn validate_features(features: &Option<Value>) -> Result<(), String> {
    if let Some(f) = features {
        if !f.is_object() {
            return Err("Features must be a JSON object".to_string());
        }
    }

    Ok(())
}

/// Validate a UUID string
pub fn validate_uuid(id: &str, field_name: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err(format!("{} is required", field_name));
    }

    if uuid::Uuid::parse_str(id).is_err() {
        return Err(format!("Invalid {} format", field_name));
    }

    Ok(())
}

/// Parse an RFC 3339 timestamp into UTC
pub fn parse_timestamp(value: &str, field_name: &str) -> Result<DateTime<Utc>, String> {
    if value.is_empty() {
        return Err(format!("{} is required", field_name));
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("Invalid {}: must be an RFC 3339 timestamp", field_name))
}
