//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, radii > 0)
//! - Check addresses and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SafeRouteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{EndpointConfig, SafeRouteConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub fn validate_config(config: &SafeRouteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }

    validate_endpoint("providers.geocoder", &config.providers.geocoder, &mut errors);
    validate_endpoint("providers.overpass", &config.providers.overpass, &mut errors);
    validate_endpoint("providers.routing", &config.providers.routing, &mut errors);

    let hazards = &config.hazards;
    if hazards.toggle_interval_secs == 0 {
        errors.push(ValidationError::new("hazards.toggle_interval_secs", "must be > 0"));
    }
    if !hazards.toggled_category.is_named() {
        errors.push(ValidationError::new(
            "hazards.toggled_category",
            "must be a named category (flood_zone, closed_road, power_outage)",
        ));
    }
    if hazards.toggled_member.trim().is_empty() {
        errors.push(ValidationError::new("hazards.toggled_member", "must not be empty"));
    }

    let planner = &config.planner;
    if planner.at_risk_way.trim().is_empty() {
        errors.push(ValidationError::new("planner.at_risk_way", "must not be empty"));
    }
    for (field, value) in [
        ("planner.feature_radius_m", planner.feature_radius_m),
        ("planner.safe_zone_radius_m", planner.safe_zone_radius_m),
        ("planner.hazard_radius_m", planner.hazard_radius_m),
    ] {
        if !(value.is_finite() && value > 0.0) {
            errors.push(ValidationError::new(field, "must be a positive number of meters"));
        }
    }
    if planner.safe_zone_amenity.trim().is_empty() {
        errors.push(ValidationError::new("planner.safe_zone_amenity", "must not be empty"));
    }
    if !planner.fallback_shelter.is_valid() {
        errors.push(ValidationError::new(
            "planner.fallback_shelter",
            "latitude/longitude out of range",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            "not a socket address",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_endpoint(field: &str, endpoint: &EndpointConfig, errors: &mut Vec<ValidationError>) {
    if let Err(e) = url::Url::parse(&endpoint.base_url) {
        errors.push(ValidationError::new(
            &format!("{field}.base_url"),
            format!("invalid URL '{}': {}", endpoint.base_url, e),
        ));
    }
    if endpoint.timeout_secs == 0 {
        errors.push(ValidationError::new(&format!("{field}.timeout_secs"), "must be > 0"));
    }
}
