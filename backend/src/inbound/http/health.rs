//! Readiness and liveness probes driven by the server lifecycle.
//!
//! The process moves one way through [`Lifecycle`]: it starts before the
//! listener is bound, serves once startup completes, and drains after a
//! shutdown signal. Probes answer `503` outside the phases they accept and
//! always carry the current phase in the body.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Server lifecycle phase reported by the probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    /// Adapters are being wired; no traffic yet.
    Starting,
    /// Accepting requests.
    Serving,
    /// Shutdown requested; in-flight requests are finishing.
    Draining,
}

impl Lifecycle {
    const fn to_u8(self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Serving => 1,
            Self::Draining => 2,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }
}

/// Probe response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeStatus {
    /// Current lifecycle phase.
    pub status: Lifecycle,
}

/// Shared lifecycle state read by the probes.
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(Lifecycle::Starting.to_u8()),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move from starting to serving. A draining server stays draining.
    pub fn mark_ready(&self) {
        // A failed exchange means shutdown already began.
        let _ = self.phase.compare_exchange(
            Lifecycle::Starting.to_u8(),
            Lifecycle::Serving.to_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Enter the draining phase; irreversible.
    pub fn mark_draining(&self) {
        self.phase
            .store(Lifecycle::Draining.to_u8(), Ordering::Release);
    }

    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from_u8(self.phase.load(Ordering::Acquire))
    }
}

fn probe_response(status: Lifecycle, healthy: bool) -> HttpResponse {
    let mut response = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeStatus { status })
}

/// Readiness probe: healthy only while serving.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Accepting traffic", body = ProbeStatus),
        (status = 503, description = "Starting or draining", body = ProbeStatus)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let status = state.lifecycle();
    probe_response(status, status == Lifecycle::Serving)
}

/// Liveness probe: fails once draining so the instance is not restarted
/// into a half-stopped state.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is up", body = ProbeStatus),
        (status = 503, description = "Draining", body = ProbeStatus)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    let status = state.lifecycle();
    probe_response(status, status != Lifecycle::Draining)
}
