//! DrugShield risk scoring: a deterministic 0-10 medication risk score with a full audit
//! breakdown, plus the intake, configuration and telemetry plumbing around it.

pub mod config;
pub mod error;
pub mod fall_risk;
pub mod intake;
pub mod scoring;
pub mod telemetry;

pub use config::{AppConfig, AppEnvironment, InputLimits};
pub use error::AppError;
pub use fall_risk::{assess_fall_risk, FallRiskAssessment};
pub use intake::{IntakeError, ScoreRequest};
pub use scoring::{
    compute_score, compute_score_breakdown, urgency_from_score, Confidence, InteractionFact,
    MedicationRecord, RiskScoringEngine, ScoreBreakdown, Severity, Urgency,
    SCORE_ENGINE_VERSION,
};
