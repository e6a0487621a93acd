//! Airshed Source Attribution Core
//!
//! A physically grounded source-attribution engine for an urban airshed.
//! Each station-hour of pollutant readings, meteorology, satellite fire
//! detections, and an industrial inventory becomes a bounded, explainable
//! percentage split across candidate emission sources, plus a short-range
//! forecast of where the pollution load is headed next.
//!
//! ## Attribution Strategies
//!
//! Two interchangeable strategies resolve the split:
//! - Prior modulation (the default): source-apportionment study priors
//!   rescaled by live tracer anomalies against seasonal baselines.
//! - Weighted scores: five independent physics scorers (stubble-fire
//!   transport, traffic, industry, dust, boundary-layer trapping)
//!   normalized into shares.
//!
//! Degraded inputs degrade output quality, never availability: every
//! missing field has a documented fallback and the result carries a
//! confidence grade reflecting what was present.

// Shared domain types and spatial indexing
pub mod core_types;

// Great-circle geometry
pub mod geo;

// Per-source physics scorers
pub mod scoring;

// Strategies, the evaluation engine, and result assembly
pub mod attribution;

// Downwind forecaster
pub mod outfall;

// Re-export domain types
pub use core_types::{
    Coordinate, EmitterCategory, EmitterSet, FireConfidence, FireDetection, FireSet, GeoGrid,
    IndustrialEmitter, Meteorology, Reading, SourceLevel, StationContext,
};

// Re-export the engine surface
pub use attribution::{
    create_strategy, AttributionEngine, AttributionError, AttributionInput, AttributionResult,
    AttributionStrategy, Confidence, EngineConfig, PriorModulationStrategy, SourceContribution,
    StrategyKind, WeightedScoreStrategy,
};

// Re-export scoring and forecast types
pub use outfall::OutfallPoint;
pub use scoring::{Evidence, ScoredSource, SourceScore};
