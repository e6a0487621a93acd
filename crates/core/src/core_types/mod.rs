//! Core data types for station-hour attribution.

pub mod coordinate;
pub mod emitter;
pub mod fire;
pub mod level;
pub mod observations;
pub mod spatial;
pub mod station;

pub use coordinate::Coordinate;
pub use emitter::{EmitterCategory, EmitterSet, IndustrialEmitter};
pub use fire::{FireConfidence, FireDetection, FireSet};
pub use level::SourceLevel;
pub use observations::{Meteorology, Reading};
pub use spatial::GeoGrid;
pub use station::StationContext;
