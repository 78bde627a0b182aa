//! Procedural asteroid terrain: radial silhouette, rule-driven material
//! classification, depth layers, and landing-site carving.

mod cell;
mod error;
mod generator;
mod landing;
mod noise_source;
mod populate;
mod profile;
mod rules;
mod seed;
mod stats;

pub use cell::{Cell, CellGrid, DepthLayer, FloorMaterial, WallMaterial};
pub use error::TerrainError;
pub use generator::{Asteroid, AsteroidGenerator, GenerationParams, generate, generate_with_retries};
pub use landing::{LandingParams, LandingSiteCarver, StartingPosition};
pub use noise_source::{NOISE2_SEED_OFFSET, NoiseChannel};
pub use populate::GridPopulator;
pub use profile::{ProfileParams, RadialProfile, smooth_circular};
pub use rules::{AllowanceModifier, MaterialRule, MaterialRuleSet, RuleParams, default_rules};
pub use seed::{det_atan2_degrees, det_sqrt, hash_grid};
pub use stats::GridStats;
