#![forbid(unsafe_code)]

pub mod assets;
pub mod composite;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod registry;
pub mod validate;

pub use assets::FrameCache;
pub use config::Config;
pub use error::{FramefitError, FramefitResult};
pub use geometry::FrameGeometry;
pub use pipeline::{BatchSummary, FramedOutput};
pub use registry::{DeviceProfile, Registry};
pub use validate::ValidationReport;
