//! API 520 증기 안전밸브 사이징 모듈 모음.

pub mod engine;
pub mod formula;
pub mod ksh_grid;
pub mod napier;
pub mod notify;
pub mod phase;

pub use engine::{EngineSettings, ValveSizingEngine, ValveSizingState};
pub use formula::{required_area_sq_in, SizingInputs};
pub use ksh_grid::{CorrectionFactorGrid, GridError};
pub use napier::kn_factor;
pub use notify::{ChangeEvent, Property, PropertyValue, SubscriptionId};
pub use phase::{classify, PhaseState, ENTHALPY_UNSET};
