pub mod address;
pub mod listing;
pub mod model;
pub mod petition;
pub mod share;
pub mod signature;
pub mod stats;
pub mod store;
pub mod surface;

pub use address::{parse_regency, parse_village};
pub use model::*;
pub use petition::{FormError, NewPetitioner, PetitionForm, Petitioner};
pub use signature::{SignatureControl, SignatureImage};
pub use store::{PetitionStore, StoreError};
pub use surface::{InkSurface, RenderContext};

// Re-export kurbo geometry so downstream crates agree on point/rect types
pub use kurbo::{Point, Rect};
