pub mod animation;
pub mod lines;
pub mod marker;
pub mod model;
pub mod popup;
pub mod projection;
pub mod state;

pub use marker::MarkerVariant;
pub use state::MapState;
