//! Rendering module
//!
//! Turns a `GameState` into triangle-list vertices for whatever backend the
//! host draws with. No GPU or window code lives here.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{Frame, build_frame};
pub use vertex::{Vertex, colors};
