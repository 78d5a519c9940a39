//! PlantUML diagram text and its rendering
//!
//! - `emitter`: object graph to PlantUML text
//! - `dependencies`: per-commit file dependency diagrams
//! - `renderer`: invocation of the PlantUML jar on a diagram file

pub mod dependencies;
pub mod emitter;
pub mod renderer;
