pub mod config;
pub mod error;
pub mod graph;
pub mod query;
pub mod render;
pub mod session;
pub mod store;

pub use config::Config;
pub use error::{RelmapError, Result};
pub use session::{Session, SessionView};
pub use store::{Document, Edge, Node, NodeKind};
