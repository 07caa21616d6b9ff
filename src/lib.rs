pub mod core;
pub mod services;
pub mod utils;

pub use crate::core::component::*;
pub use crate::core::project::*;

pub use crate::utils::db_utils::*;
pub use crate::utils::error::*;
pub use crate::utils::logger::*;
pub use crate::utils::structs::*;

pub use crate::services::labeler::*;
pub use crate::services::model::*;
