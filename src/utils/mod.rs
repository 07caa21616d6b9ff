pub mod db_utils;
pub mod error;
pub mod file_utils;
pub mod logger;
pub mod structs;
