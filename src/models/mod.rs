// Models module for data structures
pub mod env_map;
pub mod layout;
pub mod template;
