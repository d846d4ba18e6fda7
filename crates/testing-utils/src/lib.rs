pub mod bin;
pub mod fs;
