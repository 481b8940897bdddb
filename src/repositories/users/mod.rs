pub mod memory_user_repo;
pub mod principal_store;
pub mod user_repo;

pub use memory_user_repo::*;
pub use principal_store::*;
pub use user_repo::*;
