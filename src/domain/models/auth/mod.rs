pub mod authenticated_principal;

pub use authenticated_principal::*;
