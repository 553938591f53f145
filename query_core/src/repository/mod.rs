//! Typed repositories
//!
//! [`Repository<T>`] compiles resource options against its entity's table
//! and executes the result through the pool, implementing
//! [`ResourceStore`](crate::traits::ResourceStore).

pub mod core;
pub mod fetch;

pub use self::core::Repository;
