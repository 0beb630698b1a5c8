//! SurrealDB repository implementations.

mod cargo;
mod contact;
mod train;
mod user;

pub use cargo::SurrealCargoRepository;
pub use contact::SurrealContactRepository;
pub use train::SurrealTrainRepository;
pub use user::SurrealUserRepository;
