//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Lookups for absent ids fail
//! with `NotFound`; reads that need related records say so in their
//! return type (`CargoWithTrain`) rather than relying on lazy object
//! traversal.

use crate::error::RailtraceResult;
use crate::models::{
    cargo::{Cargo, CargoWithTrain, CreateCargo, UpdateCargo},
    contact::{Contact, CreateContact},
    train::{CreateTrain, Train, UpdateTrain},
    user::{CreateUser, User},
};

pub trait TrainRepository: Send + Sync {
    fn create(&self, input: CreateTrain) -> impl Future<Output = RailtraceResult<Train>> + Send;
    fn get_by_id(&self, id: i64) -> impl Future<Output = RailtraceResult<Train>> + Send;
    fn update(
        &self,
        id: i64,
        input: UpdateTrain,
    ) -> impl Future<Output = RailtraceResult<Train>> + Send;
    /// Deletes the train and, atomically, every cargo referencing it.
    fn delete(&self, id: i64) -> impl Future<Output = RailtraceResult<()>> + Send;
    /// All trains, ordered by `train_id` ascending.
    fn list(&self) -> impl Future<Output = RailtraceResult<Vec<Train>>> + Send;
}

pub trait CargoRepository: Send + Sync {
    /// Fails with `InvalidReference` if `train_id` is set and no such
    /// train exists; nothing is written in that case.
    fn create(&self, input: CreateCargo) -> impl Future<Output = RailtraceResult<Cargo>> + Send;
    fn get_by_id(&self, id: i64) -> impl Future<Output = RailtraceResult<Cargo>> + Send;
    /// The cargo together with its carrying train, eagerly fetched.
    fn get_with_train(
        &self,
        id: i64,
    ) -> impl Future<Output = RailtraceResult<CargoWithTrain>> + Send;
    /// Same referential check as [`CargoRepository::create`].
    fn update(
        &self,
        id: i64,
        input: UpdateCargo,
    ) -> impl Future<Output = RailtraceResult<Cargo>> + Send;
    fn delete(&self, id: i64) -> impl Future<Output = RailtraceResult<()>> + Send;
    /// All cargo with trains joined, ordered by `cargo_id` ascending.
    fn list_with_train(&self) -> impl Future<Output = RailtraceResult<Vec<CargoWithTrain>>> + Send;
}

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = RailtraceResult<User>> + Send;
    fn get_by_id(&self, id: i64) -> impl Future<Output = RailtraceResult<User>> + Send;
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = RailtraceResult<User>> + Send;
}

pub trait ContactRepository: Send + Sync {
    fn create(&self, input: CreateContact)
    -> impl Future<Output = RailtraceResult<Contact>> + Send;
}
