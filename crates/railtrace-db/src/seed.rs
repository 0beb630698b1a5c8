//! Default data seeding.
//!
//! Mirrors the bootstrap the operators run against a fresh database:
//! one example train with a cargo attached, and the administrative
//! account. Safe to call on every startup; existing data is left
//! untouched.

use railtrace_core::error::{RailtraceError, RailtraceResult};
use railtrace_core::models::cargo::CreateCargo;
use railtrace_core::models::train::CreateTrain;
use railtrace_core::models::user::{CreateUser, Role};
use railtrace_core::repository::{CargoRepository, TrainRepository, UserRepository};
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::repository::{SurrealCargoRepository, SurrealTrainRepository, SurrealUserRepository};

/// Seed the example train/cargo pair and the admin user, unless they
/// already exist.
///
/// The admin password is supplied by configuration and stored hashed;
/// `pepper` must match the one the login path verifies with.
pub async fn seed_default_data<C: Connection>(
    db: &Surreal<C>,
    admin_password: &str,
    pepper: Option<&str>,
) -> RailtraceResult<()> {
    let trains = SurrealTrainRepository::new(db.clone());
    let cargos = SurrealCargoRepository::new(db.clone());

    if trains.list().await?.is_empty() {
        let train = trains
            .create(CreateTrain {
                name: "KZ-001".into(),
                departure_station: Some("Almaty".into()),
                arrival_station: Some("Astana".into()),
                departure_time: Some("2025-04-10 08:00".into()),
                arrival_time: Some("2025-04-11 20:00".into()),
                last_operation_station: Some("Kokshetau".into()),
                last_operation_time: Some("2025-04-10 15:00".into()),
                distance_to_arrival: Some(350),
                operation_desc: Some("Departure".into()),
            })
            .await?;

        cargos
            .create(CreateCargo {
                cargo_type: Some("Foodstuffs".into()),
                train_id: Some(train.train_id),
                current_station: Some("Kokshetau".into()),
                status: Some("In transit".into()),
                last_stop_time: Some("2025-04-10 14:30".into()),
                next_station: Some("Astana".into()),
                distance_to_arrival: Some(350),
                last_operation: Some("Loading".into()),
            })
            .await?;

        info!("Seeded example train and cargo");
    }

    let users = match pepper {
        Some(p) => SurrealUserRepository::with_pepper(db.clone(), p.to_string()),
        None => SurrealUserRepository::new(db.clone()),
    };

    match users.get_by_username("admin").await {
        Ok(_) => {}
        Err(RailtraceError::NotFound { .. }) => {
            users
                .create(CreateUser {
                    username: "admin".into(),
                    password: admin_password.to_string(),
                    role: Role::Admin,
                })
                .await?;
            info!("Seeded admin user");
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
