//! Integration tests for the repository implementations using
//! in-memory SurrealDB.

use railtrace_core::error::RailtraceError;
use railtrace_core::models::cargo::{CreateCargo, UpdateCargo};
use railtrace_core::models::contact::CreateContact;
use railtrace_core::models::train::{CreateTrain, UpdateTrain};
use railtrace_core::models::user::{CreateUser, Role};
use railtrace_core::repository::{
    CargoRepository, ContactRepository, TrainRepository, UserRepository,
};
use railtrace_db::repository::{
    SurrealCargoRepository, SurrealContactRepository, SurrealTrainRepository,
    SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    railtrace_db::run_migrations(&db).await.unwrap();
    db
}

fn train_input(name: &str) -> CreateTrain {
    CreateTrain {
        name: name.into(),
        departure_station: Some("Almaty".into()),
        arrival_station: Some("Astana".into()),
        distance_to_arrival: Some(350),
        ..Default::default()
    }
}

// -----------------------------------------------------------------------
// Train tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_and_get_train() {
    let db = setup().await;
    let repo = SurrealTrainRepository::new(db);

    let train = repo.create(train_input("KZ-001")).await.unwrap();
    assert_eq!(train.name, "KZ-001");
    assert_eq!(train.departure_station.as_deref(), Some("Almaty"));
    assert_eq!(train.distance_to_arrival, Some(350));

    let fetched = repo.get_by_id(train.train_id).await.unwrap();
    assert_eq!(fetched.train_id, train.train_id);
    assert_eq!(fetched.name, train.name);
}

#[tokio::test]
async fn get_missing_train_is_not_found() {
    let db = setup().await;
    let repo = SurrealTrainRepository::new(db);

    let err = repo.get_by_id(42).await.unwrap_err();
    assert!(matches!(err, RailtraceError::NotFound { .. }));
}

#[tokio::test]
async fn train_ids_are_assigned_in_order() {
    let db = setup().await;
    let repo = SurrealTrainRepository::new(db);

    for i in 0..3 {
        repo.create(train_input(&format!("KZ-00{i}"))).await.unwrap();
    }

    let trains = repo.list().await.unwrap();
    assert_eq!(trains.len(), 3);
    let ids: Vec<i64> = trains.iter().map(|t| t.train_id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted, "list must be ordered by train_id ascending");
    assert_eq!(ids[0] + 1, ids[1]);
    assert_eq!(ids[1] + 1, ids[2]);
}

#[tokio::test]
async fn update_train_partial_and_clear() {
    let db = setup().await;
    let repo = SurrealTrainRepository::new(db);

    let train = repo.create(train_input("Before")).await.unwrap();

    let updated = repo
        .update(
            train.train_id,
            UpdateTrain {
                name: Some("After".into()),
                arrival_station: Some(None), // clear
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "After");
    assert_eq!(updated.arrival_station, None);
    // Untouched fields keep their values.
    assert_eq!(updated.departure_station.as_deref(), Some("Almaty"));
    assert_eq!(updated.distance_to_arrival, Some(350));
}

#[tokio::test]
async fn update_missing_train_is_not_found() {
    let db = setup().await;
    let repo = SurrealTrainRepository::new(db);

    let err = repo
        .update(
            99,
            UpdateTrain {
                name: Some("Ghost".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RailtraceError::NotFound { .. }));
}

#[tokio::test]
async fn delete_train_cascades_to_cargo() {
    let db = setup().await;
    let trains = SurrealTrainRepository::new(db.clone());
    let cargos = SurrealCargoRepository::new(db);

    let doomed = trains.create(train_input("Doomed")).await.unwrap();
    let survivor = trains.create(train_input("Survivor")).await.unwrap();

    for _ in 0..2 {
        cargos
            .create(CreateCargo {
                train_id: Some(doomed.train_id),
                cargo_type: Some("Coal".into()),
                ..Default::default()
            })
            .await
            .unwrap();
    }
    let kept = cargos
        .create(CreateCargo {
            train_id: Some(survivor.train_id),
            cargo_type: Some("Grain".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    trains.delete(doomed.train_id).await.unwrap();

    // Every cargo referencing the deleted train is gone.
    let remaining = cargos.list_with_train().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].cargo.cargo_id, kept.cargo_id);
    assert_eq!(remaining[0].cargo.train_id, Some(survivor.train_id));

    let err = trains.get_by_id(doomed.train_id).await.unwrap_err();
    assert!(matches!(err, RailtraceError::NotFound { .. }));
}

#[tokio::test]
async fn delete_train_twice_reports_not_found() {
    let db = setup().await;
    let repo = SurrealTrainRepository::new(db);

    let train = repo.create(train_input("Once")).await.unwrap();

    repo.delete(train.train_id).await.unwrap();
    let err = repo.delete(train.train_id).await.unwrap_err();
    assert!(
        matches!(err, RailtraceError::NotFound { .. }),
        "second delete must report NotFound, got: {err:?}"
    );
}

// -----------------------------------------------------------------------
// Cargo tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn cargo_create_rejects_dangling_train() {
    let db = setup().await;
    let cargos = SurrealCargoRepository::new(db);

    let err = cargos
        .create(CreateCargo {
            train_id: Some(123),
            cargo_type: Some("Coal".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RailtraceError::InvalidReference { .. }));

    // Nothing was written.
    let all = cargos.list_with_train().await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn cargo_create_without_train_is_allowed() {
    let db = setup().await;
    let cargos = SurrealCargoRepository::new(db);

    let cargo = cargos
        .create(CreateCargo {
            cargo_type: Some("Timber".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(cargo.train_id, None);

    let joined = cargos.get_with_train(cargo.cargo_id).await.unwrap();
    assert!(joined.train.is_none());
}

#[tokio::test]
async fn cargo_update_rejects_dangling_train() {
    let db = setup().await;
    let trains = SurrealTrainRepository::new(db.clone());
    let cargos = SurrealCargoRepository::new(db);

    let train = trains.create(train_input("KZ-001")).await.unwrap();
    let cargo = cargos
        .create(CreateCargo {
            train_id: Some(train.train_id),
            cargo_type: Some("Coal".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let err = cargos
        .update(
            cargo.cargo_id,
            UpdateCargo {
                train_id: Some(Some(999)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RailtraceError::InvalidReference { .. }));

    // The stored reference is unchanged.
    let unchanged = cargos.get_by_id(cargo.cargo_id).await.unwrap();
    assert_eq!(unchanged.train_id, Some(train.train_id));
}

#[tokio::test]
async fn cargo_update_can_detach_from_train() {
    let db = setup().await;
    let trains = SurrealTrainRepository::new(db.clone());
    let cargos = SurrealCargoRepository::new(db);

    let train = trains.create(train_input("KZ-001")).await.unwrap();
    let cargo = cargos
        .create(CreateCargo {
            train_id: Some(train.train_id),
            ..Default::default()
        })
        .await
        .unwrap();

    let updated = cargos
        .update(
            cargo.cargo_id,
            UpdateCargo {
                train_id: Some(None), // clear the reference
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.train_id, None);
}

#[tokio::test]
async fn cargo_get_with_train_joins_eagerly() {
    let db = setup().await;
    let trains = SurrealTrainRepository::new(db.clone());
    let cargos = SurrealCargoRepository::new(db);

    let train = trains.create(train_input("KZ-001")).await.unwrap();
    let cargo = cargos
        .create(CreateCargo {
            train_id: Some(train.train_id),
            cargo_type: Some("Foodstuffs".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let joined = cargos.get_with_train(cargo.cargo_id).await.unwrap();
    assert_eq!(joined.cargo.cargo_id, cargo.cargo_id);
    let joined_train = joined.train.expect("train should be joined");
    assert_eq!(joined_train.train_id, train.train_id);
    assert_eq!(joined_train.name, "KZ-001");
}

#[tokio::test]
async fn cargo_delete_twice_reports_not_found() {
    let db = setup().await;
    let cargos = SurrealCargoRepository::new(db);

    let cargo = cargos.create(CreateCargo::default()).await.unwrap();

    cargos.delete(cargo.cargo_id).await.unwrap();
    let err = cargos.delete(cargo.cargo_id).await.unwrap_err();
    assert!(matches!(err, RailtraceError::NotFound { .. }));
}

// -----------------------------------------------------------------------
// User tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_user_hashes_password() {
    let db = setup().await;
    let users = SurrealUserRepository::new(db);

    let user = users
        .create(CreateUser {
            username: "alice".into(),
            password: "correct-horse-battery".into(),
            role: Role::Admin,
        })
        .await
        .unwrap();

    assert_eq!(user.role, Role::Admin);
    assert_ne!(user.password_hash, "correct-horse-battery");
    assert!(user.password_hash.starts_with("$argon2id$"));

    let fetched = users.get_by_username("alice").await.unwrap();
    assert_eq!(fetched.user_id, user.user_id);
}

#[tokio::test]
async fn duplicate_username_rejected() {
    let db = setup().await;
    let users = SurrealUserRepository::new(db);

    users
        .create(CreateUser {
            username: "alice".into(),
            password: "pw-one".into(),
            role: Role::User,
        })
        .await
        .unwrap();

    let result = users
        .create(CreateUser {
            username: "alice".into(),
            password: "pw-two".into(),
            role: Role::User,
        })
        .await;
    assert!(result.is_err(), "duplicate username should be rejected");
}

#[tokio::test]
async fn unknown_username_is_not_found() {
    let db = setup().await;
    let users = SurrealUserRepository::new(db);

    let err = users.get_by_username("nobody").await.unwrap_err();
    assert!(matches!(err, RailtraceError::NotFound { .. }));
}

// -----------------------------------------------------------------------
// Contact tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn contact_create_stamps_creation_time() {
    let db = setup().await;
    let contacts = SurrealContactRepository::new(db);

    let contact = contacts
        .create(CreateContact {
            name: "Aigerim".into(),
            email: "aigerim@example.com".into(),
            message: "Where is my shipment?".into(),
        })
        .await
        .unwrap();

    assert_eq!(contact.name, "Aigerim");
    assert!(contact.contact_id >= 1);
    // created_at comes from the storage default, not the caller.
    assert!(contact.created_at.timestamp() > 0);
}

// -----------------------------------------------------------------------
// Seed tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn seed_is_idempotent() {
    let db = setup().await;

    railtrace_db::seed_default_data(&db, "admin-secret", None)
        .await
        .unwrap();
    railtrace_db::seed_default_data(&db, "admin-secret", None)
        .await
        .unwrap();

    let trains = SurrealTrainRepository::new(db.clone());
    let all = trains.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "KZ-001");

    let cargos = SurrealCargoRepository::new(db.clone());
    let joined = cargos.list_with_train().await.unwrap();
    assert_eq!(joined.len(), 1);
    assert_eq!(
        joined[0].train.as_ref().map(|t| t.name.as_str()),
        Some("KZ-001")
    );

    let users = SurrealUserRepository::new(db);
    let admin = users.get_by_username("admin").await.unwrap();
    assert_eq!(admin.role, Role::Admin);
    assert!(admin.password_hash.starts_with("$argon2id$"));
}
