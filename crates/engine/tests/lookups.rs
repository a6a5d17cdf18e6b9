use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};

use engine::{
    CargoManifestCmd, CargoManifestFields, DateRange, Engine, EngineError, MawbInfoCmd,
    RecordKind, UploadLogCmd, WeightSlipCmd, WeightSlipFields,
};
use migration::MigratorTrait;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

#[tokio::test]
async fn migrations_seed_catalog_and_defaults() {
    let (engine, _db) = engine_with_db().await;

    let names: Vec<_> = engine
        .statuses()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["APPROVED", "CLOSED", "DRAFT", "SUBMITTED"]);

    for kind in [RecordKind::CargoManifest, RecordKind::WeightSlip] {
        assert_eq!(engine.default_status(kind).await.unwrap().name, "DRAFT");
    }
}

#[tokio::test]
async fn changing_default_applies_to_new_records() {
    let (engine, _db) = engine_with_db().await;
    let received = engine
        .create_status("RECEIVED", Some("Cargo received at warehouse"))
        .await
        .unwrap();
    engine
        .set_default_status(RecordKind::WeightSlip, received.id)
        .await
        .unwrap();
    let mawb = engine
        .create_mawb_info(MawbInfoCmd::new("176-12345675"))
        .await
        .unwrap();

    let slip = engine
        .create_weight_slip(WeightSlipCmd::new(
            mawb.id,
            WeightSlipFields::new("WS-1", "176-12345675", 12.0),
        ))
        .await
        .unwrap();
    assert_eq!(slip.status_id, received.id);

    let manifest = engine
        .create_cargo_manifest(CargoManifestCmd::new(
            mawb.id,
            CargoManifestFields::new("176-12345675"),
        ))
        .await
        .unwrap();
    assert_eq!(manifest.status_name.as_deref(), Some("DRAFT"));
}

#[tokio::test]
async fn status_catalog_rejects_duplicates_and_unknown_defaults() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.create_status("DRAFT", None).await.unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("DRAFT".to_string()));

    let err = engine
        .set_default_status(RecordKind::CargoManifest, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("status not exists".to_string()));
}

#[tokio::test]
async fn mawb_registry() {
    let (engine, _db) = engine_with_db().await;
    let flight_date = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();

    let second = engine
        .create_mawb_info(
            MawbInfoCmd::new(" 176-00000002 ")
                .airline("CX")
                .route("HKG", "MXP")
                .flight("CX123", flight_date),
        )
        .await
        .unwrap();
    let first = engine
        .create_mawb_info(MawbInfoCmd::new("176-00000001"))
        .await
        .unwrap();

    assert_eq!(second.mawb_no, "176-00000002");
    assert_eq!(second.flight_date, Some(flight_date));
    assert_eq!(engine.mawb_info(second.id).await.unwrap(), second);

    let err = engine
        .create_mawb_info(MawbInfoCmd::new("176-00000001"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("176-00000001".to_string()));

    let options = engine.mawb_options().await.unwrap();
    let numbers: Vec<_> = options.iter().map(|o| o.mawb_no.as_str()).collect();
    assert_eq!(numbers, ["176-00000001", "176-00000002"]);
    assert_eq!(options[0].id, first.id);

    let listed = engine.mawb_infos(DateRange::default()).await.unwrap();
    assert_eq!(listed.len(), 2);

    let missing = Uuid::new_v4();
    assert!(matches!(
        engine.mawb_info(missing).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn upload_log() {
    let (engine, _db) = engine_with_db().await;
    let mawb = engine
        .create_mawb_info(MawbInfoCmd::new("176-12345675"))
        .await
        .unwrap();

    let logged = engine
        .log_upload(
            UploadLogCmd::new("manifest.pdf", "uploads/2026/manifest.pdf", 2048, "alice")
                .content_type("application/pdf")
                .mawb_info_id(mawb.id),
        )
        .await
        .unwrap();
    assert_eq!(logged.mawb_info_id, Some(mawb.id));
    assert_eq!(logged.content_type.as_deref(), Some("application/pdf"));

    let err = engine
        .log_upload(
            UploadLogCmd::new("x.pdf", "uploads/x.pdf", 1, "alice").mawb_info_id(Uuid::new_v4()),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let logs = engine.upload_logs(DateRange::default()).await.unwrap();
    assert_eq!(logs, vec![logged]);
}

#[tokio::test]
async fn dashboard_counts_per_status() {
    let (engine, _db) = engine_with_db().await;
    for no in ["176-00000001", "176-00000002"] {
        let mawb = engine
            .create_mawb_info(MawbInfoCmd::new(no))
            .await
            .unwrap();
        engine
            .create_cargo_manifest(CargoManifestCmd::new(mawb.id, CargoManifestFields::new(no)))
            .await
            .unwrap();
    }

    let dashboard = engine.dashboard().await.unwrap();
    assert_eq!(dashboard.mawb_count, 2);
    assert_eq!(dashboard.cargo_manifest_count, 2);
    assert_eq!(dashboard.weight_slip_count, 0);
    assert_eq!(dashboard.upload_count, 0);

    let draft = dashboard
        .cargo_manifest_statuses
        .iter()
        .find(|c| c.status == "DRAFT")
        .unwrap();
    assert_eq!(draft.count, 2);
    assert_eq!(dashboard.weight_slip_statuses.len(), 4);
    assert!(dashboard.weight_slip_statuses.iter().all(|c| c.count == 0));
}

#[tokio::test]
async fn users_and_authentication() {
    let (engine, _db) = engine_with_db().await;

    let user = engine
        .create_user("alice", "correct-horse", Some("Alice"))
        .await
        .unwrap();
    assert_eq!(user.display_name.as_deref(), Some("Alice"));

    let err = engine
        .create_user("alice", "another-password", None)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("alice".to_string()));

    let err = engine.create_user("bob", "short", None).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    assert_eq!(
        engine.authenticate("alice", "correct-horse").await.unwrap(),
        Some(user.clone())
    );
    assert_eq!(engine.authenticate("alice", "wrong-horse").await.unwrap(), None);
    assert_eq!(engine.authenticate("carol", "correct-horse").await.unwrap(), None);
    assert_eq!(engine.user_by_username("alice").await.unwrap(), Some(user));
}

#[tokio::test(flavor = "current_thread")]
async fn password_check_leaves_the_runtime_free() {
    let (engine, _db) = engine_with_db().await;
    engine
        .create_user("alice", "correct-horse", None)
        .await
        .unwrap();

    let ticks = Arc::new(AtomicUsize::new(0));
    let ticker = tokio::spawn({
        let ticks = Arc::clone(&ticks);
        async move {
            let mut interval = tokio::time::interval(Duration::from_millis(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                ticks.fetch_add(1, Ordering::Relaxed);
            }
        }
    });
    tokio::task::yield_now().await;
    let before = ticks.load(Ordering::Relaxed);

    let user = engine.authenticate("alice", "correct-horse").await.unwrap();
    let during = ticks.load(Ordering::Relaxed) - before;
    ticker.abort();

    assert!(user.is_some());
    assert!(during >= 3, "runtime stalled while hashing ({during} ticks)");
}
