use chrono::{Duration, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    CargoManifestCmd, CargoManifestFields, CargoManifestItem, DateRange, Engine, EngineError,
    MawbInfo, MawbInfoCmd, RecordKind, WeightSlipCmd, WeightSlipDimension, WeightSlipFields,
};
use migration::MigratorTrait;
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

async fn new_mawb(engine: &Engine, mawb_no: &str) -> MawbInfo {
    engine
        .create_mawb_info(MawbInfoCmd::new(mawb_no).airline("CX").route("HKG", "MXP"))
        .await
        .unwrap()
}

async fn count(db: &DatabaseConnection, table: &str) -> i64 {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            format!("SELECT COUNT(*) AS n FROM {table};"),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

fn manifest_cmd(mawb: &MawbInfo) -> CargoManifestCmd {
    CargoManifestCmd::new(mawb.id, CargoManifestFields::new(&mawb.mawb_no))
        .child(CargoManifestItem::new("HAWB-001", 3, 120.5))
        .child(CargoManifestItem::new("HAWB-002", 1, 40.0))
}

fn slip_cmd(mawb: &MawbInfo) -> WeightSlipCmd {
    WeightSlipCmd::new(mawb.id, WeightSlipFields::new("WS-1", &mawb.mawb_no, 80.0))
        .child(WeightSlipDimension::new(100.0, 60.0, 50.0, 2))
}

async fn status_id(engine: &Engine, name: &str) -> Uuid {
    engine
        .statuses()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.name == name)
        .unwrap()
        .id
}

#[tokio::test]
async fn create_assigns_default_status_and_keeps_item_order() {
    let (engine, _db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;
    let default = engine
        .default_status(RecordKind::CargoManifest)
        .await
        .unwrap();
    let other = status_id(&engine, "APPROVED").await;

    // A client-chosen status is ignored on create.
    let manifest = engine
        .create_cargo_manifest(manifest_cmd(&mawb).status_id(other))
        .await
        .unwrap();

    assert_eq!(manifest.mawb_info_id, mawb.id);
    assert_eq!(manifest.status_id, default.id);
    assert_eq!(manifest.status_name.as_deref(), Some("DRAFT"));
    let hawbs: Vec<_> = manifest.items.iter().map(|i| i.hawb_no.as_str()).collect();
    assert_eq!(hawbs, ["HAWB-001", "HAWB-002"]);
    assert_eq!(manifest.total_pieces(), 4);
    assert_eq!(manifest.created_at, manifest.updated_at);

    let by_mawb = engine.cargo_manifest_by_mawb(mawb.id).await.unwrap();
    assert_eq!(by_mawb.as_ref(), Some(&manifest));
    assert_eq!(engine.cargo_manifest(manifest.id).await.unwrap(), manifest);
}

#[tokio::test]
async fn second_create_for_same_mawb_is_rejected() {
    let (engine, db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;

    engine
        .create_cargo_manifest(manifest_cmd(&mawb))
        .await
        .unwrap();
    let err = engine
        .create_cargo_manifest(manifest_cmd(&mawb))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::ExistingKey(mawb.id.to_string()));
    assert_eq!(count(&db, "cargo_manifests").await, 1);
    assert_eq!(count(&db, "cargo_manifest_items").await, 2);
}

#[tokio::test]
async fn create_requires_existing_mawb() {
    let (engine, db) = engine_with_db().await;
    let unknown = MawbInfo {
        id: Uuid::new_v4(),
        mawb_no: "999-00000000".to_string(),
        airline: None,
        origin: None,
        destination: None,
        flight_no: None,
        flight_date: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let err = engine
        .create_cargo_manifest(manifest_cmd(&unknown))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::KeyNotFound(_)));
    assert_eq!(count(&db, "cargo_manifests").await, 0);
}

#[tokio::test]
async fn invalid_payload_is_rejected_before_writing() {
    let (engine, db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;

    let cmd = manifest_cmd(&mawb).child(CargoManifestItem::new("HAWB-003", 0, 1.0));
    let err = engine.create_cargo_manifest(cmd).await.unwrap_err();

    assert!(matches!(err, EngineError::InvalidInput(_)));
    assert_eq!(count(&db, "cargo_manifests").await, 0);
}

#[tokio::test]
async fn update_resolves_id_from_mawb_and_resets_status() {
    let (engine, _db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;
    let created = engine
        .create_cargo_manifest(manifest_cmd(&mawb))
        .await
        .unwrap();
    let approved = status_id(&engine, "APPROVED").await;
    engine
        .update_cargo_manifest_status(mawb.id, approved)
        .await
        .unwrap();

    let mut fields = CargoManifestFields::new(&mawb.mawb_no);
    fields.remark = Some("re-weighed".to_string());
    let forged = Uuid::new_v4();
    let updated = engine
        .update_cargo_manifest(
            CargoManifestCmd::new(mawb.id, fields)
                .id(forged)
                .status_id(approved)
                .child(CargoManifestItem::new("HAWB-009", 5, 10.0)),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.status_id, created.status_id);
    assert_eq!(updated.fields.remark.as_deref(), Some("re-weighed"));
    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.items[0].hawb_no, "HAWB-009");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let err = engine.cargo_manifest(forged).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound(forged.to_string()));
}

#[tokio::test]
async fn update_with_no_children_clears_them() {
    let (engine, db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;
    engine
        .create_cargo_manifest(manifest_cmd(&mawb))
        .await
        .unwrap();

    let updated = engine
        .update_cargo_manifest(CargoManifestCmd::new(
            mawb.id,
            CargoManifestFields::new(&mawb.mawb_no),
        ))
        .await
        .unwrap();

    assert!(updated.items.is_empty());
    assert_eq!(count(&db, "cargo_manifest_items").await, 0);
}

#[tokio::test]
async fn update_without_record_is_not_found() {
    let (engine, db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;

    let err = engine
        .update_cargo_manifest(manifest_cmd(&mawb))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::KeyNotFound(mawb.id.to_string()));
    assert_eq!(count(&db, "cargo_manifests").await, 0);
}

#[tokio::test]
async fn update_status_keeps_children_and_fields() {
    let (engine, _db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;
    let created = engine
        .create_weight_slip(slip_cmd(&mawb))
        .await
        .unwrap();
    let submitted = status_id(&engine, "SUBMITTED").await;

    let moved = engine
        .update_weight_slip_status(mawb.id, submitted)
        .await
        .unwrap();

    assert_eq!(moved.id, created.id);
    assert_eq!(moved.status_id, submitted);
    assert_eq!(moved.status_name.as_deref(), Some("SUBMITTED"));
    assert_eq!(moved.fields, created.fields);
    assert_eq!(moved.dimensions, created.dimensions);
}

#[tokio::test]
async fn update_status_on_missing_record_or_status_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;
    let approved = status_id(&engine, "APPROVED").await;

    let err = engine
        .update_cargo_manifest_status(mawb.id, approved)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound(mawb.id.to_string()));

    let created = engine
        .create_cargo_manifest(manifest_cmd(&mawb))
        .await
        .unwrap();
    let err = engine
        .update_cargo_manifest_status(mawb.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("status not exists".to_string()));

    let unchanged = engine.cargo_manifest(created.id).await.unwrap();
    assert_eq!(unchanged.status_id, created.status_id);
}

#[tokio::test]
async fn failed_child_insert_leaves_no_parent() {
    let (engine, db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;
    db.execute_unprepared("DROP TABLE cargo_manifest_items;")
        .await
        .unwrap();

    let err = engine
        .create_cargo_manifest(manifest_cmd(&mawb))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EngineError::Storage { ref operation, .. } if operation == "create_cargo_manifest"
    ));
    assert_eq!(count(&db, "cargo_manifests").await, 0);
}

#[tokio::test]
async fn failed_update_keeps_previous_record() {
    let (engine, db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;
    engine
        .create_cargo_manifest(manifest_cmd(&mawb))
        .await
        .unwrap();
    let submitted = status_id(&engine, "SUBMITTED").await;
    let before = engine
        .update_cargo_manifest_status(mawb.id, submitted)
        .await
        .unwrap();
    db.execute_unprepared(
        "CREATE TRIGGER lock_manifest_items BEFORE INSERT ON cargo_manifest_items \
         BEGIN SELECT RAISE(ABORT, 'items locked'); END;",
    )
    .await
    .unwrap();

    let mut fields = CargoManifestFields::new(&mawb.mawb_no);
    fields.remark = Some("re-weighed".to_string());
    let err = engine
        .update_cargo_manifest(
            CargoManifestCmd::new(mawb.id, fields)
                .child(CargoManifestItem::new("HAWB-009", 2, 10.0)),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EngineError::Storage { ref operation, .. } if operation == "update_cargo_manifest"
    ));
    let after = engine.cargo_manifest(before.id).await.unwrap();
    assert_eq!(after, before);
    assert_eq!(after.fields.remark, None);
    assert_eq!(after.status_id, submitted);
    let hawbs: Vec<_> = after.items.iter().map(|i| i.hawb_no.as_str()).collect();
    assert_eq!(hawbs, ["HAWB-001", "HAWB-002"]);
    assert_eq!(count(&db, "cargo_manifest_items").await, 2);
}

#[tokio::test]
async fn missing_default_status_aborts_create() {
    let (engine, db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;
    db.execute_unprepared("DELETE FROM status_defaults WHERE entity_type = 'weight_slip';")
        .await
        .unwrap();

    let err = engine.create_weight_slip(slip_cmd(&mawb)).await.unwrap_err();

    assert_eq!(
        err,
        EngineError::Configuration("no default status configured for weight_slip".to_string())
    );
    assert_eq!(count(&db, "weight_slips").await, 0);
    assert_eq!(count(&db, "weight_slip_dimensions").await, 0);

    // The other record kind is unaffected.
    engine
        .create_cargo_manifest(manifest_cmd(&mawb))
        .await
        .unwrap();
}

#[tokio::test]
async fn concurrent_creates_yield_one_record() {
    let (engine, db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;

    let (first, second) = tokio::join!(
        engine.create_cargo_manifest(manifest_cmd(&mawb)),
        engine.create_cargo_manifest(manifest_cmd(&mawb)),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .any(|r| matches!(r, Err(EngineError::ExistingKey(_))))
    );
    assert_eq!(count(&db, "cargo_manifests").await, 1);
}

#[tokio::test]
async fn each_kind_has_its_own_record_per_mawb() {
    let (engine, _db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;

    engine
        .create_cargo_manifest(manifest_cmd(&mawb))
        .await
        .unwrap();
    let slip = engine.create_weight_slip(slip_cmd(&mawb)).await.unwrap();

    assert_eq!(slip.status_name.as_deref(), Some("DRAFT"));
    // 100 x 60 x 50 cm x 2 pieces / 6000
    assert!((slip.volume_weight() - 100.0).abs() < 1e-9);
    assert!((slip.chargeable_weight() - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn reads_of_absent_records() {
    let (engine, _db) = engine_with_db().await;
    let mawb = new_mawb(&engine, "176-12345675").await;

    assert_eq!(engine.weight_slip_by_mawb(mawb.id).await.unwrap(), None);
    let id = Uuid::new_v4();
    assert_eq!(
        engine.weight_slip(id).await.unwrap_err(),
        EngineError::KeyNotFound(id.to_string())
    );
}

#[tokio::test]
async fn list_filters_on_creation_time() {
    let (engine, _db) = engine_with_db().await;
    let first = new_mawb(&engine, "176-00000001").await;
    let second = new_mawb(&engine, "176-00000002").await;
    engine
        .create_cargo_manifest(manifest_cmd(&first))
        .await
        .unwrap();
    engine
        .create_cargo_manifest(manifest_cmd(&second))
        .await
        .unwrap();

    let all = engine
        .cargo_manifests(DateRange::default())
        .await
        .unwrap();
    let owners: Vec<_> = all.iter().map(|m| m.mawb_info_id).collect();
    assert_eq!(owners, [first.id, second.id]);
    assert!(all.iter().all(|m| m.items.len() == 2));

    let future = DateRange::new(Some(Utc::now() + Duration::hours(1)), None).unwrap();
    assert!(engine.cargo_manifests(future).await.unwrap().is_empty());

    let past = DateRange::new(None, Some(Utc::now() - Duration::hours(1))).unwrap();
    assert!(engine.weight_slips(past).await.unwrap().is_empty());
}
