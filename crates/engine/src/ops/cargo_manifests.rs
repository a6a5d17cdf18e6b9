use sea_orm::{QueryOrder, prelude::*};

use crate::{CargoManifest, CargoManifestCmd, CargoManifestFields, CargoManifestItem};

use super::{
    Engine,
    records::{impl_record_ops, impl_record_store},
};

impl_record_store!(
    CargoManifests => CargoManifest {
        kind: CargoManifest,
        fields: CargoManifestFields,
        child: CargoManifestItem,
        children: items,
        parent: cargo_manifests,
        lines: cargo_manifest_items by CargoManifestId (cargo_manifest_id),
        label: "cargo manifest",
    }
);

impl Engine {
    impl_record_ops!(
        CargoManifests => CargoManifest, CargoManifestCmd;
        create: create_cargo_manifest,
        update: update_cargo_manifest,
        update_status: update_cargo_manifest_status,
        by_mawb: cargo_manifest_by_mawb,
        by_id: cargo_manifest,
        list: cargo_manifests,
    );
}
