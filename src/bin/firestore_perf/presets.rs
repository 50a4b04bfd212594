//! Configurations nommées
//!
//! `smoke` chronomètre une projection sur la sous-collection d'événements
//! d'un tenant, sans rien insérer. `perftesting` remplit une collection à
//! plat pour un seul tenant et la relit du plus récent au plus ancien.

use clap::ValueEnum;
use firestore_perf::generator::{FIELD_DOCUMENT_ID, FIELD_TENANT_ID, FIELD_TIMESTAMP};
use firestore_perf::{Direction, HarnessConfig, QuerySpec, TenantMode};

/// Tenant dont la sous-collection est lue par le preset smoke
pub const SMOKE_TENANT: &str = "smoke-tenant";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Interroge les événements du tenant smoke sans insertion
    Smoke,
    /// Remplit puis interroge la collection `perftesting` pour le tenant 1
    Perftesting,
}

impl Preset {
    /// Configuration de base du preset
    pub fn config(&self) -> HarnessConfig {
        match self {
            Preset::Smoke => HarnessConfig {
                collection: format!("EventContextTenants/{}/Events", SMOKE_TENANT),
                document_count: 0,
                tenant_mode: TenantMode::Random,
                query: QuerySpec::new()
                    .select(["id"])
                    .order_by("createdAt", Direction::Descending),
                ..Default::default()
            },
            Preset::Perftesting => HarnessConfig {
                collection: "perftesting".to_string(),
                document_count: 10_000,
                tenant_mode: TenantMode::Fixed(1),
                query: QuerySpec::new()
                    .select([FIELD_DOCUMENT_ID])
                    .where_eq(FIELD_TENANT_ID, 1)
                    .order_by(FIELD_TIMESTAMP, Direction::Descending)
                    .limit(2000),
                ..Default::default()
            },
        }
    }
}
