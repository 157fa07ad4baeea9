//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use resplan::adapters::memory::{InMemoryResourceCatalog, StaticLoadRatios};
use resplan::adapters::sqlite::{
    create_migrated_test_pool, SqliteBaseCalendarRepository, SqliteConfigurationRepository,
    SqliteOrderSequenceRepository,
};
use resplan::domain::models::{AllocationBehaviour, Scenario};
use resplan::domain::ports::Translator;
use resplan::services::{AllocationSelector, ConfigurationConversation};

pub const CATALOG: &str = r"
default_load: { availability: 1.0, overtime: 0.0 }
criterion_types:
  - name: Skill
    applies_to: worker
    criteria:
      - name: Welding
        children:
          - name: TIG
      - name: Painting
  - name: Machine family
    applies_to: machine
    criteria:
      - name: Milling
  - name: Location
    criteria:
      - name: Vigo
resources:
  - kind: worker
    first_name: Ada
    name: Lovelace
    code: W-001
    criteria: [Welding, Vigo]
    load: { availability: 0.35, overtime: 0.0 }
  - kind: worker
    first_name: Alan
    name: Turing
    code: W-002
    criteria: [Painting]
    load: { availability: 0.10, overtime: 0.125 }
  - kind: worker
    first_name: Grace
    name: Hopper
    code: W-003
    resource_type: limiting
    criteria: [Welding]
  - kind: machine
    name: CNC-7
    code: M-001
    criteria: [Milling, Vigo]
    load: { availability: 0.60, overtime: 0.0 }
";

pub type CatalogSelector = AllocationSelector<InMemoryResourceCatalog, StaticLoadRatios>;

pub type SqliteConversation = ConfigurationConversation<
    SqliteConfigurationRepository,
    SqliteOrderSequenceRepository,
    SqliteBaseCalendarRepository,
>;

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).expect("valid date")
}

pub fn catalog() -> (Arc<InMemoryResourceCatalog>, Arc<StaticLoadRatios>) {
    let (catalog, ratios) = InMemoryResourceCatalog::load_from_yaml(CATALOG).expect("catalog parses");
    (Arc::new(catalog), Arc::new(ratios))
}

pub fn selector(behaviour: AllocationBehaviour) -> (Arc<InMemoryResourceCatalog>, CatalogSelector) {
    let (catalog, ratios) = catalog();
    let selector = AllocationSelector::new(
        catalog.clone(),
        ratios,
        behaviour,
        Scenario::master(),
        Translator::identity(),
    );
    (catalog, selector)
}

/// Selector with a fixed window, ready for searches.
pub async fn ready_selector(behaviour: AllocationBehaviour) -> (Arc<InMemoryResourceCatalog>, CatalogSelector) {
    let (catalog, mut selector) = selector(behaviour);
    selector.init().await.expect("init");
    selector.set_date_range(Some(day(3)), Some(day(7))).expect("window");
    (catalog, selector)
}

pub struct Repositories {
    pub configurations: Arc<SqliteConfigurationRepository>,
    pub order_sequences: Arc<SqliteOrderSequenceRepository>,
    pub calendars: Arc<SqliteBaseCalendarRepository>,
}

pub async fn repositories() -> Repositories {
    let pool = create_migrated_test_pool().await.expect("test pool");
    Repositories {
        configurations: Arc::new(SqliteConfigurationRepository::new(pool.clone())),
        order_sequences: Arc::new(SqliteOrderSequenceRepository::new(pool.clone())),
        calendars: Arc::new(SqliteBaseCalendarRepository::new(pool)),
    }
}

pub fn conversation(repos: &Repositories, translator: Translator) -> SqliteConversation {
    ConfigurationConversation::new(
        repos.configurations.clone(),
        repos.order_sequences.clone(),
        repos.calendars.clone(),
        translator,
    )
}
