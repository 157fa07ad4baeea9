mod common;

use std::sync::Arc;

use chrono::{Days, Local};
use resplan::domain::models::{AllocationBehaviour, AllocationType, Criterion, Resource, ResourceKind};
use resplan::domain::ports::{MessageResolver, NewAllocationsAdder, Translator};
use resplan::presentation::{render_resource_row, AvailabilityTier};
use resplan::services::allocation_selector::START_DATE_FIELD;
use resplan::services::AllocationSelector;
use uuid::Uuid;

use common::{catalog, day, ready_selector, selector, CatalogSelector};

fn listed_names(selector: &CatalogSelector) -> Vec<String> {
    selector
        .resources()
        .iter()
        .map(|r| r.resource.short_description())
        .collect()
}

fn criterion_id(selector: &CatalogSelector, name: &str) -> Uuid {
    selector
        .criterion_tree()
        .criteria()
        .into_iter()
        .find(|c| c.name == name)
        .map(|c| c.id)
        .unwrap_or_else(|| panic!("criterion {name} not in tree"))
}

fn resource_id(selector: &CatalogSelector, name: &str) -> Uuid {
    selector
        .resources()
        .iter()
        .find(|r| r.resource.short_description() == name)
        .map(|r| r.resource.id)
        .unwrap_or_else(|| panic!("resource {name} not listed"))
}

#[derive(Default)]
struct RecordingAdder {
    specific: Vec<Vec<String>>,
    generic: Vec<(ResourceKind, Vec<String>, Vec<String>)>,
}

impl NewAllocationsAdder for RecordingAdder {
    fn add_specific(&mut self, resources: &[Resource]) {
        self.specific
            .push(resources.iter().map(Resource::short_description).collect());
    }

    fn add_generic(&mut self, kind: ResourceKind, criteria: &[Criterion], resources: &[Resource]) {
        self.generic.push((
            kind,
            criteria.iter().map(|c| c.name.clone()).collect(),
            resources.iter().map(Resource::short_description).collect(),
        ));
    }
}

#[tokio::test]
async fn test_init_sets_one_day_window_and_full_tree() {
    let (_, mut selector) = selector(AllocationBehaviour::NonLimiting);
    selector.init().await.unwrap();

    let today = Local::now().date_naive();
    assert_eq!(
        selector.date_range(),
        (Some(today), today.checked_add_days(Days::new(1)))
    );

    let types: Vec<&str> = selector
        .criterion_tree()
        .root()
        .children
        .iter()
        .map(|n| n.label())
        .collect();
    assert_eq!(types, vec!["Location", "Machine family", "Skill"]);
}

#[tokio::test]
async fn test_generic_workers_tree_hides_machine_criteria() {
    let (_, mut selector) = ready_selector(AllocationBehaviour::NonLimiting).await;
    selector
        .set_allocation_type(AllocationType::GenericWorkers)
        .await
        .unwrap();

    let types: Vec<&str> = selector
        .criterion_tree()
        .root()
        .children
        .iter()
        .map(|n| n.label())
        .collect();
    assert_eq!(types, vec!["Location", "Skill"]);
    assert_eq!(listed_names(&selector), vec!["Ada Lovelace", "Alan Turing"]);
    assert_eq!(selector.caption(), "[generic all workers]");
}

#[tokio::test]
async fn test_search_with_cleared_window_does_not_reach_facade() {
    let (catalog, mut selector) = ready_selector(AllocationBehaviour::NonLimiting).await;
    let before = catalog.search_count();

    selector.clear_date_range();
    let found = selector.search("ada", &[]).await.unwrap();

    assert!(found.is_empty());
    assert_eq!(catalog.search_count(), before);
}

#[tokio::test]
async fn test_invalid_window_keeps_previous_one() {
    let (_, mut selector) = ready_selector(AllocationBehaviour::NonLimiting).await;

    let err = selector
        .set_date_range(Some(day(10)), Some(day(9)))
        .unwrap_err();

    let validation = err.as_validation().unwrap();
    assert_eq!(validation.field.as_deref(), Some(START_DATE_FIELD));
    assert_eq!(
        validation.message,
        "Start filtering date must be before than end filtering date"
    );
    assert_eq!(selector.date_range(), (Some(day(3)), Some(day(7))));
}

#[tokio::test]
async fn test_validation_messages_are_translated() {
    struct Galician;

    impl MessageResolver for Galician {
        fn lookup(&self, locale: &str, msgid: &str) -> Option<String> {
            (locale == "gl" && msgid == "End filtering date cannot be empty")
                .then(|| "A data de fin non pode estar baleira".to_string())
        }
    }

    let (catalog, ratios) = catalog();
    let mut selector = AllocationSelector::new(
        catalog,
        ratios,
        AllocationBehaviour::NonLimiting,
        resplan::domain::models::Scenario::master(),
        Translator::new(Arc::new(Galician), "gl"),
    );

    let err = selector.set_date_range(Some(day(1)), None).unwrap_err();
    assert_eq!(
        err.as_validation().unwrap().message,
        "A data de fin non pode estar baleira"
    );
}

#[tokio::test]
async fn test_manual_pick_in_generic_mode_keeps_the_picked_resource() {
    let (_, mut selector) = ready_selector(AllocationBehaviour::NonLimiting).await;
    selector
        .set_allocation_type(AllocationType::GenericWorkers)
        .await
        .unwrap();
    let welding = criterion_id(&selector, "Welding");
    selector.select_criteria(&[welding]).await.unwrap();
    assert_eq!(selector.caption(), "Welding");

    let ada = resource_id(&selector, "Ada Lovelace");
    selector.on_resource_manually_picked(ada).await.unwrap();

    assert_eq!(selector.allocation_type(), AllocationType::Specific);
    assert_eq!(
        selector
            .selected_resources()
            .iter()
            .map(|r| r.id)
            .collect::<Vec<_>>(),
        vec![ada]
    );
    assert_eq!(listed_names(&selector), vec!["Ada Lovelace"]);
    assert_eq!(selector.caption(), "Ada Lovelace");
}

#[tokio::test]
async fn test_manual_pick_carries_over_selected_workers_still_listed() {
    let (catalog, mut selector) = ready_selector(AllocationBehaviour::NonLimiting).await;
    let vigo = criterion_id(&selector, "Vigo");
    catalog.add_resource(Resource::worker("Barbara", "Liskov").with_code("W-004"), &[vigo]);

    selector.select_criteria(&[]).await.unwrap();
    let ada = resource_id(&selector, "Ada Lovelace");
    let alan = resource_id(&selector, "Alan Turing");
    let barbara = resource_id(&selector, "Barbara Liskov");
    selector.select_resources(&[ada, alan, barbara]);

    // Vigo survives the switch but the generic list ignores it
    selector.select_criteria(&[vigo]).await.unwrap();
    selector
        .set_allocation_type(AllocationType::GenericWorkers)
        .await
        .unwrap();
    assert_eq!(
        listed_names(&selector),
        vec!["Ada Lovelace", "Alan Turing", "Barbara Liskov"]
    );

    selector.on_resource_manually_picked(barbara).await.unwrap();

    assert_eq!(selector.allocation_type(), AllocationType::Specific);
    assert_eq!(
        listed_names(&selector),
        vec!["Ada Lovelace", "CNC-7", "Barbara Liskov"]
    );
    let mut selected: Vec<Uuid> = selector.selected_resources().iter().map(|r| r.id).collect();
    selected.sort();
    let mut expected = vec![ada, barbara];
    expected.sort();
    assert_eq!(selected, expected);
    assert!(!selected.contains(&alan));
}

#[tokio::test]
async fn test_type_switch_drops_criteria_outside_new_tree() {
    let (_, mut selector) = ready_selector(AllocationBehaviour::NonLimiting).await;
    let vigo = criterion_id(&selector, "Vigo");
    let welding = criterion_id(&selector, "Welding");
    selector.select_criteria(&[vigo, welding]).await.unwrap();

    selector
        .set_allocation_type(AllocationType::GenericMachines)
        .await
        .unwrap();

    let kept: Vec<&str> = selector
        .selected_criteria()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(kept, vec!["Vigo"]);
    assert_eq!(selector.caption(), "Vigo");
    assert_eq!(listed_names(&selector), vec!["CNC-7"]);
}

#[tokio::test]
async fn test_add_to_dispatches_by_type() {
    let (_, mut selector) = ready_selector(AllocationBehaviour::NonLimiting).await;
    selector
        .set_allocation_type(AllocationType::GenericWorkers)
        .await
        .unwrap();
    let welding = criterion_id(&selector, "Welding");
    selector.select_criteria(&[welding]).await.unwrap();

    let mut adder = RecordingAdder::default();
    selector.add_to(&mut adder);
    assert!(adder.specific.is_empty());
    assert_eq!(
        adder.generic,
        vec![(
            ResourceKind::Worker,
            vec!["Welding".to_string()],
            vec!["Ada Lovelace".to_string()]
        )]
    );

    selector
        .set_allocation_type(AllocationType::Specific)
        .await
        .unwrap();
    let alan = resource_id(&selector, "Alan Turing");
    let cnc = resource_id(&selector, "CNC-7");
    selector.select_resources(&[alan, cnc]);

    let mut adder = RecordingAdder::default();
    selector.add_to(&mut adder);
    assert_eq!(
        adder.specific,
        vec![vec!["Alan Turing".to_string(), "CNC-7".to_string()]]
    );
    assert_eq!(selector.caption(), "Alan Turing, CNC-7");
}

#[tokio::test]
async fn test_limiting_behaviour_lists_limiting_resources_only() {
    let (_, mut selector) = ready_selector(AllocationBehaviour::Limiting).await;
    assert_eq!(
        selector.allocation_types(),
        &[AllocationType::Specific, AllocationType::GenericWorkers]
    );

    selector.search("", &[]).await.unwrap();
    assert_eq!(listed_names(&selector), vec!["Grace Hopper"]);

    let grace = resource_id(&selector, "Grace Hopper");
    selector.select_resources(&[Uuid::new_v4(), grace]);
    assert_eq!(selector.selected_resources().len(), 1);
}

#[tokio::test]
async fn test_rendered_rows_use_catalog_ratios() {
    let (_, mut selector) = ready_selector(AllocationBehaviour::NonLimiting).await;
    selector.search("", &[]).await.unwrap();

    let alan = selector
        .resources()
        .iter()
        .find(|r| r.resource.code == "W-002")
        .unwrap();
    let row = render_resource_row(alan);
    assert_eq!(row.availability.label, "10.00%");
    assert_eq!(row.availability.tier, AvailabilityTier::Low);
    assert_eq!(row.overtime.text, "0.13");
    assert!(row.overtime.negative_marker);

    let ada = selector
        .resources()
        .iter()
        .find(|r| r.resource.code == "W-001")
        .unwrap();
    let row = render_resource_row(ada);
    assert_eq!(row.availability.tier, AvailabilityTier::Medium);
    assert!(!row.overtime.negative_marker);
}
