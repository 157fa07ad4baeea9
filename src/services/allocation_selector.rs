//! Allocation selector.
//!
//! Session-owned state behind the "add allocation" dialog: which allocation
//! type is chosen, the date window load ratios are computed for, the
//! criteria picked in the criterion tree, the candidate resources found,
//! and which of them are selected. A caller-owned event loop invokes the
//! command methods; every command finishes before the next one runs.

use chrono::{Days, Local, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::errors::{DomainResult, ValidationError};
use crate::domain::models::{
    AllocationBehaviour, AllocationSelection, AllocationType, Criterion, Resource,
    ResourceWithLoadRatios, Scenario,
};
use crate::domain::ports::{LoadRatiosCalculator, NewAllocationsAdder, ResourceSearcher, Translator};
use crate::services::criterion_tree::{CriterionTree, CriterionTreeBuilder};

pub const START_DATE_FIELD: &str = "start_date";
pub const END_DATE_FIELD: &str = "end_date";

/// Sortable list columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceColumn {
    Name,
    Availability,
    Overtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Keep the searcher's order.
    #[default]
    Natural,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSort {
    pub column: ResourceColumn,
    pub direction: SortDirection,
}

impl ColumnSort {
    fn apply(self, rows: &mut [ResourceWithLoadRatios]) {
        let ascending = match self.direction {
            SortDirection::Natural => return,
            SortDirection::Ascending => true,
            SortDirection::Descending => false,
        };
        // stable, so equal keys keep the searcher's order
        rows.sort_by(|a, b| {
            let ordering = match self.column {
                ResourceColumn::Name => ResourceWithLoadRatios::by_resource(a, b),
                ResourceColumn::Availability => a.ratios.availability.total_cmp(&b.ratios.availability),
                ResourceColumn::Overtime => a.ratios.overtime.total_cmp(&b.ratios.overtime),
            };
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
    }
}

pub struct AllocationSelector<S: ResourceSearcher, L: LoadRatiosCalculator> {
    searcher: Arc<S>,
    calculator: Arc<L>,
    behaviour: AllocationBehaviour,
    scenario: Scenario,
    translator: Translator,

    current_type: AllocationType,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    criterion_tree: CriterionTree,
    selected_criteria: Vec<Criterion>,
    resources: Vec<ResourceWithLoadRatios>,
    selected: Vec<Uuid>,
    sort: Option<ColumnSort>,
    caption: String,
}

impl<S: ResourceSearcher, L: LoadRatiosCalculator> AllocationSelector<S, L> {
    pub fn new(
        searcher: Arc<S>,
        calculator: Arc<L>,
        behaviour: AllocationBehaviour,
        scenario: Scenario,
        translator: Translator,
    ) -> Self {
        Self {
            searcher,
            calculator,
            behaviour,
            scenario,
            translator,
            current_type: Self::initial_type(behaviour),
            start_date: None,
            end_date: None,
            criterion_tree: CriterionTree::default(),
            selected_criteria: Vec::new(),
            resources: Vec::new(),
            selected: Vec::new(),
            sort: None,
            caption: String::new(),
        }
    }

    fn initial_type(behaviour: AllocationBehaviour) -> AllocationType {
        behaviour
            .allocation_types()
            .first()
            .copied()
            .unwrap_or(AllocationType::Specific)
    }

    /// Loads the criterion tree and sets the window to today .. tomorrow.
    ///
    /// The window always has a value; callers narrow it to the task's dates
    /// once they are known.
    #[instrument(skip(self))]
    pub async fn init(&mut self) -> DomainResult<()> {
        let today = Local::now().date_naive();
        self.start_date = Some(today);
        self.end_date = today.checked_add_days(Days::new(1));
        self.reload_criterion_tree().await?;
        self.refresh_caption();
        Ok(())
    }

    // Accessors

    pub fn allocation_type(&self) -> AllocationType {
        self.current_type
    }

    pub fn behaviour(&self) -> AllocationBehaviour {
        self.behaviour
    }

    pub fn allocation_types(&self) -> &'static [AllocationType] {
        self.behaviour.allocation_types()
    }

    pub fn allows_multiple_selection(&self) -> bool {
        self.behaviour.allows_multiple_selection()
    }

    pub fn date_range(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (self.start_date, self.end_date)
    }

    pub fn criterion_tree(&self) -> &CriterionTree {
        &self.criterion_tree
    }

    pub fn selected_criteria(&self) -> &[Criterion] {
        &self.selected_criteria
    }

    /// Candidates currently displayed, in display order.
    pub fn resources(&self) -> &[ResourceWithLoadRatios] {
        &self.resources
    }

    pub fn sort(&self) -> Option<ColumnSort> {
        self.sort
    }

    /// Caption computed after the last command.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    // Commands

    /// Sets the load-ratio window. Both bounds are required and `start` must
    /// be strictly before `end`; on failure nothing changes.
    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> DomainResult<()> {
        let start = start.ok_or_else(|| {
            ValidationError::for_field(
                START_DATE_FIELD,
                self.translator.tr("Start filtering date cannot be empty"),
            )
        })?;
        let end = end.ok_or_else(|| {
            ValidationError::for_field(
                END_DATE_FIELD,
                self.translator.tr("End filtering date cannot be empty"),
            )
        })?;
        if start >= end {
            return Err(ValidationError::for_field(
                START_DATE_FIELD,
                self.translator
                    .tr("Start filtering date must be before than end filtering date"),
            )
            .into());
        }
        self.start_date = Some(start);
        self.end_date = Some(end);
        Ok(())
    }

    /// Forgets the window; searches become no-ops until a new one is set.
    pub fn clear_date_range(&mut self) {
        self.start_date = None;
        self.end_date = None;
    }

    /// Switches mode, reloads the criterion tree and lists every resource of
    /// the new mode.
    #[instrument(skip(self), fields(from = ?self.current_type))]
    pub async fn set_allocation_type(&mut self, allocation_type: AllocationType) -> DomainResult<()> {
        if !self.behaviour.offers(allocation_type) {
            return Err(ValidationError::for_field(
                "allocation_type",
                format!(
                    "{}: {}",
                    self.translator.tr("Allocation type not available"),
                    self.translator.tr(allocation_type.name())
                ),
            )
            .into());
        }
        self.current_type = allocation_type;
        self.reload_criterion_tree().await?;
        self.refresh_with_all_resources().await?;
        self.refresh_caption();
        Ok(())
    }

    /// Replaces the displayed list with resources matching `name_filter`
    /// and `criteria` in the current mode.
    ///
    /// With an incomplete window this returns an empty list without calling
    /// the searcher.
    #[instrument(skip(self, criteria), fields(criteria = criteria.len()))]
    pub async fn search(&mut self, name_filter: &str, criteria: &[Criterion]) -> DomainResult<&[ResourceWithLoadRatios]> {
        let found = if self.has_date_range() {
            let query = self
                .current_type
                .query()
                .by_name(name_filter)
                .by_criteria(criteria)
                .by_resource_type(self.behaviour.resource_type());
            let resources = self.searcher.search(&query).await?;
            self.with_load_ratios(resources).await?
        } else {
            debug!("filtering dates incomplete, skipping search");
            Vec::new()
        };
        self.replace_resources(found);
        Ok(&self.resources)
    }

    /// Criterion tree selection changed.
    pub async fn select_criteria(&mut self, criterion_ids: &[Uuid]) -> DomainResult<()> {
        self.selected_criteria = self.criterion_tree.select(criterion_ids);
        let criteria = self.selected_criteria.clone();
        self.search("", &criteria).await?;
        self.refresh_caption();
        Ok(())
    }

    /// Recomputes ratios after the window changed.
    pub async fn update_load_ratios(&mut self) -> DomainResult<()> {
        let criteria = self.selected_criteria.clone();
        self.search("", &criteria).await?;
        Ok(())
    }

    pub fn set_sort(&mut self, column: ResourceColumn, direction: SortDirection) {
        let sort = ColumnSort { column, direction };
        self.sort = Some(sort);
        sort.apply(&mut self.resources);
    }

    /// Marks a resource as selected. Single-selection behaviours replace the
    /// previous selection.
    pub fn select_resource(&mut self, id: Uuid) {
        if !self.allows_multiple_selection() {
            self.selected.clear();
        }
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
        self.refresh_caption();
    }

    pub fn select_resources(&mut self, ids: &[Uuid]) {
        if self.allows_multiple_selection() {
            self.selected.clear();
            for id in ids {
                if !self.selected.contains(id) {
                    self.selected.push(*id);
                }
            }
            self.refresh_caption();
        } else if let Some(last) = ids.last() {
            self.select_resource(*last);
        } else {
            self.selected.clear();
            self.refresh_caption();
        }
    }

    pub fn deselect_resource(&mut self, id: Uuid) {
        self.selected.retain(|s| *s != id);
        self.refresh_caption();
    }

    /// The user picked a row in the list.
    ///
    /// Picking in a generic mode means the user wants that resource
    /// specifically: the mode falls back to `Specific`, candidates are
    /// re-queried for the selected criteria, and the selection is carried
    /// over to the resources still listed.
    #[instrument(skip(self))]
    pub async fn on_resource_manually_picked(&mut self, id: Uuid) -> DomainResult<()> {
        self.select_resource(id);
        if self.current_type.is_generic() {
            self.return_to_specific().await?;
        }
        self.refresh_caption();
        Ok(())
    }

    async fn return_to_specific(&mut self) -> DomainResult<()> {
        self.current_type = AllocationType::Specific;
        let previously_selected: Vec<Uuid> = self.selected_workers().iter().map(|r| r.id).collect();
        debug!(carried = previously_selected.len(), "returning to specific allocation");

        let found = if self.has_date_range() {
            let query = self
                .current_type
                .query()
                .by_criteria(&self.selected_criteria)
                .by_resource_type(self.behaviour.resource_type());
            let resources = self.searcher.search(&query).await?;
            self.with_load_ratios(resources).await?
        } else {
            Vec::new()
        };
        self.replace_resources(found);

        let listed: HashSet<Uuid> = self.resources.iter().map(|r| r.resource.id).collect();
        self.selected = previously_selected
            .into_iter()
            .filter(|id| listed.contains(id))
            .collect();
        Ok(())
    }

    /// Resources the allocation would be made for: everything listed in a
    /// generic mode, the selected rows in `Specific`.
    pub fn selected_workers(&self) -> Vec<Resource> {
        if self.current_type.is_generic() {
            self.all_resources_shown()
        } else {
            self.selected_resources()
        }
    }

    fn all_resources_shown(&self) -> Vec<Resource> {
        self.resources.iter().map(|r| r.resource.clone()).collect()
    }

    /// Selected rows still listed, in selection order.
    pub fn selected_resources(&self) -> Vec<Resource> {
        self.selected
            .iter()
            .filter_map(|id| self.resources.iter().find(|r| r.resource.id == *id))
            .map(|r| r.resource.clone())
            .collect()
    }

    pub fn selected_allocations_caption(&self) -> String {
        if self.current_type == AllocationType::Specific {
            Resource::caption_for(&self.selected_resources())
        } else {
            self.current_type
                .as_caption(&self.selected_criteria, &self.translator)
        }
    }

    /// Hands the current selection to `adder` according to the mode.
    pub fn add_to(&self, adder: &mut dyn NewAllocationsAdder) {
        let selection = AllocationSelection {
            selected_workers: self.selected_workers(),
            criteria: self.selected_criteria.clone(),
        };
        self.current_type.add_to(&selection, adder);
    }

    /// Back to the initial state: first mode, nothing selected, fresh tree
    /// and list.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) -> DomainResult<()> {
        self.current_type = Self::initial_type(self.behaviour);
        self.selected.clear();
        self.selected_criteria.clear();
        self.reload_criterion_tree().await?;
        self.refresh_with_all_resources().await?;
        self.refresh_caption();
        Ok(())
    }

    // Internals

    fn has_date_range(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    async fn reload_criterion_tree(&mut self) -> DomainResult<()> {
        let kinds = self.current_type.query().kinds;
        let groups = self.searcher.criteria(&kinds).await?;
        self.criterion_tree = CriterionTreeBuilder::build(&groups);
        let ids: Vec<Uuid> = self.selected_criteria.iter().map(|c| c.id).collect();
        self.selected_criteria = self.criterion_tree.select(&ids);
        Ok(())
    }

    async fn refresh_with_all_resources(&mut self) -> DomainResult<()> {
        let found = if self.has_date_range() {
            let query = self
                .current_type
                .query()
                .by_resource_type(self.behaviour.resource_type());
            let resources = self.searcher.search(&query).await?;
            self.with_load_ratios(resources).await?
        } else {
            Vec::new()
        };
        self.replace_resources(found);
        Ok(())
    }

    async fn with_load_ratios(&self, resources: Vec<Resource>) -> DomainResult<Vec<ResourceWithLoadRatios>> {
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Ok(Vec::new());
        };
        let mut result = Vec::with_capacity(resources.len());
        for resource in resources {
            let ratios = self
                .calculator
                .calculate(&resource, start, end, &self.scenario)
                .await?;
            result.push(ResourceWithLoadRatios::new(resource, ratios));
        }
        Ok(result)
    }

    fn replace_resources(&mut self, mut rows: Vec<ResourceWithLoadRatios>) {
        if let Some(sort) = self.sort {
            sort.apply(&mut rows);
        }
        debug!(count = rows.len(), "candidate list replaced");
        self.resources = rows;
    }

    fn refresh_caption(&mut self) {
        self.caption = self.selected_allocations_caption();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryResourceCatalog, StaticLoadRatios};
    use crate::domain::models::{CriterionType, LoadRatios, ResourceKind};

    struct Fixture {
        catalog: Arc<InMemoryResourceCatalog>,
        ada: Resource,
        alan: Resource,
        lathe: Resource,
        welding: Criterion,
    }

    fn fixture() -> Fixture {
        let skill = CriterionType::new("Skill");
        let welding = Criterion::new(&skill, "Welding");
        let ada = Resource::worker("Ada", "Lovelace");
        let alan = Resource::worker("Alan", "Turing");
        let lathe = Resource::machine("Lathe");

        let catalog = InMemoryResourceCatalog::new();
        catalog.add_criterion_type(skill);
        catalog.add_criterion(welding.clone());
        catalog.add_resource(ada.clone(), &[welding.id]);
        catalog.add_resource(alan.clone(), &[]);
        catalog.add_resource(lathe.clone(), &[]);

        Fixture {
            catalog: Arc::new(catalog),
            ada,
            alan,
            lathe,
            welding,
        }
    }

    fn selector(catalog: &Arc<InMemoryResourceCatalog>) -> AllocationSelector<InMemoryResourceCatalog, StaticLoadRatios> {
        let ratios = StaticLoadRatios::new(LoadRatios::new(1.0, 0.0));
        AllocationSelector::new(
            catalog.clone(),
            Arc::new(ratios),
            AllocationBehaviour::NonLimiting,
            Scenario::master(),
            Translator::identity(),
        )
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_set_date_range_rejects_equal_dates() {
        let f = fixture();
        let mut s = selector(&f.catalog);
        let err = s.set_date_range(Some(day(1)), Some(day(1))).unwrap_err();
        assert_eq!(err.as_validation().unwrap().field.as_deref(), Some(START_DATE_FIELD));
        assert_eq!(s.date_range(), (None, None));
    }

    #[test]
    fn test_set_date_range_requires_both_bounds() {
        let f = fixture();
        let mut s = selector(&f.catalog);
        let err = s.set_date_range(Some(day(1)), None).unwrap_err();
        assert_eq!(err.as_validation().unwrap().field.as_deref(), Some(END_DATE_FIELD));
        assert!(s.set_date_range(None, Some(day(2))).is_err());
    }

    #[tokio::test]
    async fn test_search_without_dates_skips_searcher() {
        let f = fixture();
        let mut s = selector(&f.catalog);
        let found = s.search("", &[]).await.unwrap();
        assert!(found.is_empty());
        assert_eq!(f.catalog.search_count(), 0);
    }

    #[tokio::test]
    async fn test_search_filters_by_name_and_criteria() {
        let f = fixture();
        let mut s = selector(&f.catalog);
        s.set_date_range(Some(day(1)), Some(day(5))).unwrap();

        let found = s.search("tur", &[]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].resource.id, f.alan.id);

        let found = s.search("", &[f.welding.clone()]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].resource.id, f.ada.id);
    }

    #[tokio::test]
    async fn test_generic_workers_lists_only_workers() {
        let f = fixture();
        let mut s = selector(&f.catalog);
        s.set_date_range(Some(day(1)), Some(day(5))).unwrap();
        s.set_allocation_type(AllocationType::GenericWorkers).await.unwrap();

        assert!(s.resources().iter().all(|r| r.resource.kind == ResourceKind::Worker));
        assert_eq!(s.selected_workers().len(), 2);
        assert_eq!(s.caption(), "[generic all workers]");
    }

    #[tokio::test]
    async fn test_manual_pick_returns_to_specific() {
        let f = fixture();
        let mut s = selector(&f.catalog);
        s.init().await.unwrap();
        s.set_date_range(Some(day(1)), Some(day(5))).unwrap();
        s.set_allocation_type(AllocationType::GenericWorkers).await.unwrap();
        s.select_criteria(&[f.welding.id]).await.unwrap();
        assert_eq!(s.caption(), "Welding");

        s.on_resource_manually_picked(f.ada.id).await.unwrap();

        assert_eq!(s.allocation_type(), AllocationType::Specific);
        assert_eq!(s.selected_resources(), vec![f.ada.clone()]);
        assert_eq!(s.caption(), "Ada Lovelace");
        assert!(!s.resources().iter().any(|r| r.resource.id == f.lathe.id));
    }

    #[tokio::test]
    async fn test_clear_resets_to_first_type() {
        let f = fixture();
        let mut s = selector(&f.catalog);
        s.set_date_range(Some(day(1)), Some(day(5))).unwrap();
        s.set_allocation_type(AllocationType::GenericMachines).await.unwrap();
        s.select_resource(f.lathe.id);

        s.clear().await.unwrap();

        assert_eq!(s.allocation_type(), AllocationType::Specific);
        assert!(s.selected_resources().is_empty());
        assert!(s.selected_criteria().is_empty());
        assert_eq!(s.resources().len(), 3);
    }

    #[tokio::test]
    async fn test_sort_by_availability_descending() {
        let f = fixture();
        let ratios = StaticLoadRatios::new(LoadRatios::new(1.0, 0.0));
        ratios.set(f.alan.id, LoadRatios::new(0.1, 0.0));
        ratios.set(f.ada.id, LoadRatios::new(0.9, 0.0));
        ratios.set(f.lathe.id, LoadRatios::new(0.5, 0.0));
        let mut s = AllocationSelector::new(
            f.catalog.clone(),
            Arc::new(ratios),
            AllocationBehaviour::NonLimiting,
            Scenario::master(),
            Translator::identity(),
        );
        s.set_date_range(Some(day(1)), Some(day(5))).unwrap();
        s.set_sort(ResourceColumn::Availability, SortDirection::Descending);
        s.search("", &[]).await.unwrap();

        let ids: Vec<Uuid> = s.resources().iter().map(|r| r.resource.id).collect();
        assert_eq!(ids, vec![f.ada.id, f.lathe.id, f.alan.id]);
    }

    #[tokio::test]
    async fn test_limiting_behaviour_single_selection() {
        let f = fixture();
        let mut s = AllocationSelector::new(
            f.catalog.clone(),
            Arc::new(StaticLoadRatios::default()),
            AllocationBehaviour::Limiting,
            Scenario::master(),
            Translator::identity(),
        );
        s.select_resources(&[f.ada.id, f.alan.id]);
        assert!(!s.allows_multiple_selection());
        assert!(s
            .set_allocation_type(AllocationType::GenericMachines)
            .await
            .unwrap_err()
            .is_validation());
    }
}
