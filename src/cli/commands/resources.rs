//! `resplan resources`
//!
//! Drives the allocation selector against a YAML resource catalog and
//! prints what the selection would allocate.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use crate::adapters::memory::{InMemoryResourceCatalog, StaticLoadRatios};
use crate::cli::output::{list_table, output, render_list, CommandOutput};
use crate::domain::models::{AllocationType, Config, Criterion, Resource, ResourceKind, Scenario};
use crate::domain::ports::NewAllocationsAdder;
use crate::infrastructure::messages::translator_for;
use crate::presentation::{render_resource_row, render_tree, ResourceRow, TreeRow};
use crate::services::{AllocationSelector, ResourceColumn, SortDirection};

type CatalogSelector = AllocationSelector<InMemoryResourceCatalog, StaticLoadRatios>;

#[derive(Args, Debug)]
pub struct ResourcesArgs {
    /// YAML resource catalog
    #[arg(long, global = true, env = "RESPLAN_CATALOG", default_value = "catalog.yaml")]
    pub catalog: PathBuf,

    #[command(subcommand)]
    pub command: ResourcesCommands,
}

#[derive(Subcommand, Debug)]
pub enum ResourcesCommands {
    /// List resources with their load for a date window
    Search(SearchArgs),
    /// Show the criterion tree for an allocation type
    Tree {
        /// specific, generic-workers or generic-machines
        #[arg(short = 't', long = "type", value_parser = parse_allocation_type)]
        allocation_type: Option<AllocationType>,
    },
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// specific, generic-workers or generic-machines
    #[arg(short = 't', long = "type", value_parser = parse_allocation_type)]
    pub allocation_type: Option<AllocationType>,

    /// Name or code fragment
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Criterion name the resources must satisfy (repeatable)
    #[arg(short, long)]
    pub criterion: Vec<String>,

    /// Start of the load window (YYYY-MM-DD), today by default
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// End of the load window (YYYY-MM-DD), tomorrow by default
    #[arg(long)]
    pub end: Option<NaiveDate>,

    #[arg(long, value_enum)]
    pub sort: Option<SortColumn>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Pick a listed resource by name or code (repeatable)
    #[arg(short, long)]
    pub pick: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortColumn {
    Name,
    Availability,
    Overtime,
}

impl From<SortColumn> for ResourceColumn {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Name => Self::Name,
            SortColumn::Availability => Self::Availability,
            SortColumn::Overtime => Self::Overtime,
        }
    }
}

fn parse_allocation_type(s: &str) -> Result<AllocationType, String> {
    AllocationType::from_str(s)
        .ok_or_else(|| format!("unknown allocation type '{s}' (specific, generic-workers, generic-machines)"))
}

#[derive(Debug, Serialize)]
pub struct ListedResource {
    pub id: Uuid,
    pub code: String,
    pub selected: bool,
    #[serde(flatten)]
    pub row: ResourceRow,
}

/// One allocation the selection would create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlannedAllocation {
    Specific {
        resources: Vec<String>,
    },
    Generic {
        resource_kind: ResourceKind,
        criteria: Vec<String>,
        resources: Vec<String>,
    },
}

/// Collects allocations instead of creating them.
#[derive(Debug, Default)]
pub struct AllocationPreview {
    pub planned: Vec<PlannedAllocation>,
}

fn names(resources: &[Resource]) -> Vec<String> {
    resources.iter().map(Resource::short_description).collect()
}

impl NewAllocationsAdder for AllocationPreview {
    fn add_specific(&mut self, resources: &[Resource]) {
        if !resources.is_empty() {
            self.planned.push(PlannedAllocation::Specific {
                resources: names(resources),
            });
        }
    }

    fn add_generic(&mut self, resource_kind: ResourceKind, criteria: &[Criterion], resources: &[Resource]) {
        self.planned.push(PlannedAllocation::Generic {
            resource_kind,
            criteria: criteria.iter().map(|c| c.name.clone()).collect(),
            resources: names(resources),
        });
    }
}

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub allocation_type: AllocationType,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub caption: String,
    pub resources: Vec<ListedResource>,
    pub allocations: Vec<PlannedAllocation>,
}

impl CommandOutput for SearchOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["", "name", "availability", "overtime"]);
        for listed in &self.resources {
            let overtime = if listed.row.overtime.negative_marker {
                format!("{} !", listed.row.overtime.text)
            } else {
                listed.row.overtime.text.clone()
            };
            table.add_row(vec![
                if listed.selected { "*" } else { "" }.to_string(),
                listed.row.name.clone(),
                format!("{} ({})", listed.row.availability.label, listed.row.availability.tier.as_str()),
                overtime,
            ]);
        }

        let window = match (self.start, self.end) {
            (Some(start), Some(end)) => format!("{start} .. {end}"),
            _ => "-".to_string(),
        };
        let mut lines = vec![
            format!("Allocation type: {}", self.allocation_type.name()),
            format!("Window: {window}"),
            String::new(),
            render_list("resource", "resources", &table, self.resources.len()),
        ];
        if !self.caption.is_empty() {
            lines.push(format!("\nSelection: {}", self.caption));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct TreeOutput {
    pub allocation_type: AllocationType,
    pub rows: Vec<TreeRow>,
}

impl CommandOutput for TreeOutput {
    fn to_human(&self) -> String {
        if self.rows.is_empty() {
            return "No criteria found.".to_string();
        }
        self.rows
            .iter()
            .map(|row| format!("{}{}", "  ".repeat(row.depth), row.label))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub async fn execute(args: ResourcesArgs, config: &Config, json_mode: bool) -> Result<()> {
    let mut selector = open_selector(&args.catalog, config).await?;

    match args.command {
        ResourcesCommands::Search(search) => {
            let result = run_search(&mut selector, search).await?;
            output(&result, json_mode);
        }
        ResourcesCommands::Tree { allocation_type } => {
            if let Some(allocation_type) = allocation_type {
                selector.set_allocation_type(allocation_type).await?;
            }
            output(
                &TreeOutput {
                    allocation_type: selector.allocation_type(),
                    rows: render_tree(selector.criterion_tree()),
                },
                json_mode,
            );
        }
    }
    Ok(())
}

async fn open_selector(catalog: &Path, config: &Config) -> Result<CatalogSelector> {
    let (catalog, ratios) = InMemoryResourceCatalog::load_from_file(catalog)
        .with_context(|| format!("Failed to load catalog {}", catalog.display()))?;
    let scenario = if config.allocation.scenario == "master" {
        Scenario::master()
    } else {
        Scenario::new(config.allocation.scenario.clone())
    };

    let mut selector = AllocationSelector::new(
        Arc::new(catalog),
        Arc::new(ratios),
        config.allocation.behaviour,
        scenario,
        translator_for(&config.messages)?,
    );
    selector.init().await?;
    Ok(selector)
}

pub async fn run_search(selector: &mut CatalogSelector, args: SearchArgs) -> Result<SearchOutput> {
    if args.start.is_some() || args.end.is_some() {
        let (start, end) = selector.date_range();
        selector.set_date_range(args.start.or(start), args.end.or(end))?;
    }
    if let Some(allocation_type) = args.allocation_type {
        selector.set_allocation_type(allocation_type).await?;
    }

    let criterion_ids = args
        .criterion
        .iter()
        .map(|name| {
            selector
                .criterion_tree()
                .criteria()
                .into_iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
                .map(|c| c.id)
                .with_context(|| format!("Unknown criterion '{name}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    if !criterion_ids.is_empty() {
        selector.select_criteria(&criterion_ids).await?;
    }

    let criteria = selector.selected_criteria().to_vec();
    selector.search(&args.name, &criteria).await?;

    if let Some(column) = args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        selector.set_sort(column.into(), direction);
    }

    for pick in &args.pick {
        let id = selector
            .resources()
            .iter()
            .find(|r| {
                r.resource.short_description().eq_ignore_ascii_case(pick)
                    || (!r.resource.code.is_empty() && r.resource.code == *pick)
            })
            .map(|r| r.resource.id)
            .with_context(|| format!("No listed resource named '{pick}'"))?;
        selector.on_resource_manually_picked(id).await?;
    }

    let selected: Vec<Uuid> = selector.selected_resources().iter().map(|r| r.id).collect();
    let mut preview = AllocationPreview::default();
    selector.add_to(&mut preview);
    let (start, end) = selector.date_range();

    Ok(SearchOutput {
        allocation_type: selector.allocation_type(),
        start,
        end,
        caption: selector.caption().to_string(),
        resources: selector
            .resources()
            .iter()
            .map(|r| ListedResource {
                id: r.resource.id,
                code: r.resource.code.clone(),
                selected: selected.contains(&r.resource.id),
                row: render_resource_row(r),
            })
            .collect(),
        allocations: preview.planned,
    })
}
