//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that adapters must implement:
//! - ResourceSearcher / LoadRatiosCalculator: the resource catalog facade
//! - ConfigurationRepository, OrderSequenceRepository, BaseCalendarRepository,
//!   CostCategoryRepository: persistence
//! - MessageResolver: localized user-facing messages
//! - NewAllocationsAdder: where chosen allocations go

pub mod allocations_adder;
pub mod calendar_repository;
pub mod configuration_repository;
pub mod cost_category_repository;
pub mod load_ratios_calculator;
pub mod messages;
pub mod order_sequence_repository;
pub mod resource_searcher;

pub use allocations_adder::NewAllocationsAdder;
pub use calendar_repository::BaseCalendarRepository;
pub use configuration_repository::ConfigurationRepository;
pub use cost_category_repository::CostCategoryRepository;
pub use load_ratios_calculator::LoadRatiosCalculator;
pub use messages::{IdentityResolver, MessageResolver, Translator};
pub use order_sequence_repository::OrderSequenceRepository;
pub use resource_searcher::ResourceSearcher;
