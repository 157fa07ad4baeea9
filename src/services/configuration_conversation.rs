//! Configuration conversation.
//!
//! Edits the installation configuration and the order-sequence list as one
//! unit of work. Changes stay in memory until [`confirm`] checks the
//! cross-record rules and persists them; [`cancel`] throws them away.
//!
//! ```text
//! Loaded --edit--> Dirty --confirm--> Persisted
//!                    ^        |
//!                    +--------+ validation failure
//! any --cancel--> Loaded
//! ```
//!
//! [`confirm`]: ConfigurationConversation::confirm
//! [`cancel`]: ConfigurationConversation::cancel

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult, ValidationError};
use crate::domain::models::{BaseCalendar, Configuration, OrderSequence};
use crate::domain::ports::{
    BaseCalendarRepository, ConfigurationRepository, OrderSequenceRepository, Translator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    Loaded,
    Dirty,
    Persisted,
}

struct ConversationState {
    configuration: Configuration,
    order_sequences: Vec<OrderSequence>,
    status: ConversationStatus,
}

pub struct ConfigurationConversation<C, O, K>
where
    C: ConfigurationRepository,
    O: OrderSequenceRepository,
    K: BaseCalendarRepository,
{
    configurations: Arc<C>,
    order_sequences: Arc<O>,
    calendars: Arc<K>,
    translator: Translator,
    state: Option<ConversationState>,
}

impl<C, O, K> ConfigurationConversation<C, O, K>
where
    C: ConfigurationRepository,
    O: OrderSequenceRepository,
    K: BaseCalendarRepository,
{
    pub fn new(configurations: Arc<C>, order_sequences: Arc<O>, calendars: Arc<K>, translator: Translator) -> Self {
        Self {
            configurations,
            order_sequences,
            calendars,
            translator,
            state: None,
        }
    }

    /// Loads the configuration (defaults when none is stored) and every
    /// order sequence.
    #[instrument(skip(self))]
    pub async fn init(&mut self) -> DomainResult<()> {
        let configuration = self
            .configurations
            .get()
            .await?
            .unwrap_or_else(Configuration::create);
        let order_sequences = self.order_sequences.list().await?;
        self.state = Some(ConversationState {
            configuration,
            order_sequences,
            status: ConversationStatus::Loaded,
        });
        Ok(())
    }

    pub fn status(&self) -> Option<ConversationStatus> {
        self.state.as_ref().map(|s| s.status)
    }

    fn state(&self) -> DomainResult<&ConversationState> {
        self.state.as_ref().ok_or(DomainError::ConversationNotStarted)
    }

    /// Mutable access; marks the conversation dirty.
    fn edit(&mut self) -> DomainResult<&mut ConversationState> {
        let state = self.state.as_mut().ok_or(DomainError::ConversationNotStarted)?;
        state.status = ConversationStatus::Dirty;
        Ok(state)
    }

    /// Finds a sequence by id and marks the conversation dirty only when it exists.
    fn sequence_mut(&mut self, id: Uuid) -> DomainResult<&mut OrderSequence> {
        let state = self.state.as_mut().ok_or(DomainError::ConversationNotStarted)?;
        let sequence = state
            .order_sequences
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| DomainError::not_found("OrderSequence", id))?;
        state.status = ConversationStatus::Dirty;
        Ok(sequence)
    }

    // Configuration record

    pub fn configuration(&self) -> DomainResult<&Configuration> {
        Ok(&self.state()?.configuration)
    }

    pub async fn calendars(&self) -> DomainResult<Vec<BaseCalendar>> {
        self.calendars.list().await
    }

    pub async fn default_calendar(&self) -> DomainResult<Option<BaseCalendar>> {
        match self.state()?.configuration.default_calendar_id {
            Some(id) => self.calendars.get(id).await,
            None => Ok(None),
        }
    }

    pub async fn set_default_calendar(&mut self, calendar_id: Option<Uuid>) -> DomainResult<()> {
        if let Some(id) = calendar_id {
            if self.calendars.get(id).await?.is_none() {
                return Err(DomainError::not_found("BaseCalendar", id));
            }
        }
        self.edit()?.configuration.default_calendar_id = calendar_id;
        Ok(())
    }

    pub fn company_code(&self) -> DomainResult<Option<&str>> {
        Ok(self.state()?.configuration.company_code.as_deref())
    }

    pub fn set_company_code(&mut self, company_code: Option<String>) -> DomainResult<()> {
        self.edit()?.configuration.company_code = company_code;
        Ok(())
    }

    pub fn set_generate_code_for_criterion(&mut self, generate: bool) -> DomainResult<()> {
        self.edit()?.configuration.generate_code_for_criterion = generate;
        Ok(())
    }

    pub fn set_generate_code_for_resources(&mut self, generate: bool) -> DomainResult<()> {
        self.edit()?.configuration.generate_code_for_resources = generate;
        Ok(())
    }

    // Order sequences

    pub fn order_sequences(&self) -> DomainResult<&[OrderSequence]> {
        Ok(&self.state()?.order_sequences)
    }

    /// Appends a sequence with an empty prefix and returns its id.
    pub fn add_order_sequence(&mut self) -> DomainResult<Uuid> {
        let sequence = OrderSequence::new("");
        let id = sequence.id;
        self.edit()?.order_sequences.push(sequence);
        Ok(id)
    }

    pub fn remove_order_sequence(&mut self, id: Uuid) -> DomainResult<()> {
        let state = self.state.as_mut().ok_or(DomainError::ConversationNotStarted)?;
        let index = state
            .order_sequences
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| DomainError::not_found("OrderSequence", id))?;
        state.order_sequences.remove(index);
        state.status = ConversationStatus::Dirty;
        Ok(())
    }

    pub fn set_order_sequence_prefix(&mut self, id: Uuid, prefix: impl Into<String>) -> DomainResult<()> {
        self.sequence_mut(id)?.prefix = prefix.into();
        Ok(())
    }

    pub fn set_order_sequence_digits(&mut self, id: Uuid, digits: u8) -> DomainResult<()> {
        self.sequence_mut(id)?.number_of_digits = digits;
        Ok(())
    }

    pub fn set_order_sequence_active(&mut self, id: Uuid, active: bool) -> DomainResult<()> {
        self.sequence_mut(id)?.active = active;
        Ok(())
    }

    // Unit of work

    /// Validates and persists the conversation.
    ///
    /// Sequences are upserted first, then stored sequences missing from the
    /// list are removed, then the configuration is saved. A failing removal
    /// stops the confirm with sequences already saved left in place.
    #[instrument(skip(self))]
    pub async fn confirm(&mut self) -> DomainResult<()> {
        let state = self.state.as_mut().ok_or(DomainError::ConversationNotStarted)?;
        if let Err(err) = Self::validate(&self.translator, &state.order_sequences) {
            state.status = ConversationStatus::Dirty;
            return Err(err.into());
        }

        for sequence in &state.order_sequences {
            self.order_sequences.save(sequence).await?;
        }

        let kept: Vec<Uuid> = state.order_sequences.iter().map(|s| s.id).collect();
        for stale in self.order_sequences.find_not_in(&kept).await? {
            match self.order_sequences.remove(stale.id).await {
                Ok(()) => {}
                Err(err @ DomainError::NotFound { .. }) => {
                    warn!(sequence = %stale.id, error = %err, "stale order sequence vanished during cleanup");
                    return Err(DomainError::CleanupFailed {
                        entity: "order sequence",
                        source: Box::new(err),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        self.configurations.save(&state.configuration).await?;
        state.status = ConversationStatus::Persisted;
        info!(order_sequences = kept.len(), "configuration confirmed");
        Ok(())
    }

    /// Discards edits and reloads from storage.
    pub async fn cancel(&mut self) -> DomainResult<()> {
        self.init().await
    }

    fn validate(translator: &Translator, sequences: &[OrderSequence]) -> Result<(), ValidationError> {
        if sequences.is_empty() {
            return Err(ValidationError::new(
                translator.tr("At least one order sequence is needed"),
            ));
        }

        if sequences.iter().filter(|s| s.active).count() != 1 {
            return Err(ValidationError::new(
                translator.tr("Just one order sequence must be active"),
            ));
        }

        let mut prefixes = HashSet::new();
        if !sequences.iter().all(|s| prefixes.insert(s.prefix.as_str())) {
            return Err(ValidationError::new(
                translator.tr("Order sequence prefixes can not be repeated"),
            ));
        }

        for sequence in sequences {
            sequence
                .validate()
                .map_err(|message| ValidationError::for_field("prefix", translator.tr(&message)))?;
        }
        Ok(())
    }
}
