//! `resplan sequence`
//!
//! Each command runs one configuration conversation and confirms it, so the
//! usual sequence rules apply: exactly one active, distinct prefixes.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use super::{open_database, resolve_id, start_conversation, SqliteConversation};
use crate::cli::output::{list_table, output, render_list, short_id, CommandOutput};
use crate::domain::models::order_sequence::MIN_NUMBER_OF_DIGITS;
use crate::domain::models::{Config, OrderSequence};

#[derive(Args, Debug)]
pub struct SequenceArgs {
    #[command(subcommand)]
    pub command: SequenceCommands,
}

#[derive(Subcommand, Debug)]
pub enum SequenceCommands {
    /// List order sequences
    List,
    /// Add an order sequence
    Add {
        prefix: String,
        /// Digits in the numeric part (5 to 9)
        #[arg(short, long, default_value_t = MIN_NUMBER_OF_DIGITS)]
        digits: u8,
        /// Make it the active sequence
        #[arg(short, long)]
        activate: bool,
    },
    /// Remove an order sequence
    Remove {
        /// Sequence id or id prefix
        id: String,
    },
    /// Make a sequence the active one
    Activate {
        /// Sequence id or id prefix
        id: String,
    },
}

#[derive(Debug, Serialize)]
pub struct SequenceListOutput {
    pub order_sequences: Vec<OrderSequence>,
}

impl CommandOutput for SequenceListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "prefix", "digits", "last number", "next code", "active"]);
        for sequence in &self.order_sequences {
            table.add_row(vec![
                short_id(&sequence.id),
                sequence.prefix.clone(),
                sequence.number_of_digits.to_string(),
                sequence.last_order_number.to_string(),
                sequence.next_order_code(),
                if sequence.active { "yes" } else { "" }.to_string(),
            ]);
        }
        render_list("order sequence", "order sequences", &table, self.order_sequences.len())
    }
}

pub async fn execute(args: SequenceArgs, config: &Config, json_mode: bool) -> Result<()> {
    let pool = open_database(config).await?;
    let mut conversation = start_conversation(config, &pool).await?;

    match args.command {
        SequenceCommands::List => {}
        SequenceCommands::Add { prefix, digits, activate } => {
            let id = conversation.add_order_sequence()?;
            conversation.set_order_sequence_prefix(id, prefix)?;
            conversation.set_order_sequence_digits(id, digits)?;
            if activate {
                activate_only(&mut conversation, id)?;
            }
            conversation.confirm().await?;
        }
        SequenceCommands::Remove { id } => {
            let id = resolve_id(&id, sequence_ids(&conversation)?)?;
            conversation.remove_order_sequence(id)?;
            conversation.confirm().await?;
        }
        SequenceCommands::Activate { id } => {
            let id = resolve_id(&id, sequence_ids(&conversation)?)?;
            activate_only(&mut conversation, id)?;
            conversation.confirm().await?;
        }
    }

    output(
        &SequenceListOutput {
            order_sequences: conversation.order_sequences()?.to_vec(),
        },
        json_mode,
    );
    Ok(())
}

fn sequence_ids(conversation: &SqliteConversation) -> Result<Vec<uuid::Uuid>> {
    Ok(conversation.order_sequences()?.iter().map(|s| s.id).collect())
}

fn activate_only(conversation: &mut SqliteConversation, id: uuid::Uuid) -> Result<()> {
    for other in sequence_ids(conversation)? {
        conversation.set_order_sequence_active(other, other == id)?;
    }
    Ok(())
}
