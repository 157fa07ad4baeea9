//! `resplan config`

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use super::{open_database, resolve_id, start_conversation, SqliteConversation};
use crate::adapters::sqlite::SqliteBaseCalendarRepository;
use crate::cli::output::{list_table, output, short_id, CommandOutput};
use crate::domain::models::{BaseCalendar, Config, OrderSequence};
use crate::domain::ports::BaseCalendarRepository;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the stored configuration
    Show,
    /// Change configuration fields and save
    Set {
        /// Company code; an empty value clears it
        #[arg(long)]
        company_code: Option<String>,
        /// Default calendar id (or prefix); "none" clears it
        #[arg(long)]
        default_calendar: Option<String>,
        #[arg(long)]
        generate_criterion_codes: Option<bool>,
        #[arg(long)]
        generate_resource_codes: Option<bool>,
    },
    /// Register a base calendar
    AddCalendar {
        name: String,
    },
}

#[derive(Debug, Serialize)]
pub struct ConfigurationOutput {
    pub company_code: Option<String>,
    pub default_calendar: Option<BaseCalendar>,
    pub generate_code_for_criterion: bool,
    pub generate_code_for_resources: bool,
    pub calendars: Vec<BaseCalendar>,
    pub order_sequences: Vec<OrderSequence>,
}

impl CommandOutput for ConfigurationOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Company code: {}", self.company_code.as_deref().unwrap_or("-")),
            format!(
                "Default calendar: {}",
                self.default_calendar.as_ref().map_or("-", |c| c.name.as_str())
            ),
            format!("Generate criterion codes: {}", self.generate_code_for_criterion),
            format!("Generate resource codes: {}", self.generate_code_for_resources),
        ];

        if !self.calendars.is_empty() {
            let mut table = list_table(&["id", "calendar"]);
            for calendar in &self.calendars {
                table.add_row(vec![short_id(&calendar.id), calendar.name.clone()]);
            }
            lines.push(format!("\n{table}"));
        }

        let mut table = list_table(&["id", "prefix", "digits", "next code", "active"]);
        for sequence in &self.order_sequences {
            table.add_row(vec![
                short_id(&sequence.id),
                sequence.prefix.clone(),
                sequence.number_of_digits.to_string(),
                sequence.next_order_code(),
                if sequence.active { "yes" } else { "" }.to_string(),
            ]);
        }
        lines.push(format!("\n{table}"));
        lines.join("\n")
    }
}

impl ConfigurationOutput {
    pub async fn from_conversation(conversation: &SqliteConversation) -> Result<Self> {
        let configuration = conversation.configuration()?;
        Ok(Self {
            company_code: configuration.company_code.clone(),
            default_calendar: conversation.default_calendar().await?,
            generate_code_for_criterion: configuration.generate_code_for_criterion,
            generate_code_for_resources: configuration.generate_code_for_resources,
            calendars: conversation.calendars().await?,
            order_sequences: conversation.order_sequences()?.to_vec(),
        })
    }
}

pub async fn execute(args: ConfigArgs, config: &Config, json_mode: bool) -> Result<()> {
    let pool = open_database(config).await?;

    match args.command {
        ConfigCommands::Show => {
            let conversation = start_conversation(config, &pool).await?;
            output(&ConfigurationOutput::from_conversation(&conversation).await?, json_mode);
        }
        ConfigCommands::Set {
            company_code,
            default_calendar,
            generate_criterion_codes,
            generate_resource_codes,
        } => {
            let mut conversation = start_conversation(config, &pool).await?;
            if let Some(code) = company_code {
                let code = code.trim().to_string();
                conversation.set_company_code((!code.is_empty()).then_some(code))?;
            }
            if let Some(calendar) = default_calendar {
                let calendar_id = resolve_calendar(&conversation, &calendar).await?;
                conversation.set_default_calendar(calendar_id).await?;
            }
            if let Some(generate) = generate_criterion_codes {
                conversation.set_generate_code_for_criterion(generate)?;
            }
            if let Some(generate) = generate_resource_codes {
                conversation.set_generate_code_for_resources(generate)?;
            }
            conversation.confirm().await?;
            output(&ConfigurationOutput::from_conversation(&conversation).await?, json_mode);
        }
        ConfigCommands::AddCalendar { name } => {
            let calendar = BaseCalendar::new(name);
            SqliteBaseCalendarRepository::new(pool).save(&calendar).await?;
            output(&CalendarOutput { calendar }, json_mode);
        }
    }
    Ok(())
}

async fn resolve_calendar(conversation: &SqliteConversation, input: &str) -> Result<Option<Uuid>> {
    if input.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let calendars = conversation.calendars().await?;
    Ok(Some(resolve_id(input, calendars.iter().map(|c| c.id))?))
}

#[derive(Debug, Serialize)]
pub struct CalendarOutput {
    pub calendar: BaseCalendar,
}

impl CommandOutput for CalendarOutput {
    fn to_human(&self) -> String {
        format!("Added calendar {} ({})", self.calendar.name, self.calendar.id)
    }
}
