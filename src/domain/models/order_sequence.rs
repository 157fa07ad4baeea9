//! Order sequence domain model.
//!
//! An order sequence generates order codes: a prefix followed by a
//! zero-padded counter. Exactly one sequence is active at a time; that rule
//! spans records and is enforced by the configuration conversation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_NUMBER_OF_DIGITS: u8 = 5;
pub const MAX_NUMBER_OF_DIGITS: u8 = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSequence {
    pub id: Uuid,
    pub prefix: String,
    pub last_order_number: u32,
    pub number_of_digits: u8,
    pub active: bool,
}

impl OrderSequence {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            prefix: prefix.into(),
            last_order_number: 0,
            number_of_digits: MIN_NUMBER_OF_DIGITS,
            active: false,
        }
    }

    pub fn activated(mut self) -> Self {
        self.active = true;
        self
    }

    pub fn with_number_of_digits(mut self, digits: u8) -> Self {
        self.number_of_digits = digits;
        self
    }

    /// True once an order code has been generated from this sequence.
    pub fn is_already_in_use(&self) -> bool {
        self.last_order_number > 0
    }

    /// The code the next order would receive.
    pub fn next_order_code(&self) -> String {
        format!(
            "{}{:0width$}",
            self.prefix,
            u64::from(self.last_order_number) + 1,
            width = usize::from(self.number_of_digits)
        )
    }

    /// Consumes the next number and returns its code.
    pub fn take_next_order_code(&mut self) -> String {
        let code = self.next_order_code();
        self.last_order_number += 1;
        code
    }

    /// Checks the rules that apply to a single record.
    pub fn validate(&self) -> Result<(), String> {
        if self.prefix.trim().is_empty() {
            return Err("Order sequence prefix not specified".to_string());
        }
        if self.prefix.chars().any(char::is_whitespace) {
            return Err(format!(
                "Order sequence prefix '{}' cannot contain whitespaces",
                self.prefix
            ));
        }
        if !(MIN_NUMBER_OF_DIGITS..=MAX_NUMBER_OF_DIGITS).contains(&self.number_of_digits) {
            return Err(format!(
                "Number of digits must be between {MIN_NUMBER_OF_DIGITS} and {MAX_NUMBER_OF_DIGITS}"
            ));
        }
        Ok(())
    }
}
