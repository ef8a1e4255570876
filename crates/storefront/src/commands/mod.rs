//! # Commands
//!
//! One module per operation. Each takes a [`DataStore`](crate::store::DataStore)
//! plus plain arguments and returns a [`CmdResult`]; none of them print.
//!
//! Mutations (`create`, `update`, `delete`) are each a single
//! load → transform → save cycle over the full catalog. They are not atomic
//! with respect to other writers: if two cycles interleave, the later save
//! silently replaces the earlier one.

use crate::model::Product;
use crate::schema::Violation;

pub mod create;
pub mod delete;
pub mod list;
pub mod order;
pub mod update;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_products: Vec<Product>,
    pub listed_products: Vec<Product>,
    pub order: Option<order::OrderLink>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_products(mut self, products: Vec<Product>) -> Self {
        self.affected_products = products;
        self
    }

    pub fn with_listed_products(mut self, products: Vec<Product>) -> Self {
        self.listed_products = products;
        self
    }

    pub fn with_order(mut self, order: order::OrderLink) -> Self {
        self.order = Some(order);
        self
    }
}

/// Turn validation violations into user-facing error messages.
pub fn violation_messages(violations: &[Violation]) -> Vec<CmdMessage> {
    violations
        .iter()
        .map(|v| CmdMessage::error(v.to_string()))
        .collect()
}
