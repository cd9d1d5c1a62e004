use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{FeeTier, QuoteId};

/// all events that can be emitted by the calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    ScheduleBuilt {
        quote_id: QuoteId,
        principal: Money,
        annual_rate: Rate,
        term_months: u32,
        payment: Money,
        total_interest: Money,
        timestamp: DateTime<Utc>,
    },
    ExtraPaymentApplied {
        quote_id: QuoteId,
        extra_amount: Money,
        original_months: u32,
        new_months: u32,
        interest_saved: Money,
        timestamp: DateTime<Utc>,
    },
    FeeBreakdownComputed {
        quote_id: QuoteId,
        net_amount: Money,
        gross_amount: Money,
        tier: FeeTier,
        total_payable: Money,
        timestamp: DateTime<Utc>,
    },
    BankComparisonComputed {
        quote_id: QuoteId,
        bank_name: String,
        total_payable_difference: Money,
        timestamp: DateTime<Utc>,
    },
    CalculationRejected {
        quote_id: QuoteId,
        operation: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    pub fn quote_id(&self) -> QuoteId {
        match self {
            Event::ScheduleBuilt { quote_id, .. }
            | Event::ExtraPaymentApplied { quote_id, .. }
            | Event::FeeBreakdownComputed { quote_id, .. }
            | Event::BankComparisonComputed { quote_id, .. }
            | Event::CalculationRejected { quote_id, .. } => *quote_id,
        }
    }
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// events recorded for one quote, in emission order
    pub fn for_quote(&self, quote_id: QuoteId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |event| event.quote_id() == quote_id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
