use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{FeePolicy, LendingConfig, ServiceChargeConfig};
use crate::decimal::{Money, Rate};
use crate::errors::{LendingError, Result};
use crate::events::{Event, EventStore};
use crate::fees::{
    breakdown_from_schedule, compare_with_bank, BankComparison, FeeBreakdown, FeeStructureCalculator, GrossUp,
};
use crate::payments::{self, AmortizationSchedule, ExtraPaymentResult};
use crate::types::{LoanTerms, QuoteId};

/// annuity installment, unrounded
pub fn compute_annuity_payment(principal: Money, annual_rate: Rate, term_months: u32) -> Money {
    payments::compute_payment(principal, annual_rate, term_months)
}

pub fn build_amortization_schedule(principal: Money, annual_rate: Rate, term_months: u32) -> AmortizationSchedule {
    payments::build_schedule(principal, annual_rate, term_months)
}

pub fn apply_extra_payment_reduce_term(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    extra_amount: Money,
) -> Result<ExtraPaymentResult> {
    payments::apply_extra_payment_reduce_term(principal, annual_rate, term_months, extra_amount)
}

/// fee breakdown under the default fee policy
pub fn compute_fee_breakdown(
    net_amount: Money,
    borrower_rate: Rate,
    term_months: u32,
    origination_fee_rate: Rate,
    service_charges: &ServiceChargeConfig,
) -> Result<FeeBreakdown> {
    FeeStructureCalculator::new(FeePolicy::default()).fee_breakdown(
        net_amount,
        borrower_rate,
        term_months,
        origination_fee_rate,
        service_charges,
        None,
    )
}

/// fee quote request as captured on a loan application form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeQuoteRequest {
    pub net_amount: Money,
    /// nominal annual borrower rate, in percent
    pub borrower_rate_percent: Decimal,
    pub term_months: u32,
    /// origination fee, in percent
    pub origination_fee_percent: Decimal,
    #[serde(default)]
    pub nominal_gross: Option<Money>,
}

/// result of a quoting call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub quote_id: QuoteId,
    pub created_at: DateTime<Utc>,
    pub terms: LoanTerms,
    pub schedule: AmortizationSchedule,
    pub fees: Option<FeeBreakdown>,
    pub bank_comparison: Option<BankComparison>,
}

impl LoanQuote {
    pub fn json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// validates inputs, runs the engines and records what it computed
pub struct LendingCalculator {
    config: LendingConfig,
    fees: FeeStructureCalculator,
}

impl LendingCalculator {
    pub fn new(config: LendingConfig) -> Result<Self> {
        config.validate()?;
        let fees = FeeStructureCalculator::new(config.fee_policy);
        Ok(Self { config, fees })
    }

    pub fn config(&self) -> &LendingConfig {
        &self.config
    }

    /// amortization schedule for a principal and a percentage rate
    pub fn quote_schedule(
        &self,
        principal: Money,
        annual_rate_percent: Decimal,
        term_months: u32,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<LoanQuote> {
        let quote_id = Uuid::new_v4();
        let terms = LoanTerms::from_percent(principal, annual_rate_percent, term_months)
            .map_err(|e| self.reject(quote_id, "schedule", e, time_provider, events))?;

        let schedule = AmortizationSchedule::generate(&terms);
        let created_at = time_provider.now();

        events.emit(Event::ScheduleBuilt {
            quote_id,
            principal: terms.principal,
            annual_rate: terms.annual_rate,
            term_months: terms.term_months,
            payment: schedule.payment,
            total_interest: schedule.total_interest,
            timestamp: created_at,
        });

        Ok(LoanQuote {
            quote_id,
            created_at,
            terms,
            schedule,
            fees: None,
            bank_comparison: None,
        })
    }

    /// extra principal payment with the installment held fixed
    pub fn quote_extra_payment(
        &self,
        principal: Money,
        annual_rate_percent: Decimal,
        term_months: u32,
        extra_amount: Money,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<ExtraPaymentResult> {
        let quote_id = Uuid::new_v4();
        let result = LoanTerms::from_percent(principal, annual_rate_percent, term_months).and_then(|terms| {
            payments::apply_extra_payment_reduce_term(terms.principal, terms.annual_rate, terms.term_months, extra_amount)
        });

        let result = result.map_err(|e| self.reject(quote_id, "extra_payment", e, time_provider, events))?;

        events.emit(Event::ExtraPaymentApplied {
            quote_id,
            extra_amount,
            original_months: result.original.term_months,
            new_months: result.new_months,
            interest_saved: result.interest_saved,
            timestamp: time_provider.now(),
        });

        Ok(result)
    }

    /// gross up, price and, when a bank offer is configured, compare
    pub fn quote_fees(
        &self,
        request: &FeeQuoteRequest,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<LoanQuote> {
        let quote_id = Uuid::new_v4();

        let priced = self.price(request);
        let (terms, schedule, gross_up, breakdown) =
            priced.map_err(|e| self.reject(quote_id, "fees", e, time_provider, events))?;
        let created_at = time_provider.now();

        events.emit(Event::FeeBreakdownComputed {
            quote_id,
            net_amount: gross_up.net_amount,
            gross_amount: gross_up.gross_amount,
            tier: gross_up.tier,
            total_payable: breakdown.total_payable,
            timestamp: created_at,
        });

        let bank_comparison = self.config.bank_offer.as_ref().map(|offer| {
            let comparison = compare_with_bank(&breakdown, offer);
            events.emit(Event::BankComparisonComputed {
                quote_id,
                bank_name: offer.name.clone(),
                total_payable_difference: comparison.total_payable_difference,
                timestamp: created_at,
            });
            comparison
        });

        Ok(LoanQuote {
            quote_id,
            created_at,
            terms,
            schedule,
            fees: Some(breakdown),
            bank_comparison,
        })
    }

    fn price(&self, request: &FeeQuoteRequest) -> Result<(LoanTerms, AmortizationSchedule, GrossUp, FeeBreakdown)> {
        let origination_fee_rate = Rate::from_percent(request.origination_fee_percent);
        let gross_up = self
            .fees
            .gross_from_net(request.net_amount, origination_fee_rate, request.nominal_gross)?;

        let terms = LoanTerms::from_percent(gross_up.gross_amount, request.borrower_rate_percent, request.term_months)?;
        let schedule = AmortizationSchedule::generate(&terms);
        let breakdown = breakdown_from_schedule(&gross_up, &schedule, &self.config.service_charges);

        Ok((terms, schedule, gross_up, breakdown))
    }

    fn reject(
        &self,
        quote_id: QuoteId,
        operation: &str,
        error: LendingError,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> LendingError {
        events.emit(Event::CalculationRejected {
            quote_id,
            operation: operation.to_string(),
            reason: error.to_string(),
            timestamp: time_provider.now(),
        });
        error
    }
}
