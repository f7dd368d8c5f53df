//! Static catalogue of option kinds.
//!
//! Every entry becomes one table (named after the slug) and one route tree
//! under `/api/<slug>`. Adding a kind means adding an entry here and a
//! migration that creates its table.

use serde::Serialize;

use crate::id::IdStrategy;

/// Declaration of one option kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OptionKind {
    /// Table name and URL segment.
    pub slug: &'static str,
    /// Human readable name used in messages and docs.
    pub title: &'static str,
    pub id_strategy: IdStrategy,
    pub description_required: bool,
}

impl OptionKind {
    const fn uuid(slug: &'static str, title: &'static str) -> Self {
        Self { slug, title, id_strategy: IdStrategy::Uuid, description_required: false }
    }

    const fn sequential(slug: &'static str, title: &'static str) -> Self {
        Self { slug, title, id_strategy: IdStrategy::Sequential, description_required: false }
    }

    const fn described(mut self) -> Self {
        self.description_required = true;
        self
    }

    pub fn table(&self) -> &'static str { self.slug }

    pub fn base_path(&self) -> String { format!("/api/{}", self.slug) }
}

pub static OPTION_KINDS: &[OptionKind] = &[
    OptionKind::uuid("execution_period_option", "Execution Period Option"),
    OptionKind::sequential("plan_status_option", "Plan Status Option"),
    OptionKind::uuid("business_type_option", "Business Type Option"),
    OptionKind::uuid("tender_status_option", "Tender Status Option"),
    OptionKind::sequential("gender_option", "Gender Option"),
    OptionKind::uuid("procurement_method_option", "Procurement Method Option").described(),
    OptionKind::uuid("procurement_category_option", "Procurement Category Option"),
    OptionKind::uuid("contract_type_option", "Contract Type Option").described(),
    OptionKind::uuid("contract_status_option", "Contract Status Option"),
    OptionKind::uuid("award_status_option", "Award Status Option"),
    OptionKind::uuid("bid_status_option", "Bid Status Option"),
    OptionKind::uuid("bid_security_type_option", "Bid Security Type Option"),
    OptionKind::uuid("evaluation_method_option", "Evaluation Method Option").described(),
    OptionKind::uuid("evaluation_criteria_option", "Evaluation Criteria Option"),
    OptionKind::uuid("funding_source_option", "Funding Source Option"),
    OptionKind::uuid("currency_option", "Currency Option"),
    OptionKind::uuid("unit_of_measure_option", "Unit Of Measure Option"),
    OptionKind::uuid("payment_term_option", "Payment Term Option").described(),
    OptionKind::uuid("payment_status_option", "Payment Status Option"),
    OptionKind::uuid("delivery_term_option", "Delivery Term Option"),
    OptionKind::uuid("document_type_option", "Document Type Option"),
    OptionKind::uuid("document_status_option", "Document Status Option"),
    OptionKind::uuid("organization_type_option", "Organization Type Option"),
    OptionKind::uuid("ownership_type_option", "Ownership Type Option"),
    OptionKind::uuid("supplier_category_option", "Supplier Category Option"),
    OptionKind::uuid("supplier_status_option", "Supplier Status Option"),
    OptionKind::uuid("registration_status_option", "Registration Status Option"),
    OptionKind::sequential("marital_status_option", "Marital Status Option"),
    OptionKind::uuid("nationality_option", "Nationality Option"),
    OptionKind::uuid("region_option", "Region Option"),
    OptionKind::uuid("budget_type_option", "Budget Type Option"),
    OptionKind::uuid("budget_year_option", "Budget Year Option"),
    OptionKind::uuid("fiscal_period_option", "Fiscal Period Option"),
    OptionKind::uuid("plan_type_option", "Plan Type Option"),
    OptionKind::uuid("priority_level_option", "Priority Level Option"),
    OptionKind::uuid("risk_level_option", "Risk Level Option").described(),
    OptionKind::uuid("complaint_type_option", "Complaint Type Option"),
    OptionKind::uuid("complaint_status_option", "Complaint Status Option"),
    OptionKind::uuid("approval_status_option", "Approval Status Option"),
    OptionKind::uuid("notification_type_option", "Notification Type Option"),
];

pub fn find(slug: &str) -> Option<&'static OptionKind> {
    OPTION_KINDS.iter().find(|k| k.slug == slug)
}
