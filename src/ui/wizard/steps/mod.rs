//! One module per wizard step: form state, validate-and-merge transition,
//! and the step's rendering.

pub mod contract_amount;
pub mod contract_type;
pub mod payment_terms;
pub mod project_details;
pub mod review;
