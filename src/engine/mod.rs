pub mod assignment;
pub mod eligibility;
pub mod scoring;
pub mod zone;
