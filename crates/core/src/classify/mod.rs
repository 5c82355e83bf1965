//! Account classification into report sections.
//!
//! Classification is a lookup against an ordered rule table; the first
//! rule whose predicates match decides the account's category.

pub mod classifier;
pub mod directives;
pub mod rules;
pub mod types;


pub use classifier::{AccountFacts, Classifier};
pub use directives::ReportClassDirectives;
pub use rules::{Predicate, Rule, RuleTable};
pub use types::{Category, Classification, Section};
