//! # valgroup
//!
//! Named, ordered validation groups for model types. A model type declares
//! its rules once; rules declared inside a group can then be checked on
//! their own, apart from the rest.
//!
//! ## Example
//!
//! ```rust,ignore
//! use valgroup::prelude::*;
//!
//! let mut validations = Validations::<Person>::new();
//!
//! // Global rules run on every full check.
//! validations.validates(presence_of("sex"));
//!
//! validations.group("first_name_group", |g| {
//!     g.validates(presence_of("first_name"));
//! })?;
//! validations.group("last_name_group", |g| {
//!     g.validates_with(
//!         presence_of("last_name"),
//!         RuleOptions::new().on(ValidationContext::Update),
//!     );
//! })?;
//!
//! let mut person = Person::default();
//! validations.valid(&mut person)?;                          // global + every group
//! validations.group_valid(&mut person, "first_name_group")?; // one group only
//!
//! validations.default_group_selector(|p: &Person| {
//!     if p.sex.as_deref() == Some("Male") { Some("first_name_group") } else { None }
//! });
//! ```
//!
//! ## Group selection
//!
//! - Explicit names passed to [`Validations::groups_valid`] run as given.
//! - Otherwise the default group selector decides; it may return a name, a
//!   list of names, `"all"`, `"global"` or nothing.
//! - Without a selector, `all` runs: the global rules first, then every
//!   group in declaration order.
//!
//! ## Errors
//!
//! Rules write into the record's [`ErrorList`]; a check returns `Ok(false)`
//! when anything was recorded. `Err(GroupError)` is reserved for misuse such
//! as checking a group that was never declared.

mod chain;
mod context;
mod error;
mod error_list;
mod executor;
mod group;
mod model;
mod recorder;
mod registry;
mod rule;
mod selector;
mod validations;


pub use chain::CallbackChain;
pub use context::{ContextScope, ValidationContext};
pub use error::{GroupError, Result};
pub use error_list::{AttributeError, ErrorList};
pub use executor::{CheckOptions, GroupExecutor};
pub use group::{GroupName, GroupSelection};
pub use model::Model;
pub use recorder::{DirectScope, GroupScope};
pub use registry::GroupRegistry;
pub use rule::{Condition, Rule, RuleArgs, RuleInvocation, RuleOptions};
pub use selector::{expand, select_groups, DefaultGroupSelector};
pub use validations::Validations;

/// Prelude module for grouped validations
pub mod prelude {
    pub use crate::context::ValidationContext;
    pub use crate::error::GroupError;
    pub use crate::error_list::{AttributeError, ErrorList};
    pub use crate::executor::CheckOptions;
    pub use crate::group::{GroupName, GroupSelection};
    pub use crate::model::Model;
    pub use crate::recorder::GroupScope;
    pub use crate::rule::{Rule, RuleArgs, RuleOptions};
    pub use crate::validations::Validations;
}
