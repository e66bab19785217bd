//! The host-model collaborator.

use crate::context::ValidationContext;
use crate::error_list::ErrorList;

/// A record that can be validated through [`Validations`](crate::Validations).
///
/// The engine only needs three things from a model: somewhere to put errors,
/// whether it has been persisted (to infer `create` vs `update`), and a slot
/// for the current validation context that `on`-conditional rules read.
///
/// ## Example
///
/// ```rust,ignore
/// use valgroup::prelude::*;
///
/// #[derive(Default)]
/// struct Person {
///     first_name: Option<String>,
///     persisted: bool,
///     errors: ErrorList,
///     context: Option<ValidationContext>,
/// }
///
/// impl Model for Person {
///     fn errors(&self) -> &ErrorList { &self.errors }
///     fn errors_mut(&mut self) -> &mut ErrorList { &mut self.errors }
///     fn is_persisted(&self) -> bool { self.persisted }
///     fn validation_context(&self) -> Option<&ValidationContext> { self.context.as_ref() }
///     fn set_validation_context(&mut self, context: Option<ValidationContext>) {
///         self.context = context;
///     }
/// }
/// ```
pub trait Model {
    /// The record's error list.
    fn errors(&self) -> &ErrorList;

    /// Mutable access to the record's error list.
    fn errors_mut(&mut self) -> &mut ErrorList;

    /// Whether the record already exists in storage.
    fn is_persisted(&self) -> bool;

    /// The context of the check currently running, if any.
    fn validation_context(&self) -> Option<&ValidationContext>;

    /// Replace the current validation context.
    fn set_validation_context(&mut self, context: Option<ValidationContext>);

    /// Context used when a check is not given one explicitly.
    fn default_validation_context(&self) -> ValidationContext {
        ValidationContext::infer(self.is_persisted())
    }
}
