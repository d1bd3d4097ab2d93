//! Layout containers and the pure distribution function behind them.

pub mod distribute;
pub mod container;
pub mod form;

pub use container::BoxLayout;
pub use distribute::{distribute, shares, Share};
pub use form::{FormLayout, FormRow};
