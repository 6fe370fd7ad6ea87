mod error;
mod record;
mod rule;
mod ruleset;
mod session;
mod state;
mod widget;

pub use error::{ClassifyError, RulesetError};
pub use record::StateRecord;
pub use rule::{ParamChange, Rule};
pub use ruleset::Ruleset;
pub use session::EditSession;
pub use state::{State, StateRegistry};
pub use widget::{Widget, WidgetSelection};
