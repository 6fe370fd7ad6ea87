use crate::warnings::WarningSink;
use crate::StateRegistry;

/// Turns destination names typed by the author into state ids.
///
/// The terminal marker always resolves, whatever the registry holds. Other
/// names are matched against state display names in registry order.
pub struct DestinationResolver<'a> {
    states: &'a StateRegistry,
    terminal: &'a str,
    warnings: &'a dyn WarningSink,
}

impl<'a> DestinationResolver<'a> {
    #[must_use]
    pub fn new(states: &'a StateRegistry, terminal: &'a str, warnings: &'a dyn WarningSink) -> Self {
        Self {
            states,
            terminal,
            warnings,
        }
    }

    /// Resolve `name` to a state id, or to the terminal marker.
    ///
    /// Returns `None` for an empty or unknown name. Unless `suppress_warnings`
    /// is set, each failure adds exactly one warning.
    #[must_use]
    pub fn resolve(&self, name: &str, suppress_warnings: bool) -> Option<String> {
        if name.is_empty() {
            if !suppress_warnings {
                self.warnings.add_warning("Please choose a destination.");
            }
            return None;
        }

        if name.to_uppercase() == self.terminal.to_uppercase() {
            return Some(self.terminal.to_owned());
        }

        let mut matches = self.states.named(name);
        if let Some(state) = matches.next() {
            if matches.next().is_some() {
                log::debug!("destination name '{name}' is shared by several states; using {}", state.id);
            }
            return Some(state.id.clone());
        }

        if !suppress_warnings {
            self.warnings
                .add_warning(&format!("Invalid destination name: {name}"));
        }
        None
    }
}
