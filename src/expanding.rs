use crate::error_handling::*;
use crate::scanning::*;

use tracing::{debug, trace};

/// Number of substitutions after which expansion is treated as runaway.
pub const EXPANSION_LIMIT: usize = 100;

/// A single-parameter text template. The body is kept wrapped in parentheses so
/// that an expanded call behaves as one operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    pub name: String,
    pub parameter: String,
    body: String,
}

impl Macro {
    pub fn new(name: &str, parameter: &str, body: &str) -> Self {
        Self{name: name.into(), parameter: parameter.into(), body: format!("({body})")}
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Rewrites the first call of this macro in `text`, or returns `None` if
    /// there is no call.
    fn expand_first(&self, text: &str) -> Result<Option<String>> {
        let Some(start) = find_call(text, &self.name) else {
            return Ok(None);
        };
        let open = start + self.name.len();
        let close = find_closing(text, open)
            .ok_or_else(|| CalcError::unclosed_macro_call(self.name.clone()))?;

        let argument = &text[open + 1..close];
        let replacement = replace_identifier(&self.body, &self.parameter, argument);
        trace!(name = %self.name, argument, %replacement, "expanding call");

        Ok(Some(format!("{}{}{}", &text[..start], replacement, &text[close + 1..])))
    }
}

/// Macros in definition order. Redefining a macro keeps its original slot.
#[derive(Debug, Default, Clone)]
pub struct MacroStore {
    macros: Vec<Macro>,
}

impl MacroStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &str, parameter: &str, body: &str) {
        let definition = Macro::new(name, parameter, body);
        debug!(name, parameter, body = %definition.body, "defining macro");
        match self.macros.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => *existing = definition,
            None => self.macros.push(definition),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Macro> {
        self.macros.iter().find(|definition| definition.name == name)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    pub fn clear(&mut self) {
        self.macros.clear();
    }

    /// Substitutes macro calls in `text` until none are left.
    ///
    /// Each pass rewrites the first call of every macro, in definition order.
    /// Fails once more than [`EXPANSION_LIMIT`] substitutions have been made,
    /// which is what self-referencing macros run into.
    pub fn expand(&self, text: &str) -> Result<String> {
        let mut text = text.to_string();
        let mut substitutions = 0;
        let mut changed = true;
        while changed {
            changed = false;
            for definition in &self.macros {
                if let Some(expanded) = definition.expand_first(&text)? {
                    text = expanded;
                    substitutions += 1;
                    changed = true;
                }
            }
            if substitutions > EXPANSION_LIMIT {
                return Err(CalcError::recursion_limit(EXPANSION_LIMIT));
            }
        }
        if substitutions > 0 {
            debug!(substitutions, %text, "expanded macros");
        }
        Ok(text)
    }
}
