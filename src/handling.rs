use crate::error_handling::*;
use crate::evaluating::*;
use crate::expanding::*;
use crate::parsing::*;
use crate::scanning::*;

use std::f64::consts;
use tracing::{debug, info};

const RESERVED: [&str; 3] = ["sin", "cos", "ln"];

/// Formats a result the way replies show it: whole numbers without a
/// fractional part, everything else in the shortest exact decimal form.
pub fn format_value(value: f64) -> String {
    if value.fract().abs() > EPSILON {
        return value.to_string();
    }
    let whole = value.trunc();
    if whole == 0.0 {
        // avoids printing "-0"
        "0".into()
    } else {
        whole.to_string()
    }
}

#[derive(Debug, PartialEq)]
struct MacroDefinition<'a> {
    name: &'a str,
    parameter: &'a str,
    body: &'a str,
}

#[derive(Debug, PartialEq)]
enum Request<'a> {
    assignment {
        name: &'a str,
        expression: &'a str,
    },
    expression(&'a str),
}

/// `$name(param)=body`
fn parse_macro_definition(input: &str) -> Option<MacroDefinition<'_>> {
    let rest = input.strip_prefix('$')?;
    let (head, body) = rest.split_once('=')?;
    let (name, parameter) = head.strip_suffix(')')?.split_once('(')?;
    let valid = is_identifier(name) && is_identifier(parameter)
        && !body.is_empty() && !body.contains(['=', '$']);
    valid.then_some(MacroDefinition{name, parameter, body})
}

/// `identifier=expression`, or a bare expression with no `=` at all.
fn classify(input: &str) -> Result<Request<'_>> {
    let Some((name, expression)) = input.split_once('=') else {
        return Ok(Request::expression(input));
    };
    let valid = is_identifier(name) && !RESERVED.contains(&name)
        && !expression.is_empty() && !expression.contains(['=', '$']);
    if valid {
        Ok(Request::assignment{name, expression})
    } else {
        Err(CalcError::incorrect_syntax(input.into()))
    }
}

/// One interactive calculator session: its variables, its macros, and the
/// counter behind generated `x<N>` names. Sessions share nothing.
#[derive(Debug)]
pub struct Session {
    variables: Variables,
    macros: MacroStore,
    next_index: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let mut session = Self{variables: Variables::new(), macros: MacroStore::new(), next_index: 0};
        session.set_constants();
        session
    }

    fn set_constants(&mut self) {
        self.variables.insert("Pi".into(), consts::PI);
        self.variables.insert("E".into(), consts::E);
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn macros(&self) -> &MacroStore {
        &self.macros
    }

    /// Drops every variable and macro, leaving only `Pi` and `E`.
    pub fn reset(&mut self) {
        self.variables.clear();
        self.macros.clear();
        self.next_index = 0;
        self.set_constants();
        info!("session reset");
    }

    fn generate_name(&mut self) -> String {
        while self.variables.contains_key(&format!("x{}", self.next_index)) {
            self.next_index += 1;
        }
        format!("x{}", self.next_index)
    }

    fn compute(&self, expression: &str) -> Result<f64> {
        let tree = parse(expression)?;
        evaluate(&tree, &self.variables)
    }

    fn store(&mut self, name: String, value: f64) -> String {
        debug!(%name, value, "storing result");
        let reply = format!("{name} = {}", format_value(value));
        self.variables.insert(name, value);
        reply
    }

    /// Handles one line of input and returns the reply to print.
    ///
    /// A failed request leaves the session exactly as it was.
    pub fn handle(&mut self, input: &str) -> Result<String> {
        let input = strip_whitespace(input);

        if input.starts_with('$') {
            let Some(MacroDefinition{name, parameter, body}) = parse_macro_definition(&input) else {
                return Err(CalcError::incorrect_syntax(input.clone()));
            };
            self.macros.define(name, parameter, body);
            return Ok(format!("${name}"));
        }

        let expanded = self.macros.expand(&input)?;
        let request = classify(&expanded)?;
        debug!(?request, "classified input");
        match request {
            Request::assignment{name, expression} => {
                let value = self.compute(expression)?;
                Ok(self.store(name.into(), value))
            },
            Request::expression(expression) => {
                let value = self.compute(expression)?;
                let name = self.generate_name();
                Ok(self.store(name, value))
            },
        }
    }
}
