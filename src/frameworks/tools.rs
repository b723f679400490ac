//! @ai:module:intent Named tools that agents can call, plus the built-in calculator
//! @ai:module:layer domain
//! @ai:module:public_api Tool, ToolRegistry, calculator, evaluate_expression
//! @ai:module:stateless true

use crate::error::{AgentError, AgentResult};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

type ToolHandler = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// @ai:intent A named tool with a description and a string handler
#[derive(Clone)]
pub struct Tool {
    pub name: String,
    pub description: String,
    handler: ToolHandler,
}

impl Tool {
    /// @ai:intent Create a tool from a handler closure
    /// @ai:effects pure
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            handler: Arc::new(handler),
        }
    }

    /// @ai:intent Run the tool on its input
    /// @ai:effects pure
    pub fn call(&self, input: &str) -> String {
        (self.handler)(input)
    }

    /// @ai:intent Chat-completions function declaration for this tool
    /// @ai:effects pure
    pub fn function_spec(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": {
                    "type": "object",
                    "properties": {
                        "input": {"type": "string", "description": "Tool input"}
                    },
                    "required": ["input"]
                }
            }
        })
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// @ai:intent Ordered set of tools available to one agent
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    /// @ai:intent Create an empty registry
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Register a tool, replacing any tool with the same name
    /// @ai:effects state:write
    pub fn register(&mut self, tool: Tool) -> &mut Self {
        self.tools.retain(|t| t.name != tool.name);
        self.tools.push(tool);
        self
    }

    /// @ai:intent Builder form of register
    /// @ai:effects pure
    pub fn with(mut self, tool: Tool) -> Self {
        self.register(tool);
        self
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// @ai:intent Invoke a registered tool by name
    /// @ai:post unknown names yield AgentError::Tool
    /// @ai:effects pure
    pub fn call(&self, name: &str, input: &str) -> AgentResult<String> {
        self.get(name)
            .map(|tool| tool.call(input))
            .ok_or_else(|| AgentError::Tool {
                name: name.to_string(),
                message: "no such tool registered".to_string(),
            })
    }

    /// @ai:intent Text block listing the tools, appended to system prompts
    /// @ai:effects pure
    pub fn describe(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("- {}: {}", t.name, t.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// @ai:intent Function declarations for every tool
    /// @ai:effects pure
    pub fn function_specs(&self) -> Vec<Value> {
        self.tools.iter().map(Tool::function_spec).collect()
    }
}

/// @ai:intent The `calc` tool used by tool-enabled benchmark agents
/// @ai:post returns "Error" for input that is not a valid expression
/// @ai:effects pure
pub fn calculator() -> Tool {
    Tool::new("calc", "Calculate math expressions", |input| {
        evaluate_expression(input)
            .map(format_number)
            .unwrap_or_else(|| "Error".to_string())
    })
}

/// @ai:intent Format a result without a trailing ".0" for integral values
/// @ai:effects pure
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// @ai:intent Evaluate an arithmetic expression with + - * / and parentheses
/// @ai:post None on syntax errors, division by zero or non-finite results
/// @ai:effects pure
pub fn evaluate_expression(input: &str) -> Option<f64> {
    let mut parser = ExprParser {
        chars: input.chars().filter(|c| !c.is_whitespace()).collect(),
        pos: 0,
    };
    let value = parser.expr()?;
    (parser.pos == parser.chars.len() && value.is_finite()).then_some(value)
}

struct ExprParser {
    chars: Vec<char>,
    pos: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expr(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value += self.term()?;
            } else if self.eat('-') {
                value -= self.term()?;
            } else {
                return Some(value);
            }
        }
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.factor()?;
        loop {
            if self.eat('*') {
                value *= self.factor()?;
            } else if self.eat('/') {
                let divisor = self.factor()?;
                if divisor == 0.0 {
                    return None;
                }
                value /= divisor;
            } else {
                return Some(value);
            }
        }
    }

    fn factor(&mut self) -> Option<f64> {
        if self.eat('-') {
            return self.factor().map(|v| -v);
        }
        if self.eat('+') {
            return self.factor();
        }
        if self.eat('(') {
            let value = self.expr()?;
            return self.eat(')').then_some(value);
        }
        self.number()
    }

    fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .parse()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_and_parentheses() {
        assert_eq!(evaluate_expression("2+3*4"), Some(14.0));
        assert_eq!(evaluate_expression("(2+3)*4"), Some(20.0));
        assert_eq!(evaluate_expression("-(1 - 4) / 2"), Some(1.5));
    }

    #[test]
    fn test_invalid_expressions() {
        assert_eq!(evaluate_expression("2+"), None);
        assert_eq!(evaluate_expression("1/0"), None);
        assert_eq!(evaluate_expression("(1+2"), None);
        assert_eq!(evaluate_expression("import os"), None);
        assert_eq!(evaluate_expression(""), None);
    }

    #[test]
    fn test_calculator_output() {
        let calc = calculator();
        assert_eq!(calc.call("2+2"), "4");
        assert_eq!(calc.call("7/2"), "3.5");
        assert_eq!(calc.call("two plus two"), "Error");
    }

    #[test]
    fn test_registry_replaces_and_describes() {
        let mut registry = ToolRegistry::new();
        registry.register(calculator());
        registry.register(Tool::new("echo", "Echo input", |s| s.to_string()));
        registry.register(Tool::new("echo", "Echo input loudly", |s| s.to_uppercase()));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.call("echo", "hi").unwrap(), "HI");
        assert!(registry.describe().contains("- calc: Calculate math expressions"));
        assert!(registry.call("missing", "x").is_err());
        assert_eq!(registry.function_specs()[0]["function"]["name"], "calc");
    }
}
