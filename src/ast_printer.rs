//! Parenthesized, Lisp-style rendering of expression trees.
//!
//! Exists for the CLI `parse` subcommand and for tests that assert on the
//! exact shape the parser produced.  Being a separate exhaustive `match`
//! over [`Expr`], it also keeps the node types honest as pure data.

use crate::expr::{Expr, LiteralValue};

pub struct AstPrinter;

impl AstPrinter {
    pub fn print(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal { value, .. } => match value {
                LiteralValue::Number(n) => {
                    if n.fract() == 0.0 && n.is_finite() {
                        format!("{:.1}", n)
                    } else {
                        n.to_string()
                    }
                }

                LiteralValue::Str(s) => s.clone(),

                LiteralValue::True => "true".to_string(),

                LiteralValue::False => "false".to_string(),

                LiteralValue::Nil => "nil".to_string(),
            },

            Expr::Unary { operator, right } => {
                format!("({} {})", operator.lexeme, self.print(right))
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => format!(
                "({} {} {})",
                operator.lexeme,
                self.print(left),
                self.print(right)
            ),

            Expr::Ternary {
                condition,
                on_true,
                on_false,
            } => format!(
                "(?: {} {} {})",
                self.print(condition),
                self.print(on_true),
                self.print(on_false)
            ),

            Expr::Grouping(inner) => format!("(group {})", self.print(inner)),

            Expr::Variable { name, .. } => name.lexeme.clone(),

            Expr::Assign { name, value, .. } => {
                format!("(= {} {})", name.lexeme, self.print(value))
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => format!(
                "({} {} {})",
                operator.lexeme,
                self.print(left),
                self.print(right)
            ),

            Expr::Call {
                callee, arguments, ..
            } => {
                let mut out = format!("(call {}", self.print(callee));

                for arg in arguments {
                    out.push(' ');
                    out.push_str(&self.print(arg));
                }

                out.push(')');
                out
            }

            Expr::Fn { params, .. } => {
                let names: Vec<&str> = params.iter().map(|p| p.lexeme.as_str()).collect();

                format!("(fn [{}])", names.join(" "))
            }

            Expr::Get { object, name } => {
                format!("(get {} {})", self.print(object), name.lexeme)
            }

            Expr::Set {
                object,
                name,
                value,
            } => format!(
                "(set {} {} {})",
                self.print(object),
                name.lexeme,
                self.print(value)
            ),

            Expr::SelfRef { .. } => "self".to_string(),
        }
    }
}
