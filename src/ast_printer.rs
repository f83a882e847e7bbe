use crate::ast::{Expr, FunctionDecl, LiteralValue, Stmt};

/// Converts syntax trees to the Crafting‑Interpreters prefix form.
/// Debug aid only; nothing in the evaluation pipeline depends on it.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr) -> String {
        match expr {
            // ── literals ────────────────────────────────────────────────
            Expr::Literal(lit) => match lit {
                LiteralValue::Bool(b) => b.to_string(),

                LiteralValue::Nil => "nil".into(),

                LiteralValue::Str(s) => s.clone(),

                LiteralValue::Number(n) => {
                    if n.fract() == 0.0 {
                        // 3 → 3.0
                        format!("{:.1}", n)
                    } else {
                        n.to_string()
                    }
                }
            },

            // ── grouping ────────────────────────────────────────────────
            Expr::Grouping(inner) => format!("(group {})", Self::print(inner)),

            // ── operators ───────────────────────────────────────────────
            Expr::Unary { operator, right } => {
                format!("({} {})", operator.lexeme, Self::print(right))
            }

            Expr::Binary {
                left,
                operator,
                right,
            }
            | Expr::Logical {
                left,
                operator,
                right,
            } => format!(
                "({} {} {})",
                operator.lexeme,
                Self::print(left),
                Self::print(right)
            ),

            // ── names ───────────────────────────────────────────────────
            Expr::Variable { name, .. } => name.lexeme.clone(),

            Expr::Assign { name, value, .. } => {
                format!("(= {} {})", name.lexeme, Self::print(value))
            }

            Expr::This { .. } => "this".into(),

            Expr::Super { method, .. } => format!("(super {})", method.lexeme),

            // ── calls and properties ────────────────────────────────────
            Expr::Call {
                callee, arguments, ..
            } => {
                let mut s = format!("(call {}", Self::print(callee));
                for arg in arguments {
                    s.push(' ');
                    s.push_str(&Self::print(arg));
                }
                s.push(')');
                s
            }

            Expr::Get { object, name } => format!("(. {} {})", Self::print(object), name.lexeme),

            Expr::Set {
                object,
                name,
                value,
            } => format!(
                "(= (. {} {}) {})",
                Self::print(object),
                name.lexeme,
                Self::print(value)
            ),

            Expr::AnonymousFunction(decl) => Self::function("fun", decl),
        }
    }

    /// One line per statement, nested blocks inline.
    pub fn print_stmt(stmt: &Stmt) -> String {
        match stmt {
            Stmt::Block(statements) => {
                let mut s = String::from("(block");
                for inner in statements {
                    s.push(' ');
                    s.push_str(&Self::print_stmt(inner));
                }
                s.push(')');
                s
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => {
                let mut s = format!("(class {}", name.lexeme);
                if let Some(superclass) = superclass {
                    s.push_str(&format!(" < {}", Self::print(superclass)));
                }
                for method in methods {
                    s.push(' ');
                    s.push_str(&Self::function("method", method));
                }
                s.push(')');
                s
            }

            Stmt::Break(_) => "(break)".into(),

            Stmt::Expression(expr) => format!("(; {})", Self::print(expr)),

            Stmt::Function(decl) => Self::function("fun", decl),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => match else_branch {
                Some(else_branch) => format!(
                    "(if {} {} {})",
                    Self::print(condition),
                    Self::print_stmt(then_branch),
                    Self::print_stmt(else_branch)
                ),
                None => format!(
                    "(if {} {})",
                    Self::print(condition),
                    Self::print_stmt(then_branch)
                ),
            },

            Stmt::Print(expr) => format!("(print {})", Self::print(expr)),

            Stmt::Return { value, .. } => match value {
                Some(value) => format!("(return {})", Self::print(value)),
                None => "(return)".into(),
            },

            Stmt::Var { name, initializer } => match initializer {
                Some(init) => format!("(var {} {})", name.lexeme, Self::print(init)),
                None => format!("(var {})", name.lexeme),
            },

            Stmt::While { condition, body } => format!(
                "(while {} {})",
                Self::print(condition),
                Self::print_stmt(body)
            ),
        }
    }

    fn function(tag: &str, decl: &FunctionDecl) -> String {
        let name: &str = decl.name.as_ref().map_or("", |t| t.lexeme.as_str());
        let params: Vec<&str> = decl.params.iter().map(|p| p.lexeme.as_str()).collect();

        let mut s = if name.is_empty() {
            format!("({} ({})", tag, params.join(" "))
        } else {
            format!("({} {} ({})", tag, name, params.join(" "))
        };
        for stmt in &decl.body {
            s.push(' ');
            s.push_str(&Self::print_stmt(stmt));
        }
        s.push(')');
        s
    }
}
