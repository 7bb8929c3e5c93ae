//! Composable boolean expressions for WHERE, HAVING and JOIN conditions.
//!
//! An [`Expr`] renders to SQL text through [`fmt::Display`]; builders lex that
//! text like any other fragment. Operands are taken as SQL text too, so string
//! values must be quoted with [`Expr::string`] and placeholders written as
//! `?`, `?N` or `:name`.

use crate::escape::quote_doubling;
use std::fmt;

/// Expression node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// All conditions must hold.
    And(Vec<Expr>),

    /// At least one condition must hold.
    Or(Vec<Expr>),

    Not(Box<Expr>),

    /// `left op right`
    Compare {
        left: String,
        op: &'static str,
        right: String,
    },

    /// `operand IS [NOT] NULL`
    NullCheck { operand: String, is_null: bool },

    /// `operand [NOT] IN (a, b, ...)`
    InList {
        operand: String,
        values: Vec<String>,
        negated: bool,
    },

    /// `operand [NOT] BETWEEN low AND high`
    Between {
        operand: String,
        low: String,
        high: String,
        negated: bool,
    },

    /// SQL text used as is.
    Raw(String),

    /// Always true (empty `NOT IN` lists, empty AND groups).
    True,

    /// Always false (empty `IN` lists, empty OR groups).
    False,
}

impl Expr {
    pub fn and(exprs: Vec<Expr>) -> Self {
        Expr::And(exprs)
    }

    pub fn or(exprs: Vec<Expr>) -> Self {
        Expr::Or(exprs)
    }

    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    /// A standard string literal: `O'Brien` becomes `'O''Brien'`.
    pub fn string(value: &str) -> Self {
        Expr::Raw(quote_doubling(value, '\''))
    }

    fn compare(left: impl fmt::Display, op: &'static str, right: impl fmt::Display) -> Self {
        Expr::Compare {
            left: left.to_string(),
            op,
            right: right.to_string(),
        }
    }

    pub fn eq(left: impl fmt::Display, right: impl fmt::Display) -> Self {
        Self::compare(left, "=", right)
    }

    pub fn ne(left: impl fmt::Display, right: impl fmt::Display) -> Self {
        Self::compare(left, "<>", right)
    }

    pub fn gt(left: impl fmt::Display, right: impl fmt::Display) -> Self {
        Self::compare(left, ">", right)
    }

    pub fn gte(left: impl fmt::Display, right: impl fmt::Display) -> Self {
        Self::compare(left, ">=", right)
    }

    pub fn lt(left: impl fmt::Display, right: impl fmt::Display) -> Self {
        Self::compare(left, "<", right)
    }

    pub fn lte(left: impl fmt::Display, right: impl fmt::Display) -> Self {
        Self::compare(left, "<=", right)
    }

    pub fn like(left: impl fmt::Display, pattern: impl fmt::Display) -> Self {
        Self::compare(left, "LIKE", pattern)
    }

    /// Case-insensitive `LIKE`; dialects without `ILIKE` rewrite it.
    pub fn ilike(left: impl fmt::Display, pattern: impl fmt::Display) -> Self {
        Self::compare(left, "ILIKE", pattern)
    }

    pub fn is_null(operand: impl fmt::Display) -> Self {
        Expr::NullCheck {
            operand: operand.to_string(),
            is_null: true,
        }
    }

    pub fn is_not_null(operand: impl fmt::Display) -> Self {
        Expr::NullCheck {
            operand: operand.to_string(),
            is_null: false,
        }
    }

    /// `operand IN (...)`; an empty list is always false.
    pub fn in_list<T: fmt::Display>(operand: impl fmt::Display, values: impl IntoIterator<Item = T>) -> Self {
        Self::list(operand, values, false)
    }

    /// `operand NOT IN (...)`; an empty list is always true.
    pub fn not_in<T: fmt::Display>(operand: impl fmt::Display, values: impl IntoIterator<Item = T>) -> Self {
        Self::list(operand, values, true)
    }

    fn list<T: fmt::Display>(
        operand: impl fmt::Display,
        values: impl IntoIterator<Item = T>,
        negated: bool,
    ) -> Self {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        if values.is_empty() {
            return if negated { Expr::True } else { Expr::False };
        }
        Expr::InList {
            operand: operand.to_string(),
            values,
            negated,
        }
    }

    pub fn between(operand: impl fmt::Display, low: impl fmt::Display, high: impl fmt::Display) -> Self {
        Expr::Between {
            operand: operand.to_string(),
            low: low.to_string(),
            high: high.to_string(),
            negated: false,
        }
    }

    pub fn not_between(
        operand: impl fmt::Display,
        low: impl fmt::Display,
        high: impl fmt::Display,
    ) -> Self {
        Expr::Between {
            operand: operand.to_string(),
            low: low.to_string(),
            high: high.to_string(),
            negated: true,
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, exprs: &[Expr], connective: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            write!(f, " {connective} ")?;
        }
        write!(f, "{expr}")?;
    }
    f.write_str(")")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::And(exprs) if exprs.is_empty() => Expr::True.fmt(f),
            Expr::Or(exprs) if exprs.is_empty() => Expr::False.fmt(f),
            Expr::And(exprs) => write_group(f, exprs, "AND"),
            Expr::Or(exprs) => write_group(f, exprs, "OR"),
            Expr::Not(inner) => write!(f, "NOT ({inner})"),
            Expr::Compare { left, op, right } => write!(f, "{left} {op} {right}"),
            Expr::NullCheck { operand, is_null } => {
                let not = if *is_null { "" } else { "NOT " };
                write!(f, "{operand} IS {not}NULL")
            }
            Expr::InList {
                operand,
                values,
                negated,
            } => {
                let not = if *negated { "NOT " } else { "" };
                write!(f, "{operand} {not}IN ({})", values.join(", "))
            }
            Expr::Between {
                operand,
                low,
                high,
                negated,
            } => {
                let not = if *negated { "NOT " } else { "" };
                write!(f, "{operand} {not}BETWEEN {low} AND {high}")
            }
            Expr::Raw(sql) => f.write_str(sql),
            Expr::True => f.write_str("1 = 1"),
            Expr::False => f.write_str("1 = 0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons() {
        assert_eq!(Expr::eq("id", 1).to_string(), "id = 1");
        assert_eq!(Expr::ne("id", "?").to_string(), "id <> ?");
        assert_eq!(Expr::lte("age", ":max").to_string(), "age <= :max");
        assert_eq!(
            Expr::like("name", Expr::string("O'B%")).to_string(),
            "name LIKE 'O''B%'"
        );
    }

    #[test]
    fn groups_nest_with_parentheses() {
        let expr = Expr::and(vec![
            Expr::eq("a", 1),
            Expr::or(vec![Expr::is_null("b"), Expr::gt("c", 2)]),
            Expr::not(Expr::between("d", 1, 9)),
        ]);
        assert_eq!(
            expr.to_string(),
            "(a = 1 AND (b IS NULL OR c > 2) AND NOT (d BETWEEN 1 AND 9))"
        );
    }

    #[test]
    fn empty_lists_collapse() {
        assert_eq!(Expr::in_list("id", Vec::<i32>::new()), Expr::False);
        assert_eq!(Expr::not_in("id", Vec::<i32>::new()), Expr::True);
        assert_eq!(Expr::and(vec![]).to_string(), "1 = 1");
        assert_eq!(Expr::or(vec![]).to_string(), "1 = 0");
        assert_eq!(Expr::in_list("id", [1, 2, 3]).to_string(), "id IN (1, 2, 3)");
    }

    #[test]
    fn null_checks() {
        assert_eq!(Expr::is_not_null("deleted_at").to_string(), "deleted_at IS NOT NULL");
        assert_eq!(
            Expr::not_between("n", 1, 2).to_string(),
            "n NOT BETWEEN 1 AND 2"
        );
    }
}
