use crate::builder::QueryBuilder;
use crate::database::Database;
use crate::expr::Expr;
use crate::logic;

/// A boolean condition that can be added to a query.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Eq(Expr, Expr),
    Gteq(Expr, Expr),
    Lteq(Expr, Expr),
    And(Vec<Predicate>),
}

impl Predicate {
    /// Logical conjunction, flattening nested `And`s.
    pub fn and(self, other: Predicate) -> Predicate {
        logic::and(self, other)
    }

    pub fn build_predicate<DB: Database>(&self, builder: &mut QueryBuilder<DB>) {
        match self {
            Self::Eq(lhs, rhs) => build_binary(builder, lhs, " = ", rhs),
            Self::Gteq(lhs, rhs) => build_binary(builder, lhs, " >= ", rhs),
            Self::Lteq(lhs, rhs) => build_binary(builder, lhs, " <= ", rhs),
            // AND is associative, so nested conjunctions need no parentheses.
            Self::And(clauses) => {
                for (index, clause) in clauses.iter().enumerate() {
                    if index > 0 {
                        builder.push(" AND ");
                    }
                    clause.build_predicate(builder);
                }
            }
        }
    }
}

fn build_binary<DB: Database>(builder: &mut QueryBuilder<DB>, lhs: &Expr, op: &str, rhs: &Expr) {
    lhs.build_expr(builder);
    builder.push(op);
    rhs.build_expr(builder);
}
