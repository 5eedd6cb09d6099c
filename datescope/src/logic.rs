use crate::predicate::Predicate;

/// Logical conjunction of two clauses.
pub(crate) fn and(lhs: Predicate, rhs: Predicate) -> Predicate {
    let mut clauses = flatten(lhs);
    clauses.extend(flatten(rhs));
    Predicate::And(clauses)
}

/// Conjunction of any number of clauses.
///
/// Yields `None` for no clauses and the clause itself for a single one.
pub(crate) fn conjunction(clause_iter: impl Iterator<Item = Predicate>) -> Option<Predicate> {
    let mut clauses: Vec<_> = clause_iter.flat_map(flatten).collect();
    match clauses.len() {
        0 => None,
        1 => clauses.pop(),
        _ => Some(Predicate::And(clauses)),
    }
}

fn flatten(predicate: Predicate) -> Vec<Predicate> {
    match predicate {
        Predicate::And(clauses) => clauses.into_iter().flat_map(flatten).collect(),
        other => vec![other],
    }
}
