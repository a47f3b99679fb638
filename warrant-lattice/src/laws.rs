//! Generic semilattice law checks.
//!
//! Every check is parameterized over the binary operation, the sample set and
//! the equality predicate, and returns pass/fail plus the first failing case.

use serde::{Deserialize, Serialize};

use crate::pairs::LatticePair;

/// The algebraic laws a bounded lattice must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Law {
    /// `(a ∘ b) ∘ c = a ∘ (b ∘ c)`
    Associativity,
    /// `a ∘ b = b ∘ a`
    Commutativity,
    /// `a ∘ a = a`
    Idempotence,
    /// `a ∧ ⊤ = a`, `a ∨ ⊥ = a`
    Identity,
    /// `a ∧ (a ∨ b) = a`, `a ∨ (a ∧ b) = a`
    Absorption,
}

impl Law {
    pub const ALL: [Law; 5] = [
        Self::Associativity,
        Self::Commutativity,
        Self::Idempotence,
        Self::Identity,
        Self::Absorption,
    ];
}

/// Which operation of the pair a check exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Meet,
    Join,
}

/// The first sample combination that broke a law.
#[derive(Debug, Clone, PartialEq)]
pub struct Counterexample<T> {
    pub a: T,
    pub b: Option<T>,
    pub c: Option<T>,
    /// Left-hand side of the law as computed.
    pub left: T,
    /// Right-hand side of the law as computed.
    pub right: T,
}

/// Outcome of checking one law for one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct LawCheck<T> {
    pub law: Law,
    pub operation: Operation,
    pub passed: bool,
    pub cases_checked: usize,
    pub counterexample: Option<Counterexample<T>>,
}

impl<T> LawCheck<T> {
    fn pass(law: Law, operation: Operation, cases_checked: usize) -> Self {
        Self {
            law,
            operation,
            passed: true,
            cases_checked,
            counterexample: None,
        }
    }

    fn fail(
        law: Law,
        operation: Operation,
        cases_checked: usize,
        counterexample: Counterexample<T>,
    ) -> Self {
        Self {
            law,
            operation,
            passed: false,
            cases_checked,
            counterexample: Some(counterexample),
        }
    }
}

/// `(a ∘ b) ∘ c = a ∘ (b ∘ c)` for every triple of samples.
pub fn check_associativity<T, F, E>(
    operation: Operation,
    op: F,
    samples: &[T],
    eq: E,
) -> LawCheck<T>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
    E: Fn(&T, &T) -> bool,
{
    let mut cases = 0;
    for a in samples {
        for b in samples {
            let ab = op(a, b);
            for c in samples {
                cases += 1;
                let left = op(&ab, c);
                let right = op(a, &op(b, c));
                if !eq(&left, &right) {
                    return LawCheck::fail(
                        Law::Associativity,
                        operation,
                        cases,
                        Counterexample {
                            a: a.clone(),
                            b: Some(b.clone()),
                            c: Some(c.clone()),
                            left,
                            right,
                        },
                    );
                }
            }
        }
    }
    LawCheck::pass(Law::Associativity, operation, cases)
}

/// `a ∘ b = b ∘ a` for every pair of samples.
pub fn check_commutativity<T, F, E>(
    operation: Operation,
    op: F,
    samples: &[T],
    eq: E,
) -> LawCheck<T>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
    E: Fn(&T, &T) -> bool,
{
    let mut cases = 0;
    for a in samples {
        for b in samples {
            cases += 1;
            let left = op(a, b);
            let right = op(b, a);
            if !eq(&left, &right) {
                return LawCheck::fail(
                    Law::Commutativity,
                    operation,
                    cases,
                    Counterexample {
                        a: a.clone(),
                        b: Some(b.clone()),
                        c: None,
                        left,
                        right,
                    },
                );
            }
        }
    }
    LawCheck::pass(Law::Commutativity, operation, cases)
}

/// `a ∘ a = a` for every sample.
pub fn check_idempotence<T, F, E>(
    operation: Operation,
    op: F,
    samples: &[T],
    eq: E,
) -> LawCheck<T>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
    E: Fn(&T, &T) -> bool,
{
    for (i, a) in samples.iter().enumerate() {
        let left = op(a, a);
        if !eq(&left, a) {
            return LawCheck::fail(
                Law::Idempotence,
                operation,
                i + 1,
                Counterexample {
                    a: a.clone(),
                    b: None,
                    c: None,
                    left,
                    right: a.clone(),
                },
            );
        }
    }
    LawCheck::pass(Law::Idempotence, operation, samples.len())
}

/// `a ∘ e = a` for every sample, where `e` is the operation's identity.
pub fn check_identity<T, F, E>(
    operation: Operation,
    op: F,
    identity: &T,
    samples: &[T],
    eq: E,
) -> LawCheck<T>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
    E: Fn(&T, &T) -> bool,
{
    for (i, a) in samples.iter().enumerate() {
        let left = op(a, identity);
        if !eq(&left, a) {
            return LawCheck::fail(
                Law::Identity,
                operation,
                i + 1,
                Counterexample {
                    a: a.clone(),
                    b: Some(identity.clone()),
                    c: None,
                    left,
                    right: a.clone(),
                },
            );
        }
    }
    LawCheck::pass(Law::Identity, operation, samples.len())
}

/// `outer(a, inner(a, b)) = a` for every pair of samples.
///
/// `operation` names the outer operation: `Meet` checks `a ∧ (a ∨ b) = a`.
pub fn check_absorption<T, O, I, E>(
    operation: Operation,
    outer: O,
    inner: I,
    samples: &[T],
    eq: E,
) -> LawCheck<T>
where
    T: Clone,
    O: Fn(&T, &T) -> T,
    I: Fn(&T, &T) -> T,
    E: Fn(&T, &T) -> bool,
{
    let mut cases = 0;
    for a in samples {
        for b in samples {
            cases += 1;
            let left = outer(a, &inner(a, b));
            if !eq(&left, a) {
                return LawCheck::fail(
                    Law::Absorption,
                    operation,
                    cases,
                    Counterexample {
                        a: a.clone(),
                        b: Some(b.clone()),
                        c: None,
                        left,
                        right: a.clone(),
                    },
                );
            }
        }
    }
    LawCheck::pass(Law::Absorption, operation, cases)
}

/// All checks for one lattice pair.
#[derive(Debug, Clone)]
pub struct LawReport<T> {
    pub pair: String,
    pub checks: Vec<LawCheck<T>>,
}

impl<T> LawReport<T> {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &LawCheck<T>> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// The check for `law` on `operation`, if it ran.
    pub fn get(&self, law: Law, operation: Operation) -> Option<&LawCheck<T>> {
        self.checks
            .iter()
            .find(|c| c.law == law && c.operation == operation)
    }
}

type EqFn<'a, T> = Box<dyn Fn(&T, &T) -> bool + 'a>;

/// Runs every law against a [`LatticePair`] and a sample set.
pub struct LawChecker<'a, T, L: LatticePair<T>> {
    pair: &'a L,
    samples: &'a [T],
    eq: EqFn<'a, T>,
}

impl<'a, T: Clone, L: LatticePair<T>> LawChecker<'a, T, L> {
    /// Use the pair's own equivalence predicate.
    pub fn new(pair: &'a L, samples: &'a [T]) -> Self {
        Self {
            pair,
            samples,
            eq: Box::new(move |a: &T, b: &T| pair.equivalent(a, b)),
        }
    }

    /// Override the equality predicate.
    pub fn with_equality<E>(mut self, eq: E) -> Self
    where
        E: Fn(&T, &T) -> bool + 'a,
    {
        self.eq = Box::new(eq);
        self
    }

    pub fn check(&self, law: Law) -> Vec<LawCheck<T>> {
        let pair = self.pair;
        let meet = |a: &T, b: &T| pair.meet(a, b);
        let join = |a: &T, b: &T| pair.join(a, b);
        let eq = |a: &T, b: &T| (self.eq)(a, b);
        match law {
            Law::Associativity => vec![
                check_associativity(Operation::Meet, meet, self.samples, eq),
                check_associativity(Operation::Join, join, self.samples, eq),
            ],
            Law::Commutativity => vec![
                check_commutativity(Operation::Meet, meet, self.samples, eq),
                check_commutativity(Operation::Join, join, self.samples, eq),
            ],
            Law::Idempotence => vec![
                check_idempotence(Operation::Meet, meet, self.samples, eq),
                check_idempotence(Operation::Join, join, self.samples, eq),
            ],
            Law::Identity => vec![
                check_identity(Operation::Meet, meet, &pair.top(), self.samples, eq),
                check_identity(Operation::Join, join, &pair.bottom(), self.samples, eq),
            ],
            Law::Absorption => vec![
                check_absorption(Operation::Meet, meet, join, self.samples, eq),
                check_absorption(Operation::Join, join, meet, self.samples, eq),
            ],
        }
    }

    pub fn check_all(&self) -> LawReport<T> {
        LawReport {
            pair: self.pair.name().to_string(),
            checks: Law::ALL.iter().flat_map(|&law| self.check(law)).collect(),
        }
    }
}
