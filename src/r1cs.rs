//! Flattened rank-1 constraint systems.
//!
//! This is the interface the setup consumes from the (out-of-scope) circuit
//! compiler: a list of constraints `⟨L, w⟩ · ⟨R, w⟩ = ⟨O, w⟩` over sparse
//! linear combinations of wires. The wire index range is split in two:
//! private wires occupy the head `[0, nb_private_wires())`, public wires the
//! tail `[nb_private_wires(), nb_wires)`. One name per public wire, in tail
//! order, travels with the system and ends up in the verifying key.

use ark_ff::Field;
use ark_std::string::String;
use ark_std::vec::Vec;

use crate::SetupError;

/// A single product `coeff · wire` inside a sparse linear combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Term<F: Field> {
    /// Coefficient the wire value is scaled by.
    pub coeff: F,
    /// Index of the wire this term reads.
    pub wire: usize,
}

impl<F: Field> Term<F> {
    /// A term `coeff · wire`.
    pub fn new(coeff: F, wire: usize) -> Self {
        Self { coeff, wire }
    }

    /// Index of the wire this term references.
    pub fn wire_id(&self) -> usize {
        self.wire
    }
}

/// One rank-1 constraint `⟨L, w⟩ · ⟨R, w⟩ = ⟨O, w⟩`.
#[derive(Clone, Debug)]
pub struct Constraint<F: Field> {
    /// Left linear combination.
    pub l: Vec<Term<F>>,
    /// Right linear combination.
    pub r: Vec<Term<F>>,
    /// Output linear combination.
    pub o: Vec<Term<F>>,
}

/// A compiled, flattened constraint system.
///
/// The constraint count is `constraints.len()`; there is no separately
/// declared count to fall out of sync with the list.
#[derive(Clone, Debug)]
pub struct R1cs<F: Field> {
    /// Total number of wires (signals) in the circuit.
    pub nb_wires: usize,
    /// Number of public wires, positioned at the tail of the wire index range.
    pub nb_public_wires: usize,
    /// One name per public wire, in wire-index order.
    pub public_wires: Vec<String>,
    /// The ordered constraint list.
    pub constraints: Vec<Constraint<F>>,
}

impl<F: Field> R1cs<F> {
    /// Number of private wires; they occupy indices `[0, nb_private_wires())`.
    pub fn nb_private_wires(&self) -> usize {
        self.nb_wires - self.nb_public_wires
    }

    /// Number of constraints.
    pub fn nb_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Adds `term.coeff · lambda` into `acc`.
    pub fn add_term(&self, acc: &mut F, term: &Term<F>, lambda: F) {
        *acc += term.coeff * lambda;
    }

    /// Checks the structural well-formedness the setup relies on: every term
    /// references a declared wire, the public split fits inside the wire
    /// range, and the name list covers exactly the public wires.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.nb_public_wires > self.nb_wires {
            return Err(SetupError::PublicWiresExceedTotal {
                nb_public_wires: self.nb_public_wires,
                nb_wires: self.nb_wires,
            });
        }
        if self.public_wires.len() != self.nb_public_wires {
            return Err(SetupError::PublicNamesMismatch {
                names: self.public_wires.len(),
                nb_public_wires: self.nb_public_wires,
            });
        }
        for constraint in &self.constraints {
            for term in constraint
                .l
                .iter()
                .chain(constraint.r.iter())
                .chain(constraint.o.iter())
            {
                if term.wire >= self.nb_wires {
                    return Err(SetupError::WireOutOfBounds {
                        wire: term.wire,
                        nb_wires: self.nb_wires,
                    });
                }
            }
        }
        Ok(())
    }

    /// Evaluates every constraint under a full wire assignment.
    ///
    /// Panics if `assignment` does not assign every wire; call [`validate`]
    /// first on untrusted systems.
    ///
    /// [`validate`]: R1cs::validate
    pub fn is_satisfied(&self, assignment: &[F]) -> bool {
        assert_eq!(assignment.len(), self.nb_wires);
        self.constraints.iter().all(|c| {
            Self::eval_lc(&c.l, assignment) * Self::eval_lc(&c.r, assignment)
                == Self::eval_lc(&c.o, assignment)
        })
    }

    fn eval_lc(lc: &[Term<F>], assignment: &[F]) -> F {
        lc.iter()
            .map(|term| term.coeff * assignment[term.wire])
            .sum()
    }
}
