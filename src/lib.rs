//! The trusted setup phase of the [`Groth16`] zkSNARK.
//!
//! Given a flattened rank-1 constraint system, [`Groth16::setup`] samples
//! one-time secret randomness (the *toxic waste*), evaluates the constraint
//! polynomials at the secret point, and produces the [`ProvingKey`] and
//! [`VerifyingKey`] consumed by a Groth16 prover and verifier.
//!
//! The crate is generic over [`Pairing`], so one instantiation per concrete
//! curve falls out of the type system.
//!
//! [`Groth16`]: https://eprint.iacr.org/2016/260.pdf
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(
    unused,
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_docs
)]
#![allow(clippy::many_single_char_names, clippy::op_ref)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate ark_std;

/// Data structures produced by the setup: the proving and verifying keys.
pub mod data_structures;

/// Error types for the setup.
pub mod error;

/// Generate the proving and verifying keys for the Groth16 zkSNARK construction.
pub mod generator;

/// The flattened constraint-system input consumed by the setup.
pub mod r1cs;


pub use self::data_structures::*;
pub use self::error::SetupError;
pub use self::generator::ToxicWaste;
pub use self::r1cs::{Constraint, R1cs, Term};

use ark_ec::pairing::Pairing;
use ark_std::marker::PhantomData;
use ark_std::rand::{CryptoRng, RngCore};

/// The trusted setup of the [[Groth16]](https://eprint.iacr.org/2016/260.pdf) zkSNARK.
pub struct Groth16<E: Pairing> {
    _p: PhantomData<E>,
}

impl<E: Pairing> Groth16<E> {
    /// Run the circuit-specific setup on `r1cs`, sampling fresh toxic waste
    /// from `rng`.
    ///
    /// The waste is scrubbed before this returns; only the keys survive.
    pub fn setup<R: RngCore + CryptoRng>(
        r1cs: &R1cs<E::ScalarField>,
        rng: &mut R,
    ) -> Result<(ProvingKey<E>, VerifyingKey<E>), SetupError> {
        let waste = ToxicWaste::sample(rng)?;
        Self::generate_keys(r1cs, &waste)
    }

    /// Run the setup with caller-supplied toxic waste.
    ///
    /// Anyone who knows the waste scalars can forge proofs for every key pair
    /// derived from them. This entry point exists for deterministic tests and
    /// for callers that produce the secrets through an external ceremony; it
    /// must never be fed known or low-entropy scalars in production.
    pub fn setup_with_trapdoor(
        r1cs: &R1cs<E::ScalarField>,
        waste: &ToxicWaste<E::ScalarField>,
    ) -> Result<(ProvingKey<E>, VerifyingKey<E>), SetupError> {
        Self::generate_keys(r1cs, waste)
    }

    /// Fill a proving key of the right shape for `r1cs` with copies of a
    /// single random point per group.
    ///
    /// Useful for benchmarking a prover without paying for a real setup. The
    /// result is not a valid key and must never stand in for one.
    pub fn dummy_setup<R: RngCore + CryptoRng>(
        r1cs: &R1cs<E::ScalarField>,
        rng: &mut R,
    ) -> Result<ProvingKey<E>, SetupError> {
        Self::generate_dummy_key(r1cs, rng)
    }
}
