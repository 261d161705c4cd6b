use ark_ec::pairing::Pairing;
use ark_ec::scalar_mul::fixed_base::FixedBase;
use ark_ec::{AffineRepr, CurveGroup, Group};
use ark_ff::PrimeField;
use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};
use ark_std::rand::{CryptoRng, RngCore};
use ark_std::vec::Vec;
use zeroize::Zeroize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::r1cs::R1cs;
use crate::{Groth16, ProvingKey, SetupError, VerifyingKey};

type D<F> = Radix2EvaluationDomain<F>;

/// How many consecutive zero draws mark the randomness source as broken.
const MAX_ZERO_DRAWS: usize = 8;

/// The five secret scalars a setup is built from.
///
/// Knowledge of these values is sufficient to forge proofs for every key
/// pair derived from them, hence the name. The scalars are scrubbed when the
/// value is dropped; they must never be serialized or logged.
// `Debug` is implemented manually below (not derived) so that formatting a
// `ToxicWaste` never prints the secret scalars, in keeping with the "must
// never be serialized or logged" invariant above.
pub struct ToxicWaste<F: PrimeField> {
    /// `t` - the secret point the constraint polynomials are evaluated at.
    pub t: F,
    /// `α` trapdoor.
    pub alpha: F,
    /// `β` trapdoor.
    pub beta: F,
    /// `γ` trapdoor, dividing the public-wire K scalars.
    pub gamma: F,
    /// `δ` trapdoor, dividing the private-wire K and Z scalars.
    pub delta: F,
}

impl<F: PrimeField> core::fmt::Debug for ToxicWaste<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ToxicWaste").finish_non_exhaustive()
    }
}

impl<F: PrimeField> ToxicWaste<F> {
    /// Draws five independent uniform nonzero scalars from `rng`.
    pub fn sample<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, SetupError> {
        Ok(Self {
            t: Self::nonzero(rng)?,
            alpha: Self::nonzero(rng)?,
            beta: Self::nonzero(rng)?,
            gamma: Self::nonzero(rng)?,
            delta: Self::nonzero(rng)?,
        })
    }

    fn nonzero<R: RngCore + CryptoRng>(rng: &mut R) -> Result<F, SetupError> {
        for _ in 0..MAX_ZERO_DRAWS {
            let x = F::rand(rng);
            if !x.is_zero() {
                return Ok(x);
            }
        }
        Err(SetupError::EntropyUnavailable)
    }
}

impl<F: PrimeField> Zeroize for ToxicWaste<F> {
    fn zeroize(&mut self) {
        self.t = F::zero();
        self.alpha = F::zero();
        self.beta = F::zero();
        self.gamma = F::zero();
        self.delta = F::zero();
    }
}

impl<F: PrimeField> Drop for ToxicWaste<F> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<F: PrimeField, E> Groth16<E>
where
    E: Pairing<ScalarField = F>,
{
    pub(crate) fn generate_keys(
        r1cs: &R1cs<F>,
        waste: &ToxicWaste<F>,
    ) -> Result<(ProvingKey<E>, VerifyingKey<E>), SetupError> {
        let setup_time = start_timer!(|| "Groth16::Setup");

        r1cs.validate()?;

        let nb_wires = r1cs.nb_wires;
        let nb_public_wires = r1cs.nb_public_wires;
        let nb_private_wires = r1cs.nb_private_wires();
        let nb_constraints = r1cs.nb_constraints();

        let domain = D::new(nb_constraints).ok_or(SetupError::DomainTooLarge { nb_constraints })?;
        let n = domain.size();

        // t inside the domain would make a Lagrange denominator vanish.
        if domain.evaluate_vanishing_polynomial(waste.t).is_zero() {
            return Err(SetupError::DegenerateToxicWaste);
        }

        let abc_time = start_timer!(|| "Evaluating A(t), B(t), C(t)");
        let (a, b, c) = Self::setup_abc(r1cs, &domain, waste.t)?;
        end_timer!(abc_time);

        let scalars_time = start_timer!(|| "Building key scalars");
        let delta_inv = waste
            .delta
            .inverse()
            .ok_or(SetupError::DegenerateToxicWaste)?;
        let gamma_inv = waste
            .gamma
            .inverse()
            .ok_or(SetupError::DegenerateToxicWaste)?;

        // K scalars: (β·Aᵢ + α·Bᵢ + Cᵢ) over δ for the private wires at the
        // head of the index range, over γ for the public tail.
        let pk_k: Vec<F> = cfg_into_iter!(0..nb_private_wires)
            .map(|i| (waste.beta * a[i] + waste.alpha * b[i] + c[i]) * delta_inv)
            .collect();

        let vk_k: Vec<F> = (0..nb_public_wires)
            .map(|j| {
                let k = j + nb_private_wires;
                (waste.beta * a[k] + waste.alpha * b[k] + c[k]) * gamma_inv
            })
            .collect();

        // Z scalars: the geometric sequence (tⁿ − 1)·tᵏ/δ in natural order;
        // the points are reordered after the batch call.
        let mut zdt = domain.evaluate_vanishing_polynomial(waste.t) * delta_inv;
        let mut z = Vec::with_capacity(n);
        for _ in 0..n {
            z.push(zdt);
            zdt *= waste.t;
        }
        end_timer!(scalars_time);

        // One batch call per group. The G1 scalars are laid out as
        // [α, β, δ | A | B | pkK | Z | vkK] and the output points are sliced
        // back out by the same offsets.
        let mut g1_scalars =
            Vec::with_capacity(3 + 2 * nb_wires + nb_private_wires + n + nb_public_wires);
        g1_scalars.extend([waste.alpha, waste.beta, waste.delta]);
        g1_scalars.extend_from_slice(&a);
        g1_scalars.extend_from_slice(&b);
        g1_scalars.extend_from_slice(&pk_k);
        g1_scalars.extend_from_slice(&z);
        g1_scalars.extend_from_slice(&vk_k);

        let g1_time = start_timer!(|| "G1 batch scalar multiplication");
        let g1_points = Self::batch_mul::<E::G1>(E::G1::generator(), &g1_scalars);
        end_timer!(g1_time);

        let mut offset = 3;
        let a_g1 = g1_points[offset..offset + nb_wires].to_vec();
        offset += nb_wires;
        let b_g1 = g1_points[offset..offset + nb_wires].to_vec();
        offset += nb_wires;
        let k_g1 = g1_points[offset..offset + nb_private_wires].to_vec();
        offset += nb_private_wires;
        let mut z_g1 = g1_points[offset..offset + n].to_vec();
        bit_reverse(&mut z_g1);
        offset += n;
        let vk_k_g1 = g1_points[offset..].to_vec();

        // G2 scalars: [B | β, δ, γ].
        let mut g2_scalars = Vec::with_capacity(nb_wires + 3);
        g2_scalars.extend_from_slice(&b);
        g2_scalars.extend([waste.beta, waste.delta, waste.gamma]);

        let g2_time = start_timer!(|| "G2 batch scalar multiplication");
        let g2_points = Self::batch_mul::<E::G2>(E::G2::generator(), &g2_scalars);
        end_timer!(g2_time);

        let b_g2 = g2_points[..nb_wires].to_vec();
        let beta_g2 = g2_points[nb_wires];
        let delta_g2 = g2_points[nb_wires + 1];
        let gamma_g2 = g2_points[nb_wires + 2];

        let pairing_time = start_timer!(|| "Pairing e(α, β)");
        let e = E::final_exponentiation(E::miller_loop(g1_points[0], beta_g2)).ok_or(
            SetupError::CurveOperation("final exponentiation returned no result"),
        )?;
        end_timer!(pairing_time);

        let pk = ProvingKey {
            alpha_g1: g1_points[0],
            beta_g1: g1_points[1],
            delta_g1: g1_points[2],
            a_g1,
            b_g1,
            k_g1,
            z_g1,
            beta_g2,
            delta_g2,
            b_g2,
            domain,
        };
        let vk = VerifyingKey {
            e,
            gamma_neg_g2: (-gamma_g2.into_group()).into_affine(),
            delta_neg_g2: (-delta_g2.into_group()).into_affine(),
            k_g1: vk_k_g1,
            public_inputs: r1cs.public_wires.clone(),
        };

        end_timer!(setup_time);
        Ok((pk, vk))
    }

    /// Accumulates `coeff·Lᵢ(t)` into one slot per wire, where `Lᵢ` is the
    /// i-th Lagrange basis polynomial of `domain` and `i` runs over the
    /// constraints.
    ///
    /// `Lᵢ(t)` is stepped with the closed-form recurrence
    /// `L₀(t) = (tⁿ − 1)/(n·(t − 1))`,
    /// `Lᵢ₊₁(t) = Lᵢ(t)·ω·(t − ωⁱ)/(t − ωⁱ⁺¹)`,
    /// so the whole pass costs O(1) field operations per constraint instead
    /// of O(n).
    pub(crate) fn setup_abc(
        r1cs: &R1cs<F>,
        domain: &D<F>,
        t: F,
    ) -> Result<(Vec<F>, Vec<F>, Vec<F>), SetupError> {
        let nb_wires = r1cs.nb_wires;
        let mut a = ark_std::vec![F::zero(); nb_wires];
        let mut b = ark_std::vec![F::zero(); nb_wires];
        let mut c = ark_std::vec![F::zero(); nb_wires];

        let one = F::one();
        let w = domain.group_gen();

        let t_sub_one_inv = (t - one)
            .inverse()
            .ok_or(SetupError::DegenerateToxicWaste)?;
        let mut lagrange_t =
            domain.evaluate_vanishing_polynomial(t) * t_sub_one_inv * domain.size_inv();

        // ωⁱ for the current constraint index i.
        let mut wi = one;

        for constraint in &r1cs.constraints {
            for term in &constraint.l {
                r1cs.add_term(&mut a[term.wire_id()], term, lagrange_t);
            }
            for term in &constraint.r {
                r1cs.add_term(&mut b[term.wire_id()], term, lagrange_t);
            }
            for term in &constraint.o {
                r1cs.add_term(&mut c[term.wire_id()], term, lagrange_t);
            }

            lagrange_t *= w * (t - wi);
            wi *= w;
            lagrange_t *= (t - wi)
                .inverse()
                .ok_or(SetupError::DegenerateToxicWaste)?;
        }

        Ok((a, b, c))
    }

    /// Multiplies every scalar by the fixed base and normalizes the results
    /// to affine form in one batch, reusing a single windowed table of base
    /// multiples across the whole vector.
    fn batch_mul<G: CurveGroup<ScalarField = F>>(base: G, scalars: &[F]) -> Vec<G::Affine> {
        let scalar_bits = F::MODULUS_BIT_SIZE as usize;
        let window = FixedBase::get_mul_window_size(scalars.len());
        let table = FixedBase::get_window_table::<G>(scalar_bits, window, base);
        let points = FixedBase::msm::<G>(scalar_bits, window, &table, scalars);
        G::normalize_batch(&points)
    }

    pub(crate) fn generate_dummy_key<R: RngCore + CryptoRng>(
        r1cs: &R1cs<F>,
        rng: &mut R,
    ) -> Result<ProvingKey<E>, SetupError> {
        r1cs.validate()?;

        let nb_constraints = r1cs.nb_constraints();
        let domain = D::new(nb_constraints).ok_or(SetupError::DomainTooLarge { nb_constraints })?;

        let waste = ToxicWaste::<F>::sample(rng)?;
        let g1 = (E::G1::generator() * waste.alpha).into_affine();
        let g2 = (E::G2::generator() * waste.alpha).into_affine();

        Ok(ProvingKey {
            alpha_g1: g1,
            beta_g1: g1,
            delta_g1: g1,
            a_g1: ark_std::vec![g1; r1cs.nb_wires],
            b_g1: ark_std::vec![g1; r1cs.nb_wires],
            k_g1: ark_std::vec![g1; r1cs.nb_private_wires()],
            z_g1: ark_std::vec![g1; domain.size()],
            beta_g2: g2,
            delta_g2: g2,
            b_g2: ark_std::vec![g2; r1cs.nb_wires],
            domain,
        })
    }
}

/// Reorders `v` so the entry at index `i` lands at the index whose bit
/// pattern is `i` reversed. `v.len()` must be a power of two. Applying the
/// permutation twice restores the original order.
pub(crate) fn bit_reverse<T>(v: &mut [T]) {
    let n = v.len();
    if n <= 1 {
        return;
    }
    debug_assert!(n.is_power_of_two());
    let shift = usize::BITS - n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> shift;
        if j > i {
            v.swap(i, j);
        }
    }
}
