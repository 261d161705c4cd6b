use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::AffineRepr;
use ark_poly::Radix2EvaluationDomain;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use ark_std::string::String;
use ark_std::vec::Vec;

/// Proving key for the Groth16 zkSNARK.
///
/// Every point is the generator of its group scaled by a secret scalar; the
/// scalars themselves are destroyed when the setup returns.
#[derive(Clone, Debug, PartialEq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ProvingKey<E: Pairing> {
    /// `[α]₁` - the `α` trapdoor hidden in `G1`.
    pub alpha_g1: E::G1Affine,
    /// `[β]₁` - the `β` trapdoor hidden in `G1`.
    pub beta_g1: E::G1Affine,
    /// `[δ]₁` - the `δ` trapdoor hidden in `G1`.
    pub delta_g1: E::G1Affine,
    /// `[(Aᵢ(t))ᵢ]₁` - per-wire evaluations of the left constraint
    /// polynomials, hidden in `G1`.
    pub a_g1: Vec<E::G1Affine>,
    /// `[(Bᵢ(t))ᵢ]₁` - per-wire evaluations of the right constraint
    /// polynomials, hidden in `G1`.
    pub b_g1: Vec<E::G1Affine>,
    /// `[((β·Aᵢ(t) + α·Bᵢ(t) + Cᵢ(t))/δ)ᵢ]₁` for the private wires, which
    /// occupy the head of the wire index range.
    pub k_g1: Vec<E::G1Affine>,
    /// `[((tⁿ − 1)·tⁱ/δ)ᵢ]₁` for `i` in `[0, n)`, stored in bit-reversed
    /// order of `i` to match the prover's FFT butterfly order.
    pub z_g1: Vec<E::G1Affine>,
    /// `[β]₂` - the `β` trapdoor hidden in `G2`.
    pub beta_g2: E::G2Affine,
    /// `[δ]₂` - the `δ` trapdoor hidden in `G2`.
    pub delta_g2: E::G2Affine,
    /// `[(Bᵢ(t))ᵢ]₂` - the right constraint polynomial evaluations, hidden
    /// in `G2`.
    pub b_g2: Vec<E::G2Affine>,
    /// The evaluation domain the constraint polynomials were interpolated
    /// over; the prover reuses it for its FFTs.
    pub domain: Radix2EvaluationDomain<E::ScalarField>,
}

/// Verifying key for the Groth16 zkSNARK.
#[derive(Clone, Debug, PartialEq)]
pub struct VerifyingKey<E: Pairing> {
    /// `e(α, β)` - pairing of the two trapdoor elements, fully exponentiated.
    pub e: PairingOutput<E>,
    /// `−[γ]₂`. Stored negated so the verifier's product of pairings needs
    /// no inversion.
    pub gamma_neg_g2: E::G2Affine,
    /// `−[δ]₂`, negated for the same reason.
    pub delta_neg_g2: E::G2Affine,
    /// `[((β·Aᵢ(t) + α·Bᵢ(t) + Cᵢ(t))/γ)ᵢ]₁` for the public wires, which
    /// occupy the tail of the wire index range.
    pub k_g1: Vec<E::G1Affine>,
    /// Names of the public wires, in wire-index order.
    pub public_inputs: Vec<String>,
}

impl<E: Pairing> ProvingKey<E> {
    /// Returns true when `self` and `other` differ at every observable
    /// coordinate: the `α`/`β`/`δ` singletons and the non-infinity entries
    /// of the private-wire K vector.
    ///
    /// A single shared singleton counts as identical. This is stricter than
    /// the verifying-key predicate, which only inspects K.
    pub fn is_different(&self, other: &Self) -> bool {
        if self.alpha_g1 == other.alpha_g1
            || self.beta_g1 == other.beta_g1
            || self.delta_g1 == other.delta_g1
        {
            return false;
        }

        for (k, other_k) in self.k_g1.iter().zip(other.k_g1.iter()) {
            if !k.is_zero() && k == other_k {
                return false;
            }
        }

        true
    }
}

impl<E: Pairing> VerifyingKey<E> {
    /// Returns true when every non-infinity entry of the public-wire K
    /// vector differs between `self` and `other`.
    ///
    /// Used by tests to catch a setup that reuses randomness.
    pub fn is_different(&self, other: &Self) -> bool {
        for (k, other_k) in self.k_g1.iter().zip(other.k_g1.iter()) {
            if !k.is_zero() && k == other_k {
                return false;
            }
        }

        true
    }
}

// The wire names keep the verifying key out of reach of the serialization
// derive, so the traits are implemented by hand, field by field in
// declaration order. Each name is written as a length-prefixed byte string.

impl<E: Pairing> CanonicalSerialize for VerifyingKey<E> {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        self.e.serialize_with_mode(&mut writer, compress)?;
        self.gamma_neg_g2.serialize_with_mode(&mut writer, compress)?;
        self.delta_neg_g2.serialize_with_mode(&mut writer, compress)?;
        self.k_g1.serialize_with_mode(&mut writer, compress)?;
        (self.public_inputs.len() as u64).serialize_with_mode(&mut writer, compress)?;
        for name in &self.public_inputs {
            (name.len() as u64).serialize_with_mode(&mut writer, compress)?;
            writer.write_all(name.as_bytes())?;
        }
        Ok(())
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        let names: usize = self
            .public_inputs
            .iter()
            .map(|name| 8 + name.len())
            .sum::<usize>();
        self.e.serialized_size(compress)
            + self.gamma_neg_g2.serialized_size(compress)
            + self.delta_neg_g2.serialized_size(compress)
            + self.k_g1.serialized_size(compress)
            + 8
            + names
    }
}

impl<E: Pairing> Valid for VerifyingKey<E> {
    fn check(&self) -> Result<(), SerializationError> {
        self.e.check()?;
        self.gamma_neg_g2.check()?;
        self.delta_neg_g2.check()?;
        self.k_g1.check()?;
        Ok(())
    }
}

impl<E: Pairing> CanonicalDeserialize for VerifyingKey<E> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let e = PairingOutput::<E>::deserialize_with_mode(&mut reader, compress, validate)?;
        let gamma_neg_g2 = E::G2Affine::deserialize_with_mode(&mut reader, compress, validate)?;
        let delta_neg_g2 = E::G2Affine::deserialize_with_mode(&mut reader, compress, validate)?;
        let k_g1 = Vec::<E::G1Affine>::deserialize_with_mode(&mut reader, compress, validate)?;

        let nb_names = u64::deserialize_with_mode(&mut reader, compress, validate)? as usize;
        let mut public_inputs = Vec::with_capacity(nb_names);
        for _ in 0..nb_names {
            let len = u64::deserialize_with_mode(&mut reader, compress, validate)? as usize;
            let mut bytes = ark_std::vec![0u8; len];
            reader.read_exact(&mut bytes)?;
            public_inputs
                .push(String::from_utf8(bytes).map_err(|_| SerializationError::InvalidData)?);
        }

        Ok(Self {
            e,
            gamma_neg_g2,
            delta_neg_g2,
            k_g1,
            public_inputs,
        })
    }
}
