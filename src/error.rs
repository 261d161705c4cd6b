/// Errors produced while constructing Groth16 keys.
///
/// Every variant is fatal to the setup: no partial keys are ever returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The randomness source kept returning zero; the toxic waste could not
    /// be sampled.
    #[error("randomness source failed to produce a nonzero field element")]
    EntropyUnavailable,

    /// A toxic-waste scalar cannot be used: the secret evaluation point fell
    /// inside the FFT domain, or an inversion of a waste scalar failed.
    #[error("toxic waste is degenerate")]
    DegenerateToxicWaste,

    /// A constraint references a wire the system does not declare.
    #[error("constraint references wire {wire} but the system declares {nb_wires} wires")]
    WireOutOfBounds {
        /// The offending wire index.
        wire: usize,
        /// Total number of declared wires.
        nb_wires: usize,
    },

    /// More public wires declared than wires in total.
    #[error("{nb_public_wires} public wires declared out of {nb_wires} wires in total")]
    PublicWiresExceedTotal {
        /// Declared number of public wires.
        nb_public_wires: usize,
        /// Total number of declared wires.
        nb_wires: usize,
    },

    /// The public-wire name list does not match the declared public count.
    #[error("{names} public wire names given for {nb_public_wires} public wires")]
    PublicNamesMismatch {
        /// Length of the name list.
        names: usize,
        /// Declared number of public wires.
        nb_public_wires: usize,
    },

    /// The curve's two-adic subgroup has no radix-2 evaluation domain large
    /// enough for this constraint count.
    #[error("no evaluation domain large enough for {nb_constraints} constraints")]
    DomainTooLarge {
        /// Number of constraints the domain must cover.
        nb_constraints: usize,
    },

    /// A curve-level operation failed.
    #[error("curve operation failed: {0}")]
    CurveOperation(&'static str),
}
