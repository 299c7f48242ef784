//! Feldman verifiable secret sharing
//!
//! A participant's contribution is a random polynomial of degree t-1
//!
//! f(x) = a_0 + a_1*x + ... + a_{t-1}*x^{t-1}
//!
//! published as commitments C_k = a_k * G. A share f(x) can then be checked
//! against the commitments without revealing any coefficient.

use crate::group::Group;
use crate::types::Identifier;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Secret polynomial coefficients `[a_0, ..., a_{t-1}]`, zeroized on drop
pub(crate) struct SecretPolynomial<G: Group> {
    coefficients: Vec<G::Scalar>,
}

impl<G: Group> SecretPolynomial<G> {
    /// Sample a random polynomial with `threshold` coefficients and a
    /// non-zero constant term
    pub(crate) fn random<R: RngCore + CryptoRng>(threshold: usize, rng: &mut R) -> Self {
        let mut coefficients = Vec::with_capacity(threshold);
        coefficients.push(G::random_nonzero_scalar(rng));
        for _ in 1..threshold {
            coefficients.push(G::random_scalar(rng));
        }
        Self { coefficients }
    }

    /// The constant term a_0, this participant's contribution to the secret
    pub(crate) fn constant_term(&self) -> &G::Scalar {
        &self.coefficients[0]
    }

    /// f(x)
    pub(crate) fn evaluate(&self, x: &G::Scalar) -> G::Scalar {
        evaluate_polynomial::<G>(&self.coefficients, x)
    }

    /// Feldman commitments `a_k * G`
    pub(crate) fn commitments(&self) -> Vec<G::Element> {
        self.coefficients.iter().map(G::mul_base).collect()
    }
}

impl<G: Group> Drop for SecretPolynomial<G> {
    fn drop(&mut self) {
        for coefficient in self.coefficients.iter_mut() {
            coefficient.zeroize();
        }
    }
}

/// Evaluate a polynomial at `x` using Horner's method
pub fn evaluate_polynomial<G: Group>(coefficients: &[G::Scalar], x: &G::Scalar) -> G::Scalar {
    let mut result = G::Scalar::from(0u64);
    for coefficient in coefficients.iter().rev() {
        result = result * *x + *coefficient;
    }
    result
}

/// Evaluate committed coefficients "in the exponent": `Σ C_k * x^k`
pub fn evaluate_commitments<G: Group>(commitments: &[G::Element], x: &G::Scalar) -> G::Element {
    let mut result = G::identity();
    let mut x_power = G::Scalar::from(1u64);

    for commitment in commitments {
        result = result + *commitment * x_power;
        x_power = x_power * *x;
    }

    result
}

/// Verify a share sent to `receiver` against the sender's commitments.
///
/// Checks that `share * G = Σ C_k * receiver^k`.
pub fn verify_share<G: Group>(
    share: &G::Scalar,
    receiver: &Identifier<G>,
    commitments: &[G::Element],
) -> bool {
    if commitments.is_empty() {
        return false;
    }
    G::mul_base(share) == evaluate_commitments::<G>(commitments, &receiver.to_scalar())
}
