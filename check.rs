// Copyright 2018-2026 the Deno authors. MIT license.

use num_bigint_dig::BigUint;
use num_bigint_dig::prime::probably_prime;
use num_traits::ToPrimitive;

/// Miller-Rabin rounds on top of the Baillie-PSW test. A false "prime"
/// verdict here would silently weaken every TLS session using the
/// parameters, so err on the generous side.
const MILLER_RABIN_ROUNDS: usize = 20;

/// Minimum modulus size accepted for DH key exchange, in bits.
const MIN_MODULUS_BITS: usize = 1024;

/// Outcome of the structural parameter check, mirroring the conditions
/// OpenSSL's `DH_check` reports for a `(p, g)` pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ParamCheck {
  pub p_not_prime: bool,
  pub p_not_safe_prime: bool,
  pub generator_not_suitable: bool,
}

impl ParamCheck {
  pub fn flagged(&self) -> bool {
    self.p_not_prime || self.p_not_safe_prime || self.generator_not_suitable
  }
}

fn mod_word(p: &BigUint, word: u32) -> u32 {
  (p % &BigUint::from(word)).to_u32().unwrap_or(0)
}

/// Structural consistency check for a DH group.
///
/// Generator suitability follows the classic congruence heuristics: `g == 2`
/// wants `p == 11 (mod 24)` and `g == 5` wants `p mod 10` in `{3, 7}`. Other
/// generators cannot be checked this way and are not flagged. Safe-primality
/// of `(p - 1) / 2` is only evaluated once `p` itself tested prime.
pub(crate) fn check_params(p: &BigUint, g: &BigUint) -> ParamCheck {
  let mut check = ParamCheck::default();

  if *g == BigUint::from(2u32) {
    if mod_word(p, 24) != 11 {
      check.generator_not_suitable = true;
    }
  } else if *g == BigUint::from(5u32) {
    let residue = mod_word(p, 10);
    if residue != 3 && residue != 7 {
      check.generator_not_suitable = true;
    }
  }

  if !probably_prime(p, MILLER_RABIN_ROUNDS) {
    check.p_not_prime = true;
  } else {
    let q = (p - &BigUint::from(1u32)) >> 1usize;
    if !probably_prime(&q, MILLER_RABIN_ROUNDS) {
      check.p_not_safe_prime = true;
    }
  }

  check
}

/// Decides whether `(p, g)` is acceptable for server-side DH key exchange.
pub(crate) fn is_safe_dh(p: &BigUint, g: &BigUint) -> bool {
  // Mark p < 1024 bits as unsafe.
  if p.bits() < MIN_MODULUS_BITS {
    return false;
  }

  let mut check = check_params(p, g);

  // From https://wiki.openssl.org/index.php/Diffie-Hellman_parameters:
  //
  //     The additional call to BN_mod_word(dh->p, 24)
  //     (and unmasking of DH_NOT_SUITABLE_GENERATOR)
  //     is performed to ensure your program accepts
  //     IETF group parameters. OpenSSL checks the prime
  //     is congruent to 11 when g = 2; while the IETF's
  //     primes are congruent to 23 when g = 2.
  //     Without the test, the IETF parameters would
  //     fail validation. For details, see Diffie-Hellman
  //     Parameter Check (when g = 2, must p mod 24 == 11?).
  if *g == BigUint::from(2u32) {
    let residue = mod_word(p, 24);
    if residue == 11 || residue == 23 {
      check.generator_not_suitable = false;
    }
  }

  !check.flagged()
}
