// Copyright 2018-2026 the Deno authors. MIT license.

use der::asn1::Uint;
use der::pem::PemLabel;
use num_bigint_dig::BigUint;

/// PKCS#3 `DHParameter` structure:
///
/// ```asn1
/// DHParameter ::= SEQUENCE {
///   prime INTEGER, -- p
///   base INTEGER, -- g
///   privateValueLength INTEGER OPTIONAL
/// }
/// ```
///
/// Both integers are required to be non-negative; a negative prime or base
/// is malformed input rather than a value to interpret.
#[derive(Clone, Debug, Eq, PartialEq, der::Sequence)]
pub(crate) struct DhParameter {
  pub prime: Uint,
  pub base: Uint,
  pub private_value_length: Option<Uint>,
}

impl PemLabel for DhParameter {
  const PEM_LABEL: &'static str = "DH PARAMETERS";
}

impl DhParameter {
  /// Returns the group `(p, g)` this structure describes.
  pub fn group(&self) -> (BigUint, BigUint) {
    (
      BigUint::from_bytes_be(self.prime.as_bytes()),
      BigUint::from_bytes_be(self.base.as_bytes()),
    )
  }
}
