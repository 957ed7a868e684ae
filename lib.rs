// Copyright 2018-2026 the Deno authors. MIT license.

//! Diffie-Hellman parameter handling for server-side TLS configuration.
//!
//! [`DhParameters`] accepts untrusted DER or PEM encoded parameter material,
//! decodes it into the group `(p, g)` it describes, and decides whether that
//! group is safe to use for key exchange. The decision encodes the known DH
//! weaknesses: moduli below 1024 bits, non-prime and non-safe-prime moduli,
//! and generators unsuitable for the modulus, with the congruence correction
//! required to accept the IETF-published MODP groups.
//!
//! A value either carries the canonical DER encoding of validated parameters
//! or an error describing why the input was rejected; it never carries both.

#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]

mod backend;
#[cfg(feature = "rustcrypto")]
mod check;
#[cfg(feature = "rustcrypto")]
mod pkcs3;

use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::io::Read;
use std::sync::Arc;

use base64::Engine;

use crate::backend::DecodeError;

/// The encoding of externally supplied parameter material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingFormat {
  Der,
  Pem,
}

/// Why a [`DhParameters`] value holds no usable parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum DhParamsError {
  /// The input was empty, structurally malformed, or used an encoding the
  /// backend cannot decode.
  #[error("invalid input data")]
  InvalidInputData,
  /// The input parsed, but the parameters failed the safety validation.
  #[error("the given Diffie-Hellman parameters are deemed unsafe")]
  UnsafeParameters,
}

/// Returns whether the cryptographic backend of this build can decode DH
/// parameters at all. When this is `false`, every decode is a warn-and-return
/// no-op that leaves the value empty.
pub fn supports_dh_decoding() -> bool {
  backend::supports_dh()
}

// The 1024-bit MODP group from RFC 2459 (Second Oakley Group), as base64 of
// its DER encoding.
const DEFAULT_PARAMS_BASE64: &str =
  "MIGHAoGBAP//////////yQ/aoiFowjTExmKLgNwc0SkCTgiKZ8x0Agu+pjsTmyJR\
   Sgh5jjQE3e+VGbPNOkMbMCsKbfJfFDdP4TVtbVHCReSFtXZiXn7G9ExC6aY37WsL\
   /1y29Aa37e44a/taiZ+lrp8kEXxLH+ZJKGZR7OZTgf//////////AgEC";

enum State {
  /// Default-constructed: no parameters, no error. Setting an empty value on
  /// a TLS configuration disables DH key exchange.
  Empty,
  /// Decoding and validation succeeded; holds the canonical DER encoding.
  Valid(Vec<u8>),
  /// Decoding or validation failed.
  Failed(DhParamsError),
}

/// A validated set of Diffie-Hellman parameters for a TLS server.
///
/// Values are immutable once constructed and cheap to clone; clones share
/// the underlying state and may be read concurrently from any thread.
/// Construction never panics and never returns `Result`: failures are
/// recorded in the value and queried through [`DhParameters::is_valid`] and
/// [`DhParameters::error`].
///
/// Equality, hashing, and debug rendering are all derived solely from the
/// canonical DER bytes. An instance that failed to decode has no canonical
/// bytes, so it compares equal to the empty instance.
#[derive(Clone)]
pub struct DhParameters {
  inner: Arc<State>,
}

impl DhParameters {
  /// Returns the default parameters used when callers do not supply their
  /// own: the 1024-bit MODP group from RFC 2459, also known as the Second
  /// Oakley Group.
  ///
  /// The compiled-in encoding goes through the normal DER decode path and
  /// therefore passes the same validation as external input.
  pub fn default_parameters() -> Self {
    let der = base64::engine::general_purpose::STANDARD
      .decode(DEFAULT_PARAMS_BASE64)
      .expect("invalid default parameters are not possible");
    Self::from_encoded(&der, EncodingFormat::Der)
  }

  /// Constructs parameters from `encoded` bytes in the given format.
  ///
  /// Use [`DhParameters::is_valid`] afterwards to check whether the bytes
  /// decoded and validated successfully.
  pub fn from_encoded(encoded: &[u8], format: EncodingFormat) -> Self {
    let result = match format {
      EncodingFormat::Der => backend::decode_der(encoded),
      EncodingFormat::Pem => backend::decode_pem(encoded),
    };
    let state = match result {
      Ok(der) => State::Valid(der),
      Err(DecodeError::InvalidInput) => {
        State::Failed(DhParamsError::InvalidInputData)
      }
      Err(DecodeError::UnsafeParameters) => {
        State::Failed(DhParamsError::UnsafeParameters)
      }
      // No backend: the diagnostic has been emitted, the value stays empty.
      Err(DecodeError::Unsupported) => State::Empty,
    };
    Self {
      inner: Arc::new(state),
    }
  }

  /// Constructs parameters by reading all bytes from `reader` first. An
  /// unavailable source yields an empty value with no error recorded.
  pub fn from_reader<R: Read>(mut reader: R, format: EncodingFormat) -> Self {
    let mut encoded = Vec::new();
    if reader.read_to_end(&mut encoded).is_err() {
      return Self::default();
    }
    Self::from_encoded(&encoded, format)
  }

  /// Returns `true` for the default-constructed state: no parameters and no
  /// error. A failed decode is not empty.
  pub fn is_empty(&self) -> bool {
    matches!(*self.inner, State::Empty)
  }

  /// Returns `true` if no error is recorded. Note that the empty value is
  /// valid in this sense while carrying no usable parameters.
  pub fn is_valid(&self) -> bool {
    !matches!(*self.inner, State::Failed(_))
  }

  /// Returns the error that made this value invalid, if any.
  pub fn error(&self) -> Option<DhParamsError> {
    match *self.inner {
      State::Failed(error) => Some(error),
      _ => None,
    }
  }

  /// A fixed human-readable description of [`DhParameters::error`]. Never
  /// includes parameter material.
  pub fn error_string(&self) -> &'static str {
    match *self.inner {
      State::Empty | State::Valid(_) => "no error",
      State::Failed(DhParamsError::InvalidInputData) => "invalid input data",
      State::Failed(DhParamsError::UnsafeParameters) => {
        "the given Diffie-Hellman parameters are deemed unsafe"
      }
    }
  }

  /// The canonical DER encoding of the validated parameters, present if and
  /// only if decoding and validation both succeeded. This is the value a
  /// TLS configuration consumer should hand to the handshake machinery.
  pub fn canonical_bytes(&self) -> Option<&[u8]> {
    match &*self.inner {
      State::Valid(der) => Some(der),
      _ => None,
    }
  }
}

impl Default for DhParameters {
  fn default() -> Self {
    Self {
      inner: Arc::new(State::Empty),
    }
  }
}

impl PartialEq for DhParameters {
  fn eq(&self, other: &Self) -> bool {
    self.canonical_bytes() == other.canonical_bytes()
  }
}

impl Eq for DhParameters {}

impl Hash for DhParameters {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write(self.canonical_bytes().unwrap_or_default());
  }
}

impl fmt::Debug for DhParameters {
  /// Renders the parameters in base64-encoded DER form. The group integers
  /// and the error state are never printed.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "DhParameters({})",
      base64::engine::general_purpose::STANDARD
        .encode(self.canonical_bytes().unwrap_or_default())
    )
  }
}
