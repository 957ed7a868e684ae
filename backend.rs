// Copyright 2018-2026 the Deno authors. MIT license.

//! Decode-and-validate engine behind [`crate::DhParameters`].
//!
//! Two interchangeable implementations exist, selected at build time: the
//! default `rustcrypto` backend does real ASN.1 parsing and safety
//! validation, while the fallback stub (built when the feature is disabled)
//! warns and reports every input as unsupported. Callers should branch on
//! [`supports_dh`] rather than rely on the stub's no-op behavior.

/// Internal decode outcome. `Unsupported` is deliberately distinct from the
/// parse outcomes: it means the build has no cryptographic backend, not that
/// the input was judged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DecodeError {
  InvalidInput,
  UnsafeParameters,
  Unsupported,
}

#[cfg(feature = "rustcrypto")]
pub(crate) use rustcrypto::decode_der;
#[cfg(feature = "rustcrypto")]
pub(crate) use rustcrypto::decode_pem;
#[cfg(feature = "rustcrypto")]
pub(crate) use rustcrypto::supports_dh;

#[cfg(not(feature = "rustcrypto"))]
pub(crate) use stub::decode_der;
#[cfg(not(feature = "rustcrypto"))]
pub(crate) use stub::decode_pem;
#[cfg(not(feature = "rustcrypto"))]
pub(crate) use stub::supports_dh;

#[cfg(feature = "rustcrypto")]
mod rustcrypto {
  use der::Decode;
  use der::Document;
  use der::Encode;
  use der::pem::PemLabel;

  use super::DecodeError;
  use crate::check::is_safe_dh;
  use crate::pkcs3::DhParameter;

  pub(crate) fn supports_dh() -> bool {
    true
  }

  /// Decodes and validates a DER-encoded `DHParameter` sequence.
  ///
  /// DER is already the canonical encoding, so on success the canonical
  /// bytes are the input itself, unchanged.
  pub(crate) fn decode_der(der: &[u8]) -> Result<Vec<u8>, DecodeError> {
    if der.is_empty() {
      return Err(DecodeError::InvalidInput);
    }

    let params =
      DhParameter::from_der(der).map_err(|_| DecodeError::InvalidInput)?;
    let (p, g) = params.group();
    if !is_safe_dh(&p, &g) {
      return Err(DecodeError::UnsafeParameters);
    }

    Ok(der.to_vec())
  }

  /// Decodes and validates a PEM-framed `DH PARAMETERS` block.
  ///
  /// PEM is not canonical; on success the stored bytes are the DER
  /// re-encoding of the parsed structure.
  pub(crate) fn decode_pem(pem: &[u8]) -> Result<Vec<u8>, DecodeError> {
    if pem.is_empty() {
      return Err(DecodeError::InvalidInput);
    }

    let pem = std::str::from_utf8(pem).map_err(|_| DecodeError::InvalidInput)?;
    let (label, document) =
      Document::from_pem(pem).map_err(|_| DecodeError::InvalidInput)?;
    DhParameter::validate_pem_label(label)
      .map_err(|_| DecodeError::InvalidInput)?;

    let params = DhParameter::from_der(document.as_bytes())
      .map_err(|_| DecodeError::InvalidInput)?;
    let (p, g) = params.group();
    if !is_safe_dh(&p, &g) {
      return Err(DecodeError::UnsafeParameters);
    }

    params.to_der().map_err(|_| DecodeError::InvalidInput)
  }
}

#[cfg(not(feature = "rustcrypto"))]
mod stub {
  use super::DecodeError;

  pub(crate) fn supports_dh() -> bool {
    false
  }

  pub(crate) fn decode_der(_der: &[u8]) -> Result<Vec<u8>, DecodeError> {
    log::warn!(
      "DhParameters: DER decoding is not implemented for the current backend"
    );
    Err(DecodeError::Unsupported)
  }

  pub(crate) fn decode_pem(_pem: &[u8]) -> Result<Vec<u8>, DecodeError> {
    log::warn!(
      "DhParameters: PEM decoding is not implemented for the current backend"
    );
    Err(DecodeError::Unsupported)
  }
}
