//! The 64-byte BIP-Schnorr signature wire format: `Rx (32 B) || s (32 B)`.

/// A BIP-Schnorr signature.
///
/// `rx` is the big-endian x-coordinate of the nonce point `R`; `s` is the
/// big-endian response scalar. Neither field is range-checked by this type
/// — that happens during verification, where the specific out-of-range
/// condition (`r >= p` vs `s >= n`) determines which canonical error string
/// is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    /// Big-endian x-coordinate of the nonce point `R`.
    pub rx: [u8; 32],
    /// Big-endian response scalar `s`.
    pub s: [u8; 32],
}

impl Signature {
    /// Serialises this signature to its 64-byte wire format.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.rx);
        out[32..].copy_from_slice(&self.s);
        out
    }

    /// Parses a 64-byte wire-format signature.
    pub fn from_bytes(bytes: &[u8; 64]) -> Self {
        let mut rx = [0u8; 32];
        let mut s = [0u8; 32];
        rx.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Self { rx, s }
    }
}
