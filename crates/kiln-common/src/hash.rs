//! 128-bit FNV-1a hashing and the 96-bit fold used for object identifiers.
//!
//! The accumulator is kept as four 32-bit limbs (least significant first)
//! and multiplied by the FNV prime `2^88 + 0x13B` limb by limb, so the
//! result does not depend on native 128-bit arithmetic.
//!
//! Identifiers are content addressed: the same bytes always give the same
//! id. Distinct inputs are expected, not guaranteed, to give distinct ids;
//! with `n` objects in one graph the collision probability is roughly
//! `n^2 / 2^97`, which is negligible for projects of a few thousand files.

use std::fmt;

/// FNV-1a 128-bit offset basis, least significant limb first.
const FNV_OFFSET_BASIS: [u32; 4] = [0x6295_c58d, 0x62b8_2175, 0x07bb_0142, 0x6c62_272e];

/// Low part of the FNV-1a 128-bit prime. The remaining part is `1 << 88`.
const FNV_PRIME_LOW: u64 = 0x13b;

/// A 128-bit hash value as four 32-bit limbs, least significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash128([u32; 4]);

impl Hash128 {
    pub fn limbs(self) -> [u32; 4] {
        self.0
    }

    pub fn as_u128(self) -> u128 {
        self.0
            .iter()
            .rev()
            .fold(0u128, |acc, &limb| (acc << 32) | limb as u128)
    }
}

impl fmt::Display for Hash128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [l0, l1, l2, l3] = self.0;
        write!(f, "{:08x}{:08x}{:08x}{:08x}", l3, l2, l1, l0)
    }
}

/// A 96-bit content-addressed object identifier.
///
/// Printed as three groups of eight uppercase hex digits, most significant
/// limb first, which is the form object keys take in a project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u32; 3]);

impl ObjectId {
    /// Identifier of an object with the given display name and `isa` type.
    pub fn for_object(name: &str, isa: &str) -> Self {
        hash96(object_key(name, isa).as_bytes())
    }

    /// Limbs, least significant first.
    pub fn limbs(self) -> [u32; 3] {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [l0, l1, l2] = self.0;
        write!(f, "{:08X}{:08X}{:08X}", l2, l1, l0)
    }
}

/// The string an object's identifier is hashed from.
pub fn object_key(name: &str, isa: &str) -> String {
    let mut key = String::with_capacity(name.len() + isa.len());
    key.push_str(name);
    key.push_str(isa);
    key
}

/// Hash a byte string with 128-bit FNV-1a.
pub fn hash128(bytes: &[u8]) -> Hash128 {
    let mut acc = FNV_OFFSET_BASIS;
    for &byte in bytes {
        acc[0] ^= byte as u32;
        acc = mul_prime(acc);
    }
    Hash128(acc)
}

/// Reduce a 128-bit hash to 96 bits by XOR-ing the top limb into the bottom one.
pub fn fold96(hash: Hash128) -> ObjectId {
    let [l0, l1, l2, l3] = hash.0;
    ObjectId([l0 ^ l3, l1, l2])
}

pub fn hash96(bytes: &[u8]) -> ObjectId {
    fold96(hash128(bytes))
}

/// `acc * (2^88 + 0x13B) mod 2^128`.
fn mul_prime(acc: [u32; 4]) -> [u32; 4] {
    let mut out = [0u32; 4];

    let mut carry = 0u64;
    for (dst, &limb) in out.iter_mut().zip(acc.iter()) {
        let t = limb as u64 * FNV_PRIME_LOW + carry;
        *dst = t as u32;
        carry = t >> 32;
    }

    // acc << 88 is two whole limbs plus 24 bits; anything above limb 3 falls off.
    let shifted = [0, 0, acc[0] << 24, (acc[1] << 24) | (acc[0] >> 8)];

    let mut carry = 0u64;
    for (dst, &limb) in out.iter_mut().zip(shifted.iter()) {
        let t = *dst as u64 + limb as u64 + carry;
        *dst = t as u32;
        carry = t >> 32;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIME: u128 = (1u128 << 88) + 0x13b;
    const BASIS: u128 = 0x6c62272e07bb014262b821756295c58d;

    fn reference_hash128(bytes: &[u8]) -> u128 {
        bytes
            .iter()
            .fold(BASIS, |acc, &b| (acc ^ b as u128).wrapping_mul(PRIME))
    }

    #[test]
    fn test_empty_input_is_offset_basis() {
        assert_eq!(hash128(b"").as_u128(), BASIS);
        assert_eq!(hash96(b"").to_string(), "07BB014262B821750EF7E2A3");
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            hash128(b"a").to_string(),
            "d228cb696f1a8caf78912b704e4a8964"
        );
        assert_eq!(hash96(b"a").to_string(), "6F1A8CAF78912B709C62420D");
        assert_eq!(hash96(b"foobar").to_string(), "793C64BF6F0D35978E7A797A");
    }

    #[test]
    fn test_limb_multiplication_matches_native() {
        let inputs: [&[u8]; 5] = [
            b"bar.c",
            b"mainPBXFileReference",
            b"\xff\xff\xff\xff\xff\xff\xff\xff",
            b"Build configuration list for PBXProject \"foo\"XCConfigurationList",
            &[0u8; 64],
        ];
        for input in inputs {
            assert_eq!(hash128(input).as_u128(), reference_hash128(input));
        }
    }

    #[test]
    fn test_fold_xors_top_limb_into_bottom() {
        let hash = Hash128([0x0000_00ff, 2, 3, 0x0000_0f0f]);
        assert_eq!(fold96(hash).limbs(), [0x0000_0ff0, 2, 3]);
    }

    #[test]
    fn test_object_id_is_stable_per_name_and_type() {
        let a = ObjectId::for_object("bar.c", "PBXFileReference");
        let b = ObjectId::for_object("bar.c", "PBXFileReference");
        let c = ObjectId::for_object("bar.c", "PBXBuildFile");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, hash96(b"bar.cPBXFileReference"));
    }

    #[test]
    fn test_object_id_display_is_24_uppercase_hex_digits() {
        let id = ObjectId::for_object("main", "PBXFileReference");
        let text = id.to_string();
        assert_eq!(text, "1F28463A31D1D78605629F43");
        assert_eq!(text.len(), 24);
    }
}
