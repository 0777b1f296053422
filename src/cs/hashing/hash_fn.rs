//! # Key Hashing
//!
//! Deterministic hash codes for dictionary keys. Every code lies in `[0, HASH_MODULUS)`, so table
//! code can reduce it modulo its own capacity without worrying about sign.
//!
//! - **Integers** hash by value, reduced into the non-negative range modulo a large prime.
//! - **Text** folds its bytes polynomially: `h = (h * base + byte) mod prime`.
//! - **Composite keys** fold the hash of each field the same way through a [`PolyHasher`],
//!   starting from a non-zero seed so that leading zero-hash fields still move the digest.
//!
//! **Note**: This is **not** a DoS-resistant or cryptographic hash. It is fixed and seedless so
//! that the same key always lands in the same slot, run after run.

/// Modulus for every hash code: the Mersenne prime 2^31 - 1.
pub const HASH_MODULUS: u64 = 2_147_483_647;
/// Multiplier of the polynomial fold.
pub const HASH_BASE: u64 = 31;
/// Starting value for composite keys.
pub const HASH_SEED: u64 = 17;

/// Types that can produce a deterministic, non-negative hash code.
///
/// Implementations must agree with `Eq`: equal keys produce equal codes.
pub trait KeyHash {
    /// Hash code of `self`, always below [`HASH_MODULUS`].
    fn key_hash(&self) -> u64;
}

/// Hash of a signed integer, normalized into `[0, HASH_MODULUS)`.
pub fn hash_int(value: i64) -> u64 {
    value.rem_euclid(HASH_MODULUS as i64) as u64
}

/// Hash of a string, folding its bytes with [`HASH_BASE`] modulo [`HASH_MODULUS`].
pub fn hash_str(text: &str) -> u64 {
    let mut hasher = PolyHashBuilder::new().with_seed(0).build();
    hasher.write_bytes(text.as_bytes());
    hasher.finish()
}

/// A builder for [`PolyHasher`], allowing you to set base, modulus and seed.
#[derive(Debug, Clone)]
pub struct PolyHashBuilder {
    base: u64,
    modulus: u64,
    seed: u64,
}

impl Default for PolyHashBuilder {
    fn default() -> Self {
        Self {
            base: HASH_BASE,
            modulus: HASH_MODULUS,
            seed: HASH_SEED,
        }
    }
}

impl PolyHashBuilder {
    /// Creates a new builder with the default base, modulus and seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base (the multiplier used in the polynomial).
    pub fn with_base(mut self, base: u64) -> Self {
        assert!(base > 1, "base must be > 1");
        self.base = base;
        self
    }

    /// Sets the modulus. Typically a large prime for fewer collisions.
    pub fn with_modulus(mut self, modulus: u64) -> Self {
        assert!(modulus > 1, "modulus must be > 1");
        self.modulus = modulus;
        self
    }

    /// Sets the starting value of the fold.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> PolyHasher {
        PolyHasher {
            base: self.base,
            modulus: self.modulus,
            current: self.seed % self.modulus,
        }
    }
}

/// Accumulates field hashes of a composite key into one digest.
///
/// ```rust
/// use addrquota::cs::hashing::hash_fn::{hash_int, hash_str, PolyHasher};
///
/// let mut h = PolyHasher::new();
/// h.write_hash(hash_int(42));
/// h.write_hash(hash_str("Main St"));
/// let digest = h.finish();
/// assert!(digest < addrquota::cs::hashing::hash_fn::HASH_MODULUS);
/// ```
#[derive(Debug, Clone)]
pub struct PolyHasher {
    base: u64,
    modulus: u64,
    current: u64,
}

impl Default for PolyHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PolyHasher {
    /// Creates a hasher with the default base, modulus and seed.
    pub fn new() -> Self {
        PolyHashBuilder::new().build()
    }

    /// Folds one value in: `h = (h * base + x) mod modulus`.
    pub fn update(&mut self, x: u64) {
        let scaled = mul_mod(self.current, self.base, self.modulus);
        self.current = add_mod(scaled, x % self.modulus, self.modulus);
    }

    /// Folds the hash code of one field of a composite key.
    pub fn write_hash(&mut self, field_hash: u64) {
        self.update(field_hash);
    }

    /// Folds each byte in order.
    pub fn write_bytes(&mut self, data: &[u8]) {
        for &b in data {
            self.update(b as u64);
        }
    }

    /// Folds the [`KeyHash`] of `field`.
    pub fn write_key<T: KeyHash + ?Sized>(&mut self, field: &T) {
        self.update(field.key_hash());
    }

    /// Current digest.
    pub fn finish(&self) -> u64 {
        self.current
    }
}

// internal ops

#[inline]
fn add_mod(a: u64, b: u64, m: u64) -> u64 {
    // both operands are already below m
    let s = a + b;
    if s >= m {
        s - m
    } else {
        s
    }
}

#[inline]
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

macro_rules! impl_key_hash_signed {
    ($($t:ty),*) => {
        $(
            impl KeyHash for $t {
                fn key_hash(&self) -> u64 {
                    hash_int(*self as i64)
                }
            }
        )*
    };
}

macro_rules! impl_key_hash_unsigned {
    ($($t:ty),*) => {
        $(
            impl KeyHash for $t {
                fn key_hash(&self) -> u64 {
                    *self as u64 % HASH_MODULUS
                }
            }
        )*
    };
}

impl_key_hash_signed!(i8, i16, i32, i64, isize);
impl_key_hash_unsigned!(u8, u16, u32, u64, usize);

impl KeyHash for str {
    fn key_hash(&self) -> u64 {
        hash_str(self)
    }
}

impl KeyHash for String {
    fn key_hash(&self) -> u64 {
        hash_str(self)
    }
}

impl<T: KeyHash + ?Sized> KeyHash for &T {
    fn key_hash(&self) -> u64 {
        (**self).key_hash()
    }
}

impl<T: KeyHash + ?Sized> KeyHash for Box<T> {
    fn key_hash(&self) -> u64 {
        (**self).key_hash()
    }
}
