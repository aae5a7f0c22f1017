use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::api::coerce::{single, Coerce, CoerceError};
use crate::api::resource::Resources;
use crate::model::TypeTag;

/// A seeded random source.
///
/// Seed `0` draws from entropy (non-deterministic); any other seed is deterministic.
pub struct Seeded {
    seed: i32,
    rng: StdRng,
}

impl Seeded {
    /// Create a random source from `seed`.
    pub fn new(seed: i32) -> Self {
        let rng = if seed == 0 {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(seed as u64)
        };

        Self { seed, rng }
    }

    /// The seed this source was created from.
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Whether this source replays the same sequence for its seed.
    pub fn is_deterministic(&self) -> bool {
        self.seed != 0
    }
}

impl Default for Seeded {
    fn default() -> Self {
        Self::new(0)
    }
}

impl std::fmt::Debug for Seeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seeded").field("seed", &self.seed).finish()
    }
}

impl RngCore for Seeded {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

impl Coerce for Seeded {
    fn type_tag() -> TypeTag {
        TypeTag::Rand
    }

    fn coerce(tokens: &[String], _resources: &Resources) -> Result<Option<Self>, CoerceError> {
        let token = single(tokens)?;
        let seed = token
            .parse::<i32>()
            .map_err(|_| CoerceError::InvalidLiteral {
                token: token.to_string(),
                type_name: "rand",
            })?;
        Ok(Some(Seeded::new(seed)))
    }

    fn render(&self) -> String {
        self.seed.to_string()
    }
}
