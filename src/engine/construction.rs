//! Free functions for engine construction.

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::formation::{CastMember, Sequence};
use crate::options::LayoutOptions;

/// Restore saved formations, or seed a default from the cast when nothing
/// usable was saved.
pub(super) fn restore_sequence(
    saved_json: Option<&str>,
    cast: &[CastMember],
    palette: &[String],
) -> Sequence {
    let Some(json) = saved_json else {
        return Sequence::seeded(cast, palette);
    };
    match Sequence::from_json(json, cast, palette) {
        Ok(sequence) => {
            log::debug!("restored {} saved formation(s)", sequence.len());
            sequence
        }
        Err(e) => {
            log::warn!("ignoring unreadable saved formations: {e}");
            Sequence::seeded(cast, palette)
        }
    }
}

/// Seeded RNG for cluster layouts when the options pin a seed.
pub(super) fn cluster_rng(layout: &LayoutOptions) -> Option<ChaCha8Rng> {
    layout.cluster_seed.map(ChaCha8Rng::seed_from_u64)
}
