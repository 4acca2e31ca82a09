//! Per-dancer positions part-way through a transition.
//!
//! Interpolation is a pure function of (source, target, progress, style):
//! no state is carried between frames, so callers can scrub to any
//! progress value directly.

use rustc_hash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::behaviors::behavior_for;
use crate::formation::{DancerId, DancerPosition, Formation, TransitionStyle};

/// How source dancers are matched to target dancers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PairingPolicy {
    /// Match by cast-wide dancer id. Dancers missing from the target hold
    /// their source position.
    #[default]
    ById,
    /// Match by array index. Trailing unmatched source dancers hold their
    /// source position.
    ByIndex,
}

/// Positions of every dancer at `global_t` of the transition from `source`
/// into `target`, using the target's arrival style.
#[must_use]
pub fn interpolate_formations(
    source: &Formation,
    target: &Formation,
    global_t: f32,
    pairing: PairingPolicy,
) -> Vec<DancerPosition> {
    interpolate(
        &source.dancers,
        &target.dancers,
        global_t,
        target.entry_style(),
        pairing,
    )
}

/// Positions of every source dancer at `global_t` of a transition in
/// `style`.
///
/// The output is always one record per source dancer, in source order.
/// Target dancers with no source partner are not shown until the target
/// formation itself is displayed.
#[must_use]
pub fn interpolate(
    source: &[DancerPosition],
    target: &[DancerPosition],
    global_t: f32,
    style: TransitionStyle,
    pairing: PairingPolicy,
) -> Vec<DancerPosition> {
    let behavior = behavior_for(style);
    let delays = behavior.stagger_delays(source);
    let partners = partners(source, target, pairing);

    source
        .iter()
        .zip(delays)
        .zip(partners)
        .map(|((dancer, delay), partner)| match partner {
            Some(partner) => {
                let eased = behavior.eased_t(global_t, delay);
                let from = dancer.pos();
                dancer.moved_to(from + (partner.pos() - from) * eased)
            }
            None => dancer.clone(),
        })
        .collect()
}

/// Target partner for each source dancer, in source order.
fn partners<'a>(
    source: &[DancerPosition],
    target: &'a [DancerPosition],
    pairing: PairingPolicy,
) -> Vec<Option<&'a DancerPosition>> {
    match pairing {
        PairingPolicy::ByIndex => {
            (0..source.len()).map(|i| target.get(i)).collect()
        }
        PairingPolicy::ById => {
            let by_id: FxHashMap<&DancerId, &DancerPosition> =
                target.iter().map(|d| (&d.dancer_id, d)).collect();
            source
                .iter()
                .map(|d| by_id.get(&d.dancer_id).copied())
                .collect()
        }
    }
}
