//! The ordered formation list and every structural edit on it.
//!
//! Edits follow an immutable-update discipline: each returns a new
//! [`Sequence`] and leaves `self` untouched, so a renderer holding the
//! previous value never sees a half-applied change. Invalid requests
//! (unknown index, unknown dancer, deleting the last formation) return an
//! unchanged copy instead of failing.

use glam::Vec2;
use rand::Rng;
use rustc_hash::FxHashSet;

use super::cast::{next_unused_color, seed_formation, CastMember};
use super::template::{layout_with_rng, LayoutTemplate};
use super::{
    on_stage_grid, DancerId, DancerPosition, Formation, FormationId,
    PositionId, TransitionStyle,
};
use crate::error::ChoreoError;

/// Beats per count block used to label new formations.
const COUNTS_PER_FORMATION: usize = 8;

/// Where a freshly added dancer first stands.
const NEW_DANCER_POS: Vec2 = Vec2::new(50.0, 50.0);

/// An ordered, never-empty list of formations plus a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    formations: Vec<Formation>,
    current_index: usize,
}

impl Sequence {
    /// A one-formation sequence.
    #[must_use]
    pub fn new(mut first: Formation) -> Self {
        first.snap_to_grid();
        Self {
            formations: vec![first],
            current_index: 0,
        }
    }

    /// Sequence over saved formations; `None` when the list is empty.
    ///
    /// Coordinates are rounded onto the storage grid on the way in.
    #[must_use]
    pub fn from_formations(mut formations: Vec<Formation>) -> Option<Self> {
        if formations.is_empty() {
            return None;
        }
        formations.iter_mut().for_each(Formation::snap_to_grid);
        Some(Self {
            formations,
            current_index: 0,
        })
    }

    /// Default sequence for a cast with no saved choreography.
    #[must_use]
    pub fn seeded(cast: &[CastMember], palette: &[String]) -> Self {
        Self::new(seed_formation(cast, palette))
    }

    /// Restore saved formations, falling back to a seeded default when
    /// nothing (or an empty list) was saved.
    #[must_use]
    pub fn restore(
        saved: Option<Vec<Formation>>,
        cast: &[CastMember],
        palette: &[String],
    ) -> Self {
        saved
            .and_then(Self::from_formations)
            .unwrap_or_else(|| Self::seeded(cast, palette))
    }

    /// Parse the saved JSON formation array (`null` and `[]` fall back to
    /// the seeded default).
    pub fn from_json(
        json: &str,
        cast: &[CastMember],
        palette: &[String],
    ) -> Result<Self, ChoreoError> {
        let saved: Option<Vec<Formation>> = serde_json::from_str(json)?;
        Ok(Self::restore(saved, cast, palette))
    }

    /// Serialize the formation array for the storage collaborator.
    ///
    /// The cursor is view state and is not included.
    pub fn to_json(&self) -> Result<String, ChoreoError> {
        Ok(serde_json::to_string(&self.formations)?)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// All formations in order.
    #[must_use]
    pub fn formations(&self) -> &[Formation] {
        &self.formations
    }

    /// Formation at `index`.
    #[must_use]
    pub fn formation(&self, index: usize) -> Option<&Formation> {
        self.formations.get(index)
    }

    /// Number of formations (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.formations.len()
    }

    /// Always false; a sequence holds at least one formation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formations.is_empty()
    }

    /// Index of the formation being viewed/edited.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The formation being viewed/edited.
    #[must_use]
    pub fn current(&self) -> &Formation {
        &self.formations[self.current_index]
    }

    /// Source and target of the transition leaving `from`, if it has a
    /// successor.
    #[must_use]
    pub fn transition_pair(
        &self,
        from: usize,
    ) -> Option<(&Formation, &Formation)> {
        Some((self.formations.get(from)?, self.formations.get(from + 1)?))
    }

    /// Every cast member appearing anywhere, first appearance wins.
    #[must_use]
    pub fn roster(&self) -> Vec<&DancerPosition> {
        let mut seen = FxHashSet::default();
        self.formations
            .iter()
            .flat_map(|f| &f.dancers)
            .filter(|d| seen.insert(&d.dancer_id))
            .collect()
    }

    pub(crate) fn set_current_index(&mut self, index: usize) {
        self.current_index = index.min(self.formations.len() - 1);
    }

    fn next_position_id(&self) -> u64 {
        self.formations
            .iter()
            .flat_map(|f| &f.dancers)
            .map(|d| d.id.0)
            .max()
            .map_or(1, |max| max + 1)
    }

    fn next_formation_id(&self) -> FormationId {
        let max = self.formations.iter().map(|f| f.id.0).max().unwrap_or(0);
        FormationId(max + 1)
    }

    /// Copy with `edit` applied to the formation at `index`; an unchanged
    /// copy if there is none.
    fn with_formation(
        &self,
        index: usize,
        edit: impl FnOnce(&mut Formation),
    ) -> Self {
        let mut next = self.clone();
        match next.formations.get_mut(index) {
            Some(formation) => edit(formation),
            None => log::debug!("no formation at index {index}"),
        }
        next
    }

    /// Copy with `edit` applied to every formation.
    fn with_each_formation(&self, mut edit: impl FnMut(&mut Formation)) -> Self {
        let mut next = self.clone();
        next.formations.iter_mut().for_each(&mut edit);
        next
    }

    // ── Edits ────────────────────────────────────────────────────────

    /// Move the cursor to `index` (clamped).
    #[must_use]
    pub fn select(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.set_current_index(index);
        next
    }

    /// Re-place every dancer of one formation with a layout template,
    /// keeping ids, names and colors.
    #[must_use]
    pub fn apply_template<R: Rng + ?Sized>(
        &self,
        index: usize,
        template: LayoutTemplate,
        rng: &mut R,
    ) -> Self {
        self.with_formation(index, |formation| {
            let points =
                layout_with_rng(template, formation.dancers.len(), rng);
            for (dancer, pos) in formation.dancers.iter_mut().zip(points) {
                dancer.x = pos.x;
                dancer.y = pos.y;
            }
            log::debug!(
                "applied {} layout to '{}'",
                template.name(),
                formation.name
            );
        })
    }

    /// Append a copy of the last formation and make it current.
    #[must_use]
    pub fn add_formation(&self) -> Self {
        let len = self.formations.len();
        let last = &self.formations[len - 1];
        let formation = Formation {
            id: self.next_formation_id(),
            name: format!("Formation {}", len + 1),
            count_label: format!(
                "{}-{}",
                len * COUNTS_PER_FORMATION + 1,
                (len + 1) * COUNTS_PER_FORMATION
            ),
            dancers: fresh_copies(&last.dancers, self.next_position_id()),
            transition_style: Some(TransitionStyle::Direct),
        };

        let mut next = self.clone();
        next.formations.push(formation);
        next.current_index = len;
        next
    }

    /// Insert a copy of the formation at `index` right after it and make
    /// the copy current. The copy gets fresh position ids.
    #[must_use]
    pub fn duplicate_formation(&self, index: usize) -> Self {
        let Some(original) = self.formations.get(index) else {
            log::debug!("duplicate ignored: no formation at index {index}");
            return self.clone();
        };
        let copy = Formation {
            id: self.next_formation_id(),
            name: format!("{} (copy)", original.name),
            count_label: original.count_label.clone(),
            dancers: fresh_copies(&original.dancers, self.next_position_id()),
            transition_style: original.transition_style,
        };

        let mut next = self.clone();
        next.formations.insert(index + 1, copy);
        next.current_index = index + 1;
        next
    }

    /// Remove the formation at `index`. The only remaining formation can
    /// never be removed.
    #[must_use]
    pub fn delete_formation(&self, index: usize) -> Self {
        if self.formations.len() <= 1 {
            log::debug!("delete ignored: last remaining formation");
            return self.clone();
        }
        if index >= self.formations.len() {
            log::debug!("delete ignored: no formation at index {index}");
            return self.clone();
        }

        let mut next = self.clone();
        let _ = next.formations.remove(index);
        let cursor = if index < self.current_index {
            self.current_index - 1
        } else {
            self.current_index
        };
        next.set_current_index(cursor);
        next
    }

    /// Add a new cast member to every formation, centered, wearing the
    /// first palette color nobody has yet.
    #[must_use]
    pub fn add_dancer(&self, palette: &[String]) -> Self {
        let roster = self.roster();
        let taken: FxHashSet<&str> =
            roster.iter().map(|d| d.dancer_id.as_str()).collect();
        let dancer_id = (1..)
            .map(|k| format!("dancer-{k}"))
            .find(|id| !taken.contains(id.as_str()))
            .map_or_else(|| DancerId::from("dancer"), DancerId);
        let owned: Vec<DancerPosition> =
            roster.iter().map(|&d| d.clone()).collect();
        let color = next_unused_color(palette, &owned);
        let name = format!("Dancer {}", roster.len() + 1);
        log::debug!("adding {dancer_id} ({name}) to every formation");

        let mut position_id = self.next_position_id();
        self.with_each_formation(|formation| {
            formation.dancers.push(DancerPosition {
                id: PositionId(position_id),
                dancer_id: dancer_id.clone(),
                name: name.clone(),
                x: NEW_DANCER_POS.x,
                y: NEW_DANCER_POS.y,
                color: color.clone(),
            });
            position_id += 1;
        })
    }

    /// Remove a cast member from every formation.
    #[must_use]
    pub fn remove_dancer(&self, dancer_id: &DancerId) -> Self {
        self.with_each_formation(|formation| {
            formation.dancers.retain(|d| &d.dancer_id != dancer_id);
        })
    }

    /// Rename a cast member in every formation.
    #[must_use]
    pub fn rename_dancer(&self, dancer_id: &DancerId, name: &str) -> Self {
        self.with_each_formation(|formation| {
            formation
                .dancers
                .iter_mut()
                .filter(|d| &d.dancer_id == dancer_id)
                .for_each(|d| name.clone_into(&mut d.name));
        })
    }

    /// Move one dancer in one formation, clamped to
    /// `[margin, 100 - margin]` on both axes and rounded onto the storage
    /// grid.
    #[must_use]
    pub fn drag_dancer(
        &self,
        index: usize,
        dancer_id: &DancerId,
        pos: Vec2,
        margin: f32,
    ) -> Self {
        let lo = on_stage_grid(Vec2::splat(margin));
        let hi = on_stage_grid(Vec2::splat(100.0 - margin));
        let clamped = on_stage_grid(pos).clamp(lo, hi);
        self.with_formation(index, |formation| {
            if let Some(dancer) = formation
                .dancers
                .iter_mut()
                .find(|d| &d.dancer_id == dancer_id)
            {
                dancer.x = clamped.x;
                dancer.y = clamped.y;
            }
        })
    }

    /// Flip one formation left-to-right.
    #[must_use]
    pub fn mirror(&self, index: usize) -> Self {
        self.with_formation(index, |formation| {
            for dancer in &mut formation.dancers {
                dancer.x = 100.0 - dancer.x;
            }
        })
    }

    /// Set the style used to arrive at `index`. Ignored for the first
    /// formation, which has no predecessor.
    #[must_use]
    pub fn set_transition_style(
        &self,
        index: usize,
        style: TransitionStyle,
    ) -> Self {
        if index == 0 {
            log::debug!("transition style ignored on the opening formation");
            return self.clone();
        }
        self.with_formation(index, |formation| {
            formation.transition_style = Some(style);
        })
    }

    /// Rename a formation.
    #[must_use]
    pub fn rename_formation(&self, index: usize, name: &str) -> Self {
        self.with_formation(index, |formation| {
            name.clone_into(&mut formation.name);
        })
    }

    /// Replace a formation's musical count annotation.
    #[must_use]
    pub fn set_count_label(&self, index: usize, label: &str) -> Self {
        self.with_formation(index, |formation| {
            label.clone_into(&mut formation.count_label);
        })
    }
}

/// Copies of `dancers` with consecutive fresh position ids from `first_id`.
fn fresh_copies(dancers: &[DancerPosition], first_id: u64) -> Vec<DancerPosition> {
    dancers
        .iter()
        .zip(first_id..)
        .map(|(d, id)| DancerPosition {
            id: PositionId(id),
            ..d.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::formation::STAGE_GRID;
    use crate::options::DEFAULT_PALETTE;

    fn palette() -> Vec<String> {
        DEFAULT_PALETTE.iter().map(|&c| c.to_owned()).collect()
    }

    fn cast() -> Vec<CastMember> {
        vec![
            CastMember::new("ana", "Ana"),
            CastMember::new("bo", "Bo"),
            CastMember::new("cy", "Cy"),
        ]
    }

    fn three_formations() -> Sequence {
        Sequence::seeded(&cast(), &palette())
            .add_formation()
            .add_formation()
    }

    fn all_position_ids(seq: &Sequence) -> Vec<PositionId> {
        seq.formations()
            .iter()
            .flat_map(|f| f.dancers.iter().map(|d| d.id))
            .collect()
    }

    #[test]
    fn delete_guard_keeps_last_formation() {
        let seq = Sequence::seeded(&cast(), &palette());
        assert_eq!(seq.delete_formation(0), seq);
    }

    #[test]
    fn delete_clamps_cursor() {
        let seq = three_formations();
        assert_eq!(seq.current_index(), 2);
        let next = seq.delete_formation(2);
        assert_eq!(next.len(), 2);
        assert_eq!(next.current_index(), 1);

        // Deleting before the cursor keeps the same formation selected
        let seq = three_formations().select(2);
        let next = seq.delete_formation(0);
        assert_eq!(next.current().name, "Formation 3");
    }

    #[test]
    fn delete_out_of_range_is_noop() {
        let seq = three_formations();
        assert_eq!(seq.delete_formation(9), seq);
    }

    #[test]
    fn add_dancer_fans_out_to_every_formation() {
        let seq = three_formations();
        let next = seq.add_dancer(&palette());
        assert!(next.formations().iter().all(|f| f.dancers.len() == 4));

        let added: Vec<&DancerPosition> = next
            .formations()
            .iter()
            .map(|f| &f.dancers[3])
            .collect();
        assert!(added.iter().all(|d| d.dancer_id == added[0].dancer_id));
        assert!(added.iter().all(|d| d.pos() == NEW_DANCER_POS));
        // Fourth palette color: first three are worn by the cast
        assert_eq!(added[0].color, DEFAULT_PALETTE[3]);
        assert_eq!(added[0].name, "Dancer 4");

        // Position ids stay unique across the sequence
        let ids = all_position_ids(&next);
        let unique: FxHashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn remove_and_rename_fan_out() {
        let seq = three_formations();
        let bo = DancerId::from("bo");

        let renamed = seq.rename_dancer(&bo, "Bobby");
        assert!(renamed
            .formations()
            .iter()
            .all(|f| f.dancer(&bo).is_some_and(|d| d.name == "Bobby")));

        let removed = seq.remove_dancer(&bo);
        assert!(removed
            .formations()
            .iter()
            .all(|f| f.dancers.len() == 2 && f.dancer(&bo).is_none()));
    }

    #[test]
    fn mirror_twice_is_identity() {
        let ana = DancerId::from("ana");
        let bo = DancerId::from("bo");
        let seq = Sequence::seeded(&cast(), &palette())
            .drag_dancer(0, &ana, Vec2::new(20.0, 30.0), 5.0)
            .drag_dancer(0, &bo, Vec2::new(62.5, 70.0), 5.0)
            .drag_dancer(0, &DancerId::from("cy"), Vec2::new(45.0, 50.0), 5.0);
        let once = seq.mirror(0);
        assert_ne!(once, seq);
        assert_eq!(once.current().dancer(&ana).unwrap().x, 80.0);
        assert_eq!(once.mirror(0), seq);
    }

    #[test]
    fn mirror_only_touches_target_formation() {
        let seq = three_formations();
        let next = seq.mirror(1);
        assert_eq!(next.formation(0), seq.formation(0));
        assert_eq!(next.formation(2), seq.formation(2));
        assert_eq!(next.mirror(1), seq);
    }

    #[test]
    fn mirror_restores_seeded_grids_exactly() {
        for n in 1..=12 {
            let cast: Vec<CastMember> = (0..n)
                .map(|i| CastMember::new(&format!("d{i}"), format!("D{i}")))
                .collect();
            let seq = Sequence::seeded(&cast, &palette());
            assert_eq!(seq.mirror(0).mirror(0), seq, "{n} dancers");
        }
    }

    #[test]
    fn mirror_restores_every_template_exactly() {
        let cast: Vec<CastMember> = (0..7)
            .map(|i| CastMember::new(&format!("d{i}"), format!("D{i}")))
            .collect();
        let seq = Sequence::seeded(&cast, &palette());
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for template in LayoutTemplate::ALL {
            let laid_out = seq.apply_template(0, template, &mut rng);
            assert_eq!(
                laid_out.mirror(0).mirror(0),
                laid_out,
                "{}",
                template.name()
            );
        }
    }

    #[test]
    fn drag_rounds_onto_grid() {
        let ana = DancerId::from("ana");
        let seq = Sequence::seeded(&cast(), &palette()).drag_dancer(
            0,
            &ana,
            Vec2::new(33.333, 12.345),
            5.0,
        );
        let x = seq.current().dancer(&ana).unwrap().x;
        assert_eq!(x, on_stage_grid(Vec2::splat(33.333)).x);
        assert_eq!(seq.mirror(0).mirror(0), seq);
    }

    #[test]
    fn restored_formations_land_on_grid() {
        let mut formation = Sequence::seeded(&cast(), &palette()).current().clone();
        formation.dancers[0].x = 36.666_668;
        let seq = Sequence::from_formations(vec![formation]).unwrap();
        let x = seq.current().dancers[0].x;
        assert!((x - 36.666_668).abs() <= 0.5 / STAGE_GRID);
        assert_eq!(seq.mirror(0).mirror(0), seq);
    }

    #[test]
    fn add_formation_continues_count_blocks() {
        let seq = three_formations();
        assert_eq!(seq.len(), 3);
        let third = seq.formation(2).unwrap();
        assert_eq!(third.name, "Formation 3");
        assert_eq!(third.count_label, "17-24");
        assert_eq!(seq.formation(1).unwrap().count_label, "9-16");

        // Same cast and coordinates, fresh position ids
        let first = seq.formation(0).unwrap();
        for (a, b) in first.dancers.iter().zip(&third.dancers) {
            assert_eq!(a.dancer_id, b.dancer_id);
            assert_eq!(a.color, b.color);
            assert_eq!(a.pos(), b.pos());
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn duplicate_inserts_unaliased_copy() {
        let seq = three_formations().select(0);
        let dup = seq.duplicate_formation(0);
        assert_eq!(dup.len(), 4);
        assert_eq!(dup.current_index(), 1);
        let copy = dup.formation(1).unwrap();
        assert_eq!(copy.name, "Formation 1 (copy)");

        let original = dup.formation(0).unwrap();
        assert!(original
            .dancers
            .iter()
            .all(|d| copy.dancers.iter().all(|c| c.id != d.id)));
        assert_ne!(copy.id, original.id);

        // Dragging in the copy never moves the original
        let dragged =
            dup.drag_dancer(1, &DancerId::from("ana"), Vec2::new(70.0, 70.0), 5.0);
        assert_eq!(dragged.formation(0), dup.formation(0));
        assert_eq!(
            dragged.formation(1).unwrap().dancers[0].pos(),
            Vec2::new(70.0, 70.0)
        );
    }

    #[test]
    fn drag_clamps_to_margin() {
        let seq = Sequence::seeded(&cast(), &palette());
        let ana = DancerId::from("ana");
        let next = seq.drag_dancer(0, &ana, Vec2::new(-20.0, 140.0), 5.0);
        let dancer = next.current().dancer(&ana).unwrap();
        assert_eq!(dancer.pos(), Vec2::new(5.0, 95.0));

        // Unknown dancer leaves everything alone
        let same =
            seq.drag_dancer(0, &DancerId::from("zed"), Vec2::new(1.0, 1.0), 5.0);
        assert_eq!(same, seq);
    }

    #[test]
    fn transition_style_ignored_on_opening_formation() {
        let seq = three_formations();
        assert_eq!(seq.set_transition_style(0, TransitionStyle::Cascade), seq);

        let next = seq.set_transition_style(2, TransitionStyle::WaveLeftToRight);
        assert_eq!(
            next.formation(2).unwrap().entry_style(),
            TransitionStyle::WaveLeftToRight
        );
    }

    #[test]
    fn apply_template_preserves_identity() {
        let seq = Sequence::seeded(&cast(), &palette());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let next = seq.apply_template(0, LayoutTemplate::Line, &mut rng);
        let before = seq.current();
        let after = next.current();
        for (a, b) in before.dancers.iter().zip(&after.dancers) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.name, b.name);
            assert_eq!(a.color, b.color);
            assert_eq!(b.y, 50.0);
        }
        assert!(after.dancers.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn labels_are_editable() {
        let seq = Sequence::seeded(&cast(), &palette())
            .rename_formation(0, "Opening")
            .set_count_label(0, "1-16");
        assert_eq!(seq.current().name, "Opening");
        assert_eq!(seq.current().count_label, "1-16");
    }

    #[test]
    fn json_round_trip_restores_formations() {
        let seq = three_formations()
            .set_transition_style(1, TransitionStyle::Staggered)
            .select(0);
        let json = seq.to_json().unwrap();
        let restored = Sequence::from_json(&json, &[], &palette()).unwrap();
        assert_eq!(restored, seq);

        // Plain JSON data: an array of formation objects
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
        assert_eq!(value[1]["transitionStyle"], "staggered");
    }

    #[test]
    fn missing_or_empty_saved_data_falls_back_to_seed() {
        for json in ["null", "[]"] {
            let seq = Sequence::from_json(json, &cast(), &palette()).unwrap();
            assert_eq!(seq.len(), 1);
            assert_eq!(seq.current().dancers.len(), 3);
        }
        assert!(Sequence::from_json("{oops", &cast(), &palette()).is_err());
    }

    #[test]
    fn roster_lists_each_dancer_once() {
        let seq = three_formations().add_dancer(&palette());
        let roster = seq.roster();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster[0].dancer_id, DancerId::from("ana"));
    }
}
