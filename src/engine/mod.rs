//! The choreography engine: one owner for the saved sequence, playback
//! state and options.
//!
//! Hosts drive it with [`ChoreographyCommand`]s and pull render markers
//! once per animation frame:
//!
//! ```ignore
//! let mut engine = ChoreographyEngine::new(options, &cast, saved.as_deref());
//! engine.execute(ChoreographyCommand::Play);
//! // every frame
//! engine.tick(Instant::now());
//! draw(engine.render_markers());
//! ```

mod accessors;
pub mod command;
mod construction;

pub use command::ChoreographyCommand;
use glam::Vec2;
use rand_chacha::ChaCha8Rng;
use web_time::Instant;

use crate::animation::PlaybackSequencer;
use crate::formation::{CastMember, Sequence};
use crate::options::Options;

/// Formation editor and playback engine.
///
/// The saved [`Sequence`] and the transient [`PlaybackSequencer`] are kept
/// apart: playback only ever moves the sequence cursor, and every editing
/// command is refused while playback runs.
#[derive(Debug)]
pub struct ChoreographyEngine {
    options: Options,
    sequence: Sequence,
    sequencer: PlaybackSequencer,
    /// Seeded source for cluster layouts; `None` uses the thread RNG.
    cluster_rng: Option<ChaCha8Rng>,
}

impl ChoreographyEngine {
    /// Build an engine for `cast`, restoring `saved_json` when present.
    ///
    /// Unreadable saved data is logged and replaced by the seeded default
    /// formation so the editor always opens.
    #[must_use]
    pub fn new(
        options: Options,
        cast: &[CastMember],
        saved_json: Option<&str>,
    ) -> Self {
        let sequence = construction::restore_sequence(
            saved_json,
            cast,
            &options.stage.palette,
        );
        log::debug!(
            "engine ready: {} formation(s), {} cast member(s)",
            sequence.len(),
            cast.len()
        );
        Self {
            sequencer: PlaybackSequencer::new(&options.playback),
            cluster_rng: construction::cluster_rng(&options.layout),
            options,
            sequence,
        }
    }

    /// Execute a command now. Returns whether anything changed.
    pub fn execute(&mut self, command: ChoreographyCommand) -> bool {
        self.execute_at(command, Instant::now())
    }

    /// Execute a command, starting any playback at `now`.
    pub fn execute_at(
        &mut self,
        command: ChoreographyCommand,
        now: Instant,
    ) -> bool {
        if command.is_edit() && self.sequencer.is_playing() {
            log::debug!("{command:?} ignored during playback");
            return false;
        }
        match command {
            ChoreographyCommand::SetSpeed(speed) => {
                let changed = speed != self.sequencer.speed();
                self.sequencer.set_speed(speed, now);
                self.options.playback.speed = speed;
                changed
            }
            ChoreographyCommand::Play => {
                self.sequencer.play(&mut self.sequence, now)
            }
            ChoreographyCommand::Preview => {
                self.sequencer.preview(&self.sequence, now)
            }
            ChoreographyCommand::Stop => {
                let was_playing = self.sequencer.is_playing();
                self.sequencer.stop();
                was_playing
            }
            edit => {
                let next = self.edited(edit);
                self.commit(next)
            }
        }
    }

    /// The sequence after applying an editing command.
    fn edited(&mut self, command: ChoreographyCommand) -> Sequence {
        let seq = &self.sequence;
        let stage = &self.options.stage;
        match command {
            ChoreographyCommand::SelectFormation { index } => seq.select(index),
            ChoreographyCommand::AddFormation => seq.add_formation(),
            ChoreographyCommand::DuplicateFormation { index } => {
                seq.duplicate_formation(index)
            }
            ChoreographyCommand::DeleteFormation { index } => {
                seq.delete_formation(index)
            }
            ChoreographyCommand::RenameFormation { index, name } => {
                seq.rename_formation(index, &name)
            }
            ChoreographyCommand::SetCountLabel { index, label } => {
                seq.set_count_label(index, &label)
            }
            ChoreographyCommand::SetTransitionStyle { formation, style } => {
                seq.set_transition_style(formation, style)
            }
            ChoreographyCommand::ApplyTemplate {
                formation,
                template,
            } => match self.cluster_rng.as_mut() {
                Some(rng) => seq.apply_template(formation, template, rng),
                None => {
                    seq.apply_template(formation, template, &mut rand::rng())
                }
            },
            ChoreographyCommand::DragDancer {
                formation,
                dancer,
                x,
                y,
            } => seq.drag_dancer(
                formation,
                &dancer,
                Vec2::new(x, y),
                stage.drag_margin,
            ),
            ChoreographyCommand::Mirror { formation } => seq.mirror(formation),
            ChoreographyCommand::AddDancer => seq.add_dancer(&stage.palette),
            ChoreographyCommand::RemoveDancer { dancer } => {
                seq.remove_dancer(&dancer)
            }
            ChoreographyCommand::RenameDancer { dancer, name } => {
                seq.rename_dancer(&dancer, &name)
            }
            ChoreographyCommand::SetSpeed(_)
            | ChoreographyCommand::Play
            | ChoreographyCommand::Preview
            | ChoreographyCommand::Stop => seq.clone(),
        }
    }

    /// Swap in an edited sequence. Returns whether it differs.
    fn commit(&mut self, next: Sequence) -> bool {
        if next == self.sequence {
            return false;
        }
        self.sequence = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::formation::{DancerId, LayoutTemplate, TransitionStyle};
    use crate::options::TransitionSpeed;

    fn cast() -> Vec<CastMember> {
        vec![
            CastMember::new("ana", "Ana"),
            CastMember::new("bo", "Bo"),
            CastMember::new("cy", "Cy"),
            CastMember::new("di", "Di"),
        ]
    }

    fn engine() -> ChoreographyEngine {
        ChoreographyEngine::new(Options::default(), &cast(), None)
    }

    #[test]
    fn fresh_engine_seeds_one_formation() {
        let engine = engine();
        assert_eq!(engine.sequence().len(), 1);
        assert_eq!(engine.sequence().current().dancers.len(), 4);
        assert_eq!(engine.render_markers().len(), 4);
        assert!(!engine.playback_state().is_playing);
    }

    #[test]
    fn line_template_scenario() {
        let mut engine = engine();
        assert!(engine.execute(ChoreographyCommand::ApplyTemplate {
            formation: 0,
            template: LayoutTemplate::Line,
        }));
        let xs: Vec<f32> =
            engine.render_markers().iter().map(|m| m.x).collect();
        let expected = [10.0, 36.666_668, 63.333_336, 90.0];
        for (x, e) in xs.iter().zip(expected) {
            assert!((x - e).abs() <= 1.0 / 256.0, "{xs:?}");
        }
        assert!(engine.render_markers().iter().all(|m| m.y == 50.0));
    }

    #[test]
    fn unchanged_edits_report_false() {
        let mut engine = engine();
        assert!(!engine.execute(ChoreographyCommand::DeleteFormation {
            index: 0
        }));
        assert!(!engine.execute(ChoreographyCommand::RemoveDancer {
            dancer: DancerId::from("nobody"),
        }));
        assert!(!engine.execute(ChoreographyCommand::SetTransitionStyle {
            formation: 0,
            style: TransitionStyle::Cascade,
        }));
        assert_eq!(engine.sequence().len(), 1);
    }

    #[test]
    fn edits_rejected_during_playback() {
        let mut engine = engine();
        assert!(engine.execute(ChoreographyCommand::AddFormation));
        let t0 = Instant::now();
        assert!(engine.execute_at(ChoreographyCommand::Play, t0));

        let before = engine.sequence().clone();
        assert!(!engine.execute(ChoreographyCommand::AddDancer));
        assert!(!engine.execute(ChoreographyCommand::Mirror { formation: 1 }));
        assert!(!engine.execute(ChoreographyCommand::SelectFormation {
            index: 1
        }));
        assert!(!engine.execute(ChoreographyCommand::DragDancer {
            formation: 0,
            dancer: DancerId::from("ana"),
            x: 90.0,
            y: 90.0,
        }));
        assert_eq!(engine.sequence(), &before);
        assert_eq!(engine.render_markers().len(), 4);

        // Speed is a playback control, not an edit
        assert!(engine.execute(ChoreographyCommand::SetSpeed(
            TransitionSpeed::Fast
        )));
        assert_eq!(engine.playback_state().speed_ms, 1000);

        assert!(engine.execute(ChoreographyCommand::Stop));
        assert!(!engine.execute(ChoreographyCommand::Stop));
        assert!(engine.execute(ChoreographyCommand::AddDancer));
    }

    #[test]
    fn speed_change_mid_transition_keeps_progress() {
        let mut engine = engine();
        let _ = engine.execute(ChoreographyCommand::AddFormation);
        let t0 = Instant::now();
        assert!(engine.execute_at(ChoreographyCommand::Play, t0));
        assert!(engine.tick(t0 + Duration::from_millis(1000)));
        let reached = engine.playback_state().progress;
        assert!((reached - 0.5).abs() < 1e-3);

        assert!(engine.execute_at(
            ChoreographyCommand::SetSpeed(TransitionSpeed::Fast),
            t0 + Duration::from_millis(1000),
        ));
        assert!(engine.tick(t0 + Duration::from_millis(1000)));
        assert!((engine.playback_state().progress - reached).abs() < 1e-3);
        assert!(engine.playback_state().is_transitioning);
    }

    #[test]
    fn full_playback_through_engine() {
        let mut engine = engine();
        let _ = engine.execute(ChoreographyCommand::AddFormation);
        let _ = engine.execute(ChoreographyCommand::AddFormation);
        let _ = engine.execute(ChoreographyCommand::SetSpeed(
            TransitionSpeed::Fast,
        ));
        let t0 = Instant::now();
        assert!(engine.execute_at(ChoreographyCommand::Play, t0));
        assert_eq!(engine.sequence().current_index(), 0);

        // Cursor moves after each 500ms gap; arriving on the last
        // formation rewinds immediately.
        let mut now = t0;
        let mut landed = Vec::new();
        while engine.tick(now) {
            let idx = engine.sequence().current_index();
            if landed.last() != Some(&idx) {
                landed.push(idx);
            }
            now += Duration::from_millis(100);
        }
        assert_eq!(landed, vec![0, 1]);
        assert!(now >= t0 + Duration::from_millis(3000));
        assert_eq!(engine.sequence().current_index(), 0);
        assert!(!engine.playback_state().is_playing);
    }

    #[test]
    fn play_starts_from_first_formation() {
        let mut engine = engine();
        let _ = engine.execute(ChoreographyCommand::AddFormation);
        let _ = engine.execute(ChoreographyCommand::AddFormation);
        assert_eq!(engine.sequence().current_index(), 2);

        assert!(engine.execute(ChoreographyCommand::Play));
        assert_eq!(engine.sequence().current_index(), 0);
        assert_eq!(engine.render_markers().len(), 4);
    }

    #[test]
    fn preview_moves_cursor_by_one() {
        let mut engine = engine();
        let _ = engine.execute(ChoreographyCommand::AddFormation);
        let _ = engine.execute(ChoreographyCommand::SelectFormation {
            index: 0,
        });
        let t0 = Instant::now();
        assert!(engine.execute_at(ChoreographyCommand::Preview, t0));
        assert!(!engine.tick(t0 + Duration::from_secs(5)));
        assert_eq!(engine.sequence().current_index(), 1);

        // Now at the last formation
        assert!(!engine.execute(ChoreographyCommand::Preview));
    }

    #[test]
    fn seeded_cluster_layouts_repeat() {
        let mut options = Options::default();
        options.layout.cluster_seed = Some(42);
        let cluster = ChoreographyCommand::ApplyTemplate {
            formation: 0,
            template: LayoutTemplate::Cluster,
        };

        let mut a = ChoreographyEngine::new(options.clone(), &cast(), None);
        let mut b = ChoreographyEngine::new(options, &cast(), None);
        let _ = a.execute(cluster.clone());
        let _ = b.execute(cluster);
        assert_eq!(a.render_markers(), b.render_markers());
        for m in a.render_markers() {
            assert!((35.0..=65.0).contains(&m.x));
            assert!((35.0..=65.0).contains(&m.y));
        }
    }

    #[test]
    fn drag_uses_stage_margin() {
        let mut engine = engine();
        assert!(engine.execute(ChoreographyCommand::DragDancer {
            formation: 0,
            dancer: DancerId::from("ana"),
            x: -20.0,
            y: 120.0,
        }));
        let ana = engine
            .sequence()
            .current()
            .dancer(&DancerId::from("ana"))
            .cloned()
            .unwrap();
        assert_eq!((ana.x, ana.y), (5.0, 95.0));
    }

    #[test]
    fn saved_json_round_trips() {
        let mut engine = engine();
        let _ = engine.execute(ChoreographyCommand::AddFormation);
        let _ = engine.execute(ChoreographyCommand::RenameFormation {
            index: 1,
            name: "Chorus".to_owned(),
        });
        let json = engine.to_json().unwrap();

        let restored =
            ChoreographyEngine::new(Options::default(), &cast(), Some(&json));
        assert_eq!(
            restored.sequence().formations(),
            engine.sequence().formations()
        );
        assert_eq!(restored.sequence().current_index(), 0);
    }

    #[test]
    fn unreadable_saved_json_falls_back_to_seed() {
        for saved in ["{not json", "null", "[]"] {
            let engine =
                ChoreographyEngine::new(Options::default(), &cast(), Some(saved));
            assert_eq!(engine.sequence().len(), 1, "{saved}");
            assert_eq!(engine.sequence().current().name, "Formation 1");
        }
    }
}
