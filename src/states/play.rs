use super::{GameState, Stage, StateTransition};
use crate::core::Session;
use crate::models::Card;
use cgmath::{Vector3, vec2, vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;

/// Drawing surface the play table renders into.
pub trait CardCanvas {
    /// Called once per card, bottom-most first.
    fn draw_card(&mut self, card: &Card, lifted: bool);
}

/// The card table.
///
/// Tapping a card brings it to the front. Holding on a card lifts it and it
/// follows the pointer until released.
pub struct PlayState {
    stage: Stage<Card>,
    lifted: Option<Rc<Card>>,
    last_pointer: Vector3<f32>,
    elapsed: f32,
}

impl PlayState {
    pub fn new(hold_threshold: f32) -> Self {
        Self {
            stage: Stage::new(hold_threshold),
            lifted: None,
            last_pointer: vec3(0.0, 0.0, 0.0),
            elapsed: 0.0,
        }
    }

    pub fn stage(&mut self) -> &mut Stage<Card> {
        &mut self.stage
    }

    pub fn lifted(&self) -> Option<&Rc<Card>> {
        self.lifted.as_ref()
    }

    /// Seconds spent in this state.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn deal(&mut self, session: &mut Session) {
        let table = session.settings.table;
        let viewport = session.camera.viewport();
        let max_x = deal_extent(viewport.x, table.card_width);
        let max_y = deal_extent(viewport.y, table.card_height);
        let mut rng = StdRng::seed_from_u64(table.seed);

        for id in 0..table.card_count {
            let origin = vec2(rng.random_range(0.0..=max_x), rng.random_range(0.0..=max_y));
            let card = Card::new(
                id,
                origin,
                vec2(table.card_width, table.card_height),
                session.next_z(),
            );
            self.stage.add_entity(Rc::new(card));
        }
    }
}

/// Upper bound for a card's origin along one axis. Degenerate sizes collapse
/// to 0 so every card lands on the edge.
fn deal_extent(viewport: f32, card: f32) -> f32 {
    let extent = viewport - card;
    if extent.is_finite() { extent.max(0.0) } else { 0.0 }
}

impl<S: CardCanvas> GameState<S> for PlayState {
    fn init(&mut self, session: &mut Session) {
        session.reset_next_z();
        self.deal(session);
        log::info!("PLAY: Dealt {} cards", self.stage.len());
    }

    fn handle_input(&mut self, delta_time: f32, session: &mut Session) {
        let pointer = self.stage.mouse_position(&session.pointer, &session.camera);

        if self.stage.is_just_touched(&session.pointer) {
            if let Some(card) = self.stage.top_entity_at(pointer) {
                card.set_z(session.next_z());
                log::debug!("PLAY: Card {} brought to front", card.id());
            }
        }

        let held = self.stage.is_held(&session.pointer, delta_time);
        log::trace!(target: "hold", "{}", self.stage.hold_status());

        if held {
            match &self.lifted {
                Some(card) => card.move_by((pointer - self.last_pointer).truncate()),
                None => {
                    self.lifted = self.stage.top_entity_at(pointer);
                    if let Some(card) = &self.lifted {
                        log::debug!("PLAY: Lifted card {}", card.id());
                    }
                }
            }
        } else if let Some(card) = self.lifted.take() {
            log::debug!("PLAY: Dropped card {} at {:?}", card.id(), card.origin());
        }

        self.last_pointer = pointer;
    }

    fn update(&mut self, delta_time: f32, _session: &mut Session) -> StateTransition {
        self.elapsed += delta_time;
        StateTransition::None
    }

    fn draw(&mut self, surface: &mut S) {
        let lifted = self.lifted.clone();
        for card in self.stage.entities() {
            let is_lifted = lifted.as_ref().is_some_and(|l| Rc::ptr_eq(l, card));
            surface.draw_card(card, is_lifted);
        }
    }

    fn dispose(&mut self, _session: &mut Session) {
        let count = self.stage.len();
        self.lifted = None;
        self.stage.clear();
        log::info!("PLAY: Disposed {} cards", count);
    }
}
