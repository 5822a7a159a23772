use super::{CardCanvas, GameState, PlayState, StateId, StateTransition};
use crate::core::Session;
use crate::error::StateError;
use std::collections::HashMap;

/// Builds a fresh, not yet initialized state.
pub type StateConstructor<S> = Box<dyn Fn(&Session) -> Box<dyn GameState<S>>>;

/// Maps state identifiers to constructors. Games extend it with their own.
pub struct StateRegistry<S> {
    constructors: HashMap<StateId, StateConstructor<S>>,
}

impl<S> StateRegistry<S> {
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registers (or replaces) the constructor for `id`.
    pub fn register<F>(&mut self, id: StateId, constructor: F)
    where
        F: Fn(&Session) -> Box<dyn GameState<S>> + 'static,
    {
        self.constructors.insert(id, Box::new(constructor));
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.constructors.contains_key(&id)
    }

    fn build(&self, id: StateId, session: &Session) -> Option<Box<dyn GameState<S>>> {
        self.constructors.get(&id).map(|constructor| constructor(session))
    }
}

impl<S> Default for StateRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CardCanvas + 'static> StateRegistry<S> {
    /// Registry with the card table as `PLAY`. `MENU` is left unregistered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(StateId::PLAY, |session: &Session| {
            Box::new(PlayState::new(session.settings.input.hold_threshold)) as Box<dyn GameState<S>>
        });
        registry
    }
}

struct ActiveState<S> {
    id: StateId,
    state: Box<dyn GameState<S>>,
}

/// Owns the session and the single active state.
///
/// Switching always disposes the old state before the new one is built, so
/// two states are never alive together. Switching to an identifier with no
/// registered constructor still disposes the old state and leaves the
/// manager without an active state; `update`, `handle_input` and `draw` are
/// no-ops until the next successful `set_state`.
pub struct GameStateManager<S> {
    session: Session,
    registry: StateRegistry<S>,
    active: Option<ActiveState<S>>,
}

impl<S: CardCanvas + 'static> GameStateManager<S> {
    /// Manager with the default registry, starting in `settings.initial_state`.
    pub fn from_session(session: Session) -> Result<Self, StateError> {
        let initial = session.settings.initial_state;
        Self::with_initial(session, StateRegistry::with_defaults(), initial)
    }
}

impl<S> GameStateManager<S> {
    /// Creates the manager and immediately enters `PLAY`.
    ///
    /// If `PLAY` is not registered the manager starts without an active state.
    pub fn new(session: Session, registry: StateRegistry<S>) -> Self {
        let mut manager = Self {
            session,
            registry,
            active: None,
        };
        if let Err(e) = manager.set_state(StateId::PLAY) {
            log::warn!("STATE: Starting without an active state: {}", e);
        }
        manager
    }

    /// Creates the manager and enters `initial`.
    pub fn with_initial(
        session: Session,
        registry: StateRegistry<S>,
        initial: StateId,
    ) -> Result<Self, StateError> {
        let mut manager = Self {
            session,
            registry,
            active: None,
        };
        manager.set_state(initial)?;
        Ok(manager)
    }

    /// Disposes the active state, then builds and initializes `id`.
    ///
    /// Returns `StateError::Unregistered` when nothing is registered for `id`;
    /// the old state is disposed either way.
    pub fn set_state(&mut self, id: StateId) -> Result<(), StateError> {
        if let Some(mut old) = self.active.take() {
            old.state.dispose(&mut self.session);
            log::info!("STATE: Exited {}", old.id);
        }

        let Some(mut state) = self.registry.build(id, &self.session) else {
            log::warn!("STATE: No state registered for {}, no active state", id);
            return Err(StateError::Unregistered(id));
        };

        state.init(&mut self.session);
        self.active = Some(ActiveState { id, state });
        log::info!("STATE: Entered {}", id);
        Ok(())
    }

    /// Forwards input handling to the active state.
    pub fn handle_input(&mut self, delta_time: f32) {
        if let Some(active) = self.active.as_mut() {
            active.state.handle_input(delta_time, &mut self.session);
        }
    }

    /// Updates the active state and applies the transition it asks for.
    pub fn update(&mut self, delta_time: f32) -> Result<(), StateError> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };

        match active.state.update(delta_time, &mut self.session) {
            StateTransition::None => Ok(()),
            StateTransition::Switch(id) => self.set_state(id),
        }
    }

    pub fn draw(&mut self, surface: &mut S) {
        if let Some(active) = self.active.as_mut() {
            active.state.draw(surface);
        }
    }

    /// Runs one frame in the usual order: input, update, draw.
    pub fn frame(&mut self, delta_time: f32, surface: &mut S) -> Result<(), StateError> {
        self.handle_input(delta_time);
        let result = self.update(delta_time);
        self.draw(surface);
        result
    }

    pub fn active_id(&self) -> Option<StateId> {
        self.active.as_ref().map(|active| active.id)
    }

    pub fn has_active_state(&self) -> bool {
        self.active.is_some()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn registry_mut(&mut self) -> &mut StateRegistry<S> {
        &mut self.registry
    }
}

impl<S> Drop for GameStateManager<S> {
    fn drop(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.state.dispose(&mut self.session);
            log::info!("STATE: Exited {} on shutdown", active.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Card;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<String>>>;

    /// Surface that ignores cards and keeps a log of frames.
    #[derive(Default)]
    struct Frames {
        cards: usize,
        drawn: Vec<&'static str>,
    }

    impl CardCanvas for Frames {
        fn draw_card(&mut self, _card: &Card, _lifted: bool) {
            self.cards += 1;
        }
    }

    struct Probe {
        name: &'static str,
        journal: Journal,
        next: Option<StateId>,
    }

    impl Probe {
        fn log(&self, event: &str) {
            self.journal.borrow_mut().push(format!("{}:{}", event, self.name));
        }
    }

    impl GameState<Frames> for Probe {
        fn init(&mut self, session: &mut Session) {
            session.next_z();
            self.log("init");
        }

        fn handle_input(&mut self, _delta_time: f32, _session: &mut Session) {
            self.log("input");
        }

        fn update(&mut self, _delta_time: f32, _session: &mut Session) -> StateTransition {
            self.log("update");
            match self.next.take() {
                Some(id) => StateTransition::Switch(id),
                None => StateTransition::None,
            }
        }

        fn draw(&mut self, surface: &mut Frames) {
            surface.drawn.push(self.name);
            self.log("draw");
        }

        fn dispose(&mut self, _session: &mut Session) {
            self.log("dispose");
        }
    }

    fn journal_registry(journal: &Journal) -> StateRegistry<Frames> {
        let mut registry = StateRegistry::new();
        for (id, name) in [(StateId::PLAY, "play"), (StateId(5), "extra")] {
            let journal = Rc::clone(journal);
            registry.register(id, move |_session: &Session| {
                Box::new(Probe {
                    name,
                    journal: Rc::clone(&journal),
                    next: None,
                }) as Box<dyn GameState<Frames>>
            });
        }
        registry
    }

    fn entries(journal: &Journal) -> Vec<String> {
        journal.borrow().clone()
    }

    #[test]
    fn test_new_starts_in_play() {
        let journal = Journal::default();
        let manager = GameStateManager::new(Session::default(), journal_registry(&journal));
        assert_eq!(manager.active_id(), Some(StateId::PLAY));
        assert_eq!(entries(&journal), vec!["init:play"]);
    }

    #[test]
    fn test_dispose_before_next_init() {
        let journal = Journal::default();
        let mut manager = GameStateManager::new(Session::default(), journal_registry(&journal));
        manager.set_state(StateId(5)).unwrap();
        manager.set_state(StateId::PLAY).unwrap();

        assert_eq!(
            entries(&journal),
            vec!["init:play", "dispose:play", "init:extra", "dispose:extra", "init:play"]
        );
    }

    #[test]
    fn test_play_to_menu_leaves_no_state() {
        let journal = Journal::default();
        let mut manager = GameStateManager::new(Session::default(), journal_registry(&journal));

        let result = manager.set_state(StateId::MENU);
        assert_eq!(result, Err(StateError::Unregistered(StateId::MENU)));
        assert!(!manager.has_active_state());
        assert_eq!(manager.active_id(), None);

        let mut frames = Frames::default();
        manager.handle_input(0.016);
        assert_eq!(manager.update(0.016), Ok(()));
        manager.draw(&mut frames);
        assert!(frames.drawn.is_empty());
        assert_eq!(entries(&journal), vec!["init:play", "dispose:play"]);

        // Recovers on the next valid switch.
        manager.set_state(StateId::PLAY).unwrap();
        assert_eq!(manager.active_id(), Some(StateId::PLAY));
    }

    #[test]
    fn test_forwarding_order() {
        let journal = Journal::default();
        let mut manager = GameStateManager::new(Session::default(), journal_registry(&journal));
        let mut frames = Frames::default();
        manager.frame(0.016, &mut frames).unwrap();

        assert_eq!(
            entries(&journal),
            vec!["init:play", "input:play", "update:play", "draw:play"]
        );
        assert_eq!(frames.drawn, vec!["play"]);
    }

    #[test]
    fn test_update_applies_requested_switch() {
        let journal = Journal::default();
        let mut registry = journal_registry(&journal);
        let switch_journal = Rc::clone(&journal);
        registry.register(StateId(9), move |_session: &Session| {
            Box::new(Probe {
                name: "switcher",
                journal: Rc::clone(&switch_journal),
                next: Some(StateId(5)),
            }) as Box<dyn GameState<Frames>>
        });

        let mut manager =
            GameStateManager::with_initial(Session::default(), registry, StateId(9)).unwrap();
        manager.update(0.016).unwrap();

        assert_eq!(manager.active_id(), Some(StateId(5)));
        assert_eq!(
            entries(&journal),
            vec!["init:switcher", "update:switcher", "dispose:switcher", "init:extra"]
        );
    }

    #[test]
    fn test_requested_switch_to_unknown_reports() {
        let journal = Journal::default();
        let mut registry = StateRegistry::new();
        let ctor_journal = Rc::clone(&journal);
        registry.register(StateId::PLAY, move |_session: &Session| {
            Box::new(Probe {
                name: "play",
                journal: Rc::clone(&ctor_journal),
                next: Some(StateId(42)),
            }) as Box<dyn GameState<Frames>>
        });

        let mut manager = GameStateManager::new(Session::default(), registry);
        assert_eq!(manager.update(0.016), Err(StateError::Unregistered(StateId(42))));
        assert!(!manager.has_active_state());
    }

    #[test]
    fn test_missing_play_starts_empty() {
        let manager: GameStateManager<Frames> =
            GameStateManager::new(Session::default(), StateRegistry::new());
        assert!(!manager.has_active_state());

        let err = GameStateManager::<Frames>::with_initial(
            Session::default(),
            StateRegistry::new(),
            StateId::MENU,
        )
        .err();
        assert_eq!(err, Some(StateError::Unregistered(StateId::MENU)));
    }

    #[test]
    fn test_drop_disposes_active_state() {
        let journal = Journal::default();
        let manager = GameStateManager::new(Session::default(), journal_registry(&journal));
        drop(manager);
        assert_eq!(entries(&journal), vec!["init:play", "dispose:play"]);
    }

    #[test]
    fn test_z_counter_is_per_manager() {
        let journal = Journal::default();
        let mut a = GameStateManager::new(Session::default(), journal_registry(&journal));
        let b = GameStateManager::new(Session::default(), journal_registry(&journal));
        a.set_state(StateId(5)).unwrap();

        assert_eq!(a.session().z_counter().peek(), 2);
        assert_eq!(b.session().z_counter().peek(), 1);
    }

    #[test]
    fn test_default_registry_plays_cards() {
        let mut settings = crate::models::Settings::default();
        settings.table.card_count = 3;
        let mut manager: GameStateManager<Frames> =
            GameStateManager::from_session(Session::new(settings)).unwrap();
        assert_eq!(manager.active_id(), Some(StateId::PLAY));
        assert!(!manager.registry_mut().contains(StateId::MENU));

        let mut frames = Frames::default();
        manager.frame(0.016, &mut frames).unwrap();
        assert_eq!(frames.cards, 3);

        assert!(manager.set_state(StateId::MENU).is_err());
        manager.draw(&mut frames);
        assert_eq!(frames.cards, 3);
    }
}
