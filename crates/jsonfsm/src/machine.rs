//! A small table-driven state machine engine.
//!
//! The engine knows nothing about any particular grammar: states are plain
//! `usize` identifiers starting at [`Machine::START`], and behavior is wired
//! in by registering transition rules and entry actions over a caller-owned
//! context `C`. Rules and actions are plain function pointers, so the tables
//! capture nothing; all mutable working state lives in the context handed to
//! [`Machine::tick`].
//!
//! Failure policy: a rule or action that returns an error does not halt the
//! machine. The error is queued as a [`Fault`] and execution continues; the
//! driver is expected to drain the queue with [`Machine::take_faults`] and
//! decide what to do. Nothing is logged or dropped.

/// A transition rule. Runs on every tick while its state is current; may
/// change state via [`Machine::update_state`].
pub type Transition<C, E> = fn(&mut C, &mut Machine<C, E>) -> Result<(), E>;

/// An entry action. Fires exactly once each time the machine enters the
/// state it is registered for.
pub type EntryAction<C, E> = fn(&mut C) -> Result<(), E>;

/// An error reported by a rule or action, tagged with the state that was
/// current when it fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault<E> {
    pub state: usize,
    pub error: E,
}

pub struct Machine<C, E> {
    state: usize,
    rules: Vec<Vec<Transition<C, E>>>,
    entries: Vec<Option<EntryAction<C, E>>>,
    faults: Vec<Fault<E>>,
    taken: usize,
}

impl<C, E> Default for Machine<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, E> Machine<C, E> {
    /// The initial state.
    pub const START: usize = 0;

    pub fn new() -> Self {
        Self {
            state: Self::START,
            rules: Vec::new(),
            entries: Vec::new(),
            faults: Vec::new(),
            taken: 0,
        }
    }

    pub fn state(&self) -> usize {
        self.state
    }

    /// Appends a transition rule to `state`'s ordered rule list.
    pub fn add_transition(&mut self, state: usize, rule: Transition<C, E>) -> &mut Self {
        if self.rules.len() <= state {
            self.rules.resize(state + 1, Vec::new());
        }
        self.rules[state].push(rule);
        self
    }

    /// Sets the entry action for `state`. A later registration replaces an
    /// earlier one.
    pub fn set_entry_action(&mut self, state: usize, action: EntryAction<C, E>) -> &mut Self {
        if self.entries.len() <= state {
            self.entries.resize(state + 1, None);
        }
        self.entries[state] = Some(action);
        self
    }

    /// Runs one tick: every rule registered for the state observed at tick
    /// start, in registration order.
    ///
    /// The rule list is snapshotted up front, so a rule that changes state
    /// mid-tick does not stop the remaining rules of the *original* state
    /// from running this tick. Returns the number of state changes taken.
    pub fn tick(&mut self, ctx: &mut C) -> usize {
        self.taken = 0;
        let snapshot = self.rules.get(self.state).cloned().unwrap_or_default();
        let at = self.state;
        for rule in snapshot {
            if let Err(error) = rule(ctx, self) {
                self.faults.push(Fault { state: at, error });
            }
        }
        self.taken
    }

    /// Moves to `state` and fires its entry action, if one is registered,
    /// exactly once.
    pub fn update_state(&mut self, ctx: &mut C, state: usize) {
        self.state = state;
        self.taken += 1;
        if let Some(action) = self.entries.get(state).copied().flatten() {
            if let Err(error) = action(ctx) {
                self.faults.push(Fault { state, error });
            }
        }
    }

    /// Forces the machine back to [`Self::START`]. Registrations and any
    /// queued faults are untouched.
    pub fn reset(&mut self) {
        self.state = Self::START;
    }

    /// Drains the queued faults, oldest first.
    pub fn take_faults(&mut self) -> Vec<Fault<E>> {
        core::mem::take(&mut self.faults)
    }

    pub fn has_faults(&self) -> bool {
        !self.faults.is_empty()
    }
}
