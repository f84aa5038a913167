//! Grammar binding: drives the state machine over a token stream and builds
//! the value tree.
//!
//! Nesting is handled with two explicit stacks instead of recursive
//! descent: a stack of in-progress containers and a stack of object keys
//! awaiting their value. Parse depth is therefore bounded by memory, not by
//! the call stack.
//!
//! Transition rules are total: a rule that sees a token it has no edge for
//! does nothing, and the driving loop turns a tick that took no transition
//! into an unexpected-token error. Tree-building side effects live entirely
//! in entry actions.

use crate::error::ParseError;
use crate::machine::Machine;
use crate::options::Options;
use crate::token::{Token, TokenKind};
use crate::value::{Map, Value};

/// Grammar states. `Init` must stay at the machine's start index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
enum State {
    Init = 0,
    ObjectStart,
    ObjectKey,
    ObjectColon,
    Comma,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    StringValue,
    NumberValue,
    BoolValue,
    NullValue,
}

impl State {
    const ALL: [State; 12] = [
        State::Init,
        State::ObjectStart,
        State::ObjectKey,
        State::ObjectColon,
        State::Comma,
        State::ObjectEnd,
        State::ArrayStart,
        State::ArrayEnd,
        State::StringValue,
        State::NumberValue,
        State::BoolValue,
        State::NullValue,
    ];

    const fn id(self) -> usize {
        self as usize
    }

    fn from_id(id: usize) -> Option<State> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Object,
    Array,
}

/// An open container being populated. Only objects and arrays ever live on
/// the container stack.
enum Container {
    Object(Map),
    Array(Vec<Value>),
}

impl Container {
    fn kind(&self) -> ContainerKind {
        match self {
            Container::Object(_) => ContainerKind::Object,
            Container::Array(_) => ContainerKind::Array,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Container::Object(map) => Value::Object(map),
            Container::Array(items) => Value::Array(items),
        }
    }
}

/// Mutable working state for one parse run: the token stream, the cursor,
/// and the two stacks. Handed to every rule and entry action; never
/// captured by them.
#[derive(Default)]
struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
    open: Vec<Container>,
    pending_keys: Vec<String>,
    root: Option<Value>,
}

impl Cursor {
    fn with_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            ..Self::default()
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Attaches `value` to the open container on top of the stack. An
    /// object parent consumes one pending key; an array parent appends.
    fn attach(&mut self, value: Value) -> Result<(), ParseError> {
        match self.open.last_mut() {
            Some(Container::Object(map)) => {
                let key = self.pending_keys.pop().ok_or(ParseError::EmptyStack)?;
                map.insert(key, value);
                Ok(())
            }
            Some(Container::Array(items)) => {
                items.push(value);
                Ok(())
            }
            None => Err(ParseError::EmptyStack),
        }
    }

    /// Pops the top container, checks it against the closing bracket that
    /// got us here, and either attaches it to its parent or, when the stack
    /// empties, records it as the document root.
    fn close(&mut self, expected: ContainerKind) -> Result<(), ParseError> {
        let top = self.open.pop().ok_or(ParseError::EmptyStack)?;
        if top.kind() != expected {
            return Err(ParseError::MismatchedBracket { position: self.pos });
        }
        let value = top.into_value();
        if self.open.is_empty() {
            self.root = Some(value);
            Ok(())
        } else {
            self.attach(value)
        }
    }
}

type Fsm = Machine<Cursor, ParseError>;

/// Reusable grammar-driven parser.
///
/// The transition table and entry actions are wired once at construction;
/// every [`Parser::parse`] call starts from cleared stacks and the initial
/// state, so one instance can decode many documents in sequence.
pub struct Parser {
    fsm: Fsm,
    cursor: Cursor,
    options: Options,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        let mut fsm = Fsm::new();

        fsm.add_transition(State::Init.id(), leave_init);
        fsm.add_transition(State::ObjectStart.id(), leave_object_start);
        fsm.add_transition(State::ObjectKey.id(), leave_object_key);
        fsm.add_transition(State::ObjectColon.id(), enter_value);
        fsm.add_transition(State::Comma.id(), leave_comma);
        fsm.add_transition(State::StringValue.id(), leave_value);
        fsm.add_transition(State::NumberValue.id(), leave_value);
        fsm.add_transition(State::BoolValue.id(), leave_value);
        fsm.add_transition(State::NullValue.id(), leave_value);
        fsm.add_transition(State::ObjectEnd.id(), leave_value);
        fsm.add_transition(State::ArrayEnd.id(), leave_value);
        fsm.add_transition(State::ArrayStart.id(), enter_value);
        // Empty arrays close straight from ArrayStart, symmetric with the
        // empty-object edge on ObjectStart. Both ArrayStart rules run every
        // tick; their token sets are disjoint.
        fsm.add_transition(State::ArrayStart.id(), close_empty_array);

        fsm.set_entry_action(State::ObjectStart.id(), open_object);
        fsm.set_entry_action(State::ArrayStart.id(), open_array);
        fsm.set_entry_action(State::ObjectKey.id(), push_key);
        fsm.set_entry_action(State::StringValue.id(), attach_string);
        fsm.set_entry_action(State::NumberValue.id(), attach_number);
        fsm.set_entry_action(State::BoolValue.id(), attach_bool);
        fsm.set_entry_action(State::NullValue.id(), attach_null);
        fsm.set_entry_action(State::ObjectEnd.id(), close_object);
        fsm.set_entry_action(State::ArrayEnd.id(), close_array);

        Self {
            fsm,
            cursor: Cursor::default(),
            options,
        }
    }

    /// Decodes one document from `tokens`.
    ///
    /// The machine ticks once per token; each tick runs the transition
    /// rules of the current state against the not-yet-consumed token, then
    /// the cursor advances. Parsing stops as soon as the root container
    /// closes; in strict mode any remaining tokens are an error, otherwise
    /// they are ignored.
    pub fn parse(&mut self, tokens: Vec<Token>) -> Result<Value, ParseError> {
        self.fsm.reset();
        self.fsm.take_faults();
        self.cursor = Cursor::with_tokens(tokens);

        let len = self.cursor.tokens.len();
        while self.cursor.pos < len {
            let taken = self.fsm.tick(&mut self.cursor);
            if let Some(fault) = self.fsm.take_faults().into_iter().next() {
                return Err(fault.error);
            }
            if taken == 0 {
                let expected =
                    State::from_id(self.fsm.state()).map_or(&[][..], expected_tokens);
                return Err(ParseError::UnexpectedToken {
                    position: self.cursor.pos,
                    observed: self.cursor.tokens[self.cursor.pos].kind(),
                    expected,
                });
            }
            self.cursor.pos += 1;
            if self.cursor.root.is_some() {
                break;
            }
        }

        if self.options.strict && self.cursor.pos < len {
            return Err(ParseError::TrailingTokens {
                position: self.cursor.pos,
            });
        }
        self.cursor.root.take().ok_or(ParseError::UnexpectedEnd)
    }
}

const DOC_START: &[TokenKind] = &[TokenKind::LeftBrace, TokenKind::LeftBracket];
const KEY_OR_CLOSE: &[TokenKind] = &[TokenKind::String, TokenKind::RightBrace];
const KEY_ONLY: &[TokenKind] = &[TokenKind::String];
const COLON_ONLY: &[TokenKind] = &[TokenKind::Colon];
const VALUE: &[TokenKind] = &[
    TokenKind::String,
    TokenKind::Number,
    TokenKind::Bool,
    TokenKind::Null,
    TokenKind::LeftBrace,
    TokenKind::LeftBracket,
];
const VALUE_OR_CLOSE: &[TokenKind] = &[
    TokenKind::String,
    TokenKind::Number,
    TokenKind::Bool,
    TokenKind::Null,
    TokenKind::LeftBrace,
    TokenKind::LeftBracket,
    TokenKind::RightBracket,
];
const AFTER_VALUE: &[TokenKind] = &[
    TokenKind::RightBrace,
    TokenKind::RightBracket,
    TokenKind::Comma,
];

/// What the grammar could have accepted in `state`; reported when the
/// machine stalls on a token.
fn expected_tokens(state: State) -> &'static [TokenKind] {
    match state {
        State::Init => DOC_START,
        State::ObjectStart => KEY_OR_CLOSE,
        State::ObjectKey => COLON_ONLY,
        State::ObjectColon => VALUE,
        State::ArrayStart => VALUE_OR_CLOSE,
        State::Comma => VALUE,
        State::ObjectEnd
        | State::ArrayEnd
        | State::StringValue
        | State::NumberValue
        | State::BoolValue
        | State::NullValue => AFTER_VALUE,
    }
}

// ---- transition rules ------------------------------------------------------

fn leave_init(ctx: &mut Cursor, fsm: &mut Fsm) -> Result<(), ParseError> {
    match ctx.current() {
        Some(Token::LeftBrace) => fsm.update_state(ctx, State::ObjectStart.id()),
        Some(Token::LeftBracket) => fsm.update_state(ctx, State::ArrayStart.id()),
        _ => {}
    }
    Ok(())
}

fn leave_object_start(ctx: &mut Cursor, fsm: &mut Fsm) -> Result<(), ParseError> {
    match ctx.current() {
        Some(Token::String(_)) => fsm.update_state(ctx, State::ObjectKey.id()),
        Some(Token::RightBrace) => fsm.update_state(ctx, State::ObjectEnd.id()),
        _ => {}
    }
    Ok(())
}

fn leave_object_key(ctx: &mut Cursor, fsm: &mut Fsm) -> Result<(), ParseError> {
    if let Some(Token::Colon) = ctx.current() {
        fsm.update_state(ctx, State::ObjectColon.id());
    }
    Ok(())
}

/// Shared "a value may start here" rule, used by `ObjectColon`,
/// `ArrayStart`, and the array arm of `Comma`.
fn enter_value(ctx: &mut Cursor, fsm: &mut Fsm) -> Result<(), ParseError> {
    match ctx.current() {
        Some(Token::String(_)) => fsm.update_state(ctx, State::StringValue.id()),
        Some(Token::Number(_)) => fsm.update_state(ctx, State::NumberValue.id()),
        Some(Token::Bool(_)) => fsm.update_state(ctx, State::BoolValue.id()),
        Some(Token::Null) => fsm.update_state(ctx, State::NullValue.id()),
        Some(Token::LeftBrace) => fsm.update_state(ctx, State::ObjectStart.id()),
        Some(Token::LeftBracket) => fsm.update_state(ctx, State::ArrayStart.id()),
        _ => {}
    }
    Ok(())
}

/// The empty-array edge: `[` immediately followed by `]`.
fn close_empty_array(ctx: &mut Cursor, fsm: &mut Fsm) -> Result<(), ParseError> {
    if let Some(Token::RightBracket) = ctx.current() {
        fsm.update_state(ctx, State::ArrayEnd.id());
    }
    Ok(())
}

/// Shared "a value just ended" rule for scalar and container-end states.
fn leave_value(ctx: &mut Cursor, fsm: &mut Fsm) -> Result<(), ParseError> {
    match ctx.current() {
        Some(Token::RightBrace) => fsm.update_state(ctx, State::ObjectEnd.id()),
        Some(Token::RightBracket) => fsm.update_state(ctx, State::ArrayEnd.id()),
        Some(Token::Comma) => fsm.update_state(ctx, State::Comma.id()),
        _ => {}
    }
    Ok(())
}

/// After a comma the next move depends on the enclosing container: objects
/// expect another key, arrays another value.
fn leave_comma(ctx: &mut Cursor, fsm: &mut Fsm) -> Result<(), ParseError> {
    let kind = ctx.open.last().map(Container::kind);
    match kind {
        Some(ContainerKind::Object) => {
            fsm.update_state(ctx, State::ObjectKey.id());
            Ok(())
        }
        Some(ContainerKind::Array) => enter_value(ctx, fsm),
        None => Err(ParseError::EmptyStack),
    }
}

// ---- entry actions ---------------------------------------------------------

fn open_object(ctx: &mut Cursor) -> Result<(), ParseError> {
    ctx.open.push(Container::Object(Map::new()));
    Ok(())
}

fn open_array(ctx: &mut Cursor) -> Result<(), ParseError> {
    ctx.open.push(Container::Array(Vec::new()));
    Ok(())
}

fn push_key(ctx: &mut Cursor) -> Result<(), ParseError> {
    match ctx.current() {
        Some(Token::String(s)) => {
            let key = s.clone();
            ctx.pending_keys.push(key);
            Ok(())
        }
        Some(other) => Err(ParseError::UnexpectedToken {
            position: ctx.pos,
            observed: other.kind(),
            expected: KEY_ONLY,
        }),
        None => Err(ParseError::UnexpectedEnd),
    }
}

fn attach_string(ctx: &mut Cursor) -> Result<(), ParseError> {
    let value = match ctx.current() {
        Some(Token::String(s)) => Value::String(s.clone()),
        Some(other) => {
            return Err(ParseError::UnexpectedToken {
                position: ctx.pos,
                observed: other.kind(),
                expected: &[TokenKind::String],
            });
        }
        None => return Err(ParseError::UnexpectedEnd),
    };
    ctx.attach(value)
}

fn attach_number(ctx: &mut Cursor) -> Result<(), ParseError> {
    let value = match ctx.current() {
        Some(Token::Number(n)) => Value::Number(*n),
        Some(other) => {
            return Err(ParseError::UnexpectedToken {
                position: ctx.pos,
                observed: other.kind(),
                expected: &[TokenKind::Number],
            });
        }
        None => return Err(ParseError::UnexpectedEnd),
    };
    ctx.attach(value)
}

fn attach_bool(ctx: &mut Cursor) -> Result<(), ParseError> {
    let value = match ctx.current() {
        Some(Token::Bool(b)) => Value::Bool(*b),
        Some(other) => {
            return Err(ParseError::UnexpectedToken {
                position: ctx.pos,
                observed: other.kind(),
                expected: &[TokenKind::Bool],
            });
        }
        None => return Err(ParseError::UnexpectedEnd),
    };
    ctx.attach(value)
}

fn attach_null(ctx: &mut Cursor) -> Result<(), ParseError> {
    ctx.attach(Value::Null)
}

fn close_object(ctx: &mut Cursor) -> Result<(), ParseError> {
    ctx.close(ContainerKind::Object)
}

fn close_array(ctx: &mut Cursor) -> Result<(), ParseError> {
    ctx.close(ContainerKind::Array)
}
