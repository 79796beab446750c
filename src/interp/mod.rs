//! The interpreter (spec §4): the [`Interp`] struct ties together the
//! call-frame stack, command registry, and the handle tables that back
//! arrays, channels, and sub-interpreters. `picol.c`'s single global
//! `picolInterp` becomes an owned, embeddable value — nothing here is
//! global state, so a host can run any number of independent
//! interpreters side by side.

pub mod array;
pub mod channel;
pub mod condition;
mod eval;
pub mod frame;
pub(crate) mod procs;
pub mod registry;
pub mod trace;
mod vars;

use array::Array;
use channel::Channel;
use frame::FrameStack;
use registry::{CommandRegistry, HostFn};
use trace::TraceSink;

use crate::error::InterpError;
use crate::handles::{Handle, HandleTable};

pub struct Interp {
    pub(crate) commands: CommandRegistry,
    pub(crate) frames: FrameStack,
    pub(crate) arrays: HandleTable<Array>,
    pub(crate) channels: HandleTable<Channel>,
    pub(crate) interps: HandleTable<Interp>,
    pub(crate) result: String,
    pub(crate) current: Option<String>,
    pub(crate) trace: bool,
    trace_sink: TraceSink,
}

impl Interp {
    pub fn new() -> Self {
        let mut interp = Interp {
            commands: CommandRegistry::new(),
            frames: FrameStack::new(),
            arrays: HandleTable::new(),
            channels: HandleTable::new(),
            interps: HandleTable::new(),
            result: String::new(),
            current: None,
            trace: false,
            trace_sink: trace::eprintln_sink(),
        };
        interp.channels.insert(Channel::Stdin);
        interp.channels.insert(Channel::Stdout);
        interp.channels.insert(Channel::Stderr);
        crate::commands::register_core_commands(&mut interp);
        interp
    }

    /// Installs the host's trace sink, replacing the default
    /// `eprintln!`-backed one.
    pub fn set_trace_sink(&mut self, sink: TraceSink) {
        self.trace_sink = sink;
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn set_result(&mut self, value: impl Into<String>) {
        self.result = value.into();
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains(name)
    }

    pub fn set_trace(&mut self, on: bool) {
        self.trace = on;
    }

    /// `info level` with no argument: the current call-frame depth.
    pub fn call_depth(&self) -> usize {
        self.frames.depth()
    }

    /// `info level N`: the invocation text recorded on the Nth-ancestor
    /// frame (`#0` being global, which has none).
    pub fn frame_command_at(&self, n: usize) -> Option<String> {
        let idx = self.frames.resolve_absolute_level(n);
        self.frames.frame_at(idx).command.clone()
    }

    /// `info globals ?pattern?`: every name bound in the global frame.
    pub fn global_var_names(&self) -> Vec<String> {
        self.frames.global().vars.keys().cloned().collect()
    }

    /// `info vars ?pattern?`: every name bound in the current frame,
    /// including `global`/`variable` redirect placeholders.
    pub fn local_var_names(&self) -> Vec<String> {
        self.frames.current().vars.keys().cloned().collect()
    }

    /// The embedding API's `RegisterCommand`: registers a native command
    /// backed by a closure (which may capture arbitrary private state),
    /// failing if `name` is already registered.
    pub fn register_command(&mut self, name: &str, f: HostFn) -> Result<(), String> {
        self.commands.register_host(name, f)
    }

    /// Registers one of the built-in catalogue's stateless function
    /// pointers. Used only by [`crate::commands::register_core_commands`]
    /// at construction time, where no name is ever a duplicate.
    pub(crate) fn register_native(&mut self, name: &str, f: registry::NativeFn) {
        self.commands.register_native(name, f);
    }

    pub fn channel(&mut self, h: Handle) -> Option<&mut Channel> {
        self.channels.get_mut(h)
    }

    pub fn open_channel(&mut self, ch: Channel) -> Handle {
        self.channels.insert(ch)
    }

    pub fn close_channel(&mut self, h: Handle) -> Option<Channel> {
        self.channels.remove(h)
    }

    pub fn stdin_handle(&self) -> Handle {
        Handle::from_index(0)
    }

    pub fn stdout_handle(&self) -> Handle {
        Handle::from_index(1)
    }

    pub fn stderr_handle(&self) -> Handle {
        Handle::from_index(2)
    }

    pub fn create_subinterp(&mut self) -> Handle {
        self.interps.insert(Interp::new())
    }

    pub fn subinterp(&mut self, h: Handle) -> Option<&mut Interp> {
        self.interps.get_mut(h)
    }

    pub fn delete_subinterp(&mut self, h: Handle) -> bool {
        self.interps.remove(h).is_some()
    }

    pub fn err_parse(&mut self, msg: impl Into<String>) -> InterpError {
        self.raise(InterpError::Parse(msg.into()))
    }
    pub fn err_name(&mut self, msg: impl Into<String>) -> InterpError {
        self.raise(InterpError::Name(msg.into()))
    }
    pub fn err_arity(&mut self, msg: impl Into<String>) -> InterpError {
        self.raise(InterpError::Arity(msg.into()))
    }
    pub fn err_type(&mut self, msg: impl Into<String>) -> InterpError {
        self.raise(InterpError::Type(msg.into()))
    }
    pub fn err_range(&mut self, msg: impl Into<String>) -> InterpError {
        self.raise(InterpError::Range(msg.into()))
    }
    pub fn err_arith(&mut self, msg: impl Into<String>) -> InterpError {
        self.raise(InterpError::Arithmetic(msg.into()))
    }
    pub fn err_host(&mut self, msg: impl Into<String>) -> InterpError {
        self.raise(InterpError::Host(msg.into()))
    }
    pub fn err_resource(&mut self, msg: impl Into<String>) -> InterpError {
        self.raise(InterpError::Resource(msg.into()))
    }
    pub fn err_user(&mut self, msg: impl Into<String>) -> InterpError {
        self.raise(InterpError::User(msg.into()))
    }

    /// Decorates `err`'s message with a traceback (the current command
    /// plus each enclosing call frame's invoking command) into
    /// `::errorInfo`, and sets `i->result` to the raw message — mirroring
    /// `picolErr`. Decoration happens exactly once, at the raise site; it
    /// is not re-applied as the error propagates back up through `?`.
    fn raise(&mut self, err: InterpError) -> InterpError {
        let msg = err.message().to_string();
        self.result = msg.clone();
        let mut decorated = msg;
        if let Some(cur) = self.current.clone() {
            decorated.push_str("\n    while executing\n\"");
            decorated.push_str(&cur);
            decorated.push('"');
        }
        for cmd in self.frames.traceback() {
            decorated.push_str("\n    invoked from within\n\"");
            decorated.push_str(cmd);
            decorated.push('"');
        }
        let _ = self.set_var("::errorInfo", decorated);
        err
    }
}

impl Default for Interp {
    fn default() -> Self {
        Self::new()
    }
}
