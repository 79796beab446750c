//! The command registry (spec §4.5): an ordered name-to-handler table.
//! Ordering follows `indexmap::IndexMap`, the pack's preferred
//! order-preserving map, rather than the reference implementation's
//! singly-linked list.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::EvalResult;
use crate::interp::Interp;

pub type NativeFn = fn(&mut Interp, &[String]) -> EvalResult;
pub type HostFn = Rc<RefCell<dyn FnMut(&mut Interp, &[String]) -> EvalResult>>;

#[derive(Clone)]
pub struct ProcDef {
    pub args: String,
    pub body: String,
}

/// What a registered command name resolves to. `Native` covers the
/// built-in catalogue (stateless function pointers, matching the
/// reference implementation's NULL-privdata commands); `Host` is the
/// embedding API's `RegisterCommand` with arbitrary private data
/// captured in a closure instead of a `void*`; `Proc` is a user-defined
/// `proc`.
#[derive(Clone)]
pub enum CommandImpl {
    Native(NativeFn),
    Host(HostFn),
    Proc(ProcDef),
}

pub struct CommandRegistry {
    commands: IndexMap<String, CommandImpl>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        CommandRegistry {
            commands: IndexMap::new(),
        }
    }

    /// Registers a brand-new command; used for the core catalogue at
    /// interpreter construction time, where no name is ever a duplicate.
    pub fn register_native(&mut self, name: &str, f: NativeFn) {
        self.commands.insert(name.to_string(), CommandImpl::Native(f));
    }

    /// The embedding API's `RegisterCommand`: fails if `name` is already
    /// registered, since overriding is a script-level `proc` privilege,
    /// not a host one.
    pub fn register_host(&mut self, name: &str, f: HostFn) -> Result<(), String> {
        if self.commands.contains_key(name) {
            return Err(format!("command \"{}\" already exists", name));
        }
        self.commands.insert(name.to_string(), CommandImpl::Host(f));
        Ok(())
    }

    /// `proc` is always allowed to (re)define a command, shadowing a
    /// built-in or a previous `proc` of the same name.
    pub fn define_proc(&mut self, name: &str, args: String, body: String) {
        self.commands
            .insert(name.to_string(), CommandImpl::Proc(ProcDef { args, body }));
    }

    pub fn get(&self, name: &str) -> Option<CommandImpl> {
        self.commands.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// `rename old new` with `new == ""` deletes; otherwise re-keys the
    /// entry under the new name (losing its position in iteration order,
    /// which nothing but `lsort`-stabilized listings ever observes).
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), String> {
        let imp = self
            .commands
            .shift_remove(old)
            .ok_or_else(|| format!("can't rename \"{}\": command doesn't exist", old))?;
        if !new.is_empty() {
            self.commands.insert(new.to_string(), imp);
        }
        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(|s| s.as_str()).collect()
    }

    pub fn names_matching(&self, pattern: &str) -> Vec<&str> {
        self.commands
            .keys()
            .filter(|n| crate::glob::matches(pattern, n))
            .map(|s| s.as_str())
            .collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
