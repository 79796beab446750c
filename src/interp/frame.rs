//! The call-frame stack (spec §4.4). A variable slot that exists in a
//! frame but holds [`Slot::Redirect`] means "this name is declared
//! local but its storage lives in the global frame" — the mechanism
//! `global` and `variable` use, taken directly from `picolCallFrame`'s
//! "local var with NULL value means redirect to global" convention.

use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub enum Slot {
    Scalar(String),
    Redirect,
}

#[derive(Debug, Default)]
pub struct Frame {
    pub vars: IndexMap<String, Slot>,
    /// The full text of the command that pushed this frame (a proc call),
    /// used to build the `invoked from within` traceback on error.
    pub command: Option<String>,
}

impl Frame {
    fn new(command: Option<String>) -> Self {
        Frame {
            vars: IndexMap::new(),
            command,
        }
    }
}

/// An explicit, owned stack of call frames. Frame 0 is always the global
/// frame. `current` is the frame variable lookups operate against; it
/// usually equals the top of `frames`, except while `uplevel` has
/// temporarily redirected it to an ancestor.
pub struct FrameStack {
    frames: Vec<Frame>,
    current: usize,
}

impl FrameStack {
    pub fn new() -> Self {
        FrameStack {
            frames: vec![Frame::new(None)],
            current: 0,
        }
    }

    /// Number of call frames beyond the global one — `picolCallProc`'s
    /// recursion-depth check operates on this.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn push_call(&mut self, command: String) {
        self.frames.push(Frame::new(Some(command)));
        self.current = self.frames.len() - 1;
    }

    pub fn pop_call(&mut self) {
        self.frames.pop();
        self.current = self.frames.len() - 1;
    }

    pub fn current(&self) -> &Frame {
        &self.frames[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Temporarily moves `current` to a different frame (used by
    /// `uplevel`), returning the previous index so the caller can restore
    /// it afterwards.
    pub fn set_current_index(&mut self, idx: usize) -> usize {
        std::mem::replace(&mut self.current, idx)
    }

    pub fn global(&self) -> &Frame {
        &self.frames[0]
    }

    pub fn global_mut(&mut self) -> &mut Frame {
        &mut self.frames[0]
    }

    pub fn frame_at(&self, idx: usize) -> &Frame {
        &self.frames[idx]
    }

    pub fn frame_at_mut(&mut self, idx: usize) -> &mut Frame {
        &mut self.frames[idx]
    }

    /// Resolves an `uplevel`/`upvar`-style level count, relative to
    /// `current`, clamped at the global frame.
    pub fn resolve_level(&self, up: usize) -> usize {
        self.current.saturating_sub(up)
    }

    /// Resolves `#N`-style absolute level syntax (`#0` is global).
    pub fn resolve_absolute_level(&self, n: usize) -> usize {
        n.min(self.frames.len() - 1)
    }

    /// The command text of each frame from `current` up to (not
    /// including) the global frame, innermost first — used to build the
    /// `invoked from within` traceback lines.
    pub fn traceback(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut idx = self.current;
        while idx > 0 {
            if let Some(cmd) = &self.frames[idx].command {
                out.push(cmd.as_str());
            }
            idx -= 1;
        }
        out
    }
}

impl Default for FrameStack {
    fn default() -> Self {
        Self::new()
    }
}
