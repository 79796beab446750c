//! Variable storage and lookup (spec §4.3), ported from `picolGetVar2`/
//! `picolSetVar2`: array-element syntax `name(key)` is recognized
//! lexically, a leading `::` forces the search into the global frame,
//! and `::env` is populated from the process environment the first
//! time it is touched.

use crate::error::InterpError;
use crate::handles::Handle;
use crate::interp::array::Array;
use crate::interp::frame::Slot;
use crate::interp::Interp;

/// Splits `name` into its base identifier and an optional array key:
/// `foo(bar)` -> `("foo", Some("bar"))`, `foo` -> `("foo", None)`.
fn split_name(name: &str) -> (&str, Option<&str>) {
    if let Some(open) = name.find('(') {
        if let Some(close_rel) = name[open + 1..].find(')') {
            let key = &name[open + 1..open + 1 + close_rel];
            return (&name[..open], Some(key));
        }
    }
    (name, None)
}

fn strip_global(name: &str) -> (&str, bool) {
    match name.strip_prefix("::") {
        Some(rest) => (rest, true),
        None => (name, false),
    }
}

impl Interp {
    fn resolve_redirect(&self, frame_idx: usize, base: &str) -> usize {
        if frame_idx == 0 {
            return 0;
        }
        match self.frames.frame_at(frame_idx).vars.get(base) {
            Some(Slot::Redirect) => 0,
            _ => frame_idx,
        }
    }

    fn target_frame(&mut self, base: &str, force_global: bool) -> usize {
        if base == "env" && force_global {
            self.ensure_env_array();
        }
        let frame_idx = if force_global {
            0
        } else {
            self.frames.current_index()
        };
        self.resolve_redirect(frame_idx, base)
    }

    fn ensure_env_array(&mut self) {
        if matches!(self.frames.global().vars.get("env"), Some(Slot::Scalar(_))) {
            return;
        }
        let mut arr = Array::new();
        for (k, v) in std::env::vars() {
            arr.set(&k, v);
        }
        let h = self.arrays.insert(arr);
        self.frames
            .global_mut()
            .vars
            .insert("env".to_string(), Slot::Scalar(h.to_value()));
    }

    pub fn get_var(&mut self, name: &str) -> Result<String, InterpError> {
        let (raw_base, key) = split_name(name);
        let (base, force_global) = strip_global(raw_base);
        let frame_idx = self.target_frame(base, force_global);

        if let Some(key) = key {
            let handle_text = match self.frames.frame_at(frame_idx).vars.get(base) {
                Some(Slot::Scalar(v)) => Some(v.clone()),
                _ => None,
            };
            let handle_text = match handle_text {
                Some(v) => v,
                None => {
                    return Err(self.err_name(format!("can't read \"{}\": no such variable", name)))
                }
            };
            let handle = match Handle::parse(&handle_text) {
                Some(h) => h,
                None => {
                    return Err(self.err_type(format!("can't read \"{}\": variable isn't array", name)))
                }
            };
            let found = self.arrays.get(handle).and_then(|a| a.get(key)).map(|s| s.to_string());
            match found {
                Some(v) => Ok(v),
                None => Err(self.err_name(format!("can't read \"{}\": no such element in array", name))),
            }
        } else {
            let found = match self.frames.frame_at(frame_idx).vars.get(base) {
                Some(Slot::Scalar(v)) => Some(v.clone()),
                _ => None,
            };
            match found {
                Some(v) => Ok(v),
                None => Err(self.err_name(format!("can't read \"{}\": no such variable", name))),
            }
        }
    }

    pub fn set_var(&mut self, name: &str, value: impl Into<String>) -> Result<(), InterpError> {
        let value = value.into();
        if value.len() > crate::limits::MAX_STR {
            return Err(self.err_resource(format!(
                "string buffer overflow setting \"{}\" (exceeds {} bytes)",
                name,
                crate::limits::MAX_STR
            )));
        }
        let (raw_base, key) = split_name(name);
        let (base, force_global) = strip_global(raw_base);
        let frame_idx = self.target_frame(base, force_global);

        if let Some(key) = key {
            let existing = match self.frames.frame_at(frame_idx).vars.get(base) {
                Some(Slot::Scalar(v)) => Some(v.clone()),
                _ => None,
            };
            // An existing scalar that isn't even shaped like a handle (ordinary
            // user data, e.g. `set x foo`) can't be silently turned into an
            // array by `x(k) v` — mirrors `picolArrSet1`'s `picolIsPtr` guard,
            // which refuses rather than clobbering the variable.
            if let Some(v) = &existing {
                if !crate::handles::looks_like_handle(v) {
                    return Err(self.err_type(format!("can't set \"{}\": variable isn't array", name)));
                }
            }
            let handle = match existing.as_deref().and_then(Handle::parse) {
                Some(h) if self.arrays.contains(h) => h,
                _ => {
                    let h = self.arrays.insert(Array::new());
                    self.frames
                        .frame_at_mut(frame_idx)
                        .vars
                        .insert(base.to_string(), Slot::Scalar(h.to_value()));
                    h
                }
            };
            self.arrays.get_mut(handle).unwrap().set(key, value);
        } else {
            self.frames
                .frame_at_mut(frame_idx)
                .vars
                .insert(base.to_string(), Slot::Scalar(value));
        }
        Ok(())
    }

    /// Sets a plain local variable in the current frame directly,
    /// bypassing any `global`/`variable` redirect — used to bind a
    /// procedure's formal arguments in its freshly-pushed frame.
    pub fn set_var_local(&mut self, name: &str, value: impl Into<String>) {
        self.frames
            .current_mut()
            .vars
            .insert(name.to_string(), Slot::Scalar(value.into()));
    }

    pub fn unset_var(&mut self, name: &str) -> Result<(), InterpError> {
        let (raw_base, key) = split_name(name);
        let (base, force_global) = strip_global(raw_base);
        let frame_idx = self.target_frame(base, force_global);

        if let Some(key) = key {
            let handle_opt = match self.frames.frame_at(frame_idx).vars.get(base) {
                Some(Slot::Scalar(v)) => Handle::parse(v),
                _ => None,
            };
            let unset_ok = handle_opt
                .and_then(|h| self.arrays.get_mut(h))
                .map(|a| a.unset(key))
                .unwrap_or(false);
            if unset_ok {
                Ok(())
            } else {
                Err(self.err_name(format!("can't unset \"{}\": no such element in array", name)))
            }
        } else {
            let handle_opt = match self.frames.frame_at(frame_idx).vars.get(base) {
                Some(Slot::Scalar(v)) => Handle::parse(v),
                _ => None,
            };
            if let Some(h) = handle_opt {
                self.arrays.remove(h);
            }
            let removed = self.frames.frame_at_mut(frame_idx).vars.shift_remove(base).is_some();
            if removed {
                Ok(())
            } else {
                Err(self.err_name(format!("can't unset \"{}\": no such variable", name)))
            }
        }
    }

    pub fn var_exists(&mut self, name: &str) -> bool {
        let (raw_base, key) = split_name(name);
        let (base, force_global) = strip_global(raw_base);
        let frame_idx = self.target_frame(base, force_global);
        match key {
            Some(key) => {
                let handle = match self.frames.frame_at(frame_idx).vars.get(base) {
                    Some(Slot::Scalar(v)) => Handle::parse(v),
                    _ => None,
                };
                handle.and_then(|h| self.arrays.get(h)).map_or(false, |a| a.contains(key))
            }
            None => matches!(self.frames.frame_at(frame_idx).vars.get(base), Some(Slot::Scalar(_))),
        }
    }

    /// Marks `name` in the current frame as redirected to the global
    /// frame — the mechanism behind `global` and `variable`.
    pub fn link_to_global(&mut self, name: &str) {
        if self.frames.current_index() != 0 {
            self.frames
                .current_mut()
                .vars
                .insert(name.to_string(), Slot::Redirect);
        }
    }

    /// Resolves (creating if necessary) the array handle backing `name`,
    /// honoring `::`-qualification and `global`/`variable` redirects.
    pub fn array_handle(&self, name: &str) -> Option<Handle> {
        let (base, force_global) = strip_global(name);
        let frame_idx = if force_global {
            0
        } else {
            self.frames.current_index()
        };
        let frame_idx = self.resolve_redirect(frame_idx, base);
        match self.frames.frame_at(frame_idx).vars.get(base) {
            Some(Slot::Scalar(v)) => Handle::parse(v).filter(|h| self.arrays.contains(*h)),
            _ => None,
        }
    }

    pub fn array_handle_or_create(&mut self, name: &str) -> Handle {
        if let Some(h) = self.array_handle(name) {
            return h;
        }
        let (base, force_global) = strip_global(name);
        let frame_idx = self.target_frame(base, force_global);
        let h = self.arrays.insert(Array::new());
        self.frames
            .frame_at_mut(frame_idx)
            .vars
            .insert(base.to_string(), Slot::Scalar(h.to_value()));
        h
    }

    pub fn array(&self, h: Handle) -> Option<&Array> {
        self.arrays.get(h)
    }

    pub fn array_mut(&mut self, h: Handle) -> Option<&mut Array> {
        self.arrays.get_mut(h)
    }
}

#[cfg(test)]
mod tests {
    use crate::interp::Interp;

    #[test]
    fn setting_a_value_past_max_str_is_a_resource_error() {
        let mut i = Interp::new();
        let huge = "x".repeat(crate::limits::MAX_STR + 1);
        let err = i.set_var("x", huge).unwrap_err();
        assert!(err.message().contains("buffer overflow"));
    }

    #[test]
    fn array_element_set_refuses_to_clobber_a_plain_scalar() {
        let mut i = Interp::new();
        i.set_var("x", "foo").unwrap();
        let err = i.set_var("x(k)", "v").unwrap_err();
        assert!(err.message().contains("isn't array"));
        assert_eq!(i.get_var("x").unwrap(), "foo");
    }

    #[test]
    fn array_element_set_auto_creates_a_fresh_variable() {
        let mut i = Interp::new();
        i.set_var("a(k)", "v").unwrap();
        assert_eq!(i.get_var("a(k)").unwrap(), "v");
    }
}
