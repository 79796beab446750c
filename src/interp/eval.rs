//! The evaluator (spec §4.2), ported from `picolEval2`: one token loop
//! assembles a command's argument list from substituted word
//! fragments, then dispatches it; `mode` distinguishes full evaluation
//! (`eval`) from substitution-only (`subst`), which stops at the first
//! command boundary and returns the assembled words as a list instead
//! of invoking anything.

use crate::error::{Completion, EvalResult, Flow, InterpError};
use crate::interp::registry::CommandImpl;
use crate::interp::Interp;
use crate::list;
use crate::parser::{unescape, Parser, TokenKind};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    Full,
    Subst,
}

impl Interp {
    pub fn eval(&mut self, source: &str) -> EvalResult {
        self.eval2(source, EvalMode::Full)
    }

    /// Word and command substitution without invoking anything: what
    /// `subst`, `expr`'s operand handling, and `if`/`while` conditions use
    /// to expand their argument before inspecting it.
    pub fn subst(&mut self, source: &str) -> EvalResult {
        self.eval2(source, EvalMode::Subst)
    }

    fn eval2(&mut self, source: &str, mode: EvalMode) -> EvalResult {
        self.result.clear();
        let mut parser = Parser::new(source);
        let mut argv: Vec<String> = Vec::new();
        let mut prev_kind = TokenKind::Eol;

        loop {
            let kind = parser.next_token()?;
            if kind == TokenKind::Eof {
                break;
            }
            let raw = parser.token_text();

            match kind {
                TokenKind::Sep => {
                    prev_kind = kind;
                    continue;
                }
                TokenKind::Eol => {
                    if mode == EvalMode::Subst {
                        return Ok(Completion::normal(list::list_from(&argv)));
                    }
                    if !argv.is_empty() {
                        let outcome = self.dispatch(&argv)?;
                        if outcome.flow != Flow::Normal {
                            return Ok(outcome);
                        }
                    }
                    argv.clear();
                    prev_kind = kind;
                    continue;
                }
                TokenKind::Var => {
                    let value = self.get_var(raw)?;
                    self.append_word(&mut argv, value, prev_kind, parser.expand_pending());
                }
                TokenKind::Cmd => {
                    let sub = self.eval(raw)?;
                    if sub.flow != Flow::Normal {
                        return Ok(sub);
                    }
                    self.append_word(&mut argv, sub.value, prev_kind, parser.expand_pending());
                }
                TokenKind::Esc => {
                    let text = if raw.contains('\\') {
                        unescape(raw)
                    } else {
                        raw.to_string()
                    };
                    self.append_word(&mut argv, text, prev_kind, parser.expand_pending());
                }
                TokenKind::Str => {
                    self.append_word(&mut argv, raw.to_string(), prev_kind, parser.expand_pending());
                }
                TokenKind::Eof => unreachable!(),
            }
            parser.clear_expand();
            prev_kind = kind;
        }

        Ok(Completion::normal(self.result.clone()))
    }

    /// Attaches a substituted word fragment to the in-progress argument
    /// list: a brand-new word after a separator/EOL, `{*}`-expanded into
    /// multiple words if pending, or concatenated onto the previous word
    /// if this fragment directly abuts it (e.g. `a$b` is one word).
    fn append_word(&self, argv: &mut Vec<String>, text: String, prev_kind: TokenKind, expand: bool) {
        let new_word = matches!(prev_kind, TokenKind::Sep | TokenKind::Eol);
        if new_word {
            if expand {
                if !text.is_empty() {
                    argv.extend(list::parse_list(&text));
                }
            } else {
                argv.push(text);
            }
        } else if expand {
            argv.extend(list::parse_list(&text));
        } else if let Some(last) = argv.last_mut() {
            last.push_str(&text);
        } else {
            argv.push(text);
        }
    }

    /// Resolves `argv[0]` (falling back to `unknown` if registered) and
    /// invokes it, wiring up tracing and the `i->current` traceback
    /// anchor exactly as `picolEval2`'s command-dispatch tail does.
    fn dispatch(&mut self, argv: &[String]) -> EvalResult {
        if argv[0].is_empty() || argv[0].starts_with('#') {
            return Ok(Completion::normal(self.result.clone()));
        }

        let (imp, call_argv): (CommandImpl, Vec<String>) = match self.commands.get(&argv[0]) {
            Some(imp) => (imp, argv.to_vec()),
            None => match self.commands.get("unknown") {
                Some(imp) => {
                    let mut prefixed = Vec::with_capacity(argv.len() + 1);
                    prefixed.push("unknown".to_string());
                    prefixed.extend_from_slice(argv);
                    (imp, prefixed)
                }
                None => {
                    return Err(self.err_name(format!("invalid command name \"{}\"", argv[0])))
                }
            },
        };

        self.current = Some(list::list_from(&call_argv));
        if self.trace {
            let line = format!("< {}: {}", self.frames.depth(), self.current.clone().unwrap());
            (self.trace_sink)(&line);
        }

        let outcome = match imp {
            CommandImpl::Native(f) => f(self, &call_argv),
            CommandImpl::Host(f) => {
                let mut guard = f.borrow_mut();
                (guard)(self, &call_argv)
            }
            CommandImpl::Proc(def) => {
                crate::interp::procs::call_proc(self, &call_argv[0], &def.args, &def.body, &call_argv)
            }
        };

        if self.trace {
            let shown = match &outcome {
                Ok(c) => c.value.clone(),
                Err(e) => e.message().to_string(),
            };
            let line = format!(
                "> {}: {{{}}} -> {{{}}}",
                self.frames.depth(),
                list::list_from(&call_argv),
                shown
            );
            (self.trace_sink)(&line);
        }

        let outcome = outcome?;
        self.result = outcome.value.clone();
        Ok(outcome)
    }
}

impl From<std::io::Error> for InterpError {
    fn from(e: std::io::Error) -> Self {
        InterpError::Host(e.to_string())
    }
}
