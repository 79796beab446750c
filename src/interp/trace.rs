//! Command tracing (spec §6 ambient logging). The kernel never prints
//! anything on its own; when the `trace` built-in turns tracing on, the
//! evaluator hands each line to a host-supplied [`TraceSink`], matching
//! `picol.c`'s `printf("< %d: %s\n", ...)` / `printf("> %d: ...")` pairs
//! around command dispatch. The default sink, installed by the CLI
//! binaries, writes to stderr with `eprintln!` — the same idiom the
//! teacher's own CLI driver uses for diagnostics, not a logging facade.

pub type TraceSink = Box<dyn FnMut(&str)>;

pub fn eprintln_sink() -> TraceSink {
    Box::new(|line: &str| eprintln!("{}", line))
}
