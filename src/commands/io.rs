//! Host-backed, synchronous I/O (spec §5/§6): every command here
//! resolves a channel argument through [`crate::handles::Handle`] and
//! forwards to [`crate::interp::channel::Channel`]. None of this
//! suspends or retries — a blocked read blocks the whole interpreter,
//! matching the reference implementation's direct `fread`/`fgets` calls.

use crate::commands::{check_arity, ok};
use crate::error::EvalResult;
use crate::handles::Handle;
use crate::interp::channel::Channel;
use crate::interp::Interp;

fn resolve_channel<'a>(interp: &'a mut Interp, token: &str) -> Result<Handle, crate::error::InterpError> {
    Handle::parse(token)
        .filter(|h| interp.channel(*h).is_some())
        .ok_or_else(|| interp.err_name(format!("can not find channel named \"{}\"", token)))
}

fn puts_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(4), "puts ?-nonewline? ?channelId? string")?;
    let mut args = &argv[1..];
    let mut newline = true;
    if args.first().map(|s| s.as_str()) == Some("-nonewline") {
        newline = false;
        args = &args[1..];
    }
    let (channel_tok, text) = match args.len() {
        1 => (None, &args[0]),
        2 => (Some(args[0].as_str()), &args[1]),
        _ => return Err(interp.err_arity("wrong # args: should be \"puts ?-nonewline? ?channelId? string\"")),
    };
    let handle = match channel_tok {
        Some(tok) => resolve_channel(interp, tok)?,
        None => interp.stdout_handle(),
    };
    let mut line = text.clone();
    if newline {
        line.push('\n');
    }
    interp
        .channel(handle)
        .unwrap()
        .write_str(&line)
        .map_err(|e| interp.err_host(e.to_string()))?;
    ok(String::new())
}

fn gets_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(3), "gets channelId ?varName?")?;
    let handle = resolve_channel(interp, &argv[1])?;
    let (line, eof) = interp
        .channel(handle)
        .unwrap()
        .read_line()
        .map_err(|e| interp.err_host(e.to_string()))?;
    if let Some(varname) = argv.get(2) {
        let len = if eof { -1 } else { line.chars().count() as i64 };
        interp.set_var(varname, line)?;
        ok(len.to_string())
    } else {
        ok(line)
    }
}

fn read_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(3), "read ?-nonewline? channelId | channelId numChars")?;
    let mut args = &argv[1..];
    let mut nonewline = false;
    if args.first().map(|s| s.as_str()) == Some("-nonewline") {
        nonewline = true;
        args = &args[1..];
    }
    let handle = resolve_channel(interp, &args[0])?;
    let max = match args.get(1) {
        Some(n) => n
            .parse::<usize>()
            .map_err(|_| interp.err_type(format!("expected integer but got \"{}\"", n)))?,
        // No explicit count: cap the read at the default buffer size
        // (spec §6: file I/O read buffers are `READ_BUF_MULTIPLIER` times
        // the general token/buffer limit `MAX_STR`).
        None => crate::limits::READ_BUF_MULTIPLIER * crate::limits::MAX_STR,
    };
    let mut text = interp
        .channel(handle)
        .unwrap()
        .read_all(max)
        .map_err(|e| interp.err_host(e.to_string()))?;
    if nonewline && text.ends_with('\n') {
        text.pop();
    }
    ok(text)
}

fn open_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(3), "open path ?mode?")?;
    let mode = argv.get(2).map(|s| s.as_str()).unwrap_or("r");
    let channel = Channel::open(&argv[1], mode).map_err(|e| interp.err_host(e.to_string()))?;
    ok(interp.open_channel(channel).to_value())
}

fn close_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(2), "close channelId")?;
    let handle = resolve_channel(interp, &argv[1])?;
    interp.close_channel(handle);
    ok(String::new())
}

fn eof_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(2), "eof channelId")?;
    let handle = resolve_channel(interp, &argv[1])?;
    let eof = interp.channel(handle).unwrap().eof().map_err(|e| interp.err_host(e.to_string()))?;
    ok(crate::value::bool_str(eof))
}

fn flush_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(2), "flush channelId")?;
    let handle = resolve_channel(interp, &argv[1])?;
    interp.channel(handle).unwrap().flush().map_err(|e| interp.err_host(e.to_string()))?;
    ok(String::new())
}

fn seek_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, Some(4), "seek channelId offset ?origin?")?;
    let handle = resolve_channel(interp, &argv[1])?;
    let offset: i64 = argv[2]
        .parse()
        .map_err(|_| interp.err_type(format!("expected integer but got \"{}\"", argv[2])))?;
    let origin = argv.get(3).map(|s| s.as_str()).unwrap_or("start");
    interp
        .channel(handle)
        .unwrap()
        .seek(offset, origin)
        .map_err(|e| interp.err_host(e.to_string()))?;
    ok(String::new())
}

fn tell_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(2), "tell channelId")?;
    let handle = resolve_channel(interp, &argv[1])?;
    let pos = interp.channel(handle).unwrap().tell().map_err(|e| interp.err_host(e.to_string()))?;
    ok(pos.to_string())
}

/// `source path`: reads the whole file, binds `::_script_` to the path
/// for the duration of the run (clearing it afterwards regardless of
/// outcome), and evaluates it — the embedding API's `Source` (spec §6).
fn source_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(2), "source fileName")?;
    let text = std::fs::read_to_string(&argv[1]).map_err(|e| interp.err_host(e.to_string()))?;
    interp.set_var("::_script_", argv[1].clone())?;
    let result = interp.eval(&text);
    let _ = interp.unset_var("::_script_");
    result
}

pub(super) fn register(interp: &mut Interp) {
    interp.register_native("puts", puts_cmd);
    interp.register_native("gets", gets_cmd);
    interp.register_native("read", read_cmd);
    interp.register_native("open", open_cmd);
    interp.register_native("close", close_cmd);
    interp.register_native("eof", eof_cmd);
    interp.register_native("flush", flush_cmd);
    interp.register_native("seek", seek_cmd);
    interp.register_native("tell", tell_cmd);
    interp.register_native("source", source_cmd);
}

#[cfg(test)]
mod tests {
    use crate::interp::Interp;

    #[test]
    fn write_then_read_a_file_round_trips() {
        let mut i = Interp::new();
        let path = std::env::temp_dir().join("picol_io_test_round_trip.txt");
        let path_str = path.to_string_lossy().into_owned();
        i.eval(&format!("set f [open {{{}}} w]", path_str)).unwrap();
        i.eval("puts -nonewline $f hello").unwrap();
        i.eval("close $f").unwrap();
        i.eval(&format!("set f [open {{{}}} r]", path_str)).unwrap();
        let text = i.eval("read $f").unwrap().value;
        i.eval("close $f").unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(text, "hello");
    }

    #[test]
    fn unbounded_read_is_capped_at_the_default_buffer_size() {
        let mut i = Interp::new();
        let path = std::env::temp_dir().join("picol_io_test_read_cap.txt");
        std::fs::write(&path, "x".repeat(crate::limits::READ_BUF_MULTIPLIER * crate::limits::MAX_STR + 500)).unwrap();
        let path_str = path.to_string_lossy().into_owned();
        i.eval(&format!("set f [open {{{}}} r]", path_str)).unwrap();
        let text = i.eval("read $f").unwrap().value;
        i.eval("close $f").unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(text.len(), crate::limits::READ_BUF_MULTIPLIER * crate::limits::MAX_STR);
    }
}
