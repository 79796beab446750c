//! `file`'s subcommands (spec §4.9's "file" row): a small, synchronous
//! slice of path introspection — `dirname`, `exists`, `size`, `join`,
//! `tail` — backed directly by `std::path`.

use std::path::Path;

use crate::commands::{check_arity, ok};
use crate::error::EvalResult;
use crate::interp::Interp;

fn file_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, None, "file subcommand name ?arg ...?")?;
    match argv[1].as_str() {
        "dirname" => {
            let parent = Path::new(&argv[2]).parent().map(|p| p.to_string_lossy().into_owned());
            ok(match parent {
                Some(p) if !p.is_empty() => p,
                _ => ".".to_string(),
            })
        }
        "tail" => {
            let name = Path::new(&argv[2])
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| argv[2].clone());
            ok(name)
        }
        "exists" => ok(crate::value::bool_str(Path::new(&argv[2]).exists())),
        "size" => {
            let meta = std::fs::metadata(&argv[2]).map_err(|e| interp.err_host(e.to_string()))?;
            ok(meta.len().to_string())
        }
        "join" => {
            let mut path = std::path::PathBuf::from(&argv[2]);
            for part in &argv[3..] {
                path.push(part);
            }
            ok(path.to_string_lossy().into_owned())
        }
        other => Err(interp.err_name(format!(
            "unknown or ambiguous subcommand \"{}\": must be one of dirname, exists, join, size, tail",
            other
        ))),
    }
}

pub(super) fn register(interp: &mut Interp) {
    interp.register_native("file", file_cmd);
}

#[cfg(test)]
mod tests {
    use crate::interp::Interp;
    use std::path::Path;

    #[test]
    fn file_dirname_and_tail() {
        let mut i = Interp::new();
        assert_eq!(i.eval("file dirname /a/b/c.txt").unwrap().value, "/a/b");
        assert_eq!(i.eval("file tail /a/b/c.txt").unwrap().value, "c.txt");
    }

    #[test]
    fn file_join_glues_components() {
        let mut i = Interp::new();
        let joined = i.eval("file join a b c").unwrap().value;
        assert_eq!(joined, Path::new("a").join("b").join("c").to_string_lossy());
    }

    #[test]
    fn file_exists_reflects_the_filesystem() {
        let mut i = Interp::new();
        assert_eq!(i.eval("file exists /nonexistent/path/xyz").unwrap().value, "0");
    }
}
