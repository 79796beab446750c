//! The plain driver (spec §6): `picol` with no arguments starts a REPL
//! on stdin/stdout, `picol -e SCRIPT` evaluates one script and exits,
//! and `picol FILE ARGS...` sources a file with `argv`/`argc` bound for
//! it, masking the process exit status to 8 bits the way a shell would.

use std::io::{self, BufRead, Write};

use clap::Parser as ClapParser;
use picol_core::Interp;

#[derive(ClapParser)]
#[command(name = "picol", about = "A small embeddable Tcl-family interpreter")]
struct Args {
    /// Evaluate SCRIPT and exit instead of reading a file or starting a REPL.
    #[arg(short = 'e', value_name = "SCRIPT")]
    script: Option<String>,

    /// Script file to source; remaining positionals become its `argv`.
    #[arg(trailing_var_arg = true)]
    file_and_args: Vec<String>,
}

fn bind_argv(interp: &mut Interp, script_name: &str, rest: &[String]) {
    interp.set_var("::argv0", script_name.to_string()).unwrap();
    interp.set_var("::argv", picol_core::list::list_from(rest)).unwrap();
    interp.set_var("::argc", rest.len().to_string()).unwrap();
}

fn report_error(interp: &mut Interp, err: &picol_core::InterpError) {
    let _ = err;
    eprintln!("{}", interp.get_var("::errorInfo").unwrap_or_default());
}

/// `init.pcl` in the current directory, sourced before the REPL, `-e`
/// script, or file action runs (spec §6).
fn load_init_file(interp: &mut Interp) {
    if let Ok(text) = std::fs::read_to_string("init.pcl") {
        if let Err(e) = interp.eval(&text) {
            eprintln!("picol: error in init.pcl: {}", e.message());
        }
    }
}

fn repl(interp: &mut Interp) -> i32 {
    let stdin = io::stdin();
    let mut code = 0;
    loop {
        print!("picol> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match interp.eval(&line) {
            Ok(c) => {
                code = 0;
                if !c.value.is_empty() {
                    println!("[0] {}", c.value);
                }
            }
            Err(e) => {
                code = 1;
                println!("[1] {}", e.message());
            }
        }
    }
    code
}

fn main() {
    let args = Args::parse();
    let mut interp = Interp::new();
    load_init_file(&mut interp);

    let status = if let Some(script) = args.script {
        bind_argv(&mut interp, "-e", &args.file_and_args);
        match interp.eval(&script) {
            Ok(c) => {
                if !c.value.is_empty() {
                    println!("{}", c.value);
                }
                0
            }
            Err(e) => {
                report_error(&mut interp, &e);
                1
            }
        }
    } else if let Some((path, rest)) = args.file_and_args.split_first() {
        bind_argv(&mut interp, path, rest);
        match std::fs::read_to_string(path) {
            Ok(text) => match interp.eval(&text) {
                Ok(_) => 0,
                Err(e) => {
                    report_error(&mut interp, &e);
                    1
                }
            },
            Err(e) => {
                eprintln!("picol: can't read \"{}\": {}", path, e);
                1
            }
        }
    } else {
        repl(&mut interp)
    };

    std::process::exit(status & 0xff);
}
