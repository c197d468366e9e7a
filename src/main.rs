use minish::Interpreter;

fn main() {
    let mut shell = Interpreter::default();
    if let Err(err) = shell.repl() {
        eprintln!("minish: {:#}", err);
        std::process::exit(1);
    }
}
