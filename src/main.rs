use std::process::ExitCode;

fn main() -> ExitCode {
    match nidi::dispatch::run(std::env::args_os()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("\x1b[31mERROR\x1b[0m {err:#}");
            ExitCode::FAILURE
        }
    }
}
