use std::process::ExitCode;

mod platform;

fn main() -> ExitCode {
    platform::run(std::env::args().skip(1).collect())
}
