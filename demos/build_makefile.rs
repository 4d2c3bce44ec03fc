//! Build a rule file programmatically using the builder API.

use makefile_rs::{CommandLine, Config, Program, Target};

fn main() {
    let mut program = Program::new()
        .target(
            Target::new("site")
                .prerequisite("index.html")
                .prerequisite("style.css")
                .command(CommandLine::new().word("publish").all_prerequisites()),
        )
        .target(Target::new("clean").command(CommandLine::new().words(&["remove", "site"])));

    program
        .expand_with(&Config::new().separator(" "))
        .expect("expand failed");

    print!("{}", makefile_rs::format(&program));
}
