//! Static record example.
//!
//! Describes a `sync` command as plain Rust structs and parses the process
//! arguments into them, falling back to a config file for settings that
//! were not given on the command line.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argschema-demos --example static_record -- --help
//! cargo run -p argschema-demos --example static_record -- --mode fast --remote-user bob src dst
//! ```

use argschema_core::{FieldAnnotations, FieldVisitor, Introspectable, Slot};
use argschema_parse::{ArgumentParser, ParseError};

#[derive(Debug, Default)]
struct Remote {
    user: Option<String>,
    port: i64,
}

impl Introspectable for Remote {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.field(
            "user",
            FieldAnnotations::new().help("login name"),
            Slot::OptionalString(&mut self.user),
        );
        v.field(
            "port",
            FieldAnnotations::new().default_value("22"),
            Slot::Integer(&mut self.port),
        );
    }
}

#[derive(Debug, Default)]
struct Sync {
    paths: Vec<String>,
    mode: String,
    dry_run: bool,
    remote: Remote,
}

impl Introspectable for Sync {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.field(
            "mode",
            FieldAnnotations::new()
                .choices("fast|safe|checksum")
                .default_value("safe")
                .help("comparison strategy"),
            Slot::String(&mut self.mode),
        );
        v.field(
            "dry_run",
            FieldAnnotations::new().help("only report what would change"),
            Slot::Bool(&mut self.dry_run),
        );
        v.nested("remote", FieldAnnotations::new(), &mut self.remote);
        v.field(
            "PATHS",
            FieldAnnotations::new().help("source and destination"),
            Slot::StringList(&mut self.paths),
        );
    }
}

fn main() {
    let parser = match ArgumentParser::<Sync>::new("sync") {
        Ok(parser) => parser.with_description("Synchronize directories."),
        Err(e) => {
            eprintln!("invalid schema: {e}");
            std::process::exit(2);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut sync = Sync::default();
    match parser.parse_args(&mut sync, &args) {
        Ok(()) => {}
        Err(ParseError::HelpRequested) => {
            print!("{}", parser.help_text());
            return;
        }
        Err(e) => {
            eprintln!("{}", parser.usage());
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    }

    // Config text only fills what the command line left unset.
    if sync.remote.user.is_none() {
        let config = "# defaults\nremote_user = deploy\n";
        if let Err(e) = parser.parse_reader(&mut sync, config.as_bytes()) {
            eprintln!("config error: {e}");
        }
    }

    println!("{sync:#?}");
}
