//! End-to-end parsing of statically described records through
//! `ArgumentParser`.

use argschema_core::{FieldAnnotations, FieldVisitor, Introspectable, Slot};
use argschema_parse::{ArgumentParser, ParseError};
use serde_json::json;

fn parser<T: Introspectable + Default>() -> ArgumentParser<T> {
    ArgumentParser::<T>::new("prog")
        .unwrap()
        .with_description("prog desc")
        .with_epilog("prog epilog")
}

#[derive(Debug, Default)]
struct Bools {
    plain: bool,
    plain_opt: Option<bool>,
    default_true: bool,
    opt_default_true: Option<bool>,
    default_false: bool,
    opt_default_false: Option<bool>,
}

impl Introspectable for Bools {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.field("Bool", FieldAnnotations::new(), Slot::Bool(&mut self.plain));
        v.field("BoolP", FieldAnnotations::new(), Slot::OptionalBool(&mut self.plain_opt));
        v.field(
            "BoolDefaultTrue",
            FieldAnnotations::new().default_value("true"),
            Slot::Bool(&mut self.default_true),
        );
        v.field(
            "BoolPtrDefaultTrue",
            FieldAnnotations::new().default_value("true"),
            Slot::OptionalBool(&mut self.opt_default_true),
        );
        v.field(
            "BoolDefaultFalse",
            FieldAnnotations::new().default_value("false"),
            Slot::Bool(&mut self.default_false),
        );
        v.field(
            "BoolPtrDefaultFalse",
            FieldAnnotations::new().default_value("false"),
            Slot::OptionalBool(&mut self.opt_default_false),
        );
    }
}

#[test]
fn test_bool_defaults_without_flags() {
    let mut record = Bools::default();
    parser::<Bools>().parse_args::<&str>(&mut record, &[]).unwrap();

    assert!(!record.plain);
    assert_eq!(record.plain_opt, None);
    assert!(record.default_true);
    assert_eq!(record.opt_default_true, Some(true));
    assert!(!record.default_false);
    assert_eq!(record.opt_default_false, Some(false));
}

#[test]
fn test_bool_flags_negate_defaults() {
    let mut record = Bools::default();
    parser::<Bools>()
        .parse_args(
            &mut record,
            &[
                "--bool",
                "--bool-p",
                "--bool-default-true",
                "--bool-ptr-default-true",
                "--bool-default-false",
                "--bool-ptr-default-false",
            ],
        )
        .unwrap();

    assert!(record.plain);
    assert_eq!(record.plain_opt, Some(true));
    assert!(!record.default_true);
    assert_eq!(record.opt_default_true, Some(false));
    assert!(record.default_false);
    assert_eq!(record.opt_default_false, Some(true));
}

#[test]
fn test_bool_from_config_text() {
    let mut record = Bools::default();
    parser::<Bools>()
        .parse_reader(&mut record, "\nbool_default_true = False\n               ".as_bytes())
        .unwrap();
    assert!(!record.default_true);
}

#[derive(Debug, Default)]
struct Proto {
    string: String,
}

impl Introspectable for Proto {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.field(
            "String",
            FieldAnnotations::new().choices("tcp|udp|http|https"),
            Slot::String(&mut self.string),
        );
    }
}

#[test]
fn test_good_choices() {
    let parser = parser::<Proto>();
    for choice in ["tcp", "udp", "http", "https"] {
        let mut record = Proto::default();
        parser.parse_args(&mut record, &["--string", choice]).unwrap();
        assert_eq!(record.string, choice);
    }
}

#[test]
fn test_bad_choices_leave_field_unset() {
    let parser = parser::<Proto>();
    for choice in ["", "et", "ud", "dp"] {
        let mut record = Proto::default();
        let err = parser
            .parse_args(&mut record, &["--string", choice])
            .unwrap_err();
        let message = err.to_string();
        assert!(
            message.contains(", accepts ") || message.contains(", did you mean "),
            "unexpected message: {message}"
        );
        assert_eq!(record.string, "");
    }
}

#[derive(Debug, Default)]
struct EmptyChoices {
    only_empty: Option<String>,
    has_empty: Option<String>,
}

impl Introspectable for EmptyChoices {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.field(
            "OnlyEmpty",
            FieldAnnotations::new().choices(""),
            Slot::OptionalString(&mut self.only_empty),
        );
        v.field(
            "HasEmpty",
            FieldAnnotations::new().choices("hello|"),
            Slot::OptionalString(&mut self.has_empty),
        );
    }
}

#[test]
fn test_empty_string_as_choice() {
    let parser = parser::<EmptyChoices>();

    let mut record = EmptyChoices::default();
    parser.parse_args(&mut record, &["--only-empty", ""]).unwrap();
    assert_eq!(record.only_empty.as_deref(), Some(""));

    let mut record = EmptyChoices::default();
    assert!(parser.parse_args(&mut record, &["--only-empty", "notempty"]).is_err());
    assert_eq!(record.only_empty, None);

    let mut record = EmptyChoices::default();
    parser.parse_args(&mut record, &["--has-empty", "hello"]).unwrap();
    assert_eq!(record.has_empty.as_deref(), Some("hello"));

    let mut record = EmptyChoices::default();
    parser.parse_args(&mut record, &["--has-empty", ""]).unwrap();
    assert_eq!(record.has_empty.as_deref(), Some(""));

    let mut record = EmptyChoices::default();
    assert!(parser.parse_args(&mut record, &["--has-empty", "world"]).is_err());
    assert_eq!(record.has_empty, None);
}

#[derive(Debug, Default)]
struct Text {
    string: String,
}

impl Introspectable for Text {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.field("String", FieldAnnotations::new(), Slot::String(&mut self.string));
    }
}

#[test]
fn test_values_kept_verbatim() {
    let parser = parser::<Text>();
    for value in ["Hello world", "'Hello 'world'", "\"Hello \"world\"", r"Hello\n\tworld\n"] {
        let mut record = Text::default();
        parser.parse_args(&mut record, &["--string", value]).unwrap();
        assert_eq!(record.string, value);
    }
}

#[derive(Debug, Default)]
struct Hidden {
    unexported: String,
}

impl Introspectable for Hidden {
    fn visit_fields(&mut self, _v: &mut dyn FieldVisitor) {}
}

#[test]
fn test_unvisited_fields_are_unknown() {
    let parser = parser::<Hidden>();
    assert_eq!(parser.schema().field_count(), 0);

    let mut record = Hidden::default();
    assert!(matches!(
        parser.parse_args(&mut record, &["--unexported", ""]),
        Err(ParseError::UnknownArgument { .. })
    ));

    let lenient = parser.with_ignore_unknown(true);
    lenient.parse_args(&mut record, &["--unexported", ""]).unwrap();
    assert_eq!(record.unexported, "");
}

#[derive(Debug, Default)]
struct Member {
    non_pos: String,
    pos: String,
}

impl Introspectable for Member {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.field("NonPos", FieldAnnotations::new(), Slot::String(&mut self.non_pos));
        v.field("POS", FieldAnnotations::new(), Slot::String(&mut self.pos));
    }
}

#[derive(Debug, Default)]
struct Members {
    l: Member,
    m: Member,
    n: Member,
}

impl Introspectable for Members {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.embedded(&mut self.l);
        v.nested("M", FieldAnnotations::new(), &mut self.m);
        v.nested("N", FieldAnnotations::new(), &mut self.n);
    }
}

#[test]
fn test_embedded_and_nested_members() {
    let mut record = Members::default();
    parser::<Members>()
        .parse_args(
            &mut record,
            &[
                "--non-pos",
                "l-non-pos",
                "--m-non-pos",
                "m-non-pos",
                "--n-non-pos",
                "n-non-pos",
                "L_POS",
                "M_POS",
                "N_POS",
            ],
        )
        .unwrap();

    assert_eq!(record.l.non_pos, "l-non-pos");
    assert_eq!(record.l.pos, "L_POS");
    assert_eq!(record.m.non_pos, "m-non-pos");
    assert_eq!(record.m.pos, "M_POS");
    assert_eq!(record.n.non_pos, "n-non-pos");
    assert_eq!(record.n.pos, "N_POS");
}

#[test]
fn test_nested_members_from_document_and_config() {
    let parser = parser::<Members>();

    let mut record = Members::default();
    let doc = json!({"non_pos": "l", "m": {"non_pos": "m"}, "n_non_pos": "n"});
    parser.parse_document(&mut record, &doc).unwrap();
    assert_eq!(
        (record.l.non_pos.as_str(), record.m.non_pos.as_str(), record.n.non_pos.as_str()),
        ("l", "m", "n")
    );

    let mut record = Members::default();
    parser
        .parse_reader(&mut record, "m_non_pos = from-config\n".as_bytes())
        .unwrap();
    assert_eq!(record.m.non_pos, "from-config");
}

#[derive(Debug, Default)]
struct Inventory {
    name: String,
    number: i64,
    networks: Vec<String>,
    quoted: String,
    quotes: Vec<String>,
}

impl Introspectable for Inventory {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.field("Name", FieldAnnotations::new(), Slot::String(&mut self.name));
        v.field("Number", FieldAnnotations::new(), Slot::Integer(&mut self.number));
        v.field("Networks", FieldAnnotations::new(), Slot::StringList(&mut self.networks));
        v.field("Quoted", FieldAnnotations::new(), Slot::String(&mut self.quoted));
        v.field("Quotes", FieldAnnotations::new(), Slot::StringList(&mut self.quotes));
    }
}

#[test]
fn test_document_values_verbatim() {
    let mut record = Inventory::default();
    parser::<Inventory>()
        .parse_document(
            &mut record,
            &json!({
                "name": "args",
                "number": 1,
                "networks": ["net1", "net2"],
                "quoted": "\"1\"",
                "quotes": ["\"1\"", "\"2\""],
            }),
        )
        .unwrap();

    assert_eq!(record.name, "args");
    assert_eq!(record.number, 1);
    assert_eq!(record.networks, vec!["net1", "net2"]);
    assert_eq!(record.quoted, "\"1\"");
    assert_eq!(record.quotes, vec!["\"1\"", "\"2\""]);
}

#[derive(Debug, Default)]
struct Deploy {
    target: String,
    name: String,
}

impl Introspectable for Deploy {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.field("TARGET", FieldAnnotations::new(), Slot::String(&mut self.target));
        v.field("name", FieldAnnotations::new().required(true), Slot::String(&mut self.name));
    }
}

#[test]
fn test_missing_arguments_collected() {
    let mut record = Deploy::default();
    match parser::<Deploy>().parse_args::<&str>(&mut record, &[]) {
        Err(ParseError::MissingArgument(missing)) => {
            assert_eq!(missing, vec!["<TARGET>", "<--name NAME>"]);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_too_many_arguments() {
    let mut record = Deploy::default();
    match parser::<Deploy>().parse_args(&mut record, &["prod", "staging", "--name", "x"]) {
        Err(ParseError::TooManyArguments(extra)) => assert_eq!(extra, vec!["staging"]),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(record.target, "");
}

#[test]
fn test_help_requested() {
    let parser = parser::<Deploy>();
    let mut record = Deploy::default();
    assert!(matches!(
        parser.parse_args(&mut record, &["--help"]),
        Err(ParseError::HelpRequested)
    ));

    let help = parser.help_text();
    assert!(help.starts_with("usage: prog [--help] <--name NAME> <TARGET>\n"));
    assert!(help.contains("prog desc"));
    assert!(help.contains("prog epilog"));
}
