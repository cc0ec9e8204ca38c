use argschema_core::{
    FieldAnnotations, FieldKind, FieldValue, FieldVisitor, Introspectable, Schema, SchemaError,
    Slot,
};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Positional {
    pos: String,
    nonpos_required: String,
    nonpos: String,
}

impl Introspectable for Positional {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.field("POS", FieldAnnotations::new(), Slot::String(&mut self.pos));
        v.field(
            "NONPOSREQUIRED",
            FieldAnnotations::new().positional(false).required(true),
            Slot::String(&mut self.nonpos_required),
        );
        v.field(
            "NONPOS",
            FieldAnnotations::new().positional(false),
            Slot::String(&mut self.nonpos),
        );
    }
}

#[derive(Default)]
struct Ordered {
    opts: [String; 5],
}

impl Introspectable for Ordered {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        let [o0, o1, o2, o3, o4] = &mut self.opts;
        v.field("Opt0", FieldAnnotations::new(), Slot::String(o0));
        v.field("Opt1", FieldAnnotations::new().required(true), Slot::String(o1));
        v.field("Opt2", FieldAnnotations::new(), Slot::String(o2));
        v.field("Opt3", FieldAnnotations::new().required(true), Slot::String(o3));
        v.field("Opt4", FieldAnnotations::new(), Slot::String(o4));
    }
}

/// Single-field record parameterized by annotations and kind.
struct One {
    name: &'static str,
    annotations: FieldAnnotations,
    kind: FieldKind,
    text: String,
    number: i64,
    flag: bool,
    list: Vec<String>,
}

impl One {
    fn new(name: &'static str, kind: FieldKind, annotations: FieldAnnotations) -> Self {
        Self {
            name,
            annotations,
            kind,
            text: String::new(),
            number: 0,
            flag: false,
            list: Vec::new(),
        }
    }
}

impl Introspectable for One {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        let slot = match self.kind {
            FieldKind::Integer => Slot::Integer(&mut self.number),
            FieldKind::Bool => Slot::Bool(&mut self.flag),
            FieldKind::StringList => Slot::StringList(&mut self.list),
            _ => Slot::String(&mut self.text),
        };
        v.field(self.name, self.annotations.clone(), slot);
    }
}

#[derive(Default)]
struct Pair {
    non_pos: String,
    pos: String,
}

impl Introspectable for Pair {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.field("NonPos", FieldAnnotations::new(), Slot::String(&mut self.non_pos));
        v.field("POS", FieldAnnotations::new(), Slot::String(&mut self.pos));
    }
}

#[derive(Default)]
struct Overriding {
    m_non_pos: String,
    pos: String,
}

impl Introspectable for Overriding {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.field(
            "MNonPos",
            FieldAnnotations::new().token("m-non-pos"),
            Slot::String(&mut self.m_non_pos),
        );
        v.field("POS", FieldAnnotations::new(), Slot::String(&mut self.pos));
    }
}

#[derive(Default)]
struct Members {
    l: Pair,
    m: Pair,
    n: Pair,
}

impl Introspectable for Members {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.embedded(&mut self.l);
        v.nested("M", FieldAnnotations::new(), &mut self.m);
        v.nested("N", FieldAnnotations::new(), &mut self.n);
    }
}

#[derive(Default)]
struct EmbeddedTwice {
    l: Pair,
    m: Pair,
}

impl Introspectable for EmbeddedTwice {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.embedded(&mut self.l);
        v.embedded(&mut self.m);
    }
}

#[derive(Default)]
struct OverrideCollision {
    l: Overriding,
    m: Pair,
}

impl Introspectable for OverrideCollision {
    fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
        v.embedded(&mut self.l);
        v.nested("M", FieldAnnotations::new(), &mut self.m);
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn test_single_positional_is_required() {
    let schema = Schema::for_type::<Positional>().unwrap();
    assert_eq!(schema.positionals().len(), 1);
    let pos = &schema.positionals()[0];
    assert!(pos.positional);
    assert!(pos.required);
    assert_eq!(pos.to_string(), "<POS>");

    // help + NONPOS + NONPOSREQUIRED
    assert_eq!(schema.optionals().len(), 3);
    let nonpos = &schema.optionals()[1];
    assert!(!nonpos.positional);
    assert!(!nonpos.required);
    assert_eq!(nonpos.to_string(), "[--nonpos NONPOS]");
    let required = &schema.optionals()[2];
    assert!(required.required);
    assert_eq!(required.to_string(), "<--nonposrequired NONPOSREQUIRED>");
}

#[test]
fn test_required_optionals_come_last() {
    let schema = Schema::for_type::<Ordered>().unwrap();
    let names: Vec<&str> = schema.optionals().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["help", "Opt0", "Opt2", "Opt4", "Opt1", "Opt3"]);

    let mut seen_required = false;
    for spec in schema.optionals() {
        if spec.required {
            seen_required = true;
        } else {
            assert!(!seen_required, "{spec} follows a required optional");
        }
    }
}

#[test]
fn test_required_optional_rendering() {
    let mut record =
        One::new("RequiredOpt", FieldKind::String, FieldAnnotations::new().required(true));
    let schema = Schema::build(&mut record).unwrap();
    assert_eq!(schema.optionals()[1].to_string(), "<--required-opt REQUIRED_OPT>");
}

#[test]
fn test_optional_positional_rejected() {
    let mut record = One::new("POS", FieldKind::String, FieldAnnotations::new().required(false));
    assert_eq!(
        Schema::build(&mut record).unwrap_err(),
        SchemaError::OptionalPositional("POS".to_string())
    );
}

#[test]
fn test_positional_default_rejected() {
    let mut record = One::new(
        "POS",
        FieldKind::String,
        FieldAnnotations::new().default_value("baddefault"),
    );
    assert_eq!(
        Schema::build(&mut record).unwrap_err(),
        SchemaError::PositionalDefault("POS".to_string())
    );
}

#[test]
fn test_required_with_default_rejected() {
    let mut record = One::new(
        "Opt",
        FieldKind::Integer,
        FieldAnnotations::new().default_value("100").required(true),
    );
    assert_eq!(
        Schema::build(&mut record).unwrap_err(),
        SchemaError::RequiredWithDefault("Opt".to_string())
    );
}

// ---------------------------------------------------------------------------
// Defaults and choices
// ---------------------------------------------------------------------------

#[test]
fn test_default_parsed_for_kind() {
    let mut record =
        One::new("Retries", FieldKind::Integer, FieldAnnotations::new().default_value("5"));
    let schema = Schema::build(&mut record).unwrap();
    assert_eq!(schema.optionals()[1].default, Some(FieldValue::Integer(5)));

    let mut record =
        One::new("Retries", FieldKind::Integer, FieldAnnotations::new().default_value("five"));
    assert!(matches!(
        Schema::build(&mut record),
        Err(SchemaError::InvalidDefault { .. })
    ));
}

#[test]
fn test_choices_only_on_strings() {
    let mut record =
        One::new("Port", FieldKind::Integer, FieldAnnotations::new().choices("80|443"));
    assert_eq!(
        Schema::build(&mut record).unwrap_err(),
        SchemaError::ChoicesOnNonString("Port".to_string())
    );

    let mut record =
        One::new("Nets", FieldKind::StringList, FieldAnnotations::new().choices("a|b"));
    assert!(Schema::build(&mut record).is_ok());
}

#[test]
fn test_default_must_be_a_choice() {
    let mut record = One::new(
        "Proto",
        FieldKind::String,
        FieldAnnotations::new().choices("tcp|udp").default_value("http"),
    );
    assert!(matches!(
        Schema::build(&mut record),
        Err(SchemaError::DefaultNotInChoices { .. })
    ));
}

#[test]
fn test_choice_set_with_empty_member() {
    let mut record =
        One::new("HasEmpty", FieldKind::String, FieldAnnotations::new().choices("hello|"));
    let schema = Schema::build(&mut record).unwrap();
    let spec = schema.find_optional("has-empty").unwrap();
    assert_eq!(spec.choices, Some(vec!["hello".to_string(), String::new()]));
}

#[test]
fn test_help_token_is_reserved() {
    let mut record = One::new("help", FieldKind::Bool, FieldAnnotations::new());
    assert!(matches!(
        Schema::build(&mut record),
        Err(SchemaError::DuplicateToken { .. })
    ));
}

// ---------------------------------------------------------------------------
// Nested records
// ---------------------------------------------------------------------------

#[test]
fn test_nested_records_flatten_in_order() {
    let schema = Schema::for_type::<Members>().unwrap();
    let metavars: Vec<&str> = schema.positionals().iter().map(|s| s.metavar.as_str()).collect();
    assert_eq!(metavars, vec!["POS", "M_POS", "N_POS"]);

    let tokens: Vec<&str> = schema.optionals().iter().map(|s| s.token.as_str()).collect();
    assert_eq!(tokens, vec!["help", "non-pos", "m-non-pos", "n-non-pos"]);
    assert_eq!(schema.find_optional("m_non_pos").unwrap().path, "M.NonPos");
    assert_eq!(schema.find_optional("non_pos").unwrap().path, "#0.NonPos");
    assert_eq!(schema.field_count(), 6);
}

#[test]
fn test_duplicate_across_embedded_records() {
    let err = Schema::for_type::<EmbeddedTwice>().unwrap_err();
    assert_eq!(
        err,
        SchemaError::DuplicateToken {
            token: "non-pos".to_string(),
            first: "#0.NonPos".to_string(),
            second: "#1.NonPos".to_string(),
        }
    );
}

#[test]
fn test_duplicate_between_override_and_nested() {
    let err = Schema::for_type::<OverrideCollision>().unwrap_err();
    assert_eq!(
        err,
        SchemaError::DuplicateToken {
            token: "m-non-pos".to_string(),
            first: "#0.MNonPos".to_string(),
            second: "M.NonPos".to_string(),
        }
    );
}
