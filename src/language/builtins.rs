pub const KEYWORDS: &[&str] = &[
    // declarations
    "class",
    "fun",
    "async",
    "await",
    "return",
    // control flow
    "if",
    "elif",
    "else",
    "for",
    "while",
    "in",
    "break",
    "continue",
    "pass",
    "match",
    "case",
    // imports
    "import",
    "from",
    "as",
    // errors
    "try",
    "except",
    "finally",
    "raise",
    // operators and literals
    "and",
    "or",
    "not",
    "is",
    "true",
    "false",
    "none",
];

pub const TYPES: &[&str] = &[
    "int", "float", "bool", "string", "bytes", "list", "map", "set", "tuple", "any",
];

pub const FUNCTIONS: &[&str] = &[
    "print",
    "len",
    "range",
    "input",
    "open",
    "abs",
    "min",
    "max",
    "sum",
    "sorted",
    "enumerate",
    "zip",
    "format",
    "type_of",
];

pub const MODULES: &[&str] = &[
    "math", "io", "os", "time", "json", "random", "net", "text",
];

pub const DECORATORS: &[&str] = &[
    "cached",
    "deprecated",
    "export",
    "inline",
    "main",
    "override",
    "static",
    "test",
];
