/// One row of the jq basics table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheatSheetEntry {
    pub syntax: &'static str,
    pub example: &'static str,
    pub description: &'static str,
}

const fn entry(
    syntax: &'static str,
    example: &'static str,
    description: &'static str,
) -> CheatSheetEntry {
    CheatSheetEntry {
        syntax,
        example,
        description,
    }
}

pub const JQ_MANUAL_URL: &str = "https://jqlang.org/manual/#basic-filters";

pub const CHEAT_SHEET: &[CheatSheetEntry] = &[
    entry(".", ".", "Identity: the input, unchanged"),
    entry(".field", ".name", "Value of a key in an object"),
    entry(".field?", ".name?", "Same, but no error when the input is not an object"),
    entry(".[<string>]", r#".["name"]"#, "Value of a key, for keys with special characters"),
    entry(".[<number>]", ".[0]", "Array element by index, negative counts from the end"),
    entry(".[]", ".children | .[]", "Every value of an array or object"),
    entry(",", ".username, .email", "Run both filters and output both results"),
    entry("|", ".users[] | .email", "Feed each output of the left filter to the right one"),
    entry("[...]", "[ .children[] | .name ]", "Collect outputs into an array"),
    entry("{...}", "{ login: .email, (.role): true }", "Build an object"),
];

/// Keys of the panel itself, shown under the jq table
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("Tab", "Switch between document and query"),
    ("F2", "Cycle indentation"),
    ("F3", "Toggle sorted keys"),
    ("F5", "Run the query again"),
    ("PgUp/PgDn", "Scroll output"),
    ("Enter", "Print output and exit (query focused)"),
    ("Ctrl+Q", "Print query and exit"),
    ("Esc / Ctrl+C", "Exit without output"),
];
