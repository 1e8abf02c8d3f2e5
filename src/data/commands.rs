//! Command table: every command name and alias mapped to its handler
//!
//! Names are looked up after folding `_` to `-`, so `ol_A`, `ol-A` and
//! `bookmarks_folder-id` all resolve. Lookup is otherwise case sensitive
//! (`ol-A` and `ol-a` are different list styles).

use std::borrow::Cow;

use fxhash::FxHashMap;
use lazy_static::lazy_static;

use super::literals::{get_literal, LITERALS, LITERAL_ALIASES};

use CommandHandler as H;

// ============================================================================
// Handler kinds
// ============================================================================

/// How a command is evaluated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandHandler {
    /// `<tag>` + rendered children + `</tag>`
    Wrap(&'static str),
    /// Like `Wrap`, with fixed attributes on the opening tag
    WrapWith {
        tag: &'static str,
        attributes: &'static str,
    },
    /// Fixed output; children are ignored
    Literal(&'static str),
    /// `&nbsp;` repeated by an optional numeric argument
    Nbsp,
    /// A numeric constant
    Constant(f64),
    /// Folding arithmetic over all numeric operands
    Arithmetic(Arithmetic),
    /// Function of the first one or two numeric operands (or all, for `hypot`)
    Function(Function),
    /// Percentage helpers
    Percent(Percent),
    /// Chained numeric comparison
    Compare(Comparison),
    /// Boolean form over `true`/`false` operands
    Logic(Logic),
    /// Form that decides which unrendered children to render
    Control(Control),
    /// `\link{uri description…}`
    Link,
    /// `\image{uri alt…}`
    Image,
    /// `\mailto{address}`
    Mailto,
    /// Host entity reference by numeric ID
    Entity(EntityKind),
    /// Host user reference
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arithmetic {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Erf,
    Erfc,
    Gamma,
    Lgamma,
    Sqrt,
    Ln,
    Log2,
    Log10,
    /// `log{base number}`, or natural log with one operand
    Log,
    /// `ldexp{fraction exponent}`
    Ldexp,
    /// Euclidean norm of all operands
    Hypot,
    DegreesToRadians,
    RadiansToDegrees,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Percent {
    /// `a% of b`
    Of,
    /// `a` increased by `p` percent
    Plus,
    /// `a` decreased by `p` percent
    Minus,
    /// `part` as a percentage of `total`
    OfTotal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logic {
    And,
    Or,
    /// Exactly one operand is true
    Xor,
    Nand,
    Nor,
    Xnor,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    If,
    Unless,
    When,
    Cond,
    Case,
    Comment,
    Prog1,
    Progn,
}

/// Kinds of host entity that can be referenced by numeric ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Link,
    Tag,
    Folder,
    BookmarksFolder,
    Forum,
    Keyword,
    Note,
}

impl EntityKind {
    /// Singular snake_case name, as used in error messages
    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Link => "link",
            EntityKind::Tag => "tag",
            EntityKind::Folder | EntityKind::BookmarksFolder => "folder",
            EntityKind::Forum => "forum",
            EntityKind::Keyword => "keyword",
            EntityKind::Note => "note",
        }
    }

    /// URL path segment of the collection
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Link => "links",
            EntityKind::Tag => "tags",
            EntityKind::Folder | EntityKind::BookmarksFolder => "folders",
            EntityKind::Forum => "forums",
            EntityKind::Keyword => "keywords",
            EntityKind::Note => "notes",
        }
    }

    /// Label used in fallback link text
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Link => "Link",
            EntityKind::Tag => "Tag",
            EntityKind::Folder | EntityKind::BookmarksFolder => "Folder",
            EntityKind::Forum => "Forum",
            EntityKind::Keyword => "Keyword",
            EntityKind::Note => "Note",
        }
    }

    /// Extra path appended after the ID in fallback links
    pub fn view(self) -> &'static str {
        match self {
            EntityKind::BookmarksFolder => "/bookmarks",
            _ => "",
        }
    }
}

// ============================================================================
// Alias lists
// ============================================================================

const UL_DISC: &[&str] = &["itemize-disc", "ul-disc", "itemize-disk", "ul-disk"];
const UL_CIRCLE: &[&str] = &["itemize-circle", "ul-circle"];
const UL_SQUARE: &[&str] = &["itemize-square", "ul-square"];
const UL_NONE: &[&str] = &["itemize-none", "ul-none"];

const OL_NUMERIC: &[&str] = &["enumerate-numeric", "ol-numeric", "enumerate-1", "ol-1"];
const OL_UPPERCASE: &[&str] = &[
    "enumerate-uppercase",
    "ol-uppercase",
    "enumerate-upcase",
    "ol-upcase",
    "enumerate-A",
    "ol-A",
];
const OL_LOWERCASE: &[&str] = &[
    "enumerate-lowercase",
    "ol-lowercase",
    "enumerate-downcase",
    "ol-downcase",
    "enumerate-a",
    "ol-a",
];
const OL_ROMAN_UPPERCASE: &[&str] = &[
    "enumerate-roman-uppercase",
    "ol-roman-uppercase",
    "enumerate-roman-upcase",
    "ol-roman-upcase",
    "enumerate-I",
    "ol-I",
];
const OL_ROMAN_LOWERCASE: &[&str] = &[
    "enumerate-roman-lowercase",
    "ol-roman-lowercase",
    "enumerate-roman-downcase",
    "ol-roman-downcase",
    "enumerate-i",
    "ol-i",
];

fn insert_all(
    m: &mut FxHashMap<&'static str, CommandHandler>,
    names: &[&'static str],
    handler: CommandHandler,
) {
    for name in names {
        m.insert(*name, handler);
    }
}

lazy_static! {
    /// Normalized command name → handler
    pub static ref COMMANDS: FxHashMap<&'static str, CommandHandler> = {
        let mut m = FxHashMap::default();

        // Inline formatting
        insert_all(&mut m, &["b", "bold", "textbf"], H::Wrap("b"));
        insert_all(&mut m, &["i", "it", "italic", "textit"], H::Wrap("i"));
        insert_all(&mut m, &["u", "underline"], H::Wrap("u"));
        insert_all(&mut m, &["del", "s", "strike", "strikethrough", "strikeout"], H::Wrap("del"));
        insert_all(&mut m, &["tt", "texttt", "teletype", "typewriter"], H::Wrap("tt"));
        insert_all(&mut m, &["sub", "subscript"], H::Wrap("sub"));
        insert_all(&mut m, &["sup", "superscript"], H::Wrap("sup"));
        for tag in ["small", "big", "span", "h1", "h2", "h3", "h4", "h5", "h6"] {
            m.insert(tag, H::Wrap(tag));
        }

        // Lists and tables
        insert_all(&mut m, &["itemize", "ul"], H::Wrap("ul"));
        insert_all(&mut m, &["enumerate", "ol"], H::Wrap("ol"));
        insert_all(&mut m, &["item", "li"], H::Wrap("li"));
        m.insert("table", H::Wrap("table"));
        insert_all(&mut m, &["tr", "table-row"], H::Wrap("tr"));
        insert_all(&mut m, &["th", "table-header"], H::Wrap("th"));
        insert_all(&mut m, &["td", "table-data", "table-cell"], H::Wrap("td"));

        let ul = |style| H::WrapWith { tag: "ul", attributes: style };
        insert_all(&mut m, UL_DISC, ul(r#"style="list-style-type: disc;""#));
        insert_all(&mut m, UL_CIRCLE, ul(r#"style="list-style-type: circle;""#));
        insert_all(&mut m, UL_SQUARE, ul(r#"style="list-style-type: square;""#));
        insert_all(&mut m, UL_NONE, ul(r#"style="list-style-type: none;""#));

        let ol = |kind| H::WrapWith { tag: "ol", attributes: kind };
        insert_all(&mut m, OL_NUMERIC, ol(r#"type="1""#));
        insert_all(&mut m, OL_UPPERCASE, ol(r#"type="A""#));
        insert_all(&mut m, OL_LOWERCASE, ol(r#"type="a""#));
        insert_all(&mut m, OL_ROMAN_UPPERCASE, ol(r#"type="I""#));
        insert_all(&mut m, OL_ROMAN_LOWERCASE, ol(r#"type="i""#));

        // Literals and escapes
        for name in LITERALS.keys().chain(LITERAL_ALIASES.keys()) {
            if let Some(text) = get_literal(name) {
                m.insert(*name, H::Literal(text));
            }
        }
        m.insert("nbsp", H::Nbsp);

        // Numbers
        m.insert("pi", H::Constant(std::f64::consts::PI));
        m.insert("e", H::Constant(std::f64::consts::E));
        m.insert("+", H::Arithmetic(Arithmetic::Add));
        m.insert("-", H::Arithmetic(Arithmetic::Subtract));
        m.insert("*", H::Arithmetic(Arithmetic::Multiply));
        m.insert("/", H::Arithmetic(Arithmetic::Divide));
        m.insert("%", H::Arithmetic(Arithmetic::Modulo));
        insert_all(&mut m, &["^", "**"], H::Arithmetic(Arithmetic::Power));

        let functions = [
            ("sin", Function::Sin),
            ("cos", Function::Cos),
            ("tan", Function::Tan),
            ("asin", Function::Asin),
            ("acos", Function::Acos),
            ("atan", Function::Atan),
            ("sinh", Function::Sinh),
            ("cosh", Function::Cosh),
            ("tanh", Function::Tanh),
            ("asinh", Function::Asinh),
            ("acosh", Function::Acosh),
            ("atanh", Function::Atanh),
            ("erf", Function::Erf),
            ("erfc", Function::Erfc),
            ("gamma", Function::Gamma),
            ("lgamma", Function::Lgamma),
            ("sqrt", Function::Sqrt),
            ("ln", Function::Ln),
            ("ld", Function::Log2),
            ("log2", Function::Log2),
            ("log10", Function::Log10),
            ("log", Function::Log),
            ("ldexp", Function::Ldexp),
            ("hypot", Function::Hypot),
            ("d2r", Function::DegreesToRadians),
            ("deg->rad", Function::DegreesToRadians),
            ("degrees->radians", Function::DegreesToRadians),
            ("r2d", Function::RadiansToDegrees),
            ("rad->deg", Function::RadiansToDegrees),
            ("radians->degrees", Function::RadiansToDegrees),
        ];
        for (name, function) in functions {
            m.insert(name, H::Function(function));
        }

        insert_all(&mut m, &["%of", "percent-of"], H::Percent(Percent::Of));
        m.insert("+%", H::Percent(Percent::Plus));
        m.insert("-%", H::Percent(Percent::Minus));
        m.insert("%t", H::Percent(Percent::OfTotal));

        insert_all(&mut m, &["=", "==", "eq"], H::Compare(Comparison::Equal));
        insert_all(&mut m, &["!=", "/=", "ne"], H::Compare(Comparison::NotEqual));
        insert_all(&mut m, &["<", "lt"], H::Compare(Comparison::Less));
        insert_all(&mut m, &["<=", "le"], H::Compare(Comparison::LessEqual));
        insert_all(&mut m, &[">", "gt"], H::Compare(Comparison::Greater));
        insert_all(&mut m, &[">=", "ge"], H::Compare(Comparison::GreaterEqual));

        // Booleans and control
        m.insert("and", H::Logic(Logic::And));
        m.insert("or", H::Logic(Logic::Or));
        m.insert("xor", H::Logic(Logic::Xor));
        m.insert("nand", H::Logic(Logic::Nand));
        m.insert("nor", H::Logic(Logic::Nor));
        m.insert("xnor", H::Logic(Logic::Xnor));
        m.insert("not", H::Logic(Logic::Not));

        m.insert("if", H::Control(Control::If));
        m.insert("unless", H::Control(Control::Unless));
        m.insert("when", H::Control(Control::When));
        m.insert("cond", H::Control(Control::Cond));
        m.insert("case", H::Control(Control::Case));
        m.insert("comment", H::Control(Control::Comment));
        m.insert("prog1", H::Control(Control::Prog1));
        m.insert("progn", H::Control(Control::Progn));

        // Links and host references
        insert_all(&mut m, &["link", "href", "url"], H::Link);
        insert_all(&mut m, &["image", "img"], H::Image);
        insert_all(&mut m, &["mailto", "email"], H::Mailto);
        m.insert("link-id", H::Entity(EntityKind::Link));
        m.insert("tag-id", H::Entity(EntityKind::Tag));
        m.insert("folder-id", H::Entity(EntityKind::Folder));
        m.insert("forum-id", H::Entity(EntityKind::Forum));
        m.insert("keyword-id", H::Entity(EntityKind::Keyword));
        m.insert("note-id", H::Entity(EntityKind::Note));
        insert_all(
            &mut m,
            &["bookmarks-folder-id", "bookmark-folder-id"],
            H::Entity(EntityKind::BookmarksFolder),
        );
        insert_all(&mut m, &["user", "user-id"], H::User);

        m
    };
}

/// Fold `_` to `-`
pub fn normalize_name(name: &str) -> Cow<'_, str> {
    if name.contains('_') {
        Cow::Owned(name.replace('_', "-"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Look up a command by name or alias
pub fn lookup_command(name: &str) -> Option<CommandHandler> {
    COMMANDS.get(normalize_name(name).as_ref()).copied()
}

/// Whether `name` names a built-in command
pub fn is_known_command(name: &str) -> bool {
    lookup_command(name).is_some()
}

/// Every normalized command name, in no particular order
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.keys().copied()
}
