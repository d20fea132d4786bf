//! Writer for the nested key/value text format of `project.pbxproj`.
//!
//! The emitter only knows about syntax: properties, lists, maps, identified
//! objects and section comments. Every `start_*` must be closed by the
//! matching `end_*`; closing the wrong kind of scope is a bug in the caller
//! and panics.

use kiln_common::ObjectId;

/// First line of every project file.
pub const UTF8_MARKER: &str = "// !$*UTF8*$!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Document,
    List,
    Map,
    Object,
}

/// Stateful text writer tracking indentation and open scopes.
#[derive(Debug, Default)]
pub struct Emitter {
    output: String,
    indent: usize,
    scopes: Vec<Scope>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.indent
    }

    /// Write the UTF-8 marker and open the top-level dictionary.
    pub fn begin_document(&mut self) {
        assert!(
            self.scopes.is_empty() && self.output.is_empty(),
            "document already started"
        );
        self.writeln(UTF8_MARKER);
        self.open("{", Scope::Document);
    }

    /// Close the top-level dictionary and return the text.
    pub fn finish(mut self) -> String {
        assert_eq!(
            self.scopes.as_slice(),
            [Scope::Document],
            "unbalanced scopes at end of document"
        );
        self.close(Scope::Document, "}");
        self.output
    }

    /// `name = value;`
    pub fn property(&mut self, name: &str, value: &str) {
        self.writeln(&format!("{} = {};", name, quote(value)));
    }

    /// `name = ID /* comment */;`
    pub fn property_hash(&mut self, name: &str, id: ObjectId, comment: &str) {
        self.writeln(&format!("{} = {};", name, reference(id, comment)));
    }

    /// `name = (`
    pub fn start_list(&mut self, name: &str) {
        self.open(&format!("{} = (", name), Scope::List);
    }

    pub fn list_item(&mut self, value: &str) {
        self.expect_open(Scope::List);
        self.writeln(&format!("{},", quote(value)));
    }

    pub fn list_item_hash(&mut self, id: ObjectId, comment: &str) {
        self.expect_open(Scope::List);
        self.writeln(&format!("{},", reference(id, comment)));
    }

    pub fn end_list(&mut self) {
        self.close(Scope::List, ");");
    }

    /// `name = {`
    pub fn start_map(&mut self, name: &str) {
        self.open(&format!("{} = {{", name), Scope::Map);
    }

    /// A map keyed by an object identifier: `ID = {`
    pub fn start_map_hash(&mut self, id: ObjectId) {
        self.open(&format!("{} = {{", id), Scope::Map);
    }

    pub fn map_item(&mut self, name: &str, value: &str) {
        self.expect_open(Scope::Map);
        self.property(name, value);
    }

    pub fn end_map(&mut self) {
        self.close(Scope::Map, "};");
    }

    /// `ID /* comment */ = {`, or `ID = {` for an empty comment.
    pub fn object_start(&mut self, id: ObjectId, comment: &str) {
        self.open(&format!("{} = {{", reference(id, comment)), Scope::Object);
    }

    pub fn object_end(&mut self) {
        self.close(Scope::Object, "};");
    }

    /// Opening comment of a run of objects of one type. Always at column zero.
    pub fn section_start(&mut self, name: &str) {
        self.output.push('\n');
        self.output
            .push_str(&format!("/* Begin {} section */\n", name));
    }

    pub fn section_end(&mut self, name: &str) {
        self.output.push_str(&format!("/* End {} section */\n", name));
    }

    fn open(&mut self, line: &str, scope: Scope) {
        self.writeln(line);
        self.scopes.push(scope);
        self.indent += 1;
    }

    fn close(&mut self, scope: Scope, line: &str) {
        match self.scopes.pop() {
            Some(open) if open == scope => {}
            other => panic!("closing {:?} while {:?} is open", scope, other),
        }
        self.indent -= 1;
        self.writeln(line);
    }

    fn expect_open(&self, scope: Scope) {
        assert_eq!(
            self.scopes.last(),
            Some(&scope),
            "item written outside of a {:?}",
            scope
        );
    }

    fn writeln(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.output.push('\t');
        }
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// `ID /* comment */`
fn reference(id: ObjectId, comment: &str) -> String {
    if comment.is_empty() {
        id.to_string()
    } else {
        format!("{} /* {} */", id, comment.replace("*/", "* /"))
    }
}

/// Quote a scalar unless it is a plain token.
pub fn quote(value: &str) -> String {
    let plain = !value.is_empty()
        && !value.contains("//")
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '/'));

    if plain {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
